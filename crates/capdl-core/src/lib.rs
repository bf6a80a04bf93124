pub mod config;
pub mod logging;

pub mod dataset;
pub mod dispatch;
pub mod error;
pub mod fetcher;
pub mod filter;
pub mod outcome;
pub mod storage;
pub mod video_id;
