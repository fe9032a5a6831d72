pub mod config;
pub mod logging;

pub mod downloader;
pub mod extract;
pub mod pipeline;
pub mod progress;
pub mod storage;
pub mod url_model;
