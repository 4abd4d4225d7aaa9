pub mod bridge;
pub mod config;
pub mod producer;
pub mod traits;
pub mod watermark;
