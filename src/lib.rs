pub mod bridge;
pub mod config;
pub mod error;
pub mod navigate;
pub mod protocol;
pub mod storage;
pub mod transfer;
pub mod utils;

pub use bridge::Bridge;
