pub mod app;
pub mod cli;
pub mod clock;
pub mod download;
pub mod error;
pub mod export;
pub mod intake;
pub mod models;
pub mod records;
pub mod storage;
pub mod ui;
pub mod utils;

pub use error::{Error, Result};
