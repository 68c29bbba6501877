pub mod api;
pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod prompt;
pub mod report;

pub use error::{Error, Result};
