pub mod config;
pub mod crawl;
mod error;
pub mod output;
pub mod region;
pub mod session;
pub mod util;

pub use crate::error::{Error, Result};
