//! Error type for the demo binaries.

use gridpath_core::GridError;
use gridpath_search::SearchError;
use thiserror::Error;

use crate::config::ConfigError;

#[derive(Error, Debug)]
pub enum DemoError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("grid error: {0}")]
    Grid(#[from] GridError),

    #[error("search error: {0}")]
    Search(#[from] SearchError),

    #[error("terminal error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DemoError>;
