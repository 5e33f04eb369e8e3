pub mod bump;
pub mod check;
pub mod config;
pub mod error;
pub mod git_ops;
pub mod hook;
pub mod loose;
pub mod resolver;
pub mod sources;
pub mod ui;
pub mod version;

pub use error::{Result, TagVerError};
