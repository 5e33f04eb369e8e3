use thiserror::Error;

/// Unified error type for tagver operations
#[derive(Error, Debug)]
pub enum TagVerError {
    /// Operator mistake (wrong branch, dirty tree, misconfigured project).
    /// Callers print these without a backtrace and exit non-zero.
    #[error("{0}")]
    Usage(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Hook command failed: {0}")]
    Hook(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in tagver
pub type Result<T> = std::result::Result<T, TagVerError>;

impl TagVerError {
    /// Create a usage error with context
    pub fn usage(msg: impl Into<String>) -> Self {
        TagVerError::Usage(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        TagVerError::Config(msg.into())
    }

    /// Create a hook error with context
    pub fn hook(msg: impl Into<String>) -> Self {
        TagVerError::Hook(msg.into())
    }

    /// True for errors that should be shown to the operator as a plain
    /// message rather than propagated as an unexpected fault.
    pub fn is_usage(&self) -> bool {
        matches!(self, TagVerError::Usage(_))
    }
}
