use thiserror::Error;

#[derive(Debug, Error)]
pub enum OpenclawError {
    #[error("not installed: run 'openclaw init' first (no .agent/ found)")]
    NotInstalled,

    #[error("template pack not found: package may be corrupted")]
    TemplatesMissing,

    #[error(".agent/ already exists: use --merge (safe) or --force (destructive)")]
    Conflict,

    #[error("execution failed during '{action}': {message}")]
    Execution { action: String, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, OpenclawError>;
