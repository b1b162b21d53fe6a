use thiserror::Error;

/// Failures that prevent a viewing session from starting at all.
#[derive(Debug, Error)]
pub enum InitError {
    #[error("graphics context unavailable: {0}")]
    Context(String),

    #[error("surface creation failed: {0}")]
    Surface(String),

    #[error("shader source unavailable: {0}")]
    Shader(#[from] std::io::Error),
}
