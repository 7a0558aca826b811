// PixelWebGL
// copyright zipxing@hotmail.com 2022～2025

//! Error taxonomy of the binding layer. Acquisition failures are fatal to
//! the caller; compile and link failures are recoverable and carry the
//! backend's diagnostic log verbatim. Everything else the backend can get
//! wrong stays silent by contract and is only visible through the error
//! query (`Context::get_error`).

use crate::consts::ShaderStage;

/// Binding layer result type
pub type GlResult<T> = Result<T, GlError>;

/// Binding layer error types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GlError {
    /// The host could not supply a rendering context for the surface
    Unsupported,
    /// Shader compilation failed; `log` is the backend's diagnostic text
    CompileFailed { stage: ShaderStage, log: String },
    /// Program linking failed; `log` is the backend's diagnostic text
    LinkFailed { log: String },
}

impl std::fmt::Display for GlError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GlError::Unsupported => write!(f, "WebGL not supported by the host surface"),
            GlError::CompileFailed { stage, log } => {
                let name = match stage {
                    ShaderStage::Vertex => "vertex",
                    ShaderStage::Fragment => "fragment",
                };
                write!(f, "{} shader compilation failed: {}", name, log)
            }
            GlError::LinkFailed { log } => write!(f, "program linking failed: {}", log),
        }
    }
}

impl std::error::Error for GlError {}
