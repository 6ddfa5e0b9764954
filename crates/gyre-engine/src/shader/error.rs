use std::fmt;

use super::ShaderStage;

/// A shader compile or link failure, carrying the driver's info log.
#[derive(Debug, Clone, PartialEq)]
pub enum ShaderError {
    /// Shader object creation failed before any source was seen.
    CreateShader { stage: ShaderStage, reason: String },
    /// Program object creation failed.
    CreateProgram { reason: String },
    /// Stage compilation failed.
    Compile { stage: ShaderStage, log: String },
    /// Program linking failed.
    Link { log: String },
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderError::CreateShader { stage, reason } => {
                write!(f, "failed to create {stage} shader object: {reason}")
            }
            ShaderError::CreateProgram { reason } => {
                write!(f, "failed to create program object: {reason}")
            }
            ShaderError::Compile { stage, log } => {
                write!(f, "{stage} shader failed to compile:\n{log}")
            }
            ShaderError::Link { log } => {
                write!(f, "shader program failed to link:\n{log}")
            }
        }
    }
}

impl std::error::Error for ShaderError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compile_error_names_the_stage_and_keeps_the_log() {
        let err = ShaderError::Compile {
            stage: ShaderStage::Fragment,
            log: "0:3(2): error: syntax error".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("fragment shader"));
        assert!(text.contains("syntax error"));
    }

    #[test]
    fn link_error_keeps_the_log() {
        let err = ShaderError::Link { log: "undefined varying vColor".to_string() };
        assert!(err.to_string().contains("undefined varying vColor"));
    }
}
