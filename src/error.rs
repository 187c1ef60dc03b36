//! Error types for shallow rendering and cascading-value composition.

use thiserror::Error;

/// Errors raised while walking a frame sequence
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameError {
    #[error("Malformed frame sequence at sequence {sequence}: {reason}")]
    MalformedFrameSequence { sequence: u32, reason: String },

    #[error("Unsupported frame type '{frame_type}' at sequence {sequence}")]
    UnsupportedFrameType { sequence: u32, frame_type: String },

    #[error("Root frame index {index} is outside a buffer of {frames} frames")]
    RootOutOfRange { index: usize, frames: usize },
}

/// Errors raised while turning parameters into a fragment
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParameterError {
    #[error("Invalid parameter '{}' (index {index}): {reason}", .name.as_deref().unwrap_or("<unnamed>"))]
    InvalidParameter {
        name: Option<String>,
        index: usize,
        reason: String,
    },
}

/// Errors raised by the render tree builder and renderers
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("No open {expected} to close")]
    UnbalancedClose { expected: &'static str },

    #[error("{count} frame(s) left open at the end of the render, innermost at sequence {sequence}")]
    UnclosedFrames { count: usize, sequence: u32 },

    #[error("Attribute '{name}' added after content at sequence {sequence}")]
    MisplacedAttribute { name: String, sequence: u32 },

    #[error("Component '{component}' is missing parameter '{parameter}'")]
    MissingParameter { component: String, parameter: String },

    #[error("Component '{component}' parameter '{parameter}' is not a {expected}")]
    ParameterType {
        component: String,
        parameter: String,
        expected: String,
    },

    #[error("No cascading value of type {type_name} (name: {name:?}) is in scope")]
    MissingCascadingValue {
        type_name: String,
        name: Option<String>,
    },

    #[error("Frame error: {0}")]
    Frame(#[from] FrameError),
}

/// Top-level errors surfaced to test code
#[derive(Debug, Error)]
pub enum ShallowError {
    #[error("Parameter error: {0}")]
    Parameter(#[from] ParameterError),

    #[error("Frame error: {0}")]
    Frame(#[from] FrameError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Component '{0}' was not found in the rendered frame buffer")]
    ComponentNotRendered(String),

    #[error("Snapshot error: {0}")]
    Snapshot(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<config::ConfigError> for ShallowError {
    fn from(err: config::ConfigError) -> Self {
        ShallowError::Config(err.to_string())
    }
}
