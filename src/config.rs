//! Configuration System
//!
//! Layered configuration for the shallow renderer: placeholder style, scratch
//! renderer buffer sizing, and logging. Sources are merged by [`ConfigLoader`].

use crate::frame::PlaceholderStyle;
use crate::logging::LoggingConfig;
use crate::render::DEFAULT_BUFFER_CAPACITY;
use serde::{Deserialize, Serialize};

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShallowConfig {
    /// How collapsed components are written
    #[serde(default)]
    pub placeholder: PlaceholderConfig,

    /// Scratch renderer settings
    #[serde(default)]
    pub renderer: RendererConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Placeholder configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceholderConfig {
    /// element (machine-readable) or comment (informational)
    #[serde(default = "default_style")]
    pub style: String,

    /// Attribute namespace for element placeholders
    #[serde(default = "default_namespace")]
    pub namespace: String,
}

fn default_style() -> String {
    "element".to_string()
}

fn default_namespace() -> String {
    "shallow".to_string()
}

impl Default for PlaceholderConfig {
    fn default() -> Self {
        Self {
            style: default_style(),
            namespace: default_namespace(),
        }
    }
}

impl PlaceholderConfig {
    pub fn to_style(&self) -> Result<PlaceholderStyle, String> {
        match self.style.as_str() {
            "element" => {
                let valid = !self.namespace.is_empty()
                    && self
                        .namespace
                        .chars()
                        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
                if !valid {
                    return Err(format!(
                        "Invalid placeholder namespace: '{}'",
                        self.namespace
                    ));
                }
                Ok(PlaceholderStyle::Element {
                    namespace: self.namespace.clone(),
                })
            }
            "comment" => Ok(PlaceholderStyle::Comment),
            other => Err(format!(
                "Invalid placeholder style: {} (must be 'element' or 'comment')",
                other
            )),
        }
    }
}

/// Scratch renderer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RendererConfig {
    /// Minimum number of slots in a rendered frame buffer
    #[serde(default = "default_buffer_capacity")]
    pub buffer_capacity: usize,
}

fn default_buffer_capacity() -> usize {
    DEFAULT_BUFFER_CAPACITY
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            buffer_capacity: default_buffer_capacity(),
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Placeholder(String),
    Renderer(String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Placeholder(msg) => write!(f, "Placeholder: {}", msg),
            ValidationError::Renderer(msg) => write!(f, "Renderer: {}", msg),
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl ShallowConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = self.placeholder.to_style() {
            errors.push(ValidationError::Placeholder(e));
        }

        if self.renderer.buffer_capacity == 0 {
            errors.push(ValidationError::Renderer(
                "buffer_capacity must be at least 1".to_string(),
            ));
        }

        if let Err(e) = self.logging.validate() {
            errors.push(ValidationError::Logging(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
