//! Rendering
//!
//! The pieces of a host rendering engine the shallow renderer consumes: a
//! renderer that turns a fragment into a frame buffer, the tree builder
//! fragments render into, and the component contract.

pub mod builder;
pub mod component;
pub mod fragment;

pub use builder::{RenderTreeBuilder, TreeBuilder};
pub use component::{short_type_name, Component, ComponentDescriptor, ComponentParameters};
pub use fragment::Fragment;

use crate::error::RenderError;
use crate::frame::FrameBuffer;
use tracing::{debug, instrument};

/// Default number of slots a rendered frame buffer is padded to
pub const DEFAULT_BUFFER_CAPACITY: usize = 16;

/// Renders a fragment once into a frame buffer
pub trait Renderer {
    fn render(&self, fragment: &Fragment) -> Result<FrameBuffer, RenderError>;
}

/// Scratch renderer
///
/// Every call builds into a fresh [`RenderTreeBuilder`] that is dropped once
/// the buffer is captured. Buffers are padded with `None` frames to
/// `max(buffer_capacity, next_power_of_two(len))`.
#[derive(Debug, Clone)]
pub struct TestRenderer {
    buffer_capacity: usize,
}

impl Default for TestRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TestRenderer {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_BUFFER_CAPACITY)
    }

    pub fn with_capacity(buffer_capacity: usize) -> Self {
        Self { buffer_capacity }
    }

    pub fn buffer_capacity(&self) -> usize {
        self.buffer_capacity
    }
}

impl Renderer for TestRenderer {
    #[instrument(skip_all, fields(buffer_capacity = self.buffer_capacity))]
    fn render(&self, fragment: &Fragment) -> Result<FrameBuffer, RenderError> {
        let mut builder = RenderTreeBuilder::new();
        fragment.render_into(&mut builder)?;
        let frames = builder.finish()?;

        let capacity = self.buffer_capacity.max(frames.len().next_power_of_two());
        debug!(frames = frames.len(), capacity, "Rendered fragment");
        Ok(FrameBuffer::padded(frames, capacity))
    }
}
