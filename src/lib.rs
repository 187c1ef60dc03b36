//! Shallow Render: component-test rendering helpers
//!
//! Reduces a rendered component's flat frame sequence to its own output, with
//! every nested component collapsed to a single placeholder, and wraps
//! components in cascading-value providers before they render.

pub mod api;
pub mod cascading;
pub mod config;
pub mod error;
pub mod frame;
pub mod logging;
pub mod parameter;
pub mod render;
pub mod shallow;

pub use api::{shallow_render, shallow_render_with, wrap_with_cascading_values};
pub use cascading::{CascadingValue, CascadingWrapperBuilder};
pub use error::{FrameError, ParameterError, RenderError, ShallowError};
pub use frame::{Frame, FrameBuffer, FrameFilter, FrameKind, FrameType};
pub use parameter::{Parameter, ParameterValue};
pub use render::{Component, ComponentDescriptor, Fragment, Renderer, TestRenderer};
pub use shallow::ShallowRenderer;
