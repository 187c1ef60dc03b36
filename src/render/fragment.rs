//! Render fragments: deferred, replayable descriptions of a render

use crate::error::RenderError;
use crate::frame::AttributeValue;
use crate::render::{ComponentDescriptor, RenderTreeBuilder};
use std::fmt;
use std::sync::Arc;

type RenderFn = dyn Fn(&mut RenderTreeBuilder) -> Result<(), RenderError> + Send + Sync;

/// Deferred render
///
/// Cloning shares the same closure; rendering it again replays it.
#[derive(Clone)]
pub struct Fragment {
    render: Arc<RenderFn>,
}

impl Fragment {
    pub fn new<F>(render: F) -> Self
    where
        F: Fn(&mut RenderTreeBuilder) -> Result<(), RenderError> + Send + Sync + 'static,
    {
        Self {
            render: Arc::new(render),
        }
    }

    pub fn empty() -> Self {
        Self::new(|_| Ok(()))
    }

    pub fn text(text: impl Into<String>) -> Self {
        let text = text.into();
        Self::new(move |builder| {
            builder.add_text(text.clone());
            Ok(())
        })
    }

    /// A single component frame with the given attributes
    pub fn component(component: ComponentDescriptor, attributes: Vec<(String, AttributeValue)>) -> Self {
        Self::new(move |builder| {
            builder.open_component(component.clone());
            for (name, value) in &attributes {
                builder.add_attribute(name.clone(), value.clone())?;
            }
            builder.close_component()
        })
    }

    pub fn render_into(&self, builder: &mut RenderTreeBuilder) -> Result<(), RenderError> {
        (self.render)(builder)
    }

    pub fn ptr_eq(&self, other: &Fragment) -> bool {
        Arc::ptr_eq(&self.render, &other.render)
    }
}

impl PartialEq for Fragment {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Fragment(..)")
    }
}
