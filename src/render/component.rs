//! Components and their parameters

use crate::error::RenderError;
use crate::frame::AttributeValue;
use crate::render::{Fragment, RenderTreeBuilder};
use std::any::type_name;
use std::fmt;
use std::sync::Arc;

/// Something that renders frames into a builder
///
/// Closures with the same signature are components too.
pub trait Component: Send + Sync {
    fn render(
        &self,
        parameters: &ComponentParameters,
        builder: &mut RenderTreeBuilder,
    ) -> Result<(), RenderError>;
}

impl<F> Component for F
where
    F: Fn(&ComponentParameters, &mut RenderTreeBuilder) -> Result<(), RenderError> + Send + Sync,
{
    fn render(
        &self,
        parameters: &ComponentParameters,
        builder: &mut RenderTreeBuilder,
    ) -> Result<(), RenderError> {
        self(parameters, builder)
    }
}

/// A component instance together with the type name its frames are labeled with
#[derive(Clone)]
pub struct ComponentDescriptor {
    type_name: String,
    component: Arc<dyn Component>,
}

impl ComponentDescriptor {
    pub fn new(type_name: impl Into<String>, component: impl Component + 'static) -> Self {
        Self {
            type_name: type_name.into(),
            component: Arc::new(component),
        }
    }

    /// Descriptor for a closure component
    pub fn from_fn<F>(type_name: impl Into<String>, render: F) -> Self
    where
        F: Fn(&ComponentParameters, &mut RenderTreeBuilder) -> Result<(), RenderError>
            + Send
            + Sync
            + 'static,
    {
        Self::new(type_name, render)
    }

    /// Descriptor for a default-constructed `C`, labeled with its short type name
    pub fn of<C: Component + Default + 'static>() -> Self {
        Self::new(short_type_name(type_name::<C>()), C::default())
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn render(
        &self,
        parameters: &ComponentParameters,
        builder: &mut RenderTreeBuilder,
    ) -> Result<(), RenderError> {
        self.component.render(parameters, builder)
    }
}

impl fmt::Debug for ComponentDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentDescriptor")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

/// Attributes supplied to a component, in the order they were added
#[derive(Debug, Clone, Default)]
pub struct ComponentParameters {
    component: String,
    entries: Vec<(String, AttributeValue)>,
}

impl ComponentParameters {
    pub fn new(component: impl Into<String>, entries: Vec<(String, AttributeValue)>) -> Self {
        Self {
            component: component.into(),
            entries,
        }
    }

    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.entries
            .iter()
            .find(|(entry, _)| entry == name)
            .map(|(_, value)| value)
    }

    /// Typed object parameter, `None` when absent or of another type
    pub fn optional<T: 'static>(&self, name: &str) -> Option<&T> {
        match self.get(name)? {
            AttributeValue::Object(value) => value.downcast_ref::<T>(),
            _ => None,
        }
    }

    /// Typed object parameter that must be present
    pub fn value<T: 'static>(&self, name: &str) -> Result<&T, RenderError> {
        match self.get(name) {
            None => Err(RenderError::MissingParameter {
                component: self.component.clone(),
                parameter: name.to_string(),
            }),
            Some(AttributeValue::Object(value)) => {
                value
                    .downcast_ref::<T>()
                    .ok_or_else(|| RenderError::ParameterType {
                        component: self.component.clone(),
                        parameter: name.to_string(),
                        expected: type_name::<T>().to_string(),
                    })
            }
            Some(_) => Err(RenderError::ParameterType {
                component: self.component.clone(),
                parameter: name.to_string(),
                expected: type_name::<T>().to_string(),
            }),
        }
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        match self.get(name)? {
            AttributeValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn flag(&self, name: &str) -> Option<bool> {
        match self.get(name)? {
            AttributeValue::Bool(flag) => Some(*flag),
            _ => None,
        }
    }

    pub fn fragment(&self, name: &str) -> Option<&Fragment> {
        match self.get(name)? {
            AttributeValue::Fragment(fragment) => Some(fragment),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Strip module paths from a type name, generic arguments included
///
/// `app::widgets::List<alloc::string::String>` becomes `List<String>`.
pub fn short_type_name(full: &str) -> String {
    let mut short = String::with_capacity(full.len());
    let mut segment_start = 0;

    for (index, ch) in full.char_indices() {
        match ch {
            ':' => segment_start = index + 1,
            '<' | '>' | ',' | ' ' | '(' | ')' | '[' | ']' | '&' | ';' => {
                short.push_str(&full[segment_start..index]);
                short.push(ch);
                segment_start = index + 1;
            }
            _ => {}
        }
    }
    short.push_str(&full[segment_start..]);
    short
}
