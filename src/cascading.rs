//! Cascading-value wrappers
//!
//! Wraps a component in one ambient-value provider per cascading parameter.
//! The first cascading parameter becomes the outermost provider; the component
//! sits inside the innermost one and receives the direct parameters.

use crate::error::{ParameterError, RenderError};
use crate::frame::AttributeValue;
use crate::parameter::{Parameter, ParameterValue};
use crate::render::{
    short_type_name, Component, ComponentDescriptor, ComponentParameters, Fragment,
    RenderTreeBuilder,
};
use std::any::{type_name, Any};
use std::collections::VecDeque;
use std::marker::PhantomData;
use tracing::{debug, instrument};

/// Provider attribute carrying the optional value name
pub const NAME: &str = "Name";
/// Provider attribute carrying the ambient value
pub const VALUE: &str = "Value";
/// Provider attribute marking the value as fixed for the provider's lifetime
pub const IS_FIXED: &str = "IsFixed";
/// Provider attribute carrying the wrapped content
pub const CHILD_CONTENT: &str = "ChildContent";

/// Ambient-value provider for values of type `T`
///
/// Makes its `Value` attribute available to [`RenderTreeBuilder::cascading`]
/// lookups while its `ChildContent` renders.
pub struct CascadingValue<T>(PhantomData<fn() -> T>);

impl<T: Any + Send + Sync> CascadingValue<T> {
    pub fn descriptor() -> ComponentDescriptor {
        ComponentDescriptor::new(
            short_type_name(type_name::<Self>()),
            CascadingValue::<T>(PhantomData),
        )
    }
}

impl<T: Any + Send + Sync> Component for CascadingValue<T> {
    fn render(
        &self,
        parameters: &ComponentParameters,
        builder: &mut RenderTreeBuilder,
    ) -> Result<(), RenderError> {
        let component = short_type_name(type_name::<Self>());
        let value = match parameters.get(VALUE) {
            Some(AttributeValue::Object(value)) if value.is::<T>() => value.clone(),
            Some(_) => {
                return Err(RenderError::ParameterType {
                    component,
                    parameter: VALUE.to_string(),
                    expected: type_name::<T>().to_string(),
                })
            }
            None => {
                return Err(RenderError::MissingParameter {
                    component,
                    parameter: VALUE.to_string(),
                })
            }
        };
        let name = parameters.text(NAME).map(str::to_string);
        let child = parameters.fragment(CHILD_CONTENT).cloned();

        builder.with_cascading_value(name, value, |builder| match &child {
            Some(child) => builder.add_content(child),
            None => Ok(()),
        })
    }
}

struct ProviderNode {
    name: Option<String>,
    value: ParameterValue,
}

impl ProviderNode {
    fn wrap(self, child: Fragment) -> Fragment {
        let ProviderNode { name, value } = self;
        let provider = value.provider();
        Fragment::new(move |builder| {
            builder.open_component(provider.clone());
            if let Some(name) = &name {
                builder.add_attribute(NAME, name.as_str())?;
            }
            builder.add_attribute(VALUE, value.clone())?;
            builder.add_attribute(IS_FIXED, true)?;
            builder.add_attribute(CHILD_CONTENT, child.clone())?;
            builder.close_component()
        })
    }
}

/// Pending cascading parameters, consumed outermost first
struct ProviderChain {
    pending: VecDeque<ProviderNode>,
}

impl ProviderChain {
    fn into_fragment(mut self, target: Fragment) -> Fragment {
        match self.pending.pop_front() {
            None => target,
            Some(provider) => {
                let child = self.into_fragment(target);
                provider.wrap(child)
            }
        }
    }
}

/// Builds the fragment that renders a component inside its cascading providers
#[derive(Debug, Clone)]
pub struct CascadingWrapperBuilder {
    component: ComponentDescriptor,
}

impl CascadingWrapperBuilder {
    pub fn new(component: ComponentDescriptor) -> Self {
        Self { component }
    }

    pub fn component(&self) -> &ComponentDescriptor {
        &self.component
    }

    /// Build the wrapped fragment
    ///
    /// Fails before anything renders when a cascading parameter has no value
    /// (its provider type cannot be resolved) or a direct parameter has no name.
    /// Fixed providers are single-use: the fragment does not support changing
    /// a provided value after its first render.
    #[instrument(skip_all, fields(component = %self.component.type_name(), parameters = parameters.len()))]
    pub fn build(&self, parameters: &[Parameter]) -> Result<Fragment, ParameterError> {
        let mut chain = ProviderChain {
            pending: VecDeque::new(),
        };
        let mut attributes = Vec::new();

        for (index, parameter) in parameters.iter().enumerate() {
            if parameter.is_cascading_value {
                let value = parameter.value.clone().ok_or_else(|| {
                    ParameterError::InvalidParameter {
                        name: parameter.name.clone(),
                        index,
                        reason: "cascading value is null, its ambient type cannot be resolved"
                            .to_string(),
                    }
                })?;
                chain.pending.push_back(ProviderNode {
                    name: parameter.name.clone(),
                    value,
                });
            } else {
                let name = parameter.name.clone().ok_or_else(|| {
                    ParameterError::InvalidParameter {
                        name: None,
                        index,
                        reason: "direct parameters must be named".to_string(),
                    }
                })?;
                let value = parameter
                    .value
                    .clone()
                    .map_or(AttributeValue::Null, AttributeValue::Object);
                attributes.push((name, value));
            }
        }

        debug!(
            providers = chain.pending.len(),
            direct = attributes.len(),
            "Building cascading wrapper"
        );
        let target = Fragment::component(self.component.clone(), attributes);
        Ok(chain.into_fragment(target))
    }
}
