//! Entry points for test code

use crate::cascading::CascadingWrapperBuilder;
use crate::error::{ParameterError, ShallowError};
use crate::parameter::Parameter;
use crate::render::{Component, ComponentDescriptor, Fragment};
use crate::shallow::ShallowRenderer;

/// Fragment rendering `C`'s own output with every nested component collapsed
/// to a placeholder
pub fn shallow_render<C: Component + Default + 'static>() -> Result<Fragment, ShallowError> {
    shallow_render_with::<C>(&[])
}

/// [`shallow_render`] with direct and cascading parameters
pub fn shallow_render_with<C: Component + Default + 'static>(
    parameters: &[Parameter],
) -> Result<Fragment, ShallowError> {
    ShallowRenderer::new().shallow_render(&ComponentDescriptor::of::<C>(), parameters)
}

/// Fragment rendering `C` inside one provider per cascading parameter
pub fn wrap_with_cascading_values<C: Component + Default + 'static>(
    parameters: &[Parameter],
) -> Result<Fragment, ParameterError> {
    CascadingWrapperBuilder::new(ComponentDescriptor::of::<C>()).build(parameters)
}
