//! Shallow rendering
//!
//! Renders a component once (inside its cascading providers), keeps only the
//! component's own subtree, collapses every nested component to a placeholder,
//! and hands back a fragment that re-emits the reduced frames under a host
//! component carrying the rendered component's type name.

use crate::cascading::CascadingWrapperBuilder;
use crate::config::ShallowConfig;
use crate::error::ShallowError;
use crate::frame::{Frame, FrameBuffer, FrameFilter};
use crate::parameter::Parameter;
use crate::render::{ComponentDescriptor, Fragment, Renderer, TestRenderer};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Render-then-filter workflow over a renderer
#[derive(Debug, Clone)]
pub struct ShallowRenderer<R = TestRenderer> {
    renderer: R,
    filter: FrameFilter,
}

impl Default for ShallowRenderer<TestRenderer> {
    fn default() -> Self {
        Self::new()
    }
}

impl ShallowRenderer<TestRenderer> {
    pub fn new() -> Self {
        Self::with_renderer(TestRenderer::new(), FrameFilter::default())
    }

    /// Shallow renderer using the configured buffer capacity and placeholder style
    pub fn from_config(config: &ShallowConfig) -> Result<Self, ShallowError> {
        let style = config
            .placeholder
            .to_style()
            .map_err(ShallowError::Config)?;
        Ok(Self::with_renderer(
            TestRenderer::with_capacity(config.renderer.buffer_capacity),
            FrameFilter::new(style),
        ))
    }
}

impl<R: Renderer> ShallowRenderer<R> {
    pub fn with_renderer(renderer: R, filter: FrameFilter) -> Self {
        Self { renderer, filter }
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn filter(&self) -> &FrameFilter {
        &self.filter
    }

    /// Reduced frames of `component`'s own output
    ///
    /// The first frames are the component's direct-parameter attributes,
    /// followed by its output with nested components collapsed. Kept frames
    /// are returned exactly as rendered: sequences have gaps where subtrees
    /// collapsed, and element and region lengths still count the collapsed
    /// frames, so they must not be walked. [`ShallowRenderer::shallow_render`]
    /// renumbers and recounts them when the fragment is rendered.
    #[instrument(skip_all, fields(component = %component.type_name(), parameters = parameters.len()))]
    pub fn render_frames(
        &self,
        component: &ComponentDescriptor,
        parameters: &[Parameter],
    ) -> Result<Vec<Frame>, ShallowError> {
        let wrapped = CascadingWrapperBuilder::new(component.clone()).build(parameters)?;
        let buffer = self.renderer.render(&wrapped)?;

        let providers = parameters
            .iter()
            .filter(|parameter| parameter.is_cascading_value)
            .count();
        let root = locate_root(&buffer, component.type_name(), providers)?;
        let reduced = self.filter.filter_component(buffer.frames(), root)?;

        debug!(
            rendered = buffer.len(),
            reduced = reduced.len(),
            root,
            "Shallow rendered component"
        );
        Ok(reduced)
    }

    /// Fragment re-emitting `component`'s reduced output
    pub fn shallow_render(
        &self,
        component: &ComponentDescriptor,
        parameters: &[Parameter],
    ) -> Result<Fragment, ShallowError> {
        let reduced = self.render_frames(component, parameters)?;
        Ok(replay(component.type_name(), reduced))
    }
}

/// The component sits right inside its providers, so it is the component
/// frame following the provider frames.
fn locate_root(buffer: &FrameBuffer, type_name: &str, providers: usize) -> Result<usize, ShallowError> {
    buffer
        .frames()
        .iter()
        .enumerate()
        .filter(|(_, frame)| frame.component_type_name().is_some())
        .nth(providers)
        .filter(|(_, frame)| frame.component_type_name() == Some(type_name))
        .map(|(index, _)| index)
        .ok_or_else(|| ShallowError::ComponentNotRendered(type_name.to_string()))
}

/// Host component re-emitting `frames` wherever the fragment is rendered
fn replay(type_name: &str, frames: Vec<Frame>) -> Fragment {
    let frames: Arc<[Frame]> = frames.into();
    let host = ComponentDescriptor::from_fn(type_name, move |_, builder| {
        builder.append_reindexed(&frames);
        Ok(())
    });
    Fragment::component(host, Vec::new())
}
