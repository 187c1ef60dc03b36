//! Integration tests for cascading-value wrapping

use super::test_utils::{Counter, ThemedLabel};
use shallow_render::cascading::{CHILD_CONTENT, IS_FIXED, NAME, VALUE};
use shallow_render::frame::AttributeValue;
use shallow_render::render::RenderTreeBuilder;
use shallow_render::{
    wrap_with_cascading_values, ComponentDescriptor, Fragment, Frame, FrameKind, Parameter,
    ParameterError, ParameterValue, Renderer, TestRenderer,
};

fn render(fragment: &Fragment) -> Vec<Frame> {
    TestRenderer::new()
        .render(fragment)
        .unwrap()
        .logical_frames()
        .to_vec()
}

fn attribute_names(frames: &[Frame], component: usize) -> Vec<String> {
    frames[component + 1..]
        .iter()
        .take_while(|frame| matches!(frame.kind, FrameKind::Attribute { .. }))
        .filter_map(|frame| match &frame.kind {
            FrameKind::Attribute { name, .. } => Some(name.clone()),
            _ => None,
        })
        .collect()
}

#[test]
fn test_providers_nest_in_parameter_order() {
    let fragment = wrap_with_cascading_values::<ThemedLabel>(&[
        Parameter::named_cascading("Theme", "dark".to_string()),
        Parameter::cascading(7u32),
    ])
    .unwrap();
    let frames = render(&fragment);

    let components: Vec<(usize, &str)> = frames
        .iter()
        .enumerate()
        .filter_map(|(index, frame)| frame.component_type_name().map(|name| (index, name)))
        .collect();
    let names: Vec<&str> = components.iter().map(|(_, name)| *name).collect();
    assert_eq!(
        names,
        vec!["CascadingValue<String>", "CascadingValue<u32>", "ThemedLabel"]
    );

    // Each provider encloses everything after it.
    let (outer, _) = components[0];
    let (inner, _) = components[1];
    let outer_len = frames[outer].component_subtree_length().unwrap() as usize;
    let inner_len = frames[inner].component_subtree_length().unwrap() as usize;
    assert_eq!(outer + outer_len, frames.len());
    assert_eq!(inner + inner_len, frames.len());

    assert_eq!(
        attribute_names(&frames, outer),
        vec![NAME, VALUE, IS_FIXED, CHILD_CONTENT]
    );
    assert_eq!(
        attribute_names(&frames, inner),
        vec![VALUE, IS_FIXED, CHILD_CONTENT]
    );

    assert!(frames.contains(&Frame::attribute(
        components[2].0 as u32 + 2,
        "class",
        "dark"
    )));
}

#[test]
fn test_named_value_does_not_satisfy_unnamed_lookup() {
    let reads_unnamed = ComponentDescriptor::from_fn("ReadsUnnamed", |_, builder| {
        let theme = builder.cascading::<String>(None).cloned();
        builder.add_text(theme.unwrap_or_else(|| "none".to_string()));
        Ok(())
    });
    let fragment = shallow_render::CascadingWrapperBuilder::new(reads_unnamed)
        .build(&[Parameter::named_cascading("Theme", "dark".to_string())])
        .unwrap();

    let frames = render(&fragment);
    assert!(frames.contains(&Frame::text(frames.len() as u32 - 1, "none")));
}

#[test]
fn test_innermost_provider_wins() {
    let reads = ComponentDescriptor::from_fn("Reads", |_, builder| {
        let value = *builder.require_cascading::<i32>(None)?;
        builder.add_text(value.to_string());
        Ok(())
    });
    let fragment = shallow_render::CascadingWrapperBuilder::new(reads)
        .build(&[Parameter::cascading(1i32), Parameter::cascading(2i32)])
        .unwrap();

    let frames = render(&fragment);
    assert_eq!(frames.last().unwrap().kind, FrameKind::Text { text: "2".to_string() });
}

/// Scenario C: no cascading parameters means no providers
#[test]
fn test_without_cascading_values_is_plain_component() {
    let start = ParameterValue::new(3i32);
    let parameters = [Parameter::new(Some("Start".to_string()), Some(start.clone()), false)];

    let wrapped = wrap_with_cascading_values::<Counter>(&parameters).unwrap();
    let plain = Fragment::component(
        ComponentDescriptor::of::<Counter>(),
        vec![("Start".to_string(), AttributeValue::Object(start))],
    );

    let wrapped_frames = render(&wrapped);
    assert_eq!(wrapped_frames, render(&plain));
    assert_eq!(wrapped_frames[0], Frame::component(0, "Counter", 5));
    assert!(wrapped_frames.contains(&Frame::text(4, "Clicks: 3")));
}

/// Scenario D: a null cascading value is rejected before anything renders
#[test]
fn test_null_cascading_value_is_rejected() {
    let err = wrap_with_cascading_values::<ThemedLabel>(&[
        Parameter::direct("Unused", 1u8),
        Parameter::new(Some("Theme".to_string()), None, true),
    ])
    .unwrap_err();

    match err {
        ParameterError::InvalidParameter { name, index, .. } => {
            assert_eq!(name.as_deref(), Some("Theme"));
            assert_eq!(index, 1);
        }
    }
}

#[test]
fn test_wrapped_fragment_renders_inside_another_tree() {
    let fragment = wrap_with_cascading_values::<ThemedLabel>(&[Parameter::named_cascading(
        "Theme",
        "light".to_string(),
    )])
    .unwrap();

    let mut builder = RenderTreeBuilder::new();
    builder.open_element("div");
    builder.add_content(&fragment).unwrap();
    builder.close_element().unwrap();
    let frames = builder.finish().unwrap();

    assert_eq!(frames[0], Frame::element(0, "div", frames.len() as u32));
    assert_eq!(frames[1].component_type_name(), Some("CascadingValue<String>"));
}

#[test]
fn test_provided_value_is_scoped_to_provider() {
    let fragment = wrap_with_cascading_values::<Counter>(&[Parameter::cascading(9i32)]).unwrap();

    let mut builder = RenderTreeBuilder::new();
    builder.add_content(&fragment).unwrap();
    assert!(builder.cascading::<i32>(None).is_none());
}
