//! Integration tests for shallow rendering

use super::test_utils::{CountingRenderer, Dashboard, ThemedLabel};
use shallow_render::frame::{FrameKind, Placeholder, PlaceholderStyle};
use shallow_render::render::{RenderTreeBuilder, TreeBuilder};
use shallow_render::{
    shallow_render, shallow_render_with, ComponentDescriptor, Fragment, Frame, FrameFilter, Parameter,
    ParameterError, RenderError, Renderer, ShallowError, ShallowRenderer, TestRenderer,
};

fn theme() -> Parameter {
    Parameter::named_cascading("Theme", "dark".to_string())
}

fn placeholders(frames: &[Frame]) -> Vec<Placeholder> {
    frames
        .iter()
        .filter_map(|frame| match &frame.kind {
            FrameKind::Markup { markup } => Placeholder::parse(markup, &PlaceholderStyle::default()),
            _ => None,
        })
        .collect()
}

/// Scenario A: elements around a component survive, the component's subtree does not
#[test]
fn test_component_between_content_collapses() {
    let frames = vec![
        Frame::element(0, "div", 7),
        Frame::component(1, "Foo", 5),
        Frame::attribute(2, "Label", "x"),
        Frame::element(3, "p", 2),
        Frame::text(4, "foo internal"),
        Frame::markup(5, "<br/>"),
        Frame::text(6, "after"),
        Frame::none(),
        Frame::none(),
    ];

    let output = FrameFilter::default().filter(&frames).unwrap();

    assert_eq!(output.len(), 3);
    assert_eq!(output[0], Frame::element(0, "div", 7));
    assert_eq!(output[2], Frame::text(6, "after"));
    assert_eq!(placeholders(&output), vec![Placeholder::new("Foo", 5)]);
    assert!(output
        .iter()
        .all(|frame| !(2..=5).contains(&frame.sequence)));
}

/// Scenario B: a component nested inside a collapsed component never reaches the output
#[test]
fn test_nested_component_is_subsumed() {
    let mut frames = vec![Frame::component(0, "Outer", 10)];
    frames.push(Frame::element(1, "div", 9));
    frames.push(Frame::text(2, "outer text"));
    frames.push(Frame::component(3, "Inner", 4));
    for sequence in 4..7 {
        frames.push(Frame::text(sequence, "inner"));
    }
    for sequence in 7..10 {
        frames.push(Frame::text(sequence, "outer again"));
    }

    let output = FrameFilter::default().filter(&frames).unwrap();
    assert_eq!(placeholders(&output), vec![Placeholder::new("Outer", 10)]);
    assert_eq!(output.len(), 1);
}

#[test]
fn test_shallow_render_frames_keep_root_output() {
    let reduced = ShallowRenderer::new()
        .render_frames(&ComponentDescriptor::of::<Dashboard>(), &[theme()])
        .unwrap();

    assert_eq!(reduced[0], Frame::element(6, "main", 14));
    assert_eq!(reduced[1], Frame::element(7, "h1", 2));
    assert_eq!(reduced[2], Frame::text(8, "Dashboard"));
    assert_eq!(
        placeholders(&reduced),
        vec![Placeholder::new("Counter", 5), Placeholder::new("ThemedLabel", 4)]
    );
    assert_eq!(reduced[5], Frame::element(18, "footer", 2));
    assert_eq!(reduced[6], Frame::text(19, "end"));
    assert_eq!(reduced.len(), 7);

    assert!(!reduced.iter().any(|frame| matches!(
        &frame.kind,
        FrameKind::Element { name, .. } if name == "button" || name == "span"
    )));
}

#[test]
fn test_shallow_render_sees_cascading_values() {
    let reduced = ShallowRenderer::new()
        .render_frames(
            &ComponentDescriptor::of::<Dashboard>(),
            &[theme(), Parameter::cascading(42i32)],
        )
        .unwrap();

    assert!(reduced
        .iter()
        .any(|frame| frame.kind == FrameKind::Markup {
            markup: "<data value=\"42\"/>".to_string()
        }));
    assert!(reduced
        .iter()
        .all(|frame| frame.component_type_name().is_none()));
}

#[test]
fn test_direct_parameters_lead_reduced_frames() {
    let reduced = ShallowRenderer::new()
        .render_frames(
            &ComponentDescriptor::of::<Dashboard>(),
            &[Parameter::direct("Title", "Overview".to_string()), theme()],
        )
        .unwrap();

    assert!(matches!(
        &reduced[0].kind,
        FrameKind::Attribute { name, .. } if name == "Title"
    ));
    assert!(reduced
        .iter()
        .any(|frame| frame.kind == FrameKind::Text { text: "Overview".to_string() }));
}

#[test]
fn test_shallow_fragment_renders_under_host() {
    let fragment = shallow_render_with::<Dashboard>(&[theme()]).unwrap();
    let buffer = TestRenderer::new().render(&fragment).unwrap();
    let frames = buffer.logical_frames();

    assert_eq!(frames[0], Frame::component(0, "Dashboard", 8));
    assert_eq!(frames.len(), 8);
    assert_eq!(
        frames
            .iter()
            .filter(|frame| frame.component_type_name().is_some())
            .count(),
        1
    );

    // Fragments are replayable.
    let again = TestRenderer::new().render(&fragment).unwrap();
    assert_eq!(buffer, again);
}

/// Page embedding a shallow-rendered dashboard between two texts
fn page_with_shallow_dashboard() -> ComponentDescriptor {
    let dashboard = shallow_render_with::<Dashboard>(&[theme()]).unwrap();
    ComponentDescriptor::from_fn("Page", move |_, builder| {
        builder.open_element("div");
        builder.add_text("before");
        builder.add_content(&dashboard)?;
        builder.add_text("after");
        builder.close_element()
    })
}

#[test]
fn test_embedded_shallow_fragment_is_renumbered() {
    let fragment = Fragment::component(page_with_shallow_dashboard(), Vec::new());
    let buffer = TestRenderer::new().render(&fragment).unwrap();
    let frames = buffer.logical_frames();

    assert_eq!(frames.len(), 12);
    assert_eq!(frames[0], Frame::component(0, "Page", 12));
    assert_eq!(frames[1], Frame::element(1, "div", 11));
    assert_eq!(frames[3], Frame::component(3, "Dashboard", 8));
    assert_eq!(frames[4], Frame::element(4, "main", 7));
    assert_eq!(frames[5], Frame::element(5, "h1", 2));
    assert_eq!(frames[9], Frame::element(9, "footer", 2));
    assert_eq!(frames[11], Frame::text(11, "after"));
    assert!(frames
        .windows(2)
        .all(|pair| pair[0].sequence < pair[1].sequence));
}

#[test]
fn test_embedded_shallow_fragment_collapses_in_parent() {
    let reduced = ShallowRenderer::new()
        .render_frames(&page_with_shallow_dashboard(), &[])
        .unwrap();

    assert_eq!(reduced.len(), 4);
    assert_eq!(reduced[0], Frame::element(1, "div", 11));
    assert_eq!(reduced[1], Frame::text(2, "before"));
    assert_eq!(reduced[2].sequence, 3);
    assert_eq!(placeholders(&reduced), vec![Placeholder::new("Dashboard", 8)]);
    assert_eq!(reduced[3], Frame::text(11, "after"));
}

#[test]
fn test_missing_ambient_value_fails_render() {
    let err = shallow_render::<Dashboard>().unwrap_err();
    assert!(matches!(
        err,
        ShallowError::Render(RenderError::MissingCascadingValue { .. })
    ));
}

/// Scenario D through the shallow workflow: nothing is rendered
#[test]
fn test_null_cascading_value_fails_before_render() {
    let renderer = CountingRenderer::new();
    let shallow = ShallowRenderer::with_renderer(renderer, FrameFilter::default());

    let err = shallow
        .shallow_render(
            &ComponentDescriptor::of::<ThemedLabel>(),
            &[Parameter::new(Some("Theme".to_string()), None, true)],
        )
        .unwrap_err();

    assert!(matches!(
        err,
        ShallowError::Parameter(ParameterError::InvalidParameter { index: 0, .. })
    ));
    assert_eq!(shallow.renderer().renders.get(), 0);
}

#[test]
fn test_successful_shallow_render_renders_once() {
    let shallow = ShallowRenderer::with_renderer(CountingRenderer::new(), FrameFilter::default());
    shallow
        .shallow_render(&ComponentDescriptor::of::<Dashboard>(), &[theme()])
        .unwrap();
    assert_eq!(shallow.renderer().renders.get(), 1);
}

#[test]
fn test_comment_placeholders() {
    let shallow = ShallowRenderer::with_renderer(
        TestRenderer::new(),
        FrameFilter::new(PlaceholderStyle::Comment),
    );
    let reduced = shallow
        .render_frames(&ComponentDescriptor::of::<Dashboard>(), &[theme()])
        .unwrap();

    assert!(reduced.contains(&Frame::markup(9, "<!-- Counter -->")));
    assert!(reduced.contains(&Frame::markup(14, "<!-- ThemedLabel -->")));
}

#[test]
fn test_reduced_frames_can_be_appended_to_another_tree() {
    let reduced = ShallowRenderer::new()
        .render_frames(&ComponentDescriptor::of::<Dashboard>(), &[theme()])
        .unwrap();

    let mut builder = RenderTreeBuilder::new();
    builder.open_element("section");
    builder.close_element().unwrap();
    for frame in &reduced {
        builder.append_raw_frame(frame.clone());
    }
    let frames = builder.finish().unwrap();
    assert_eq!(&frames[1..], &reduced[..]);
}
