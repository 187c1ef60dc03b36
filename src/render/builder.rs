//! Render tree builder
//!
//! Builds a flat frame list. Sequence numbers follow frame positions, so a
//! component frame at sequence `S` with subtree length `L` owns exactly the
//! frames with sequences in `[S, S + L)`. Components render inline when they
//! are closed: their output lands right after their attributes and is counted
//! in their subtree length.

use crate::error::RenderError;
use crate::frame::{AttributeValue, Frame, FrameKind};
use crate::parameter::ParameterValue;
use crate::render::{ComponentDescriptor, ComponentParameters, Fragment};
use std::any::type_name;

/// Supported contract for re-emitting frames into a tree being built
pub trait TreeBuilder {
    /// Append a frame verbatim, keeping its sequence number
    fn append_raw_frame(&mut self, frame: Frame);

    /// Append placeholder markup at `sequence`
    fn append_placeholder(&mut self, sequence: u32, markup: &str) {
        self.append_raw_frame(Frame::markup(sequence, markup));
    }
}

impl TreeBuilder for Vec<Frame> {
    fn append_raw_frame(&mut self, frame: Frame) {
        self.push(frame);
    }
}

enum OpenKind {
    Element,
    Region,
    Component(ComponentDescriptor),
}

impl OpenKind {
    fn label(&self) -> &'static str {
        match self {
            OpenKind::Element => "element",
            OpenKind::Region => "region",
            OpenKind::Component(_) => "component",
        }
    }
}

struct OpenFrame {
    index: usize,
    kind: OpenKind,
}

struct CascadingEntry {
    name: Option<String>,
    value: ParameterValue,
}

/// Frame builder used by renderers and component render functions
#[derive(Default)]
pub struct RenderTreeBuilder {
    frames: Vec<Frame>,
    open: Vec<OpenFrame>,
    cascading: Vec<CascadingEntry>,
    next_sequence: u32,
    accepts_attributes: bool,
}

impl RenderTreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    fn push(&mut self, kind: FrameKind) -> usize {
        let sequence = self.next_sequence;
        self.push_frame(Frame { sequence, kind })
    }

    fn push_frame(&mut self, frame: Frame) -> usize {
        self.next_sequence = self.next_sequence.max(frame.sequence.saturating_add(1));
        self.frames.push(frame);
        self.frames.len() - 1
    }

    fn subtree_length(&self, index: usize) -> u32 {
        (self.frames.len() - index) as u32
    }

    pub fn open_element(&mut self, name: impl Into<String>) {
        let index = self.push(FrameKind::Element {
            name: name.into(),
            subtree_length: 1,
        });
        self.open.push(OpenFrame {
            index,
            kind: OpenKind::Element,
        });
        self.accepts_attributes = true;
    }

    pub fn close_element(&mut self) -> Result<(), RenderError> {
        let open = self.pop_open("element")?;
        let length = self.subtree_length(open.index);
        if let FrameKind::Element { subtree_length, .. } = &mut self.frames[open.index].kind {
            *subtree_length = length;
        }
        Ok(())
    }

    pub fn open_region(&mut self) {
        let index = self.push(FrameKind::Region { subtree_length: 1 });
        self.open.push(OpenFrame {
            index,
            kind: OpenKind::Region,
        });
        self.accepts_attributes = false;
    }

    pub fn close_region(&mut self) -> Result<(), RenderError> {
        let open = self.pop_open("region")?;
        let length = self.subtree_length(open.index);
        if let FrameKind::Region { subtree_length } = &mut self.frames[open.index].kind {
            *subtree_length = length;
        }
        Ok(())
    }

    /// Attributes must directly follow the element or component they belong to
    pub fn add_attribute(
        &mut self,
        name: impl Into<String>,
        value: impl Into<AttributeValue>,
    ) -> Result<(), RenderError> {
        let name = name.into();
        if !self.accepts_attributes {
            return Err(RenderError::MisplacedAttribute {
                name,
                sequence: self.next_sequence,
            });
        }
        self.push(FrameKind::Attribute {
            name,
            value: value.into(),
        });
        Ok(())
    }

    pub fn add_text(&mut self, text: impl Into<String>) {
        self.push(FrameKind::Text { text: text.into() });
        self.accepts_attributes = false;
    }

    pub fn add_markup(&mut self, markup: impl Into<String>) {
        self.push(FrameKind::Markup {
            markup: markup.into(),
        });
        self.accepts_attributes = false;
    }

    pub fn add_content(&mut self, fragment: &Fragment) -> Result<(), RenderError> {
        self.accepts_attributes = false;
        fragment.render_into(self)
    }

    pub fn open_component(&mut self, component: ComponentDescriptor) {
        let index = self.push(FrameKind::Component {
            type_name: component.type_name().to_string(),
            subtree_length: 1,
        });
        self.open.push(OpenFrame {
            index,
            kind: OpenKind::Component(component),
        });
        self.accepts_attributes = true;
    }

    /// Close the innermost component and render it in place
    pub fn close_component(&mut self) -> Result<(), RenderError> {
        let open = self.pop_open("component")?;
        let OpenKind::Component(component) = open.kind else {
            return Err(RenderError::UnbalancedClose {
                expected: "component",
            });
        };

        let entries = self.frames[open.index + 1..]
            .iter()
            .filter_map(|frame| match &frame.kind {
                FrameKind::Attribute { name, value } => Some((name.clone(), value.clone())),
                _ => None,
            })
            .collect();
        let parameters = ComponentParameters::new(component.type_name(), entries);

        self.accepts_attributes = false;
        component.render(&parameters, self)?;

        if !self.open.last().map_or(true, |top| top.index < open.index) {
            return Err(RenderError::UnclosedFrames {
                count: self.open.len(),
                sequence: self.frames[open.index].sequence,
            });
        }

        let length = self.subtree_length(open.index);
        if let FrameKind::Component { subtree_length, .. } = &mut self.frames[open.index].kind {
            *subtree_length = length;
        }
        self.accepts_attributes = false;
        Ok(())
    }

    fn pop_open(&mut self, expected: &'static str) -> Result<OpenFrame, RenderError> {
        match self.open.last() {
            Some(top) if top.kind.label() == expected => {}
            _ => return Err(RenderError::UnbalancedClose { expected }),
        }
        self.open
            .pop()
            .ok_or(RenderError::UnbalancedClose { expected })
    }

    /// Run `render` with an ambient value in scope
    ///
    /// The value is visible to [`RenderTreeBuilder::cascading`] lookups made
    /// while `render` runs, and removed afterwards even when `render` fails.
    pub fn with_cascading_value<R>(
        &mut self,
        name: Option<String>,
        value: ParameterValue,
        render: impl FnOnce(&mut Self) -> R,
    ) -> R {
        self.cascading.push(CascadingEntry { name, value });
        let result = render(self);
        self.cascading.pop();
        result
    }

    /// Innermost ambient value of type `T`
    ///
    /// A named lookup matches providers with that name; an unnamed lookup
    /// matches unnamed providers only.
    pub fn cascading<T: 'static>(&self, name: Option<&str>) -> Option<&T> {
        self.cascading
            .iter()
            .rev()
            .filter(|entry| entry.name.as_deref() == name)
            .find_map(|entry| entry.value.downcast_ref::<T>())
    }

    /// Like [`RenderTreeBuilder::cascading`], failing when nothing is in scope
    pub fn require_cascading<T: 'static>(&self, name: Option<&str>) -> Result<&T, RenderError> {
        self.cascading(name)
            .ok_or_else(|| RenderError::MissingCascadingValue {
                type_name: type_name::<T>().to_string(),
                name: name.map(str::to_string),
            })
    }

    /// Re-emit frames taken from another render at this builder's position
    ///
    /// `frames` must be in increasing sequence order. Their sequences are
    /// reassigned from the next sequence of this tree, and element, region and
    /// component lengths are recounted over the frames actually given, so a
    /// subtree that lost collapsed descendants covers only what is left.
    pub fn append_reindexed(&mut self, frames: &[Frame]) {
        for (index, frame) in frames.iter().enumerate() {
            let start = u64::from(frame.sequence);
            let mut kind = frame.kind.clone();
            match &mut kind {
                FrameKind::Element { subtree_length, .. }
                | FrameKind::Region { subtree_length }
                | FrameKind::Component { subtree_length, .. } => {
                    let end = start + u64::from(*subtree_length);
                    let covered = frames[index..]
                        .partition_point(|inner| u64::from(inner.sequence) < end);
                    *subtree_length = covered.max(1) as u32;
                }
                _ => {}
            }
            self.push(kind);
        }
        self.accepts_attributes = false;
    }

    /// Finish the build, requiring every opened frame to be closed
    pub fn finish(self) -> Result<Vec<Frame>, RenderError> {
        if let Some(innermost) = self.open.last() {
            return Err(RenderError::UnclosedFrames {
                count: self.open.len(),
                sequence: self.frames[innermost.index].sequence,
            });
        }
        Ok(self.frames)
    }
}

impl TreeBuilder for RenderTreeBuilder {
    fn append_raw_frame(&mut self, frame: Frame) {
        self.accepts_attributes = matches!(frame.kind, FrameKind::Attribute { .. })
            && self.accepts_attributes;
        self.push_frame(frame);
    }
}
