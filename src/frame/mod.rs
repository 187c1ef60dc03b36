//! Render Tree Frames
//!
//! Flattened, sequence-numbered representation of a rendered component tree.
//! A component frame's `subtree_length` counts the frames (itself included)
//! that belong to its subtree, so `[sequence, sequence + subtree_length)` is
//! the range a consumer must treat atomically.

pub mod filter;
pub mod placeholder;

pub use filter::{CollapsedFrames, Emitted, FrameFilter};
pub use placeholder::{Placeholder, PlaceholderStyle};

use crate::parameter::ParameterValue;
use crate::render::Fragment;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Frame type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameType {
    None,
    Element,
    Attribute,
    Text,
    Component,
    Markup,
    Region,
    /// A frame kind the engine produced that this crate does not know about
    Unrecognized,
}

impl fmt::Display for FrameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FrameType::None => "None",
            FrameType::Element => "Element",
            FrameType::Attribute => "Attribute",
            FrameType::Text => "Text",
            FrameType::Component => "Component",
            FrameType::Markup => "Markup",
            FrameType::Region => "Region",
            FrameType::Unrecognized => "Unrecognized",
        };
        f.write_str(name)
    }
}

/// Attribute payload
///
/// Object and fragment values only live in memory; snapshots carry the
/// primitive variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum AttributeValue {
    Text(String),
    Bool(bool),
    Int(i64),
    Null,
    #[serde(skip)]
    Object(ParameterValue),
    #[serde(skip)]
    Fragment(Fragment),
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Text(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::Text(value)
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Bool(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        AttributeValue::Int(value)
    }
}

impl From<ParameterValue> for AttributeValue {
    fn from(value: ParameterValue) -> Self {
        AttributeValue::Object(value)
    }
}

impl From<Fragment> for AttributeValue {
    fn from(value: Fragment) -> Self {
        AttributeValue::Fragment(value)
    }
}

/// Frame payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FrameKind {
    /// Unused slot in a pre-allocated buffer
    None,
    Element {
        name: String,
        subtree_length: u32,
    },
    Attribute {
        name: String,
        value: AttributeValue,
    },
    Text {
        text: String,
    },
    Component {
        type_name: String,
        subtree_length: u32,
    },
    Markup {
        markup: String,
    },
    Region {
        subtree_length: u32,
    },
    #[serde(other)]
    Unrecognized,
}

/// One node of a flattened render tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub sequence: u32,
    pub kind: FrameKind,
}

impl Frame {
    pub fn none() -> Self {
        Frame {
            sequence: 0,
            kind: FrameKind::None,
        }
    }

    pub fn element(sequence: u32, name: impl Into<String>, subtree_length: u32) -> Self {
        Frame {
            sequence,
            kind: FrameKind::Element {
                name: name.into(),
                subtree_length,
            },
        }
    }

    pub fn attribute(sequence: u32, name: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        Frame {
            sequence,
            kind: FrameKind::Attribute {
                name: name.into(),
                value: value.into(),
            },
        }
    }

    pub fn text(sequence: u32, text: impl Into<String>) -> Self {
        Frame {
            sequence,
            kind: FrameKind::Text { text: text.into() },
        }
    }

    pub fn component(sequence: u32, type_name: impl Into<String>, subtree_length: u32) -> Self {
        Frame {
            sequence,
            kind: FrameKind::Component {
                type_name: type_name.into(),
                subtree_length,
            },
        }
    }

    pub fn markup(sequence: u32, markup: impl Into<String>) -> Self {
        Frame {
            sequence,
            kind: FrameKind::Markup {
                markup: markup.into(),
            },
        }
    }

    pub fn region(sequence: u32, subtree_length: u32) -> Self {
        Frame {
            sequence,
            kind: FrameKind::Region { subtree_length },
        }
    }

    pub fn frame_type(&self) -> FrameType {
        match self.kind {
            FrameKind::None => FrameType::None,
            FrameKind::Element { .. } => FrameType::Element,
            FrameKind::Attribute { .. } => FrameType::Attribute,
            FrameKind::Text { .. } => FrameType::Text,
            FrameKind::Component { .. } => FrameType::Component,
            FrameKind::Markup { .. } => FrameType::Markup,
            FrameKind::Region { .. } => FrameType::Region,
            FrameKind::Unrecognized => FrameType::Unrecognized,
        }
    }

    /// Subtree length, present only on component frames
    pub fn component_subtree_length(&self) -> Option<u32> {
        match self.kind {
            FrameKind::Component { subtree_length, .. } => Some(subtree_length),
            _ => None,
        }
    }

    pub fn component_type_name(&self) -> Option<&str> {
        match &self.kind {
            FrameKind::Component { type_name, .. } => Some(type_name),
            _ => None,
        }
    }

    pub fn is_padding(&self) -> bool {
        matches!(self.kind, FrameKind::None)
    }
}

/// Number of frames up to and including the last non-padding frame
pub fn logical_len(frames: &[Frame]) -> usize {
    frames
        .iter()
        .rposition(|frame| !frame.is_padding())
        .map_or(0, |last| last + 1)
}

/// Frame array handed out by a renderer
///
/// The array may be longer than the logical frame count: trailing slots are
/// `None` frames left over from pre-allocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrameBuffer {
    frames: Vec<Frame>,
}

impl FrameBuffer {
    pub fn new(frames: Vec<Frame>) -> Self {
        Self { frames }
    }

    /// Pad `frames` with `None` frames up to `capacity`
    pub fn padded(mut frames: Vec<Frame>, capacity: usize) -> Self {
        if frames.len() < capacity {
            frames.resize(capacity, Frame::none());
        }
        Self { frames }
    }

    /// The whole array, padding included
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// The frames without trailing padding
    pub fn logical_frames(&self) -> &[Frame] {
        &self.frames[..self.len()]
    }

    /// Logical frame count
    pub fn len(&self) -> usize {
        logical_len(&self.frames)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.frames.len()
    }

    /// Index of the first component frame with the given type name
    pub fn find_component(&self, type_name: &str) -> Option<usize> {
        self.frames
            .iter()
            .position(|frame| frame.component_type_name() == Some(type_name))
    }

    /// Load a buffer from a JSON snapshot
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Write the buffer as a JSON snapshot
    ///
    /// Fails when an attribute carries an in-memory object or fragment value.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn into_frames(self) -> Vec<Frame> {
        self.frames
    }
}
