//! Shallow-render frame filter
//!
//! Collapses every nested component subtree of a rendered frame sequence into a
//! single placeholder while keeping the root's own elements, attributes, text
//! and markup untouched.
//!
//! The scan is a single forward pass. Its only state is a watermark: the first
//! sequence number past the subtree most recently collapsed. Frames below the
//! watermark belong to that subtree and are dropped, which also swallows any
//! components nested deeper without visiting them.
//!
//! Every non-padding frame, dropped or kept, must carry a sequence greater than
//! the one before it, and a component's subtree must occupy exactly the frames
//! its sequence range names.

use crate::error::FrameError;
use crate::frame::placeholder::{Placeholder, PlaceholderStyle};
use crate::frame::{logical_len, Frame, FrameKind};
use crate::render::TreeBuilder;
use tracing::{debug, instrument, trace};

/// One step of output produced by [`CollapsedFrames`]
#[derive(Debug, Clone, PartialEq)]
pub enum Emitted<'a> {
    /// A frame kept verbatim
    Frame(&'a Frame),
    /// A collapsed component, emitted at the component frame's sequence
    Placeholder { sequence: u32, placeholder: Placeholder },
}

/// Forward iterator over a frame window yielding kept frames and placeholders
///
/// Yields an error and then stops when the window turns out to be malformed.
pub struct CollapsedFrames<'a> {
    frames: &'a [Frame],
    position: usize,
    end: usize,
    watermark: u64,
    last_sequence: Option<u32>,
}

impl<'a> CollapsedFrames<'a> {
    /// Scan `frames`, ignoring trailing padding
    pub fn new(frames: &'a [Frame]) -> Self {
        Self {
            frames,
            position: 0,
            end: logical_len(frames),
            watermark: 0,
            last_sequence: None,
        }
    }

    fn after(frames: &'a [Frame], previous: u32) -> Self {
        Self {
            last_sequence: Some(previous),
            ..Self::new(frames)
        }
    }

    fn fail(&mut self, error: FrameError) -> Option<Result<Emitted<'a>, FrameError>> {
        self.position = self.end;
        Some(Err(error))
    }
}

impl<'a> Iterator for CollapsedFrames<'a> {
    type Item = Result<Emitted<'a>, FrameError>;

    fn next(&mut self) -> Option<Self::Item> {
        let frames = self.frames;
        while self.position < self.end {
            let index = self.position;
            let frame = &frames[index];
            self.position += 1;

            trace!(
                sequence = frame.sequence,
                frame_type = %frame.frame_type(),
                watermark = self.watermark,
                "Got frame"
            );

            match &frame.kind {
                FrameKind::None => continue,
                FrameKind::Unrecognized => {
                    return self.fail(FrameError::UnsupportedFrameType {
                        sequence: frame.sequence,
                        frame_type: frame.frame_type().to_string(),
                    });
                }
                _ => {}
            }

            if let Some(previous) = self.last_sequence {
                if frame.sequence <= previous {
                    return self.fail(FrameError::MalformedFrameSequence {
                        sequence: frame.sequence,
                        reason: format!(
                            "sequence does not increase after previous frame {}",
                            previous
                        ),
                    });
                }
            }
            self.last_sequence = Some(frame.sequence);

            if u64::from(frame.sequence) < self.watermark {
                trace!(sequence = frame.sequence, "Skipped frame");
                continue;
            }

            if let FrameKind::Component {
                type_name,
                subtree_length,
            } = &frame.kind
            {
                let length = *subtree_length;
                if length == 0 {
                    return self.fail(FrameError::MalformedFrameSequence {
                        sequence: frame.sequence,
                        reason: format!("component '{}' has a subtree length of 0", type_name),
                    });
                }
                if index + length as usize > self.end {
                    return self.fail(FrameError::MalformedFrameSequence {
                        sequence: frame.sequence,
                        reason: format!(
                            "component '{}' subtree of {} frames extends past the end of the buffer ({} frames remain)",
                            type_name,
                            length,
                            self.end - index
                        ),
                    });
                }

                let watermark = u64::from(frame.sequence) + u64::from(length);
                let last_inside = frames[index + 1..index + length as usize]
                    .iter()
                    .rev()
                    .find(|inner| !inner.is_padding());
                if let Some(inner) = last_inside {
                    if u64::from(inner.sequence) >= watermark {
                        return self.fail(FrameError::MalformedFrameSequence {
                            sequence: frame.sequence,
                            reason: format!(
                                "component '{}' subtree ends before sequence {} but a frame inside it has sequence {}",
                                type_name, watermark, inner.sequence
                            ),
                        });
                    }
                }

                self.watermark = watermark;
                trace!(
                    sequence = frame.sequence,
                    component = %type_name,
                    subtree_length = length,
                    "Skipping component"
                );
                return Some(Ok(Emitted::Placeholder {
                    sequence: frame.sequence,
                    placeholder: Placeholder::new(type_name.clone(), length),
                }));
            }

            trace!(sequence = frame.sequence, "Added frame");
            return Some(Ok(Emitted::Frame(frame)));
        }
        None
    }
}

/// Shallow-render frame filter
#[derive(Debug, Clone, Default)]
pub struct FrameFilter {
    style: PlaceholderStyle,
}

impl FrameFilter {
    pub fn new(style: PlaceholderStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> &PlaceholderStyle {
        &self.style
    }

    /// Filter a whole frame window
    ///
    /// Every component frame found in `frames` is collapsed. Use
    /// [`FrameFilter::filter_component`] to keep a root component open.
    #[instrument(skip_all, fields(frames = frames.len()))]
    pub fn filter(&self, frames: &[Frame]) -> Result<Vec<Frame>, FrameError> {
        self.collect(CollapsedFrames::new(frames), frames.len())
    }

    /// Filter the subtree of the component frame at `root_index`
    ///
    /// The root component frame itself and everything outside its subtree are
    /// left out; the result is the root's own output with nested components
    /// collapsed.
    #[instrument(skip(self, frames), fields(frames = frames.len()))]
    pub fn filter_component(
        &self,
        frames: &[Frame],
        root_index: usize,
    ) -> Result<Vec<Frame>, FrameError> {
        let root = frames
            .get(root_index)
            .ok_or(FrameError::RootOutOfRange {
                index: root_index,
                frames: frames.len(),
            })?;

        let length = match root.kind {
            FrameKind::Component { subtree_length, .. } => subtree_length as usize,
            _ => {
                return Err(FrameError::MalformedFrameSequence {
                    sequence: root.sequence,
                    reason: format!("root frame is a {} frame, not a component", root.frame_type()),
                })
            }
        };

        let end = root_index + length;
        if length == 0 || end > logical_len(frames) {
            return Err(FrameError::MalformedFrameSequence {
                sequence: root.sequence,
                reason: format!(
                    "root component subtree of {} frames does not fit the buffer",
                    length
                ),
            });
        }

        let window = &frames[root_index + 1..end];
        self.collect(CollapsedFrames::after(window, root.sequence), window.len())
    }

    /// Filter `frames` and append the result to `builder`
    ///
    /// Nothing is appended unless the whole window filters cleanly.
    pub fn filter_into<B: TreeBuilder + ?Sized>(
        &self,
        frames: &[Frame],
        builder: &mut B,
    ) -> Result<usize, FrameError> {
        let filtered = self.filter(frames)?;
        let count = filtered.len();
        for frame in filtered {
            builder.append_raw_frame(frame);
        }
        Ok(count)
    }

    fn collect(&self, frames: CollapsedFrames<'_>, input_len: usize) -> Result<Vec<Frame>, FrameError> {
        let mut output = Vec::new();
        let mut placeholders = 0usize;

        for emitted in frames {
            match emitted? {
                Emitted::Frame(frame) => output.push(frame.clone()),
                Emitted::Placeholder {
                    sequence,
                    placeholder,
                } => {
                    placeholders += 1;
                    output.append_placeholder(sequence, &placeholder.to_markup(&self.style));
                }
            }
        }

        debug!(
            input = input_len,
            output = output.len(),
            placeholders,
            "Filtered frame sequence"
        );
        Ok(output)
    }
}
