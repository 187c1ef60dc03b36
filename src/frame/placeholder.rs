//! Placeholder markup for collapsed component subtrees.
//!
//! Element placeholders are machine-readable: they carry the component type
//! name and the number of frames that were collapsed, so assertions can read
//! them back with [`Placeholder::parse`].

/// How a collapsed component is written into the reduced frame sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaceholderStyle {
    /// `<Foo ns:skipped="true" ns:skipped-frames="5"/>`
    Element { namespace: String },
    /// `<!-- Foo -->`, informational only
    Comment,
}

impl Default for PlaceholderStyle {
    fn default() -> Self {
        PlaceholderStyle::Element {
            namespace: "shallow".to_string(),
        }
    }
}

/// A collapsed component
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    pub type_name: String,
    /// Frames covered by the collapsed subtree, the component frame included.
    /// Comment placeholders do not carry it.
    pub skipped_frames: Option<u32>,
}

impl Placeholder {
    pub fn new(type_name: impl Into<String>, skipped_frames: u32) -> Self {
        Self {
            type_name: type_name.into(),
            skipped_frames: Some(skipped_frames),
        }
    }

    /// Markup emitted in place of the component
    pub fn to_markup(&self, style: &PlaceholderStyle) -> String {
        match style {
            PlaceholderStyle::Element { namespace } => match self.skipped_frames {
                Some(count) => format!(
                    "<{name} {ns}:skipped=\"true\" {ns}:skipped-frames=\"{count}\"/>",
                    name = self.type_name,
                    ns = namespace,
                    count = count
                ),
                None => format!(
                    "<{name} {ns}:skipped=\"true\"/>",
                    name = self.type_name,
                    ns = namespace
                ),
            },
            PlaceholderStyle::Comment => format!("<!-- {} -->", self.type_name),
        }
    }

    /// Read a placeholder back from markup written by [`Placeholder::to_markup`]
    pub fn parse(markup: &str, style: &PlaceholderStyle) -> Option<Placeholder> {
        let markup = markup.trim();
        match style {
            PlaceholderStyle::Comment => {
                let inner = markup.strip_prefix("<!--")?.strip_suffix("-->")?.trim();
                if inner.is_empty() || inner.contains(char::is_whitespace) {
                    return None;
                }
                Some(Placeholder {
                    type_name: inner.to_string(),
                    skipped_frames: None,
                })
            }
            PlaceholderStyle::Element { namespace } => {
                let inner = markup.strip_prefix('<')?.strip_suffix("/>")?.trim();
                let mut parts = inner.split_whitespace();
                let type_name = parts.next()?;

                let skipped_key = format!("{}:skipped", namespace);
                let count_key = format!("{}:skipped-frames", namespace);
                let mut skipped = false;
                let mut skipped_frames = None;

                for attribute in parts {
                    let (key, value) = attribute.split_once('=')?;
                    let value = value.trim_matches('"');
                    if key == skipped_key {
                        skipped = value == "true";
                    } else if key == count_key {
                        skipped_frames = Some(value.parse().ok()?);
                    }
                }

                if !skipped {
                    return None;
                }
                Some(Placeholder {
                    type_name: type_name.to_string(),
                    skipped_frames,
                })
            }
        }
    }
}
