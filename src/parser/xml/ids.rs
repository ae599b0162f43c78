use super::{tag_name, ElementStack, LineTracker};
use crate::error::ParseError;
use crate::model::{QualifiedSourceSet, ResourceKey, ResourceType, ResourceValue};
use crate::parser::{ParsedFile, XmlResourceParser};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

const NEW_ID_PREFIX: &str = "@+id/";

/// Parser for XML resource files (layouts, menus, navigation graphs, ...)
/// collecting the ids they create with `@+id/name`
pub struct IdParser;

impl IdParser {
    pub fn new() -> Self {
        Self
    }

    /// Id created by an attribute value, if any
    fn new_id(value: &str) -> Option<&str> {
        value
            .trim()
            .strip_prefix(NEW_ID_PREFIX)
            .filter(|name| !name.is_empty())
    }
}

impl Default for IdParser {
    fn default() -> Self {
        Self::new()
    }
}

impl XmlResourceParser for IdParser {
    fn parse(&self, path: &Path, contents: &str, origin: &QualifiedSourceSet) -> Result<ParsedFile, ParseError> {
        let mut parsed = ParsedFile::new(path);
        let mut reader = Reader::from_str(contents);
        let mut lines = LineTracker::new(contents);
        let mut stack = ElementStack::new();
        let mut seen = HashSet::new();

        let mut buf = Vec::new();

        loop {
            let event = reader
                .read_event_into(&mut buf)
                .map_err(|e| ParseError::new(path, contents, reader.buffer_position(), e.to_string()))?;
            let position = reader.buffer_position();

            match event {
                Event::Start(ref e) | Event::Empty(ref e) => {
                    let empty = matches!(event, Event::Empty(_));
                    stack
                        .open(&tag_name(e), empty)
                        .map_err(|message| ParseError::new(path, contents, position, message))?;

                    // android:id="@+id/title", app:layout_constraintTop_toBottomOf="@+id/header"
                    for attr in e.attributes().filter_map(|a| a.ok()) {
                        let value = String::from_utf8_lossy(&attr.value);
                        if let Some(name) = Self::new_id(&value) {
                            if seen.insert(name.to_string()) {
                                parsed.declare(
                                    origin,
                                    ResourceKey::new(ResourceType::Id, name),
                                    ResourceValue::Empty,
                                    Vec::new(),
                                    lines.line_at(position),
                                );
                            }
                        }
                    }
                }
                Event::End(_) => {
                    stack.close();
                }
                Event::Text(ref t) => {
                    if stack.depth() == 0 && !t.iter().all(|b| b.is_ascii_whitespace()) {
                        return Err(ParseError::new(path, contents, position, "text outside the root element"));
                    }
                }
                Event::Eof => {
                    stack
                        .finish()
                        .map_err(|message| ParseError::new(path, contents, contents.len(), message))?;
                    break;
                }
                _ => {}
            }
            buf.clear();
        }

        debug!("Scanned {}: {} ids", path.display(), parsed.declarations.len());

        Ok(parsed)
    }
}
