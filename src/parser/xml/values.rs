// Values resource parser
//
// Parses res/values*/*.xml files. Every direct child of <resources> is one
// declaration; anything the resource table does not recognize is skipped
// with a diagnostic instead of failing the file.

use super::{attribute, tag_name, ElementStack, LineTracker};
use crate::error::{ParseError, SkipReason};
use crate::model::{QualifiedSourceSet, ResourceKey, ResourceType, ResourceValue};
use crate::parser::format::{extract_format_args, merge_format_args};
use crate::parser::{ParsedFile, XmlResourceParser};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// Elements that carry no declaration and are dropped silently
const IGNORED_ELEMENTS: &[&str] = &["eat-comment", "skip"];

/// Parser for `<resources>` value files
pub struct ValuesParser;

impl ValuesParser {
    pub fn new() -> Self {
        Self
    }

    /// Start a declaration for a direct child of `<resources>`
    fn begin(&self, e: &BytesStart, line: usize, parsed: &mut ParsedFile) -> Option<Pending> {
        let tag = tag_name(e);
        if IGNORED_ELEMENTS.contains(&tag.as_str()) {
            return None;
        }

        let resource_type = if tag == "item" {
            let item_type = attribute(e, "type").unwrap_or_default();
            match ResourceType::from_name(&item_type) {
                Some(t) => t,
                None => {
                    parsed.skip(line, &tag, SkipReason::UnsupportedItemType(item_type));
                    return None;
                }
            }
        } else {
            match ResourceType::from_value_tag(&tag) {
                Some(t) => t,
                None => {
                    parsed.skip(line, &tag, SkipReason::UnsupportedElement);
                    return None;
                }
            }
        };

        let Some(name) = attribute(e, "name").filter(|n| !n.is_empty()) else {
            parsed.skip(line, &tag, SkipReason::MissingName);
            return None;
        };

        Some(Pending {
            resource_type,
            name,
            line,
            formatted: attribute(e, "formatted").as_deref() != Some("false"),
            text: String::new(),
            items: Vec::new(),
            quantities: BTreeMap::new(),
            item: None,
        })
    }
}

impl Default for ValuesParser {
    fn default() -> Self {
        Self::new()
    }
}

impl XmlResourceParser for ValuesParser {
    fn parse(&self, path: &Path, contents: &str, origin: &QualifiedSourceSet) -> Result<ParsedFile, ParseError> {
        let mut parsed = ParsedFile::new(path);
        let mut reader = Reader::from_str(contents);
        let mut lines = LineTracker::new(contents);
        let mut stack = ElementStack::new();
        let mut accept = true;
        let mut pending: Option<Pending> = None;

        let mut buf = Vec::new();

        loop {
            let event = reader
                .read_event_into(&mut buf)
                .map_err(|e| ParseError::new(path, contents, reader.buffer_position(), e.to_string()))?;
            let position = reader.buffer_position();

            match event {
                Event::Start(ref e) | Event::Empty(ref e) => {
                    let empty = matches!(event, Event::Empty(_));
                    let tag = tag_name(e);
                    let depth = stack.depth();
                    stack
                        .open(&tag, empty)
                        .map_err(|message| ParseError::new(path, contents, position, message))?;

                    match depth {
                        0 => {
                            if tag != "resources" {
                                parsed.skip(lines.line_at(position), &tag, SkipReason::UnexpectedRoot);
                                accept = false;
                            }
                        }
                        1 if accept => {
                            pending = self.begin(e, lines.line_at(position), &mut parsed);
                            if empty {
                                if let Some(done) = pending.take() {
                                    done.finish(origin, &mut parsed);
                                }
                            }
                        }
                        2 => {
                            if let Some(p) = pending.as_mut() {
                                if p.collects_items() && tag == "item" {
                                    p.begin_item(attribute(e, "quantity"));
                                    if empty {
                                        p.end_item();
                                    }
                                }
                            }
                        }
                        _ => {}
                    }
                }
                Event::End(_) => {
                    stack.close();
                    match stack.depth() {
                        1 => {
                            if let Some(done) = pending.take() {
                                done.finish(origin, &mut parsed);
                            }
                        }
                        2 => {
                            if let Some(p) = pending.as_mut() {
                                p.end_item();
                            }
                        }
                        _ => {}
                    }
                }
                Event::Text(ref t) => {
                    let text = t
                        .unescape()
                        .map_err(|e| ParseError::new(path, contents, position, e.to_string()))?;
                    if stack.depth() == 0 && !text.trim().is_empty() {
                        return Err(ParseError::new(path, contents, position, "text outside the root element"));
                    }
                    if let Some(p) = pending.as_mut() {
                        p.push_text(&text);
                    }
                }
                Event::CData(ref c) => {
                    if let Some(p) = pending.as_mut() {
                        p.push_text(&String::from_utf8_lossy(c));
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

        debug!(
            "Parsed values {}: {} declarations, {} skipped",
            path.display(),
            parsed.declarations.len(),
            parsed.skipped.len()
        );

        Ok(parsed)
    }
}

/// A declaration whose element is still open
struct Pending {
    resource_type: ResourceType,
    name: String,
    line: usize,
    formatted: bool,
    text: String,
    items: Vec<String>,
    quantities: BTreeMap<String, String>,
    item: Option<PendingItem>,
}

struct PendingItem {
    quantity: Option<String>,
    text: String,
}

impl Pending {
    fn collects_items(&self) -> bool {
        matches!(
            self.resource_type,
            ResourceType::Plurals | ResourceType::StringArray | ResourceType::IntArray | ResourceType::TypedArray
        )
    }

    fn push_text(&mut self, text: &str) {
        match self.item.as_mut() {
            Some(item) => item.text.push_str(text),
            // Style and attr children are not part of a value
            None if matches!(self.resource_type, ResourceType::Style | ResourceType::Attr) => {}
            None => self.text.push_str(text),
        }
    }

    fn begin_item(&mut self, quantity: Option<String>) {
        self.item = Some(PendingItem {
            quantity,
            text: String::new(),
        });
    }

    fn end_item(&mut self) {
        let Some(item) = self.item.take() else {
            return;
        };
        let text = item.text.trim().to_string();
        if self.resource_type == ResourceType::Plurals {
            if let Some(quantity) = item.quantity {
                self.quantities.insert(quantity, text);
            }
        } else {
            self.items.push(text);
        }
    }

    fn finish(self, origin: &QualifiedSourceSet, parsed: &mut ParsedFile) {
        let (value, format_args) = match self.resource_type {
            ResourceType::Plurals => {
                let args = if self.formatted {
                    merge_format_args(self.quantities.values().map(String::as_str))
                } else {
                    Vec::new()
                };
                (ResourceValue::Quantities(self.quantities), args)
            }
            ResourceType::StringArray | ResourceType::IntArray | ResourceType::TypedArray => {
                (ResourceValue::Items(self.items), Vec::new())
            }
            resource_type => {
                let text = self.text.trim().to_string();
                let args = if resource_type == ResourceType::String && self.formatted {
                    extract_format_args(&text)
                } else {
                    Vec::new()
                };
                let value = if text.is_empty() {
                    ResourceValue::Empty
                } else {
                    ResourceValue::Text(text)
                };
                (value, args)
            }
        };

        parsed.declare(
            origin,
            ResourceKey::new(self.resource_type, self.name),
            value,
            format_args,
            self.line,
        );
    }
}
