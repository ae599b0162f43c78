mod ids;
mod manifest;
mod values;

pub use ids::IdParser;
pub use manifest::ManifestParser;
pub use values::ValuesParser;

use quick_xml::events::BytesStart;

/// Open elements of a document, used to check well-formedness
/// beyond what the reader verifies on its own
#[derive(Debug, Default)]
pub(crate) struct ElementStack {
    open: Vec<String>,
    seen_root: bool,
}

impl ElementStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a start tag; `empty` for self-closing elements
    pub fn open(&mut self, name: &str, empty: bool) -> Result<(), String> {
        if self.open.is_empty() {
            if self.seen_root {
                return Err(format!("unexpected second root element <{}>", name));
            }
            self.seen_root = true;
        }
        if !empty {
            self.open.push(name.to_string());
        }
        Ok(())
    }

    pub fn close(&mut self) -> Option<String> {
        self.open.pop()
    }

    pub fn depth(&self) -> usize {
        self.open.len()
    }

    /// Check the document is complete at end of input
    pub fn finish(&self) -> Result<(), String> {
        if let Some(unclosed) = self.open.last() {
            return Err(format!("unexpected end of document, <{}> is not closed", unclosed));
        }
        if !self.seen_root {
            return Err("document has no root element".to_string());
        }
        Ok(())
    }
}

/// Tracks line numbers incrementally as the reader advances
#[derive(Debug)]
pub(crate) struct LineTracker<'a> {
    contents: &'a [u8],
    offset: usize,
    line: usize,
}

impl<'a> LineTracker<'a> {
    pub fn new(contents: &'a str) -> Self {
        Self {
            contents: contents.as_bytes(),
            offset: 0,
            line: 1,
        }
    }

    /// 1-based line of `offset`; offsets must not decrease between calls
    pub fn line_at(&mut self, offset: usize) -> usize {
        let offset = offset.min(self.contents.len());
        if offset > self.offset {
            self.line += self.contents[self.offset..offset]
                .iter()
                .filter(|&&b| b == b'\n')
                .count();
            self.offset = offset;
        }
        self.line
    }
}

pub(crate) fn tag_name(e: &BytesStart) -> String {
    String::from_utf8_lossy(e.name().as_ref()).to_string()
}

/// Value of an attribute by its qualified name
pub(crate) fn attribute(e: &BytesStart, key: &str) -> Option<String> {
    e.attributes()
        .filter_map(|a| a.ok())
        .find(|attr| attr.key.as_ref() == key.as_bytes())
        .map(|attr| match attr.unescape_value() {
            Ok(value) => value.to_string(),
            Err(_) => String::from_utf8_lossy(&attr.value).to_string(),
        })
}
