use super::{attribute, tag_name, ElementStack};
use crate::error::{CatalogError, ParseError};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::path::Path;
use tracing::debug;

/// Reader for the `package` attribute of AndroidManifest.xml files
pub struct ManifestParser;

impl ManifestParser {
    pub fn new() -> Self {
        Self
    }

    /// Package declared by the manifest at `path`; `None` when the file does
    /// not exist or declares no package. A manifest that is not well-formed
    /// is an error.
    pub fn read_package(&self, path: &Path) -> Result<Option<String>, CatalogError> {
        if !path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(path).map_err(|e| CatalogError::io(path, e))?;
        self.parse_package(path, &contents)
            .map_err(|e| CatalogError::MalformedResources { errors: vec![e] })
    }

    /// Extract the package from manifest contents
    pub fn parse_package(&self, path: &Path, contents: &str) -> Result<Option<String>, ParseError> {
        let mut reader = Reader::from_str(contents);
        let mut stack = ElementStack::new();
        let mut package = None;

        let mut buf = Vec::new();

        loop {
            let event = reader
                .read_event_into(&mut buf)
                .map_err(|e| ParseError::new(path, contents, reader.buffer_position(), e.to_string()))?;
            let position = reader.buffer_position();

            match event {
                Event::Start(ref e) | Event::Empty(ref e) => {
                    let is_root = stack.depth() == 0;
                    let name = tag_name(e);
                    stack
                        .open(&name, matches!(event, Event::Empty(_)))
                        .map_err(|message| ParseError::new(path, contents, position, message))?;

                    // The package lives on the root element only
                    if is_root && name == "manifest" {
                        package = attribute(e, "package")
                            .map(|package| package.trim().to_string())
                            .filter(|package| !package.is_empty());
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

        debug!("Manifest {}: package {:?}", path.display(), package);
        Ok(package)
    }
}

impl Default for ManifestParser {
    fn default() -> Self {
        Self::new()
    }
}
