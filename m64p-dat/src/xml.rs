//! Record-at-a-time XML reading.
//!
//! Game databases are a root element holding a flat list of per-game
//! elements. [`RecordStream`] walks the document with `quick-xml` and
//! materializes one per-game subtree at a time as an owned [`Element`].

use std::io::BufRead;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::DatError;

/// Depth of per-game elements: children of the document root.
const RECORD_DEPTH: usize = 2;

/// An owned XML element with its attributes, text, and child elements.
#[derive(Debug, Clone, Default)]
pub(crate) struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub text: String,
    pub children: Vec<Element>,
}

impl Element {
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Follow a path of child names, taking the first match at each step.
    pub fn find(&self, path: &[&str]) -> Option<&Element> {
        path.iter().try_fold(self, |el, name| el.child(name))
    }

    /// Attribute value, falling back to the text of a same-named child element.
    pub fn attr_or_child_text(&self, key: &str) -> Option<&str> {
        self.attr(key)
            .or_else(|| self.child(key).map(|c| c.text.as_str()))
    }
}

/// Pull-based reader yielding each top-level element with a given tag.
pub(crate) struct RecordStream<R> {
    xml: Reader<R>,
    buf: Vec<u8>,
    record_tag: &'static str,
    depth: usize,
    saw_root: bool,
}

impl<R: BufRead> RecordStream<R> {
    pub fn new(reader: R, record_tag: &'static str) -> Self {
        let mut xml = Reader::from_reader(reader);
        xml.config_mut().trim_text(true);
        Self {
            xml,
            buf: Vec::new(),
            record_tag,
            depth: 0,
            saw_root: false,
        }
    }

    /// Read up to and including the next record element.
    ///
    /// Returns `Ok(None)` once the document is exhausted.
    pub fn next_record(&mut self) -> Result<Option<Element>, DatError> {
        loop {
            let head = match self.xml.read_event_into(&mut self.buf)? {
                Event::Start(ref e) => {
                    self.saw_root = true;
                    self.depth += 1;
                    if self.depth == RECORD_DEPTH && is_tag(e, self.record_tag) {
                        Some((element_head(e)?, true))
                    } else {
                        None
                    }
                }
                Event::Empty(ref e) => {
                    self.saw_root = true;
                    if self.depth + 1 == RECORD_DEPTH && is_tag(e, self.record_tag) {
                        Some((element_head(e)?, false))
                    } else {
                        None
                    }
                }
                Event::End(_) => {
                    self.depth = self.depth.saturating_sub(1);
                    None
                }
                Event::Eof => {
                    if !self.saw_root {
                        return Err(DatError::malformed_document("no root element"));
                    }
                    if self.depth > 0 {
                        return Err(DatError::malformed_document(
                            "unexpected end of document before the root element was closed",
                        ));
                    }
                    return Ok(None);
                }
                _ => None,
            };
            self.buf.clear();

            match head {
                Some((element, true)) => {
                    let element = self.read_subtree(element)?;
                    self.depth -= 1;
                    return Ok(Some(element));
                }
                Some((element, false)) => return Ok(Some(element)),
                None => {}
            }
        }
    }

    /// Read the content of an already-opened element through its end tag.
    fn read_subtree(&mut self, root: Element) -> Result<Element, DatError> {
        let mut stack = vec![root];

        loop {
            let finished = match self.xml.read_event_into(&mut self.buf)? {
                Event::Start(ref e) => {
                    stack.push(element_head(e)?);
                    None
                }
                Event::Empty(ref e) => {
                    let child = element_head(e)?;
                    if let Some(parent) = stack.last_mut() {
                        parent.children.push(child);
                    }
                    None
                }
                Event::Text(ref t) => {
                    let text = t.unescape()?;
                    if let Some(current) = stack.last_mut() {
                        current.text.push_str(&text);
                    }
                    None
                }
                Event::CData(ref c) => {
                    if let Some(current) = stack.last_mut() {
                        current.text.push_str(&String::from_utf8_lossy(c));
                    }
                    None
                }
                Event::End(_) => match stack.pop() {
                    Some(done) => match stack.last_mut() {
                        Some(parent) => {
                            parent.children.push(done);
                            None
                        }
                        None => Some(done),
                    },
                    None => None,
                },
                Event::Eof => {
                    let name = stack.first().map(|e| e.name.as_str()).unwrap_or_default();
                    return Err(DatError::malformed_document(format!(
                        "unexpected end of document inside <{name}>"
                    )));
                }
                _ => None,
            };
            self.buf.clear();

            if let Some(element) = finished {
                return Ok(element);
            }
        }
    }
}

/// Fused iterator that parses each record with `parse`.
///
/// The first error (XML or record) is yielded once, then iteration stops.
pub(crate) struct Records<R, T> {
    stream: RecordStream<R>,
    parse: fn(&Element) -> Result<T, DatError>,
    finished: bool,
}

impl<R: BufRead, T> Records<R, T> {
    pub fn new(
        reader: R,
        record_tag: &'static str,
        parse: fn(&Element) -> Result<T, DatError>,
    ) -> Self {
        Self {
            stream: RecordStream::new(reader, record_tag),
            parse,
            finished: false,
        }
    }
}

impl<R: BufRead, T> Iterator for Records<R, T> {
    type Item = Result<T, DatError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let result = match self.stream.next_record() {
            Ok(Some(element)) => (self.parse)(&element),
            Ok(None) => {
                self.finished = true;
                return None;
            }
            Err(e) => Err(e),
        };

        if result.is_err() {
            self.finished = true;
        }
        Some(result)
    }
}

/// The required `name` and `size` attributes of a `<rom>` element.
pub(crate) fn rom_name_and_size(game: &str, rom: &Element) -> Result<(String, u64), DatError> {
    let name = rom
        .attr("name")
        .ok_or_else(|| DatError::malformed_record(game, "rom has no name"))?
        .to_string();

    let size_str = rom
        .attr("size")
        .ok_or_else(|| DatError::malformed_record(game, "rom has no size"))?;
    let size = size_str
        .parse()
        .map_err(|_| DatError::invalid_field(game, "rom size", size_str))?;

    Ok((name, size))
}

fn is_tag(e: &BytesStart<'_>, tag: &str) -> bool {
    e.local_name().as_ref() == tag.as_bytes()
}

/// Build an [`Element`] (without children) from a start or empty tag.
fn element_head(e: &BytesStart<'_>) -> Result<Element, DatError> {
    let name = String::from_utf8_lossy(e.local_name().as_ref()).to_string();
    let mut attributes = Vec::new();
    for attr in e.attributes() {
        let attr = attr?;
        let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).to_string();
        let value = attr.unescape_value()?.into_owned();
        attributes.push((key, value));
    }
    Ok(Element {
        name,
        attributes,
        text: String::new(),
        children: Vec::new(),
    })
}

#[cfg(test)]
#[path = "tests/xml_tests.rs"]
mod tests;
