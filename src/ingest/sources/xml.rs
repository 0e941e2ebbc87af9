//! Minimal element tree over quick-xml events, shared by the markup parsers

use crate::ingest::traits::{ParseError, ParseResult};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

#[derive(Debug, Clone, Default)]
pub struct XmlElement {
    pub name: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<XmlElement>,
    pub text: String,
}

impl XmlElement {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.name == name)
    }

    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> {
        self.children.iter().filter(move |c| c.name == name)
    }

    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name)
            .map(|c| c.text.as_str())
            .filter(|t| !t.is_empty())
    }
}

/// Parse a document into its root element.
pub fn parse_document(text: &str) -> ParseResult<XmlElement> {
    let mut reader = Reader::from_str(text);
    reader.trim_text(true);
    let mut stack: Vec<XmlElement> = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(start) => stack.push(element_from(&start)?),
            Event::Empty(start) => {
                let element = element_from(&start)?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(element),
                    None => return Ok(element),
                }
            }
            Event::Text(t) => {
                if let Some(top) = stack.last_mut() {
                    if !top.text.is_empty() {
                        top.text.push(' ');
                    }
                    top.text.push_str(&t.unescape()?);
                }
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| ParseError::Malformed("unbalanced markup".to_string()))?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(element),
                    None => return Ok(element),
                }
            }
            Event::Eof => return Err(ParseError::Malformed("no root element".to_string())),
            _ => {}
        }
    }
}

fn element_from(start: &BytesStart<'_>) -> ParseResult<XmlElement> {
    let mut attrs = Vec::new();
    for attr in start.attributes() {
        let attr = attr?;
        attrs.push((
            String::from_utf8_lossy(attr.key.as_ref()).into_owned(),
            attr.unescape_value()?.into_owned(),
        ));
    }
    Ok(XmlElement {
        name: String::from_utf8_lossy(start.name().as_ref()).into_owned(),
        attrs,
        children: Vec::new(),
        text: String::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nested_elements_attributes_and_text() {
        let root = parse_document(
            "<SENATEDATA><sencalendar no=\"5\" year=\"2020\"><caldate>2020-01-08</caldate><empty/></sencalendar></SENATEDATA>",
        )
        .unwrap();

        assert_eq!(root.name, "SENATEDATA");
        let calendar = root.child("sencalendar").unwrap();
        assert_eq!(calendar.attr("no"), Some("5"));
        assert_eq!(calendar.child_text("caldate"), Some("2020-01-08"));
        assert!(calendar.child("empty").is_some());
    }

    #[test]
    fn unbalanced_markup_is_an_error() {
        assert!(parse_document("<a><b></a>").is_err());
    }
}
