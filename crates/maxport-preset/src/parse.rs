//! Parse XML text into a preset element tree.

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::{Error, PresetNode, Result};

/// Parse XML text into a [`PresetNode`] tree rooted at the document element.
pub fn parse_xml(xml: &str) -> Result<PresetNode> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<PresetNode> = Vec::new();
    let mut root: Option<PresetNode> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let tag = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                let mut node = PresetNode::new(tag);

                for attr in e.attributes() {
                    let attr = attr.map_err(|e| Error::MalformedDocument(e.to_string()))?;
                    let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
                    let value = attr
                        .unescape_value()
                        .map_err(|e| Error::MalformedDocument(e.to_string()))?
                        .into_owned();
                    node.attributes.push((key, value));
                }

                stack.push(node);
            }
            Ok(Event::Empty(e)) => {
                let tag = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                let mut node = PresetNode::new(tag);

                for attr in e.attributes() {
                    let attr = attr.map_err(|e| Error::MalformedDocument(e.to_string()))?;
                    let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
                    let value = attr
                        .unescape_value()
                        .map_err(|e| Error::MalformedDocument(e.to_string()))?
                        .into_owned();
                    node.attributes.push((key, value));
                }

                if let Some(parent) = stack.last_mut() {
                    parent.children.push(node);
                } else {
                    root = Some(node);
                }
            }
            Ok(Event::End(_)) => {
                if let Some(node) = stack.pop() {
                    if let Some(parent) = stack.last_mut() {
                        parent.children.push(node);
                    } else {
                        root = Some(node);
                    }
                }
            }
            Ok(Event::Text(e)) => {
                if let Some(node) = stack.last_mut() {
                    let text = e
                        .unescape()
                        .map_err(|e| Error::MalformedDocument(e.to_string()))?;
                    if !text.trim().is_empty() {
                        node.content = text.into_owned();
                    }
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {} // Ignore declarations, comments, processing instructions.
            Err(e) => return Err(Error::MalformedDocument(e.to_string())),
        }
    }

    root.ok_or_else(|| Error::MalformedDocument("no root element found".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let root = parse_xml(r#"<Ableton MinorVersion="10.0"/>"#).unwrap();
        assert_eq!(root.tag, "Ableton");
        assert_eq!(root.attribute("MinorVersion"), Some("10.0"));
        assert!(root.children.is_empty());
    }

    #[test]
    fn test_parse_nested_with_declaration() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<Ableton>
    <MxPatchRef>
        <FileRef>
            <Path Value="/abs/device.amxd"/>
            <RelativePath Value=""/>
        </FileRef>
    </MxPatchRef>
</Ableton>"#;
        let root = parse_xml(xml).unwrap();
        assert_eq!(root.tag, "Ableton");
        assert_eq!(root.children.len(), 1);
        let fileref = &root.children[0].children[0];
        assert_eq!(fileref.tag, "FileRef");
        assert_eq!(fileref.children[0].attribute("Value"), Some("/abs/device.amxd"));
    }

    #[test]
    fn test_parse_preserves_attribute_order() {
        let root = parse_xml(r#"<N B="2" A="1" C="3"/>"#).unwrap();
        let keys: Vec<&str> = root.attributes.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["B", "A", "C"]);
    }

    #[test]
    fn test_parse_text_content() {
        let root = parse_xml("<Root><Note>hello</Note></Root>").unwrap();
        assert_eq!(root.children[0].content, "hello");
    }

    #[test]
    fn test_parse_unescapes_attribute_values() {
        let root = parse_xml(r#"<N Value="a &amp; b"/>"#).unwrap();
        assert_eq!(root.attribute("Value"), Some("a & b"));
    }

    #[test]
    fn test_parse_empty_input() {
        assert!(matches!(parse_xml(""), Err(Error::MalformedDocument(_))));
    }

    #[test]
    fn test_parse_unbalanced() {
        assert!(matches!(
            parse_xml("<A><B></A>"),
            Err(Error::MalformedDocument(_))
        ));
    }
}
