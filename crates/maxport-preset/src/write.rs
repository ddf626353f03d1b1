//! Serialize a preset element tree back to XML text.

use std::io::Write;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::{Error, PresetNode, Result};

/// Serialize a tree to XML with the standard declaration header.
///
/// Output is deterministic for a given tree: 2-space indentation, attributes
/// in stored order. Whitespace of third-party input is not reproduced, only
/// its structure.
pub fn write_xml(root: &PresetNode) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    let mut writer = Writer::new_with_indent(&mut output, b' ', 2);

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(|e| Error::Xml(e.to_string()))?;

    write_element(&mut writer, root)?;

    Ok(output)
}

/// Write a single element and its children.
fn write_element<W: Write>(writer: &mut Writer<W>, node: &PresetNode) -> Result<()> {
    let mut elem = BytesStart::new(&node.tag);

    for (key, value) in &node.attributes {
        elem.push_attribute((key.as_str(), value.as_str()));
    }

    if node.children.is_empty() && node.content.is_empty() {
        writer
            .write_event(Event::Empty(elem))
            .map_err(|e| Error::Xml(e.to_string()))?;
    } else {
        writer
            .write_event(Event::Start(elem))
            .map_err(|e| Error::Xml(e.to_string()))?;

        if !node.content.is_empty() {
            writer
                .write_event(Event::Text(BytesText::new(&node.content)))
                .map_err(|e| Error::Xml(e.to_string()))?;
        }

        for child in &node.children {
            write_element(writer, child)?;
        }

        writer
            .write_event(Event::End(BytesEnd::new(&node.tag)))
            .map_err(|e| Error::Xml(e.to_string()))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_declaration_header() {
        let bytes = write_xml(&PresetNode::new("Ableton")).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n"));
        assert!(text.contains("<Ableton/>"));
    }

    #[test]
    fn test_write_is_deterministic() {
        let tree = PresetNode::new("Root")
            .attr("A", "1")
            .child(PresetNode::new("Child").attr("B", "2"));
        assert_eq!(write_xml(&tree).unwrap(), write_xml(&tree).unwrap());
    }

    #[test]
    fn test_write_escapes_attribute_values() {
        let tree = PresetNode::new("N").attr("Value", "a & <b>");
        let text = String::from_utf8(write_xml(&tree).unwrap()).unwrap();
        assert!(text.contains("a &amp; &lt;b&gt;"));
    }
}
