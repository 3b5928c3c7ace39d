//! # EAF 生成器 - 通用元素写回

use elan_core::{EafError, XmlElement, XmlNode};
use quick_xml::{
    Writer,
    events::{BytesText, Event},
};

/// 原样写回一个通用元素树。
pub(super) fn write_element<W: std::io::Write>(
    writer: &mut Writer<W>,
    element: &XmlElement,
) -> Result<(), EafError> {
    let mut builder = writer.create_element(element.name.as_str());
    for (key, value) in &element.attributes {
        builder = builder.with_attribute((key.as_str(), value.as_str()));
    }

    if element.children.is_empty() {
        builder.write_empty()?;
        return Ok(());
    }

    if element
        .children
        .iter()
        .all(|node| matches!(node, XmlNode::Text(_)))
    {
        builder.write_text_content(BytesText::new(&element.text()))?;
        return Ok(());
    }

    builder.write_inner_content(|writer| {
        for node in &element.children {
            match node {
                XmlNode::Element(child) => write_element(writer, child)?,
                XmlNode::Text(text) => writer.write_event(Event::Text(BytesText::new(text)))?,
            }
        }
        Ok(())
    })?;
    Ok(())
}
