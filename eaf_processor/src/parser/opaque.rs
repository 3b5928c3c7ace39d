//! # 通用元素读取
//!
//! 把解析器不关心的顶层元素读成 [`XmlElement`] 树，以便原样写回。

use elan_core::{EafError, XmlElement, XmlNode};
use quick_xml::{
    Reader,
    events::{BytesStart, Event},
};

use super::utils::{collect_attributes_except, resolve_entity};

fn element_from_start(e: &BytesStart, reader: &Reader<&[u8]>) -> Result<XmlElement, EafError> {
    let mut element = XmlElement::new(String::from_utf8_lossy(e.name().as_ref()).into_owned());
    element.attributes = collect_attributes_except(e, reader, &[])?;
    Ok(element)
}

/// 从开始标签读取整个元素（包括全部子孙）。`is_empty` 为真时表示自闭合标签。
pub(super) fn read_element(
    start: &BytesStart,
    reader: &mut Reader<&[u8]>,
    is_empty: bool,
) -> Result<XmlElement, EafError> {
    let root = element_from_start(start, reader)?;
    if is_empty {
        return Ok(root);
    }

    let mut stack: Vec<XmlElement> = vec![root];
    loop {
        let event = reader.read_event()?;
        let current = stack.last_mut().ok_or_else(|| {
            EafError::InvalidDocument("读取通用元素时元素栈意外为空".to_string())
        })?;

        match event {
            Event::Start(e) => {
                let child = element_from_start(&e, reader)?;
                stack.push(child);
            }
            Event::Empty(e) => {
                let child = element_from_start(&e, reader)?;
                current.children.push(XmlNode::Element(child));
            }
            Event::Text(e) => current.push_text(&e.xml_content()?),
            Event::CData(e) => current.push_text(&e.decode()?),
            Event::GeneralRef(e) => {
                if let Some(c) = resolve_entity(&e) {
                    current.push_text(c.encode_utf8(&mut [0; 4]));
                }
            }
            Event::End(_) => {
                let mut finished = stack.pop().ok_or_else(|| {
                    EafError::InvalidDocument("读取通用元素时元素栈意外为空".to_string())
                })?;
                strip_indentation(&mut finished);
                match stack.last_mut() {
                    Some(parent) => parent.children.push(XmlNode::Element(finished)),
                    None => return Ok(finished),
                }
            }
            Event::Eof => {
                return Err(EafError::InvalidDocument(format!(
                    "元素 <{}> 未闭合就到达了文件末尾",
                    stack.first().map_or("", |e| e.name.as_str())
                )));
            }
            _ => {}
        }
    }
}

/// 去掉子元素之间只含空白的缩进文本。只含文本的元素保持原样。
fn strip_indentation(element: &mut XmlElement) {
    let has_child_elements = element
        .children
        .iter()
        .any(|node| matches!(node, XmlNode::Element(_)));
    if has_child_elements {
        element
            .children
            .retain(|node| !matches!(node, XmlNode::Text(text) if text.trim().is_empty()));
    }
}
