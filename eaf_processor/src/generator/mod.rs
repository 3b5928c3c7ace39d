//! # EAF 生成器
//!
//! 把 [`EafDocument`] 写回 ELAN 可以读取的 XML。

mod opaque;
mod tiers;
mod time_order;

use std::io::Cursor;

use elan_core::{EafDocument, EafError, EafGenerationOptions};
use quick_xml::{
    Writer,
    events::{BytesDecl, Event},
};
use tracing::debug;

/// EAF 生成的主入口函数。
///
/// # 参数
/// * `document` - 要写出的文档。
/// * `options` - 生成选项，控制是否缩进。
///
/// # Errors
///
/// 如果在生成 XML 或将结果转换为字符串时发生错误，返回 `EafError`。
pub fn generate_eaf(
    document: &EafDocument,
    options: &EafGenerationOptions,
) -> Result<String, EafError> {
    let mut buffer = Vec::new();

    let result = if options.format {
        let mut writer =
            Writer::new_with_indent(Cursor::new(&mut buffer), b' ', options.indent_size);
        generate_eaf_inner(&mut writer, document)
    } else {
        let mut writer = Writer::new(Cursor::new(&mut buffer));
        generate_eaf_inner(&mut writer, document)
    };

    result?;

    debug!("EAF 已生成，{} 字节", buffer.len());
    String::from_utf8(buffer).map_err(EafError::FromUtf8)
}

fn generate_eaf_inner<W: std::io::Write>(
    writer: &mut Writer<W>,
    document: &EafDocument,
) -> Result<(), EafError> {
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut root = writer.create_element("ANNOTATION_DOCUMENT");
    for (key, value) in document.root_attributes() {
        root = root.with_attribute((key.as_str(), value.as_str()));
    }

    root.write_inner_content(|writer| {
        for element in document.leading_elements() {
            opaque::write_element(writer, element)?;
        }
        if let Some(header) = document.header() {
            opaque::write_element(writer, header)?;
        }
        time_order::write_time_order(writer, document.time_order())?;
        for tier in document.tiers() {
            tiers::write_tier(writer, tier, document)?;
        }
        for linguistic_type in document.linguistic_types() {
            tiers::write_linguistic_type(writer, linguistic_type)?;
        }
        for element in document.trailing_elements() {
            opaque::write_element(writer, element)?;
        }
        Ok(())
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_eaf;
    use elan_core::{AnchorId, AnnotationId, TimeOrder, TimeSlot};

    const SAMPLE: &str = include_str!("../../tests/test_data/imported_toolbox.eaf");

    #[test]
    fn test_round_trip_preserves_structure() {
        let doc = parse_eaf(SAMPLE).unwrap();
        let xml = generate_eaf(&doc, &EafGenerationOptions::default()).unwrap();
        let reparsed = parse_eaf(&xml).unwrap();

        assert_eq!(reparsed.tiers(), doc.tiers());
        assert_eq!(reparsed.linguistic_types(), doc.linguistic_types());
        assert_eq!(
            reparsed.time_order().as_slice(),
            doc.time_order().as_slice()
        );
        assert_eq!(reparsed.leading_elements(), doc.leading_elements());
        assert_eq!(reparsed.header(), doc.header());
        assert_eq!(reparsed.trailing_elements(), doc.trailing_elements());
        assert_eq!(reparsed.root_attributes(), doc.root_attributes());
    }

    #[test]
    fn test_license_stays_before_header() {
        let eaf = r#"<?xml version="1.0" encoding="UTF-8"?>
<ANNOTATION_DOCUMENT AUTHOR="" FORMAT="3.0" VERSION="3.0">
    <LICENSE LICENSE_URL="">CC BY</LICENSE>
    <HEADER MEDIA_FILE="" TIME_UNITS="milliseconds">
        <PROPERTY NAME="x"> </PROPERTY>
    </HEADER>
    <TIME_ORDER/>
    <LINGUISTIC_TYPE GRAPHIC_REFERENCES="false" LINGUISTIC_TYPE_ID="ref" TIME_ALIGNABLE="true"/>
    <LANGUAGE LANG_ID="deu"/>
</ANNOTATION_DOCUMENT>
"#;
        let doc = parse_eaf(eaf).unwrap();
        assert_eq!(doc.leading_elements().len(), 1);
        assert_eq!(doc.trailing_elements()[0].name, "LANGUAGE");

        let xml = generate_eaf(&doc, &EafGenerationOptions::default()).unwrap();
        let license = xml.find("<LICENSE").unwrap();
        let header = xml.find("<HEADER").unwrap();
        let language = xml.find("<LANGUAGE").unwrap();
        assert!(license < header && header < language);
        assert!(xml.contains(r#"<LICENSE LICENSE_URL="">CC BY</LICENSE>"#));
        assert!(xml.contains(r#"<PROPERTY NAME="x"> </PROPERTY>"#));

        let reparsed = parse_eaf(&xml).unwrap();
        assert_eq!(reparsed.leading_elements(), doc.leading_elements());
        assert_eq!(reparsed.header(), doc.header());
    }

    #[test]
    fn test_unset_time_value_is_omitted() {
        let doc = parse_eaf(SAMPLE).unwrap();
        let xml = generate_eaf(&doc, &EafGenerationOptions::default()).unwrap();
        assert!(xml.contains(r#"<TIME_SLOT TIME_SLOT_ID="ts2"/>"#));
        assert!(xml.contains(r#"<TIME_SLOT TIME_SLOT_ID="ts1" TIME_VALUE="1000"/>"#));
        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
    }

    #[test]
    fn test_compact_output_and_escaping() {
        let mut doc = parse_eaf(SAMPLE).unwrap();
        doc.annotation_by_id_mut(AnnotationId(2)).unwrap().value = "a<b & c".to_string();
        let options = EafGenerationOptions {
            format: false,
            ..Default::default()
        };
        let xml = generate_eaf(&doc, &options).unwrap();
        assert!(!xml.contains("\n    <TIME_ORDER>"));
        assert!(xml.contains("<ANNOTATION_VALUE>a&lt;b &amp; c</ANNOTATION_VALUE>"));

        let reparsed = parse_eaf(&xml).unwrap();
        assert_eq!(
            reparsed.annotation_by_id(AnnotationId(2)).unwrap().value,
            "a<b & c"
        );
    }

    #[test]
    fn test_replaced_time_order_is_written() {
        let mut doc = parse_eaf(SAMPLE).unwrap();
        let mut order = TimeOrder::new();
        for (i, slot) in doc.time_order().iter().enumerate() {
            let value = slot.time_value().or(Some(2000 + i as u64));
            order.add_time_slot(TimeSlot::new(slot.id(), value)).unwrap();
        }
        doc.set_time_order(order);

        let xml = generate_eaf(&doc, &EafGenerationOptions::default()).unwrap();
        let reparsed = parse_eaf(&xml).unwrap();
        assert_eq!(reparsed.time_slot_value(AnchorId(2)), Some(2001));
    }
}
