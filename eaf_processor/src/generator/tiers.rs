//! # EAF 生成器 - 层、标注与语言类型

use elan_core::{Annotation, AnnotationKind, EafDocument, EafError, LinguisticType, Tier};
use quick_xml::{Writer, events::BytesText};

/// 写入一个 `<TIER>` 及其全部标注。
pub(super) fn write_tier<W: std::io::Write>(
    writer: &mut Writer<W>,
    tier: &Tier,
    document: &EafDocument,
) -> Result<(), EafError> {
    let optional_attrs = [
        ("PARENT_REF", tier.parent_ref.as_deref()),
        ("PARTICIPANT", tier.participant.as_deref()),
        ("ANNOTATOR", tier.annotator.as_deref()),
        ("DEFAULT_LOCALE", tier.default_locale.as_deref()),
        ("LANG_REF", tier.lang_ref.as_deref()),
    ];

    let mut builder = writer
        .create_element("TIER")
        .with_attribute(("LINGUISTIC_TYPE_REF", tier.linguistic_type_ref.as_str()));
    for (key, value) in optional_attrs {
        if let Some(value) = value {
            builder = builder.with_attribute((key, value));
        }
    }
    builder = builder.with_attribute(("TIER_ID", tier.id.as_str()));
    for (key, value) in &tier.extra_attributes {
        builder = builder.with_attribute((key.as_str(), value.as_str()));
    }

    if tier.annotations.is_empty() {
        builder.write_empty()?;
        return Ok(());
    }

    builder.write_inner_content(|writer| {
        for annotation in &tier.annotations {
            writer
                .create_element("ANNOTATION")
                .write_inner_content(|writer| {
                    write_annotation(writer, annotation, document).map_err(std::io::Error::other)
                })?;
        }
        Ok(())
    })?;
    Ok(())
}

fn write_annotation<W: std::io::Write>(
    writer: &mut Writer<W>,
    annotation: &Annotation,
    document: &EafDocument,
) -> Result<(), EafError> {
    let id = document.format_annotation_id(annotation.id);

    let mut builder = match &annotation.kind {
        AnnotationKind::Alignable {
            start_slot,
            end_slot,
            svg_ref,
        } => {
            let mut builder = writer
                .create_element("ALIGNABLE_ANNOTATION")
                .with_attribute(("ANNOTATION_ID", id.as_str()));
            if let Some(svg_ref) = svg_ref {
                builder = builder.with_attribute(("SVG_REF", svg_ref.as_str()));
            }
            builder
                .with_attribute(("TIME_SLOT_REF1", start_slot.to_string().as_str()))
                .with_attribute(("TIME_SLOT_REF2", end_slot.to_string().as_str()))
        }
        AnnotationKind::Reference {
            annotation_ref,
            previous,
        } => {
            let mut builder = writer
                .create_element("REF_ANNOTATION")
                .with_attribute(("ANNOTATION_ID", id.as_str()))
                .with_attribute((
                    "ANNOTATION_REF",
                    document.format_annotation_id(*annotation_ref).as_str(),
                ));
            if let Some(previous) = previous {
                builder = builder.with_attribute((
                    "PREVIOUS_ANNOTATION",
                    document.format_annotation_id(*previous).as_str(),
                ));
            }
            builder
        }
    };

    if let Some(ext_ref) = &annotation.ext_ref {
        builder = builder.with_attribute(("EXT_REF", ext_ref.as_str()));
    }
    if let Some(cve_ref) = &annotation.cve_ref {
        builder = builder.with_attribute(("CVE_REF", cve_ref.as_str()));
    }

    builder.write_inner_content(|writer| {
        writer
            .create_element("ANNOTATION_VALUE")
            .write_text_content(BytesText::new(&annotation.value))?;
        Ok(())
    })?;
    Ok(())
}

/// 写入一个 `<LINGUISTIC_TYPE>`。
pub(super) fn write_linguistic_type<W: std::io::Write>(
    writer: &mut Writer<W>,
    linguistic_type: &LinguisticType,
) -> Result<(), EafError> {
    let mut builder = writer.create_element("LINGUISTIC_TYPE");
    if let Some(constraint) = linguistic_type.constraint {
        builder = builder.with_attribute(("CONSTRAINTS", constraint.as_ref()));
    }
    if let Some(cv) = &linguistic_type.controlled_vocabulary {
        builder = builder.with_attribute(("CONTROLLED_VOCABULARY_REF", cv.as_str()));
    }
    builder = builder
        .with_attribute((
            "GRAPHIC_REFERENCES",
            bool_str(linguistic_type.graphic_references),
        ))
        .with_attribute(("LINGUISTIC_TYPE_ID", linguistic_type.id.as_str()))
        .with_attribute(("TIME_ALIGNABLE", bool_str(linguistic_type.time_alignable)));
    for (key, value) in &linguistic_type.extra_attributes {
        builder = builder.with_attribute((key.as_str(), value.as_str()));
    }
    builder.write_empty()?;
    Ok(())
}

const fn bool_str(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}
