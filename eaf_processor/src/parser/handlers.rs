//! # EAF 解析器 - 事件处理器与分发器

use elan_core::{
    AnchorId, Annotation, AnnotationId, AnnotationKind, Constraint, EafError, LinguisticType,
    Tier, TimeSlot,
};
use quick_xml::{
    Reader,
    events::{BytesStart, Event},
};
use tracing::{debug, warn};

use super::{
    constants::{
        ATTR_ANNOTATION_ID, ATTR_ANNOTATION_REF, ATTR_ANNOTATOR, ATTR_CONSTRAINTS,
        ATTR_CONTROLLED_VOCABULARY_REF, ATTR_CVE_REF, ATTR_DEFAULT_LOCALE, ATTR_EXT_REF,
        ATTR_GRAPHIC_REFERENCES, ATTR_LANG_REF, ATTR_LINGUISTIC_TYPE_ID, ATTR_LINGUISTIC_TYPE_REF,
        ATTR_PARENT_REF, ATTR_PARTICIPANT, ATTR_PREVIOUS_ANNOTATION, ATTR_SVG_REF,
        ATTR_TIER_ID, ATTR_TIME_ALIGNABLE, ATTR_TIME_SLOT_ID, ATTR_TIME_SLOT_REF1,
        ATTR_TIME_SLOT_REF2, ATTR_TIME_VALUE, KNOWN_LINGUISTIC_TYPE_ATTRS, KNOWN_TIER_ATTRS,
        TAG_ALIGNABLE_ANNOTATION, TAG_ANNOTATION, TAG_ANNOTATION_DOCUMENT, TAG_ANNOTATION_VALUE,
        TAG_HEADER, TAG_LINGUISTIC_TYPE, TAG_REF_ANNOTATION, TAG_TIER, TAG_TIME_ORDER,
        TAG_TIME_SLOT,
    },
    opaque::read_element,
    state::{EafParserState, PendingAnnotation},
    utils::{
        collect_attributes_except, get_bool_attribute, get_required_attribute,
        get_string_attribute, parse_time_value, resolve_entity,
    },
};

/// 分发一个 XML 事件。
pub(super) fn handle_event(
    event: &Event<'_>,
    reader: &mut Reader<&[u8]>,
    state: &mut EafParserState,
) -> Result<(), EafError> {
    match event {
        Event::Start(e) => handle_start(e, reader, state, false),
        Event::Empty(e) => handle_start(e, reader, state, true),
        Event::Text(e) if state.in_annotation_value => {
            state.text_buffer.push_str(&e.xml_content()?);
            Ok(())
        }
        Event::CData(e) if state.in_annotation_value => {
            state.text_buffer.push_str(&e.decode()?);
            Ok(())
        }
        Event::GeneralRef(e) if state.in_annotation_value => {
            if let Some(c) = resolve_entity(e) {
                state.text_buffer.push(c);
            }
            Ok(())
        }
        Event::End(e) => handle_end(e.local_name().as_ref(), state),
        _ => Ok(()),
    }
}

fn handle_start(
    e: &BytesStart,
    reader: &mut Reader<&[u8]>,
    state: &mut EafParserState,
    is_empty: bool,
) -> Result<(), EafError> {
    match e.local_name().as_ref() {
        TAG_ANNOTATION_DOCUMENT => {
            state.seen_root = true;
            state.parts.root_attributes = collect_attributes_except(e, reader, &[])?;
        }
        TAG_HEADER => {
            state.parts.header = Some(read_element(e, reader, is_empty)?);
        }
        TAG_TIME_ORDER | TAG_ANNOTATION => {}
        TAG_TIME_SLOT => process_time_slot(e, reader, state)?,
        TAG_TIER => {
            let tier = read_tier_start(e, reader)?;
            if is_empty {
                state.parts.tiers.push(tier);
            } else {
                state.current_tier = Some(tier);
            }
        }
        TAG_ALIGNABLE_ANNOTATION | TAG_REF_ANNOTATION => {
            let pending = read_annotation_start(e, reader, state)?;
            state.current_annotation = Some(pending);
            if is_empty {
                finish_annotation(state)?;
            }
        }
        TAG_ANNOTATION_VALUE => {
            state.text_buffer.clear();
            // 自闭合的 <ANNOTATION_VALUE/> 表示空值
            state.in_annotation_value = !is_empty;
        }
        TAG_LINGUISTIC_TYPE => {
            let linguistic_type = read_linguistic_type(e, reader)?;
            state.parts.linguistic_types.push(linguistic_type);
        }
        other => {
            if state.current_tier.is_none() && state.seen_root {
                let element = read_element(e, reader, is_empty)?;
                debug!("保留顶层元素 <{}>", element.name);
                // 只有 LICENSE 可以出现在 HEADER 之前
                if state.parts.header.is_none() {
                    state.parts.leading_elements.push(element);
                } else {
                    state.parts.trailing_elements.push(element);
                }
            } else {
                warn!(
                    "忽略了未知元素 <{}>",
                    String::from_utf8_lossy(other)
                );
                if !is_empty {
                    reader.read_to_end(e.name())?;
                }
            }
        }
    }
    Ok(())
}

fn handle_end(name: &[u8], state: &mut EafParserState) -> Result<(), EafError> {
    match name {
        TAG_ANNOTATION_VALUE => {
            state.in_annotation_value = false;
            if let Some(pending) = state.current_annotation.as_mut() {
                pending.value = std::mem::take(&mut state.text_buffer);
            }
        }
        TAG_ALIGNABLE_ANNOTATION | TAG_REF_ANNOTATION => finish_annotation(state)?,
        TAG_TIER => {
            if let Some(tier) = state.current_tier.take() {
                state.parts.tiers.push(tier);
            }
        }
        _ => {}
    }
    Ok(())
}

fn process_time_slot(
    e: &BytesStart,
    reader: &Reader<&[u8]>,
    state: &mut EafParserState,
) -> Result<(), EafError> {
    let id = get_required_attribute(e, reader, ATTR_TIME_SLOT_ID)?.parse::<AnchorId>()?;
    let value = get_string_attribute(e, reader, ATTR_TIME_VALUE)?
        .map(|v| parse_time_value(&v))
        .transpose()?;
    state.parts.time_order.add_time_slot(TimeSlot::new(id, value))
}

fn read_tier_start(e: &BytesStart, reader: &Reader<&[u8]>) -> Result<Tier, EafError> {
    Ok(Tier {
        id: get_required_attribute(e, reader, ATTR_TIER_ID)?,
        linguistic_type_ref: get_required_attribute(e, reader, ATTR_LINGUISTIC_TYPE_REF)?,
        parent_ref: get_string_attribute(e, reader, ATTR_PARENT_REF)?,
        participant: get_string_attribute(e, reader, ATTR_PARTICIPANT)?,
        annotator: get_string_attribute(e, reader, ATTR_ANNOTATOR)?,
        default_locale: get_string_attribute(e, reader, ATTR_DEFAULT_LOCALE)?,
        lang_ref: get_string_attribute(e, reader, ATTR_LANG_REF)?,
        extra_attributes: collect_attributes_except(e, reader, KNOWN_TIER_ATTRS)?,
        annotations: Vec::new(),
    })
}

fn read_annotation_start(
    e: &BytesStart,
    reader: &Reader<&[u8]>,
    state: &mut EafParserState,
) -> Result<PendingAnnotation, EafError> {
    let raw_id = get_required_attribute(e, reader, ATTR_ANNOTATION_ID)?;
    let (id, prefix) = AnnotationId::parse_with_prefix(&raw_id)?;
    if state.parts.annotation_id_prefix.is_empty() {
        state.parts.annotation_id_prefix = prefix.to_string();
    }

    let kind = if e.local_name().as_ref() == TAG_ALIGNABLE_ANNOTATION {
        AnnotationKind::Alignable {
            start_slot: get_required_attribute(e, reader, ATTR_TIME_SLOT_REF1)?.parse()?,
            end_slot: get_required_attribute(e, reader, ATTR_TIME_SLOT_REF2)?.parse()?,
            svg_ref: get_string_attribute(e, reader, ATTR_SVG_REF)?,
        }
    } else {
        AnnotationKind::Reference {
            annotation_ref: get_required_attribute(e, reader, ATTR_ANNOTATION_REF)?.parse()?,
            previous: get_string_attribute(e, reader, ATTR_PREVIOUS_ANNOTATION)?
                .map(|v| v.parse::<AnnotationId>())
                .transpose()?,
        }
    };

    Ok(PendingAnnotation {
        id,
        kind,
        value: String::new(),
        ext_ref: get_string_attribute(e, reader, ATTR_EXT_REF)?,
        cve_ref: get_string_attribute(e, reader, ATTR_CVE_REF)?,
    })
}

fn finish_annotation(state: &mut EafParserState) -> Result<(), EafError> {
    let Some(pending) = state.current_annotation.take() else {
        return Ok(());
    };
    let tier = state.current_tier.as_mut().ok_or_else(|| {
        EafError::InvalidDocument(format!("标注 {} 不在任何 <TIER> 内", pending.id))
    })?;
    tier.annotations.push(Annotation {
        id: pending.id,
        value: pending.value,
        kind: pending.kind,
        ext_ref: pending.ext_ref,
        cve_ref: pending.cve_ref,
    });
    Ok(())
}

fn read_linguistic_type(
    e: &BytesStart,
    reader: &Reader<&[u8]>,
) -> Result<LinguisticType, EafError> {
    let id = get_required_attribute(e, reader, ATTR_LINGUISTIC_TYPE_ID)?;
    let constraint = match get_string_attribute(e, reader, ATTR_CONSTRAINTS)? {
        Some(raw) => Some(raw.parse::<Constraint>().map_err(|err| {
            EafError::InvalidDocument(format!("语言类型 '{id}': {err}"))
        })?),
        None => None,
    };

    Ok(LinguisticType {
        constraint,
        time_alignable: get_bool_attribute(e, reader, ATTR_TIME_ALIGNABLE, true)?,
        graphic_references: get_bool_attribute(e, reader, ATTR_GRAPHIC_REFERENCES, false)?,
        controlled_vocabulary: get_string_attribute(e, reader, ATTR_CONTROLLED_VOCABULARY_REF)?,
        extra_attributes: collect_attributes_except(e, reader, KNOWN_LINGUISTIC_TYPE_ATTRS)?,
        id,
    })
}
