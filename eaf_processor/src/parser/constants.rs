//! # EAF 解析器 - 常量定义
//!
//! 解析 EAF 文件时用到的 XML 标签和属性名。

pub(super) const TAG_ANNOTATION_DOCUMENT: &[u8] = b"ANNOTATION_DOCUMENT";
pub(super) const TAG_HEADER: &[u8] = b"HEADER";
pub(super) const TAG_TIME_ORDER: &[u8] = b"TIME_ORDER";
pub(super) const TAG_TIME_SLOT: &[u8] = b"TIME_SLOT";
pub(super) const TAG_TIER: &[u8] = b"TIER";
pub(super) const TAG_ANNOTATION: &[u8] = b"ANNOTATION";
pub(super) const TAG_ALIGNABLE_ANNOTATION: &[u8] = b"ALIGNABLE_ANNOTATION";
pub(super) const TAG_REF_ANNOTATION: &[u8] = b"REF_ANNOTATION";
pub(super) const TAG_ANNOTATION_VALUE: &[u8] = b"ANNOTATION_VALUE";
pub(super) const TAG_LINGUISTIC_TYPE: &[u8] = b"LINGUISTIC_TYPE";

pub(super) const ATTR_TIME_SLOT_ID: &[u8] = b"TIME_SLOT_ID";
pub(super) const ATTR_TIME_VALUE: &[u8] = b"TIME_VALUE";

pub(super) const ATTR_TIER_ID: &[u8] = b"TIER_ID";
pub(super) const ATTR_LINGUISTIC_TYPE_REF: &[u8] = b"LINGUISTIC_TYPE_REF";
pub(super) const ATTR_PARENT_REF: &[u8] = b"PARENT_REF";
pub(super) const ATTR_PARTICIPANT: &[u8] = b"PARTICIPANT";
pub(super) const ATTR_ANNOTATOR: &[u8] = b"ANNOTATOR";
pub(super) const ATTR_DEFAULT_LOCALE: &[u8] = b"DEFAULT_LOCALE";
pub(super) const ATTR_LANG_REF: &[u8] = b"LANG_REF";

pub(super) const ATTR_ANNOTATION_ID: &[u8] = b"ANNOTATION_ID";
pub(super) const ATTR_TIME_SLOT_REF1: &[u8] = b"TIME_SLOT_REF1";
pub(super) const ATTR_TIME_SLOT_REF2: &[u8] = b"TIME_SLOT_REF2";
pub(super) const ATTR_SVG_REF: &[u8] = b"SVG_REF";
pub(super) const ATTR_ANNOTATION_REF: &[u8] = b"ANNOTATION_REF";
pub(super) const ATTR_PREVIOUS_ANNOTATION: &[u8] = b"PREVIOUS_ANNOTATION";
pub(super) const ATTR_EXT_REF: &[u8] = b"EXT_REF";
pub(super) const ATTR_CVE_REF: &[u8] = b"CVE_REF";

pub(super) const ATTR_LINGUISTIC_TYPE_ID: &[u8] = b"LINGUISTIC_TYPE_ID";
pub(super) const ATTR_CONSTRAINTS: &[u8] = b"CONSTRAINTS";
pub(super) const ATTR_TIME_ALIGNABLE: &[u8] = b"TIME_ALIGNABLE";
pub(super) const ATTR_GRAPHIC_REFERENCES: &[u8] = b"GRAPHIC_REFERENCES";
pub(super) const ATTR_CONTROLLED_VOCABULARY_REF: &[u8] = b"CONTROLLED_VOCABULARY_REF";

/// `TIER` 上由模型直接表示的属性，其余属性进入 `extra_attributes`。
pub(super) const KNOWN_TIER_ATTRS: &[&[u8]] = &[
    ATTR_TIER_ID,
    ATTR_LINGUISTIC_TYPE_REF,
    ATTR_PARENT_REF,
    ATTR_PARTICIPANT,
    ATTR_ANNOTATOR,
    ATTR_DEFAULT_LOCALE,
    ATTR_LANG_REF,
];

/// `LINGUISTIC_TYPE` 上由模型直接表示的属性。
pub(super) const KNOWN_LINGUISTIC_TYPE_ATTRS: &[&[u8]] = &[
    ATTR_LINGUISTIC_TYPE_ID,
    ATTR_CONSTRAINTS,
    ATTR_TIME_ALIGNABLE,
    ATTR_GRAPHIC_REFERENCES,
    ATTR_CONTROLLED_VOCABULARY_REF,
];
