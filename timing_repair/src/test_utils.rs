//! 单元测试共用的小型 EAF 文档。

use eaf_processor::parse_eaf;
use elan_core::EafDocument;

pub(crate) const IMPORTED_TOOLBOX: &str = include_str!("../tests/test_data/imported_toolbox.eaf");

/// 用给定的时间槽和层拼出一个完整文档。
///
/// 语言类型固定为 `ref`（无约束）、`t`（`Included_In`）和 `ft`（`Symbolic_Association`）。
pub(crate) fn eaf(time_slots: &str, tiers: &str) -> EafDocument {
    let xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<ANNOTATION_DOCUMENT AUTHOR="" FORMAT="3.0" VERSION="3.0">
    <HEADER MEDIA_FILE="" TIME_UNITS="milliseconds"/>
    <TIME_ORDER>{time_slots}</TIME_ORDER>
    {tiers}
    <LINGUISTIC_TYPE GRAPHIC_REFERENCES="false" LINGUISTIC_TYPE_ID="ref" TIME_ALIGNABLE="true"/>
    <LINGUISTIC_TYPE CONSTRAINTS="Included_In" GRAPHIC_REFERENCES="false" LINGUISTIC_TYPE_ID="t" TIME_ALIGNABLE="true"/>
    <LINGUISTIC_TYPE CONSTRAINTS="Symbolic_Association" GRAPHIC_REFERENCES="false" LINGUISTIC_TYPE_ID="ft" TIME_ALIGNABLE="false"/>
</ANNOTATION_DOCUMENT>"#
    );
    parse_eaf(&xml).unwrap()
}

/// `<TIME_SLOT>` 列表，`None` 表示没有时间值。
pub(crate) fn slots(values: &[Option<u64>]) -> String {
    values
        .iter()
        .enumerate()
        .map(|(i, value)| match value {
            Some(v) => format!(r#"<TIME_SLOT TIME_SLOT_ID="ts{}" TIME_VALUE="{v}"/>"#, i + 1),
            None => format!(r#"<TIME_SLOT TIME_SLOT_ID="ts{}"/>"#, i + 1),
        })
        .collect()
}

/// 一个带 `ALIGNABLE_ANNOTATION` 的层。每项为 (标注号, 起始槽号, 结束槽号, 值)。
pub(crate) fn tier(
    id: &str,
    linguistic_type: &str,
    parent: Option<&str>,
    annotations: &[(u64, u64, u64, &str)],
) -> String {
    let parent = parent.map_or_else(String::new, |p| format!(r#" PARENT_REF="{p}""#));
    let body: String = annotations
        .iter()
        .map(|(a, start, end, value)| {
            format!(
                r#"<ANNOTATION><ALIGNABLE_ANNOTATION ANNOTATION_ID="a{a}" TIME_SLOT_REF1="ts{start}" TIME_SLOT_REF2="ts{end}"><ANNOTATION_VALUE>{value}</ANNOTATION_VALUE></ALIGNABLE_ANNOTATION></ANNOTATION>"#
            )
        })
        .collect();
    format!(r#"<TIER LINGUISTIC_TYPE_REF="{linguistic_type}"{parent} TIER_ID="{id}">{body}</TIER>"#)
}

/// 父层 `ref` 加上子层 `t@A`。
pub(crate) fn two_level(
    time_slots: &[Option<u64>],
    parents: &[(u64, u64, u64, &str)],
    words: &[(u64, u64, u64, &str)],
) -> EafDocument {
    let tiers = format!(
        "{}{}",
        tier("ref", "ref", None, parents),
        tier("t@A", "t", Some("ref"), words)
    );
    eaf(&slots(time_slots), &tiers)
}
