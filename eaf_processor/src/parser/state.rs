//! # 解析器的状态机和数据结构

use elan_core::{AnnotationId, AnnotationKind, DocumentParts, Tier};

/// 主解析器状态机。
#[derive(Debug, Default)]
pub(super) struct EafParserState {
    /// 是否已经遇到根元素 `ANNOTATION_DOCUMENT`。
    pub(super) seen_root: bool,
    /// 正在构建的文档部件。
    pub(super) parts: DocumentParts,
    /// 当前所在的 `<TIER>`。
    pub(super) current_tier: Option<Tier>,
    /// 当前所在的 `<ALIGNABLE_ANNOTATION>` 或 `<REF_ANNOTATION>`。
    pub(super) current_annotation: Option<PendingAnnotation>,
    /// 是否在 `<ANNOTATION_VALUE>` 内部。
    pub(super) in_annotation_value: bool,
    /// `<ANNOTATION_VALUE>` 的文本缓冲区。
    pub(super) text_buffer: String,
}

/// 正在解析、尚未读到 `ANNOTATION_VALUE` 结束标签的标注。
#[derive(Debug, Clone)]
pub(super) struct PendingAnnotation {
    pub(super) id: AnnotationId,
    pub(super) kind: AnnotationKind,
    pub(super) value: String,
    pub(super) ext_ref: Option<String>,
    pub(super) cve_ref: Option<String>,
}
