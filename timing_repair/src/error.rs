use std::fmt;

use elan_core::{AnchorId, AnnotationId, EafError};
use thiserror::Error;

use crate::graph::AnchorRef;

/// 标注层级无法可靠重建时的错误。
///
/// 这类错误总是致命的：任何修补都可能悄悄破坏时间结构。
#[derive(Error, Debug)]
pub enum StructuralError {
    /// 找不到子标注所属的父标注。
    #[error("无法确定标注 {annotation} 的父标注")]
    UnresolvedParent { annotation: AnnotationId },
    /// 向前回溯兄弟标注时链条中断，找不到首个子标注。
    #[error("标注 {annotation} 向前找不到首个子标注，兄弟链断裂")]
    BrokenChain { annotation: AnnotationId },
    /// 时间槽的共享方式不属于任何可处理的模式。
    #[error("时间槽 {anchor} 的共享方式无法处理: [{}]", DisplayRefs(.refs))]
    UnexpectedSharing {
        anchor: AnchorId,
        refs: Vec<AnchorRef>,
    },
    /// 带包含约束的层没有父层。
    #[error("层 '{tier}' 带有包含约束，但没有父层")]
    MissingParentTier { tier: String },
    /// 父层不存在于文档中。
    #[error("层 '{tier}' 引用的父层 '{parent}' 不存在")]
    UnknownParentTier { tier: String, parent: String },
    /// 插值需要父标注的原始起止时间，但其中至少一个没有值。
    #[error("父标注 {parent} 缺少原始时间值，无法插值")]
    MissingParentTimes { parent: AnnotationId },
    /// 找不到指定 ID 的标注。
    #[error("找不到标注 {0}")]
    UnknownAnnotation(AnnotationId),
    /// 修改文档时出错。
    #[error(transparent)]
    Document(#[from] EafError),
}

struct DisplayRefs<'a>(&'a [AnchorRef]);

impl fmt::Display for DisplayRefs<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, anchor_ref) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{anchor_ref}")?;
        }
        Ok(())
    }
}

/// 读取 Toolbox 文件时可能发生的错误。
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ToolboxError {
    /// 参考层行没有内容。
    #[error("第 {line_number} 行的 \\{marker} 没有内容")]
    MalformedLine { line_number: usize, marker: String },
    /// 无法转换为毫秒的时间值。
    #[error("无效的时间值: '{0}'")]
    InvalidTime(String),
    /// 写回某一层时，记录数与文件中的行数不一致。
    #[error("层 \\{marker} 有 {expected} 行，但提供了 {found} 条记录")]
    RecordCountMismatch {
        marker: String,
        expected: usize,
        found: usize,
    },
}

/// 导入词级时间时可能发生的错误。
#[derive(Error, Debug)]
pub enum ImportError {
    #[error(transparent)]
    Structural(#[from] StructuralError),
    #[error(transparent)]
    Toolbox(#[from] ToolboxError),
    #[error(transparent)]
    Document(#[from] EafError),
    /// 词标注的时间区间不在父层任何标注之内。
    #[error("层 '{tier}' 上的标注 {annotation} 不在父层任何标注的时间区间内")]
    UnresolvedParent {
        annotation: AnnotationId,
        tier: String,
    },
    /// 词层或其父层中仍有被两个标注共用的时间槽，写入时间会同时改动另一个标注。
    #[error("层 '{tier}' 的时间槽 {anchor} 同时被 {first} 和 {second} 引用，请先拆分共享的时间槽")]
    SharedTimeSlot {
        tier: String,
        anchor: AnchorId,
        first: AnnotationId,
        second: AnnotationId,
    },
    /// 父标注的参考号在 Toolbox 文件中不存在。
    #[error("Toolbox 文件中找不到参考号 '{reference}'（父标注 {parent}）")]
    MissingReference {
        reference: String,
        parent: AnnotationId,
    },
    /// 文档中的词数与 Toolbox 记录中的时间数不一致，或同一记录的起止时间数不一致。
    #[error("参考号 '{reference}' 的词数不一致: 应为 {expected}，实际为 {found}")]
    WordCountMismatch {
        reference: String,
        expected: usize,
        found: usize,
    },
}
