//! 标注（`ANNOTATION`）。

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{AnchorId, AnnotationId, EafError};

/// 标注的边界：起点或终点。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Boundary {
    Start,
    End,
}

impl fmt::Display for Boundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => write!(f, "start"),
            Self::End => write!(f, "end"),
        }
    }
}

/// 标注的两种形式。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnnotationKind {
    /// `ALIGNABLE_ANNOTATION`，通过两个时间槽锚定。
    Alignable {
        start_slot: AnchorId,
        end_slot: AnchorId,
        svg_ref: Option<String>,
    },
    /// `REF_ANNOTATION`，引用父层上的另一个标注，没有自己的时间槽。
    Reference {
        annotation_ref: AnnotationId,
        previous: Option<AnnotationId>,
    },
}

/// 一个标注。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    pub id: AnnotationId,
    /// `ANNOTATION_VALUE` 的文本内容。
    pub value: String,
    pub kind: AnnotationKind,
    pub ext_ref: Option<String>,
    pub cve_ref: Option<String>,
}

impl Annotation {
    /// 创建一个可时间对齐的标注。
    #[must_use]
    pub fn alignable(
        id: AnnotationId,
        value: impl Into<String>,
        start_slot: AnchorId,
        end_slot: AnchorId,
    ) -> Self {
        Self {
            id,
            value: value.into(),
            kind: AnnotationKind::Alignable {
                start_slot,
                end_slot,
                svg_ref: None,
            },
            ext_ref: None,
            cve_ref: None,
        }
    }

    /// 创建一个引用型标注。
    #[must_use]
    pub fn reference(
        id: AnnotationId,
        value: impl Into<String>,
        annotation_ref: AnnotationId,
        previous: Option<AnnotationId>,
    ) -> Self {
        Self {
            id,
            value: value.into(),
            kind: AnnotationKind::Reference {
                annotation_ref,
                previous,
            },
            ext_ref: None,
            cve_ref: None,
        }
    }

    #[must_use]
    pub const fn annotation_id(&self) -> AnnotationId {
        self.id
    }

    #[must_use]
    pub fn annotation_value(&self) -> &str {
        &self.value
    }

    #[must_use]
    pub const fn is_time_alignable(&self) -> bool {
        matches!(self.kind, AnnotationKind::Alignable { .. })
    }

    #[must_use]
    pub const fn start_time_slot(&self) -> Option<AnchorId> {
        self.time_slot(Boundary::Start)
    }

    #[must_use]
    pub const fn end_time_slot(&self) -> Option<AnchorId> {
        self.time_slot(Boundary::End)
    }

    /// 返回指定边界引用的时间槽，引用型标注返回 `None`。
    #[must_use]
    pub const fn time_slot(&self, boundary: Boundary) -> Option<AnchorId> {
        match (&self.kind, boundary) {
            (AnnotationKind::Alignable { start_slot, .. }, Boundary::Start) => Some(*start_slot),
            (AnnotationKind::Alignable { end_slot, .. }, Boundary::End) => Some(*end_slot),
            (AnnotationKind::Reference { .. }, _) => None,
        }
    }

    pub fn set_start_time_slot(&mut self, slot: AnchorId) -> Result<(), EafError> {
        self.set_time_slot(Boundary::Start, slot)
    }

    pub fn set_end_time_slot(&mut self, slot: AnchorId) -> Result<(), EafError> {
        self.set_time_slot(Boundary::End, slot)
    }

    /// 把指定边界重新绑定到另一个时间槽。
    pub fn set_time_slot(&mut self, boundary: Boundary, slot: AnchorId) -> Result<(), EafError> {
        match (&mut self.kind, boundary) {
            (AnnotationKind::Alignable { start_slot, .. }, Boundary::Start) => *start_slot = slot,
            (AnnotationKind::Alignable { end_slot, .. }, Boundary::End) => *end_slot = slot,
            (AnnotationKind::Reference { .. }, _) => return Err(EafError::NotAlignable(self.id)),
        }
        Ok(())
    }
}
