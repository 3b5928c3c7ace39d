//! # 标注图
//!
//! 从共享的时间槽推断出父子标注关系。EAF 文件本身不记录子标注属于哪个父标注，
//! 只能通过二者是否引用同一个时间槽（或时间上的包含关系）来推断。

mod builder;
mod containment;
mod hierarchy;

use std::{collections::HashMap, fmt};

use elan_core::{AnchorId, AnnotationId, Boundary};

pub use builder::{build_annotation_graph, find_shared_anchor, relevant_tier_pairs};
pub use containment::{ContainmentResolution, resolve_by_containment};
pub use hierarchy::Hierarchy;

/// 标注在一对父层/子层中的角色。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Role {
    Parent,
    Daughter,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parent => write!(f, "parent"),
            Self::Daughter => write!(f, "daughter"),
        }
    }
}

/// 一个时间槽被谁引用：哪个标注、以什么角色、作为哪一端。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnchorRef {
    pub annotation: AnnotationId,
    pub role: Role,
    pub boundary: Boundary,
}

impl AnchorRef {
    #[must_use]
    pub const fn new(annotation: AnnotationId, role: Role, boundary: Boundary) -> Self {
        Self {
            annotation,
            role,
            boundary,
        }
    }

    /// 规范顺序：父在子前，终点在起点前。
    fn canonical_key(&self) -> (Role, bool, AnnotationId) {
        (self.role, self.boundary == Boundary::Start, self.annotation)
    }
}

impl fmt::Display for AnchorRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.annotation, self.role, self.boundary)
    }
}

/// 父标注在任何修改之前的起止时间。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParentSpan {
    pub start: Option<u64>,
    pub end: Option<u64>,
}

/// 由 [`build_annotation_graph`] 构建的派生结构，不写回文档。
#[derive(Debug, Clone, Default)]
pub struct AnnotationGraph {
    anchors: HashMap<AnchorId, Vec<AnchorRef>>,
    hierarchy: Hierarchy,
    daughter_positions: HashMap<AnnotationId, usize>,
    parent_spans: HashMap<AnnotationId, ParentSpan>,
    processed_tiers: Vec<String>,
    skipped_tiers: Vec<String>,
}

impl AnnotationGraph {
    /// 引用该时间槽的全部元组，已按规范顺序排列。
    #[must_use]
    pub fn refs_at(&self, anchor: AnchorId) -> &[AnchorRef] {
        self.anchors.get(&anchor).map(Vec::as_slice).unwrap_or_default()
    }

    #[must_use]
    pub const fn hierarchy(&self) -> &Hierarchy {
        &self.hierarchy
    }

    /// 子标注与其父标注下首个子标注之间的距离。
    #[must_use]
    pub fn daughter_position(&self, daughter: AnnotationId) -> Option<usize> {
        self.daughter_positions.get(&daughter).copied()
    }

    #[must_use]
    pub fn parent_span(&self, parent: AnnotationId) -> Option<ParentSpan> {
        self.parent_spans.get(&parent).copied()
    }

    /// 需要处理的层（子层 ID）。
    #[must_use]
    pub fn processed_tiers(&self) -> &[String] {
        &self.processed_tiers
    }

    /// 已经没有共享时间槽、因而跳过的层。
    #[must_use]
    pub fn skipped_tiers(&self) -> &[String] {
        &self.skipped_tiers
    }

    /// 没有任何层需要处理时，图为空。
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    fn add_ref(&mut self, anchor: AnchorId, anchor_ref: AnchorRef) {
        let refs = self.anchors.entry(anchor).or_default();
        if !refs.contains(&anchor_ref) {
            refs.push(anchor_ref);
        }
    }

    fn canonicalize(&mut self) {
        for refs in self.anchors.values_mut() {
            refs.sort_by_key(AnchorRef::canonical_key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refs_are_canonicalized() {
        let mut graph = AnnotationGraph::default();
        let anchor = AnchorId(4);
        graph.add_ref(
            anchor,
            AnchorRef::new(AnnotationId(3), Role::Daughter, Boundary::Start),
        );
        graph.add_ref(
            anchor,
            AnchorRef::new(AnnotationId(2), Role::Daughter, Boundary::End),
        );
        graph.add_ref(
            anchor,
            AnchorRef::new(AnnotationId(2), Role::Daughter, Boundary::End),
        );
        graph.canonicalize();

        assert_eq!(
            graph.refs_at(anchor),
            &[
                AnchorRef::new(AnnotationId(2), Role::Daughter, Boundary::End),
                AnchorRef::new(AnnotationId(3), Role::Daughter, Boundary::Start),
            ]
        );
        assert!(graph.refs_at(AnchorId(99)).is_empty());
    }

    #[test]
    fn test_anchor_ref_display() {
        let anchor_ref = AnchorRef::new(AnnotationId(7), Role::Parent, Boundary::End);
        assert_eq!(anchor_ref.to_string(), "(a7, parent, end)");
    }
}
