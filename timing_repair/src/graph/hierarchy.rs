//! 父标注与子标注之间的双向索引。

use std::collections::HashMap;

use elan_core::AnnotationId;

/// 子标注 -> 父标注，以及父标注 -> 有序子标注列表。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hierarchy {
    annotation_to_parent: HashMap<AnnotationId, AnnotationId>,
    parent_to_daughters: HashMap<AnnotationId, Vec<AnnotationId>>,
}

impl Hierarchy {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录一条父子关系。同一个子标注重复插入时保留第一次的父标注。
    pub fn insert(&mut self, daughter: AnnotationId, parent: AnnotationId) {
        if self.annotation_to_parent.contains_key(&daughter) {
            return;
        }
        self.annotation_to_parent.insert(daughter, parent);
        self.parent_to_daughters
            .entry(parent)
            .or_default()
            .push(daughter);
    }

    #[must_use]
    pub fn parent_of(&self, daughter: AnnotationId) -> Option<AnnotationId> {
        self.annotation_to_parent.get(&daughter).copied()
    }

    #[must_use]
    pub fn daughters_of(&self, parent: AnnotationId) -> &[AnnotationId] {
        self.parent_to_daughters
            .get(&parent)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    #[must_use]
    pub fn daughter_count(&self, parent: AnnotationId) -> usize {
        self.daughters_of(parent).len()
    }

    /// 拥有子标注的全部父标注，按 ID 排序。
    #[must_use]
    pub fn parents(&self) -> Vec<AnnotationId> {
        let mut parents: Vec<_> = self.parent_to_daughters.keys().copied().collect();
        parents.sort_unstable();
        parents
    }

    /// 按给定的键重新排列每个父标注下的子标注。
    pub fn sort_daughters_by_key<K: Ord>(&mut self, mut key: impl FnMut(AnnotationId) -> K) {
        for daughters in self.parent_to_daughters.values_mut() {
            daughters.sort_by_key(|&id| key(id));
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.annotation_to_parent.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.annotation_to_parent.is_empty()
    }
}
