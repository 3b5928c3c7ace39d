//! 按时间包含关系确定父标注。
//!
//! 导入词级时间时，文档可能已经过时间槽拆分，父子标注不再共享任何时间槽，
//! 只能看子标注的区间落在哪个父标注之内。

use elan_core::{AnnotationId, EafDocument, Tier};

use super::Hierarchy;

/// 包含关系的解析结果。
#[derive(Debug, Clone, Default)]
pub struct ContainmentResolution {
    /// 子标注按 ID 数值排序。
    pub hierarchy: Hierarchy,
    /// 没有时间值，或不在任何父标注区间内的子标注。
    pub unresolved: Vec<AnnotationId>,
}

/// 为 `tier` 中每个标注找到 `parent_tier` 中包含它的第一个标注。
#[must_use]
pub fn resolve_by_containment(
    document: &EafDocument,
    tier: &Tier,
    parent_tier: &Tier,
) -> ContainmentResolution {
    let parent_spans: Vec<_> = parent_tier
        .iter()
        .filter_map(|parent| {
            let start = document.annotation_start_time(parent.id)?;
            let end = document.annotation_end_time(parent.id)?;
            Some((parent.id, start, end))
        })
        .collect();

    let mut resolution = ContainmentResolution::default();
    for daughter in tier {
        let span = document
            .annotation_start_time(daughter.id)
            .zip(document.annotation_end_time(daughter.id));
        let parent = span.and_then(|(start, end)| {
            parent_spans
                .iter()
                .find(|&&(_, parent_start, parent_end)| parent_start <= start && end <= parent_end)
                .map(|&(id, ..)| id)
        });

        match parent {
            Some(parent) => resolution.hierarchy.insert(daughter.id, parent),
            None => resolution.unresolved.push(daughter.id),
        }
    }

    resolution
        .hierarchy
        .sort_daughters_by_key(AnnotationId::number);
    resolution
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::two_level;

    #[test]
    fn test_daughters_grouped_and_ordered_by_id() {
        let doc = two_level(
            &[Some(0), Some(0), Some(300), Some(301), Some(800), Some(1000), Some(1000), Some(1500), Some(1500)],
            &[(1, 1, 5, "u1"), (5, 6, 9, "u2")],
            &[(11, 4, 5, "b"), (3, 2, 3, "a"), (7, 7, 8, "c")],
        );
        let resolution = resolve_by_containment(
            &doc,
            doc.tier_by_id("t@A").unwrap(),
            doc.tier_by_id("ref").unwrap(),
        );

        assert!(resolution.unresolved.is_empty());
        assert_eq!(
            resolution.hierarchy.daughters_of(AnnotationId(1)),
            &[AnnotationId(3), AnnotationId(11)]
        );
        assert_eq!(
            resolution.hierarchy.parent_of(AnnotationId(7)),
            Some(AnnotationId(5))
        );
    }

    #[test]
    fn test_unvalued_or_outside_daughters_are_unresolved() {
        let doc = two_level(
            &[Some(100), Some(500), None, Some(400), Some(700)],
            &[(1, 1, 2, "u1")],
            &[(2, 1, 3, "a"), (3, 4, 5, "b")],
        );
        let resolution = resolve_by_containment(
            &doc,
            doc.tier_by_id("t@A").unwrap(),
            doc.tier_by_id("ref").unwrap(),
        );
        assert_eq!(resolution.unresolved, vec![AnnotationId(2), AnnotationId(3)]);
        assert!(resolution.hierarchy.is_empty());
    }
}
