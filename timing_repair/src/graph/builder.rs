//! 通过共享时间槽构建标注图。

use std::collections::{HashMap, hash_map::Entry};

use elan_core::{AnchorId, AnnotationId, Boundary, EafDocument, Tier};
use tracing::{debug, info};

use super::{AnchorRef, AnnotationGraph, ParentSpan, Role};
use crate::error::StructuralError;

/// 找出所有带包含约束（`Included_In`）的层，与各自的父层配对。
///
/// 返回 `(子层, 父层)`，按文档中层的顺序。
pub fn relevant_tier_pairs(document: &EafDocument) -> Result<Vec<(&Tier, &Tier)>, StructuralError> {
    let mut pairs = Vec::new();
    for tier in document.tiers() {
        let is_included_in = document
            .linguistic_type_of(tier)
            .is_some_and(|lt| lt.has_containment_constraint());
        if !is_included_in {
            continue;
        }

        let parent_id = tier
            .parent_tier_ref()
            .ok_or_else(|| StructuralError::MissingParentTier {
                tier: tier.id.clone(),
            })?;
        let parent_tier =
            document
                .tier_by_id(parent_id)
                .ok_or_else(|| StructuralError::UnknownParentTier {
                    tier: tier.id.clone(),
                    parent: parent_id.to_string(),
                })?;
        pairs.push((tier, parent_tier));
    }
    Ok(pairs)
}

/// 为文档中所有需要处理的层构建标注图。
///
/// 已经没有共享时间槽的层会被跳过并记入 [`AnnotationGraph::skipped_tiers`]，
/// 因此对已经处理过的文档，返回的图为空。
pub fn build_annotation_graph(document: &EafDocument) -> Result<AnnotationGraph, StructuralError> {
    let mut graph = AnnotationGraph::default();

    for (tier, parent_tier) in relevant_tier_pairs(document)? {
        if find_shared_anchor(tier, parent_tier).is_none() {
            debug!("层 '{}' 没有共享的时间槽，跳过", tier.id);
            graph.skipped_tiers.push(tier.id.clone());
            continue;
        }

        info!("处理层 '{}'（父层 '{}'）", tier.id, parent_tier.id);
        add_tier_pair(&mut graph, document, tier, parent_tier)?;
        graph.processed_tiers.push(tier.id.clone());
    }

    graph.canonicalize();
    let positions = &graph.daughter_positions;
    graph
        .hierarchy
        .sort_daughters_by_key(|id| positions.get(&id).copied().unwrap_or(usize::MAX));

    debug!(
        "标注图: {} 个时间槽, {} 个子标注",
        graph.anchors.len(),
        graph.hierarchy.len()
    );
    Ok(graph)
}

/// 父层和子层中第一个被两个不同标注引用的时间槽，以及引用它的两个标注。
#[must_use]
pub fn find_shared_anchor(
    tier: &Tier,
    parent_tier: &Tier,
) -> Option<(AnchorId, AnnotationId, AnnotationId)> {
    let mut owners: HashMap<AnchorId, AnnotationId> = HashMap::new();
    for annotation in parent_tier.iter().chain(tier.iter()) {
        let slots = [annotation.start_time_slot(), annotation.end_time_slot()];
        for slot in slots.into_iter().flatten() {
            match owners.entry(slot) {
                Entry::Occupied(owner) if *owner.get() != annotation.id => {
                    return Some((slot, *owner.get(), annotation.id));
                }
                Entry::Occupied(_) => {}
                Entry::Vacant(entry) => {
                    entry.insert(annotation.id);
                }
            }
        }
    }
    None
}

/// 一对父层/子层内部的查找表。
#[derive(Default)]
struct TierIndex {
    parent_starts: HashMap<AnchorId, AnnotationId>,
    parent_ends: HashMap<AnchorId, AnnotationId>,
    daughter_starts: HashMap<AnnotationId, AnchorId>,
    daughter_ending_at: HashMap<AnchorId, AnnotationId>,
}

impl TierIndex {
    /// 从子标注出发，沿"前一个兄弟的终点 = 自己的起点"向前走，
    /// 直到遇到一个与父标注共享起点的子标注（首个子标注）。
    ///
    /// 返回首个子标注的父标注，以及出发点与首个子标注之间的距离。
    /// 已经走过的标注记入 `memo`，后续查找直接复用。
    fn chain_origin(
        &self,
        daughter: AnnotationId,
        memo: &mut HashMap<AnnotationId, (AnnotationId, usize)>,
    ) -> Result<(AnnotationId, usize), StructuralError> {
        let broken = || StructuralError::BrokenChain {
            annotation: daughter,
        };

        let mut path = Vec::new();
        let mut current = daughter;
        let (parent, mut position) = loop {
            if let Some(&found) = memo.get(&current) {
                break found;
            }
            let start = *self
                .daughter_starts
                .get(&current)
                .ok_or(StructuralError::UnknownAnnotation(current))?;
            if let Some(&parent) = self.parent_starts.get(&start) {
                memo.insert(current, (parent, 0));
                break (parent, 0);
            }

            path.push(current);
            // 链长不会超过子标注数，否则一定有环
            if path.len() > self.daughter_starts.len() {
                return Err(broken());
            }
            current = match self.daughter_ending_at.get(&start) {
                Some(&previous) if previous != current => previous,
                _ => return Err(broken()),
            };
        };

        for &id in path.iter().rev() {
            position += 1;
            memo.insert(id, (parent, position));
        }
        Ok((parent, position))
    }
}

fn add_tier_pair(
    graph: &mut AnnotationGraph,
    document: &EafDocument,
    tier: &Tier,
    parent_tier: &Tier,
) -> Result<(), StructuralError> {
    let mut index = TierIndex::default();

    for parent in parent_tier {
        let (Some(start), Some(end)) = (parent.start_time_slot(), parent.end_time_slot()) else {
            continue;
        };
        graph.add_ref(start, AnchorRef::new(parent.id, Role::Parent, Boundary::Start));
        graph.add_ref(end, AnchorRef::new(parent.id, Role::Parent, Boundary::End));
        index.parent_starts.entry(start).or_insert(parent.id);
        index.parent_ends.entry(end).or_insert(parent.id);
        graph.parent_spans.entry(parent.id).or_insert(ParentSpan {
            start: document.time_slot_value(start),
            end: document.time_slot_value(end),
        });
    }

    let mut daughters = Vec::with_capacity(tier.annotations().len());
    for daughter in tier {
        let (Some(start), Some(end)) = (daughter.start_time_slot(), daughter.end_time_slot())
        else {
            debug!("标注 {} 不可时间对齐，跳过", daughter.id);
            continue;
        };
        graph.add_ref(start, AnchorRef::new(daughter.id, Role::Daughter, Boundary::Start));
        graph.add_ref(end, AnchorRef::new(daughter.id, Role::Daughter, Boundary::End));
        index.daughter_starts.insert(daughter.id, start);
        index.daughter_ending_at.entry(end).or_insert(daughter.id);
        daughters.push((daughter.id, start, end));
    }

    let mut memo = HashMap::new();
    for (id, start, end) in daughters {
        let (chain_parent, position) = index.chain_origin(id, &mut memo)?;
        let parent = index
            .parent_starts
            .get(&start)
            .or_else(|| index.parent_ends.get(&end))
            .copied()
            .unwrap_or(chain_parent);

        graph.hierarchy.insert(id, parent);
        graph.daughter_positions.insert(id, position);
    }
    Ok(())
}
