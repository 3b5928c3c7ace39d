//! # 时间槽拆分
//!
//! 从 Toolbox 导入的 ELAN 文档里，词标注与句标注共用时间槽：首词的起点就是句子的起点，
//! 相邻两个词共用一个没有时间值的时间槽。这样的词无法单独调整时间。
//!
//! 这里把每个被共用的时间槽拆成两个，让每个标注的每一端都拥有自己的时间槽：
//!
//! - 父标注与首词（或末词）共用的外边界：拆成两个值相同的时间槽。
//! - 相邻两词之间的内边界：拆成两个时间槽。原来没有值时按父标注时长均分插值，
//!   第二个比第一个多 1 毫秒；这是一种近似，不代表真实的词边界。
//! - 只被一个父标注引用（没有词的句子）：换一个新 ID，原值不变。
//!
//! 新时间槽的 ID 按时间顺序重新编号，拆分产生的时间槽紧跟在一起，
//! 因此原来在前的时间槽拆出的所有时间槽，仍然排在原来在后的时间槽拆出的时间槽之前。

use std::collections::HashMap;

use elan_core::{
    AnchorId, AnnotationId, AnnotationKind, Boundary, EafDocument, TimeOrder, TimeSlot,
};
use tracing::{debug, info};

use crate::{
    error::StructuralError,
    graph::{AnchorRef, AnnotationGraph, Role, build_annotation_graph},
};

/// 一次拆分的统计。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisambiguationReport {
    /// 拆分前的时间槽数。
    pub original_slots: usize,
    /// 拆分后的时间槽数。
    pub new_slots: usize,
    /// 被拆成两个的时间槽数。
    pub split: usize,
    /// 通过插值得到新时间值的内边界数。
    pub interpolated: usize,
    /// 与父子层无关、只是换了 ID 的时间槽数。
    pub carried: usize,
    pub processed_tiers: Vec<String>,
    pub skipped_tiers: Vec<String>,
}

impl DisambiguationReport {
    /// 文档是否未被修改。
    #[must_use]
    pub fn is_unchanged(&self) -> bool {
        self.processed_tiers.is_empty()
    }
}

/// 单个旧时间槽的处理方式。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SlotPlan {
    /// 没有父子层标注引用，只换 ID。
    Carry { value: Option<u64> },
    /// 只被一个父标注引用。
    Single { value: Option<u64> },
    /// 父标注与子标注的同一端。第一个新时间槽给父标注，第二个给子标注。
    Edge {
        value: Option<u64>,
        daughter: AnchorRef,
    },
    /// 前一个词的终点与后一个词的起点。
    Sibling {
        first_value: u64,
        second_value: u64,
        second: AnnotationId,
        interpolated: bool,
    },
}

/// 拆分文档中所有共享的时间槽，并重新绑定每个标注的起止时间槽。
///
/// 先完成全部检查再修改文档：返回错误时文档保持原样。
/// 对已经拆分过的文档调用不会做任何修改。
pub fn disambiguate(document: &mut EafDocument) -> Result<DisambiguationReport, StructuralError> {
    let graph = build_annotation_graph(document)?;

    let mut report = DisambiguationReport {
        original_slots: document.time_order().len(),
        processed_tiers: graph.processed_tiers().to_vec(),
        skipped_tiers: graph.skipped_tiers().to_vec(),
        ..Default::default()
    };

    if graph.is_empty() {
        info!("没有需要拆分的时间槽，文档保持不变");
        report.new_slots = report.original_slots;
        return Ok(report);
    }

    let plan = plan_slots(document, &graph)?;
    apply_plan(document, &plan, &mut report)?;

    info!(
        "时间槽: {} -> {}（拆分 {}，插值 {}）",
        report.original_slots, report.new_slots, report.split, report.interpolated
    );
    Ok(report)
}

fn plan_slots(
    document: &EafDocument,
    graph: &AnnotationGraph,
) -> Result<Vec<(AnchorId, SlotPlan)>, StructuralError> {
    document
        .time_order()
        .iter()
        .map(|slot| {
            let plan = plan_slot(slot, graph.refs_at(slot.id()), graph)?;
            Ok((slot.id(), plan))
        })
        .collect()
}

fn plan_slot(
    slot: &TimeSlot,
    refs: &[AnchorRef],
    graph: &AnnotationGraph,
) -> Result<SlotPlan, StructuralError> {
    let value = slot.time_value();
    match refs {
        [] => {
            debug!("时间槽 {} 没有相关标注", slot.id());
            Ok(SlotPlan::Carry { value })
        }
        [only] if only.role == Role::Parent => Ok(SlotPlan::Single { value }),
        [parent, daughter]
            if parent.role == Role::Parent
                && daughter.role == Role::Daughter
                && parent.boundary == daughter.boundary =>
        {
            Ok(SlotPlan::Edge {
                value,
                daughter: *daughter,
            })
        }
        [first, second]
            if first.role == Role::Daughter
                && first.boundary == Boundary::End
                && second.role == Role::Daughter
                && second.boundary == Boundary::Start
                && first.annotation != second.annotation =>
        {
            plan_sibling(value, first.annotation, second.annotation, graph)
        }
        _ => Err(StructuralError::UnexpectedSharing {
            anchor: slot.id(),
            refs: refs.to_vec(),
        }),
    }
}

fn plan_sibling(
    value: Option<u64>,
    first: AnnotationId,
    second: AnnotationId,
    graph: &AnnotationGraph,
) -> Result<SlotPlan, StructuralError> {
    if let Some(value) = value {
        return Ok(SlotPlan::Sibling {
            first_value: value,
            second_value: value,
            second,
            interpolated: false,
        });
    }

    let parent = graph
        .hierarchy()
        .parent_of(first)
        .ok_or(StructuralError::UnresolvedParent { annotation: first })?;
    let span = graph.parent_span(parent).unwrap_or_default();
    let (Some(start), Some(end)) = (span.start, span.end) else {
        return Err(StructuralError::MissingParentTimes { parent });
    };
    let position = graph
        .daughter_position(first)
        .ok_or(StructuralError::BrokenChain { annotation: first })?;
    let daughters = graph.hierarchy().daughter_count(parent);

    let boundary = interpolate(start, end, position as u64, daughters as u64);
    Ok(SlotPlan::Sibling {
        first_value: boundary,
        second_value: boundary + 1,
        second,
        interpolated: true,
    })
}

/// 把父标注时长均分给 `daughters` 个子标注，返回第 `position` 个子标注的终点。
#[must_use]
pub const fn interpolate(start: u64, end: u64, position: u64, daughters: u64) -> u64 {
    if daughters == 0 {
        return start;
    }
    let duration = end.saturating_sub(start);
    start + duration * (position + 1) / daughters
}

fn apply_plan(
    document: &mut EafDocument,
    plan: &[(AnchorId, SlotPlan)],
    report: &mut DisambiguationReport,
) -> Result<(), StructuralError> {
    let mut new_order = TimeOrder::with_capacity(plan.len() * 2);
    let mut mapping: HashMap<AnchorId, AnchorId> = HashMap::with_capacity(plan.len());
    let mut second_bindings: Vec<(AnnotationId, Boundary, AnchorId)> = Vec::new();
    let mut offset = 0;

    for (position, &(old_id, slot_plan)) in (1u64..).zip(plan) {
        let first_id = AnchorId(position + offset);
        mapping.insert(old_id, first_id);

        match slot_plan {
            SlotPlan::Carry { value } => {
                new_order.add_time_slot(TimeSlot::new(first_id, value))?;
                report.carried += 1;
            }
            SlotPlan::Single { value } => {
                new_order.add_time_slot(TimeSlot::new(first_id, value))?;
            }
            SlotPlan::Edge { value, daughter } => {
                offset += 1;
                let second_id = AnchorId(position + offset);
                new_order.add_time_slot(TimeSlot::new(first_id, value))?;
                new_order.add_time_slot(TimeSlot::new(second_id, value))?;
                second_bindings.push((daughter.annotation, daughter.boundary, second_id));
                report.split += 1;
            }
            SlotPlan::Sibling {
                first_value,
                second_value,
                second,
                interpolated,
            } => {
                offset += 1;
                let second_id = AnchorId(position + offset);
                new_order.add_time_slot(TimeSlot::new(first_id, Some(first_value)))?;
                new_order.add_time_slot(TimeSlot::new(second_id, Some(second_value)))?;
                second_bindings.push((second, Boundary::Start, second_id));
                report.split += 1;
                if interpolated {
                    report.interpolated += 1;
                }
            }
        }
    }

    report.new_slots = new_order.len();
    document.set_time_order(new_order);

    let ids: Vec<AnnotationId> = document.annotation_ids().collect();
    for id in ids {
        let Some(annotation) = document.annotation_by_id_mut(id) else {
            continue;
        };
        if let AnnotationKind::Alignable {
            start_slot,
            end_slot,
            ..
        } = &mut annotation.kind
        {
            if let Some(&new_start) = mapping.get(&*start_slot) {
                *start_slot = new_start;
            }
            if let Some(&new_end) = mapping.get(&*end_slot) {
                *end_slot = new_end;
            }
        }
    }

    for (annotation, boundary, slot) in second_bindings {
        document.set_annotation_time_slot(annotation, boundary, slot)?;
    }
    Ok(())
}
