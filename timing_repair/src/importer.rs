//! # 导入词级时间
//!
//! 把 Toolbox 文件中每个词的起止时间写入 ELAN 文档中对应词标注的时间槽。
//!
//! 词标注的父标注（句子）通过时间包含关系确定，父标注的值就是 Toolbox 中的参考号。
//! 同一句子下的词按标注 ID 的数值排序，与 Toolbox 记录中的时间逐一对应。
//! 词的时间超出句子范围时扩展句子的边界，而不会截短词。

use elan_core::{AnnotationId, Boundary, EafDocument, ImportOptions, Tier};
use tracing::{debug, info, warn};

use crate::{
    error::{ImportError, StructuralError},
    graph::{find_shared_anchor, resolve_by_containment},
    toolbox::WordTimeTable,
};

/// 一次导入的统计。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// 处理过的词层。
    pub tiers: Vec<String>,
    /// 写入了时间的词数。
    pub words_timed: usize,
    /// 因 Toolbox 记录中没有时间而跳过的参考号。
    pub skipped_references: Vec<String>,
    /// 起点被提前的父标注数。
    pub widened_starts: usize,
    /// 终点被推后的父标注数。
    pub widened_ends: usize,
}

/// 一个词即将写入的时间。
#[derive(Debug, Clone, PartialEq, Eq)]
struct WordAssignment {
    word: AnnotationId,
    parent: AnnotationId,
    reference: String,
    start: u64,
    end: u64,
}

/// 把 `table` 中的词级时间写入文档。
///
/// 先为所有词解析出父标注和时间，全部检查通过后才修改文档。
pub fn import_word_times(
    document: &mut EafDocument,
    table: &WordTimeTable,
    options: &ImportOptions,
) -> Result<ImportReport, ImportError> {
    let mut report = ImportReport::default();
    let assignments = plan_assignments(document, table, options, &mut report)?;

    for assignment in &assignments {
        apply_assignment(document, assignment, &mut report)?;
    }
    report.words_timed = assignments.len();

    info!(
        "已为 {} 个词写入时间，扩展了 {} 个起点和 {} 个终点",
        report.words_timed, report.widened_starts, report.widened_ends
    );
    Ok(report)
}

/// 语言类型名等于文本层名、且有父层的层。
fn word_tiers<'a>(
    document: &'a EafDocument,
    options: &ImportOptions,
) -> Result<Vec<(&'a Tier, &'a Tier)>, StructuralError> {
    let mut pairs = Vec::new();
    for tier in document.tiers() {
        if tier.linguistic_type() != options.text_tier {
            continue;
        }
        let is_included_in = document
            .linguistic_type_of(tier)
            .is_some_and(|lt| lt.has_containment_constraint());
        if !is_included_in {
            debug!("层 '{}' 没有包含约束，跳过", tier.id);
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

fn plan_assignments(
    document: &EafDocument,
    table: &WordTimeTable,
    options: &ImportOptions,
    report: &mut ImportReport,
) -> Result<Vec<WordAssignment>, ImportError> {
    let pairs = word_tiers(document, options)?;
    if pairs.is_empty() {
        warn!("文档中没有语言类型为 '{}' 的词层", options.text_tier);
    }

    let mut assignments = Vec::new();
    for (tier, parent_tier) in pairs {
        info!("设置层 '{}' 中的词级时间", tier.id);
        report.tiers.push(tier.id.clone());

        let resolution = resolve_by_containment(document, tier, parent_tier);
        if let Some(&annotation) = resolution.unresolved.first() {
            return Err(ImportError::UnresolvedParent {
                annotation,
                tier: tier.id.clone(),
            });
        }
        if let Some((anchor, first, second)) = find_shared_anchor(tier, parent_tier) {
            return Err(ImportError::SharedTimeSlot {
                tier: tier.id.clone(),
                anchor,
                first,
                second,
            });
        }

        let hierarchy = &resolution.hierarchy;
        for parent in hierarchy.parents() {
            let reference = document
                .annotation_by_id(parent)
                .ok_or(StructuralError::UnknownAnnotation(parent))?
                .annotation_value()
                .trim()
                .to_string();

            if table.is_empty_reference(&reference) {
                warn!(reference = %reference, parent = %parent, "Toolbox 记录中没有词级时间，跳过");
                if !report.skipped_references.contains(&reference) {
                    report.skipped_references.push(reference);
                }
                continue;
            }
            let times = table
                .get(&reference)
                .ok_or_else(|| ImportError::MissingReference {
                    reference: reference.clone(),
                    parent,
                })?;

            let words = hierarchy.daughters_of(parent);
            if times.starts.len() != times.ends.len() {
                return Err(ImportError::WordCountMismatch {
                    reference,
                    expected: times.starts.len(),
                    found: times.ends.len(),
                });
            }
            if times.starts.len() != words.len() {
                return Err(ImportError::WordCountMismatch {
                    reference,
                    expected: times.starts.len(),
                    found: words.len(),
                });
            }

            for ((&word, &start), &end) in words.iter().zip(&times.starts).zip(&times.ends) {
                assignments.push(WordAssignment {
                    word,
                    parent,
                    reference: reference.clone(),
                    start,
                    end,
                });
            }
        }
    }
    Ok(assignments)
}

fn apply_assignment(
    document: &mut EafDocument,
    assignment: &WordAssignment,
    report: &mut ImportReport,
) -> Result<(), ImportError> {
    let WordAssignment {
        word,
        parent,
        ref reference,
        start,
        end,
    } = *assignment;

    if let Some(parent_start) = document.annotation_start_time(parent)
        && start < parent_start
    {
        warn!(
            word = %word, parent = %parent, reference = %reference,
            "词的起点 {start} 早于父标注的起点 {parent_start}，提前父标注的起点"
        );
        set_boundary_time(document, parent, Boundary::Start, start)?;
        report.widened_starts += 1;
    }
    if let Some(parent_end) = document.annotation_end_time(parent)
        && end > parent_end
    {
        warn!(
            word = %word, parent = %parent, reference = %reference,
            "词的终点 {end} 晚于父标注的终点 {parent_end}，推后父标注的终点"
        );
        set_boundary_time(document, parent, Boundary::End, end)?;
        report.widened_ends += 1;
    }

    set_boundary_time(document, word, Boundary::Start, start)?;
    set_boundary_time(document, word, Boundary::End, end)?;
    Ok(())
}

/// 直接修改标注某一端所引用的时间槽的值，不拆分时间槽。
fn set_boundary_time(
    document: &mut EafDocument,
    annotation: AnnotationId,
    boundary: Boundary,
    value: u64,
) -> Result<(), ImportError> {
    let slot = document
        .annotation_by_id(annotation)
        .ok_or(StructuralError::UnknownAnnotation(annotation))?
        .time_slot(boundary)
        .ok_or(elan_core::EafError::NotAlignable(annotation))?;
    document.set_time_slot_value(slot, Some(value))?;
    Ok(())
}
