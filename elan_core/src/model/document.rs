//! EAF 文档对象。
//!
//! 持有全部时间槽、层、语言类型，以及解析器不关心、只需原样写回的 XML 片段。

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::{
    AnchorId, Annotation, AnnotationId, AnnotationKind, Boundary, EafError, LinguisticType, Tier,
    TimeOrder, XmlElement,
};

/// 构造 [`EafDocument`] 所需的原始部件，通常由解析器填充。
#[derive(Debug, Clone, Default)]
pub struct DocumentParts {
    /// 根元素 `ANNOTATION_DOCUMENT` 上的属性（包括命名空间声明）。
    pub root_attributes: Vec<(String, String)>,
    /// 位于 `<HEADER>` 之前的顶层元素（`LICENSE`），原样保留。
    pub leading_elements: Vec<XmlElement>,
    /// `<HEADER>` 元素，原样保留。
    pub header: Option<XmlElement>,
    pub time_order: TimeOrder,
    pub tiers: Vec<Tier>,
    pub linguistic_types: Vec<LinguisticType>,
    /// 位于 `<HEADER>` 之后的其它顶层元素（`LOCALE`、`CONSTRAINT`、受控词表等），在语言类型之后写出。
    pub trailing_elements: Vec<XmlElement>,
    /// 文档中标注 ID 使用的前缀。
    pub annotation_id_prefix: String,
}

/// 一个内存中的 EAF 文档。
#[derive(Debug, Clone, Default)]
pub struct EafDocument {
    root_attributes: Vec<(String, String)>,
    leading_elements: Vec<XmlElement>,
    header: Option<XmlElement>,
    time_order: TimeOrder,
    tiers: Vec<Tier>,
    linguistic_types: Vec<LinguisticType>,
    trailing_elements: Vec<XmlElement>,
    annotation_id_prefix: String,
    /// 标注 ID -> (层下标, 标注下标)
    annotation_index: HashMap<AnnotationId, (usize, usize)>,
}

impl EafDocument {
    /// 从部件构造文档，并检查内部引用是否一致。
    ///
    /// # Errors
    ///
    /// 标注 ID 重复、标注引用不存在的时间槽或标注、层引用不存在的语言类型或父层时，
    /// 返回 `EafError::InvalidDocument`。
    pub fn from_parts(parts: DocumentParts) -> Result<Self, EafError> {
        let mut annotation_index = HashMap::new();
        for (tier_idx, tier) in parts.tiers.iter().enumerate() {
            for (ann_idx, annotation) in tier.annotations.iter().enumerate() {
                if annotation_index
                    .insert(annotation.id, (tier_idx, ann_idx))
                    .is_some()
                {
                    return Err(EafError::InvalidDocument(format!(
                        "标注 ID {} 重复出现",
                        annotation.id
                    )));
                }
            }
        }

        let annotation_id_prefix = if parts.annotation_id_prefix.is_empty() {
            AnnotationId::DEFAULT_PREFIX.to_string()
        } else {
            parts.annotation_id_prefix
        };

        let document = Self {
            root_attributes: parts.root_attributes,
            leading_elements: parts.leading_elements,
            header: parts.header,
            time_order: parts.time_order,
            tiers: parts.tiers,
            linguistic_types: parts.linguistic_types,
            trailing_elements: parts.trailing_elements,
            annotation_id_prefix,
            annotation_index,
        };
        document.validate()?;

        debug!(
            time_slots = document.time_order.len(),
            tiers = document.tiers.len(),
            annotations = document.annotation_index.len(),
            "EAF 文档已构建"
        );
        Ok(document)
    }

    /// 检查文档内部的引用关系。
    pub fn validate(&self) -> Result<(), EafError> {
        let type_ids: HashSet<&str> = self
            .linguistic_types
            .iter()
            .map(|lt| lt.id.as_str())
            .collect();
        let tier_ids: HashSet<&str> = self.tiers.iter().map(|t| t.id.as_str()).collect();

        for tier in &self.tiers {
            if !type_ids.contains(tier.linguistic_type_ref.as_str()) {
                return Err(EafError::InvalidDocument(format!(
                    "层 '{}' 引用了不存在的语言类型 '{}'",
                    tier.id, tier.linguistic_type_ref
                )));
            }
            if let Some(parent) = tier.parent_tier_ref()
                && !tier_ids.contains(parent)
            {
                return Err(EafError::InvalidDocument(format!(
                    "层 '{}' 引用了不存在的父层 '{parent}'",
                    tier.id
                )));
            }

            for annotation in &tier.annotations {
                match &annotation.kind {
                    AnnotationKind::Alignable {
                        start_slot,
                        end_slot,
                        ..
                    } => {
                        for slot in [start_slot, end_slot] {
                            if !self.time_order.contains(*slot) {
                                return Err(EafError::InvalidDocument(format!(
                                    "标注 {} 引用了不存在的时间槽 {slot}",
                                    annotation.id
                                )));
                            }
                        }
                    }
                    AnnotationKind::Reference { annotation_ref, .. } => {
                        if !self.annotation_index.contains_key(annotation_ref) {
                            return Err(EafError::InvalidDocument(format!(
                                "标注 {} 引用了不存在的标注 {annotation_ref}",
                                annotation.id
                            )));
                        }
                    }
                }
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn root_attributes(&self) -> &[(String, String)] {
        &self.root_attributes
    }

    #[must_use]
    pub fn leading_elements(&self) -> &[XmlElement] {
        &self.leading_elements
    }

    #[must_use]
    pub const fn header(&self) -> Option<&XmlElement> {
        self.header.as_ref()
    }

    #[must_use]
    pub fn trailing_elements(&self) -> &[XmlElement] {
        &self.trailing_elements
    }

    #[must_use]
    pub fn annotation_id_prefix(&self) -> &str {
        &self.annotation_id_prefix
    }

    /// 按文档自身的前缀格式化标注 ID。
    #[must_use]
    pub fn format_annotation_id(&self, id: AnnotationId) -> String {
        format!("{}{}", self.annotation_id_prefix, id.number())
    }

    #[must_use]
    pub const fn time_order(&self) -> &TimeOrder {
        &self.time_order
    }

    pub const fn time_order_mut(&mut self) -> &mut TimeOrder {
        &mut self.time_order
    }

    /// 整体替换时间槽池。调用者负责随后重新绑定标注的时间槽。
    pub fn set_time_order(&mut self, time_order: TimeOrder) {
        self.time_order = time_order;
    }

    #[must_use]
    pub fn linguistic_types(&self) -> &[LinguisticType] {
        &self.linguistic_types
    }

    #[must_use]
    pub fn linguistic_type_by_id(&self, id: &str) -> Option<&LinguisticType> {
        self.linguistic_types.iter().find(|lt| lt.id == id)
    }

    #[must_use]
    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }

    #[must_use]
    pub fn tier_by_id(&self, id: &str) -> Option<&Tier> {
        self.tiers.iter().find(|t| t.id == id)
    }

    /// 返回层所属的语言类型。
    #[must_use]
    pub fn linguistic_type_of(&self, tier: &Tier) -> Option<&LinguisticType> {
        self.linguistic_type_by_id(&tier.linguistic_type_ref)
    }

    #[must_use]
    pub fn annotation_by_id(&self, id: AnnotationId) -> Option<&Annotation> {
        self.annotation_index
            .get(&id)
            .map(|&(t, a)| &self.tiers[t].annotations[a])
    }

    pub fn annotation_by_id_mut(&mut self, id: AnnotationId) -> Option<&mut Annotation> {
        self.annotation_index
            .get(&id)
            .map(|&(t, a)| &mut self.tiers[t].annotations[a])
    }

    /// 返回标注所在的层。
    #[must_use]
    pub fn tier_of_annotation(&self, id: AnnotationId) -> Option<&Tier> {
        self.annotation_index.get(&id).map(|&(t, _)| &self.tiers[t])
    }

    /// 所有标注的 ID，按层和文档顺序。
    pub fn annotation_ids(&self) -> impl Iterator<Item = AnnotationId> + '_ {
        self.tiers
            .iter()
            .flat_map(|tier| tier.annotations.iter().map(|a| a.id))
    }

    #[must_use]
    pub fn time_slot_value(&self, slot: AnchorId) -> Option<u64> {
        self.time_order
            .time_slot_by_id(slot)
            .and_then(|s| s.time_value())
    }

    pub fn set_time_slot_value(
        &mut self,
        slot: AnchorId,
        value: Option<u64>,
    ) -> Result<(), EafError> {
        self.time_order
            .time_slot_by_id_mut(slot)
            .ok_or(EafError::UnknownTimeSlot(slot))?
            .set_time_value(value);
        Ok(())
    }

    #[must_use]
    pub fn annotation_start_time(&self, id: AnnotationId) -> Option<u64> {
        self.annotation_time(id, Boundary::Start)
    }

    #[must_use]
    pub fn annotation_end_time(&self, id: AnnotationId) -> Option<u64> {
        self.annotation_time(id, Boundary::End)
    }

    /// 返回标注某一边界的时间值。
    ///
    /// 引用型标注没有自己的时间槽，沿引用链取被引用标注的时间。
    #[must_use]
    pub fn annotation_time(&self, id: AnnotationId, boundary: Boundary) -> Option<u64> {
        let mut current = self.annotation_by_id(id)?;
        // 引用链长度不会超过标注总数，防止环
        for _ in 0..=self.annotation_index.len() {
            match &current.kind {
                AnnotationKind::Alignable { .. } => {
                    return current
                        .time_slot(boundary)
                        .and_then(|slot| self.time_slot_value(slot));
                }
                AnnotationKind::Reference { annotation_ref, .. } => {
                    current = self.annotation_by_id(*annotation_ref)?;
                }
            }
        }
        None
    }

    /// 把标注的某一边界重新绑定到另一个时间槽。
    pub fn set_annotation_time_slot(
        &mut self,
        id: AnnotationId,
        boundary: Boundary,
        slot: AnchorId,
    ) -> Result<(), EafError> {
        self.annotation_by_id_mut(id)
            .ok_or(EafError::UnknownAnnotation(id))?
            .set_time_slot(boundary, slot)
    }

    pub fn set_annotation_start_time_slot(
        &mut self,
        id: AnnotationId,
        slot: AnchorId,
    ) -> Result<(), EafError> {
        self.set_annotation_time_slot(id, Boundary::Start, slot)
    }

    pub fn set_annotation_end_time_slot(
        &mut self,
        id: AnnotationId,
        slot: AnchorId,
    ) -> Result<(), EafError> {
        self.set_annotation_time_slot(id, Boundary::End, slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Constraint, TimeSlot};

    fn sample_parts() -> DocumentParts {
        let mut time_order = TimeOrder::new();
        time_order
            .add_time_slot(TimeSlot::new(AnchorId(1), Some(1000)))
            .unwrap();
        time_order
            .add_time_slot(TimeSlot::new(AnchorId(2), Some(5000)))
            .unwrap();

        DocumentParts {
            time_order,
            linguistic_types: vec![
                LinguisticType {
                    id: "ref".into(),
                    time_alignable: true,
                    ..Default::default()
                },
                LinguisticType {
                    id: "ft".into(),
                    constraint: Some(Constraint::SymbolicAssociation),
                    ..Default::default()
                },
            ],
            tiers: vec![
                Tier {
                    id: "ref@A".into(),
                    linguistic_type_ref: "ref".into(),
                    annotations: vec![Annotation::alignable(
                        AnnotationId(1),
                        "u1",
                        AnchorId(1),
                        AnchorId(2),
                    )],
                    ..Default::default()
                },
                Tier {
                    id: "ft@A".into(),
                    linguistic_type_ref: "ft".into(),
                    parent_ref: Some("ref@A".into()),
                    annotations: vec![Annotation::reference(
                        AnnotationId(2),
                        "free translation",
                        AnnotationId(1),
                        None,
                    )],
                    ..Default::default()
                },
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_reference_annotation_inherits_times() {
        let doc = EafDocument::from_parts(sample_parts()).unwrap();
        assert_eq!(doc.annotation_start_time(AnnotationId(2)), Some(1000));
        assert_eq!(doc.annotation_end_time(AnnotationId(2)), Some(5000));
        assert_eq!(doc.tier_of_annotation(AnnotationId(2)).unwrap().id, "ft@A");
        assert_eq!(doc.format_annotation_id(AnnotationId(2)), "a2");
    }

    #[test]
    fn test_unknown_time_slot_is_invalid() {
        let mut parts = sample_parts();
        parts.tiers[0].annotations[0] =
            Annotation::alignable(AnnotationId(1), "u1", AnchorId(1), AnchorId(99));
        assert!(matches!(
            EafDocument::from_parts(parts),
            Err(EafError::InvalidDocument(_))
        ));
    }

    #[test]
    fn test_duplicate_annotation_id_is_invalid() {
        let mut parts = sample_parts();
        parts.tiers[1].annotations[0].id = AnnotationId(1);
        assert!(matches!(
            EafDocument::from_parts(parts),
            Err(EafError::InvalidDocument(_))
        ));
    }

    #[test]
    fn test_time_slot_mutation() {
        let mut doc = EafDocument::from_parts(sample_parts()).unwrap();
        doc.set_time_slot_value(AnchorId(2), Some(6000)).unwrap();
        assert_eq!(doc.annotation_end_time(AnnotationId(1)), Some(6000));
        assert!(matches!(
            doc.set_time_slot_value(AnchorId(7), None),
            Err(EafError::UnknownTimeSlot(AnchorId(7)))
        ));
    }
}
