//! 时间槽池（`TIME_ORDER`）。

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{AnchorId, EafError};

/// 一个时间槽：稳定的 ID 和一个可选的毫秒时间值。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    id: AnchorId,
    value: Option<u64>,
}

impl TimeSlot {
    #[must_use]
    pub const fn new(id: AnchorId, value: Option<u64>) -> Self {
        Self { id, value }
    }

    #[must_use]
    pub const fn id(&self) -> AnchorId {
        self.id
    }

    /// 时间值（毫秒）。未对齐的时间槽没有时间值。
    #[must_use]
    pub const fn time_value(&self) -> Option<u64> {
        self.value
    }

    pub const fn set_time_value(&mut self, value: Option<u64>) {
        self.value = value;
    }
}

/// 按文档时间顺序排列的全部时间槽。
///
/// 顺序即 EAF 文件中 `TIME_SLOT` 的出现顺序，内部维护一个 ID 到下标的索引。
#[derive(Debug, Clone, Default)]
pub struct TimeOrder {
    slots: Vec<TimeSlot>,
    index: HashMap<AnchorId, usize>,
}

impl TimeOrder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    /// 在末尾追加一个时间槽。ID 重复时返回错误。
    pub fn add_time_slot(&mut self, slot: TimeSlot) -> Result<(), EafError> {
        if self.index.contains_key(&slot.id()) {
            return Err(EafError::InvalidDocument(format!(
                "时间槽 {} 重复出现",
                slot.id()
            )));
        }
        self.index.insert(slot.id(), self.slots.len());
        self.slots.push(slot);
        Ok(())
    }

    #[must_use]
    pub fn time_slot_by_id(&self, id: AnchorId) -> Option<&TimeSlot> {
        self.index.get(&id).map(|&i| &self.slots[i])
    }

    pub fn time_slot_by_id_mut(&mut self, id: AnchorId) -> Option<&mut TimeSlot> {
        self.index.get(&id).map(|&i| &mut self.slots[i])
    }

    /// 时间槽在时间顺序中的下标（从 0 开始）。
    #[must_use]
    pub fn position(&self, id: AnchorId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    #[must_use]
    pub fn contains(&self, id: AnchorId) -> bool {
        self.index.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TimeSlot> {
        self.slots.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[TimeSlot] {
        &self.slots
    }
}

impl<'a> IntoIterator for &'a TimeOrder {
    type Item = &'a TimeSlot;
    type IntoIter = std::slice::Iter<'a, TimeSlot>;

    fn into_iter(self) -> Self::IntoIter {
        self.slots.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_and_mutation() {
        let mut order = TimeOrder::new();
        order
            .add_time_slot(TimeSlot::new(AnchorId(1), Some(0)))
            .unwrap();
        order.add_time_slot(TimeSlot::new(AnchorId(5), None)).unwrap();

        assert_eq!(order.position(AnchorId(5)), Some(1));
        assert_eq!(order.time_slot_by_id(AnchorId(5)).unwrap().time_value(), None);

        order
            .time_slot_by_id_mut(AnchorId(5))
            .unwrap()
            .set_time_value(Some(1200));
        assert_eq!(
            order.time_slot_by_id(AnchorId(5)).unwrap().time_value(),
            Some(1200)
        );
    }

    #[test]
    fn test_duplicate_slot_is_rejected() {
        let mut order = TimeOrder::new();
        order.add_time_slot(TimeSlot::new(AnchorId(1), None)).unwrap();
        assert!(matches!(
            order.add_time_slot(TimeSlot::new(AnchorId(1), Some(10))),
            Err(EafError::InvalidDocument(_))
        ));
    }
}
