//! EAF 文档的数据模型。
//!
//! 时间槽（锚点）由 [`time_order::TimeOrder`] 统一持有，标注只通过
//! [`ids::AnchorId`] 引用它们，不拥有它们。

pub mod annotation;
pub mod document;
pub mod ids;
pub mod linguistic_type;
pub mod opaque;
pub mod tier;
pub mod time_order;
