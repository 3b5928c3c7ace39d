//! 层（`TIER`）。

use serde::{Deserialize, Serialize};

use crate::Annotation;

/// 一个标注层。标注按文档顺序保存，不一定按时间排序。
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Tier {
    /// `TIER_ID`
    pub id: String,
    /// `LINGUISTIC_TYPE_REF`
    pub linguistic_type_ref: String,
    /// `PARENT_REF`，顶层层没有父层。
    pub parent_ref: Option<String>,
    pub participant: Option<String>,
    pub annotator: Option<String>,
    pub default_locale: Option<String>,
    pub lang_ref: Option<String>,
    pub extra_attributes: Vec<(String, String)>,
    pub annotations: Vec<Annotation>,
}

impl Tier {
    #[must_use]
    pub fn tier_id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn linguistic_type(&self) -> &str {
        &self.linguistic_type_ref
    }

    #[must_use]
    pub fn parent_tier_ref(&self) -> Option<&str> {
        self.parent_ref.as_deref()
    }

    #[must_use]
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Annotation> {
        self.annotations.iter()
    }
}

impl<'a> IntoIterator for &'a Tier {
    type Item = &'a Annotation;
    type IntoIter = std::slice::Iter<'a, Annotation>;

    fn into_iter(self) -> Self::IntoIter {
        self.annotations.iter()
    }
}
