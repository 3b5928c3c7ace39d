//! 语言类型（`LINGUISTIC_TYPE`）及其约束。

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, EnumIter};

use crate::ParseConstraintError;

/// EAF 定义的四种层约束（stereotype）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsRefStr, EnumIter)]
pub enum Constraint {
    /// 时间细分：子标注连续地划分父标注的时间区间。
    #[strum(serialize = "Time_Subdivision")]
    TimeSubdivision,
    /// 符号细分：子标注有顺序但没有时间。
    #[strum(serialize = "Symbolic_Subdivision")]
    SymbolicSubdivision,
    /// 符号关联：一对一引用父标注。
    #[strum(serialize = "Symbolic_Association")]
    SymbolicAssociation,
    /// 包含：子标注必须完全落在父标注内部，但之间可以有空隙。
    #[strum(serialize = "Included_In")]
    IncludedIn,
}

impl Constraint {
    /// 是否为包含约束。
    #[must_use]
    pub const fn is_containment(self) -> bool {
        matches!(self, Self::IncludedIn)
    }
}

impl FromStr for Constraint {
    type Err = ParseConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Time_Subdivision" => Ok(Self::TimeSubdivision),
            "Symbolic_Subdivision" => Ok(Self::SymbolicSubdivision),
            "Symbolic_Association" => Ok(Self::SymbolicAssociation),
            "Included_In" => Ok(Self::IncludedIn),
            other => Err(ParseConstraintError(other.to_string())),
        }
    }
}

/// 一个语言类型。
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LinguisticType {
    /// `LINGUISTIC_TYPE_ID`
    pub id: String,
    /// `CONSTRAINTS`，顶层类型没有约束。
    pub constraint: Option<Constraint>,
    /// `TIME_ALIGNABLE`
    pub time_alignable: bool,
    /// `GRAPHIC_REFERENCES`
    pub graphic_references: bool,
    /// `CONTROLLED_VOCABULARY_REF`
    pub controlled_vocabulary: Option<String>,
    /// 其它未解析的属性，原样写回。
    pub extra_attributes: Vec<(String, String)>,
}

impl LinguisticType {
    #[must_use]
    pub fn linguistic_type_id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub const fn constraints(&self) -> Option<Constraint> {
        self.constraint
    }

    #[must_use]
    pub const fn is_time_alignable(&self) -> bool {
        self.time_alignable
    }

    /// 该类型的层是否受包含约束。
    #[must_use]
    pub fn has_containment_constraint(&self) -> bool {
        self.constraint.is_some_and(Constraint::is_containment)
    }
}
