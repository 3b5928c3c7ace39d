//! 时间槽与标注的强类型 ID。
//!
//! EAF 文件中的 ID 是带前缀的字符串（`ts12`、`a7`），这里只保存数字部分，
//! 排序和生成新 ID 都直接在整数上进行。

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::EafError;

/// 时间槽（锚点）ID，对应 EAF 中的 `TIME_SLOT_ID`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AnchorId(pub u64);

impl AnchorId {
    /// EAF 中时间槽 ID 的前缀。
    pub const PREFIX: &'static str = "ts";

    /// 返回 ID 的数字部分。
    #[must_use]
    pub const fn number(self) -> u64 {
        self.0
    }
}

impl fmt::Display for AnchorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", Self::PREFIX, self.0)
    }
}

impl FromStr for AnchorId {
    type Err = EafError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.trim().strip_prefix(Self::PREFIX).unwrap_or(s.trim());
        digits
            .parse::<u64>()
            .map(Self)
            .map_err(|_| EafError::InvalidId(format!("无法识别的时间槽 ID '{s}'")))
    }
}

/// 标注 ID，对应 EAF 中的 `ANNOTATION_ID`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AnnotationId(pub u64);

impl AnnotationId {
    /// ELAN 默认使用的标注 ID 前缀。
    pub const DEFAULT_PREFIX: &'static str = "a";

    /// 返回 ID 的数字部分。
    #[must_use]
    pub const fn number(self) -> u64 {
        self.0
    }

    /// 解析标注 ID，同时返回它使用的前缀（`a` 或 `ann`）。
    pub fn parse_with_prefix(s: &str) -> Result<(Self, &'static str), EafError> {
        let trimmed = s.trim();
        let (prefix, digits) = if let Some(rest) = trimmed.strip_prefix("ann") {
            ("ann", rest)
        } else if let Some(rest) = trimmed.strip_prefix('a') {
            ("a", rest)
        } else {
            ("", trimmed)
        };
        let number = digits
            .parse::<u64>()
            .map_err(|_| EafError::InvalidId(format!("无法识别的标注 ID '{s}'")))?;
        Ok((Self(number), prefix))
    }
}

impl fmt::Display for AnnotationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", Self::DEFAULT_PREFIX, self.0)
    }
}

impl FromStr for AnnotationId {
    type Err = EafError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_with_prefix(s).map(|(id, _)| id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_anchor_id() {
        assert_eq!("ts12".parse::<AnchorId>().unwrap(), AnchorId(12));
        assert_eq!("7".parse::<AnchorId>().unwrap(), AnchorId(7));
        assert_eq!(AnchorId(3).to_string(), "ts3");
        assert!(matches!(
            "slot1".parse::<AnchorId>(),
            Err(EafError::InvalidId(_))
        ));
    }

    #[test]
    fn test_parse_annotation_id_prefixes() {
        assert_eq!(
            AnnotationId::parse_with_prefix("a42").unwrap(),
            (AnnotationId(42), "a")
        );
        assert_eq!(
            AnnotationId::parse_with_prefix("ann5").unwrap(),
            (AnnotationId(5), "ann")
        );
        assert!("abc".parse::<AnnotationId>().is_err());
    }

    #[test]
    fn test_anchor_ids_sort_numerically() {
        let mut ids = vec![AnchorId(10), AnchorId(2), AnchorId(1)];
        ids.sort();
        assert_eq!(ids, vec![AnchorId(1), AnchorId(2), AnchorId(10)]);
    }
}
