//! 从 Toolbox 记录中提取词级时间。

use std::collections::HashMap;

use elan_core::ImportOptions;
use tracing::{debug, warn};

use super::{ToolboxFile, seconds_to_ms};
use crate::error::ToolboxError;

/// 一条记录中每个词的起止时间（毫秒），顺序与词序相同。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordTimes {
    pub starts: Vec<u64>,
    pub ends: Vec<u64>,
}

impl WordTimes {
    fn has_times(&self) -> bool {
        !self.starts.is_empty() && !self.ends.is_empty()
    }
}

/// 参考号 -> 词级时间。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordTimeTable {
    records: HashMap<String, WordTimes>,
    /// 出现过、但没有词级时间的参考号（通常是空句），按出现顺序。
    pub empty_references: Vec<String>,
}

impl WordTimeTable {
    #[must_use]
    pub fn get(&self, reference: &str) -> Option<&WordTimes> {
        self.records.get(reference)
    }

    #[must_use]
    pub fn is_empty_reference(&self, reference: &str) -> bool {
        self.empty_references.iter().any(|r| r == reference)
    }

    /// 有词级时间的记录数。
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 同一参考号出现多次时，以后出现的为准。
    fn finish_record(&mut self, reference: String, times: WordTimes) {
        let was_known =
            self.records.remove(&reference).is_some() || self.is_empty_reference(&reference);
        if was_known {
            warn!(reference = %reference, "参考号重复出现，使用后出现的记录");
            self.empty_references.retain(|r| r != &reference);
        }

        if times.has_times() {
            self.records.insert(reference, times);
        } else {
            warn!(reference = %reference, "没有找到词的起止时间，可能是空句");
            self.empty_references.push(reference);
        }
    }
}

/// 按记录收集词的起止时间。
///
/// 记录以参考层标记开始；其后的词起始层、词结束层中以空白分隔的每个值对应一个词。
/// 一条记录可以有多行同名标记，值按顺序拼接。
pub fn extract_word_times(
    file: &ToolboxFile,
    options: &ImportOptions,
) -> Result<WordTimeTable, ToolboxError> {
    let mut table = WordTimeTable::default();
    let mut current: Option<(String, WordTimes)> = None;

    for (index, line) in file.lines().iter().enumerate() {
        let line_number = index + 1;
        let Some(marker) = line.marker.as_deref() else {
            continue;
        };

        if marker == options.reference_tier {
            if let Some((reference, times)) = current.take() {
                table.finish_record(reference, times);
            }
            let reference = line.field();
            if reference.is_empty() {
                return Err(ToolboxError::MalformedLine {
                    line_number,
                    marker: marker.to_string(),
                });
            }
            current = Some((reference.to_string(), WordTimes::default()));
            continue;
        }

        let is_start = marker == options.word_start_tier;
        if !is_start && marker != options.word_end_tier {
            continue;
        }

        let Some((_, times)) = current.as_mut() else {
            warn!("第 {line_number} 行的 \\{marker} 不属于任何记录，已忽略");
            continue;
        };
        let values = line
            .field()
            .split_whitespace()
            .map(seconds_to_ms)
            .collect::<Result<Vec<_>, _>>()?;
        if is_start {
            times.starts.extend(values);
        } else {
            times.ends.extend(values);
        }
    }

    if let Some((reference, times)) = current.take() {
        table.finish_record(reference, times);
    }

    debug!(
        "从 Toolbox 文件中提取了 {} 条记录的词级时间，{} 条记录为空",
        table.len(),
        table.empty_references.len()
    );
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(text: &str) -> Result<WordTimeTable, ToolboxError> {
        extract_word_times(&ToolboxFile::parse(text), &ImportOptions::default())
    }

    #[test]
    fn test_extract_records() {
        let table = extract(
            "\\_sh v3.0  400  Text\n\n\\ref u1\n\\t a b\n\\WordBegin 0.500 1.200\n\\WordEnd 1.150 2.000\n\n\\ref u2\n\\WordBegin 3.000\n\\WordBegin 3.500\n\\WordEnd 3.400 4.000\n",
        )
        .unwrap();

        let u1 = table.get("u1").unwrap();
        assert_eq!(u1.starts, vec![500, 1200]);
        assert_eq!(u1.ends, vec![1150, 2000]);

        let u2 = table.get("u2").unwrap();
        assert_eq!(u2.starts, vec![3000, 3500]);
        assert_eq!(u2.ends, vec![3400, 4000]);
        assert!(table.empty_references.is_empty());
    }

    #[test]
    fn test_empty_record_is_not_fatal() {
        let table = extract("\\ref u1\n\\t\n\\WordBegin\n\\ref u2\n\\WordBegin 1.000\n\\WordEnd 2.000\n\\ref u3\n").unwrap();
        assert_eq!(table.len(), 1);
        assert!(table.get("u1").is_none());
        assert_eq!(table.empty_references, vec!["u1", "u3"]);
        assert!(table.is_empty_reference("u3"));
    }

    #[test]
    fn test_reference_without_content_is_fatal() {
        assert_eq!(
            extract("\\ref u1\n\\WordBegin 1.000\n\\WordEnd 2.000\n\\ref   \n"),
            Err(ToolboxError::MalformedLine {
                line_number: 4,
                marker: "ref".to_string()
            })
        );
    }

    #[test]
    fn test_duplicate_reference_later_wins() {
        let table = extract(
            "\\ref u1\n\\WordBegin 1.000\n\\WordEnd 2.000\n\\ref u1\n\\WordBegin 5.000\n\\WordEnd 6.000\n",
        )
        .unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("u1").unwrap().starts, vec![5000]);
    }

    #[test]
    fn test_custom_markers_and_invalid_time() {
        let options = ImportOptions {
            reference_tier: "id".to_string(),
            word_start_tier: "wb".to_string(),
            word_end_tier: "we".to_string(),
            ..Default::default()
        };
        let file = ToolboxFile::parse("\\id x\n\\wb 0.25\n\\we 0.75\n\\WordBegin 9.999\n");
        let table = extract_word_times(&file, &options).unwrap();
        assert_eq!(table.get("x").unwrap().starts, vec![250]);

        let file = ToolboxFile::parse("\\id x\n\\wb 0.2x\n");
        assert!(matches!(
            extract_word_times(&file, &options),
            Err(ToolboxError::InvalidTime(_))
        ));
    }
}
