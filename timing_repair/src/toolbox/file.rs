use std::sync::LazyLock;

use regex::Regex;

use crate::error::ToolboxError;

static MARKER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\\(\S+)").expect("未能编译 MARKER_REGEX"));

/// Toolbox 文件中的一行。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolboxLine {
    /// 行首的标记（不含反斜杠），没有标记的行为 `None`。
    pub marker: Option<String>,
    /// 去掉行尾换行符后的整行文本。
    pub content: String,
    /// 原样保留的换行符（`\n`、`\r\n`，最后一行可能为空）。
    pub line_ending: String,
}

impl ToolboxLine {
    fn parse(raw: &str) -> Self {
        let content = raw.trim_end_matches(['\r', '\n']);
        let line_ending = raw[content.len()..].to_string();
        let marker = MARKER_REGEX
            .captures(content)
            .map(|caps| caps[1].to_string());
        Self {
            marker,
            content: content.to_string(),
            line_ending,
        }
    }

    /// 标记之后的字段内容，去掉首尾空白。没有标记的行返回整行。
    #[must_use]
    pub fn field(&self) -> &str {
        match &self.marker {
            // 标记长度 + 反斜杠
            Some(marker) => self.content[marker.len() + 1..].trim(),
            None => self.content.trim(),
        }
    }

    fn set_field(&mut self, value: &str) {
        if let Some(marker) = &self.marker {
            self.content = if value.is_empty() {
                format!("\\{marker}")
            } else {
                format!("\\{marker} {value}")
            };
        }
    }
}

/// 一个完整读入内存的 Toolbox 文件。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolboxFile {
    lines: Vec<ToolboxLine>,
}

impl ToolboxFile {
    /// 逐行读取，保留每一行的换行符。
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let lines = text.split_inclusive('\n').map(ToolboxLine::parse).collect();
        Self { lines }
    }

    #[must_use]
    pub fn lines(&self) -> &[ToolboxLine] {
        &self.lines
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// 按文件顺序返回带有该标记的每一行的字段内容。
    #[must_use]
    pub fn read_tier(&self, marker: &str) -> Vec<String> {
        self.lines
            .iter()
            .filter(|line| line.marker.as_deref() == Some(marker))
            .map(|line| line.field().to_string())
            .collect()
    }

    /// 按文件顺序覆盖带有该标记的每一行的字段内容。
    ///
    /// 记录数必须与文件中该标记的行数相同。
    pub fn write_tier<S: AsRef<str>>(
        &mut self,
        marker: &str,
        records: &[S],
    ) -> Result<(), ToolboxError> {
        let expected = self
            .lines
            .iter()
            .filter(|line| line.marker.as_deref() == Some(marker))
            .count();
        if expected != records.len() {
            return Err(ToolboxError::RecordCountMismatch {
                marker: marker.to_string(),
                expected,
                found: records.len(),
            });
        }

        let targets = self
            .lines
            .iter_mut()
            .filter(|line| line.marker.as_deref() == Some(marker));
        for (line, record) in targets.zip(records) {
            line.set_field(record.as_ref());
        }
        Ok(())
    }

    /// 重新拼出文件文本。
    #[must_use]
    pub fn to_text(&self) -> String {
        self.lines
            .iter()
            .flat_map(|line| [line.content.as_str(), line.line_ending.as_str()])
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\\_sh v3.0  400  Text\r\n\\id demo\r\n\r\n\\ref u1\r\n\\t Das  Haus\r\n\\ref u2\r\n\\t Ja\r\nfreier Text";

    #[test]
    fn test_parse_lines() {
        let file = ToolboxFile::parse(SAMPLE);
        assert_eq!(file.len(), 8);

        let first = &file.lines()[0];
        assert_eq!(first.marker.as_deref(), Some("_sh"));
        assert_eq!(first.field(), "v3.0  400  Text");
        assert_eq!(first.line_ending, "\r\n");

        assert_eq!(file.lines()[2].marker, None);
        assert_eq!(file.lines()[2].content, "");

        let last = &file.lines()[7];
        assert_eq!(last.marker, None);
        assert_eq!(last.line_ending, "");
    }

    #[test]
    fn test_read_tier() {
        let file = ToolboxFile::parse(SAMPLE);
        assert_eq!(file.read_tier("ref"), vec!["u1", "u2"]);
        assert_eq!(file.read_tier("t"), vec!["Das  Haus", "Ja"]);
        assert!(file.read_tier("mb").is_empty());
    }

    #[test]
    fn test_to_text_round_trip() {
        assert_eq!(ToolboxFile::parse(SAMPLE).to_text(), SAMPLE);
        assert_eq!(ToolboxFile::parse("").to_text(), "");
    }

    #[test]
    fn test_write_tier() {
        let mut file = ToolboxFile::parse(SAMPLE);
        file.write_tier("t", &["Das Haus brennt", ""]).unwrap();
        assert_eq!(file.read_tier("t"), vec!["Das Haus brennt", ""]);

        let text = file.to_text();
        assert!(text.contains("\\t Das Haus brennt\r\n"));
        assert!(text.contains("\\t\r\nfreier Text"));
    }

    #[test]
    fn test_write_tier_count_mismatch() {
        let mut file = ToolboxFile::parse(SAMPLE);
        assert_eq!(
            file.write_tier("ref", &["u1"]),
            Err(ToolboxError::RecordCountMismatch {
                marker: "ref".to_string(),
                expected: 2,
                found: 1,
            })
        );
        assert_eq!(file.read_tier("ref"), vec!["u1", "u2"]);
    }

    #[test]
    fn test_backslash_inside_line_is_not_a_marker() {
        let file = ToolboxFile::parse("text \\ref u1\n");
        assert_eq!(file.lines()[0].marker, None);
    }
}
