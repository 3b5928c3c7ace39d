//! 处理选项与配置文件。

use std::path::Path;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::EafError;

/// EAF 生成选项
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder)]
#[builder(setter(into), default)]
#[serde(default)]
pub struct EafGenerationOptions {
    /// 是否输出带缩进的 XML。
    pub format: bool,
    /// 缩进宽度（空格数）。ELAN 自身使用 4。
    pub indent_size: usize,
}

impl Default for EafGenerationOptions {
    fn default() -> Self {
        Self {
            format: true,
            indent_size: 4,
        }
    }
}

/// 从 Toolbox 文件导入词级时间时使用的层名。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder)]
#[builder(setter(into), default)]
#[serde(default)]
pub struct ImportOptions {
    /// 参考层（每条记录的键，对应 EAF 中父标注的值）。
    pub reference_tier: String,
    /// 文本层，即 EAF 中词层的语言类型名。
    pub text_tier: String,
    /// 词起始时间所在的层。
    pub word_start_tier: String,
    /// 词结束时间所在的层。
    pub word_end_tier: String,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            reference_tier: "ref".to_string(),
            text_tier: "t".to_string(),
            word_start_tier: "WordBegin".to_string(),
            word_end_tier: "WordEnd".to_string(),
        }
    }
}

/// 配置文件的完整结构。
///
/// ```toml
/// [import]
/// reference_tier = "ref"
/// text_tier = "t"
///
/// [output]
/// format = true
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetimeConfig {
    pub import: ImportOptions,
    pub output: EafGenerationOptions,
}

impl RetimeConfig {
    /// 从 TOML 字符串解析配置，缺失的字段使用默认值。
    pub fn from_toml_str(content: &str) -> Result<Self, EafError> {
        Ok(toml::from_str(content)?)
    }

    /// 从文件加载配置。
    pub fn load(path: &Path) -> Result<Self, EafError> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        info!("已加载配置文件 {}", path.display());
        Ok(config)
    }
}
