use std::{fmt, io};

use quick_xml::{
    Error as QuickXmlErrorMain, encoding::EncodingError,
    events::attributes::AttrError as QuickXmlAttrError,
};
use thiserror::Error;

use crate::{AnchorId, AnnotationId};

/// 定义读取、访问和写出 EAF 文档时可能发生的各种错误。
#[derive(Error, Debug)]
pub enum EafError {
    /// XML 解析或生成错误，通常来自 `quick-xml` 库。
    #[error("XML 错误: {0}")]
    Xml(#[from] QuickXmlErrorMain),
    /// XML 属性解析错误，通常来自 `quick-xml` 库。
    #[error("XML 属性错误: {0}")]
    Attribute(#[from] QuickXmlAttrError),
    /// 无效的时间值。
    #[error("无效的时间值: {0}")]
    InvalidTime(String),
    /// 无法识别的时间槽或标注 ID。
    #[error("无效的 ID: {0}")]
    InvalidId(String),
    /// 元素缺少必需的属性。
    #[error("元素 <{element}> 缺少属性 {attribute}")]
    MissingAttribute {
        /// 元素名
        element: String,
        /// 属性名
        attribute: String,
    },
    /// 文档内部引用不一致，例如标注引用了不存在的时间槽。
    #[error("文档结构无效: {0}")]
    InvalidDocument(String),
    /// 试图修改引用型标注（没有时间槽）的边界。
    #[error("标注 {0} 不可时间对齐，没有时间槽")]
    NotAlignable(AnnotationId),
    /// 找不到指定 ID 的标注。
    #[error("找不到标注 {0}")]
    UnknownAnnotation(AnnotationId),
    /// 找不到指定 ID 的时间槽。
    #[error("找不到时间槽 {0}")]
    UnknownTimeSlot(AnchorId),
    /// 文件读写等IO错误。
    #[error("IO 错误: {0}")]
    Io(#[from] io::Error),
    /// 从字节序列转换为 UTF-8 字符串失败。
    #[error("UTF-8 转换错误: {0}")]
    FromUtf8(#[from] std::string::FromUtf8Error),
    /// XML 文本编码或解码错误。
    #[error("文本编码或解码错误: {0}")]
    Encoding(#[from] EncodingError),
    /// 配置文件解析错误。
    #[error("配置文件解析错误: {0}")]
    Config(#[from] toml::de::Error),
}

impl From<EafError> for std::io::Error {
    fn from(err: EafError) -> Self {
        Self::other(err)
    }
}

/// 定义从字符串解析 `Constraint` 时可能发生的错误。
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct ParseConstraintError(pub String); // 存储无法解析的原始字符串

impl fmt::Display for ParseConstraintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "未知的约束类型: {}", self.0)
    }
}
impl std::error::Error for ParseConstraintError {}
