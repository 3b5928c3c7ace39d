//! # EAF (ELAN Annotation Format) 解析器
//!
//! 流式读取 EAF 文件，构建 [`EafDocument`]。只解析与计时相关的结构
//! （时间槽、层、标注、语言类型），其余顶层元素作为通用元素树保留。

mod constants;
mod handlers;
mod opaque;
mod state;
mod utils;

use elan_core::{EafDocument, EafError};
use quick_xml::{Reader, events::Event};
use tracing::{error, info};

use self::state::EafParserState;

/// 解析 EAF 文件内容。
///
/// # 参数
///
/// * `content` - EAF 文件内容字符串。
///
/// # 返回
///
/// * `Ok(EafDocument)` - 解析并通过一致性检查的文档。
/// * `Err(EafError)` - 解析失败时，返回具体的错误信息。
///
/// # Errors
///
/// * `EafError::Xml` - 输入不是有效的 XML
/// * `EafError::MissingAttribute` - 时间槽、层或标注缺少必需属性
/// * `EafError::InvalidTime` / `EafError::InvalidId` - 时间值或 ID 格式无效
/// * `EafError::InvalidDocument` - 缺少根元素，或文档内部引用不一致
pub fn parse_eaf(content: &str) -> Result<EafDocument, EafError> {
    let mut reader = Reader::from_str(content);
    // 不裁剪文本，标注值中的空白需要原样保留
    reader.config_mut().trim_text(false);

    let mut state = EafParserState::default();

    loop {
        let event = match reader.read_event() {
            Ok(event) => event,
            Err(e) => {
                error!(
                    "EAF 解析错误，位置 {}: {}。无法继续解析",
                    reader.error_position(),
                    e
                );
                return Err(EafError::Xml(e));
            }
        };

        if event == Event::Eof {
            break;
        }

        handlers::handle_event(&event, &mut reader, &mut state)?;
    }

    if !state.seen_root {
        return Err(EafError::InvalidDocument(
            "缺少根元素 <ANNOTATION_DOCUMENT>".to_string(),
        ));
    }

    let document = EafDocument::from_parts(state.parts)?;
    info!(
        "已解析 EAF 文档：{} 个时间槽，{} 个层",
        document.time_order().len(),
        document.tiers().len()
    );
    Ok(document)
}
