//! # Toolbox 文本
//!
//! Toolbox（SIL Field Linguist's Toolbox）文件是按行组织的标记文本：每行以 `\marker`
//! 开头，一条记录从参考层标记（默认 `\ref`）开始，到下一个参考层标记为止。

mod file;
mod time;
mod word_times;

pub use file::{ToolboxFile, ToolboxLine};
pub use time::seconds_to_ms;
pub use word_times::{WordTimeTable, WordTimes, extract_word_times};
