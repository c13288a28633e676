//! `segmenter`：把整段输入切分为词级 token。
//!
//! core 不实现切分，只定义边界；具体实现见 `gnohznew_segment`（jieba）。

use crate::error::Result;

/// Segmenter：输入文本 -> 有序 token 序列。
///
/// 约定（由实现方保证，core 依赖但不校验）：
/// - token 顺序与原文一致
/// - 所有 token 首尾拼接后等于原文
/// - 对任意输入（包括空串）都不报错；`Err` 只用于实现方自身的故障
pub trait Segmenter: Send + Sync {
    fn segment(&self, text: &str) -> Result<Vec<String>>;
}
