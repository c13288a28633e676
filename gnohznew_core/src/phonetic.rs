//! `phonetic`：把 token 注音为音节序列（带声调符号的拼音）。
//!
//! 与 `segmenter` 一样只是边界定义；实现见 `gnohznew_pinyin`。

use crate::error::Result;

/// PhoneticConverter：token -> 每个字一个音节的有序序列。
///
/// - 声调以附加符号的形式标在元音上（例如 `"nǐ"`）
/// - 非汉字如何处理（原样透传等）由实现方决定，core 不再规定
pub trait PhoneticConverter: Send + Sync {
    fn convert(&self, text: &str) -> Result<Vec<String>>;
}
