//! `error`：core 与各适配层共用的错误类型。
//!
//! core 自身没有可失败的计算；这里的错误全部来自外部能力（切分器、注音器、语音合成），
//! 由调用方原样向上传播（`?`），core 不做捕获或重试。

use thiserror::Error;

/// 统一错误类型。
#[derive(Error, Debug)]
pub enum Error {
    /// 切分器失败
    #[error("segmenter error: {0}")]
    Segment(String),

    /// 注音器失败
    #[error("phonetic converter error: {0}")]
    Convert(String),

    /// 语音合成后端失败（仅枚举音色等同步调用会返回；播放本身不回报）
    #[error("synthesis error: {0}")]
    Synthesis(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
