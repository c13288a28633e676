//! `gnohznew_core`：纯逻辑层，不做任何 I/O。
//!
//! 流水线：segmenter（切分） -> phonetic（注音） -> transform（拼接 + 反转） -> engine（按空格拼接）；
//! 输出再交给 speech（构建并派发朗读请求）。
//!
//! 三个外部能力（切分、注音、合成）在这里只定义 trait，具体实现由
//! `gnohznew_segment` / `gnohznew_pinyin` / CLI 中的合成后端提供。
pub mod context;
pub mod engine;
pub mod error;
pub mod key_event;
pub mod model;
pub mod phonetic;
pub mod processor;
pub mod segmenter;
pub mod session;
pub mod speech;
pub mod transform;

pub use engine::Engine;
pub use error::{Error, Result};
