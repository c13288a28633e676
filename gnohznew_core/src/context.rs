//! `Context`：processor 链共享的唯一状态容器。
//!
//! 约定：
//! - `raw_input`：用户输入，每次编辑整体替换，不保留历史
//! - `output`：最近一次成功翻译的结果；翻译失败时保持不变
//! - `params`：朗读参数，只通过整体赋值更新
use crate::{model::SessionState, speech::SpeechParams};

#[derive(Debug, Clone, Default)]
pub struct Context {
    pub raw_input: String,
    pub output: String,
    pub params: SpeechParams,
}

impl Context {
    pub fn new(params: SpeechParams) -> Self {
        Self {
            params,
            ..Self::default()
        }
    }

    /// 清空输入与输出；朗读参数不受影响。
    pub fn reset(&mut self) {
        self.raw_input.clear();
        self.output.clear();
    }

    /// 用新值整体替换朗读参数。
    pub fn replace_params(&mut self, params: SpeechParams) {
        self.params = params;
    }

    /// 生成 UI 层只读快照。
    pub fn ui_state(&self) -> SessionState {
        SessionState {
            raw_input: self.raw_input.clone(),
            output: self.output.clone(),
            params: self.params.clone(),
        }
    }
}
