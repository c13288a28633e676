use crate::speech::SpeechParams;

/// 单个 token 的变换明细（用于调试/`--explain` 展示）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenTrace {
    /// 切分得到的原文 token
    pub token: String,
    /// 注音结果（每字一个音节）
    pub syllables: Vec<String>,
    /// 拼接后整串反转的结果
    pub reversed: String,
}

/// 会话给 UI 的“快照视图”。
///
/// UI 层只读 `SessionState`，不直接读写 `Context`。
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    /// 当前输入（每次编辑整体替换）
    pub raw_input: String,
    /// 最近一次翻译的输出
    pub output: String,
    /// 当前朗读参数
    pub params: SpeechParams,
}
