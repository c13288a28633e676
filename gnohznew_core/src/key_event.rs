/// 输入事件（语义层面的用户操作）。
///
/// 说明：
/// - `Session`/processor 只关心“语义事件”，不关心具体控件或按键。
/// - CLI/GUI 层负责把用户操作转换成这些事件。
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// 整体替换当前输入
    Edit(String),
    /// 清空输入与输出（朗读参数保留）
    Clear,
    /// 翻译当前输入
    Translate,
    /// 朗读最近一次输出
    Read,
    SetVoice(String),
    SetVolume(f32),
    SetRate(f32),
    SetPitch(f32),
}

/// 会话输出动作（通知 UI/宿主刷新展示）。
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// 翻译完成，携带新的输出
    Translated(String),
    /// 朗读参数已替换为新值
    ParamsChanged(crate::speech::SpeechParams),
}
