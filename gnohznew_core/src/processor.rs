//! `processor`：输入事件处理链。
//!
//! 按顺序处理 `InputEvent`，对 `Context` 做状态变更，并可产生 `Action`。
//!
//! 当前链路（`Session::new` 默认组装）：
//! - `EditingProcessor`：替换/清空输入
//! - `TranslateProcessor`：调用引擎翻译，写入输出
//! - `SpeechParamsProcessor`：整体替换朗读参数
//! - `ReadProcessor`：用当前输出与参数朗读

use crate::{
    context::Context,
    error::Result,
    key_event::{Action, InputEvent},
    speech::{self, Synthesizer, VoiceCatalog},
};

/// 给 processors 的对象安全引擎接口（避免在 processors 层引入泛型爆炸）。
pub trait EngineFacade {
    fn orchestrate(&self, input: &str) -> Result<String>;
}

/// processors 可用的外部能力（引擎、音色目录、合成器），只读借用。
pub struct Services<'a> {
    pub engine: &'a dyn EngineFacade,
    pub catalog: &'a VoiceCatalog,
    pub synthesizer: &'a dyn Synthesizer,
}

/// Processor 执行结果：是否“消费”了本次事件。
///
/// - `Consume`：本 processor 已处理该事件，后续 processor 不再执行
/// - `Continue`：本 processor 不处理该事件，交给下一个 processor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessStatus {
    Consume,
    Continue,
}

/// Processor：处理输入事件并改变 Context；必要时产生输出动作。
///
/// 外部能力的错误原样返回，不在链内吞掉。
pub trait Processor: Send + Sync {
    fn process(
        &mut self,
        services: &Services<'_>,
        context: &mut Context,
        input_event: &InputEvent,
    ) -> Result<(ProcessStatus, Vec<Action>)>;
}

pub struct EditingProcessor;

impl Processor for EditingProcessor {
    fn process(
        &mut self,
        _services: &Services<'_>,
        context: &mut Context,
        input_event: &InputEvent,
    ) -> Result<(ProcessStatus, Vec<Action>)> {
        match input_event {
            InputEvent::Edit(text) => {
                context.raw_input = text.clone();
                Ok((ProcessStatus::Consume, Vec::new()))
            }
            InputEvent::Clear => {
                context.reset();
                Ok((ProcessStatus::Consume, Vec::new()))
            }
            _ => Ok((ProcessStatus::Continue, Vec::new())),
        }
    }
}

pub struct TranslateProcessor;

impl Processor for TranslateProcessor {
    fn process(
        &mut self,
        services: &Services<'_>,
        context: &mut Context,
        input_event: &InputEvent,
    ) -> Result<(ProcessStatus, Vec<Action>)> {
        match input_event {
            InputEvent::Translate => {
                // 先算完再写回：失败时旧输出保持不变
                let output = services.engine.orchestrate(&context.raw_input)?;
                context.output = output.clone();
                Ok((ProcessStatus::Consume, vec![Action::Translated(output)]))
            }
            _ => Ok((ProcessStatus::Continue, Vec::new())),
        }
    }
}

pub struct SpeechParamsProcessor;

impl Processor for SpeechParamsProcessor {
    fn process(
        &mut self,
        _services: &Services<'_>,
        context: &mut Context,
        input_event: &InputEvent,
    ) -> Result<(ProcessStatus, Vec<Action>)> {
        let current = context.params.clone();
        let next = match input_event {
            InputEvent::SetVoice(voice) => current.with_voice(voice.clone()),
            InputEvent::SetVolume(v) => current.with_volume(*v),
            InputEvent::SetRate(v) => current.with_rate(*v),
            InputEvent::SetPitch(v) => current.with_pitch(*v),
            _ => return Ok((ProcessStatus::Continue, Vec::new())),
        };
        context.replace_params(next.clone());
        Ok((ProcessStatus::Consume, vec![Action::ParamsChanged(next)]))
    }
}

pub struct ReadProcessor;

impl Processor for ReadProcessor {
    fn process(
        &mut self,
        services: &Services<'_>,
        context: &mut Context,
        input_event: &InputEvent,
    ) -> Result<(ProcessStatus, Vec<Action>)> {
        match input_event {
            InputEvent::Read => {
                speech::speak(
                    &context.output,
                    &context.params,
                    services.catalog,
                    services.synthesizer,
                );
                Ok((ProcessStatus::Consume, Vec::new()))
            }
            _ => Ok((ProcessStatus::Continue, Vec::new())),
        }
    }
}
