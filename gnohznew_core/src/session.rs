//! `Session`：对上层（CLI/GUI）提供的会话对象。
//!
//! `Session` 自身不做业务逻辑判断，而是：
//! - 持有 `Context`（状态）、引擎、音色目录与合成器
//! - 把每次 `InputEvent` 依次交给 processors，直到被消费
//! - 最后输出 `SessionState` + `Action`

use crate::{
    context::Context,
    engine::Engine,
    error::Result,
    key_event::{Action, InputEvent},
    model::SessionState,
    phonetic::PhoneticConverter,
    processor::{
        EditingProcessor, ProcessStatus, Processor, ReadProcessor, Services,
        SpeechParamsProcessor, TranslateProcessor,
    },
    segmenter::Segmenter,
    speech::{SpeechParams, Synthesizer, VoiceCatalog},
};

/// 一次交互会话的状态机容器。
pub struct Session<S, P, Y> {
    engine: Engine<S, P>,
    /// 启动时枚举好的音色目录（只读）
    catalog: VoiceCatalog,
    synthesizer: Y,
    ctx: Context,
    processors: Vec<Box<dyn Processor>>,
}

impl<S, P, Y> Session<S, P, Y>
where
    S: Segmenter,
    P: PhoneticConverter,
    Y: Synthesizer,
{
    /// 创建会话；朗读参数默认取目录中的第一个音色。
    pub fn new(engine: Engine<S, P>, catalog: VoiceCatalog, synthesizer: Y) -> Self {
        let params = SpeechParams::for_catalog(&catalog);
        Self::with_params(engine, catalog, synthesizer, params)
    }

    pub fn with_params(
        engine: Engine<S, P>,
        catalog: VoiceCatalog,
        synthesizer: Y,
        params: SpeechParams,
    ) -> Self {
        Self {
            engine,
            catalog,
            synthesizer,
            ctx: Context::new(params),
            processors: vec![
                Box::new(EditingProcessor),
                Box::new(TranslateProcessor),
                Box::new(SpeechParamsProcessor),
                Box::new(ReadProcessor),
            ],
        }
    }

    pub fn catalog(&self) -> &VoiceCatalog {
        &self.catalog
    }

    /// 获取当前 UI 快照（只读）。
    pub fn ui_state(&self) -> SessionState {
        self.ctx.ui_state()
    }

    /// 处理一个输入事件，返回最新 UI 快照与动作列表。
    pub fn handle(&mut self, ev: InputEvent) -> Result<(SessionState, Vec<Action>)> {
        let services = Services {
            engine: &self.engine,
            catalog: &self.catalog,
            synthesizer: &self.synthesizer,
        };
        let mut actions = Vec::new();
        for p in &mut self.processors {
            let (status, mut a) = p.process(&services, &mut self.ctx, &ev)?;
            actions.append(&mut a);
            if status == ProcessStatus::Consume {
                break;
            }
        }
        Ok((self.ctx.ui_state(), actions))
    }
}
