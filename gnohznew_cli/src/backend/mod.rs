//! 语音合成后端（`Synthesizer` 的具体实现）。
//!
//! - `espeak`：调用 espeak-ng 进程（默认）
//! - `native`：`tts` crate 提供的平台语音（需 `native-tts` feature）
//! - `silent`：只记日志，不发声

pub mod espeak;
#[cfg(feature = "native-tts")]
pub mod native;
pub mod silent;

use anyhow::Result;
use clap::ValueEnum;
use gnohznew_core::speech::Synthesizer;
use serde::Deserialize;

use crate::config::BackendSettings;

#[derive(ValueEnum, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    #[default]
    Espeak,
    Native,
    Silent,
}

pub fn build(settings: &BackendSettings) -> Result<Box<dyn Synthesizer>> {
    match settings.kind {
        BackendKind::Espeak => Ok(Box::new(espeak::EspeakSynthesizer::new(
            settings.program.clone(),
            settings.interrupt,
        ))),
        BackendKind::Silent => Ok(Box::new(silent::SilentSynthesizer::new(
            settings.voices.clone(),
        ))),
        #[cfg(feature = "native-tts")]
        BackendKind::Native => Ok(Box::new(native::NativeSynthesizer::new(settings.interrupt)?)),
        #[cfg(not(feature = "native-tts"))]
        BackendKind::Native => {
            anyhow::bail!("native backend requires building with `--features native-tts`")
        }
    }
}
