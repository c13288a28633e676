//! 平台原生语音（`tts` crate：Speech Dispatcher / SAPI / AVFoundation 等）。
//!
//! 语速、音高以后端的 normal 值为 1.0 缩放，再夹到后端支持的范围内；
//! 音量直接按 0..=1 映射到后端的 min..=max。

use std::sync::Mutex;

use gnohznew_core::{
    speech::{SpeechRequest, Synthesizer},
    Error, Result,
};
use log::warn;
use tts::Tts;

pub struct NativeSynthesizer {
    tts: Mutex<Tts>,
    interrupt: bool,
}

impl NativeSynthesizer {
    pub fn new(interrupt: bool) -> anyhow::Result<Self> {
        let tts = Tts::default()?;
        Ok(Self {
            tts: Mutex::new(tts),
            interrupt,
        })
    }

    fn speak(&self, request: &SpeechRequest) -> std::result::Result<(), tts::Error> {
        let mut tts = match self.tts.lock() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(voice) = tts.voices()?.into_iter().find(|v| v.id() == request.voice) {
            tts.set_voice(&voice)?;
        }
        let volume = lerp(tts.min_volume(), tts.max_volume(), request.volume);
        let rate = (tts.normal_rate() * request.rate).clamp(tts.min_rate(), tts.max_rate());
        let pitch = (tts.normal_pitch() * request.pitch).clamp(tts.min_pitch(), tts.max_pitch());
        tts.set_volume(volume)?;
        tts.set_rate(rate)?;
        tts.set_pitch(pitch)?;
        tts.speak(request.text.as_str(), self.interrupt)?;
        Ok(())
    }
}

fn lerp(min: f32, max: f32, t: f32) -> f32 {
    (min + (max - min) * t).clamp(min, max)
}

impl Synthesizer for NativeSynthesizer {
    fn voices(&self) -> Result<Vec<String>> {
        let tts = match self.tts.lock() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        };
        let voices = tts
            .voices()
            .map_err(|e| Error::Synthesis(e.to_string()))?;
        Ok(voices.iter().map(|v| v.id()).collect())
    }

    fn dispatch(&self, request: &SpeechRequest) {
        if let Err(e) = self.speak(request) {
            warn!("native speech failed: {e}");
        }
    }
}
