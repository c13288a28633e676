use gnohznew_core::{
    speech::{SpeechRequest, Synthesizer},
    Result,
};
use log::info;

/// 不发声的后端：把请求写进日志，便于在没有语音服务的环境里调试。
pub struct SilentSynthesizer {
    voices: Vec<String>,
}

impl SilentSynthesizer {
    pub fn new(voices: Vec<String>) -> Self {
        Self { voices }
    }
}

impl Synthesizer for SilentSynthesizer {
    fn voices(&self) -> Result<Vec<String>> {
        Ok(self.voices.clone())
    }

    fn dispatch(&self, request: &SpeechRequest) {
        info!(
            "[silent] voice={} volume={} rate={} pitch={} text={:?}",
            request.voice, request.volume, request.rate, request.pitch, request.text
        );
    }
}
