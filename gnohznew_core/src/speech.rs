//! `speech`：朗读参数、音色目录与合成请求的构建/派发。
//!
//! - `SpeechParams`：值类型；每次修改产生新值，由状态容器整体替换
//! - `VoiceCatalog`：启动时枚举一次，之后只读，显式传给需要它的地方
//! - `speak`：音色不在目录中时静默返回；否则构建 `SpeechRequest` 并派发一次
//!
//! 数值范围（音量/语速/音高）只是 UI 层约束，`speak` 不会夹取或校验。

use std::ops::RangeInclusive;

use log::debug;
use crate::error::Result;

pub const VOLUME_RANGE: RangeInclusive<f32> = 0.0..=1.0;
pub const RATE_RANGE: RangeInclusive<f32> = 0.1..=10.0;
pub const PITCH_RANGE: RangeInclusive<f32> = 0.0..=2.0;

/// 朗读参数。
#[derive(Debug, Clone, PartialEq)]
pub struct SpeechParams {
    /// 音色标识（需在 `VoiceCatalog` 中）
    pub voice: String,
    pub volume: f32,
    pub rate: f32,
    pub pitch: f32,
}

impl Default for SpeechParams {
    fn default() -> Self {
        Self {
            voice: String::new(),
            volume: 1.0,
            rate: 1.0,
            pitch: 1.0,
        }
    }
}

impl SpeechParams {
    /// 默认参数，音色取目录中的第一个（目录为空时为空串，朗读会静默跳过）。
    pub fn for_catalog(catalog: &VoiceCatalog) -> Self {
        Self {
            voice: catalog.first().unwrap_or_default().to_string(),
            ..Self::default()
        }
    }

    pub fn with_voice(self, voice: impl Into<String>) -> Self {
        Self {
            voice: voice.into(),
            ..self
        }
    }

    pub fn with_volume(self, volume: f32) -> Self {
        Self { volume, ..self }
    }

    pub fn with_rate(self, rate: f32) -> Self {
        Self { rate, ..self }
    }

    pub fn with_pitch(self, pitch: f32) -> Self {
        Self { pitch, ..self }
    }

    /// UI 层使用的范围检查；返回第一个越界字段的说明。
    pub fn check_ranges(&self) -> std::result::Result<(), String> {
        check_range("volume", self.volume, &VOLUME_RANGE)?;
        check_range("rate", self.rate, &RATE_RANGE)?;
        check_range("pitch", self.pitch, &PITCH_RANGE)
    }
}

pub fn check_range(
    name: &str,
    value: f32,
    range: &RangeInclusive<f32>,
) -> std::result::Result<(), String> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(format!(
            "{name} {value} out of range [{}, {}]",
            range.start(),
            range.end()
        ))
    }
}

/// 音色目录：有序、去重的音色标识集合。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoiceCatalog {
    voices: Vec<String>,
}

impl VoiceCatalog {
    pub fn new<I, T>(voices: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let mut voices: Vec<String> = voices.into_iter().map(Into::into).collect();
        voices.sort();
        voices.dedup();
        Self { voices }
    }

    /// 向合成后端枚举一次可用音色。
    pub fn enumerate(synthesizer: &dyn Synthesizer) -> Result<Self> {
        let catalog = Self::new(synthesizer.voices()?);
        debug!("voice catalog: {} voices", catalog.len());
        Ok(catalog)
    }

    pub fn contains(&self, voice: &str) -> bool {
        self.voices.binary_search_by(|v| v.as_str().cmp(voice)).is_ok()
    }

    pub fn first(&self) -> Option<&str> {
        self.voices.first().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.voices.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.voices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voices.is_empty()
    }
}

/// 交给合成后端的请求。
#[derive(Debug, Clone, PartialEq)]
pub struct SpeechRequest {
    pub text: String,
    pub voice: String,
    pub volume: f32,
    pub rate: f32,
    pub pitch: f32,
}

impl SpeechRequest {
    pub fn new(text: impl Into<String>, params: &SpeechParams) -> Self {
        Self {
            text: text.into(),
            voice: params.voice.clone(),
            volume: params.volume,
            rate: params.rate,
            pitch: params.pitch,
        }
    }
}

/// 语音合成边界。
///
/// `dispatch` 是“发出即忘”：不等待播放结束，也不回报成败；
/// 实现方自行记录派发失败（`log::warn!`）。
pub trait Synthesizer: Send + Sync {
    /// 枚举可用音色（启动时调用一次）。
    fn voices(&self) -> Result<Vec<String>>;

    fn dispatch(&self, request: &SpeechRequest);
}

impl<T> Synthesizer for Box<T>
where
    T: Synthesizer + ?Sized,
{
    fn voices(&self) -> Result<Vec<String>> {
        (**self).voices()
    }

    fn dispatch(&self, request: &SpeechRequest) {
        (**self).dispatch(request)
    }
}

/// 朗读 `text`。音色不在目录中时什么也不做。
pub fn speak(
    text: &str,
    params: &SpeechParams,
    catalog: &VoiceCatalog,
    synthesizer: &dyn Synthesizer,
) {
    if !catalog.contains(&params.voice) {
        debug!("voice {:?} not in catalog, skip speaking", params.voice);
        return;
    }
    let request = SpeechRequest::new(text, params);
    debug!(
        "dispatch speech: voice={} volume={} rate={} pitch={} chars={}",
        request.voice,
        request.volume,
        request.rate,
        request.pitch,
        request.text.chars().count()
    );
    synthesizer.dispatch(&request);
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::error::Error;

    /// 记录所有派发请求的合成器桩。
    #[derive(Default)]
    pub(crate) struct RecordingSynthesizer {
        pub voices: Vec<String>,
        pub requests: Mutex<Vec<SpeechRequest>>,
    }

    impl RecordingSynthesizer {
        pub fn with_voices(voices: &[&str]) -> Self {
            Self {
                voices: voices.iter().map(|v| v.to_string()).collect(),
                requests: Mutex::new(Vec::new()),
            }
        }

        pub fn taken(&self) -> Vec<SpeechRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl Synthesizer for RecordingSynthesizer {
        fn voices(&self) -> Result<Vec<String>> {
            Ok(self.voices.clone())
        }

        fn dispatch(&self, request: &SpeechRequest) {
            self.requests.lock().unwrap().push(request.clone());
        }
    }

    struct BrokenSynthesizer;

    impl Synthesizer for BrokenSynthesizer {
        fn voices(&self) -> Result<Vec<String>> {
            Err(Error::Synthesis("no speech service".into()))
        }

        fn dispatch(&self, _request: &SpeechRequest) {
            panic!("must not dispatch");
        }
    }

    #[test]
    fn unknown_voice_is_silent_noop() {
        let synth = RecordingSynthesizer::with_voices(&["en-US", "zh-CN"]);
        let catalog = VoiceCatalog::enumerate(&synth).unwrap();
        let params = SpeechParams::default().with_voice("fr-FR");

        speak("oǎhǐn", &params, &catalog, &synth);
        assert!(synth.taken().is_empty());

        // 空音色（目录尚未就绪时的默认值）同样不派发。
        speak("oǎhǐn", &SpeechParams::default(), &catalog, &synth);
        assert!(synth.taken().is_empty());
    }

    #[test]
    fn known_voice_dispatches_once_with_params_verbatim() {
        let synth = RecordingSynthesizer::with_voices(&["zh-CN"]);
        let catalog = VoiceCatalog::enumerate(&synth).unwrap();
        let params = SpeechParams {
            voice: "zh-CN".into(),
            volume: 0.3,
            rate: 2.5,
            pitch: 1.7,
        };

        speak("oǎhǐn èijìhs", &params, &catalog, &synth);

        let sent = synth.taken();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].text, "oǎhǐn èijìhs");
        assert_eq!(sent[0].voice, params.voice);
        assert_eq!(sent[0].volume, params.volume);
        assert_eq!(sent[0].rate, params.rate);
        assert_eq!(sent[0].pitch, params.pitch);
    }

    #[test]
    fn out_of_range_numbers_pass_through_unchanged() {
        let synth = RecordingSynthesizer::with_voices(&["zh-CN"]);
        let catalog = VoiceCatalog::enumerate(&synth).unwrap();
        let params = SpeechParams::default()
            .with_voice("zh-CN")
            .with_volume(7.0)
            .with_rate(-1.0)
            .with_pitch(99.0);
        assert!(params.check_ranges().is_err());

        speak("", &params, &catalog, &synth);
        let sent = synth.taken();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0], SpeechRequest::new("", &params));
        assert_eq!(sent[0].volume, 7.0);
    }

    #[test]
    fn each_call_dispatches_independently() {
        let synth = RecordingSynthesizer::with_voices(&["zh-CN"]);
        let catalog = VoiceCatalog::enumerate(&synth).unwrap();
        let params = SpeechParams::for_catalog(&catalog);
        speak("a", &params, &catalog, &synth);
        speak("b", &params, &catalog, &synth);
        let texts: Vec<String> = synth.taken().into_iter().map(|r| r.text).collect();
        assert_eq!(texts, vec!["a", "b"]);
    }

    #[test]
    fn catalog_is_sorted_and_deduplicated() {
        let catalog = VoiceCatalog::new(["zh-TW", "en-US", "zh-CN", "en-US"]);
        let voices: Vec<&str> = catalog.iter().collect();
        assert_eq!(voices, vec!["en-US", "zh-CN", "zh-TW"]);
        assert_eq!(catalog.first(), Some("en-US"));
        assert!(catalog.contains("zh-CN"));
        assert!(!catalog.contains("zh"));
    }

    #[test]
    fn catalog_enumeration_error_propagates() {
        assert!(matches!(
            VoiceCatalog::enumerate(&BrokenSynthesizer),
            Err(Error::Synthesis(_))
        ));
    }

    #[test]
    fn default_params_follow_catalog() {
        let params = SpeechParams::for_catalog(&VoiceCatalog::new(["zh-CN", "de-DE"]));
        assert_eq!(params.voice, "de-DE");
        assert_eq!((params.volume, params.rate, params.pitch), (1.0, 1.0, 1.0));
        assert_eq!(SpeechParams::for_catalog(&VoiceCatalog::default()).voice, "");
    }

    #[test]
    fn edits_replace_one_field() {
        let base = SpeechParams::default().with_voice("zh-CN");
        let edited = base.clone().with_rate(3.0);
        assert_eq!(edited.rate, 3.0);
        assert_eq!(edited.voice, base.voice);
        assert_eq!(edited.volume, base.volume);
        assert_eq!(edited.pitch, base.pitch);
        assert!(edited.check_ranges().is_ok());
    }

    #[test]
    fn range_check_names_the_field() {
        let err = SpeechParams::default().with_pitch(2.5).check_ranges().unwrap_err();
        assert!(err.starts_with("pitch"), "{err}");
        assert!(SpeechParams::default().with_rate(0.05).check_ranges().is_err());
        assert!(SpeechParams::default().with_volume(0.0).check_ranges().is_ok());
    }
}
