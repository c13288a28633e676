//! 配置：内置默认值 -> TOML 文件（可选） -> 环境变量 `GNOHZNEW__SECTION__KEY`。
//!
//! 命令行参数在 `main` 中最后覆盖。

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ::config::{Config, Environment, File};
use gnohznew_core::speech::{self, PITCH_RANGE, RATE_RANGE, VOLUME_RANGE};
use gnohznew_pinyin::ToneStyle;
use serde::Deserialize;

use crate::backend::BackendKind;

pub const DEFAULT_CONFIG_FILE: &str = "gnohznew.toml";
pub const ENV_PREFIX: &str = "GNOHZNEW";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub speech: SpeechSettings,
    pub segmenter: SegmenterSettings,
    pub pinyin: PinyinSettings,
    pub backend: BackendSettings,
}

/// 启动时的朗读参数；`voice` 为空时取音色目录中的第一个。
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SpeechSettings {
    pub voice: Option<String>,
    pub volume: f32,
    pub rate: f32,
    pub pitch: f32,
}

impl Default for SpeechSettings {
    fn default() -> Self {
        Self {
            voice: None,
            volume: 1.0,
            rate: 1.0,
            pitch: 1.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SegmenterSettings {
    pub hmm: bool,
    pub user_dict: Option<PathBuf>,
}

impl Default for SegmenterSettings {
    fn default() -> Self {
        Self {
            hmm: true,
            user_dict: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PinyinSettings {
    pub tone: ToneStyle,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BackendSettings {
    pub kind: BackendKind,
    /// espeak 后端调用的程序
    pub program: String,
    /// 新的朗读开始前是否打断上一条
    pub interrupt: bool,
    /// silent 后端对外报告的音色
    pub voices: Vec<String>,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            kind: BackendKind::default(),
            program: "espeak-ng".to_string(),
            interrupt: false,
            voices: vec!["cmn".to_string()],
        }
    }
}

impl Settings {
    /// 按层合并配置；`path` 为 None 时尝试默认文件（不存在也不报错）。
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_from(path, None)
    }

    /// 同 [`Settings::load`]；`env` 为 Some 时用它代替进程环境变量。
    pub fn load_from(
        path: Option<&Path>,
        env: Option<::config::Map<String, String>>,
    ) -> Result<Self> {
        let file = match path {
            Some(p) => File::from(p).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };
        let cfg = Config::builder()
            .add_source(file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true)
                    .source(env),
            )
            .build()
            .context("failed to read configuration")?;
        let settings: Settings = cfg
            .try_deserialize()
            .context("invalid configuration")?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        let s = &self.speech;
        speech::check_range("speech.volume", s.volume, &VOLUME_RANGE)
            .and_then(|_| speech::check_range("speech.rate", s.rate, &RATE_RANGE))
            .and_then(|_| speech::check_range("speech.pitch", s.pitch, &PITCH_RANGE))
            .map_err(anyhow::Error::msg)?;
        if self.backend.program.trim().is_empty() {
            anyhow::bail!("backend.program must not be empty");
        }
        Ok(())
    }
}
