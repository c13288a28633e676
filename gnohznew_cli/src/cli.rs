use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use gnohznew_core::speech::{self, PITCH_RANGE, RATE_RANGE, VOLUME_RANGE};
use gnohznew_pinyin::ToneStyle;

use crate::backend::BackendKind;

#[derive(Parser, Debug, Clone)]
#[command(name = "gnohznew", version, about = "Gnohznew - 中文 -> 逆序拼音 -> 朗读")]
pub struct CliArgs {
    /// 配置文件（TOML）；缺省读取当前目录下的 gnohznew.toml（可不存在）
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// 语音合成后端
    #[arg(long, value_enum, global = true)]
    pub backend: Option<BackendKind>,

    /// 声调表示方式
    #[arg(long, value_enum, global = true)]
    pub tone: Option<ToneArg>,

    /// jieba 用户词典（word<TAB>freq<TAB>tag）
    #[arg(long, global = true)]
    pub user_dict: Option<PathBuf>,

    /// 输出调试日志
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// 交互模式（默认）
    Repl,
    /// 翻译文本并输出
    Translate {
        /// 逐 token 展示注音与反转结果
        #[arg(long)]
        explain: bool,
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// 翻译并朗读
    Speak {
        #[command(flatten)]
        speech: SpeechArgs,
        /// 直接朗读原文，不做翻译
        #[arg(long)]
        no_translate: bool,
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// 列出可用音色
    Voices,
}

#[derive(clap::Args, Debug, Clone, Default)]
pub struct SpeechArgs {
    #[arg(long)]
    pub voice: Option<String>,
    #[arg(long, value_parser = parse_volume)]
    pub volume: Option<f32>,
    #[arg(long, value_parser = parse_rate)]
    pub rate: Option<f32>,
    #[arg(long, value_parser = parse_pitch)]
    pub pitch: Option<f32>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToneArg {
    Mark,
    Number,
    None,
}

impl From<ToneArg> for ToneStyle {
    fn from(t: ToneArg) -> Self {
        match t {
            ToneArg::Mark => ToneStyle::Mark,
            ToneArg::Number => ToneStyle::Number,
            ToneArg::None => ToneStyle::None,
        }
    }
}

fn parse_in(name: &str, s: &str, range: &std::ops::RangeInclusive<f32>) -> Result<f32, String> {
    let v: f32 = s.trim().parse().map_err(|e| format!("invalid {name} {s:?}: {e}"))?;
    speech::check_range(name, v, range)?;
    Ok(v)
}

pub fn parse_volume(s: &str) -> Result<f32, String> {
    parse_in("volume", s, &VOLUME_RANGE)
}

pub fn parse_rate(s: &str) -> Result<f32, String> {
    parse_in("rate", s, &RATE_RANGE)
}

pub fn parse_pitch(s: &str) -> Result<f32, String> {
    parse_in("pitch", s, &PITCH_RANGE)
}
