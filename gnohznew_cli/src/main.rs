mod backend;
mod cli;
mod config;
mod repl;

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Parser;
use gnohznew_core::{
    session::Session,
    speech::{self, SpeechParams, Synthesizer, VoiceCatalog},
    Engine,
};
use gnohznew_pinyin::PinyinConverter;
use gnohznew_segment::JiebaSegmenter;
use log::{debug, warn};

use crate::cli::{CliArgs, Command, SpeechArgs};
use crate::config::Settings;

fn main() -> Result<()> {
    let args = CliArgs::parse();
    init_logging(args.debug);

    let mut settings = Settings::load(args.config.as_deref())?;
    apply_overrides(&mut settings, &args);
    debug!("settings: {settings:?}");

    let engine = build_engine(&settings)?;

    match args.command.clone().unwrap_or(Command::Repl) {
        Command::Translate { explain, text } => translate(&engine, &text.join(" "), explain),
        Command::Voices => {
            let synthesizer = backend::build(&settings.backend)?;
            let catalog = VoiceCatalog::enumerate(synthesizer.as_ref())
                .context("failed to enumerate voices")?;
            let mut out = io::stdout().lock();
            for v in catalog.iter() {
                writeln!(out, "{v}")?;
            }
            Ok(())
        }
        Command::Speak {
            speech: speech_args,
            no_translate,
            text,
        } => {
            let synthesizer = backend::build(&settings.backend)?;
            let catalog = load_catalog(synthesizer.as_ref());
            let params = speech_params(&settings, &catalog, &speech_args);
            let text = text.join(" ");
            let text = if no_translate {
                text
            } else {
                engine.orchestrate(&text)?
            };
            println!("{text}");
            if !catalog.contains(&params.voice) {
                warn!("voice {:?} is not available, nothing will be spoken", params.voice);
            }
            speech::speak(&text, &params, &catalog, synthesizer.as_ref());
            Ok(())
        }
        Command::Repl => {
            let synthesizer = backend::build(&settings.backend)?;
            let catalog = load_catalog(synthesizer.as_ref());
            let params = speech_params(&settings, &catalog, &SpeechArgs::default());
            let mut session = Session::with_params(engine, catalog, synthesizer, params);
            repl::repl(&mut session, &mut io::stdin().lock(), &mut io::stdout())?;
            Ok(())
        }
    }
}

fn init_logging(debug: bool) {
    let default = if debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp_millis()
        .init();
}

fn apply_overrides(settings: &mut Settings, args: &CliArgs) {
    if let Some(kind) = args.backend {
        settings.backend.kind = kind;
    }
    if let Some(tone) = args.tone {
        settings.pinyin.tone = tone.into();
    }
    if let Some(path) = &args.user_dict {
        settings.segmenter.user_dict = Some(path.clone());
    }
}

fn build_engine(settings: &Settings) -> Result<Engine<JiebaSegmenter, PinyinConverter>> {
    let mut segmenter = JiebaSegmenter::new().hmm(settings.segmenter.hmm);
    if let Some(path) = &settings.segmenter.user_dict {
        let n = segmenter
            .load_user_dict(path)
            .with_context(|| format!("failed to load user dict {}", path.display()))?;
        debug!("user dict {}: {n} words", path.display());
    }
    let converter = PinyinConverter::new().tone_style(settings.pinyin.tone);
    Ok(Engine::new(segmenter, converter))
}

/// 启动时枚举一次音色；失败时退化为空目录（朗读将被跳过）。
fn load_catalog(synthesizer: &dyn Synthesizer) -> VoiceCatalog {
    match VoiceCatalog::enumerate(synthesizer) {
        Ok(c) => c,
        Err(e) => {
            warn!("cannot enumerate voices: {e}");
            VoiceCatalog::default()
        }
    }
}

/// 合并朗读参数：命令行 > 配置 > 目录中的第一个音色。
fn speech_params(settings: &Settings, catalog: &VoiceCatalog, args: &SpeechArgs) -> SpeechParams {
    let s = &settings.speech;
    let voice = args
        .voice
        .clone()
        .or_else(|| s.voice.clone())
        .unwrap_or_else(|| catalog.first().unwrap_or_default().to_string());
    SpeechParams {
        voice,
        volume: args.volume.unwrap_or(s.volume),
        rate: args.rate.unwrap_or(s.rate),
        pitch: args.pitch.unwrap_or(s.pitch),
    }
}

fn translate(
    engine: &Engine<JiebaSegmenter, PinyinConverter>,
    text: &str,
    explain: bool,
) -> Result<()> {
    let mut out = io::stdout().lock();
    if explain {
        for t in engine.explain(text)? {
            writeln!(out, "{}\t{}\t{}", t.token, t.syllables.join(" "), t.reversed)?;
        }
    } else {
        writeln!(out, "{}", engine.orchestrate(text)?)?;
    }
    Ok(())
}
