use std::io::{self, BufRead, Write};

use gnohznew_core::{
    key_event::{Action, InputEvent},
    phonetic::PhoneticConverter,
    segmenter::Segmenter,
    session::Session,
    speech::{SpeechParams, Synthesizer},
};

use crate::cli::{parse_pitch, parse_rate, parse_volume};

/// REPL 中的一行输入。
#[derive(Debug, Clone, PartialEq)]
pub enum ReplCommand {
    Quit,
    Help,
    Read,
    Voices,
    Params,
    Clear,
    Voice(String),
    Volume(f32),
    Rate(f32),
    Pitch(f32),
    /// 普通文本：作为新的输入并立即翻译
    Text(String),
    Invalid(String),
}

/// 命令按去掉首尾空白后的内容识别；普通文本只去掉行尾换行，其余原样保留。
/// 以 `::` 开头的行是转义，得到以 `:` 开头的文本。
pub fn parse_line(line: &str) -> ReplCommand {
    let text = line.trim_end_matches(['\r', '\n']);
    let trimmed = line.trim();
    if trimmed.starts_with("::") {
        return ReplCommand::Text(text.replacen("::", ":", 1));
    }
    let Some(cmd) = trimmed.strip_prefix(':') else {
        return ReplCommand::Text(text.to_string());
    };
    let (name, arg) = match cmd.split_once(char::is_whitespace) {
        Some((n, a)) => (n, a.trim()),
        None => (cmd, ""),
    };
    let number = |parse: fn(&str) -> Result<f32, String>, wrap: fn(f32) -> ReplCommand| {
        parse(arg).map(wrap).unwrap_or_else(ReplCommand::Invalid)
    };
    match name {
        "q" | "quit" | "exit" => ReplCommand::Quit,
        "h" | "help" => ReplCommand::Help,
        "read" | "r" => ReplCommand::Read,
        "voices" => ReplCommand::Voices,
        "params" => ReplCommand::Params,
        "clear" => ReplCommand::Clear,
        "voice" if !arg.is_empty() => ReplCommand::Voice(arg.to_string()),
        "voice" => ReplCommand::Invalid("usage: :voice <id>".to_string()),
        "volume" => number(parse_volume, ReplCommand::Volume),
        "rate" => number(parse_rate, ReplCommand::Rate),
        "pitch" => number(parse_pitch, ReplCommand::Pitch),
        other => ReplCommand::Invalid(format!("unknown command :{other}")),
    }
}

const HELP: &str = "\
输入中文后回车即翻译；命令：
  :read              朗读上一次的结果
  :voice <id>        选择音色（:voices 查看）
  :volume <0..1>     音量
  :rate <0.1..10>    语速
  :pitch <0..2>      音高
  :params            查看当前朗读参数
  :clear             清空输入与输出
  ::text             以 `:` 开头的普通文本
  :q                 退出";

fn print_params(out: &mut impl Write, p: &SpeechParams) -> io::Result<()> {
    writeln!(
        out,
        "voice={} volume={} rate={} pitch={}",
        if p.voice.is_empty() { "(none)" } else { p.voice.as_str() },
        p.volume,
        p.rate,
        p.pitch
    )
}

pub fn repl<S, P, Y>(
    session: &mut Session<S, P, Y>,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> io::Result<()>
where
    S: Segmenter,
    P: PhoneticConverter,
    Y: Synthesizer,
{
    let mut line = String::new();
    writeln!(out, "gnohznew | {} voices | :h 查看帮助, :q 退出", session.catalog().len())?;
    out.flush()?;

    loop {
        line.clear();
        write!(out, "中文> ")?;
        out.flush()?;
        if input.read_line(&mut line)? == 0 {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }

        let event = match parse_line(&line) {
            ReplCommand::Quit => break,
            ReplCommand::Help => {
                writeln!(out, "{HELP}")?;
                continue;
            }
            ReplCommand::Voices => {
                for v in session.catalog().iter() {
                    writeln!(out, "{v}")?;
                }
                continue;
            }
            ReplCommand::Params => {
                print_params(out, &session.ui_state().params)?;
                continue;
            }
            ReplCommand::Invalid(msg) => {
                writeln!(out, "(忽略：{msg})")?;
                continue;
            }
            ReplCommand::Voice(v) => {
                if !session.catalog().contains(&v) {
                    writeln!(out, "(提示：{v} 不在音色列表中，朗读将被跳过)")?;
                }
                InputEvent::SetVoice(v)
            }
            ReplCommand::Volume(v) => InputEvent::SetVolume(v),
            ReplCommand::Rate(v) => InputEvent::SetRate(v),
            ReplCommand::Pitch(v) => InputEvent::SetPitch(v),
            ReplCommand::Read => InputEvent::Read,
            ReplCommand::Clear => InputEvent::Clear,
            ReplCommand::Text(text) => {
                if let Err(e) = session.handle(InputEvent::Edit(text)) {
                    writeln!(out, "error: {e}")?;
                    continue;
                }
                InputEvent::Translate
            }
        };

        // 外部能力出错只影响本次操作，会话继续（重新输入即可重试）
        match session.handle(event) {
            Ok((state, actions)) => {
                for action in actions {
                    match action {
                        Action::Translated(s) => writeln!(out, "> {s}")?,
                        Action::ParamsChanged(p) => print_params(out, &p)?,
                    }
                }
                log::debug!("state: {state:?}");
            }
            Err(e) => writeln!(out, "error: {e}")?,
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use gnohznew_core::{
        speech::{SpeechRequest, VoiceCatalog},
        Engine, Result,
    };
    use gnohznew_pinyin::PinyinConverter;
    use gnohznew_segment::JiebaSegmenter;

    use super::*;

    #[derive(Clone, Default)]
    struct Recorder(Arc<Mutex<Vec<SpeechRequest>>>);

    impl Synthesizer for Recorder {
        fn voices(&self) -> Result<Vec<String>> {
            Ok(vec!["cmn".to_string()])
        }

        fn dispatch(&self, request: &SpeechRequest) {
            self.0.lock().unwrap().push(request.clone());
        }
    }

    #[test]
    fn parses_commands() {
        assert_eq!(parse_line(":q"), ReplCommand::Quit);
        assert_eq!(parse_line("  :voice  cmn "), ReplCommand::Voice("cmn".into()));
        assert_eq!(parse_line(":rate 2.5"), ReplCommand::Rate(2.5));
        assert!(matches!(parse_line(":rate 20"), ReplCommand::Invalid(_)));
        assert!(matches!(parse_line(":voice"), ReplCommand::Invalid(_)));
        assert!(matches!(parse_line(":nope"), ReplCommand::Invalid(_)));
        assert_eq!(parse_line("你好"), ReplCommand::Text("你好".into()));
    }

    #[test]
    fn text_keeps_surrounding_whitespace() {
        assert_eq!(parse_line(" 你好 \n"), ReplCommand::Text(" 你好 ".into()));
        assert_eq!(parse_line("你好\r\n"), ReplCommand::Text("你好".into()));
        assert_eq!(parse_line("::q"), ReplCommand::Text(":q".into()));
        assert_eq!(parse_line("::q\n"), ReplCommand::Text(":q".into()));
    }

    #[test]
    fn translates_and_reads() {
        let recorder = Recorder::default();
        let catalog = VoiceCatalog::enumerate(&recorder).unwrap();
        let engine = Engine::new(JiebaSegmenter::new(), PinyinConverter::new());
        let mut session = Session::new(engine, catalog, recorder.clone());

        let mut input = io::Cursor::new("你好世界\n:volume 0.5\n:read\n:voice xx\n:read\n:q\n");
        let mut out = Vec::new();
        repl(&mut session, &mut input, &mut out).unwrap();

        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("> oǎhǐn èijìhs"), "{printed}");
        assert!(printed.contains("不在音色列表中"), "{printed}");

        let sent = recorder.0.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].text, "oǎhǐn èijìhs");
        assert_eq!(sent[0].voice, "cmn");
        assert_eq!(sent[0].volume, 0.5);
    }
}
