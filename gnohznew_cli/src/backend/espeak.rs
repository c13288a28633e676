//! espeak-ng 后端：每次朗读启动一个子进程，不等待其结束。
//!
//! 参数换算（朗读参数 -> espeak-ng 命令行）：
//! - `-a` 振幅 = volume * 100（0..=200）
//! - `-s` 语速 = 175 * rate 词/分钟（80..=450）
//! - `-p` 音高 = pitch * 50（0..=99）

use std::{
    process::{Child, Command, ExitStatus, Stdio},
    sync::Mutex,
    thread,
};

use gnohznew_core::{
    speech::{SpeechRequest, Synthesizer},
    Error, Result,
};
use log::{debug, warn};

const NORMAL_WPM: f32 = 175.0;

pub struct EspeakSynthesizer {
    program: String,
    interrupt: bool,
    /// interrupt 模式下最近一次启动的进程
    current: Mutex<Option<Child>>,
}

impl EspeakSynthesizer {
    pub fn new(program: impl Into<String>, interrupt: bool) -> Self {
        Self {
            program: program.into(),
            interrupt,
            current: Mutex::new(None),
        }
    }

    fn spawn(&self, request: &SpeechRequest) -> std::io::Result<Child> {
        Command::new(&self.program)
            .args(espeak_args(request))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
    }
}

impl Synthesizer for EspeakSynthesizer {
    fn voices(&self) -> Result<Vec<String>> {
        let out = Command::new(&self.program).arg("--voices").output()?;
        if !out.status.success() {
            return Err(Error::Synthesis(format!(
                "{} --voices exited with {}",
                self.program, out.status
            )));
        }
        Ok(parse_voice_list(&String::from_utf8_lossy(&out.stdout)))
    }

    fn dispatch(&self, request: &SpeechRequest) {
        if !self.interrupt {
            match self.spawn(request) {
                // 单独的线程负责回收子进程
                Ok(mut child) => {
                    thread::spawn(move || {
                        if let Err(e) = child.wait() {
                            warn!("espeak wait failed: {e}");
                        }
                    });
                }
                Err(e) => warn!("failed to start {}: {e}", self.program),
            }
            return;
        }

        let mut slot = match self.current.lock() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(prev) = slot.take() {
            stop(prev);
        }
        match self.spawn(request) {
            Ok(child) => *slot = Some(child),
            Err(e) => warn!("failed to start {}: {e}", self.program),
        }
    }
}

/// 结束上一段朗读并回收进程；已自行退出的进程不再 kill。
fn stop(mut child: Child) -> Option<ExitStatus> {
    match child.try_wait() {
        Ok(Some(status)) => return Some(status),
        Ok(None) => {}
        Err(e) => debug!("espeak try_wait failed (pid {}): {e}", child.id()),
    }
    debug!("interrupting previous utterance (pid {})", child.id());
    if let Err(e) = child.kill() {
        debug!("espeak kill failed (pid {}): {e}", child.id());
    }
    match child.wait() {
        Ok(status) => Some(status),
        Err(e) => {
            debug!("espeak wait failed (pid {}): {e}", child.id());
            None
        }
    }
}

/// 把请求换算成 espeak-ng 的命令行参数（文本放在 `--` 之后）。
pub fn espeak_args(request: &SpeechRequest) -> Vec<String> {
    let amplitude = (request.volume * 100.0).round().clamp(0.0, 200.0) as u32;
    let speed = (request.rate * NORMAL_WPM).round().clamp(80.0, 450.0) as u32;
    let pitch = (request.pitch * 50.0).round().clamp(0.0, 99.0) as u32;
    vec![
        "-v".to_string(),
        request.voice.clone(),
        "-a".to_string(),
        amplitude.to_string(),
        "-s".to_string(),
        speed.to_string(),
        "-p".to_string(),
        pitch.to_string(),
        "--".to_string(),
        request.text.clone(),
    ]
}

/// 解析 `espeak-ng --voices` 的输出，取 Language 列作为音色标识。
pub fn parse_voice_list(s: &str) -> Vec<String> {
    s.lines()
        .skip_while(|l| !l.trim_start().starts_with("Pty"))
        .skip(1)
        .filter_map(|l| l.split_whitespace().nth(1))
        .map(str::to_string)
        .collect()
}
