//! 注音（pinyin）：把 token 转成每字一个音节的拼音序列。
//!
//! 汉字取最常用读音；其余字符（字母、数字、标点、空白）原样透传，
//! 仍然各占一个位置，参与后续的整串反转。
//!
//! 读音按单字查表，不看上下文：多音字在词中也取默认读音
//! （`银行` 得到 `yín xíng` 而不是 `yín háng`）。

use gnohznew_core::{phonetic::PhoneticConverter, Result};
use pinyin::ToPinyin;
use serde::{Deserialize, Serialize};

/// 声调的表示方式。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToneStyle {
    /// 声调符号标在元音上：`nǐ`
    #[default]
    Mark,
    /// 数字放在音节末尾：`ni3`
    Number,
    /// 不带声调：`ni`
    None,
}

impl std::str::FromStr for ToneStyle {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mark" => Ok(Self::Mark),
            "number" => Ok(Self::Number),
            "none" => Ok(Self::None),
            other => Err(format!("unknown tone style: {other} (expected mark/number/none)")),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PinyinConverter {
    tone: ToneStyle,
}

impl PinyinConverter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tone_style(mut self, tone: ToneStyle) -> Self {
        self.tone = tone;
        self
    }

    fn syllable(&self, ch: char) -> String {
        match ch.to_pinyin() {
            Some(p) => match self.tone {
                ToneStyle::Mark => p.with_tone(),
                ToneStyle::Number => p.with_tone_num_end(),
                ToneStyle::None => p.plain(),
            }
            .to_string(),
            None => ch.to_string(),
        }
    }
}

impl PhoneticConverter for PinyinConverter {
    fn convert(&self, text: &str) -> Result<Vec<String>> {
        Ok(text.chars().map(|ch| self.syllable(ch)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gnohznew_core::transform::reverse_romanization;

    #[test]
    fn marks_tones_with_diacritics() {
        let conv = PinyinConverter::new();
        assert_eq!(conv.convert("你好").unwrap(), vec!["nǐ", "hǎo"]);
        assert_eq!(conv.convert("世界").unwrap(), vec!["shì", "jiè"]);
    }

    #[test]
    fn one_entry_per_character_with_passthrough() {
        let conv = PinyinConverter::new();
        let out = conv.convert("好a1，").unwrap();
        assert_eq!(out, vec!["hǎo", "a", "1", "，"]);
        assert!(conv.convert("").unwrap().is_empty());
    }

    #[test]
    fn other_tone_styles() {
        let number = PinyinConverter::new().tone_style(ToneStyle::Number);
        assert_eq!(number.convert("你好").unwrap(), vec!["ni3", "hao3"]);
        let plain = PinyinConverter::new().tone_style(ToneStyle::None);
        assert_eq!(plain.convert("你好").unwrap(), vec!["ni", "hao"]);
    }

    #[test]
    fn reversed_romanization_of_real_pinyin() {
        let conv = PinyinConverter::new();
        let syllables = conv.convert("你好").unwrap();
        assert_eq!(reverse_romanization(&syllables), "oǎhǐn");
    }

    #[test]
    fn parses_tone_style() {
        assert_eq!("Mark".parse::<ToneStyle>().unwrap(), ToneStyle::Mark);
        assert_eq!("number".parse::<ToneStyle>().unwrap(), ToneStyle::Number);
        assert_eq!("none".parse::<ToneStyle>().unwrap(), ToneStyle::None);
        assert!("symbol".parse::<ToneStyle>().is_err());
    }

    #[test]
    fn readings_ignore_word_context() {
        let conv = PinyinConverter::new();
        let word = conv.convert("银行").unwrap();
        let mut by_char = conv.convert("银").unwrap();
        by_char.extend(conv.convert("行").unwrap());
        assert_eq!(word, by_char);
    }
}
