use std::{fs, io, path::Path};

use gnohznew_core::{segmenter::Segmenter, Result};
use jieba_rs::Jieba;
use log::debug;

/// 基于 jieba 的中文分词。
///
/// `cut` 的结果首尾拼接等于原文（空白、标点各自成 token）。
pub struct JiebaSegmenter {
    jieba: Jieba,
    /// 是否用 HMM 识别词典外的新词
    hmm: bool,
}

impl Default for JiebaSegmenter {
    fn default() -> Self {
        Self {
            jieba: Jieba::new(),
            hmm: true,
        }
    }
}

impl JiebaSegmenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hmm(mut self, enabled: bool) -> Self {
        self.hmm = enabled;
        self
    }

    /// 从文件加载用户词典，见 [`JiebaSegmenter::load_user_dict_str`]。
    pub fn load_user_dict(&mut self, path: impl AsRef<Path>) -> io::Result<usize> {
        let s = fs::read_to_string(path)?;
        self.load_user_dict_str(&s)
    }

    /// 用户词典格式（简化版）：
    ///
    /// - `word<TAB>freq<TAB>tag`
    /// - freq / tag 可省略；freq 省略时由 jieba 自行估算
    /// - 允许 `#` 开头注释行与空行
    ///
    /// 先解析全部行，全部合法后才写入 jieba；任一行出错时词典保持不变。
    ///
    /// 返回加入的词条数。
    pub fn load_user_dict_str(&mut self, s: &str) -> io::Result<usize> {
        let entries = parse_user_dict(s)?;
        for (word, freq, tag) in &entries {
            self.jieba.add_word(word, *freq, *tag);
        }
        debug!("loaded {} user dict entries", entries.len());
        Ok(entries.len())
    }
}

type UserDictEntry<'a> = (&'a str, Option<usize>, Option<&'a str>);

fn parse_user_dict(s: &str) -> io::Result<Vec<UserDictEntry<'_>>> {
    let mut entries = Vec::new();
    for (idx, line) in s.lines().enumerate() {
        // 只去掉行尾空白：行首的 TAB 意味着缺少 word
        let line = line.trim_end();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut it = line.split('\t');
        let word = it.next().unwrap_or("").trim();
        if word.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("user dict line {} has no word", idx + 1),
            ));
        }
        let freq = it
            .next()
            .map(str::trim)
            .filter(|x| !x.is_empty())
            .map(|x| {
                x.parse::<usize>().map_err(|e| {
                    io::Error::new(
                        io::ErrorKind::InvalidData,
                        format!("user dict line {}: bad freq {x:?}: {e}", idx + 1),
                    )
                })
            })
            .transpose()?;
        let tag = it.next().map(str::trim).filter(|x| !x.is_empty());
        entries.push((word, freq, tag));
    }
    Ok(entries)
}

impl Segmenter for JiebaSegmenter {
    fn segment(&self, text: &str) -> Result<Vec<String>> {
        Ok(self
            .jieba
            .cut(text, self.hmm)
            .into_iter()
            .map(str::to_string)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn splits_words_in_order() {
        let seg = JiebaSegmenter::new();
        assert_eq!(seg.segment("你好世界").unwrap(), vec!["你好", "世界"]);
    }

    #[test]
    fn tokens_reconstruct_input() {
        let seg = JiebaSegmenter::new();
        for input in ["我们中出了一个叛徒", "今天 天气，不错！", "hello 世界 123", ""] {
            let tokens = seg.segment(input).unwrap();
            assert_eq!(tokens.concat(), input);
            assert!(tokens.iter().all(|t| !t.is_empty()));
        }
    }

    #[test]
    fn empty_input_gives_no_tokens() {
        assert!(JiebaSegmenter::new().segment("").unwrap().is_empty());
    }

    #[test]
    fn user_dict_adds_words() {
        let mut seg = JiebaSegmenter::new().hmm(false);
        let n = seg
            .load_user_dict_str("# comment\n\n文中反\t100000\tn\n倒着念\n")
            .unwrap();
        assert_eq!(n, 2);
        let tokens = seg.segment("文中反").unwrap();
        assert_eq!(tokens, vec!["文中反"]);
    }

    #[test]
    fn user_dict_errors_name_the_line() {
        let mut seg = JiebaSegmenter::new();
        let err = seg.load_user_dict_str("好\n\tx\n").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        assert!(err.to_string().contains("line 2"), "{err}");

        let err = seg.load_user_dict_str("好\tmany\n").unwrap_err();
        assert!(err.to_string().contains("bad freq"), "{err}");
    }

    #[test]
    fn failed_user_dict_load_adds_nothing() {
        let mut seg = JiebaSegmenter::new().hmm(false);
        assert!(seg.load_user_dict_str("文中反\t100000\n\tx\n").is_err());
        assert_ne!(seg.segment("文中反").unwrap(), vec!["文中反"]);

        assert_eq!(seg.load_user_dict_str("文中反\t100000\n").unwrap(), 1);
        assert_eq!(seg.segment("文中反").unwrap(), vec!["文中反"]);
    }

    #[test]
    fn user_dict_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "倒着念\t50000").unwrap();
        let mut seg = JiebaSegmenter::new();
        assert_eq!(seg.load_user_dict(file.path()).unwrap(), 1);
    }
}
