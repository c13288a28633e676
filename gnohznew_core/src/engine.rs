use log::{debug, trace};

use crate::error::Result;
use crate::model::TokenTrace;
use crate::phonetic::PhoneticConverter;
use crate::segmenter::Segmenter;
use crate::transform::reverse_romanization;

/// token 之间的连接符（与原文是否有空白无关）。
pub const TOKEN_SEPARATOR: &str = " ";

/// 引擎：编排 切分 -> 注音 -> 反转 -> 拼接。
///
/// 整个流程同步执行、一次完成，没有中间提交：任何一步出错都直接向上返回，
/// 不产生部分结果。
pub struct Engine<S, P> {
    /// 切分器（jieba 或其他实现）
    segmenter: S,
    /// 注音器（pinyin 或其他实现）
    converter: P,
}

impl<S, P> Engine<S, P>
where
    S: Segmenter,
    P: PhoneticConverter,
{
    pub fn new(segmenter: S, converter: P) -> Self {
        Self {
            segmenter,
            converter,
        }
    }

    pub fn segmenter(&self) -> &S {
        &self.segmenter
    }

    pub fn converter(&self) -> &P {
        &self.converter
    }

    /// 单个 token：注音、拼接、整串反转。空 token 得到空串。
    pub fn transform(&self, token: &str) -> Result<String> {
        if token.is_empty() {
            return Ok(String::new());
        }
        let syllables = self.converter.convert(token)?;
        let reversed = reverse_romanization(&syllables);
        trace!("transform {token:?} -> {syllables:?} -> {reversed:?}");
        Ok(reversed)
    }

    /// 整段输入：切分后逐个 transform，按原顺序用单个空格拼接。
    pub fn orchestrate(&self, input: &str) -> Result<String> {
        let tokens = self.segmenter.segment(input)?;
        debug!("segmented {} chars into {} tokens", input.chars().count(), tokens.len());
        let out = tokens
            .iter()
            .map(|t| self.transform(t))
            .collect::<Result<Vec<String>>>()?;
        Ok(out.join(TOKEN_SEPARATOR))
    }

    /// 与 `orchestrate` 相同的流程，但保留每个 token 的中间结果。
    pub fn explain(&self, input: &str) -> Result<Vec<TokenTrace>> {
        let tokens = self.segmenter.segment(input)?;
        let mut traces = Vec::with_capacity(tokens.len());
        for token in tokens {
            let syllables = if token.is_empty() {
                Vec::new()
            } else {
                self.converter.convert(&token)?
            };
            let reversed = reverse_romanization(&syllables);
            traces.push(TokenTrace {
                token,
                syllables,
                reversed,
            });
        }
        Ok(traces)
    }
}

impl<S, P> crate::processor::EngineFacade for Engine<S, P>
where
    S: Segmenter,
    P: PhoneticConverter,
{
    fn orchestrate(&self, input: &str) -> Result<String> {
        Engine::<S, P>::orchestrate(self, input)
    }
}
