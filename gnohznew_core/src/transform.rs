//! `transform`：单个 token 的变换（音节拼接 + 整串反转）。

/// 把音节序列首尾拼接（无分隔符），再把整串按字符逆序。
///
/// 反转跨越音节边界，不是逐音节反转：`["nǐ","hǎo"]` -> `"oǎhǐn"`。
pub fn reverse_romanization<S: AsRef<str>>(syllables: &[S]) -> String {
    let joined: String = syllables.iter().map(AsRef::as_ref).collect();
    joined.chars().rev().collect()
}
