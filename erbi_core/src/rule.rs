//! `rule`：按词长把一个词拆成逐位的候选片段。
//!
//! 取码规则：
//! - 单字：拼音首字母 + 每个笔形码的首码
//! - 二字词：两个字各按单字取码
//! - 三字词：第一字按单字取码，后两字各取拼音首字母
//! - 四字及以上：取前三字和末字的拼音首字母（不查码表）
//!
//! 三字及以上只保留第一字的一字多码，其余位置退化为单一字母。

use crate::dictionary::StrokeDictionary;
use crate::error::{ErbiError, ErbiResult};

/// 逐位候选片段：外层是位置，内层是该位置的候选（有序）。
pub type Positions = Vec<Vec<String>>;

/// 单字取码：`拼音首字母 + 笔形码首码`，顺序与码表候选一致。
pub fn derive_char<D>(dict: &D, ch: char, syllable: &str) -> ErbiResult<Vec<String>>
where
    D: StrokeDictionary + ?Sized,
{
    let initial = first_letter(syllable)?;
    let codes = dict.lookup(ch)?;
    let mut out = Vec::with_capacity(codes.len());
    for code in codes {
        let Some(stroke) = code.chars().next() else {
            return Err(ErbiError::MissingEntry(ch));
        };
        let mut fragment = String::with_capacity(initial.len_utf8() + stroke.len_utf8());
        fragment.push(initial);
        fragment.push(stroke);
        out.push(fragment);
    }
    Ok(out)
}

/// 按词长取码，任何一步失败都放弃整个词（不返回部分结果）。
pub fn try_derive_word<D, S>(dict: &D, word: &str, pinyin: &[S]) -> ErbiResult<Positions>
where
    D: StrokeDictionary + ?Sized,
    S: AsRef<str>,
{
    let chars: Vec<char> = word.chars().collect();
    if chars.is_empty() {
        return Err(ErbiError::MalformedInput("empty word".to_string()));
    }
    let positions = match chars.len() {
        1 => vec![derive_char(dict, chars[0], syllable_at(word, pinyin, 0)?)?],
        2 => vec![
            derive_char(dict, chars[0], syllable_at(word, pinyin, 0)?)?,
            derive_char(dict, chars[1], syllable_at(word, pinyin, 1)?)?,
        ],
        3 => vec![
            derive_char(dict, chars[0], syllable_at(word, pinyin, 0)?)?,
            vec![letter_at(word, pinyin, 1)?.to_string()],
            vec![letter_at(word, pinyin, 2)?.to_string()],
        ],
        n => {
            let mut code = String::with_capacity(4);
            for i in [0, 1, 2, n - 1] {
                code.push(letter_at(word, pinyin, i)?);
            }
            vec![vec![code]]
        }
    };
    Ok(positions)
}

/// `try_derive_word` 的边界版本：失败记录 debug 日志并返回 `None`。
pub fn derive_word<D, S>(dict: &D, word: &str, pinyin: &[S]) -> Option<Positions>
where
    D: StrokeDictionary + ?Sized,
    S: AsRef<str>,
{
    match try_derive_word(dict, word, pinyin) {
        Ok(positions) => Some(positions),
        Err(e) => {
            tracing::debug!(word = %word, error = %e, "erbi derivation aborted");
            None
        }
    }
}

fn syllable_at<'a, S: AsRef<str>>(word: &str, pinyin: &'a [S], i: usize) -> ErbiResult<&'a str> {
    pinyin.get(i).map(|s| s.as_ref()).ok_or_else(|| {
        ErbiError::MalformedInput(format!(
            "'{word}' needs pinyin #{i}, got {} syllable(s)",
            pinyin.len()
        ))
    })
}

fn letter_at<S: AsRef<str>>(word: &str, pinyin: &[S], i: usize) -> ErbiResult<char> {
    first_letter(syllable_at(word, pinyin, i)?)
}

fn first_letter(syllable: &str) -> ErbiResult<char> {
    syllable
        .chars()
        .next()
        .ok_or_else(|| ErbiError::MalformedInput("empty pinyin syllable".to_string()))
}
