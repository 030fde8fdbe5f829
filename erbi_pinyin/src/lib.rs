//! 拼音服务：逐字查表生成拼音（一字一个音节，多音字取最常用读音）。

use erbi_core::{ErbiError, ErbiResult, PinyinProvider};

include!(concat!(env!("OUT_DIR"), "/pinyin_gen.rs"));

#[derive(Debug, Clone, Copy)]
pub struct TablePinyin {
    table: &'static [(char, &'static str)],
}

impl Default for TablePinyin {
    fn default() -> Self {
        Self { table: PINYIN_TABLE }
    }
}

impl TablePinyin {
    pub fn new() -> Self {
        Self::default()
    }

    /// 单字读音。
    pub fn reading(&self, ch: char) -> Option<&'static str> {
        self.table
            .binary_search_by_key(&ch, |(c, _)| *c)
            .ok()
            .map(|i| self.table[i].1)
    }
}

impl PinyinProvider for TablePinyin {
    fn pinyin_of(&self, text: &str) -> ErbiResult<Vec<String>> {
        text.chars()
            .map(|ch| {
                self.reading(ch)
                    .map(str::to_string)
                    .ok_or_else(|| ErbiError::Pinyin {
                        text: text.to_string(),
                        reason: format!("no reading for '{ch}'"),
                    })
            })
            .collect()
    }
}

/// 解析用户提供的拼音串：音节之间用空格、`'` 或 `,` 分隔，统一转小写。
///
/// 例如 `ji'suan` / `ji suan` -> `["ji", "suan"]`。
pub fn parse_pinyin_field(s: &str) -> Vec<String> {
    s.split(|c: char| c.is_whitespace() || c == '\'' || c == ',')
        .filter(|p| !p.is_empty())
        .map(str::to_ascii_lowercase)
        .collect()
}
