use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ErbiError, ErbiResult};

/// 笔形码查询抽象：core 不关心码表来自内置资源、文件还是内存。
///
/// 约定：
/// - 返回的候选列表非空，顺序即优先级，第一个为“默认码”
/// - 字不在码表中时返回 `ErbiError::MissingEntry`
pub trait StrokeDictionary: Send + Sync {
    fn lookup(&self, ch: char) -> ErbiResult<&[String]>;
}

/// 码表加载器：由 generator 在第一次查询时调用，且只成功调用一次。
pub trait TableLoader: Send + Sync {
    fn load(&self) -> ErbiResult<CodeTable>;
}

/// 码表所用的编码列。
///
/// 内置码表每行：`词<TAB>现代二笔<TAB>音形<TAB>超强二笔<TAB>青松二笔`，
/// 变体在构造 generator 时选定，之后不再切换。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// 现代二笔
    #[default]
    Modern,
    /// 音形
    Yinxing,
    /// 超强二笔
    Chaoqiang,
    /// 青松二笔
    Qingsong,
}

impl Variant {
    pub const ALL: [Variant; 4] = [
        Variant::Modern,
        Variant::Yinxing,
        Variant::Chaoqiang,
        Variant::Qingsong,
    ];

    /// 该变体在码表中的列号（第 0 列是词本身）。
    pub fn column(self) -> usize {
        match self {
            Variant::Modern => 1,
            Variant::Yinxing => 2,
            Variant::Chaoqiang => 3,
            Variant::Qingsong => 4,
        }
    }

    /// 所选列为空时回退到的列。
    pub fn fallback_column(self) -> usize {
        1
    }

    pub fn name(self) -> &'static str {
        match self {
            Variant::Modern => "modern",
            Variant::Yinxing => "yinxing",
            Variant::Chaoqiang => "chaoqiang",
            Variant::Qingsong => "qingsong",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Variant {
    type Err = ErbiError;

    /// 接受小写名称或列号（`modern` / `1`）。
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Variant::ALL
            .into_iter()
            .find(|v| v.name().eq_ignore_ascii_case(s) || v.column().to_string() == s)
            .ok_or_else(|| ErbiError::UnknownVariant(s.to_string()))
    }
}

/// 单字 -> 笔形码候选（一字多码）。
///
/// 由加载器构建后交给 generator 持有；构建完成前不对外提供查询。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTable {
    map: HashMap<char, Vec<String>>,
}

impl CodeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// 写入（或整体替换）一个字的候选码；空列表不写入，返回是否写入。
    pub fn replace(&mut self, ch: char, codes: Vec<String>) -> bool {
        if codes.is_empty() {
            return false;
        }
        self.map.insert(ch, codes);
        true
    }

    pub fn get(&self, ch: char) -> Option<&[String]> {
        self.map.get(&ch).map(Vec::as_slice)
    }

    pub fn contains(&self, ch: char) -> bool {
        self.map.contains_key(&ch)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl StrokeDictionary for CodeTable {
    fn lookup(&self, ch: char) -> ErbiResult<&[String]> {
        self.get(ch).ok_or(ErbiError::MissingEntry(ch))
    }
}

impl FromIterator<(char, Vec<String>)> for CodeTable {
    fn from_iter<I: IntoIterator<Item = (char, Vec<String>)>>(iter: I) -> Self {
        let mut table = CodeTable::new();
        for (ch, codes) in iter {
            table.replace(ch, codes);
        }
        table
    }
}
