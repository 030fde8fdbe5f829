/// 词库条目中编码的类型。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CodeType {
    /// 编码是逐字拼音，可直接用作取码依据
    Pinyin,
    /// 其他编码（或未知），需要重新生成拼音
    #[default]
    Other,
}

/// 词库中的一个词条（由导入/转换流程构造，core 只读）。
#[derive(Debug, Clone, Default)]
pub struct WordLibrary {
    /// 词文本
    pub word: String,
    /// 已有编码的类型
    pub code_type: CodeType,
    /// 逐字拼音；仅当 `code_type == Pinyin` 时有意义
    pub pinyin: Vec<String>,
}

impl WordLibrary {
    pub fn new(word: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            ..Self::default()
        }
    }

    /// 带拼音的词条（`CodeType::Pinyin`）。
    pub fn with_pinyin<I, S>(word: impl Into<String>, pinyin: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            word: word.into(),
            code_type: CodeType::Pinyin,
            pinyin: pinyin.into_iter().map(Into::into).collect(),
        }
    }

    /// 可直接使用的已知拼音。
    pub fn known_pinyin(&self) -> Option<&[String]> {
        (self.code_type == CodeType::Pinyin).then_some(self.pinyin.as_slice())
    }
}
