use std::sync::{Mutex, OnceLock, PoisonError};

use crate::dictionary::{CodeTable, StrokeDictionary, TableLoader};
use crate::error::{ErbiError, ErbiResult};
use crate::expand::expand;
use crate::model::WordLibrary;
use crate::pinyin::PinyinProvider;
use crate::rule::{Positions, try_derive_word};

/// 词库转换使用的编码生成器接口。
pub trait WordCodeGenerator: Send + Sync {
    /// 单字默认码（码表第一个候选）。
    fn default_code_of_char(&self, ch: char) -> ErbiResult<String>;

    /// 单字全部候选码。
    fn code_of_char(&self, ch: char) -> ErbiResult<Vec<String>>;

    /// 由文本生成全部候选编码（拼音由拼音服务生成）；无法取码时返回 `None`。
    ///
    /// `char_code_split` 是逐字编码之间的分隔符，整词编码的方案可以忽略它。
    fn code_of_string(&self, word: &str, char_code_split: &str) -> Option<Vec<String>>;

    /// 由词库条目生成全部候选编码；条目自带拼音时优先使用。
    fn code_of_word_library(
        &self,
        entry: &WordLibrary,
        char_code_split: &str,
    ) -> Option<Vec<String>>;

    /// 是否一字一码。
    fn is_one_char_one_code(&self) -> bool;

    /// 是否一字多码。
    fn is_one_char_multi_code(&self) -> bool;

    /// 是否基于已有编码（拼音）生成。
    fn is_base_on_old_code(&self) -> bool;
}

/// 二笔编码生成器。
///
/// - 码表在第一次查询时通过 `TableLoader` 构建（基础码表 + 外部覆盖），只构建一次
/// - 构建完成后码表只读，可在多线程间共享查询
/// - 构建失败不会缓存，下次查询会重试
pub struct ErbiGenerator<L, P> {
    /// 码表来源（决定变体列与覆盖文件）
    loader: L,
    /// 拼音服务（词条没有拼音时使用）
    pinyin: P,
    /// 构建完成的码表
    table: OnceLock<CodeTable>,
    /// 保证只有一个线程执行构建
    init_lock: Mutex<()>,
}

impl<L, P> ErbiGenerator<L, P>
where
    L: TableLoader,
    P: PinyinProvider,
{
    pub fn new(loader: L, pinyin: P) -> Self {
        Self {
            loader,
            pinyin,
            table: OnceLock::new(),
            init_lock: Mutex::new(()),
        }
    }

    /// 获取码表；首次调用时构建。
    pub fn table(&self) -> ErbiResult<&CodeTable> {
        if let Some(table) = self.table.get() {
            return Ok(table);
        }
        let _guard = self.init_lock.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(table) = self.table.get() {
            return Ok(table);
        }
        let table = self.loader.load()?;
        tracing::debug!(entries = table.len(), "erbi code table ready");
        Ok(self.table.get_or_init(|| table))
    }

    /// 逐位候选片段（未展开）。
    pub fn derive(&self, word: &str, pinyin: &[String]) -> ErbiResult<Positions> {
        if word.chars().count() >= 4 {
            // 四字及以上不查码表
            return try_derive_word(&CodeTable::new(), word, pinyin);
        }
        try_derive_word(self.table()?, word, pinyin)
    }

    fn codes(&self, word: &str, pinyin: &[String]) -> Option<Vec<String>> {
        match self.derive(word, pinyin) {
            Ok(positions) => Some(expand(&positions)),
            Err(e) => {
                tracing::debug!(word = %word, error = %e, "no erbi code");
                None
            }
        }
    }

    fn pinyin_of(&self, word: &str) -> Option<Vec<String>> {
        match self.pinyin.pinyin_of(word) {
            Ok(pinyin) => Some(pinyin),
            Err(e) => {
                tracing::debug!(word = %word, error = %e, "pinyin service failed");
                None
            }
        }
    }
}

impl<L, P> WordCodeGenerator for ErbiGenerator<L, P>
where
    L: TableLoader,
    P: PinyinProvider,
{
    fn default_code_of_char(&self, ch: char) -> ErbiResult<String> {
        self.table()?
            .lookup(ch)?
            .first()
            .cloned()
            .ok_or(ErbiError::MissingEntry(ch))
    }

    fn code_of_char(&self, ch: char) -> ErbiResult<Vec<String>> {
        Ok(self.table()?.lookup(ch)?.to_vec())
    }

    // 二笔按整词取码，不使用逐字分隔符
    fn code_of_string(&self, word: &str, _char_code_split: &str) -> Option<Vec<String>> {
        if word.is_empty() {
            return None;
        }
        let pinyin = self.pinyin_of(word)?;
        self.codes(word, &pinyin)
    }

    fn code_of_word_library(
        &self,
        entry: &WordLibrary,
        _char_code_split: &str,
    ) -> Option<Vec<String>> {
        if entry.word.is_empty() {
            return None;
        }
        match entry.known_pinyin() {
            Some(pinyin) => self.codes(&entry.word, pinyin),
            None => {
                let pinyin = self.pinyin_of(&entry.word)?;
                self.codes(&entry.word, &pinyin)
            }
        }
    }

    fn is_one_char_one_code(&self) -> bool {
        false
    }

    fn is_one_char_multi_code(&self) -> bool {
        true
    }

    fn is_base_on_old_code(&self) -> bool {
        true
    }
}

/// 只持有已构建码表的加载器，用于测试或调用方自行构建码表的场景。
#[derive(Debug, Clone, Default)]
pub struct StaticTable(pub CodeTable);

impl TableLoader for StaticTable {
    fn load(&self) -> ErbiResult<CodeTable> {
        Ok(self.0.clone())
    }
}
