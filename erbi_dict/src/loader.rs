use std::{fs, path::PathBuf};

use erbi_core::{CodeTable, ErbiConfig, ErbiResult, TableLoader, Variant};

use crate::{EMBEDDED_TABLE, build_table, read_optional, strip_bom};

/// 基础码表来源。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BaseSource {
    /// 随程序编译进来的内置码表
    Embedded,
    /// 外部码表文件（必须存在）
    File(PathBuf),
}

/// TSV 码表加载器：基础码表按变体取列，然后应用外部覆盖文件。
///
/// 加载发生在 `ErbiGenerator` 第一次查询时；覆盖文件不存在视为没有覆盖。
#[derive(Debug, Clone)]
pub struct TsvTableLoader {
    variant: Variant,
    base: BaseSource,
    override_path: Option<PathBuf>,
}

impl TsvTableLoader {
    /// 内置码表，不带覆盖。
    pub fn embedded(variant: Variant) -> Self {
        Self {
            variant,
            base: BaseSource::Embedded,
            override_path: None,
        }
    }

    pub fn from_config(config: &ErbiConfig) -> Self {
        Self {
            variant: config.variant,
            base: match &config.table_path {
                Some(path) => BaseSource::File(path.clone()),
                None => BaseSource::Embedded,
            },
            override_path: config.override_path.clone(),
        }
    }

    pub fn base(mut self, base: BaseSource) -> Self {
        self.base = base;
        self
    }

    pub fn override_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.override_path = Some(path.into());
        self
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// 读取覆盖文件；读失败（非“不存在”）时记录警告并忽略覆盖。
    fn read_overrides(&self) -> Option<String> {
        let path = self.override_path.as_ref()?;
        match read_optional(path) {
            Ok(text) if text.is_empty() => None,
            Ok(text) => {
                tracing::info!("应用外部码表覆盖: {:?}", path);
                Some(text)
            }
            Err(e) => {
                tracing::warn!(error = %e, "无法读取覆盖码表 {:?}，忽略", path);
                None
            }
        }
    }
}

impl TableLoader for TsvTableLoader {
    fn load(&self) -> ErbiResult<CodeTable> {
        let overrides = self.read_overrides();
        let table = match &self.base {
            BaseSource::Embedded => {
                build_table(EMBEDDED_TABLE, self.variant, overrides.as_deref())
            }
            BaseSource::File(path) => {
                let text = fs::read_to_string(path)?;
                build_table(strip_bom(&text), self.variant, overrides.as_deref())
            }
        };
        Ok(table)
    }
}
