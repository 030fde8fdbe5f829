//! 二笔生成器配置
//!
//! 从 TOML 文件加载，例如：
//!
//! ```toml
//! variant = "qingsong"
//! table_path = "erbi.tsv"
//! override_path = "mb.txt"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::dictionary::Variant;
use crate::error::{ErbiError, ErbiResult};

/// 默认的外部覆盖码表文件名
pub const DEFAULT_OVERRIDE_FILE: &str = "mb.txt";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErbiConfig {
    /// 使用的编码列
    pub variant: Variant,
    /// 基础码表文件；为空时使用内置码表
    pub table_path: Option<PathBuf>,
    /// 外部覆盖码表；文件不存在时忽略
    pub override_path: Option<PathBuf>,
}

impl Default for ErbiConfig {
    fn default() -> Self {
        Self {
            variant: Variant::default(),
            table_path: None,
            override_path: Some(PathBuf::from(DEFAULT_OVERRIDE_FILE)),
        }
    }
}

impl ErbiConfig {
    /// 加载配置文件；文件不存在时使用默认配置。
    pub fn load(path: impl AsRef<Path>) -> ErbiResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::info!("配置文件不存在，使用默认配置: {:?}", path);
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content).map_err(|e| match e {
            ErbiError::ConfigParse { reason, .. } => ErbiError::ConfigParse {
                path: path.display().to_string(),
                reason,
            },
            other => other,
        })?;
        tracing::info!(variant = %config.variant, "加载配置成功: {:?}", path);
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> ErbiResult<Self> {
        toml::from_str(content).map_err(|e| ErbiError::ConfigParse {
            path: "<string>".to_string(),
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults() {
        let config = ErbiConfig::default();
        assert_eq!(config.variant, Variant::Modern);
        assert_eq!(config.override_path, Some(PathBuf::from("mb.txt")));
        assert!(config.table_path.is_none());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = ErbiConfig::from_toml_str("variant = \"chaoqiang\"\n").unwrap();
        assert_eq!(config.variant, Variant::Chaoqiang);
        assert_eq!(config.override_path, Some(PathBuf::from("mb.txt")));
    }

    #[test]
    fn unknown_variant_is_parse_error() {
        let err = ErbiConfig::from_toml_str("variant = \"wubi\"\n").unwrap_err();
        assert!(matches!(err, ErbiError::ConfigParse { .. }));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "variant = \"yinxing\"").unwrap();
        writeln!(file, "table_path = \"/tmp/erbi.tsv\"").unwrap();
        let config = ErbiConfig::load(file.path()).unwrap();
        assert_eq!(config.variant, Variant::Yinxing);
        assert_eq!(config.table_path, Some(PathBuf::from("/tmp/erbi.tsv")));
    }

    #[test]
    fn load_reports_path_on_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "variant = [").unwrap();
        match ErbiConfig::load(file.path()) {
            Err(ErbiError::ConfigParse { path, .. }) => {
                assert_eq!(path, file.path().display().to_string())
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ErbiConfig::load(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, ErbiConfig::default());
    }
}
