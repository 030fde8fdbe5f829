use std::{fs, io, path::Path};

use erbi_core::{CodeTable, Variant};

mod loader;

pub use loader::{BaseSource, TsvTableLoader};

/// 内置码表（每行：`词<TAB>现代二笔<TAB>音形<TAB>超强二笔<TAB>青松二笔`，CRLF 换行）
pub const EMBEDDED_TABLE: &str = include_str!("../asset/erbi.tsv");

/// 码表 TSV 格式：
///
/// - 第 0 列是词，取其第一个字作为 key
/// - 第 N 列是变体对应的编码；为空时回退到第 1 列
/// - 一个编码格内可有多个候选，用空格分隔，顺序即优先级
/// - 第 0 列为空的行直接跳过
///
/// 行尾兼容 `\r\n` 与 `\n`。
pub fn parse_base_table(text: &str, variant: Variant) -> CodeTable {
    let text = strip_bom(text);
    let mut table = CodeTable::new();
    let mut skipped = 0usize;
    for line in text.lines() {
        let cells: Vec<&str> = line.split('\t').collect();
        let Some(key) = key_of(&cells) else {
            skipped += 1;
            continue;
        };
        let code = match cells.get(variant.column()) {
            Some(code) if !code.is_empty() => *code,
            _ => cells.get(variant.fallback_column()).copied().unwrap_or(""),
        };
        if !table.replace(key, split_codes(code)) {
            skipped += 1;
        }
    }
    if skipped > 0 {
        tracing::debug!(skipped, "skipped malformed erbi rows");
    }
    table
}

/// 覆盖码表：格式同上，只用第 1 列。每条记录整体替换该字原有的候选（不合并）。
///
/// 返回实际覆盖的字数。
pub fn apply_override(table: &mut CodeTable, text: &str) -> usize {
    let text = strip_bom(text);
    let mut applied = 0usize;
    for line in text.lines() {
        let cells: Vec<&str> = line.split('\t').collect();
        let Some(key) = key_of(&cells) else {
            continue;
        };
        let code = cells.get(1).copied().unwrap_or("");
        if table.replace(key, split_codes(code)) {
            applied += 1;
        } else {
            tracing::debug!(%key, "override row has no code, ignored");
        }
    }
    applied
}

/// 基础码表 + 覆盖，两步构建一个完整的码表。
pub fn build_table(base: &str, variant: Variant, overrides: Option<&str>) -> CodeTable {
    let mut table = parse_base_table(base, variant);
    let base_len = table.len();
    let applied = overrides.map_or(0, |text| apply_override(&mut table, text));
    tracing::info!(
        %variant,
        entries = base_len,
        overrides = applied,
        "erbi code table built"
    );
    table
}

/// 读取可选文件：文件不存在时返回空串（而不是错误）；去掉开头的 BOM。
pub fn read_optional(path: impl AsRef<Path>) -> io::Result<String> {
    match fs::read_to_string(path) {
        Ok(s) => Ok(match s.strip_prefix('\u{feff}') {
            Some(rest) => rest.to_string(),
            None => s,
        }),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(String::new()),
        Err(e) => Err(e),
    }
}

/// 记事本等编辑器保存的 UTF-8 文件开头带 BOM。
pub(crate) fn strip_bom(text: &str) -> &str {
    text.strip_prefix('\u{feff}').unwrap_or(text)
}

fn key_of(cells: &[&str]) -> Option<char> {
    cells.first().and_then(|word| word.chars().next())
}

fn split_codes(cell: &str) -> Vec<String> {
    cell.split(' ')
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use erbi_core::{ErbiError, StrokeDictionary};

    const BASE: &str = "计\tpk pd\tjp\t\tjk\r\n算\tqd\tsq\tqx\t\r\n\t\t\t\t\r\n\r\n兴奋\tib\tx\tib\tia\r\n";

    #[test]
    fn selects_variant_column() {
        let table = parse_base_table(BASE, Variant::Qingsong);
        assert_eq!(table.lookup('计').unwrap(), ["jk"]);
        assert_eq!(table.lookup('兴').unwrap(), ["ia"]);
    }

    #[test]
    fn empty_cell_falls_back_to_first_code_column() {
        let table = parse_base_table(BASE, Variant::Chaoqiang);
        assert_eq!(table.lookup('计').unwrap(), ["pk", "pd"]);
        assert_eq!(table.lookup('算').unwrap(), ["qx"]);
        let table = parse_base_table(BASE, Variant::Qingsong);
        assert_eq!(table.lookup('算').unwrap(), ["qd"]);
    }

    #[test]
    fn multiple_codes_keep_order() {
        let table = parse_base_table(BASE, Variant::Modern);
        assert_eq!(table.lookup('计').unwrap(), ["pk", "pd"]);
    }

    #[test]
    fn key_is_first_char_of_word() {
        let table = parse_base_table(BASE, Variant::Modern);
        assert!(table.contains('兴'));
        assert!(!table.contains('奋'));
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn blank_and_short_rows_are_skipped() {
        let table = parse_base_table("\t\r\n人\r\n大\tdd\r\n", Variant::Yinxing);
        assert_eq!(table.len(), 1);
        assert!(matches!(table.lookup('人'), Err(ErbiError::MissingEntry('人'))));
        assert_eq!(table.lookup('大').unwrap(), ["dd"]);
    }

    #[test]
    fn lf_only_lines_are_accepted() {
        let table = parse_base_table("计\tpk\n算\tqd\n", Variant::Modern);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn double_spaces_do_not_create_empty_codes() {
        let table = parse_base_table("计\tpk  pd \r\n", Variant::Modern);
        assert_eq!(table.lookup('计').unwrap(), ["pk", "pd"]);
    }

    #[test]
    fn override_replaces_whole_entry() {
        let mut table = parse_base_table(BASE, Variant::Modern);
        let applied = apply_override(&mut table, "计\tzz\r\n");
        assert_eq!(applied, 1);
        assert_eq!(table.lookup('计').unwrap(), ["zz"]);
        assert_eq!(table.lookup('算').unwrap(), ["qd"]);
    }

    #[test]
    fn override_can_add_alternatives_and_new_chars() {
        let mut table = parse_base_table(BASE, Variant::Modern);
        apply_override(&mut table, "机器\tmm nn\r\n\tskip\r\n");
        assert_eq!(table.lookup('机').unwrap(), ["mm", "nn"]);
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn override_without_code_keeps_base_entry() {
        let mut table = parse_base_table(BASE, Variant::Modern);
        assert_eq!(apply_override(&mut table, "计\r\n算\t\r\n"), 0);
        assert_eq!(table.lookup('计').unwrap(), ["pk", "pd"]);
    }

    #[test]
    fn override_ignores_extra_columns() {
        let mut table = parse_base_table(BASE, Variant::Qingsong);
        apply_override(&mut table, "计\taa\tbb\tcc\tdd\r\n");
        assert_eq!(table.lookup('计').unwrap(), ["aa"]);
    }

    #[test]
    fn build_table_without_override() {
        let table = build_table(BASE, Variant::Modern, None);
        assert_eq!(table, parse_base_table(BASE, Variant::Modern));
        let table = build_table(BASE, Variant::Modern, Some(""));
        assert_eq!(table, parse_base_table(BASE, Variant::Modern));
    }

    #[test]
    fn bom_does_not_become_a_key() {
        let mut table = parse_base_table(BASE, Variant::Modern);
        assert_eq!(apply_override(&mut table, "\u{feff}计\tzz\r\n"), 1);
        assert_eq!(table.lookup('计').unwrap(), ["zz"]);
        assert!(!table.contains('\u{feff}'));

        let table = parse_base_table("\u{feff}计\tpk\r\n", Variant::Modern);
        assert_eq!(table.lookup('计').unwrap(), ["pk"]);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn read_optional_strips_bom() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mb.txt");
        fs::write(&path, "\u{feff}计\tzz\r\n").unwrap();
        assert_eq!(read_optional(&path).unwrap(), "计\tzz\r\n");
    }

    #[test]
    fn read_optional_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(read_optional(dir.path().join("mb.txt")).unwrap(), "");
    }

    #[test]
    fn embedded_table_parses_for_every_variant() {
        for variant in Variant::ALL {
            let table = parse_base_table(EMBEDDED_TABLE, variant);
            assert!(!table.is_empty());
            assert!(table.contains('计'));
            assert!(table.lookup('算').unwrap().iter().all(|c| !c.is_empty()));
        }
    }
}
