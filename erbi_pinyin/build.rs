//! 把 `asset/pinyin.tsv` 编译成按字排序的静态表 `PINYIN_TABLE`。

use std::{env, fmt::Write as _, fs, path::PathBuf};

fn main() {
    let src = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap())
        .join("asset")
        .join("pinyin.tsv");
    println!("cargo:rerun-if-changed={}", src.display());

    let text = fs::read_to_string(&src).unwrap();
    let mut rows: Vec<(char, String)> = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut it = line.split('\t');
        let Some(ch) = it.next().and_then(|w| w.chars().next()) else {
            continue;
        };
        // 多音字只取第一个（最常用）读音
        let Some(reading) = it.next().and_then(|r| r.split_whitespace().next()) else {
            continue;
        };
        rows.push((ch, reading.to_ascii_lowercase()));
    }
    rows.sort_by_key(|(ch, _)| *ch);
    rows.dedup_by_key(|(ch, _)| *ch);

    let mut out = String::from("pub static PINYIN_TABLE: &[(char, &str)] = &[\n");
    for (ch, reading) in &rows {
        writeln!(out, "    ({ch:?}, {reading:?}),").unwrap();
    }
    out.push_str("];\n");

    let dest = PathBuf::from(env::var("OUT_DIR").unwrap()).join("pinyin_gen.rs");
    fs::write(dest, out).unwrap();
}
