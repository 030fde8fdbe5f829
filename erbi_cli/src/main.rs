use std::{
    env, fs,
    io::{self, BufRead, BufWriter, Write},
    path::PathBuf,
    process::ExitCode,
};

use erbi_core::{ErbiConfig, ErbiGenerator, ErbiResult, Variant, WordCodeGenerator, WordLibrary};
use erbi_dict::TsvTableLoader;
use erbi_pinyin::{TablePinyin, parse_pinyin_field};

#[derive(Debug, Default)]
struct Options {
    config: Option<PathBuf>,
    variant: Option<Variant>,
    table: Option<PathBuf>,
    override_path: Option<PathBuf>,
    input: Option<PathBuf>,
    words: Vec<String>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(io::stderr)
        .init();

    let opts = match parse_args(env::args().skip(1)) {
        Ok(opts) => opts,
        Err(msg) => {
            eprintln!("{msg}");
            eprintln!("使用 --help 查看用法");
            return ExitCode::from(2);
        }
    };
    match run(opts) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("erbi_cli: {e}");
            ExitCode::FAILURE
        }
    }
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Options, String> {
    let mut opts = Options::default();
    while let Some(a) = args.next() {
        let mut value = |name: &str| args.next().ok_or_else(|| format!("{name} 需要一个参数"));
        match a.as_str() {
            "--config" => opts.config = Some(PathBuf::from(value("--config")?)),
            "--variant" => {
                let v = value("--variant")?;
                opts.variant = Some(v.parse().map_err(|e| format!("{e}"))?);
            }
            "--table" => opts.table = Some(PathBuf::from(value("--table")?)),
            "--override" => opts.override_path = Some(PathBuf::from(value("--override")?)),
            "--input" => opts.input = Some(PathBuf::from(value("--input")?)),
            "--help" | "-h" => print_help(),
            s if s.starts_with("--") => return Err(format!("未知参数: {s}")),
            _ => opts.words.push(a),
        }
    }
    Ok(opts)
}

fn print_help() -> ! {
    println!(
        "用法：erbi_cli [--config <path>] [--variant modern|yinxing|chaoqiang|qingsong] \
         [--table <path>] [--override <path>] [--input <path>] [词...]\n\
         不带词时从 --input 或标准输入逐行读取：`词` 或 `词<TAB>拼音`（音节用空格或 ' 分隔）\n\
         输出：每个候选编码一行 `词<TAB>编码`"
    );
    std::process::exit(0);
}

/// 配置文件 < 命令行参数。
fn resolve_config(opts: &Options) -> ErbiResult<ErbiConfig> {
    let mut config = match &opts.config {
        Some(path) => ErbiConfig::load(path)?,
        None => ErbiConfig::default(),
    };
    if let Some(variant) = opts.variant {
        config.variant = variant;
    }
    if let Some(table) = &opts.table {
        config.table_path = Some(table.clone());
    }
    if let Some(path) = &opts.override_path {
        config.override_path = Some(path.clone());
    }
    Ok(config)
}

fn run(opts: Options) -> ErbiResult<()> {
    let config = resolve_config(&opts)?;
    let generator = ErbiGenerator::new(
        TsvTableLoader::from_config(&config),
        TablePinyin::new(),
    );
    // 先构建码表，让码表文件错误尽早暴露
    generator.table()?;

    let mut out = BufWriter::new(io::stdout().lock());
    if !opts.words.is_empty() {
        for word in &opts.words {
            convert(&generator, &WordLibrary::new(word.as_str()), &mut out)?;
        }
    } else {
        let reader: Box<dyn BufRead> = match &opts.input {
            Some(path) => Box::new(io::BufReader::new(fs::File::open(path)?)),
            None => Box::new(io::stdin().lock()),
        };
        for line in reader.lines() {
            let line = line?;
            let Some(entry) = parse_line(&line) else {
                continue;
            };
            convert(&generator, &entry, &mut out)?;
        }
    }
    out.flush()?;
    Ok(())
}

/// `词` 或 `词<TAB>拼音`；空行与 `#` 注释行跳过。
fn parse_line(line: &str) -> Option<WordLibrary> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() || line.starts_with('#') {
        return None;
    }
    let mut cells = line.split('\t');
    let word = cells.next()?.trim();
    match cells.next().map(parse_pinyin_field) {
        Some(pinyin) if !pinyin.is_empty() => Some(WordLibrary::with_pinyin(word, pinyin)),
        _ => Some(WordLibrary::new(word)),
    }
}

fn convert<G, W>(generator: &G, entry: &WordLibrary, out: &mut W) -> io::Result<()>
where
    G: WordCodeGenerator,
    W: Write,
{
    // 批量转换时无法取码的词直接跳过
    let Some(codes) = generator.code_of_word_library(entry, "") else {
        tracing::debug!(word = %entry.word, "skipped: no erbi code");
        return Ok(());
    };
    for code in codes {
        writeln!(out, "{}\t{}", entry.word, code)?;
    }
    Ok(())
}
