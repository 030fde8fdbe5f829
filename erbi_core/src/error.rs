use thiserror::Error;

#[derive(Error, Debug)]
pub enum ErbiError {
    // 码表错误
    #[error("No stroke code for character '{0}'")]
    MissingEntry(char),

    // 输入错误
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    // 拼音服务错误
    #[error("Pinyin unavailable for '{text}': {reason}")]
    Pinyin { text: String, reason: String },

    // 配置错误
    #[error("Unknown dictionary variant: {0}")]
    UnknownVariant(String),

    #[error("Config parse error: {path} - {reason}")]
    ConfigParse { path: String, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ErbiResult<T> = Result<T, ErbiError>;
