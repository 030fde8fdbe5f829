//! `erbi_core`：二笔编码生成的逻辑层；除读取配置文件外不做 I/O，不关心码表从哪里来。
//!
//! 设计目标：
//! - **构建与查询分离**：码表（`CodeTable`）由加载器一次性构建，之后只读
//! - **分层清晰**：generator -> rule（按词长取码） -> expand（笛卡尔积） -> 输出候选编码
//! - **易替换**：拼音服务、码表来源都通过 trait 注入
pub mod config;
pub mod dictionary;
pub mod error;
pub mod expand;
pub mod generator;
pub mod model;
pub mod pinyin;
pub mod rule;

pub use config::ErbiConfig;
pub use dictionary::{CodeTable, StrokeDictionary, TableLoader, Variant};
pub use error::{ErbiError, ErbiResult};
pub use generator::{ErbiGenerator, StaticTable, WordCodeGenerator};
pub use model::{CodeType, WordLibrary};
pub use pinyin::PinyinProvider;
