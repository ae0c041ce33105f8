//! JSON翻译工具库
//!
//! 递归遍历JSON文档，把每个字符串叶子交给翻译服务并发翻译，
//! 再按相同的键/索引路径重建出同构的新文档

pub mod config;
pub mod model;
pub mod translator;
pub mod utils;

// 重新导出主要类型
pub use config::Settings;
pub use model::data_core::{translate_document, translate_file, AppError, TranslateParams};
pub use model::shadow_tree::LeafPath;
pub use translator::{GoogleTranslator, TranslationError, Translator};
