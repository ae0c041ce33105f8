//! 核心流程：读取源文档 → 并发遍历翻译 → 按路径回写 → 成功后一次性写出

use std::cell::RefCell;
use std::path::PathBuf;

use serde_json::{Map, Value};
use thiserror::Error;

use crate::config::Settings;
use crate::model::path_builder::set_value;
use crate::model::shadow_tree::{collect_leaves, LeafPath};
use crate::model::tree_walker::walk;
use crate::translator::{TranslationError, Translator};
use crate::utils::fs::{read_json_file, write_json_file};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO失败: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON解析失败: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("不支持的叶子类型 {path}: {value}")]
    UnsupportedLeafType { path: LeafPath, value: Value },
    #[error(transparent)]
    Translation(#[from] TranslationError),
    #[error("路径为空：不支持整篇文档为标量")]
    EmptyPath,
    #[error("路径冲突: {0} 不是对象")]
    PathConflict(LeafPath),
}

#[derive(Debug, Clone)]
pub struct TranslateParams {
    pub src_path: PathBuf,
    pub out_path: PathBuf,
    pub to_language: String,
}

/// 翻译整篇文档，返回与源文档同构的新对象（数组变为索引键对象）
///
/// 所有叶子同时发起翻译；任一叶子失败即返回错误，不产出部分结果。
pub async fn translate_document<T>(
    source: &Value,
    translator: &T,
    to_language: &str,
    settings: &Settings,
) -> Result<Map<String, Value>, AppError>
where
    T: Translator + ?Sized,
{
    let output = RefCell::new(Map::new());
    {
        let output = &output;
        let development = settings.development;
        let visit = move |path: LeafPath, text: String| async move {
            if !development {
                tracing::info!("[translating] {}", text);
            }
            let translated = translator.translate(&text, to_language).await?;
            // 检查与创建之间没有挂起点，兄弟叶子共享的中间对象不会丢失
            set_value(&mut output.borrow_mut(), &path, translated)?;
            Ok::<(), AppError>(())
        };
        walk(source, &visit, LeafPath::root()).await?;
    }
    Ok(output.into_inner())
}

/// 读取 `src_path`，翻译为 `to_language`，全部成功后写入 `out_path`
pub async fn translate_file<T>(
    params: &TranslateParams,
    translator: &T,
    settings: &Settings,
) -> Result<(), AppError>
where
    T: Translator + ?Sized,
{
    let source = read_json_file(&params.src_path)?;
    tracing::info!(
        "已加载 {}，共 {} 个字符串叶子待翻译为 {}",
        params.src_path.display(),
        collect_leaves(&source).len(),
        params.to_language
    );

    let translated = translate_document(&source, translator, &params.to_language, settings).await?;

    write_json_file(&params.out_path, &Value::Object(translated)).await?;
    tracing::info!("翻译结果已保存到: {}", params.out_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translator::mock::{CountingTranslator, FailingTranslator, SuffixTranslator};
    use jsonpath_rust::JsonPath;
    use serde_json::json;
    use std::io::Write;
    use std::sync::atomic::Ordering;
    use tempfile::{NamedTempFile, TempDir};

    /// 创建临时JSON文件用于测试
    fn create_test_json_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("创建临时文件失败");
        file.write_all(content.as_bytes()).expect("写入临时文件失败");
        file
    }

    fn quiet() -> Settings {
        Settings {
            development: true,
            ..Settings::default()
        }
    }

    fn params_for(src: &NamedTempFile, dir: &TempDir, lang: &str) -> TranslateParams {
        TranslateParams {
            src_path: src.path().to_path_buf(),
            out_path: dir.path().join("out.json"),
            to_language: lang.to_string(),
        }
    }

    #[tokio::test]
    async fn test_translate_file_scenario() {
        let temp_file = create_test_json_file(r#"{"greeting": "hello", "items": ["yes", "no"]}"#);
        let dir = TempDir::new().expect("创建临时目录失败");
        let params = params_for(&temp_file, &dir, "fr");

        translate_file(&params, &SuffixTranslator, &quiet())
            .await
            .expect("翻译应该成功");

        let written = std::fs::read_to_string(&params.out_path).expect("输出文件应该存在");
        let output: Value = serde_json::from_str(&written).expect("输出应该是合法JSON");
        assert_eq!(
            output,
            json!({"greeting": "hello_fr", "items": {"0": "yes_fr", "1": "no_fr"}})
        );
        assert!(written.contains("\n  \"greeting\""), "输出应该使用两空格缩进");
    }

    #[tokio::test]
    async fn test_number_leaf_writes_no_output() {
        let temp_file = create_test_json_file(r#"{"count": 5}"#);
        let dir = TempDir::new().expect("创建临时目录失败");
        let params = params_for(&temp_file, &dir, "fr");

        let result = translate_file(&params, &SuffixTranslator, &quiet()).await;

        assert!(matches!(result, Err(AppError::UnsupportedLeafType { .. })));
        assert!(!params.out_path.exists(), "失败时不应写出输出文件");
    }

    #[tokio::test]
    async fn test_translation_failure_writes_no_output() {
        let temp_file = create_test_json_file(r#"{"a": "ok", "b": ["fine", "boom"], "c": {"d": "ok"}}"#);
        let dir = TempDir::new().expect("创建临时目录失败");
        let params = params_for(&temp_file, &dir, "de");

        let result = translate_file(&params, &FailingTranslator { fail_on: "boom" }, &quiet()).await;

        assert!(matches!(
            result,
            Err(AppError::Translation(TranslationError::Service { status: 403, .. }))
        ));
        assert!(!params.out_path.exists(), "翻译失败时不应写出输出文件");
    }

    #[tokio::test]
    async fn test_missing_and_invalid_source() {
        let dir = TempDir::new().expect("创建临时目录失败");
        let params = TranslateParams {
            src_path: dir.path().join("missing.json"),
            out_path: dir.path().join("out.json"),
            to_language: "fr".into(),
        };
        let result = translate_file(&params, &SuffixTranslator, &quiet()).await;
        assert!(matches!(result, Err(AppError::Io(_))));

        let temp_file = create_test_json_file(r#"{"invalid": json content}"#);
        let params = params_for(&temp_file, &dir, "fr");
        let result = translate_file(&params, &SuffixTranslator, &quiet()).await;
        assert!(matches!(result, Err(AppError::Parse(_))));
        assert!(!params.out_path.exists());
    }

    #[tokio::test]
    async fn test_sibling_leaves_share_created_parent() {
        let source = json!({"a": {"x": "hi", "y": "bye"}});
        let output = translate_document(&source, &SuffixTranslator, "fr", &quiet())
            .await
            .expect("翻译应该成功");

        assert_eq!(
            Value::Object(output),
            json!({"a": {"x": "hi_fr", "y": "bye_fr"}})
        );
    }

    #[tokio::test]
    async fn test_leaf_count_matches_translate_calls() {
        let source = json!({
            "menu": {"file": "File", "edit": ["Undo", "Redo", {"deep": "Cut"}]},
            "empty": [],
            "title": "Editor"
        });
        let translator = CountingTranslator::default();

        let output = translate_document(&source, &translator, "ja", &quiet())
            .await
            .expect("翻译应该成功");

        let leaves = collect_leaves(&source);
        assert_eq!(leaves.len(), 5);
        assert_eq!(translator.calls.load(Ordering::SeqCst), leaves.len());
        assert_eq!(collect_leaves(&Value::Object(output)).len(), leaves.len());
    }

    #[tokio::test]
    async fn test_every_leaf_lands_at_its_path() {
        let source = json!({
            "user": {"name": "张三", "tags": ["a", "b"]},
            "key with spaces": "x",
            "matrix": [["m00"], ["m10", "m11"]]
        });
        let output = Value::Object(
            translate_document(&source, &SuffixTranslator, "en", &quiet())
                .await
                .expect("翻译应该成功"),
        );

        for (path, text) in collect_leaves(&source) {
            let hits: Vec<&Value> = output
                .query(&path.to_json_path())
                .expect("JSONPath 应该合法");
            assert_eq!(hits, vec![&json!(format!("{text}_en"))], "路径 {path} 的译文不符");
        }

        // 数组整体变为索引键对象
        assert_eq!(output["matrix"], json!({"0": {"0": "m00_en"}, "1": {"0": "m10_en", "1": "m11_en"}}));
    }

    #[tokio::test]
    async fn test_control_character_keys_round_trip() {
        let source = json!({"a\nb": "line", "tab\there": ["x"]});
        let output = Value::Object(
            translate_document(&source, &SuffixTranslator, "fr", &quiet())
                .await
                .expect("翻译应该成功"),
        );

        for (path, text) in collect_leaves(&source) {
            let hits: Vec<&Value> = output
                .query(&path.to_json_path())
                .expect("含控制字符的键也应生成合法 JSONPath");
            assert_eq!(hits, vec![&json!(format!("{text}_fr"))], "路径 {path} 的译文不符");
        }
    }

    #[tokio::test]
    async fn test_scalar_root_is_rejected() {
        let result = translate_document(&json!("only text"), &SuffixTranslator, "fr", &quiet()).await;
        assert!(matches!(result, Err(AppError::EmptyPath)));
    }

    #[tokio::test]
    async fn test_empty_array_root_yields_empty_object() {
        let output = translate_document(&json!([]), &SuffixTranslator, "fr", &quiet())
            .await
            .expect("空数组应该成功");
        assert!(output.is_empty());
    }
}
