//! 按路径回写：在输出文档中按需创建中间对象，并在叶子处赋值

use serde_json::{Map, Value};

use crate::model::data_core::AppError;
use crate::model::shadow_tree::LeafPath;

/// 将 `value` 写到 `root` 中 `path` 指定的位置
///
/// 中间段缺失时创建空对象，已存在时复用（数组不会被还原为数组，
/// 一律以索引字符串为键的对象表示）；最后一段直接覆盖赋值。
pub fn set_value(
    root: &mut Map<String, Value>,
    path: &LeafPath,
    value: impl Into<Value>,
) -> Result<(), AppError> {
    let Some((last, parents)) = path.segments().split_last() else {
        return Err(AppError::EmptyPath);
    };

    let mut current = root;
    for (depth, segment) in parents.iter().enumerate() {
        let slot = current
            .entry(segment.as_str())
            .or_insert_with(|| Value::Object(Map::new()));
        current = match slot {
            Value::Object(map) => map,
            _ => {
                let conflict: LeafPath = parents[..=depth].iter().cloned().collect();
                return Err(AppError::PathConflict(conflict));
            }
        };
    }

    current.insert(last.clone(), value.into());
    Ok(())
}
