//! 树遍历器：递归枚举字符串叶子，对每个叶子调用异步访问器，兄弟分支全部并发

use std::future::Future;

use futures::future::{try_join_all, FutureExt, LocalBoxFuture};
use serde_json::Value;

use crate::model::data_core::AppError;
use crate::model::shadow_tree::LeafPath;

/// 遍历 `node`，对每个字符串叶子调用 `visit(路径, 文本)`
///
/// 数组与对象的所有子节点同时启动并汇合；任一分支失败即整体失败，
/// 尚未完成的兄弟分支被丢弃。遇到数字、布尔或空值时返回
/// [`AppError::UnsupportedLeafType`]。
pub fn walk<'a, V, Fut>(
    node: &'a Value,
    visit: &'a V,
    prefix: LeafPath,
) -> LocalBoxFuture<'a, Result<(), AppError>>
where
    V: Fn(LeafPath, String) -> Fut,
    Fut: Future<Output = Result<(), AppError>> + 'a,
{
    async move {
        match node {
            Value::String(text) => visit(prefix, text.clone()).await,
            Value::Array(items) => {
                try_join_all(
                    items
                        .iter()
                        .enumerate()
                        .map(|(idx, item)| walk(item, visit, prefix.child(idx.to_string()))),
                )
                .await?;
                Ok(())
            }
            Value::Object(map) => {
                try_join_all(
                    map.iter()
                        .map(|(key, value)| walk(value, visit, prefix.child(key.as_str()))),
                )
                .await?;
                Ok(())
            }
            other => Err(AppError::UnsupportedLeafType {
                path: prefix,
                value: other.clone(),
            }),
        }
    }
    .boxed_local()
}
