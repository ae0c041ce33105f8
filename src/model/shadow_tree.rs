//! 影子树（Shadow Tree）：叶子路径与字符串叶子预扫描，不复制大值

use std::fmt;

use serde_json::Value;

/// 叶子路径：对象键名或数组索引的字符串形式，按从根到叶的顺序排列
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct LeafPath(Vec<String>);

impl LeafPath {
    pub fn root() -> Self {
        Self::default()
    }

    /// 返回追加了一个段的新路径（父路径保持不变，供并发兄弟分支各自持有）
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut segments = Vec::with_capacity(self.0.len() + 1);
        segments.extend(self.0.iter().cloned());
        segments.push(segment.into());
        Self(segments)
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// RFC 9535 JSONPath 形式（用于日志与错误信息）
    ///
    /// 键名可作为 member-name-shorthand 时使用 `.key`，否则使用 `['key']`；
    /// 数组索引段同样按字符串键名渲染，因为输出文档里数组已变为对象。
    pub fn to_json_path(&self) -> String {
        let mut out = String::from("$");
        for segment in &self.0 {
            if is_shorthand_name(segment) {
                out.push('.');
                out.push_str(segment);
            } else {
                out.push_str("['");
                push_escaped(&mut out, segment);
                out.push_str("']");
            }
        }
        out
    }
}

/// 单引号字符串字面量转义：反斜杠、单引号与 U+0020 以下的控制字符
fn push_escaped(out: &mut String, segment: &str) {
    for c in segment.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0C}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
}

fn is_shorthand_name(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl fmt::Display for LeafPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_json_path())
    }
}

impl<S: Into<String>> FromIterator<S> for LeafPath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// 同步预扫描：按文档顺序列出所有字符串叶子及其路径
///
/// 数字、布尔、空值在这里直接跳过；是否视为错误由遍历器决定。
pub fn collect_leaves(root: &Value) -> Vec<(LeafPath, &str)> {
    let mut out = Vec::new();
    fn walk<'a>(out: &mut Vec<(LeafPath, &'a str)>, v: &'a Value, path: LeafPath) {
        match v {
            Value::String(s) => out.push((path, s.as_str())),
            Value::Object(map) => {
                for (k, child) in map {
                    walk(out, child, path.child(k.as_str()));
                }
            }
            Value::Array(arr) => {
                for (idx, child) in arr.iter().enumerate() {
                    walk(out, child, path.child(idx.to_string()));
                }
            }
            _ => {}
        }
    }

    walk(&mut out, root, LeafPath::root());
    out
}
