//! 列名列表的去重与差集。

use std::collections::HashSet;

/// 去重，保留首次出现的顺序。
pub fn dedup_columns<I, S>(columns: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for c in columns {
        let c = c.into();
        if seen.insert(c.clone()) {
            out.push(c);
        }
    }
    out
}

/// `columns - omit`，保留 `columns` 原有顺序。
pub fn subtract_columns(columns: &[String], omit: &[String]) -> Vec<String> {
    let omit: HashSet<&str> = omit.iter().map(String::as_str).collect();
    columns
        .iter()
        .filter(|c| !omit.contains(c.as_str()))
        .cloned()
        .collect()
}
