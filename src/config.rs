//! 全局默认配置：默认的 tag key。
//!
//! 推导列的操作（`select` / `search` / `insert` / `update` / `in_record`）在 tag 传空字符串时
//! 使用这里的默认值。

use std::borrow::Cow;
use std::sync::{Mutex, MutexGuard};

/// 初始默认 tag key。
pub const DEFAULT_TAG_KEY: &str = "db";

static TAG_KEY: Mutex<Cow<'static, str>> = Mutex::new(Cow::Borrowed(DEFAULT_TAG_KEY));
static TAG_KEY_LOCK: Mutex<()> = Mutex::new(());

/// 当前全局默认 tag key。
pub fn default_tag_key() -> String {
    TAG_KEY
        .lock()
        .unwrap_or_else(|e| e.into_inner())
        .to_string()
}

/// 设置全局默认 tag key，返回旧值。
pub fn set_default_tag_key(tag: impl Into<Cow<'static, str>>) -> String {
    let mut g = TAG_KEY.lock().unwrap_or_else(|e| e.into_inner());
    std::mem::replace(&mut *g, tag.into()).into_owned()
}

/// 修改默认 tag key 的 RAII guard（持有全局锁，避免并行测试互相干扰）。
pub struct DefaultTagKeyGuard {
    _lock: MutexGuard<'static, ()>,
    old: String,
}

impl Drop for DefaultTagKeyGuard {
    fn drop(&mut self) {
        let _ = set_default_tag_key(std::mem::take(&mut self.old));
    }
}

/// 在一个作用域内临时设置默认 tag key，退出作用域后自动恢复。
pub fn set_default_tag_key_scoped(tag: impl Into<Cow<'static, str>>) -> DefaultTagKeyGuard {
    let lock = TAG_KEY_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let old = set_default_tag_key(tag);
    DefaultTagKeyGuard { _lock: lock, old }
}

/// 空 tag 回落到默认值。
pub(crate) fn resolve_tag_key(tag: &str) -> Cow<'_, str> {
    if tag.is_empty() {
        Cow::Owned(default_tag_key())
    } else {
        Cow::Borrowed(tag)
    }
}
