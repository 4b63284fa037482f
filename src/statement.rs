//! 语句类型及其互斥集合。

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatementKind {
    Select,
    Insert,
    Update,
    Delete,
}

impl StatementKind {
    const ALL: [StatementKind; 4] = [Self::Select, Self::Insert, Self::Update, Self::Delete];

    /// 语句开头的关键字。
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Select => "SELECT",
            Self::Insert => "INSERT INTO",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
        }
    }

    fn bit(self) -> u8 {
        match self {
            Self::Select => 1,
            Self::Insert => 1 << 1,
            Self::Update => 1 << 2,
            Self::Delete => 1 << 3,
        }
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Select => "SELECT",
            Self::Insert => "INSERT",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
        };
        f.write_str(s)
    }
}

/// 已标记的语句类型。可以同时标记多个，`single` 负责在 build 时检查互斥。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KindSet(u8);

impl KindSet {
    pub fn insert(&mut self, kind: StatementKind) {
        self.0 |= kind.bit();
    }

    pub fn contains(self, kind: StatementKind) -> bool {
        self.0 & kind.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// 恰好标记了一个类型时返回它；零个或多个返回 `None`。
    pub fn single(self) -> Option<StatementKind> {
        if self.0.count_ones() != 1 {
            return None;
        }
        StatementKind::ALL.into_iter().find(|k| self.contains(*k))
    }

    pub fn clear(&mut self) {
        self.0 = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_kind_is_reported() {
        let mut set = KindSet::default();
        assert!(set.is_empty());
        assert_eq!(set.single(), None);

        set.insert(StatementKind::Update);
        assert_eq!(set.single(), Some(StatementKind::Update));

        // 重复标记同一类型不算冲突
        set.insert(StatementKind::Update);
        assert_eq!(set.single(), Some(StatementKind::Update));
    }

    #[test]
    fn two_kinds_are_ambiguous() {
        let mut set = KindSet::default();
        set.insert(StatementKind::Select);
        set.insert(StatementKind::Delete);
        assert!(set.contains(StatementKind::Select));
        assert!(set.contains(StatementKind::Delete));
        assert_eq!(set.single(), None);

        set.clear();
        assert!(set.is_empty());
    }

    #[test]
    fn keywords() {
        assert_eq!(StatementKind::Insert.keyword(), "INSERT INTO");
        assert_eq!(StatementKind::Insert.to_string(), "INSERT");
    }
}
