//! builder 的错误类型。

use crate::statement::StatementKind;

pub type BuildResult<T> = Result<T, BuildError>;

/// 累积或 build 阶段的错误。
///
/// 累积阶段的错误是“粘滞”的：只记录第一个，到 `build` 时才返回。
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    /// `where_` / `on` / `others` 传入空字符串。
    #[error("empty predicate")]
    EmptyPredicate,
    /// 片段里有占位符 `?`，却没有传入参数。
    #[error("predicate/argument count mismatch")]
    PlaceholderArgMismatch,
    /// join 或 build 时表名为空。
    #[error("table required")]
    MissingTable,
    /// build 时没有或同时有多个语句类型。
    #[error("ambiguous or missing statement kind")]
    AmbiguousStatementKind,
    /// INSERT / UPDATE 没有任何可写入的列。
    #[error("nothing to write for {0}")]
    NoColumns(StatementKind),
}
