//! StatementBuilder：链式累积子句，`build` 时输出 `(sql, args)` 并重置自身。
//!
//! 两种占位符并存：
//! - 由列推导出的片段（INSERT 的 VALUES、UPDATE 的 SET）使用 `:name` 命名占位符；
//! - 调用方传入的 `where_` / `others` 片段使用 `?` 位置占位符。
//!
//! 驱动需要同时支持两种风格，或者在外层做一次改写。

use crate::args::Arg;
use crate::column_list::{dedup_columns, subtract_columns};
use crate::config::resolve_tag_key;
use crate::error::{BuildError, BuildResult};
use crate::statement::{KindSet, StatementKind};
use crate::string_builder::StringBuilder;
use crate::structs::{SqlRecord, TaggedField, tagged_fields};

/// 片段中的位置占位符。
pub const PLACEHOLDER: char = '?';

/// 主键列，UPDATE 推导 SET 时跳过。
const PRIMARY_KEY_COLUMN: &str = "id";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Left,
    Right,
    Inner,
}

impl JoinKind {
    fn as_str(self) -> &'static str {
        match self {
            Self::Left => "LEFT JOIN",
            Self::Right => "RIGHT JOIN",
            Self::Inner => "INNER JOIN",
        }
    }
}

/// 单条语句的可变累积状态。
///
/// 不是线程安全的：一次 累积 → `build` 周期内需要独占。`build` 之后状态被完全重置，
/// 同一个实例可以继续用于下一条语句；也可以每条语句新建一个实例。
#[derive(Debug, Clone, Default)]
pub struct StatementBuilder {
    kinds: KindSet,
    table: String,
    columns: Vec<String>,
    omit: Vec<String>,

    pending_predicates: Vec<String>,
    pending_trailing: Vec<String>,
    clauses: Vec<String>,
    where_emitted: bool,

    args: Vec<Arg>,
    error: Option<BuildError>,
}

impl StatementBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// SELECT：列来自记录的 tag 值（跳过 `"-"`，去重）。
    pub fn select<R>(&mut self, record: &R, tag: &str, table: &str) -> &mut Self
    where
        R: SqlRecord + ?Sized,
    {
        let fields = Self::readable_fields(record, tag);
        self.columns = dedup_columns(fields.iter().map(|f| f.column));
        self.table = table.to_string();
        self.kinds.insert(StatementKind::Select);
        self
    }

    /// 带隐式过滤的 SELECT：列与 `select` 相同，另外每个零值字段都会以其 tag 值
    /// 作为谓词调用一次 `where_`，并把该字段的零值作为唯一参数传入。
    ///
    /// 参数只有在 tag 含 `?` 时才会被绑定；普通 tag 变成字面量过滤条件，
    /// 例如 tag 为 `name` 的空字符串字段会产生 `WHERE name` 且不带参数，
    /// tag 为 `flag=?` 的零值字段会产生 `WHERE flag=?` 并绑定 `0`。
    pub fn search<R>(&mut self, record: &R, tag: &str, table: &str) -> &mut Self
    where
        R: SqlRecord + ?Sized,
    {
        let fields = Self::readable_fields(record, tag);
        for f in fields.iter().filter(|f| f.is_zero) {
            self.where_(f.column, [Arg::from(f.value.clone())]);
        }
        self.columns = dedup_columns(fields.iter().map(|f| f.column));
        self.table = table.to_string();
        self.kinds.insert(StatementKind::Select);
        self
    }

    /// INSERT：列为全部非 `"-"` 的 tag 值，与字段取值无关。参数通过 `in_args` / `in_record` 提供。
    pub fn insert<R>(&mut self, record: &R, tag: &str, table: &str) -> &mut Self
    where
        R: SqlRecord + ?Sized,
    {
        let fields = Self::readable_fields(record, tag);
        self.columns = dedup_columns(fields.iter().map(|f| f.column));
        self.table = table.to_string();
        self.kinds.insert(StatementKind::Insert);
        self
    }

    /// UPDATE：生成 `col=:col` 赋值片段；跳过 `"-"`、`id` 以及零值字段（部分更新）。
    pub fn update<R>(&mut self, record: &R, tag: &str, table: &str) -> &mut Self
    where
        R: SqlRecord + ?Sized,
    {
        let tag = resolve_tag_key(tag);
        let assigns = tagged_fields(record, &tag)
            .into_iter()
            .filter(|f| !f.is_skipped() && f.column != PRIMARY_KEY_COLUMN && !f.is_zero)
            .map(|f| format!("{0}=:{0}", f.column));
        self.columns = dedup_columns(assigns);
        self.table = table.to_string();
        self.kinds.insert(StatementKind::Update);
        self
    }

    pub fn delete(&mut self, table: &str) -> &mut Self {
        self.table = table.to_string();
        self.kinds.insert(StatementKind::Delete);
        self
    }

    /// WHERE 条件。
    ///
    /// 每次调用都会立即 flush：第一次写入 `WHERE`，之后写入 `AND`，再跟上本次的谓词。
    /// `others` 之后的下一次调用重新从 `WHERE` 开始。
    ///
    /// - 空谓词：记录 `EmptyPredicate`
    /// - 不含 `?`：原样追加，忽略参数
    /// - 含 `?` 但没有参数：记录 `PlaceholderArgMismatch`
    pub fn where_<I, A>(&mut self, predicate: &str, args: I) -> &mut Self
    where
        I: IntoIterator<Item = A>,
        A: Into<Arg>,
    {
        if let Some(fragment) = self.accept_fragment(predicate, args) {
            self.pending_predicates.push(fragment);
        }
        self.flush_where();
        self
    }

    pub fn left_join(&mut self, table: &str) -> &mut Self {
        self.join(JoinKind::Left, table)
    }

    pub fn right_join(&mut self, table: &str) -> &mut Self {
        self.join(JoinKind::Right, table)
    }

    pub fn inner_join(&mut self, table: &str) -> &mut Self {
        self.join(JoinKind::Inner, table)
    }

    /// 追加 `<KIND> JOIN <table>`，不经过缓冲。
    pub fn join(&mut self, kind: JoinKind, table: &str) -> &mut Self {
        if table.is_empty() {
            self.record_error(BuildError::MissingTable);
            return self;
        }
        self.clauses.push(format!("{} {table}", kind.as_str()));
        self
    }

    /// JOIN 的 ON 条件。
    ///
    /// 注意：目前只校验谓词非空，既不写入子句也不收集参数。
    /// 需要 ON 条件时请把它写进 join 的表名，例如 `inner_join("b ON a.id=b.a_id")`。
    pub fn on<I, A>(&mut self, predicate: &str, _args: I) -> &mut Self
    where
        I: IntoIterator<Item = A>,
        A: Into<Arg>,
    {
        if predicate.is_empty() {
            self.record_error(BuildError::EmptyPredicate);
        }
        self
    }

    /// 尾部子句（ORDER BY / LIMIT / GROUP BY ...），原样追加，校验规则与 `where_` 相同。
    ///
    /// 调用之后，下一次 `where_` 会重新以 `WHERE` 开头。
    pub fn others<I, A>(&mut self, fragment: &str, args: I) -> &mut Self
    where
        I: IntoIterator<Item = A>,
        A: Into<Arg>,
    {
        if let Some(fragment) = self.accept_fragment(fragment, args) {
            self.pending_trailing.push(fragment);
        }
        self.flush_trailing();
        self
    }

    /// 直接追加参数，不做占位符检查。
    pub fn in_args<I, A>(&mut self, args: I) -> &mut Self
    where
        I: IntoIterator<Item = A>,
        A: Into<Arg>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// 把记录的每个非 `"-"` tag 字段作为命名参数追加（`Arg::Named`），用于绑定 `:name`。
    pub fn in_record<R>(&mut self, record: &R, tag: &str) -> &mut Self
    where
        R: SqlRecord + ?Sized,
    {
        let named = Self::readable_fields(record, tag)
            .into_iter()
            .map(|f| Arg::named(f.column, f.value));
        self.args.extend(named);
        self
    }

    /// 从当前列中排除指定列（立即生效）。
    pub fn omit<I, S>(&mut self, columns: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.omit.extend(columns.into_iter().map(Into::into));
        self.columns = subtract_columns(&self.columns, &self.omit);
        self
    }

    /// 输出 `(sql, args)`。
    ///
    /// 无论成功与否都会重置全部状态（包括粘滞错误）。
    pub fn build(&mut self) -> BuildResult<(String, Vec<Arg>)> {
        let state = std::mem::take(self);
        match state.into_statement() {
            Ok((sql, args)) => {
                tracing::debug!(sql = %sql, args = args.len(), "statement built");
                Ok((sql, args))
            }
            Err(err) => {
                tracing::debug!(error = %err, "statement rejected");
                Err(err)
            }
        }
    }

    /// 丢弃当前累积的一切，回到 `new()` 的状态。
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// 已 flush 的子句片段（join、WHERE/AND、尾部子句）。
    pub fn clauses(&self) -> &[String] {
        &self.clauses
    }

    pub fn args(&self) -> &[Arg] {
        &self.args
    }

    /// 第一个被记录的错误。
    pub fn pending_error(&self) -> Option<BuildError> {
        self.error
    }

    /// 当前恰好标记了一个语句类型时返回它。
    pub fn statement_kind(&self) -> Option<StatementKind> {
        self.kinds.single()
    }

    fn readable_fields<R>(record: &R, tag: &str) -> Vec<TaggedField>
    where
        R: SqlRecord + ?Sized,
    {
        let tag = resolve_tag_key(tag);
        let mut fields = tagged_fields(record, &tag);
        fields.retain(|f| !f.is_skipped());
        fields
    }

    fn record_error(&mut self, err: BuildError) {
        if self.error.is_none() {
            tracing::warn!(error = %err, table = %self.table, "statement builder error recorded");
            self.error = Some(err);
        }
    }

    /// `where_` / `others` 共用的校验；通过时返回要追加的片段，并收集参数。
    fn accept_fragment<I, A>(&mut self, fragment: &str, args: I) -> Option<String>
    where
        I: IntoIterator<Item = A>,
        A: Into<Arg>,
    {
        if fragment.is_empty() {
            self.record_error(BuildError::EmptyPredicate);
            return None;
        }
        if !fragment.contains(PLACEHOLDER) {
            return Some(fragment.to_string());
        }
        let args: Vec<Arg> = args.into_iter().map(Into::into).collect();
        if args.is_empty() {
            self.record_error(BuildError::PlaceholderArgMismatch);
            return None;
        }
        self.args.extend(args);
        Some(fragment.to_string())
    }

    fn flush_where(&mut self) {
        let keyword = if self.where_emitted { "AND" } else { "WHERE" };
        self.clauses.push(keyword.to_string());
        if !self.pending_predicates.is_empty() {
            self.clauses.push(self.pending_predicates.join(" AND "));
        }
        self.pending_predicates.clear();
        self.where_emitted = true;
    }

    fn flush_trailing(&mut self) {
        self.clauses.append(&mut self.pending_trailing);
        self.where_emitted = false;
    }

    fn into_statement(self) -> BuildResult<(String, Vec<Arg>)> {
        if let Some(err) = self.error {
            return Err(err);
        }
        if self.table.is_empty() {
            return Err(BuildError::MissingTable);
        }
        let kind = self
            .kinds
            .single()
            .ok_or(BuildError::AmbiguousStatementKind)?;

        let mut sb = StringBuilder::new();
        sb.write_leading(kind.keyword());
        match kind {
            StatementKind::Select => {
                if self.columns.is_empty() {
                    sb.write_leading("*");
                } else {
                    sb.write_qualified(&self.table, &self.columns);
                }
                sb.write_leading("FROM");
                sb.write_leading(&self.table);
            }
            StatementKind::Insert => {
                if self.columns.is_empty() {
                    return Err(BuildError::NoColumns(kind));
                }
                sb.write_named_values(&self.table, &self.columns);
            }
            StatementKind::Update => {
                if self.columns.is_empty() {
                    return Err(BuildError::NoColumns(kind));
                }
                sb.write_leading(&self.table);
                sb.write_leading("SET");
                sb.write_leading(&self.columns.join(","));
            }
            StatementKind::Delete => {
                sb.write_leading(&self.table);
            }
        }
        sb.write_all(&self.clauses);

        Ok((sb.into_string(), self.args))
    }
}
