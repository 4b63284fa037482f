//! halo-eorm：按 struct tag 推导列、链式累积子句，输出带参数的 SQL 语句。

pub mod args;
pub mod builder;
pub mod column_list;
pub mod config;
pub mod error;
pub mod macros;
pub mod statement;
pub(crate) mod string_builder;
pub mod structs;
pub mod value;
pub mod valuer;

pub use crate::args::{Arg, resolve_args};
pub use crate::builder::{JoinKind, PLACEHOLDER, StatementBuilder};
pub use crate::column_list::{dedup_columns, subtract_columns};
pub use crate::config::{
    DEFAULT_TAG_KEY, DefaultTagKeyGuard, default_tag_key, set_default_tag_key,
    set_default_tag_key_scoped,
};
pub use crate::error::{BuildError, BuildResult};
pub use crate::statement::{KindSet, StatementKind};
pub use crate::structs::{FieldMeta, IsZero, SKIP_TAG, SqlRecord, TaggedField, tagged_fields};
pub use crate::value::SqlValue;
pub use crate::valuer::{SqlValuer, ValuerError};
