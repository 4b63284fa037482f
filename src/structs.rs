//! 记录元数据：按 tag key 取出字段的 tag 值、是否零值以及当前值。
//!
//! Rust 无运行时反射；通过 `sql_record!` 宏为 struct 生成字段元数据与取值逻辑。
//! builder 只依赖 `SqlRecord` trait，不关心元数据从哪里来。

use crate::value::SqlValue;

/// tag 值为 `"-"` 的字段被跳过。
pub const SKIP_TAG: &str = "-";

/// 单个字段的元数据。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMeta {
    /// Rust 字段名（用于生成取值代码）
    pub rust: &'static str,
    /// `(tag key, tag value)`，如 `("db", "user_name")`
    pub tags: &'static [(&'static str, &'static str)],
}

impl FieldMeta {
    /// 该字段在 `key` 下的 tag 值；没有该 tag 或值为空时返回 `None`。
    pub fn tag(&self, key: &str) -> Option<&'static str> {
        self.tags
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| *v)
            .filter(|v| !v.is_empty())
    }
}

/// 按某个 tag key 取出的字段。
#[derive(Debug, Clone, PartialEq)]
pub struct TaggedField {
    pub column: &'static str,
    pub is_zero: bool,
    pub value: SqlValue,
}

impl TaggedField {
    pub fn is_skipped(&self) -> bool {
        self.column == SKIP_TAG
    }
}

/// 由 `sql_record!` 为业务 struct 实现的 trait。
pub trait SqlRecord {
    const FIELDS: &'static [FieldMeta];

    /// 取某个字段的当前值。
    fn field_value(&self, rust_field: &str) -> Option<SqlValue>;

    /// 判断某个字段是否为其类型的零值。
    fn is_zero_field(&self, rust_field: &str) -> bool;
}

/// 按声明顺序返回所有带 `tag_key` 的字段；没有该 tag 的字段不出现。
///
/// `"-"` 原样返回，由调用方决定是否跳过。
pub fn tagged_fields<R>(record: &R, tag_key: &str) -> Vec<TaggedField>
where
    R: SqlRecord + ?Sized,
{
    R::FIELDS
        .iter()
        .filter_map(|fm| {
            let column = fm.tag(tag_key)?;
            Some(TaggedField {
                column,
                is_zero: record.is_zero_field(fm.rust),
                value: record.field_value(fm.rust).unwrap_or(SqlValue::Null),
            })
        })
        .collect()
}

/// 判断“零值”的 trait。
pub trait IsZero {
    fn is_zero_value(&self) -> bool;
}

impl IsZero for String {
    fn is_zero_value(&self) -> bool {
        self.is_empty()
    }
}

impl IsZero for &str {
    fn is_zero_value(&self) -> bool {
        self.is_empty()
    }
}

impl IsZero for bool {
    fn is_zero_value(&self) -> bool {
        !*self
    }
}

macro_rules! zero_num {
    ($($t:ty),+ $(,)?) => {
        $(impl IsZero for $t {
            fn is_zero_value(&self) -> bool {
                *self == 0 as $t
            }
        })+
    };
}

zero_num!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl IsZero for f32 {
    fn is_zero_value(&self) -> bool {
        // -0.0 不算零值
        self.to_bits() == 0
    }
}

impl IsZero for f64 {
    fn is_zero_value(&self) -> bool {
        self.to_bits() == 0
    }
}

impl<T> IsZero for Option<T> {
    fn is_zero_value(&self) -> bool {
        self.is_none()
    }
}

impl<T> IsZero for Vec<T> {
    fn is_zero_value(&self) -> bool {
        self.is_empty()
    }
}

/// 时间的零值是 `0001-01-01 00:00:00 UTC`；Unix 纪元是合法时间，不算零值。
impl IsZero for time::OffsetDateTime {
    fn is_zero_value(&self) -> bool {
        *self == time::macros::datetime!(0001-01-01 00:00:00 UTC)
    }
}

// 序列只看第一个元素；空序列的字段全部视为零值。

impl<T: SqlRecord> SqlRecord for [T] {
    const FIELDS: &'static [FieldMeta] = T::FIELDS;

    fn field_value(&self, rust_field: &str) -> Option<SqlValue> {
        self.first().and_then(|r| r.field_value(rust_field))
    }

    fn is_zero_field(&self, rust_field: &str) -> bool {
        self.first().is_none_or(|r| r.is_zero_field(rust_field))
    }
}

impl<T: SqlRecord> SqlRecord for Vec<T> {
    const FIELDS: &'static [FieldMeta] = T::FIELDS;

    fn field_value(&self, rust_field: &str) -> Option<SqlValue> {
        self.as_slice().field_value(rust_field)
    }

    fn is_zero_field(&self, rust_field: &str) -> bool {
        self.as_slice().is_zero_field(rust_field)
    }
}

impl<T: SqlRecord, const N: usize> SqlRecord for [T; N] {
    const FIELDS: &'static [FieldMeta] = T::FIELDS;

    fn field_value(&self, rust_field: &str) -> Option<SqlValue> {
        self.as_slice().field_value(rust_field)
    }

    fn is_zero_field(&self, rust_field: &str) -> bool {
        self.as_slice().is_zero_field(rust_field)
    }
}

impl<T: SqlRecord + ?Sized> SqlRecord for &T {
    const FIELDS: &'static [FieldMeta] = T::FIELDS;

    fn field_value(&self, rust_field: &str) -> Option<SqlValue> {
        (**self).field_value(rust_field)
    }

    fn is_zero_field(&self, rust_field: &str) -> bool {
        (**self).is_zero_field(rust_field)
    }
}

impl<T: SqlRecord + ?Sized> SqlRecord for Box<T> {
    const FIELDS: &'static [FieldMeta] = T::FIELDS;

    fn field_value(&self, rust_field: &str) -> Option<SqlValue> {
        (**self).field_value(rust_field)
    }

    fn is_zero_field(&self, rust_field: &str) -> bool {
        (**self).is_zero_field(rust_field)
    }
}

/// 为业务 struct 声明字段 tag，并实现 `SqlRecord`。
///
/// 每个字段可以带任意多个 `key: "value"` tag；不带 tag 的字段写成 `{}`。
///
/// ```ignore
/// #[derive(Default)]
/// struct Student { id: String, name: String, age: i64, note: String }
///
/// halo_eorm::sql_record! {
///   impl Student {
///     id:   { db: "id", json: "id" },
///     name: { db: "name" },
///     age:  { db: "-" },
///     note: {},
///   }
/// }
/// ```
#[macro_export]
macro_rules! sql_record {
    (
        impl $ty:ty {
            $(
                $field:ident : { $($key:ident : $val:literal),* $(,)? }
            ),* $(,)?
        }
    ) => {
        impl $crate::structs::SqlRecord for $ty {
            const FIELDS: &'static [$crate::structs::FieldMeta] = &[
                $(
                    $crate::structs::FieldMeta {
                        rust: stringify!($field),
                        tags: &[ $((stringify!($key), $val)),* ],
                    }
                ),*
            ];

            fn field_value(&self, rust_field: &str) -> Option<$crate::value::SqlValue> {
                match rust_field {
                    $(
                        stringify!($field) => Some($crate::value::SqlValue::from(self.$field.clone())),
                    )*
                    _ => None,
                }
            }

            fn is_zero_field(&self, rust_field: &str) -> bool {
                match rust_field {
                    $(
                        stringify!($field) => $crate::structs::IsZero::is_zero_value(&self.$field),
                    )*
                    _ => false,
                }
            }
        }
    };
}
