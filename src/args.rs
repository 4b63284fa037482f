//! Arg：语句参数，以及交给驱动前的求值（`resolve_args`）。

use crate::value::SqlValue;
use crate::valuer::{SqlValuer, ValuerError};
use std::fmt;

/// builder 收集的单个参数。
///
/// - `Value`：普通值，对应 `?` 占位符（按位置绑定）。
/// - `Valuer`：延迟求值，`resolve_args` 时才调用。
/// - `Named`：绑定到 `:name` 占位符的值（`in_record` 产生）。
#[derive(Clone)]
pub enum Arg {
    Value(SqlValue),
    Valuer(Box<dyn SqlValuer>),
    Named { name: String, value: SqlValue },
}

impl Arg {
    pub fn named(name: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        Self::Named {
            name: name.into(),
            value: value.into(),
        }
    }

    /// 命名参数的名字；位置参数返回 `None`。
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Named { name, .. } => Some(name),
            _ => None,
        }
    }

    /// 求出最终值。
    pub fn resolve(&self) -> Result<SqlValue, ValuerError> {
        match self {
            Self::Value(v) => Ok(v.clone()),
            Self::Valuer(v) => v.value(),
            Self::Named { value, .. } => Ok(value.clone()),
        }
    }
}

impl fmt::Debug for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Self::Valuer(_) => f.write_str("Valuer(..)"),
            Self::Named { name, value } => f
                .debug_struct("Named")
                .field("name", name)
                .field("value", value)
                .finish(),
        }
    }
}

impl PartialEq for Arg {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Value(a), Self::Value(b)) => a == b,
            (Self::Named { name: an, value: av }, Self::Named { name: bn, value: bv }) => {
                an == bn && av == bv
            }
            // valuer 的值只有求值后才知道
            _ => false,
        }
    }
}

impl From<SqlValue> for Arg {
    fn from(v: SqlValue) -> Self {
        Self::Value(v)
    }
}

impl From<Box<dyn SqlValuer>> for Arg {
    fn from(v: Box<dyn SqlValuer>) -> Self {
        Self::Valuer(v)
    }
}

macro_rules! value_arg {
    ($($t:ty),+ $(,)?) => {
        $(impl From<$t> for Arg {
            fn from(v: $t) -> Self {
                Self::Value(SqlValue::from(v))
            }
        })+
    };
}

value_arg!(
    bool,
    i8,
    i16,
    i32,
    i64,
    isize,
    u8,
    u16,
    u32,
    u64,
    usize,
    f32,
    f64,
    String,
    &'static str,
    Vec<u8>,
    time::OffsetDateTime,
);

impl<T> From<Option<T>> for Arg
where
    T: Into<SqlValue>,
{
    fn from(v: Option<T>) -> Self {
        Self::Value(SqlValue::from_option(v))
    }
}

/// 依次求值所有参数；遇到第一个失败的 valuer 即返回错误。
pub fn resolve_args(args: &[Arg]) -> Result<Vec<SqlValue>, ValuerError> {
    args.iter().map(Arg::resolve).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Debug, Clone)]
    struct Fixed(i64);

    impl SqlValuer for Fixed {
        fn value(&self) -> Result<SqlValue, ValuerError> {
            Ok(SqlValue::I64(self.0))
        }
    }

    #[derive(Debug, Clone)]
    struct Broken;

    impl SqlValuer for Broken {
        fn value(&self) -> Result<SqlValue, ValuerError> {
            Err(ValuerError("broken".to_string()))
        }
    }

    #[test]
    fn resolve_mixed_args() {
        let valuer: Box<dyn SqlValuer> = Box::new(Fixed(9));
        let args = vec![
            Arg::from("a"),
            Arg::from(valuer),
            Arg::named("name", "bob"),
            Arg::from(None::<i64>),
        ];
        let values = resolve_args(&args).unwrap();
        assert_eq!(
            values,
            vec![
                SqlValue::from("a"),
                SqlValue::I64(9),
                SqlValue::from("bob"),
                SqlValue::Null,
            ]
        );
    }

    #[test]
    fn resolve_stops_at_failing_valuer() {
        let valuer: Box<dyn SqlValuer> = Box::new(Broken);
        let err = resolve_args(&[Arg::from(1_i64), Arg::from(valuer)]).unwrap_err();
        assert_eq!(err.to_string(), "eorm: cannot resolve deferred argument: broken");
    }

    #[test]
    fn named_arg_exposes_name() {
        assert_eq!(Arg::named("id", 1_i64).name(), Some("id"));
        assert_eq!(Arg::from(1_i64).name(), None);
    }

    #[test]
    fn cloned_valuer_keeps_behaviour() {
        let valuer: Box<dyn SqlValuer> = Box::new(Fixed(3));
        let arg = Arg::from(valuer);
        let copy = arg.clone();
        assert_eq!(copy.resolve().unwrap(), SqlValue::I64(3));
        assert_ne!(arg, copy);
    }
}
