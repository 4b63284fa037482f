//! 延迟取值的语句参数。
//!
//! builder 只保存 `Box<dyn SqlValuer>`，真正的值在 `Arg::resolve` / `resolve_args`
//! 把参数交给驱动绑定之前才取出，所以 build 之后值仍可能变化。

use crate::value::SqlValue;

/// 取值失败的原因，原样透传给 `resolve_args` 的调用方。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("eorm: cannot resolve deferred argument: {0}")]
pub struct ValuerError(pub String);

/// 绑定前才求值的参数来源，例如当前时间、序列号或外部配置。
///
/// 需要可克隆，因为 `StatementBuilder` 与它产出的参数列表都是 `Clone`。
pub trait SqlValuer: dyn_clone::DynClone + std::fmt::Debug {
    fn value(&self) -> Result<SqlValue, ValuerError>;
}

dyn_clone::clone_trait_object!(SqlValuer);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Arg, StatementBuilder, resolve_args};
    use pretty_assertions::assert_eq;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicI64, Ordering};

    #[derive(Debug, Clone)]
    struct Sequence(Arc<AtomicI64>);

    impl SqlValuer for Sequence {
        fn value(&self) -> Result<SqlValue, ValuerError> {
            Ok(SqlValue::I64(self.0.load(Ordering::SeqCst)))
        }
    }

    #[test]
    fn value_is_read_at_resolve_time() {
        let counter = Arc::new(AtomicI64::new(1));
        let mut sb = StatementBuilder::new();
        sb.delete("t");
        let valuer: Box<dyn SqlValuer> = Box::new(Sequence(Arc::clone(&counter)));
        sb.where_("version=?", [Arg::from(valuer)]);
        let (sql, args) = sb.build().unwrap();
        assert_eq!(sql, "DELETE t WHERE version=?");

        counter.store(42, Ordering::SeqCst);
        assert_eq!(resolve_args(&args).unwrap(), vec![SqlValue::I64(42)]);
    }

    #[test]
    fn error_message_names_the_argument() {
        let err = ValuerError("clock unavailable".to_string());
        assert_eq!(
            err.to_string(),
            "eorm: cannot resolve deferred argument: clock unavailable"
        );
    }
}
