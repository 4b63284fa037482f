//! 宏集合：为 builder 提供可变参数调用封装。
//! 通过 `where_!` / `others!` 等宏，可以直接写不定长、不同类型的参数而无需手动创建 `Vec<Arg>`。

#[doc(hidden)]
#[macro_export]
macro_rules! __collect_args {
    () => {
        ::std::vec::Vec::<$crate::args::Arg>::new()
    };
    ($($value:expr),+ $(,)?) => {
        ::std::vec![$($crate::args::Arg::from($value)),+]
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __builder_with_args {
    ($builder:expr, $method:ident, $text:expr $(, $arg:expr)* $(,)?) => {
        $builder.$method($text, $crate::__collect_args!($($arg),*))
    };
}

/// 为 `StatementBuilder::where_` 提供可变参数调用：`where_!(sb, "id=? AND age>?", 1, 18)`。
#[macro_export]
macro_rules! where_ {
    ($builder:expr, $predicate:expr $(, $arg:expr)* $(,)?) => {
        $crate::__builder_with_args!($builder, where_, $predicate $(, $arg)*)
    };
}
pub use crate::where_;

/// 为 `StatementBuilder::others` 提供可变参数调用：`others!(sb, "LIMIT ?", 10)`。
#[macro_export]
macro_rules! others {
    ($builder:expr, $fragment:expr $(, $arg:expr)* $(,)?) => {
        $crate::__builder_with_args!($builder, others, $fragment $(, $arg)*)
    };
}
pub use crate::others;

/// 为 `StatementBuilder::on` 提供可变参数调用。
#[macro_export]
macro_rules! on {
    ($builder:expr, $predicate:expr $(, $arg:expr)* $(,)?) => {
        $crate::__builder_with_args!($builder, on, $predicate $(, $arg)*)
    };
}
pub use crate::on;

/// 为 `StatementBuilder::in_args` 提供可变参数调用。
#[macro_export]
macro_rules! in_args {
    ($builder:expr $(, $arg:expr)* $(,)?) => {
        $builder.in_args($crate::__collect_args!($($arg),*))
    };
}
pub use crate::in_args;

/// 为 `StatementBuilder::omit` 提供可变参数调用。
#[macro_export]
macro_rules! omit {
    ($builder:expr $(, $col:expr)* $(,)?) => {
        $builder.omit::<::std::vec::Vec<::std::string::String>, ::std::string::String>(
            ::std::vec![$(::std::string::String::from($col)),*],
        )
    };
}
pub use crate::omit;
