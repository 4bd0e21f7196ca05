/// Wrap a struct declaration with the derives every tree payload carries:
/// Debug, Clone, PartialEq, Serialize, Deserialize
#[macro_export]
macro_rules! common_struct {
    ($(#[$attr:meta])* $vis:vis struct $name:ident { $($body:tt)* }) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
        $vis struct $name { $($body)* }
    };
}

/// Wrap an enum declaration whose variants each hold one distinct payload.
/// Adds `From<Payload>` for every variant and `is_variant()` predicates.
#[macro_export]
macro_rules! common_enum {
    ($(#[$attr:meta])* $vis:vis enum $name:ident { $($body:tt)* }) => {
        $(#[$attr])*
        #[derive(
            Debug,
            Clone,
            PartialEq,
            serde::Serialize,
            serde::Deserialize,
            derive_more::From,
            derive_more::IsVariant
        )]
        $vis enum $name { $($body)* }
    };
}

/// Macro to return early with an error
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::error::Error::Generic($crate::eyre::Error::msg(format!($($arg)*))))
    };
}

/// Return early with an evaluation fault
#[macro_export]
macro_rules! fault {
    ($fault:expr) => {
        return Err($crate::error::Error::Evaluation($fault))
    };
}

/// Log a warning message
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::tracing::warn!($($arg)*)
    };
}

/// Log a debug message
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {
        $crate::tracing::debug!($($arg)*)
    };
}

/// Log a trace message
#[macro_export]
macro_rules! trace {
    ($($arg:tt)*) => {
        $crate::tracing::trace!($($arg)*)
    };
}
