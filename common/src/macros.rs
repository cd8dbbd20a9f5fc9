//! Logging shorthands routed through `tracing`.
//!
//! `success!` is emitted on its own target so the terminal formatter can
//! render it differently from a plain `info!`.

#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        $crate::tracing::info!(target: "bookworm::success", $($arg)*)
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::tracing::warn!($($arg)*)
    };
}

