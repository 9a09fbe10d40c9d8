//! Structured log macros with the standard round fields.
//!
//! Every event carries `seq_nr` (round) and `oracle` (node index) so logs
//! from N nodes can be lined up round by round.

/// Log a round-scoped event with standard fields.
///
/// # Example
///
/// ```rust,ignore
/// log_round_event!(info, 12, 3, "outcome computed", merkle_roots = 2);
/// ```
#[macro_export]
macro_rules! log_round_event {
    ($level:ident, $seq_nr:expr, $oracle:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            seq_nr = $seq_nr,
            oracle = $oracle,
            $($($field)*,)?
            $msg
        )
    };
}

/// Log a chain-scoped event with standard fields.
#[macro_export]
macro_rules! log_chain_event {
    ($level:ident, $chain:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            chain = $chain,
            $($($field)*,)?
            $msg
        )
    };
}
