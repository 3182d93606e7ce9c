//! Canonical logging macros
//!
//! Every operation boundary emits exactly one `start` and one `end` or
//! `end_error` event carrying the same `op` name.

/// Log the start of an operation
///
/// # Example
///
/// ```
/// # use symbology_core::log_op_start;
/// log_op_start!("add_mapping");
/// log_op_start!("add_mapping", symbol = "AAPL");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        $crate::__tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_START,
        )
    };
    ($op:expr, $($field:tt)*) => {
        $crate::__tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_START,
            $($field)*
        )
    };
}

/// Log the successful end of an operation
///
/// # Example
///
/// ```
/// # use symbology_core::log_op_end;
/// log_op_end!("add_mapping", duration_ms = 3);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        $crate::__tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END,
            duration_ms = $duration,
        )
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        $crate::__tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        )
    };
}

/// Log an operation error
///
/// Takes a reference to a `SymbologyError` or an `ExError`.
/// Client-caused kinds (conflict, not found, validation) are logged at
/// `warn`, everything else at `error`.
///
/// # Example
///
/// ```
/// # use symbology_core::{log_op_error, errors::SymbologyError};
/// # use chrono::NaiveDate;
/// let err = SymbologyError::SymbolNotActive {
///     symbol: "AAPL".to_string(),
///     date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
/// };
/// log_op_error!("lookup", &err, duration_ms = 1);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {
        $crate::log_op_error!($op, $err, duration_ms = $duration,)
    };
    ($op:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        use $crate::errors::{ExError, ExErrorKind};
        let ex_err: ExError = ::std::clone::Clone::clone($err).into();
        match ex_err.kind() {
            ExErrorKind::Conflict | ExErrorKind::NotFound => {
                $crate::__tracing::warn!(
                    component = module_path!(),
                    op = $op,
                    event = $crate::core_types::schema::EVENT_END_ERROR,
                    duration_ms = $duration,
                    err.kind = ?ex_err.kind(),
                    err.code = ex_err.code(),
                    $($field)*
                );
            }
            kind if kind.is_validation() => {
                $crate::__tracing::warn!(
                    component = module_path!(),
                    op = $op,
                    event = $crate::core_types::schema::EVENT_END_ERROR,
                    duration_ms = $duration,
                    err.kind = ?ex_err.kind(),
                    err.code = ex_err.code(),
                    $($field)*
                );
            }
            _ => {
                $crate::__tracing::error!(
                    component = module_path!(),
                    op = $op,
                    event = $crate::core_types::schema::EVENT_END_ERROR,
                    duration_ms = $duration,
                    err.kind = ?ex_err.kind(),
                    err.code = ex_err.code(),
                    message = %ex_err,
                    $($field)*
                );
            }
        }
    }};
}
