//! Error macros for chronicle

/// Macro for creating invalid value errors
#[macro_export]
macro_rules! bail_invalid {
    ($context:expr, $value:expr) => {
        return Err($crate::error::ChronicleError::invalid_value($context, $value))
    };
}

/// Macro for mapping storage errors
#[macro_export]
macro_rules! map_store_err {
    ($op:expr) => {
        |e| $crate::error::ChronicleError::storage($op, e)
    };
}
