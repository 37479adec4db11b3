//! RPC Error Types
//!
//! Maps application errors to JSON-RPC error codes.

use jsonrpsee::types::ErrorObjectOwned;
use waitline_core::domain::DomainError;
use waitline_core::error::AppError;

/// RPC Error Codes
pub mod code {
    pub const VALIDATION_ERROR: i32 = 4000;
    pub const NOT_FOUND: i32 = 4001;
    pub const CONFLICT: i32 = 4002;
    pub const THROTTLED: i32 = 4003;
    /// Queue closed for new joins (forbidden)
    pub const QUEUE_CLOSED: i32 = 4030;
    /// Queue at capacity (unavailable)
    pub const QUEUE_FULL: i32 = 5030;
    pub const INTERNAL_ERROR: i32 = 5000;
    pub const DB_ERROR: i32 = 5001;
}

/// Convert AppError to JSON-RPC ErrorObject
pub fn to_rpc_error(err: AppError) -> ErrorObjectOwned {
    match err {
        AppError::Validation(msg) => {
            ErrorObjectOwned::owned(code::VALIDATION_ERROR, msg, None::<()>)
        }
        AppError::NotFound(msg) => ErrorObjectOwned::owned(code::NOT_FOUND, msg, None::<()>),
        AppError::QueueClosed(msg) => ErrorObjectOwned::owned(code::QUEUE_CLOSED, msg, None::<()>),
        AppError::DuplicateEntry(msg) => ErrorObjectOwned::owned(code::CONFLICT, msg, None::<()>),
        AppError::QueueFull(msg) => ErrorObjectOwned::owned(code::QUEUE_FULL, msg, None::<()>),
        AppError::Conflict(msg) => ErrorObjectOwned::owned(code::CONFLICT, msg, None::<()>),
        AppError::Database(msg) => {
            // Log the cause, hand the caller an opaque error
            tracing::error!(error = %msg, "database error");
            ErrorObjectOwned::owned(code::DB_ERROR, "Storage error", None::<()>)
        }
        AppError::Domain(e) => match e {
            // A stale status transition is a lost race, not bad input
            DomainError::InvalidStatusTransition { .. } => {
                ErrorObjectOwned::owned(code::CONFLICT, e.to_string(), None::<()>)
            }
            _ => ErrorObjectOwned::owned(code::VALIDATION_ERROR, e.to_string(), None::<()>),
        },
        AppError::Io(e) => {
            ErrorObjectOwned::owned(code::INTERNAL_ERROR, e.to_string(), None::<()>)
        }
        AppError::Serialization(e) => {
            ErrorObjectOwned::owned(code::VALIDATION_ERROR, e.to_string(), None::<()>)
        }
        AppError::Config(msg) => ErrorObjectOwned::owned(code::INTERNAL_ERROR, msg, None::<()>),
        AppError::Internal(msg) => {
            tracing::error!(error = %msg, "internal error");
            ErrorObjectOwned::owned(code::INTERNAL_ERROR, "Internal error", None::<()>)
        }
    }
}
