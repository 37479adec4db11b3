// Domain Error Types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid entry status transition: {from} -> {to}")]
    InvalidStatusTransition { from: String, to: String },

    #[error("Invalid phone number: {0}")]
    InvalidPhone(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

pub type Result<T> = std::result::Result<T, DomainError>;
