//! SDK Error Types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SdkError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("RPC error: {0}")]
    Rpc(#[from] jsonrpsee::core::client::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SdkError>;
