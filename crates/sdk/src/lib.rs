//! Waitline SDK
//!
//! Typed JSON-RPC client for the Waitline daemon.

pub mod client;
pub mod error;
pub mod types;

pub use client::WaitlineClient;
pub use error::{Result, SdkError};
pub use types::{
    ActivateQueueResponse, CancelEntryResponse, EntryDto, JoinQueueRequest, JoinQueueResponse,
    QueueStatusResponse, RegisterBusinessRequest, RegisterBusinessResponse, StatsResponse,
};
