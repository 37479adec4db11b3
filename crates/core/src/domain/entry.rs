// Queue Entry Domain Model

use crate::domain::error::{DomainError, Result};
use crate::domain::phone::Phone;
use serde::{Deserialize, Serialize};

/// Queue entry ID (UUID v4)
pub type EntryId = String;

/// Entry status. Transitions are forward-only:
/// waiting -> {called, cancelled, expired}, called -> served.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    Waiting,
    Called,
    Served,
    Cancelled,
    Expired,
}

impl EntryStatus {
    /// True once the entry can never change status again.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            EntryStatus::Served | EntryStatus::Cancelled | EntryStatus::Expired
        )
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "waiting" => Some(EntryStatus::Waiting),
            "called" => Some(EntryStatus::Called),
            "served" => Some(EntryStatus::Served),
            "cancelled" => Some(EntryStatus::Cancelled),
            "expired" => Some(EntryStatus::Expired),
            _ => None,
        }
    }
}

impl std::fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntryStatus::Waiting => write!(f, "waiting"),
            EntryStatus::Called => write!(f, "called"),
            EntryStatus::Served => write!(f, "served"),
            EntryStatus::Cancelled => write!(f, "cancelled"),
            EntryStatus::Expired => write!(f, "expired"),
        }
    }
}

/// Queue Entry Entity
///
/// A client's slot in a business's waiting line. `position` is the 1-based
/// rank among the business's waiting entries; the store keeps the waiting
/// positions contiguous by renumbering whenever an entry leaves `waiting`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueEntry {
    pub id: EntryId,
    pub business_id: String,
    pub phone: Phone,
    pub client_name: String,

    pub position: i64,
    /// Minutes until likely service, derived at admission time
    pub estimated_wait_time: i64,
    pub status: EntryStatus,

    pub called_at: Option<i64>,
    pub served_at: Option<i64>,

    pub created_at: i64, // epoch ms
    pub updated_at: i64,
}

impl QueueEntry {
    /// Create a new waiting entry.
    ///
    /// `id` and `created_at` are injected, never generated here, so the
    /// admission path stays deterministic under test.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: impl Into<String>,
        created_at: i64,
        business_id: impl Into<String>,
        phone: Phone,
        client_name: impl Into<String>,
        position: i64,
        estimated_wait_time: i64,
    ) -> Self {
        Self {
            id: id.into(),
            business_id: business_id.into(),
            phone,
            client_name: client_name.into(),
            position,
            estimated_wait_time,
            status: EntryStatus::Waiting,
            called_at: None,
            served_at: None,
            created_at,
            updated_at: created_at,
        }
    }

    fn transition(&mut self, from: EntryStatus, to: EntryStatus, now_millis: i64) -> Result<()> {
        if self.status != from {
            return Err(DomainError::InvalidStatusTransition {
                from: self.status.to_string(),
                to: to.to_string(),
            });
        }
        self.status = to;
        self.updated_at = now_millis;
        Ok(())
    }

    /// waiting -> called
    pub fn call(&mut self, now_millis: i64) -> Result<()> {
        self.transition(EntryStatus::Waiting, EntryStatus::Called, now_millis)?;
        self.called_at = Some(now_millis);
        Ok(())
    }

    /// called -> served
    pub fn serve(&mut self, now_millis: i64) -> Result<()> {
        self.transition(EntryStatus::Called, EntryStatus::Served, now_millis)?;
        self.served_at = Some(now_millis);
        Ok(())
    }

    /// waiting -> cancelled
    pub fn cancel(&mut self, now_millis: i64) -> Result<()> {
        self.transition(EntryStatus::Waiting, EntryStatus::Cancelled, now_millis)
    }

    /// waiting -> expired
    pub fn expire(&mut self, now_millis: i64) -> Result<()> {
        self.transition(EntryStatus::Waiting, EntryStatus::Expired, now_millis)
    }
}
