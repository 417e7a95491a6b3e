//! Transaction Submission
//!
//! The persistence/submit endpoint is a black-box collaborator: it accepts
//! a finalized transaction payload and returns an opaque receipt ID (or an
//! error). The server ships with an in-memory implementation; a real
//! deployment swaps in one that forwards to the backend of record.

use async_trait::async_trait;
use dashmap::DashMap;
use shared::transaction::TransactionSnapshot;
use thiserror::Error;

/// Submission errors
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("Submission rejected: {0}")]
    Rejected(String),

    #[error("Submission endpoint unavailable: {0}")]
    Unavailable(String),
}

/// Accepts a finalized transaction and returns an opaque receipt ID
#[async_trait]
pub trait TransactionSubmitter: Send + Sync {
    async fn submit(&self, snapshot: &TransactionSnapshot) -> Result<String, SubmitError>;
}

/// In-memory submitter used by tests and the dev server
#[derive(Debug, Default)]
pub struct InMemorySubmitter {
    accepted: DashMap<String, TransactionSnapshot>,
}

impl InMemorySubmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of accepted submissions
    pub fn accepted_count(&self) -> usize {
        self.accepted.len()
    }

    /// Look up an accepted submission by receipt ID
    pub fn accepted(&self, receipt_id: &str) -> Option<TransactionSnapshot> {
        self.accepted.get(receipt_id).map(|s| s.clone())
    }
}

#[async_trait]
impl TransactionSubmitter for InMemorySubmitter {
    async fn submit(&self, snapshot: &TransactionSnapshot) -> Result<String, SubmitError> {
        let receipt_id = uuid::Uuid::new_v4().to_string();
        self.accepted.insert(receipt_id.clone(), snapshot.clone());
        Ok(receipt_id)
    }
}
