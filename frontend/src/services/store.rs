//! # Bill Store
//!
//! The remote persistence API seen from the controllers. Controllers only
//! depend on [`BillStore`], so the HTTP client and the test double are
//! interchangeable.

use std::rc::Rc;

use async_trait::async_trait;
use shared::{Bill, BillSubmission, CreatedReceipt};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Error {status}")]
    Status { status: u16 },
    #[error("Failed to parse response: {0}")]
    Decode(String),
    #[error("Failed to serialize request: {0}")]
    Encode(String),
    #[error("No bill selected for update")]
    MissingSelector,
}

/// Receipt file sent with the multipart upload, along with the uploader's email
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptUpload {
    pub file_name: String,
    pub mime_type: String,
    pub content: Vec<u8>,
    pub email: String,
}

/// Operations the bills pages need from the remote store
#[async_trait(?Send)]
pub trait BillStore {
    /// List the connected user's bills, most recent first
    async fn list(&self) -> Result<Vec<Bill>, StoreError>;

    /// Upload a receipt and open a new bill for it
    async fn create(&self, upload: ReceiptUpload) -> Result<CreatedReceipt, StoreError>;

    /// Persist the final values of the bill identified by `selector`
    async fn update(&self, selector: Option<&str>, bill: &BillSubmission) -> Result<Bill, StoreError>;
}

/// Shared handle on a store, comparable by identity so it can travel in props
#[derive(Clone)]
pub struct StoreHandle(pub Rc<dyn BillStore>);

impl StoreHandle {
    pub fn new(store: impl BillStore + 'static) -> Self {
        Self(Rc::new(store))
    }
}

impl PartialEq for StoreHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}
