//! Remote Bills Store
//!
//! Typed accessor for the bills collection and receipt file storage.
//! Holds no state between calls; every operation is one HTTP round trip.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};

use crate::error::StoreError;
use crate::models::{Bill, FileRef};

/// Base URL of the bills API
pub const API_BASE: &str = "http://localhost:5678";

/// Remote collection accessor for bill records and receipt files.
///
/// Behind a trait so controllers can be exercised against an in-memory
/// store in tests.
#[async_trait(?Send)]
pub trait BillsStore {
    /// Fetches all bills visible to the signed-in user
    async fn list(&self) -> Result<Vec<Bill>, StoreError>;

    /// Stores a receipt file and opens the backing bill record,
    /// returning the hosted file reference
    async fn create(
        &self,
        file: Vec<u8>,
        file_name: &str,
        mime: &str,
        email: &str,
    ) -> Result<FileRef, StoreError>;

    /// Persists a bill record, preserving any server-assigned identifier
    async fn update(&self, bill: &Bill) -> Result<Bill, StoreError>;
}

/// `BillsStore` over HTTP, JSON wire format
pub struct HttpStore {
    client: reqwest::Client,
    base_url: String,
}

impl HttpStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }
}

fn transport(err: reqwest::Error) -> StoreError {
    StoreError::Transport(err.to_string())
}

/// Maps a non-2xx response to the user-facing "Erreur {status}" message
fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, StoreError> {
    if resp.status().is_success() {
        Ok(resp)
    } else {
        Err(StoreError::Transport(format!(
            "Erreur {}",
            resp.status().as_u16()
        )))
    }
}

#[async_trait(?Send)]
impl BillsStore for HttpStore {
    async fn list(&self) -> Result<Vec<Bill>, StoreError> {
        let resp = self
            .client
            .get(self.url("bills"))
            .send()
            .await
            .map_err(transport)?;
        check_status(resp)?
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))
    }

    async fn create(
        &self,
        file: Vec<u8>,
        file_name: &str,
        mime: &str,
        email: &str,
    ) -> Result<FileRef, StoreError> {
        let mut part = Part::bytes(file).file_name(file_name.to_string());
        // browsers sometimes report no type; let the server sniff it then
        if !mime.is_empty() {
            part = part.mime_str(mime).map_err(transport)?;
        }
        let form = Form::new()
            .part("file", part)
            .text("email", email.to_string());
        let resp = self
            .client
            .post(self.url("bills"))
            .multipart(form)
            .send()
            .await
            .map_err(transport)?;
        check_status(resp)?
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))
    }

    async fn update(&self, bill: &Bill) -> Result<Bill, StoreError> {
        // A record that never went through an upload has no id yet and
        // must be created rather than patched.
        let request = if bill.id.is_empty() {
            self.client.post(self.url("bills"))
        } else {
            self.client.patch(self.url(&format!("bills/{}", bill.id)))
        };
        let resp = request.json(bill).send().await.map_err(transport)?;
        check_status(resp)?
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))
    }
}

#[cfg(test)]
pub(crate) mod mock {
    //! In-memory store double for controller tests.

    use std::cell::{Cell, RefCell};

    use tokio::sync::oneshot;

    use super::*;
    use crate::models::BillStatus;

    /// Records every call; failures and completion order are scriptable.
    #[derive(Default)]
    pub struct MockStore {
        pub bills: RefCell<Vec<Bill>>,
        /// When set, `list` rejects with this message
        pub list_error: RefCell<Option<String>>,
        pub create_calls: Cell<u32>,
        pub update_calls: Cell<u32>,
        pub fail_create: Cell<bool>,
        pub fail_update: Cell<bool>,
        /// The next `create` call parks on this receiver until it fires
        pub create_gate: RefCell<Option<oneshot::Receiver<()>>>,
        pub last_update: RefCell<Option<Bill>>,
    }

    #[async_trait(?Send)]
    impl BillsStore for MockStore {
        async fn list(&self) -> Result<Vec<Bill>, StoreError> {
            if let Some(msg) = self.list_error.borrow().clone() {
                return Err(StoreError::Transport(msg));
            }
            Ok(self.bills.borrow().clone())
        }

        async fn create(
            &self,
            _file: Vec<u8>,
            file_name: &str,
            _mime: &str,
            _email: &str,
        ) -> Result<FileRef, StoreError> {
            self.create_calls.set(self.create_calls.get() + 1);
            let gate = self.create_gate.borrow_mut().take();
            if let Some(rx) = gate {
                let _ = rx.await;
            }
            if self.fail_create.get() {
                return Err(StoreError::Transport("Erreur 500".to_string()));
            }
            Ok(FileRef {
                file_url: format!("https://test.storage.tld/{file_name}"),
                file_id: "47qAXb6fIm2zOKkLzMro".to_string(),
            })
        }

        async fn update(&self, bill: &Bill) -> Result<Bill, StoreError> {
            self.update_calls.set(self.update_calls.get() + 1);
            if self.fail_update.get() {
                return Err(StoreError::Transport("Erreur 500".to_string()));
            }
            let mut saved = bill.clone();
            if saved.id.is_empty() {
                saved.id = "47qAXb6fIm2zOKkLzMro".to_string();
            }
            *self.last_update.borrow_mut() = Some(saved.clone());
            Ok(saved)
        }
    }

    /// A minimal valid bill for fixtures
    pub fn bill(id: &str, date: &str) -> Bill {
        Bill {
            id: id.to_string(),
            email: "a@a".to_string(),
            bill_type: "Transports".to_string(),
            name: format!("note {id}"),
            amount: 100.0,
            date: date.to_string(),
            vat: Some(70.0),
            pct: Some(20),
            commentary: None,
            file_name: Some(format!("{id}.jpg")),
            file_url: Some(format!("https://test.storage.tld/{id}.jpg")),
            status: BillStatus::Pending,
            comment_admin: None,
        }
    }
}
