use std::cell::{Cell, RefCell};
use std::rc::Rc;

use async_trait::async_trait;
use shared::{Bill, BillStatus, BillSubmission, CreatedReceipt};

use super::{Spawner, Task};
use crate::services::store::{BillStore, ReceiptUpload, StoreError};

/// Scripted store double recording every call it receives
#[derive(Default)]
pub struct MockStore {
    pub bills: RefCell<Vec<Bill>>,
    pub list_error: RefCell<Option<StoreError>>,
    pub create_response: RefCell<Option<CreatedReceipt>>,
    pub create_error: RefCell<Option<StoreError>>,
    pub list_calls: Cell<usize>,
    pub uploads: RefCell<Vec<ReceiptUpload>>,
    pub updates: RefCell<Vec<(Option<String>, BillSubmission)>>,
}

impl MockStore {
    pub fn with_bills(bills: Vec<Bill>) -> Self {
        Self {
            bills: RefCell::new(bills),
            ..Self::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.list_calls.get() + self.uploads.borrow().len() + self.updates.borrow().len()
    }
}

#[async_trait(?Send)]
impl BillStore for MockStore {
    async fn list(&self) -> Result<Vec<Bill>, StoreError> {
        self.list_calls.set(self.list_calls.get() + 1);
        match self.list_error.borrow().clone() {
            Some(error) => Err(error),
            None => Ok(self.bills.borrow().clone()),
        }
    }

    async fn create(&self, upload: ReceiptUpload) -> Result<CreatedReceipt, StoreError> {
        let file_name = upload.file_name.clone();
        self.uploads.borrow_mut().push(upload);

        if let Some(error) = self.create_error.borrow().clone() {
            return Err(error);
        }
        Ok(self.create_response.borrow().clone().unwrap_or_else(|| CreatedReceipt {
            file_url: format!("https://localhost:3456/images/{}", file_name),
            key: format!("key-{}", file_name),
        }))
    }

    async fn update(&self, selector: Option<&str>, bill: &BillSubmission) -> Result<Bill, StoreError> {
        self.updates
            .borrow_mut()
            .push((selector.map(str::to_string), bill.clone()));

        Ok(Bill {
            id: selector.unwrap_or_default().to_string(),
            email: bill.email.clone(),
            expense_type: bill.expense_type.clone(),
            name: bill.name.clone(),
            amount: bill.amount,
            date: bill.date.clone(),
            vat: bill.vat.clone(),
            pct: bill.pct,
            commentary: bill.commentary.clone(),
            file_url: bill.file_url.clone(),
            file_name: bill.file_name.clone(),
            status: BillStatus::Pending,
            comment_admin: None,
        })
    }
}

/// Collects spawned tasks so a test decides when, and in which order, they run
#[derive(Clone, Default)]
pub struct TaskQueue(Rc<RefCell<Vec<Task>>>);

impl TaskQueue {
    pub fn spawner(&self) -> Spawner {
        let queue = self.0.clone();
        Spawner::new(move |task| queue.borrow_mut().push(task))
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn take(&self) -> Vec<Task> {
        self.0.borrow_mut().drain(..).collect()
    }

    pub async fn run_all(&self) {
        for task in self.take() {
            task.await;
        }
    }
}

pub fn bill(id: &str, date: &str, status: BillStatus) -> Bill {
    Bill {
        id: id.to_string(),
        email: "employee@test.tld".to_string(),
        expense_type: "Transports".to_string(),
        name: format!("bill {}", id),
        amount: 100.0,
        date: date.to_string(),
        vat: "20".to_string(),
        pct: 20,
        commentary: String::new(),
        file_url: Some(format!("https://localhost:3456/images/{}.jpg", id)),
        file_name: Some(format!("{}.jpg", id)),
        status,
        comment_admin: None,
    }
}
