use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;

use shared::{receipt_file_name, BillError, BillStatus, BillSubmission, ReceiptFormat, Session, DEFAULT_PCT};
use yew::Callback;

use super::Spawner;
use crate::routes::Route;
use crate::services::logging::Logger;
use crate::services::store::{BillStore, ReceiptUpload, StoreError};

const COMPONENT: &str = "new-bill";

/// Inline message shown when the selected receipt is not an accepted image
pub const FILE_ERROR_MESSAGE: &str = "Seuls les fichiers jpg, jpeg et png sont acceptés.";

/// Outcome of the last receipt upload that resolved
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DraftUpload {
    pub file_url: Option<String>,
    pub file_name: Option<String>,
    pub bill_id: Option<String>,
}

type FileContent = Pin<Box<dyn Future<Output = Result<Vec<u8>, String>>>>;

/// A file picked in the receipt input.
///
/// The content is read lazily, only once the file has been accepted.
pub struct SelectedFile {
    /// Input value, possibly prefixed with a client directory
    pub path: String,
    pub mime_type: String,
    content: FileContent,
}

impl SelectedFile {
    pub fn new(
        path: impl Into<String>,
        mime_type: impl Into<String>,
        content: impl Future<Output = Result<Vec<u8>, String>> + 'static,
    ) -> Self {
        Self {
            path: path.into(),
            mime_type: mime_type.into(),
            content: Box::pin(content),
        }
    }
}

/// Raw values of the new bill form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BillForm {
    pub expense_type: String,
    pub name: String,
    pub amount: String,
    pub date: String,
    pub vat: String,
    pub pct: String,
    pub commentary: String,
}

/// Controller of the new bill form.
///
/// Receipts are uploaded as soon as they are selected. Submitting does not
/// wait for that upload: whatever the draft holds at that moment is sent.
pub struct NewBill {
    store: Rc<dyn BillStore>,
    session: Session,
    on_navigate: Callback<Route>,
    on_error: Callback<StoreError>,
    spawner: Spawner,
    draft: Rc<RefCell<DraftUpload>>,
}

impl NewBill {
    pub fn new(store: Rc<dyn BillStore>, session: Session, on_navigate: Callback<Route>, spawner: Spawner) -> Self {
        Self {
            store,
            session,
            on_navigate,
            on_error: Callback::from(|_| ()),
            spawner,
            draft: Rc::new(RefCell::new(DraftUpload::default())),
        }
    }

    /// Also report upload failures to `on_error`, in addition to the log
    pub fn with_error_channel(mut self, on_error: Callback<StoreError>) -> Self {
        self.on_error = on_error;
        self
    }

    pub fn draft(&self) -> DraftUpload {
        self.draft.borrow().clone()
    }

    /// Validate the selected receipt and start uploading it.
    ///
    /// An unsupported extension is returned as an error; the file is neither
    /// read nor sent. Reading and uploading run in the background and the
    /// result lands in the draft.
    pub fn handle_change_file(&self, file: SelectedFile) -> Result<ReceiptFormat, BillError> {
        let format = ReceiptFormat::from_file_name(&file.path).map_err(|e| {
            Logger::warn_with_component(COMPONENT, &e.to_string());
            e
        })?;

        let file_name = receipt_file_name(&file.path).to_string();
        let mime_type = if file.mime_type.is_empty() {
            format.mime_type().to_string()
        } else {
            file.mime_type
        };
        let email = self.session.email.clone();
        let content = file.content;

        let store = self.store.clone();
        let draft = self.draft.clone();
        let on_error = self.on_error.clone();
        self.spawner.spawn(async move {
            let content = match content.await {
                Ok(content) => content,
                Err(e) => {
                    Logger::error_with_component(COMPONENT, &format!("Could not read receipt {}: {}", file_name, e));
                    return;
                }
            };
            let upload = ReceiptUpload {
                file_name: file_name.clone(),
                mime_type,
                content,
                email,
            };

            match store.create(upload).await {
                Ok(created) => {
                    Logger::debug_with_component(COMPONENT, &format!("Receipt {} stored as bill {}", file_name, created.key));
                    *draft.borrow_mut() = DraftUpload {
                        file_url: Some(created.file_url),
                        file_name: Some(file_name),
                        bill_id: Some(created.key),
                    };
                }
                Err(e) => {
                    Logger::error_with_component(COMPONENT, &format!("Receipt upload failed: {}", e));
                    on_error.emit(e);
                }
            }
        });

        Ok(format)
    }

    /// Send the completed bill and go back to the list without waiting for the store
    pub fn handle_submit(&self, form: BillForm) {
        let draft = self.draft();
        let submission = self.build_submission(form, &draft);
        let selector = draft.bill_id;

        let store = self.store.clone();
        self.spawner.spawn(async move {
            if let Err(e) = store.update(selector.as_deref(), &submission).await {
                Logger::error_with_component(COMPONENT, &format!("Failed to save bill: {}", e));
            }
        });

        self.on_navigate.emit(Route::Bills);
    }

    fn build_submission(&self, form: BillForm, draft: &DraftUpload) -> BillSubmission {
        let amount = form.amount.trim().replace(',', ".").parse::<f64>().unwrap_or_else(|_| {
            Logger::warn_with_component(COMPONENT, &format!("Unreadable amount {:?}, sending 0", form.amount));
            0.0
        });
        let pct = form.pct.trim().parse::<u32>().unwrap_or(DEFAULT_PCT);

        BillSubmission {
            email: self.session.email.clone(),
            expense_type: form.expense_type,
            name: form.name,
            amount,
            date: form.date,
            vat: form.vat,
            pct,
            commentary: form.commentary,
            file_url: draft.file_url.clone(),
            file_name: draft.file_name.clone(),
            status: BillStatus::Pending,
        }
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use std::cell::Cell;

    use shared::{CreatedReceipt, UserType};

    use super::*;
    use crate::containers::test_support::{MockStore, TaskQueue};

    const EMAIL: &str = "employee@test.tld";

    struct Fixture {
        store: Rc<MockStore>,
        tasks: TaskQueue,
        routes: Rc<RefCell<Vec<Route>>>,
        errors: Rc<RefCell<Vec<StoreError>>>,
        new_bill: NewBill,
    }

    fn fixture() -> Fixture {
        let store = Rc::new(MockStore::default());
        let tasks = TaskQueue::default();
        let routes = Rc::new(RefCell::new(Vec::<Route>::new()));
        let errors = Rc::new(RefCell::new(Vec::<StoreError>::new()));

        let session = Session {
            user_type: UserType::Employee,
            email: EMAIL.to_string(),
        };
        let on_navigate = {
            let routes = routes.clone();
            Callback::from(move |route: Route| routes.borrow_mut().push(route))
        };
        let on_error = {
            let errors = errors.clone();
            Callback::from(move |error: StoreError| errors.borrow_mut().push(error))
        };
        let new_bill = NewBill::new(store.clone(), session, on_navigate, tasks.spawner()).with_error_channel(on_error);

        Fixture {
            store,
            tasks,
            routes,
            errors,
            new_bill,
        }
    }

    fn file(path: &str, mime_type: &str) -> SelectedFile {
        SelectedFile::new(path, mime_type, std::future::ready(Ok(b"dummy content".to_vec())))
    }

    fn filled_form() -> BillForm {
        BillForm {
            expense_type: "Transports".to_string(),
            name: "Vol Paris Londres".to_string(),
            amount: "348".to_string(),
            date: "2021-04-01".to_string(),
            vat: "70".to_string(),
            pct: "".to_string(),
            commentary: "séminaire".to_string(),
        }
    }

    #[tokio::test]
    async fn test_invalid_extension_is_rejected_without_upload() {
        let f = fixture();
        let read = Rc::new(Cell::new(false));

        for path in ["example.pdf", "C:\\fakepath\\notes.txt", "receipt"] {
            let read = read.clone();
            let selected = SelectedFile::new(path, "application/pdf", async move {
                read.set(true);
                Ok::<_, String>(b"%PDF".to_vec())
            });
            let result = f.new_bill.handle_change_file(selected);
            assert!(matches!(result, Err(BillError::UnsupportedReceipt(_))));
        }

        assert_eq!(f.tasks.len(), 0);
        assert!(!read.get());
        f.tasks.run_all().await;
        assert!(f.store.uploads.borrow().is_empty());
        assert_eq!(f.new_bill.draft(), DraftUpload::default());
    }

    #[tokio::test]
    async fn test_valid_extension_uploads_once_with_email() {
        let f = fixture();

        let format = f.new_bill.handle_change_file(file("C:\\fakepath\\Receipt.JPEG", "")).unwrap();
        assert_eq!(format, ReceiptFormat::Jpeg);
        assert_eq!(f.tasks.len(), 1);

        f.tasks.run_all().await;

        let uploads = f.store.uploads.borrow();
        assert_eq!(uploads.len(), 1);
        assert_eq!(uploads[0].file_name, "Receipt.JPEG");
        assert_eq!(uploads[0].mime_type, "image/jpeg");
        assert_eq!(uploads[0].content, b"dummy content");
        assert_eq!(uploads[0].email, EMAIL);
    }

    #[tokio::test]
    async fn test_upload_success_records_draft() {
        let f = fixture();
        *f.store.create_response.borrow_mut() = Some(CreatedReceipt {
            file_url: "http://localhost:3000/example.png".to_string(),
            key: "12345".to_string(),
        });

        f.new_bill
            .handle_change_file(file("http://localhost:3000/example.png", "image/png"))
            .unwrap();
        assert_eq!(f.new_bill.draft(), DraftUpload::default());

        f.tasks.run_all().await;

        let draft = f.new_bill.draft();
        assert_eq!(draft.file_url.as_deref(), Some("http://localhost:3000/example.png"));
        assert_eq!(draft.file_name.as_deref(), Some("example.png"));
        assert_eq!(draft.bill_id.as_deref(), Some("12345"));
        assert!(f.errors.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_upload_failure_reaches_error_channel() {
        let f = fixture();
        let not_found = StoreError::Status { status: 404 };
        *f.store.create_error.borrow_mut() = Some(not_found.clone());

        f.new_bill.handle_change_file(file("example.png", "image/png")).unwrap();
        f.tasks.run_all().await;

        assert_eq!(*f.errors.borrow(), [not_found]);
        assert_eq!(f.errors.borrow()[0].to_string(), "Error 404");
        assert_eq!(f.new_bill.draft(), DraftUpload::default());
        assert!(f.routes.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_unreadable_receipt_is_not_uploaded() {
        let f = fixture();
        let unreadable = SelectedFile::new("receipt.png", "image/png", async { Err::<Vec<u8>, _>("NotReadableError".to_string()) });

        assert_eq!(f.new_bill.handle_change_file(unreadable), Ok(ReceiptFormat::Png));
        f.tasks.run_all().await;

        assert!(f.store.uploads.borrow().is_empty());
        assert_eq!(f.new_bill.draft(), DraftUpload::default());
    }

    #[tokio::test]
    async fn test_last_resolved_upload_wins() {
        let f = fixture();

        f.new_bill.handle_change_file(file("first.png", "image/png")).unwrap();
        f.new_bill.handle_change_file(file("second.jpg", "image/jpeg")).unwrap();

        let mut tasks = f.tasks.take();
        assert_eq!(tasks.len(), 2);
        let first = tasks.remove(0);
        let second = tasks.remove(0);

        second.await;
        first.await;

        let draft = f.new_bill.draft();
        assert_eq!(draft.file_name.as_deref(), Some("first.png"));
        assert_eq!(draft.bill_id.as_deref(), Some("key-first.png"));
    }

    #[tokio::test]
    async fn test_submit_navigates_before_update_resolves() {
        let f = fixture();
        f.new_bill.handle_change_file(file("receipt.png", "image/png")).unwrap();
        f.tasks.run_all().await;

        f.new_bill.handle_submit(filled_form());

        assert_eq!(*f.routes.borrow(), [Route::Bills]);
        assert!(f.store.updates.borrow().is_empty());

        f.tasks.run_all().await;

        let updates = f.store.updates.borrow();
        assert_eq!(updates.len(), 1);
        let (selector, submission) = &updates[0];
        assert_eq!(selector.as_deref(), Some("key-receipt.png"));
        assert_eq!(submission.email, EMAIL);
        assert_eq!(submission.expense_type, "Transports");
        assert_eq!(submission.amount, 348.0);
        assert_eq!(submission.pct, DEFAULT_PCT);
        assert_eq!(submission.status, BillStatus::Pending);
        assert_eq!(submission.file_name.as_deref(), Some("receipt.png"));
        assert_eq!(
            submission.file_url.as_deref(),
            Some("https://localhost:3456/images/receipt.png")
        );
    }

    #[tokio::test]
    async fn test_submit_without_upload_sends_no_file_fields() {
        let f = fixture();

        f.new_bill.handle_submit(BillForm {
            amount: "not a number".to_string(),
            pct: "10".to_string(),
            ..filled_form()
        });
        f.tasks.run_all().await;

        let updates = f.store.updates.borrow();
        let (selector, submission) = &updates[0];
        assert_eq!(*selector, None);
        assert_eq!(submission.file_url, None);
        assert_eq!(submission.file_name, None);
        assert_eq!(submission.amount, 0.0);
        assert_eq!(submission.pct, 10);
        assert_eq!(*f.routes.borrow(), [Route::Bills]);
    }
}
