use std::rc::Rc;

use shared::{format_date, FormattedBill};
use yew::Callback;

use crate::routes::Route;
use crate::services::logging::Logger;
use crate::services::store::{BillStore, StoreError};

const COMPONENT: &str = "bills";

/// Controller of the bills list page
pub struct Bills {
    store: Rc<dyn BillStore>,
    on_navigate: Callback<Route>,
    on_preview: Callback<String>,
}

impl Bills {
    /// `on_preview` receives the receipt URL to show in the modal
    pub fn new(store: Rc<dyn BillStore>, on_navigate: Callback<Route>, on_preview: Callback<String>) -> Self {
        Self {
            store,
            on_navigate,
            on_preview,
        }
    }

    pub fn handle_click_new_bill(&self) {
        self.on_navigate.emit(Route::NewBill);
    }

    /// Open the receipt modal for the URL carried by the clicked eye icon
    pub fn handle_click_icon_eye(&self, bill_url: Option<String>) {
        match bill_url.filter(|url| !url.is_empty() && url != "null") {
            Some(url) => self.on_preview.emit(url),
            None => Logger::warn_with_component(COMPONENT, "Bill has no receipt to preview"),
        }
    }

    /// Fetch the user's bills and format them for display, keeping store order.
    ///
    /// A bill whose date cannot be formatted keeps its raw date. Store
    /// failures are returned to the caller.
    pub async fn get_bills(&self) -> Result<Vec<FormattedBill>, StoreError> {
        let bills = self.store.list().await?;
        Logger::debug_with_component(COMPONENT, &format!("Listed {} bills", bills.len()));

        Ok(bills
            .into_iter()
            .map(|bill| {
                let date = match format_date(&bill.date) {
                    Ok(date) => date,
                    Err(e) => {
                        Logger::warn_with_component(COMPONENT, &format!("{} for bill {}", e, bill.id));
                        bill.date.clone()
                    }
                };
                FormattedBill::new(bill, date)
            })
            .collect())
    }
}
