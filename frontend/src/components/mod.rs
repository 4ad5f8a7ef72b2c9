pub mod bills_page;
pub mod new_bill_page;
pub mod receipt_modal;
pub mod status_pages;
pub mod vertical_layout;
