//! UI Components
//!
//! The two page controllers and the receipt preview modal.

mod bills_page;
mod new_bill_form;
mod receipt_modal;

pub use bills_page::BillsPage;
pub use new_bill_form::NewBillForm;
pub use receipt_modal::ReceiptModal;
