//! Bill List Page
//!
//! Lists the signed-in employee's bills: fetches the collection, sorts it
//! most-recent-first, formats each row for display, and wires the receipt
//! preview and the "new bill" navigation.

use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use crate::components::receipt_modal::ReceiptModal;
use crate::context::AppContext;
use crate::error::StoreError;
use crate::format;
use crate::models::Bill;
use crate::routes::Route;
use crate::store::BillsStore;

/// A bill prepared for rendering: raw record plus localized date/status
#[derive(Debug, Clone, PartialEq)]
pub struct BillRow {
    pub bill: Bill,
    pub display_date: String,
    pub display_status: String,
}

impl BillRow {
    fn new(bill: Bill) -> Self {
        let display_date = match format::format_date(&bill.date) {
            Ok(formatted) => formatted,
            Err(err) => {
                // best-effort formatting: keep the raw value, never drop the record
                log::warn!("unformattable bill date {:?}: {err}", bill.date);
                bill.date.clone()
            }
        };
        let display_status = format::format_status(bill.status).to_string();
        Self {
            bill,
            display_date,
            display_status,
        }
    }
}

/// Most recent first. ISO dates order lexicographically, so malformed
/// dates sort as plain text instead of failing the whole list.
fn sort_by_date_desc(bills: &mut [Bill]) {
    bills.sort_by(|a, b| b.date.cmp(&a.date));
}

/// Read side of the bill lifecycle: fetch, sort, format. Never mutates
/// a record.
pub struct BillsController {
    store: Rc<dyn BillsStore>,
    on_navigate: Rc<dyn Fn(Route)>,
}

impl BillsController {
    pub fn new(store: Rc<dyn BillsStore>, on_navigate: Rc<dyn Fn(Route)>) -> Self {
        Self { store, on_navigate }
    }

    /// Fetches the bill collection, sorted descending by date and
    /// formatted for display
    pub async fn get_bills(&self) -> Result<Vec<BillRow>, StoreError> {
        let mut bills = self.store.list().await?;
        sort_by_date_desc(&mut bills);
        Ok(bills.into_iter().map(BillRow::new).collect())
    }

    pub fn handle_click_new_bill(&self) {
        (self.on_navigate)(Route::NewBill);
    }
}

/// Bill list page, entered on the bills route
#[component]
pub fn BillsPage() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let (rows, set_rows) = signal(Vec::<BillRow>::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (loading, set_loading) = signal(true);
    let (preview, set_preview) = signal::<Option<String>>(None);

    let controller = Rc::new(BillsController::new(
        ctx.store(),
        Rc::new(move |route| ctx.navigate(route)),
    ));

    // One-shot fetch on activation
    {
        let controller = controller.clone();
        Effect::new(move |_| {
            let controller = controller.clone();
            spawn_local(async move {
                match controller.get_bills().await {
                    Ok(fetched) => set_rows.set(fetched),
                    Err(err) => set_error.set(Some(err.to_string())),
                }
                set_loading.set(false);
            });
        });
    }

    let on_new_bill = {
        let controller = controller.clone();
        move |_| controller.handle_click_new_bill()
    };

    // Purely presentational: the receipt URL comes off the icon's data
    // attribute, no network call involved
    let on_icon_eye = move |ev: web_sys::MouseEvent| {
        let url = ev
            .current_target()
            .and_then(|target| target.dyn_into::<web_sys::Element>().ok())
            .and_then(|el| el.get_attribute("data-bill-url"))
            .unwrap_or_default();
        if url.is_empty() {
            web_sys::console::warn_1(&"[Bills] row has no receipt url".into());
        } else {
            set_preview.set(Some(url));
        }
    };

    view! {
        <div class="bills-page">
            <div class="content-header">
                <h1 class="content-title">"Mes notes de frais"</h1>
                <button
                    class="btn-new-bill"
                    data-testid="btn-new-bill"
                    on:click=on_new_bill
                >
                    "Nouvelle note de frais"
                </button>
            </div>

            {move || {
                if let Some(message) = error.get() {
                    view! {
                        <div class="error-message" data-testid="error-message">{message}</div>
                    }
                        .into_any()
                } else if loading.get() {
                    view! { <div class="loading">"Loading..."</div> }.into_any()
                } else {
                    view! {
                        <table class="bills-table">
                            <thead>
                                <tr>
                                    <th>"Type"</th>
                                    <th>"Nom"</th>
                                    <th>"Date"</th>
                                    <th>"Montant"</th>
                                    <th>"Statut"</th>
                                    <th>"Actions"</th>
                                </tr>
                            </thead>
                            <tbody data-testid="tbody">
                                <For
                                    each=move || rows.get()
                                    key=|row| row.bill.id.clone()
                                    children=move |row| {
                                        let receipt_url =
                                            row.bill.file_url.clone().unwrap_or_default();
                                        view! {
                                            <tr>
                                                <td>{row.bill.bill_type.clone()}</td>
                                                <td>{row.bill.name.clone()}</td>
                                                <td>{row.display_date.clone()}</td>
                                                <td>{format!("{} €", row.bill.amount)}</td>
                                                <td>{row.display_status.clone()}</td>
                                                <td>
                                                    <span
                                                        class="icon-eye"
                                                        data-testid="icon-eye"
                                                        data-bill-url=receipt_url
                                                        on:click=on_icon_eye
                                                    >
                                                        "👁"
                                                    </span>
                                                </td>
                                            </tr>
                                        }
                                    }
                                />
                            </tbody>
                        </table>
                    }
                        .into_any()
                }
            }}

            <ReceiptModal url=preview set_url=set_preview/>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::store::mock::{bill, MockStore};

    fn noop_nav() -> Rc<dyn Fn(Route)> {
        Rc::new(|_| {})
    }

    #[tokio::test]
    async fn bills_are_ordered_most_recent_first() {
        let store = Rc::new(MockStore::default());
        store.bills.borrow_mut().extend([
            bill("b1", "2004-04-04"),
            bill("b2", "2002-02-02"),
            bill("b3", "2003-03-03"),
        ]);
        let controller = BillsController::new(store, noop_nav());

        let rows = controller.get_bills().await.expect("list should succeed");
        let dates: Vec<&str> = rows.iter().map(|r| r.bill.date.as_str()).collect();
        assert_eq!(dates, ["2004-04-04", "2003-03-03", "2002-02-02"]);
    }

    #[tokio::test]
    async fn rows_carry_localized_date_and_status() {
        let store = Rc::new(MockStore::default());
        store.bills.borrow_mut().push(bill("b1", "2004-04-04"));
        let controller = BillsController::new(store, noop_nav());

        let rows = controller.get_bills().await.expect("list should succeed");
        assert_eq!(rows[0].display_date, "4 Avr. 04");
        assert_eq!(rows[0].display_status, "En attente");
    }

    #[tokio::test]
    async fn malformed_date_keeps_the_raw_record() {
        let store = Rc::new(MockStore::default());
        store
            .bills
            .borrow_mut()
            .extend([bill("b1", "2004-04-04"), bill("b2", "pas-une-date")]);
        let controller = BillsController::new(store, noop_nav());

        let rows = controller.get_bills().await.expect("list should succeed");
        assert_eq!(rows.len(), 2);
        let odd = rows
            .iter()
            .find(|r| r.bill.id == "b2")
            .expect("record must not be dropped");
        assert_eq!(odd.display_date, "pas-une-date");
    }

    #[tokio::test]
    async fn list_rejection_surfaces_the_error_message() {
        for message in ["Erreur 404", "Erreur 500"] {
            let store = Rc::new(MockStore::default());
            *store.list_error.borrow_mut() = Some(message.to_string());
            let controller = BillsController::new(store, noop_nav());

            let err = controller.get_bills().await.expect_err("list should fail");
            assert_eq!(err.to_string(), message);
        }
    }

    #[tokio::test]
    async fn new_bill_click_navigates_to_the_form() {
        let seen = Rc::new(Cell::new(None));
        let on_navigate: Rc<dyn Fn(Route)> = {
            let seen = seen.clone();
            Rc::new(move |route| seen.set(Some(route)))
        };
        let controller = BillsController::new(Rc::new(MockStore::default()), on_navigate);

        controller.handle_click_new_bill();
        assert_eq!(seen.get(), Some(Route::NewBill));
    }
}
