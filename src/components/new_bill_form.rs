//! New Bill Form
//!
//! Creates a bill: validates and uploads the selected receipt, then
//! assembles the record from the typed form state and persists it.
//! Navigation back to the list happens only once persistence succeeds.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::{JsCast, JsValue};

use crate::context::AppContext;
use crate::error::StoreError;
use crate::models::{Bill, BillStatus, FileRef, User};
use crate::routes::Route;
use crate::store::BillsStore;
use crate::upload::is_supported_receipt;

/// Expense categories offered by the form
const BILL_TYPES: &[&str] = &[
    "Transports",
    "Restaurants et bars",
    "Hôtel et logement",
    "Services en ligne",
    "IT et électronique",
    "Equipement et matériel",
    "Fournitures de bureau",
];

/// Default reimbursement percentage when the field is left empty
const DEFAULT_PCT: u32 = 20;

/// Outcome of one file selection
#[derive(Debug)]
pub enum FileSelection {
    /// Type accepted, receipt stored, reference recorded
    Uploaded,
    /// Type rejected before any network call
    UnsupportedType,
    /// Upload settled after a newer selection; result discarded
    Superseded,
    /// Type accepted but the store rejected the upload
    UploadFailed(StoreError),
}

/// Form field values, populated by the change handlers and read
/// atomically at submit time
#[derive(Debug, Clone, Default)]
pub struct BillFields {
    pub bill_type: String,
    pub name: String,
    pub date: String,
    pub amount: f64,
    pub vat: Option<f64>,
    pub pct: Option<u32>,
    pub commentary: Option<String>,
}

#[derive(Default)]
struct UploadState {
    /// Monotonically increasing selection token; a settling upload only
    /// applies while its token is still the current one
    selection: u64,
    file_ref: Option<FileRef>,
    file_name: Option<String>,
}

/// Write side of the bill lifecycle: receipt upload plus record
/// submission.
pub struct NewBillController {
    store: Rc<dyn BillsStore>,
    user: User,
    on_navigate: Rc<dyn Fn(Route)>,
    state: RefCell<UploadState>,
}

impl NewBillController {
    pub fn new(store: Rc<dyn BillsStore>, user: User, on_navigate: Rc<dyn Fn(Route)>) -> Self {
        Self {
            store,
            user,
            on_navigate,
            state: RefCell::new(UploadState::default()),
        }
    }

    /// Validates the selected file and, if acceptable, uploads it and
    /// records the returned reference. Re-selection supersedes any
    /// in-flight upload; a rejected selection clears the held reference
    /// so an unvalidated file can never ride along on submit.
    pub async fn handle_change_file(
        &self,
        file_name: &str,
        mime: &str,
        file: Vec<u8>,
    ) -> FileSelection {
        if !is_supported_receipt(mime, file_name) {
            let mut state = self.state.borrow_mut();
            state.selection += 1;
            state.file_ref = None;
            state.file_name = None;
            return FileSelection::UnsupportedType;
        }

        let token = {
            let mut state = self.state.borrow_mut();
            state.selection += 1;
            // the new selection owns the slot from here on; a failed
            // upload must not resurrect the previous file
            state.file_ref = None;
            state.file_name = None;
            state.selection
        };

        match self
            .store
            .create(file, file_name, mime, &self.user.email)
            .await
        {
            Ok(file_ref) => {
                let mut state = self.state.borrow_mut();
                if state.selection != token {
                    return FileSelection::Superseded;
                }
                state.file_ref = Some(file_ref);
                state.file_name = Some(file_name.to_string());
                FileSelection::Uploaded
            }
            Err(err) => {
                if self.state.borrow().selection != token {
                    return FileSelection::Superseded;
                }
                FileSelection::UploadFailed(err)
            }
        }
    }

    /// Assembles the bill from the form fields, the held file reference
    /// and the session email, persists it, and navigates back to the
    /// list on success. On failure the caller shows the error inline and
    /// the user may resubmit.
    pub async fn handle_submit(&self, fields: BillFields) -> Result<Bill, StoreError> {
        let (file_ref, file_name) = {
            let state = self.state.borrow();
            (state.file_ref.clone(), state.file_name.clone())
        };
        let bill = Bill {
            id: file_ref
                .as_ref()
                .map(|f| f.file_id.clone())
                .unwrap_or_default(),
            email: self.user.email.clone(),
            bill_type: fields.bill_type,
            name: fields.name,
            amount: fields.amount,
            date: fields.date,
            vat: fields.vat,
            pct: fields.pct.or(Some(DEFAULT_PCT)),
            commentary: fields.commentary,
            file_name,
            file_url: file_ref.map(|f| f.file_url),
            status: BillStatus::Pending,
            comment_admin: None,
        };

        let saved = self.store.update(&bill).await?;
        (self.on_navigate)(Route::Bills);
        Ok(saved)
    }
}

async fn read_file_bytes(file: &web_sys::File) -> Result<Vec<u8>, JsValue> {
    let buffer = wasm_bindgen_futures::JsFuture::from(file.array_buffer()).await?;
    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}

/// New bill form page, entered on the new-bill route
#[component]
pub fn NewBillForm() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let (bill_type, set_bill_type) = signal(String::from(BILL_TYPES[0]));
    let (name, set_name) = signal(String::new());
    let (date, set_date) = signal(String::new());
    let (amount, set_amount) = signal(String::new());
    let (vat, set_vat) = signal(String::new());
    let (pct, set_pct) = signal(String::new());
    let (commentary, set_commentary) = signal(String::new());
    let (file_error, set_file_error) = signal(false);
    let (submit_error, set_submit_error) = signal::<Option<String>>(None);

    let controller = Rc::new(NewBillController::new(
        ctx.store(),
        ctx.user(),
        Rc::new(move |route| ctx.navigate(route)),
    ));

    let on_file_change = {
        let controller = controller.clone();
        move |ev: web_sys::Event| {
            let Some(input) = ev
                .target()
                .and_then(|target| target.dyn_into::<web_sys::HtmlInputElement>().ok())
            else {
                return;
            };
            // The input keeps the rejected file's name on display; only
            // the held reference is cleared on rejection.
            let Some(file) = input.files().and_then(|files| files.get(0)) else {
                return;
            };
            let file_name = file.name();
            let mime = file.type_();
            // visibility follows validation alone, settled before the
            // upload even starts
            set_file_error.set(!is_supported_receipt(&mime, &file_name));
            let controller = controller.clone();
            spawn_local(async move {
                let bytes = match read_file_bytes(&file).await {
                    Ok(bytes) => bytes,
                    Err(_) => {
                        web_sys::console::error_1(
                            &"[NewBill] could not read the selected file".into(),
                        );
                        return;
                    }
                };
                if let FileSelection::UploadFailed(err) =
                    controller.handle_change_file(&file_name, &mime, bytes).await
                {
                    web_sys::console::error_1(
                        &format!("[NewBill] receipt upload failed: {err}").into(),
                    );
                }
            });
        }
    };

    let on_submit = {
        let controller = controller.clone();
        move |ev: web_sys::SubmitEvent| {
            ev.prevent_default();
            let commentary_value = commentary.get();
            let fields = BillFields {
                bill_type: bill_type.get(),
                name: name.get(),
                date: date.get(),
                amount: amount.get().parse().unwrap_or(0.0),
                vat: vat.get().parse().ok(),
                pct: pct.get().parse().ok(),
                commentary: (!commentary_value.trim().is_empty()).then_some(commentary_value),
            };
            let controller = controller.clone();
            spawn_local(async move {
                match controller.handle_submit(fields).await {
                    Ok(_) => set_submit_error.set(None),
                    Err(err) => set_submit_error.set(Some(err.to_string())),
                }
            });
        }
    };

    let input_value = |ev: &web_sys::Event| -> String {
        ev.target()
            .and_then(|target| target.dyn_into::<web_sys::HtmlInputElement>().ok())
            .map(|input| input.value())
            .unwrap_or_default()
    };

    view! {
        <div class="new-bill-page">
            <h1 class="content-title">"Envoyer une note de frais"</h1>
            <form data-testid="form-new-bill" class="form-new-bill" on:submit=on_submit>
                <label>
                    "Type de dépense"
                    <select
                        data-testid="expense-type"
                        prop:value=move || bill_type.get()
                        on:change=move |ev| {
                            if let Some(select) = ev
                                .target()
                                .and_then(|t| t.dyn_into::<web_sys::HtmlSelectElement>().ok())
                            {
                                set_bill_type.set(select.value());
                            }
                        }
                    >
                        {BILL_TYPES
                            .iter()
                            .map(|t| view! { <option value=*t>{*t}</option> })
                            .collect_view()}
                    </select>
                </label>
                <label>
                    "Nom de la dépense"
                    <input
                        type="text"
                        data-testid="expense-name"
                        placeholder="Vol Paris Londres"
                        prop:value=move || name.get()
                        on:input=move |ev| set_name.set(input_value(&ev))
                    />
                </label>
                <label>
                    "Date"
                    <input
                        type="date"
                        data-testid="datepicker"
                        prop:value=move || date.get()
                        on:input=move |ev| set_date.set(input_value(&ev))
                    />
                </label>
                <label>
                    "Montant TTC"
                    <input
                        type="number"
                        data-testid="amount"
                        placeholder="348"
                        prop:value=move || amount.get()
                        on:input=move |ev| set_amount.set(input_value(&ev))
                    />
                </label>
                <label>
                    "TVA"
                    <input
                        type="number"
                        data-testid="vat"
                        placeholder="70"
                        prop:value=move || vat.get()
                        on:input=move |ev| set_vat.set(input_value(&ev))
                    />
                </label>
                <label>
                    "%"
                    <input
                        type="number"
                        data-testid="pct"
                        placeholder="20"
                        prop:value=move || pct.get()
                        on:input=move |ev| set_pct.set(input_value(&ev))
                    />
                </label>
                <label>
                    "Commentaire"
                    <textarea
                        data-testid="commentary"
                        prop:value=move || commentary.get()
                        on:input=move |ev| {
                            if let Some(area) = ev
                                .target()
                                .and_then(|t| t.dyn_into::<web_sys::HtmlTextAreaElement>().ok())
                            {
                                set_commentary.set(area.value());
                            }
                        }
                    ></textarea>
                </label>
                <label>
                    "Justificatif"
                    <input type="file" data-testid="file" on:change=on_file_change/>
                </label>
                <span
                    data-testid="file-error-message"
                    class="file-error-message"
                    class:hidden=move || !file_error.get()
                >
                    "Seuls les fichiers jpg, jpeg et png sont acceptés"
                </span>
                <p
                    data-testid="submit-error-message"
                    class="submit-error-message"
                    class:hidden=move || submit_error.get().is_none()
                >
                    {move || submit_error.get().unwrap_or_default()}
                </p>
                <button type="submit" class="btn-send-bill">"Envoyer"</button>
            </form>
        </div>
    }
}
