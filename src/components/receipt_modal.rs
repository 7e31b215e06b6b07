//! Receipt Modal
//!
//! Image preview for a bill's receipt. Purely presentational; the URL
//! comes from the clicked row, no network call is made here.

use leptos::prelude::*;

/// Fixed display width for the receipt image
const IMAGE_WIDTH: u32 = 480;

/// Modal displaying the receipt image; clicking anywhere closes it
#[component]
pub fn ReceiptModal(
    url: ReadSignal<Option<String>>,
    set_url: WriteSignal<Option<String>>,
) -> impl IntoView {
    view! {
        {move || {
            url.get()
                .map(|receipt_url| {
                    view! {
                        <div
                            class="modal"
                            data-testid="modal-receipt"
                            on:click=move |_| set_url.set(None)
                        >
                            <div class="modal-body">
                                <p>"Justificatif"</p>
                                <img src=receipt_url width=IMAGE_WIDTH alt="Bill"/>
                            </div>
                        </div>
                    }
                })
        }}
    }
}
