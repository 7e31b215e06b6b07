//! Bills Frontend App
//!
//! Root component: loads the session, wires the remote store, and
//! switches the main region on the current route.

use std::rc::Rc;

use leptos::prelude::*;

use crate::components::{BillsPage, NewBillForm};
use crate::context::AppContext;
use crate::routes::Route;
use crate::session;
use crate::store::{BillsStore, HttpStore, API_BASE};

#[component]
pub fn App() -> impl IntoView {
    let (route, set_route) = signal(Route::Bills);

    // Session is read once here and passed down; the login flow (out of
    // scope) guarantees it is present.
    let user = session::current_user().unwrap_or_default();
    let store: Rc<dyn BillsStore> = Rc::new(HttpStore::new(API_BASE));
    provide_context(AppContext::new((route, set_route), user, store));

    view! {
        <div class="app-layout">
            <VerticalLayout/>
            <main class="main-content">
                {move || match route.get() {
                    Route::Bills => view! { <BillsPage/> }.into_any(),
                    Route::NewBill => view! { <NewBillForm/> }.into_any(),
                }}
            </main>
        </div>
    }
}

/// Left navigation rail; the active route's icon is highlighted
#[component]
fn VerticalLayout() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let icon_class = move |target: Route| {
        if ctx.route.get() == target {
            "layout-icon active-icon"
        } else {
            "layout-icon"
        }
    };
    view! {
        <nav class="vertical-navbar">
            <div data-testid="icon-window" class=move || icon_class(Route::Bills)>
                "🗔"
            </div>
            <div data-testid="icon-mail" class=move || icon_class(Route::NewBill)>
                "✉"
            </div>
        </nav>
    }
}
