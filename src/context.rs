//! Application Context
//!
//! Shared collaborators provided via Leptos Context API: the navigation
//! signal, the session user, and the remote store handle. Controllers
//! receive everything here explicitly; nothing is read ambiently later.

use std::rc::Rc;

use leptos::prelude::*;

use crate::models::User;
use crate::routes::Route;
use crate::store::BillsStore;

/// App-wide collaborators provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Current route - read
    pub route: ReadSignal<Route>,
    /// Current route - write
    set_route: WriteSignal<Route>,
    /// Signed-in user, loaded once at startup
    user: StoredValue<User>,
    /// Remote bills store; local storage, the handle is single-threaded
    store: StoredValue<Rc<dyn BillsStore>, LocalStorage>,
}

impl AppContext {
    pub fn new(
        route: (ReadSignal<Route>, WriteSignal<Route>),
        user: User,
        store: Rc<dyn BillsStore>,
    ) -> Self {
        Self {
            route: route.0,
            set_route: route.1,
            user: StoredValue::new(user),
            store: StoredValue::new_local(store),
        }
    }

    pub fn user(&self) -> User {
        self.user.get_value()
    }

    pub fn store(&self) -> Rc<dyn BillsStore> {
        self.store.get_value()
    }

    /// Replaces the current view with the one for `route` and mirrors
    /// it in the address bar
    pub fn navigate(&self, route: Route) {
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_hash(route.path());
        }
        self.set_route.set(route);
    }
}
