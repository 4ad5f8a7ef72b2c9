/// Views of the employee space
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Bills,
    NewBill,
}

impl Route {
    /// Location hash identifying the view
    pub fn path(&self) -> &'static str {
        match self {
            Route::Bills => "#employee/bills",
            Route::NewBill => "#employee/bill/new",
        }
    }

    pub fn from_path(path: &str) -> Option<Route> {
        match path.trim_start_matches('#').trim_end_matches('/') {
            "employee/bills" => Some(Route::Bills),
            "employee/bill/new" => Some(Route::NewBill),
            _ => None,
        }
    }
}

/// Route named by the current location hash, defaulting to the bills list
pub fn current_route() -> Route {
    gloo::utils::window()
        .location()
        .hash()
        .ok()
        .and_then(|hash| Route::from_path(&hash))
        .unwrap_or(Route::Bills)
}

pub fn push_route(route: Route) {
    if gloo::utils::window().location().set_hash(route.path()).is_err() {
        crate::services::logging::Logger::warn_with_component("router", "Could not update location hash");
    }
}
