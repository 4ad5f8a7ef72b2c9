use shared::{Session, UserType};
use yew::prelude::*;

mod components;
mod config;
mod containers;
mod routes;
mod services;

use components::bills_page::BillsPage;
use components::new_bill_page::NewBillPage;
use components::status_pages::ErrorPage;
use components::vertical_layout::VerticalLayout;
use config::AppConfig;
use routes::Route;
use services::api::ApiClient;
use services::logging::{self, Logger};
use services::session;
use services::store::StoreHandle;

#[derive(Properties, PartialEq)]
struct AppProps {
    store: StoreHandle,
    session: Option<Session>,
}

#[function_component(App)]
fn app(props: &AppProps) -> Html {
    let route = use_state(routes::current_route);

    // Follow back/forward navigation and hand-edited hashes
    {
        let route = route.clone();
        use_effect_with((), move |_| {
            let listener = gloo::events::EventListener::new(&gloo::utils::window(), "hashchange", move |_| {
                route.set(routes::current_route());
            });
            move || drop(listener)
        });
    }

    let on_navigate = {
        let route = route.clone();
        Callback::from(move |next: Route| {
            Logger::debug_with_component("router", &format!("Navigating to {}", next.path()));
            routes::push_route(next);
            route.set(next);
        })
    };

    let session = match &props.session {
        Some(session) if session.user_type == UserType::Employee => session.clone(),
        _ => {
            return html! {
                <ErrorPage message={Some("Aucune session employé : veuillez vous connecter.".to_string())} />
            }
        }
    };

    html! {
        <div class="layout">
            <VerticalLayout active={*route} on_navigate={on_navigate.clone()} />
            <div class="layout-content">
                {match *route {
                    Route::Bills => html! {
                        <BillsPage store={props.store.clone()} on_navigate={on_navigate.clone()} />
                    },
                    Route::NewBill => html! {
                        <NewBillPage store={props.store.clone()} {session} on_navigate={on_navigate.clone()} />
                    },
                }}
            </div>
        </div>
    }
}

fn main() {
    logging::init(log::LevelFilter::Info);
    let config = AppConfig::load();
    log::set_max_level(config.log_level);
    Logger::info_with_component("app", &format!("Using bills API at {}", config.api_base_url));

    let store = StoreHandle::new(ApiClient::with_base_url(config.api_base_url).with_token(session::load_token()));
    let props = AppProps {
        store,
        session: session::load_session(),
    };

    yew::Renderer::<App>::with_props(props).render();
}
