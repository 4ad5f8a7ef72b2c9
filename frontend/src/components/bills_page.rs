use std::rc::Rc;

use shared::FormattedBill;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;
use yew::prelude::*;

use super::receipt_modal::ReceiptModal;
use super::status_pages::{ErrorPage, LoadingPage};
use crate::containers::bills::Bills;
use crate::routes::Route;
use crate::services::logging::Logger;
use crate::services::store::StoreHandle;

#[derive(Clone, PartialEq)]
enum BillsView {
    Loading,
    Loaded(Vec<FormattedBill>),
    Failed(String),
}

#[derive(Properties, PartialEq)]
pub struct BillsPageProps {
    pub store: StoreHandle,
    pub on_navigate: Callback<Route>,
}

#[function_component(BillsPage)]
pub fn bills_page(props: &BillsPageProps) -> Html {
    let view = use_state(|| BillsView::Loading);
    let preview = use_state(|| Option::<String>::None);

    let controller: Rc<Bills> = {
        let store = props.store.clone();
        let on_navigate = props.on_navigate.clone();
        let preview = preview.clone();
        use_memo((), move |_| {
            Bills::new(store.0, on_navigate, Callback::from(move |url: String| preview.set(Some(url))))
        })
    };

    {
        let controller = controller.clone();
        let view = view.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                match controller.get_bills().await {
                    Ok(bills) => view.set(BillsView::Loaded(bills)),
                    Err(e) => {
                        Logger::error_with_component("bills-page", &format!("Failed to list bills: {}", e));
                        view.set(BillsView::Failed(e.to_string()));
                    }
                }
            });
            || ()
        });
    }

    let on_click_new_bill = {
        let controller = controller.clone();
        Callback::from(move |_: MouseEvent| controller.handle_click_new_bill())
    };

    let on_click_eye = {
        let controller = controller.clone();
        Callback::from(move |e: MouseEvent| {
            // Listeners are delegated to the app root, so walk up from the click target
            let bill_url = e
                .target()
                .and_then(|target| target.dyn_into::<Element>().ok())
                .and_then(|target| target.closest("[data-bill-url]").ok().flatten())
                .and_then(|icon| icon.get_attribute("data-bill-url"));
            controller.handle_click_icon_eye(bill_url);
        })
    };

    let on_close_preview = {
        let preview = preview.clone();
        Callback::from(move |_: ()| preview.set(None))
    };

    let bills = match &*view {
        BillsView::Loading => return html! { <LoadingPage /> },
        BillsView::Failed(message) => return html! { <ErrorPage message={Some(message.clone())} /> },
        BillsView::Loaded(bills) => bills,
    };

    html! {
        <div class="content">
            <div class="content-header">
                <div class="content-title">{"Mes notes de frais"}</div>
                <button
                    type="button"
                    data-testid="btn-new-bill"
                    class="btn btn-primary"
                    onclick={on_click_new_bill}
                >
                    {"Nouvelle note de frais"}
                </button>
            </div>
            <div id="data-table">
                <table class="table table-striped">
                    <thead>
                        <tr>
                            <th>{"Type"}</th>
                            <th>{"Nom"}</th>
                            <th>{"Date"}</th>
                            <th>{"Montant"}</th>
                            <th>{"Statut"}</th>
                            <th>{"Actions"}</th>
                        </tr>
                    </thead>
                    <tbody data-testid="tbody">
                        {for bills.iter().map(|bill| html! {
                            <tr key={bill.id.clone()}>
                                <td>{&bill.expense_type}</td>
                                <td>{&bill.name}</td>
                                <td>{&bill.date}</td>
                                <td>{format!("{} €", bill.amount)}</td>
                                <td>{&bill.status}</td>
                                <td>
                                    <div
                                        class="icon-actions"
                                        data-testid="icon-eye"
                                        data-bill-url={bill.file_url.clone().unwrap_or_default()}
                                        onclick={on_click_eye.clone()}
                                    >
                                        {"👁"}
                                    </div>
                                </td>
                            </tr>
                        })}
                    </tbody>
                </table>
            </div>
            <ReceiptModal url={(*preview).clone()} on_close={on_close_preview} />
        </div>
    }
}
