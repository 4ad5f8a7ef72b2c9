use std::rc::Rc;

use shared::{Session, EXPENSE_TYPES};
use web_sys::{FormData, HtmlFormElement, HtmlInputElement};
use yew::prelude::*;

use crate::containers::new_bill::{BillForm, NewBill, SelectedFile, FILE_ERROR_MESSAGE};
use crate::containers::Spawner;
use crate::routes::Route;
use crate::services::logging::Logger;
use crate::services::store::StoreHandle;

const COMPONENT: &str = "new-bill-page";

#[derive(Properties, PartialEq)]
pub struct NewBillPageProps {
    pub store: StoreHandle,
    pub session: Session,
    pub on_navigate: Callback<Route>,
}

#[function_component(NewBillPage)]
pub fn new_bill_page(props: &NewBillPageProps) -> Html {
    let file_error = use_state(|| false);

    let controller: Rc<NewBill> = {
        let store = props.store.clone();
        let session = props.session.clone();
        let on_navigate = props.on_navigate.clone();
        use_memo((), move |_| NewBill::new(store.0, session, on_navigate, Spawner::local()))
    };

    let on_change_file = {
        let controller = controller.clone();
        let file_error = file_error.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let Some(file) = input.files().and_then(|files| files.get(0)) else {
                return;
            };
            let mime_type = file.type_();
            let file = gloo::file::File::from(file);
            let selected = SelectedFile::new(input.value(), mime_type, async move {
                gloo::file::futures::read_as_bytes(&file)
                    .await
                    .map_err(|e| e.to_string())
            });

            match controller.handle_change_file(selected) {
                Ok(_) => file_error.set(false),
                Err(_) => {
                    input.set_value("");
                    file_error.set(true);
                }
            }
        })
    };

    let on_submit = {
        let controller = controller.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let form: HtmlFormElement = e.target_unchecked_into();
            let form_data = match FormData::new_with_form(&form) {
                Ok(form_data) => form_data,
                Err(e) => {
                    Logger::error_with_component(COMPONENT, &format!("Could not read form: {:?}", e));
                    return;
                }
            };
            let field = |name: &str| form_data.get(name).as_string().unwrap_or_default();

            controller.handle_submit(BillForm {
                expense_type: field("expense-type"),
                name: field("expense-name"),
                amount: field("amount"),
                date: field("datepicker"),
                vat: field("vat"),
                pct: field("pct"),
                commentary: field("commentary"),
            });
        })
    };

    html! {
        <div class="content">
            <div class="content-header">
                <div class="content-title">{"Envoyer une note de frais"}</div>
            </div>
            <div class="form-newbill-container content-inner">
                <form data-testid="form-new-bill" onsubmit={on_submit}>
                    <div class="row">
                        <div class="col-md-6">
                            <div class="form-group">
                                <label for="expense-type">{"Type de dépense"}</label>
                                <select required=true id="expense-type" name="expense-type" data-testid="expense-type" class="form-control blue-border">
                                    {for EXPENSE_TYPES.iter().map(|expense_type| html! {
                                        <option value={*expense_type}>{*expense_type}</option>
                                    })}
                                </select>
                            </div>
                            <div class="form-group">
                                <label for="expense-name">{"Nom de la dépense"}</label>
                                <input type="text" id="expense-name" name="expense-name" data-testid="expense-name" class="form-control blue-border" placeholder="Vol Paris Londres" />
                            </div>
                            <div class="form-group">
                                <label for="datepicker">{"Date"}</label>
                                <input required=true type="date" id="datepicker" name="datepicker" data-testid="datepicker" class="form-control blue-border" />
                            </div>
                            <div class="form-group">
                                <label for="amount">{"Montant TTC"}</label>
                                <input required=true type="number" id="amount" name="amount" data-testid="amount" class="form-control blue-border input-icon input-icon-right" placeholder="348" />
                            </div>
                            <div class="form-group">
                                <label for="vat">{"TVA"}</label>
                                <div class="flex-input">
                                    <input type="number" id="vat" name="vat" data-testid="vat" class="form-control blue-border" placeholder="70" />
                                    <input type="number" id="pct" name="pct" data-testid="pct" class="form-control blue-border" placeholder="20" />
                                    <span>{"%"}</span>
                                </div>
                            </div>
                        </div>
                        <div class="col-md-6">
                            <div class="form-group">
                                <label for="commentary">{"Commentaire"}</label>
                                <textarea id="commentary" name="commentary" data-testid="commentary" class="form-control blue-border" rows="3" />
                            </div>
                            <div class="form-group">
                                <label for="file">{"Justificatif"}</label>
                                <input
                                    required=true
                                    type="file"
                                    id="file"
                                    data-testid="file"
                                    accept=".jpg,.jpeg,.png"
                                    class="form-control blue-border"
                                    onchange={on_change_file}
                                />
                                {if *file_error {
                                    html! {
                                        <p data-testid="file-error-message" class="error-message">
                                            {FILE_ERROR_MESSAGE}
                                        </p>
                                    }
                                } else { html! {} }}
                            </div>
                        </div>
                    </div>
                    <div class="row">
                        <div class="col-md-6">
                            <button type="submit" id="btn-send-bill" class="btn btn-primary">{"Envoyer"}</button>
                        </div>
                    </div>
                </form>
            </div>
        </div>
    }
}
