use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ReceiptModalProps {
    /// Receipt to show; the modal is hidden while this is `None`
    pub url: Option<String>,
    pub on_close: Callback<()>,
}

#[function_component(ReceiptModal)]
pub fn receipt_modal(props: &ReceiptModalProps) -> Html {
    let on_backdrop_click = {
        let on_close = props.on_close.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            on_close.emit(());
        })
    };

    let on_dialog_click = Callback::from(|e: MouseEvent| {
        e.stop_propagation();
    });

    let on_close_click = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    let style = if props.url.is_some() { "display: block;" } else { "display: none;" };

    html! {
        <div
            id="modaleFile"
            class={classes!("modal", "fade", props.url.is_some().then_some("show"))}
            tabindex="-1"
            role="dialog"
            {style}
            onclick={on_backdrop_click}
        >
            <div class="modal-dialog modal-dialog-centered modal-lg" role="document" onclick={on_dialog_click}>
                <div class="modal-content">
                    <div class="modal-header">
                        <h5 class="modal-title">{"Justificatif"}</h5>
                        <button type="button" class="close" aria-label="Close" onclick={on_close_click}>
                            <span aria-hidden="true">{"×"}</span>
                        </button>
                    </div>
                    <div class="modal-body">
                        {if let Some(url) = &props.url {
                            html! {
                                <div class="bill-proof-container">
                                    <img src={url.clone()} alt="Bill" />
                                </div>
                            }
                        } else { html! {} }}
                    </div>
                </div>
            </div>
        </div>
    }
}
