use yew::prelude::*;

#[function_component(LoadingPage)]
pub fn loading_page() -> Html {
    html! {
        <div id="loading" class="loading-page">{"Loading..."}</div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ErrorPageProps {
    #[prop_or_default]
    pub message: Option<String>,
}

#[function_component(ErrorPage)]
pub fn error_page(props: &ErrorPageProps) -> Html {
    html! {
        <div class="error-page">
            <div class="content-title">{"Erreur"}</div>
            <div data-testid="error-message">
                {props.message.clone().unwrap_or_default()}
            </div>
        </div>
    }
}
