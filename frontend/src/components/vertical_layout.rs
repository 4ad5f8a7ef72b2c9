use yew::prelude::*;

use crate::routes::Route;

#[derive(Properties, PartialEq)]
pub struct VerticalLayoutProps {
    pub active: Route,
    pub on_navigate: Callback<Route>,
}

#[function_component(VerticalLayout)]
pub fn vertical_layout(props: &VerticalLayoutProps) -> Html {
    let icon = |route: Route, id: &'static str, test_id: &'static str, glyph: &'static str| {
        let on_navigate = props.on_navigate.clone();
        let onclick = Callback::from(move |_: MouseEvent| on_navigate.emit(route));
        html! {
            <div
                id={id}
                data-testid={test_id}
                class={classes!("layout-icon", (props.active == route).then_some("active-icon"))}
                {onclick}
            >
                {glyph}
            </div>
        }
    };

    html! {
        <div class="vertical-navbar">
            <div class="layout-title">{"Billed"}</div>
            {icon(Route::Bills, "layout-icon1", "icon-window", "🗂")}
            {icon(Route::NewBill, "layout-icon2", "icon-mail", "✉")}
        </div>
    }
}
