use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct HeaderProps {
    pub username: String,
    pub form_open: bool,
    pub on_toggle_form: Callback<()>,
    pub on_open_categories: Callback<()>,
    pub on_logout: Callback<()>,
}

#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    let on_toggle_form = {
        let cb = props.on_toggle_form.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };
    let on_open_categories = {
        let cb = props.on_open_categories.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };
    let on_logout = {
        let cb = props.on_logout.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };

    html! {
        <header class="header">
            <div class="container">
                <h1>{"Expense Tracker"}</h1>
                <span class="header-username">{&props.username}</span>
                <div class="header-actions">
                    <button class="btn" onclick={on_open_categories}>{"Categories"}</button>
                    <button class="btn btn-primary" onclick={on_toggle_form}>
                        {if props.form_open { "Close" } else { "Add Entry" }}
                    </button>
                    <button class="btn btn-danger" onclick={on_logout}>{"Log out"}</button>
                </div>
            </div>
        </header>
    }
}
