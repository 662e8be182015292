use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use shared::LoginRequest;

use crate::services::api::ApiClient;
use crate::services::session::Session;

#[derive(Properties, PartialEq)]
pub struct LoginPageProps {
    pub api_client: ApiClient,
    pub on_authenticated: Callback<Session>,
    pub on_switch_to_signup: Callback<()>,
}

#[function_component(LoginPage)]
pub fn login_page(props: &LoginPageProps) -> Html {
    let username = use_state(String::new);
    let password = use_state(String::new);
    let error = use_state(|| None::<String>);
    let submitting = use_state(|| false);

    let on_username_change = {
        let username = username.clone();
        let error = error.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            username.set(input.value());
            error.set(None);
        })
    };

    let on_password_change = {
        let password = password.clone();
        let error = error.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            password.set(input.value());
            error.set(None);
        })
    };

    let onsubmit = {
        let api_client = props.api_client.clone();
        let username = username.clone();
        let password = password.clone();
        let error = error.clone();
        let submitting = submitting.clone();
        let on_authenticated = props.on_authenticated.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let request = LoginRequest {
                username: username.trim().to_string(),
                password: (*password).clone(),
            };
            if request.username.is_empty() || request.password.is_empty() {
                error.set(Some("Username and password are required".to_string()));
                return;
            }

            let api_client = api_client.clone();
            let error = error.clone();
            let submitting = submitting.clone();
            let on_authenticated = on_authenticated.clone();

            spawn_local(async move {
                submitting.set(true);
                match api_client.login(&request).await {
                    Ok(token) => {
                        let session = Session::store(token.access, request.username);
                        on_authenticated.emit(session);
                    }
                    Err(e) => {
                        error.set(Some(e.to_string()));
                    }
                }
                submitting.set(false);
            });
        })
    };

    let on_switch = {
        let cb = props.on_switch_to_signup.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };

    html! {
        <div class="auth-page">
            <section class="auth-card">
                <h1>{"Expense Tracker"}</h1>
                <h2>{"Log in"}</h2>

                {if let Some(message) = &*error {
                    html! { <div class="form-message error">{message}</div> }
                } else {
                    html! {}
                }}

                <form {onsubmit}>
                    <div class="form-group">
                        <label for="username">{"Username"}</label>
                        <input
                            type="text"
                            id="username"
                            value={(*username).clone()}
                            onchange={on_username_change}
                            disabled={*submitting}
                        />
                    </div>
                    <div class="form-group">
                        <label for="password">{"Password"}</label>
                        <input
                            type="password"
                            id="password"
                            value={(*password).clone()}
                            onchange={on_password_change}
                            disabled={*submitting}
                        />
                    </div>
                    <button type="submit" class="btn btn-primary" disabled={*submitting}>
                        {if *submitting { "Logging in..." } else { "Log in" }}
                    </button>
                </form>

                <p class="auth-switch">
                    {"No account? "}
                    <button class="btn-link" onclick={on_switch}>{"Sign up"}</button>
                </p>
            </section>
        </div>
    }
}
