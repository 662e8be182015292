use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use shared::SignupRequest;

use crate::services::api::ApiClient;

#[derive(Properties, PartialEq)]
pub struct SignupPageProps {
    pub api_client: ApiClient,
    pub on_switch_to_login: Callback<()>,
}

#[function_component(SignupPage)]
pub fn signup_page(props: &SignupPageProps) -> Html {
    let username = use_state(String::new);
    let password = use_state(String::new);
    let confirm = use_state(String::new);
    let error = use_state(|| None::<String>);
    let success = use_state(|| None::<String>);
    let submitting = use_state(|| false);

    let field = |state: &UseStateHandle<String>, error: &UseStateHandle<Option<String>>| {
        let state = state.clone();
        let error = error.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            state.set(input.value());
            error.set(None);
        })
    };

    let on_username_change = field(&username, &error);
    let on_password_change = field(&password, &error);
    let on_confirm_change = field(&confirm, &error);

    let onsubmit = {
        let api_client = props.api_client.clone();
        let username = username.clone();
        let password = password.clone();
        let confirm = confirm.clone();
        let error = error.clone();
        let success = success.clone();
        let submitting = submitting.clone();
        let on_switch_to_login = props.on_switch_to_login.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let request = SignupRequest {
                username: username.trim().to_string(),
                password: (*password).clone(),
            };
            if request.username.is_empty() || request.password.is_empty() {
                error.set(Some("Username and password are required".to_string()));
                return;
            }
            if *password != *confirm {
                error.set(Some("Passwords do not match".to_string()));
                return;
            }

            let api_client = api_client.clone();
            let error = error.clone();
            let success = success.clone();
            let submitting = submitting.clone();
            let on_switch_to_login = on_switch_to_login.clone();

            spawn_local(async move {
                submitting.set(true);
                match api_client.signup(&request).await {
                    Ok(response) => {
                        success.set(Some(response.message));
                        // Give the success message a moment, then drop back
                        // to the login page.
                        spawn_local(async move {
                            gloo::timers::future::TimeoutFuture::new(1500).await;
                            on_switch_to_login.emit(());
                        });
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
        let cb = props.on_switch_to_login.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };

    html! {
        <div class="auth-page">
            <section class="auth-card">
                <h1>{"Expense Tracker"}</h1>
                <h2>{"Sign up"}</h2>

                {if let Some(message) = &*error {
                    html! { <div class="form-message error">{message}</div> }
                } else {
                    html! {}
                }}
                {if let Some(message) = &*success {
                    html! {
                        <div class="form-message success">
                            {message.clone()}
                            {" You can log in now."}
                        </div>
                    }
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
                    <div class="form-group">
                        <label for="confirm">{"Confirm password"}</label>
                        <input
                            type="password"
                            id="confirm"
                            value={(*confirm).clone()}
                            onchange={on_confirm_change}
                            disabled={*submitting}
                        />
                    </div>
                    <button type="submit" class="btn btn-primary" disabled={*submitting}>
                        {if *submitting { "Signing up..." } else { "Sign up" }}
                    </button>
                </form>

                <p class="auth-switch">
                    {"Already have an account? "}
                    <button class="btn-link" onclick={on_switch}>{"Log in"}</button>
                </p>
            </section>
        </div>
    }
}
