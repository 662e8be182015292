mod components;
mod hooks;
mod services;

use yew::prelude::*;

use shared::{resolve, Transaction};

use components::{
    CategoryManager, Dashboard, ExpenseForm, ExpenseList, Header, LoginPage, SignupPage,
};
use hooks::use_categories::use_categories;
use hooks::use_expenses::use_expenses;
use services::api::ApiClient;
use services::date_utils::period_label;
use services::session::Session;

#[derive(Properties, PartialEq)]
struct ExpenseTrackerProps {
    api_client: ApiClient,
    username: String,
    on_logout: Callback<()>,
}

/// The authenticated main view: dashboard, entry form, listing, categories.
#[function_component(ExpenseTracker)]
fn expense_tracker(props: &ExpenseTrackerProps) -> Html {
    let show_form = use_state(|| false);
    let editing = use_state(|| None::<Transaction>);
    let show_category_manager = use_state(|| false);

    let expenses = use_expenses(&props.api_client, props.on_logout.clone());
    let categories = use_categories(&props.api_client, props.on_logout.clone());

    // Close the form once a save goes through.
    {
        let show_form = show_form.clone();
        let editing = editing.clone();
        let clear_form_error = expenses.actions.clear_form_error.clone();
        use_effect_with(expenses.saved, move |saved| {
            if *saved {
                show_form.set(false);
                editing.set(None);
                clear_form_error.emit(());
            }
        });
    }

    let on_toggle_form = {
        let show_form = show_form.clone();
        let editing = editing.clone();
        Callback::from(move |_: ()| {
            editing.set(None);
            show_form.set(!*show_form);
        })
    };

    let on_edit = {
        let show_form = show_form.clone();
        let editing = editing.clone();
        Callback::from(move |tx: Transaction| {
            editing.set(Some(tx));
            show_form.set(true);
        })
    };

    let on_cancel_form = {
        let show_form = show_form.clone();
        let editing = editing.clone();
        let clear_form_error = expenses.actions.clear_form_error.clone();
        Callback::from(move |_: ()| {
            show_form.set(false);
            editing.set(None);
            clear_form_error.emit(());
        })
    };

    let on_open_categories = {
        let show_category_manager = show_category_manager.clone();
        Callback::from(move |_: ()| show_category_manager.set(true))
    };

    let on_close_categories = {
        let show_category_manager = show_category_manager.clone();
        Callback::from(move |_: ()| show_category_manager.set(false))
    };

    let filter = expenses.state.filter.clone();
    let label = period_label(
        filter.period,
        resolve(filter.period, filter.reference_date),
    );

    // Remount the form when switching between create and distinct edits so
    // field state reinitializes from the entry being edited.
    let form_key = editing
        .as_ref()
        .map(|tx| format!("edit-{}", tx.id))
        .unwrap_or_else(|| "create".to_string());

    html! {
        <div class="app">
            <Header
                username={props.username.clone()}
                form_open={*show_form}
                on_toggle_form={on_toggle_form}
                on_open_categories={on_open_categories}
                on_logout={props.on_logout.clone()}
            />

            <main class="container">
                {if let Some(error) = &expenses.state.error {
                    let dismiss = expenses.actions.dismiss_error.clone();
                    html! {
                        <div class="form-message error app-error">
                            {error}
                            <button
                                class="btn btn-small"
                                onclick={Callback::from(move |_| dismiss.emit(()))}
                            >
                                {"Dismiss"}
                            </button>
                        </div>
                    }
                } else {
                    html! {}
                }}

                <Dashboard stats={expenses.state.stats} period_label={label} />

                {if *show_form {
                    html! {
                        <ExpenseForm
                            key={form_key}
                            editing={(*editing).clone()}
                            categories={categories.state.categories.clone()}
                            error={expenses.state.form_error.clone()}
                            saving={expenses.state.saving}
                            on_submit={expenses.actions.save.clone()}
                            on_cancel={on_cancel_form}
                        />
                    }
                } else {
                    html! {}
                }}

                <ExpenseList
                    groups={expenses.state.groups.clone()}
                    filter={filter}
                    categories={categories.state.categories.clone()}
                    loading={expenses.state.loading}
                    on_set_period={expenses.actions.set_period.clone()}
                    on_set_reference_date={expenses.actions.set_reference_date.clone()}
                    on_set_search={expenses.actions.set_search.clone()}
                    on_set_category={expenses.actions.set_category.clone()}
                    on_edit={on_edit}
                    on_delete={expenses.actions.delete.clone()}
                />

                {if *show_category_manager {
                    html! {
                        <CategoryManager
                            state={categories.state.clone()}
                            actions={categories.actions.clone()}
                            on_close={on_close_categories}
                        />
                    }
                } else {
                    html! {}
                }}
            </main>
        </div>
    }
}

#[function_component(App)]
fn app() -> Html {
    // The session is loaded once at startup and cleared on logout or when
    // the backend rejects the token.
    let session = use_state(Session::current);
    let show_signup = use_state(|| false);
    let api_client = use_memo((), |_| ApiClient::new());

    let on_authenticated = {
        let session = session.clone();
        Callback::from(move |new_session: Session| session.set(Some(new_session)))
    };

    let on_logout = {
        let session = session.clone();
        Callback::from(move |_: ()| {
            Session::clear();
            session.set(None);
        })
    };

    let on_switch_to_signup = {
        let show_signup = show_signup.clone();
        Callback::from(move |_: ()| show_signup.set(true))
    };

    let on_switch_to_login = {
        let show_signup = show_signup.clone();
        Callback::from(move |_: ()| show_signup.set(false))
    };

    match &*session {
        Some(active) => html! {
            <ExpenseTracker
                api_client={(*api_client).clone()}
                username={active.username.clone()}
                on_logout={on_logout}
            />
        },
        None if *show_signup => html! {
            <SignupPage
                api_client={(*api_client).clone()}
                on_switch_to_login={on_switch_to_login}
            />
        },
        None => html! {
            <LoginPage
                api_client={(*api_client).clone()}
                on_authenticated={on_authenticated}
                on_switch_to_signup={on_switch_to_signup}
            />
        },
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
