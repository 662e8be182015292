use chrono::NaiveDate;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use shared::{Category, ExpensePayload, Transaction, TransactionKind};

use crate::services::date_utils::today;

#[derive(Properties, PartialEq)]
pub struct ExpenseFormProps {
    /// When set, the form edits this entry; otherwise it creates a new one.
    /// The parent keys this component by the entry id so switching entries
    /// remounts with fresh field state.
    pub editing: Option<Transaction>,
    pub categories: Vec<Category>,
    pub error: Option<String>,
    pub saving: bool,
    pub on_submit: Callback<(Option<i64>, ExpensePayload)>,
    pub on_cancel: Callback<()>,
}

#[function_component(ExpenseForm)]
pub fn expense_form(props: &ExpenseFormProps) -> Html {
    let title = use_state(|| {
        props
            .editing
            .as_ref()
            .map(|tx| tx.title.clone())
            .unwrap_or_default()
    });
    let amount = use_state(|| {
        props
            .editing
            .as_ref()
            .map(|tx| tx.amount.clone())
            .unwrap_or_default()
    });
    let date = use_state(|| {
        props
            .editing
            .as_ref()
            .map(|tx| tx.date)
            .unwrap_or_else(today)
    });
    let category = use_state(|| props.editing.as_ref().map(|tx| tx.category));
    let kind = use_state(|| {
        props
            .editing
            .as_ref()
            .map(|tx| tx.kind)
            .unwrap_or(TransactionKind::Expense)
    });
    let local_error = use_state(|| None::<String>);

    let on_title_change = {
        let title = title.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            title.set(input.value());
        })
    };

    let on_amount_change = {
        let amount = amount.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            amount.set(input.value());
        })
    };

    let on_date_change = {
        let date = date.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            if let Ok(parsed) = input.value().parse::<NaiveDate>() {
                date.set(parsed);
            }
        })
    };

    let on_category_change = {
        let category = category.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            category.set(select.value().parse::<i64>().ok());
        })
    };

    let on_kind_change = {
        let kind = kind.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            kind.set(if select.value() == "income" {
                TransactionKind::Income
            } else {
                TransactionKind::Expense
            });
        })
    };

    let onsubmit = {
        let title = title.clone();
        let amount = amount.clone();
        let date = date.clone();
        let category = category.clone();
        let kind = kind.clone();
        let local_error = local_error.clone();
        let on_submit = props.on_submit.clone();
        let editing_id = props.editing.as_ref().map(|tx| tx.id);

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let trimmed_title = title.trim().to_string();
            if trimmed_title.is_empty() {
                local_error.set(Some("Title is required".to_string()));
                return;
            }
            let trimmed_amount = amount.trim().to_string();
            match trimmed_amount.parse::<f64>() {
                Ok(value) if value > 0.0 => {}
                Ok(_) => {
                    local_error.set(Some("Amount must be greater than zero".to_string()));
                    return;
                }
                Err(_) => {
                    local_error.set(Some("Amount must be a number".to_string()));
                    return;
                }
            }
            let Some(category_id) = *category else {
                local_error.set(Some("Choose a category".to_string()));
                return;
            };

            local_error.set(None);
            on_submit.emit((
                editing_id,
                ExpensePayload {
                    title: trimmed_title,
                    amount: trimmed_amount,
                    date: *date,
                    category: category_id,
                    kind: *kind,
                },
            ));
        })
    };

    let on_cancel = {
        let cb = props.on_cancel.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };

    let heading = if props.editing.is_some() {
        "Edit Entry"
    } else {
        "New Entry"
    };
    let error_message = local_error.as_ref().or(props.error.as_ref());

    html! {
        <section class="expense-form">
            <h2>{heading}</h2>

            {if let Some(message) = error_message {
                html! { <div class="form-message error">{message}</div> }
            } else {
                html! {}
            }}

            <form {onsubmit}>
                <div class="form-group">
                    <label for="title">{"Title"}</label>
                    <input
                        type="text"
                        id="title"
                        placeholder="Groceries, salary..."
                        value={(*title).clone()}
                        onchange={on_title_change}
                        disabled={props.saving}
                    />
                </div>

                <div class="form-group">
                    <label for="amount">{"Amount"}</label>
                    <input
                        type="number"
                        id="amount"
                        placeholder="0.00"
                        step="0.01"
                        min="0.01"
                        value={(*amount).clone()}
                        onchange={on_amount_change}
                        disabled={props.saving}
                    />
                </div>

                <div class="form-group">
                    <label for="kind">{"Type"}</label>
                    <select id="kind" onchange={on_kind_change} disabled={props.saving}>
                        <option value="expense" selected={*kind == TransactionKind::Expense}>
                            {"Expense"}
                        </option>
                        <option value="income" selected={*kind == TransactionKind::Income}>
                            {"Income"}
                        </option>
                    </select>
                </div>

                <div class="form-group">
                    <label for="category">{"Category"}</label>
                    <select id="category" onchange={on_category_change} disabled={props.saving}>
                        <option value="" selected={category.is_none()}>{"Choose..."}</option>
                        {for props.categories.iter().map(|cat| {
                            html! {
                                <option
                                    value={cat.id.to_string()}
                                    selected={*category == Some(cat.id)}
                                >
                                    {&cat.name}
                                </option>
                            }
                        })}
                    </select>
                </div>

                <div class="form-group">
                    <label for="date">{"Date"}</label>
                    <input
                        type="date"
                        id="date"
                        value={date.to_string()}
                        onchange={on_date_change}
                        disabled={props.saving}
                    />
                </div>

                <div class="form-actions">
                    <button type="submit" class="btn btn-primary" disabled={props.saving}>
                        {if props.saving { "Saving..." } else { "Save" }}
                    </button>
                    <button type="button" class="btn" onclick={on_cancel} disabled={props.saving}>
                        {"Cancel"}
                    </button>
                </div>
            </form>
        </section>
    }
}
