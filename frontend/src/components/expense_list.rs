use chrono::NaiveDate;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use shared::{Category, DayGroup, PeriodFilter, Transaction, TransactionKind};

use crate::hooks::use_expenses::FilterState;
use crate::services::date_utils::format_group_heading;

#[derive(Properties, PartialEq)]
pub struct ExpenseListProps {
    pub groups: Vec<DayGroup>,
    pub filter: FilterState,
    pub categories: Vec<Category>,
    pub loading: bool,
    pub on_set_period: Callback<PeriodFilter>,
    pub on_set_reference_date: Callback<NaiveDate>,
    pub on_set_search: Callback<String>,
    pub on_set_category: Callback<Option<i64>>,
    pub on_edit: Callback<Transaction>,
    pub on_delete: Callback<i64>,
}

/// The chronological listing: filter controls on top, transactions grouped
/// by date below, most recent date first.
#[function_component(ExpenseList)]
pub fn expense_list(props: &ExpenseListProps) -> Html {
    let on_search_input = {
        let on_set_search = props.on_set_search.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_set_search.emit(input.value());
        })
    };

    let on_category_change = {
        let on_set_category = props.on_set_category.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let value = select.value();
            on_set_category.emit(value.parse::<i64>().ok());
        })
    };

    let on_date_change = {
        let on_set_reference_date = props.on_set_reference_date.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            if let Ok(date) = input.value().parse::<NaiveDate>() {
                on_set_reference_date.emit(date);
            }
        })
    };

    let on_month_change = {
        let on_set_reference_date = props.on_set_reference_date.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            // <input type="month"> gives "YYYY-MM".
            if let Ok(date) = NaiveDate::parse_from_str(&format!("{}-01", input.value()), "%Y-%m-%d")
            {
                on_set_reference_date.emit(date);
            }
        })
    };

    html! {
        <section class="expense-list">
            <div class="list-controls">
                <h3>{"Transaction History"}</h3>
                <div class="period-buttons">
                    {for PeriodFilter::ALL_MODES.iter().map(|mode| {
                        let mode = *mode;
                        let on_set_period = props.on_set_period.clone();
                        let class = if props.filter.period == mode {
                            "btn period-btn active"
                        } else {
                            "btn period-btn"
                        };
                        html! {
                            <button
                                class={class}
                                onclick={Callback::from(move |_| on_set_period.emit(mode))}
                            >
                                {mode.to_string()}
                            </button>
                        }
                    })}
                </div>
                <div class="filter-row">
                    <input
                        type="text"
                        class="search-input"
                        placeholder="Search by title..."
                        value={props.filter.search.clone()}
                        oninput={on_search_input}
                    />
                    <select class="category-select" onchange={on_category_change}>
                        <option value="" selected={props.filter.category_id.is_none()}>
                            {"All categories"}
                        </option>
                        {for props.categories.iter().map(|cat| {
                            html! {
                                <option
                                    value={cat.id.to_string()}
                                    selected={props.filter.category_id == Some(cat.id)}
                                >
                                    {&cat.name}
                                </option>
                            }
                        })}
                    </select>
                    {match props.filter.period {
                        PeriodFilter::Day => html! {
                            <input
                                type="date"
                                value={props.filter.reference_date.to_string()}
                                onchange={on_date_change}
                            />
                        },
                        PeriodFilter::Month => html! {
                            <input
                                type="month"
                                value={props.filter.reference_date.format("%Y-%m").to_string()}
                                onchange={on_month_change}
                            />
                        },
                        PeriodFilter::Week | PeriodFilter::All => html! {},
                    }}
                </div>
            </div>

            {if props.loading {
                html! { <div class="list-loading">{"Loading..."}</div> }
            } else if props.groups.is_empty() {
                html! { <div class="list-empty">{"No transactions found."}</div> }
            } else {
                html! {
                    <div class="day-groups">
                        {for props.groups.iter().map(|group| day_group(group, props))}
                    </div>
                }
            }}
        </section>
    }
}

/// Message for the browser confirm dialog shown before a delete goes out.
fn delete_prompt(title: &str) -> String {
    format!("Delete \"{title}\"? This cannot be undone.")
}

fn day_group(group: &DayGroup, props: &ExpenseListProps) -> Html {
    html! {
        <div class="day-group" key={group.date.to_string()}>
            <div class="day-heading">{format_group_heading(group.date)}</div>
            <table class="entries">
                <tbody>
                    {for group.items.iter().map(|tx| entry_row(tx, props))}
                </tbody>
            </table>
        </div>
    }
}

fn entry_row(tx: &Transaction, props: &ExpenseListProps) -> Html {
    let (sign, amount_class) = match tx.kind {
        TransactionKind::Income => ("+", "amount income"),
        TransactionKind::Expense => ("-", "amount expense"),
    };

    let on_edit = {
        let on_edit = props.on_edit.clone();
        let tx = tx.clone();
        Callback::from(move |_: MouseEvent| on_edit.emit(tx.clone()))
    };
    let on_delete = {
        let on_delete = props.on_delete.clone();
        let id = tx.id;
        let prompt = delete_prompt(&tx.title);
        Callback::from(move |_: MouseEvent| {
            if gloo::dialogs::confirm(&prompt) {
                on_delete.emit(id);
            }
        })
    };

    html! {
        <tr key={tx.id}>
            <td class="entry-title">{&tx.title}</td>
            <td class="entry-category">{&tx.category_name}</td>
            <td class={amount_class}>{format!("{sign} {}", tx.amount)}</td>
            <td class="entry-actions">
                <button class="btn btn-small" onclick={on_edit}>{"Edit"}</button>
                <button class="btn btn-small btn-danger" onclick={on_delete}>{"Delete"}</button>
            </td>
        </tr>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delete_prompt_names_the_entry() {
        assert_eq!(
            delete_prompt("Groceries"),
            "Delete \"Groceries\"? This cannot be undone."
        );
    }
}
