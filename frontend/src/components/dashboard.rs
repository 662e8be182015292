use yew::prelude::*;

use shared::PeriodStats;

#[derive(Properties, PartialEq)]
pub struct DashboardProps {
    pub stats: PeriodStats,
    pub period_label: String,
}

/// Totals for the active period: income, expenses, and the balance.
#[function_component(Dashboard)]
pub fn dashboard(props: &DashboardProps) -> Html {
    let balance_class = if props.stats.balance >= 0.0 {
        "stat-card balance positive"
    } else {
        "stat-card balance negative"
    };

    html! {
        <section class="dashboard">
            <h2 class="period-label">{&props.period_label}</h2>
            <div class="stat-cards">
                <div class="stat-card income">
                    <span class="stat-label">{"Total Income"}</span>
                    <span class="stat-amount">{format!("{:.2}", props.stats.total_income)}</span>
                </div>
                <div class="stat-card expense">
                    <span class="stat-label">{"Total Expense"}</span>
                    <span class="stat-amount">{format!("{:.2}", props.stats.total_expense)}</span>
                </div>
                <div class={balance_class}>
                    <span class="stat-label">{"Balance"}</span>
                    <span class="stat-amount">{format!("{:.2}", props.stats.balance)}</span>
                </div>
            </div>
        </section>
    }
}
