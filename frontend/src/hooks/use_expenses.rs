use std::cell::RefCell;
use std::rc::Rc;

use chrono::NaiveDate;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use shared::{
    aggregate, group_by_date, resolve, DayGroup, ExpensePayload, PeriodFilter, PeriodStats,
    RequestSequencer, Transaction,
};

use crate::services::api::{ApiClient, ApiError, ExpenseQuery};
use crate::services::date_utils::today;
use crate::services::logging::Logger;
use crate::services::session::Session;

const COMPONENT: &str = "use_expenses";

/// The active listing filter. Transient: lives only in client memory and
/// resets to defaults on reload.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    pub period: PeriodFilter,
    pub reference_date: NaiveDate,
    pub search: String,
    pub category_id: Option<i64>,
}

impl FilterState {
    fn initial() -> Self {
        Self {
            period: PeriodFilter::Month,
            reference_date: today(),
            search: String::new(),
            category_id: None,
        }
    }

    fn to_query(&self) -> ExpenseQuery {
        ExpenseQuery {
            range: resolve(self.period, self.reference_date),
            search: self.search.clone(),
            category: self.category_id,
        }
    }
}

#[derive(Clone, PartialEq)]
pub struct ExpensesState {
    pub filter: FilterState,
    pub transactions: Vec<Transaction>,
    pub groups: Vec<DayGroup>,
    pub stats: PeriodStats,
    pub loading: bool,
    /// Recoverable fetch/data error; the previously displayed list and stats
    /// stay on screen while this is shown.
    pub error: Option<String>,
    /// Validation error surfaced to the expense form on create/update.
    pub form_error: Option<String>,
    pub saving: bool,
}

#[derive(Clone, PartialEq)]
pub struct UseExpensesActions {
    pub set_period: Callback<PeriodFilter>,
    pub set_reference_date: Callback<NaiveDate>,
    pub set_search: Callback<String>,
    pub set_category: Callback<Option<i64>>,
    pub refresh: Callback<()>,
    /// `(None, payload)` creates, `(Some(id), payload)` updates.
    pub save: Callback<(Option<i64>, ExpensePayload)>,
    pub delete: Callback<i64>,
    pub dismiss_error: Callback<()>,
    pub clear_form_error: Callback<()>,
}

pub struct UseExpensesResult {
    pub state: ExpensesState,
    pub actions: UseExpensesActions,
    /// True after a successful save until the next save attempt; the view
    /// uses it to close the form.
    pub saved: bool,
}

/// Everything one listing fetch needs to apply (or discard) its response.
#[derive(Clone)]
struct FetchContext {
    api_client: ApiClient,
    transactions: UseStateHandle<Vec<Transaction>>,
    groups: UseStateHandle<Vec<DayGroup>>,
    stats: UseStateHandle<PeriodStats>,
    loading: UseStateHandle<bool>,
    error: UseStateHandle<Option<String>>,
    sequencer: Rc<RefCell<RequestSequencer>>,
    on_unauthorized: Callback<()>,
}

/// The displayed listing as one value, so a completed fetch either replaces
/// it wholesale or hands back the previous one untouched.
#[derive(Debug, Clone, PartialEq)]
struct ListingSnapshot {
    transactions: Vec<Transaction>,
    groups: Vec<DayGroup>,
    stats: PeriodStats,
    error: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
enum FetchOutcome {
    /// The snapshot to display next: fresh data on success, the previous
    /// snapshot with an error notice on failure.
    Updated(ListingSnapshot),
    /// Token rejected; the session ends.
    Unauthorized,
    /// A newer request was issued while this one was in flight; its
    /// completion owns the state now.
    Discarded,
}

/// Decides what a completed fetch does to the displayed listing. Pure: the
/// fail-soft rule (a failed fetch or bad data keeps the previous list and
/// stats) and the stale-discard rule both live here.
fn apply_fetch(
    result: Result<Vec<Transaction>, ApiError>,
    is_current: bool,
    prev: &ListingSnapshot,
) -> FetchOutcome {
    if !is_current {
        return FetchOutcome::Discarded;
    }

    match result {
        Ok(list) => match aggregate(&list) {
            Ok(stats) => FetchOutcome::Updated(ListingSnapshot {
                groups: group_by_date(&list),
                transactions: list,
                stats,
                error: None,
            }),
            Err(e) => FetchOutcome::Updated(ListingSnapshot {
                error: Some(e.to_string()),
                ..prev.clone()
            }),
        },
        Err(ApiError::Unauthorized) => FetchOutcome::Unauthorized,
        Err(e) => FetchOutcome::Updated(ListingSnapshot {
            error: Some(e.to_string()),
            ..prev.clone()
        }),
    }
}

/// Issues one listing fetch. Takes a sequencer ticket up front; if a newer
/// fetch is issued while this one is in flight, the response is discarded so
/// the later request always wins.
fn issue_fetch(ctx: FetchContext, query: ExpenseQuery) {
    let ticket = ctx.sequencer.borrow_mut().begin();
    ctx.loading.set(true);

    spawn_local(async move {
        let result = ctx.api_client.list_expenses(&query).await;

        let prev = ListingSnapshot {
            transactions: (*ctx.transactions).clone(),
            groups: (*ctx.groups).clone(),
            stats: *ctx.stats,
            error: (*ctx.error).clone(),
        };
        let is_current = ctx.sequencer.borrow().is_current(ticket);

        match apply_fetch(result, is_current, &prev) {
            FetchOutcome::Discarded => return,
            FetchOutcome::Unauthorized => {
                Session::clear();
                ctx.on_unauthorized.emit(());
            }
            FetchOutcome::Updated(next) => {
                if let Some(message) = &next.error {
                    Logger::warn_with_component(COMPONENT, message);
                }
                ctx.stats.set(next.stats);
                ctx.groups.set(next.groups);
                ctx.transactions.set(next.transactions);
                ctx.error.set(next.error);
            }
        }

        ctx.loading.set(false);
    });
}

/// Filter controller: owns the filter state, refetches on every filter
/// change, and replaces (never merges) the held transaction list with the
/// backend's response.
#[hook]
pub fn use_expenses(api_client: &ApiClient, on_unauthorized: Callback<()>) -> UseExpensesResult {
    let filter = use_state(FilterState::initial);
    let transactions = use_state(Vec::<Transaction>::new);
    let groups = use_state(Vec::<DayGroup>::new);
    let stats = use_state(PeriodStats::default);
    let loading = use_state(|| true);
    let error = use_state(|| None::<String>);
    let form_error = use_state(|| None::<String>);
    let saving = use_state(|| false);
    let saved = use_state(|| false);
    // Shared across renders so overlapping fetches contend on one counter.
    let sequencer = use_mut_ref(RequestSequencer::new);

    let ctx = FetchContext {
        api_client: api_client.clone(),
        transactions: transactions.clone(),
        groups: groups.clone(),
        stats: stats.clone(),
        loading: loading.clone(),
        error: error.clone(),
        sequencer: sequencer.clone(),
        on_unauthorized: on_unauthorized.clone(),
    };

    // Fetch on mount and whenever any filter field changes.
    {
        let ctx = ctx.clone();
        use_effect_with((*filter).clone(), move |current: &FilterState| {
            issue_fetch(ctx, current.to_query());
        });
    }

    let refresh = {
        let ctx = ctx.clone();
        let query = filter.to_query();
        Callback::from(move |_: ()| issue_fetch(ctx.clone(), query.clone()))
    };

    let set_period = {
        let filter = filter.clone();
        Callback::from(move |period: PeriodFilter| {
            filter.set(FilterState {
                period,
                ..(*filter).clone()
            });
        })
    };

    let set_reference_date = {
        let filter = filter.clone();
        Callback::from(move |reference_date: NaiveDate| {
            filter.set(FilterState {
                reference_date,
                ..(*filter).clone()
            });
        })
    };

    let set_search = {
        let filter = filter.clone();
        Callback::from(move |search: String| {
            filter.set(FilterState {
                search,
                ..(*filter).clone()
            });
        })
    };

    let set_category = {
        let filter = filter.clone();
        Callback::from(move |category_id: Option<i64>| {
            filter.set(FilterState {
                category_id,
                ..(*filter).clone()
            });
        })
    };

    let save = {
        let ctx = ctx.clone();
        let form_error = form_error.clone();
        let saving = saving.clone();
        let saved = saved.clone();
        let query = filter.to_query();

        Callback::from(move |(id, payload): (Option<i64>, ExpensePayload)| {
            let ctx = ctx.clone();
            let form_error = form_error.clone();
            let saving = saving.clone();
            let saved = saved.clone();
            let query = query.clone();

            spawn_local(async move {
                form_error.set(None);
                saved.set(false);
                saving.set(true);

                let result = match id {
                    Some(id) => ctx.api_client.update_expense(id, &payload).await.map(|_| ()),
                    None => ctx.api_client.create_expense(&payload).await.map(|_| ()),
                };

                match result {
                    Ok(()) => {
                        saved.set(true);
                        issue_fetch(ctx, query);
                    }
                    Err(ApiError::Unauthorized) => {
                        Session::clear();
                        ctx.on_unauthorized.emit(());
                    }
                    Err(e) => {
                        form_error.set(Some(e.to_string()));
                    }
                }

                saving.set(false);
            });
        })
    };

    let delete = {
        let ctx = ctx.clone();
        let query = filter.to_query();

        Callback::from(move |id: i64| {
            let ctx = ctx.clone();
            let query = query.clone();

            spawn_local(async move {
                match ctx.api_client.delete_expense(id).await {
                    Ok(()) => issue_fetch(ctx, query),
                    Err(ApiError::Unauthorized) => {
                        Session::clear();
                        ctx.on_unauthorized.emit(());
                    }
                    Err(e) => {
                        Logger::error_with_component(
                            COMPONENT,
                            &format!("failed to delete expense {id}: {e}"),
                        );
                        ctx.error.set(Some(e.to_string()));
                    }
                }
            });
        })
    };

    let dismiss_error = {
        let error = error.clone();
        Callback::from(move |_: ()| error.set(None))
    };

    let clear_form_error = {
        let form_error = form_error.clone();
        let saved = saved.clone();
        Callback::from(move |_: ()| {
            form_error.set(None);
            saved.set(false);
        })
    };

    let state = ExpensesState {
        filter: (*filter).clone(),
        transactions: (*transactions).clone(),
        groups: (*groups).clone(),
        stats: *stats,
        loading: *loading,
        error: (*error).clone(),
        form_error: (*form_error).clone(),
        saving: *saving,
    };

    let actions = UseExpensesActions {
        set_period,
        set_reference_date,
        set_search,
        set_category,
        refresh,
        save,
        delete,
        dismiss_error,
        clear_form_error,
    };

    UseExpensesResult {
        state,
        actions,
        saved: *saved,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::TransactionKind;

    fn tx(id: i64, amount: &str, date: &str) -> Transaction {
        Transaction {
            id,
            title: format!("entry {id}"),
            amount: amount.to_string(),
            date: date.parse().unwrap(),
            category: 1,
            category_name: "General".to_string(),
            kind: TransactionKind::Expense,
        }
    }

    fn displayed() -> ListingSnapshot {
        let transactions = vec![tx(1, "80", "2024-03-01"), tx(2, "20", "2024-03-02")];
        ListingSnapshot {
            groups: group_by_date(&transactions),
            stats: aggregate(&transactions).unwrap(),
            transactions,
            error: None,
        }
    }

    #[test]
    fn stale_response_is_discarded() {
        let prev = displayed();
        let outcome = apply_fetch(Ok(vec![tx(9, "5", "2024-03-03")]), false, &prev);
        assert_eq!(outcome, FetchOutcome::Discarded);
    }

    #[test]
    fn successful_fetch_replaces_the_listing_wholesale() {
        let prev = displayed();
        let fresh = vec![tx(9, "5", "2024-03-03")];
        let outcome = apply_fetch(Ok(fresh.clone()), true, &prev);

        let FetchOutcome::Updated(next) = outcome else {
            panic!("expected an updated listing");
        };
        assert_eq!(next.transactions, fresh);
        assert_eq!(next.groups, group_by_date(&fresh));
        assert_eq!(next.stats, aggregate(&fresh).unwrap());
        assert_eq!(next.error, None);
    }

    #[test]
    fn fetch_error_keeps_previous_listing_and_sets_notice() {
        let prev = displayed();
        let outcome = apply_fetch(
            Err(ApiError::Network("connection refused".to_string())),
            true,
            &prev,
        );

        let FetchOutcome::Updated(next) = outcome else {
            panic!("expected an updated listing");
        };
        assert_eq!(next.transactions, prev.transactions);
        assert_eq!(next.groups, prev.groups);
        assert_eq!(next.stats, prev.stats);
        assert!(next.error.is_some());
    }

    #[test]
    fn bad_amount_keeps_previous_stats() {
        let prev = displayed();
        let outcome = apply_fetch(
            Ok(vec![tx(9, "not-a-number", "2024-03-03")]),
            true,
            &prev,
        );

        let FetchOutcome::Updated(next) = outcome else {
            panic!("expected an updated listing");
        };
        assert_eq!(next.transactions, prev.transactions);
        assert_eq!(next.stats, prev.stats);
        assert!(next.error.is_some());
    }

    #[test]
    fn rejected_token_ends_the_session() {
        let prev = displayed();
        let outcome = apply_fetch(Err(ApiError::Unauthorized), true, &prev);
        assert_eq!(outcome, FetchOutcome::Unauthorized);
    }
}
