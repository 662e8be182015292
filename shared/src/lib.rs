//! Types and domain logic shared across the expense tracker client.
//!
//! Everything in this crate is pure: wire types for the backend REST API and
//! the period/aggregation/grouping logic that turns a flat transaction list
//! into dashboard numbers and a chronological listing. No UI or network code
//! lives here, so all of it is testable natively.

pub mod grouping;
pub mod models;
pub mod period;
pub mod sequence;
pub mod stats;

pub use grouping::{group_by_date, DayGroup};
pub use models::{
    Category, CategoryPayload, ExpensePayload, LoginRequest, SignupRequest, SignupResponse,
    TokenResponse, Transaction, TransactionKind,
};
pub use period::{resolve, DateRange, PeriodError, PeriodFilter};
pub use sequence::RequestSequencer;
pub use stats::{aggregate, PeriodStats, StatsError};
