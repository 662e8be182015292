pub mod use_categories;
pub mod use_expenses;
