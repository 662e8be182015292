pub mod category_manager;
pub mod dashboard;
pub mod expense_form;
pub mod expense_list;
pub mod header;
pub mod login;
pub mod signup;

pub use category_manager::CategoryManager;
pub use dashboard::Dashboard;
pub use expense_form::ExpenseForm;
pub use expense_list::ExpenseList;
pub use header::Header;
pub use login::LoginPage;
pub use signup::SignupPage;
