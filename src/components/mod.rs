//! UI Components
//!
//! Pages, tabs and modals of the console.

pub mod fields;

mod account_management;
mod admin_layout;
mod calendar_page;
mod category_manager;
mod change_password_modal;
mod client_portal;
mod dashboard;
mod delete_confirm_button;
mod employees_page;
mod event_form_modal;
mod finance_page;
mod github_panel;
mod kanban_board;
mod login_page;
mod modal;
mod project_detail;
mod project_files;
mod project_finance;
mod project_form_modal;
mod project_list;
mod project_team;
mod record_form_modal;
mod record_table;
mod task_detail_modal;
mod user_select;

pub use account_management::AccountManagement;
pub use admin_layout::AdminLayout;
pub use calendar_page::CalendarPage;
pub use category_manager::CategoryManager;
pub use change_password_modal::ChangePasswordModal;
pub use client_portal::ClientPortal;
pub use dashboard::Dashboard;
pub use delete_confirm_button::DeleteConfirmButton;
pub use employees_page::EmployeesPage;
pub use event_form_modal::EventFormModal;
pub use finance_page::FinancePage;
pub use github_panel::GitHubPanel;
pub use kanban_board::KanbanBoard;
pub use login_page::LoginPage;
pub use modal::{ErrorBanner, Modal};
pub use project_detail::ProjectDetail;
pub use project_files::ProjectFiles;
pub use project_finance::ProjectFinance;
pub use project_form_modal::ProjectFormModal;
pub use project_list::ProjectList;
pub use project_team::ProjectTeam;
pub use record_form_modal::RecordFormModal;
pub use record_table::RecordTable;
pub use task_detail_modal::TaskDetailModal;
pub use user_select::{UserMultiSelect, UserSelect};
