//! UI Components
//!
//! Screens and the reusable Leptos pieces they are built from.

mod application_board;
mod delete_confirm_button;
mod experience_catalogue;
mod experience_detail;
mod list_status;
mod log_panel;
mod nav_bar;
mod notice_toast;
mod review_list;
mod withdrawal_list;

pub use application_board::ApplicationBoard;
pub use delete_confirm_button::DeleteConfirmButton;
pub use experience_catalogue::ExperienceCatalogue;
pub use experience_detail::ExperienceDetail;
pub use list_status::{ErrorBanner, LoadMoreButton, LoadingIndicator, Pager, StatTile};
pub use log_panel::LogPanel;
pub use nav_bar::NavBar;
pub use notice_toast::NoticeToast;
pub use review_list::ReviewList;
pub use withdrawal_list::WithdrawalList;
