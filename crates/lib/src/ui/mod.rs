//! View state for the admin front end.
//!
//! The views own no rendering; they drive an [`ApiClient`](crate::ApiClient)
//! and expose state, rows, and notifications for whatever draws them.

pub mod form;
pub mod list_view;
pub mod notification;

pub use form::{FieldError, FormFields, FormPurpose, FormState, Submitted, UserForm};
pub use list_view::{ListState, UserListView};
pub use notification::{Notification, NotificationKind, Notifications};
