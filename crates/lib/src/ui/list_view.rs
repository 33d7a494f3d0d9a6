//! The user list view.
//!
//! Holds the rows last fetched from the service. A failed refresh keeps the
//! previous rows so the table does not go blank on a transient error.

use tracing::{debug, warn};

use super::{
    form::{FormPurpose, UserForm},
    notification::Notifications,
};
use crate::{ApiClient, UserSummary};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListState {
    /// Not yet mounted
    Idle,
    Loading,
    Loaded,
    Errored,
}

pub struct UserListView {
    client: ApiClient,
    state: ListState,
    rows: Vec<UserSummary>,
    pub notifications: Notifications,
}

impl UserListView {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            state: ListState::Idle,
            rows: Vec::new(),
            notifications: Notifications::new(),
        }
    }

    pub fn state(&self) -> ListState {
        self.state
    }

    pub fn rows(&self) -> &[UserSummary] {
        &self.rows
    }

    pub fn row(&self, id: u64) -> Option<&UserSummary> {
        self.rows.iter().find(|u| u.id == id)
    }

    /// First display of the view.
    pub async fn mount(&mut self) {
        self.refresh().await;
    }

    /// Reload the rows from the service.
    pub async fn refresh(&mut self) {
        self.state = ListState::Loading;
        match self.client.list_users().await {
            Ok(rows) => {
                debug!("Loaded {} users", rows.len());
                self.rows = rows;
                self.state = ListState::Loaded;
            }
            Err(e) => {
                warn!("Failed to fetch users: {e}");
                self.notifications.error("Failed to fetch users");
                self.state = ListState::Errored;
            }
        }
    }

    /// Delete a row, refreshing on success.
    ///
    /// A failed delete leaves the rows and state untouched.
    pub async fn delete(&mut self, id: u64) -> bool {
        match self.client.delete_user(id).await {
            Ok(_) => {
                self.notifications.success("User deleted successfully");
                self.refresh().await;
                true
            }
            Err(e) => {
                warn!(user_id = id, "Failed to delete user: {e}");
                self.notifications.error("Failed to delete user");
                false
            }
        }
    }

    /// An empty form for adding a user.
    pub fn add_form(&self) -> UserForm {
        UserForm::new(self.client.clone(), FormPurpose::Create)
    }

    /// A form pre-filled from the row with `id`, if it is listed.
    pub fn edit_form(&self, id: u64) -> Option<UserForm> {
        self.row(id).map(|user| UserForm::edit(self.client.clone(), user))
    }

    /// Called after a form closes successfully.
    pub async fn form_saved(&mut self) {
        self.refresh().await;
    }
}
