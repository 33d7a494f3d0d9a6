//! The user form: login, registration, and add/edit of a user.
//!
//! States: `Editing → Submitting → {Closed | EditingWithError}`. Required
//! fields are checked locally first; a form that fails that check never
//! reaches the API client.

use tracing::warn;

use super::notification::Notifications;
use crate::{
    ApiClient,
    user::{UserSummary, UserUpdate},
};

/// What submitting the form does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPurpose {
    Login,
    Register,
    Create,
    Edit(u64),
}

impl FormPurpose {
    pub fn title(self) -> &'static str {
        match self {
            FormPurpose::Login => "Login",
            FormPurpose::Register => "Register",
            FormPurpose::Create => "Add User",
            FormPurpose::Edit(_) => "Edit User",
        }
    }

    /// Editing keeps the old password when the field is left blank.
    fn password_required(self) -> bool {
        !matches!(self, FormPurpose::Edit(_))
    }

    fn success_message(self) -> &'static str {
        match self {
            FormPurpose::Login => "Login successful",
            FormPurpose::Register => "Registration successful! Please login.",
            FormPurpose::Create => "User added",
            FormPurpose::Edit(_) => "User updated",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    Editing,
    Submitting,
    Closed,
    EditingWithError,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Result of a successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submitted {
    LoggedIn { token: String },
    Registered(UserSummary),
    Created(UserSummary),
    Updated(UserSummary),
}

pub struct UserForm {
    client: ApiClient,
    purpose: FormPurpose,
    fields: FormFields,
    state: FormState,
    field_errors: Vec<FieldError>,
    pub notifications: Notifications,
}

impl UserForm {
    pub fn new(client: ApiClient, purpose: FormPurpose) -> Self {
        Self {
            client,
            purpose,
            fields: FormFields::default(),
            state: FormState::Editing,
            field_errors: Vec::new(),
            notifications: Notifications::new(),
        }
    }

    /// An edit form pre-filled with the user's current email.
    pub fn edit(client: ApiClient, user: &UserSummary) -> Self {
        let mut form = Self::new(client, FormPurpose::Edit(user.id));
        form.fields.email = user.email.clone();
        form
    }

    pub fn purpose(&self) -> FormPurpose {
        self.purpose
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    pub fn field_errors(&self) -> &[FieldError] {
        &self.field_errors
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.fields.email = email.into();
        self.field_errors.retain(|e| e.field != "email");
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.fields.password = password.into();
        self.field_errors.retain(|e| e.field != "password");
    }

    /// Check required fields, recording a message for each missing one.
    pub fn validate(&mut self) -> bool {
        self.field_errors.clear();
        if self.fields.email.trim().is_empty() {
            self.field_errors.push(FieldError {
                field: "email",
                message: "Please enter an email".to_string(),
            });
        }
        if self.purpose.password_required() && self.fields.password.trim().is_empty() {
            self.field_errors.push(FieldError {
                field: "password",
                message: "Please enter a password".to_string(),
            });
        }
        self.field_errors.is_empty()
    }

    /// Submit the form.
    ///
    /// Returns `None` when the form stays open, either because local
    /// validation failed or because the request did. Entered values are kept
    /// in both cases.
    pub async fn submit(&mut self) -> Option<Submitted> {
        if self.state == FormState::Closed || !self.validate() {
            return None;
        }

        self.state = FormState::Submitting;
        let email = self.fields.email.trim();
        let password = self.fields.password.as_str();

        let result = match self.purpose {
            FormPurpose::Login => self
                .client
                .login(email, password)
                .await
                .map(|token| Submitted::LoggedIn { token }),
            FormPurpose::Register => self
                .client
                .register(email, password)
                .await
                .map(Submitted::Registered),
            FormPurpose::Create => self
                .client
                .register(email, password)
                .await
                .map(Submitted::Created),
            FormPurpose::Edit(id) => {
                let update = UserUpdate {
                    email: Some(email.to_string()),
                    password: Some(password.to_string()).filter(|p| !p.trim().is_empty()),
                };
                self.client
                    .update_user(id, &update)
                    .await
                    .map(Submitted::Updated)
            }
        };

        match result {
            Ok(submitted) => {
                self.notifications.success(self.purpose.success_message());
                self.state = FormState::Closed;
                Some(submitted)
            }
            Err(e) => {
                warn!(form = self.purpose.title(), kind = e.kind(), "Submit failed: {e}");
                self.notifications.error(e.message());
                self.state = FormState::EditingWithError;
                None
            }
        }
    }
}
