pub mod auth;
pub mod health;
pub mod serve;
pub mod users;

use std::sync::Arc;

use roster::{
    ApiClient,
    client::FileSession,
    ui::{Submitted, UserForm},
};

use crate::{
    cli::ClientArgs,
    output::{self, OutputFormat},
};

/// Build a client whose session persists in the configured file.
pub fn api_client(args: &ClientArgs) -> ApiClient {
    ApiClient::new(
        args.url.clone(),
        Arc::new(FileSession::new(&args.session_file)),
    )
}

/// Submit a form and report the outcome, exiting non-zero if it stays open.
pub async fn submit_or_exit(form: &mut UserForm, format: OutputFormat) -> Submitted {
    let submitted = form.submit().await;
    output::print_field_errors(form.field_errors());
    output::flush_notifications(&mut form.notifications, format);

    match submitted {
        Some(submitted) => submitted,
        None => std::process::exit(1),
    }
}
