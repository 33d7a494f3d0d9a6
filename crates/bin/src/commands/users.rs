//! User management commands, driven through the list view and user form.

use roster::ui::{ListState, Submitted, UserListView};

use super::{api_client, submit_or_exit};
use crate::{
    cli::{UsersArgs, UsersCommand},
    output::{self, OutputFormat},
};

/// Run a users subcommand
pub async fn run(args: &UsersArgs, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let client = api_client(&args.client);
    let mut view = UserListView::new(client.clone());

    match &args.command {
        UsersCommand::List => {
            view.mount().await;
            if output::flush_notifications(&mut view.notifications, format)
                || view.state() != ListState::Loaded
            {
                std::process::exit(1);
            }
            output::print_users(view.rows(), format)?;
        }
        UsersCommand::Show { id } => match client.get_user(*id).await {
            Ok(user) => output::print_users(std::slice::from_ref(&user), format)?,
            Err(e) => {
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        },
        UsersCommand::Add { email, password } => {
            let mut form = view.add_form();
            form.set_email(email.as_str());
            form.set_password(password.as_str());
            if let Submitted::Created(user) = submit_or_exit(&mut form, format).await {
                output::print_users(&[user], format)?;
            }
        }
        UsersCommand::Edit {
            id,
            email,
            password,
        } => {
            view.mount().await;
            if output::flush_notifications(&mut view.notifications, format) {
                std::process::exit(1);
            }
            let Some(mut form) = view.edit_form(*id) else {
                eprintln!("error: User not found: {id}");
                std::process::exit(1);
            };
            if let Some(email) = email {
                form.set_email(email.as_str());
            }
            if let Some(password) = password {
                form.set_password(password.as_str());
            }
            if let Submitted::Updated(user) = submit_or_exit(&mut form, format).await {
                output::print_users(&[user], format)?;
            }
        }
        UsersCommand::Delete { id } => {
            let deleted = view.delete(*id).await;
            // The refresh after a delete may fail; only the delete decides the exit code
            output::flush_notifications(&mut view.notifications, format);
            if !deleted {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
