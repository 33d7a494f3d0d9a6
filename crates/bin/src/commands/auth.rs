//! Login, register, and logout commands.

use roster::{
    client::SessionStorage,
    ui::{FormPurpose, Submitted, UserForm},
};

use super::{api_client, submit_or_exit};
use crate::{
    cli::{ClientArgs, CredentialsArgs},
    output::{self, OutputFormat},
};

/// Run the login command
pub async fn login(
    args: &CredentialsArgs,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut form = credentials_form(args, FormPurpose::Login);
    if let Submitted::LoggedIn { .. } = submit_or_exit(&mut form, format).await {
        match format {
            OutputFormat::Human => {
                println!("Session saved to {}", args.client.session_file.display())
            }
            OutputFormat::Json => output::print_json(&serde_json::json!({
                "logged_in": args.email.trim(),
                "session_file": args.client.session_file,
            }))?,
        }
    }
    Ok(())
}

/// Run the register command
pub async fn register(
    args: &CredentialsArgs,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut form = credentials_form(args, FormPurpose::Register);
    if let Submitted::Registered(user) = submit_or_exit(&mut form, format).await {
        match format {
            OutputFormat::Human => println!("Created user {} ({})", user.id, user.email),
            OutputFormat::Json => output::print_json(&user)?,
        }
    }
    Ok(())
}

/// Run the logout command
pub async fn logout(
    args: &ClientArgs,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let client = api_client(args);
    let had_session = client.session().get().is_some();
    client.logout().await?;

    match format {
        OutputFormat::Human if had_session => println!("Logged out"),
        OutputFormat::Human => println!("Not logged in"),
        OutputFormat::Json => {
            output::print_json(&serde_json::json!({ "logged_out": had_session }))?
        }
    }
    Ok(())
}

fn credentials_form(args: &CredentialsArgs, purpose: FormPurpose) -> UserForm {
    let mut form = UserForm::new(api_client(&args.client), purpose);
    form.set_email(args.email.as_str());
    form.set_password(args.password.as_str());
    form
}
