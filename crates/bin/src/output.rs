//! Output formatting helpers for human-readable and JSON output.

use roster::{
    UserSummary,
    ui::{FieldError, NotificationKind, Notifications},
};
use serde::Serialize;

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Human,
    Json,
}

/// Print a table with aligned columns in human-readable format.
///
/// `headers` and each row in `rows` must have the same length.
pub fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    if rows.is_empty() {
        return;
    }

    let col_count = headers.len();
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(col_count) {
            widths[i] = widths[i].max(cell.len());
        }
    }

    let format_line = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .enumerate()
            .map(|(i, cell)| format!("{:<width$}", cell, width = widths[i]))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    println!("{}", format_line(headers.to_vec()));
    for row in rows {
        println!(
            "{}",
            format_line(row.iter().take(col_count).map(String::as_str).collect())
        );
    }
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}

/// Print users as a table or a JSON array.
pub fn print_users(users: &[UserSummary], format: OutputFormat) -> Result<(), serde_json::Error> {
    match format {
        OutputFormat::Human => {
            if users.is_empty() {
                println!("No users");
            }
            let rows: Vec<Vec<String>> = users
                .iter()
                .map(|u| vec![u.id.to_string(), u.email.clone()])
                .collect();
            print_table(&["ID", "EMAIL"], &rows);
            Ok(())
        }
        OutputFormat::Json => print_json(users),
    }
}

/// Print and clear pending notifications. Errors go to stderr.
///
/// Returns true if any of them was an error.
pub fn flush_notifications(notifications: &mut Notifications, format: OutputFormat) -> bool {
    let mut failed = false;
    for notification in notifications.drain() {
        failed |= notification.kind == NotificationKind::Error;
        match (format, notification.kind) {
            (OutputFormat::Json, _) => match serde_json::to_string(&notification) {
                Ok(json) => eprintln!("{json}"),
                Err(_) => eprintln!("{}", notification.message),
            },
            (OutputFormat::Human, NotificationKind::Success) => {
                println!("{}", notification.message)
            }
            (OutputFormat::Human, NotificationKind::Error) => {
                eprintln!("error: {}", notification.message)
            }
        }
    }
    failed
}

pub fn print_field_errors(errors: &[FieldError]) {
    for error in errors {
        eprintln!("error: {}: {}", error.field, error.message);
    }
}
