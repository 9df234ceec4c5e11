//! Message decoration per notification type.

/// Decorate `message` for the given notification kind.
///
/// Dialogs get an emoji prefix (`"✅ Done"`). Spoken notifications get a short
/// word label and a comma-space separator instead (`"error, Build failed"`),
/// since speech synthesizers read emoji badly. Unknown kinds pass through
/// untouched.
pub fn format_message(message: &str, kind: &str, is_dialog: bool) -> String {
    let (emoji, label) = match kind {
        "success" => ("✅", ""),
        "error" => ("❌", "error"),
        "info" => ("ℹ️", ""),
        "warning" => ("⚠️", "alert"),
        _ => return message.to_string(),
    };

    if is_dialog {
        format!("{} {}", emoji, message)
    } else {
        format!("{}, {}", label, message)
    }
}
