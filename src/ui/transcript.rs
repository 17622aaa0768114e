//! Plain-text transcript rendering.
//!
//! Each message becomes a role header followed by its content lines. The
//! header is shown only when the role changes from the previous message.

use crate::domain::{
    analysis::whole_units,
    category_breakdown::CategoryShare,
    message::{Message, Role},
};

const CONTENT_INDENT: &str = "  ";

/// Renders messages as terminal lines.
///
/// `previous_role` is the role of the message printed just before the first
/// one here, so incremental output keeps the same grouping as a full render.
pub fn render_messages(messages: &[Message], previous_role: Option<Role>) -> Vec<String> {
    let mut lines = Vec::new();
    let mut prev_role = previous_role;

    for message in messages {
        if prev_role != Some(message.role) {
            lines.push(format!("[{}]", message.role.display_label()));
        }

        if message.content.is_empty() {
            lines.push(CONTENT_INDENT.to_owned());
        } else {
            lines.extend(
                message
                    .content
                    .lines()
                    .map(|line| format!("{CONTENT_INDENT}{line}")),
            );
        }

        prev_role = Some(message.role);
    }

    lines
}

/// Renders the spending breakdown, one line per category.
pub fn render_breakdown(shares: &[CategoryShare], currency: &str) -> Vec<String> {
    if shares.is_empty() {
        return vec!["No spending categories.".to_owned()];
    }

    let name_width = shares
        .iter()
        .map(|share| share.name.chars().count())
        .max()
        .unwrap_or(0);

    shares
        .iter()
        .map(|share| {
            format!(
                "{:<name_width$}  {:>10} {}  {:>5.1}%",
                share.name,
                whole_units(share.amount),
                currency,
                share.display_percentage(),
            )
        })
        .collect()
}
