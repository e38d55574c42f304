//! Reusable TUI widgets.

use leadflow_shared::LeadId;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

/// Bottom status bar.
///
/// While a card is lifted the bar swaps the last status message for the
/// gesture hint, in the same accent the drag overlay uses.
pub(crate) fn status_bar(msg: &str, dragging: Option<&LeadId>) -> Paragraph<'static> {
    match dragging {
        Some(lead) => Paragraph::new(format!(
            " dragging {lead}: release over a column, Esc cancels"
        ))
        .style(Style::default().bg(Color::Yellow).fg(Color::Black)),
        None => Paragraph::new(format!(" {msg}"))
            .style(Style::default().bg(Color::DarkGray).fg(Color::White)),
    }
}
