//! "Leads" screen — flat roster of every lead plus recent stage changes.

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};

use leadflow_board::{LeadStore, registry};
use leadflow_shared::format_usd;

pub(crate) struct LeadsScreen {
    selected: usize,
}

impl LeadsScreen {
    pub(crate) fn new() -> Self {
        Self { selected: 0 }
    }

    pub(crate) fn draw(
        &mut self,
        f: &mut Frame,
        area: Rect,
        store: &LeadStore,
        activity: &[String],
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(1), // Header
                Constraint::Min(1),    // Roster
                Constraint::Length(7), // Activity feed
            ])
            .split(area);

        self.selected = self.selected.min(store.len().saturating_sub(1));

        let header = Paragraph::new(format!(
            "    {:<5} {:<22} {:<20} {:<14} {:>10}",
            "ID", "NAME", "COMPANY", "STAGE", "VALUE"
        ))
        .style(Style::default().add_modifier(Modifier::BOLD));
        f.render_widget(header, chunks[0]);

        if store.is_empty() {
            let empty = Paragraph::new("No leads loaded.")
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).title(" Leads "));
            f.render_widget(empty, chunks[1]);
        } else {
            let items: Vec<ListItem> = store
                .iter()
                .enumerate()
                .map(|(i, lead)| {
                    let style = if i == self.selected {
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD)
                    } else {
                        Style::default()
                    };
                    let prefix = if i == self.selected { "▸ " } else { "  " };
                    let value = lead.value.map(format_usd).unwrap_or_default();
                    ListItem::new(format!(
                        "{prefix}{:<5} {:<22} {:<20} {:<14} {:>10}",
                        lead.id.to_string(),
                        lead.name,
                        lead.company.as_deref().unwrap_or("-"),
                        registry::column(lead.status).title,
                        value,
                    ))
                    .style(style)
                })
                .collect();

            let list = List::new(items).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!(" Leads ({}) ", store.len())),
            );
            f.render_widget(list, chunks[1]);
        }

        self.draw_activity(f, chunks[2], activity);
    }

    /// Most recent stage changes, newest at the bottom.
    fn draw_activity(&self, f: &mut Frame, area: Rect, activity: &[String]) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Recent activity ");
        let visible = area.height.saturating_sub(2) as usize;
        let start = activity.len().saturating_sub(visible);

        let body = if activity.is_empty() {
            Paragraph::new("(no stage changes yet)")
                .style(Style::default().fg(Color::DarkGray))
                .block(block)
        } else {
            let lines: Vec<Line> = activity[start..]
                .iter()
                .map(|entry| Line::from(entry.as_str()))
                .collect();
            Paragraph::new(lines)
                .style(Style::default().fg(Color::DarkGray))
                .block(block)
        };
        f.render_widget(body, area);
    }

    pub(crate) fn handle_key(
        &mut self,
        code: KeyCode,
        _modifiers: KeyModifiers,
        count: usize,
    ) {
        match code {
            KeyCode::Up | KeyCode::Char('k') => {
                if self.selected > 0 {
                    self.selected -= 1;
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < count {
                    self.selected += 1;
                }
            }
            _ => {}
        }
    }
}
