//! "Documents" screen — read-only list of stored documents.

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};

use leadflow_data::{Document, sample_documents};

pub(crate) struct DocumentsScreen {
    documents: Vec<Document>,
    selected: usize,
}

impl DocumentsScreen {
    pub(crate) fn new() -> Self {
        Self {
            documents: sample_documents(),
            selected: 0,
        }
    }

    pub(crate) fn draw(&self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Min(1),    // List
                Constraint::Length(3), // Detail
            ])
            .split(area);

        let items: Vec<ListItem> = self
            .documents
            .iter()
            .enumerate()
            .map(|(i, doc)| {
                let style = if i == self.selected {
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                let prefix = if i == self.selected { "▸ " } else { "  " };
                ListItem::new(format!(
                    "{prefix}{:<4} {:<28} {:<12} v{}",
                    doc.id, doc.title, doc.category, doc.version
                ))
                .style(style)
            })
            .collect();

        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Documents ({}) ", self.documents.len())),
        );
        f.render_widget(list, chunks[0]);

        let detail = match self.documents.get(self.selected) {
            Some(doc) => format!(
                "Owner: {}   Updated: {}",
                doc.owner,
                doc.updated_at.format("%Y-%m-%d")
            ),
            None => "No documents.".to_string(),
        };
        let footer = Paragraph::new(detail)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(footer, chunks[1]);
    }

    pub(crate) fn handle_key(&mut self, code: KeyCode, _modifiers: KeyModifiers) {
        match code {
            KeyCode::Up | KeyCode::Char('k') => {
                if self.selected > 0 {
                    self.selected -= 1;
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < self.documents.len() {
                    self.selected += 1;
                }
            }
            _ => {}
        }
    }
}
