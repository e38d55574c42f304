//! "Profiles" screen — team directory.

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem};

use leadflow_data::{TeamProfile, sample_profiles};

pub(crate) struct ProfilesScreen {
    profiles: Vec<TeamProfile>,
    selected: usize,
}

impl ProfilesScreen {
    pub(crate) fn new() -> Self {
        Self {
            profiles: sample_profiles(),
            selected: 0,
        }
    }

    pub(crate) fn draw(&self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([Constraint::Min(1)])
            .split(area);

        let items: Vec<ListItem> = self
            .profiles
            .iter()
            .enumerate()
            .map(|(i, profile)| {
                let style = if i == self.selected {
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                let prefix = if i == self.selected { "▸ " } else { "  " };
                let dot = if profile.active {
                    Span::styled("● ", Style::default().fg(Color::Green))
                } else {
                    Span::styled("○ ", Style::default().fg(Color::DarkGray))
                };
                ListItem::new(Line::from(vec![
                    Span::raw(prefix.to_string()),
                    dot,
                    Span::raw(format!(
                        "{:<4} {:<20} {:<24} {}",
                        profile.id, profile.name, profile.role, profile.email
                    )),
                ]))
                .style(style)
            })
            .collect();

        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Team ({}) ", self.profiles.len())),
        );
        f.render_widget(list, chunks[0]);
    }

    pub(crate) fn handle_key(&mut self, code: KeyCode, _modifiers: KeyModifiers) {
        match code {
            KeyCode::Up | KeyCode::Char('k') => {
                if self.selected > 0 {
                    self.selected -= 1;
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < self.profiles.len() {
                    self.selected += 1;
                }
            }
            _ => {}
        }
    }
}
