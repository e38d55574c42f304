//! "Courses" screen — training catalogue.

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};

use leadflow_data::{Course, sample_courses};

pub(crate) struct CoursesScreen {
    courses: Vec<Course>,
    selected: usize,
}

impl CoursesScreen {
    pub(crate) fn new() -> Self {
        Self {
            courses: sample_courses(),
            selected: 0,
        }
    }

    pub(crate) fn draw(&self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Min(1),    // List
                Constraint::Length(1), // Hint
            ])
            .split(area);

        let items: Vec<ListItem> = self
            .courses
            .iter()
            .enumerate()
            .map(|(i, course)| {
                let style = if i == self.selected {
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD)
                } else if !course.published {
                    Style::default().fg(Color::DarkGray)
                } else {
                    Style::default()
                };
                let prefix = if i == self.selected { "▸ " } else { "  " };
                let badge = if course.published { "published" } else { "draft" };
                ListItem::new(format!(
                    "{prefix}{:<4} {:<30} {:<12} {:>2} lessons  {:>7}  [{badge}]",
                    course.id,
                    course.title,
                    course.category,
                    course.lessons,
                    format_duration(course.duration_mins),
                ))
                .style(style)
            })
            .collect();

        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Courses ({}) ", self.courses.len())),
        );
        f.render_widget(list, chunks[0]);

        let hint = Paragraph::new(" ↑/↓ select")
            .style(Style::default().fg(Color::DarkGray));
        f.render_widget(hint, chunks[1]);
    }

    pub(crate) fn handle_key(&mut self, code: KeyCode, _modifiers: KeyModifiers) {
        match code {
            KeyCode::Up | KeyCode::Char('k') => {
                if self.selected > 0 {
                    self.selected -= 1;
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < self.courses.len() {
                    self.selected += 1;
                }
            }
            _ => {}
        }
    }
}

fn format_duration(mins: u32) -> String {
    if mins < 60 {
        format!("{mins}m")
    } else {
        format!("{}h {:02}m", mins / 60, mins % 60)
    }
}
