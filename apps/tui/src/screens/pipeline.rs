//! "Pipeline" screen — the drag-and-drop board.
//!
//! Renders the seven stage columns and their cards, and registers with the
//! engine the rectangle every column and card was actually drawn at. Mouse
//! events between frames are hit-tested against those recorded rectangles,
//! so what you grab and where you drop is exactly what is on screen.

use std::sync::Arc;
use std::time::Instant;

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::layout::Position;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use leadflow_board::{DropTarget, Point, PointerKind, Region, registry, resolve_stage};
use leadflow_core::{BoardEngine, BoardEvent};
use leadflow_shared::{Lead, LeadId, StageId, format_usd};

/// Rows one rendered card occupies (border + two content lines + border).
const CARD_HEIGHT: u16 = 4;

pub(crate) struct PipelineScreen {
    engine: BoardEngine,
    /// Focused column (keyboard navigation).
    focused: usize,
    /// Selected card row within the focused column.
    selected: usize,
    /// Card rectangles recorded during the last draw, for mouse hit-testing.
    card_hits: Vec<(Rect, LeadId)>,
}

impl PipelineScreen {
    pub(crate) fn new(engine: BoardEngine) -> Self {
        Self {
            engine,
            focused: 0,
            selected: 0,
            card_hits: Vec::new(),
        }
    }

    /// The snapshot the board is rendering; shared with the leads screen.
    pub(crate) fn store(&self) -> &leadflow_board::LeadStore {
        self.engine.store()
    }

    /// The lead currently in flight, if any; drives the status-bar hint.
    pub(crate) fn dragging(&self) -> Option<&LeadId> {
        self.engine.active_lead()
    }

    /// Advance gesture timing; called once per event-loop turn.
    pub(crate) fn tick(&mut self) {
        self.engine.tick(Instant::now());
    }

    // -----------------------------------------------------------------------
    // Drawing
    // -----------------------------------------------------------------------

    pub(crate) fn draw(&mut self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(1),    // Board
                Constraint::Length(1), // Hint line
            ])
            .split(area);

        let grouped = self.engine.grouped();
        self.clamp_selection(&grouped);

        let column_areas = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 7); 7])
            .split(chunks[0]);

        // Register this frame's geometry before rendering so the hover
        // highlight resolves against the same rectangles the drop will.
        let targets: Vec<DropTarget> = grouped
            .iter()
            .zip(column_areas.iter())
            .map(|((column, _), rect)| DropTarget::new(column.stage, to_region(*rect)))
            .collect();
        let hover = self
            .engine
            .drag_position()
            .and_then(|p| resolve_stage(p, &targets));
        self.engine.set_targets(targets);

        self.card_hits.clear();
        for (i, ((column, leads), col_area)) in
            grouped.iter().zip(column_areas.iter()).enumerate()
        {
            self.draw_column(f, *col_area, i, *column, leads, hover);
        }

        let hint = Paragraph::new(
            " ←/→ column   ↑/↓ card   [ / ] move stage   mouse: drag cards   Esc cancel",
        )
        .style(Style::default().fg(Color::DarkGray));
        f.render_widget(hint, chunks[1]);

        self.draw_overlay(f);
    }

    fn draw_column(
        &mut self,
        f: &mut Frame,
        col_area: Rect,
        index: usize,
        column: &'static registry::StageColumn,
        leads: &[Arc<Lead>],
        hover: Option<StageId>,
    ) {
        let is_focused = index == self.focused;
        let border_style = if hover == Some(column.stage) {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else if is_focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let value: f64 = leads.iter().filter_map(|l| l.value).sum();
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(format!(" {} ({}) ", column.title, leads.len()))
            .title_bottom(Line::from(format!(" {} ", format_usd(value))).right_aligned());
        let inner = block.inner(col_area);
        f.render_widget(block, col_area);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let desc = Paragraph::new(column.description)
            .style(Style::default().fg(Color::DarkGray))
            .wrap(ratatui::widgets::Wrap { trim: true });
        let desc_area = Rect { height: 1, ..inner };
        f.render_widget(desc, desc_area);

        if leads.is_empty() {
            let placeholder = Paragraph::new("(no leads)")
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::DarkGray));
            if inner.height > 2 {
                f.render_widget(
                    placeholder,
                    Rect { y: inner.y + 2, height: 1, ..inner },
                );
            }
            return;
        }

        let mut y = inner.y + 1;
        for (row, lead) in leads.iter().enumerate() {
            let remaining = (inner.y + inner.height).saturating_sub(y);
            if remaining < CARD_HEIGHT {
                let hidden = leads.len() - row;
                let more = Paragraph::new(format!("+{hidden} more"))
                    .style(Style::default().fg(Color::DarkGray));
                if remaining > 0 {
                    f.render_widget(more, Rect { y, height: 1, ..inner });
                }
                break;
            }

            let card_area = Rect {
                x: inner.x,
                y,
                width: inner.width,
                height: CARD_HEIGHT,
            };
            self.draw_card(f, card_area, lead, is_focused && row == self.selected);
            self.card_hits.push((card_area, lead.id.clone()));
            y += CARD_HEIGHT;
        }
    }

    fn draw_card(&self, f: &mut Frame, area: Rect, lead: &Lead, selected: bool) {
        let dragging = self.engine.active_lead() == Some(&lead.id);

        let style = if dragging {
            Style::default().fg(Color::DarkGray)
        } else if selected {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };

        let detail = match (lead.value, lead.company.as_deref()) {
            (Some(v), Some(c)) => format!("{}  {}", format_usd(v), c),
            (Some(v), None) => format_usd(v),
            (None, Some(c)) => c.to_string(),
            (None, None) => String::new(),
        };

        let card = Paragraph::new(vec![
            Line::from(lead.name.as_str()),
            Line::from(detail).style(Style::default().fg(Color::DarkGray)),
        ])
        .style(style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(style)
                .title(format!(" {} ", lead.id)),
        );
        f.render_widget(card, area);
    }

    /// Floating card that follows the pointer while a drag is active.
    fn draw_overlay(&self, f: &mut Frame) {
        let (Some(id), Some(pos)) = (self.engine.active_lead(), self.engine.drag_position())
        else {
            return;
        };
        let Some(lead) = self.engine.store().get(id) else {
            return;
        };

        let frame_area = f.area();
        let width = 24.min(frame_area.width);
        let height = 3.min(frame_area.height);
        let x = (pos.x as u16)
            .min(frame_area.x + frame_area.width.saturating_sub(width));
        let y = (pos.y as u16)
            .min(frame_area.y + frame_area.height.saturating_sub(height));
        let area = Rect { x, y, width, height };

        let overlay = Paragraph::new(lead.name.as_str()).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .title(format!(" {} ", lead.id)),
        );
        f.render_widget(Clear, area);
        f.render_widget(overlay, area);
    }

    // -----------------------------------------------------------------------
    // Input
    // -----------------------------------------------------------------------

    pub(crate) fn handle_key(
        &mut self,
        code: KeyCode,
        _modifiers: KeyModifiers,
    ) -> Option<String> {
        match code {
            KeyCode::Left | KeyCode::Char('h') => {
                self.focused = self.focused.saturating_sub(1);
                self.selected = 0;
                None
            }
            KeyCode::Right | KeyCode::Char('l') => {
                if self.focused + 1 < StageId::ALL.len() {
                    self.focused += 1;
                    self.selected = 0;
                }
                None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let count = self.focused_count();
                if self.selected + 1 < count {
                    self.selected += 1;
                }
                None
            }
            KeyCode::Char('[') => self.keyboard_move(StageStep::Back),
            KeyCode::Char(']') => self.keyboard_move(StageStep::Forward),
            KeyCode::Esc => {
                if self.engine.is_dragging() {
                    self.engine.cancel();
                    Some("Drag cancelled".to_string())
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    fn keyboard_move(&mut self, dir: StageStep) -> Option<String> {
        let lead = self.selected_lead()?;
        let target = match dir {
            StageStep::Back => lead.status.prev(),
            StageStep::Forward => lead.status.next(),
        };
        let Some(target) = target else {
            return Some(match dir {
                StageStep::Back => "Already at the first stage".to_string(),
                StageStep::Forward => "Already at the last stage".to_string(),
            });
        };

        let id = lead.id.clone();
        let committed = self.engine.attempt_move(&id, target)?;
        self.follow(&id);
        Some(format!(
            "Moved {} to {}",
            committed.lead,
            registry::column(committed.to).title
        ))
    }

    // -----------------------------------------------------------------------
    // Mouse input (board surface units are terminal cells)
    // -----------------------------------------------------------------------

    pub(crate) fn on_mouse_down(&mut self, x: u16, y: u16) {
        let position = Position::new(x, y);
        let hit = self
            .card_hits
            .iter()
            .find(|(rect, _)| rect.contains(position))
            .map(|(_, id)| id.clone());

        if let Some(id) = hit {
            self.follow(&id);
            self.engine
                .press(PointerKind::Mouse, id, to_point(x, y), Instant::now());
        }
    }

    pub(crate) fn on_mouse_drag(&mut self, x: u16, y: u16) {
        self.engine.moved(to_point(x, y), Instant::now());
    }

    pub(crate) fn on_mouse_up(&mut self, x: u16, y: u16) -> Option<String> {
        match self.engine.release(to_point(x, y), Instant::now())? {
            BoardEvent::Moved(committed) => {
                self.follow(&committed.lead);
                Some(format!(
                    "Moved {} to {}",
                    committed.lead,
                    registry::column(committed.to).title
                ))
            }
            BoardEvent::Clicked(id) => {
                self.follow(&id);
                Some(format!("Selected {id}"))
            }
        }
    }

    // -----------------------------------------------------------------------
    // Selection helpers
    // -----------------------------------------------------------------------

    fn focused_count(&self) -> usize {
        self.engine.store().by_stage(StageId::ALL[self.focused]).len()
    }

    fn selected_lead(&self) -> Option<Arc<Lead>> {
        self.engine
            .store()
            .by_stage(StageId::ALL[self.focused])
            .get(self.selected)
            .cloned()
    }

    /// Point focus and selection at `id`, wherever it now lives.
    fn follow(&mut self, id: &LeadId) {
        let Some(lead) = self.engine.store().get(id) else {
            return;
        };
        let stage = lead.status;
        self.focused = stage.index();
        if let Some(row) = self
            .engine
            .store()
            .by_stage(stage)
            .iter()
            .position(|l| &l.id == id)
        {
            self.selected = row;
        }
    }

    fn clamp_selection(&mut self, grouped: &[(&'static registry::StageColumn, Vec<Arc<Lead>>)]) {
        let count = grouped
            .get(self.focused)
            .map(|(_, leads)| leads.len())
            .unwrap_or(0);
        self.selected = self.selected.min(count.saturating_sub(1));
    }
}

/// Keyboard stage-move direction.
enum StageStep {
    Back,
    Forward,
}

fn to_point(x: u16, y: u16) -> Point {
    Point::new(x as f32, y as f32)
}

fn to_region(rect: Rect) -> Region {
    Region::new(
        rect.x as f32,
        rect.y as f32,
        rect.width as f32,
        rect.height as f32,
    )
}
