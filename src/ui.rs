//! Layout and drawing: bordered playfield and key help.

use crate::engine::Engine;
use crate::theme::Theme;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget};

const HELP: &str = "a/← left  d/→ right  s/↓ down  other: rotate  Ctrl-C: quit";

/// Outer size (border included) of a board drawn from `rows`.
fn board_size(rows: &[Line<'_>]) -> (u16, u16) {
    let w = rows.iter().map(Line::width).max().unwrap_or(0) as u16;
    (w + 2, rows.len() as u16 + 2)
}

/// Centre a `width` x `height` rect inside `area`, clamped to it.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

/// Draw the current frame: playfield centred, help line underneath.
pub fn draw(frame: &mut Frame, engine: &Engine, theme: &Theme, title: &str) {
    let area = frame.area();
    let rows: Vec<Line> = engine
        .render_frame(theme)
        .into_iter()
        .map(Line::from)
        .collect();
    let (bw, bh) = board_size(&rows);
    let help_w = Line::from(HELP).width() as u16;
    let outer = centered(area, bw.max(help_w), bh + 1);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(bh), Constraint::Length(1)])
        .split(outer);

    let board_area = centered(chunks[0], bw, bh);
    let board = Paragraph::new(rows)
        .style(Style::default().fg(theme.main_fg).bg(theme.bg))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.div_line).bg(theme.bg))
                .title(Span::styled(
                    format!(" {title} "),
                    Style::default()
                        .fg(theme.title)
                        .add_modifier(Modifier::BOLD),
                )),
        );
    board.render(board_area, frame.buffer_mut());

    Paragraph::new(Line::from(Span::styled(
        HELP,
        Style::default().fg(theme.main_fg),
    )))
    .alignment(Alignment::Center)
    .render(chunks[1], frame.buffer_mut());
}
