//! Layout components (content area, status bar)

use crate::platform;
use crate::state::{AppState, View};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Create the main layout, reserving the bottom line for the status bar
pub fn create_layout(area: Rect) -> Rect {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    chunks[0]
}

/// Center a fixed-width column in the content area
pub fn centered_column(area: Rect, max_width: u16) -> Rect {
    let width = area.width.min(max_width);
    Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        width,
        ..area
    }
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, state: &AppState, show_route: bool) {
    let area = frame.area();
    let status_area = Rect {
        x: 0,
        y: area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    let mut spans = vec![];

    // Connection status
    let conn_status = if state.backend_connected {
        Span::styled(" ● ", Style::default().fg(Color::Green))
    } else {
        Span::styled(" ○ ", Style::default().fg(Color::Red))
    };
    spans.push(conn_status);

    // View-specific hints
    let hints = get_view_hints(&state.current_view);
    spans.push(Span::styled(hints, Style::default().fg(Color::DarkGray)));

    // Transient status message
    if let Some(msg) = &state.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg.clone(), Style::default().fg(Color::Green)));
    }

    if show_route {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(
            state.current_route(),
            Style::default().fg(Color::Blue),
        ));
    }

    let status_bar = Paragraph::new(Line::from(spans));
    frame.render_widget(status_bar, status_area);
}

/// Get view-specific keyboard hints
fn get_view_hints(view: &View) -> String {
    match view {
        View::Welcome => format!(
            "Tab: next field | Enter: activate | {}: submit | Ctrl+C: quit",
            platform::SUBMIT_SHORTCUT
        ),
        View::Register => format!(
            "Tab: next | Space: toggle | ◀ ▶: choose | {}: browse | {}: submit",
            platform::BROWSE_SHORTCUT,
            platform::SUBMIT_SHORTCUT
        ),
        View::Confirmation => "Enter: new registration | Ctrl+C: quit".to_string(),
    }
}
