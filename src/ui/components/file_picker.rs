//! Browse popup for the file-upload field

use crate::state::forms::FileBrowser;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState},
    Frame,
};

/// Render the directory-listing popup over the current view
pub fn render_file_picker(frame: &mut Frame, browser: &FileBrowser) {
    let area = frame.area();
    let width = area.width.saturating_sub(10).min(70).max(30);
    let height = area.height.saturating_sub(6).min(20).max(8);
    let popup = Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    };

    frame.render_widget(Clear, popup);

    let items: Vec<ListItem> = browser
        .entries
        .iter()
        .map(|path| {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            let line = if path.is_dir() {
                Line::from(vec![
                    Span::styled("▸ ", Style::default().fg(Color::Yellow)),
                    Span::styled(format!("{name}/"), Style::default().fg(Color::Yellow)),
                ])
            } else {
                Line::from(Span::raw(name))
            };
            ListItem::new(line)
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title(format!(" {} ", browser.dir.display()))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut list_state = ListState::default();
    list_state.select(Some(browser.selected));
    frame.render_stateful_widget(list, popup, &mut list_state);
}
