//! Field rendering: one widget per field kind
//!
//! `draw_field` is the wrapper contract: label, widget, and an error line
//! beneath the widget when the field has one. It is a pure function of the
//! field snapshot and never mutates anything.

use crate::platform;
use crate::state::forms::{FieldKind, FieldValue, FormField};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Rows a field occupies, excluding its error line
pub fn field_height(field: &FormField) -> u16 {
    match field.config.kind {
        FieldKind::Textarea => 4,
        FieldKind::Checkbox => 1,
        _ => 3,
    }
}

/// Draw one form field with its label, widget, and error slot
pub fn draw_field(frame: &mut Frame, area: Rect, field: &FormField, error: Option<&str>, is_active: bool) {
    let (widget_area, error_area) = match error {
        Some(_) if area.height > 1 => {
            let widget = Rect {
                height: area.height - 1,
                ..area
            };
            let line = Rect {
                y: area.y + area.height - 1,
                height: 1,
                ..area
            };
            (widget, Some(line))
        }
        _ => (area, None),
    };

    // Exhaustive over the closed widget set: a new kind will not compile
    // until it renders.
    match field.config.kind {
        FieldKind::Text | FieldKind::Phone | FieldKind::Date => {
            draw_line_input(frame, widget_area, field, is_active)
        }
        FieldKind::Textarea => draw_textarea(frame, widget_area, field, is_active),
        FieldKind::Select => draw_select(frame, widget_area, field, is_active),
        FieldKind::Checkbox => draw_checkbox(frame, widget_area, field, is_active),
        FieldKind::FileUpload => draw_upload(frame, widget_area, field, is_active),
        FieldKind::Custom => match field.config.custom {
            Some(render) => render(frame, widget_area, field, is_active),
            // Definition-time validation makes this unreachable; if it ever
            // regresses, show it loudly instead of rendering nothing.
            None => draw_misconfigured(frame, widget_area, field),
        },
    }

    if let (Some(message), Some(line)) = (error, error_area) {
        let error_text = Paragraph::new(Line::from(Span::styled(
            format!(" {message}"),
            Style::default().fg(Color::Red),
        )));
        frame.render_widget(error_text, line);
    }
}

fn border_style(is_active: bool) -> Style {
    if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn value_style(is_active: bool) -> Style {
    if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::Gray)
    }
}

fn cursor_span(is_active: bool) -> Span<'static> {
    let cursor = if is_active { "▌" } else { "" };
    Span::styled(cursor, Style::default().fg(Color::Cyan))
}

fn labelled_block(field: &FormField, is_active: bool) -> Block<'_> {
    Block::default()
        .title(format!(" {} ", field.config.display_label()))
        .borders(Borders::ALL)
        .border_style(border_style(is_active))
}

fn draw_line_input(frame: &mut Frame, area: Rect, field: &FormField, is_active: bool) {
    let value = field.display_value();
    let mut spans = Vec::new();
    if let Some(icon) = field.config.icon {
        spans.push(Span::styled(
            format!("{icon} "),
            Style::default().fg(Color::DarkGray),
        ));
    }
    if value.is_empty() && !is_active {
        let placeholder = field.config.placeholder.as_deref().unwrap_or("");
        spans.push(Span::styled(
            placeholder.to_string(),
            Style::default().fg(Color::DarkGray),
        ));
    } else {
        spans.push(Span::styled(value, value_style(is_active)));
        spans.push(cursor_span(is_active));
    }

    let content = Paragraph::new(Line::from(spans)).block(labelled_block(field, is_active));
    frame.render_widget(content, area);
}

fn draw_textarea(frame: &mut Frame, area: Rect, field: &FormField, is_active: bool) {
    let value = field.display_value();
    let mut lines: Vec<Line> = if value.is_empty() && !is_active {
        let placeholder = field.config.placeholder.as_deref().unwrap_or("");
        vec![Line::from(Span::styled(
            placeholder.to_string(),
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        value
            .lines()
            .map(|l| Line::from(Span::styled(l.to_string(), value_style(is_active))))
            .collect()
    };
    if is_active {
        if let Some(last) = lines.last_mut() {
            last.spans.push(cursor_span(true));
        } else {
            lines.push(Line::from(cursor_span(true)));
        }
    }

    let content = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(labelled_block(field, is_active));
    frame.render_widget(content, area);
}

fn draw_select(frame: &mut Frame, area: Rect, field: &FormField, is_active: bool) {
    let value = field.display_value();
    let line = if value.is_empty() {
        let placeholder = field.config.placeholder.as_deref().unwrap_or("Select");
        Line::from(Span::styled(
            format!("◀ {placeholder} ▶"),
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Line::from(vec![
            Span::styled("◀ ", Style::default().fg(Color::DarkGray)),
            Span::styled(value, value_style(is_active)),
            Span::styled(" ▶", Style::default().fg(Color::DarkGray)),
        ])
    };

    let content = Paragraph::new(line).block(labelled_block(field, is_active));
    frame.render_widget(content, area);
}

fn draw_checkbox(frame: &mut Frame, area: Rect, field: &FormField, is_active: bool) {
    // The checkbox renders its own inline label; no block label above
    let mark = if field.as_bool() { "[x]" } else { "[ ]" };
    let style = if is_active {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    let line = Line::from(vec![
        Span::styled(mark, style),
        Span::raw(" "),
        Span::styled(
            field.config.display_label().to_string(),
            Style::default().fg(if is_active { Color::Cyan } else { Color::Gray }),
        ),
    ]);
    frame.render_widget(Paragraph::new(line).wrap(Wrap { trim: true }), area);
}

fn draw_upload(frame: &mut Frame, area: Rect, field: &FormField, is_active: bool) {
    let line = match &field.value {
        FieldValue::File(slot) => match slot.selected() {
            Some(file) => Line::from(vec![
                Span::styled("✓ ", Style::default().fg(Color::Green)),
                Span::styled(file.preview(), value_style(is_active)),
                Span::styled(
                    "  (Enter on a new path replaces)",
                    Style::default().fg(Color::DarkGray),
                ),
            ]),
            None if slot.input().is_empty() && !is_active => Line::from(Span::styled(
                format!("Type a path, or {} to browse", platform::BROWSE_SHORTCUT),
                Style::default().fg(Color::DarkGray),
            )),
            None => Line::from(vec![
                Span::styled(slot.input().to_string(), value_style(is_active)),
                cursor_span(is_active),
            ]),
        },
        _ => Line::default(),
    };

    let content = Paragraph::new(line).block(labelled_block(field, is_active));
    frame.render_widget(content, area);
}

fn draw_misconfigured(frame: &mut Frame, area: Rect, field: &FormField) {
    let content = Paragraph::new(Line::from(Span::styled(
        format!("mis-configured field `{}`", field.name()),
        Style::default().fg(Color::Red),
    )))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red)),
    );
    frame.render_widget(content, area);
}

/// Draw the key-hint line shown under a form
pub fn draw_help_text(frame: &mut Frame, area: Rect, pairs: &[(&str, &str)]) {
    let mut spans = Vec::new();
    for (i, (key, action)) in pairs.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(
            key.to_string(),
            Style::default().fg(Color::Cyan),
        ));
        spans.push(Span::raw(format!(": {action}")));
    }
    let help = Paragraph::new(Line::from(spans)).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, area);
}
