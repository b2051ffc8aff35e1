//! Confirmation view shown after a completed registration

use crate::state::AppState;
use crate::ui::layout::centered_column;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub fn draw(frame: &mut Frame, area: Rect, state: &AppState) {
    let column = centered_column(area, 60);
    let top = area.height / 3;

    let mut lines = vec![
        Line::from(Span::styled(
            "✓ Success!",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Your registration request has been submitted."),
        Line::from("We'll be in touch shortly to confirm."),
        Line::from(""),
    ];
    if let Some(id) = state.view_params.patient_id.as_deref() {
        lines.push(Line::from(vec![
            Span::styled("Patient id: ", Style::default().fg(Color::DarkGray)),
            Span::styled(id.to_string(), Style::default().fg(Color::Cyan)),
        ]));
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled(
        "Press Enter to register another patient, Ctrl+C to quit.",
        Style::default().fg(Color::DarkGray),
    )));

    let height = (lines.len() as u16).min(area.height.saturating_sub(top));
    let content = Paragraph::new(lines);
    frame.render_widget(
        content,
        Rect {
            y: area.y + top,
            height,
            ..column
        },
    );
}
