//! Welcome view: the minimal new-patient form

use super::field_renderer::{draw_field, draw_help_text, field_height};
use crate::platform;
use crate::state::forms::FormModel;
use crate::ui::components::{render_submit_button, BUTTON_HEIGHT};
use crate::ui::layout::centered_column;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const FORM_WIDTH: u16 = 60;

pub fn draw(frame: &mut Frame, area: Rect, form: &FormModel) {
    let column = centered_column(area, FORM_WIDTH);
    let mut y = column.y + 1;

    let title = Paragraph::new(Line::from(Span::styled(
        "Hi there 👋",
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    )));
    frame.render_widget(title, Rect { y, height: 1, ..column });
    y += 1;

    let subtitle = Paragraph::new(Line::from(Span::styled(
        "Schedule your first appointment.",
        Style::default().fg(Color::DarkGray),
    )));
    frame.render_widget(subtitle, Rect { y, height: 1, ..column });
    y += 2;

    for (idx, field) in form.fields().iter().enumerate() {
        let error = form.error(field.name());
        let height = field_height(field) + u16::from(error.is_some());
        if y + height > area.y + area.height {
            break;
        }
        draw_field(
            frame,
            Rect { y, height, ..column },
            field,
            error,
            form.active_index() == idx,
        );
        y += height + 1;
    }

    if y + BUTTON_HEIGHT <= area.y + area.height {
        render_submit_button(
            frame,
            Rect {
                y,
                height: BUTTON_HEIGHT,
                ..column
            },
            "Get Started",
            form.on_submit_row(),
            form.is_submitting(),
        );
        y += BUTTON_HEIGHT + 1;
    }

    if y < area.y + area.height {
        draw_help_text(
            frame,
            Rect { y, height: 1, ..column },
            &[
                ("Tab", "next field"),
                ("Enter", "continue"),
                (platform::SUBMIT_SHORTCUT, "submit"),
            ],
        );
    }
}
