//! Register view: the full intake form with a scrolling field window

use super::field_renderer::{draw_field, draw_help_text, field_height};
use crate::platform;
use crate::state::forms::{FormField, FormModel};
use crate::ui::components::{render_submit_button, BUTTON_HEIGHT};
use crate::ui::layout::centered_column;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const FORM_WIDTH: u16 = 70;
/// Blank rows between consecutive rows of the form
const ROW_GAP: u16 = 1;

pub fn draw(frame: &mut Frame, area: Rect, form: &FormModel) {
    let column = centered_column(area, FORM_WIDTH);

    let header_height = 3;
    let footer_height = 2;
    let viewport = Rect {
        y: column.y + header_height,
        height: column
            .height
            .saturating_sub(header_height + footer_height),
        ..column
    };

    let title = Paragraph::new(vec![
        Line::from(Span::styled(
            "Welcome 👋",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Let us know more about yourself.",
            Style::default().fg(Color::DarkGray),
        )),
    ]);
    frame.render_widget(
        title,
        Rect {
            y: column.y,
            height: 2,
            ..column
        },
    );

    // Row heights: every field plus the trailing submit row
    let heights: Vec<u16> = form
        .fields()
        .iter()
        .map(|f| field_height(f) + u16::from(form.error(f.name()).is_some()))
        .chain(std::iter::once(BUTTON_HEIGHT))
        .collect();
    let offset = scroll_offset(&heights, form.active_index(), viewport.height);

    let mut y = viewport.y;
    let mut row_top = 0u16;
    for (idx, height) in heights.iter().copied().enumerate() {
        let visible = row_top >= offset && y + height <= viewport.y + viewport.height;
        if visible {
            let row_area = Rect {
                y,
                height,
                ..viewport
            };
            if idx < form.field_count() {
                let field = &form.fields()[idx];
                draw_field(
                    frame,
                    row_area,
                    field,
                    form.error(field.name()),
                    form.active_index() == idx,
                );
            } else {
                render_submit_button(
                    frame,
                    row_area,
                    "Submit and continue",
                    form.on_submit_row(),
                    form.is_submitting(),
                );
            }
            y += height + ROW_GAP;
        }
        row_top += height + ROW_GAP;
    }

    draw_help_text(
        frame,
        Rect {
            y: area.y + area.height.saturating_sub(footer_height),
            height: 1,
            ..column
        },
        &[
            ("Tab", "next"),
            ("Space", "toggle"),
            ("◀ ▶", "choose"),
            (platform::BROWSE_SHORTCUT, "browse"),
            (platform::SUBMIT_SHORTCUT, "submit"),
        ],
    );
}

/// First hidden row offset so the active row stays fully inside the viewport
fn scroll_offset(heights: &[u16], active: usize, viewport_height: u16) -> u16 {
    let mut top = 0u16;
    for height in heights.iter().take(active) {
        top += height + ROW_GAP;
    }
    let bottom = top + heights.get(active).copied().unwrap_or(0);
    if bottom > viewport_height {
        bottom - viewport_height
    } else {
        0
    }
}

/// Radio-group renderer for the gender field, wired in as its custom widget
pub fn draw_gender_radio(frame: &mut Frame, area: Rect, field: &FormField, is_active: bool) {
    let selected = field.as_choice();
    let mut spans = Vec::new();
    for (i, option) in field.config.options.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("   "));
        }
        let mark = if option.id == selected { "(•)" } else { "( )" };
        let style = if option.id == selected {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else if is_active {
            Style::default().fg(Color::Gray)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(format!("{mark} {}", option.label), style));
    }

    let border_style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let content = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .title(format!(" {} ", field.config.display_label()))
            .borders(Borders::ALL)
            .border_style(border_style),
    );
    frame.render_widget(content, area);
}
