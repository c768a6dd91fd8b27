use ratatui::Frame;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::App;
use crate::ui::constants::{PROMPT_HEIGHT, PROMPT_WIDTH};
use crate::ui::helpers::{centered_rect_abs, draw_popup_frame, truncate_text};

pub(crate) fn draw_upload_prompt(frame: &mut Frame<'_>, app: &App) {
    let Some(prompt) = &app.prompt else {
        return;
    };
    let area = centered_rect_abs(PROMPT_WIDTH, PROMPT_HEIGHT, frame.area());
    let inner = draw_popup_frame(
        frame,
        area,
        "Upload commands",
        Style::default().fg(Color::Yellow),
    );
    if inner.height == 0 {
        return;
    }

    let value_width = inner.width.saturating_sub(2) as usize;
    let visible = truncate_text(&prompt.buffer, value_width);
    let lines = vec![
        Line::from("Enter filename to upload:"),
        Line::from(vec![
            Span::styled("> ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(visible.clone()),
        ]),
        Line::from(Span::styled(
            "Enter to confirm, Esc to cancel",
            Style::default().fg(Color::Gray),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), inner);

    // Cursor sits after the typed text on the input line.
    if inner.height >= 2 {
        let cursor_x = inner.x + 2 + visible.chars().count() as u16;
        let cursor_y = inner.y + 1;
        frame.set_cursor_position((cursor_x.min(inner.right().saturating_sub(1)), cursor_y));
    }
}
