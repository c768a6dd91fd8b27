use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};

use crate::app::App;
use crate::ui::constants::{COMMANDS_PERCENT, HEADER_HEIGHT, STATUS_HEIGHT, TABLE_PERCENT};
use crate::ui::modals::draw_upload_prompt;
use crate::ui::panels::{draw_app_header, draw_commands_panel, draw_file_table, draw_status_bar};

pub(crate) mod constants;
mod helpers;
mod modals;
mod panels;

pub(crate) fn draw_ui(frame: &mut Frame<'_>, app: &App) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(HEADER_HEIGHT),
                Constraint::Percentage(TABLE_PERCENT),
                Constraint::Percentage(COMMANDS_PERCENT),
                Constraint::Length(STATUS_HEIGHT),
            ]
            .as_ref(),
        )
        .split(frame.area());

    draw_app_header(frame, app, layout[0]);
    draw_file_table(frame, app, layout[1]);
    draw_commands_panel(frame, app, layout[2]);
    draw_status_bar(frame, app, layout[3]);

    if app.prompt.is_some() {
        draw_upload_prompt(frame, app);
    }
}
