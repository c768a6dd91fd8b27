use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Row, Table, TableState, Wrap};

use crate::app::App;
use crate::model::{PanelMode, format_modified};
use crate::ui::constants::{
    HELP_TEXT, MODIFIED_COL_WIDTH, NO_FILES_MESSAGE, NO_SELECTION_MESSAGE, SIZE_COL_WIDTH,
};
use crate::ui::helpers::format_bytes;

pub(crate) fn draw_app_header(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let title = format!(
        "TRANSFER DASH | http://{}:{} | serving {}",
        app.address,
        app.port,
        app.root.display()
    );
    let header = Paragraph::new(title)
        .style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center);
    frame.render_widget(header, area);
}

pub(crate) fn draw_file_table(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let header_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let block = Block::default()
        .title(Line::from(Span::styled("Files", header_style)))
        .borders(Borders::ALL);

    let header = Row::new(["Filename", "Size", "Modified", "SHA-256"])
        .style(Style::default().add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = if app.entries.is_empty() {
        vec![Row::new([NO_FILES_MESSAGE, "-", "-", "-"])]
    } else {
        app.entries
            .iter()
            .map(|entry| {
                Row::new([
                    entry.name.clone(),
                    format_bytes(entry.size),
                    format_modified(entry.modified),
                    entry.hash.as_str().to_string(),
                ])
            })
            .collect()
    };

    let widths = [
        Constraint::Min(24),
        Constraint::Length(SIZE_COL_WIDTH),
        Constraint::Length(MODIFIED_COL_WIDTH),
        Constraint::Min(16),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(Style::default().add_modifier(Modifier::BOLD))
        .highlight_symbol(Span::styled(
            "> ",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ));

    let mut state = TableState::default();
    if !app.entries.is_empty() {
        state.select(Some(app.selected.min(app.entries.len() - 1)));
    }
    frame.render_stateful_widget(table, area, &mut state);
}

pub(crate) fn draw_commands_panel(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let header_style = Style::default()
        .fg(Color::Magenta)
        .add_modifier(Modifier::BOLD);
    let (title, lines) = match &app.panel {
        PanelMode::Download => ("Download commands", download_lines(app)),
        PanelMode::Upload(filename) => ("Upload commands", upload_lines(app, filename)),
    };
    let block = Block::default()
        .title(Line::from(Span::styled(title, header_style)))
        .borders(Borders::ALL);
    let panel = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(panel, area);
}

fn download_lines(app: &App) -> Vec<Line<'static>> {
    let Some(commands) = &app.download else {
        return vec![Line::from(NO_SELECTION_MESSAGE)];
    };
    let filename = app.selected_name().unwrap_or_default().to_string();
    vec![
        Line::from(Span::styled(
            filename,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(commands.url.clone()),
        Line::from(""),
        Line::from(commands.wget.clone()),
        Line::from(commands.iwr_short.clone()),
        Line::from(commands.iwr_full.clone()),
        Line::from(commands.certutil.clone()),
    ]
}

fn upload_lines(app: &App, filename: &str) -> Vec<Line<'static>> {
    let Some(commands) = &app.upload else {
        return vec![Line::from(NO_SELECTION_MESSAGE)];
    };
    vec![
        Line::from(Span::styled(
            filename.to_string(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "(upload mode, press Esc to return)",
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
        Line::from(commands.curl_put.clone()),
        Line::from(commands.curl_post.clone()),
        Line::from(commands.wget_put.clone()),
        Line::from(commands.wget_post.clone()),
        Line::from(commands.ps_put.clone()),
        Line::from(commands.ps_post.clone()),
    ]
}

pub(crate) fn draw_status_bar(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let status = Paragraph::new(format!("{} | {}", app.status, HELP_TEXT))
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, area);
}
