pub mod charting;
pub mod screen;

use std::time::Instant;

use itertools::Itertools;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Flex, Layout, Rect},
    style::{Color as TermColor, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        Axis, Block, Borders, Cell, Chart, Dataset, GraphType, Paragraph, Row, Table, Widget, Wrap,
    },
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::{
    app::{App, ResultsView},
    palette::{Color, CARD_BACKGROUND},
    results::Results,
    session::Session,
    time_series::ReactionPoint,
};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;

const INSTRUCTIONS: &str = "In this test, you will see words displayed in different colors.\n\
Your task is to ignore the actual word and instead, select the color of the ink from the options provided.";

/// Draw whichever screen matches the app state
pub fn draw(f: &mut Frame, app: &App, now: Instant) {
    let area = f.area();
    screen::current_screen(&app.state).render(app, now, area, f.buffer_mut());
}

fn bold() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

fn italic() -> Style {
    Style::default().add_modifier(Modifier::ITALIC)
}

/// "[1] Red   [2] Green   ..." in plain text so labels give no ink cue
fn choice_spans() -> Vec<Span<'static>> {
    let choices = Color::ALL.iter().map(|c| {
        vec![
            Span::styled(format!("[{}] ", c.key()), bold()),
            Span::raw(c.label()),
        ]
    });
    Itertools::intersperse(choices, vec![Span::raw("   ")])
        .flatten()
        .collect()
}

fn legend_text() -> String {
    Color::ALL
        .iter()
        .map(|c| format!("[{}] {}", c.key(), c.label()))
        .join("   ")
}

pub fn render_instructions(area: Rect, buf: &mut Buffer) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(2),
            Constraint::Length(5),
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);

    Paragraph::new(Span::styled(
        "Instructions",
        bold().fg(TermColor::Cyan),
    ))
    .alignment(Alignment::Center)
    .render(chunks[1], buf);

    Paragraph::new(INSTRUCTIONS)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(chunks[2], buf);

    Paragraph::new(Line::from(choice_spans()))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(chunks[3], buf);

    Paragraph::new(Span::styled(
        "Press (enter) to start / (esc)ape",
        italic(),
    ))
    .alignment(Alignment::Center)
    .render(chunks[4], buf);
}

pub fn render_countdown(remaining: i64, area: Rect, buf: &mut Buffer) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);

    Paragraph::new(Span::styled("Get ready", italic()))
        .alignment(Alignment::Center)
        .render(chunks[1], buf);

    Paragraph::new(Span::styled(
        remaining.max(0).to_string(),
        bold().fg(TermColor::Yellow),
    ))
    .alignment(Alignment::Center)
    .render(chunks[3], buf);
}

fn stimulus_card(session: &Session) -> Paragraph<'static> {
    let body = match session.current() {
        Some(pending) => Line::from(Span::styled(
            pending.stimulus.word.word(),
            bold().fg(pending.stimulus.ink.ink()),
        )),
        None if session.budget_exhausted() => Line::from(Span::styled(
            "All rounds answered",
            italic().fg(TermColor::DarkGray),
        )),
        None => Line::from(Span::styled(
            "No colors to show",
            italic().fg(TermColor::DarkGray),
        )),
    };

    Paragraph::new(vec![Line::default(), body, Line::default()])
        .alignment(Alignment::Center)
        .style(Style::default().bg(CARD_BACKGROUND))
}

pub fn render_test(session: &Session, now: Instant, area: Rect, buf: &mut Buffer) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(1), // instruction
            Constraint::Length(1), // score and timer
            Constraint::Length(1),
            Constraint::Length(3), // stimulus card
            Constraint::Length(1),
            Constraint::Length(2), // choices
            Constraint::Min(0),    // live reaction times
        ])
        .split(area);

    Paragraph::new(Span::styled(
        "Select the color of the ink, not the word text",
        italic(),
    ))
    .alignment(Alignment::Center)
    .render(chunks[0], buf);

    Paragraph::new(Line::from(vec![
        Span::styled(
            format!("Score: {} / {}", session.score(), session.budget()),
            bold(),
        ),
        Span::raw("     "),
        Span::styled(
            format!("{:.1}", session.remaining(now).as_secs_f64()),
            bold().add_modifier(Modifier::DIM),
        ),
    ]))
    .alignment(Alignment::Center)
    .render(chunks[1], buf);

    let widest_word = Color::ALL
        .iter()
        .map(|c| c.word().width())
        .max()
        .unwrap_or(0);
    let card_width = (widest_word as u16 + 16).max("All rounds answered".width() as u16 + 4);
    let [card_area] = Layout::horizontal([Constraint::Length(card_width)])
        .flex(Flex::Center)
        .areas(chunks[3]);
    stimulus_card(session).render(card_area, buf);

    Paragraph::new(Line::from(choice_spans()))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(chunks[5], buf);

    if chunks[6].height >= 5 && !session.trials().is_empty() {
        let points: Vec<(f64, f64)> = session
            .trials()
            .iter()
            .map(|t| <(f64, f64)>::from(ReactionPoint::from(t)))
            .collect();
        reaction_chart(&points, session.budget(), GraphType::Scatter, Marker::Dot)
            .render(chunks[6], buf);
    }
}

fn reaction_chart(
    points: &[(f64, f64)],
    min_trials: usize,
    graph_type: GraphType,
    marker: Marker,
) -> Chart<'_> {
    let (x_max, y_max) = charting::compute_chart_params(points, min_trials);

    let datasets = vec![Dataset::default()
        .marker(marker)
        .style(Style::default().fg(TermColor::Magenta))
        .graph_type(graph_type)
        .data(points)];

    Chart::new(datasets)
        .block(Block::default().title("Reaction Times"))
        .x_axis(
            Axis::default()
                .title("trial")
                .bounds([1.0, x_max])
                .labels(vec![
                    Span::styled("1", bold()),
                    Span::styled(charting::format_label(x_max), bold()),
                ]),
        )
        .y_axis(
            Axis::default()
                .title("seconds")
                .bounds([0.0, y_max])
                .labels(vec![
                    Span::styled("0", bold()),
                    Span::styled(charting::format_label(y_max), bold()),
                ]),
        )
}

fn results_table<'a>(results: &Results, view: &ResultsView, height: u16) -> Table<'a> {
    let visible = height.saturating_sub(3) as usize; // borders and header
    let rows = results.table_rows();
    let total = rows.len();

    let visible_rows: Vec<Row> = rows
        .into_iter()
        .skip(view.scroll_offset)
        .take(visible)
        .map(|row| {
            let answer_style = if row.correct {
                Style::default().fg(TermColor::Green)
            } else {
                Style::default().fg(TermColor::Red)
            };
            Row::new(vec![
                Cell::from(row.index.to_string()),
                Cell::from(format!("{:.2}", row.reaction_secs)),
                Cell::from(row.word.word()),
                Cell::from(row.ink.label()),
                Cell::from(row.response.label()).style(answer_style),
            ])
        })
        .collect();

    let scroll_info = if total > visible {
        format!(
            " ({}/{} rows)",
            (view.scroll_offset + visible).min(total),
            total
        )
    } else {
        String::new()
    };

    let header = Row::new(vec![
        Cell::from("Trial"),
        Cell::from("Reaction Time (s)"),
        Cell::from("Word"),
        Cell::from("Ink"),
        Cell::from("Answer"),
    ])
    .style(bold().fg(TermColor::Yellow));

    Table::new(
        visible_rows,
        [
            Constraint::Length(6),
            Constraint::Length(18),
            Constraint::Length(7),
            Constraint::Length(7),
            Constraint::Length(7),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("Trials{scroll_info}")),
    )
}

pub fn render_results(results: &Results, view: &ResultsView, area: Rect, buf: &mut Buffer) {
    let summary = results.summary_lines();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(1),                    // headline
            Constraint::Length(1),                    // session start
            Constraint::Length(1),                    // padding
            Constraint::Length(summary.len() as u16), // summary
            Constraint::Length(1),                    // padding
            Constraint::Min(1),                       // chart and table
            Constraint::Length(1),                    // legend
        ])
        .split(area);

    Paragraph::new(Span::styled(results.headline(), bold()))
        .alignment(Alignment::Center)
        .render(chunks[0], buf);

    Paragraph::new(Span::styled(
        format!(
            "Session started {}",
            results.started_local().format("%Y-%m-%d %H:%M:%S")
        ),
        italic().fg(TermColor::Gray),
    ))
    .alignment(Alignment::Center)
    .render(chunks[1], buf);

    Paragraph::new(summary.into_iter().map(Line::from).collect::<Vec<_>>())
        .style(Style::default().fg(TermColor::Cyan))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(chunks[3], buf);

    if results.has_data() && chunks[5].height >= 3 {
        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(58), Constraint::Percentage(42)])
            .split(chunks[5]);

        let points: Vec<(f64, f64)> = results
            .chart_points()
            .into_iter()
            .map(Into::into)
            .collect();
        reaction_chart(&points, 0, GraphType::Line, Marker::Braille).render(body[0], buf);

        Widget::render(results_table(results, view, body[1].height), body[1], buf);
    } else if !results.has_data() {
        Paragraph::new("No data\nNo responses were recorded, so there is nothing to chart.")
            .block(Block::default().borders(Borders::ALL).title("No Data"))
            .style(Style::default().fg(TermColor::Gray))
            .alignment(Alignment::Center)
            .render(chunks[5], buf);
    }

    let legend = if results.has_data() {
        "↑/↓ PgUp/PgDn scroll table / (esc)ape"
    } else {
        "(esc)ape"
    };
    Paragraph::new(Span::styled(legend, italic())).render(chunks[6], buf);
}

/// Plain-text key reference, used by `--help`
pub fn key_reference() -> String {
    format!("keys: {}   (enter) start   (esc) quit", legend_text())
}
