//! Swag Clicker rendering. Draws the retained `View`; never touches game state.

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Paragraph};
use ratzilla::ratatui::Frame;

use crate::input::{is_narrow_layout, ClickState};
use crate::widgets::{ButtonBar, ClickableList};

use super::actions::{BUY_UPGRADE_BASE, CLICK, RESET};
use super::view::{Flash, Tone, UpgradeRow, View};

const SWAG_GREEN: Color = Color::Rgb(0, 255, 0x88);
const CRIT_PINK: Color = Color::Rgb(255, 0, 0x6e);

fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Normal => SWAG_GREEN,
        Tone::Critical => CRIT_PINK,
    }
}

pub fn render(view: &View, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    let banner_height = if view.prestige_banner().is_some() { 3 } else { 0 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(banner_height),
            Constraint::Min(8),
            Constraint::Length(3),
        ])
        .split(area);

    render_header(f, chunks[0]);
    if let Some(banner) = view.prestige_banner() {
        render_banner(banner, f, chunks[1]);
    }

    if is_narrow_layout(area.width) {
        let body = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(6),
                Constraint::Length(5),
                Constraint::Min(3),
            ])
            .split(chunks[2]);
        render_stats(view, f, body[0]);
        render_button(view, f, body[1], click_state);
        render_upgrades(view, f, body[2], click_state, false);
    } else {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(chunks[2]);
        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(6), Constraint::Min(5)])
            .split(columns[0]);
        render_stats(view, f, left[0]);
        render_button(view, f, left[1], click_state);
        render_upgrades(view, f, columns[1], click_state, true);
    }

    render_footer(f, chunks[3], click_state);
}

fn render_header(f: &mut Frame, area: Rect) {
    let title = Paragraph::new(Line::from(Span::styled(
        "✨ Swag Clicker ✨",
        Style::default()
            .fg(SWAG_GREEN)
            .add_modifier(Modifier::BOLD),
    )))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    )
    .alignment(Alignment::Center);
    f.render_widget(title, area);
}

fn render_banner(banner: &Flash, f: &mut Frame, area: Rect) {
    let color = tone_color(banner.tone);
    let widget = Paragraph::new(Line::from(Span::styled(
        banner.text.as_str(),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color)),
    )
    .alignment(Alignment::Center);
    f.render_widget(widget, area);
}

fn render_stats(view: &View, f: &mut Frame, area: Rect) {
    let stats = view.stats();
    let label = Style::default().fg(Color::Gray);
    let value = Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);

    let row = |name: &'static str, v: &str| {
        Line::from(vec![
            Span::styled(format!("{name:<14}"), label),
            Span::styled(v.to_string(), value),
        ])
    };

    let lines = vec![
        Line::from(vec![
            Span::styled(format!("{:<14}", "Swag"), label),
            Span::styled(
                stats.points.clone(),
                Style::default()
                    .fg(SWAG_GREEN)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        row("Total earned", &stats.total_earned),
        row("Per click", &stats.per_click),
        row("Per second", &stats.per_second),
    ];

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Stats "),
    );
    f.render_widget(widget, area);
}

/// The big button. The whole panel is one click target.
fn render_button(view: &View, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    let mut lines = Vec::new();
    // Center the label vertically inside the border.
    let inner_rows = area.height.saturating_sub(2);
    let pad = inner_rows.saturating_sub(2) / 2;
    for _ in 0..pad {
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled(
        "▶  CLICK FOR SWAG  ◀",
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(match view.message() {
        Some(msg) => Line::from(Span::styled(
            msg.text.as_str(),
            Style::default()
                .fg(tone_color(msg.tone))
                .add_modifier(Modifier::BOLD),
        )),
        None => Line::from(""),
    });

    let widget = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        )
        .alignment(Alignment::Center);
    f.render_widget(widget, area);

    click_state.borrow_mut().add_click_target(area, CLICK);
}

fn upgrade_line(row: &UpgradeRow, with_description: bool) -> Line<'static> {
    let (key_style, text_style) = if row.affordable {
        (
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            Style::default().fg(Color::White),
        )
    } else {
        (
            Style::default().fg(Color::DarkGray),
            Style::default().fg(Color::DarkGray),
        )
    };

    let mut spans = vec![
        Span::styled(format!("[{}] ", row.kind.key()), key_style),
        Span::styled(format!("{:<13}", row.kind.name()), text_style),
        Span::styled(format!("Lv.{:<4}", row.level), text_style),
        Span::styled(format!("{:>8}", row.cost), key_style),
    ];
    if with_description {
        spans.push(Span::styled(
            format!("  {}", row.kind.description()),
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(spans)
}

fn render_upgrades(
    view: &View,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
    with_description: bool,
) {
    let mut cl = ClickableList::new();
    for row in view.upgrades() {
        cl.push_clickable(
            upgrade_line(row, with_description),
            BUY_UPGRADE_BASE + row.kind.index() as u16,
        );
    }

    {
        let mut cs = click_state.borrow_mut();
        cl.register_targets(area, &mut cs, 1, 1, 0);
    }

    let widget = Paragraph::new(cl.into_lines()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Upgrades "),
    );
    f.render_widget(widget, area);
}

fn render_footer(f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    let hint = Style::default().fg(Color::Gray);
    let mut cs = click_state.borrow_mut();
    ButtonBar::new(" │ ")
        .button("[C] Click", hint, CLICK)
        .button("[R] Reset", Style::default().fg(CRIT_PINK), RESET)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .render(f, area, &mut cs);
}
