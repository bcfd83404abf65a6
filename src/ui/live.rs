//! Live view rendering.
//!
//! Displays the six subsystem cards in a grid, with the risk gauge,
//! recommendation list and active thresholds underneath.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Gauge, List, ListItem, Paragraph, Row, Table, Wrap},
    Frame,
};

use crate::app::App;
use crate::data::{LiveBoard, RiskGauge, SubsystemCard};

/// Render the Live view from a snapshot of the board.
pub fn render(frame: &mut Frame, app: &App, board: &LiveBoard, area: Rect) {
    if !board.is_loaded() {
        let paragraph = Paragraph::new("Waiting for the first metrics response...")
            .style(Style::default().add_modifier(Modifier::DIM))
            .block(bordered(app, " Live "));
        frame.render_widget(paragraph, area);
        return;
    }

    let [grid_area, bottom_area] =
        Layout::vertical([Constraint::Percentage(60), Constraint::Percentage(40)]).areas(area);

    render_cards(frame, app, &board.cards, grid_area);

    let [gauge_area, recs_area, thresholds_area] = Layout::horizontal([
        Constraint::Percentage(25),
        Constraint::Percentage(45),
        Constraint::Percentage(30),
    ])
    .areas(bottom_area);

    if let Some(gauge) = board.gauge {
        render_gauge(frame, app, gauge, gauge_area);
    }
    render_recommendations(frame, app, board, recs_area);
    render_thresholds(frame, app, board, thresholds_area);
}

fn bordered<'a>(app: &App, title: &'a str) -> Block<'a> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border))
}

/// Two rows of three cards.
fn render_cards(frame: &mut Frame, app: &App, cards: &[SubsystemCard], area: Rect) {
    let rows = Layout::vertical([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)]).split(area);

    for (row_area, row_cards) in rows.iter().zip(cards.chunks(3)) {
        let cols = Layout::horizontal([Constraint::Ratio(1, 3); 3]).split(*row_area);
        for (col_area, card) in cols.iter().zip(row_cards) {
            render_card(frame, app, card, *col_area);
        }
    }
}

fn render_card(frame: &mut Frame, app: &App, card: &SubsystemCard, area: Rect) {
    let title = Line::from(vec![
        Span::raw(" "),
        Span::styled("●", app.theme.signal_style(card.indicator)),
        Span::styled(
            format!(" {} ", card.subsystem.title()),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ]);

    let mut lines: Vec<Line> = card
        .fields
        .iter()
        .map(|field| {
            Line::from(vec![
                Span::styled(
                    format!("{}: ", field.label),
                    Style::default().add_modifier(Modifier::DIM),
                ),
                Span::raw(field.value.clone()),
            ])
        })
        .collect();
    lines.push(Line::from(Span::styled(
        card.alert.message.clone(),
        app.theme.alert_style(card.alert.severity),
    )));

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(app.theme.status_style(card.status));

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn render_gauge(frame: &mut Frame, app: &App, gauge: RiskGauge, area: Rect) {
    let color = app.theme.tone_color(gauge.band.tone());

    let block = bordered(app, " Risk ");
    let [label_area, bar_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Min(1)]).areas(block.inner(area));
    frame.render_widget(block, area);

    let label = Paragraph::new(Span::styled(
        gauge.band.label(),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ))
    .centered();
    frame.render_widget(label, label_area);

    let widget = Gauge::default()
        .gauge_style(Style::default().fg(color).bg(app.theme.gauge_track))
        .ratio(gauge.ratio())
        .label(gauge.score_text());
    frame.render_widget(widget, bar_area);
}

fn render_recommendations(frame: &mut Frame, app: &App, board: &LiveBoard, area: Rect) {
    let items: Vec<ListItem> = board
        .recommendations
        .iter()
        .map(|rec| {
            let style = app.theme.emphasis_style(rec.emphasis);
            ListItem::new(vec![
                Line::from(Span::styled(rec.message.clone(), style)),
                Line::from(Span::styled(
                    format!("  → {}", rec.action),
                    Style::default().add_modifier(Modifier::DIM),
                )),
            ])
        })
        .collect();

    let list = List::new(items).block(bordered(app, " Recommendations "));
    frame.render_widget(list, area);
}

fn render_thresholds(frame: &mut Frame, app: &App, board: &LiveBoard, area: Rect) {
    let rows: Vec<Row> = board
        .thresholds
        .iter()
        .map(|row| Row::new(vec![Cell::from(row.label), Cell::from(row.value.clone())]))
        .collect();

    let table = Table::new(rows, [Constraint::Min(20), Constraint::Length(8)])
        .block(bordered(app, " Thresholds "));
    frame.render_widget(table, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fixtures;
    use crate::poller::fake::ScriptedApi;
    use crate::poller::Pollers;
    use crate::ui::Theme;
    use ratatui::{backend::TestBackend, Terminal};
    use std::sync::Arc;
    use tokio::runtime::Handle;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal.backend().buffer().content().iter().map(|c| c.symbol()).collect()
    }

    #[tokio::test]
    async fn test_render_loaded_board() {
        let app = App::new(
            Pollers::new(Arc::new(ScriptedApi::default())),
            Handle::current(),
            "scripted",
            Theme::dark(),
        );
        let mut board = LiveBoard::new();
        board.apply(&fixtures::response("10:00:00", 75));

        let mut terminal = Terminal::new(TestBackend::new(140, 40)).unwrap();
        terminal.draw(|frame| render(frame, &app, &board, frame.area())).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("HIGH RISK"));
        assert!(text.contains("75%"));
        assert!(text.contains("Oxygen Supply"));
        assert!(text.contains("Ventilators"));
    }

    #[tokio::test]
    async fn test_render_empty_board() {
        let app = App::new(
            Pollers::new(Arc::new(ScriptedApi::default())),
            Handle::current(),
            "scripted",
            Theme::dark(),
        );

        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal.draw(|frame| render(frame, &app, &LiveBoard::new(), frame.area())).unwrap();

        assert!(buffer_text(&terminal).contains("Waiting"));
    }
}
