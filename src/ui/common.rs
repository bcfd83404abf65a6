//! Common UI components shared across views.
//!
//! This module contains the header bar, tab bar, status bar, and help overlay.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs},
    Frame,
};

use crate::app::{App, View};
use crate::api::AnalysisStatus;
use crate::data::LiveBoard;
use crate::poller::KNOWN_SCENARIOS;

/// Render the header bar with the overall picture.
///
/// Displays: worst status, backend timestamp, risk band, card counts by status.
pub fn render_header(frame: &mut Frame, app: &App, board: &LiveBoard, area: Rect) {
    let Some(ref timestamp) = board.timestamp else {
        let line = Line::from(vec![
            Span::styled(" WARDWATCH ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(format!("| {} | Loading...", app.source_description())),
        ]);
        frame.render_widget(Paragraph::new(line), area);
        return;
    };

    let (normal, warning, critical) = board.status_counts();
    let status_style = app.theme.status_style(board.worst_status());

    let mut spans = vec![
        Span::styled(" ● ", status_style),
        Span::styled("WARDWATCH ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(format!("│ {} │ ", timestamp)),
    ];

    if let Some(gauge) = board.gauge {
        spans.push(Span::styled(
            format!("{} {}", gauge.band.label(), gauge.score_text()),
            Style::default()
                .fg(app.theme.tone_color(gauge.band.tone()))
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(" │ "));
    }

    spans.extend([
        Span::styled(format!("{}", normal), Style::default().fg(app.theme.success)),
        Span::raw(" ok "),
        count_span(warning, app.theme.status_style(AnalysisStatus::Warning)),
        Span::raw(" warn "),
        count_span(critical, app.theme.status_style(AnalysisStatus::Critical)),
        Span::raw(" crit"),
    ]);

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn count_span(count: usize, style: Style) -> Span<'static> {
    if count > 0 {
        Span::styled(count.to_string(), style)
    } else {
        Span::styled("0", Style::default().add_modifier(Modifier::DIM))
    }
}

/// Render the tab bar showing available views.
pub fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = vec![Line::from(" 1:Live "), Line::from(" 2:Trends ")];

    let selected = match app.current_view {
        View::Live => 0,
        View::Trends => 1,
    };

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(app.theme.tab_inactive)
        .highlight_style(app.theme.tab_active)
        .divider("|");

    frame.render_widget(tabs, area);
}

/// Render the status bar at the bottom.
///
/// Shows the current view and available controls, or a temporary status
/// message. Fetch errors are never shown here; they go to the log.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let controls = match app.current_view {
        View::Live => "o/i/s/n:scenario r:refresh e:export Tab:switch ?:help q:quit",
        View::Trends => "r:refresh Tab:switch ?:help q:quit",
    };
    let status = format!(" {} | {}", app.current_view.label(), controls);

    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));
    frame.render_widget(paragraph, area);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the current view.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let bold = Style::default().add_modifier(Modifier::BOLD);

    let mut help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        Line::from(vec![Span::styled(" Navigation", bold)]),
        Line::from("  ←/→ h/l Tab  Switch views"),
        Line::from("  1 / 2        Live / Trends"),
        Line::from(""),
        Line::from(vec![Span::styled(" Scenarios", bold)]),
    ];
    help_text.extend(
        KNOWN_SCENARIOS
            .iter()
            .map(|(key, name)| Line::from(format!("  {}            {}", key, name))),
    );
    help_text.extend([
        Line::from(""),
        Line::from(vec![Span::styled(" General", bold)]),
        Line::from("  r            Refresh now"),
        Line::from("  e            Export to JSON"),
        Line::from("  q            Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ]);

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    // Center the help overlay - responsive to terminal size
    let help_width = 42u16.min(area.width.saturating_sub(4));
    let help_height = 22u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    frame.render_widget(Clear, help_area);
    frame.render_widget(paragraph, help_area);
}
