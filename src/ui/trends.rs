//! Trends view rendering.
//!
//! Draws the four history charts in a 2x2 grid. The x axis is the sample
//! index; its labels are the first and last backend timestamps.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::Span,
    widgets::{
        Axis, Block, Borders, Chart as ChartWidget, Dataset as DatasetWidget, GraphType,
        Paragraph,
    },
    Frame,
};

use crate::app::App;
use crate::data::{Chart, ChartManager, ChartStyle};

/// Colors cycled across the datasets of one chart.
const SERIES_COLORS: [Color; 2] = [Color::Cyan, Color::Magenta];

/// Render the Trends view from a snapshot of the charts.
pub fn render(frame: &mut Frame, app: &App, charts: &ChartManager, area: Rect) {
    let rows = Layout::vertical([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)]).split(area);

    for (row_area, row_charts) in rows.iter().zip(charts.charts().chunks(2)) {
        let cols = Layout::horizontal([Constraint::Ratio(1, 2); 2]).split(*row_area);
        for (col_area, chart) in cols.iter().zip(row_charts) {
            render_chart(frame, app, chart, *col_area);
        }
    }
}

fn render_chart(frame: &mut Frame, app: &App, chart: &Chart, area: Rect) {
    let block = Block::default()
        .title(format!(" {} ", chart.kind.title()))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    if chart.is_empty() {
        let paragraph = Paragraph::new("No history yet")
            .style(Style::default().add_modifier(Modifier::DIM))
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let points: Vec<Vec<(f64, f64)>> = chart
        .datasets
        .iter()
        .map(|d| d.points.iter().enumerate().map(|(i, &y)| (i as f64, y)).collect())
        .collect();

    let graph_type = match chart.kind.style() {
        ChartStyle::Line => GraphType::Line,
        ChartStyle::Bar => GraphType::Bar,
    };

    let datasets: Vec<DatasetWidget> = chart
        .datasets
        .iter()
        .zip(&points)
        .enumerate()
        .map(|(i, (dataset, data))| {
            DatasetWidget::default()
                .name(dataset.series.label())
                .marker(symbols::Marker::Braille)
                .graph_type(graph_type)
                .style(Style::default().fg(SERIES_COLORS[i % SERIES_COLORS.len()]))
                .data(data)
        })
        .collect();

    let x_max = (chart.len().saturating_sub(1) as f64).max(1.0);
    let x_labels = match (chart.labels.first(), chart.labels.last()) {
        (Some(first), Some(last)) if chart.len() > 1 => {
            vec![Span::raw(first.clone()), Span::raw(last.clone())]
        }
        (Some(only), _) => vec![Span::raw(only.clone())],
        _ => Vec::new(),
    };

    let [y_min, y_max] = chart.y_bounds();
    let y_labels = vec![
        Span::raw(format!("{:.0}", y_min)),
        Span::raw(format!("{:.0}", y_max / 2.0)),
        Span::raw(format!("{:.0}", y_max)),
    ];

    let widget = ChartWidget::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .style(Style::default().fg(app.theme.border))
                .bounds([0.0, x_max])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(app.theme.border))
                .bounds([y_min, y_max])
                .labels(y_labels),
        );

    frame.render_widget(widget, area);
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

    #[tokio::test]
    async fn test_render_charts() {
        let app = App::new(
            Pollers::new(Arc::new(ScriptedApi::default())),
            Handle::current(),
            "scripted",
            Theme::dark(),
        );
        let mut charts = ChartManager::new();
        charts.apply_history(&fixtures::history(10));

        let mut terminal = Terminal::new(TestBackend::new(140, 40)).unwrap();
        terminal.draw(|frame| render(frame, &app, &charts, frame.area())).unwrap();

        let text: String =
            terminal.backend().buffer().content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Oxygen"));
        assert!(text.contains("Stock Levels"));
        assert!(text.contains("12:00:00"));
    }

    #[tokio::test]
    async fn test_render_without_history() {
        let app = App::new(
            Pollers::new(Arc::new(ScriptedApi::default())),
            Handle::current(),
            "scripted",
            Theme::light(),
        );

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| render(frame, &app, &ChartManager::new(), frame.area())).unwrap();

        let text: String =
            terminal.backend().buffer().content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("No history yet"));
    }
}
