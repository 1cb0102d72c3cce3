use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::symbols;
use ratatui::text::Span;
use ratatui::widgets::{Axis, Block, Chart, Dataset, GraphType, Paragraph, Widget};

use keypace::session::result::ScoreEntry;

use crate::ui::theme::Theme;

/// WPM of the given runs plus the best WPM reached so far, run 1 on the left.
pub struct WpmChart<'a> {
    trend: &'a [&'a ScoreEntry],
    theme: &'a Theme,
}

impl<'a> WpmChart<'a> {
    pub fn new(trend: &'a [&'a ScoreEntry], theme: &'a Theme) -> Self {
        Self { trend, theme }
    }
}

/// Run numbers start at 1 in chronological order.
pub fn trend_points(trend: &[&ScoreEntry]) -> Vec<(f64, f64)> {
    trend
        .iter()
        .enumerate()
        .map(|(i, e)| ((i + 1) as f64, e.wpm))
        .collect()
}

/// Step line of the highest WPM seen up to each run.
pub fn running_best(points: &[(f64, f64)]) -> Vec<(f64, f64)> {
    let mut best = f64::MIN;
    points
        .iter()
        .map(|&(x, wpm)| {
            best = best.max(wpm);
            (x, best)
        })
        .collect()
}

/// Top of the WPM axis, rounded up to the next multiple of 10 (at least 10).
pub fn wpm_ceiling(points: &[(f64, f64)]) -> f64 {
    let peak = points.iter().map(|&(_, y)| y).fold(0.0, f64::max);
    ((peak / 10.0).floor() + 1.0).max(1.0) * 10.0
}

impl Widget for WpmChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let title = format!(" WPM Trend · last {} ", self.trend.len());
        let block = Block::bordered()
            .title(title)
            .border_style(Style::default().fg(colors.border()));

        if self.trend.len() < 2 {
            Paragraph::new(Span::styled(
                "  Finish another run to see a trend",
                Style::default().fg(colors.text_pending()),
            ))
            .block(block)
            .render(area, buf);
            return;
        }

        let points = trend_points(self.trend);
        let best = running_best(&points);
        let runs = points.len() as f64;
        let top = wpm_ceiling(&points);
        let axis_style = Style::default().fg(colors.text_pending());

        let datasets = vec![
            Dataset::default()
                .name("best")
                .marker(symbols::Marker::Dot)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(colors.success()))
                .data(&best),
            Dataset::default()
                .name("wpm")
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(colors.accent()))
                .data(&points),
        ];

        Chart::new(datasets)
            .block(block)
            .x_axis(
                Axis::default()
                    .style(axis_style)
                    .bounds([1.0, runs])
                    .labels(vec!["1".to_string(), format!("{runs:.0}")]),
            )
            .y_axis(
                Axis::default()
                    .style(axis_style)
                    .bounds([0.0, top])
                    .labels(vec![
                        "0".to_string(),
                        format!("{:.0}", top / 2.0),
                        format!("{top:.0}"),
                    ]),
            )
            .render(area, buf);
    }
}
