use ratatui::{
    buffer::Buffer,
    layout::{Direction, Rect},
    text::Line,
    widgets::{Bar, BarChart, BarGroup, Widget},
};

use crate::chart::sink::{ChartSink, TooltipFormatter};

pub const NO_TRENDING: &str = "No trending products found.";

/// Horizontal bar chart rendered with `ratatui` into an off-screen buffer.
///
/// Bars are scaled from zero to the largest value over `width` cells.
/// `redraw` renders a new frame; `frame` returns the last one as text.
pub struct TerminalBarChart {
    title: String,
    width: u16,
    labels: Vec<String>,
    values: Vec<u64>,
    tooltip: Option<TooltipFormatter>,
    frame: String,
    redraws: usize,
}

impl TerminalBarChart {
    pub fn new(title: impl Into<String>, width: usize) -> Self {
        Self {
            title: title.into(),
            width: u16::try_from(width).unwrap_or(u16::MAX).max(1),
            labels: Vec::new(),
            values: Vec::new(),
            tooltip: None,
            frame: String::new(),
            redraws: 0,
        }
    }

    pub fn frame(&self) -> &str {
        &self.frame
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn values(&self) -> &[u64] {
        &self.values
    }

    pub fn redraw_count(&self) -> usize {
        self.redraws
    }

    /// Hover text for `label`; `None` until a formatter is installed.
    pub fn tooltip(&self, label: &str) -> Option<String> {
        self.tooltip.as_ref().map(|format| format(label))
    }

    fn render_bars(&self) -> Buffer {
        let bars: Vec<Bar> = self
            .labels
            .iter()
            .zip(self.values.iter())
            .map(|(label, value)| Bar::default().label(Line::from(label.as_str())).value(*value))
            .collect();

        let label_width = self
            .labels
            .iter()
            .map(|label| Line::from(label.as_str()).width())
            .max()
            .unwrap_or(0);
        let label_width = u16::try_from(label_width).unwrap_or(u16::MAX);
        let height = u16::try_from(bars.len()).unwrap_or(u16::MAX);
        let area = Rect::new(0, 0, label_width.saturating_add(1).saturating_add(self.width), height);

        let mut buf = Buffer::empty(area);
        BarChart::default()
            .direction(Direction::Horizontal)
            .bar_width(1)
            .bar_gap(0)
            .data(BarGroup::default().bars(&bars))
            .render(area, &mut buf);
        buf
    }
}

fn buffer_lines(buf: &Buffer) -> Vec<String> {
    let area = buf.area;
    (area.top()..area.bottom())
        .map(|y| {
            let line: String = (area.left()..area.right())
                .map(|x| buf[(x, y)].symbol())
                .collect();
            line.trim_end().to_string()
        })
        .collect()
}

impl ChartSink for TerminalBarChart {
    fn set_data(&mut self, labels: Vec<String>, values: Vec<u64>) {
        self.labels = labels;
        self.values = values;
    }

    fn redraw(&mut self) {
        self.redraws += 1;

        let mut lines = vec![self.title.clone()];
        if self.labels.is_empty() {
            lines.push(NO_TRENDING.to_string());
        } else {
            lines.extend(buffer_lines(&self.render_bars()));
        }

        self.frame = lines.join("\n");
    }

    fn set_tooltip_formatter(&mut self, formatter: TooltipFormatter) {
        self.tooltip = Some(formatter);
    }
}
