/// Maps a hovered label to its tooltip text. Evaluated on every hover.
pub type TooltipFormatter = Box<dyn Fn(&str) -> String>;

/// A bar-chart rendering capability.
pub trait ChartSink {
    /// Replace the dataset. `labels[i]` names the bar of height `values[i]`.
    fn set_data(&mut self, labels: Vec<String>, values: Vec<u64>);

    fn redraw(&mut self);

    fn set_tooltip_formatter(&mut self, formatter: TooltipFormatter);
}
