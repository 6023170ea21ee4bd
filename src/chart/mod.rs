pub mod sink;
pub mod adapter;
pub mod terminal;

pub use sink::{ChartSink, TooltipFormatter};
pub use adapter::{tooltip_text, TrendingChartAdapter};
pub use terminal::TerminalBarChart;
