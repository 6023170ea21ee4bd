use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;

use crate::chart::sink::ChartSink;
use crate::services::trending_counter::TrendingCounter;

pub fn tooltip_text(count: u64) -> String {
    format!("Sold: {} times", count)
}

/// Keeps a chart sink in step with the trending counter.
///
/// The counter is shared with the sink's tooltip formatter so a hover
/// always reads the live count.
pub struct TrendingChartAdapter<S: ChartSink> {
    sink: S,
    trending: Rc<RefCell<TrendingCounter>>,
}

impl<S: ChartSink> TrendingChartAdapter<S> {
    /// Install the tooltip formatter and push the initial dataset.
    pub fn new(mut sink: S, trending: Rc<RefCell<TrendingCounter>>) -> Self {
        let lookup = Rc::clone(&trending);
        sink.set_tooltip_formatter(Box::new(move |label| {
            tooltip_text(lookup.borrow().count(label))
        }));

        let mut adapter = Self { sink, trending };
        adapter.refresh();
        adapter
    }

    /// Push labels and counts in key order, then redraw.
    pub fn refresh(&mut self) {
        let (labels, values) = {
            let trending = self.trending.borrow();
            (trending.labels(), trending.values())
        };

        debug!("Chart: pushing {} bars", labels.len());
        self.sink.set_data(labels, values);
        self.sink.redraw();
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::sink::TooltipFormatter;

    #[derive(Default)]
    struct CallLog {
        calls: Vec<String>,
        data: Option<(Vec<String>, Vec<u64>)>,
        formatter: Option<TooltipFormatter>,
    }

    impl ChartSink for CallLog {
        fn set_data(&mut self, labels: Vec<String>, values: Vec<u64>) {
            self.calls.push("set_data".to_string());
            self.data = Some((labels, values));
        }

        fn redraw(&mut self) {
            self.calls.push("redraw".to_string());
        }

        fn set_tooltip_formatter(&mut self, formatter: TooltipFormatter) {
            self.calls.push("set_tooltip_formatter".to_string());
            self.formatter = Some(formatter);
        }
    }

    fn shared(labels: &[(&str, u64)]) -> Rc<RefCell<TrendingCounter>> {
        let mut counter = TrendingCounter::new();
        for (label, count) in labels {
            for _ in 0..*count {
                counter.increment(label);
            }
        }
        Rc::new(RefCell::new(counter))
    }

    #[test]
    fn test_new_installs_formatter_then_pushes_data() {
        let adapter = TrendingChartAdapter::new(CallLog::default(), shared(&[("Mouse", 2)]));
        assert_eq!(
            adapter.sink().calls,
            vec!["set_tooltip_formatter", "set_data", "redraw"]
        );
        assert_eq!(
            adapter.sink().data,
            Some((vec!["Mouse".to_string()], vec![2]))
        );
    }

    #[test]
    fn test_refresh_reflects_counter_order() {
        let trending = shared(&[("Elaichi", 1), ("Honey", 3)]);
        let mut adapter = TrendingChartAdapter::new(CallLog::default(), Rc::clone(&trending));

        trending.borrow_mut().increment("Mouse");
        trending.borrow_mut().increment("Elaichi");
        adapter.refresh();

        let (labels, values) = adapter.sink().data.clone().unwrap();
        assert_eq!(labels, vec!["Elaichi", "Honey", "Mouse"]);
        assert_eq!(values, vec![2, 3, 1]);
        assert_eq!(adapter.sink().calls.last().map(String::as_str), Some("redraw"));
    }

    #[test]
    fn test_tooltip_reads_live_count() {
        let trending = shared(&[("Mouse", 12)]);
        let adapter = TrendingChartAdapter::new(CallLog::default(), Rc::clone(&trending));
        let formatter = adapter.sink().formatter.as_ref().unwrap();

        assert_eq!(formatter("Mouse"), "Sold: 12 times");

        // no refresh: the formatter still sees the new count
        trending.borrow_mut().increment("Mouse");
        assert_eq!(formatter("Mouse"), "Sold: 13 times");
        assert_eq!(formatter("Unknown"), "Sold: 0 times");
    }
}
