//! Span timing for the search functions.
//!
//! The recursive search functions carry `#[instrument]` attributes when the
//! `instrumentation` feature is on. `init_tracing` installs a layer that adds
//! up the time spent in each of them, per thread, and
//! `print_timing_statistics` reports the totals when the program is done.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Instant;
use thread_local::ThreadLocal;
use tracing::span;
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::Layer;

/// Timings per span name, one map per thread.
static THREAD_TIMING_DATA: Lazy<ThreadLocal<Mutex<HashMap<&'static str, SpanTiming>>>> =
    Lazy::new(ThreadLocal::new);

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SpanTiming {
    pub calls: u64,
    pub total_nanos: u64,
    pub max_nanos: u64,
}

impl SpanTiming {
    fn record(&mut self, nanos: u64) {
        self.calls += 1;
        self.total_nanos += nanos;
        self.max_nanos = self.max_nanos.max(nanos);
    }

    fn merge(&mut self, other: &SpanTiming) {
        self.calls += other.calls;
        self.total_nanos += other.total_nanos;
        self.max_nanos = self.max_nanos.max(other.max_nanos);
    }

    pub fn average_micros(&self) -> f64 {
        if self.calls == 0 {
            0.0
        } else {
            self.total_nanos as f64 / self.calls as f64 / 1_000.0
        }
    }
}

struct TimingLayer;

impl<S> Layer<S> for TimingLayer
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_enter(&self, id: &span::Id, ctx: Context<'_, S>) {
        if let Some(span) = ctx.span(id) {
            span.extensions_mut().insert(Instant::now());
        }
    }

    fn on_exit(&self, id: &span::Id, ctx: Context<'_, S>) {
        if let Some(span) = ctx.span(id) {
            let start = span.extensions_mut().remove::<Instant>();
            if let Some(start) = start {
                let nanos = start.elapsed().as_nanos() as u64;
                let cell = THREAD_TIMING_DATA.get_or(|| Mutex::new(HashMap::new()));
                if let Ok(mut data) = cell.lock() {
                    data.entry(span.name()).or_default().record(nanos);
                }
            }
        }
    }
}

/// Installs the timing layer as the global subscriber.
///
/// With `RUST_LOG` unset or `off` only timings are collected. Any other value
/// also prints span events filtered by it.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "off".to_string());

    if env_filter == "off" || env_filter.is_empty() {
        let subscriber = tracing_subscriber::registry()
            .with(EnvFilter::new("trace"))
            .with(TimingLayer);

        tracing::subscriber::set_global_default(subscriber)
            .expect("Failed to set tracing subscriber");
    } else {
        use tracing_subscriber::fmt;

        let fmt_layer = fmt::layer().with_target(false).compact();
        let subscriber = tracing_subscriber::registry()
            .with(EnvFilter::from_default_env())
            .with(TimingLayer)
            .with(fmt_layer);

        tracing::subscriber::set_global_default(subscriber)
            .expect("Failed to set tracing subscriber");
    }
}

/// Timings merged across threads, most expensive span first.
pub fn timing_statistics() -> Vec<(&'static str, SpanTiming)> {
    let mut aggregated: HashMap<&'static str, SpanTiming> = HashMap::new();
    for thread_data in THREAD_TIMING_DATA.iter() {
        if let Ok(data) = thread_data.lock() {
            for (name, timing) in data.iter() {
                aggregated.entry(*name).or_default().merge(timing);
            }
        }
    }

    let mut entries: Vec<_> = aggregated.into_iter().collect();
    entries.sort_by_key(|(_, timing)| std::cmp::Reverse(timing.total_nanos));
    entries
}

pub fn print_timing_statistics() {
    let entries = timing_statistics();
    if entries.is_empty() {
        eprintln!("\nNo timing data collected.");
        return;
    }

    eprintln!("\n{:=<84}", "");
    eprintln!("Search span timings (sorted by total time)");
    eprintln!("{:=<84}", "");
    eprintln!(
        "{:<32} {:>12} {:>12} {:>12} {:>12}",
        "Span", "Calls", "Total (ms)", "Avg (µs)", "Max (µs)"
    );
    eprintln!("{:-<84}", "");

    for (name, timing) in &entries {
        eprintln!(
            "{:<32} {:>12} {:>12.2} {:>12.2} {:>12.2}",
            name,
            timing.calls,
            timing.total_nanos as f64 / 1_000_000.0,
            timing.average_micros(),
            timing.max_nanos as f64 / 1_000.0
        );
    }
    eprintln!("{:-<84}\n", "");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spans_are_timed() {
        let subscriber = tracing_subscriber::registry().with(TimingLayer);
        tracing::subscriber::with_default(subscriber, || {
            for _ in 0..3 {
                let span = tracing::info_span!("timed_in_test");
                let _entered = span.enter();
            }
        });

        let (_, timing) = timing_statistics()
            .into_iter()
            .find(|(name, _)| *name == "timed_in_test")
            .unwrap();
        assert_eq!(timing.calls, 3);
        assert!(timing.max_nanos <= timing.total_nanos);
    }
}
