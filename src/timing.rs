//! Segmented stopwatch for attributing wall-clock time to pipeline phases
//!
//! One `SegmentTimer` instance is owned by the caller for the duration of a
//! single benchmark run: construct it at run start, bracket each phase with
//! [`SegmentTimer::start_segment`]/[`SegmentTimer::end_segment`] across the
//! run's iterations, then extract totals/means and discard it.

use std::collections::BTreeMap;
use std::time::Instant;

/// State of the stopwatch: idle, or one open segment
#[derive(Debug)]
enum SegmentState {
    /// No segment is being measured
    Idle,
    /// A segment is open and accumulating wall-clock time
    Open {
        /// Name of the open segment
        name: String,
        /// Instant the segment was opened
        started: Instant,
    },
}

/// Segmented stopwatch recording elapsed milliseconds per named phase
///
/// Samples for a phase accumulate in collection order across iterations.
/// At most one segment is open at any time.
#[derive(Debug)]
pub struct SegmentTimer {
    segments: BTreeMap<String, Vec<f64>>,
    state: SegmentState,
}

impl Default for SegmentTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl SegmentTimer {
    /// Create a timer with no recorded segments
    #[must_use]
    pub fn new() -> Self {
        Self {
            segments: BTreeMap::new(),
            state: SegmentState::Idle,
        }
    }

    /// Open the segment `name`, closing any currently open segment first
    ///
    /// Auto-close redefines the previous segment's end boundary as this
    /// segment's start instant. The sample is kept, but callers should
    /// treat explicit [`SegmentTimer::end_segment`] calls as the contract
    /// and not rely on interleaving segments arbitrarily.
    pub fn start_segment(&mut self, name: &str) {
        self.end_segment();
        self.state = SegmentState::Open {
            name: name.to_string(),
            started: Instant::now(),
        };
    }

    /// Close the open segment and record its elapsed milliseconds
    ///
    /// No-op when no segment is open.
    pub fn end_segment(&mut self) {
        if let SegmentState::Open { name, started } =
            std::mem::replace(&mut self.state, SegmentState::Idle)
        {
            let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
            self.segments.entry(name).or_default().push(elapsed_ms);
        }
    }

    /// Sum of recorded samples per segment name
    ///
    /// Segments with no samples are absent from the map, never zero-valued.
    #[must_use]
    pub fn totals(&self) -> BTreeMap<String, f64> {
        self.segments
            .iter()
            .map(|(name, times)| (name.clone(), times.iter().sum()))
            .collect()
    }

    /// Arithmetic mean of recorded samples per segment name
    #[must_use]
    pub fn means(&self) -> BTreeMap<String, f64> {
        self.segments
            .iter()
            .map(|(name, times)| {
                let mean = if times.is_empty() {
                    0.0
                } else {
                    times.iter().sum::<f64>() / times.len() as f64
                };
                (name.clone(), mean)
            })
            .collect()
    }

    /// Raw ordered samples for one segment, empty when unobserved
    #[must_use]
    pub fn iterations(&self, segment_name: &str) -> &[f64] {
        self.segments.get(segment_name).map_or(&[], Vec::as_slice)
    }
}
