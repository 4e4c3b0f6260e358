//! Timeline (execution trace) model.
//!
//! A timeline is the append-only, chronologically ordered list of
//! intervals during which a single process held the CPU. Idle time is not
//! stored; it is the gaps between consecutive segments (and before the
//! first one, since the clock starts at 0).

use serde::{Deserialize, Serialize};

use super::Ticks;

/// One uninterrupted interval `[start, end)` of a process on the CPU.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineSegment {
    /// Process that ran.
    pub process_id: String,
    /// First tick of the interval.
    pub start: Ticks,
    /// Tick after the last executed unit (`end > start`).
    pub end: Ticks,
}

impl TimelineSegment {
    /// Creates a new segment.
    pub fn new(process_id: impl Into<String>, start: Ticks, end: Ticks) -> Self {
        Self {
            process_id: process_id.into(),
            start,
            end,
        }
    }

    /// Length of the interval in ticks.
    #[inline]
    pub fn duration(&self) -> Ticks {
        self.end - self.start
    }
}

/// Ordered, non-overlapping sequence of [`TimelineSegment`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timeline {
    segments: Vec<TimelineSegment>,
}

impl Timeline {
    /// Creates an empty timeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a segment.
    ///
    /// Segments must be non-empty and must not start before the previous
    /// segment ended.
    pub fn push(&mut self, segment: TimelineSegment) {
        debug_assert!(
            segment.end > segment.start,
            "Empty segment for {} at {}",
            segment.process_id,
            segment.start
        );
        debug_assert!(
            self.segments
                .last()
                .map_or(true, |last| last.end <= segment.start),
            "Segment for {} at {} overlaps the previous one",
            segment.process_id,
            segment.start
        );
        self.segments.push(segment);
    }

    /// Appends a segment, extending the last one instead when the same
    /// process continues without a gap.
    pub fn push_merged(&mut self, segment: TimelineSegment) {
        if let Some(last) = self.segments.last_mut() {
            if last.process_id == segment.process_id && last.end == segment.start {
                last.end = segment.end;
                return;
            }
        }
        self.push(segment);
    }

    /// All segments in chronological order.
    pub fn segments(&self) -> &[TimelineSegment] {
        &self.segments
    }

    /// Iterates segments in chronological order.
    pub fn iter(&self) -> std::slice::Iter<'_, TimelineSegment> {
        self.segments.iter()
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Makespan: end of the last segment (0 when empty).
    pub fn makespan(&self) -> Ticks {
        self.segments.last().map(|s| s.end).unwrap_or(0)
    }

    /// Total ticks the CPU was busy.
    pub fn busy_time(&self) -> Ticks {
        self.segments.iter().map(TimelineSegment::duration).sum()
    }

    /// Total idle ticks within `[0, makespan)`.
    pub fn idle_time(&self) -> Ticks {
        self.makespan() - self.busy_time()
    }

    /// Idle intervals `(from, to)` within `[0, makespan)`.
    pub fn idle_gaps(&self) -> Vec<(Ticks, Ticks)> {
        let mut gaps = Vec::new();
        let mut cursor = 0;
        for s in &self.segments {
            if s.start > cursor {
                gaps.push((cursor, s.start));
            }
            cursor = s.end;
        }
        gaps
    }

    /// Fraction of `[0, makespan)` the CPU was busy.
    ///
    /// Returns `None` if the makespan is zero.
    pub fn utilization(&self) -> Option<f64> {
        let horizon = self.makespan();
        if horizon <= 0 {
            return None;
        }
        Some(self.busy_time() as f64 / horizon as f64)
    }

    /// Returns all segments for a given process.
    pub fn segments_for_process(&self, process_id: &str) -> Vec<&TimelineSegment> {
        self.segments
            .iter()
            .filter(|s| s.process_id == process_id)
            .collect()
    }

    /// Total CPU ticks a process received.
    pub fn busy_time_for(&self, process_id: &str) -> Ticks {
        self.segments_for_process(process_id)
            .iter()
            .map(|s| s.duration())
            .sum()
    }

    /// Completion time for a process (end of its last segment).
    pub fn completion_time_for(&self, process_id: &str) -> Option<Ticks> {
        self.segments_for_process(process_id)
            .iter()
            .map(|s| s.end)
            .max()
    }

    /// Number of adjacent segment pairs that switch to a different process.
    pub fn context_switches(&self) -> usize {
        self.segments
            .windows(2)
            .filter(|w| w[0].process_id != w[1].process_id)
            .count()
    }

    pub(crate) fn clear(&mut self) {
        self.segments.clear();
    }
}

impl<'a> IntoIterator for &'a Timeline {
    type Item = &'a TimelineSegment;
    type IntoIter = std::slice::Iter<'a, TimelineSegment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}
