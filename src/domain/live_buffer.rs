// Bounded window over the realtime metric feed
use super::telemetry::MetricSample;
use std::collections::VecDeque;

pub const LIVE_BUFFER_CAPACITY: usize = 50;

/// Most recent samples from the push channel, oldest first.
///
/// Samples are kept in arrival order. Once the buffer is full every append
/// evicts the oldest sample.
#[derive(Debug, Clone)]
pub struct LiveMetricsBuffer {
    capacity: usize,
    samples: VecDeque<MetricSample>,
}

impl LiveMetricsBuffer {
    pub fn new() -> Self {
        Self::with_capacity(LIVE_BUFFER_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            samples: VecDeque::with_capacity(capacity),
        }
    }

    pub fn append(&mut self, sample: MetricSample) {
        if let Some(last) = self.samples.back() {
            if sample.time_ms < last.time_ms {
                tracing::debug!(
                    "Realtime sample went back in time: {} < {}",
                    sample.time_ms,
                    last.time_ms
                );
            }
        }

        self.samples.push_back(sample);
        while self.samples.len() > self.capacity {
            self.samples.pop_front();
        }
    }

    /// Owned copy of the window for rendering.
    pub fn snapshot(&self) -> Vec<MetricSample> {
        self.samples.iter().cloned().collect()
    }

    pub fn latest(&self) -> Option<&MetricSample> {
        self.samples.back()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.samples.len() == self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for LiveMetricsBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(ts: i64) -> MetricSample {
        MetricSample::new(ts, Some(800.0 + ts as f64), Some(15.0), Some(0.01))
    }

    fn timestamps(buffer: &LiveMetricsBuffer) -> Vec<i64> {
        buffer.snapshot().iter().map(|s| s.time_ms).collect()
    }

    #[test]
    fn test_length_tracks_min_of_appended_and_capacity() {
        let mut buffer = LiveMetricsBuffer::new();
        for n in 1..=120 {
            buffer.append(sample(n));
            assert_eq!(buffer.len(), std::cmp::min(n as usize, LIVE_BUFFER_CAPACITY));
        }
        assert!(buffer.is_full());
    }

    #[test]
    fn test_oldest_retained_is_earliest() {
        let mut buffer = LiveMetricsBuffer::new();
        for n in 1..=75 {
            buffer.append(sample(n));
            let ts = timestamps(&buffer);
            let oldest = ts[0];
            assert!(ts.iter().all(|t| oldest <= *t));
            assert!(ts.windows(2).all(|w| w[0] <= w[1]));
        }
    }

    #[test]
    fn test_fifty_first_sample_evicts_exactly_the_oldest() {
        let mut buffer = LiveMetricsBuffer::new();
        for n in 1..=50 {
            buffer.append(sample(n));
        }
        let before = timestamps(&buffer);

        buffer.append(sample(51));
        let after = timestamps(&buffer);

        assert_eq!(after.len(), 50);
        assert_eq!(&after[..49], &before[1..]);
        assert_eq!(after[49], 51);
        assert!(!after.contains(&1));
    }

    #[test]
    fn test_snapshot_is_isolated_from_buffer() {
        let mut buffer = LiveMetricsBuffer::new();
        buffer.append(sample(1));
        buffer.append(sample(2));

        let mut copy = buffer.snapshot();
        copy.clear();
        copy.push(sample(99));

        buffer.append(sample(3));
        assert_eq!(timestamps(&buffer), vec![1, 2, 3]);
    }

    #[test]
    fn test_three_samples_in_order() {
        let mut buffer = LiveMetricsBuffer::new();
        for ts in [1, 2, 3] {
            buffer.append(sample(ts));
        }
        assert_eq!(timestamps(&buffer), vec![1, 2, 3]);
        assert_eq!(buffer.latest().map(|s| s.time_ms), Some(3));
    }

    #[test]
    fn test_sixty_samples_keep_last_fifty() {
        let mut buffer = LiveMetricsBuffer::new();
        for ts in 1..=60 {
            buffer.append(sample(ts));
        }
        assert_eq!(timestamps(&buffer), (11..=60).collect::<Vec<_>>());
    }

    #[test]
    fn test_samples_with_missing_fields_are_kept() {
        let mut buffer = LiveMetricsBuffer::new();
        buffer.append(MetricSample::new(1, None, None, None));
        assert_eq!(buffer.len(), 1);
        assert_eq!(buffer.latest().and_then(|s| s.throughput), None);
    }

    #[test]
    fn test_out_of_order_sample_keeps_arrival_position() {
        let mut buffer = LiveMetricsBuffer::new();
        for ts in [10, 30, 20, 40] {
            buffer.append(sample(ts));
        }
        assert_eq!(timestamps(&buffer), vec![10, 30, 20, 40]);
        assert_eq!(buffer.latest().map(|s| s.time_ms), Some(40));
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let mut buffer = LiveMetricsBuffer::with_capacity(0);
        buffer.append(sample(1));
        buffer.append(sample(2));
        assert_eq!(buffer.capacity(), 1);
        assert_eq!(timestamps(&buffer), vec![2]);
    }
}
