/// A fixed-capacity FIFO of the most recent raw samples of one axis. Once the
/// buffer is full, each new sample overwrites the oldest one.
#[derive(Debug, Clone)]
pub struct AxisHistory {
    samples: Box<[f64]>,
    start: usize,
    len: usize,
}

impl AxisHistory {
    /// Create an empty history holding at most `capacity` samples. A capacity
    /// of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: vec![0.0; capacity.max(1)].into_boxed_slice(),
            start: 0,
            len: 0,
        }
    }

    /// Append a sample, evicting the oldest one when the history is full
    pub fn push(&mut self, value: f64) {
        let capacity = self.capacity();
        if self.len < capacity {
            let slot = (self.start + self.len) % capacity;
            self.samples[slot] = value;
            self.len += 1;
            return;
        }

        self.samples[self.start] = value;
        self.start = (self.start + 1) % capacity;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.samples.len()
    }

    /// Iterate over the recorded samples from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        let capacity = self.capacity();
        (0..self.len).map(move |i| self.samples[(self.start + i) % capacity])
    }

    /// Returns the mean absolute difference between temporally adjacent
    /// samples, or [None] if fewer than two samples are recorded.
    pub fn mean_abs_delta(&self) -> Option<f64> {
        if self.len < 2 {
            return None;
        }

        let total: f64 = self
            .iter()
            .zip(self.iter().skip(1))
            .map(|(prev, next)| (next - prev).abs())
            .sum();

        Some(total / (self.len - 1) as f64)
    }
}
