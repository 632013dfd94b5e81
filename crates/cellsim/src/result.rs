use crate::SimulationResult;

impl SimulationResult {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_timepoint(&mut self, time: usize, count: usize) {
        self.time.push(time);
        self.trace.push(count);
    }

    #[must_use]
    pub fn time(&self) -> &[usize] {
        &self.time
    }

    #[must_use]
    pub fn trace(&self) -> &[usize] {
        &self.trace
    }

    /// The most recently recorded `(time, count)` sample
    #[must_use]
    pub fn last(&self) -> Option<(usize, usize)> {
        self.time.last().copied().zip(self.trace.last().copied())
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> {
        self.time.iter().copied().zip(self.trace.iter().copied())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.time.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }
}
