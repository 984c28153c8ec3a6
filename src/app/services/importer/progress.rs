//! Import progress events

/// Progress snapshot emitted after each committed chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportProgress {
    /// Points committed so far
    pub current: usize,
    /// Total points in the import
    pub total: usize,
    /// Completion percentage, floored to whole percent
    pub percentage: u8,
}

impl ImportProgress {
    /// Build a progress snapshot; the percentage is `current / total`
    /// floored to a whole percent
    pub fn new(current: usize, total: usize) -> Self {
        let percentage = if total == 0 {
            0
        } else {
            (current * 100 / total) as u8
        };

        Self {
            current,
            total,
            percentage,
        }
    }

    /// Check whether the import has committed every point
    pub fn is_complete(&self) -> bool {
        self.current >= self.total
    }
}
