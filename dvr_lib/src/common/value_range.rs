/// Closed range of floating-point values.
/// Used for sample statistics of a volume.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct ValueRange {
    /// Lower bound
    pub low: f32,
    /// Upper bound
    pub high: f32,
}

impl ValueRange {
    /// Constructs new, empty range. Contains nothing.
    pub fn empty() -> ValueRange {
        ValueRange {
            low: f32::NAN,
            high: f32::NAN,
        }
    }

    /// Constructs minimal range containing every sample.
    pub fn from_samples(samples: impl IntoIterator<Item = f32>) -> ValueRange {
        let mut range = ValueRange::empty();
        for val in samples {
            range.extend(val);
        }
        range
    }

    pub fn is_empty(&self) -> bool {
        self.low.is_nan() || self.high.is_nan()
    }

    /// Extend the range with new value.
    pub fn extend(&mut self, val: f32) {
        if self.is_empty() {
            self.low = val;
            self.high = val;
            return;
        }
        self.low = f32::min(self.low, val);
        self.high = f32::max(self.high, val);
    }

    /// Check if value is inside the range.
    pub fn contains(&self, val: f32) -> bool {
        self.low <= val && val <= self.high
    }

    /// Distance between bounds, zero for empty range
    pub fn span(&self) -> f32 {
        if self.is_empty() {
            0.0
        } else {
            self.high - self.low
        }
    }
}

impl Default for ValueRange {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod test {

    use super::*;

    #[test]
    fn extend_range() {
        let range = ValueRange::from_samples([0.5, 0.0, 0.25, 1.0]);

        assert_eq!(range.low, 0.0);
        assert_eq!(range.high, 1.0);
        assert_eq!(range.span(), 1.0);
        assert!(range.contains(0.7));
        assert!(!range.contains(1.2));
    }

    #[test]
    fn empty_value_range() {
        let mut range = ValueRange::empty();

        assert!(range.is_empty());
        assert!(!range.contains(0.0));
        assert_eq!(range.span(), 0.0);

        range.extend(0.3);

        assert!(range.contains(0.3));
        assert_eq!(range.span(), 0.0);
    }
}
