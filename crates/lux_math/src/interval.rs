/// A closed range of ray parameters `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    /// Create a new interval given min and max values.
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Every non-negative parameter, `[0, inf)`.
    pub fn forward() -> Self {
        Self::new(0.0, f32::INFINITY)
    }

    /// Returns the size of the interval (max - min).
    pub fn size(&self) -> f32 {
        self.max - self.min
    }

    /// Returns true if x is within the interval [min, max] (inclusive).
    pub fn contains(&self, x: f32) -> bool {
        self.min <= x && x <= self.max
    }

    /// Returns true if x is strictly within the interval (min, max) (exclusive).
    pub fn surrounds(&self, x: f32) -> bool {
        self.min < x && x < self.max
    }

    /// Same interval with `max` lowered to `max`, used to shrink the search
    /// range as closer hits are found.
    pub fn with_max(&self, max: f32) -> Interval {
        Interval::new(self.min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_contains() {
        let interval = Interval::new(0.0, 10.0);

        // Inclusive bounds
        assert!(interval.contains(0.0));
        assert!(interval.contains(10.0));
        assert!(interval.contains(5.0));

        assert!(!interval.contains(-0.1));
        assert!(!interval.contains(10.1));
    }

    #[test]
    fn test_interval_surrounds() {
        let interval = Interval::new(0.0, 10.0);

        // Exclusive bounds - endpoints NOT included
        assert!(!interval.surrounds(0.0));
        assert!(!interval.surrounds(10.0));
        assert!(interval.surrounds(5.0));
    }

    #[test]
    fn test_interval_forward() {
        let forward = Interval::forward();

        assert!(forward.contains(0.0));
        assert!(forward.contains(1e10));
        assert!(!forward.contains(-1e-6));
        assert_eq!(forward.size(), f32::INFINITY);
    }

    #[test]
    fn test_interval_with_max() {
        let shrunk = Interval::forward().with_max(3.0);

        assert_eq!(shrunk.min, 0.0);
        assert_eq!(shrunk.max, 3.0);
        assert!(!shrunk.contains(3.5));
    }

    #[test]
    fn test_interval_size() {
        assert_eq!(Interval::new(1.0, 4.0).size(), 3.0);
        assert!(Interval::new(1.0, 0.5).size() < 0.0);
    }
}
