//! Utility functions for analysis module

/// `numerator / denominator`, or 0.0 when the denominator is zero.
#[inline]
pub(crate) fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio() {
        assert_eq!(ratio(1.0, 4.0), 0.25);
        assert_eq!(ratio(3.0, 0.0), 0.0);
    }
}
