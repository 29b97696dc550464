//! Continuous color scale for the choropleth

use serde::Serialize;

/// Plasma palette sampled at nine evenly spaced stops
pub const PLASMA: [(u8, u8, u8); 9] = [
    (0x0d, 0x08, 0x87),
    (0x4b, 0x03, 0xa1),
    (0x7d, 0x03, 0xa8),
    (0xa8, 0x22, 0x96),
    (0xcb, 0x46, 0x79),
    (0xe5, 0x6b, 0x5d),
    (0xf8, 0x94, 0x41),
    (0xfd, 0xc3, 0x28),
    (0xf0, 0xf9, 0x21),
];

/// Linear mapping from a value range onto the plasma palette
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColorScale {
    /// Smallest value in the data
    pub min: f64,
    /// Largest value in the data
    pub max: f64,
}

impl ColorScale {
    /// Scale spanning the given values; an empty input spans `0..0`
    pub fn plasma<I: IntoIterator<Item = f64>>(values: I) -> Self {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for value in values {
            min = min.min(value);
            max = max.max(value);
        }
        if min > max {
            return Self { min: 0.0, max: 0.0 };
        }
        Self { min, max }
    }

    /// Position of a value in `0.0..=1.0`; a degenerate range maps to the low end
    pub fn position(&self, value: f64) -> f64 {
        let span = self.max - self.min;
        if span <= 0.0 || !value.is_finite() {
            return 0.0;
        }
        ((value - self.min) / span).clamp(0.0, 1.0)
    }

    /// Hex color for a value
    pub fn color(&self, value: f64) -> String {
        let t = self.position(value) * (PLASMA.len() - 1) as f64;
        let lower = t.floor() as usize;
        let upper = (lower + 1).min(PLASMA.len() - 1);
        let frac = t - lower as f64;

        let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * frac).round() as u8;
        let (r0, g0, b0) = PLASMA[lower];
        let (r1, g1, b1) = PLASMA[upper];
        format!("#{:02x}{:02x}{:02x}", lerp(r0, r1), lerp(g0, g1), lerp(b0, b1))
    }

    /// Evenly spaced `(value, color)` pairs for a legend
    pub fn legend(&self, steps: usize) -> Vec<(f64, String)> {
        let steps = steps.max(2);
        (0..steps)
            .map(|i| {
                let value = self.min + (self.max - self.min) * i as f64 / (steps - 1) as f64;
                (value, self.color(value))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints() {
        let scale = ColorScale::plasma([0.0, 10.0]);
        assert_eq!(scale.color(0.0), "#0d0887");
        assert_eq!(scale.color(10.0), "#f0f921");
    }

    #[test]
    fn test_midpoint_hits_middle_stop() {
        let scale = ColorScale::plasma([0.0, 8.0]);
        assert_eq!(scale.color(4.0), "#cb4679");
    }

    #[test]
    fn test_degenerate_range() {
        let scale = ColorScale::plasma([3.0, 3.0, 3.0]);
        assert_eq!(scale.position(3.0), 0.0);
        assert_eq!(scale.color(3.0), "#0d0887");

        let empty = ColorScale::plasma(std::iter::empty());
        assert_eq!((empty.min, empty.max), (0.0, 0.0));
    }

    #[test]
    fn test_values_outside_range_are_clamped() {
        let scale = ColorScale::plasma([0.0, 1.0]);
        assert_eq!(scale.color(-5.0), scale.color(0.0));
        assert_eq!(scale.color(50.0), scale.color(1.0));
    }

    #[test]
    fn test_legend() {
        let legend = ColorScale::plasma([0.0, 100.0]).legend(5);
        assert_eq!(legend.len(), 5);
        assert_eq!(legend[0].0, 0.0);
        assert_eq!(legend[4].0, 100.0);
    }
}
