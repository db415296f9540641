//! Pure mappings from residue positions and lanes to pixels.
//!
//! Both scales are plain values: identical inputs always give identical
//! pixels, so re-rendering never moves an emphasized glyph.

use crate::feature::FeatureCategory;

/// Pixel extent of one lane band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    /// Top edge of the band.
    pub start: f32,
    /// Band height.
    pub size: f32,
}

impl Band {
    /// Vertical center of the band.
    #[must_use]
    pub fn center(self) -> f32 {
        self.start + self.size / 2.0
    }
}

/// Partitions a pixel range into equal bands, one per lane, with a uniform
/// padding fraction between bands and at both ends.
#[derive(Debug, Clone, PartialEq)]
pub struct BandScale {
    lanes: Vec<FeatureCategory>,
    start: f32,
    step: f32,
    bandwidth: f32,
}

impl BandScale {
    /// Build a band scale over `range` pixels. `padding` is clamped to
    /// `[0, 1)`.
    #[must_use]
    pub fn new(lanes: &[FeatureCategory], range: f32, padding: f32) -> Self {
        let padding = padding.clamp(0.0, 0.999);
        let n = lanes.len() as f32;
        let step = range / (n + padding).max(1.0);
        // Center the bands, leaving half the leftover space at each end.
        let start = (range - step * (n - padding)) / 2.0;
        Self {
            lanes: lanes.to_vec(),
            start,
            step,
            bandwidth: step * (1.0 - padding),
        }
    }

    /// Band for `category`, or `None` if it is not one of the lanes.
    #[must_use]
    pub fn band(&self, category: FeatureCategory) -> Option<Band> {
        let idx = self.lanes.iter().position(|&c| c == category)?;
        Some(Band {
            start: self.start + self.step * idx as f32,
            size: self.bandwidth,
        })
    }

    /// Height of every band.
    #[must_use]
    pub fn bandwidth(&self) -> f32 {
        self.bandwidth
    }

    /// Lanes in top-to-bottom order.
    #[must_use]
    pub fn lanes(&self) -> &[FeatureCategory] {
        &self.lanes
    }
}

/// Affine map `pixel = position / domain_max * range`.
///
/// Positions outside `[0, domain_max]` still map linearly; validating them is
/// the caller's job.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_max: u32,
    range: f32,
}

impl LinearScale {
    /// Scale from `[0, domain_max]` onto `[0, range]` pixels.
    #[must_use]
    pub fn new(domain_max: u32, range: f32) -> Self {
        Self { domain_max, range }
    }

    /// Pixel for a residue position. A zero-length domain maps everything to
    /// the origin.
    #[must_use]
    pub fn map(&self, position: f32) -> f32 {
        if self.domain_max == 0 {
            return 0.0;
        }
        position / self.domain_max as f32 * self.range
    }

    /// Upper bound of the domain.
    #[must_use]
    pub fn domain_max(&self) -> u32 {
        self.domain_max
    }

    /// Pixels per residue.
    #[must_use]
    pub fn pixels_per_unit(&self) -> f32 {
        self.map(1.0)
    }

    /// Axis ticks at a "nice" step (1, 2 or 5 times a power of ten) chosen
    /// so adjacent labels sit at least `min_spacing` pixels apart. Ties go to
    /// the larger step, i.e. fewer ticks.
    #[must_use]
    pub fn ticks(&self, min_spacing: f32) -> Vec<u32> {
        if self.domain_max == 0 || self.range <= 0.0 {
            return vec![0];
        }
        let min_spacing = min_spacing.max(1.0);
        let count = (self.range / min_spacing).floor().max(1.0);
        let px_per_unit = f64::from(self.pixels_per_unit());

        let mut step = nice_step(f64::from(self.domain_max) / f64::from(count));
        while step * px_per_unit < f64::from(min_spacing) {
            step = next_nice(step);
        }

        let step = step.round().max(1.0) as usize;
        (0..=self.domain_max).step_by(step).collect()
    }
}

/// Round `raw` to 1, 2 or 5 times a power of ten, never below 1.
fn nice_step(raw: f64) -> f64 {
    if raw <= 1.0 {
        return 1.0;
    }
    let base = 10f64.powi(raw.log10().floor() as i32);
    let error = raw / base;
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    factor * base
}

/// The next nice step above `step` (1 → 2 → 5 → 10).
fn next_nice(step: f64) -> f64 {
    let base = 10f64.powi(step.log10().floor() as i32);
    let mantissa = (step / base).round();
    if mantissa < 2.0 {
        2.0 * base
    } else if mantissa < 5.0 {
        5.0 * base
    } else {
        10.0 * base
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_is_affine_and_monotonic() {
        let scale = LinearScale::new(1863, 1160.0);
        assert_eq!(scale.map(0.0), 0.0);
        assert!((scale.map(1863.0) - 1160.0).abs() < 1e-3);

        let mut prev = f32::MIN;
        for p in 0..=1863 {
            let px = scale.map(p as f32);
            assert!(px >= prev);
            prev = px;
        }
    }

    #[test]
    fn linear_does_not_clamp() {
        let scale = LinearScale::new(100, 200.0);
        assert_eq!(scale.map(150.0), 300.0);
        assert_eq!(scale.map(-10.0), -20.0);
    }

    #[test]
    fn zero_domain_maps_to_origin() {
        let scale = LinearScale::new(0, 200.0);
        assert_eq!(scale.map(5.0), 0.0);
        assert_eq!(scale.ticks(50.0), vec![0]);
    }

    #[test]
    fn band_partitions_range() {
        let scale = BandScale::new(&FeatureCategory::LANES, 220.0, 0.05);
        let first = scale.band(FeatureCategory::Exon).unwrap();
        let second = scale.band(FeatureCategory::MissenseVariant).unwrap();
        let last = scale.band(FeatureCategory::Domain).unwrap();

        assert!(first.start > 0.0);
        assert!(second.start > first.start + first.size);
        assert!(last.start + last.size < 220.0);
        assert!((first.start - (220.0 - last.start - last.size)).abs() < 1e-3);
        assert!((first.size - scale.bandwidth()).abs() < 1e-6);
    }

    #[test]
    fn band_without_padding_tiles_exactly() {
        let scale = BandScale::new(&FeatureCategory::LANES, 100.0, 0.0);
        let first = scale.band(FeatureCategory::Exon).unwrap();
        assert_eq!(first.start, 0.0);
        assert_eq!(first.size, 20.0);
        assert_eq!(first.center(), 10.0);
    }

    #[test]
    fn band_unknown_lane_is_none() {
        let scale = BandScale::new(&[FeatureCategory::Exon], 100.0, 0.1);
        assert!(scale.band(FeatureCategory::Domain).is_none());
    }

    #[test]
    fn scales_are_referentially_stable() {
        let a = BandScale::new(&FeatureCategory::LANES, 220.0, 0.05);
        let b = BandScale::new(&FeatureCategory::LANES, 220.0, 0.05);
        assert_eq!(a, b);
        let l = LinearScale::new(1863, 1160.0);
        assert_eq!(l.map(731.0), l.map(731.0));
    }

    #[test]
    fn ticks_use_nice_steps() {
        let scale = LinearScale::new(1863, 1160.0);
        let ticks = scale.ticks(100.0);
        assert_eq!(ticks, (0..=1800).step_by(200).collect::<Vec<u32>>());
    }

    #[test]
    fn ticks_respect_min_spacing() {
        let scale = LinearScale::new(1000, 300.0);
        for min in [20.0, 45.0, 70.0, 150.0] {
            let ticks = scale.ticks(min);
            if let &[a, b, ..] = ticks.as_slice() {
                assert!(scale.map(b as f32) - scale.map(a as f32) >= min);
            }
        }
    }

    #[test]
    fn nice_steps() {
        assert_eq!(nice_step(169.4), 200.0);
        assert_eq!(nice_step(0.3), 1.0);
        assert_eq!(nice_step(4.0), 5.0);
        assert_eq!(nice_step(80.0), 100.0);
        assert_eq!(next_nice(200.0), 500.0);
        assert_eq!(next_nice(500.0), 1000.0);
        assert_eq!(next_nice(1.0), 2.0);
    }
}
