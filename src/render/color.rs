use serde::Deserialize;

/// dB offset added before normalization, so -100 dB maps to the bottom of the scale.
pub const DB_SHIFT: f64 = 100.0;

/// Smallest `max + DB_SHIFT` span we divide by.
const MIN_SPAN: f64 = 1e-12;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Palette {
    /// Pale cyan for quiet cells through to red for the loudest.
    #[default]
    Classic,
    /// Black for quiet cells through to white for the loudest.
    Grayscale,
}

/// Maps dB cells to colors, normalized against the matrix-wide maximum.
#[derive(Clone, Copy, Debug)]
pub struct ColorMapper {
    global_max: f64,
    palette: Palette,
}

impl ColorMapper {
    pub fn new(global_max: f64, palette: Palette) -> Self {
        Self {
            global_max,
            palette,
        }
    }

    /// `clamp((v + 100) / (M + 100), 0, 1)`.
    ///
    /// When `M == -100` the span vanishes; cells at or above -100 dB then
    /// saturate and everything below is the floor.
    pub fn normalize(&self, value: f64) -> f64 {
        let span = self.global_max + DB_SHIFT;
        let shifted = value + DB_SHIFT;
        if span.abs() < MIN_SPAN {
            return if shifted >= 0.0 { 1.0 } else { 0.0 };
        }
        let norm = shifted / span;
        if norm.is_nan() {
            return 0.0;
        }
        norm.clamp(0.0, 1.0)
    }

    pub fn rgb(&self, value: f64) -> [u8; 3] {
        let norm = self.normalize(value);
        match self.palette {
            Palette::Classic => [
                (255.0 * norm) as u8,
                (255.0 * (1.0 - norm * 0.7)) as u8,
                (255.0 * (1.0 - norm)) as u8,
            ],
            Palette::Grayscale => {
                let v = (255.0 * norm) as u8;
                [v, v, v]
            }
        }
    }

    pub fn rgba(&self, value: f64) -> [u8; 4] {
        let [r, g, b] = self.rgb(value);
        [r, g, b, 255]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_value_is_fully_saturated() {
        for max in [-90.0, -20.0, 0.0, 35.5] {
            let mapper = ColorMapper::new(max, Palette::Classic);
            assert_eq!(mapper.normalize(max), 1.0);
            let [r, g, b] = mapper.rgb(max);
            assert_eq!(r, 255);
            assert_eq!(g, 76);
            assert_eq!(b, 0);
        }
    }

    #[test]
    fn far_below_clamps_to_floor() {
        let mapper = ColorMapper::new(20.0, Palette::Classic);
        assert_eq!(mapper.rgb(-100.0), [0, 255, 255]);
        assert_eq!(mapper.rgb(-500.0), [0, 255, 255]);
        assert_eq!(mapper.rgba(-1e9), [0, 255, 255, 255]);
    }

    #[test]
    fn above_max_clamps_to_ceiling() {
        let mapper = ColorMapper::new(0.0, Palette::Classic);
        assert_eq!(mapper.normalize(50.0), 1.0);
    }

    #[test]
    fn midpoint() {
        let mapper = ColorMapper::new(0.0, Palette::Classic);
        assert!((mapper.normalize(-50.0) - 0.5).abs() < 1e-12);
        assert_eq!(mapper.rgb(-50.0), [127, 165, 127]);
    }

    #[test]
    fn monotonic_gradient() {
        let mapper = ColorMapper::new(10.0, Palette::Classic);
        let mut prev = mapper.rgb(-110.0);
        for step in 0..=120 {
            let v = -110.0 + step as f64;
            let cur = mapper.rgb(v);
            assert!(cur[0] >= prev[0]);
            assert!(cur[1] <= prev[1]);
            assert!(cur[2] <= prev[2]);
            prev = cur;
        }
    }

    #[test]
    fn degenerate_span_does_not_divide_by_zero() {
        let mapper = ColorMapper::new(-100.0, Palette::Classic);
        assert_eq!(mapper.normalize(-100.0), 1.0);
        assert_eq!(mapper.normalize(-120.0), 0.0);
        assert!(mapper.normalize(f64::NAN) == 0.0);
    }

    #[test]
    fn grayscale_palette() {
        let mapper = ColorMapper::new(0.0, Palette::Grayscale);
        assert_eq!(mapper.rgb(0.0), [255, 255, 255]);
        assert_eq!(mapper.rgb(-100.0), [0, 0, 0]);
    }
}
