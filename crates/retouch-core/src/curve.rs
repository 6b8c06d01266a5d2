//! Tone curves compiled to 8-bit lookup tables.
//!
//! Curves are interpolated with monotonic cubic Hermite splines
//! (Fritsch-Carlson), so a curve through increasing control points never
//! dips or overshoots. Catalog recipes use them for fades and tonal shifts.

use crate::buffer::CHANNELS;
use crate::{CurvePoint, ToneCurve};

/// Pre-computed 256-entry lookup table for efficient curve application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToneCurveLut {
    /// LUT values: lut[input] = output
    pub lut: [u8; 256],
}

impl ToneCurveLut {
    /// Generate LUT from a tone curve.
    pub fn from_curve(curve: &ToneCurve) -> Self {
        if curve.is_linear() {
            return Self::identity();
        }

        let spline = Spline::new(&curve.points);
        let mut lut = [0u8; 256];
        for (i, out) in lut.iter_mut().enumerate() {
            let y = spline.evaluate(i as f32 / 255.0);
            *out = (y * 255.0).clamp(0.0, 255.0).round() as u8;
        }

        Self { lut }
    }

    /// Create identity LUT (no change).
    pub fn identity() -> Self {
        let mut lut = [0u8; 256];
        for (i, out) in lut.iter_mut().enumerate() {
            *out = i as u8;
        }
        Self { lut }
    }

    /// Check if this LUT is identity.
    pub fn is_identity(&self) -> bool {
        self.lut.iter().enumerate().all(|(i, &v)| v == i as u8)
    }
}

impl Default for ToneCurveLut {
    fn default() -> Self {
        Self::identity()
    }
}

/// Apply tone curve LUT to the RGB channels of RGBA pixels in place.
///
/// Alpha is left unchanged.
pub fn apply_tone_curve(pixels: &mut [u8], lut: &ToneCurveLut) {
    if lut.is_identity() {
        return;
    }

    for chunk in pixels.chunks_exact_mut(CHANNELS) {
        chunk[0] = lut.lut[chunk[0] as usize];
        chunk[1] = lut.lut[chunk[1] as usize];
        chunk[2] = lut.lut[chunk[2] as usize];
    }
}

/// Evaluate tone curve at a given x value in [0, 1].
pub fn evaluate_curve(curve: &ToneCurve, x: f32) -> f32 {
    Spline::new(&curve.points).evaluate(x)
}

/// Control points paired with their monotonic tangents.
///
/// Points are sorted by x and non-finite points dropped, so a curve built
/// from its public fields or deserialized unsorted still evaluates.
struct Spline {
    points: Vec<CurvePoint>,
    tangents: Vec<f32>,
}

impl Spline {
    fn new(points: &[CurvePoint]) -> Self {
        let mut points: Vec<CurvePoint> = points
            .iter()
            .copied()
            .filter(|p| p.x.is_finite() && p.y.is_finite())
            .collect();
        points.sort_by(|a, b| a.x.total_cmp(&b.x));
        let tangents = monotonic_tangents(&points);
        Self { points, tangents }
    }

    fn evaluate(&self, x: f32) -> f32 {
        let points = &self.points;
        match points.len() {
            0 => return x,
            1 => return points[0].y,
            _ => {}
        }

        let x = x.clamp(points[0].x, points[points.len() - 1].x);
        let i = find_interval(points, x);
        let (p0, p1) = (points[i], points[i + 1]);

        let h = p1.x - p0.x;
        if h.abs() < f32::EPSILON {
            return p0.y;
        }

        let t = (x - p0.x) / h;
        let t2 = t * t;
        let t3 = t2 * t;

        // Hermite basis functions
        let h00 = 2.0 * t3 - 3.0 * t2 + 1.0;
        let h10 = t3 - 2.0 * t2 + t;
        let h01 = -2.0 * t3 + 3.0 * t2;
        let h11 = t3 - t2;

        let y = h00 * p0.y
            + h10 * h * self.tangents[i]
            + h01 * p1.y
            + h11 * h * self.tangents[i + 1];

        y.clamp(0.0, 1.0)
    }
}

/// Fritsch-Carlson tangents: harmonic-mean interior slopes, then limited so
/// each segment stays monotonic.
fn monotonic_tangents(points: &[CurvePoint]) -> Vec<f32> {
    let n = points.len();
    if n < 2 {
        return vec![0.0; n];
    }

    let widths: Vec<f32> = points.windows(2).map(|w| w[1].x - w[0].x).collect();
    let secants: Vec<f32> = points
        .windows(2)
        .zip(&widths)
        .map(|(w, &h)| {
            if h.abs() < f32::EPSILON {
                0.0
            } else {
                (w[1].y - w[0].y) / h
            }
        })
        .collect();

    let mut m = vec![0.0f32; n];
    m[0] = secants[0];
    m[n - 1] = secants[n - 2];

    for i in 1..n - 1 {
        let (d0, d1) = (secants[i - 1], secants[i]);
        if d0.signum() == d1.signum() && d0.abs() >= f32::EPSILON && d1.abs() >= f32::EPSILON {
            let w1 = 2.0 * widths[i] + widths[i - 1];
            let w2 = widths[i] + 2.0 * widths[i - 1];
            m[i] = (w1 + w2) / (w1 / d0 + w2 / d1);
        }
    }

    for (i, &delta) in secants.iter().enumerate() {
        if delta.abs() < f32::EPSILON {
            m[i] = 0.0;
            m[i + 1] = 0.0;
            continue;
        }
        let limit = 3.0 * delta.abs();
        m[i] = m[i].clamp(-limit, limit);
        m[i + 1] = m[i + 1].clamp(-limit, limit);
    }

    m
}

/// Binary search for the segment containing x.
fn find_interval(points: &[CurvePoint], x: f32) -> usize {
    let n = points.len();
    if n <= 2 {
        return 0;
    }

    let mut low = 0;
    let mut high = n - 2;
    while low < high {
        let mid = (low + high).div_ceil(2);
        if points[mid].x <= x {
            low = mid;
        } else {
            high = mid - 1;
        }
    }
    low
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fade_curve() -> ToneCurve {
        ToneCurve::from_points(vec![
            CurvePoint::new(0.0, 0.1),
            CurvePoint::new(0.5, 0.5),
            CurvePoint::new(1.0, 0.9),
        ])
    }

    fn s_curve() -> ToneCurve {
        ToneCurve::from_points(vec![
            CurvePoint::new(0.0, 0.0),
            CurvePoint::new(0.25, 0.15),
            CurvePoint::new(0.75, 0.85),
            CurvePoint::new(1.0, 1.0),
        ])
    }

    #[test]
    fn test_linear_curve_is_identity() {
        let lut = ToneCurveLut::from_curve(&ToneCurve::default());
        assert!(lut.is_identity());
    }

    #[test]
    fn test_curve_passes_through_control_points() {
        let curve = s_curve();
        for p in &curve.points {
            assert!((evaluate_curve(&curve, p.x) - p.y).abs() < 1e-5);
        }
    }

    #[test]
    fn test_fade_lifts_blacks_and_lowers_whites() {
        let lut = ToneCurveLut::from_curve(&fade_curve());
        // Three collinear points: y = 0.1 + 0.8x
        assert_eq!(lut.lut[0], 26);
        assert!((229..=230).contains(&lut.lut[255]));
        assert_eq!(lut.lut[128], 128);
    }

    #[test]
    fn test_lut_is_monotonic() {
        for curve in [s_curve(), fade_curve()] {
            let lut = ToneCurveLut::from_curve(&curve);
            for i in 1..256 {
                assert!(lut.lut[i] >= lut.lut[i - 1], "dip at {i}");
            }
        }
    }

    #[test]
    fn test_apply_leaves_alpha() {
        let lut = ToneCurveLut::from_curve(&fade_curve());
        let mut pixels = vec![0u8, 255, 128, 42];
        apply_tone_curve(&mut pixels, &lut);
        assert_eq!(pixels, vec![lut.lut[0], lut.lut[255], lut.lut[128], 42]);
    }

    #[test]
    fn test_identity_lut_skips_work() {
        let mut pixels = vec![1u8, 2, 3, 4];
        apply_tone_curve(&mut pixels, &ToneCurveLut::identity());
        assert_eq!(pixels, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_degenerate_curves() {
        let empty = ToneCurve { points: vec![] };
        assert_eq!(evaluate_curve(&empty, 0.3), 0.3);

        let single = ToneCurve {
            points: vec![CurvePoint::new(0.5, 0.7)],
        };
        assert_eq!(evaluate_curve(&single, 0.1), 0.7);
    }

    #[test]
    fn test_unsorted_points_are_sorted_before_evaluation() {
        let unsorted = ToneCurve {
            points: vec![CurvePoint::new(1.0, 1.0), CurvePoint::new(0.0, 0.0)],
        };
        let lut = ToneCurveLut::from_curve(&unsorted);
        assert!(lut.is_identity());

        let reversed_fade = ToneCurve {
            points: vec![
                CurvePoint::new(1.0, 0.9),
                CurvePoint::new(0.0, 0.1),
                CurvePoint::new(0.5, 0.5),
            ],
        };
        assert_eq!(
            ToneCurveLut::from_curve(&reversed_fade),
            ToneCurveLut::from_curve(&fade_curve())
        );
    }

    #[test]
    fn test_non_finite_points_are_ignored() {
        let curve = ToneCurve {
            points: vec![
                CurvePoint::new(0.0, 0.0),
                CurvePoint::new(f32::NAN, 0.5),
                CurvePoint::new(0.5, f32::INFINITY),
                CurvePoint::new(1.0, 1.0),
            ],
        };
        assert!(ToneCurveLut::from_curve(&curve).is_identity());
        let _ = evaluate_curve(&curve, f32::NAN);
    }

    #[test]
    fn test_validate_rejects_non_finite_points() {
        assert!(fade_curve().validate().is_ok());
        let bad = ToneCurve {
            points: vec![CurvePoint::new(0.0, f32::NAN), CurvePoint::new(1.0, 1.0)],
        };
        assert!(matches!(
            bad.validate(),
            Err(crate::EditError::InvalidArgument { name: "curve.points", .. })
        ));
    }

    #[test]
    fn test_flat_segment_stays_flat() {
        let curve = ToneCurve::from_points(vec![
            CurvePoint::new(0.0, 0.0),
            CurvePoint::new(0.4, 0.5),
            CurvePoint::new(0.6, 0.5),
            CurvePoint::new(1.0, 1.0),
        ]);
        let y = evaluate_curve(&curve, 0.5);
        assert!((y - 0.5).abs() < 1e-5);
    }
}
