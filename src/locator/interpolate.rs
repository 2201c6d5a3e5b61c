//! Numeric helpers for the locator

use time::OffsetDateTime;

use crate::track::Waypoint;

/// Linear interpolation between `a` and `b`
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + t * (b - a)
}

/// Fraction of `[start, end]` elapsed at `instant`, clamped to `[0, 1]`
///
/// `None` when the span has no duration.
pub fn elapsed_fraction(
    start: OffsetDateTime,
    end: OffsetDateTime,
    instant: OffsetDateTime,
) -> Option<f64> {
    let total = (end - start).as_seconds_f64();
    if total <= 0.0 {
        return None;
    }

    let partial = (instant - start).as_seconds_f64();

    Some((partial / total).clamp(0.0, 1.0))
}

/// Position at `fraction` of a polyline whose points are evenly spaced in time
pub fn interpolate(points: &[Waypoint], fraction: f64) -> Option<Waypoint> {
    let last = points.len().checked_sub(1)?;
    if last == 0 {
        return Some(points[0]);
    }

    let index = fraction.clamp(0.0, 1.0) * last as f64;
    let lower = index.floor() as usize;
    if lower >= last {
        return Some(points[last]);
    }

    let t = index - lower as f64;
    let (a, b) = (points[lower], points[lower + 1]);

    Some(Waypoint::new(lerp(a.lat, b.lat, t), lerp(a.lng, b.lng, t)))
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use time::macros::datetime;

    use super::*;

    #[test]
    fn lerp_edges() {
        assert_relative_eq!(2.0, lerp(2.0, 4.0, 0.0));
        assert_relative_eq!(3.0, lerp(2.0, 4.0, 0.5));
        assert_relative_eq!(4.0, lerp(2.0, 4.0, 1.0));
        assert_relative_eq!(-1.5, lerp(-1.0, -2.0, 0.5));
    }

    #[test]
    fn fraction_clamped() {
        let start = datetime!(2021-05-24 0:00 UTC);
        let end = datetime!(2021-05-24 0:10 UTC);

        assert_eq!(Some(0.5), elapsed_fraction(start, end, datetime!(2021-05-24 0:05 UTC)));
        assert_eq!(Some(0.0), elapsed_fraction(start, end, datetime!(2021-05-23 23:00 UTC)));
        assert_eq!(Some(1.0), elapsed_fraction(start, end, datetime!(2021-05-24 1:00 UTC)));
        assert_eq!(None, elapsed_fraction(start, start, start));
    }

    #[test]
    fn interpolate_polyline() {
        let points = vec![
            Waypoint::new(0.0, 0.0),
            Waypoint::new(10.0, 20.0),
            Waypoint::new(20.0, 20.0),
        ];

        assert_eq!(Some(points[0]), interpolate(&points, 0.0));
        assert_eq!(Some(points[1]), interpolate(&points, 0.5));
        assert_eq!(Some(points[2]), interpolate(&points, 1.0));

        let wp = interpolate(&points, 0.25).unwrap();
        assert_relative_eq!(5.0, wp.lat);
        assert_relative_eq!(10.0, wp.lng);

        assert_eq!(None, interpolate(&[], 0.5));
        assert_eq!(Some(points[0]), interpolate(&points[..1], 0.7));
    }
}
