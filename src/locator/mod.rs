//! Resolve an instant to a coordinate along the track

pub mod interpolate;

use time::OffsetDateTime;

use crate::track::{Track, Waypoint};
use interpolate::{elapsed_fraction, interpolate};

/// Coordinate found for some instant
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Location<'a> {
    pub point: Waypoint,
    /// Label of the matching segment
    pub label: Option<&'a str>,
    /// Index of the matching segment on the track
    pub segment: usize,
}

/// Find the first segment containing `instant` and interpolate the position
///
/// `None` when no segment contains the instant, which is an expected outcome.
pub fn locate(track: &Track, instant: OffsetDateTime) -> Option<Location<'_>> {
    let (segment, seg) = track
        .segments()
        .enumerate()
        .find(|(_, seg)| seg.contains(instant))?;

    let points = seg.points();

    let point = if seg.is_stationary() {
        points[0]
    } else {
        match elapsed_fraction(seg.start(), seg.end(), instant) {
            Some(fraction) => interpolate(points, fraction)?,
            // zero duration, nothing to interpolate
            None => points[0],
        }
    };

    Some(Location {
        point,
        label: seg.label(),
        segment,
    })
}

impl Track {
    /// See [`locate`]
    pub fn locate(&self, instant: OffsetDateTime) -> Option<Location<'_>> {
        locate(self, instant)
    }
}
