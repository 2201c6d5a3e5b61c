//! Track of location segments

mod segment;

use thiserror::Error;
use time::OffsetDateTime;

pub use segment::{RawSegment, Segment, Waypoint};

/// Structurally invalid input given to [`Track::build`]
#[derive(Clone, Debug, PartialEq, Error)]
pub enum MalformedTrackError {
    #[error("segment {index} has no points")]
    EmptySegment { index: usize },
    #[error("segment {index} ends ({end}) before it starts ({start})")]
    EndBeforeStart {
        index: usize,
        start: OffsetDateTime,
        end: OffsetDateTime,
    },
    #[error("segment {index} has an invalid coordinate ({lat}, {lng})")]
    InvalidCoordinate { index: usize, lat: f64, lng: f64 },
}

/// Ordered, read only, collection of segments
///
/// The order is the one of the source data and is not sorted by time.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Track {
    segments: Vec<Segment>,
}

impl Track {
    /// Validate the decoded segments and build the track
    pub fn build(raw: Vec<RawSegment>) -> Result<Self, MalformedTrackError> {
        let mut segments = Vec::with_capacity(raw.len());

        for (index, rseg) in raw.into_iter().enumerate() {
            if rseg.points.is_empty() {
                return Err(MalformedTrackError::EmptySegment { index });
            }

            if rseg.end < rseg.start {
                return Err(MalformedTrackError::EndBeforeStart {
                    index,
                    start: rseg.start,
                    end: rseg.end,
                });
            }

            if let Some(wp) = rseg.points.iter().find(|wp| !wp.is_valid()) {
                return Err(MalformedTrackError::InvalidCoordinate {
                    index,
                    lat: wp.lat,
                    lng: wp.lng,
                });
            }

            segments.push(Segment {
                start: rseg.start,
                end: rseg.end,
                points: rseg.points,
                label: rseg.name,
            });
        }

        log::debug!("Track built with {} segments", segments.len());

        Ok(Self { segments })
    }

    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Earliest start and latest end of all segments
    pub fn time_range(&self) -> Option<(OffsetDateTime, OffsetDateTime)> {
        let start = self.segments.iter().map(|s| s.start).min()?;
        let end = self.segments.iter().map(|s| s.end).max()?;

        Some((start, end))
    }
}
