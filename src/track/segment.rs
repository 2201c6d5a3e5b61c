//! Segment definition

use geo::geometry::Point;
use time::OffsetDateTime;

/// A single (latitude, longitude) sample
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Waypoint {
    pub lat: f64,
    pub lng: f64,
}

impl Waypoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

impl From<Point> for Waypoint {
    fn from(p: Point) -> Self {
        Self::new(p.y(), p.x())
    }
}

impl From<Waypoint> for Point {
    fn from(w: Waypoint) -> Self {
        Point::new(w.lng, w.lat)
    }
}

/// Segment as decoded from some location source, not validated yet
#[derive(Clone, Debug, PartialEq)]
pub struct RawSegment {
    pub start: OffsetDateTime,
    pub end: OffsetDateTime,
    /// Already normalized to (lat, lng)
    pub points: Vec<Waypoint>,
    pub name: Option<String>,
}

impl RawSegment {
    pub fn basic(start: OffsetDateTime, end: OffsetDateTime, points: Vec<Waypoint>) -> Self {
        Self {
            start,
            end,
            points,
            name: None,
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());

        self
    }
}

/// Time bounded list of waypoints, movement or stillness between two instants
///
/// The points are assumed to be evenly spaced in time across the span.
#[derive(Clone, Debug, PartialEq)]
pub struct Segment {
    pub(crate) start: OffsetDateTime,
    pub(crate) end: OffsetDateTime,
    pub(crate) points: Vec<Waypoint>,
    pub(crate) label: Option<String>,
}

impl Segment {
    pub fn start(&self) -> OffsetDateTime {
        self.start
    }

    pub fn end(&self) -> OffsetDateTime {
        self.end
    }

    pub fn points(&self) -> &[Waypoint] {
        &self.points
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Closed interval, both ends match
    pub fn contains(&self, instant: OffsetDateTime) -> bool {
        self.start <= instant && instant <= self.end
    }

    pub fn is_stationary(&self) -> bool {
        self.points.len() == 1
    }
}
