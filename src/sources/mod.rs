//! Location history sources API

use serde::Deserialize;

use crate::track::{RawSegment, Waypoint};

/// Location history source
pub trait TrackSource {
    /// Fetch the decoded segments, coordinates normalized to (lat, lng)
    fn fetch(&mut self) -> Result<Vec<RawSegment>, String>;
}

mod csv_file;
mod kml_file;

pub use csv_file::CsvSource;
pub use kml_file::KmlSource;

/// Header names of the segments CSV and axis order of the coordinates
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct FieldsConfiguration {
    pub start: String,
    pub end: String,
    pub coordinates: String,
    pub name: String,
    /// Coordinates are `lat,lng` instead of `lng,lat`
    pub flip_coordinates: bool,
}

impl Default for FieldsConfiguration {
    fn default() -> Self {
        Self {
            start: "start".to_string(),
            end: "end".to_string(),
            coordinates: "coordinates".to_string(),
            name: "name".to_string(),
            flip_coordinates: false,
        }
    }
}

/// Parse a KML like coordinates list: whitespace separated `lng,lat[,alt]` tuples
pub(crate) fn parse_coordinates(raw: &str, flip: bool) -> Result<Vec<Waypoint>, String> {
    let mut points = vec![];

    for tuple in raw.split_whitespace() {
        let axis: Vec<&str> = tuple.split(',').map(|s| s.trim()).collect();
        if axis.len() < 2 || axis.len() > 3 {
            return Err(format!("Invalid coordinate tuple `{}`", tuple));
        }

        let (ilat, ilng) = if flip { (0, 1) } else { (1, 0) };

        let lat = axis[ilat]
            .parse::<f64>()
            .map_err(|e| format!("Invalid latitude format: {}", e))?;
        let lng = axis[ilng]
            .parse::<f64>()
            .map_err(|e| format!("Invalid longitude format: {}", e))?;

        points.push(Waypoint::new(lat, lng));
    }

    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::parse_coordinates;
    use crate::track::Waypoint;

    #[test]
    fn coordinates() -> Result<(), String> {
        let points = parse_coordinates(
            " -48.8702222,-26.31832,0\n\t-48.8619776,-26.3185919 ",
            false,
        )?;
        assert_eq!(
            vec![
                Waypoint::new(-26.31832, -48.8702222),
                Waypoint::new(-26.3185919, -48.8619776)
            ],
            points
        );

        let points = parse_coordinates("-26.31832,-48.8702222", true)?;
        assert_eq!(vec![Waypoint::new(-26.31832, -48.8702222)], points);

        assert_eq!(Ok(vec![]), parse_coordinates("  ", false));
        assert!(parse_coordinates("-48.87", false).is_err());
        assert!(parse_coordinates("-48.87,abc", false).is_err());

        Ok(())
    }
}
