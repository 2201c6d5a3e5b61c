//! GPX generator API

use std::path::Path;

use gpx::{Gpx, GpxVersion, Waypoint};

use super::tagger::TaggedRecord;

pub struct GpxGenerator {
    pub waypoints: Vec<Waypoint>,
}

impl GpxGenerator {
    pub fn empty() -> Self {
        Self { waypoints: vec![] }
    }

    /// One waypoint per tagged photo
    pub fn from_tagged(tagged: &[TaggedRecord]) -> Self {
        let mut generator = Self::empty();

        for rec in tagged {
            let mut wp = Waypoint::new(rec.point.into());

            let name = Path::new(&rec.source_file)
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or(&rec.source_file);
            wp.name = Some(name.to_string());
            wp.time = Some(rec.time.into());
            wp.description = rec.label.clone();

            generator.waypoints.push(wp);
        }

        generator
    }

    pub fn generate(self) -> Result<Gpx, String> {
        let mut gpx: Gpx = Default::default();
        gpx.version = GpxVersion::Gpx11;
        gpx.creator = Some("timeline2geotag".to_string());
        gpx.waypoints = self.waypoints;

        Ok(gpx)
    }
}
