//! Outputs of the geotagging

pub mod exif_csv;
pub mod gpx;
pub mod tagger;
