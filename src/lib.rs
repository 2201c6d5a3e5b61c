//! timeline2geotag - Geotag photos from a location history timeline

mod generator;
mod locator;
mod records;
mod sources;
mod track;

pub use generator::exif_csv::ExifCsvWriter;
pub use generator::gpx::GpxGenerator;
pub use generator::tagger::{Geotagger, SkipReason, SkippedRecord, TagReport, TaggedRecord};
pub use locator::interpolate::{elapsed_fraction, interpolate, lerp};
pub use locator::{locate, Location};
pub use records::timestamp::{parse_exif_datetime, parse_zone_offset, resolve_utc};
pub use records::{PhotoRecord, RecordsConfiguration, RecordsSource};
pub use sources::{CsvSource, FieldsConfiguration, KmlSource, TrackSource};
pub use track::{MalformedTrackError, RawSegment, Segment, Track, Waypoint};
