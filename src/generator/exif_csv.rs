//! exiftool import CSV generator
//!
//! The output is applied with `exiftool -csv=<file> <dir>`.

use std::io::Write;

use serde::Serialize;

use super::tagger::TaggedRecord;

const HEADER: [&str; 5] = [
    "SourceFile",
    "GPSLatitude",
    "GPSLatitudeRef",
    "GPSLongitude",
    "GPSLongitudeRef",
];

#[derive(Debug, Serialize)]
struct GpsRow<'a> {
    #[serde(rename = "SourceFile")]
    source_file: &'a str,
    #[serde(rename = "GPSLatitude")]
    latitude: f64,
    #[serde(rename = "GPSLatitudeRef")]
    latitude_ref: &'static str,
    #[serde(rename = "GPSLongitude")]
    longitude: f64,
    #[serde(rename = "GPSLongitudeRef")]
    longitude_ref: &'static str,
}

impl<'a> From<&'a TaggedRecord> for GpsRow<'a> {
    fn from(rec: &'a TaggedRecord) -> Self {
        Self {
            source_file: &rec.source_file,
            latitude: rec.point.lat.abs(),
            latitude_ref: if rec.point.lat < 0.0 { "S" } else { "N" },
            longitude: rec.point.lng.abs(),
            longitude_ref: if rec.point.lng < 0.0 { "W" } else { "E" },
        }
    }
}

pub struct ExifCsvWriter<W: Write> {
    wtr: csv::Writer<W>,
    header_written: bool,
}

impl<W: Write> ExifCsvWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            // header is written by hand, so an empty output still has it
            wtr: csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(writer),
            header_written: false,
        }
    }

    pub fn write(&mut self, tagged: &[TaggedRecord]) -> Result<(), String> {
        if !self.header_written {
            self.wtr
                .write_record(HEADER)
                .map_err(|e| format!("Failed on write the header: {}", e))?;
            self.header_written = true;
        }

        for rec in tagged {
            self.wtr
                .serialize(GpsRow::from(rec))
                .map_err(|e| format!("Failed on write {}: {}", rec.source_file, e))?;
        }

        self.wtr
            .flush()
            .map_err(|e| format!("Failed on flush the CSV: {}", e))
    }

    pub fn into_inner(self) -> Result<W, String> {
        self.wtr
            .into_inner()
            .map_err(|e| format!("Failed on finish the CSV: {}", e))
    }
}
