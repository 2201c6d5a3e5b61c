//! Photo records from an exiftool CSV dump
//!
//! Expects the output of
//! `exiftool -csv -DateTimeOriginal -CreateDate -ModifyDate -TimeZone <dir>`.

pub mod timestamp;

use std::io::Read;
use std::path::Path;

use csv::Reader;
use serde::Deserialize;
use time::{OffsetDateTime, UtcOffset};

use timestamp::{parse_exif_datetime, parse_zone_offset, resolve_utc};

/// Photo needing a position
#[derive(Clone, Debug, PartialEq)]
pub struct PhotoRecord {
    pub source_file: String,
    /// Capture instant, `None` if the metadata had no usable time
    pub time: Option<OffsetDateTime>,
}

/// Records filtering and time resolution options
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct RecordsConfiguration {
    /// Accepted file extensions, case insensitive
    pub extensions: Vec<String>,
    /// Offset of the camera clock when the file has no time zone, eg.: `-03:00`
    pub default_offset: Option<String>,
}

impl Default for RecordsConfiguration {
    fn default() -> Self {
        Self {
            extensions: ["jpg", "png", "tiff", "cr2", "raw", "dng"]
                .iter()
                .map(|e| e.to_string())
                .collect(),
            default_offset: None,
        }
    }
}

impl RecordsConfiguration {
    pub fn accepts(&self, source_file: &str) -> bool {
        let ext = match Path::new(source_file).extension().and_then(|e| e.to_str()) {
            Some(e) => e.to_lowercase(),
            None => return false,
        };

        self.extensions
            .iter()
            .any(|e| e.trim_start_matches('.').to_lowercase() == ext)
    }
}

#[derive(Debug, Deserialize)]
struct ExifRow {
    #[serde(rename = "SourceFile")]
    source_file: String,
    #[serde(rename = "DateTimeOriginal", default)]
    date_time_original: Option<String>,
    #[serde(rename = "CreateDate", default)]
    create_date: Option<String>,
    #[serde(rename = "ModifyDate", default)]
    modify_date: Option<String>,
    #[serde(rename = "TimeZone", default)]
    time_zone: Option<String>,
}

/// exiftool CSV records source
pub struct RecordsSource<T>
where
    T: Read,
{
    rdr: Reader<T>,
    config: RecordsConfiguration,
    default_offset: UtcOffset,
}

impl<T> RecordsSource<T>
where
    T: Read,
{
    pub fn new(rdr: Reader<T>, config: RecordsConfiguration) -> Result<Self, String> {
        let default_offset = match &config.default_offset {
            Some(off) => parse_zone_offset(off)?,
            None => UtcOffset::UTC,
        };

        Ok(Self {
            rdr,
            config,
            default_offset,
        })
    }

    /// Read the accepted records, sorted by file name
    pub fn fetch(&mut self) -> Result<Vec<PhotoRecord>, String> {
        let mut records = vec![];

        for row in self.rdr.deserialize::<ExifRow>() {
            let row = row.map_err(|e| format!("Failed on read some row: {}", e))?;

            if !self.config.accepts(&row.source_file) {
                log::debug!("Ignoring {}, extension not accepted", row.source_file);
                continue;
            }

            let time = match Self::resolve_time(self.default_offset, &row) {
                Ok(t) => t,
                Err(e) => {
                    log::warn!("Invalid timestamp for {}: {}", row.source_file, e);
                    None
                }
            };

            records.push(PhotoRecord {
                source_file: row.source_file,
                time,
            });
        }

        records.sort_by(|a, b| a.source_file.cmp(&b.source_file));

        Ok(records)
    }

    fn resolve_time(default_offset: UtcOffset, row: &ExifRow) -> Result<Option<OffsetDateTime>, String> {
        let raw = [&row.date_time_original, &row.create_date, &row.modify_date]
            .into_iter()
            .flatten()
            .map(|s| s.trim())
            .find(|s| !s.is_empty());
        let raw = match raw {
            Some(r) => r,
            None => return Ok(None),
        };

        let (local, embedded) = parse_exif_datetime(raw)?;

        let offset = match (embedded, row.time_zone.as_deref().map(str::trim)) {
            (Some(off), _) => off,
            (None, Some(zone)) if !zone.is_empty() => parse_zone_offset(zone)?,
            _ => default_offset,
        };

        Ok(Some(resolve_utc(local, offset)))
    }
}
