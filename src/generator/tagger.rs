//! Photo geotagging pipeline

use time::OffsetDateTime;

use crate::records::PhotoRecord;
use crate::track::{Track, Waypoint};

/// Photo with the position found on the track
#[derive(Clone, Debug, PartialEq)]
pub struct TaggedRecord {
    pub source_file: String,
    pub time: OffsetDateTime,
    pub point: Waypoint,
    /// Label of the segment, eg.: `Walking`, `Home`
    pub label: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    MissingTimestamp,
    OutsideTrack,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SkippedRecord {
    pub source_file: String,
    pub reason: SkipReason,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TagReport {
    pub tagged: Vec<TaggedRecord>,
    pub skipped: Vec<SkippedRecord>,
}

pub struct Geotagger<'a> {
    track: &'a Track,
}

impl<'a> Geotagger<'a> {
    pub fn new(track: &'a Track) -> Self {
        Self { track }
    }

    /// Locate every record, in the given order
    pub fn tag(&self, records: Vec<PhotoRecord>) -> TagReport {
        let mut report = TagReport::default();

        for rec in records {
            let time = match rec.time {
                Some(t) => t,
                None => {
                    log::warn!("Missing timestamp for {}, skipped", rec.source_file);
                    report.skipped.push(SkippedRecord {
                        source_file: rec.source_file,
                        reason: SkipReason::MissingTimestamp,
                    });
                    continue;
                }
            };

            match self.track.locate(time) {
                Some(loc) => {
                    log::info!(
                        "Tagging {} @ {}: ({}, {})",
                        rec.source_file,
                        time,
                        loc.point.lat,
                        loc.point.lng
                    );
                    report.tagged.push(TaggedRecord {
                        source_file: rec.source_file,
                        time,
                        point: loc.point,
                        label: loc.label.map(|l| l.to_string()),
                    });
                }
                None => {
                    log::info!("No segment for {} @ {}, skipped", rec.source_file, time);
                    report.skipped.push(SkippedRecord {
                        source_file: rec.source_file,
                        reason: SkipReason::OutsideTrack,
                    });
                }
            }
        }

        report
    }
}
