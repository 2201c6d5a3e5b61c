//! Google Timeline KML source integration

use roxmltree::{Document, Node};
use time::format_description::well_known;
use time::OffsetDateTime;

use super::{parse_coordinates, TrackSource};
use crate::track::RawSegment;

/// KML location history source
///
/// Each `Placemark` with a `TimeSpan` and a `Point` or `LineString` becomes a segment.
pub struct KmlSource {
    xml: String,
    flip_coordinates: bool,
}

impl KmlSource {
    pub fn new(xml: String, flip_coordinates: bool) -> Self {
        Self {
            xml,
            flip_coordinates,
        }
    }
}

impl TrackSource for KmlSource {
    fn fetch(&mut self) -> Result<Vec<RawSegment>, String> {
        let doc = Document::parse(&self.xml)
            .map_err(|e| format!("Failed on parse the KML: {}", e))?;

        let mut segs = vec![];

        for (i, placemark) in doc
            .descendants()
            .filter(|n| n.has_tag_name("Placemark"))
            .enumerate()
        {
            match parse_placemark(placemark, self.flip_coordinates) {
                Ok(Some(seg)) => segs.push(seg),
                Ok(None) => log::warn!("Placemark {} without time span or geometry, skipped", i),
                Err(e) => return Err(format!("Error with placemark {}: {}", i, e)),
            }
        }

        log::info!("{} segments read from the KML", segs.len());

        Ok(segs)
    }
}

fn child_text<'a>(node: Node<'a, '_>, tag: &str) -> Option<&'a str> {
    node.children()
        .find(|n| n.has_tag_name(tag))
        .and_then(|n| n.text())
        .map(|s| s.trim())
}

fn parse_time(raw: &str) -> Result<OffsetDateTime, String> {
    OffsetDateTime::parse(raw, &well_known::Rfc3339)
        .map_err(|e| format!("Failed on parse the time `{}`: {}", raw, e))
}

fn parse_placemark(placemark: Node, flip: bool) -> Result<Option<RawSegment>, String> {
    let timespan = match placemark.children().find(|n| n.has_tag_name("TimeSpan")) {
        Some(ts) => ts,
        None => return Ok(None),
    };

    let start = parse_time(child_text(timespan, "begin").ok_or("TimeSpan without begin")?)?;
    let end = parse_time(child_text(timespan, "end").ok_or("TimeSpan without end")?)?;

    // A top level Point is a visit, otherwise follow the first line of the movement
    let geometry = placemark
        .children()
        .find(|n| n.has_tag_name("Point"))
        .or_else(|| placemark.descendants().find(|n| n.has_tag_name("LineString")))
        .or_else(|| placemark.descendants().find(|n| n.has_tag_name("Point")));
    let geometry = match geometry {
        Some(g) => g,
        None => return Ok(None),
    };

    let points = parse_coordinates(child_text(geometry, "coordinates").unwrap_or(""), flip)?;

    let name = child_text(placemark, "name")
        .filter(|n| !n.is_empty())
        .map(|n| n.to_string());

    Ok(Some(RawSegment {
        start,
        end,
        points,
        name,
    }))
}
