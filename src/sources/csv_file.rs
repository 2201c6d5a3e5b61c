//! CSV file source integration

use std::io::Read;

use csv::{Reader, StringRecord};
use time::format_description::well_known;
use time::OffsetDateTime;

use super::{parse_coordinates, FieldsConfiguration, TrackSource};
use crate::track::RawSegment;

/// CSV segments source
///
/// One row per segment: start, end, coordinates list and an optional name.
pub struct CsvSource<T>
where
    T: Read,
{
    rdr: Reader<T>,
    fields: FieldsConfiguration,
}

impl<T> CsvSource<T>
where
    T: Read,
{
    pub fn new(rdr: Reader<T>, fields: Option<FieldsConfiguration>) -> Self {
        Self {
            rdr,
            fields: fields.unwrap_or_default(),
        }
    }
}

impl<T> TrackSource for CsvSource<T>
where
    T: Read,
{
    fn fetch(&mut self) -> Result<Vec<RawSegment>, String> {
        let mut segs = vec![];

        let mut header = self
            .rdr
            .headers()
            .map_err(|e| format!("Failed on read the header: {}", e))?
            .clone();
        let header_idx = parse_header(&self.fields, &mut header)?;

        for row in self.rdr.records() {
            let mut rec = row.map_err(|e| format!("Failed on read some row: {}", e))?;

            if rec.len() < 3 {
                continue;
            }

            let seg = parse_row(&header_idx, &self.fields, &mut rec)
                .map_err(|e| format!("Error with row {:?}: {}", rec, e))?;

            segs.push(seg);
        }

        log::info!("{} segments read from the CSV", segs.len());

        Ok(segs)
    }
}

/// Field to index map
#[derive(Debug)]
struct FieldsIndex {
    start: usize,
    end: usize,
    coordinates: usize,
    name: Option<usize>,
}

fn parse_header(
    fields: &FieldsConfiguration,
    header: &mut StringRecord,
) -> Result<FieldsIndex, String> {
    header.trim();

    let find = |name: &str| {
        header
            .iter()
            .position(|h| h.to_lowercase() == name.to_lowercase())
    };

    let start = find(&fields.start).ok_or("Start header not found")?;
    let end = find(&fields.end).ok_or("End header not found")?;
    let coordinates = find(&fields.coordinates).ok_or("Coordinates header not found")?;
    let name = find(&fields.name);

    Ok(FieldsIndex {
        start,
        end,
        coordinates,
        name,
    })
}

fn parse_time(row: &StringRecord, idx: usize, field: &str) -> Result<OffsetDateTime, String> {
    match row.get(idx) {
        Some(d) => OffsetDateTime::parse(d, &well_known::Rfc3339)
            .map_err(|e| format!("Failed on parse the {} time: {}", field, e)),
        None => Err(format!("{} field not found", field)),
    }
}

fn parse_row(
    header: &FieldsIndex,
    fields: &FieldsConfiguration,
    row: &mut StringRecord,
) -> Result<RawSegment, String> {
    row.trim();

    let start = parse_time(row, header.start, "start")?;
    let end = parse_time(row, header.end, "end")?;

    let raw_coordinates = row
        .get(header.coordinates)
        .ok_or("Coordinates field not found")?;
    let points = parse_coordinates(raw_coordinates, fields.flip_coordinates)?;

    let name = header
        .name
        .and_then(|iname| row.get(iname))
        .filter(|d| !d.is_empty())
        .map(|d| d.to_string());

    Ok(RawSegment {
        start,
        end,
        points,
        name,
    })
}

#[cfg(test)]
pub mod tests {
    use csv::ReaderBuilder;
    use time::macros::datetime;

    use super::CsvSource;
    use crate::sources::{FieldsConfiguration, TrackSource};
    use crate::track::Waypoint;

    #[test]
    fn segments() -> Result<(), String> {
        let data = "start,end,coordinates,name
2019-10-01T00:00:00Z,2019-10-01T08:00:00Z,\"-48.8702222,-26.31832\",Home
2019-10-01T08:00:00Z,2019-10-01T08:30:00Z,\"-48.8702222,-26.31832,0 -48.8619776,-26.3185919,0\",
";
        let rdr = ReaderBuilder::new()
            .flexible(true)
            .from_reader(data.as_bytes());

        let segs = CsvSource::new(rdr, None).fetch()?;
        assert_eq!(2, segs.len());

        assert_eq!(Some("Home".to_string()), segs[0].name);
        assert_eq!(datetime!(2019-10-01 0:00 UTC), segs[0].start);
        assert_eq!(vec![Waypoint::new(-26.31832, -48.8702222)], segs[0].points);

        assert_eq!(None, segs[1].name);
        assert_eq!(datetime!(2019-10-01 8:30 UTC), segs[1].end);
        assert_eq!(2, segs[1].points.len());

        Ok(())
    }

    #[test]
    fn custom_fields() -> Result<(), String> {
        let data = "Begin , Finish, Path
2019-10-01T00:00:00-03:00,2019-10-01T01:00:00-03:00,\"-26.31832,-48.8702222\"
short,row
";
        let rdr = ReaderBuilder::new()
            .flexible(true)
            .from_reader(data.as_bytes());

        let fields = FieldsConfiguration {
            start: "begin".to_string(),
            end: "finish".to_string(),
            coordinates: "path".to_string(),
            flip_coordinates: true,
            ..FieldsConfiguration::default()
        };

        let segs = CsvSource::new(rdr, Some(fields)).fetch()?;
        assert_eq!(1, segs.len());
        assert_eq!(datetime!(2019-10-01 3:00 UTC), segs[0].start);
        assert_eq!(vec![Waypoint::new(-26.31832, -48.8702222)], segs[0].points);
        assert_eq!(None, segs[0].name);

        Ok(())
    }

    #[test]
    fn missing_header() {
        let data = "start,coordinates\n2019-10-01T00:00:00Z,\"1,1\"\n";
        let rdr = ReaderBuilder::new().from_reader(data.as_bytes());

        assert_eq!(
            Err("End header not found".to_string()),
            CsvSource::new(rdr, None).fetch()
        );
    }

    #[test]
    fn invalid_time() {
        let data = "start,end,coordinates\nnow,2019-10-01T00:00:00Z,\"1,1\"\n";
        let rdr = ReaderBuilder::new().from_reader(data.as_bytes());

        assert!(CsvSource::new(rdr, None).fetch().is_err());
    }
}
