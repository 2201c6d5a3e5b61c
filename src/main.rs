//! timeline2geotag cli - Geotag photos from a location history timeline

use std::fs::{self, File};
use std::io::BufWriter;

use argopt::{cmd_group, subcmd};
use csv::ReaderBuilder;
use serde::Deserialize;
use time::format_description::well_known;
use time::OffsetDateTime;

use timeline2geotag::{
    CsvSource, ExifCsvWriter, FieldsConfiguration, Geotagger, GpxGenerator, KmlSource,
    RecordsConfiguration, RecordsSource, Track, TrackSource,
};

/// CLI of timeline2geotag - Find the position of your photos on your location history
#[cmd_group(commands = [kml, csv, locate])]
fn main() -> Result<(), String> {}

/// Geotag photos with a Google Timeline KML file
#[subcmd]
fn kml(
    /// KML file source
    kml_path: String,
    /// Photos metadata, output of `exiftool -csv -DateTimeOriginal -CreateDate -ModifyDate -TimeZone <dir>`
    records_path: String,
    /// CSV path file destination, import with `exiftool -csv=<destination> <dir>`
    destination: String,
    /// Also write the tagged photos as GPX waypoints
    #[opt(long)]
    gpx: Option<String>,
    /// Fields and records configuration. Default: .timeline2geotag.yaml, ~/.timeline2geotag.yaml
    #[opt(long)]
    config: Option<String>,
) -> Result<(), String> {
    init_logging();

    let conf = load_configs(config);

    let xml = fs::read_to_string(kml_path)
        .map_err(|e| format!("Failed on read the KML file: {}", e))?;
    let source = KmlSource::new(xml, conf.fields.flip_coordinates);

    run(source, conf.records, records_path, destination, gpx)
}

/// Geotag photos with a CSV file of segments
#[subcmd]
fn csv(
    /// CSV file source, one segment per row
    csv_path: String,
    /// Photos metadata, output of `exiftool -csv -DateTimeOriginal -CreateDate -ModifyDate -TimeZone <dir>`
    records_path: String,
    /// CSV path file destination, import with `exiftool -csv=<destination> <dir>`
    destination: String,
    /// Also write the tagged photos as GPX waypoints
    #[opt(long)]
    gpx: Option<String>,
    /// Fields and records configuration. Default: .timeline2geotag.yaml, ~/.timeline2geotag.yaml
    #[opt(long)]
    config: Option<String>,
) -> Result<(), String> {
    init_logging();

    let conf = load_configs(config);

    let csv = File::open(csv_path).map_err(|e| format!("Failed on open the CSV file: {}", e))?;
    let rcsv = ReaderBuilder::new().flexible(true).from_reader(csv);
    let source = CsvSource::new(rcsv, Some(conf.fields));

    run(source, conf.records, records_path, destination, gpx)
}

/// Print the position of an instant on a Google Timeline KML file
#[subcmd]
fn locate(
    /// KML file source
    kml_path: String,
    /// Instant, RFC3339 format
    time: String,
    /// Fields and records configuration. Default: .timeline2geotag.yaml, ~/.timeline2geotag.yaml
    #[opt(long)]
    config: Option<String>,
) -> Result<(), String> {
    init_logging();

    let conf = load_configs(config);

    let time = OffsetDateTime::parse(&time, &well_known::Rfc3339)
        .map_err(|e| format!("Failed on parse the time: {}", e))?;

    let xml = fs::read_to_string(kml_path)
        .map_err(|e| format!("Failed on read the KML file: {}", e))?;
    let mut source = KmlSource::new(xml, conf.fields.flip_coordinates);
    let track = Track::build(source.fetch()?).map_err(|e| e.to_string())?;

    match track.locate(time) {
        Some(loc) => println!(
            "{}, {} ({})",
            loc.point.lat,
            loc.point.lng,
            loc.label.unwrap_or("-")
        ),
        None => println!("not found"),
    }

    Ok(())
}

/// Track source -> track -> records -> tagged outputs
fn run<SU>(
    mut source: SU,
    records_conf: RecordsConfiguration,
    records_path: String,
    destination: String,
    gpx_destination: Option<String>,
) -> Result<(), String>
where
    SU: TrackSource,
{
    let track = Track::build(source.fetch()?).map_err(|e| e.to_string())?;
    if let Some((start, end)) = track.time_range() {
        log::info!("Track with {} segments, from {} to {}", track.len(), start, end);
    } else {
        log::warn!("Empty track, no photo will be tagged");
    }

    let records = File::open(records_path)
        .map_err(|e| format!("Failed on open the records file: {}", e))?;
    let rrecords = ReaderBuilder::new().flexible(true).from_reader(records);
    let records = RecordsSource::new(rrecords, records_conf)?.fetch()?;

    let report = Geotagger::new(&track).tag(records);
    log::info!(
        "{} photos tagged, {} skipped",
        report.tagged.len(),
        report.skipped.len()
    );

    let destination = File::create(destination)
        .map_err(|e| format!("Failed on create the destination file: {}", e))?;
    ExifCsvWriter::new(BufWriter::new(destination)).write(&report.tagged)?;

    if let Some(gpx_path) = gpx_destination {
        let destination = File::create(gpx_path)
            .map_err(|e| format!("Failed on create the GPX file: {}", e))?;

        let doc = GpxGenerator::from_tagged(&report.tagged).generate()?;

        let mut writer = BufWriter::new(destination);
        gpx::write(&doc, &mut writer).map_err(|e| e.to_string())?;
    }

    Ok(())
}

fn init_logging() {
    let env = env_logger::Env::default().default_filter_or("info");
    // a second subcommand call in the same process keeps the first logger
    let _ = env_logger::Builder::from_env(env).try_init();
}

/// Load the current config
fn load_configs(provided: Option<String>) -> Configs {
    let mut options = vec![];

    if let Some(sprovided) = provided {
        options.push(sprovided);
    }

    options.push(".timeline2geotag.yaml".to_string());

    if let Some(home) = dirs::home_dir() {
        if let Some(shome) = home.to_str() {
            options.push(format!("{}/.timeline2geotag.yaml", shome));
        }
    }

    let mut yaml: Option<(String, String)> = None;
    for fi in options {
        if let Ok(s) = fs::read_to_string(&fi) {
            yaml = Some((fi, s));
            break;
        }
    }

    if let Some((fi, s)) = yaml {
        match serde_yaml::from_str::<Configs>(&s) {
            Ok(conf) => {
                log::debug!("Using config {}", fi);
                return conf;
            }
            Err(e) => log::warn!("Ignoring config {}: {}", fi, e),
        }
    }

    Configs::default()
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
struct Configs {
    pub fields: FieldsConfiguration,
    pub records: RecordsConfiguration,
}

#[test]
fn parse_configs() -> Result<(), String> {
    let yaml = "\nfields:\nrecords:";

    let conf: Configs = serde_yaml::from_str(yaml).map_err(|e| e.to_string())?;

    assert_eq!(Configs::default(), conf);

    let yaml = "\nfields:\n  start: begin\n  flip_coordinates: true\nrecords:\n  extensions: [heic]\n  default_offset: \"-03:00\"";

    let conf: Configs = serde_yaml::from_str(yaml).map_err(|e| e.to_string())?;

    assert_eq!(
        Configs {
            fields: FieldsConfiguration {
                start: "begin".to_string(),
                end: "end".to_string(),
                coordinates: "coordinates".to_string(),
                name: "name".to_string(),
                flip_coordinates: true,
            },
            records: RecordsConfiguration {
                extensions: vec!["heic".to_string()],
                default_offset: Some("-03:00".to_string()),
            },
        },
        conf
    );

    Ok(())
}
