//! Capture time resolution

use time::macros::format_description;
use time::{Duration, OffsetDateTime, PrimitiveDateTime, UtcOffset};

/// Parse the exif `YYYY:MM:DD hh:mm:ss[.fff][±hh:mm|Z]` date time
///
/// Returns the local date time and the offset, when embedded.
pub fn parse_exif_datetime(raw: &str) -> Result<(PrimitiveDateTime, Option<UtcOffset>), String> {
    let raw = raw.trim();
    let base = raw
        .get(..19)
        .ok_or_else(|| format!("Date time too short: `{}`", raw))?;
    let mut rest = raw.get(19..).unwrap_or("");

    let mut local = PrimitiveDateTime::parse(
        base,
        format_description!("[year]:[month]:[day] [hour]:[minute]:[second]"),
    )
    .map_err(|e| format!("Failed on parse the date time `{}`: {}", raw, e))?;

    if let Some(frac) = rest.strip_prefix('.') {
        let len = frac
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(frac.len());
        let digits = &frac[..len];

        if !digits.is_empty() {
            let padded = format!("{:0<9}", &digits[..digits.len().min(9)]);
            let nanos = padded
                .parse::<i64>()
                .map_err(|e| format!("Invalid sub seconds `{}`: {}", digits, e))?;
            local += Duration::nanoseconds(nanos);
        }

        rest = &frac[len..];
    }

    let offset = match rest.trim() {
        "" => None,
        zone => Some(parse_zone_offset(zone)?),
    };

    Ok((local, offset))
}

/// Parse a `±hh:mm`, `±hhmm` or `Z` zone offset
pub fn parse_zone_offset(raw: &str) -> Result<UtcOffset, String> {
    let raw = raw.trim();
    if raw == "Z" {
        return Ok(UtcOffset::UTC);
    }

    UtcOffset::parse(
        raw,
        format_description!("[offset_hour sign:mandatory]:[offset_minute]"),
    )
    .or_else(|_| {
        UtcOffset::parse(
            raw,
            format_description!("[offset_hour sign:mandatory][offset_minute]"),
        )
    })
    .map_err(|e| format!("Failed on parse the zone offset `{}`: {}", raw, e))
}

/// UTC instant of a local date time taken at `offset`
///
/// The signed offset is applied as a whole: `-03:30` moves the instant 3h30m forward.
pub fn resolve_utc(local: PrimitiveDateTime, offset: UtcOffset) -> OffsetDateTime {
    local.assume_offset(offset).to_offset(UtcOffset::UTC)
}

#[cfg(test)]
mod tests {
    use time::macros::{datetime, offset};

    use super::*;

    #[test]
    fn exif_datetime() -> Result<(), String> {
        assert_eq!(
            (datetime!(2019-10-01 12:30:15), None),
            parse_exif_datetime("2019:10:01 12:30:15")?
        );
        assert_eq!(
            (datetime!(2019-10-01 12:30:15.25), Some(offset!(-3))),
            parse_exif_datetime("2019:10:01 12:30:15.25-03:00")?
        );
        assert_eq!(
            (datetime!(2019-10-01 12:30:15), Some(UtcOffset::UTC)),
            parse_exif_datetime(" 2019:10:01 12:30:15Z ")?
        );

        assert!(parse_exif_datetime("2019:10:01").is_err());
        assert!(parse_exif_datetime("0000:00:00 00:00:00").is_err());
        assert!(parse_exif_datetime("2019-10-01T12:30:15").is_err());

        Ok(())
    }

    #[test]
    fn zone_offset() -> Result<(), String> {
        assert_eq!(offset!(+9), parse_zone_offset("+09:00")?);
        assert_eq!(offset!(-5:30), parse_zone_offset("-05:30")?);
        assert_eq!(offset!(+5:45), parse_zone_offset("+0545")?);
        assert_eq!(UtcOffset::UTC, parse_zone_offset("Z")?);
        assert!(parse_zone_offset("09:00").is_err());

        Ok(())
    }

    #[test]
    fn signed_offset() {
        // negative hours and minutes move together
        assert_eq!(
            datetime!(2019-10-01 16:00 UTC),
            resolve_utc(datetime!(2019-10-01 12:30), offset!(-3:30))
        );
        assert_eq!(
            datetime!(2019-09-30 23:00 UTC),
            resolve_utc(datetime!(2019-10-01 8:00), offset!(+9))
        );
        assert_eq!(
            datetime!(2019-10-01 8:00 UTC),
            resolve_utc(datetime!(2019-10-01 8:00), UtcOffset::UTC)
        );
    }
}
