// src/gps/nmea.rs
//! NMEA sentence parsing

use chrono::NaiveTime;
use nmea::sentences::GgaData;
use nmea::{parse_str, ParseResult};

use super::track::Fix;

/// Why a raw line was not turned into a [`Fix`].
///
/// None of these are errors from the session's point of view; rejected
/// lines are skipped and never propagate past this module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Not a well-formed NMEA sentence: bad framing, a missing or
    /// mismatching checksum, or fields the decoder cannot make sense of.
    Structural,
    /// Well-formed sentence of a family that carries no altitude fix
    /// (RMC, VTG, GSV, ...).
    UnsupportedType,
    /// GGA sentence with latitude, longitude or altitude absent.
    MissingField,
}

/// Parse one raw line into a position fix.
///
/// Accepts the GGA family under any talker prefix (GPGGA, GNGGA, ...).
/// Pure function over its input: every failure comes back as a
/// [`Rejection`], never a panic.
pub fn parse_sentence(raw: &str) -> Result<Fix, Rejection> {
    let line = raw.trim();
    if line.is_empty() {
        return Err(Rejection::Structural);
    }
    match parse_str(line) {
        Ok(ParseResult::GGA(gga)) => fix_from_gga(gga),
        Ok(_) => Err(Rejection::UnsupportedType),
        Err(_) => Err(Rejection::Structural),
    }
}

fn fix_from_gga(gga: GgaData) -> Result<Fix, Rejection> {
    let latitude = gga.latitude.ok_or(Rejection::MissingField)?;
    let longitude = gga.longitude.ok_or(Rejection::MissingField)?;
    // a receiver without a full fix reports an empty altitude field;
    // such sentences are dropped rather than stored as partial fixes
    let altitude = gga.altitude.map(f64::from).ok_or(Rejection::MissingField)?;

    Ok(Fix {
        time: format_time_of_day(gga.fix_time),
        latitude,
        longitude,
        altitude,
    })
}

/// Zero-padded `HH:MM:SS`, or empty when the sentence carried no time.
fn format_time_of_day(time: Option<NaiveTime>) -> String {
    time.map(|t| t.format("%H:%M:%S").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    const GPGGA: &str = "$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47";
    const GNGGA: &str = "$GNGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*59";
    const GPRMC: &str = "$GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*6A";
    const GPVTG: &str = "$GPVTG,054.7,T,034.4,M,005.5,N,010.2,K*48";

    #[test]
    fn test_gpgga_parsing() {
        let fix = parse_sentence(GPGGA).expect("canonical GGA sentence must parse");

        assert_eq!(fix.time, "12:35:19");
        assert!((fix.latitude - 48.1173).abs() < 1e-4);
        assert!((fix.longitude - 11.5167).abs() < 1e-4);
        assert!((fix.altitude - 545.4).abs() < 1e-3);
    }

    #[test]
    fn test_gga_accepted_for_other_talkers() {
        let fix = parse_sentence(GNGGA).expect("GNGGA must parse like GPGGA");
        assert!((fix.altitude - 545.4).abs() < 1e-3);
    }

    #[test]
    fn test_leading_whitespace_tolerated() {
        assert!(parse_sentence(&format!("  {}\r\n", GPGGA)).is_ok());
    }

    #[test]
    fn test_non_gga_sentences_rejected() {
        assert_eq!(parse_sentence(GPRMC), Err(Rejection::UnsupportedType));
        assert_eq!(parse_sentence(GPVTG), Err(Rejection::UnsupportedType));
    }

    #[test]
    fn test_empty_line_rejected() {
        assert_eq!(parse_sentence(""), Err(Rejection::Structural));
        assert_eq!(parse_sentence("   \r\n"), Err(Rejection::Structural));
    }

    #[test]
    fn test_garbage_rejected_without_panic() {
        for line in [
            "not an nmea sentence",
            "$",
            "$GPGGA",
            "\u{00bf}\u{00fe}binary\u{0001}garbage",
            "$INVALID,123,456",
        ] {
            assert_eq!(parse_sentence(line), Err(Rejection::Structural));
        }
    }

    #[test]
    fn test_oversized_line_rejected() {
        let line = format!("$GPGGA,{}", "9".repeat(300));
        assert_eq!(parse_sentence(&line), Err(Rejection::Structural));
    }

    #[test]
    fn test_checksum_mismatch_rejected() {
        // same body as the canonical sentence, checksum off by one
        let line = GPGGA.replace("*47", "*48");
        assert_eq!(parse_sentence(&line), Err(Rejection::Structural));
    }

    #[test]
    fn test_missing_checksum_rejected() {
        let line = GPGGA.replace("*47", "");
        assert_eq!(parse_sentence(&line), Err(Rejection::Structural));
    }

    #[test]
    fn test_blank_altitude_rejected() {
        let line = "$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,,M,46.9,M,,*69";
        assert_eq!(parse_sentence(line), Err(Rejection::MissingField));
    }

    #[test]
    fn test_no_fix_sentence_rejected() {
        let line = "$GPGGA,,,,,,0,00,,,M,,M,,*66";
        assert_eq!(parse_sentence(line), Err(Rejection::MissingField));
    }

    #[test]
    fn test_missing_time_is_tolerated() {
        let line = "$GPGGA,,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*4A";
        let fix = parse_sentence(line).expect("time is optional");
        assert_eq!(fix.time, "");
        assert!((fix.latitude - 48.1173).abs() < 1e-4);
    }
}
