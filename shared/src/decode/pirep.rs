//! PIREP decoder
//!
//! `[station] UA|UUA /OV ... /TM ... /FL ... /TP ... /TB ... /IC ... /RM ...`
//! Each slash field is read on its own; unknown field keys are skipped.

use crate::error::ParseError;
use crate::models::{
    AltitudeBand, DecodedPirep, HazardObservation, PirepTime, PirepWind, Severity, Urgency,
};
use crate::validation::is_station_id;

use super::grammar::signed_celsius;

/// Qualifiers kept alongside a turbulence or icing severity
const HAZARD_KINDS: &[&str] = &["CHOP", "CAT", "LLWS", "RIME", "CLR", "MXD", "MX"];

pub fn decode_pirep(raw: &str) -> DecodedPirep {
    let text = raw.trim().to_ascii_uppercase();
    let mut pirep = DecodedPirep {
        raw: raw.trim().to_string(),
        ..Default::default()
    };

    let (header, fields) = split_fields(&text);

    let mut report_type = None;
    for token in header.split_whitespace() {
        match token {
            "UUA" => report_type = Some(Urgency::Urgent),
            "UA" => report_type = report_type.or(Some(Urgency::Routine)),
            station if is_station_id(station) && pirep.station.is_none() => {
                pirep.station = Some(station.to_string())
            }
            _ => {}
        }
    }
    match report_type {
        Some(urgency) => pirep.urgency = urgency,
        None => pirep.parse_errors.push(ParseError::missing("report type")),
    }

    for (key, value) in fields {
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        match key {
            "OV" => pirep.location = Some(value.to_string()),
            "TM" => match parse_time(value) {
                Some(time) => pirep.time = Some(time),
                None => pirep.parse_errors.push(ParseError::malformed(format!("/TM {value}"))),
            },
            "FL" => match value {
                "UNKN" | "DURC" | "DURD" => {}
                _ => match hundreds(value) {
                    Some(level) => pirep.altitude_ft = Some(level * 100),
                    None => pirep.parse_errors.push(ParseError::malformed(format!("/FL {value}"))),
                },
            },
            "TP" => pirep.aircraft_type = Some(value.to_string()),
            "TB" => match parse_hazard(value) {
                Some(observation) => pirep.conditions.turbulence = Some(observation),
                None => pirep.parse_errors.push(ParseError::malformed(format!("/TB {value}"))),
            },
            "IC" => match parse_hazard(value) {
                Some(observation) => pirep.conditions.icing = Some(observation),
                None => pirep.parse_errors.push(ParseError::malformed(format!("/IC {value}"))),
            },
            "WV" => match parse_wind(value) {
                Some(wind) => pirep.conditions.wind = Some(wind),
                None => pirep.parse_errors.push(ParseError::malformed(format!("/WV {value}"))),
            },
            "SK" => pirep.conditions.sky = Some(value.to_string()),
            "WX" => pirep.conditions.visibility = Some(value.to_string()),
            "TA" => match signed_celsius(value) {
                Some(celsius) => pirep.conditions.temperature_celsius = Some(celsius),
                None => pirep.parse_errors.push(ParseError::malformed(format!("/TA {value}"))),
            },
            "RM" => pirep.remarks = Some(value.to_string()),
            _ => {}
        }
    }

    if pirep.location.is_none() {
        pirep.parse_errors.push(ParseError::missing("location"));
    }
    pirep
}

/// Split at every `/XX` field key: a slash, two upper-case letters, then
/// whitespace, a digit or the end of the text. `BKN030/OVC050` is not a key.
fn split_fields(text: &str) -> (&str, Vec<(&str, &str)>) {
    let bytes = text.as_bytes();
    let starts: Vec<usize> = (0..bytes.len())
        .filter(|&i| {
            bytes[i] == b'/'
                && bytes.get(i + 1).is_some_and(u8::is_ascii_uppercase)
                && bytes.get(i + 2).is_some_and(u8::is_ascii_uppercase)
                && bytes
                    .get(i + 3)
                    .map_or(true, |b| b.is_ascii_whitespace() || b.is_ascii_digit())
        })
        .collect();

    let header = &text[..starts.first().copied().unwrap_or(text.len())];
    let fields = starts
        .iter()
        .enumerate()
        .map(|(n, &start)| {
            let end = starts.get(n + 1).copied().unwrap_or(text.len());
            (&text[start + 1..start + 3], &text[start + 3..end])
        })
        .collect();
    (header, fields)
}

fn hundreds(value: &str) -> Option<u32> {
    if value.len() != 3 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse().ok()
}

fn parse_time(value: &str) -> Option<PirepTime> {
    let value = value.strip_suffix('Z').unwrap_or(value);
    if value.len() != 4 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let hour: u8 = value[0..2].parse().ok()?;
    let minute: u8 = value[2..4].parse().ok()?;
    (hour < 24 && minute < 60).then_some(PirepTime { hour, minute })
}

/// `27045KT` or `270045`
fn parse_wind(value: &str) -> Option<PirepWind> {
    let value = value.split_whitespace().next()?;
    let value = value.strip_suffix("KT").unwrap_or(value);
    if value.len() < 5 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let direction_degrees: u16 = value[0..3].parse().ok()?;
    let speed_kt: u32 = value[3..].parse().ok()?;
    (direction_degrees <= 360).then_some(PirepWind {
        direction_degrees,
        speed_kt,
    })
}

/// Severity, optional qualifier and optional `lower-upper` altitude band.
/// Ranges such as `LGT-MOD` resolve to the higher severity.
fn parse_hazard(value: &str) -> Option<HazardObservation> {
    let mut severity: Option<Severity> = None;
    let mut kind = None;
    let mut altitude = None;

    for token in value.split_whitespace() {
        if let Some(band) = parse_band(token) {
            altitude = altitude.or(Some(band));
            continue;
        }
        let levels: Vec<Option<Severity>> = token.split('-').map(Severity::from_code).collect();
        if levels.iter().any(Option::is_some) {
            let highest = levels.into_iter().flatten().max();
            severity = severity.max(highest);
        } else if kind.is_none() && HAZARD_KINDS.contains(&token) {
            kind = Some(token.to_string());
        }
    }

    Some(HazardObservation {
        severity: severity?,
        kind,
        altitude,
        raw: value.to_string(),
    })
}

/// `060-080` or a single `080`, in hundreds of feet
fn parse_band(token: &str) -> Option<AltitudeBand> {
    match token.split_once('-') {
        Some((lower, upper)) => Some(AltitudeBand {
            lower_ft: hundreds(lower)? * 100,
            upper_ft: hundreds(upper)? * 100,
        }),
        None => hundreds(token).map(|h| AltitudeBand {
            lower_ft: h * 100,
            upper_ft: h * 100,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urgent_severe_turbulence() {
        let pirep = decode_pirep("UUA /OV ABC /TB SEV");
        assert_eq!(pirep.urgency, Urgency::Urgent);
        assert_eq!(pirep.location.as_deref(), Some("ABC"));
        let turbulence = pirep.conditions.turbulence.unwrap();
        assert_eq!(turbulence.severity, Severity::Severe);
        assert!(pirep.conditions.icing.is_none());
    }

    #[test]
    fn test_routine_full_report() {
        let pirep = decode_pirep(
            "JFK UA /OV JFK090020/TM 1516/FL350/TP B738/SK BKN030-TOP050 /WX FV05SM HZ \
             /TA M45 /WV 27045KT /TB LGT-MOD CHOP 330-370 /IC NEG /RM SMOOTH ABV",
        );
        assert_eq!(pirep.urgency, Urgency::Routine);
        assert_eq!(pirep.time, Some(PirepTime { hour: 15, minute: 16 }));
        assert_eq!(pirep.altitude_ft, Some(35_000));
        assert_eq!(pirep.aircraft_type.as_deref(), Some("B738"));
        assert_eq!(pirep.conditions.sky.as_deref(), Some("BKN030-TOP050"));
        assert_eq!(pirep.conditions.visibility.as_deref(), Some("FV05SM HZ"));
        assert_eq!(pirep.conditions.temperature_celsius, Some(-45));
        assert_eq!(
            pirep.conditions.wind,
            Some(PirepWind {
                direction_degrees: 270,
                speed_kt: 45
            })
        );
        let turbulence = pirep.conditions.turbulence.as_ref().unwrap();
        assert_eq!(turbulence.severity, Severity::Moderate);
        assert_eq!(turbulence.kind.as_deref(), Some("CHOP"));
        assert_eq!(
            turbulence.altitude,
            Some(AltitudeBand {
                lower_ft: 33_000,
                upper_ft: 37_000
            })
        );
        assert_eq!(pirep.conditions.icing.as_ref().unwrap().severity, Severity::None);
        assert_eq!(pirep.remarks.as_deref(), Some("SMOOTH ABV"));
        assert!(pirep.parse_errors.is_empty(), "{:?}", pirep.parse_errors);
    }

    #[test]
    fn test_trace_icing_maps_to_light() {
        let pirep = decode_pirep("UA /OV DEN /FL080 /IC TRC RIME 060-080");
        let icing = pirep.conditions.icing.unwrap();
        assert_eq!(icing.severity, Severity::Light);
        assert_eq!(icing.kind.as_deref(), Some("RIME"));
    }

    #[test]
    fn test_missing_report_type() {
        let pirep = decode_pirep("/OV ORD /TB MOD");
        assert_eq!(pirep.urgency, Urgency::Routine);
        assert!(pirep.parse_errors.contains(&ParseError::missing("report type")));
        assert_eq!(pirep.conditions.turbulence.unwrap().severity, Severity::Moderate);
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let pirep = decode_pirep("UA /OV BOS /ZZ SOMETHING /FL UNKN");
        assert!(pirep.parse_errors.is_empty());
        assert!(pirep.altitude_ft.is_none());
        assert!(pirep.conditions.is_empty());
    }

    #[test]
    fn test_lowercase_report_decodes() {
        let raw = "kjfk uua /ov jfk /tm 1930 /fl250 /tb sev cat";
        let pirep = decode_pirep(raw);
        assert_eq!(pirep.raw, raw);
        assert_eq!(pirep.urgency, Urgency::Urgent);
        assert_eq!(pirep.station.as_deref(), Some("KJFK"));
        assert_eq!(pirep.altitude_ft, Some(25_000));
        let turbulence = pirep.conditions.turbulence.unwrap();
        assert_eq!(turbulence.severity, Severity::Severe);
        assert_eq!(turbulence.kind.as_deref(), Some("CAT"));
        assert!(pirep.parse_errors.is_empty(), "{:?}", pirep.parse_errors);
    }

    #[test]
    fn test_non_ascii_text_does_not_panic() {
        let pirep = decode_pirep("UA /OV é /TB ñ /FLé");
        assert_eq!(pirep.location.as_deref(), Some("é"));
    }
}
