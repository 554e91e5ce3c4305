//! METAR / SPECI decoder

use super::grammar::{classify, split_groups, Token};
use super::taf::read_change_groups;
use crate::error::ParseError;
use crate::models::{DecodedMetar, ForecastConditions, MetarTrend, ReportModifier, Visibility};
use crate::types::DayTime;
use crate::validation::is_station_id;

/// Groups that open the trend forecast
const TREND_INDICATORS: &[&str] = &["NOSIG", "BECMG", "TEMPO"];

/// Decode a raw METAR. Never fails; groups that cannot be decoded are
/// reported in `parse_errors` and the rest of the report is still decoded.
pub fn decode_metar(raw: &str) -> DecodedMetar {
    let groups = split_groups(&raw.to_ascii_uppercase());
    let mut metar = DecodedMetar {
        raw: raw.trim().to_string(),
        ..Default::default()
    };

    let mut idx = 0;
    if matches!(groups.first().map(String::as_str), Some("METAR" | "SPECI")) {
        idx += 1;
    }
    while let Some(modifier) = groups.get(idx).and_then(|g| ReportModifier::from_code(g)) {
        metar.modifier = Some(modifier);
        idx += 1;
    }

    match groups.get(idx) {
        Some(group) if is_station_id(group) => {
            metar.station = Some(group.clone());
            idx += 1;
        }
        _ => metar.parse_errors.push(ParseError::missing("station")),
    }

    match groups.get(idx).filter(|g| g.ends_with('Z')).and_then(|g| DayTime::parse(g)) {
        Some(time) => {
            metar.observed_at = Some(time);
            idx += 1;
        }
        None => metar.parse_errors.push(ParseError::missing("observation time")),
    }

    let mut cavok = false;
    while let Some(group) = groups.get(idx) {
        idx += 1;
        if TREND_INDICATORS.contains(&group.as_str()) {
            let trend = &groups[idx - 1..];
            let end = trend.iter().position(|g| g == "RMK").unwrap_or(trend.len());
            metar.trend = Some(decode_trend(&trend[..end], &mut metar.parse_errors));
            // resume at RMK, if any
            idx += end - 1;
            continue;
        }
        match classify(group) {
            Token::Remarks => {
                let remarks = groups[idx..].join(" ");
                if !remarks.is_empty() {
                    metar.remarks = Some(remarks);
                }
                break;
            }
            Token::Modifier(modifier) => metar.modifier = Some(modifier),
            Token::Wind(wind) if metar.wind.is_none() => metar.wind = Some(wind),
            Token::WindVariation(variation) => match metar.wind.as_mut() {
                Some(wind) if wind.variation.is_none() => wind.variation = Some(variation),
                _ => metar.parse_errors.push(ParseError::malformed(group.as_str())),
            },
            Token::Cavok => {
                cavok = true;
                metar.visibility = Some(Visibility::cavok());
            }
            Token::Visibility(visibility) if metar.visibility.is_none() => {
                metar.visibility = Some(visibility)
            }
            Token::SkyClear => {}
            Token::Cloud(layer) => metar.clouds.push(layer),
            Token::Weather(weather) => metar.weather.push(weather),
            Token::UnsupportedWeather(code) => {
                metar.parse_errors.push(ParseError::unsupported(code))
            }
            Token::Temperature(temperature) if metar.temperature.is_none() => {
                metar.temperature = Some(temperature)
            }
            Token::Altimeter(altimeter) if metar.altimeter.is_none() => {
                metar.altimeter = Some(altimeter)
            }
            _ => metar.parse_errors.push(ParseError::malformed(group.as_str())),
        }
    }

    if cavok {
        for dropped in metar.weather.drain(..) {
            metar
                .parse_errors
                .push(ParseError::SuppressedByCavok { group: dropped.raw });
        }
    }

    if metar.modifier != Some(ReportModifier::Nil) {
        if metar.wind.is_none() {
            metar.parse_errors.push(ParseError::missing("wind"));
        }
        if metar.visibility.is_none() {
            metar.parse_errors.push(ParseError::missing("visibility"));
        }
    }

    metar
}

fn decode_trend(groups: &[String], errors: &mut Vec<ParseError>) -> MetarTrend {
    let forecast: Vec<String> = groups
        .iter()
        .filter(|g| g.as_str() != "NOSIG" && !is_trend_time(g))
        .cloned()
        .collect();
    let mut leading = ForecastConditions::default();
    MetarTrend {
        raw: groups.join(" "),
        no_significant_change: groups.iter().any(|g| g == "NOSIG"),
        changes: read_change_groups(&forecast, &mut leading, errors),
    }
}

/// `FM1000`, `TL1130`, `AT1100`
fn is_trend_time(group: &str) -> bool {
    ["FM", "TL", "AT"].iter().any(|prefix| {
        group
            .strip_prefix(prefix)
            .is_some_and(|t| t.len() == 4 && t.bytes().all(|b| b.is_ascii_digit()))
    })
}
