//! TAF decoder
//!
//! The body after the header is cut into a base forecast followed by change
//! groups at each `FMddhhmm`, `BECMG`, `TEMPO` and `PROBnn` indicator. Every
//! segment keeps only the groups present in its own text.

use super::grammar::{classify, split_groups, Token};
use crate::error::ParseError;
use crate::models::{
    ChangeGroup, ChangeKind, ChangeWindow, DecodedTaf, ForecastConditions, ReportModifier,
    Visibility,
};
use crate::types::{DayTime, ValidPeriod};
use crate::validation::is_station_id;

pub fn decode_taf(raw: &str) -> DecodedTaf {
    let groups = split_groups(&raw.to_ascii_uppercase());
    let mut taf = DecodedTaf {
        raw: raw.trim().to_string(),
        ..Default::default()
    };

    let mut idx = 0;
    while let Some(group) = groups.get(idx) {
        if group == "TAF" {
            idx += 1;
        } else if let Some(modifier) = ReportModifier::from_code(group) {
            taf.modifier = Some(modifier);
            idx += 1;
        } else {
            break;
        }
    }

    match groups.get(idx) {
        Some(group) if is_station_id(group) => {
            taf.station = Some(group.clone());
            idx += 1;
        }
        _ => taf.parse_errors.push(ParseError::missing("station")),
    }

    match groups.get(idx).filter(|g| g.ends_with('Z')).and_then(|g| DayTime::parse(g)) {
        Some(time) => {
            taf.issued_at = Some(time);
            idx += 1;
        }
        None => taf.parse_errors.push(ParseError::missing("issue time")),
    }

    match groups.get(idx).and_then(|g| ValidPeriod::parse(g)) {
        Some(period) => {
            taf.valid_period = Some(period);
            idx += 1;
        }
        None => taf.parse_errors.push(ParseError::missing("valid period")),
    }

    let body = &groups[idx..];
    let end = body.iter().position(|g| g == "RMK").unwrap_or(body.len());
    taf.change_groups =
        read_change_groups(&body[..end], &mut taf.base_forecast, &mut taf.parse_errors);

    taf
}

/// Cut forecast groups into the conditions before the first change
/// indicator (written to `base`) and the ordered change groups after it.
pub(crate) fn read_change_groups(
    groups: &[String],
    base: &mut ForecastConditions,
    errors: &mut Vec<ParseError>,
) -> Vec<ChangeGroup> {
    let mut changes: Vec<ChangeGroup> = Vec::new();
    let mut idx = 0;

    while let Some(group) = groups.get(idx) {
        idx += 1;

        if let Some((kind, probability, mut window)) = change_indicator(group) {
            // `PROB30 TEMPO 2703/2706`: only a bare PROB directly ahead merges
            let extends_probability = kind == ChangeKind::Temporary
                && changes.last().is_some_and(|g| {
                    g.kind == ChangeKind::Probability
                        && g.window.is_none()
                        && !g.temporary
                        && g.conditions.is_empty()
                });

            if window.is_none() && kind != ChangeKind::From {
                if let Some(period) = groups.get(idx).and_then(|g| ValidPeriod::parse(g)) {
                    window = Some(ChangeWindow::Period(period));
                    idx += 1;
                }
            }

            if let (true, Some(last)) = (extends_probability, changes.last_mut()) {
                last.temporary = true;
                last.window = window;
                continue;
            }
            if kind == ChangeKind::From && window.is_none() {
                errors.push(ParseError::malformed(group.as_str()));
            }
            changes.push(ChangeGroup {
                kind,
                probability,
                temporary: false,
                window,
                conditions: ForecastConditions::default(),
            });
            continue;
        }

        let conditions = match changes.last_mut() {
            Some(change) => &mut change.conditions,
            None => &mut *base,
        };
        if let Err(error) = apply_token(conditions, group) {
            errors.push(error);
        }
    }

    suppress_cavok_weather(base, errors);
    for change in &mut changes {
        suppress_cavok_weather(&mut change.conditions, errors);
    }
    changes
}

/// Recognize a change indicator. `FMddhhmm` carries its own start time.
fn change_indicator(group: &str) -> Option<(ChangeKind, Option<u8>, Option<ChangeWindow>)> {
    match group {
        "BECMG" => return Some((ChangeKind::Becoming, None, None)),
        "TEMPO" => return Some((ChangeKind::Temporary, None, None)),
        _ => {}
    }
    if let Some(time) = group.strip_prefix("FM") {
        if time.len() == 6 && time.bytes().all(|b| b.is_ascii_digit()) {
            let window = DayTime::parse(time).map(ChangeWindow::Starting);
            return Some((ChangeKind::From, None, window));
        }
    }
    if let Some(percent) = group.strip_prefix("PROB") {
        if percent.len() == 2 && percent.bytes().all(|b| b.is_ascii_digit()) {
            return Some((ChangeKind::Probability, percent.parse().ok(), None));
        }
    }
    None
}

fn apply_token(conditions: &mut ForecastConditions, group: &str) -> Result<(), ParseError> {
    match classify(group) {
        Token::Wind(wind) if conditions.wind.is_none() => conditions.wind = Some(wind),
        Token::WindVariation(variation) => match conditions.wind.as_mut() {
            Some(wind) => wind.variation = Some(variation),
            None => return Err(ParseError::malformed(group)),
        },
        Token::Cavok => conditions.visibility = Some(Visibility::cavok()),
        Token::Visibility(visibility) if conditions.visibility.is_none() => {
            conditions.visibility = Some(visibility)
        }
        Token::SkyClear => {}
        Token::Cloud(layer) => conditions.clouds.push(layer),
        Token::NoSignificantWeather => conditions.no_significant_weather = true,
        Token::Weather(weather) => conditions.weather.push(weather),
        Token::UnsupportedWeather(code) => return Err(ParseError::unsupported(code)),
        Token::ForecastTemperature(temperature) => conditions.temperatures.push(temperature),
        _ => return Err(ParseError::malformed(group)),
    }
    Ok(())
}

fn suppress_cavok_weather(conditions: &mut ForecastConditions, errors: &mut Vec<ParseError>) {
    if conditions.visibility.as_ref().is_some_and(|v| v.unlimited) {
        errors.extend(
            conditions
                .weather
                .drain(..)
                .map(|w| ParseError::SuppressedByCavok { group: w.raw }),
        );
    }
}
