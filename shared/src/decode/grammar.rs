//! Group classifier shared by the METAR and TAF decoders
//!
//! A report body is split into whitespace-delimited groups and each group is
//! run through [`RULES`] in order. The first rule that accepts a group decides
//! its token; a group no rule accepts becomes [`Token::Unknown`].

use rust_decimal::Decimal;

use super::codes;
use crate::models::{
    Altimeter, CloudCoverage, CloudLayer, ConvectiveType, ForecastTemperature, Intensity,
    ReportModifier, SpeedUnit, Temperature, TemperatureExtreme, Visibility, VisibilityQualifier,
    WeatherPhenomenon, Wind, WindDirection, WindVariation,
};
use crate::types::DayHour;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Modifier(ReportModifier),
    Wind(Wind),
    WindVariation(WindVariation),
    Cavok,
    Visibility(Visibility),
    SkyClear,
    Cloud(CloudLayer),
    NoSignificantWeather,
    Weather(WeatherPhenomenon),
    /// Weather-shaped group containing a code outside the tables
    UnsupportedWeather(String),
    Temperature(Temperature),
    Altimeter(Altimeter),
    ForecastTemperature(ForecastTemperature),
    Remarks,
    Unknown(String),
}

type Matcher = fn(&str) -> Option<Token>;

pub struct Rule {
    pub name: &'static str,
    matcher: Matcher,
}

impl Rule {
    pub fn matches(&self, group: &str) -> Option<Token> {
        (self.matcher)(group)
    }
}

/// Classification rules in priority order
pub static RULES: &[Rule] = &[
    Rule { name: "modifier", matcher: match_modifier },
    Rule { name: "wind", matcher: match_wind },
    Rule { name: "wind_variation", matcher: match_wind_variation },
    Rule { name: "cavok", matcher: match_cavok },
    Rule { name: "visibility", matcher: match_visibility },
    Rule { name: "sky_clear", matcher: match_sky_clear },
    Rule { name: "cloud", matcher: match_cloud },
    Rule { name: "no_significant_weather", matcher: match_nsw },
    Rule { name: "weather", matcher: match_weather },
    Rule { name: "temperature", matcher: match_temperature },
    Rule { name: "altimeter", matcher: match_altimeter },
    Rule { name: "forecast_temperature", matcher: match_forecast_temperature },
    Rule { name: "remarks", matcher: match_remarks },
];

pub fn classify(group: &str) -> Token {
    RULES
        .iter()
        .find_map(|rule| rule.matches(group))
        .unwrap_or_else(|| Token::Unknown(group.to_string()))
}

/// Name of the first rule accepting `group`
pub fn matching_rule(group: &str) -> Option<&'static str> {
    RULES
        .iter()
        .find(|rule| rule.matches(group).is_some())
        .map(|rule| rule.name)
}

/// Split a report into groups. Trailing `=` terminators are dropped and a
/// whole-mile count followed by a fraction (`1 1/2SM`) is joined into one group.
pub fn split_groups(text: &str) -> Vec<String> {
    let raw: Vec<&str> = text
        .split_whitespace()
        .map(|g| g.trim_end_matches('='))
        .filter(|g| !g.is_empty())
        .collect();

    let mut groups = Vec::with_capacity(raw.len());
    let mut i = 0;
    while i < raw.len() {
        let group = raw[i];
        if let Some(next) = raw.get(i + 1) {
            if is_whole_miles(group) && is_fraction_miles(next) {
                groups.push(format!("{} {}", group, next));
                i += 2;
                continue;
            }
        }
        groups.push(group.to_string());
        i += 1;
    }
    groups
}

fn is_whole_miles(group: &str) -> bool {
    (1..=2).contains(&group.len()) && all_digits(group)
}

fn is_fraction_miles(group: &str) -> bool {
    group
        .strip_suffix("SM")
        .and_then(|body| body.split_once('/'))
        .is_some_and(|(n, d)| n.len() == 1 && all_digits(n) && !d.is_empty() && all_digits(d))
}

// ============================================================================
// Helpers
// ============================================================================

fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn number<T: std::str::FromStr>(s: &str) -> Option<T> {
    if all_digits(s) {
        s.parse().ok()
    } else {
        None
    }
}

/// `M` prefix marks a negative value
pub(crate) fn signed_celsius(s: &str) -> Option<i32> {
    let (negative, digits) = match s.strip_prefix('M') {
        Some(rest) => (true, rest),
        None => (false, s),
    };
    if !(1..=2).contains(&digits.len()) {
        return None;
    }
    let value: i32 = number(digits)?;
    Some(if negative { -value } else { value })
}

// ============================================================================
// Matchers
// ============================================================================

fn match_modifier(group: &str) -> Option<Token> {
    ReportModifier::from_code(group).map(Token::Modifier)
}

/// `dddff(Gfff)KT`, `VRBffKT`, also MPS and KMH
fn match_wind(group: &str) -> Option<Token> {
    let (body, unit) = ["KT", "MPS", "KMH"]
        .into_iter()
        .find_map(|suffix| Some((group.strip_suffix(suffix)?, SpeedUnit::from_suffix(suffix)?)))?;

    let direction = match body.get(0..3)? {
        "VRB" => WindDirection::Variable,
        digits => {
            let degrees: u16 = number(digits)?;
            if degrees > 360 {
                return None;
            }
            WindDirection::Degrees(degrees)
        }
    };

    let rest = body.get(3..)?;
    let (speed, gust) = match rest.split_once('G') {
        Some((speed, gust)) => (speed, Some(gust)),
        None => (rest, None),
    };
    let in_range = |s: &str| (2..=3).contains(&s.len());
    if !in_range(speed) || !gust.map_or(true, in_range) {
        return None;
    }

    Some(Token::Wind(Wind {
        direction,
        speed: number(speed)?,
        gust: match gust {
            Some(g) => Some(number(g)?),
            None => None,
        },
        unit,
        variation: None,
    }))
}

fn match_wind_variation(group: &str) -> Option<Token> {
    let (from, to) = group.split_once('V')?;
    if from.len() != 3 || to.len() != 3 {
        return None;
    }
    let from_degrees: u16 = number(from)?;
    let to_degrees: u16 = number(to)?;
    if from_degrees > 360 || to_degrees > 360 {
        return None;
    }
    Some(Token::WindVariation(WindVariation {
        from_degrees,
        to_degrees,
    }))
}

fn match_cavok(group: &str) -> Option<Token> {
    (group == "CAVOK").then_some(Token::Cavok)
}

/// `10SM`, `1/2SM`, `1 1/2SM`, `P6SM`, `M1/4SM`, or four-digit meters
fn match_visibility(group: &str) -> Option<Token> {
    if let Some(body) = group.strip_suffix("SM") {
        let (qualifier, body) = if let Some(rest) = body.strip_prefix('P') {
            (Some(VisibilityQualifier::GreaterThan), rest)
        } else if let Some(rest) = body.strip_prefix('M') {
            (Some(VisibilityQualifier::LessThan), rest)
        } else {
            (None, body)
        };
        let visibility = Visibility::statute_miles(statute_miles(body)?);
        return Some(Token::Visibility(match qualifier {
            Some(q) => visibility.with_qualifier(q),
            None => visibility,
        }));
    }

    if group.len() == 4 {
        let meters: u32 = number(group)?;
        let visibility = Visibility::meters(meters);
        return Some(Token::Visibility(if meters == 9999 {
            visibility.with_qualifier(VisibilityQualifier::GreaterThan)
        } else {
            visibility
        }));
    }
    None
}

fn statute_miles(body: &str) -> Option<Decimal> {
    if body.is_empty() {
        return None;
    }
    let mut total = Decimal::ZERO;
    for part in body.split(' ') {
        match part.split_once('/') {
            Some((n, d)) => {
                let numerator: u32 = number(n)?;
                let denominator: u32 = number(d)?;
                if denominator == 0 {
                    return None;
                }
                total += Decimal::from(numerator) / Decimal::from(denominator);
            }
            None => {
                if part.len() > 2 {
                    return None;
                }
                total += Decimal::from(number::<u32>(part)?);
            }
        }
    }
    Some(total)
}

fn match_sky_clear(group: &str) -> Option<Token> {
    matches!(group, "SKC" | "CLR" | "NSC" | "NCD").then_some(Token::SkyClear)
}

/// `BKN025`, `OVC008CB`, `VV002`
fn match_cloud(group: &str) -> Option<Token> {
    let (coverage, rest) = if let Some(rest) = group.strip_prefix("VV") {
        (CloudCoverage::VerticalVisibility, rest)
    } else {
        let coverage = match group.get(0..3)? {
            "FEW" => CloudCoverage::Few,
            "SCT" => CloudCoverage::Scattered,
            "BKN" => CloudCoverage::Broken,
            "OVC" => CloudCoverage::Overcast,
            _ => return None,
        };
        (coverage, group.get(3..)?)
    };

    let height = rest.get(0..3)?;
    let convective = match rest.get(3..)? {
        "" => None,
        "CB" => Some(ConvectiveType::Cumulonimbus),
        "TCU" => Some(ConvectiveType::ToweringCumulus),
        _ => return None,
    };

    Some(Token::Cloud(CloudLayer {
        coverage,
        height_hundreds_ft: number(height)?,
        convective,
    }))
}

fn match_nsw(group: &str) -> Option<Token> {
    (group == "NSW").then_some(Token::NoSignificantWeather)
}

/// `[-|+][VC][descriptor][phenomena...]`
fn match_weather(group: &str) -> Option<Token> {
    let (intensity, rest) = if let Some(rest) = group.strip_prefix('-') {
        (Intensity::Light, rest)
    } else if let Some(rest) = group.strip_prefix('+') {
        (Intensity::Heavy, rest)
    } else {
        (Intensity::Moderate, group)
    };
    let (in_vicinity, rest) = match rest.strip_prefix("VC") {
        Some(rest) => (true, rest),
        None => (false, rest),
    };
    let has_prefix = intensity != Intensity::Moderate || in_vicinity;

    if rest.is_empty()
        || rest.len() % 2 != 0
        || rest.len() > 8
        || !rest.bytes().all(|b| b.is_ascii_uppercase())
    {
        return None;
    }

    let pairs: Vec<&str> = (0..rest.len()).step_by(2).filter_map(|i| rest.get(i..i + 2)).collect();

    let mut descriptor = None;
    let mut phenomena = Vec::new();
    let mut unknown = false;
    for (index, pair) in pairs.iter().enumerate() {
        if index == 0 && codes::descriptor(pair).is_some() {
            descriptor = Some(pair.to_string());
        } else if codes::phenomenon(pair).is_some() {
            phenomena.push(pair.to_string());
        } else {
            unknown = true;
        }
    }

    if unknown {
        let recognized = descriptor.is_some() || !phenomena.is_empty();
        return (has_prefix || recognized).then(|| Token::UnsupportedWeather(group.to_string()));
    }

    Some(Token::Weather(WeatherPhenomenon {
        raw: group.to_string(),
        intensity,
        in_vicinity,
        description: describe_weather(intensity, in_vicinity, descriptor.as_deref(), &phenomena),
        descriptor,
        phenomena,
    }))
}

fn describe_weather(
    intensity: Intensity,
    in_vicinity: bool,
    descriptor: Option<&str>,
    phenomena: &[String],
) -> String {
    let names: Vec<&str> = phenomena.iter().filter_map(|p| codes::phenomenon(p)).collect();
    let joined = names.join(" and ");

    let mut words: Vec<&str> = Vec::new();
    match intensity {
        Intensity::Light => words.push("Light"),
        Intensity::Heavy => words.push("Heavy"),
        Intensity::Moderate => {}
    }
    if let Some(desc) = descriptor.and_then(codes::descriptor) {
        words.push(desc);
        if descriptor == Some("TS") && !phenomena.is_empty() {
            words.push("with");
        }
    }
    if !joined.is_empty() {
        words.push(&joined);
    }
    let mut description = words.join(" ");
    if in_vicinity {
        description.push_str(" in the vicinity");
    }
    description
}

/// `24/18`, `M05/M12`, `24/` (dewpoint missing)
fn match_temperature(group: &str) -> Option<Token> {
    let (temp, dew) = group.split_once('/')?;
    if temp.trim_start_matches('M').len() != 2 {
        return None;
    }
    let celsius = signed_celsius(temp)?;
    let dewpoint_celsius = if dew.is_empty() {
        None
    } else {
        Some(signed_celsius(dew)?)
    };
    Some(Token::Temperature(Temperature {
        celsius,
        dewpoint_celsius,
    }))
}

/// `A2992` (hundredths of inHg) or `Q1013` (hPa)
fn match_altimeter(group: &str) -> Option<Token> {
    let value = group.get(1..)?;
    if value.len() != 4 {
        return None;
    }
    match group.get(0..1)? {
        "A" => Some(Token::Altimeter(Altimeter::from_inhg_hundredths(number(value)?))),
        "Q" => Some(Token::Altimeter(Altimeter::from_hpa(number(value)?))),
        _ => None,
    }
}

/// `TX25/2620Z`, `TNM02/2710Z`
fn match_forecast_temperature(group: &str) -> Option<Token> {
    let extreme = match group.get(0..2)? {
        "TX" => TemperatureExtreme::Max,
        "TN" => TemperatureExtreme::Min,
        _ => return None,
    };
    let (value, at) = group.get(2..)?.split_once('/')?;
    let at = DayHour::parse(at.strip_suffix('Z')?)?;
    Some(Token::ForecastTemperature(ForecastTemperature {
        extreme,
        celsius: signed_celsius(value)?,
        at,
    }))
}

fn match_remarks(group: &str) -> Option<Token> {
    (group == "RMK").then_some(Token::Remarks)
}
