//! SIGMET / AIRMET decoder
//!
//! Advisory text is free-form enough that it is not run through the group
//! grammar. Hazards are matched on whole words; altitude, validity and
//! movement are read from their keyword phrases.

use std::collections::HashSet;

use super::words;
use crate::error::ParseError;
use crate::models::{
    AdvisoryKind, AltitudeRange, DecodedSigmet, IntensityTrend, Movement, SigmetHazard,
};
use crate::types::DayTime;

/// Ordered hazard table. Each entry lists word alternatives that must all be
/// satisfied; the first satisfied entry wins. An alternative may be a
/// two-word phrase, which must appear adjacent in the text.
///
/// A bare `VA` is also the Virginia code in US state lists, so volcanic ash
/// needs the `VA CLD` / `VA ERUPTION` phrases.
static HAZARD_RULES: &[(SigmetHazard, &[&[&str]])] = &[
    (SigmetHazard::SevereTurbulence, &[&["SEV", "SEVERE"], &["TURB", "TURBULENCE"]]),
    (SigmetHazard::SevereIcing, &[&["SEV", "SEVERE"], &["ICE", "ICG", "ICING"]]),
    (
        SigmetHazard::VolcanicAsh,
        &[&["VOLCANIC", "VA CLD", "VA ERUPTION", "VA ERUPTIONS", "VA ASH"]],
    ),
    (SigmetHazard::TropicalCyclone, &[&["TC", "CYCLONE", "HURRICANE", "TYPHOON"]]),
    (SigmetHazard::DustSandstorm, &[&["DS", "SS", "DUSTSTORM", "SANDSTORM"]]),
    (
        SigmetHazard::Thunderstorms,
        &[&["TS", "TSGR", "CONVECTIVE", "THUNDERSTORM", "THUNDERSTORMS"]],
    ),
    (SigmetHazard::MountainWave, &[&["MTW"]]),
    (SigmetHazard::MountainWave, &[&["MTN", "MOUNTAIN"], &["WAVE", "WAVES"]]),
    (SigmetHazard::MountainObscuration, &[&["MTN", "MT", "MOUNTAIN"], &["OBSC", "OBSCN", "OBSCD"]]),
    (SigmetHazard::IfrConditions, &[&["IFR"]]),
    (SigmetHazard::LowLevelWindShear, &[&["LLWS"]]),
    (SigmetHazard::Turbulence, &[&["TURB", "TURBULENCE"]]),
    (SigmetHazard::Icing, &[&["ICE", "ICG", "ICING"]]),
    (SigmetHazard::StrongSurfaceWind, &[&["SFC"], &["WND", "WIND", "WINDS"]]),
];

/// Words that open the affected-area phrase
const AREA_START: &[&str] = &["WI", "FROM", "ENTIRE", "WTN"];

/// Words that close it
const AREA_END: &[&str] = &[
    "SFC", "BTN", "TOP", "TOPS", "BLW", "ABV", "MOV", "STNR", "INTSF", "WKN", "NC", "OTLK",
    "VALID", "CIG", "VIS",
];

pub fn classify_hazard(text: &str) -> SigmetHazard {
    let single: Vec<String> = words(text).collect();
    let phrases = single.windows(2).map(|pair| pair.join(" "));
    let words: HashSet<String> = single.iter().cloned().chain(phrases).collect();
    HAZARD_RULES
        .iter()
        .find(|(_, clauses)| {
            clauses
                .iter()
                .all(|alternatives| alternatives.iter().any(|w| words.contains(*w)))
        })
        .map_or(SigmetHazard::Unknown, |(hazard, _)| *hazard)
}

pub fn decode_sigmet(raw: &str) -> DecodedSigmet {
    let text = raw.trim().to_ascii_uppercase().replace("...", " ");
    let tokens: Vec<&str> = text
        .split_whitespace()
        .map(|t| t.trim_end_matches(['.', '=', ',']))
        .filter(|t| !t.is_empty())
        .collect();

    let mut sigmet = DecodedSigmet {
        raw: raw.trim().to_string(),
        kind: if tokens.contains(&"AIRMET") {
            AdvisoryKind::Airmet
        } else {
            AdvisoryKind::Sigmet
        },
        hazard: classify_hazard(&text),
        area: affected_area(&tokens),
        altitude: altitude_range(&tokens),
        movement: movement(&tokens),
        trend: trend(&tokens),
        ..Default::default()
    };

    let (from, to) = validity(&tokens);
    sigmet.valid_from = from;
    sigmet.valid_to = to;

    if sigmet.hazard == SigmetHazard::Unknown {
        sigmet.parse_errors.push(ParseError::missing("hazard"));
    }
    if sigmet.valid_from.is_none() && sigmet.valid_to.is_none() {
        sigmet.parse_errors.push(ParseError::missing("validity"));
    }
    sigmet
}

fn affected_area(tokens: &[&str]) -> Option<String> {
    let start = tokens.iter().position(|t| AREA_START.contains(t))?;
    let area: Vec<&str> = tokens[start..]
        .iter()
        .take_while(|t| !AREA_END.contains(t) && level(t).is_none() && slash_range(t).is_none())
        .copied()
        .collect();
    (!area.is_empty()).then(|| area.join(" "))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Level {
    Surface,
    Feet(u32),
}

impl Level {
    fn feet(self) -> u32 {
        match self {
            Level::Surface => 0,
            Level::Feet(feet) => feet,
        }
    }
}

fn digits(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// `SFC`, `FL350`, `12000FT`
fn level(token: &str) -> Option<Level> {
    if token == "SFC" {
        return Some(Level::Surface);
    }
    if let Some(fl) = token.strip_prefix("FL") {
        return (fl.len() == 3).then(|| digits(fl)).flatten().map(|h| Level::Feet(h * 100));
    }
    token.strip_suffix("FT").and_then(digits).map(Level::Feet)
}

/// Level inside a `BTN x AND y` or `TOP x` phrase, where bare hundreds are allowed
fn phrase_level(token: &str) -> Option<Level> {
    level(token).or_else(|| {
        (token.len() == 3)
            .then(|| digits(token))
            .flatten()
            .map(|h| Level::Feet(h * 100))
    })
}

fn range(floor: Option<Level>, ceiling: Option<Level>) -> AltitudeRange {
    AltitudeRange {
        floor_ft: floor.map(Level::feet),
        ceiling_ft: ceiling.map(Level::feet),
        floor_is_surface: floor == Some(Level::Surface),
    }
}

fn slash_range(token: &str) -> Option<AltitudeRange> {
    let (lower, upper) = token.split_once('/')?;
    let ceiling = level(upper).or_else(|| {
        (upper.len() == 3)
            .then(|| digits(upper))
            .flatten()
            .filter(|_| lower.starts_with("FL"))
            .map(|h| Level::Feet(h * 100))
    })?;
    let floor = level(lower).or_else(|| {
        // `2000/8000FT`: the unit applies to both sides
        digits(lower)
            .filter(|_| upper.ends_with("FT"))
            .map(Level::Feet)
    })?;
    Some(range(Some(floor), Some(ceiling)))
}

fn altitude_range(tokens: &[&str]) -> Option<AltitudeRange> {
    for (i, token) in tokens.iter().enumerate() {
        let next = |offset: usize| tokens.get(i + offset).copied().unwrap_or("");
        match *token {
            "BTN" => {
                if let (Some(floor), "AND", Some(ceiling)) =
                    (phrase_level(next(1)), next(2), phrase_level(next(3)))
                {
                    return Some(range(Some(floor), Some(ceiling)));
                }
            }
            "TOP" | "TOPS" => {
                let ceiling = (1..=3)
                    .map(next)
                    .take_while(|t| matches!(*t, "TO" | "ABV" | "BLW") || phrase_level(t).is_some())
                    .find_map(phrase_level);
                if ceiling.is_some() {
                    return Some(range(None, ceiling));
                }
            }
            "BLW" => {
                if let Some(ceiling) = phrase_level(next(1)) {
                    return Some(range(None, Some(ceiling)));
                }
            }
            "ABV" => {
                if let Some(floor) = phrase_level(next(1)) {
                    return Some(range(Some(floor), None));
                }
            }
            _ => {
                if let Some(altitude) = slash_range(token) {
                    return Some(altitude);
                }
                if let Some(Level::Feet(feet)) = level(token) {
                    return Some(range(Some(Level::Feet(feet)), Some(Level::Feet(feet))));
                }
            }
        }
    }
    None
}

/// `VALID 151800/152200` or `VALID UNTIL 152200`
fn validity(tokens: &[&str]) -> (Option<DayTime>, Option<DayTime>) {
    for (i, token) in tokens.iter().enumerate() {
        if *token != "VALID" {
            continue;
        }
        match tokens.get(i + 1).copied() {
            Some("UNTIL") => {
                let to = tokens.get(i + 2).and_then(|t| DayTime::parse(t));
                if to.is_some() {
                    return (None, to);
                }
            }
            Some(window) => {
                if let Some((from, to)) = window.split_once('/') {
                    let (from, to) = (DayTime::parse(from), DayTime::parse(to));
                    if from.is_some() || to.is_some() {
                        return (from, to);
                    }
                }
            }
            None => {}
        }
    }
    (None, None)
}

fn is_compass_direction(token: &str) -> bool {
    (1..=3).contains(&token.len()) && token.bytes().all(|b| matches!(b, b'N' | b'S' | b'E' | b'W'))
}

fn knots(token: &str) -> Option<u32> {
    token.strip_suffix("KT").and_then(digits)
}

/// `MOV E 15KT`, `MOV FROM 26025KT`, `STNR`
fn movement(tokens: &[&str]) -> Option<Movement> {
    for (i, token) in tokens.iter().enumerate() {
        let next = |offset: usize| tokens.get(i + offset).copied().unwrap_or("");
        match *token {
            "STNR" => return Some(Movement::Stationary),
            "MOV" if next(1) == "FROM" => {
                let group = next(2);
                if let (Some(direction), Some(speed)) = (group.get(0..3), group.get(3..)) {
                    if digits(direction).is_some() {
                        return Some(Movement::Moving {
                            direction: direction.to_string(),
                            speed_kt: knots(speed),
                        });
                    }
                }
            }
            "MOV" if is_compass_direction(next(1)) => {
                return Some(Movement::Moving {
                    direction: next(1).to_string(),
                    speed_kt: knots(next(2)),
                });
            }
            _ => {}
        }
    }
    None
}

/// `NC` only counts right after a movement phrase or at the very end, since
/// it doubles as a state abbreviation in US advisories.
fn trend(tokens: &[&str]) -> Option<IntensityTrend> {
    for (i, token) in tokens.iter().enumerate() {
        match *token {
            "INTSF" => return Some(IntensityTrend::Intensifying),
            "WKN" => return Some(IntensityTrend::Weakening),
            "NC" => {
                let after_movement = i
                    .checked_sub(1)
                    .and_then(|p| tokens.get(p))
                    .is_some_and(|prev| *prev == "STNR" || knots(prev).is_some());
                if after_movement || i + 1 == tokens.len() {
                    return Some(IntensityTrend::NoChange);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const ICAO_SIGMET: &str = "KZNY SIGMET UNIFORM 2 VALID 151800/152200 KKCI- \
        SEV TURB FCST WI N4030 W07400 - N4100 W07200 - N4030 W07000 FL250/370 MOV E 15KT NC=";

    #[test]
    fn test_icao_sigmet() {
        let sigmet = decode_sigmet(ICAO_SIGMET);
        assert_eq!(sigmet.kind, AdvisoryKind::Sigmet);
        assert_eq!(sigmet.hazard, SigmetHazard::SevereTurbulence);
        assert_eq!(sigmet.valid_from, Some(DayTime::new(15, 18, 0)));
        assert_eq!(sigmet.valid_to, Some(DayTime::new(15, 22, 0)));
        let altitude = sigmet.altitude.unwrap();
        assert_eq!(altitude.floor_ft, Some(25_000));
        assert_eq!(altitude.ceiling_ft, Some(37_000));
        assert!(!altitude.floor_is_surface);
        assert_eq!(
            sigmet.area.as_deref(),
            Some("WI N4030 W07400 - N4100 W07200 - N4030 W07000")
        );
        assert_eq!(
            sigmet.movement,
            Some(Movement::Moving {
                direction: "E".into(),
                speed_kt: Some(15)
            })
        );
        assert_eq!(sigmet.trend, Some(IntensityTrend::NoChange));
        assert!(sigmet.parse_errors.is_empty());
    }

    #[test]
    fn test_airmet_surface_floor() {
        let sigmet = decode_sigmet(
            "AIRMET ZULU FOR ICE VALID UNTIL 152100 FROM 30N SYR TO BOS TO 40SE ALB BTN SFC AND FL180 STNR",
        );
        assert_eq!(sigmet.kind, AdvisoryKind::Airmet);
        assert_eq!(sigmet.hazard, SigmetHazard::Icing);
        assert_eq!(sigmet.valid_from, None);
        assert_eq!(sigmet.valid_to, Some(DayTime::new(15, 21, 0)));
        let altitude = sigmet.altitude.unwrap();
        assert!(altitude.floor_is_surface);
        assert_eq!(altitude.floor_ft, Some(0));
        assert_eq!(altitude.ceiling_ft, Some(18_000));
        assert_eq!(sigmet.area.as_deref(), Some("FROM 30N SYR TO BOS TO 40SE ALB"));
        assert_eq!(sigmet.movement, Some(Movement::Stationary));
    }

    #[test]
    fn test_hazards_match_whole_words_only() {
        // "VALID" contains "VA", "TSUNAMI" would contain "TS"
        assert_eq!(classify_hazard("SIGMET VALID 151800/152200 TURB"), SigmetHazard::Turbulence);
        assert_eq!(classify_hazard("EMBD TS OBS"), SigmetHazard::Thunderstorms);
        assert_eq!(classify_hazard("VA ERUPTION MT ETNA"), SigmetHazard::VolcanicAsh);
        assert_eq!(classify_hazard("VA CLD OBS AT 1100Z"), SigmetHazard::VolcanicAsh);
        assert_eq!(classify_hazard("MTN OBSCN BY CLDS"), SigmetHazard::MountainObscuration);
        assert_eq!(classify_hazard("STATUS REPORT"), SigmetHazard::Unknown);
    }

    #[test]
    fn test_virginia_in_state_list_is_not_volcanic_ash() {
        let sigmet = decode_sigmet(
            "WAUS41 KKCI 261445 BOSS WA 261445 AIRMET SIERRA UPDT 3 FOR IFR VALID UNTIL 262100 \
             . AIRMET IFR...NY PA WV MD DC DE VA NJ FROM 20SW ALB TO 30E ACK TO 40SE SIE TO 20SW RIC TO 30S HAR TO 20SW ALB \
             CIG BLW 010/VIS BLW 3SM BR. CONDS CONTG BYD 21Z THRU 03Z.",
        );
        assert_eq!(sigmet.kind, AdvisoryKind::Airmet);
        assert_eq!(sigmet.hazard, SigmetHazard::IfrConditions);
        assert!(!sigmet.hazard.is_severe());
    }

    #[test]
    fn test_tops_and_convective_movement() {
        let sigmet = decode_sigmet(
            "CONVECTIVE SIGMET 45E VALID UNTIL 152055 AREA EMBD TS MOV FROM 26025KT TOPS ABV FL450",
        );
        assert_eq!(sigmet.hazard, SigmetHazard::Thunderstorms);
        assert_eq!(sigmet.altitude.unwrap().ceiling_ft, Some(45_000));
        assert_eq!(
            sigmet.movement,
            Some(Movement::Moving {
                direction: "260".into(),
                speed_kt: Some(25)
            })
        );
    }

    #[test]
    fn test_feet_range_and_intensifying() {
        let sigmet = decode_sigmet("SIGMET 3 VALID 160600/161000 MTW OBS WI AREA 2000/8000FT INTSF");
        assert_eq!(sigmet.hazard, SigmetHazard::MountainWave);
        let altitude = sigmet.altitude.unwrap();
        assert_eq!((altitude.floor_ft, altitude.ceiling_ft), (Some(2000), Some(8000)));
        assert_eq!(sigmet.trend, Some(IntensityTrend::Intensifying));
    }

    #[test]
    fn test_unknown_hazard_is_reported() {
        let sigmet = decode_sigmet("SIGMET SOMETHING ODD");
        assert_eq!(sigmet.hazard, SigmetHazard::Unknown);
        assert!(sigmet.parse_errors.contains(&ParseError::missing("hazard")));
        assert!(sigmet.parse_errors.contains(&ParseError::missing("validity")));
    }
}
