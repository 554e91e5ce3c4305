//! Report decoders
//!
//! Every decoder is a pure function from raw text to a typed record. None of
//! them fail: problems are collected in the record's `parse_errors`.

pub mod codes;
pub mod grammar;
mod metar;
mod notam;
mod pirep;
mod sigmet;
mod taf;

pub use metar::decode_metar;
pub use notam::{classify_notam, summarize_notams};
pub use pirep::decode_pirep;
pub use sigmet::{classify_hazard, decode_sigmet};
pub use taf::decode_taf;

/// Upper-cased alphanumeric words of free text
pub(crate) fn words(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_ascii_uppercase)
}
