//! Validation utilities for station identifiers and request input

// ============================================================================
// Station Validations
// ============================================================================

/// Check whether a group looks like an ICAO station id (4 alphanumerics, letter first)
pub fn is_station_id(code: &str) -> bool {
    code.len() == 4
        && code.chars().all(|c| c.is_ascii_alphanumeric())
        && code.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
}

/// Validate ICAO station id format (case-insensitive)
pub fn validate_station_id(code: &str) -> Result<(), &'static str> {
    let code = code.trim();
    if code.is_empty() {
        return Err("Station id cannot be empty");
    }
    if code.len() != 4 {
        return Err("Station id must be exactly 4 characters");
    }
    if !code.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err("Station id must be alphanumeric");
    }
    if !code.chars().next().is_some_and(|c| c.is_ascii_alphabetic()) {
        return Err("Station id must start with a letter");
    }
    Ok(())
}

/// Validate and normalize a station id to upper case
pub fn normalize_station_id(code: &str) -> Result<String, &'static str> {
    validate_station_id(code)?;
    Ok(code.trim().to_ascii_uppercase())
}

/// Validate raw report text submitted for decoding
pub fn validate_report_text(text: &str) -> Result<(), &'static str> {
    if text.trim().is_empty() {
        return Err("Report text cannot be empty");
    }
    if text.len() > 8192 {
        return Err("Report text is too long");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_station_id_valid() {
        assert!(validate_station_id("KJFK").is_ok());
        assert!(validate_station_id("egll").is_ok());
        assert!(validate_station_id("K1G4").is_ok());
        assert!(validate_station_id(" KSFO ").is_ok());
    }

    #[test]
    fn test_validate_station_id_invalid() {
        assert!(validate_station_id("").is_err());
        assert!(validate_station_id("JFK").is_err()); // Too short
        assert!(validate_station_id("KJFKX").is_err()); // Too long
        assert!(validate_station_id("KJ-K").is_err()); // Special char
        assert!(validate_station_id("1KJF").is_err()); // Leading digit
    }

    #[test]
    fn test_normalize_station_id() {
        assert_eq!(normalize_station_id("kjfk").unwrap(), "KJFK");
        assert!(normalize_station_id("jfk").is_err());
    }

    #[test]
    fn test_is_station_id() {
        assert!(is_station_id("KJFK"));
        assert!(!is_station_id("2618"));
        assert!(!is_station_id("AUTO1"));
    }

    #[test]
    fn test_validate_report_text() {
        assert!(validate_report_text("KJFK 261951Z").is_ok());
        assert!(validate_report_text("  ").is_err());
        assert!(validate_report_text(&"A".repeat(9000)).is_err());
    }
}
