//! Validation utilities for the Cooperative Commodity Management Platform
//!
//! Includes Indonesia-specific validations for member registry compliance.

use rust_decimal::Decimal;

// ============================================================================
// Intake Validations
// ============================================================================

/// Validate the manually entered purchase price (must be positive)
pub fn validate_purchase_price(price: Decimal) -> Result<(), &'static str> {
    if price <= Decimal::ZERO {
        return Err("Price per kg must be positive");
    }
    Ok(())
}

/// Validate the scale-measured gross weight (must be positive)
pub fn validate_gross_weight(weight: Decimal) -> Result<(), &'static str> {
    if weight <= Decimal::ZERO {
        return Err("Gross weight must be positive");
    }
    Ok(())
}

/// Validate a quality percentage field is in range
pub fn validate_quality_percent(value: Decimal) -> Result<(), &'static str> {
    if value < Decimal::ZERO || value > Decimal::from(100) {
        return Err("Percentage must be between 0 and 100");
    }
    Ok(())
}

/// Check if dry cocoa moisture is within the deduction-free tolerance
pub fn is_ideal_dry_cocoa_moisture(moisture: Decimal) -> bool {
    moisture >= Decimal::ZERO && moisture <= Decimal::from(7)
}

// ============================================================================
// General Validations
// ============================================================================

/// Validate shelter/cooperative code format (3-10 uppercase alphanumeric)
pub fn validate_shelter_code(code: &str) -> Result<(), &'static str> {
    if code.len() < 3 {
        return Err("Shelter code must be at least 3 characters");
    }
    if code.len() > 10 {
        return Err("Shelter code must be at most 10 characters");
    }
    if !code.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()) {
        return Err("Shelter code must be uppercase alphanumeric only");
    }
    Ok(())
}

/// Validate member number format (3-12 uppercase alphanumeric or dash)
pub fn validate_member_number(number: &str) -> Result<(), &'static str> {
    if number.len() < 3 {
        return Err("Member number must be at least 3 characters");
    }
    if number.len() > 12 {
        return Err("Member number must be at most 12 characters");
    }
    if !number
        .chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '-')
    {
        return Err("Member number must be uppercase alphanumeric");
    }
    Ok(())
}

// ============================================================================
// Indonesia-Specific Validations
// ============================================================================

/// Validate Indonesian phone number format
/// Accepts: 081234567890, 0812-3456-7890, +6281234567890
pub fn validate_indonesian_phone(phone: &str) -> Result<(), &'static str> {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();

    // Domestic mobile: 10-13 digits starting with 08
    if digits.len() >= 10 && digits.len() <= 13 && digits.starts_with("08") {
        return Ok(());
    }
    // International format with country code 62: 11-14 digits
    if digits.len() >= 11 && digits.len() <= 14 && digits.starts_with("62") {
        return Ok(());
    }

    Err("Invalid Indonesian phone number format")
}

/// Validate Indonesian National Identity Number (NIK)
/// 16 digits: 6-digit region code, 6-digit birth date (DDMMYY, DD+40 for
/// women), 4-digit serial
pub fn validate_nik(nik: &str) -> Result<(), &'static str> {
    let digits: String = nik.chars().filter(|c| c.is_ascii_digit()).collect();

    if digits.len() != 16 {
        return Err("NIK must be 16 digits");
    }
    if digits.starts_with("00") {
        return Err("Invalid NIK region code");
    }

    let day: u32 = digits[6..8].parse().map_err(|_| "Invalid NIK format")?;
    let month: u32 = digits[8..10].parse().map_err(|_| "Invalid NIK format")?;

    let valid_day = (1..=31).contains(&day) || (41..=71).contains(&day);
    if !valid_day {
        return Err("Invalid NIK birth date");
    }
    if !(1..=12).contains(&month) {
        return Err("Invalid NIK birth date");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    // ========================================================================
    // Intake Validation Tests
    // ========================================================================

    #[test]
    fn test_validate_purchase_price() {
        assert!(validate_purchase_price(dec("15000")).is_ok());
        assert!(validate_purchase_price(dec("0.01")).is_ok());
        assert!(validate_purchase_price(Decimal::ZERO).is_err());
        assert!(validate_purchase_price(dec("-100")).is_err());
    }

    #[test]
    fn test_validate_gross_weight() {
        assert!(validate_gross_weight(dec("100")).is_ok());
        assert!(validate_gross_weight(dec("0.5")).is_ok());
        assert!(validate_gross_weight(Decimal::ZERO).is_err());
        assert!(validate_gross_weight(dec("-3")).is_err());
    }

    #[test]
    fn test_validate_quality_percent() {
        assert!(validate_quality_percent(Decimal::ZERO).is_ok());
        assert!(validate_quality_percent(dec("6.5")).is_ok());
        assert!(validate_quality_percent(dec("100")).is_ok());
        assert!(validate_quality_percent(dec("-1")).is_err());
        assert!(validate_quality_percent(dec("101")).is_err());
    }

    #[test]
    fn test_ideal_dry_cocoa_moisture() {
        assert!(is_ideal_dry_cocoa_moisture(dec("6")));
        assert!(is_ideal_dry_cocoa_moisture(dec("7")));
        assert!(!is_ideal_dry_cocoa_moisture(dec("7.5")));
        assert!(!is_ideal_dry_cocoa_moisture(dec("-1")));
    }

    // ========================================================================
    // General Validation Tests
    // ========================================================================

    #[test]
    fn test_validate_shelter_code_valid() {
        assert!(validate_shelter_code("PPL").is_ok());
        assert!(validate_shelter_code("MAM01").is_ok());
        assert!(validate_shelter_code("ABCDEFGHIJ").is_ok());
    }

    #[test]
    fn test_validate_shelter_code_invalid() {
        assert!(validate_shelter_code("PP").is_err()); // Too short
        assert!(validate_shelter_code("ABCDEFGHIJK").is_err()); // Too long
        assert!(validate_shelter_code("ppl").is_err()); // Lowercase
        assert!(validate_shelter_code("PP-L").is_err()); // Special char
    }

    #[test]
    fn test_validate_member_number() {
        assert!(validate_member_number("A-0042").is_ok());
        assert!(validate_member_number("KOP-2024-01").is_ok());
        assert!(validate_member_number("AB").is_err());
        assert!(validate_member_number("abc123").is_err());
    }

    // ========================================================================
    // Indonesia-Specific Validation Tests
    // ========================================================================

    #[test]
    fn test_validate_indonesian_phone_valid() {
        // Standard mobile
        assert!(validate_indonesian_phone("081234567890").is_ok());
        // With dashes
        assert!(validate_indonesian_phone("0812-3456-7890").is_ok());
        // International format
        assert!(validate_indonesian_phone("+6281234567890").is_ok());
        assert!(validate_indonesian_phone("6281234567890").is_ok());
    }

    #[test]
    fn test_validate_indonesian_phone_invalid() {
        assert!(validate_indonesian_phone("12345").is_err());
        assert!(validate_indonesian_phone("021234567890123456").is_err());
        assert!(validate_indonesian_phone("abcdefghij").is_err());
    }

    #[test]
    fn test_validate_nik_valid() {
        // Region 7604 (Mamuju), born 12-05-1985
        assert!(validate_nik("7604051205850001").is_ok());
        // Female encoding: day + 40
        assert!(validate_nik("7604055205850002").is_ok());
    }

    #[test]
    fn test_validate_nik_invalid() {
        // Wrong length
        assert!(validate_nik("760405120585").is_err());
        // Invalid region code
        assert!(validate_nik("0004051205850001").is_err());
        // Invalid birth day
        assert!(validate_nik("7604053905850001").is_err());
        // Invalid birth month
        assert!(validate_nik("7604051213850001").is_err());
    }
}
