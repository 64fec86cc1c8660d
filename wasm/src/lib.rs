//! WebAssembly module for the Cooperative Commodity Management Platform
//!
//! Provides client-side computation for:
//! - Live purchase grading while the intake form is being filled
//! - Commodity classification from product names
//! - Rendemen (batch yield) calculations

use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages in browser console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Grade a purchase measurement
///
/// Takes the intake form state as a `MeasurementInput` JSON string and
/// returns the full `GradingResult` as JSON. Intended to be called on
/// every form change; the caller replaces its displayed result wholesale.
#[wasm_bindgen]
pub fn grade_measurement(input_json: &str) -> Result<String, JsValue> {
    let input: MeasurementInput = serde_json::from_str(input_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid measurement JSON: {}", e)))?;

    let result = grade(&input);
    serde_json::to_string(&result)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// Classify a product name into its commodity category
#[wasm_bindgen]
pub fn classify_commodity(product_name: &str) -> String {
    CommodityType::from_product_name(product_name)
        .as_str()
        .to_string()
}

/// Render the deduction log of a grading result for display
#[wasm_bindgen]
pub fn render_deduction_log(result_json: &str) -> Result<js_sys::Array, JsValue> {
    let result: GradingResult = serde_json::from_str(result_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid result JSON: {}", e)))?;

    Ok(result
        .deduction_log()
        .into_iter()
        .map(|line| JsValue::from_str(&line))
        .collect())
}

/// Calculate rendemen (batch yield percentage)
#[wasm_bindgen]
pub fn calculate_batch_rendemen(input_kg: f64, output_kg: f64) -> f64 {
    if input_kg <= 0.0 {
        return 0.0;
    }
    (output_kg / input_kg) * 100.0
}

/// Check whether a grading result blocks submission
#[wasm_bindgen]
pub fn is_rejected(result_json: &str) -> bool {
    serde_json::from_str::<GradingResult>(result_json)
        .map(|r| r.is_rejected())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn wet_cocoa_input() -> MeasurementInput {
        MeasurementInput {
            commodity_type: CommodityType::WetCocoa,
            gross_weight_kg: Decimal::from(100),
            sack_count: Decimal::from(2),
            sack_unit_weight_kg: Decimal::new(5, 1),
            brix_level: Decimal::from(9),
            waste_percent: Decimal::from(5),
            moisture_percent: Decimal::ZERO,
            fungus_percent: Decimal::ZERO,
            defects_percent: Decimal::ZERO,
            bean_count: Decimal::ZERO,
            container_weight_kg: Decimal::ZERO,
            price_per_kg: Decimal::from(15000),
        }
    }

    #[test]
    fn test_grade_measurement_roundtrip() {
        let json = serde_json::to_string(&wet_cocoa_input()).unwrap();
        let result_json = grade_measurement(&json).unwrap();
        let result: GradingResult = serde_json::from_str(&result_json).unwrap();
        assert_eq!(result.net_weight_kg, "97.02".parse().unwrap());
        assert!(!result.is_rejected());
    }

    #[test]
    fn test_classify_commodity() {
        assert_eq!(classify_commodity("KAKAO BASAH"), "wet_cocoa");
        assert_eq!(classify_commodity("MINYAK NILAM"), "patchouli_oil");
        assert_eq!(classify_commodity("PUPUK ORGANIK"), "general");
    }

    #[test]
    fn test_batch_rendemen() {
        let rendemen = calculate_batch_rendemen(100.0, 38.0);
        assert!((rendemen - 38.0).abs() < 0.001);
        assert_eq!(calculate_batch_rendemen(0.0, 10.0), 0.0);
    }
}
