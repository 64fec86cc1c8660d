//! Tests for the purchase intake grading engine
//!
//! Covers the netto calculation, deduction ordering, rejection verdicts,
//! and the payable amount arithmetic for every commodity rule set.

use rust_decimal::Decimal;
use shared::{
    grade, purchase_tax_rate, CommodityType, Deduction, MeasurementInput, RejectionReason,
};

/// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

/// Measurement with everything zeroed except the commodity
fn measurement(commodity_type: CommodityType) -> MeasurementInput {
    MeasurementInput {
        commodity_type,
        gross_weight_kg: Decimal::ZERO,
        sack_count: Decimal::ZERO,
        sack_unit_weight_kg: Decimal::ZERO,
        brix_level: Decimal::ZERO,
        waste_percent: Decimal::ZERO,
        moisture_percent: Decimal::ZERO,
        fungus_percent: Decimal::ZERO,
        defects_percent: Decimal::ZERO,
        bean_count: Decimal::ZERO,
        container_weight_kg: Decimal::ZERO,
        price_per_kg: Decimal::ZERO,
    }
}

// =============================================================================
// Wet Cocoa Rules
// =============================================================================

mod wet_cocoa {
    use super::*;

    #[test]
    fn full_intake_with_tare_and_waste_deduction() {
        // 100 kg in 2 sacks of 0.5 kg, brix 9, waste 5%, 15000/kg
        let mut input = measurement(CommodityType::WetCocoa);
        input.gross_weight_kg = dec("100");
        input.sack_count = dec("2");
        input.sack_unit_weight_kg = dec("0.5");
        input.brix_level = dec("9");
        input.waste_percent = dec("5");
        input.price_per_kg = dec("15000");

        let result = grade(&input);

        // Tare removes 1 kg, then 2% of 99 kg is deducted
        assert!(!result.is_rejected());
        assert_eq!(result.net_weight_kg, dec("97.02"));
        assert_eq!(result.subtotal_amount, dec("1455300"));
        assert_eq!(result.tax_amount, dec("3638.25"));
        assert_eq!(result.payable_amount, dec("1451661.75"));
        assert_eq!(result.deductions.len(), 2);
    }

    #[test]
    fn low_brix_rejects_regardless_of_other_fields() {
        let mut input = measurement(CommodityType::WetCocoa);
        input.gross_weight_kg = dec("250");
        input.brix_level = dec("6");
        input.waste_percent = dec("1");
        input.price_per_kg = dec("15000");

        let result = grade(&input);

        assert!(result.is_rejected());
        assert_eq!(result.rejection, Some(RejectionReason::BrixBelowMinimum));
        assert_eq!(
            result.rejection.unwrap().to_string(),
            "Brix level below 8 (reject)"
        );
    }

    #[test]
    fn brix_zero_means_unmeasured_and_passes() {
        let mut input = measurement(CommodityType::WetCocoa);
        input.gross_weight_kg = dec("50");
        input.brix_level = Decimal::ZERO;

        assert!(!grade(&input).is_rejected());
    }

    #[test]
    fn brix_at_minimum_passes() {
        let mut input = measurement(CommodityType::WetCocoa);
        input.gross_weight_kg = dec("50");
        input.brix_level = dec("8");

        assert!(!grade(&input).is_rejected());
    }

    #[test]
    fn brix_just_below_minimum_rejects() {
        let mut input = measurement(CommodityType::WetCocoa);
        input.gross_weight_kg = dec("50");
        input.brix_level = dec("7.99");

        assert_eq!(
            grade(&input).rejection,
            Some(RejectionReason::BrixBelowMinimum)
        );
    }

    #[test]
    fn waste_over_limit_rejects_without_deduction() {
        let mut input = measurement(CommodityType::WetCocoa);
        input.gross_weight_kg = dec("80");
        input.brix_level = dec("9");
        input.waste_percent = dec("6.5");

        let result = grade(&input);

        assert_eq!(result.rejection, Some(RejectionReason::WasteOverLimit));
        assert!(result.deductions.is_empty());
    }

    #[test]
    fn waste_at_limit_deducts_instead_of_rejecting() {
        // 6% is the boundary: not over the limit, but over the 3% tolerance
        let mut input = measurement(CommodityType::WetCocoa);
        input.gross_weight_kg = dec("100");
        input.brix_level = dec("9");
        input.waste_percent = dec("6");

        let result = grade(&input);

        assert!(!result.is_rejected());
        assert_eq!(result.net_weight_kg, dec("97"));
    }

    #[test]
    fn waste_within_tolerance_deducts_nothing() {
        let mut input = measurement(CommodityType::WetCocoa);
        input.gross_weight_kg = dec("100");
        input.brix_level = dec("9");
        input.waste_percent = dec("3");

        let result = grade(&input);

        assert_eq!(result.net_weight_kg, dec("100"));
        assert!(result.deductions.is_empty());
    }

    #[test]
    fn first_triggered_rejection_reason_wins() {
        // Both brix and waste would reject; brix is evaluated first
        let mut input = measurement(CommodityType::WetCocoa);
        input.gross_weight_kg = dec("100");
        input.brix_level = dec("5");
        input.waste_percent = dec("9");

        let result = grade(&input);

        assert_eq!(result.rejection, Some(RejectionReason::BrixBelowMinimum));
    }

    #[test]
    fn waste_deduction_still_logged_after_brix_rejection() {
        // Deduction rules keep evaluating after a rejection is flagged;
        // only the submission gate consults the verdict.
        let mut input = measurement(CommodityType::WetCocoa);
        input.gross_weight_kg = dec("100");
        input.brix_level = dec("6");
        input.waste_percent = dec("5");

        let result = grade(&input);

        assert!(result.is_rejected());
        assert_eq!(result.deductions.len(), 1);
        assert_eq!(result.net_weight_kg, dec("98"));
    }
}

// =============================================================================
// Dry Cocoa Rules (unfermented and fermented share the rule set)
// =============================================================================

mod dry_cocoa {
    use super::*;

    #[test]
    fn moisture_and_waste_deductions_compound() {
        // 50 kg, moisture 9%, waste 3%, fungus 2%
        let mut input = measurement(CommodityType::FermentedCocoa);
        input.gross_weight_kg = dec("50");
        input.moisture_percent = dec("9");
        input.waste_percent = dec("3");
        input.fungus_percent = dec("2");

        let result = grade(&input);

        // 50 -> 49 (2% moisture excess) -> 48.755 (0.5% waste excess);
        // fungus within tolerance
        assert_eq!(result.net_weight_kg, dec("48.755"));
        assert_eq!(result.deductions.len(), 2);
    }

    #[test]
    fn unfermented_uses_the_same_rules() {
        let mut fermented = measurement(CommodityType::FermentedCocoa);
        fermented.gross_weight_kg = dec("50");
        fermented.moisture_percent = dec("9");
        fermented.waste_percent = dec("3");

        let mut unfermented = measurement(CommodityType::UnfermentedDryCocoa);
        unfermented.gross_weight_kg = dec("50");
        unfermented.moisture_percent = dec("9");
        unfermented.waste_percent = dec("3");

        assert_eq!(
            grade(&fermented).net_weight_kg,
            grade(&unfermented).net_weight_kg
        );
    }

    #[test]
    fn deductions_apply_to_running_weight_not_gross() {
        // Two successive 10% deductions: 100 -> 90 -> 81, not 80
        let mut input = measurement(CommodityType::UnfermentedDryCocoa);
        input.gross_weight_kg = dec("100");
        input.moisture_percent = dec("17");
        input.waste_percent = dec("12.5");

        let result = grade(&input);

        assert_eq!(result.net_weight_kg, dec("81"));
    }

    #[test]
    fn moisture_at_tolerance_deducts_nothing() {
        let mut input = measurement(CommodityType::FermentedCocoa);
        input.gross_weight_kg = dec("40");
        input.moisture_percent = dec("7");

        let result = grade(&input);

        assert_eq!(result.net_weight_kg, dec("40"));
        assert!(result.deductions.is_empty());
    }

    #[test]
    fn fungus_over_tolerance_deducts() {
        let mut input = measurement(CommodityType::FermentedCocoa);
        input.gross_weight_kg = dec("100");
        input.fungus_percent = dec("6");

        let result = grade(&input);

        // 2% fungus excess
        assert_eq!(result.net_weight_kg, dec("98"));
        assert_eq!(result.deductions.len(), 1);
    }

    #[test]
    fn deduction_log_follows_rule_order() {
        let mut input = measurement(CommodityType::FermentedCocoa);
        input.gross_weight_kg = dec("100");
        input.sack_count = dec("1");
        input.sack_unit_weight_kg = dec("1");
        input.moisture_percent = dec("9");
        input.waste_percent = dec("4");
        input.fungus_percent = dec("5");

        let result = grade(&input);

        assert_eq!(result.deductions.len(), 4);
        assert!(matches!(result.deductions[0], Deduction::SackTare { .. }));
        assert!(matches!(result.deductions[1], Deduction::Moisture { .. }));
        assert!(matches!(result.deductions[2], Deduction::Waste { .. }));
        assert!(matches!(result.deductions[3], Deduction::Fungus { .. }));
    }

    #[test]
    fn extreme_moisture_clamps_net_weight_to_zero() {
        // Moisture excess above 100% would push the weight negative
        let mut input = measurement(CommodityType::UnfermentedDryCocoa);
        input.gross_weight_kg = dec("5");
        input.moisture_percent = dec("120");
        input.price_per_kg = dec("30000");

        let result = grade(&input);

        assert_eq!(result.net_weight_kg, Decimal::ZERO);
        assert_eq!(result.subtotal_amount, Decimal::ZERO);
        assert_eq!(result.tax_amount, Decimal::ZERO);
        assert_eq!(result.payable_amount, Decimal::ZERO);
        assert!(!result.is_rejected());
    }
}

// =============================================================================
// Green Bean Rules (robusta and arabica share the rule set)
// =============================================================================

mod green_bean {
    use super::*;

    #[test]
    fn moisture_and_defect_deductions() {
        let mut input = measurement(CommodityType::GreenBeanRobusta);
        input.gross_weight_kg = dec("100");
        input.moisture_percent = dec("13");
        input.defects_percent = dec("7");

        let result = grade(&input);

        // 100 -> 99 (1% moisture excess) -> 97.02 (2% defect excess)
        assert_eq!(result.net_weight_kg, dec("97.02"));
        assert_eq!(result.deductions.len(), 2);
    }

    #[test]
    fn arabica_matches_robusta_rules() {
        let mut robusta = measurement(CommodityType::GreenBeanRobusta);
        robusta.gross_weight_kg = dec("60");
        robusta.moisture_percent = dec("14");

        let mut arabica = measurement(CommodityType::GreenBeanArabica);
        arabica.gross_weight_kg = dec("60");
        arabica.moisture_percent = dec("14");

        assert_eq!(grade(&robusta), grade(&arabica));
    }

    #[test]
    fn moisture_at_tolerance_deducts_nothing() {
        let mut input = measurement(CommodityType::GreenBeanArabica);
        input.gross_weight_kg = dec("60");
        input.moisture_percent = dec("12");
        input.defects_percent = dec("5");

        let result = grade(&input);

        assert_eq!(result.net_weight_kg, dec("60"));
        assert!(result.deductions.is_empty());
    }
}

// =============================================================================
// Patchouli Oil Rules
// =============================================================================

mod patchouli_oil {
    use super::*;

    #[test]
    fn container_tare_is_a_flat_deduction() {
        // 20 kg gross in a 2 kg drum; sacks are ignored entirely
        let mut input = measurement(CommodityType::PatchouliOil);
        input.gross_weight_kg = dec("20");
        input.container_weight_kg = dec("2");
        input.sack_count = dec("3");
        input.sack_unit_weight_kg = dec("0.5");

        let result = grade(&input);

        assert_eq!(result.net_weight_kg, dec("18"));
        assert_eq!(result.deductions.len(), 1);
        assert!(matches!(
            result.deductions[0],
            Deduction::ContainerTare { .. }
        ));
    }

    #[test]
    fn no_sack_deduction_log_entry_for_any_sack_count() {
        let mut input = measurement(CommodityType::PatchouliOil);
        input.gross_weight_kg = dec("20");
        input.sack_count = dec("10");
        input.sack_unit_weight_kg = dec("1");

        let result = grade(&input);

        assert!(result
            .deductions
            .iter()
            .all(|d| !matches!(d, Deduction::SackTare { .. })));
        assert_eq!(result.net_weight_kg, dec("20"));
    }

    #[test]
    fn zero_container_weight_deducts_nothing() {
        let mut input = measurement(CommodityType::PatchouliOil);
        input.gross_weight_kg = dec("20");

        let result = grade(&input);

        assert_eq!(result.net_weight_kg, dec("20"));
        assert!(result.deductions.is_empty());
    }
}

// =============================================================================
// General Commodity
// =============================================================================

mod general {
    use super::*;

    #[test]
    fn only_pricing_applies_without_sacks() {
        let mut input = measurement(CommodityType::General);
        input.gross_weight_kg = dec("10");
        input.price_per_kg = dec("1000");

        let result = grade(&input);

        assert_eq!(result.net_weight_kg, dec("10"));
        assert_eq!(result.subtotal_amount, dec("10000"));
        assert_eq!(result.tax_amount, dec("25"));
        assert_eq!(result.payable_amount, dec("9975"));
        assert!(result.deductions.is_empty());
    }

    #[test]
    fn quality_fields_are_ignored() {
        let mut input = measurement(CommodityType::General);
        input.gross_weight_kg = dec("10");
        input.moisture_percent = dec("50");
        input.waste_percent = dec("50");
        input.brix_level = dec("2");

        let result = grade(&input);

        assert_eq!(result.net_weight_kg, dec("10"));
        assert!(!result.is_rejected());
    }
}

// =============================================================================
// Sack Tare
// =============================================================================

mod sack_tare {
    use super::*;

    #[test]
    fn tare_is_count_times_unit_weight() {
        let mut input = measurement(CommodityType::General);
        input.gross_weight_kg = dec("100");
        input.sack_count = dec("4");
        input.sack_unit_weight_kg = dec("0.25");

        let result = grade(&input);

        assert_eq!(result.net_weight_kg, dec("99"));
    }

    #[test]
    fn log_entry_formats_raw_values_to_two_decimals() {
        let mut input = measurement(CommodityType::General);
        input.gross_weight_kg = dec("100");
        input.sack_count = dec("2");
        input.sack_unit_weight_kg = dec("0.5");

        let result = grade(&input);

        assert_eq!(
            result.deduction_log(),
            vec!["Sack deduction (2.00 × 0.50 kg): -1.00 kg".to_string()]
        );
    }

    #[test]
    fn zero_sacks_produce_no_entry() {
        let mut input = measurement(CommodityType::General);
        input.gross_weight_kg = dec("100");
        input.sack_unit_weight_kg = dec("0.5");

        let result = grade(&input);

        assert!(result.deductions.is_empty());
    }

    #[test]
    fn tare_exceeding_gross_clamps_to_zero() {
        let mut input = measurement(CommodityType::General);
        input.gross_weight_kg = dec("5");
        input.sack_count = dec("10");
        input.sack_unit_weight_kg = dec("1");
        input.price_per_kg = dec("2000");

        let result = grade(&input);

        assert_eq!(result.net_weight_kg, Decimal::ZERO);
        assert_eq!(result.payable_amount, Decimal::ZERO);
    }
}

// =============================================================================
// Input Degradation
// =============================================================================

mod input_degradation {
    use super::*;

    #[test]
    fn negative_inputs_are_treated_as_zero() {
        let mut input = measurement(CommodityType::WetCocoa);
        input.gross_weight_kg = dec("-10");
        input.sack_count = dec("-2");
        input.waste_percent = dec("-5");
        input.price_per_kg = dec("-15000");

        let result = grade(&input);

        assert_eq!(result.net_weight_kg, Decimal::ZERO);
        assert_eq!(result.subtotal_amount, Decimal::ZERO);
        assert!(!result.is_rejected());
        assert!(result.deductions.is_empty());
    }

    #[test]
    fn zero_weight_grades_without_error() {
        let mut input = measurement(CommodityType::FermentedCocoa);
        input.moisture_percent = dec("15");

        let result = grade(&input);

        assert_eq!(result.net_weight_kg, Decimal::ZERO);
        assert_eq!(result.deductions.len(), 1);
        assert_eq!(result.deductions[0].amount_kg(), Decimal::ZERO);
    }
}

// =============================================================================
// Amount Arithmetic
// =============================================================================

mod amounts {
    use super::*;

    #[test]
    fn tax_is_a_quarter_percent_of_subtotal() {
        let mut input = measurement(CommodityType::General);
        input.gross_weight_kg = dec("123.45");
        input.price_per_kg = dec("17500");

        let result = grade(&input);

        assert_eq!(
            result.tax_amount,
            result.subtotal_amount * purchase_tax_rate()
        );
        assert_eq!(
            result.payable_amount + result.tax_amount,
            result.subtotal_amount
        );
    }

    #[test]
    fn rejected_results_still_carry_amounts() {
        // The engine stays total; the submission gate is what blocks
        // persistence of a rejected result.
        let mut input = measurement(CommodityType::WetCocoa);
        input.gross_weight_kg = dec("100");
        input.brix_level = dec("5");
        input.price_per_kg = dec("10000");

        let result = grade(&input);

        assert!(result.is_rejected());
        assert_eq!(result.subtotal_amount, dec("1000000"));
    }

    #[test]
    fn grading_is_idempotent() {
        let mut input = measurement(CommodityType::FermentedCocoa);
        input.gross_weight_kg = dec("73.5");
        input.sack_count = dec("3");
        input.sack_unit_weight_kg = dec("0.4");
        input.moisture_percent = dec("8.2");
        input.waste_percent = dec("2.9");
        input.price_per_kg = dec("42000");

        assert_eq!(grade(&input), grade(&input));
    }
}

// =============================================================================
// Engine Properties
// =============================================================================

mod properties {
    use super::*;
    use proptest::prelude::*;

    fn commodity_strategy() -> impl Strategy<Value = CommodityType> {
        prop_oneof![
            Just(CommodityType::WetCocoa),
            Just(CommodityType::UnfermentedDryCocoa),
            Just(CommodityType::FermentedCocoa),
            Just(CommodityType::GreenBeanRobusta),
            Just(CommodityType::GreenBeanArabica),
            Just(CommodityType::PatchouliOil),
            Just(CommodityType::General),
        ]
    }

    /// Decimal in [0, max_units × 10^-scale]
    fn decimal_strategy(max_units: i64, scale: u32) -> impl Strategy<Value = Decimal> {
        (0..=max_units).prop_map(move |n| Decimal::new(n, scale))
    }

    proptest! {
        #[test]
        fn net_weight_is_never_negative_and_tax_identity_holds(
            commodity_type in commodity_strategy(),
            gross_weight_kg in decimal_strategy(1_000_000, 2),
            sack_count in decimal_strategy(50, 0),
            sack_unit_weight_kg in decimal_strategy(500, 2),
            brix_level in decimal_strategy(200, 1),
            waste_percent in decimal_strategy(2_000, 1),
            moisture_percent in decimal_strategy(2_000, 1),
            fungus_percent in decimal_strategy(2_000, 1),
            defects_percent in decimal_strategy(2_000, 1),
            container_weight_kg in decimal_strategy(3_000, 2),
            price_per_kg in decimal_strategy(100_000, 0),
        ) {
            let input = MeasurementInput {
                commodity_type,
                gross_weight_kg,
                sack_count,
                sack_unit_weight_kg,
                brix_level,
                waste_percent,
                moisture_percent,
                fungus_percent,
                defects_percent,
                bean_count: Decimal::ZERO,
                container_weight_kg,
                price_per_kg,
            };

            let result = grade(&input);

            prop_assert!(result.net_weight_kg >= Decimal::ZERO);
            prop_assert!(result.net_weight_kg <= gross_weight_kg);
            prop_assert_eq!(
                result.tax_amount,
                result.subtotal_amount * purchase_tax_rate()
            );
            prop_assert_eq!(
                result.payable_amount + result.tax_amount,
                result.subtotal_amount
            );

            // Same input, same output
            let again = grade(&input);
            prop_assert_eq!(again, result);
        }
    }
}
