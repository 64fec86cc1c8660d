//! Tests for batch processing calculations

use rust_decimal::Decimal;
use shared::{calculate_rendemen, BatchStatus};

/// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

mod rendemen {
    use super::*;

    #[test]
    fn rendemen_is_output_over_input() {
        // 100 kg wet cocoa drying down to 38 kg
        assert_eq!(calculate_rendemen(dec("100"), dec("38")), dec("38"));
    }

    #[test]
    fn rendemen_with_fractional_weights() {
        assert_eq!(calculate_rendemen(dec("80"), dec("30")), dec("37.5"));
    }

    #[test]
    fn zero_input_yields_zero_rendemen() {
        assert_eq!(calculate_rendemen(Decimal::ZERO, dec("10")), Decimal::ZERO);
    }

    #[test]
    fn rendemen_can_exceed_one_hundred() {
        // Repacking with added weight is unusual but not an error
        assert_eq!(calculate_rendemen(dec("50"), dec("55")), dec("110"));
    }
}

mod batch_status {
    use super::*;

    #[test]
    fn status_round_trips_through_strings() {
        for status in [BatchStatus::InProgress, BatchStatus::Completed] {
            assert_eq!(BatchStatus::from_str(status.as_str()), Some(status));
        }
    }

    #[test]
    fn unknown_status_yields_none() {
        assert_eq!(BatchStatus::from_str("cancelled"), None);
    }
}
