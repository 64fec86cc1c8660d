//! Tests for commodity classification from product catalog names

use shared::CommodityType;

mod product_name_classification {
    use super::*;

    #[test]
    fn wet_cocoa_from_basah() {
        assert_eq!(
            CommodityType::from_product_name("KAKAO BASAH"),
            CommodityType::WetCocoa
        );
    }

    #[test]
    fn classification_is_case_insensitive() {
        assert_eq!(
            CommodityType::from_product_name("Kakao Basah Super"),
            CommodityType::WetCocoa
        );
    }

    #[test]
    fn fermented_cocoa_from_fermentasi() {
        assert_eq!(
            CommodityType::from_product_name("KAKAO FERMENTASI"),
            CommodityType::FermentedCocoa
        );
    }

    #[test]
    fn unfermented_dry_cocoa_from_asalan() {
        assert_eq!(
            CommodityType::from_product_name("KAKAO ASALAN"),
            CommodityType::UnfermentedDryCocoa
        );
    }

    #[test]
    fn robusta_green_bean() {
        assert_eq!(
            CommodityType::from_product_name("KOPI ROBUSTA GREEN BEAN"),
            CommodityType::GreenBeanRobusta
        );
    }

    #[test]
    fn arabica_green_bean_both_spellings() {
        assert_eq!(
            CommodityType::from_product_name("KOPI ARABIKA"),
            CommodityType::GreenBeanArabica
        );
        assert_eq!(
            CommodityType::from_product_name("ARABICA GREEN BEAN"),
            CommodityType::GreenBeanArabica
        );
    }

    #[test]
    fn patchouli_oil_from_nilam() {
        assert_eq!(
            CommodityType::from_product_name("MINYAK NILAM"),
            CommodityType::PatchouliOil
        );
    }

    #[test]
    fn unknown_names_fall_back_to_general() {
        assert_eq!(
            CommodityType::from_product_name("GULA AREN"),
            CommodityType::General
        );
        assert_eq!(
            CommodityType::from_product_name(""),
            CommodityType::General
        );
    }
}

mod string_round_trip {
    use super::*;

    #[test]
    fn as_str_round_trips_through_from_str() {
        let all = [
            CommodityType::WetCocoa,
            CommodityType::UnfermentedDryCocoa,
            CommodityType::FermentedCocoa,
            CommodityType::GreenBeanRobusta,
            CommodityType::GreenBeanArabica,
            CommodityType::PatchouliOil,
            CommodityType::General,
        ];

        for commodity in all {
            assert_eq!(CommodityType::from_str(commodity.as_str()), Some(commodity));
        }
    }

    #[test]
    fn unknown_string_yields_none() {
        assert_eq!(CommodityType::from_str("copra"), None);
    }

    #[test]
    fn display_strings() {
        assert_eq!(format!("{}", CommodityType::WetCocoa), "Wet Cocoa");
        assert_eq!(
            format!("{}", CommodityType::UnfermentedDryCocoa),
            "Unfermented Dry Cocoa"
        );
        assert_eq!(format!("{}", CommodityType::PatchouliOil), "Patchouli Oil");
    }
}
