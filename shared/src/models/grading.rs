//! Purchase intake grading and netto calculation
//!
//! The grading engine turns raw scale measurements into a net (netto)
//! weight, an itemized deduction log, a rejection verdict, and the payable
//! amounts. It is a pure function of its input: the intake form re-runs it
//! on every field change and replaces the displayed result wholesale.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::CommodityType;

/// Tax withheld on every purchase: 0.25% of the subtotal
pub fn purchase_tax_rate() -> Decimal {
    Decimal::new(25, 4)
}

/// Raw measurements captured at the weighing scale for one purchase
///
/// Only the subset of quality fields relevant to the commodity is
/// populated; every numeric field defaults to zero when absent, and the
/// engine treats negative values as zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeasurementInput {
    pub commodity_type: CommodityType,
    #[serde(default)]
    pub gross_weight_kg: Decimal,
    #[serde(default)]
    pub sack_count: Decimal,
    #[serde(default)]
    pub sack_unit_weight_kg: Decimal,
    #[serde(default)]
    pub brix_level: Decimal,
    #[serde(default)]
    pub waste_percent: Decimal,
    #[serde(default)]
    pub moisture_percent: Decimal,
    #[serde(default)]
    pub fungus_percent: Decimal,
    #[serde(default)]
    pub defects_percent: Decimal,
    #[serde(default)]
    pub bean_count: Decimal,
    #[serde(default)]
    pub container_weight_kg: Decimal,
    #[serde(default)]
    pub price_per_kg: Decimal,
}

/// One itemized deduction, recorded in rule-evaluation order
///
/// Entries are structured for persistence and testing; the human-readable
/// form is produced by `Display` at the presentation boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Deduction {
    SackTare {
        sack_count: Decimal,
        sack_unit_weight_kg: Decimal,
        amount_kg: Decimal,
    },
    Moisture {
        tolerance_percent: Decimal,
        amount_kg: Decimal,
    },
    Waste {
        tolerance_percent: Decimal,
        amount_kg: Decimal,
    },
    Fungus {
        tolerance_percent: Decimal,
        amount_kg: Decimal,
    },
    Defects {
        tolerance_percent: Decimal,
        amount_kg: Decimal,
    },
    ContainerTare {
        amount_kg: Decimal,
    },
}

impl Deduction {
    /// Weight removed by this deduction
    pub fn amount_kg(&self) -> Decimal {
        match self {
            Deduction::SackTare { amount_kg, .. }
            | Deduction::Moisture { amount_kg, .. }
            | Deduction::Waste { amount_kg, .. }
            | Deduction::Fungus { amount_kg, .. }
            | Deduction::Defects { amount_kg, .. }
            | Deduction::ContainerTare { amount_kg } => *amount_kg,
        }
    }
}

impl std::fmt::Display for Deduction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Deduction::SackTare {
                sack_count,
                sack_unit_weight_kg,
                amount_kg,
            } => write!(
                f,
                "Sack deduction ({:.2} × {:.2} kg): -{:.2} kg",
                sack_count, sack_unit_weight_kg, amount_kg
            ),
            Deduction::Moisture {
                tolerance_percent,
                amount_kg,
            } => write!(
                f,
                "Moisture deduction ({}% tolerance): -{:.2} kg",
                tolerance_percent, amount_kg
            ),
            Deduction::Waste {
                tolerance_percent,
                amount_kg,
            } => write!(
                f,
                "Waste deduction ({}% tolerance): -{:.2} kg",
                tolerance_percent, amount_kg
            ),
            Deduction::Fungus {
                tolerance_percent,
                amount_kg,
            } => write!(
                f,
                "Fungus deduction ({}% tolerance): -{:.2} kg",
                tolerance_percent, amount_kg
            ),
            Deduction::Defects {
                tolerance_percent,
                amount_kg,
            } => write!(
                f,
                "Defect deduction ({}% tolerance): -{:.2} kg",
                tolerance_percent, amount_kg
            ),
            Deduction::ContainerTare { amount_kg } => {
                write!(f, "Container tare: -{:.2} kg", amount_kg)
            }
        }
    }
}

/// Why a purchase was rejected at intake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    BrixBelowMinimum,
    WasteOverLimit,
}

impl std::fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectionReason::BrixBelowMinimum => write!(f, "Brix level below 8 (reject)"),
            RejectionReason::WasteOverLimit => write!(f, "Waste over 6% (reject)"),
        }
    }
}

/// Result of grading one measurement
///
/// A pure snapshot: recomputed from scratch on every input change, never
/// patched. A rejected result must not be persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradingResult {
    pub net_weight_kg: Decimal,
    pub deductions: Vec<Deduction>,
    pub rejection: Option<RejectionReason>,
    pub subtotal_amount: Decimal,
    pub tax_amount: Decimal,
    pub payable_amount: Decimal,
}

impl GradingResult {
    pub fn is_rejected(&self) -> bool {
        self.rejection.is_some()
    }

    /// Deduction log rendered for display, in rule-evaluation order
    pub fn deduction_log(&self) -> Vec<String> {
        self.deductions.iter().map(|d| d.to_string()).collect()
    }
}

/// Grade one intake measurement
///
/// Deterministic and side-effect free. Rules run in a fixed order: sack
/// tare (skipped for patchouli oil), then the commodity rule set, then the
/// zero clamp and pricing. Every percentage deduction is taken from the
/// running weight, so successive deductions compound. When more than one
/// rejection condition holds, the first rule evaluated wins and later
/// deduction rules still run; the submission gate only consults the final
/// verdict.
pub fn grade(input: &MeasurementInput) -> GradingResult {
    let sack_count = non_negative(input.sack_count);
    let sack_unit_weight = non_negative(input.sack_unit_weight_kg);
    let price = non_negative(input.price_per_kg);

    let mut weight = non_negative(input.gross_weight_kg);
    let mut deductions: Vec<Deduction> = Vec::new();
    let mut rejection: Option<RejectionReason> = None;

    // Patchouli oil arrives in drums; its tare is the container rule below.
    if input.commodity_type != CommodityType::PatchouliOil && sack_count > Decimal::ZERO {
        let tare = sack_count * sack_unit_weight;
        weight -= tare;
        deductions.push(Deduction::SackTare {
            sack_count,
            sack_unit_weight_kg: sack_unit_weight,
            amount_kg: tare,
        });
    }

    match input.commodity_type {
        CommodityType::WetCocoa => {
            let brix = non_negative(input.brix_level);
            let waste = non_negative(input.waste_percent);
            if brix > Decimal::ZERO && brix < Decimal::from(8) {
                rejection = Some(RejectionReason::BrixBelowMinimum);
            }
            if waste > Decimal::from(6) {
                if rejection.is_none() {
                    rejection = Some(RejectionReason::WasteOverLimit);
                }
            } else if waste > Decimal::from(3) {
                weight = apply_excess(&mut deductions, weight, waste, Decimal::from(3), |t, a| {
                    Deduction::Waste {
                        tolerance_percent: t,
                        amount_kg: a,
                    }
                });
            }
        }
        CommodityType::UnfermentedDryCocoa | CommodityType::FermentedCocoa => {
            let moisture = non_negative(input.moisture_percent);
            let waste = non_negative(input.waste_percent);
            let fungus = non_negative(input.fungus_percent);
            if moisture > Decimal::from(7) {
                weight = apply_excess(&mut deductions, weight, moisture, Decimal::from(7), |t, a| {
                    Deduction::Moisture {
                        tolerance_percent: t,
                        amount_kg: a,
                    }
                });
            }
            // Dry cocoa waste tolerance is 2.5%
            let waste_tolerance = Decimal::new(25, 1);
            if waste > waste_tolerance {
                weight = apply_excess(&mut deductions, weight, waste, waste_tolerance, |t, a| {
                    Deduction::Waste {
                        tolerance_percent: t,
                        amount_kg: a,
                    }
                });
            }
            if fungus > Decimal::from(4) {
                weight = apply_excess(&mut deductions, weight, fungus, Decimal::from(4), |t, a| {
                    Deduction::Fungus {
                        tolerance_percent: t,
                        amount_kg: a,
                    }
                });
            }
        }
        CommodityType::GreenBeanRobusta | CommodityType::GreenBeanArabica => {
            let moisture = non_negative(input.moisture_percent);
            let defects = non_negative(input.defects_percent);
            if moisture > Decimal::from(12) {
                weight =
                    apply_excess(&mut deductions, weight, moisture, Decimal::from(12), |t, a| {
                        Deduction::Moisture {
                            tolerance_percent: t,
                            amount_kg: a,
                        }
                    });
            }
            if defects > Decimal::from(5) {
                weight = apply_excess(&mut deductions, weight, defects, Decimal::from(5), |t, a| {
                    Deduction::Defects {
                        tolerance_percent: t,
                        amount_kg: a,
                    }
                });
            }
        }
        CommodityType::PatchouliOil => {
            let container = non_negative(input.container_weight_kg);
            if container > Decimal::ZERO {
                weight -= container;
                deductions.push(Deduction::ContainerTare {
                    amount_kg: container,
                });
            }
        }
        CommodityType::General => {}
    }

    if weight < Decimal::ZERO {
        weight = Decimal::ZERO;
    }

    let subtotal = weight * price;
    let tax = subtotal * purchase_tax_rate();
    let payable = subtotal - tax;

    GradingResult {
        net_weight_kg: weight,
        deductions,
        rejection,
        subtotal_amount: subtotal,
        tax_amount: tax,
        payable_amount: payable,
    }
}

/// Deduct the percentage of `weight` in excess of `tolerance` and log it
fn apply_excess(
    deductions: &mut Vec<Deduction>,
    weight: Decimal,
    measured: Decimal,
    tolerance: Decimal,
    entry: impl FnOnce(Decimal, Decimal) -> Deduction,
) -> Decimal {
    let cut = weight * (measured - tolerance) / Decimal::ONE_HUNDRED;
    deductions.push(entry(tolerance, cut));
    weight - cut
}

fn non_negative(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO)
}
