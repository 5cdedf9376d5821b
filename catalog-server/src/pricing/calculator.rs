//! Price Calculator
//!
//! Factor / discount / surcharge math for a single base price.
//! Uses rust_decimal internally; all computed prices are whole currency
//! units (the source price lists carry whole-złoty prices).

use rust_decimal::prelude::*;

use shared::catalog::{ProductCommon, Surcharge};
use shared::pricing::SurchargeLine;

/// Convert f64 to Decimal for calculation
#[inline]
fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Round to whole currency units, half away from zero (spreadsheet `round`)
#[inline]
fn round_whole(value: Decimal) -> i64 {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or_default()
}

/// Multiplier chain for one product
///
/// The simulation factor, when present, overrides the whole chain; otherwise
/// the three optional levels multiply, each defaulting to 1.
#[derive(Debug, Clone, Copy, Default)]
pub struct FactorChain {
    pub product: Option<f64>,
    pub category: Option<f64>,
    pub global: Option<f64>,
    pub simulation: Option<f64>,
}

impl FactorChain {
    pub fn effective(&self) -> Decimal {
        if let Some(sim) = self.simulation {
            return to_decimal(sim);
        }
        let product = self.product.map(to_decimal).unwrap_or(Decimal::ONE);
        let category = self.category.map(to_decimal).unwrap_or(Decimal::ONE);
        let global = self.global.map(to_decimal).unwrap_or(Decimal::ONE);
        product * category * global
    }
}

/// Computed prices for one base price, before labels are attached
#[derive(Debug, Clone, PartialEq)]
pub struct ComputedPrice {
    /// round(base × effective factor)
    pub final_base: i64,
    /// Price to display (after discount, if any)
    pub display: i64,
    /// Undiscounted price, present only when a discount applied
    pub old: Option<i64>,
    /// Independent surcharge lines on top of `display`
    pub surcharges: Vec<SurchargeLine>,
}

/// Compute display prices for one base price.
///
/// - `final_base = round(base × factor)`
/// - with discount D: `display = round(final_base × (1 − D/100))` and the
///   undiscounted `final_base` is kept as the struck-through old price
/// - each surcharge S renders `round(display × (1 + S/100))` independently;
///   surcharges never alter the stored base or each other
pub fn compute_price(
    base: f64,
    factor: Decimal,
    discount: Option<f64>,
    surcharges: &[Surcharge],
) -> ComputedPrice {
    let final_base = round_whole(to_decimal(base) * factor);

    // Discount is applied to the already-rounded base so the displayed
    // numbers always agree with the struck-through price.
    let (display, old) = match discount {
        Some(d) if d > 0.0 => {
            let multiplier = Decimal::ONE - to_decimal(d) / Decimal::ONE_HUNDRED;
            let discounted = round_whole(Decimal::from(final_base) * multiplier);
            (discounted, Some(final_base))
        }
        _ => (final_base, None),
    };

    let surcharges = surcharges
        .iter()
        .map(|s| {
            let multiplier = Decimal::ONE + to_decimal(s.percent) / Decimal::ONE_HUNDRED;
            SurchargeLine {
                label: s.label.clone(),
                percent: s.percent,
                price: round_whole(Decimal::from(display) * multiplier),
            }
        })
        .collect();

    ComputedPrice {
        final_base,
        display,
        old,
        surcharges,
    }
}

/// Build the factor chain for a product from its cross-cutting fields.
pub fn chain_for(
    common: &ProductCommon,
    category_factor: Option<f64>,
    global_factor: Option<f64>,
    simulation: Option<f64>,
) -> FactorChain {
    FactorChain {
        product: common.price_factor,
        category: category_factor,
        global: global_factor,
        simulation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surcharge(label: &str, percent: f64) -> Surcharge {
        Surcharge {
            label: label.to_string(),
            percent,
        }
    }

    #[test]
    fn factor_chain_defaults_to_one() {
        let chain = FactorChain::default();
        assert_eq!(chain.effective(), Decimal::ONE);
    }

    #[test]
    fn factor_chain_multiplies_levels() {
        let chain = FactorChain {
            product: Some(1.1),
            category: Some(1.2),
            global: Some(1.05),
            simulation: None,
        };
        // 1.1 × 1.2 × 1.05 = 1.386
        assert_eq!(chain.effective(), Decimal::from_f64(1.386).unwrap());
    }

    #[test]
    fn simulation_overrides_all_levels() {
        let chain = FactorChain {
            product: Some(1.1),
            category: Some(1.2),
            global: Some(1.05),
            simulation: Some(2.0),
        };
        assert_eq!(chain.effective(), Decimal::TWO);
    }

    #[test]
    fn plain_price_is_rounded_base_times_factor() {
        let price = compute_price(1234.0, Decimal::from_f64(1.1).unwrap(), None, &[]);
        // 1234 × 1.1 = 1357.4 → 1357
        assert_eq!(price.final_base, 1357);
        assert_eq!(price.display, 1357);
        assert_eq!(price.old, None);
        assert!(price.surcharges.is_empty());
    }

    #[test]
    fn rounding_is_half_away_from_zero() {
        let price = compute_price(5.0, Decimal::from_f64(1.5).unwrap(), None, &[]);
        // 5 × 1.5 = 7.5 → 8
        assert_eq!(price.final_base, 8);
    }

    #[test]
    fn discount_applies_to_rounded_base() {
        // display(P, F, D) = round(round(P * F) * (1 - D/100))
        let p = 999.0;
        let f = 1.07;
        let d = 15.0;
        let price = compute_price(p, Decimal::from_f64(f).unwrap(), Some(d), &[]);

        let final_base = (p * f).round() as i64; // 1068.93 → 1069
        let expected = ((final_base as f64) * (1.0 - d / 100.0)).round() as i64; // 908.65 → 909
        assert_eq!(price.final_base, final_base);
        assert_eq!(price.display, expected);
        assert_eq!(price.old, Some(final_base));
    }

    #[test]
    fn zero_discount_shows_no_old_price() {
        let price = compute_price(100.0, Decimal::ONE, Some(0.0), &[]);
        assert_eq!(price.display, 100);
        assert_eq!(price.old, None);
    }

    #[test]
    fn surcharges_stack_on_discounted_price_independently() {
        let price = compute_price(
            1000.0,
            Decimal::ONE,
            Some(10.0),
            &[surcharge("hydrophobic", 8.0), surcharge("gel foam", 15.0)],
        );
        // display = 900; each surcharge from 900, not from each other
        assert_eq!(price.display, 900);
        assert_eq!(price.surcharges[0].price, 972); // 900 × 1.08
        assert_eq!(price.surcharges[1].price, 1035); // 900 × 1.15
        // base untouched
        assert_eq!(price.old, Some(1000));
    }

    #[test]
    fn property_holds_over_a_price_grid() {
        let factors = [0.9, 1.0, 1.07, 1.25];
        // Discounts in per-mille so the reference math stays in integers
        let discounts_pm: [Option<i64>; 4] = [None, Some(50), Some(125), Some(300)];
        for p in (1..50).map(|i| i as f64 * 123.45) {
            for &f in &factors {
                for &pm in &discounts_pm {
                    let d = pm.map(|pm| pm as f64 / 10.0);
                    let got = compute_price(p, Decimal::from_f64(f).unwrap(), d, &[]);
                    let final_base = (p * f).round() as i64;
                    let display = match pm {
                        Some(pm) => ((final_base * (1000 - pm)) as f64 / 1000.0).round() as i64,
                        None => final_base,
                    };
                    assert_eq!(got.final_base, final_base, "P={p} F={f}");
                    assert_eq!(got.display, display, "P={p} F={f} D={d:?}");
                }
            }
        }
    }
}
