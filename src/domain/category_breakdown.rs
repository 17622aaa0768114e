//! Percentage view over categorized spending.
//!
//! The breakdown is derived on every read and never stored. Displayed
//! percentages use largest-remainder rounding, so they always add up to
//! exactly 100.0 when anything was spent.

use std::cmp::Ordering;

use super::analysis::CategoryAmount;

/// 100% expressed in display units of 0.1%.
const DISPLAY_UNITS_TOTAL: u64 = 1000;

/// One category with its share of the total spend.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryShare {
    pub name: String,
    pub amount: f64,
    /// Share of the total in percent, at full precision.
    pub percentage: f64,
    display_tenths: u64,
}

impl CategoryShare {
    /// Returns the percentage at one decimal place.
    ///
    /// Within 0.1 of [`CategoryShare::percentage`]; across one breakdown the
    /// displayed values sum to 100.0.
    pub fn display_percentage(&self) -> f64 {
        self.display_tenths as f64 / 10.0
    }
}

/// Computes each category's share of the total, preserving input order.
///
/// Negative amounts count as zero. When the total is zero every share is 0%.
pub fn breakdown(categories: &[CategoryAmount]) -> Vec<CategoryShare> {
    let total: f64 = categories.iter().map(|c| clamp_amount(c.amount)).sum();

    let mut shares: Vec<CategoryShare> = categories
        .iter()
        .map(|category| {
            let amount = clamp_amount(category.amount);
            let percentage = if total > 0.0 {
                amount / total * 100.0
            } else {
                0.0
            };

            CategoryShare {
                name: category.name.clone(),
                amount,
                percentage,
                display_tenths: (percentage * 10.0).floor() as u64,
            }
        })
        .collect();

    if total > 0.0 {
        distribute_remainder(&mut shares);
    }

    shares
}

// Hands the tenths lost to flooring back to the shares with the largest
// fractional parts. Ties go to the earlier category.
fn distribute_remainder(shares: &mut [CategoryShare]) {
    let assigned: u64 = shares.iter().map(|share| share.display_tenths).sum();
    let missing = DISPLAY_UNITS_TOTAL.saturating_sub(assigned) as usize;

    let remainder = |share: &CategoryShare| share.percentage * 10.0 - share.display_tenths as f64;
    let mut order: Vec<usize> = (0..shares.len()).collect();
    order.sort_by(|&a, &b| {
        remainder(&shares[b])
            .partial_cmp(&remainder(&shares[a]))
            .unwrap_or(Ordering::Equal)
    });

    for index in order.into_iter().take(missing) {
        shares[index].display_tenths += 1;
    }
}

fn clamp_amount(amount: f64) -> f64 {
    if amount.is_finite() && amount > 0.0 {
        amount
    } else {
        0.0
    }
}
