//! Shipping cost tiers for a single seller within a batch

use crate::error::{BuywizardError, Result};

/// Largest item count a single Cardmarket parcel covers
pub const MAX_ITEMS_PER_SELLER: usize = 40;

/// Inclusive upper bound per tier and its flat fee, in EUR
const SHIPPING_TIERS: &[(usize, f64)] = &[(0, 0.0), (4, 1.26), (17, 2.22), (40, 3.38)];

/// Shipping fee for buying `count` items from one seller.
///
/// Counts above 40 are an error: a single parcel tops out at 40 cards and a
/// larger order needs a different shipping product entirely.
pub fn calc_shipping_cost(count: usize) -> Result<f64> {
    for &(limit, fee) in SHIPPING_TIERS {
        if count <= limit {
            return Ok(fee);
        }
    }
    Err(BuywizardError::ShippingTierExceeded(count))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_items_ship_free() {
        assert_eq!(calc_shipping_cost(0).unwrap(), 0.0);
    }

    #[test]
    fn tier_boundaries_are_inclusive() {
        assert_eq!(calc_shipping_cost(1).unwrap(), 1.26);
        assert_eq!(calc_shipping_cost(4).unwrap(), 1.26);
        assert_eq!(calc_shipping_cost(5).unwrap(), 2.22);
        assert_eq!(calc_shipping_cost(17).unwrap(), 2.22);
        assert_eq!(calc_shipping_cost(18).unwrap(), 3.38);
        assert_eq!(calc_shipping_cost(40).unwrap(), 3.38);
    }

    #[test]
    fn fee_is_monotone_in_item_count() {
        let mut prev = 0.0;
        for n in 0..=MAX_ITEMS_PER_SELLER {
            let fee = calc_shipping_cost(n).unwrap();
            assert!(fee >= prev, "fee decreased at {n} items");
            prev = fee;
        }
    }

    #[test]
    fn above_top_tier_is_an_error() {
        match calc_shipping_cost(41).unwrap_err() {
            BuywizardError::ShippingTierExceeded(41) => {}
            other => panic!("Expected ShippingTierExceeded, got: {other:?}"),
        }
    }
}
