//! Property tests for the discount rule

use dukkan_core::{
    cart::Cart,
    order::{CartLine, DiscountPolicy},
};
use proptest::prelude::*;

proptest! {
    #[test]
    fn below_threshold_pays_subtotal(cents in 0u32..50_000) {
        let subtotal = f64::from(cents) / 100.0;
        let totals = DiscountPolicy::default().apply(subtotal);
        prop_assert_eq!(totals.discount, 0.0);
        prop_assert_eq!(totals.payable, subtotal);
    }

    #[test]
    fn at_or_above_threshold_takes_ten_percent(cents in 50_000u32..10_000_000) {
        let subtotal = f64::from(cents) / 100.0;
        let totals = DiscountPolicy::default().apply(subtotal);
        prop_assert_eq!(totals.discount, subtotal * 0.10);
        prop_assert_eq!(totals.payable, subtotal - totals.discount);
    }

    #[test]
    fn payable_never_exceeds_subtotal(
        prices in prop::collection::vec(0u32..100_000, 0..8),
        quantity in 1u32..5,
    ) {
        let mut cart = Cart::new();
        for (i, price) in prices.iter().enumerate() {
            cart.add_line(CartLine::new(format!("p{}", i), f64::from(*price), quantity)).unwrap();
        }
        let totals = cart.totals(&DiscountPolicy::default());
        prop_assert!(totals.payable <= totals.subtotal);
        prop_assert!(totals.discount >= 0.0);
        prop_assert_eq!(totals.subtotal, cart.subtotal());
    }
}

#[test]
fn threshold_is_inclusive() {
    let totals = DiscountPolicy::default().apply(500.0);
    assert_eq!(totals.discount, 50.0);
    assert_eq!(totals.payable, 450.0);

    let totals = DiscountPolicy::default().apply(499.99);
    assert_eq!(totals.discount, 0.0);
}
