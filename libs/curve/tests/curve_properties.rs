//! Curve Property Tests
//!
//! Mathematical properties that must hold for every valid input, not just
//! the hand-picked cases in the unit tests.

use ivy_curve::{
    dec, game_quote, ivy_quote, ConstantProduct, Decimal, FeePolicy, GamePool, PoolFees,
    SqrtCurve, WorldState,
};
use proptest::prelude::*;

/// Relative closeness, with an absolute floor for values near zero
fn approx_eq(actual: Decimal, expected: Decimal) -> bool {
    let tolerance = (expected.abs() * dec!(0.000000001)).max(dec!(0.000000001));
    (actual - expected).abs() <= tolerance
}

// Property test strategies
prop_compose! {
    fn amount()
        (units in 1u64..10_000_000_000u64) -> Decimal {
        // Up to ten million with three decimals
        Decimal::new(units as i64, 3)
    }
}

prop_compose! {
    fn reserve()
        (units in 1_000u64..10_000_000_000u64) -> Decimal {
        Decimal::new(units as i64, 3)
    }
}

prop_compose! {
    fn scale()
        (micros in 1u64..100_000_000u64) -> Decimal {
        // 0.000001 ..= 100
        Decimal::new(micros as i64, 6)
    }
}

prop_compose! {
    fn supply()
        (units in 0u64..1_000_000_000u64) -> Decimal {
        Decimal::new(units as i64, 3)
    }
}

prop_compose! {
    fn fee_bps()
        (bps in 0u32..1_000u32) -> u32 {
        bps
    }
}

prop_compose! {
    fn world_state()
        (sold in supply(), headroom in amount(), c in scale()) -> WorldState {
        WorldState::new(sold, sold + headroom, c).unwrap()
    }
}

proptest! {
    /// Property: the swap preserves x·y=k and never drains the output reserve
    #[test]
    fn constant_product_invariant(
        s in amount(),
        r1 in reserve(),
        r2 in reserve(),
    ) {
        let out = ConstantProduct::swap_base_input(s, r1, r2).unwrap().unwrap();

        prop_assert!(approx_eq(out * (r1 + s), s * r2),
                    "{} * ({} + {}) != {} * {}", out, r1, s, s, r2);
        prop_assert!(out < r2, "output {} drained reserve {}", out, r2);
    }

    /// Property: no area to the left of the start
    #[test]
    fn integral_is_zero_for_reversed_bounds(
        c in scale(),
        a in supply(),
        back in supply(),
    ) {
        let b = (a - back).max(Decimal::ZERO);
        prop_assert_eq!(SqrtCurve::integrate_sqrt(c, a, b).unwrap(), Decimal::ZERO);
    }

    /// Property: area strictly grows with the right bound
    #[test]
    fn integral_strictly_increasing(
        c in scale(),
        a in supply(),
        step1 in 1u64..1_000_000u64,
        step2 in 1u64..1_000_000u64,
    ) {
        let b1 = a + Decimal::from(step1);
        let b2 = b1 + Decimal::from(step2);
        let area1 = SqrtCurve::integrate_sqrt(c, a, b1).unwrap();
        let area2 = SqrtCurve::integrate_sqrt(c, a, b2).unwrap();

        prop_assert!(area1 > Decimal::ZERO);
        prop_assert!(area2 > area1, "area({}) = {} not above area({}) = {}", b2, area2, b1, area1);
    }

    /// Property: the right bound inverts the integral
    #[test]
    fn right_bound_inverts_integral(
        c in scale(),
        a in supply(),
        width in amount(),
    ) {
        let b = a + width;
        let area = SqrtCurve::integrate_sqrt(c, a, b).unwrap();
        let recovered = SqrtCurve::right_bound(c, area, a).unwrap().unwrap();

        prop_assert!(approx_eq(recovered, b), "expected {}, recovered {}", b, recovered);
    }

    /// Property: buying with a reserve then redeeming the tokens gives the reserve back
    #[test]
    fn reserve_in_then_tokens_in_round_trip(
        world in world_state(),
        deposit in amount(),
    ) {
        let Some(tokens) = SqrtCurve::exact_reserve_in(
            world.ivy_sold,
            world.ivy_curve_max,
            world.curve_input_scale,
            deposit,
        ).unwrap() else {
            // Deposit would overrun the curve
            return Ok(());
        };

        let new_supply = world.ivy_sold + tokens;
        prop_assert!(new_supply <= world.ivy_curve_max);

        let reserve = SqrtCurve::exact_tokens_in(new_supply, world.curve_input_scale, tokens)
            .unwrap()
            .unwrap();
        prop_assert!(approx_eq(reserve, deposit), "deposited {}, redeemed {}", deposit, reserve);
    }

    /// Property: current price grows with supply
    #[test]
    fn current_price_monotonic(
        c in scale(),
        s in supply(),
        step in amount(),
    ) {
        let before = SqrtCurve::current_price(s, c).unwrap();
        let after = SqrtCurve::current_price(s + step, c).unwrap();
        prop_assert!(after > before);
    }

    /// Property: an empty side means no quote, a zero input means a zero quote
    #[test]
    fn game_quote_degenerate_pools(
        liquid in reserve(),
        input in amount(),
        is_buy in any::<bool>(),
        ivy_fee in fee_bps(),
        game_fee in fee_bps(),
        world in world_state(),
    ) {
        let fees = PoolFees::new(ivy_fee, game_fee, FeePolicy::Reject).unwrap();

        for pool in [
            GamePool::new(Decimal::ZERO, liquid).unwrap(),
            GamePool::new(liquid, Decimal::ZERO).unwrap(),
        ] {
            prop_assert_eq!(game_quote(&pool, input, is_buy, fees, &world).unwrap(), None);

            let zero = game_quote(&pool, Decimal::ZERO, is_buy, fees, &world)
                .unwrap()
                .unwrap();
            prop_assert!(zero.is_zero());
        }
    }

    /// Property: reported price impact stays within [0, 10000]
    #[test]
    fn price_impact_clamped(
        ivy in reserve(),
        game in reserve(),
        input in amount(),
        is_buy in any::<bool>(),
        ivy_fee in fee_bps(),
        game_fee in fee_bps(),
        world in world_state(),
    ) {
        let pool = GamePool::new(ivy, game).unwrap();
        let fees = PoolFees::new(ivy_fee, game_fee, FeePolicy::Reject).unwrap();

        if let Some(quote) = game_quote(&pool, input, is_buy, fees, &world).unwrap() {
            prop_assert!(quote.price_impact_bps <= 10_000);
            prop_assert!(quote.output_amount >= Decimal::ZERO);
        }
        if let Some(quote) = ivy_quote(&world, input, is_buy).unwrap() {
            prop_assert!(quote.price_impact_bps <= 10_000);
        }
    }
}

#[test]
fn constant_product_reference_scenario() {
    let out = ConstantProduct::swap_base_input(dec!(100), dec!(1000), dec!(1000))
        .unwrap()
        .unwrap();
    assert!(approx_eq(out, dec!(90.909090909090909090909090909)));
}

#[test]
fn current_price_reference_scenario() {
    assert_eq!(
        SqrtCurve::current_price(dec!(100), dec!(4)).unwrap(),
        dec!(20)
    );
}
