//! Swag Clicker economy. Pure functions over `GameState`.
//!
//! Nothing here persists or renders; `ClickerGame` sequences those after
//! each mutation.

use rand::Rng;

use super::error::BuyError;
use super::state::{click_power_for_level, GameState, UpgradeKind};

/// Critical chance gained per Critical level. Uncapped: level 20 always crits.
pub const CRIT_CHANCE_PER_LEVEL: f64 = 0.05;

/// Factor applied to `prestige_multiplier` on every prestige.
pub const PRESTIGE_BONUS: f64 = 1.5;

/// Result of a manual click.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClickOutcome {
    pub earned: f64,
    pub was_critical: bool,
}

/// A completed purchase.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Purchase {
    pub kind: UpgradeKind,
    pub cost: f64,
    /// Level after the purchase.
    pub level: u32,
    /// New prestige multiplier when this purchase triggered a prestige.
    pub prestiged: Option<f64>,
}

/// Price of the next level: `floor(base * mult ^ level)`.
pub fn cost_of(state: &GameState, kind: UpgradeKind) -> f64 {
    let u = &state.upgrades[kind];
    (u.base_cost * u.cost_multiplier.powf(u.level as f64)).floor()
}

/// Combined bonus applied to clicks and passive income.
///
/// Double and Triple are flat: owning one level is the same as owning ten.
pub fn multiplier(state: &GameState) -> f64 {
    let mut m = 1.0;
    if state.upgrades.level(UpgradeKind::Double) > 0 {
        m *= 2.0;
    }
    if state.upgrades.level(UpgradeKind::Triple) > 0 {
        m *= 3.0;
    }
    m * state.prestige_multiplier
}

/// Passive Swag per tick (one tick per second).
pub fn per_second(state: &GameState) -> f64 {
    state.upgrades.level(UpgradeKind::AutoClicker) as f64 * multiplier(state)
}

/// Swag from a non-critical click.
pub fn per_click(state: &GameState) -> f64 {
    state.click_power * multiplier(state)
}

pub fn crit_chance(state: &GameState) -> f64 {
    state.upgrades.level(UpgradeKind::Critical) as f64 * CRIT_CHANCE_PER_LEVEL
}

/// Manual click. Draws one sample from `rng` only when Critical is owned.
pub fn click<R: Rng + ?Sized>(state: &mut GameState, rng: &mut R) -> ClickOutcome {
    let mut earned = per_click(state);
    let mut was_critical = false;

    if state.upgrades.level(UpgradeKind::Critical) > 0 && rng.gen::<f64>() < crit_chance(state) {
        earned *= 2.0;
        was_critical = true;
    }

    state.points += earned;
    state.total_earned += earned;
    ClickOutcome {
        earned,
        was_critical,
    }
}

/// Passive accrual for one tick. Returns the amount added; 0 means nothing changed.
pub fn tick(state: &mut GameState) -> f64 {
    let amount = per_second(state);
    if amount == 0.0 {
        return 0.0;
    }
    state.points += amount;
    state.total_earned += amount;
    amount
}

/// Buy one level of `kind`. Buying Prestige performs the prestige reset.
pub fn buy(state: &mut GameState, kind: UpgradeKind) -> Result<Purchase, BuyError> {
    let cost = cost_of(state, kind);
    if state.points < cost {
        return Err(BuyError::InsufficientFunds {
            kind,
            cost,
            points: state.points,
        });
    }

    state.points -= cost;
    state.upgrades[kind].level += 1;
    let level = state.upgrades[kind].level;

    let prestiged = match kind {
        UpgradeKind::ClickPower => {
            state.click_power = click_power_for_level(level);
            None
        }
        UpgradeKind::Prestige => Some(prestige(state)),
        _ => None,
    };

    Ok(Purchase {
        kind,
        cost,
        level,
        prestiged,
    })
}

/// Prestige transition. Returns the new multiplier.
///
/// Only reachable from `buy`, whose balance check against the pre-purchase
/// cost is the prestige requirement. Prestige's own level is the prestige
/// counter and survives; `total_earned` survives too.
fn prestige(state: &mut GameState) -> f64 {
    state.prestige_multiplier *= PRESTIGE_BONUS;
    state.points = 0.0;
    state.click_power = 1.0;
    for &kind in UpgradeKind::all() {
        if kind != UpgradeKind::Prestige {
            state.upgrades[kind].level = 0;
        }
    }
    state.prestige_multiplier
}

/// Compact magnitude format: `999`, `1.50K`, `2.50M`, `3.00B`.
pub fn format_number(n: f64) -> String {
    if n >= 1e9 {
        format!("{}B", to_fixed_2(n / 1e9))
    } else if n >= 1e6 {
        format!("{}M", to_fixed_2(n / 1e6))
    } else if n >= 1e3 {
        format!("{}K", to_fixed_2(n / 1e3))
    } else {
        (n.floor() as i64).to_string()
    }
}

/// Two-decimal rendering of a value >= 1 that rounds exact ties upward
/// (`1.125` -> `1.13`), where `{:.2}` would round to even.
///
/// Defined for finite `1 <= x < 1e21`. From `1e21` up the result switches to
/// shortest exponent form (`1e+21`), and non-finite input gives `Infinity`.
pub(crate) fn to_fixed_2(x: f64) -> String {
    if !x.is_finite() {
        return "Infinity".to_string();
    }
    if x >= 1e21 {
        return format!("{x:e}").replacen('e', "e+", 1);
    }
    // Values >= 1 have at most 52 fractional decimal digits, so this is exact.
    let exact = format!("{:.60}", x);
    let (int_part, frac) = exact.split_once('.').unwrap_or((exact.as_str(), ""));
    let frac = frac.as_bytes();

    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(frac.iter().copied().chain(std::iter::repeat(b'0')).take(2))
        .map(|b| b - b'0')
        .collect();

    if frac.get(2).is_some_and(|&d| d >= b'5') {
        let mut i = digits.len();
        loop {
            if i == 0 {
                digits.insert(0, 1);
                break;
            }
            i -= 1;
            if digits[i] == 9 {
                digits[i] = 0;
            } else {
                digits[i] += 1;
                break;
            }
        }
    }

    let s: String = digits.iter().map(|d| (b'0' + d) as char).collect();
    let (whole, cents) = s.split_at(s.len() - 2);
    format!("{whole}.{cents}")
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::mock::StepRng;

    // ── Strategy helpers ──────────────────────────────────

    fn arb_kind() -> impl Strategy<Value = UpgradeKind> {
        prop_oneof![
            Just(UpgradeKind::ClickPower),
            Just(UpgradeKind::AutoClicker),
            Just(UpgradeKind::Double),
            Just(UpgradeKind::Triple),
            Just(UpgradeKind::Critical),
            Just(UpgradeKind::Prestige),
        ]
    }

    fn arb_state() -> impl Strategy<Value = GameState> {
        (
            0.0f64..1e7,
            0.0f64..1e8,
            proptest::collection::vec(0u32..25, 6),
            0u32..6,
        )
            .prop_map(|(points, earned, levels, prestiges)| {
                let mut state = GameState::new();
                state.points = points;
                state.total_earned = earned;
                for (&kind, &level) in UpgradeKind::all().iter().zip(&levels) {
                    state.upgrades[kind].level = level;
                }
                state.click_power = click_power_for_level(levels[0]);
                state.prestige_multiplier = PRESTIGE_BONUS.powi(prestiges as i32);
                state
            })
    }

    // ── cost curve ────────────────────────────────────────

    proptest! {
        #[test]
        fn prop_cost_matches_formula(kind in arb_kind(), level in 0u32..60) {
            let mut state = GameState::new();
            state.upgrades[kind].level = level;
            let expected = (kind.base_cost() * kind.cost_multiplier().powf(level as f64)).floor();
            prop_assert_eq!(cost_of(&state, kind), expected);
        }

        #[test]
        fn prop_cost_strictly_increases(kind in arb_kind(), level in 0u32..60) {
            let mut state = GameState::new();
            state.upgrades[kind].level = level;
            let before = cost_of(&state, kind);
            state.upgrades[kind].level = level + 1;
            let after = cost_of(&state, kind);
            prop_assert!(after > before, "{} -> {}", before, after);
        }
    }

    // ── buy ───────────────────────────────────────────────

    proptest! {
        #[test]
        fn prop_buy_is_all_or_nothing(state in arb_state(), kind in arb_kind()) {
            let mut after = state.clone();
            let cost = cost_of(&state, kind);
            match buy(&mut after, kind) {
                Ok(purchase) => {
                    prop_assert!(state.points >= cost);
                    prop_assert_eq!(purchase.cost, cost);
                    prop_assert!(after.points >= 0.0);
                    if kind != UpgradeKind::Prestige {
                        prop_assert_eq!(after.points, state.points - cost);
                        prop_assert_eq!(after.upgrades.level(kind), state.upgrades.level(kind) + 1);
                    }
                }
                Err(_) => {
                    prop_assert!(state.points < cost);
                    prop_assert_eq!(after, state);
                }
            }
        }

        #[test]
        fn prop_click_power_stays_in_sync(mut state in arb_state()) {
            state.points = 1e12;
            for _ in 0..5 {
                buy(&mut state, UpgradeKind::ClickPower).unwrap();
                prop_assert_eq!(
                    state.click_power,
                    click_power_for_level(state.upgrades.level(UpgradeKind::ClickPower))
                );
            }
        }

        #[test]
        fn prop_prestige_postconditions(mut state in arb_state()) {
            state.points = state.points.max(cost_of(&state, UpgradeKind::Prestige));
            let before = state.clone();
            buy(&mut state, UpgradeKind::Prestige).unwrap();

            prop_assert_eq!(state.points, 0.0);
            prop_assert_eq!(state.click_power, 1.0);
            prop_assert_eq!(state.total_earned, before.total_earned);
            prop_assert_eq!(state.prestige_multiplier, before.prestige_multiplier * PRESTIGE_BONUS);
            prop_assert_eq!(
                state.upgrades.level(UpgradeKind::Prestige),
                before.upgrades.level(UpgradeKind::Prestige) + 1
            );
            for &kind in &UpgradeKind::all()[..5] {
                prop_assert_eq!(state.upgrades.level(kind), 0);
            }
        }
    }

    // ── multiplier / earnings ─────────────────────────────

    proptest! {
        #[test]
        fn prop_multiplier_six_with_both(
            double in 1u32..100,
            triple in 1u32..100,
            prestiges in 0i32..10,
        ) {
            let mut state = GameState::new();
            state.upgrades[UpgradeKind::Double].level = double;
            state.upgrades[UpgradeKind::Triple].level = triple;
            state.prestige_multiplier = PRESTIGE_BONUS.powi(prestiges);
            prop_assert_eq!(multiplier(&state), 6.0 * state.prestige_multiplier);
        }

        #[test]
        fn prop_click_earns_into_both_balances(mut state in arb_state(), roll in any::<u64>()) {
            let before = state.clone();
            let outcome = click(&mut state, &mut StepRng::new(roll, 0));
            let base = per_click(&before);
            prop_assert!(outcome.earned == base || outcome.earned == base * 2.0);
            prop_assert_eq!(outcome.was_critical, outcome.earned == base * 2.0 && base > 0.0);
            prop_assert_eq!(state.points, before.points + outcome.earned);
            prop_assert_eq!(state.total_earned, before.total_earned + outcome.earned);
        }

        #[test]
        fn prop_prestige_multiplier_never_decreases(mut state in arb_state(), kinds in proptest::collection::vec(arb_kind(), 1..20)) {
            state.points = 1e9;
            let mut last = state.prestige_multiplier;
            for kind in kinds {
                let _ = buy(&mut state, kind);
                tick(&mut state);
                prop_assert!(state.prestige_multiplier >= last);
                last = state.prestige_multiplier;
            }
        }
    }

    // ── format_number properties ──────────────────────────

    proptest! {
        #[test]
        fn prop_format_small_is_floor(n in 0.0f64..1e3) {
            prop_assert_eq!(format_number(n), (n.floor() as i64).to_string());
        }

        #[test]
        fn prop_format_suffix_and_precision(n in 1e3f64..1e12) {
            let s = format_number(n);
            let (suffix, scale) = if n >= 1e9 {
                ('B', 1e9)
            } else if n >= 1e6 {
                ('M', 1e6)
            } else {
                ('K', 1e3)
            };
            prop_assert!(s.ends_with(suffix), "got: {}", s);
            let body = &s[..s.len() - 1];
            let (_, decimals) = body.split_once('.').unwrap();
            prop_assert_eq!(decimals.len(), 2);
            let value: f64 = body.parse().unwrap();
            prop_assert!((value - n / scale).abs() <= 0.005 + 1e-9, "{} vs {}", s, n);
        }
    }
}
