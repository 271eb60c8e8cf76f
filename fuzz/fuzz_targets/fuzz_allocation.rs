#![no_main]

//! Allocation fuzzer.
//!
//! Builds arbitrary planet graphs and runs every policy on them:
//! 1. Orders only leave owned planets, along edges
//! 2. Every order has positive finite power
//! 3. A planet never sends more than its health above the reserve

use arbitrary::Arbitrary;
use frontline::engine::{
    AllocationConfig, NearestFrontier, OracleGradient, OracleSplit, PAIR_FEATURES,
    PLANET_FEATURES, Policy, TurnView,
};
use frontline::game::{GameSettings, Owner, Planet, Pos, Turn};
use frontline::oracle::FnOracle;
use libfuzzer_sys::fuzz_target;

/// A fuzzer-generated planet.
#[derive(Arbitrary, Debug)]
struct FuzzPlanet {
    x: i16,
    y: i16,
    /// 0 = mine, 1 = neutral, anything else = enemy.
    owner: u8,
    health: u16,
    neighbors: Vec<u8>,
}

fn build_turn(planets: &[FuzzPlanet]) -> Turn {
    let count = planets.len();
    let planets = planets
        .iter()
        .enumerate()
        .map(|(id, p)| {
            let owner = match p.owner {
                0 => Owner::Mine,
                1 => Owner::Neutral,
                other => Owner::Enemy(u32::from(other)),
            };
            let neighbors = p
                .neighbors
                .iter()
                .take(8)
                .map(|&n| usize::from(n) % count)
                .collect();
            Planet::new(
                id,
                Pos::new(f64::from(p.x), f64::from(p.y)),
                1.0,
                owner,
                f64::from(p.health) / 16.0,
                neighbors,
            )
        })
        .collect();
    Turn::new(planets, Vec::new())
}

fn check(policy: &dyn Policy, view: &TurnView<'_>) {
    let orders = policy.decide(view);
    let allocation = policy.allocation();

    let mut sent = vec![0.0_f64; view.turn.planets.len()];
    for order in &orders {
        assert!(order.power.is_finite() && order.power > 0.0);
        let source = view.index.get(order.source).unwrap_or_else(|| panic!("unknown source"));
        assert!(source.owner.is_mine());
        assert!(source.neighbors.contains(&order.destination));
        sent[order.source] += order.power;
    }
    for planet in view.my_planets() {
        let budget = allocation.available(planet.health).max(0.0);
        assert!(sent[planet.id] <= budget + 1e-6, "planet {} overspent", planet.id);
    }
}

fuzz_target!(|planets: Vec<FuzzPlanet>| {
    if planets.is_empty() || planets.len() > 64 {
        return;
    }
    let settings = GameSettings::new(0, 2, 0);
    let turn = build_turn(&planets);
    let Ok(view) = TurnView::new(&settings, &turn) else {
        return;
    };

    check(&NearestFrontier::default(), &view);
    check(
        &OracleSplit::new(
            FnOracle::new(PAIR_FEATURES, |x: &[f64]| x[0] - x[1] + x[3]),
            AllocationConfig::SPLIT,
        ),
        &view,
    );
    check(
        &OracleGradient::new(
            FnOracle::new(PLANET_FEATURES, |x: &[f64]| x.iter().sum::<f64>().sin()),
            AllocationConfig::GRADIENT,
        ),
        &view,
    );
});
