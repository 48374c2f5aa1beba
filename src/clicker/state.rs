/// Swag Clicker game state definitions.

use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

/// Kinds of purchasable upgrades.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UpgradeKind {
    ClickPower,
    AutoClicker,
    Double,
    Triple,
    Critical,
    Prestige,
}

impl UpgradeKind {
    /// All upgrade kinds in display order.
    pub fn all() -> &'static [UpgradeKind] {
        &[
            UpgradeKind::ClickPower,
            UpgradeKind::AutoClicker,
            UpgradeKind::Double,
            UpgradeKind::Triple,
            UpgradeKind::Critical,
            UpgradeKind::Prestige,
        ]
    }

    /// Position in `all()`, also the slot in `Upgrades`.
    pub fn index(self) -> usize {
        match self {
            UpgradeKind::ClickPower => 0,
            UpgradeKind::AutoClicker => 1,
            UpgradeKind::Double => 2,
            UpgradeKind::Triple => 3,
            UpgradeKind::Critical => 4,
            UpgradeKind::Prestige => 5,
        }
    }

    pub fn from_index(idx: usize) -> Option<UpgradeKind> {
        UpgradeKind::all().get(idx).copied()
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            UpgradeKind::ClickPower => "Click Power",
            UpgradeKind::AutoClicker => "Auto Clicker",
            UpgradeKind::Double => "Double",
            UpgradeKind::Triple => "Triple",
            UpgradeKind::Critical => "Critical",
            UpgradeKind::Prestige => "Prestige",
        }
    }

    /// One-line effect description.
    pub fn description(self) -> &'static str {
        match self {
            UpgradeKind::ClickPower => "+5 Swag per click",
            UpgradeKind::AutoClicker => "+1 Swag per second",
            UpgradeKind::Double => "x2 all earnings",
            UpgradeKind::Triple => "x3 all earnings",
            UpgradeKind::Critical => "+5% critical chance",
            UpgradeKind::Prestige => "reset for x1.5 forever",
        }
    }

    /// Cost of the first level.
    pub fn base_cost(self) -> f64 {
        match self {
            UpgradeKind::ClickPower => 100.0,
            UpgradeKind::AutoClicker => 500.0,
            UpgradeKind::Double => 1_000.0,
            UpgradeKind::Triple => 5_000.0,
            UpgradeKind::Critical => 2_000.0,
            UpgradeKind::Prestige => 50_000.0,
        }
    }

    /// Growth factor applied per owned level.
    pub fn cost_multiplier(self) -> f64 {
        match self {
            UpgradeKind::Prestige => 2.0,
            _ => 1.15,
        }
    }

    /// Key to buy (1-6 in display order).
    pub fn key(self) -> char {
        match self {
            UpgradeKind::ClickPower => '1',
            UpgradeKind::AutoClicker => '2',
            UpgradeKind::Double => '3',
            UpgradeKind::Triple => '4',
            UpgradeKind::Critical => '5',
            UpgradeKind::Prestige => '6',
        }
    }

    pub fn from_key(key: char) -> Option<UpgradeKind> {
        UpgradeKind::all().iter().copied().find(|k| k.key() == key)
    }
}

impl std::fmt::Display for UpgradeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Level and pricing of one upgrade kind.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpgradeState {
    pub level: u32,
    pub base_cost: f64,
    pub cost_multiplier: f64,
}

impl UpgradeState {
    pub fn new(kind: UpgradeKind) -> Self {
        Self {
            level: 0,
            base_cost: kind.base_cost(),
            cost_multiplier: kind.cost_multiplier(),
        }
    }
}

/// Exactly one `UpgradeState` per `UpgradeKind`, indexed by kind.
///
/// Saved as a map keyed by kind name; every kind must be present on load.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "UpgradeTable", into = "UpgradeTable")]
pub struct Upgrades([UpgradeState; 6]);

impl Upgrades {
    pub fn new() -> Self {
        Self([
            UpgradeState::new(UpgradeKind::ClickPower),
            UpgradeState::new(UpgradeKind::AutoClicker),
            UpgradeState::new(UpgradeKind::Double),
            UpgradeState::new(UpgradeKind::Triple),
            UpgradeState::new(UpgradeKind::Critical),
            UpgradeState::new(UpgradeKind::Prestige),
        ])
    }

    pub fn level(&self, kind: UpgradeKind) -> u32 {
        self[kind].level
    }

    /// `(kind, state)` pairs in display order.
    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = (UpgradeKind, &UpgradeState)> {
        UpgradeKind::all().iter().map(move |&k| (k, &self[k]))
    }
}

impl Default for Upgrades {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<UpgradeKind> for Upgrades {
    type Output = UpgradeState;

    fn index(&self, kind: UpgradeKind) -> &UpgradeState {
        &self.0[kind.index()]
    }
}

impl IndexMut<UpgradeKind> for Upgrades {
    fn index_mut(&mut self, kind: UpgradeKind) -> &mut UpgradeState {
        &mut self.0[kind.index()]
    }
}

/// Serialized form of `Upgrades`: one named field per kind.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpgradeTable {
    click_power: UpgradeState,
    auto_clicker: UpgradeState,
    double: UpgradeState,
    triple: UpgradeState,
    critical: UpgradeState,
    prestige: UpgradeState,
}

impl From<UpgradeTable> for Upgrades {
    fn from(t: UpgradeTable) -> Self {
        Self([
            t.click_power,
            t.auto_clicker,
            t.double,
            t.triple,
            t.critical,
            t.prestige,
        ])
    }
}

impl From<Upgrades> for UpgradeTable {
    fn from(u: Upgrades) -> Self {
        let [click_power, auto_clicker, double, triple, critical, prestige] = u.0;
        Self {
            click_power,
            auto_clicker,
            double,
            triple,
            critical,
            prestige,
        }
    }
}

/// Full state of a Swag Clicker game. This is exactly what gets saved.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    /// Spendable Swag.
    pub points: f64,
    /// Lifetime Swag earned. Survives prestige.
    pub total_earned: f64,
    /// Swag per click before multipliers. Cached from the ClickPower level.
    pub click_power: f64,
    /// Permanent bonus, x1.5 per prestige.
    pub prestige_multiplier: f64,
    pub upgrades: Upgrades,
}

impl GameState {
    pub fn new() -> Self {
        Self {
            points: 0.0,
            total_earned: 0.0,
            click_power: 1.0,
            prestige_multiplier: 1.0,
            upgrades: Upgrades::new(),
        }
    }

    /// Number of prestiges performed so far.
    pub fn prestige_count(&self) -> u32 {
        self.upgrades.level(UpgradeKind::Prestige)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

/// Click power for a given ClickPower level.
pub fn click_power_for_level(level: u32) -> f64 {
    1.0 + 5.0 * level as f64
}
