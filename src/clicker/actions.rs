//! Semantic action IDs for Swag Clicker click targets.
//!
//! These IDs are registered during render and dispatched via `InputEvent::Click`.

pub const CLICK: u16 = 0;

// ── Upgrade purchase (base + UpgradeKind::index()) ──────────────
pub const BUY_UPGRADE_BASE: u16 = 100;

pub const RESET: u16 = 500;
