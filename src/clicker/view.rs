//! Presentation port and the retained view model the renderer draws.

use super::state::UpgradeKind;

/// How long the prestige announcement stays up.
pub const PRESTIGE_BANNER_MS: f64 = 3_000.0;

/// Colour hint for transient messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    Normal,
    Critical,
}

/// Everything the game tells the player goes through here.
pub trait Presenter {
    /// Pre-formatted headline numbers.
    fn render_stats(&mut self, points: &str, total_earned: &str, per_click: &str, per_second: &str);

    /// Called once per kind on every refresh.
    fn render_upgrade(&mut self, kind: UpgradeKind, level: u32, cost: f64, affordable: bool);

    /// Fire-and-forget notification; replaces any message still showing.
    fn show_transient_message(&mut self, text: &str, tone: Tone);

    /// Blocking yes/no gate in front of destructive actions.
    fn confirm_destructive_action(&mut self, prompt: &str) -> bool;

    fn notify_prestige(&mut self, multiplier: &str);
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Stats {
    pub points: String,
    pub total_earned: String,
    pub per_click: String,
    pub per_second: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct UpgradeRow {
    pub kind: UpgradeKind,
    pub level: u32,
    /// Cost already run through `format_number`.
    pub cost: String,
    pub affordable: bool,
}

/// A message that fades after `remaining_ms`.
#[derive(Clone, Debug, PartialEq)]
pub struct Flash {
    pub text: String,
    pub tone: Tone,
    pub remaining_ms: f64,
}

/// Browser-facing presenter: remembers the last thing it was told so the
/// frame loop can redraw it.
pub struct View {
    stats: Stats,
    upgrades: Vec<UpgradeRow>,
    message: Option<Flash>,
    banner: Option<Flash>,
    feedback_ms: f64,
}

impl View {
    pub fn new(feedback_ms: u32) -> Self {
        Self {
            stats: Stats::default(),
            upgrades: UpgradeKind::all()
                .iter()
                .map(|&kind| UpgradeRow {
                    kind,
                    level: 0,
                    cost: String::new(),
                    affordable: false,
                })
                .collect(),
            message: None,
            banner: None,
            feedback_ms: feedback_ms as f64,
        }
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    /// One row per kind, in display order.
    pub fn upgrades(&self) -> &[UpgradeRow] {
        &self.upgrades
    }

    pub fn message(&self) -> Option<&Flash> {
        self.message.as_ref()
    }

    pub fn prestige_banner(&self) -> Option<&Flash> {
        self.banner.as_ref()
    }

    /// Age the message and banner by `elapsed_ms`, dropping expired ones.
    pub fn advance(&mut self, elapsed_ms: f64) {
        if elapsed_ms <= 0.0 {
            return;
        }
        for slot in [&mut self.message, &mut self.banner] {
            let expired = match slot {
                Some(flash) => {
                    flash.remaining_ms -= elapsed_ms;
                    flash.remaining_ms <= 0.0
                }
                None => false,
            };
            if expired {
                *slot = None;
            }
        }
    }
}

impl Presenter for View {
    fn render_stats(&mut self, points: &str, total_earned: &str, per_click: &str, per_second: &str) {
        self.stats = Stats {
            points: points.to_string(),
            total_earned: total_earned.to_string(),
            per_click: per_click.to_string(),
            per_second: per_second.to_string(),
        };
    }

    fn render_upgrade(&mut self, kind: UpgradeKind, level: u32, cost: f64, affordable: bool) {
        let row = &mut self.upgrades[kind.index()];
        row.level = level;
        row.cost = super::logic::format_number(cost);
        row.affordable = affordable;
    }

    fn show_transient_message(&mut self, text: &str, tone: Tone) {
        self.message = Some(Flash {
            text: text.to_string(),
            tone,
            remaining_ms: self.feedback_ms,
        });
    }

    fn confirm_destructive_action(&mut self, prompt: &str) -> bool {
        browser_confirm(prompt)
    }

    fn notify_prestige(&mut self, multiplier: &str) {
        self.banner = Some(Flash {
            text: format!("🎉 PRESTIGE ACTIVATED! New Multiplier: x{multiplier}"),
            tone: Tone::Critical,
            remaining_ms: PRESTIGE_BANNER_MS,
        });
    }
}

#[cfg(target_arch = "wasm32")]
fn browser_confirm(prompt: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(prompt).ok())
        .unwrap_or(false)
}

/// No dialog outside the browser: destructive actions are declined.
#[cfg(not(target_arch = "wasm32"))]
fn browser_confirm(prompt: &str) -> bool {
    log::debug!("declining confirmation without a browser: {prompt}");
    false
}
