/// Swag Clicker: click for Swag, buy upgrades, prestige for a permanent bonus.

pub mod actions;
pub mod error;
pub mod logic;
pub mod render;
pub mod save;
pub mod state;
pub mod view;

use rand::Rng;

use crate::input::InputEvent;

use error::BuyError;
use logic::{ClickOutcome, Purchase};
use save::Storage;
use state::{GameState, UpgradeKind};
use view::{Presenter, Tone};

pub const RESET_PROMPT: &str = "⚠️ Reset the entire game? You will lose all progress!";

/// Owns the game state and its ports. Every operation mutates the state,
/// then persists it, then refreshes the presenter.
pub struct ClickerGame<S, P, R> {
    pub state: GameState,
    storage: S,
    presenter: P,
    rng: R,
    storage_key: String,
}

impl<S: Storage, P: Presenter, R: Rng> ClickerGame<S, P, R> {
    /// Start from whatever `storage` holds under `storage_key`, or a new game.
    pub fn load(storage: S, presenter: P, rng: R, storage_key: impl Into<String>) -> Self {
        let storage_key = storage_key.into();
        let state = save::load_game(&storage, &storage_key);
        let mut game = Self {
            state,
            storage,
            presenter,
            rng,
            storage_key,
        };
        game.refresh();
        game
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    #[cfg(test)]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn click(&mut self) -> ClickOutcome {
        let outcome = logic::click(&mut self.state, &mut self.rng);
        self.save();
        self.refresh();
        if outcome.was_critical {
            self.presenter.show_transient_message(
                &format!("💥 CRITICAL HIT! +{}", outcome.earned),
                Tone::Critical,
            );
        } else {
            self.presenter
                .show_transient_message(&format!("+{} Swag", outcome.earned), Tone::Normal);
        }
        outcome
    }

    /// One passive tick. Saves and refreshes only when something was earned.
    pub fn tick(&mut self) -> f64 {
        self.catch_up(1)
    }

    /// Run `ticks` passive ticks back to back, as after a hidden tab comes
    /// back. Saves and refreshes once at the end if anything was earned.
    pub fn catch_up(&mut self, ticks: u32) -> f64 {
        let mut amount = 0.0;
        for _ in 0..ticks {
            amount += logic::tick(&mut self.state);
        }
        if amount != 0.0 {
            if ticks > 1 {
                log::debug!("caught up {ticks} ticks: +{amount}");
            }
            self.save();
            self.refresh();
        }
        amount
    }

    /// Buy one level. A refused purchase is logged and leaves everything as it was.
    pub fn buy(&mut self, kind: UpgradeKind) -> Result<Purchase, BuyError> {
        let purchase = match logic::buy(&mut self.state, kind) {
            Ok(p) => p,
            Err(e) => {
                log::debug!("purchase ignored: {e}");
                return Err(e);
            }
        };
        self.save();
        self.refresh();
        if let Some(multiplier) = purchase.prestiged {
            log::info!(
                "prestige #{}: multiplier now x{multiplier}",
                self.state.prestige_count()
            );
            self.presenter
                .notify_prestige(&logic::to_fixed_2(multiplier));
        }
        Ok(purchase)
    }

    /// Ask the player, then wipe everything. Returns whether the reset happened.
    pub fn request_reset(&mut self) -> bool {
        if !self.presenter.confirm_destructive_action(RESET_PROMPT) {
            return false;
        }
        self.reset();
        true
    }

    /// Full reset: drops the save and starts over. Nothing is written until
    /// the next mutation or periodic save.
    pub fn reset(&mut self) {
        save::delete_save(&mut self.storage, &self.storage_key);
        self.state = GameState::new();
        log::info!("game reset");
        self.refresh();
    }

    pub fn save(&mut self) {
        save::save_game(&mut self.storage, &self.storage_key, &self.state);
    }

    /// Push the current numbers to the presenter.
    pub fn refresh(&mut self) {
        let state = &self.state;
        self.presenter.render_stats(
            &logic::format_number(state.points),
            &logic::format_number(state.total_earned),
            &logic::format_number(logic::per_click(state)),
            &logic::format_number(logic::per_second(state)),
        );
        for &kind in UpgradeKind::all() {
            let cost = logic::cost_of(state, kind);
            self.presenter.render_upgrade(
                kind,
                state.upgrades.level(kind),
                cost,
                state.points >= cost,
            );
        }
    }

    /// Dispatch an input event. Returns true if the event was consumed.
    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        match *event {
            InputEvent::Key(key) => match key.to_ascii_lowercase() {
                'c' | ' ' => {
                    self.click();
                    true
                }
                'r' => {
                    self.request_reset();
                    true
                }
                k => match UpgradeKind::from_key(k) {
                    Some(kind) => {
                        let _ = self.buy(kind);
                        true
                    }
                    None => false,
                },
            },
            InputEvent::Click(actions::CLICK) => {
                self.click();
                true
            }
            InputEvent::Click(actions::RESET) => {
                self.request_reset();
                true
            }
            InputEvent::Click(id) => {
                match id
                    .checked_sub(actions::BUY_UPGRADE_BASE)
                    .and_then(|i| UpgradeKind::from_index(i as usize))
                {
                    Some(kind) => {
                        let _ = self.buy(kind);
                        true
                    }
                    None => false,
                }
            }
        }
    }
}
