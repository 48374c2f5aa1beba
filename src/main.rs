mod clicker;
mod config;
mod input;
mod logger;
mod time;
mod widgets;

use std::{cell::RefCell, io, rc::Rc};

use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;
use ratzilla::event::{KeyCode, MouseButton, MouseEventKind};
use ratzilla::ratatui::Terminal;
use ratzilla::{DomBackend, WebRenderer};

use clicker::view::View;
use clicker::ClickerGame;
use config::ClickerConfig;
use input::{pixel_x_to_col, pixel_y_to_row, ClickState, InputEvent};
use time::GameTime;

#[cfg(target_arch = "wasm32")]
type PageStorage = clicker::save::LocalStorage;
#[cfg(not(target_arch = "wasm32"))]
type PageStorage = clicker::save::MemoryStorage;

type Game = ClickerGame<PageStorage, View, Pcg64Mcg>;

/// Step size of the message/banner fade clock.
const ANIM_INTERVAL_MS: u32 = 50;

struct Clocks {
    tick: GameTime,
    save: GameTime,
    anim: GameTime,
}

#[cfg(target_arch = "wasm32")]
fn open_storage() -> PageStorage {
    clicker::save::LocalStorage::open()
}

#[cfg(not(target_arch = "wasm32"))]
fn open_storage() -> PageStorage {
    clicker::save::MemoryStorage::default()
}

fn page_query() -> String {
    web_sys::window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default()
}

fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

fn fresh_seed() -> u64 {
    (js_sys::Math::random() * u64::MAX as f64) as u64
}

/// Query the grid container's bounding rect and convert a mouse position to a cell.
fn dom_pixel_to_cell(mouse_x: u32, mouse_y: u32, cs: &ClickState) -> Option<(u16, u16)> {
    let window = web_sys::window()?;
    let document = window.document()?;

    // DomBackend creates a <div> as the grid container inside <body>.
    let grid = document.query_selector("body > div").ok()??;
    let rect = grid.get_bounding_client_rect();

    let col = pixel_x_to_col(mouse_x as f64 - rect.left(), rect.width(), cs.terminal_cols)?;
    let row = pixel_y_to_row(mouse_y as f64 - rect.top(), rect.height(), cs.terminal_rows)?;

    log::debug!(
        "click: pixel=({mouse_x}, {mouse_y}) cell=({col}, {row}) targets={}",
        cs.targets.len()
    );
    Some((col, row))
}

fn main() -> io::Result<()> {
    console_error_panic_hook::set_once();
    logger::init(log::LevelFilter::Info);

    let config = ClickerConfig::from_query(&page_query());
    logger::init(config.log_level);

    let seed = config.seed.unwrap_or_else(fresh_seed);
    log::debug!("critical hit seed: {seed}");

    let game: Rc<RefCell<Game>> = Rc::new(RefCell::new(ClickerGame::load(
        open_storage(),
        View::new(config.feedback_ms),
        Pcg64Mcg::seed_from_u64(seed),
        config.storage_key.clone(),
    )));
    let click_state = Rc::new(RefCell::new(ClickState::new()));
    let backend = DomBackend::new()?;
    let terminal = Terminal::new(backend)?;

    // Mouse/touch click handler
    terminal.on_mouse_event({
        let game = game.clone();
        let click_state = click_state.clone();
        move |mouse_event| {
            if mouse_event.event != MouseEventKind::Pressed
                || mouse_event.button != MouseButton::Left
            {
                return;
            }

            let action = {
                let cs = click_state.borrow();
                if cs.terminal_rows == 0 || cs.terminal_cols == 0 {
                    return;
                }
                dom_pixel_to_cell(mouse_event.x, mouse_event.y, &cs)
                    .and_then(|(col, row)| cs.hit_test(col, row))
            };

            if let Some(id) = action {
                game.borrow_mut().handle_input(&InputEvent::Click(id));
            }
        }
    });

    // Keyboard handler
    terminal.on_key_event({
        let game = game.clone();
        move |key_event| {
            if let KeyCode::Char(c) = key_event.code {
                game.borrow_mut().handle_input(&InputEvent::Key(c));
            }
        }
    });

    let clocks = RefCell::new(Clocks {
        tick: GameTime::every(config.tick_interval_ms),
        save: GameTime::every(config.save_interval_ms),
        anim: GameTime::every(ANIM_INTERVAL_MS).max_delta(time::MAX_FRAME_DELTA_MS),
    });

    terminal.draw_web(move |f| {
        let now = now_ms();
        let mut clocks = clocks.borrow_mut();
        let mut game = game.borrow_mut();

        match clocks.tick.update(now) {
            0 => {}
            1 => {
                game.tick();
            }
            n => {
                game.catch_up(n);
            }
        }
        if clocks.save.update(now) > 0 {
            game.save();
        }
        let steps = clocks.anim.update(now);
        let step_ms = clocks.anim.interval_ms();
        game.presenter_mut().advance(steps as f64 * step_ms);

        let size = f.area();
        {
            let mut cs = click_state.borrow_mut();
            cs.terminal_cols = size.width;
            cs.terminal_rows = size.height;
            cs.clear_targets();
        }

        clicker::render::render(game.presenter(), f, size, &click_state);
    });

    Ok(())
}
