mod config;
mod dispatch;
mod error;
mod logging;
mod panes;
mod playback;
mod state;
mod ui;

use std::time::{Duration, Instant};

use anyhow::Context;

use config::Config;
use panes::{HelpPane, PlotPane};
use state::AppState;
use ui::keybindings::load_keybindings;
use ui::{Frame, InputSource, PaneManager, RatatuiBackend};

/// Upper bound on how long input polling may block, so resizes redraw promptly
const MAX_POLL: Duration = Duration::from_millis(16);

fn main() -> anyhow::Result<()> {
    let log_path = logging::init();
    log::info!("tuiplot {} starting", env!("CARGO_PKG_VERSION"));

    let config = Config::load().context("loading config")?;
    let state = AppState::from_config(&config).context("building plot session")?;

    let mut backend = RatatuiBackend::new().context("opening terminal")?;
    backend.start().context("entering raw mode")?;
    let result = run(&mut backend, &config, state);
    if let Err(e) = &result {
        log::error!("{:#}", e);
    }
    backend.stop().context("restoring terminal")?;

    if let (Err(_), Some(path)) = (&result, log_path) {
        eprintln!("tuiplot failed, see {}", path.display());
    }
    result
}

fn pane_title(id: &str) -> &str {
    match id {
        "plot" => "Plot",
        other => other,
    }
}

fn run(backend: &mut RatatuiBackend, config: &Config, mut state: AppState) -> anyhow::Result<()> {
    let (global, mut keymaps) = load_keybindings();
    let mut panes = PaneManager::new(Box::new(PlotPane::new(keymaps.remove("plot").unwrap_or_default())));
    panes.add_pane(Box::new(HelpPane::new(keymaps.remove("help").unwrap_or_default())));

    let mut app_frame = Frame::new();
    app_frame.push_message("Press ? for keybindings".to_string());

    state
        .scheduler
        .start(config.time_sequence()?, config.interval()?, Instant::now());

    loop {
        let now = Instant::now();
        state.advance(now)?;

        let timeout = state
            .scheduler
            .time_until_next(Instant::now())
            .map_or(MAX_POLL, |t| t.min(MAX_POLL));

        if let Some(event) = backend.poll_event(timeout)? {
            let in_help = panes.active().id() == "help";
            match global.lookup(&event, in_help) {
                Some("quit") => break,
                Some("help") => {
                    let current_id = panes.active().id();
                    let current_keymap = panes.active().keymap().clone();
                    if let Some(help) = panes.get_pane_mut::<HelpPane>("help") {
                        help.set_context(pane_title(current_id), &current_keymap);
                    }
                    panes.push_to("help", &state);
                }
                _ => {
                    let action = panes.handle_input(event, &state);
                    let quit = dispatch::dispatch_action(&action, &mut state, &mut app_frame, Instant::now())
                        .with_context(|| format!("applying {:?}", action))?;
                    if quit {
                        break;
                    }
                }
            }
        }

        backend.draw(|area, buf| {
            app_frame.render_buf(area, buf, &state);
            panes.render(Frame::content_area(area), buf, &state);
        })?;
    }

    log::info!("tuiplot exiting");
    Ok(())
}
