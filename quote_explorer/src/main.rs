//! Quote Explorer: a terminal rendition of the home-energy quote map page.
//!
//! At startup it generates a collection of synthetic installation quotes and then
//! serves the page's interactions as line commands. It wires together:
//!
//! - `AppState`: owns the `QuoteStore` (quotes + filter selection) and the modal flags.
//! - `CommandReader`: a background thread that parses stdin (or replays a script) into
//!   `AppEvent`s and sends them over a `crossbeam_channel`.
//! - `Renderer`: prints the map, price history, vault, filters, quote-info overlay and
//!   installer modal, and listens for store changes.
//!
//! Concurrency:
//! - Only the event loop in `main` touches the state; events are applied one at a time.
//! - Crossbeam `select!` multiplexes incoming events and the Ctrl+C shutdown signal.
//! - A rejected event (unknown quote id, ...) is logged and the loop keeps going.
//!
//! Usage example (CLI):
//! ```bash
//! quote_explorer --count 50 --seed 7
//! quote_explorer --script ./session.txt --json
//! ```
#![warn(missing_docs)]
mod args;
mod command;
mod input;
mod model;
mod render;

use crate::args::Args;
use crate::command::CommandParser;
use crate::input::CommandReader;
use crate::model::app_state::{AppState, Transition};
use crate::model::event::AppEvent;
use crate::render::Renderer;
use clap::Parser;
use crossbeam_channel::{Receiver, select, unbounded};
use log::{error, info, warn};
use quote_common::{QuoteError, QuoteGenerator, Result, StoreListener};
use std::fs::File;
use std::io::{self, BufReader, Write};

/// Event loop for one session.
///
/// Applies every event from `events` to `state` and refreshes the `renderer`:
/// store changes notify it as a `StoreListener`, view-only changes redraw the modal
/// status, and `Show` requests render the asked-for view. The loop ends when:
/// - a shutdown signal arrives on `shutdown`, or
/// - an `AppEvent::Shutdown` is handled, or
/// - every event sender is gone (end of input).
pub fn run_event_loop<W: Write>(
    state: &mut AppState,
    renderer: &mut Renderer<W>,
    events: Receiver<AppEvent>,
    shutdown: Receiver<()>,
) -> Result<(), QuoteError> {
    loop {
        select! {
            recv(shutdown) -> _ => break,
            recv(events) -> msg => match msg {
                Ok(event) => match state.handle(event) {
                    Ok(Transition::StoreChanged) => renderer.on_change(&state.store().snapshot()),
                    Ok(Transition::ViewChanged) => {
                        if let Err(e) = renderer.view_changed(state.view()) {
                            error!("Failed to render view state: {}", e);
                        }
                    }
                    Ok(Transition::Show(view)) => {
                        if let Err(e) = renderer.show(view, state) {
                            error!("Failed to render {}: {}", view, e);
                        }
                    }
                    Ok(Transition::Exit) => break,
                    Err(e) => warn!("Event rejected: {}", e),
                },
                Err(_) => {
                    info!("No more input, closing session");
                    break;
                }
            }
        }
    }
    Ok(())
}

fn main() -> Result<(), QuoteError> {
    init_logger();
    let args = Args::parse();

    let mut state = AppState::new(QuoteGenerator::default(), args.count, args.seed);
    info!(
        "Session started with {} quotes{}",
        state.store().len(),
        args.seed
            .map(|seed| format!(" (seed {})", seed))
            .unwrap_or_default()
    );

    let (shutdown_tx, shutdown_rx) = unbounded::<()>();
    ctrlc::set_handler(move || {
        info!("Ctrl+C received. Shutting down...");
        let _ = shutdown_tx.send(());
    })
    .map_err(|e| QuoteError::Format(format!("Error setting Ctrl+C handler: {}", e)))?;

    let (event_tx, event_rx) = unbounded::<AppEvent>();
    match &args.script {
        Some(path) => {
            let file = File::open(path)?;
            let events = AppEvent::parse_script(BufReader::new(file))?;
            info!("Loaded {} commands from {}", events.len(), path.display());
            CommandReader::replay(events, event_tx);
        }
        None => {
            info!("Reading commands from stdin. Type `quit` to exit.");
            CommandReader::start(BufReader::new(io::stdin()), event_tx);
        }
    }

    let mut renderer = Renderer::new(io::stdout().lock(), args.json);
    renderer.on_change(&state.store().snapshot());
    run_event_loop(&mut state, &mut renderer, event_rx, shutdown_rx)
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::event::View;
    use quote_common::FilterUpdate;

    fn run(events: Vec<AppEvent>) -> (AppState, String) {
        let mut state = AppState::new(QuoteGenerator::default(), 8, Some(3));
        let mut renderer = Renderer::new(Vec::new(), false);
        let (event_tx, event_rx) = unbounded();
        let (_shutdown_tx, shutdown_rx) = unbounded();
        for event in events {
            event_tx.send(event).unwrap();
        }
        drop(event_tx);

        run_event_loop(&mut state, &mut renderer, event_rx, shutdown_rx).unwrap();
        let out = String::from_utf8(renderer.into_inner()).unwrap();
        (state, out)
    }

    #[test]
    fn applies_events_in_order_until_input_ends() {
        let (state, out) = run(vec![
            AppEvent::FilterChanged(FilterUpdate::parse_pairs("service=all").unwrap()),
            AppEvent::SubmitGenerated,
            AppEvent::MarkerClicked(9),
        ]);
        assert_eq!(state.store().len(), 9);
        assert_eq!(state.view().selected_quote.as_ref().map(|q| q.id), Some(9));
        assert!(out.contains("9 quotes, 9 visible"));
    }

    #[test]
    fn only_store_changes_print_a_summary() {
        let (_, out) = run(vec![
            AppEvent::OpenUpload,
            AppEvent::FilterChanged(FilterUpdate::parse_pairs("price=under-5000").unwrap()),
            AppEvent::CloseUpload,
            AppEvent::SubmitGenerated,
        ]);
        let summaries: Vec<&str> = out.lines().filter(|line| line.contains(" visible (")).collect();
        assert_eq!(summaries.len(), 2);
        assert!(summaries[0].starts_with("8 quotes"));
        assert!(summaries[1].starts_with("9 quotes"));
    }

    #[test]
    fn rejected_events_do_not_stop_the_loop() {
        let (state, _) = run(vec![AppEvent::MarkerClicked(404), AppEvent::OpenUpload]);
        assert!(state.view().show_upload);
    }

    #[test]
    fn shutdown_event_stops_before_later_events() {
        let (state, out) = run(vec![
            AppEvent::Show(View::Filters),
            AppEvent::Shutdown,
            AppEvent::OpenInstaller,
        ]);
        assert!(!state.view().show_installer);
        assert!(out.starts_with("Filters: service=all"));
    }

    #[test]
    fn shutdown_signal_ends_the_loop() {
        let mut state = AppState::new(QuoteGenerator::default(), 1, Some(1));
        let mut renderer = Renderer::new(Vec::new(), false);
        let (_event_tx, event_rx) = unbounded::<AppEvent>();
        let (shutdown_tx, shutdown_rx) = unbounded();
        shutdown_tx.send(()).unwrap();
        assert!(run_event_loop(&mut state, &mut renderer, event_rx, shutdown_rx).is_ok());
    }
}
