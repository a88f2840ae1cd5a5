//! State container owned by the explorer's event loop.
//!
//! `AppState` bundles the quote store with the page's view flags (which modal is open,
//! which quote the info overlay shows). `AppState::handle` applies one `AppEvent` and
//! reports what kind of change it made, so the loop knows whether to notify the store
//! listeners or only redraw a view.

use chrono::Utc;
use log::{debug, info};
use quote_common::{Quote, QuoteError, QuoteGenerator, QuoteStore, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::model::event::{AppEvent, View};

/// Modal visibility and the quote selected on the map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    /// Quote-info overlay is open.
    pub show_quote_info: bool,
    /// Last quote clicked on the map; kept after the overlay closes.
    pub selected_quote: Option<Quote>,
    /// Upload modal is open.
    pub show_upload: bool,
    /// Find-installer modal is open.
    pub show_installer: bool,
}

/// Outcome of handling one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Quotes or filters changed; listeners must re-read the store.
    StoreChanged,
    /// Only view flags changed.
    ViewChanged,
    /// Nothing changed; render the given view.
    Show(View),
    /// Session is over.
    Exit,
}

/// Everything the page holds for one session.
pub struct AppState {
    store: QuoteStore,
    view: ViewState,
    generator: QuoteGenerator,
    rng: StdRng,
}

impl AppState {
    /// Generate `count` quotes and start with every modal closed.
    ///
    /// With a `seed` the whole session (initial quotes and generated uploads) is
    /// reproducible for a given start time.
    pub fn new(generator: QuoteGenerator, count: usize, seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let store = QuoteStore::generated(&generator, count, &mut rng, Utc::now());
        Self::with_store(store, generator, rng)
    }

    /// Start from an existing store.
    pub fn with_store(store: QuoteStore, generator: QuoteGenerator, rng: StdRng) -> Self {
        Self {
            store,
            view: ViewState::default(),
            generator,
            rng,
        }
    }

    /// The quote store.
    pub fn store(&self) -> &QuoteStore {
        &self.store
    }

    /// Modal flags and selection.
    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Apply one event.
    pub fn handle(&mut self, event: AppEvent) -> Result<Transition> {
        debug!("Handling {:?}", event);
        let transition = match event {
            AppEvent::FilterChanged(update) => {
                self.store.update_filters(update);
                Transition::StoreChanged
            }
            AppEvent::MarkerClicked(id) => {
                let quote = self
                    .store
                    .find(id)
                    .cloned()
                    .ok_or(QuoteError::QuoteNotFound(id))?;
                self.view.selected_quote = Some(quote);
                self.view.show_quote_info = true;
                Transition::ViewChanged
            }
            AppEvent::CloseQuoteInfo => {
                self.view.show_quote_info = false;
                Transition::ViewChanged
            }
            AppEvent::OpenUpload => {
                self.view.show_upload = true;
                Transition::ViewChanged
            }
            AppEvent::CloseUpload => {
                self.view.show_upload = false;
                Transition::ViewChanged
            }
            AppEvent::SubmitQuote(quote) => {
                info!("Quote {} submitted", quote.id);
                self.store.add_quote(*quote);
                self.view.show_upload = false;
                Transition::StoreChanged
            }
            AppEvent::SubmitGenerated => {
                let quote = self
                    .generator
                    .generate_one(self.store.next_id(), &mut self.rng, Utc::now());
                info!("Generated quote {} submitted", quote.id);
                self.store.add_quote(quote);
                self.view.show_upload = false;
                Transition::StoreChanged
            }
            AppEvent::OpenInstaller => {
                self.view.show_installer = true;
                Transition::ViewChanged
            }
            AppEvent::CloseInstaller => {
                self.view.show_installer = false;
                Transition::ViewChanged
            }
            AppEvent::Show(view) => Transition::Show(view),
            AppEvent::Shutdown => Transition::Exit,
        };
        Ok(transition)
    }
}
