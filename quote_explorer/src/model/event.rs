//! Events emitted by the page's collaborators.
//!
//! Every user interaction (filter panel, map marker, upload form, modal buttons) reaches
//! the event loop as one `AppEvent`. Views are read-only requests to render a
//! collaborator.

use quote_common::{FilterUpdate, Quote};
use strum_macros::{Display, EnumString};

/// Collaborator that can be rendered on request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum View {
    /// Map markers for the quotes admitted by the filters.
    Map,
    /// Monthly price history and per-service averages.
    History,
    /// Every quote held, unfiltered.
    Vault,
    /// The active filter selection.
    Filters,
    /// The quote-info overlay for the selected quote.
    Info,
    /// The find-an-installer modal.
    Installers,
}

/// One user interaction.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// Filters panel changed some keys.
    FilterChanged(FilterUpdate),
    /// Map marker for the quote with this id was clicked.
    MarkerClicked(u32),
    /// Quote-info overlay closed.
    CloseQuoteInfo,
    /// Upload button pressed.
    OpenUpload,
    /// Upload modal dismissed without submitting.
    CloseUpload,
    /// Upload form submitted a complete quote.
    SubmitQuote(Box<Quote>),
    /// Upload form submitted with generated contents.
    SubmitGenerated,
    /// Find-installer button pressed.
    OpenInstaller,
    /// Find-installer modal dismissed.
    CloseInstaller,
    /// Render a collaborator.
    Show(View),
    /// Leave the session.
    Shutdown,
}
