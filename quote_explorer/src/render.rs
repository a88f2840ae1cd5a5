//! Text and JSON renderings of the page's collaborators.
//!
//! `Renderer` stands in for the map, price-history chart, quote vault, filters panel,
//! quote-info overlay and find-installer modal. Each view only reads the state it is
//! given; none of them mutate anything. As a `StoreListener` it prints a one-line
//! summary whenever quotes or filters change.

use std::io::Write;

use chrono::{DateTime, Utc};
use log::error;
use quote_common::history::{price_history, service_summary};
use quote_common::{Company, Quote, Result, StoreListener, StoreSnapshot};
use serde::Serialize;
use serde_json::json;

use crate::model::app_state::{AppState, ViewState};
use crate::model::event::View;

/// Writes views to `out`, as text or as pretty JSON.
pub struct Renderer<W: Write> {
    out: W,
    json: bool,
}

impl<W: Write> Renderer<W> {
    /// Create a renderer writing to `out`.
    pub fn new(out: W, json: bool) -> Self {
        Self { out, json }
    }

    /// Consume the renderer and return its sink.
    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Render one collaborator from the current state.
    pub fn show(&mut self, view: View, state: &AppState) -> Result<()> {
        let snapshot = state.store().snapshot();
        match view {
            View::Map => self.map(&snapshot),
            View::History => self.history(snapshot.quotes),
            View::Vault => self.vault(snapshot.quotes, Utc::now()),
            View::Filters => {
                if self.json {
                    self.write_json(snapshot.filters)
                } else {
                    writeln!(self.out, "Filters: {}", snapshot.filters)?;
                    Ok(())
                }
            }
            View::Info => self.info(state.view()),
            View::Installers => self.installers(state.view(), snapshot.quotes),
        }
    }

    /// Report modal visibility after a view-only change.
    pub fn view_changed(&mut self, view: &ViewState) -> Result<()> {
        if self.json {
            return self.write_json(&json!({
                "showQuoteInfo": view.show_quote_info,
                "selectedQuote": view.selected_quote.as_ref().map(|q| q.id),
                "showUpload": view.show_upload,
                "showInstaller": view.show_installer,
            }));
        }
        writeln!(
            self.out,
            "info={} upload={} installer={}",
            open_closed(view.show_quote_info),
            open_closed(view.show_upload),
            open_closed(view.show_installer),
        )?;
        if view.show_quote_info {
            self.info(view)?;
        }
        Ok(())
    }

    fn map(&mut self, snapshot: &StoreSnapshot<'_>) -> Result<()> {
        let visible = snapshot.visible();
        if self.json {
            return self.write_json(&visible);
        }
        writeln!(
            self.out,
            "Map: {}/{} markers ({})",
            visible.len(),
            snapshot.quotes.len(),
            snapshot.filters
        )?;
        for quote in visible {
            writeln!(
                self.out,
                "  #{:<4} {:<42} {:<20} ${:>6}  {:.1}*  ({:.4}, {:.4})",
                quote.id,
                quote.service.to_string(),
                quote.company.to_string(),
                quote.price,
                quote.overall_rating(),
                quote.location.lat,
                quote.location.lng,
            )?;
        }
        Ok(())
    }

    fn history(&mut self, quotes: &[Quote]) -> Result<()> {
        let history = price_history(quotes);
        let services = service_summary(quotes);
        if self.json {
            return self.write_json(&json!({
                "history": history,
                "services": services,
            }));
        }
        writeln!(self.out, "Price history:")?;
        for point in &history {
            writeln!(
                self.out,
                "  {}-{:02}  n={:<3} avg=${:.0}  min=${}  max=${}",
                point.year,
                point.month,
                point.count,
                point.average_price,
                point.min_price,
                point.max_price,
            )?;
        }
        writeln!(self.out, "By service:")?;
        for summary in &services {
            writeln!(
                self.out,
                "  {:<42} n={:<3} avg=${:.0}",
                summary.service.to_string(),
                summary.count,
                summary.average_price,
            )?;
        }
        Ok(())
    }

    fn vault(&mut self, quotes: &[Quote], now: DateTime<Utc>) -> Result<()> {
        if self.json {
            return self.write_json(&quotes);
        }
        writeln!(self.out, "Quote vault: {} quotes", quotes.len())?;
        for quote in quotes {
            writeln!(
                self.out,
                "  #{:<4} {} | {} | ${} | created {} | valid {} days{}",
                quote.id,
                quote.service,
                quote.company,
                quote.price,
                quote.quote_creation_date().format("%Y-%m-%d"),
                quote.validity_period,
                if quote.is_expired(now) { " | expired" } else { "" },
            )?;
        }
        Ok(())
    }

    fn info(&mut self, view: &ViewState) -> Result<()> {
        let quote = match (&view.selected_quote, view.show_quote_info) {
            (Some(quote), true) => quote,
            _ => {
                if self.json {
                    return self.write_json(&serde_json::Value::Null);
                }
                writeln!(self.out, "Quote info closed")?;
                return Ok(());
            }
        };
        if self.json {
            return self.write_json(quote);
        }
        writeln!(self.out, "Quote #{}", quote.id)?;
        writeln!(self.out, "  Service:       {}", quote.service)?;
        writeln!(self.out, "  Company:       {}", quote.company)?;
        writeln!(self.out, "  Price:         ${}", quote.price)?;
        writeln!(
            self.out,
            "  Ratings:       sales {} / installation {} / cleanliness {}",
            quote.ratings.sale_team(),
            quote.ratings.installation_team(),
            quote.ratings.cleanliness(),
        )?;
        writeln!(self.out, "  Overall:       {:.2}", quote.overall_rating())?;
        writeln!(self.out, "  Quoted on:     {}", quote.date().format("%Y-%m-%d"))?;
        writeln!(
            self.out,
            "  Created on:    {}",
            quote.quote_creation_date().format("%Y-%m-%d")
        )?;
        writeln!(
            self.out,
            "  Valid until:   {} ({} days)",
            quote.expires_at().format("%Y-%m-%d"),
            quote.validity_period
        )?;
        Ok(())
    }

    fn installers(&mut self, view: &ViewState, quotes: &[Quote]) -> Result<()> {
        #[derive(Serialize)]
        struct Installer {
            company: Company,
            quotes: usize,
            average_rating: Option<f64>,
        }

        if !view.show_installer {
            if self.json {
                return self.write_json(&serde_json::Value::Null);
            }
            writeln!(self.out, "Find-installer modal closed")?;
            return Ok(());
        }

        let installers: Vec<Installer> = Company::ALL
            .iter()
            .map(|company| {
                let ratings: Vec<f64> = quotes
                    .iter()
                    .filter(|q| q.company == *company)
                    .map(Quote::overall_rating)
                    .collect();
                let average_rating = if ratings.is_empty() {
                    None
                } else {
                    Some(ratings.iter().sum::<f64>() / ratings.len() as f64)
                };
                Installer {
                    company: *company,
                    quotes: ratings.len(),
                    average_rating,
                }
            })
            .collect();

        if self.json {
            return self.write_json(&installers);
        }
        writeln!(self.out, "Installers:")?;
        for installer in &installers {
            match installer.average_rating {
                Some(rating) => writeln!(
                    self.out,
                    "  {:<20} {} quotes, {:.1}*",
                    installer.company.to_string(),
                    installer.quotes,
                    rating
                )?,
                None => writeln!(self.out, "  {:<20} no quotes yet", installer.company.to_string())?,
            }
        }
        Ok(())
    }

    fn write_json<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.out, value)?;
        writeln!(self.out)?;
        Ok(())
    }
}

impl<W: Write> StoreListener for Renderer<W> {
    fn on_change(&mut self, snapshot: &StoreSnapshot<'_>) {
        let visible = snapshot.visible().len();
        let written = if self.json {
            self.write_json(&json!({
                "quotes": snapshot.quotes.len(),
                "visible": visible,
                "filters": snapshot.filters,
            }))
        } else {
            writeln!(
                self.out,
                "{} quotes, {} visible ({})",
                snapshot.quotes.len(),
                visible,
                snapshot.filters
            )
            .map_err(Into::into)
        };
        if let Err(e) = written {
            error!("Failed to render store change: {}", e);
        }
    }
}

fn open_closed(open: bool) -> &'static str {
    if open { "open" } else { "closed" }
}
