//! The application's single owned state container ("view-model").
//!
//! All mutable state lives here. UI intents come in as method calls; state
//! changes go out as [`AppEvent`]s drained through [`AppState::process_events`].
//! The renderer never mutates state directly, and the state container never
//! touches a map surface.

use crate::{
    app::events::{AppEvent, Severity},
    core::{
        geo::LatLng,
        models::{Cafe, CafeDetails, SearchCriteria},
    },
    gateways::{DetailsGateway, GeocodeGateway, LocationSource, PlacesGateway},
    Error, Result,
};
use std::{collections::VecDeque, sync::Arc};

/// Place category requested from the mapping provider
const CAFE_CATEGORY: &str = "cafe";

/// The four provider boundaries the state container drives
pub struct Gateways {
    pub places: Arc<dyn PlacesGateway>,
    pub geocoder: Arc<dyn GeocodeGateway>,
    pub location: Arc<dyn LocationSource>,
    pub details: Arc<dyn DetailsGateway>,
}

/// Handle for an in-flight details fetch.
///
/// Selecting a cafe hands one of these back; running it resolves the fetch
/// and applies the result only if the selection has not changed since. The
/// token comparison is what makes a response started for cafe A harmless
/// after the user has moved on to cafe B.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailsTicket {
    token: u64,
    pub cafe_id: String,
    pub location: LatLng,
    pub name: String,
}

pub struct AppState {
    places: Arc<dyn PlacesGateway>,
    geocoder: Arc<dyn GeocodeGateway>,
    location_source: Arc<dyn LocationSource>,
    details_gateway: Arc<dyn DetailsGateway>,

    criteria: SearchCriteria,
    filter_text: String,
    location: Option<LatLng>,
    /// Full result set of the last search
    cafes: Vec<Cafe>,
    /// Derived subset currently shown to the user
    filtered: Vec<Cafe>,
    selected: Option<Cafe>,
    selected_details: Option<CafeDetails>,
    menu_open: bool,
    loading: bool,
    /// Bumped on every selection; stale details responses fail the comparison
    selection_token: u64,
    events: VecDeque<AppEvent>,
}

impl AppState {
    pub fn new(gateways: Gateways, criteria: SearchCriteria) -> Self {
        Self {
            places: gateways.places,
            geocoder: gateways.geocoder,
            location_source: gateways.location,
            details_gateway: gateways.details,
            criteria,
            filter_text: String::new(),
            location: None,
            cafes: Vec::new(),
            filtered: Vec::new(),
            selected: None,
            selected_details: None,
            menu_open: false,
            loading: false,
            selection_token: 0,
            events: VecDeque::new(),
        }
    }

    pub fn criteria(&self) -> &SearchCriteria {
        &self.criteria
    }

    pub fn location(&self) -> Option<LatLng> {
        self.location
    }

    /// Full result set of the last search
    pub fn cafes(&self) -> &[Cafe] {
        &self.cafes
    }

    /// Subset of the full set matching the current filter
    pub fn filtered_cafes(&self) -> &[Cafe] {
        &self.filtered
    }

    pub fn selected_cafe(&self) -> Option<&Cafe> {
        self.selected.as_ref()
    }

    pub fn selected_details(&self) -> Option<&CafeDetails> {
        self.selected_details.as_ref()
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn set_search_radius(&mut self, radius_meters: u32) {
        self.criteria.radius_meters = radius_meters;
    }

    /// Drains the state-change events queued since the last call.
    ///
    /// The renderer consumes these in emission order; see
    /// [`crate::render::view::MapRenderer::apply_events`].
    pub fn process_events(&mut self) -> Vec<AppEvent> {
        self.events.drain(..).collect()
    }

    /// Resolves a search location and reloads the cafe list around it.
    ///
    /// A trimmed non-empty `address_text` is geocoded; an empty one falls
    /// back to the device position. Exactly one of the two paths runs. A
    /// search submitted while another is in flight is rejected.
    pub async fn submit_search(&mut self, address_text: &str) {
        if self.loading {
            log::debug!("search ignored: another request is in flight");
            return;
        }
        self.criteria.address_text = address_text.to_string();
        self.set_loading(true);

        let resolved = if address_text.trim().is_empty() {
            let source = Arc::clone(&self.location_source);
            source.current().await
        } else {
            let geocoder = Arc::clone(&self.geocoder);
            match geocoder.resolve(address_text).await {
                Ok(Some(location)) => Ok(location),
                Ok(None) => {
                    self.set_loading(false);
                    self.notify(
                        Severity::Warning,
                        "Unable to geocode a location from that address",
                    );
                    return;
                }
                Err(err) => Err(err),
            }
        };

        self.set_loading(false);
        match resolved {
            Ok(location) => {
                self.location = Some(location);
                self.emit(AppEvent::LocationChanged { location });
                self.reload_cafes().await;
            }
            Err(err) => {
                let severity = Self::severity_for(&err);
                self.notify(severity, format!("Unable to resolve a search location: {err}"));
            }
        }
    }

    /// Re-fetches the full cafe list around the current location and
    /// recomputes the filtered subset. No-op until a location is resolved.
    pub async fn reload_cafes(&mut self) {
        if self.loading {
            log::debug!("reload ignored: another request is in flight");
            return;
        }
        let Some(center) = self.location else {
            log::debug!("reload ignored: no search location yet");
            return;
        };
        let radius = self.criteria.radius_meters;

        self.set_loading(true);
        let places = Arc::clone(&self.places);
        let fetched = places.find_nearby(center, radius, CAFE_CATEGORY).await;
        self.set_loading(false);

        match fetched {
            Ok(cafes) => {
                self.cafes = cafes;
                self.recompute_filtered();
                if self.cafes.is_empty() {
                    self.notify(Severity::Warning, "Unable to find any cafes");
                }
            }
            Err(err) => {
                let severity = Self::severity_for(&err);
                self.notify(severity, format!("Error while searching for cafes: {err}"));
            }
        }
    }

    /// Recomputes the visible subset of the last result set.
    ///
    /// Matching is a case-insensitive substring test on the cafe name and
    /// never triggers a fetch. An empty result leaves the previous selection
    /// in place; a non-empty one auto-selects its first element and returns
    /// the details ticket for it.
    pub fn update_filter(&mut self, filter_text: &str) -> Option<DetailsTicket> {
        self.filter_text = filter_text.to_string();
        self.recompute_filtered();

        if self.filtered.is_empty() {
            self.notify(Severity::Warning, "No matching cafes");
            return None;
        }
        let first = self.filtered[0].id.clone();
        self.select_cafe(&first)
    }

    /// Selects the cafe with the given id, closes the menu and clears prior
    /// details. Ignored when the id is not in the current result set.
    ///
    /// Returns the ticket for the details fetch the selection implies; the
    /// caller runs it via [`AppState::run_details_fetch`].
    pub fn select_cafe(&mut self, cafe_id: &str) -> Option<DetailsTicket> {
        let Some(cafe) = self.cafes.iter().find(|cafe| cafe.id == cafe_id).cloned() else {
            log::debug!("select ignored: cafe {cafe_id:?} is not in the current result set");
            return None;
        };

        self.selection_token += 1;
        self.selected = Some(cafe.clone());
        self.selected_details = None;
        if self.menu_open {
            self.menu_open = false;
            self.emit(AppEvent::MenuToggled { open: false });
        }
        self.emit(AppEvent::SelectionChanged { cafe: cafe.clone() });

        Some(DetailsTicket {
            token: self.selection_token,
            cafe_id: cafe.id,
            location: cafe.location,
            name: cafe.name,
        })
    }

    /// Opens or closes the results side panel
    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
        self.emit(AppEvent::MenuToggled {
            open: self.menu_open,
        });
    }

    /// Fetches details for a ticket and applies the outcome
    pub async fn run_details_fetch(&mut self, ticket: DetailsTicket) {
        let gateway = Arc::clone(&self.details_gateway);
        let result = gateway.fetch(ticket.location, &ticket.name).await;
        self.apply_details(&ticket, result);
    }

    /// Applies a details response, discarding it when the selection has
    /// changed since the ticket was issued
    pub fn apply_details(&mut self, ticket: &DetailsTicket, result: Result<CafeDetails>) {
        if ticket.token != self.selection_token {
            log::debug!("discarding stale details response for {:?}", ticket.name);
            return;
        }
        match result {
            Ok(details) => {
                self.selected_details = Some(details.clone());
                if let Some(cafe) = self.selected.clone() {
                    self.emit(AppEvent::DetailsArrived { cafe, details });
                }
            }
            Err(err) => {
                self.notify(
                    Severity::Warning,
                    format!("Unable to load extra details for {}: {err}", ticket.name),
                );
            }
        }
    }

    fn recompute_filtered(&mut self) {
        let needle = self.filter_text.to_lowercase();
        self.filtered = self
            .cafes
            .iter()
            .filter(|cafe| cafe.name.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        self.emit(AppEvent::CafesChanged {
            cafes: self.filtered.clone(),
        });
    }

    fn set_loading(&mut self, loading: bool) {
        if self.loading != loading {
            self.loading = loading;
            self.emit(AppEvent::LoadingChanged { loading });
        }
    }

    fn notify(&mut self, severity: Severity, message: impl Into<String>) {
        let message = message.into();
        match severity {
            Severity::Warning => log::warn!("{message}"),
            Severity::Error => log::error!("{message}"),
        }
        self.emit(AppEvent::Notice { severity, message });
    }

    fn emit(&mut self, event: AppEvent) {
        self.events.push_back(event);
    }

    fn severity_for(error: &Error) -> Severity {
        match error {
            Error::NotFound(_)
            | Error::Unsupported
            | Error::Permission(_)
            | Error::Position(_) => Severity::Warning,
            _ => Severity::Error,
        }
    }
}
