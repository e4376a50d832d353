//! Client-side campaign state kept in sync with the API.
//!
//! # Design
//! `CampaignStore` owns the canonical local copy of the campaign list plus a
//! loading flag and the last error message. It is constructed explicitly
//! with an injected [`Transport`] and handed by reference to whoever needs
//! it; there is no global instance.
//!
//! Every operation follows the same shape: raise `is_loading`, clear
//! `error`, run one round-trip, patch local state from the response instead
//! of refetching, then lower `is_loading` on every exit path. Failures never
//! reach the caller as errors: the message lands in `error()` and the
//! operation returns its sentinel (empty list, `None`, or `false`).
//!
//! Operations take `&mut self`, so calls on one store cannot overlap.
//! Observers register through [`CampaignStore::subscribe`] and receive a
//! [`StoreEvent`] for every state change; the budget and spend totals are
//! recomputed whenever the collection changes.

use tracing::{debug, error, info};

use crate::client::CampaignClient;
use crate::constants::default_campaign;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::settings::Settings;
use crate::transport::{Transport, UreqTransport};
use crate::types::{Campaign, CampaignPatch, NewCampaign};

/// A change to store state, delivered to subscribers after it happens.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreEvent {
    LoadingChanged(bool),
    CampaignsChanged,
    ErrorChanged(Option<String>),
}

/// Handle returned by [`CampaignStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Sums over the current collection.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Totals {
    pub budget: f64,
    pub spend: f64,
}

impl Totals {
    fn of(campaigns: &[Campaign]) -> Self {
        campaigns.iter().fold(Self::default(), |acc, c| Self {
            budget: acc.budget + c.budget,
            spend: acc.spend + c.spend,
        })
    }
}

type Listener = Box<dyn FnMut(&StoreEvent)>;

pub struct CampaignStore<T> {
    client: CampaignClient,
    transport: T,
    campaigns: Vec<Campaign>,
    is_loading: bool,
    error: Option<String>,
    totals: Totals,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl CampaignStore<UreqTransport> {
    /// Store talking to the configured API over a blocking ureq agent.
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(CampaignClient::new(&settings.api_base_url), UreqTransport::new())
    }
}

impl<T: Transport> CampaignStore<T> {
    pub fn new(client: CampaignClient, transport: T) -> Self {
        Self {
            client,
            transport,
            campaigns: Vec::new(),
            is_loading: false,
            error: None,
            totals: Totals::default(),
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn campaigns(&self) -> &[Campaign] {
        &self.campaigns
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn totals(&self) -> Totals {
        self.totals
    }

    pub fn total_budget(&self) -> f64 {
        self.totals.budget
    }

    pub fn total_spend(&self) -> f64 {
        self.totals.spend
    }

    pub fn find(&self, id: &str) -> Option<&Campaign> {
        self.campaigns.iter().find(|c| c.id == id)
    }

    pub fn client(&self) -> &CampaignClient {
        &self.client
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn clear_error(&mut self) {
        self.set_error(None);
    }

    /// Register `listener` for every subsequent state change.
    pub fn subscribe(&mut self, listener: impl FnMut(&StoreEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    /// Replace the local collection with the server's list.
    ///
    /// Returns the new collection, or an empty one on failure (the local
    /// collection is then left as it was).
    pub fn fetch_campaigns(&mut self) -> Vec<Campaign> {
        self.begin();
        let request = self.client.build_list_campaigns();
        let outcome = match self.round_trip(request, CampaignClient::parse_list_campaigns) {
            Ok(campaigns) => {
                info!(count = campaigns.len(), "fetched campaigns");
                self.replace_all(campaigns);
                self.campaigns.clone()
            }
            Err(err) => {
                self.fail("fetching campaigns", &err);
                Vec::new()
            }
        };
        self.finish();
        outcome
    }

    /// Create a campaign and append the server's copy to the collection.
    pub fn create_campaign(&mut self, input: &NewCampaign) -> Option<Campaign> {
        self.begin();
        let result = self
            .client
            .build_create_campaign(input)
            .and_then(|request| self.round_trip(request, CampaignClient::parse_create_campaign));
        let outcome = match result {
            Ok(created) => {
                info!(id = %created.id, "created campaign");
                self.campaigns.push(created.clone());
                self.collection_changed();
                Some(created)
            }
            Err(err) => {
                self.fail("creating campaign", &err);
                None
            }
        };
        self.finish();
        outcome
    }

    /// Patch a campaign and merge the returned fields into the local entry
    /// with the same id. Other entries are untouched.
    ///
    /// When no local entry has `id`, the collection is left alone and the
    /// result is the default campaign with `id` and the returned fields.
    pub fn update_campaign(&mut self, id: &str, patch: &CampaignPatch) -> Option<Campaign> {
        self.begin();
        let result = self
            .client
            .build_update_campaign(id, patch)
            .and_then(|request| self.round_trip(request, CampaignClient::parse_update_campaign));
        let outcome = match result {
            Ok(returned) => {
                info!(id, "updated campaign");
                Some(self.merge(id, &returned))
            }
            Err(err) => {
                self.fail("updating campaign", &err);
                None
            }
        };
        self.finish();
        outcome
    }

    /// Delete a campaign and drop it from the collection. Deleting an id the
    /// collection does not hold is not an error once the server agrees.
    pub fn delete_campaign(&mut self, id: &str) -> bool {
        self.begin();
        let request = self.client.build_delete_campaign(id);
        let outcome = match self.round_trip(request, CampaignClient::parse_delete_campaign) {
            Ok(()) => {
                info!(id, "deleted campaign");
                let before = self.campaigns.len();
                self.campaigns.retain(|c| c.id != id);
                if self.campaigns.len() != before {
                    self.collection_changed();
                }
                true
            }
            Err(err) => {
                self.fail("deleting campaign", &err);
                false
            }
        };
        self.finish();
        outcome
    }

    fn round_trip<R>(
        &self,
        request: HttpRequest,
        parse: fn(&CampaignClient, HttpResponse) -> Result<R, ApiError>,
    ) -> Result<R, ApiError> {
        debug!(method = request.method.as_str(), path = %request.path, "sending request");
        let response = self.transport.execute(&request)?;
        parse(&self.client, response)
    }

    fn merge(&mut self, id: &str, returned: &CampaignPatch) -> Campaign {
        match self.campaigns.iter_mut().find(|c| c.id == id) {
            Some(existing) => {
                existing.apply(returned);
                let merged = existing.clone();
                self.collection_changed();
                merged
            }
            None => {
                let mut detached = Campaign {
                    id: id.to_string(),
                    ..default_campaign()
                };
                detached.apply(returned);
                detached
            }
        }
    }

    fn replace_all(&mut self, campaigns: Vec<Campaign>) {
        self.campaigns = campaigns;
        self.collection_changed();
    }

    fn collection_changed(&mut self) {
        self.totals = Totals::of(&self.campaigns);
        self.emit(StoreEvent::CampaignsChanged);
    }

    fn begin(&mut self) {
        self.set_loading(true);
        self.set_error(None);
    }

    fn finish(&mut self) {
        self.set_loading(false);
    }

    fn fail(&mut self, action: &str, err: &ApiError) {
        error!(error = %err, "error {action}");
        self.set_error(Some(err.to_string()));
    }

    fn set_loading(&mut self, loading: bool) {
        self.is_loading = loading;
        self.emit(StoreEvent::LoadingChanged(loading));
    }

    fn set_error(&mut self, message: Option<String>) {
        if self.error == message {
            return;
        }
        self.error = message;
        self.emit(StoreEvent::ErrorChanged(self.error.clone()));
    }

    fn emit(&mut self, event: StoreEvent) {
        for (_, listener) in &mut self.listeners {
            listener(&event);
        }
    }
}
