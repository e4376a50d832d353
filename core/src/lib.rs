//! Client-side data layer for the campaigns API.
//!
//! # Overview
//! `CampaignStore` keeps a local copy of the campaign list in sync with a
//! REST backend: it runs CRUD calls through an injected [`Transport`],
//! patches local state from each response, and tracks a loading flag, the
//! last error message, and budget/spend totals. Alongside it sit the static
//! descriptors a UI needs to render campaigns: form fields and validation
//! rules, table columns with cell rendering, currency formatting, and
//! status colors.
//!
//! # Design
//! - `CampaignClient` is stateless: `build_*` produces an `HttpRequest`,
//!   `parse_*` consumes an `HttpResponse`, so the I/O boundary is explicit.
//! - The store owns its transport; tests inject scripted ones, applications
//!   use `UreqTransport`.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod constants;
pub mod error;
pub mod format;
pub mod forms;
pub mod http;
pub mod settings;
pub mod store;
pub mod table;
pub mod transport;
pub mod types;

pub use client::CampaignClient;
pub use constants::{default_campaign, generate_id, status_color, BadgeColor, SelectOption, STATUS_OPTIONS};
pub use error::ApiError;
pub use format::format_currency;
pub use forms::{validate_campaign, FieldError, FormField, ValidationRule, CAMPAIGN_FORM_FIELDS, CAMPAIGN_VALIDATION_RULES};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use settings::{Settings, SettingsError};
pub use store::{CampaignStore, StoreEvent, SubscriptionId, Totals};
pub use table::{render_cell, render_row, Cell, Column, CAMPAIGN_COLUMNS};
pub use transport::{Transport, UreqTransport};
pub use types::{Campaign, CampaignPatch, CampaignStatus, NewCampaign};
