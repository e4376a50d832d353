//! Shared campaign constants: the blank entity used to seed create forms,
//! dropdown options, badge colors, and the client-side placeholder id.

use chrono::Utc;
use rand::Rng;
use serde::Serialize;

use crate::types::{Campaign, CampaignStatus};

/// A label/value pair offered by a select input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub label: &'static str,
    pub value: &'static str,
}

pub const STATUS_OPTIONS: [SelectOption; 3] = [
    SelectOption { label: "Active", value: "active" },
    SelectOption { label: "Paused", value: "paused" },
    SelectOption { label: "Completed", value: "completed" },
];

/// Semantic badge color understood by the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeColor {
    Success,
    Warning,
    Info,
}

impl BadgeColor {
    pub fn as_str(self) -> &'static str {
        match self {
            BadgeColor::Success => "success",
            BadgeColor::Warning => "warning",
            BadgeColor::Info => "info",
        }
    }
}

pub fn status_color(status: CampaignStatus) -> BadgeColor {
    match status {
        CampaignStatus::Active => BadgeColor::Success,
        CampaignStatus::Paused => BadgeColor::Warning,
        CampaignStatus::Completed => BadgeColor::Info,
    }
}

/// Blank, unpersisted campaign.
pub fn default_campaign() -> Campaign {
    Campaign {
        id: String::new(),
        name: String::new(),
        budget: 0.0,
        spend: 0.0,
        status: CampaignStatus::Active,
        created_at: None,
        updated_at: None,
    }
}

/// Placeholder id: milliseconds since the epoch followed by a random number
/// below 1000. Only meant to key a row until the server assigns the real id;
/// two calls in the same millisecond can collide.
pub fn generate_id() -> String {
    let millis = Utc::now().timestamp_millis();
    let suffix: u16 = rand::thread_rng().gen_range(0..1000);
    format!("{millis}{suffix}")
}
