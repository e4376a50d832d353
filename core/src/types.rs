//! Domain DTOs for the campaigns API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently;
//! integration tests catch schema drift between the two crates. The backend
//! stores amounts as fixed-point decimals and serializes them as strings
//! (`"100.00"`), while hand-written payloads and fixtures use plain numbers,
//! so amounts accept either form on the way in and are always sent as
//! numbers.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a campaign.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CampaignStatus {
    #[default]
    Active,
    Paused,
    Completed,
}

impl CampaignStatus {
    pub const ALL: [CampaignStatus; 3] = [Self::Active, Self::Paused, Self::Completed];

    /// Wire value, as sent to and received from the API.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Paused => "paused",
            Self::Completed => "completed",
        }
    }

    /// Human-facing label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Paused => "Paused",
            Self::Completed => "Completed",
        }
    }
}

impl fmt::Display for CampaignStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single campaign returned by the API.
///
/// An empty `id` marks a campaign that has not been persisted yet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Campaign {
    #[serde(default, deserialize_with = "wire::id")]
    pub id: String,
    pub name: String,
    #[serde(deserialize_with = "wire::amount")]
    pub budget: f64,
    #[serde(deserialize_with = "wire::amount")]
    pub spend: f64,
    pub status: CampaignStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Campaign {
    /// Copy every field present in `patch` onto this campaign.
    ///
    /// The id is never touched: a patch describes fields of an entity that is
    /// already identified.
    pub fn apply(&mut self, patch: &CampaignPatch) {
        if let Some(name) = &patch.name {
            self.name.clone_from(name);
        }
        if let Some(budget) = patch.budget {
            self.budget = budget;
        }
        if let Some(spend) = patch.spend {
            self.spend = spend;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if patch.created_at.is_some() {
            self.created_at = patch.created_at;
        }
        if patch.updated_at.is_some() {
            self.updated_at = patch.updated_at;
        }
    }

    pub fn is_persisted(&self) -> bool {
        !self.id.is_empty()
    }
}

/// Request payload for creating a new campaign. The server assigns the id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewCampaign {
    pub name: String,
    #[serde(deserialize_with = "wire::amount")]
    pub budget: f64,
    #[serde(deserialize_with = "wire::amount")]
    pub spend: f64,
    #[serde(default)]
    pub status: CampaignStatus,
}

/// Partial campaign used both as the update request body and as the shape
/// an update response is merged from. Only the fields present in the JSON
/// are applied; omitted fields remain unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CampaignPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "wire::optional_amount", skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
    #[serde(default, deserialize_with = "wire::optional_amount", skip_serializing_if = "Option::is_none")]
    pub spend: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<CampaignStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Lenient decoders for values the backend may send in more than one form.
mod wire {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrText {
        Number(serde_json::Number),
        Text(String),
    }

    pub fn id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        Ok(match NumberOrText::deserialize(deserializer)? {
            NumberOrText::Number(n) => n.to_string(),
            NumberOrText::Text(s) => s,
        })
    }

    pub fn amount<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        match NumberOrText::deserialize(deserializer)? {
            NumberOrText::Number(n) => n
                .as_f64()
                .ok_or_else(|| D::Error::custom(format!("amount out of range: {n}"))),
            NumberOrText::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| D::Error::custom(format!("invalid amount: {s:?}"))),
        }
    }

    pub fn optional_amount<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
        #[derive(Deserialize)]
        struct Wrapped(#[serde(deserialize_with = "amount")] f64);

        Ok(Option::<Wrapped>::deserialize(deserializer)?.map(|Wrapped(value)| value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn campaign() -> Campaign {
        Campaign {
            id: "1".to_string(),
            name: "Summer Sale Campaign".to_string(),
            budget: 5000.0,
            spend: 3250.0,
            status: CampaignStatus::Active,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn campaign_accepts_decimal_strings() {
        let parsed: Campaign = serde_json::from_str(
            r#"{"id":"6f1c","name":"A","budget":"100.00","spend":"50.50","status":"paused"}"#,
        )
        .unwrap();
        assert_eq!(parsed.budget, 100.0);
        assert_eq!(parsed.spend, 50.5);
        assert_eq!(parsed.status, CampaignStatus::Paused);
    }

    #[test]
    fn campaign_accepts_numeric_id() {
        let parsed: Campaign =
            serde_json::from_str(r#"{"id":9,"name":"B","budget":10,"spend":0,"status":"active"}"#).unwrap();
        assert_eq!(parsed.id, "9");
    }

    #[test]
    fn campaign_rejects_unknown_status() {
        let result: Result<Campaign, _> =
            serde_json::from_str(r#"{"id":"1","name":"A","budget":1,"spend":0,"status":"archived"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn campaign_rejects_garbage_amount() {
        let result: Result<Campaign, _> =
            serde_json::from_str(r#"{"id":"1","name":"A","budget":"lots","spend":0,"status":"active"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn campaign_omits_missing_timestamps() {
        let json = serde_json::to_value(campaign()).unwrap();
        assert!(json.get("created_at").is_none());
        assert_eq!(json["budget"], 5000.0);
        assert_eq!(json["status"], "active");
    }

    #[test]
    fn apply_only_touches_present_fields() {
        let mut c = campaign();
        c.apply(&CampaignPatch {
            spend: Some(4000.0),
            status: Some(CampaignStatus::Completed),
            ..CampaignPatch::default()
        });
        assert_eq!(c.id, "1");
        assert_eq!(c.name, "Summer Sale Campaign");
        assert_eq!(c.budget, 5000.0);
        assert_eq!(c.spend, 4000.0);
        assert_eq!(c.status, CampaignStatus::Completed);
    }

    #[test]
    fn patch_serializes_only_present_fields() {
        let patch = CampaignPatch {
            name: Some("Renamed".to_string()),
            ..CampaignPatch::default()
        };
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json, serde_json::json!({"name": "Renamed"}));
    }

    #[test]
    fn patch_ignores_id_and_unknown_fields() {
        let patch: CampaignPatch =
            serde_json::from_str(r#"{"id":"1","budget":"12.50","colour":"red"}"#).unwrap();
        assert_eq!(patch.budget, Some(12.5));
        assert!(patch.name.is_none());
    }

    #[test]
    fn new_campaign_defaults_status_to_active() {
        let input: NewCampaign = serde_json::from_str(r#"{"name":"X","budget":1,"spend":0}"#).unwrap();
        assert_eq!(input.status, CampaignStatus::Active);
    }

    #[test]
    fn status_display_matches_wire_value() {
        for status in CampaignStatus::ALL {
            let json = serde_json::to_value(status).unwrap();
            assert_eq!(json, status.to_string());
        }
    }
}
