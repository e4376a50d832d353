//! In-memory stand-in for the campaigns REST backend.
//!
//! Serves `/campaigns/` and `/campaigns/{id}/` with the same shapes the real
//! backend produces: UUID ids, server-set timestamps, amounts as two-decimal
//! strings, and either a paginated envelope or a bare array for lists.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;
use uuid::Uuid;

const MAX_NAME_LEN: usize = 255;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Active,
    Paused,
    Completed,
}

impl Status {
    fn as_str(self) -> &'static str {
        match self {
            Status::Active => "active",
            Status::Paused => "paused",
            Status::Completed => "completed",
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Campaign {
    pub id: Uuid,
    pub name: String,
    #[serde(with = "amount")]
    pub budget: f64,
    #[serde(with = "amount")]
    pub spend: f64,
    pub status: Status,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Deserialize)]
pub struct CreateCampaign {
    pub name: String,
    #[serde(deserialize_with = "amount::deserialize")]
    pub budget: f64,
    #[serde(deserialize_with = "amount::deserialize")]
    pub spend: f64,
    #[serde(default)]
    pub status: Status,
}

#[derive(Deserialize)]
pub struct UpdateCampaign {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "amount::deserialize_option")]
    pub budget: Option<f64>,
    #[serde(default, deserialize_with = "amount::deserialize_option")]
    pub spend: Option<f64>,
    pub status: Option<Status>,
}

/// Body shape of the list endpoint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ListShape {
    /// `{"count", "next", "previous", "results"}`
    #[default]
    Envelope,
    Bare,
}

#[derive(Clone, Debug, Default)]
pub struct ServerConfig {
    pub list_shape: ListShape,
    pub seed_sample_data: bool,
}

pub type Db = Arc<RwLock<Vec<Campaign>>>;

#[derive(Clone)]
struct AppState {
    db: Db,
    list_shape: ListShape,
}

pub fn app() -> Router {
    app_with(&ServerConfig::default())
}

pub fn app_with(config: &ServerConfig) -> Router {
    let campaigns = if config.seed_sample_data {
        sample_campaigns()
    } else {
        Vec::new()
    };
    let state = AppState {
        db: Arc::new(RwLock::new(campaigns)),
        list_shape: config.list_shape,
    };
    Router::new()
        .route("/campaigns/", get(list_campaigns).post(create_campaign))
        .route(
            "/campaigns/{id}/",
            get(get_campaign).patch(update_campaign).delete(delete_campaign),
        )
        .with_state(state)
}

pub async fn serve(listener: TcpListener, config: &ServerConfig) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(config)).await
}

/// The five demo campaigns, oldest first.
pub fn sample_campaigns() -> Vec<Campaign> {
    let rows = [
        ("Summer Sale Campaign", 5000.0, 3250.0, Status::Active),
        ("Black Friday Promotion", 7500.0, 7500.0, Status::Completed),
        ("New Product Launch", 10000.0, 4200.0, Status::Active),
        ("Holiday Season Ads", 6000.0, 2100.0, Status::Paused),
        ("Brand Awareness", 3500.0, 3200.0, Status::Active),
    ];
    let now = Utc::now();
    let oldest = now - Duration::days(rows.len() as i64);
    rows.iter()
        .enumerate()
        .map(|(i, &(name, budget, spend, status))| {
            let created_at = oldest + Duration::days(i as i64);
            Campaign {
                id: Uuid::new_v4(),
                name: name.to_string(),
                budget,
                spend,
                status,
                created_at,
                updated_at: created_at,
            }
        })
        .collect()
}

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub status: Option<Status>,
    pub search: Option<String>,
    pub ordering: Option<String>,
}

async fn list_campaigns(State(state): State<AppState>, Query(params): Query<ListParams>) -> Json<serde_json::Value> {
    let campaigns = state.db.read().await;
    // Newest first unless an ordering is requested.
    let mut rows: Vec<&Campaign> = campaigns.iter().rev().collect();

    if let Some(status) = params.status {
        rows.retain(|c| c.status == status);
    }
    if let Some(search) = params.search.as_deref().map(str::to_lowercase) {
        rows.retain(|c| c.name.to_lowercase().contains(&search));
    }
    if let Some(ordering) = params.ordering.as_deref() {
        apply_ordering(&mut rows, ordering);
    }

    let results = serde_json::to_value(&rows).unwrap_or_default();
    Json(match state.list_shape {
        ListShape::Envelope => json!({
            "count": rows.len(),
            "next": null,
            "previous": null,
            "results": results,
        }),
        ListShape::Bare => results,
    })
}

/// Sort by one of the orderable fields; a leading `-` sorts descending.
/// Unknown fields are ignored.
fn apply_ordering(rows: &mut [&Campaign], ordering: &str) {
    let (descending, field) = match ordering.strip_prefix('-') {
        Some(field) => (true, field),
        None => (false, ordering),
    };
    let compare: fn(&Campaign, &Campaign) -> std::cmp::Ordering = match field {
        "name" => |a: &Campaign, b: &Campaign| a.name.cmp(&b.name),
        "budget" => |a: &Campaign, b: &Campaign| a.budget.total_cmp(&b.budget),
        "spend" => |a: &Campaign, b: &Campaign| a.spend.total_cmp(&b.spend),
        "status" => |a: &Campaign, b: &Campaign| a.status.as_str().cmp(b.status.as_str()),
        "created_at" => |a: &Campaign, b: &Campaign| a.created_at.cmp(&b.created_at),
        _ => return,
    };
    if descending {
        rows.sort_by(|a, b| compare(b, a));
    } else {
        rows.sort_by(|a, b| compare(a, b));
    }
}

async fn create_campaign(
    State(state): State<AppState>,
    payload: Result<Json<CreateCampaign>, JsonRejection>,
) -> Result<(StatusCode, Json<Campaign>), Response> {
    let Json(input) = payload.map_err(invalid_body)?;
    validate(Some(&input.name), Some(input.budget), Some(input.spend))?;
    let now = Utc::now();
    let campaign = Campaign {
        id: Uuid::new_v4(),
        name: input.name,
        budget: input.budget,
        spend: input.spend,
        status: input.status,
        created_at: now,
        updated_at: now,
    };
    info!(id = %campaign.id, name = %campaign.name, "campaign created");
    state.db.write().await.push(campaign.clone());
    Ok((StatusCode::CREATED, Json(campaign)))
}

async fn get_campaign(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Campaign>, StatusCode> {
    let id = parse_id(&id)?;
    let campaigns = state.db.read().await;
    campaigns
        .iter()
        .find(|c| c.id == id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn update_campaign(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateCampaign>, JsonRejection>,
) -> Result<Json<Campaign>, Response> {
    let id = parse_id(&id).map_err(IntoResponse::into_response)?;
    let Json(input) = payload.map_err(invalid_body)?;
    validate(input.name.as_ref(), input.budget, input.spend)?;

    let mut campaigns = state.db.write().await;
    let campaign = campaigns
        .iter_mut()
        .find(|c| c.id == id)
        .ok_or_else(|| StatusCode::NOT_FOUND.into_response())?;
    if let Some(name) = input.name {
        campaign.name = name;
    }
    if let Some(budget) = input.budget {
        campaign.budget = budget;
    }
    if let Some(spend) = input.spend {
        campaign.spend = spend;
    }
    if let Some(status) = input.status {
        campaign.status = status;
    }
    campaign.updated_at = Utc::now();
    info!(%id, "campaign updated");
    Ok(Json(campaign.clone()))
}

async fn delete_campaign(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, StatusCode> {
    let id = parse_id(&id)?;
    let mut campaigns = state.db.write().await;
    let index = campaigns
        .iter()
        .position(|c| c.id == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    campaigns.remove(index);
    info!(%id, "campaign deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Ids that are not UUIDs cannot match any campaign.
fn parse_id(raw: &str) -> Result<Uuid, StatusCode> {
    Uuid::parse_str(raw).map_err(|_| StatusCode::NOT_FOUND)
}

/// Undecodable bodies answer 400 like a failed field check. A missing field
/// is keyed by its name; anything else lands under `non_field_errors`.
fn invalid_body(rejection: JsonRejection) -> Response {
    if !matches!(rejection, JsonRejection::JsonDataError(_) | JsonRejection::JsonSyntaxError(_)) {
        return rejection.into_response();
    }
    let detail = rejection.body_text();
    let mut errors = serde_json::Map::new();
    match missing_field(&detail) {
        Some(field) => errors.insert(field.to_string(), json!(["This field is required."])),
        None => errors.insert("non_field_errors".into(), json!([detail])),
    };
    (StatusCode::BAD_REQUEST, Json(serde_json::Value::Object(errors))).into_response()
}

fn missing_field(detail: &str) -> Option<&str> {
    let (_, rest) = detail.split_once("missing field `")?;
    rest.split_once('`').map(|(field, _)| field)
}

/// Field checks the backend applies on create and update. Failures answer
/// 400 with messages keyed by field.
fn validate(name: Option<&String>, budget: Option<f64>, spend: Option<f64>) -> Result<(), Response> {
    let mut errors = serde_json::Map::new();
    if let Some(name) = name {
        if name.trim().is_empty() {
            errors.insert("name".into(), json!(["This field may not be blank."]));
        } else if name.chars().count() > MAX_NAME_LEN {
            errors.insert(
                "name".into(),
                json!([format!("Ensure this field has no more than {MAX_NAME_LEN} characters.")]),
            );
        }
    }
    for (field, value) in [("budget", budget), ("spend", spend)] {
        if value.is_some_and(|v| v < 0.0) {
            let mut label = field.to_string();
            label[..1].make_ascii_uppercase();
            errors.insert(field.into(), json!([format!("{label} cannot be negative")]));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err((StatusCode::BAD_REQUEST, Json(serde_json::Value::Object(errors))).into_response())
    }
}

/// Two-decimal string on the way out; number or numeric string on the way in.
mod amount {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("{value:.2}"))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Ok(n),
            Raw::Text(s) => s
                .trim()
                .parse()
                .map_err(|_| D::Error::custom("A valid number is required.")),
        }
    }

    pub fn deserialize_option<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
        #[derive(Deserialize)]
        struct Wrapped(#[serde(deserialize_with = "deserialize")] f64);

        Ok(Option::<Wrapped>::deserialize(deserializer)?.map(|Wrapped(v)| v))
    }
}
