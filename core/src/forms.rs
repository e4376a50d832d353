//! Form descriptors for creating and editing campaigns.
//!
//! # Design
//! Fields and rules are static data handed to a rendering layer, which draws
//! the inputs and binds each one to the campaign property named by
//! `model_value`. The same rules are evaluated here by `validate_campaign`
//! so a caller can reject a payload before it reaches the API.

use serde::Serialize;

use crate::constants::{SelectOption, STATUS_OPTIONS};
use crate::types::NewCampaign;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    Text,
    Number,
    Select,
}

/// Extra attributes forwarded to the rendered input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct InputProps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FormField {
    pub id: &'static str,
    pub label: &'static str,
    pub kind: InputKind,
    pub placeholder: &'static str,
    /// Campaign property the input is bound to.
    pub model_value: &'static str,
    pub input_props: InputProps,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<&'static [SelectOption]>,
}

pub static CAMPAIGN_FORM_FIELDS: [FormField; 4] = [
    FormField {
        id: "name",
        label: "Campaign Name",
        kind: InputKind::Text,
        placeholder: "Enter campaign name",
        model_value: "name",
        input_props: InputProps { min: None },
        items: None,
    },
    FormField {
        id: "budget",
        label: "Budget (£)",
        kind: InputKind::Number,
        placeholder: "Enter budget amount",
        model_value: "budget",
        input_props: InputProps { min: Some("0.01") },
        items: None,
    },
    FormField {
        id: "spend",
        label: "Spend (£)",
        kind: InputKind::Number,
        placeholder: "Enter spend amount",
        model_value: "spend",
        input_props: InputProps { min: Some("0") },
        items: None,
    },
    FormField {
        id: "status",
        label: "Status",
        kind: InputKind::Select,
        placeholder: "Select status",
        model_value: "status",
        input_props: InputProps { min: None },
        items: Some(&STATUS_OPTIONS),
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValidationRule {
    pub field: &'static str,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    pub message: &'static str,
}

pub static CAMPAIGN_VALIDATION_RULES: [ValidationRule; 4] = [
    ValidationRule {
        field: "name",
        required: true,
        min: None,
        message: "Campaign name is required",
    },
    ValidationRule {
        field: "budget",
        required: true,
        min: Some(0.01),
        message: "Budget must be greater than £0",
    },
    ValidationRule {
        field: "spend",
        required: true,
        min: Some(0.0),
        message: "Spend must be a positive number",
    },
    ValidationRule {
        field: "status",
        required: true,
        min: None,
        message: "Status is required",
    },
];

pub fn form_field(id: &str) -> Option<&'static FormField> {
    CAMPAIGN_FORM_FIELDS.iter().find(|f| f.id == id)
}

pub fn validation_rule(field: &str) -> Option<&'static ValidationRule> {
    CAMPAIGN_VALIDATION_RULES.iter().find(|r| r.field == field)
}

/// Value of a bound form property.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Number(f64),
}

impl ValidationRule {
    /// Whether `value` satisfies this rule. A missing value only fails when
    /// the field is required; blank text counts as missing.
    pub fn accepts(&self, value: Option<FieldValue<'_>>) -> bool {
        match value {
            None => !self.required,
            Some(FieldValue::Text(text)) => !(self.required && text.trim().is_empty()),
            Some(FieldValue::Number(n)) => match self.min {
                Some(min) => n >= min,
                None => !n.is_nan(),
            },
        }
    }
}

/// A rule that failed, keyed by the field it guards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

fn field_value<'a>(campaign: &'a NewCampaign, field: &str) -> Option<FieldValue<'a>> {
    match field {
        "name" => Some(FieldValue::Text(&campaign.name)),
        "budget" => Some(FieldValue::Number(campaign.budget)),
        "spend" => Some(FieldValue::Number(campaign.spend)),
        "status" => Some(FieldValue::Text(campaign.status.as_str())),
        _ => None,
    }
}

/// Evaluate every campaign rule against `campaign`, in form order.
pub fn validate_campaign(campaign: &NewCampaign) -> Result<(), Vec<FieldError>> {
    let errors: Vec<FieldError> = CAMPAIGN_VALIDATION_RULES
        .iter()
        .filter(|rule| !rule.accepts(field_value(campaign, rule.field)))
        .map(|rule| FieldError {
            field: rule.field,
            message: rule.message,
        })
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
