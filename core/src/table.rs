//! Column layout for the campaigns table.
//!
//! Columns are static descriptors; `render_cell` is the hook a rendering
//! layer calls per row and column to get display-ready content.

use serde::Serialize;

use crate::constants::{status_color, BadgeColor};
use crate::format::format_currency;
use crate::types::Campaign;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    Right,
    Center,
}

/// How a column's cells are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CellKind {
    Text,
    Currency,
    StatusBadge,
    Actions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Column {
    pub id: &'static str,
    /// Campaign property the column reads; `None` for synthetic columns.
    pub accessor: Option<&'static str>,
    pub header: &'static str,
    pub align: Align,
    pub kind: CellKind,
}

pub static CAMPAIGN_COLUMNS: [Column; 5] = [
    Column {
        id: "name",
        accessor: Some("name"),
        header: "Name",
        align: Align::Left,
        kind: CellKind::Text,
    },
    Column {
        id: "budget",
        accessor: Some("budget"),
        header: "Budget",
        align: Align::Right,
        kind: CellKind::Currency,
    },
    Column {
        id: "spend",
        accessor: Some("spend"),
        header: "Spend",
        align: Align::Right,
        kind: CellKind::Currency,
    },
    Column {
        id: "status",
        accessor: Some("status"),
        header: "Status",
        align: Align::Left,
        kind: CellKind::StatusBadge,
    },
    Column {
        id: "actions",
        accessor: None,
        header: "",
        align: Align::Center,
        kind: CellKind::Actions,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RowAction {
    Edit,
    Delete,
}

/// Display-ready content of one table cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Cell {
    Text { value: String, align: Align, emphasis: bool },
    Badge { label: String, color: BadgeColor },
    Actions { campaign_id: String, actions: Vec<RowAction> },
}

pub fn column(id: &str) -> Option<&'static Column> {
    CAMPAIGN_COLUMNS.iter().find(|c| c.id == id)
}

/// Raw value of `accessor` on `campaign`, as shown in a plain text cell.
fn accessor_text(campaign: &Campaign, accessor: &str) -> String {
    match accessor {
        "id" => campaign.id.clone(),
        "name" => campaign.name.clone(),
        "budget" => campaign.budget.to_string(),
        "spend" => campaign.spend.to_string(),
        "status" => campaign.status.as_str().to_string(),
        _ => String::new(),
    }
}

fn accessor_amount(campaign: &Campaign, accessor: &str) -> f64 {
    match accessor {
        "budget" => campaign.budget,
        "spend" => campaign.spend,
        _ => f64::NAN,
    }
}

pub fn render_cell(column: &Column, campaign: &Campaign) -> Cell {
    let accessor = column.accessor.unwrap_or(column.id);
    match column.kind {
        CellKind::Text => Cell::Text {
            value: accessor_text(campaign, accessor),
            align: column.align,
            emphasis: false,
        },
        CellKind::Currency => Cell::Text {
            value: format_currency(accessor_amount(campaign, accessor)),
            align: column.align,
            emphasis: true,
        },
        CellKind::StatusBadge => Cell::Badge {
            label: campaign.status.label().to_string(),
            color: status_color(campaign.status),
        },
        CellKind::Actions => Cell::Actions {
            campaign_id: campaign.id.clone(),
            actions: vec![RowAction::Edit, RowAction::Delete],
        },
    }
}

/// Render one row: a cell per column, in column order.
pub fn render_row(campaign: &Campaign) -> Vec<Cell> {
    CAMPAIGN_COLUMNS.iter().map(|c| render_cell(c, campaign)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CampaignStatus;

    fn campaign() -> Campaign {
        Campaign {
            id: "4".to_string(),
            name: "Holiday Season Ads".to_string(),
            budget: 6000.0,
            spend: 2100.0,
            status: CampaignStatus::Paused,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn column_order_and_headers() {
        let headers: Vec<&str> = CAMPAIGN_COLUMNS.iter().map(|c| c.header).collect();
        assert_eq!(headers, vec!["Name", "Budget", "Spend", "Status", ""]);
        assert!(column("actions").unwrap().accessor.is_none());
    }

    #[test]
    fn currency_cells_are_right_aligned_pounds() {
        let cell = render_cell(column("budget").unwrap(), &campaign());
        assert_eq!(
            cell,
            Cell::Text {
                value: "£6,000.00".to_string(),
                align: Align::Right,
                emphasis: true,
            }
        );
    }

    #[test]
    fn status_cell_is_colored_badge() {
        let cell = render_cell(column("status").unwrap(), &campaign());
        assert_eq!(
            cell,
            Cell::Badge {
                label: "Paused".to_string(),
                color: BadgeColor::Warning,
            }
        );
    }

    #[test]
    fn row_renders_every_column() {
        let row = render_row(&campaign());
        assert_eq!(row.len(), CAMPAIGN_COLUMNS.len());
        assert!(matches!(&row[0], Cell::Text { value, .. } if value == "Holiday Season Ads"));
        assert!(matches!(&row[4], Cell::Actions { campaign_id, actions }
            if campaign_id == "4" && actions == &vec![RowAction::Edit, RowAction::Delete]));
    }

    #[test]
    fn cells_serialize_with_type_tag() {
        let json = serde_json::to_value(render_cell(column("spend").unwrap(), &campaign())).unwrap();
        assert_eq!(json["type"], "text");
        assert_eq!(json["value"], "£2,100.00");
        assert_eq!(json["align"], "right");
    }
}
