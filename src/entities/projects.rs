//! SeaORM entity for project listings.
//!
//! A funding opportunity submitted by a developer: capital figures, risk
//! profile, location and optional narrative fields plus an attachment
//! reference (stored filename only; bytes live in the upload directory).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "projects")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    /// "residential", "commercial" or "industrial".
    pub project_type: String,
    /// Total project budget in USD millions.
    pub budget: f64,
    /// Funding sought in USD millions.
    pub funding: f64,
    /// Funding duration in months.
    pub duration: Option<i32>,
    /// Expected internal rate of return, percent.
    pub irr: f64,
    pub location: String,
    pub location_type: Option<String>,
    /// 1 (safest) to 10 (riskiest).
    pub risk_level: i32,
    /// Funding-waterfall tranche: "equity", "mezz", "senior" or "negotiable".
    pub secured: String,
    /// Sponsor equity contribution, percent.
    pub sponsor_equity: f64,
    /// Multiple on invested capital / equity multiple.
    pub moic_em: Option<f64>,
    pub timeline: Option<String>,
    pub exit_strategy: Option<String>,
    pub developer_track_record: Option<String>,
    pub website: Option<String>,
    pub preapproved_facility: Option<String>,
    pub brand_partnership: Option<String>,
    /// Stored attachment filename; the API derives the download URL from it.
    pub attachment_path: Option<String>,
    pub user_id: i32,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    Users,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
