//! SeaORM entity for user accounts.
//!
//! One row per registered account: developers listing projects, investors
//! browsing them, and administrators.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Stored trimmed and lower-cased; unique case-insensitively.
    #[sea_orm(unique)]
    pub email: String,
    /// Argon2id hash of the password, never the plaintext.
    pub password_hash: String,
    /// One of "developer", "investor", "admin".
    pub role: String,
    pub first_name: Option<String>,
    pub surname: Option<String>,
    pub phone: Option<String>,
    pub company_name: Option<String>,
    pub position_in_company: Option<String>,
    pub company_website: Option<String>,
    pub company_address: Option<String>,
    /// Assets-under-management band: "lt50", "50-100" or "gt100" (USD millions).
    pub aum_band: Option<String>,
    /// Set by an admin once an investor account has been vetted.
    pub is_verified: bool,
    /// Freeform preferences document; defaults to an empty object.
    pub preferences: Json,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::projects::Entity")]
    Projects,
}

impl Related<super::projects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Projects.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
