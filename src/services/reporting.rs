//! Admin reporting: entity counts, recent-record queries and CSV snapshots.
//!
//! Record ids are monotonically increasing with creation time, so "recent N"
//! is a descending-id query for every entity. CSV output follows RFC 4180:
//! CRLF row endings, fields quoted when they contain a comma, double quote
//! or newline, embedded quotes doubled.

use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, QuerySelect};
use serde_json::json;

use crate::entities::prelude::{CallbackRequests, NdaRequests, Projects, Users};
use crate::entities::{callback_requests, nda_requests, projects, users};
use crate::models::admin::{CountsResponse, ExportEntity, UserSummary};
use crate::models::project::ProjectResponse;
use crate::models::request::{CallbackRequestResponse, NdaRequestResponse};

/// Row totals for the admin dashboard.
pub async fn counts(db: &DatabaseConnection) -> Result<CountsResponse, sea_orm::DbErr> {
    Ok(CountsResponse {
        users: Users::find().count(db).await? as i64,
        projects: Projects::find().count(db).await? as i64,
        nda_requests: NdaRequests::find().count(db).await? as i64,
        callback_requests: CallbackRequests::find().count(db).await? as i64,
    })
}

/// The newest `n` records of `entity`, newest first. Account rows are
/// reduced to summaries so password hashes never leave the store.
pub async fn recent(
    db: &DatabaseConnection,
    entity: ExportEntity,
    n: u64,
) -> Result<serde_json::Value, sea_orm::DbErr> {
    let value = match entity {
        ExportEntity::Users => {
            let rows = Users::find()
                .order_by_desc(users::Column::Id)
                .limit(n)
                .all(db)
                .await?;
            json!(rows.into_iter().map(UserSummary::from).collect::<Vec<_>>())
        }
        ExportEntity::Projects => {
            let rows = Projects::find()
                .order_by_desc(projects::Column::Id)
                .limit(n)
                .all(db)
                .await?;
            json!(
                rows.into_iter()
                    .map(ProjectResponse::from)
                    .collect::<Vec<_>>()
            )
        }
        ExportEntity::NdaRequests => {
            let rows = NdaRequests::find()
                .order_by_desc(nda_requests::Column::Id)
                .limit(n)
                .all(db)
                .await?;
            json!(
                rows.into_iter()
                    .map(NdaRequestResponse::from)
                    .collect::<Vec<_>>()
            )
        }
        ExportEntity::CallbackRequests => {
            let rows = CallbackRequests::find()
                .order_by_desc(callback_requests::Column::Id)
                .limit(n)
                .all(db)
                .await?;
            json!(
                rows.into_iter()
                    .map(CallbackRequestResponse::from)
                    .collect::<Vec<_>>()
            )
        }
    };
    Ok(value)
}

/// Quote-escape a single CSV field when it needs it.
pub fn csv_field(raw: &str) -> String {
    if raw.contains(',') || raw.contains('"') || raw.contains('\n') || raw.contains('\r') {
        format!("\"{}\"", raw.replace('"', "\"\""))
    } else {
        raw.to_string()
    }
}

fn csv_row(fields: &[String]) -> String {
    let escaped: Vec<String> = fields.iter().map(|f| csv_field(f)).collect();
    format!("{}\r\n", escaped.join(","))
}

fn opt(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn opt_num<T: ToString>(value: &Option<T>) -> String {
    value.as_ref().map(T::to_string).unwrap_or_default()
}

/// Build a full CSV snapshot of `entity`: one header row plus one row per
/// record, ascending id. Account exports omit the password hash.
pub async fn export_csv(
    db: &DatabaseConnection,
    entity: ExportEntity,
) -> Result<String, sea_orm::DbErr> {
    let mut out = String::new();
    match entity {
        ExportEntity::Users => {
            out.push_str(&csv_row(&[
                "id".into(),
                "email".into(),
                "role".into(),
                "first_name".into(),
                "surname".into(),
                "phone".into(),
                "company_name".into(),
                "aum_band".into(),
                "is_verified".into(),
                "created_at".into(),
            ]));
            for row in Users::find().all(db).await? {
                out.push_str(&csv_row(&[
                    row.id.to_string(),
                    row.email,
                    row.role,
                    opt(&row.first_name),
                    opt(&row.surname),
                    opt(&row.phone),
                    opt(&row.company_name),
                    opt(&row.aum_band),
                    row.is_verified.to_string(),
                    row.created_at.to_rfc3339(),
                ]));
            }
        }
        ExportEntity::Projects => {
            out.push_str(&csv_row(&[
                "id".into(),
                "title".into(),
                "description".into(),
                "project_type".into(),
                "budget".into(),
                "funding".into(),
                "duration".into(),
                "irr".into(),
                "location".into(),
                "location_type".into(),
                "risk_level".into(),
                "secured".into(),
                "sponsor_equity".into(),
                "attachment_path".into(),
                "user_id".into(),
                "created_at".into(),
            ]));
            for row in Projects::find().all(db).await? {
                out.push_str(&csv_row(&[
                    row.id.to_string(),
                    row.title,
                    row.description,
                    row.project_type,
                    row.budget.to_string(),
                    row.funding.to_string(),
                    opt_num(&row.duration),
                    row.irr.to_string(),
                    row.location,
                    opt(&row.location_type),
                    row.risk_level.to_string(),
                    row.secured,
                    row.sponsor_equity.to_string(),
                    opt(&row.attachment_path),
                    row.user_id.to_string(),
                    row.created_at.to_rfc3339(),
                ]));
            }
        }
        ExportEntity::NdaRequests => {
            out.push_str(&csv_row(&[
                "id".into(),
                "user_id".into(),
                "project_id".into(),
                "company".into(),
                "contact_name".into(),
                "contact_email".into(),
                "message".into(),
                "created_at".into(),
            ]));
            for row in NdaRequests::find().all(db).await? {
                out.push_str(&csv_row(&[
                    row.id.to_string(),
                    row.user_id.to_string(),
                    opt_num(&row.project_id),
                    row.company,
                    row.contact_name,
                    row.contact_email,
                    opt(&row.message),
                    row.created_at.to_rfc3339(),
                ]));
            }
        }
        ExportEntity::CallbackRequests => {
            out.push_str(&csv_row(&[
                "id".into(),
                "name".into(),
                "company".into(),
                "phone".into(),
                "email".into(),
                "message".into(),
                "created_at".into(),
            ]));
            for row in CallbackRequests::find().all(db).await? {
                out.push_str(&csv_row(&[
                    row.id.to_string(),
                    row.name,
                    row.company,
                    row.phone,
                    row.email,
                    opt(&row.message),
                    row.created_at.to_rfc3339(),
                ]));
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_field_is_unquoted() {
        assert_eq!(csv_field("Manchester"), "Manchester");
    }

    #[test]
    fn test_comma_forces_quoting() {
        assert_eq!(csv_field("Call me, soon"), "\"Call me, soon\"");
    }

    #[test]
    fn test_embedded_quotes_are_doubled() {
        assert_eq!(
            csv_field("She said \"hello\", twice"),
            "\"She said \"\"hello\"\", twice\""
        );
    }

    #[test]
    fn test_newline_forces_quoting() {
        assert_eq!(csv_field("line one\nline two"), "\"line one\nline two\"");
    }

    #[test]
    fn test_row_is_crlf_terminated() {
        let row = csv_row(&["1".to_string(), "a,b".to_string()]);
        assert_eq!(row, "1,\"a,b\"\r\n");
    }
}
