//! Dynamic filter construction for the project search page.
//!
//! Builds a composable predicate set from the user-supplied criteria and
//! evaluates it against the projects table. Criteria are ANDed together;
//! the free-text criterion is itself an OR across title, description and
//! location. Results are always ordered newest-first (descending id),
//! filtered or not.

use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect,
    sea_query::{Expr, Func},
};

use crate::entities::{prelude::Projects, projects};
use crate::models::search::SearchQuery;

/// Build the WHERE condition for a search. An empty criteria set yields an
/// empty conjunction, i.e. match everything. A NULL probed column never
/// matches, it does not error.
pub fn build_condition(query: &SearchQuery) -> Condition {
    let mut condition = Condition::all();

    if let Some(text) = query.text() {
        let pattern = format!("%{}%", text.to_lowercase());
        condition = condition.add(
            Condition::any()
                .add(
                    Expr::expr(Func::lower(Expr::col(projects::Column::Title)))
                        .like(pattern.clone()),
                )
                .add(
                    Expr::expr(Func::lower(Expr::col(projects::Column::Description)))
                        .like(pattern.clone()),
                )
                .add(Expr::expr(Func::lower(Expr::col(projects::Column::Location))).like(pattern)),
        );
    }

    if let Some(min_irr) = query.min_irr {
        condition = condition.add(projects::Column::Irr.gte(min_irr));
    }

    if let Some(location_type) = query.location_type() {
        condition = condition.add(projects::Column::LocationType.eq(location_type));
    }

    let locations = query.location_set();
    if !locations.is_empty() {
        condition = condition.add(projects::Column::Location.is_in(locations));
    }

    condition
}

/// Run a search: returns the matching page (descending id) and the total
/// count matching the criteria.
pub async fn search_projects(
    db: &DatabaseConnection,
    query: &SearchQuery,
) -> Result<(Vec<projects::Model>, i64), sea_orm::DbErr> {
    let filtered = Projects::find().filter(build_condition(query));
    let total = filtered.clone().count(db).await? as i64;

    let mut select = filtered.order_by_desc(projects::Column::Id);
    if let Some(offset) = query.offset {
        select = select.offset(offset);
    }
    if let Some(limit) = query.limit {
        select = select.limit(limit);
    }

    let rows = select.all(db).await?;
    Ok((rows, total))
}

/// Distinct locations currently present in the store, ascending. Feeds the
/// search page's location filter control.
pub async fn distinct_locations(db: &DatabaseConnection) -> Result<Vec<String>, sea_orm::DbErr> {
    Projects::find()
        .select_only()
        .column(projects::Column::Location)
        .distinct()
        .order_by_asc(projects::Column::Location)
        .into_tuple::<String>()
        .all(db)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DbBackend, QueryTrait};

    fn sql_for(query: &SearchQuery) -> String {
        Projects::find()
            .filter(build_condition(query))
            .order_by_desc(projects::Column::Id)
            .build(DbBackend::Postgres)
            .to_string()
    }

    #[test]
    fn test_empty_criteria_has_no_where_clause() {
        let sql = sql_for(&SearchQuery::default());
        assert!(!sql.contains("WHERE"), "unexpected WHERE in: {}", sql);
        assert!(sql.contains("ORDER BY \"projects\".\"id\" DESC"));
    }

    #[test]
    fn test_free_text_matches_three_columns_case_insensitively() {
        let query = SearchQuery {
            q: Some("Tower".to_string()),
            ..Default::default()
        };
        let sql = sql_for(&query);
        assert!(sql.contains("LOWER(\"title\") LIKE '%tower%'"));
        assert!(sql.contains("LOWER(\"description\") LIKE '%tower%'"));
        assert!(sql.contains("LOWER(\"location\") LIKE '%tower%'"));
        assert!(sql.contains(" OR "));
    }

    #[test]
    fn test_min_irr_is_inclusive_threshold() {
        let query = SearchQuery {
            min_irr: Some(5.0),
            ..Default::default()
        };
        let sql = sql_for(&query);
        assert!(sql.contains("\"irr\" >= 5"), "missing >= in: {}", sql);
    }

    #[test]
    fn test_location_set_membership() {
        let query = SearchQuery {
            locations: Some("Manchester,Leeds".to_string()),
            ..Default::default()
        };
        let sql = sql_for(&query);
        assert!(
            sql.contains("\"location\" IN ('Manchester', 'Leeds')"),
            "missing IN in: {}",
            sql
        );
    }

    #[test]
    fn test_combined_criteria_are_anded() {
        let query = SearchQuery {
            q: Some("tower".to_string()),
            min_irr: Some(8.0),
            location_type: Some("city".to_string()),
            ..Default::default()
        };
        let sql = sql_for(&query);
        assert!(sql.contains(" AND "));
        assert!(sql.contains("\"location_type\" = 'city'"));
        assert!(sql.contains("\"irr\" >= 8"));
    }
}
