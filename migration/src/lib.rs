pub use sea_orm_migration::prelude::*;

mod m20260702_000001_create_users;
mod m20260702_000002_create_projects;
mod m20260715_000001_create_nda_requests;
mod m20260715_000002_create_callback_requests;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260702_000001_create_users::Migration),
            Box::new(m20260702_000002_create_projects::Migration),
            Box::new(m20260715_000001_create_nda_requests::Migration),
            Box::new(m20260715_000002_create_callback_requests::Migration),
        ]
    }
}
