pub use sea_orm_migration::prelude::*;

mod m20250601_000001_create_reference_tables;
mod m20250601_000002_create_funding_opportunities_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250601_000001_create_reference_tables::Migration),
            Box::new(m20250601_000002_create_funding_opportunities_table::Migration),
        ]
    }
}
