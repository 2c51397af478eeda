pub use sea_orm_migration::prelude::*;

mod m20261017_090000_create_interface_log;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20261017_090000_create_interface_log::Migration)]
    }
}

pub struct Migrator;
