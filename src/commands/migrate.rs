use std::{error::Error, process};

use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;

use crate::{
    cli::MigrateAction,
    config::Config,
    database::{migrations::Migrator, setup_database_connection},
};

type MigrateResult = Result<(), Box<dyn Error>>;

pub async fn handle_migrate_command(config: &Config, action: MigrateAction) {
    let result = match setup_database_connection(&config.database).await {
        Ok(db) => run_migrate_action(&db, action).await,
        Err(e) => Err(e.into()),
    };

    if let Err(e) = result {
        eprintln!("❌ Migration failed: {e}");
        process::exit(1);
    }
}

pub async fn run_migrate_action(db: &DatabaseConnection, action: MigrateAction) -> MigrateResult {
    match action {
        MigrateAction::Up { steps } => up(db, steps).await,
        MigrateAction::Down { steps } => down(db, steps).await,
        MigrateAction::Status => status(db).await,
        MigrateAction::Reset => reset(db).await,
        MigrateAction::Reapply { steps } => reapply(db, steps).await,
    }
}

fn print_names<'a>(names: impl Iterator<Item = &'a str>) {
    for name in names {
        println!("  📄 {name}");
    }
    println!();
}

async fn up(db: &DatabaseConnection, steps: Option<u32>) -> MigrateResult {
    let pending = Migrator::get_pending_migrations(db).await?;

    if pending.is_empty() {
        println!("✅ All migrations are already up to date");
        return Ok(());
    }

    let count = steps.map_or(pending.len(), |steps| (steps as usize).min(pending.len()));
    println!("Running {count} of {} pending migration(s) up:", pending.len());
    print_names(pending[..count].iter().map(|migration| migration.name()));

    Migrator::up(db, steps).await?;
    println!("✅ Migrations completed successfully");
    Ok(())
}

async fn down(db: &DatabaseConnection, steps: u32) -> MigrateResult {
    let applied = Migrator::get_applied_migrations(db).await?;

    if applied.is_empty() {
        println!("❌ No migrations to roll back");
        return Ok(());
    }

    let count = (steps as usize).min(applied.len());
    println!("Rolling back {count} migration(s):");
    print_names(applied.iter().rev().take(count).map(|migration| migration.name()));

    Migrator::down(db, Some(steps)).await?;
    println!("✅ Rollback completed successfully");
    Ok(())
}

async fn status(db: &DatabaseConnection) -> MigrateResult {
    let pending = Migrator::get_pending_migrations(db).await?;
    let applied = Migrator::get_applied_migrations(db).await?;

    if pending.is_empty() {
        println!("✅ All migrations are up to date");
    } else {
        println!("📋 Pending migrations:");
        for migration in &pending {
            println!("  - {}", migration.name());
        }
    }

    println!("📋 Applied migrations:");
    for migration in &applied {
        println!("  ✓ {}", migration.name());
    }
    Ok(())
}

async fn reset(db: &DatabaseConnection) -> MigrateResult {
    println!("🔄 Resetting database (this will drop all data!)...");

    Migrator::reset(db).await?;
    println!("✅ All migrations rolled back");

    Migrator::up(db, None).await?;
    println!("✅ Database reset completed successfully");
    Ok(())
}

async fn reapply(db: &DatabaseConnection, steps: u32) -> MigrateResult {
    let applied = Migrator::get_applied_migrations(db).await?;

    if applied.is_empty() {
        println!("❌ No migrations to reapply");
        return Ok(());
    }

    let count = (steps as usize).min(applied.len());
    println!("🔄 Reapplying {count} migration(s):");
    print_names(applied.iter().rev().take(count).map(|migration| migration.name()));

    Migrator::down(db, Some(steps)).await?;
    println!("✅ Rollback completed");

    Migrator::up(db, Some(steps)).await?;
    println!("✅ Reapply completed successfully");
    Ok(())
}

#[cfg(test)]
mod tests {
    use sea_orm::{ConnectionTrait, Statement};

    use super::*;
    use crate::config::DatabaseConfig;

    async fn memory_db() -> DatabaseConnection {
        setup_database_connection(&DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            pool_size: 1,
        })
        .await
        .unwrap()
    }

    async fn table_exists(db: &DatabaseConnection) -> bool {
        db.query_one(Statement::from_string(
            db.get_database_backend(),
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name = 'interface_log'",
        ))
        .await
        .unwrap()
        .is_some()
    }

    #[tokio::test]
    async fn test_up_then_down_round_trip() {
        let db = memory_db().await;

        run_migrate_action(&db, MigrateAction::Up { steps: None })
            .await
            .unwrap();
        assert!(table_exists(&db).await);
        assert!(Migrator::get_pending_migrations(&db).await.unwrap().is_empty());

        run_migrate_action(&db, MigrateAction::Down { steps: 1 })
            .await
            .unwrap();
        assert!(!table_exists(&db).await);
    }

    #[tokio::test]
    async fn test_reset_leaves_schema_in_place() {
        let db = memory_db().await;

        run_migrate_action(&db, MigrateAction::Up { steps: None })
            .await
            .unwrap();
        run_migrate_action(&db, MigrateAction::Reset).await.unwrap();

        assert!(table_exists(&db).await);
    }
}
