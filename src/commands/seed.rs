use std::process;

use rand::{rngs::StdRng, SeedableRng};
use sea_orm::DbErr;
use sea_orm_migration::MigratorTrait;
use tracing::info;

use crate::{
    config::Config,
    database::{migrations::Migrator, setup_database_connection},
    interface_logs,
    seed::{batch_sizes, generate_log},
};

pub async fn handle_seed_command(config: &Config, count: usize, days: u32, clear: bool) {
    if let Err(e) = seed_database(config, count, days, clear).await {
        eprintln!("❌ Seeding failed: {e}");
        process::exit(1);
    }
}

async fn seed_database(config: &Config, count: usize, days: u32, clear: bool) -> Result<(), DbErr> {
    let db = setup_database_connection(&config.database).await?;
    Migrator::up(&db, None).await?;

    if clear {
        let deleted = interface_logs::delete_all(&db).await?;
        println!("🧹 Deleted {deleted} existing record(s)");
    }

    println!("🌱 Generating {count} record(s) over the last {days} day(s)...");

    let mut rng = StdRng::from_entropy();
    let now = interface_logs::now();
    let mut inserted = 0;

    for size in batch_sizes(count) {
        let batch = (0..size)
            .map(|_| generate_log(&mut rng, now, days))
            .collect();
        interface_logs::insert_many(&db, batch).await?;

        inserted += size;
        println!("  📄 Inserted {inserted}/{count}");
    }

    info!(inserted, "Seeding finished");
    println!("✅ Seeded {inserted} interface log(s)");
    Ok(())
}
