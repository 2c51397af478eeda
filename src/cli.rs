use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = env!("CARGO_PKG_NAME"))]
#[command(about = env!("CARGO_PKG_DESCRIPTION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server (default)
    Serve,
    /// Database migration commands
    Migrate {
        #[command(subcommand)]
        action: MigrateAction,
    },
    /// Fill the database with sample interface runs
    Seed {
        /// Number of records to generate
        #[arg(short, long, default_value = "10000")]
        count: usize,
        /// Spread records over this many days before now
        #[arg(short, long, default_value = "30")]
        days: u32,
        /// Delete all existing records first
        #[arg(long)]
        clear: bool,
    },
    /// Show version information
    Version,
}

#[derive(Subcommand)]
pub enum MigrateAction {
    /// Run migrations up
    Up {
        /// Number of migrations to run (default: all)
        #[arg(short, long)]
        steps: Option<u32>,
    },
    /// Run migrations down
    Down {
        /// Number of migrations to rollback (default: 1)
        #[arg(short, long, default_value = "1")]
        steps: u32,
    },
    /// Show migration status
    Status,
    /// Reset database (down all, then up all)
    Reset,
    /// Reapply recent migrations (down then up)
    Reapply {
        /// Number of migrations to reapply (default: 1)
        #[arg(short, long, default_value = "1")]
        steps: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serve_is_the_default() {
        let cli = Cli::try_parse_from(["interface-monitor"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_parses_seed_options() {
        let cli = Cli::try_parse_from([
            "interface-monitor",
            "seed",
            "--count",
            "250",
            "--days",
            "7",
            "--clear",
        ])
        .unwrap();

        assert!(matches!(
            cli.command,
            Some(Commands::Seed {
                count: 250,
                days: 7,
                clear: true
            })
        ));
    }

    #[test]
    fn test_parses_migrate_down_steps() {
        let cli = Cli::try_parse_from(["interface-monitor", "migrate", "down", "-s", "2"]).unwrap();

        assert!(matches!(
            cli.command,
            Some(Commands::Migrate {
                action: MigrateAction::Down { steps: 2 }
            })
        ));
    }
}
