pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::config::{AppConfig, DatabaseConfig, StoreBackend};

#[derive(Parser)]
#[command(name = "roster")]
#[command(about = "Roster CLI - manage the teacher roster store directly")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Create the database tables if they are missing")]
    Migrate,

    #[command(about = "User management")]
    Users {
        #[command(subcommand)]
        cmd: commands::users::UserCommands,
    },

    #[command(about = "Teacher queries")]
    Teachers {
        #[command(subcommand)]
        cmd: commands::teachers::TeacherCommands,
    },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli, config: &AppConfig) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    require_persistent_store(&config.database)?;
    let store = crate::database::open_store(&config.database).await?;

    let result = match cli.command {
        Commands::Migrate => commands::migrate::handle(output_format),
        Commands::Users { cmd } => commands::users::handle(cmd, store.as_ref(), output_format).await,
        Commands::Teachers { cmd } => commands::teachers::handle(cmd, store.as_ref(), output_format).await,
    };

    store.close().await;
    result
}

/// Memory stores vanish with the process
fn require_persistent_store(config: &DatabaseConfig) -> anyhow::Result<()> {
    if config.backend == StoreBackend::Memory {
        anyhow::bail!("The roster CLI needs a persistent store; unset DATABASE_BACKEND=memory and set DATABASE_URL");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refuses_memory_backend() {
        let mut config = AppConfig::development();
        config.database.backend = StoreBackend::Memory;

        let err = require_persistent_store(&config.database).unwrap_err();
        assert!(err.to_string().contains("persistent store"));
    }

    #[test]
    fn accepts_postgres_backend() {
        let config = AppConfig::development();
        assert!(require_persistent_store(&config.database).is_ok());
    }
}
