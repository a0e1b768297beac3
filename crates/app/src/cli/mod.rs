use cartly_app::database::{self, DatabaseOptions};
use clap::{Args, Parser, Subcommand};
use sqlx::PgPool;

mod cart;
mod db;

#[derive(Debug, Parser)]
#[command(name = "cartly-app", about = "Cartly CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Cart(cart::CartCommand),
    Db(db::DbCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Cart(command) => cart::run(command).await,
            Commands::Db(command) => db::run(command).await,
        }
    }
}

/// Connection flags shared by every subcommand.
#[derive(Debug, Args)]
pub(crate) struct DatabaseArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

impl DatabaseArgs {
    pub(crate) async fn connect(&self) -> Result<PgPool, String> {
        database::connect(&DatabaseOptions::new(self.database_url.as_str()))
            .await
            .map_err(|error| format!("failed to connect to database: {error}"))
    }
}
