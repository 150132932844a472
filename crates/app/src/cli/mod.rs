use clap::{Parser, Subcommand};

mod migrate;
mod product;

#[derive(Debug, Parser)]
#[command(name = "luxe-app", about = "Luxe CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Apply pending database migrations
    Migrate(migrate::MigrateArgs),
    /// Manage catalog products
    Product(product::ProductCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Migrate(args) => migrate::run(args).await,
            Commands::Product(command) => product::run(command).await,
        }
    }
}
