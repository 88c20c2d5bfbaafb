//! Bookstore CLI - load the books CSV and query the catalog database.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "bookstore",
    version,
    about = "Bookstore catalog database toolkit"
)]
struct Cli {
    /// Database connection string, e.g. sqlite://books.db
    #[arg(long, env = "DATABASE_URL", global = true, hide_env_values = true)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: bks_cmd::Command,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    log::debug!("Running {:?}", cli.command);
    bks_cmd::run(cli.database_url.as_deref(), cli.command)
}
