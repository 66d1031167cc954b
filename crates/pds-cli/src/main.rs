mod config;
mod seed;
mod web;

use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use pds_db::config::DbConfig;
use pds_db::pool;

use config::PdsConfig;

#[derive(Parser)]
#[command(name = "pds", about = "Personal journal, plans and values tracker")]
struct Cli {
    /// Database URL (overrides PDS_DATABASE_URL env var)
    #[arg(long, global = true)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a pds config file (no database required)
    Init {
        /// PostgreSQL connection URL
        #[arg(long, default_value = DbConfig::DEFAULT_URL)]
        db_url: String,
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
    /// Create the database if needed and apply migrations
    DbInit,
    /// Run the web server
    Serve {
        /// Address to bind (overrides PDS_BIND)
        #[arg(long)]
        bind: Option<String>,
        /// Port to listen on (overrides PDS_PORT)
        #[arg(long)]
        port: Option<u16>,
        /// Directory served under /static
        #[arg(long, default_value = "static")]
        static_dir: PathBuf,
    },
    /// Insert sample journals, values, a plan, a statement and a behaviour
    Seed,
    /// Print shell completions to stdout
    Completions {
        shell: Shell,
    },
}

/// Execute the `pds init` command: write config file.
fn cmd_init(db_url: &str, force: bool) -> anyhow::Result<()> {
    let path = config::config_path();

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}\nUse --force to overwrite.",
            path.display()
        );
    }

    let cfg = config::ConfigFile {
        database: config::DatabaseSection {
            url: db_url.to_string(),
        },
        server: config::ServerSection::default(),
    };
    config::save_config(&cfg)?;

    println!("Config written to {}", path.display());
    println!("  database.url = {db_url}");
    println!();
    println!("Next: run `pds db-init` to create and migrate the database.");

    Ok(())
}

/// Execute the `pds db-init` command: create database and run migrations.
async fn cmd_db_init(resolved: &PdsConfig) -> anyhow::Result<()> {
    println!("Initializing pds database...");

    pool::ensure_database_exists(&resolved.db_config).await?;
    let db_pool = pool::create_pool(&resolved.db_config).await?;
    pool::run_migrations(&db_pool).await?;

    let counts = pool::table_counts(&db_pool).await?;
    println!("Database ready. Tables:");
    for (table, count) in &counts {
        println!("  {table}: {count} rows");
    }

    db_pool.close().await;

    println!("pds db-init complete.");
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init { db_url, force } => {
            cmd_init(&db_url, force)?;
        }
        Commands::DbInit => {
            let resolved = PdsConfig::resolve(cli.database_url.as_deref(), None, None)?;
            cmd_db_init(&resolved).await?;
        }
        Commands::Serve {
            bind,
            port,
            static_dir,
        } => {
            let resolved = PdsConfig::resolve(cli.database_url.as_deref(), bind.as_deref(), port)?;
            let db_pool = pool::create_pool(&resolved.db_config).await?;
            pool::run_migrations(&db_pool).await?;
            let result =
                web::run_serve(db_pool.clone(), &resolved.bind, resolved.port, &static_dir).await;
            db_pool.close().await;
            result?;
        }
        Commands::Seed => {
            let resolved = PdsConfig::resolve(cli.database_url.as_deref(), None, None)?;
            let db_pool = pool::create_pool(&resolved.db_config).await?;
            let result = seed::run_seed(&db_pool).await;
            db_pool.close().await;
            result?;
        }
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "pds", &mut std::io::stdout());
        }
    }

    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn serve_flags_parse() {
        let cli = Cli::try_parse_from(["pds", "serve", "--port", "9000", "--bind", "0.0.0.0"]).unwrap();
        match cli.command {
            Commands::Serve { bind, port, static_dir } => {
                assert_eq!(bind.as_deref(), Some("0.0.0.0"));
                assert_eq!(port, Some(9000));
                assert_eq!(static_dir, PathBuf::from("static"));
            }
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn database_url_is_global() {
        let cli = Cli::try_parse_from(["pds", "seed", "--database-url", "postgresql://h/db"]).unwrap();
        assert_eq!(cli.database_url.as_deref(), Some("postgresql://h/db"));
    }
}
