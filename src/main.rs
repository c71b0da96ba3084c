//! Taxonomy administration binary for the promptsouq catalog.

use std::process::ExitCode;

use clap::{Parser, Subcommand};

use promptsouq::db::establish_connection_pool;
use promptsouq::domain::taxonomy::default_taxonomy;
use promptsouq::migration;
use promptsouq::migration::mapping::CategoryMappings;
use promptsouq::migration::reassign::FAILURES_FILE;
use promptsouq::models::config::AppConfig;
use promptsouq::repository::{CategoryWriter, DieselRepository};

#[derive(Parser, Debug)]
#[command(
    name = "promptsouq",
    version,
    about = "Catalog taxonomy administration for the promptsouq marketplace"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Snapshot prompts and category relations, and write the mapping guide
    Backup,
    /// Back up, then atomically replace the taxonomy with the new tree
    Migrate,
    /// Seed the new taxonomy into an empty database
    Seed,
    /// Recreate prompt links from the latest backup
    Reassign,
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;
    let pool = establish_connection_pool(&config.database_url)?;
    let repo = DieselRepository::new(pool);
    let mappings = CategoryMappings::legacy();

    match cli.command {
        Command::Backup => {
            let snapshot = migration::backup::backup_prompts(&repo, &config.backup_dir)?;
            migration::guide::write_mapping_guide(&mappings, &config.backup_dir)?;
            println!(
                "Backed up {} prompts ({} category relations) to {}.",
                snapshot.prompts_backed_up,
                snapshot.relations.len(),
                config.backup_dir.display()
            );
        }
        Command::Migrate => {
            let report =
                migration::run_migration(&repo, &config.backup_dir, &default_taxonomy(), &mappings)?;
            println!(
                "Migration complete: backed up {} prompts and {} relations; \
                 removed {} links and {} categories; seeded {} categories with {} subcategories.",
                report.prompts_backed_up,
                report.relations_backed_up,
                report.taxonomy.reset.links_deleted,
                report.taxonomy.reset.categories_deleted,
                report.taxonomy.seeded.categories_created,
                report.taxonomy.seeded.subcategories_created,
            );
        }
        Command::Seed => {
            let seeded = repo.seed_taxonomy(&default_taxonomy())?;
            println!(
                "Seeded {} categories with {} subcategories.",
                seeded.categories_created, seeded.subcategories_created
            );
        }
        Command::Reassign => {
            let outcome = migration::run_reassignment(&repo, &config.backup_dir, &mappings)?;
            println!(
                "Reassignment complete: {} total, {} reassigned, {} failed, {} skipped.",
                outcome.stats.total,
                outcome.stats.reassigned,
                outcome.stats.failed,
                outcome.stats.skipped
            );
            if outcome.stats.failed > 0 {
                eprintln!(
                    "See {} for the unresolved relations.",
                    config.backup_dir.join(FAILURES_FILE).display()
                );
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
