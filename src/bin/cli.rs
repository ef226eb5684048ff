use clap::{Args, Parser, Subcommand};
use permissions_service::{
    cli::{
        db::{db_generate, db_list, db_migrate, db_revert},
        permission_type::{format_permission_type, list_permission_type},
    },
    core::db::init_pool,
    settings::get_config,
};

#[derive(Parser)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Database related command
    Db(DbArgs),
    /// Permission type lookup table
    PermissionType(PermissionTypeArgs),
}

#[derive(Debug, Args)]
struct PermissionTypeArgs {
    #[command(subcommand)]
    command: PermissionTypeCommands,
}

#[derive(Debug, Subcommand)]
enum PermissionTypeCommands {
    /// List all permission types
    List,
}

#[derive(Debug, Args)]
struct DbArgs {
    #[command(subcommand)]
    command: DbCommands,
}

#[derive(Debug, Subcommand)]
enum DbCommands {
    /// Generate new migration file
    Generate { migration_name: String },
    /// List all migration
    List,
    /// Run all pending migration
    Migrate,
    /// Revert latest migration
    Revert,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match &cli.command {
        Commands::Db(db_args) => match &db_args.command {
            DbCommands::Generate { migration_name } => {
                println!("generate migration: {migration_name:?}");
                db_generate(migration_name).await?;
            }
            DbCommands::List => {
                println!("list migration");
                let config = get_config()?;
                db_list(&config).await?;
            }
            DbCommands::Migrate => {
                println!("run all pending migration");
                let config = get_config()?;
                println!("run migration on {}", config.database_url);
                db_migrate(&config).await?;
            }
            DbCommands::Revert => {
                println!("revert latest migration");
                let config = get_config()?;
                println!("{}", config.database_url);
                db_revert(&config).await?;
            }
        },
        Commands::PermissionType(args) => match &args.command {
            PermissionTypeCommands::List => {
                let config = get_config()?;
                let pool = init_pool(&config).await?;
                let data = list_permission_type(&pool).await?;
                println!("{}", format_permission_type(&data));
            }
        },
    }
    Ok(())
}
