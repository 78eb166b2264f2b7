//! crudkit CLI.

use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser, Subcommand};

use crudkit::{
    auto_register, generate_crud, generate_model, load_config, save_config, AutoRegisterOptions,
    CrudConfig, GenerateResult, Generator, SpliceOutcome,
};

#[derive(Parser)]
#[command(name = "crudkit")]
#[command(author, version, about = "Generate CRUD slices from database tables", long_about = None)]
struct Cli {
    /// MySQL connection URL (also read from DATABASE_URL).
    #[arg(long, global = true, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Database (schema) name to introspect.
    #[arg(long, global = true, env = "DATABASE_NAME", default_value = "app")]
    database: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every table in the database
    #[command(name = "list:tables")]
    ListTables,

    /// Generate the back-end model file only
    #[command(name = "gen:model")]
    GenModel {
        /// Source table
        #[arg(long)]
        table: String,

        /// Target module
        #[arg(long, default_value = "admin")]
        module: String,

        /// Output directory
        #[arg(long, default_value = ".")]
        output: PathBuf,

        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },

    /// Generate the full CRUD slice
    #[command(name = "gen:crud")]
    GenCrud {
        /// Source table (mutually exclusive with --config)
        #[arg(long, conflicts_with = "config", required_unless_present = "config")]
        table: Option<String>,

        /// Config document to generate from
        #[arg(long)]
        config: Option<PathBuf>,

        /// Target module
        #[arg(long, default_value = "admin")]
        module: String,

        /// Output directory
        #[arg(long, default_value = ".")]
        output: PathBuf,

        /// Also generate the front-end artifacts
        #[arg(long, action = ArgAction::Set, default_value_t = true)]
        frontend: bool,

        /// Overwrite existing files
        #[arg(long)]
        force: bool,

        /// Splice routes and menu into the host application afterwards
        #[arg(long)]
        auto_register: bool,

        /// Render everything, write nothing
        #[arg(long)]
        dry_run: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Write a config document derived from a table
    #[command(name = "init:config")]
    InitConfig {
        /// Source table
        #[arg(long)]
        table: String,

        /// Target module
        #[arg(long, default_value = "admin")]
        module: String,

        /// Directory for the config document
        #[arg(long, default_value = "configs")]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // --verbose raises the default log level; RUST_LOG still wins.
    let default_level = match &cli.command {
        Commands::GenCrud { verbose: true, .. } => "debug",
        _ => "warn",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_target(false)
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::ListTables => {
            let generator = connect(&cli).await?;
            let tables = generator.list_tables().await?;
            for (i, table) in tables.iter().enumerate() {
                println!("{:3}. {}", i + 1, table);
            }
            println!("\n{} tables", tables.len());
            Ok(())
        }

        Commands::GenModel {
            ref table,
            ref module,
            ref output,
            force,
        } => {
            let generator = connect(&cli).await?;
            let mut config = generator.config_from_table(table, module).await?;
            config.options.output_dir = output.to_string_lossy().into_owned();
            config.options.force = force;

            let result = generate_model(&config, &config.options.clone())?;
            report(&result);
            Ok(())
        }

        Commands::GenCrud {
            ref table,
            ref config,
            ref module,
            ref output,
            frontend,
            force,
            auto_register: register,
            dry_run,
            verbose,
        } => {
            let mut cfg = match (table, config) {
                (_, Some(path)) => load_config(path)?,
                (Some(table), None) => {
                    let generator = connect(&cli).await?;
                    generator.config_from_table(table, module).await?
                }
                (None, None) => unreachable!("clap enforces one of --table/--config"),
            };
            cfg.options.output_dir = output.to_string_lossy().into_owned();
            cfg.options.with_frontend = frontend;
            cfg.options.force = force;
            cfg.options.dry_run = dry_run;
            cfg.options.verbose = verbose;

            print_summary(&cfg);

            let result = generate_crud(&cfg, &cfg.options.clone())?;
            report(&result);

            if register && result.is_clean() {
                run_auto_register(&cfg, output, dry_run, verbose)?;
            }

            if result.is_clean() {
                println!("\nDone.");
            } else {
                eprintln!("\nCompleted with {} error(s).", result.errors.len());
            }
            Ok(())
        }

        Commands::InitConfig {
            ref table,
            ref module,
            ref output,
        } => {
            let generator = connect(&cli).await?;
            let config = generator.config_from_table(table, module).await?;
            let path = save_config(&config, output)?;
            println!("Config written to {}", path.display());
            Ok(())
        }
    }
}

async fn connect(cli: &Cli) -> Result<Generator, Box<dyn std::error::Error>> {
    let url = cli
        .database_url
        .as_deref()
        .ok_or("a database connection is required; pass --database-url or set DATABASE_URL")?;
    Ok(Generator::connect(url, &cli.database).await?)
}

fn print_summary(config: &CrudConfig) {
    println!("Table:    {}", config.table);
    println!("Model:    {}", config.model_name);
    println!("Module:   {}", config.module);
    println!("Resource: {}", config.resource_name);
    println!("Fields:   {}", config.fields.len());
    println!();
}

fn report(result: &GenerateResult) {
    for file in &result.files {
        if let Some(error) = &file.error {
            println!("  error    {} ({error})", file.path);
        } else if file.skipped {
            println!("  skipped  {}", file.path);
        } else {
            println!("  created  {}", file.path);
        }
    }

    for error in &result.errors {
        eprintln!("error: {error}");
    }
}

fn run_auto_register(
    config: &CrudConfig,
    root: &Path,
    dry_run: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let opts = AutoRegisterOptions {
        register_backend: true,
        register_frontend: config.options.with_frontend,
        register_menu: config.options.with_frontend && config.frontend.show_in_menu,
        dry_run,
        verbose,
    };

    let mut failed = false;
    for (label, outcome) in auto_register(config, root, &opts) {
        match outcome {
            Ok(SpliceOutcome::Applied) => println!("  registered {label}"),
            Ok(SpliceOutcome::AlreadyRegistered) => {
                println!("  {label}: already registered, skipped");
            }
            Err(e) => {
                eprintln!("error: {label}: {e}");
                failed = true;
            }
        }
    }

    if failed {
        return Err("auto-register failed; fix the target file and rerun with --auto-register".into());
    }
    Ok(())
}
