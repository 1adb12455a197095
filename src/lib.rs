//! solreg: an append-only registry for solar installation projects.
//!
//! The system is two components and nothing else:
//!
//! - **Record store** ([`core::store`]): owns the single `proyectos`
//!   relation in a local SQLite file and every read/write against it.
//!   Create and read only; no record is ever updated or deleted.
//! - **Geo-resolver** ([`core::geo`]): a compiled-in region-name to
//!   coordinate table used to turn fetched records into plottable points.
//!
//! The two do not depend on each other. The CLI in this module is the
//! presentation collaborator: it validates input, constructs one
//! [`core::store::ProjectStore`] per invocation, and composes the store
//! with the resolver for the map surfaces.
//!
//! # Examples
//!
//! ```bash
//! # Create (or re-check) the registry schema
//! solreg init
//!
//! # Record a project
//! solreg project add --name "Planta Tlaquepaque" --power-kw 120.5 --location Jalisco
//!
//! # Dashboard views
//! solreg project list
//! solreg report by-location
//! solreg map points
//!
//! # One-shot migration from a spreadsheet export, empty registry only
//! solreg import csv --file proyectos.csv
//! ```

pub mod core;

use core::import::{ColumnMap, ImportOutcome};
use core::project::ProjectDraft;
use core::store::{FetchOrder, ProjectStore};
use core::{error, geo, import, output, schemas, store};

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[clap(
    name = "solreg",
    version = env!("CARGO_PKG_VERSION"),
    about = "Append-only registry for solar installation projects."
)]
struct Cli {
    /// Registry database file.
    #[clap(long, global = true, value_name = "PATH", default_value = schemas::REGISTRY_DB_NAME)]
    db: PathBuf,
    #[clap(subcommand)]
    command: Command,
}

#[derive(clap::Args, Debug)]
struct ProjectCli {
    /// Output format for this command group.
    #[clap(long, global = true, value_enum, default_value = "text")]
    format: OutputFormat,
    #[clap(subcommand)]
    command: ProjectCommand,
}

#[derive(Subcommand, Debug)]
enum ProjectCommand {
    /// Record a new project.
    Add {
        /// Project or site name.
        #[clap(long)]
        name: String,
        /// Installed capacity in kilowatts.
        #[clap(long = "power-kw", allow_negative_numbers = true)]
        power_kw: f64,
        /// Region the installation sits in.
        #[clap(long)]
        location: String,
        /// Contract owner (optional).
        #[clap(long, default_value = "")]
        owner: String,
    },
    /// List every recorded project.
    List {
        #[clap(long, value_enum, default_value = "newest-first")]
        order: FetchOrder,
    },
}

#[derive(clap::Args, Debug)]
struct ReportCli {
    /// Output format for this command group.
    #[clap(long, global = true, value_enum, default_value = "text")]
    format: OutputFormat,
    #[clap(subcommand)]
    command: ReportCommand,
}

#[derive(Subcommand, Debug)]
enum ReportCommand {
    /// Installed power summed per region.
    ByLocation,
}

#[derive(clap::Args, Debug)]
struct MapCli {
    /// Output format for this command group.
    #[clap(long, global = true, value_enum, default_value = "text")]
    format: OutputFormat,
    #[clap(subcommand)]
    command: MapCommand,
}

#[derive(Subcommand, Debug)]
enum MapCommand {
    /// Records joined with coordinates; unmapped locations are excluded.
    Points,
    /// The known-region coordinate table.
    Regions,
}

#[derive(clap::Args, Debug)]
struct ImportCli {
    /// Output format for this command group.
    #[clap(long, global = true, value_enum, default_value = "text")]
    format: OutputFormat,
    #[clap(subcommand)]
    command: ImportCommand,
}

#[derive(Subcommand, Debug)]
enum ImportCommand {
    /// Migrate a CSV spreadsheet export into an empty registry.
    Csv {
        /// Source file.
        #[clap(long)]
        file: PathBuf,
        /// Header carrying the project name (default: Nombre).
        #[clap(long = "col-name")]
        col_name: Option<String>,
        /// Header carrying the power in kW (default: Potencia (kW)).
        #[clap(long = "col-power")]
        col_power: Option<String>,
        /// Header carrying the location (default: Ubicacion).
        #[clap(long = "col-location")]
        col_location: Option<String>,
        /// Header carrying the owner (default: Cliente).
        #[clap(long = "col-owner")]
        col_owner: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create the registry schema (safe to run repeatedly)
    #[clap(name = "init", visible_alias = "i")]
    Init,
    /// Record and inspect project records
    #[clap(name = "project", visible_alias = "p")]
    Project(ProjectCli),
    /// Derived reports over the stored records
    #[clap(name = "report", visible_alias = "r")]
    Report(ReportCli),
    /// Map-ready views of the stored records
    #[clap(name = "map", visible_alias = "m")]
    Map(MapCli),
    /// One-shot spreadsheet migration into an empty registry
    #[clap(name = "import")]
    Import(ImportCli),
    /// Show version information
    #[clap(name = "version")]
    Version,
}

fn print_json(value: &serde_json::Value) -> Result<(), error::RegistryError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn open_store(db: &std::path::Path) -> Result<ProjectStore, error::RegistryError> {
    let store = ProjectStore::open(db)?;
    store.initialize()?;
    Ok(store)
}

fn run_project(store: &ProjectStore, args: ProjectCli) -> Result<(), error::RegistryError> {
    match args.command {
        ProjectCommand::Add {
            name,
            power_kw,
            location,
            owner,
        } => {
            let draft = ProjectDraft {
                name,
                power_kw,
                location,
                owner,
            };
            draft.validate()?;
            store.insert(&draft)?;
            match args.format {
                OutputFormat::Json => print_json(&serde_json::json!({
                    "cmd": "project.add",
                    "status": "ok",
                    "name": draft.name,
                    "power_kw": draft.power_kw,
                    "location": draft.location,
                    "owner": draft.owner,
                }))?,
                OutputFormat::Text => output::status_ok(&format!(
                    "recorded \"{}\" ({} kW, {})",
                    output::compact_line(&draft.name, 40),
                    draft.power_kw,
                    draft.location
                )),
            }
            Ok(())
        }
        ProjectCommand::List { order } => {
            let rows = store.fetch_all(order)?;
            match args.format {
                OutputFormat::Json => print_json(&serde_json::json!({
                    "cmd": "project.list",
                    "status": "ok",
                    "count": rows.len(),
                    "projects": rows,
                }))?,
                OutputFormat::Text => output::render_projects_table(&rows),
            }
            Ok(())
        }
    }
}

fn run_report(store: &ProjectStore, args: ReportCli) -> Result<(), error::RegistryError> {
    match args.command {
        ReportCommand::ByLocation => {
            let rows = store.fetch_all(FetchOrder::Insertion)?;
            let totals = store::aggregate_by_location(&rows);
            match args.format {
                OutputFormat::Json => print_json(&serde_json::json!({
                    "cmd": "report.by_location",
                    "status": "ok",
                    "totals": totals,
                }))?,
                OutputFormat::Text => output::render_location_totals(&totals),
            }
            Ok(())
        }
    }
}

fn run_map(store: &ProjectStore, args: MapCli) -> Result<(), error::RegistryError> {
    match args.command {
        MapCommand::Points => {
            let rows = store.fetch_all(FetchOrder::Insertion)?;
            let points = geo::annotate(&rows);
            match args.format {
                OutputFormat::Json => print_json(&serde_json::json!({
                    "cmd": "map.points",
                    "status": "ok",
                    "count": points.len(),
                    "excluded": rows.len() - points.len(),
                    "points": points,
                }))?,
                OutputFormat::Text => output::render_map_points(&points, rows.len()),
            }
            Ok(())
        }
        MapCommand::Regions => {
            let regions: Vec<_> = geo::regions().collect();
            match args.format {
                OutputFormat::Json => {
                    let entries: Vec<serde_json::Value> = regions
                        .iter()
                        .map(|(region, lat, lon)| {
                            serde_json::json!({"region": region, "lat": lat, "lon": lon})
                        })
                        .collect();
                    print_json(&serde_json::json!({
                        "cmd": "map.regions",
                        "status": "ok",
                        "regions": entries,
                    }))?;
                }
                OutputFormat::Text => output::render_regions(&regions),
            }
            Ok(())
        }
    }
}

fn run_import(store: &ProjectStore, args: ImportCli) -> Result<(), error::RegistryError> {
    match args.command {
        ImportCommand::Csv {
            file,
            col_name,
            col_power,
            col_location,
            col_owner,
        } => {
            let mut map = ColumnMap::default();
            if let Some(header) = col_name {
                map.name = header;
            }
            if let Some(header) = col_power {
                map.power_kw = header;
            }
            if let Some(header) = col_location {
                map.location = header;
            }
            if let Some(header) = col_owner {
                map.owner = Some(header);
            }

            let outcome = import::import_csv(store, &file, &map)?;
            match args.format {
                OutputFormat::Json => {
                    let (status, rows) = match &outcome {
                        ImportOutcome::SkippedNotEmpty => ("skipped", 0),
                        ImportOutcome::Imported { rows } => ("ok", *rows),
                    };
                    print_json(&serde_json::json!({
                        "cmd": "import.csv",
                        "status": status,
                        "file": file.to_string_lossy(),
                        "rows": rows,
                    }))?;
                }
                OutputFormat::Text => match outcome {
                    ImportOutcome::SkippedNotEmpty => {
                        output::status_warn("registry is not empty; import skipped");
                    }
                    ImportOutcome::Imported { rows } => {
                        output::status_ok(&format!(
                            "imported {} row(s) from {}",
                            rows,
                            file.display()
                        ));
                    }
                },
            }
            Ok(())
        }
    }
}

pub fn run() -> Result<(), error::RegistryError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Version => {
            println!("v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Command::Init => {
            let store = open_store(&cli.db)?;
            // Re-check after initialize so the banner reflects reality.
            let count = store.count()?;
            output::banner("SOLREG", "Solar Project Registry");
            output::status_ok(&format!("registry ready at {}", cli.db.display()));
            output::status_info(&format!("{} project(s) on record", count));
            Ok(())
        }
        Command::Project(args) => {
            let store = open_store(&cli.db)?;
            run_project(&store, args)
        }
        Command::Report(args) => {
            let store = open_store(&cli.db)?;
            run_report(&store, args)
        }
        Command::Map(args) => {
            let store = open_store(&cli.db)?;
            run_map(&store, args)
        }
        Command::Import(args) => {
            let store = open_store(&cli.db)?;
            run_import(&store, args)
        }
    }
}
