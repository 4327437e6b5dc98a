//! olapflat CLI - read XMLA cubes as rows
//!
//! Usage:
//!   olapflat mdx [--server-type <type>]
//!   olapflat query [--limit <n>] [--format ndjson|table]
//!   olapflat discover <catalogs|cubes|dimensions|measures|properties>
//!
//! Examples:
//!   olapflat --config sales.toml mdx
//!   olapflat -v query --limit 20 --format table
//!   olapflat discover cubes --catalog FoodMart

use clap::{Parser, Subcommand, ValueEnum};
use olapflat::client::XmlaClient;
use olapflat::config::{Settings, SettingsError};
use olapflat::connector::{Connector, ConnectorError, XmlaConnector};
use olapflat::discovery::{choices_for, Selection};
use olapflat::logging::{filter_secrets, init_logging, LogConfig, LogFormat};
use olapflat::mdx;
use olapflat::rows::{FlatRow, Rows};
use olapflat::Dialect;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

#[derive(Parser)]
#[command(name = "olapflat")]
#[command(about = "olapflat - query XMLA cubes with MDX and read the result as flat rows")]
#[command(version)]
struct Cli {
    /// Path to the settings file (defaults to olapflat.toml or $OLAPFLAT_CONFIG)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Log output format
    #[arg(long = "log-format", value_enum, default_value = "pretty", global = true)]
    log_format: LogFormatArg,

    /// Disable colored log output
    #[arg(long = "no-color", global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the MDX statement for the configured query
    Mdx {
        /// Override the configured server type
        #[arg(short, long)]
        server_type: Option<ServerTypeArg>,
    },

    /// Run the configured query and print the rows
    Query {
        /// Maximum number of rows (overrides query.records_limit)
        #[arg(short, long)]
        limit: Option<i64>,

        /// Output format
        #[arg(short, long, default_value = "ndjson")]
        format: OutputFormat,
    },

    /// List catalogs, cubes, dimensions, measures or properties
    Discover {
        what: DiscoverTarget,

        /// Catalog (defaults to connection.catalog)
        #[arg(long)]
        catalog: Option<String>,

        /// Cube (defaults to query.cube)
        #[arg(long)]
        cube: Option<String>,

        /// Dimension unique names for `properties` (defaults to query.dimensions)
        #[arg(long = "dimension")]
        dimensions: Vec<String>,

        /// Print the choice list as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ServerTypeArg {
    Mondrian,
    SapBw,
    PowerBi,
}

impl From<ServerTypeArg> for Dialect {
    fn from(arg: ServerTypeArg) -> Self {
        match arg {
            ServerTypeArg::Mondrian => Dialect::Mondrian,
            ServerTypeArg::SapBw => Dialect::SapBw,
            ServerTypeArg::PowerBi => Dialect::PowerBi,
        }
    }
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// One JSON object per row
    Ndjson,
    /// Aligned text table
    Table,
}

#[derive(Clone, Copy, ValueEnum)]
enum DiscoverTarget {
    Catalogs,
    Cubes,
    Dimensions,
    Measures,
    Properties,
}

impl DiscoverTarget {
    fn parameter(self) -> &'static str {
        match self {
            DiscoverTarget::Catalogs => "select_catalog",
            DiscoverTarget::Cubes => "select_schema_cube",
            DiscoverTarget::Dimensions => "select_dimensions",
            DiscoverTarget::Measures => "select_measures",
            DiscoverTarget::Properties => "select_properties",
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_logging(&log_config(&cli, io::stderr().is_terminal())) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let settings = match load_settings(cli.config.as_ref()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error loading settings: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Ok(value) = serde_json::to_value(&settings) {
        info!(config = %filter_secrets(&value), "loaded settings");
    }

    match cli.command {
        Commands::Mdx { server_type } => cmd_mdx(&settings, server_type),
        Commands::Query { limit, format } => cmd_query(&settings, limit, format).await,
        Commands::Discover {
            what,
            catalog,
            cube,
            dimensions,
            json,
        } => {
            let selection = Selection {
                catalog: catalog.or_else(|| Some(settings.connection.catalog.clone())),
                cube: cube.or_else(|| Some(settings.query.cube.clone())),
                dimensions: if dimensions.is_empty() {
                    settings.query.dimensions.clone()
                } else {
                    dimensions
                },
            };
            cmd_discover(&settings, what, &selection, json).await
        }
    }
}

/// Logging setup from the global flags. Module targets are shown from `-vv`.
fn log_config(cli: &Cli, stderr_is_terminal: bool) -> LogConfig {
    let format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    LogConfig::from_verbosity(cli.verbose)
        .with_format(format)
        .with_target(cli.verbose >= 2)
        .with_ansi(!cli.no_color && stderr_is_terminal)
}

fn load_settings(path: Option<&PathBuf>) -> Result<Settings, SettingsError> {
    match path {
        Some(path) => Settings::from_file(path),
        None => Settings::load(),
    }
}

fn cmd_mdx(settings: &Settings, server_type: Option<ServerTypeArg>) -> ExitCode {
    let dialect = match server_type {
        Some(arg) => arg.into(),
        None => match settings.connection.dialect() {
            Ok(d) => d,
            Err(e) => {
                eprintln!("Configuration error: {}", e);
                return ExitCode::FAILURE;
            }
        },
    };

    println!("{}", mdx::build(&settings.query.to_request(), dialect));
    ExitCode::SUCCESS
}

async fn cmd_query(settings: &Settings, limit: Option<i64>, format: OutputFormat) -> ExitCode {
    let connector = match XmlaConnector::from_settings(settings) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let records_limit = limit.or(settings.query.records_limit).unwrap_or(-1);
    let rows = match connector
        .generate_rows(None, None, None, records_limit)
        .await
    {
        Ok(rows) => rows,
        Err(e) => {
            eprintln!("Query failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match format {
        OutputFormat::Ndjson => print_ndjson(rows),
        OutputFormat::Table => print_table(rows),
    }
}

fn print_ndjson(rows: Rows) -> ExitCode {
    for row in rows {
        match serde_json::to_string(&row) {
            Ok(line) => println!("{}", line),
            Err(e) => {
                eprintln!("Failed to serialize row: {}", e);
                return ExitCode::FAILURE;
            }
        }
    }
    ExitCode::SUCCESS
}

fn print_table(rows: Rows) -> ExitCode {
    let columns = rows.column_names();
    let rows: Vec<FlatRow> = rows.collect();

    let cell = |row: &FlatRow, column: &str| row.get(column).unwrap_or("").to_string();
    let widths: Vec<usize> = columns
        .iter()
        .map(|c| {
            rows.iter()
                .map(|r| cell(r, c).chars().count())
                .chain(std::iter::once(c.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let format_line = |values: Vec<String>| {
        values
            .iter()
            .zip(&widths)
            .map(|(v, w)| format!("{:<width$}", v, width = w))
            .collect::<Vec<_>>()
            .join(" | ")
    };

    println!("{}", format_line(columns.clone()));
    println!(
        "{}",
        widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>().join("-+-")
    );
    for row in &rows {
        println!(
            "{}",
            format_line(columns.iter().map(|c| cell(row, c)).collect())
        );
    }
    println!();
    println!("({} rows)", rows.len());
    ExitCode::SUCCESS
}

async fn cmd_discover(
    settings: &Settings,
    what: DiscoverTarget,
    selection: &Selection,
    json: bool,
) -> ExitCode {
    let client = match discovery_client(settings) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let choices = match choices_for(&client, what.parameter(), selection).await {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Discover failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if json {
        match serde_json::to_string_pretty(&choices) {
            Ok(s) => println!("{}", s),
            Err(e) => {
                eprintln!("Failed to serialize choices: {}", e);
                return ExitCode::FAILURE;
            }
        }
        return ExitCode::SUCCESS;
    }

    for choice in &choices.choices {
        match &choice.value {
            Some(value) if *value != choice.label => println!("{}\t{}", value, choice.label),
            Some(value) => println!("{}", value),
            None => println!("({})", choice.label),
        }
    }
    ExitCode::SUCCESS
}

fn discovery_client(settings: &Settings) -> Result<XmlaClient, ConnectorError> {
    let connection = &settings.connection;
    let client = XmlaClient::connect(
        connection.resolved_endpoint()?,
        connection.auth.resolve()?,
        connection.dialect()?,
        connection.timeout(),
    )?;
    Ok(client.with_catalog(connection.catalog.clone()))
}
