// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Folio: Portfolio Project Viewer
//!
//! Serves the project detail pages, prints a project from the terminal, and
//! optimises the site's images.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

use folio::assets::optimize_all;
use folio::config::AppConfig;
use folio::source;
use folio::viewer::FileState;
use folio::{FolioError, ProjectReference, ProjectViewer, Result};

/// Folio CLI - Portfolio Project Viewer
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(author = "Jonathan D. A. Jewell <hyperpolymath>")]
#[command(version)]
#[command(about = "View portfolio sub-projects' sources and READMEs", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to configuration file (JSON format)
    #[arg(short, long, default_value = "folio.json", global = true)]
    config: PathBuf,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable trace logging (most verbose)
    #[arg(long, global = true)]
    trace: bool,

    /// Output format for results
    #[arg(long, global = true, default_value = "text", value_parser = ["text", "json"])]
    format: String,

    /// Suppress non-essential output (quiet mode)
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Where to read project content from (overrides config)
#[derive(clap::Args, Debug, Default)]
struct ContentArgs {
    /// Base URL of a static host serving the content
    #[arg(long)]
    origin: Option<String>,

    /// Local directory containing the content base directory
    #[arg(long, conflicts_with = "origin")]
    root: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve the project pages over HTTP
    Serve {
        /// Host to bind to
        #[arg(short = 'H', long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        #[command(flatten)]
        content: ContentArgs,

        /// Open browser automatically
        #[arg(long)]
        open: bool,
    },

    /// Load a project and print what the detail page would show
    Show {
        /// Project folder name
        #[arg(required_unless_present = "query")]
        project: Option<String>,

        /// Display title
        #[arg(short, long)]
        title: Option<String>,

        /// Page query string instead of project/title, e.g. "project=snake-game&title=Snake"
        #[arg(long, conflicts_with_all = ["project", "title"])]
        query: Option<String>,

        /// Tab to show: html, css or js
        #[arg(long, default_value = "html")]
        tab: String,

        #[command(flatten)]
        content: ContentArgs,
    },

    /// Convert site images to WebP, downscaling to their configured widths
    Optimize {
        /// Asset directory (overrides config)
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Generate default configuration file
    Generate {
        /// Output file path
        #[arg(short, long, default_value = "folio.json")]
        output: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Validate configuration file
    Validate,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.trace {
        "trace"
    } else if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = AppConfig::load(&cli.config)?;

    match cli.command {
        Some(Commands::Serve { host, port, content, open }) => {
            run_serve(config, host, port, content, open).await
        }
        Some(Commands::Show { project, title, query, tab, content }) => {
            run_show(config, project, title, query, &tab, content, &cli.format).await
        }
        Some(Commands::Optimize { dir }) => run_optimize(config, dir, &cli.format),
        Some(Commands::Config { action }) => run_config_command(config, action, &cli.config),
        None => run_serve(config, None, None, ContentArgs::default(), false).await,
    }
}

fn apply_content_overrides(config: &mut AppConfig, content: ContentArgs) {
    if let Some(origin) = content.origin {
        config.content.origin = Some(origin);
    }
    if let Some(root) = content.root {
        config.content.origin = None;
        config.content.root = root.to_string_lossy().to_string();
    }
}

/// Run the web server
async fn run_serve(
    mut config: AppConfig,
    host: Option<String>,
    port: Option<u16>,
    content: ContentArgs,
    open: bool,
) -> Result<()> {
    if let Some(host) = host {
        config.web.host = host;
    }
    if let Some(port) = port {
        config.web.port = port;
    }
    apply_content_overrides(&mut config, content);
    config.validate()?;

    let source = source::from_config(&config.content)?;
    match config.content.origin {
        Some(ref origin) => info!("Content origin: {}", origin),
        None => info!("Content directory: {:?}", config.content.projects_dir()),
    }

    if open {
        let url = format!("http://{}:{}", config.web.host, config.web.port);
        if let Err(e) = open_browser(&url) {
            error!("Failed to open browser: {}", e);
        }
    }

    folio::web::start_server(config, source).await
}

/// Load a single project and print it
async fn run_show(
    mut config: AppConfig,
    project: Option<String>,
    title: Option<String>,
    query: Option<String>,
    tab: &str,
    content: ContentArgs,
    format: &str,
) -> Result<()> {
    apply_content_overrides(&mut config, content);
    config.validate()?;

    let reference = match query {
        Some(query) => ProjectReference::from_query(&query)?,
        None => ProjectReference::new(project.unwrap_or_default(), title)?,
    };

    let source = source::from_config(&config.content)?;
    let mut viewer = ProjectViewer::new(reference, &config);
    viewer.load(source.as_ref()).await;

    if !viewer.select(tab) {
        warn!("Cannot switch to tab '{}', showing {}", tab, viewer.active_tab().as_str());
    }

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&viewer.snapshot())?),
        _ => print_viewer(&viewer),
    }

    Ok(())
}

fn print_viewer(viewer: &ProjectViewer) {
    println!("{}", viewer.title());
    println!("{}", viewer.description());
    println!("Demo: {}", viewer.demo_link());

    println!("\nFiles:");
    for (key, entry) in viewer.files().iter() {
        let status = match entry.state {
            FileState::Loading => "loading".to_string(),
            FileState::Loaded => format!("{} bytes", entry.content.len()),
            FileState::NotFound { ref reason } => format!("missing ({})", reason),
        };
        println!("  {:<10} {}", key.file_name(), status);
    }

    let tabs: Vec<String> = viewer
        .tabs()
        .iter()
        .map(|(tab, active)| if *active { format!("[{}]", tab.label()) } else { tab.label().to_string() })
        .collect();
    println!("\n{}", tabs.join(" "));
    println!("{}", viewer.code());

    println!("\nREADME:");
    println!("{}", viewer.documentation());
}

/// Run image optimisation
fn run_optimize(config: AppConfig, dir: Option<PathBuf>, format: &str) -> Result<()> {
    let dir = dir.unwrap_or_else(|| PathBuf::from(&config.assets.dir));
    let results = optimize_all(&dir, &config.assets.jobs, config.assets.quality);

    let mut optimized = 0;
    for (job, result) in &results {
        match result {
            Ok(report) => {
                optimized += 1;
                if format == "text" {
                    println!("Optimized {} -> {}", job.file, report.output.display());
                    println!(
                        "  Size: {:.2}KB -> {:.2}KB ({:.1}% reduction)",
                        report.original_size as f64 / 1024.0,
                        report.new_size as f64 / 1024.0,
                        report.reduction_percent()
                    );
                }
            }
            Err(FolioError::AssetNotFound(file)) => {
                if format == "text" {
                    println!("File not found: {}", file);
                }
            }
            Err(e) => {
                error!("Error optimizing {}: {}", job.file, e);
            }
        }
    }

    if format == "json" {
        let output: Vec<serde_json::Value> = results
            .iter()
            .map(|(job, result)| match result {
                Ok(report) => serde_json::json!({
                    "file": job.file,
                    "output": report.output.to_string_lossy(),
                    "original_size": report.original_size,
                    "new_size": report.new_size,
                    "reduction_percent": report.reduction_percent(),
                }),
                Err(e) => serde_json::json!({
                    "file": job.file,
                    "error": e.to_string(),
                }),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("\nOptimized {} of {} images", optimized, results.len());
    }

    Ok(())
}

/// Run config commands
fn run_config_command(config: AppConfig, action: ConfigCommands, config_path: &Path) -> Result<()> {
    match action {
        ConfigCommands::Show => {
            let json = serde_json::to_string_pretty(&config)?;
            println!("{}", json);
        }
        ConfigCommands::Generate { output, force } => {
            if output.exists() && !force {
                return Err(FolioError::Config(format!(
                    "{:?} already exists. Use --force to overwrite",
                    output
                )));
            }
            AppConfig::default().save(&output)?;
            println!("Generated config at {:?}", output);
        }
        ConfigCommands::Validate => {
            config.validate()?;
            println!("Configuration at {:?} is valid", config_path);
            match config.content.origin {
                Some(ref origin) => println!("  Content origin: {}", origin),
                None => println!("  Content directory: {:?}", config.content.projects_dir()),
            }
            println!("  Web UI: {}:{}", config.web.host, config.web.port);
            println!("  Asset jobs: {}", config.assets.jobs.len());
        }
    }

    Ok(())
}

fn open_browser(url: &str) -> std::io::Result<()> {
    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open")
            .arg(url)
            .spawn()?;
    }
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open")
            .arg(url)
            .spawn()?;
    }
    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/c", "start", url])
            .spawn()?;
    }
    Ok(())
}
