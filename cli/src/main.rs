//! unnotion CLI - Notion page tree exporter

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use unnotion::{
    generate_manifest, ExportEvent, ExportOptions, Exporter, ManifestSettings, NotionClient,
    NotionConfig, RenderOptions,
};

#[derive(Parser)]
#[command(name = "unnotion")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Export Notion page trees to Markdown", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Export every child page of a root page to Markdown files
    Export {
        /// Root page ID
        #[arg(long, env = "NOTION_ROOT_PAGE", value_name = "PAGE_ID")]
        root: String,

        /// Output directory
        #[arg(short, long, value_name = "DIR", default_value = "notion_export")]
        output: PathBuf,

        /// Integration token
        #[arg(long, env = "NOTION_TOKEN", hide_env_values = true)]
        token: String,

        /// API base URL
        #[arg(long, env = "NOTION_BASE_URL")]
        base_url: Option<String>,

        /// Pause before each continuation request, in milliseconds
        #[arg(long, default_value = "350")]
        request_delay: u64,

        /// Pause between page exports, in milliseconds
        #[arg(long, default_value = "350")]
        page_delay: u64,

        /// Maximum block nesting depth
        #[arg(long, default_value = "32")]
        max_depth: usize,

        /// Do not splice nested child pages into their parent
        #[arg(long)]
        no_inline_pages: bool,

        /// Title for pages without one
        #[arg(long, default_value = "untitled")]
        untitled: String,

        /// Print the export report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write a JSON manifest listing the Markdown files in a directory
    Manifest {
        /// Directory of Markdown files
        #[arg(value_name = "DIR")]
        dir: PathBuf,

        /// Output file (defaults to DIR/manifest.json)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Wait time recorded in the config block, in milliseconds
        #[arg(long, default_value = "350")]
        wait_time: u64,

        /// Retry count recorded in the config block
        #[arg(long, default_value = "3")]
        retries: u32,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Export {
            root,
            output,
            token,
            base_url,
            request_delay,
            page_delay,
            max_depth,
            no_inline_pages,
            untitled,
            json,
        }) => {
            let mut config = NotionConfig::new(token);
            if let Some(url) = base_url {
                config = config.with_base_url(url);
            }
            let options = ExportOptions::new()
                .with_request_delay(Duration::from_millis(request_delay))
                .with_page_delay(Duration::from_millis(page_delay))
                .with_max_depth(max_depth)
                .with_inline_child_pages(!no_inline_pages)
                .with_render_options(RenderOptions::new().with_untitled_placeholder(untitled));
            cmd_export(config, options, &root, &output, json)
        }
        Some(Commands::Manifest {
            dir,
            output,
            wait_time,
            retries,
        }) => cmd_manifest(&dir, output.as_deref(), wait_time, retries),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            println!("{}", "Usage: unnotion export --root <PAGE_ID> [-o DIR]".yellow());
            println!("       unnotion --help for more information");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_export(
    config: NotionConfig,
    options: ExportOptions,
    root: &str,
    output: &Path,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    log::debug!("Exporting children of {} into {}", root, output.display());
    let client = NotionClient::new(config)?;
    let exporter = Exporter::new(&client, options);

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );
    pb.set_message("Listing child pages...");
    pb.enable_steady_tick(Duration::from_millis(120));

    let report = exporter.export_tree_with(root, output, |event| match event {
        ExportEvent::Discovered { count } => pb.set_length(count as u64),
        ExportEvent::PageStarted { page, .. } => pb.set_message(page.title.clone()),
        ExportEvent::PageWritten { .. } => pb.inc(1),
    })?;

    pb.finish_with_message("Done!");

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "\n{} {} pages from \"{}\"",
        "Exported".green().bold(),
        report.stats.pages_exported,
        report.root_title
    );
    let last = report.files.len().saturating_sub(1);
    for (i, file) in report.files.iter().enumerate() {
        let branch = if i == last { "└─" } else { "├─" };
        let name = file.file_name().unwrap_or_default().to_string_lossy();
        println!("  {} {}", branch.dimmed(), name);
    }

    if !report.is_complete() {
        println!(
            "\n{} {} warnings (output may be partial)",
            "Warning:".yellow().bold(),
            report.warnings.len()
        );
        for warning in &report.warnings {
            println!("  {} {}", "-".dimmed(), warning);
        }
    }

    Ok(())
}

fn cmd_manifest(
    dir: &Path,
    output: Option<&Path>,
    wait_time: u64,
    retries: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    let output = output
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| dir.join("manifest.json"));

    let settings = ManifestSettings {
        wait_time_ms: wait_time,
        sequential: true,
        retries,
    };
    let manifest = generate_manifest(dir, &output, settings)?;

    println!(
        "{} {} modules to {}",
        "Listed".green(),
        manifest.len(),
        output.display()
    );

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "unnotion".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Notion page tree exporter");
    println!();
    println!("Repository: {}", "https://github.com/iyulab/unnotion".dimmed());
    println!("License: MIT");
}
