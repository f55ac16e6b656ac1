//! Risk register CLI - derived list and matrix views over a JSON records file

#![deny(warnings)]

// Global invariants enforced:
// - Deterministic output ordering
// - Identical input yields byte-for-byte identical output
// - The records file is a read-only snapshot; nothing is written back

use anyhow::Context;
use clap::{Parser, Subcommand};
use riskreg_core::config::{self, ResolvedView};
use riskreg_core::risk::{RiskCategory, RiskStatus};
use riskreg_core::scoring::Severity;
use riskreg_core::sort::{SortDirection, SortField};
use riskreg_core::{
    aggregate, derive_view, distinct_owners, load_records, register, render_json,
    render_matrix_json, render_matrix_text, render_text, ViewOptions,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "riskreg")]
#[command(about = "Risk register views: filtered/sorted list and probability-impact matrix")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the filtered, sorted list view
    List {
        /// Path to the JSON records file
        path: PathBuf,

        /// Case-insensitive search over title and description
        #[arg(long)]
        search: Option<String>,

        /// Restrict to a category, or "all"
        #[arg(long)]
        category: Option<String>,

        /// Restrict to a status, or "all"
        #[arg(long)]
        status: Option<String>,

        /// Restrict to an owner, or "all"
        #[arg(long)]
        owner: Option<String>,

        /// Restrict to a severity band (high/medium/low), or "all"
        #[arg(long)]
        severity: Option<String>,

        /// Sort field (overrides config file)
        #[arg(long)]
        sort: Option<SortFieldArg>,

        /// Sort direction (overrides config file)
        #[arg(long)]
        order: Option<SortOrderArg>,

        /// Show only the first N results (overrides config file)
        #[arg(long)]
        top: Option<usize>,

        /// Today's date (ISO 8601) for overdue marking in text output
        #[arg(long)]
        today: Option<String>,

        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,

        /// Path to config file (default: auto-discover)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Show the 3x3 probability/impact matrix view
    Matrix {
        /// Path to the JSON records file
        path: PathBuf,

        /// Case-insensitive search over title and description
        #[arg(long)]
        search: Option<String>,

        /// Restrict to a category, or "all"
        #[arg(long)]
        category: Option<String>,

        /// Restrict to a status, or "all"
        #[arg(long)]
        status: Option<String>,

        /// Restrict to an owner, or "all"
        #[arg(long)]
        owner: Option<String>,

        /// Restrict to a severity band (high/medium/low), or "all"
        #[arg(long)]
        severity: Option<String>,

        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,

        /// Path to config file (default: auto-discover)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// List distinct risk owners in first-seen order
    Owners {
        /// Path to the JSON records file
        path: PathBuf,
    },
    /// Print the three sample records as JSON (usable as a records file)
    Sample,
    /// Validate or show a view configuration file
    #[command(name = "config")]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Validate a config file without rendering any view
    Validate {
        /// Path to config file (default: auto-discover from current directory)
        #[arg(long)]
        path: Option<PathBuf>,
    },
    /// Show the resolved view settings (merged defaults + config file)
    Show {
        /// Path to config file (default: auto-discover from current directory)
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum SortFieldArg {
    RiskScore,
    Title,
    RiskOwner,
    DateIdentified,
    DueDate,
}

impl From<SortFieldArg> for SortField {
    fn from(arg: SortFieldArg) -> Self {
        match arg {
            SortFieldArg::RiskScore => SortField::RiskScore,
            SortFieldArg::Title => SortField::Title,
            SortFieldArg::RiskOwner => SortField::RiskOwner,
            SortFieldArg::DateIdentified => SortField::DateIdentified,
            SortFieldArg::DueDate => SortField::DueDate,
        }
    }
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum SortOrderArg {
    Asc,
    Desc,
}

impl From<SortOrderArg> for SortDirection {
    fn from(arg: SortOrderArg) -> Self {
        match arg {
            SortOrderArg::Asc => SortDirection::Ascending,
            SortOrderArg::Desc => SortDirection::Descending,
        }
    }
}

/// Filter flags shared by `list` and `matrix`
struct FilterFlags {
    search: Option<String>,
    category: Option<String>,
    status: Option<String>,
    owner: Option<String>,
    severity: Option<String>,
}

/// Apply CLI filter flags on top of the resolved config. A flag's "all"
/// token clears any restriction the config file set.
fn apply_filter_flags(resolved: &mut ResolvedView, flags: &FilterFlags) -> anyhow::Result<()> {
    if let Some(search) = &flags.search {
        resolved.search = search.clone();
    }
    if let Some(token) = flags.category.as_deref() {
        resolved.criteria.category = match token {
            "all" => None,
            _ => Some(
                RiskCategory::from_token(token)
                    .with_context(|| format!("unknown category token: {:?}", token))?,
            ),
        };
    }
    if let Some(token) = flags.status.as_deref() {
        resolved.criteria.status = match token {
            "all" => None,
            _ => Some(
                RiskStatus::from_token(token)
                    .with_context(|| format!("unknown status token: {:?}", token))?,
            ),
        };
    }
    if let Some(token) = flags.owner.as_deref() {
        resolved.criteria.owner = match token {
            "all" => None,
            _ => Some(token.to_string()),
        };
    }
    if let Some(token) = flags.severity.as_deref() {
        resolved.criteria.severity = match token {
            "all" => None,
            _ => Some(
                Severity::from_token(token)
                    .with_context(|| format!("unknown severity token: {:?}", token))?,
            ),
        };
    }
    Ok(())
}

/// Load config (explicit path or auto-discovered), announcing it on stderr
fn load_view_config(config_path: Option<&PathBuf>) -> anyhow::Result<ResolvedView> {
    let cwd = std::env::current_dir()?;
    let resolved = config::load_and_resolve(&cwd, config_path.map(|p| p.as_path()))
        .context("failed to load configuration")?;
    if let Some(path) = &resolved.config_path {
        eprintln!("Using config: {}", path.display());
    }
    Ok(resolved)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::List {
            path,
            search,
            category,
            status,
            owner,
            severity,
            sort,
            order,
            top,
            today,
            format,
            config: config_path,
        } => {
            let mut resolved = load_view_config(config_path.as_ref())?;
            apply_filter_flags(
                &mut resolved,
                &FilterFlags {
                    search,
                    category,
                    status,
                    owner,
                    severity,
                },
            )?;
            if let Some(sort) = sort {
                resolved.sort_by = sort.into();
            }
            if let Some(order) = order {
                resolved.sort_order = order.into();
            }
            if let Some(top) = top {
                if top == 0 {
                    anyhow::bail!("--top must be positive");
                }
                resolved.top = Some(top);
            }

            let risks = load_records(&path)?;
            let view = derive_view(&risks, &ViewOptions::from(&resolved));

            match format {
                OutputFormat::Text => print!("{}", render_text(&view, today.as_deref())),
                OutputFormat::Json => println!("{}", render_json(&view)),
            }
        }
        Commands::Matrix {
            path,
            search,
            category,
            status,
            owner,
            severity,
            format,
            config: config_path,
        } => {
            let mut resolved = load_view_config(config_path.as_ref())?;
            apply_filter_flags(
                &mut resolved,
                &FilterFlags {
                    search,
                    category,
                    status,
                    owner,
                    severity,
                },
            )?;

            let risks = load_records(&path)?;
            // the matrix consumes the filtered (unsorted) collection
            let filtered =
                riskreg_core::filter_risks(&risks, &resolved.search, &resolved.criteria);
            let matrix = aggregate(&filtered);

            match format {
                OutputFormat::Text => print!("{}", render_matrix_text(&matrix)),
                OutputFormat::Json => println!("{}", render_matrix_json(&matrix)),
            }
        }
        Commands::Owners { path } => {
            let risks = load_records(&path)?;
            for owner in distinct_owners(&risks) {
                println!("{}", owner);
            }
        }
        Commands::Sample => {
            println!("{}", render_json(&register::sample_records()));
        }
        Commands::Config { action } => match action {
            ConfigAction::Validate { path } => {
                let cwd = std::env::current_dir()?;
                let config_path = match path {
                    Some(path) => path,
                    None => config::discover_config(&cwd)
                        .context("no config file found in current directory")?,
                };
                let view_config = config::load_config(&config_path)?;
                view_config
                    .validate()
                    .with_context(|| format!("invalid config file: {}", config_path.display()))?;
                println!("Config is valid: {}", config_path.display());
            }
            ConfigAction::Show { path } => {
                let cwd = std::env::current_dir()?;
                let resolved = config::load_and_resolve(&cwd, path.as_deref())?;
                match &resolved.config_path {
                    Some(path) => println!("Config file: {}", path.display()),
                    None => println!("Config file: (none, using defaults)"),
                }
                println!("search: {:?}", resolved.search);
                println!(
                    "category: {}",
                    resolved
                        .criteria
                        .category
                        .map_or("all", |c| c.as_str())
                );
                println!(
                    "status: {}",
                    resolved.criteria.status.map_or("all", |s| s.as_str())
                );
                println!(
                    "owner: {}",
                    resolved.criteria.owner.as_deref().unwrap_or("all")
                );
                println!(
                    "severity: {}",
                    resolved.criteria.severity.map_or("all", |s| s.as_str())
                );
                println!("sort_by: {}", resolved.sort_by.as_str());
                println!(
                    "sort_order: {}",
                    match resolved.sort_order {
                        SortDirection::Ascending => "asc",
                        SortDirection::Descending => "desc",
                    }
                );
                match resolved.top {
                    Some(top) => println!("top: {}", top),
                    None => println!("top: (unlimited)"),
                }
            }
        },
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_flags_override_config() {
        let mut resolved = ResolvedView::default();
        apply_filter_flags(
            &mut resolved,
            &FilterFlags {
                search: Some("server".to_string()),
                category: Some("Technical".to_string()),
                status: None,
                owner: Some("John Smith".to_string()),
                severity: Some("high".to_string()),
            },
        )
        .unwrap();
        assert_eq!(resolved.search, "server");
        assert_eq!(resolved.criteria.category, Some(RiskCategory::Technical));
        assert_eq!(resolved.criteria.status, None);
        assert_eq!(resolved.criteria.owner.as_deref(), Some("John Smith"));
        assert_eq!(resolved.criteria.severity, Some(Severity::High));
    }

    #[test]
    fn test_all_token_clears_config_restriction() {
        let mut resolved = ResolvedView {
            criteria: riskreg_core::FilterCriteria {
                severity: Some(Severity::High),
                ..Default::default()
            },
            ..Default::default()
        };
        apply_filter_flags(
            &mut resolved,
            &FilterFlags {
                search: None,
                category: None,
                status: None,
                owner: None,
                severity: Some("all".to_string()),
            },
        )
        .unwrap();
        assert_eq!(resolved.criteria.severity, None);
    }

    #[test]
    fn test_explicit_config_file_is_loaded_and_resolved() {
        use std::io::Write;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"severity": "high", "sort_by": "title", "sort_order": "asc"}}"#
        )
        .unwrap();
        let path = file.path().to_path_buf();
        let resolved = load_view_config(Some(&path)).unwrap();
        assert_eq!(resolved.criteria.severity, Some(Severity::High));
        assert_eq!(resolved.sort_by, SortField::Title);
        assert_eq!(resolved.sort_order, SortDirection::Ascending);
        assert_eq!(resolved.config_path.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn test_unknown_token_is_an_error() {
        let mut resolved = ResolvedView::default();
        let err = apply_filter_flags(
            &mut resolved,
            &FilterFlags {
                search: None,
                category: Some("Cosmic".to_string()),
                status: None,
                owner: None,
                severity: None,
            },
        )
        .unwrap_err();
        assert!(err.to_string().contains("category"));
    }
}
