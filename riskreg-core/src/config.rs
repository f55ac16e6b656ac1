//! View configuration file support
//!
//! Loads default search/filter/sort settings from JSON files.
//!
//! Search order:
//! 1. Explicit path (--config CLI flag)
//! 2. `.riskregrc.json` in the working directory
//! 3. `riskreg.config.json` in the working directory
//!
//! All fields are optional. CLI flags take precedence over config file
//! values. Filter fields hold string tokens from their enumerations, or
//! the literal `"all"` for unrestricted.

use crate::filter::FilterCriteria;
use crate::risk::{RiskCategory, RiskStatus};
use crate::scoring::Severity;
use crate::sort::{SortDirection, SortField};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file names probed in order when no explicit path is given
const CONFIG_FILE_NAMES: &[&str] = &[".riskregrc.json", "riskreg.config.json"];

/// View configuration loaded from a JSON config file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ViewConfig {
    /// Free-text search term (default: empty, match everything)
    #[serde(default)]
    pub search: Option<String>,

    /// Category token or "all" (default: all)
    #[serde(default)]
    pub category: Option<String>,

    /// Status token or "all" (default: all)
    #[serde(default)]
    pub status: Option<String>,

    /// Owner name or "all" (default: all)
    #[serde(default)]
    pub owner: Option<String>,

    /// Severity token ("high" / "medium" / "low") or "all" (default: all)
    #[serde(default)]
    pub severity: Option<String>,

    /// Sort field token (default: risk_score)
    #[serde(default)]
    pub sort_by: Option<String>,

    /// Sort direction, "asc" or "desc" (default: desc)
    #[serde(default)]
    pub sort_order: Option<String>,

    /// Maximum number of results to show
    #[serde(default)]
    pub top: Option<usize>,
}

/// Resolved view settings with parsed tokens and defaults applied
#[derive(Debug, Clone)]
pub struct ResolvedView {
    pub search: String,
    pub criteria: FilterCriteria,
    pub sort_by: SortField,
    pub sort_order: SortDirection,
    pub top: Option<usize>,
    /// Path the config was loaded from (None if defaults)
    pub config_path: Option<PathBuf>,
}

impl Default for ResolvedView {
    fn default() -> Self {
        // matches the list view's initial state: highest scores first
        ResolvedView {
            search: String::new(),
            criteria: FilterCriteria::default(),
            sort_by: SortField::RiskScore,
            sort_order: SortDirection::Descending,
            top: None,
            config_path: None,
        }
    }
}

/// Parse a filter token, treating "all" (and absence) as unrestricted
fn parse_restriction<T>(
    token: Option<&str>,
    what: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<Option<T>> {
    match token {
        None | Some("all") => Ok(None),
        Some(value) => parse(value)
            .map(Some)
            .ok_or_else(|| anyhow::anyhow!("unknown {} token: {:?}", what, value)),
    }
}

impl ViewConfig {
    /// Validate the configuration for unknown tokens and logical errors
    pub fn validate(&self) -> Result<()> {
        parse_restriction(self.category.as_deref(), "category", RiskCategory::from_token)?;
        parse_restriction(self.status.as_deref(), "status", RiskStatus::from_token)?;
        parse_restriction(self.severity.as_deref(), "severity", Severity::from_token)?;

        if let Some(ref sort_by) = self.sort_by {
            if SortField::from_token(sort_by).is_none() {
                anyhow::bail!("unknown sort_by token: {:?}", sort_by);
            }
        }
        if let Some(ref sort_order) = self.sort_order {
            if SortDirection::from_token(sort_order).is_none() {
                anyhow::bail!("sort_order must be \"asc\" or \"desc\" (got {:?})", sort_order);
            }
        }
        if self.top == Some(0) {
            anyhow::bail!("top must be positive");
        }

        Ok(())
    }

    /// Resolve tokens into typed view settings, applying defaults
    pub fn resolve(&self, config_path: Option<PathBuf>) -> Result<ResolvedView> {
        self.validate()?;

        let criteria = FilterCriteria {
            category: parse_restriction(
                self.category.as_deref(),
                "category",
                RiskCategory::from_token,
            )?,
            status: parse_restriction(self.status.as_deref(), "status", RiskStatus::from_token)?,
            owner: match self.owner.as_deref() {
                None | Some("all") => None,
                Some(owner) => Some(owner.to_string()),
            },
            severity: parse_restriction(
                self.severity.as_deref(),
                "severity",
                Severity::from_token,
            )?,
        };

        let defaults = ResolvedView::default();
        Ok(ResolvedView {
            search: self.search.clone().unwrap_or_default(),
            criteria,
            sort_by: self
                .sort_by
                .as_deref()
                .and_then(SortField::from_token)
                .unwrap_or(defaults.sort_by),
            sort_order: self
                .sort_order
                .as_deref()
                .and_then(SortDirection::from_token)
                .unwrap_or(defaults.sort_order),
            top: self.top,
            config_path,
        })
    }
}

/// Load a config file from an explicit path
pub fn load_config(path: &Path) -> Result<ViewConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    let config: ViewConfig = serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse config file: {}", path.display()))?;
    Ok(config)
}

/// Discover a config file in the given directory, probing the standard
/// names in order
pub fn discover_config(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

/// Load and resolve configuration: explicit path, else auto-discover,
/// else defaults
pub fn load_and_resolve(dir: &Path, explicit: Option<&Path>) -> Result<ResolvedView> {
    let config_path = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => discover_config(dir),
    };

    match config_path {
        Some(path) => {
            let config = load_config(&path)?;
            config
                .resolve(Some(path.clone()))
                .with_context(|| format!("invalid config file: {}", path.display()))
        }
        None => Ok(ResolvedView::default()),
    }
}
