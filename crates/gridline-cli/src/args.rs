//! Command-line arguments for `gridline`

use std::path::PathBuf;

use clap::Parser;
use gridline_core::RecordId;
use gridline_engine::SortDirection;

use crate::settings::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "gridline", version, about = "Filter, sort, page and edit tabular data")]
pub struct Args {
    /// JSON file with an array of column definitions.
    /// Defaults to the built-in demo schema.
    #[arg(long)]
    pub schema: Option<PathBuf>,

    /// JSON file with an array of row objects.
    /// When omitted, `--sample` rows are generated.
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// Number of rows to generate when no `--data` is given.
    #[arg(long, default_value_t = 100)]
    pub sample: usize,

    /// Seed for generated rows.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Column filter as `column=text`. Repeatable; all must match.
    #[arg(long = "filter", value_name = "COLUMN=TEXT", value_parser = parse_filter)]
    pub filters: Vec<FilterArg>,

    /// Text matched against every column.
    #[arg(long)]
    pub search: Option<String>,

    /// Sort key as `column[:asc|desc]`. Repeatable; earlier keys win.
    #[arg(long = "sort", value_name = "COLUMN[:DIR]", value_parser = parse_sort)]
    pub sorts: Vec<SortArg>,

    /// Page to show (1-based). Invalid input is coerced.
    #[arg(long)]
    pub page: Option<String>,

    /// Rows per page. Invalid input is coerced.
    #[arg(long)]
    pub page_size: Option<String>,

    /// Cell edit as `id:column=value`, committed before filtering.
    #[arg(long = "set", value_name = "ID:COLUMN=VALUE", value_parser = parse_set)]
    pub sets: Vec<SetArg>,

    /// Record id to delete. Repeatable.
    #[arg(long = "delete", value_name = "ID")]
    pub deletes: Vec<RecordId>,

    /// Output format; overrides the settings file.
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Shorthand for `--format json`.
    #[arg(long)]
    pub json: bool,

    /// Settings file. Defaults to `<config dir>/gridline/settings.json`.
    #[arg(long, env = "GRIDLINE_SETTINGS")]
    pub settings: Option<PathBuf>,

    /// Verbose logging to stderr.
    #[arg(short, long)]
    pub verbose: bool,

    /// Log events as JSON lines.
    #[arg(long)]
    pub log_json: bool,
}

impl Args {
    pub fn output_format(&self, configured: OutputFormat) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            self.format.unwrap_or(configured)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterArg {
    pub column: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortArg {
    pub column: String,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetArg {
    pub record_id: RecordId,
    pub column: String,
    pub value: String,
}

fn parse_filter(input: &str) -> Result<FilterArg, String> {
    let (column, text) = input
        .split_once('=')
        .ok_or_else(|| format!("expected COLUMN=TEXT, got '{input}'"))?;
    let column = column.trim();
    if column.is_empty() {
        return Err(format!("missing column in '{input}'"));
    }
    Ok(FilterArg {
        column: column.to_string(),
        text: text.to_string(),
    })
}

fn parse_sort(input: &str) -> Result<SortArg, String> {
    let (column, direction) = match input.split_once(':') {
        Some((column, dir)) => {
            let direction = match dir.trim().to_ascii_lowercase().as_str() {
                "asc" | "ascending" => SortDirection::Ascending,
                "desc" | "descending" => SortDirection::Descending,
                other => return Err(format!("unknown sort direction '{other}'")),
            };
            (column, direction)
        }
        None => (input, SortDirection::Ascending),
    };
    let column = column.trim();
    if column.is_empty() {
        return Err(format!("missing column in '{input}'"));
    }
    Ok(SortArg {
        column: column.to_string(),
        direction,
    })
}

fn parse_set(input: &str) -> Result<SetArg, String> {
    let (id, rest) = input
        .split_once(':')
        .ok_or_else(|| format!("expected ID:COLUMN=VALUE, got '{input}'"))?;
    let record_id = id
        .parse::<RecordId>()
        .map_err(|e| format!("invalid record id '{id}': {e}"))?;
    let (column, value) = rest
        .split_once('=')
        .ok_or_else(|| format!("expected ID:COLUMN=VALUE, got '{input}'"))?;
    Ok(SetArg {
        record_id,
        column: column.trim().to_string(),
        value: value.to_string(),
    })
}
