//! `gridline` - drive the grid engine from the command line
//!
//! Loads a schema and rows (or generates demo rows), applies the requested
//! deletions, cell edits, filters, sort keys and page, then prints the
//! resulting page.
//!
//! ```bash
//! gridline --filter name=an --sort salary:desc --sort name --page-size 10
//! gridline --data people.json --schema columns.json --json
//! gridline --set 3:salary=5000 --delete 7 -v
//! ```

mod args;
mod logging;
mod render;
mod sample;
mod settings;

use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use gridline_core::{ColumnDef, Fields, Schema, Value};
use gridline_engine::{DataGrid, SortDirection};

use crate::args::Args;
use crate::render::TableOptions;
use crate::settings::{CliSettings, OutputFormat};

fn main() -> Result<()> {
    let args = Args::parse();

    let mut log_config = if args.verbose {
        logging::LoggingConfig::verbose()
    } else {
        logging::LoggingConfig::default()
    };
    log_config.json = args.log_json;
    logging::init(log_config)?;

    let settings = CliSettings::load(args.settings.as_deref())?;
    let output = run(&args, &settings)?;
    println!("{output}");
    Ok(())
}

/// Build the grid, apply every requested intent and render the view
fn run(args: &Args, settings: &CliSettings) -> Result<String> {
    let schema = match &args.schema {
        Some(path) => load_schema(path)?,
        None => sample::demo_schema()?,
    };
    let rows = match &args.data {
        Some(path) => load_rows(path)?,
        None => sample::generate_rows(&schema, args.sample, args.seed),
    };
    tracing::info!(rows = rows.len(), columns = schema.len(), "Loaded grid data");

    let mut grid = DataGrid::with_config(schema, rows, settings.grid.clone());
    apply(&mut grid, args)?;

    match args.output_format(settings.output.format) {
        OutputFormat::Table => Ok(render::render_table(
            grid.view(),
            TableOptions {
                highlight_matches: settings.output.highlight_matches,
            },
        )),
        OutputFormat::Json => render::render_json(grid.view()).context("Failed to serialize view"),
    }
}

fn apply(grid: &mut DataGrid, args: &Args) -> Result<()> {
    for id in &args.deletes {
        grid.delete_record(*id)
            .with_context(|| format!("Failed to delete record {id}"))?;
    }

    for set in &args.sets {
        let target = format!("{}:{}", set.record_id, set.column);
        grid.begin_edit(set.record_id, &set.column)
            .with_context(|| format!("Cannot edit {target}"))?;
        grid.update_draft(Value::from(set.value.as_str()))?;
        let change = grid
            .commit_edit()
            .with_context(|| format!("Rejected value '{}' for {target}", set.value))?;
        tracing::info!(
            cell = %target,
            from = %change.original_value,
            to = %change.new_value,
            "Applied cell edit"
        );
    }

    for filter in &args.filters {
        grid.set_filter(&filter.column, &filter.text)
            .with_context(|| format!("Invalid filter on '{}'", filter.column))?;
    }
    if let Some(query) = &args.search {
        grid.set_global_search(query);
    }

    for sort in &args.sorts {
        let clicks = match sort.direction {
            SortDirection::Ascending => 1,
            SortDirection::Descending => 2,
        };
        for _ in 0..clicks {
            grid.toggle_sort(&sort.column)
                .with_context(|| format!("Cannot sort by '{}'", sort.column))?;
        }
    }

    if let Some(page_size) = &args.page_size {
        if let Some(err) = grid.set_page_size_input(page_size) {
            tracing::warn!(%err, page_size = grid.pagination().page_size, "Using coerced page size");
        }
    }
    if let Some(page) = &args.page {
        if let Some(err) = grid.set_page_input(page) {
            tracing::warn!(%err, page = grid.pagination().page, "Using coerced page");
        }
    }
    Ok(())
}

fn load_schema(path: &Path) -> Result<Schema> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read schema from {:?}", path))?;
    let defs: Vec<ColumnDef> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse schema JSON in {:?}", path))?;
    Schema::from_defs(defs).with_context(|| format!("Invalid schema in {:?}", path))
}

fn load_rows(path: &Path) -> Result<Vec<Fields>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read rows from {:?}", path))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse rows JSON in {:?}", path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["gridline"];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    fn write(dir: &tempfile::TempDir, name: &str, content: &str) -> String {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path.display().to_string()
    }

    fn fixture() -> (tempfile::TempDir, String, String) {
        let dir = tempfile::tempdir().unwrap();
        let schema = write(
            &dir,
            "schema.json",
            indoc::indoc! {r#"
                [
                    { "property": "name", "type": "string", "editable": true },
                    { "property": "salary", "type": "number", "editable": true },
                    {
                        "property": "country",
                        "type": "string",
                        "enum": ["de", "fi"],
                        "enumNames": ["Germany", "Finland"]
                    }
                ]
            "#},
        );
        let data = write(
            &dir,
            "data.json",
            indoc::indoc! {r#"
                [
                    { "name": "Anna", "salary": 300, "country": "fi" },
                    { "name": "Bob", "salary": 100, "country": "de" },
                    { "name": "Hanna", "salary": 200, "country": "de" },
                    { "id": 99, "name": "Ian", "salary": 300, "country": "fi" }
                ]
            "#},
        );
        (dir, schema, data)
    }

    fn json_run(extra: &[&str]) -> serde_json::Value {
        let (_dir, schema, data) = fixture();
        let mut argv = vec!["--schema", schema.as_str(), "--data", data.as_str(), "--json"];
        argv.extend_from_slice(extra);
        let out = run(&args(&argv), &CliSettings::default()).unwrap();
        serde_json::from_str(&out).unwrap()
    }

    fn row_ids(view: &serde_json::Value) -> Vec<u64> {
        view["rows"]
            .as_array()
            .unwrap()
            .iter()
            .map(|row| row["id"].as_u64().unwrap())
            .collect()
    }

    #[test]
    fn test_filter_and_sort_from_files() {
        let view = json_run(&["--filter", "name=an", "--sort", "salary:desc"]);
        assert_eq!(row_ids(&view), vec![1, 4, 3]);
        assert_eq!(view["rows"][2]["cells"][0]["display"], "Hanna");
    }

    #[test]
    fn test_multi_key_sort_and_search() {
        let view = json_run(&["--sort", "salary:desc", "--sort", "name"]);
        assert_eq!(row_ids(&view), vec![1, 4, 3, 2]);

        let view = json_run(&["--search", "finland"]);
        assert_eq!(row_ids(&view), vec![1, 4]);
    }

    #[test]
    fn test_set_and_delete() {
        let view = json_run(&["--set", "2:salary=150", "--delete", "1"]);
        assert_eq!(row_ids(&view), vec![2, 3, 4]);
        assert_eq!(view["rows"][0]["cells"][1]["value"], 150.0);
    }

    #[test]
    fn test_invalid_set_is_an_error() {
        let (_dir, schema, data) = fixture();
        let args = args(&["--schema", &schema, "--data", &data, "--set", "2:salary=lots"]);
        let err = run(&args, &CliSettings::default()).unwrap_err();
        assert!(err.to_string().contains("Rejected value 'lots' for 2:salary"));

        let args = self::args(&["--schema", &schema, "--data", &data, "--set", "2:country=fi"]);
        assert!(run(&args, &CliSettings::default()).is_err());
    }

    #[test]
    fn test_page_input_is_coerced() {
        let view = json_run(&["--page-size", "2", "--page", "9"]);
        assert_eq!(view["page"]["page"], 2);
        assert_eq!(row_ids(&view), vec![3, 4]);

        let view = json_run(&["--page-size", "abc"]);
        assert_eq!(view["page"]["page_size"], 10);
    }

    #[test]
    fn test_unknown_column_is_an_error() {
        let (_dir, schema, data) = fixture();
        let args = args(&["--schema", &schema, "--data", &data, "--sort", "age"]);
        let err = run(&args, &CliSettings::default()).unwrap_err();
        assert!(err.to_string().contains("Cannot sort by 'age'"));
    }

    #[test]
    fn test_sample_table_output() {
        let out = run(&args(&["--sample", "25", "--page-size", "10"]), &CliSettings::default()).unwrap();
        assert!(out.contains("Name"));
        assert!(out.ends_with("page 1 of 3 (25 rows)"));
    }

    #[test]
    fn test_settings_page_size_applies() {
        let mut settings = CliSettings::default();
        settings.grid.page_size = 3;
        let out = run(&args(&["--sample", "7"]), &settings).unwrap();
        assert!(out.ends_with("page 1 of 3 (7 rows)"));
    }
}
