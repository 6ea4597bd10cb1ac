use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::data::loader::DataSource;
use crate::data::model::{ColumnSpec, Selection};

/// Gapminder five-year table: country, year, pop, continent, lifeExp, gdpPercap.
pub const DEFAULT_URL: &str =
    "https://raw.githubusercontent.com/plotly/datasets/master/gapminderDataFiveYear.csv";

/// Single-page range dashboard over a CSV dataset
#[derive(Parser, Debug, Clone)]
#[command(name = "range-dash", version)]
#[command(about = "Summarise and plot one numeric column of a CSV dataset by category")]
pub struct Args {
    /// CSV resource fetched once at startup (ignored when --file is given)
    #[arg(long, env = "RANGE_DASH_URL", default_value = DEFAULT_URL)]
    pub url: String,

    /// Read a local CSV file instead of fetching a URL
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Categorical grouping column
    #[arg(long, default_value = "continent")]
    pub category_column: String,

    /// Numeric measurement column
    #[arg(long, default_value = "lifeExp")]
    pub measurement_column: String,

    /// Numeric column used as scatter x axis (empty: row number)
    #[arg(long, default_value = "gdpPercap")]
    pub x_column: String,

    /// Dashboard title
    #[arg(long, default_value = "Range Dashboard")]
    pub title: String,

    /// Initially selected category (repeatable; default: all)
    #[arg(long = "select", value_name = "CATEGORY")]
    pub select: Vec<String>,

    /// Write the dashboard view as JSON to PATH ("-" for stdout) and exit
    #[arg(long, value_name = "PATH")]
    pub export: Option<PathBuf>,

    /// HTTP timeout in seconds
    #[arg(long, default_value = "30")]
    pub timeout_secs: u64,
}

impl Args {
    pub fn source(&self) -> DataSource {
        match &self.file {
            Some(path) => DataSource::File(path.clone()),
            None => DataSource::Url(self.url.clone()),
        }
    }

    pub fn columns(&self) -> ColumnSpec {
        ColumnSpec {
            category: self.category_column.clone(),
            measurement: self.measurement_column.clone(),
            x: Some(self.x_column.clone()).filter(|c| !c.is_empty()),
        }
    }

    pub fn initial_selection(&self) -> Option<Selection> {
        (!self.select.is_empty()).then(|| self.select.iter().cloned().collect())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_gapminder() {
        let args = Args::try_parse_from(["range-dash"]).unwrap();
        assert_eq!(args.columns(), ColumnSpec::default());
        assert_eq!(args.initial_selection(), None);
        assert_eq!(args.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn file_source_and_selection() {
        let args = Args::try_parse_from([
            "range-dash",
            "--file",
            "data.csv",
            "--x-column",
            "",
            "--select",
            "Asia",
            "--select",
            "Europe",
        ])
        .unwrap();
        assert_eq!(args.source(), DataSource::File(PathBuf::from("data.csv")));
        assert_eq!(args.columns().x, None);
        assert_eq!(args.initial_selection().map(|s| s.len()), Some(2));
    }
}
