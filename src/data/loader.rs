use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};

use super::model::{ColumnSpec, Dataset, Record};

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Where the dataset comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Url(String),
    File(PathBuf),
}

impl std::fmt::Display for DataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataSource::Url(url) => write!(f, "{url}"),
            DataSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Load the dataset once, from whichever source was configured.
pub fn load_source(source: &DataSource, columns: &ColumnSpec, timeout: Duration) -> Result<Dataset> {
    match source {
        DataSource::Url(url) => load_url(url, columns, timeout),
        DataSource::File(path) => load_file(path, columns),
    }
}

/// Fetch a CSV resource over HTTP and parse it.
pub fn load_url(url: &str, columns: &ColumnSpec, timeout: Duration) -> Result<Dataset> {
    log::info!("Fetching dataset from {url}");
    let client = reqwest::blocking::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("range-dash/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("building HTTP client")?;
    let response = client
        .get(url)
        .send()
        .with_context(|| format!("requesting {url}"))?
        .error_for_status()
        .with_context(|| format!("fetching {url}"))?;
    parse_csv(response, columns).with_context(|| format!("parsing CSV from {url}"))
}

/// Read a local CSV file.
pub fn load_file(path: &Path, columns: &ColumnSpec) -> Result<Dataset> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("opening CSV {}", path.display()))?;
    parse_csv(file, columns).with_context(|| format!("parsing CSV {}", path.display()))
}

// ---------------------------------------------------------------------------
// CSV parsing
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names. The category and measurement
/// columns are required, the x column only when configured. Other columns
/// are ignored.
pub fn parse_csv<R: Read>(reader: R, columns: &ColumnSpec) -> Result<Dataset> {
    let mut reader = csv::Reader::from_reader(reader);
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let position = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .with_context(|| format!("CSV missing '{name}' column"))
    };
    let category_idx = position(&columns.category)?;
    let measurement_idx = position(&columns.measurement)?;
    let x_idx = columns.x.as_deref().map(position).transpose()?;

    let mut records = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;

        let category = parse_category(record.get(category_idx).unwrap_or(""));
        let measurement = parse_number(record.get(measurement_idx).unwrap_or(""))
            .with_context(|| format!("CSV row {row_no}, column '{}'", columns.measurement))?;
        let x = match (x_idx, columns.x.as_deref()) {
            (Some(idx), Some(name)) => {
                let v = parse_number(record.get(idx).unwrap_or(""))
                    .with_context(|| format!("CSV row {row_no}, column '{name}'"))?;
                (!v.is_nan()).then_some(v)
            }
            _ => None,
        };

        records.push(Record {
            row: row_no,
            category,
            measurement,
            x,
        });
    }

    log::debug!(
        "Parsed {} rows ({} with a null category)",
        records.len(),
        records.iter().filter(|r| r.category.is_none()).count()
    );

    Ok(Dataset::from_records(records, columns.clone()))
}

/// Spellings of a missing cell, as written by common dataframe exporters.
fn is_missing(s: &str) -> bool {
    matches!(s, "" | "nan" | "NaN" | "NA" | "N/A" | "null" | "None")
}

fn parse_category(s: &str) -> Option<String> {
    let s = s.trim();
    (!is_missing(s)).then(|| s.to_string())
}

fn parse_number(s: &str) -> Result<f64> {
    let s = s.trim();
    if is_missing(s) {
        return Ok(f64::NAN);
    }
    s.parse::<f64>()
        .with_context(|| format!("'{s}' is not a number"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const GAPMINDER: &str = "\
country,year,pop,continent,lifeExp,gdpPercap
Afghanistan,1952,8425333,Asia,28.801,779.4453145
Albania,1952,1282697,Europe,55.23,1601.056136
Nowhere,1952,1,,40.0,100.0
Algeria,1952,9279525,Africa,NaN,2449.008185
";

    #[test]
    fn parses_bound_columns() {
        let ds = parse_csv(GAPMINDER.as_bytes(), &ColumnSpec::default()).unwrap();
        assert_eq!(ds.len(), 4);
        assert_eq!(ds.records[0].category.as_deref(), Some("Asia"));
        assert_eq!(ds.records[0].measurement, 28.801);
        assert_eq!(ds.records[1].x, Some(1601.056136));
        assert_eq!(ds.records[1].row, 1);
    }

    #[test]
    fn missing_cells_become_null_or_nan() {
        let ds = parse_csv(GAPMINDER.as_bytes(), &ColumnSpec::default()).unwrap();
        assert_eq!(ds.records[2].category, None);
        assert!(ds.records[3].measurement.is_nan());
        let cats: Vec<&str> = ds.categories.iter().map(String::as_str).collect();
        assert_eq!(cats, ["Africa", "Asia", "Europe"]);
    }

    #[test]
    fn missing_column_is_rejected() {
        let columns = ColumnSpec {
            measurement: "height".to_string(),
            ..ColumnSpec::default()
        };
        let err = parse_csv(GAPMINDER.as_bytes(), &columns).unwrap_err();
        assert!(format!("{err:#}").contains("missing 'height' column"));
    }

    #[test]
    fn x_column_is_optional() {
        let columns = ColumnSpec {
            x: None,
            ..ColumnSpec::default()
        };
        let ds = parse_csv("continent,lifeExp\nAsia,30\n".as_bytes(), &columns).unwrap();
        assert_eq!(ds.records[0].x, None);
        assert_eq!(ds.records[0].abscissa(), 0.0);
    }

    #[test]
    fn garbage_measurement_names_row() {
        let csv = "continent,lifeExp,gdpPercap\nAsia,30,1\nAsia,abc,2\n";
        let err = parse_csv(csv.as_bytes(), &ColumnSpec::default()).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("CSV row 1"), "{msg}");
        assert!(msg.contains("'abc' is not a number"), "{msg}");
    }
}
