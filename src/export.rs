use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::data::chart::DashboardView;

/// Serialise the view as pretty JSON.
pub fn write_view<W: Write>(mut writer: W, view: &DashboardView) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, view).context("serializing dashboard view")?;
    writeln!(writer).context("writing dashboard view")?;
    writer.flush().context("flushing dashboard view")
}

/// Write the view to `target`; `-` means stdout.
pub fn export_view(target: &Path, view: &DashboardView) -> Result<()> {
    if target == Path::new("-") {
        return write_view(std::io::stdout().lock(), view);
    }
    let file = File::create(target)
        .with_context(|| format!("creating {}", target.display()))?;
    write_view(BufWriter::new(file), view)?;
    log::info!("Exported dashboard view to {}", target.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Dataset;

    #[test]
    fn writes_plain_json() {
        let ds = Dataset::from_pairs(&[(Some("a"), 1.0), (Some("b"), f64::NAN)]);
        let view = DashboardView::for_selection("Demo", &ds, &ds.all_categories());
        let mut out = Vec::new();
        write_view(&mut out, &view).unwrap();

        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["title"], "Demo");
        assert_eq!(json["summary"]["min"], 1.0);
        assert_eq!(json["scatter"]["series"].as_array().unwrap().len(), 1);
    }
}
