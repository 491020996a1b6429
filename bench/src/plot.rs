use crate::error::BenchError;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use ws_bench_report::artifact_file_name;
use ws_bench_report::report::BenchmarkReport;

const CHART_WIDTH: u64 = 1200;
const CHART_HEIGHT: u64 = 700;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlotMode {
    /// Render to a temporary file and open it in the default viewer.
    Display,
    /// Save chart, CSV table and JSON report under the directory.
    Save(PathBuf),
}

/// Chart problems are logged and swallowed, table and report writes in save
/// mode are not.
pub fn publish(report: &BenchmarkReport, mode: &PlotMode) -> Result<(), BenchError> {
    match mode {
        PlotMode::Display => {
            let path = std::env::temp_dir().join(artifact_file_name(report, "html"));
            match render_chart(report, &path) {
                Ok(true) => open_in_viewer(&path),
                Ok(false) => {}
                Err(e) => warn!("Failed to generate plot: {e}"),
            }
        }
        PlotMode::Save(directory) => {
            std::fs::create_dir_all(directory)?;

            let chart_path = directory.join(artifact_file_name(report, "html"));
            match render_chart(report, &chart_path) {
                Ok(true) => info!("Saved plot at: {}", chart_path.display()),
                Ok(false) => {}
                Err(e) => warn!("Failed to generate plot: {e}"),
            }

            let table_path = directory.join(artifact_file_name(report, "csv"));
            report.results.save_csv(&table_path)?;
            info!("Saved results table at: {}", table_path.display());

            let report_path = directory.join(artifact_file_name(report, "json"));
            report.dump_to_json(&report_path)?;
            info!("Saved report at: {}", report_path.display());
        }
    }
    Ok(())
}

/// Returns `false` when chart support is not compiled in.
#[cfg(feature = "charts")]
fn render_chart(report: &BenchmarkReport, path: &Path) -> std::io::Result<bool> {
    use charming::theme::Theme;
    use charming::HtmlRenderer;

    let chart = ws_bench_report::create_round_trip_chart(report, true);
    let mut renderer =
        HtmlRenderer::new(report.title(), CHART_WIDTH, CHART_HEIGHT).theme(Theme::Dark);
    renderer
        .save(&chart, path)
        .map_err(|e| std::io::Error::other(format!("Failed to save HTML plot: {e}")))?;
    Ok(true)
}

#[cfg(not(feature = "charts"))]
fn render_chart(_report: &BenchmarkReport, _path: &Path) -> std::io::Result<bool> {
    info!("Chart support is not compiled in, skipping plot");
    Ok(false)
}

fn open_in_viewer(path: &Path) {
    let opener = if cfg!(target_os = "macos") {
        "open"
    } else if cfg!(target_os = "windows") {
        "explorer"
    } else {
        "xdg-open"
    };

    match std::process::Command::new(opener).arg(path).spawn() {
        Ok(_) => info!("Opened plot: {}", path.display()),
        Err(e) => warn!(
            "Cannot open plot with {opener}: {e}, it is available at: {}",
            path.display()
        ),
    }
}
