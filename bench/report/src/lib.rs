mod plotting;
mod prints;
mod types;

pub use types::*;

#[cfg(feature = "charts")]
pub use charming::Chart;
#[cfg(feature = "charts")]
pub use plotting::chart::EchoChart;

use crate::report::BenchmarkReport;

/// Bar colour per client, clients not listed get the theme palette.
pub fn client_color(client: &str) -> Option<&'static str> {
    match client {
        "tokio-tungstenite" => Some("#e4572e"),
        "tungstenite" => Some("#76b041"),
        "native" => Some("#2e86ab"),
        _ => None,
    }
}

/// Grouped bar chart: one category per transport/flavor column, one series per client.
#[cfg(feature = "charts")]
pub fn create_round_trip_chart(report: &BenchmarkReport, dark: bool) -> Chart {
    let results = &report.results;
    let mut chart = EchoChart::new(&report.title(), &report.subtext(), dark)
        .with_category_x_axis("transport-flavor", results.column_names())
        .with_y_axis("request/second");

    for row in &results.rows {
        let data = row
            .values
            .iter()
            .map(|v| v.map(|v| v as f64).unwrap_or(0.0))
            .collect();
        chart = chart.add_bar_series(&row.label(), data, client_color(&row.client));
    }

    chart.inner
}

/// Artifact names are derived from message size so runs with different sizes coexist.
pub fn artifact_file_name(report: &BenchmarkReport, extension: &str) -> String {
    format!("{}.{extension}", report.params.artifact_stem())
}
