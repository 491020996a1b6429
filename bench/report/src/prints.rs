use colored::Colorize;
use comfy_table::Table;
use human_repr::HumanCount;
use tracing::info;

use crate::{report::BenchmarkReport, results_table::ResultsTable};

impl BenchmarkReport {
    pub fn print_summary(&self) {
        let params = &self.params;
        let params_print = format!(
            "Echo round-trip benchmark: {} bytes per message, {} s per test, {} warmup cycles, transports: {}, runtime flavors: {}, host: {}\n",
            params.message_size,
            params.duration_secs,
            params.warmup_cycles,
            params.format_transports(),
            params.format_flavors(),
            self.host.summary(),
        )
        .blue();

        info!("{}", params_print);
        info!("\n{}", self.results.formatted_table().green());
    }
}

impl ResultsTable {
    /// One line per client, requests per second in each transport/flavor column.
    pub fn formatted_table(&self) -> String {
        let mut table = Table::new();

        let mut header = vec!["client".to_owned()];
        header.extend(self.column_names());
        table.set_header(header);

        for row in &self.rows {
            let mut cells = vec![row.label()];
            cells.extend(row.values.iter().map(|v| match *v {
                Some(rps) => format!("{} ({rps})", rps.human_count_bare()),
                None => "-".to_owned(),
            }));
            table.add_row(cells);
        }

        table.to_string()
    }
}
