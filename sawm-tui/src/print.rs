use std::{
    io::{self, Write},
    process::ExitCode,
};

use anyhow::Result;
use sawm_core::{Locality, SawmService, TimingTable};
use tracing::error;

/// Exit code for the "no data" notice, distinct from hard failures.
const EXIT_NO_DATA: u8 = 2;

/// Run one fetch cycle and write the table (or the notice) to the terminal.
pub(crate) async fn run(service: &SawmService, locality: &Locality) -> Result<ExitCode> {
    match service.ramadan_timetable(locality).await {
        Ok(table) => {
            let title = format!(
                "Ramadan {} Sehri & Iftar Timings for {locality}",
                service.settings().year
            );
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{title}")?;
            stdout.write_all(render_table(&table).as_bytes())?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            error!(error = %err, "fetch cycle failed");
            writeln!(io::stderr().lock(), "{}", err.user_notice())?;
            Ok(if err.is_empty_result() {
                ExitCode::from(EXIT_NO_DATA)
            } else {
                ExitCode::FAILURE
            })
        }
    }
}

/// Plain-text rendering with aligned columns.
pub(crate) fn render_table(table: &TimingTable) -> String {
    let [date_header, sehri_header, iftar_header] = TimingTable::HEADERS;
    let date_width = table
        .iter()
        .map(|row| row.date.chars().count())
        .chain([date_header.len()])
        .max()
        .unwrap_or_default();
    let time_width = "00:00 AM".len();

    let mut lines = vec![format!(
        "{date_header:<date_width$}  {sehri_header:<time_width$}  {iftar_header:<time_width$}"
    )];
    lines.extend(table.iter().map(|row| {
        format!(
            "{:<date_width$}  {:<time_width$}  {:<time_width$}",
            row.date,
            row.start_label(),
            row.end_label()
        )
    }));

    let mut text = lines
        .into_iter()
        .map(|line| line.trim_end().to_owned())
        .collect::<Vec<_>>()
        .join("\n");
    text.push('\n');
    text
}
