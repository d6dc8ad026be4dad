//! Terminal UI for sawm that shows Ramadan Sehri/Iftar timings and duas for a chosen city.

mod app;
mod config;
mod input;
mod logging;
mod print;
mod ui;

use std::{io, process::ExitCode, sync::Arc, time::Duration as StdDuration};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event as CEvent},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use sawm_core::{Locality, service::SawmService};
use sawm_provider_aladhan::AladhanTimingsPort;
use tracing::{info, warn};

use crate::app::App;
use crate::config::{Cli, FileConfig};
use crate::input::Action;
use crate::logging::LogTarget;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let log_target = match (&cli.log_file, cli.print) {
        (Some(path), _) => LogTarget::File(path),
        (None, true) => LogTarget::Stderr,
        (None, false) => LogTarget::Disabled,
    };
    logging::init(cli.verbose, log_target)?;

    let config = FileConfig::load(cli.config.as_deref())?;
    info!(year = config.calendar.year, months = ?config.calendar.months, "starting sawm");

    // HTTP + service setup
    let client = config.provider.client()?;
    let port = Arc::new(AladhanTimingsPort::with_base_url(
        client,
        config.provider.base_url.as_str(),
    ));
    let service = Arc::new(SawmService::new(port, config.calendar, config.catalog)?);

    if cli.print {
        let locality = headless_locality(&cli, &service);
        return print::run(&service, &locality).await;
    }

    // App state
    let mut app = App::new(service);
    app.preselect(cli.city.as_deref(), cli.country.as_deref());

    // Terminal init
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run event loop
    let res = run(&mut terminal, app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res.map(|()| ExitCode::SUCCESS)
}

/// Flags win; otherwise the first catalog entries, as the selection lists default to.
fn headless_locality(cli: &Cli, service: &SawmService) -> Locality {
    let catalog = service.catalog();
    let first = |names: &[String]| names.first().cloned().unwrap_or_default();
    Locality::new(
        cli.city.clone().unwrap_or_else(|| first(&catalog.cities)),
        cli.country
            .clone()
            .unwrap_or_else(|| first(&catalog.countries)),
    )
}

async fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, mut app: App) -> Result<()> {
    loop {
        // Draw current UI
        terminal.draw(|frame| ui::draw(frame, &app))?;

        // Poll for input (non-blocking, small timeout to keep CPU low)
        if event::poll(StdDuration::from_millis(100))?
            && let CEvent::Key(key) = event::read()?
        {
            let action = input::handle_key_event(key, &mut app);

            match action {
                Action::Quit => break,
                Action::None => {}
                Action::FetchTimings => {
                    let Some(locality) = app.selected_locality() else {
                        warn!("selection points outside the catalog");
                        continue;
                    };

                    app.begin_fetch(locality.clone());
                    terminal
                        .draw(|frame| ui::draw(frame, &app))
                        .context("failed to draw loading state")?;

                    // Runs to completion; there is no cancellation
                    let res = app.service.ramadan_timetable(&locality).await;
                    if let Err(err) = &res {
                        warn!(%locality, error = %err, "timings unavailable");
                    }
                    app.finish_fetch(res);
                }
            }
        }
    }

    Ok(())
}
