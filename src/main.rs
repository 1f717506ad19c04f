//! CLI entry point for the event manager.
//!
//! Provides subcommands for writing thank-you letters to attendees, charting
//! registration times, and reporting cleaned phone numbers.

use anyhow::Result;
use clap::{Parser, Subcommand};
use event_manager::charts::{ChartOptions, TimeUnit, build_histograms, print_regtime_charts};
use event_manager::config::{CivicApiConfig, LetterConfig};
use event_manager::fetch::BasicClient;
use event_manager::infra::civicinfo::CivicInfoClient;
use event_manager::letters::save_letters_from_roster;
use event_manager::output::write_phone_report;
use event_manager::roster::{AttendeeRow, REGDATE_FORMAT, Roster};
use event_manager::services::officials_api::{OfficialsApi, UnavailableOfficials};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "event_manager")]
#[command(about = "Thank-you letters and registration charts for event attendees", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write one letter per attendee, naming their legislators
    Letters {
        /// Attendee roster CSV
        #[arg(value_name = "ROSTER")]
        roster: PathBuf,

        /// Letter template with {{first_name}}, {{zipcode}} and {{legislators}}
        #[arg(short, long, default_value = "templates/form_letter.html")]
        template: PathBuf,

        /// Directory letters are written to
        #[arg(short, long, default_value = "output")]
        output_dir: PathBuf,

        /// Skip the civic API; every letter gets the lookup advice
        #[arg(long, default_value_t = false)]
        offline: bool,
    },
    /// Print registration-time bar charts to stdout
    Charts {
        /// Attendee roster CSV
        #[arg(value_name = "ROSTER")]
        roster: PathBuf,

        /// Length of the longest bar
        #[arg(short, long, default_value_t = 150)]
        bar_width: usize,

        /// Estimated label column width, used for the divider
        #[arg(short, long, default_value_t = 10)]
        label_width: usize,

        /// Only print this chart
        #[arg(long, value_enum)]
        only: Option<TimeUnit>,

        /// Timestamp format of the regdate column
        #[arg(long, default_value = REGDATE_FORMAT)]
        format: String,
    },
    /// Write a CSV of attendees with their cleaned phone numbers
    Phones {
        /// Attendee roster CSV
        #[arg(value_name = "ROSTER")]
        roster: PathBuf,

        /// CSV file to write
        #[arg(short, long, default_value = "phones.csv")]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/event_manager.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("event_manager.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Letters {
            roster,
            template,
            output_dir,
            offline,
        } => {
            info!("Event Manager Initialized!");
            let config = LetterConfig {
                roster_path: roster,
                template_path: template,
                output_dir,
            };

            let api: Box<dyn OfficialsApi> = if offline {
                info!("Offline mode, skipping officials lookup");
                Box::new(UnavailableOfficials)
            } else {
                let civic = CivicApiConfig::from_env()?;
                Box::new(CivicInfoClient::with_client(
                    BasicClient::new(),
                    civic.api_key,
                    civic.base_url,
                ))
            };

            let summary = save_letters_from_roster(&config, api.as_ref()).await?;
            info!(
                written = summary.written,
                officials_unavailable = summary.officials_unavailable,
                "Letter run complete"
            );
        }
        Commands::Charts {
            roster,
            bar_width,
            label_width,
            only,
            format,
        } => {
            let rows = read_rows(&roster)?;
            let histogram = build_histograms(&rows, &format);
            let options = ChartOptions {
                bar_width,
                label_width,
                only,
            };

            let stdout = std::io::stdout();
            print_regtime_charts(&mut stdout.lock(), &histogram, &options)?;
        }
        Commands::Phones { roster, output } => {
            let rows = read_rows(&roster)?;
            write_phone_report(&output, &rows)?;
        }
    }

    Ok(())
}

/// Reads every roster row into memory.
#[tracing::instrument(skip(path), fields(roster = %path.display()))]
fn read_rows(path: &Path) -> Result<Vec<AttendeeRow>> {
    let mut roster = Roster::open(path)?;
    let rows = roster.rows().collect::<Result<Vec<_>>>()?;
    info!(rows = rows.len(), "Roster loaded");
    Ok(rows)
}
