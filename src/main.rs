use admission_committee::admissions::{loader, AdmissionQueries, FIRST_PRIORITY};
use admission_committee::config::AppConfig;
use admission_committee::error::AppError;
use admission_committee::telemetry;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use serde_json::Value;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "admissions",
    about = "Run admission committee reports over a directory of CSV datasets",
    version
)]
struct Cli {
    /// Directory holding applicants.csv, applications.csv, specialities.csv and exam_results.csv
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Applicant ids living in a city
    ByCity {
        #[arg(long)]
        city: String,
    },
    /// Applicant ids who reach an age before a date, ordered by full name
    Older {
        #[arg(long)]
        years: u32,
        /// Cut-off date (YYYY-MM-DD, defaults to today)
        #[arg(long, value_parser = parse_date)]
        as_of: Option<NaiveDate>,
    },
    /// Distinct applicant names for a speciality, best total score first
    BySpeciality {
        #[arg(long)]
        name: String,
    },
    /// Applications per speciality at a priority, in first-appearance order
    PriorityCounts {
        #[arg(long, default_value_t = FIRST_PRIORITY)]
        priority: u32,
    },
    /// Best applicants by summed exam results
    TopRated {
        /// Number of applicants to return (defaults to ADMISSIONS_TOP_RATED_LIMIT)
        #[arg(long)]
        limit: Option<usize>,
    },
    /// First-priority specialities of each exam's best performers
    Favorites,
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.dir.clone());
    let store = loader::load_dir(&data_dir)?;
    info!(
        environment = ?config.environment,
        data_dir = %data_dir.display(),
        applicants = store.applicants().len(),
        "admission datasets loaded"
    );

    let queries = AdmissionQueries::new(&store);
    let report: Value = match cli.command {
        Command::ByCity { city } => serde_json::to_value(queries.applicants_by_city(&city))?,
        Command::Older { years, as_of } => {
            let as_of = as_of.unwrap_or_else(|| Local::now().date_naive());
            serde_json::to_value(queries.older_applicants(years, as_of))?
        }
        Command::BySpeciality { name } => {
            serde_json::to_value(queries.select_by_speciality(&name))?
        }
        Command::PriorityCounts { priority } => {
            serde_json::to_value(queries.speciality_demand(priority))?
        }
        Command::TopRated { limit } => {
            let limit = limit.unwrap_or(config.reports.top_rated_limit);
            serde_json::to_value(queries.ranked_applicants(limit))?
        }
        Command::Favorites => {
            serde_json::to_value(queries.favorite_specialities_of_top_performers())?
        }
    };

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}
