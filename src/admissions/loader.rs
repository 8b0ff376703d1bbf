use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::debug;

use super::store::{DataStore, StoreError};

pub const APPLICANTS_FILE: &str = "applicants.csv";
pub const APPLICATIONS_FILE: &str = "applications.csv";
pub const SPECIALITIES_FILE: &str = "specialities.csv";
pub const EXAM_RESULTS_FILE: &str = "exam_results.csv";

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("unable to open {}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed csv in {}", .path.display())]
    Csv { path: PathBuf, source: csv::Error },
    #[error("dataset rejected: {0}")]
    Store(#[from] StoreError),
}

/// Reads the four datasets from `dir` and assembles a validated [`DataStore`].
pub fn load_dir(dir: &Path) -> Result<DataStore, LoadError> {
    let applicants = read_file(&dir.join(APPLICANTS_FILE))?;
    let applications = read_file(&dir.join(APPLICATIONS_FILE))?;
    let specialities = read_file(&dir.join(SPECIALITIES_FILE))?;
    let exam_results = read_file(&dir.join(EXAM_RESULTS_FILE))?;

    debug!(dir = %dir.display(), "admission datasets read");
    Ok(DataStore::new(
        applicants,
        applications,
        specialities,
        exam_results,
    )?)
}

/// Same as [`load_dir`] for already opened sources. Parse errors are reported against
/// the conventional file names.
pub fn from_readers<A, P, S, E>(
    applicants: A,
    applications: P,
    specialities: S,
    exam_results: E,
) -> Result<DataStore, LoadError>
where
    A: Read,
    P: Read,
    S: Read,
    E: Read,
{
    let applicants = parse_named(applicants, APPLICANTS_FILE)?;
    let applications = parse_named(applications, APPLICATIONS_FILE)?;
    let specialities = parse_named(specialities, SPECIALITIES_FILE)?;
    let exam_results = parse_named(exam_results, EXAM_RESULTS_FILE)?;

    Ok(DataStore::new(
        applicants,
        applications,
        specialities,
        exam_results,
    )?)
}

pub fn parse_records<T, R>(reader: R) -> Result<Vec<T>, csv::Error>
where
    T: DeserializeOwned,
    R: Read,
{
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for record in csv_reader.deserialize::<T>() {
        records.push(record?);
    }

    Ok(records)
}

fn read_file<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_records(file).map_err(|source| LoadError::Csv {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_named<T: DeserializeOwned, R: Read>(reader: R, name: &str) -> Result<Vec<T>, LoadError> {
    parse_records(reader).map_err(|source| LoadError::Csv {
        path: PathBuf::from(name),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::admissions::domain::{Applicant, ApplicantId, ExamResult, Score};
    use chrono::NaiveDate;

    #[test]
    fn parses_trimmed_rows_with_dates() {
        let csv = "id, full_name, city, birthday_date\n\
                   7 , Viktor Pavlovich , Samara , 2003-01-15\n";
        let applicants: Vec<Applicant> = parse_records(csv.as_bytes()).expect("csv parses");

        assert_eq!(
            applicants,
            vec![Applicant {
                id: ApplicantId(7),
                full_name: "Viktor Pavlovich".to_string(),
                city: "Samara".to_string(),
                birthday_date: NaiveDate::from_ymd_opt(2003, 1, 15).expect("valid date"),
            }]
        );
    }

    #[test]
    fn parses_fractional_scores() {
        let csv = "applicant_id,exam_name,result\n3,Physics,97.5\n";
        let results: Vec<ExamResult> = parse_records(csv.as_bytes()).expect("csv parses");
        assert_eq!(results[0].result, Score(97.5));
    }

    #[test]
    fn malformed_rows_name_the_dataset() {
        let err = from_readers(
            "id,full_name,city,birthday_date\n1,Anna Sergeevna,Samara,not-a-date\n".as_bytes(),
            "applicant_id,speciality_id,priority\n".as_bytes(),
            "id,name\n".as_bytes(),
            "applicant_id,exam_name,result\n".as_bytes(),
        )
        .expect_err("bad date rejected");

        match err {
            LoadError::Csv { path, .. } => assert_eq!(path, PathBuf::from(APPLICANTS_FILE)),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn validation_failures_surface_as_store_errors() {
        let err = from_readers(
            "id,full_name,city,birthday_date\n".as_bytes(),
            "applicant_id,speciality_id,priority\n1,0,1\n1,2,1\n".as_bytes(),
            "id,name\n0,Economics\n2,Philosophy\n".as_bytes(),
            "applicant_id,exam_name,result\n".as_bytes(),
        )
        .expect_err("duplicate priority rejected");

        assert!(matches!(
            err,
            LoadError::Store(StoreError::DuplicatePriority { priority: 1, .. })
        ));
    }

    #[test]
    fn missing_directory_reports_io_error() {
        let err = load_dir(Path::new("/nonexistent/admissions")).expect_err("missing dir");
        match err {
            LoadError::Io { path, .. } => assert!(path.ends_with(APPLICANTS_FILE)),
            other => panic!("unexpected error: {other}"),
        }
    }
}
