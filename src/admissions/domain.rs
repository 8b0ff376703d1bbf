use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::ops::Add;

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for applicants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicantId(pub u32);

/// Identifier wrapper for specialities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpecialityId(pub u32);

/// Priority value marking an applicant's first choice.
pub const FIRST_PRIORITY: u32 = 1;

/// Exam score with a total order so it can drive sorting, grouping, and joins.
///
/// Equality, ordering, and hashing follow `f64::total_cmp` on the normalised value, so
/// `-0.0` and `0.0` are the same score.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Score(pub f64);

impl Score {
    pub const ZERO: Score = Score(0.0);

    /// Builds a score with `-0.0` folded into `0.0`.
    pub fn new(value: f64) -> Self {
        Score(value + 0.0)
    }

    pub fn value(self) -> f64 {
        self.normalized()
    }

    fn normalized(self) -> f64 {
        self.0 + 0.0
    }

    pub fn is_valid(self) -> bool {
        self.0.is_finite() && self.0 >= 0.0
    }
}

impl PartialEq for Score {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Score {}

impl PartialOrd for Score {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Score {
    fn cmp(&self, other: &Self) -> Ordering {
        self.normalized().total_cmp(&other.normalized())
    }
}

impl Hash for Score {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.normalized().to_bits().hash(state);
    }
}

impl Add for Score {
    type Output = Score;

    fn add(self, rhs: Self) -> Self::Output {
        Score::new(self.0 + rhs.0)
    }
}

/// A person under evaluation for admission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Applicant {
    pub id: ApplicantId,
    pub full_name: String,
    pub city: String,
    pub birthday_date: NaiveDate,
}

impl Applicant {
    /// Date on which the applicant turns `years` old. Feb 29 birthdays land on Feb 28
    /// in non-leap years. Returns `None` when the date falls outside the calendar range.
    pub fn anniversary(&self, years: u32) -> Option<NaiveDate> {
        let months = years.checked_mul(12)?;
        self.birthday_date.checked_add_months(Months::new(months))
    }

    pub fn turns_before(&self, years: u32, as_of: NaiveDate) -> bool {
        self.anniversary(years)
            .map(|date| date < as_of)
            .unwrap_or(false)
    }
}

/// One applicant's ranked request to be admitted to one speciality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    pub applicant_id: ApplicantId,
    pub speciality_id: SpecialityId,
    pub priority: u32,
}

/// Admission track with its own ranking pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Speciality {
    pub id: SpecialityId,
    pub name: String,
}

/// One scored exam performance belonging to an applicant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamResult {
    pub applicant_id: ApplicantId,
    pub exam_name: String,
    pub result: Score,
}
