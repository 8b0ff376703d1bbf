use std::collections::HashSet;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::debug;

use super::domain::{
    Applicant, ApplicantId, Application, ExamResult, Score, Speciality, SpecialityId,
};

/// Validation failures raised while assembling a [`DataStore`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    #[error("duplicate applicant id {0:?}")]
    DuplicateApplicant(ApplicantId),
    #[error("duplicate speciality id {0:?}")]
    DuplicateSpeciality(SpecialityId),
    #[error("applicant {applicant_id:?} uses priority {priority} more than once")]
    DuplicatePriority {
        applicant_id: ApplicantId,
        priority: u32,
    },
    #[error("applicant {applicant_id:?} has a non-positive priority")]
    InvalidPriority { applicant_id: ApplicantId },
    #[error("exam result '{exam_name}' for applicant {applicant_id:?} must be a finite, non-negative number")]
    InvalidScore {
        applicant_id: ApplicantId,
        exam_name: String,
    },
}

/// Read-only snapshot of the four admission datasets.
///
/// Construction validates identifier and priority uniqueness; afterwards the sequences
/// never change, so any number of queries may read the store at once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataStore {
    applicants: Vec<Applicant>,
    applications: Vec<Application>,
    specialities: Vec<Speciality>,
    exam_results: Vec<ExamResult>,
}

impl DataStore {
    pub fn new(
        applicants: Vec<Applicant>,
        applications: Vec<Application>,
        specialities: Vec<Speciality>,
        exam_results: Vec<ExamResult>,
    ) -> Result<Self, StoreError> {
        let mut applicant_ids = HashSet::new();
        for applicant in &applicants {
            if !applicant_ids.insert(applicant.id) {
                return Err(StoreError::DuplicateApplicant(applicant.id));
            }
        }

        let mut speciality_ids = HashSet::new();
        for speciality in &specialities {
            if !speciality_ids.insert(speciality.id) {
                return Err(StoreError::DuplicateSpeciality(speciality.id));
            }
        }

        let mut priorities = HashSet::new();
        for application in &applications {
            if application.priority == 0 {
                return Err(StoreError::InvalidPriority {
                    applicant_id: application.applicant_id,
                });
            }
            if !priorities.insert((application.applicant_id, application.priority)) {
                return Err(StoreError::DuplicatePriority {
                    applicant_id: application.applicant_id,
                    priority: application.priority,
                });
            }
        }

        if let Some(invalid) = exam_results.iter().find(|result| !result.result.is_valid()) {
            return Err(StoreError::InvalidScore {
                applicant_id: invalid.applicant_id,
                exam_name: invalid.exam_name.clone(),
            });
        }

        let exam_results: Vec<ExamResult> = exam_results
            .into_iter()
            .map(|result| ExamResult {
                result: Score::new(result.result.0),
                ..result
            })
            .collect();

        debug!(
            applicants = applicants.len(),
            applications = applications.len(),
            specialities = specialities.len(),
            exam_results = exam_results.len(),
            "admission data store assembled"
        );

        Ok(Self {
            applicants,
            applications,
            specialities,
            exam_results,
        })
    }

    pub fn applicants(&self) -> &[Applicant] {
        &self.applicants
    }

    pub fn applications(&self) -> &[Application] {
        &self.applications
    }

    pub fn specialities(&self) -> &[Speciality] {
        &self.specialities
    }

    pub fn exam_results(&self) -> &[ExamResult] {
        &self.exam_results
    }
}

/// Holder that lets a refreshed [`DataStore`] replace the current one between sessions.
///
/// Readers take an `Arc` snapshot and keep it for the whole query, so a swap never
/// changes data underneath a running query.
#[derive(Debug, Clone)]
pub struct SharedStore {
    current: Arc<RwLock<Arc<DataStore>>>,
}

impl SharedStore {
    pub fn new(store: DataStore) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(store))),
        }
    }

    pub fn snapshot(&self) -> Arc<DataStore> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Installs `store` and returns the snapshot it replaced.
    pub fn replace(&self, store: DataStore) -> Arc<DataStore> {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let previous = std::mem::replace(&mut *guard, Arc::new(store));
        debug!("admission data store snapshot replaced");
        previous
    }
}
