//! Admission committee analytics: the datasets, the relational operators over them,
//! and the fixed reports built from those operators.

pub mod domain;
pub mod loader;
pub mod operators;
mod queries;
pub mod store;

pub use domain::{
    Applicant, ApplicantId, Application, ExamResult, Score, Speciality, SpecialityId,
    FIRST_PRIORITY,
};
pub use loader::LoadError;
pub use queries::{
    AdmissionQueries, RankedApplicant, ScoredApplicant, SpecialityDemand, TopPerformerChoice,
};
pub use store::{DataStore, SharedStore, StoreError};
