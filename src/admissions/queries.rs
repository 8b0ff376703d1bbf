use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use super::domain::{Applicant, ApplicantId, Score, SpecialityId, FIRST_PRIORITY};
use super::operators::{distinct, filter, group_aggregate, group_count, join, sort, top_k, SortKey};
use super::store::DataStore;

/// Applicant ranked inside one speciality's leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredApplicant {
    pub applicant_id: ApplicantId,
    pub full_name: String,
    pub total_score: Score,
}

/// Applicant ranked by the sum of all exam results.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RankedApplicant {
    pub applicant_id: ApplicantId,
    pub score: Score,
}

/// Number of applications naming a speciality at a given priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SpecialityDemand {
    pub speciality_id: SpecialityId,
    pub applications: usize,
}

/// First-choice speciality of an applicant holding the best result of an exam.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopPerformerChoice {
    pub applicant_id: ApplicantId,
    pub speciality_id: SpecialityId,
    pub exam_name: String,
    pub max_score: Score,
    pub priority: u32,
}

/// The admission committee reports, evaluated against one [`DataStore`] snapshot.
#[derive(Debug, Clone, Copy)]
pub struct AdmissionQueries<'a> {
    store: &'a DataStore,
}

impl<'a> AdmissionQueries<'a> {
    pub fn new(store: &'a DataStore) -> Self {
        Self { store }
    }

    /// Applicants living in `city`, in input order.
    pub fn applicants_by_city(&self, city: &str) -> Vec<ApplicantId> {
        let residents = filter(self.store.applicants(), |applicant| applicant.city == city);
        debug!(city, matches = residents.len(), "applicants by city");
        residents.into_iter().map(|applicant| applicant.id).collect()
    }

    /// Applicants who turn `years` old strictly before `as_of`, ordered by full name.
    pub fn older_applicants(&self, years: u32, as_of: NaiveDate) -> Vec<ApplicantId> {
        let older = filter(self.store.applicants(), |applicant| {
            applicant.turns_before(years, as_of)
        });
        let by_name = sort(
            older,
            &[SortKey::ascending_by(|a: &&Applicant, b: &&Applicant| {
                a.full_name.cmp(&b.full_name)
            })],
        );
        debug!(years, %as_of, matches = by_name.len(), "older applicants");
        by_name.into_iter().map(|applicant| applicant.id).collect()
    }

    /// Everyone who applied to the speciality called `name`, best total score first.
    ///
    /// An applicant appears once per application, so duplicates are possible here;
    /// [`Self::select_by_speciality`] removes them.
    pub fn speciality_leaderboard(&self, name: &str) -> Vec<ScoredApplicant> {
        let totals = self.score_totals();
        let specialities = filter(self.store.specialities(), |speciality| {
            speciality.name == name
        });
        let applications = join(
            specialities,
            self.store.applications(),
            |speciality| speciality.id,
            |application| application.speciality_id,
        );
        let applicants = join(
            applications,
            self.store.applicants(),
            |(_, application)| application.applicant_id,
            |applicant| applicant.id,
        );

        let scored = applicants.into_iter().map(|(_, applicant)| ScoredApplicant {
            applicant_id: applicant.id,
            full_name: applicant.full_name.clone(),
            total_score: totals.get(&applicant.id).copied().unwrap_or_default(),
        });

        sort(
            scored,
            &[SortKey::descending(|row: &ScoredApplicant| row.total_score)],
        )
    }

    /// Distinct full names of the applicants to speciality `name`, best total score first.
    pub fn select_by_speciality(&self, name: &str) -> Vec<String> {
        let names = self
            .speciality_leaderboard(name)
            .into_iter()
            .map(|row| row.full_name);
        let names = distinct(names);
        debug!(speciality = name, matches = names.len(), "select by speciality");
        names
    }

    /// Applications per speciality at `priority`, in order of each speciality's first
    /// appearance among those applications.
    pub fn speciality_demand(&self, priority: u32) -> Vec<SpecialityDemand> {
        let chosen = filter(self.store.applications(), |application| {
            application.priority == priority
        });
        group_count(chosen, |application| application.speciality_id)
            .into_iter()
            .map(|(speciality_id, applications)| SpecialityDemand {
                speciality_id,
                applications,
            })
            .collect()
    }

    pub fn first_priority_speciality_counts(&self) -> Vec<usize> {
        self.speciality_demand(FIRST_PRIORITY)
            .into_iter()
            .map(|demand| demand.applications)
            .collect()
    }

    /// Best `limit` applicants by summed exam results. Ties keep applicant input order.
    pub fn ranked_applicants(&self, limit: usize) -> Vec<RankedApplicant> {
        let totals = self.score_totals();
        let scored = self.store.applicants().iter().map(|applicant| RankedApplicant {
            applicant_id: applicant.id,
            score: totals.get(&applicant.id).copied().unwrap_or_default(),
        });
        let ranked = sort(
            scored,
            &[SortKey::descending(|row: &RankedApplicant| row.score)],
        );
        top_k(ranked, limit)
    }

    pub fn top_rated_applicants(&self, limit: usize) -> Vec<ApplicantId> {
        let top = self.ranked_applicants(limit);
        debug!(limit, returned = top.len(), "top rated applicants");
        top.into_iter().map(|row| row.applicant_id).collect()
    }

    /// First-priority specialities of the applicants holding each exam's best result.
    ///
    /// Exams are visited in order of first appearance; every applicant tied on the best
    /// result contributes a row.
    pub fn favorite_specialities_of_top_performers(&self) -> Vec<TopPerformerChoice> {
        let exam_results = self.store.exam_results();
        let best_by_exam = group_aggregate(
            exam_results,
            |result| result.exam_name.clone(),
            |result| result.result,
        );
        let best_results = join(
            best_by_exam,
            exam_results,
            |best| (best.key.clone(), best.max),
            |result| (result.exam_name.clone(), result.result),
        );
        let performers = join(
            best_results,
            self.store.applicants(),
            |(_, result)| result.applicant_id,
            |applicant| applicant.id,
        );
        let choices = join(
            performers,
            self.store.applications(),
            |(_, applicant)| applicant.id,
            |application| application.applicant_id,
        );
        let first_choices = filter(choices, |(_, application)| {
            application.priority == FIRST_PRIORITY
        });
        debug!(rows = first_choices.len(), "favorite specialities of top performers");

        first_choices
            .into_iter()
            .map(
                |(((_, result), applicant), application)| TopPerformerChoice {
                    applicant_id: applicant.id,
                    speciality_id: application.speciality_id,
                    exam_name: result.exam_name.clone(),
                    max_score: result.result,
                    priority: application.priority,
                },
            )
            .collect()
    }

    fn score_totals(&self) -> HashMap<ApplicantId, Score> {
        group_aggregate(
            self.store.exam_results(),
            |result| result.applicant_id,
            |result| result.result,
        )
        .into_iter()
        .map(|group| (group.key, group.sum))
        .collect()
    }
}
