#![allow(dead_code)]

use admission_committee::admissions::{
    Applicant, ApplicantId, Application, DataStore, ExamResult, Score, Speciality, SpecialityId,
};
use chrono::NaiveDate;

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub fn applicant(id: u32, full_name: &str, city: &str, birthday: NaiveDate) -> Applicant {
    Applicant {
        id: ApplicantId(id),
        full_name: full_name.to_string(),
        city: city.to_string(),
        birthday_date: birthday,
    }
}

pub fn speciality(id: u32, name: &str) -> Speciality {
    Speciality {
        id: SpecialityId(id),
        name: name.to_string(),
    }
}

pub fn application(applicant_id: u32, speciality_id: u32, priority: u32) -> Application {
    Application {
        applicant_id: ApplicantId(applicant_id),
        speciality_id: SpecialityId(speciality_id),
        priority,
    }
}

pub fn exam(applicant_id: u32, exam_name: &str, result: f64) -> ExamResult {
    ExamResult {
        applicant_id: ApplicantId(applicant_id),
        exam_name: exam_name.to_string(),
        result: Score(result),
    }
}

pub fn ids(raw: &[u32]) -> Vec<ApplicantId> {
    raw.iter().copied().map(ApplicantId).collect()
}

pub fn committee_applicants() -> Vec<Applicant> {
    vec![
        applicant(1, "Anna Sergeevna", "Samara", date(2001, 3, 14)),
        applicant(2, "Daria Mikhailovna", "Vladivostok", date(2004, 10, 10)),
        applicant(3, "Vladimir Petrovich", "Kazan", date(2002, 7, 22)),
        applicant(4, "Zakhar Ivanovich", "Moscow", date(2000, 12, 5)),
        applicant(5, "Veronika Igorevna", "Moscow", date(2004, 10, 9)),
        applicant(6, "Kirill Andreevich", "Vladivostok", date(2005, 3, 15)),
        applicant(7, "Viktor Pavlovich", "Samara", date(2003, 1, 15)),
        applicant(8, "Yaroslav Olegovich", "Kazan", date(2004, 2, 29)),
        applicant(9, "Maksim Dmitrievich", "Vladivostok", date(2006, 1, 20)),
    ]
}

pub fn committee_specialities() -> Vec<Speciality> {
    vec![
        speciality(0, "Applied Mathematics"),
        speciality(1, "Philosophy"),
        speciality(2, "Economics"),
        speciality(3, "Software Engineering"),
        speciality(8, "Information Security"),
    ]
}

pub fn committee_applications() -> Vec<Application> {
    vec![
        application(1, 0, 1),
        application(1, 2, 2),
        application(3, 0, 1),
        application(3, 3, 2),
        application(5, 1, 1),
        application(4, 8, 1),
        application(4, 0, 2),
        application(6, 0, 1),
        application(7, 8, 1),
        application(8, 3, 1),
        application(8, 2, 2),
        application(9, 3, 2),
        application(9, 2, 3),
    ]
}

pub fn committee_exam_results() -> Vec<ExamResult> {
    vec![
        exam(1, "Mathematics", 70.0),
        exam(1, "Russian", 75.0),
        exam(1, "Physics", 65.0),
        exam(2, "Mathematics", 50.0),
        exam(2, "Russian", 60.0),
        exam(3, "Mathematics", 98.0),
        exam(3, "Russian", 95.0),
        exam(3, "Physics", 97.0),
        exam(4, "Informatics", 99.0),
        exam(4, "Mathematics", 60.0),
        exam(5, "Mathematics", 80.0),
        exam(5, "Russian", 70.0),
        exam(5, "Physics", 65.0),
        exam(6, "Russian", 55.0),
        exam(6, "Russian", 40.0),
        exam(7, "Mathematics", 85.0),
        exam(7, "Russian", 80.0),
        exam(7, "Informatics", 90.0),
        exam(9, "Mathematics", 98.0),
        exam(9, "Russian", 88.0),
        exam(9, "Physics", 84.0),
    ]
}

/// The admission committee dataset the report scenarios are asserted against.
pub fn committee_store() -> DataStore {
    DataStore::new(
        committee_applicants(),
        committee_applications(),
        committee_specialities(),
        committee_exam_results(),
    )
    .expect("committee fixture is valid")
}
