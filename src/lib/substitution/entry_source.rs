use std::{future::Future, sync::Arc};

use chrono::{Days, NaiveDate};
use log::debug;

use super::{errors::FetchError, helpers::format_plan_date, models::SubstitutionEntry};

/// Which day a request asks for. Only sources that have to pick a day-specific
/// document look at it, the others return everything they have.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlanDay {
    Today,
    Tomorrow,
}

impl PlanDay {
    pub fn date_from(self, today: NaiveDate) -> NaiveDate {
        match self {
            PlanDay::Today => today,
            PlanDay::Tomorrow => today
                .checked_add_days(Days::new(1))
                .unwrap_or(NaiveDate::MAX),
        }
    }
}

/// A trait, necessary for every entity that will be used for getting substitution entries.
/// Entries come grouped per day; sources without such grouping return a single group.
/// `today` is the request's date, for sources that generate their entries.
pub trait EntrySource: Send + Sync + 'static {
    fn fetch_all(
        &self,
        day: PlanDay,
        today: NaiveDate,
    ) -> impl Future<Output = Result<Vec<Vec<SubstitutionEntry>>, FetchError>> + Send;
}

pub type EntriesFactory = Arc<dyn Fn(NaiveDate) -> Vec<SubstitutionEntry> + Send + Sync>;

/// In-process entries built for the requested day, never fails.
#[derive(Clone)]
pub struct StaticSource {
    entries: EntriesFactory,
}

impl Default for StaticSource {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl StaticSource {
    /// Always the same entries, whatever the day.
    pub fn new(entries: Vec<SubstitutionEntry>) -> Self {
        Self {
            entries: Arc::new(move |_: NaiveDate| entries.clone()),
        }
    }

    /// The demo entry the dashboard shows when no portal is wired up,
    /// dated on the day it is requested.
    pub fn sample() -> Self {
        Self {
            entries: Arc::new(|today: NaiveDate| vec![sample_entry(today)]),
        }
    }
}

pub fn sample_entry(today: NaiveDate) -> SubstitutionEntry {
    SubstitutionEntry {
        date: format_plan_date(today),
        class_name: Some("10A".to_owned()),
        lesson: Some("3".to_owned()),
        subject: Some("Math".to_owned()),
        new_subject: Some("Geometry".to_owned()),
        teacher: Some("Mr. Schmidt".to_owned()),
        new_teacher: Some("Ms. Meyer".to_owned()),
        room: Some("101".to_owned()),
        notes: Some("Bring calculator".to_owned()),
        ..Default::default()
    }
}

impl EntrySource for StaticSource {
    async fn fetch_all(
        &self,
        _day: PlanDay,
        today: NaiveDate,
    ) -> Result<Vec<Vec<SubstitutionEntry>>, FetchError> {
        let entries = (self.entries)(today);
        debug!("Serving {} static entries", entries.len());
        Ok(vec![entries])
    }
}
