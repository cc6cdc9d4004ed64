use chrono::NaiveDate;
use log::debug;
use reqwest::Url;

use crate::substitution::models::{Config, SourceKind, SubstitutionEntry};

/// Date representation used by the plan documents.
pub const PLAN_DATE_FORMAT: &str = "%d.%m.%Y";

pub fn format_plan_date(date: NaiveDate) -> String {
    date.format(PLAN_DATE_FORMAT).to_string()
}

pub fn parse_plan_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), PLAN_DATE_FORMAT).ok()
}

/// Keep only entries whose `date` is exactly the formatted `target_date`.
/// Order is preserved and duplicates stay.
pub fn filter_by_date<I>(entries: I, target_date: NaiveDate) -> Vec<SubstitutionEntry>
where
    I: IntoIterator<Item = SubstitutionEntry>,
{
    let target = format_plan_date(target_date);
    entries
        .into_iter()
        .filter(|entry| entry.date == target)
        .collect()
}

/* flatten per-day groups, then filter like a flat list */
pub fn filter_groups_by_date(
    groups: Vec<Vec<SubstitutionEntry>>,
    target_date: NaiveDate,
) -> Vec<SubstitutionEntry> {
    let filtered = filter_by_date(groups.into_iter().flatten(), target_date);
    debug!(
        "{} entries left for {}",
        filtered.len(),
        format_plan_date(target_date)
    );
    filtered
}

/// Does the tile title contain the label, ignoring case.
pub fn title_matches(title: &str, label: &str) -> bool {
    title.to_lowercase().contains(&label.to_lowercase())
}

/// Substitute `{school_id}` and `{tile_id}` in the plan URL template.
pub fn build_plan_url(template: &str, school_id: &str, tile_id: &str) -> String {
    template
        .replace("{school_id}", school_id)
        .replace("{tile_id}", tile_id)
}

/// The URL without its query, which may hold credentials.
pub fn url_without_query(url: &Url) -> String {
    let mut url = url.clone();
    url.set_query(None);
    url.to_string()
}

pub fn log_config(config: &Config) -> () {
    debug!(
        "Serving {:?} source on {} for school '{}' with origins {:?}",
        config.source, config.listen_addr, config.school_id, config.cors_allowed_origins
    );
    if config.source == SourceKind::Scraping {
        debug!(
            "Portal login {}, landing {}, labels '{}'/'{}'",
            config.portal.login_url,
            config.portal.landing_url,
            config.portal.today_label,
            config.portal.tomorrow_label
        );
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
