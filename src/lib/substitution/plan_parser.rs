//! HTML parsing for the portal landing page and the Untis plan documents.
//!
//! Everything here is synchronous and works on strings, so it can be tested
//! offline against saved pages. `scraper::Html` is not `Send`, keeping it out
//! of the async fetch code also keeps those futures `Send`.
use log::{debug, info};
use scraper::{ElementRef, Html, Selector};

use crate::substitution::{
    errors::FetchError,
    helpers::{format_plan_date, parse_plan_date, title_matches},
    models::{PortalConfig, SubstitutionEntry},
};

pub const PLAN_TITLE_SELECTOR: &str = "div.mon_title";
pub const PLAN_ROW_SELECTOR: &str = "table.mon_list tr.list";
/// class, lesson, absent, substitute, old_subject, new_subject, room, type, notes
pub const PLAN_ROW_CELLS: usize = 9;

/// A day tile on the portal landing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    pub title: String,
    pub id: String,
}

fn selector(css: &str) -> Result<Selector, FetchError> {
    Selector::parse(css)
        .map_err(|err| FetchError::Unexpected(format!("invalid selector '{}': {}", css, err)))
}

/* text of an element with runs of whitespace (nbsp included) squashed */
fn element_text(element: ElementRef) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

fn non_empty(text: String) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

pub fn parse_tiles(html: &str, portal: &PortalConfig) -> Result<Vec<Tile>, FetchError> {
    let document = Html::parse_document(html);
    let tile_selector = selector(&portal.tile_selector)?;

    let tiles = document
        .select(&tile_selector)
        .filter_map(|element| {
            let id = element.value().attr(&portal.tile_id_attr)?;
            let title = element
                .value()
                .attr(&portal.tile_title_attr)
                .map(str::to_owned)
                .unwrap_or_else(|| element_text(element));
            Some(Tile {
                title,
                id: id.to_owned(),
            })
        })
        .collect::<Vec<_>>();

    Ok(tiles)
}

/// First tile whose title contains `label`, case-insensitively.
pub fn select_tile<'a>(tiles: &'a [Tile], label: &str) -> Result<&'a Tile, FetchError> {
    for tile in tiles.iter() {
        debug!("Candidate tile '{}' ({})", tile.title, tile.id);
    }
    let found = tiles.iter().find(|tile| title_matches(&tile.title, label));
    match found {
        Some(tile) => {
            info!("Tile '{}' matches '{}', id {}", tile.title, label, tile.id);
            Ok(tile)
        }
        None => {
            info!("None of {} tiles matches '{}'", tiles.len(), label);
            Err(FetchError::TileNotFound {
                label: label.to_owned(),
            })
        }
    }
}

/// Read the plan date from `div.mon_title`, e.g. `18.10.2026 Sonntag, Woche A`.
pub fn parse_plan_title_date(document: &Html) -> Result<String, FetchError> {
    let title_selector = selector(PLAN_TITLE_SELECTOR)?;
    document
        .select(&title_selector)
        .next()
        .map(element_text)
        .and_then(|title| {
            title
                .split_whitespace()
                .find_map(parse_plan_date)
                .map(format_plan_date)
        })
        .ok_or(FetchError::MissingPlanDate)
}

fn entry_from_cells(date: &str, cells: Vec<String>) -> SubstitutionEntry {
    let mut cells = cells.into_iter().map(non_empty);
    let mut next = move || cells.next().flatten();
    SubstitutionEntry {
        date: date.to_owned(),
        class_name: next(),
        lesson: next(),
        absent: next(),
        substitute: next(),
        old_subject: next(),
        new_subject: next(),
        room: next(),
        kind: next(),
        notes: next(),
        ..Default::default()
    }
}

/// Parse one plan document into entries.
///
/// Header rows (only `th` cells) are skipped. Any other row must have exactly
/// [`PLAN_ROW_CELLS`] cells.
pub fn parse_plan_document(html: &str) -> Result<Vec<SubstitutionEntry>, FetchError> {
    let document = Html::parse_document(html);
    let date = parse_plan_title_date(&document)?;
    let row_selector = selector(PLAN_ROW_SELECTOR)?;
    let cell_selector = selector("td")?;

    let mut entries = Vec::new();
    for (row_index, row) in document.select(&row_selector).enumerate() {
        let cells = row
            .select(&cell_selector)
            .map(element_text)
            .collect::<Vec<_>>();
        if cells.is_empty() {
            continue;
        }
        if cells.len() != PLAN_ROW_CELLS {
            return Err(FetchError::MalformedRow {
                row: row_index,
                cells: cells.len(),
                expected: PLAN_ROW_CELLS,
            });
        }
        entries.push(entry_from_cells(&date, cells));
    }

    debug!("Parsed {} entries for {}", entries.len(), date);
    Ok(entries)
}
