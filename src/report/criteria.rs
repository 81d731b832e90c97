use std::str::FromStr;

use chrono::NaiveDate;

use crate::model::record::{RecordKind, RecordStatus};

/// Which employees an admin viewer wants to see. Ordinary viewers always see
/// their own records, whatever this is set to.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum EmployeeSelector {
    #[default]
    All,
    One(u64),
}

/// User-chosen display filters. Transient UI state, never persisted; every
/// field is a narrowing constraint and `None`/`All` means "no constraint".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub kind: Option<RecordKind>,
    pub status: Option<RecordStatus>,
    pub employee: EmployeeSelector,
}

impl FilterCriteria {
    /// Build criteria from raw query text. Filters are best-effort UI state:
    /// empty, missing, or malformed values become "no constraint" rather
    /// than an error.
    pub fn from_raw(
        start_date: Option<&str>,
        end_date: Option<&str>,
        kind: Option<&str>,
        status: Option<&str>,
        employee: Option<&str>,
    ) -> Self {
        Self {
            start_date: parse_date(start_date),
            end_date: parse_date(end_date),
            kind: parse_token(kind),
            status: parse_token(status),
            employee: parse_selector(employee),
        }
    }
}

fn non_empty(raw: Option<&str>) -> Option<&str> {
    let raw = raw?.trim();
    if raw.is_empty() { None } else { Some(raw) }
}

fn parse_date(raw: Option<&str>) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(non_empty(raw)?, "%Y-%m-%d").ok()
}

fn parse_token<T: FromStr>(raw: Option<&str>) -> Option<T> {
    T::from_str(non_empty(raw)?).ok()
}

fn parse_selector(raw: Option<&str>) -> EmployeeSelector {
    match non_empty(raw) {
        Some("all") | None => EmployeeSelector::All,
        Some(id) => id
            .parse::<u64>()
            .map(EmployeeSelector::One)
            .unwrap_or(EmployeeSelector::All),
    }
}
