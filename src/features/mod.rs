//! Features - Vertical Feature Slices
//!
//! Each feature contains its page and controller. Controllers own the fetch state;
//! pages own table schemas and turn state into text.

pub mod costs;
pub mod dashboard;
pub mod routes;
pub mod shipments;
pub mod vehicles;

use std::fmt;
use std::str::FromStr;

use crate::components::data_table::TableInteractions;
use crate::error::{Error, Result};
use crate::state::ResourceState;
use crate::utils::format::format_number;

/// Page selectable from the command line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PageKind {
    #[default]
    Dashboard,
    Shipments,
    Vehicles,
    Routes,
    Costs,
}

impl PageKind {
    pub const ALL: [PageKind; 5] = [
        PageKind::Dashboard,
        PageKind::Shipments,
        PageKind::Vehicles,
        PageKind::Routes,
        PageKind::Costs,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PageKind::Dashboard => "dashboard",
            PageKind::Shipments => "shipments",
            PageKind::Vehicles => "vehicles",
            PageKind::Routes => "routes",
            PageKind::Costs => "costs",
        }
    }
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PageKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        PageKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::Invalid {
                message: format!(
                    "unknown page {s:?}, expected one of: {}",
                    PageKind::ALL.map(|k| k.as_str()).join(", ")
                ),
            })
    }
}

/// Title underlined with `=`
pub(crate) fn heading(title: &str) -> String {
    format!("{title}\n{}\n", "=".repeat(title.chars().count()))
}

/// Section title underlined with `-`
pub(crate) fn subheading(title: &str) -> String {
    format!("\n{title}\n{}\n", "-".repeat(title.chars().count()))
}

/// Metric cards as aligned `label  value` lines
pub(crate) fn metric_block(metrics: &[(&str, String)]) -> String {
    let width = metrics.iter().map(|(label, _)| label.chars().count()).max().unwrap_or(0);
    metrics
        .iter()
        .map(|(label, value)| format!("{label:<width$}  {value}\n"))
        .collect()
}

/// `  ▲ 4.2% from previous`, or nothing for a flat trend
pub(crate) fn trend_text(trend: f64) -> String {
    if trend == 0.0 || !trend.is_finite() {
        return String::new();
    }
    let arrow = if trend > 0.0 { "▲" } else { "▼" };
    format!("  {arrow} {}% from previous", format_number(trend.abs()))
}

/// Reject header clicks that no paginated table on the page can sort by
pub(crate) fn check_sort_fields(interactions: &TableInteractions, sortable: &[&'static str]) -> Result<()> {
    match interactions.sort.iter().find(|name| !sortable.contains(&name.as_str())) {
        Some(name) => Err(Error::Invalid {
            message: format!("cannot sort by {name:?}, expected one of: {}", sortable.join(", ")),
        }),
        None => Ok(()),
    }
}

/// Placeholder text for a resource that has nothing to show yet
pub(crate) fn resource_status<T>(state: &ResourceState<T>) -> Option<String> {
    if let Some(error) = &state.error {
        return Some(format!("Error: {error}\n"));
    }
    if state.data.is_none() {
        let text = if state.loading { "Loading..." } else { "No data." };
        return Some(format!("{text}\n"));
    }
    None
}
