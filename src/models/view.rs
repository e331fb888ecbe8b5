//! View State Models
//!
//! Ephemeral session state: which screen is shown, how the list is filtered
//! and sorted, and what the form or detail view is showing. Never persisted.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::prompt::Prompt;
use crate::utils::error::AppError;

/// Category selector sentinel meaning "no category filter"
pub const ALL_CATEGORIES: &str = "All";

/// Sort order for the prompt list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    #[default]
    DateDesc,
    DateAsc,
    TitleAsc,
    TitleDesc,
    CategoryAsc,
    CategoryDesc,
}

impl SortOrder {
    pub const ALL: [SortOrder; 6] = [
        SortOrder::DateDesc,
        SortOrder::DateAsc,
        SortOrder::TitleAsc,
        SortOrder::TitleDesc,
        SortOrder::CategoryAsc,
        SortOrder::CategoryDesc,
    ];

    /// Wire name, e.g. `title-asc`
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::DateDesc => "date-desc",
            SortOrder::DateAsc => "date-asc",
            SortOrder::TitleAsc => "title-asc",
            SortOrder::TitleDesc => "title-desc",
            SortOrder::CategoryAsc => "category-asc",
            SortOrder::CategoryDesc => "category-desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortOrder::ALL
            .into_iter()
            .find(|order| order.as_str() == s)
            .ok_or_else(|| AppError::validation(format!("Unknown sort order: {}", s)))
    }
}

/// Which screen is showing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Screen {
    #[default]
    Main,
    Settings,
}

/// Add/edit form state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FormState {
    #[default]
    Closed,
    Adding,
    Editing(Prompt),
}

impl FormState {
    pub fn is_open(&self) -> bool {
        !matches!(self, FormState::Closed)
    }
}

/// Everything the surface needs to redraw, apart from the collections
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub screen: Screen,
    pub query: String,
    pub category: String,
    pub sort_order: SortOrder,
    pub viewing: Option<Prompt>,
    pub form: FormState,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            screen: Screen::Main,
            query: String::new(),
            category: ALL_CATEGORIES.to_string(),
            sort_order: SortOrder::DateDesc,
            viewing: None,
            form: FormState::Closed,
        }
    }
}
