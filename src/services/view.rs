//! Prompt List View
//!
//! Pure sorting and filtering of the prompt list for display.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::models::prompt::Prompt;
use crate::models::view::{SortOrder, ALL_CATEGORIES};

fn compare(order: SortOrder, a: &Prompt, b: &Prompt) -> Ordering {
    match order {
        SortOrder::DateDesc => b.id.cmp(&a.id),
        SortOrder::DateAsc => a.id.cmp(&b.id),
        SortOrder::TitleAsc => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
        SortOrder::TitleDesc => b.title.to_lowercase().cmp(&a.title.to_lowercase()),
        SortOrder::CategoryAsc => a.category.to_lowercase().cmp(&b.category.to_lowercase()),
        SortOrder::CategoryDesc => b.category.to_lowercase().cmp(&a.category.to_lowercase()),
    }
}

/// Sort by `order`, then keep prompts whose title contains `query`
/// (case-insensitive) and whose category matches unless it is `All`.
pub fn view(prompts: &[Prompt], query: &str, category: &str, order: SortOrder) -> Vec<Prompt> {
    let mut sorted = prompts.to_vec();
    sorted.sort_by(|a, b| compare(order, a, b));

    let query = query.to_lowercase();
    sorted
        .into_iter()
        .filter(|p| p.title.to_lowercase().contains(&query))
        .filter(|p| category == ALL_CATEGORIES || p.category == category)
        .collect()
}

/// Category selector entries: `All`, then every distinct category sorted
pub fn categories(prompts: &[Prompt]) -> Vec<String> {
    let distinct: BTreeSet<&str> = prompts.iter().map(|p| p.category.as_str()).collect();
    std::iter::once(ALL_CATEGORIES)
        .chain(distinct)
        .map(str::to_string)
        .collect()
}
