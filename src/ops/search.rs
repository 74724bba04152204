use serde::Serialize;
use tracing::trace;

use crate::model::navigation::{Category, Item, SubCategory};
use crate::ops::visibility::ScopedTree;

/// A normalized, non-empty search query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    needle: String,
}

impl Query {
    /// Trim and lowercase `raw`. Returns `None` for an empty or blank query,
    /// which means "no active search".
    pub fn parse(raw: &str) -> Option<Query> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Query {
            needle: trimmed.to_lowercase(),
        })
    }

    /// The lowercased needle
    pub fn as_str(&self) -> &str {
        &self.needle
    }

    /// Case-insensitive substring match on title or description.
    /// A missing description never matches.
    pub fn matches(&self, item: &Item) -> bool {
        self.matches_text(&item.title)
            || item
                .description
                .as_deref()
                .is_some_and(|d| self.matches_text(d))
    }

    fn matches_text(&self, text: &str) -> bool {
        text.to_lowercase().contains(&self.needle)
    }
}

/// Matches within one sub-category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubCategoryMatch {
    pub sub_category: SubCategory,
    pub items: Vec<Item>,
}

/// Matches within one category, split into direct items and sub-categories
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryMatch {
    pub category: Category,
    pub items: Vec<Item>,
    pub sub_categories: Vec<SubCategoryMatch>,
}

impl CategoryMatch {
    /// Number of matching items at both levels
    pub fn match_count(&self) -> usize {
        self.items.len()
            + self
                .sub_categories
                .iter()
                .map(|sub| sub.items.len())
                .sum::<usize>()
    }
}

/// Total matching items across a result sequence
pub fn total_matches(results: &[CategoryMatch]) -> usize {
    results.iter().map(CategoryMatch::match_count).sum()
}

// ---------------------------------------------------------------------------
// Matching
// ---------------------------------------------------------------------------

/// Search a viewer-scoped tree.
///
/// A blank query yields an empty sequence. Otherwise every category with at
/// least one matching item (directly or in a sub-category) yields one entry;
/// sub-categories without matches are left out. Tree order is preserved.
pub fn search(scoped: &ScopedTree, query: &str) -> Vec<CategoryMatch> {
    let Some(query) = Query::parse(query) else {
        return Vec::new();
    };

    let results: Vec<CategoryMatch> = scoped
        .categories()
        .iter()
        .filter_map(|category| match_category(category, &query))
        .collect();

    trace!(
        query = query.as_str(),
        categories = results.len(),
        items = total_matches(&results),
        "search"
    );
    results
}

fn match_category(category: &Category, query: &Query) -> Option<CategoryMatch> {
    let items = match_items(&category.items, query);

    let sub_categories: Vec<SubCategoryMatch> = category
        .sub_categories
        .iter()
        .filter_map(|sub| {
            let items = match_items(&sub.items, query);
            if items.is_empty() {
                None
            } else {
                Some(SubCategoryMatch {
                    sub_category: sub.clone(),
                    items,
                })
            }
        })
        .collect();

    if items.is_empty() && sub_categories.is_empty() {
        return None;
    }

    Some(CategoryMatch {
        category: category.clone(),
        items,
        sub_categories,
    })
}

fn match_items(items: &[Item], query: &Query) -> Vec<Item> {
    items
        .iter()
        .filter(|item| query.matches(item))
        .cloned()
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
