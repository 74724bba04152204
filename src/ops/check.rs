use std::collections::HashMap;

use serde::Serialize;

use crate::model::navigation::{Category, Item, NavigationTree};

/// Structured result from `navhub check`, suitable for --json output.
#[derive(Debug, Default, Serialize)]
pub struct CheckResult {
    pub valid: bool,
    pub errors: Vec<CheckError>,
    pub warnings: Vec<CheckWarning>,
}

/// A validation error (something that should be fixed).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum CheckError {
    /// Two siblings share an ID
    #[serde(rename = "duplicate_id")]
    DuplicateId {
        /// Path of the parent (`""` for top-level categories)
        parent: String,
        id: String,
        count: usize,
    },
}

/// A validation warning (non-critical issue).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum CheckWarning {
    #[serde(rename = "missing_id")]
    MissingId { path: String, title: String },
    #[serde(rename = "empty_title")]
    EmptyTitle { path: String },
    /// Item link is not an absolute URL
    #[serde(rename = "invalid_href")]
    InvalidHref { path: String, href: String },
    /// Category has direct items that are never rendered because it also has
    /// sub-categories
    #[serde(rename = "shadowed_items")]
    ShadowedItems { category: String, count: usize },
}

// ---------------------------------------------------------------------------
// Main check entry point
// ---------------------------------------------------------------------------

/// Validate a raw navigation tree and return structured results.
///
/// This is a read-only report: nothing is repaired, and the visibility filter
/// passes malformed input through unchanged regardless of what is found here.
///
/// Checks performed:
/// 1. No duplicate IDs among siblings
/// 2. Warnings for missing IDs, empty titles, non-URL links
/// 3. Warnings for direct items hidden behind sub-categories
pub fn check_tree(tree: &NavigationTree) -> CheckResult {
    let mut result = CheckResult::default();

    check_siblings(
        "",
        tree.navigation_items.iter().map(|c| (c.id.as_str(), c.title.as_str())),
        &mut result,
    );

    for category in &tree.navigation_items {
        check_category(category, &mut result);
    }

    result.valid = result.errors.is_empty();
    result
}

fn check_category(category: &Category, result: &mut CheckResult) {
    let path = category.id.clone();

    check_items(&path, &category.items, result);
    check_siblings(
        &path,
        category
            .sub_categories
            .iter()
            .map(|s| (s.id.as_str(), s.title.as_str())),
        result,
    );
    for sub in &category.sub_categories {
        check_items(&join_path(&path, &sub.id), &sub.items, result);
    }

    if !category.sub_categories.is_empty() && !category.items.is_empty() {
        result.warnings.push(CheckWarning::ShadowedItems {
            category: category.id.clone(),
            count: category.items.len(),
        });
    }
}

fn check_items(parent: &str, items: &[Item], result: &mut CheckResult) {
    check_siblings(
        parent,
        items.iter().map(|i| (i.id.as_str(), i.title.as_str())),
        result,
    );
    for item in items {
        if !is_absolute_url(&item.href) {
            result.warnings.push(CheckWarning::InvalidHref {
                path: join_path(parent, &item.id),
                href: item.href.clone(),
            });
        }
    }
}

/// Duplicate, missing-ID and empty-title checks for one sibling list.
fn check_siblings<'a>(
    parent: &str,
    siblings: impl Iterator<Item = (&'a str, &'a str)>,
    result: &mut CheckResult,
) {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();

    for (id, title) in siblings {
        if id.is_empty() {
            result.warnings.push(CheckWarning::MissingId {
                path: parent.to_string(),
                title: title.to_string(),
            });
        } else {
            let count = counts.entry(id).or_insert(0);
            if *count == 0 {
                order.push(id);
            }
            *count += 1;
        }
        if title.trim().is_empty() {
            result.warnings.push(CheckWarning::EmptyTitle {
                path: join_path(parent, id),
            });
        }
    }

    for id in order {
        let count = counts[id];
        if count > 1 {
            result.errors.push(CheckError::DuplicateId {
                parent: parent.to_string(),
                id: id.to_string(),
                count,
            });
        }
    }
}

fn join_path(parent: &str, id: &str) -> String {
    if parent.is_empty() {
        id.to_string()
    } else {
        format!("{}/{}", parent, id)
    }
}

/// `scheme://rest` with an ASCII-alphabetic scheme, or `mailto:`
fn is_absolute_url(href: &str) -> bool {
    if href.starts_with("mailto:") {
        return true;
    }
    match href.split_once("://") {
        Some((scheme, rest)) => {
            !scheme.is_empty()
                && !rest.is_empty()
                && scheme.starts_with(|c: char| c.is_ascii_alphabetic())
                && scheme
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        None => false,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
