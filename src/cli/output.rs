use serde::Serialize;

use crate::model::navigation::{Category, Item, SubCategory};
use crate::model::viewer::ViewerIdentity;
use crate::ops::search::{CategoryMatch, SubCategoryMatch};
use crate::ops::sections::{SectionBody, section_body};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct ViewerJson<'a> {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeJson<'a> {
    pub viewer: ViewerJson<'a>,
    pub navigation_items: &'a [Category],
}

#[derive(Serialize)]
pub struct SearchJson<'a> {
    pub viewer: ViewerJson<'a>,
    pub query: &'a str,
    pub total: usize,
    pub results: &'a [CategoryMatch],
}

#[derive(Serialize)]
pub struct AdminJson<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<&'a str>,
    pub users: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_admin: Option<bool>,
}

pub fn viewer_to_json<'a>(viewer: ViewerIdentity, username: Option<&'a str>) -> ViewerJson<'a> {
    ViewerJson {
        authenticated: viewer.authenticated,
        username: if viewer.authenticated { username } else { None },
    }
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

fn private_marker(private: bool) -> &'static str {
    if private { " (private)" } else { "" }
}

/// Format a single item as a one-line summary
pub fn format_item_line(item: &Item) -> String {
    let mut line = format!("{}{}", item.title, private_marker(item.private));
    if !item.enabled {
        line.push_str(" (disabled)");
    }
    if !item.href.is_empty() {
        line.push_str(&format!("  <{}>", item.href));
    }
    if let Some(desc) = item.description.as_deref().filter(|d| !d.is_empty()) {
        line.push_str(&format!("  {}", desc));
    }
    line
}

fn format_sub_category_header(sub: &SubCategory) -> String {
    format!("{} [{}]{}", sub.title, sub.id, private_marker(sub.private))
}

/// Format a category section the way it renders: sub-categories replace the
/// category's direct items when present.
pub fn format_category(category: &Category) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push(format!(
        "== {} [{}]{} ==",
        category.title,
        category.id,
        private_marker(category.private)
    ));

    match section_body(category) {
        SectionBody::SubCategories(subs) => {
            for sub in subs {
                lines.push(format!("  {}", format_sub_category_header(sub)));
                for item in &sub.items {
                    lines.push(format!("    {}", format_item_line(item)));
                }
            }
        }
        SectionBody::Items(items) => {
            for item in items {
                lines.push(format!("  {}", format_item_line(item)));
            }
        }
    }
    lines
}

/// Format a full tree listing, one blank line between categories
pub fn format_tree(categories: &[Category]) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, category) in categories.iter().enumerate() {
        if i > 0 {
            lines.push(String::new());
        }
        lines.extend(format_category(category));
    }
    lines
}

fn format_sub_category_match(m: &SubCategoryMatch) -> Vec<String> {
    let mut lines = vec![format!("  {}", format_sub_category_header(&m.sub_category))];
    for item in &m.items {
        lines.push(format!("    {}", format_item_line(item)));
    }
    lines
}

/// Format search results grouped by category.
///
/// Unlike the tree view, direct items and sub-category matches are both shown.
pub fn format_search_results(results: &[CategoryMatch]) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, m) in results.iter().enumerate() {
        if i > 0 {
            lines.push(String::new());
        }
        lines.push(format!(
            "== {} [{}]{} ==",
            m.category.title,
            m.category.id,
            private_marker(m.category.private)
        ));
        for item in &m.items {
            lines.push(format!("  {}", format_item_line(item)));
        }
        for sub in &m.sub_categories {
            lines.extend(format_sub_category_match(sub));
        }
    }
    lines
}
