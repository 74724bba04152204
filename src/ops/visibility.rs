use serde::Serialize;
use tracing::debug;

use crate::model::navigation::{Category, Item, NavigationTree, SubCategory};
use crate::model::viewer::ViewerIdentity;

/// A navigation tree that has already been narrowed to one viewer.
///
/// Only [`filter`] produces one, so anything that takes a `&ScopedTree`
/// (search, rendering) can never be handed the raw tree by mistake.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct ScopedTree(NavigationTree);

impl ScopedTree {
    pub fn tree(&self) -> &NavigationTree {
        &self.0
    }

    pub fn categories(&self) -> &[Category] {
        &self.0.navigation_items
    }
}

/// Derive the tree `viewer` is allowed to see.
///
/// Private categories and sub-categories drop out together with everything
/// beneath them. Items inside a surviving container are kept or dropped on
/// their own flag. Nothing is reordered and no node is partially redacted.
pub fn filter(tree: &NavigationTree, viewer: ViewerIdentity) -> ScopedTree {
    let mut hidden_categories = 0usize;

    let navigation_items: Vec<Category> = tree
        .navigation_items
        .iter()
        .filter(|category| {
            let visible = viewer.can_see(category.private);
            if !visible {
                hidden_categories += 1;
                debug!(category_id = %category.id, "hiding private category");
            }
            visible
        })
        .map(|category| scope_category(category, viewer))
        .collect();

    debug!(
        authenticated = viewer.authenticated,
        visible = navigation_items.len(),
        hidden = hidden_categories,
        "scoped navigation tree"
    );

    ScopedTree(NavigationTree { navigation_items })
}

/// Like [`filter`], but absent inputs count as an empty tree and an anonymous viewer.
pub fn filter_opt(tree: Option<&NavigationTree>, viewer: Option<ViewerIdentity>) -> ScopedTree {
    match tree {
        Some(tree) => filter(tree, viewer.unwrap_or_default()),
        None => ScopedTree::default(),
    }
}

fn scope_category(category: &Category, viewer: ViewerIdentity) -> Category {
    Category {
        id: category.id.clone(),
        title: category.title.clone(),
        icon: category.icon.clone(),
        private: category.private,
        items: scope_items(&category.items, viewer),
        sub_categories: category
            .sub_categories
            .iter()
            .filter(|sub| {
                let visible = viewer.can_see(sub.private);
                if !visible {
                    debug!(
                        category_id = %category.id,
                        sub_category_id = %sub.id,
                        "hiding private sub-category"
                    );
                }
                visible
            })
            .map(|sub| SubCategory {
                id: sub.id.clone(),
                title: sub.title.clone(),
                private: sub.private,
                items: scope_items(&sub.items, viewer),
            })
            .collect(),
    }
}

fn scope_items(items: &[Item], viewer: ViewerIdentity) -> Vec<Item> {
    items
        .iter()
        .filter(|item| viewer.can_see(item.private))
        .cloned()
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
