use serde::{Deserialize, Deserializer, Serialize};

/// Treat an absent or `null` sequence as empty.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

fn default_true() -> bool {
    true
}

/// A single link card (leaf node)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Unique among siblings
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub href: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub private: bool,
}

impl Item {
    /// Create a public, enabled item with no icon or description
    pub fn new(id: impl Into<String>, title: impl Into<String>, href: impl Into<String>) -> Self {
        Item {
            id: id.into(),
            title: title.into(),
            href: href.into(),
            icon: None,
            description: None,
            enabled: true,
            private: false,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn private(mut self) -> Self {
        self.private = true;
        self
    }
}

/// Second-level grouping inside a category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubCategory {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub private: bool,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub items: Vec<Item>,
}

impl SubCategory {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        SubCategory {
            id: id.into(),
            title: title.into(),
            private: false,
            items: Vec::new(),
        }
    }

    pub fn private(mut self) -> Self {
        self.private = true;
        self
    }

    pub fn with_items(mut self, items: Vec<Item>) -> Self {
        self.items = items;
        self
    }
}

/// Top-level section of the hub.
///
/// A category may hold direct items, sub-categories, or both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default)]
    pub private: bool,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub items: Vec<Item>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub sub_categories: Vec<SubCategory>,
}

impl Category {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Category {
            id: id.into(),
            title: title.into(),
            icon: None,
            private: false,
            items: Vec::new(),
            sub_categories: Vec::new(),
        }
    }

    pub fn private(mut self) -> Self {
        self.private = true;
        self
    }

    pub fn with_items(mut self, items: Vec<Item>) -> Self {
        self.items = items;
        self
    }

    pub fn with_sub_categories(mut self, sub_categories: Vec<SubCategory>) -> Self {
        self.sub_categories = sub_categories;
        self
    }

    /// Direct items plus items in every sub-category
    pub fn item_count(&self) -> usize {
        self.items.len()
            + self
                .sub_categories
                .iter()
                .map(|sub| sub.items.len())
                .sum::<usize>()
    }
}

/// The root of the navigation data
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationTree {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub navigation_items: Vec<Category>,
}

impl NavigationTree {
    pub fn new(navigation_items: Vec<Category>) -> Self {
        NavigationTree { navigation_items }
    }

    /// Parse a navigation document. A JSON `null` document is an empty tree.
    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        let tree: Option<NavigationTree> = serde_json::from_str(text)?;
        Ok(tree.unwrap_or_default())
    }

    pub fn is_empty(&self) -> bool {
        self.navigation_items.is_empty()
    }

    /// Total number of items at every level
    pub fn item_count(&self) -> usize {
        self.navigation_items.iter().map(Category::item_count).sum()
    }

    pub fn find_category(&self, id: &str) -> Option<&Category> {
        self.navigation_items.iter().find(|c| c.id == id)
    }
}
