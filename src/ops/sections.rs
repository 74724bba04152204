use crate::model::navigation::{Category, Item, SubCategory};

/// What a category section shows on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionBody<'a> {
    SubCategories(&'a [SubCategory]),
    Items(&'a [Item]),
}

/// Sub-categories take precedence: once a category has any, its direct items
/// are not rendered. `navhub check` reports the affected categories.
pub fn section_body(category: &Category) -> SectionBody<'_> {
    if category.sub_categories.is_empty() {
        SectionBody::Items(&category.items)
    } else {
        SectionBody::SubCategories(&category.sub_categories)
    }
}
