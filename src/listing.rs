use crate::content::{Post, Project};
use crate::paginator::Paginator;

pub const ALL_CATEGORIES: &str = "all";

fn non_blank(category: Option<&str>) -> Option<&str> {
    category.filter(|c| !c.trim().is_empty())
}

/// Records that can be filtered by category.
pub trait Categorized {
    fn category_key(&self) -> Option<&str>;
}

impl Categorized for Post {
    fn category_key(&self) -> Option<&str> {
        non_blank(self.category.as_deref())
    }
}

impl Categorized for Project {
    fn category_key(&self) -> Option<&str> {
        non_blank(self.category.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    pub fn from_param(param: Option<&str>) -> Self {
        match param.map(str::trim) {
            None | Some("") | Some(ALL_CATEGORIES) => CategoryFilter::All,
            Some(category) => CategoryFilter::Only(category.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            CategoryFilter::All => ALL_CATEGORIES,
            CategoryFilter::Only(category) => category.as_str(),
        }
    }

    pub fn matches<T: Categorized>(&self, item: &T) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => item.category_key() == Some(category.as_str()),
        }
    }

    pub fn apply<'a, T: Categorized>(&self, items: &'a [T]) -> Vec<&'a T> {
        items.iter().filter(|item| self.matches(*item)).collect()
    }
}

/// "all" followed by each distinct category in the order first seen.
pub fn category_options<T: Categorized>(items: &[T]) -> Vec<String> {
    let mut options = vec![ALL_CATEGORIES.to_string()];
    for category in items.iter().filter_map(|item| item.category_key()) {
        if !options.iter().any(|known| known == category) {
            options.push(category.to_string());
        }
    }
    options
}

/// Current page and category filter of a paginated list.
///
/// Moving outside `1..=page_count` leaves the state untouched, and picking a
/// different filter always starts again from the first page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListState {
    filter: CategoryFilter,
    current_page: u32,
    page_size: u32,
}

impl ListState {
    pub fn new(page_size: u32) -> Self {
        ListState {
            filter: CategoryFilter::All,
            current_page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn filter(&self) -> &CategoryFilter {
        &self.filter
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn set_filter(&mut self, filter: CategoryFilter) {
        self.filter = filter;
        self.current_page = 1;
    }

    /// Returns whether the page changed.
    pub fn go_to(&mut self, page: u32, page_count: u32) -> bool {
        if page < 1 || page > page_count || page == self.current_page {
            return false;
        }
        self.current_page = page;
        true
    }

    pub fn next(&mut self, page_count: u32) -> bool {
        self.go_to(self.current_page + 1, page_count)
    }

    pub fn prev(&mut self, page_count: u32) -> bool {
        self.go_to(self.current_page.saturating_sub(1), page_count)
    }
}

/// One rendered page of a filtered list.
pub struct ListPage<'a, T> {
    pub items: Vec<&'a T>,
    pub total: usize,
    pub current_page: u32,
    pub page_count: u32,
    pub page_size: u32,
}

impl<T> ListPage<'_, T> {
    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.page_count
    }

    pub fn needs_pagination(&self) -> bool {
        self.total > self.page_size as usize
    }
}

/// Filters `items`, moves the state to `requested_page` when it exists and
/// returns the page the state ends up on.
pub fn select_page<'a, T: Categorized>(items: &'a [T], state: &mut ListState, requested_page: u32) -> ListPage<'a, T> {
    let filtered = state.filter().apply(items);
    let paginator = Paginator::from(&filtered, state.page_size());
    if state.current_page() > paginator.page_count() {
        state.current_page = 1;
    }
    state.go_to(requested_page, paginator.page_count());

    let page_items = paginator.get_page(state.current_page())
        .map(|page| page.to_vec())
        .unwrap_or_default();

    ListPage {
        items: page_items,
        total: filtered.len(),
        current_page: state.current_page(),
        page_count: paginator.page_count(),
        page_size: state.page_size(),
    }
}
