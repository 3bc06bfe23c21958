//! Term query engine: filter, sort and paginate the term collection.

use crate::letters::starts_with_letter;
use glossa_db::Term;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Fixed listing page size.
pub const PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// `"desc"` selects descending order; anything else is ascending.
    pub fn from_param(raw: Option<&str>) -> Self {
        match raw {
            Some("desc") => SortOrder::Desc,
            _ => SortOrder::Asc,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Listing criteria. Every filter is optional and they combine with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermQuery {
    pub sort_order: SortOrder,
    pub search_query: Option<String>,
    pub category_id: Option<i64>,
    pub selected_letter: Option<String>,
    pub page_number: i64,
}

impl TermQuery {
    pub fn new() -> Self {
        Self { page_number: 1, ..Default::default() }
    }

    pub fn category(mut self, category_id: i64) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn search(mut self, query: impl Into<String>) -> Self {
        self.search_query = Some(query.into());
        self
    }

    pub fn letter(mut self, letter: impl Into<String>) -> Self {
        self.selected_letter = Some(letter.into());
        self
    }

    pub fn sort(mut self, order: SortOrder) -> Self {
        self.sort_order = order;
        self
    }

    pub fn page(mut self, page_number: i64) -> Self {
        self.page_number = page_number;
        self
    }

    /// Non-empty search text, if any.
    fn search_text(&self) -> Option<String> {
        self.search_query
            .as_deref()
            .filter(|q| !q.is_empty())
            .map(str::to_lowercase)
    }

    /// Trimmed, non-empty letter, if any.
    fn letter_text(&self) -> Option<&str> {
        self.selected_letter
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
    }

    /// Whether a single term passes every active filter.
    pub fn matches(&self, term: &Term) -> bool {
        if let Some(category_id) = self.category_id {
            if term.category_id != category_id {
                return false;
            }
        }
        if let Some(needle) = self.search_text() {
            if !term.title.to_lowercase().contains(&needle) {
                return false;
            }
        }
        if let Some(letter) = self.letter_text() {
            if !starts_with_letter(&term.title, letter) {
                return false;
            }
        }
        true
    }

    /// Filter and sort `terms`. The result is ordered by title with id as
    /// tie-breaker, so descending is the exact reverse of ascending.
    pub fn filter_sorted(&self, terms: &[Term]) -> Vec<Term> {
        let mut matched: Vec<Term> = terms.iter().filter(|t| self.matches(t)).cloned().collect();
        matched.sort_by(title_order);
        if self.sort_order == SortOrder::Desc {
            matched.reverse();
        }
        matched
    }

    /// Filter, sort and cut out the requested page.
    pub fn run(&self, terms: &[Term]) -> Page<Term> {
        Page::new(self.filter_sorted(terms), self.page_number, PAGE_SIZE)
    }
}

fn title_order(a: &Term, b: &Term) -> Ordering {
    a.title.cmp(&b.title).then(a.id.cmp(&b.id))
}

/// One page of results plus enough bookkeeping to draw a pager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub number: usize,
    pub num_pages: usize,
    pub count: usize,
    pub page_size: usize,
    pub has_previous: bool,
    pub has_next: bool,
}

impl<T> Page<T> {
    /// Cut page `requested` out of `all`. Requests outside `1..=num_pages`
    /// clamp to the nearest valid page; an empty input has one empty page.
    pub fn new(all: Vec<T>, requested: i64, page_size: usize) -> Self {
        let page_size = page_size.max(1);
        let count = all.len();
        let num_pages = count.div_ceil(page_size).max(1);
        let number = requested.clamp(1, num_pages as i64) as usize;

        let start = (number - 1) * page_size;
        let items: Vec<T> = all.into_iter().skip(start).take(page_size).collect();

        Self {
            items,
            number,
            num_pages,
            count,
            page_size,
            has_previous: number > 1,
            has_next: number < num_pages,
        }
    }
}

/// Parse a raw `page` parameter; anything that is not an integer means page 1.
pub fn parse_page_number(raw: Option<&str>) -> i64 {
    raw.and_then(|p| p.trim().parse::<i64>().ok()).unwrap_or(1)
}
