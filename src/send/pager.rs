//! Page cursor over an in-memory result list.

use std::ops::Range;

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Menu entries offered while paging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageAction {
    Next,
    Previous,
    Select,
    SearchAgain,
    Cancel,
}

impl PageAction {
    pub fn label(&self) -> &'static str {
        match self {
            PageAction::Next => "Next page",
            PageAction::Previous => "Previous page",
            PageAction::Select => "Select an asset",
            PageAction::SearchAgain => "Search again",
            PageAction::Cancel => "Cancel",
        }
    }
}

/// Zero-based page index over `total` items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pager {
    current_page: usize,
    page_size: usize,
    total: usize,
}

impl Pager {
    pub fn new(total: usize, page_size: usize) -> Self {
        Self {
            current_page: 0,
            page_size: page_size.max(1),
            total,
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// `[page*size, min(page*size + size, total))`
    pub fn range(&self) -> Range<usize> {
        let start = (self.current_page * self.page_size).min(self.total);
        let end = (start + self.page_size).min(self.total);
        start..end
    }

    pub fn page<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let r = self.range();
        &items[r.start.min(items.len())..r.end.min(items.len())]
    }

    pub fn has_next(&self) -> bool {
        self.current_page * self.page_size + self.page_size < self.total
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 0
    }

    /// Advance one page; false (and no move) on the last page.
    pub fn next(&mut self) -> bool {
        if !self.has_next() {
            return false;
        }
        self.current_page += 1;
        true
    }

    pub fn previous(&mut self) -> bool {
        if !self.has_previous() {
            return false;
        }
        self.current_page -= 1;
        true
    }

    /// Enabled actions, in menu order.
    pub fn actions(&self) -> Vec<PageAction> {
        let mut actions = Vec::with_capacity(5);
        if self.has_next() {
            actions.push(PageAction::Next);
        }
        if self.has_previous() {
            actions.push(PageAction::Previous);
        }
        actions.extend([
            PageAction::Select,
            PageAction::SearchAgain,
            PageAction::Cancel,
        ]);
        actions
    }
}
