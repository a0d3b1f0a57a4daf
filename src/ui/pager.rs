use std::ops::Range;

/// Records shown per history page.
pub(crate) const PAGE_SIZE: usize = 10;

pub(crate) fn total_pages(count: usize) -> usize {
    count.div_ceil(PAGE_SIZE)
}

/// 1-based page cursor over a newest-first list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Pager {
    page: usize,
}

impl Default for Pager {
    fn default() -> Self {
        Self { page: 1 }
    }
}

impl Pager {
    pub(crate) fn page(&self) -> usize {
        self.page
    }

    pub(crate) fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub(crate) fn has_next(&self, count: usize) -> bool {
        self.page < total_pages(count)
    }

    pub(crate) fn prev(&mut self) {
        if self.has_prev() {
            self.page -= 1;
        }
    }

    pub(crate) fn next(&mut self, count: usize) {
        if self.has_next(count) {
            self.page += 1;
        }
    }

    /// Jump to `page`, clamped into range.
    pub(crate) fn go_to(&mut self, page: usize, count: usize) {
        self.page = page;
        self.clamp(count);
    }

    /// Keep the page within `[1, total_pages]` (page 1 when the list is empty).
    pub(crate) fn clamp(&mut self, count: usize) {
        self.page = self.page.clamp(1, total_pages(count).max(1));
    }

    /// Index range of the current page within a list of `count` items.
    pub(crate) fn range(&self, count: usize) -> Range<usize> {
        let start = ((self.page - 1) * PAGE_SIZE).min(count);
        let end = (start + PAGE_SIZE).min(count);
        start..end
    }

    pub(crate) fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[self.range(items.len())]
    }
}
