use crate::error::{EditError, Result};
use std::fmt;
use std::num::IntErrorKind;

/// An inclusive run of 1-based page numbers, as shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSpan {
    pub first: u64,
    pub last: u64,
}

impl PageSpan {
    pub fn new(first: u64, last: u64) -> Self {
        PageSpan { first, last }
    }

    pub fn single(page: u64) -> Self {
        PageSpan::new(page, page)
    }
}

impl fmt::Display for PageSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.first == self.last {
            write!(f, "{}", self.first)
        } else {
            write!(f, "{}-{}", self.first, self.last)
        }
    }
}

/// Zero-based page indices, kept sorted and free of duplicates.
///
/// Stored as disjoint inclusive spans so "1-4000000000" costs one entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageIndexSet(Vec<(u64, u64)>);

impl PageIndexSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the zero-based indices `start..=end`
    pub fn insert_span(&mut self, start: u64, end: u64) {
        let pos = self.0.partition_point(|&(s, _)| s < start);
        self.0.insert(pos, (start, end));

        // coalesce overlapping or adjacent spans
        let mut merged: Vec<(u64, u64)> = Vec::with_capacity(self.0.len());
        for &(s, e) in &self.0 {
            match merged.last_mut() {
                Some((_, last_end)) if s <= last_end.saturating_add(1) => {
                    *last_end = (*last_end).max(e);
                }
                _ => merged.push((s, e)),
            }
        }
        self.0 = merged;
    }

    pub fn contains(&self, index: u64) -> bool {
        let pos = self.0.partition_point(|&(_, e)| e < index);
        self.0.get(pos).is_some_and(|&(s, _)| s <= index)
    }

    /// Number of selected indices
    pub fn len(&self) -> u64 {
        self.0.iter().map(|&(s, e)| e - s + 1).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Ascending iteration over the zero-based indices
    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        self.0.iter().flat_map(|&(s, e)| s..=e)
    }

    /// The selected pages that do not exist in a `page_count`-page document,
    /// as 1-based spans.
    pub fn beyond(&self, page_count: u32) -> Vec<PageSpan> {
        let count = u64::from(page_count);
        self.0
            .iter()
            .filter(|&&(_, e)| e >= count)
            .map(|&(s, e)| PageSpan::new(s.max(count) + 1, e + 1))
            .collect()
    }
}

impl FromIterator<u32> for PageIndexSet {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        let mut set = PageIndexSet::new();
        for index in iter {
            set.insert_span(u64::from(index), u64::from(index));
        }
        set
    }
}

/// Parse a range expression like "1, 3, 5-8" into zero-based page indices.
///
/// Page numbers are 1-based. Spans may be written in either order ("8-5" is
/// the same as "5-8"), empty tokens are skipped, and an empty expression
/// selects nothing. Any malformed token fails the whole parse. Bounds are not
/// checked here; the page count is only known once a document is loaded.
pub fn parse_page_ranges(s: &str) -> Result<PageIndexSet> {
    let mut indices = PageIndexSet::new();

    for token in s.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        if let Some((start_str, end_str)) = token.split_once('-') {
            let mut start = parse_page_number(start_str, token)?;
            let mut end = parse_page_number(end_str, token)?;
            if start > end {
                std::mem::swap(&mut start, &mut end);
            }
            indices.insert_span(start - 1, end - 1);
        } else {
            let page = parse_page_number(token, token)?;
            indices.insert_span(page - 1, page - 1);
        }
    }

    Ok(indices)
}

/// Parse a 1-based insertion position.
pub fn parse_position(s: &str) -> Result<u64> {
    let s = s.trim();
    if s.is_empty() {
        return Err(EditError::InputRequired("Insert position"));
    }
    parse_number(s, s, "expected a whole number")
}

fn parse_page_number(s: &str, token: &str) -> Result<u64> {
    let s = s.trim();
    if s.is_empty() {
        return Err(EditError::format(token, "missing page number"));
    }
    match parse_number(s, token, "expected a page number")? {
        0 => Err(EditError::format(token, "page numbers start at 1")),
        n => Ok(n),
    }
}

fn parse_number(s: &str, token: &str, reason: &'static str) -> Result<u64> {
    s.parse::<u64>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow => EditError::format(token, "number is too large"),
        _ => EditError::format(token, reason),
    })
}
