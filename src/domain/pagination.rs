//! Page requests, sorting and paged results
//!
//! A [`PageRequest`] is a zero-based page index plus a page size; the row
//! offset is derived from the two. [`Page`] carries one window of results
//! together with the total number of matching rows.

use std::str::FromStr;

use serde::Serialize;

use super::DomainError;

/// Page size used when the caller does not ask for one
pub const DEFAULT_PAGE_SIZE: u64 = 20;

/// Largest page size a caller may request
pub const MAX_PAGE_SIZE: u64 = 2000;

/// Largest row offset or page size a SQL statement can carry (`i64::MAX`)
pub const MAX_ROW_OFFSET: u64 = i64::MAX as u64;

/// Page size limits applied when binding request parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageDefaults {
    pub default_size: u64,
    pub max_size: u64,
}

impl Default for PageDefaults {
    fn default() -> Self {
        Self {
            default_size: DEFAULT_PAGE_SIZE,
            max_size: MAX_PAGE_SIZE,
        }
    }
}

/// Properties of the member/team projection a page can be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortProperty {
    MemberId,
    Username,
    Age,
    TeamId,
    TeamName,
}

impl FromStr for SortProperty {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "memberId" => Ok(SortProperty::MemberId),
            "username" => Ok(SortProperty::Username),
            "age" => Ok(SortProperty::Age),
            "teamId" => Ok(SortProperty::TeamId),
            "teamName" => Ok(SortProperty::TeamName),
            other => Err(DomainError::Validation(format!(
                "unknown sort property '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

/// Single-property ordering, parsed from `property[,asc|desc]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    pub property: SortProperty,
    pub direction: Direction,
}

impl Sort {
    pub fn asc(property: SortProperty) -> Self {
        Self {
            property,
            direction: Direction::Asc,
        }
    }

    pub fn desc(property: SortProperty) -> Self {
        Self {
            property,
            direction: Direction::Desc,
        }
    }
}

impl FromStr for Sort {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(',').map(str::trim);
        let property = parts.next().unwrap_or_default().parse()?;

        let direction = match parts.next() {
            None => Direction::Asc,
            Some(d) if d.eq_ignore_ascii_case("asc") => Direction::Asc,
            Some(d) if d.eq_ignore_ascii_case("desc") => Direction::Desc,
            Some(d) => {
                return Err(DomainError::Validation(format!(
                    "unknown sort direction '{}'",
                    d
                )));
            }
        };

        if parts.next().is_some() {
            return Err(DomainError::Validation(format!(
                "malformed sort '{}', expected property[,asc|desc]",
                s
            )));
        }

        Ok(Self {
            property,
            direction,
        })
    }
}

/// Requested result window: zero-based page index, page size and optional sort
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    number: u64,
    size: u64,
    sort: Option<Sort>,
}

impl PageRequest {
    /// Page `number` of `size` rows. A size of zero is raised to one.
    pub fn of(number: u64, size: u64) -> Self {
        Self {
            number,
            size: size.clamp(1, MAX_ROW_OFFSET),
            sort: None,
        }
    }

    pub fn with_sort(mut self, sort: Sort) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn number(&self) -> u64 {
        self.number
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn sort(&self) -> Option<Sort> {
        self.sort
    }

    /// Row offset of the first element of this page, capped at [`MAX_ROW_OFFSET`]
    pub fn offset(&self) -> u64 {
        self.number.saturating_mul(self.size).min(MAX_ROW_OFFSET)
    }
}

/// One window of a larger result set
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    pub total_pages: u64,
    pub size: u64,
    pub number: u64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: &PageRequest, total_elements: u64) -> Self {
        Self {
            content,
            total_elements,
            total_pages: total_elements.div_ceil(request.size()),
            size: request.size(),
            number: request.number(),
        }
    }

    pub fn has_next(&self) -> bool {
        self.number.saturating_add(1) < self.total_pages
    }
}

/// Total row count implied by a content page, when the page alone proves it.
///
/// A short page (fewer rows than requested) is the last page, so the total is
/// its offset plus its length. An empty page past offset zero proves nothing
/// and needs a count query.
pub fn known_total(request: &PageRequest, content_len: usize) -> Option<u64> {
    let len = content_len as u64;
    if len >= request.size() {
        return None;
    }

    let offset = request.offset();
    if offset == 0 {
        return Some(len);
    }
    if len == 0 {
        return None;
    }

    Some(offset.saturating_add(len))
}
