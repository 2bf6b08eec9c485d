// Listing query parameters: sorting by creation time and page-based pagination

use serde::Deserialize;

/// Default page when the query string omits it or it cannot be parsed
pub const DEFAULT_PAGE: u32 = 1;
/// Default page size when the query string omits it or it cannot be parsed
pub const DEFAULT_LIMIT: u32 = 10;

/// Raw query parameters extracted from GET /products
/// Kept as strings so malformed values fall back to defaults instead of rejecting the request
#[derive(Debug, Default, Deserialize)]
pub struct QueryParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub sort: Option<String>,
}

/// Ordering on the creation timestamp
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// "desc" sorts newest first; any other value (including none) sorts oldest first
    pub fn from_query(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "desc" => SortDirection::Desc,
            _ => SortDirection::Asc,
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Normalized listing request handed to the repositories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListQuery {
    /// 1-indexed page; 0 disables pagination
    pub page: u32,
    /// Page size; 0 disables pagination
    pub limit: u32,
    pub sort: SortDirection,
}

impl ListQuery {
    pub fn new(page: u32, limit: u32, sort: SortDirection) -> Self {
        Self { page, limit, sort }
    }

    /// Everything, oldest first
    pub fn all() -> Self {
        Self::new(0, 0, SortDirection::Asc)
    }

    /// Build from HTTP query parameters, applying the defaults
    pub fn from_params(params: QueryParams) -> Self {
        let page = Self::parse_number(params.page.as_deref(), DEFAULT_PAGE);
        let limit = Self::parse_number(params.limit.as_deref(), DEFAULT_LIMIT);
        let sort = params
            .sort
            .as_deref()
            .map(SortDirection::from_query)
            .unwrap_or_default();

        Self { page, limit, sort }
    }

    fn parse_number(value: Option<&str>, default: u32) -> u32 {
        value
            .and_then(|v| v.trim().parse::<u32>().ok())
            .unwrap_or(default)
    }

    /// Offset and length of the requested slice
    /// Returns None when either page or limit is zero, meaning the whole ordered set
    pub fn window(&self) -> Option<(u64, u64)> {
        if self.page == 0 || self.limit == 0 {
            return None;
        }
        let limit = u64::from(self.limit);
        let offset = u64::from(self.page - 1) * limit;
        Some((offset, limit))
    }

    /// Apply the window to an already ordered sequence
    /// Pages past the end yield an empty vector
    pub fn paginate<T>(&self, ordered: Vec<T>) -> Vec<T> {
        match self.window() {
            None => ordered,
            Some((offset, limit)) => {
                let offset = usize::try_from(offset).unwrap_or(usize::MAX);
                let limit = usize::try_from(limit).unwrap_or(usize::MAX);
                ordered.into_iter().skip(offset).take(limit).collect()
            }
        }
    }

    /// SQL tail (ORDER BY plus optional LIMIT/OFFSET) for a listing on `column`
    /// Rows equal on `column` are ordered by the unique `tiebreaker`, so pages never overlap
    /// LIMIT and OFFSET are inlined as integers, never user text
    pub fn sql_tail(&self, column: &str, tiebreaker: &str) -> String {
        let direction = self.sort.as_sql();
        let mut tail = format!(" ORDER BY {column} {direction}, {tiebreaker} {direction}");
        if let Some((offset, limit)) = self.window() {
            tail.push_str(&format!(" LIMIT {} OFFSET {}", limit, offset));
        }
        tail
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn params(page: Option<&str>, limit: Option<&str>, sort: Option<&str>) -> QueryParams {
        QueryParams {
            page: page.map(str::to_string),
            limit: limit.map(str::to_string),
            sort: sort.map(str::to_string),
        }
    }

    #[test]
    fn test_sort_direction_defaults_to_asc() {
        assert_eq!(SortDirection::from_query("asc"), SortDirection::Asc);
        assert_eq!(SortDirection::from_query("desc"), SortDirection::Desc);
        assert_eq!(SortDirection::from_query("DESC"), SortDirection::Desc);
        assert_eq!(SortDirection::from_query(""), SortDirection::Asc);
        assert_eq!(SortDirection::from_query("sideways"), SortDirection::Asc);
    }

    #[test]
    fn test_from_params_defaults() {
        let query = ListQuery::from_params(QueryParams::default());
        assert_eq!(query, ListQuery::new(1, 10, SortDirection::Asc));
    }

    #[test]
    fn test_from_params_unparseable_values_fall_back() {
        let query = ListQuery::from_params(params(Some("abc"), Some("-3"), Some("up")));
        assert_eq!(query, ListQuery::new(1, 10, SortDirection::Asc));
    }

    #[test]
    fn test_from_params_explicit_values() {
        let query = ListQuery::from_params(params(Some("3"), Some("25"), Some("desc")));
        assert_eq!(query, ListQuery::new(3, 25, SortDirection::Desc));
    }

    #[test]
    fn test_zero_disables_pagination() {
        assert_eq!(ListQuery::new(0, 10, SortDirection::Asc).window(), None);
        assert_eq!(ListQuery::new(2, 0, SortDirection::Asc).window(), None);
    }

    #[test]
    fn test_paginate_slices() {
        let items: Vec<u32> = (1..=23).collect();
        let page = |p| ListQuery::new(p, 10, SortDirection::Asc).paginate(items.clone());

        assert_eq!(page(1), (1..=10).collect::<Vec<_>>());
        assert_eq!(page(2), (11..=20).collect::<Vec<_>>());
        assert_eq!(page(3), vec![21, 22, 23]);
        assert!(page(4).is_empty());
        assert_eq!(ListQuery::all().paginate(items.clone()).len(), 23);
    }

    #[test]
    fn test_sql_tail() {
        assert_eq!(
            ListQuery::new(2, 10, SortDirection::Desc).sql_tail("created_at", "id"),
            " ORDER BY created_at DESC, id DESC LIMIT 10 OFFSET 10"
        );
        assert_eq!(
            ListQuery::all().sql_tail("created_at", "id"),
            " ORDER BY created_at ASC, id ASC"
        );
    }

    proptest! {
        #[test]
        fn prop_pages_partition_the_set(total in 0usize..200, limit in 1u32..30) {
            let items: Vec<usize> = (0..total).collect();
            let mut seen = Vec::new();
            let mut page = 1;
            loop {
                let slice = ListQuery::new(page, limit, SortDirection::Asc).paginate(items.clone());
                if slice.is_empty() {
                    break;
                }
                prop_assert!(slice.len() <= limit as usize);
                seen.extend(slice);
                page += 1;
            }
            prop_assert_eq!(seen, items);
        }
    }
}
