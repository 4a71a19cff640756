use super::errors::DomainError;

pub const DEFAULT_LIMIT: u64 = 10;
/// Largest page a single listing call returns
pub const MAX_LIMIT: u64 = 100;
pub const DEFAULT_SORT: &str = "created_at DESC";

/// Pagination and ordering for list queries.
///
/// Raw values coming from adapters may be zero or empty; call
/// [`ListParams::normalized`] before handing them to a repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListParams {
    pub sort: String,
    pub limit: i64,
    pub page: i64,
}

impl ListParams {
    pub fn new(sort: impl Into<String>, limit: i64, page: i64) -> Self {
        Self {
            sort: sort.into(),
            limit,
            page,
        }
    }

    /// `limit <= 0 -> 10`, `limit > 100 -> 100`, `sort == "" -> "created_at DESC"`,
    /// `page <= 0 -> 1`
    pub fn normalized(self) -> Self {
        let sort = if self.sort.trim().is_empty() {
            DEFAULT_SORT.to_string()
        } else {
            self.sort
        };
        Self {
            sort,
            limit: if self.limit <= 0 {
                DEFAULT_LIMIT as i64
            } else {
                self.limit.min(MAX_LIMIT as i64)
            },
            page: if self.page <= 0 { 1 } else { self.page },
        }
    }

    /// Rows to skip. Saturates, so an absurd page number yields an empty
    /// page rather than an overflow.
    pub fn offset(&self) -> u64 {
        (self.page.max(1) - 1).saturating_mul(self.limit.max(0)) as u64
    }

    pub fn page_size(&self) -> u64 {
        self.limit.max(0) as u64
    }
}

impl Default for ListParams {
    fn default() -> Self {
        Self::new(DEFAULT_SORT, DEFAULT_LIMIT as i64, 1)
    }
}

/// A parsed `"<field> [ASC|DESC]"` sort expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    pub field: String,
    pub descending: bool,
}

impl Sort {
    pub fn parse(expr: &str) -> Result<Self, DomainError> {
        let mut parts = expr.split_whitespace();
        let field = parts
            .next()
            .ok_or_else(|| DomainError::BadParameter("empty sort expression".to_string()))?;

        if !field
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(DomainError::BadParameter(format!(
                "invalid sort field: {}",
                field
            )));
        }

        let descending = match parts.next().map(|d| d.to_ascii_uppercase()) {
            None => false,
            Some(d) if d == "ASC" => false,
            Some(d) if d == "DESC" => true,
            Some(d) => {
                return Err(DomainError::BadParameter(format!(
                    "invalid sort direction: {}",
                    d
                )))
            }
        };

        if parts.next().is_some() {
            return Err(DomainError::BadParameter(format!(
                "invalid sort expression: {}",
                expr
            )));
        }

        Ok(Self {
            field: field.to_ascii_lowercase(),
            descending,
        })
    }
}

/// Paginated response wrapper
#[derive(Debug, Clone)]
pub struct PaginatedResult<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
}

impl<T> PaginatedResult<T> {
    pub fn new(items: Vec<T>, total: u64, page: u64, limit: u64) -> Self {
        let total_pages = if limit == 0 {
            0
        } else {
            total.div_ceil(limit)
        };
        Self {
            items,
            total,
            page,
            limit,
            total_pages,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PaginatedResult<U> {
        PaginatedResult {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            limit: self.limit,
            total_pages: self.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_defaults() {
        let p = ListParams::new("", 0, 0).normalized();
        assert_eq!(p.sort, "created_at DESC");
        assert_eq!(p.limit, 10);
        assert_eq!(p.page, 1);
        assert_eq!(p.offset(), 0);
    }

    #[test]
    fn keeps_caller_values() {
        let p = ListParams::new("name ASC", 25, 3).normalized();
        assert_eq!(p.sort, "name ASC");
        assert_eq!(p.limit, 25);
        assert_eq!(p.offset(), 50);
    }

    #[test]
    fn huge_limit_is_capped() {
        let p = ListParams::new("", i64::MAX, 1).normalized();
        assert_eq!(p.limit, MAX_LIMIT as i64);
        assert_eq!(p.page_size(), MAX_LIMIT);
    }

    #[test]
    fn huge_page_saturates_offset() {
        let p = ListParams::new("", 10, i64::MAX).normalized();
        assert_eq!(p.offset(), i64::MAX as u64);

        let p = ListParams::new("", i64::MAX, i64::MAX);
        assert_eq!(p.offset(), i64::MAX as u64);
    }

    #[test]
    fn negative_values_normalize() {
        let p = ListParams::new("  ", -4, -1).normalized();
        assert_eq!(p.limit, 10);
        assert_eq!(p.page, 1);
        assert_eq!(p.sort, DEFAULT_SORT);
    }

    #[test]
    fn parses_sort_expressions() {
        assert_eq!(
            Sort::parse("created_at DESC").unwrap(),
            Sort {
                field: "created_at".into(),
                descending: true
            }
        );
        assert!(!Sort::parse("name").unwrap().descending);
        assert!(!Sort::parse("Name asc").unwrap().descending);
    }

    #[test]
    fn rejects_injection_in_sort() {
        assert!(matches!(
            Sort::parse("name; DROP TABLE stores"),
            Err(DomainError::BadParameter(_))
        ));
        assert!(Sort::parse("name sideways").is_err());
        assert!(Sort::parse("name ASC extra").is_err());
        assert!(Sort::parse("").is_err());
    }

    #[test]
    fn total_pages_rounds_up() {
        let r = PaginatedResult::new(vec![1, 2, 3], 21, 1, 10);
        assert_eq!(r.total_pages, 3);
        let empty: PaginatedResult<i32> = PaginatedResult::new(vec![], 0, 1, 10);
        assert_eq!(empty.total_pages, 0);
    }
}
