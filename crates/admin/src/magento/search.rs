//! `searchCriteria` query builder.
//!
//! Each filter goes into its own filter group, so filters are combined with
//! AND. The platform renders `like` conditions as SQL `LIKE`.

/// Comparison applied by a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    Eq,
    Like,
}

impl Condition {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Like => "like",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Filter {
    field: String,
    value: String,
    condition: Condition,
}

/// A list-endpoint query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchCriteria {
    filters: Vec<Filter>,
    page_size: Option<u32>,
    current_page: Option<u32>,
}

impl SearchCriteria {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for a single exact-match filter.
    #[must_use]
    pub fn eq(field: &str, value: &str) -> Self {
        Self::new().filter(field, value, Condition::Eq)
    }

    /// Shorthand for a single `LIKE` filter.
    #[must_use]
    pub fn like(field: &str, pattern: &str) -> Self {
        Self::new().filter(field, pattern, Condition::Like)
    }

    #[must_use]
    pub fn filter(mut self, field: &str, value: &str, condition: Condition) -> Self {
        self.filters.push(Filter {
            field: field.to_string(),
            value: value.to_string(),
            condition,
        });
        self
    }

    #[must_use]
    pub const fn page_size(mut self, size: u32) -> Self {
        self.page_size = Some(size);
        self
    }

    /// 1-based page to fetch.
    #[must_use]
    pub const fn current_page(mut self, page: u32) -> Self {
        self.current_page = Some(page);
        self
    }

    /// Flatten into query-string pairs.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(self.filters.len() * 3 + 2);
        for (group, filter) in self.filters.iter().enumerate() {
            let prefix = format!("searchCriteria[filter_groups][{group}][filters][0]");
            pairs.push((format!("{prefix}[field]"), filter.field.clone()));
            pairs.push((format!("{prefix}[value]"), filter.value.clone()));
            pairs.push((
                format!("{prefix}[condition_type]"),
                filter.condition.as_str().to_string(),
            ));
        }
        if let Some(size) = self.page_size {
            pairs.push(("searchCriteria[pageSize]".to_string(), size.to_string()));
        }
        if let Some(page) = self.current_page {
            pairs.push(("searchCriteria[currentPage]".to_string(), page.to_string()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_filter_pairs() {
        let pairs = SearchCriteria::like("sku", "TEST\\_%").query_pairs();
        assert_eq!(
            pairs,
            vec![
                (
                    "searchCriteria[filter_groups][0][filters][0][field]".to_string(),
                    "sku".to_string()
                ),
                (
                    "searchCriteria[filter_groups][0][filters][0][value]".to_string(),
                    "TEST\\_%".to_string()
                ),
                (
                    "searchCriteria[filter_groups][0][filters][0][condition_type]".to_string(),
                    "like".to_string()
                ),
            ]
        );
    }

    #[test]
    fn test_filters_get_separate_groups() {
        let pairs = SearchCriteria::eq("increment_id", "000000042")
            .filter("customer_email", "qa@storecheck.test", Condition::Eq)
            .page_size(1)
            .query_pairs();
        assert_eq!(pairs.len(), 7);
        assert!(pairs.iter().any(|(k, v)| {
            k == "searchCriteria[filter_groups][1][filters][0][field]" && v == "customer_email"
        }));
        assert_eq!(
            pairs.last(),
            Some(&("searchCriteria[pageSize]".to_string(), "1".to_string()))
        );
    }

    #[test]
    fn test_paging_pairs() {
        let pairs = SearchCriteria::like("email", "%@storecheck.test")
            .page_size(500)
            .current_page(3)
            .query_pairs();
        assert_eq!(
            pairs.get(3..),
            Some(
                &[
                    ("searchCriteria[pageSize]".to_string(), "500".to_string()),
                    ("searchCriteria[currentPage]".to_string(), "3".to_string()),
                ][..]
            )
        );
    }

    #[test]
    fn test_empty_criteria() {
        assert!(SearchCriteria::new().query_pairs().is_empty());
    }
}
