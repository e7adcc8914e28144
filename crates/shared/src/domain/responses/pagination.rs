use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, Clone, ToSchema, PartialEq, Eq)]
pub struct Pagination {
    pub page: i32,
    pub page_size: i32,
    pub total_items: i64,
    pub total_pages: i32,
}

impl Pagination {
    pub fn new(page: i32, page_size: i32, total_items: i64) -> Self {
        let page_size = page_size.max(1);
        let total_pages = ((total_items + page_size as i64 - 1) / page_size as i64) as i32;

        Self {
            page,
            page_size,
            total_items,
            total_pages,
        }
    }

    /// SQL `LIMIT`/`OFFSET` pair for a 1-based page.
    pub fn limit_offset(page: i32, page_size: i32) -> (i64, i64) {
        let limit = page_size.max(1) as i64;
        let offset = (page - 1).max(0) as i64 * limit;
        (limit, offset)
    }
}

#[cfg(test)]
mod tests {
    use super::Pagination;

    #[test]
    fn rounds_total_pages_up() {
        assert_eq!(Pagination::new(1, 10, 0).total_pages, 0);
        assert_eq!(Pagination::new(1, 10, 10).total_pages, 1);
        assert_eq!(Pagination::new(1, 10, 11).total_pages, 2);
    }

    #[test]
    fn offsets_are_one_based() {
        assert_eq!(Pagination::limit_offset(1, 20), (20, 0));
        assert_eq!(Pagination::limit_offset(3, 20), (20, 40));
        assert_eq!(Pagination::limit_offset(0, 20), (20, 0));
    }
}
