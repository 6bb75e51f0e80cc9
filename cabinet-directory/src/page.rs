use serde::{Deserialize, Serialize};

/// Pagination request. Pages are zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pageable {
    #[serde(default)]
    pub page: u64,
    #[serde(default = "default_page_size")]
    pub size: u64,
}

fn default_page_size() -> u64 {
    20
}

impl Default for Pageable {
    fn default() -> Self {
        Self {
            page: 0,
            size: default_page_size(),
        }
    }
}

impl Pageable {
    pub fn new(page: u64, size: u64) -> Self {
        Self { page, size }
    }

    pub fn offset(&self) -> u64 {
        self.page.saturating_mul(self.size)
    }
}

/// A page of results with pagination metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: u64,
    pub size: u64,
    pub total_elements: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, pageable: &Pageable, total_elements: u64) -> Self {
        let total_pages = if pageable.size == 0 {
            0
        } else {
            total_elements.div_ceil(pageable.size)
        };
        Self {
            content,
            page: pageable.page,
            size: pageable.size,
            total_elements,
            total_pages,
        }
    }

    /// Cut the requested page out of the full result set.
    pub fn slice(items: Vec<T>, pageable: &Pageable) -> Self {
        let total = items.len() as u64;
        let offset = usize::try_from(pageable.offset()).unwrap_or(usize::MAX);
        let size = usize::try_from(pageable.size).unwrap_or(usize::MAX);
        let content = items.into_iter().skip(offset).take(size).collect();
        Self::new(content, pageable, total)
    }

    pub fn is_last(&self) -> bool {
        self.page.saturating_add(1) >= self.total_pages
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slicing() {
        let page = Page::slice((1..=45).collect::<Vec<u32>>(), &Pageable::new(2, 20));
        assert_eq!(page.content, (41..=45).collect::<Vec<_>>());
        assert_eq!(page.total_elements, 45);
        assert_eq!(page.total_pages, 3);
        assert!(page.is_last());
    }

    #[test]
    fn out_of_range_page_is_empty() {
        let page = Page::slice(vec![1, 2, 3], &Pageable::new(5, 2));
        assert!(page.content.is_empty());
        assert_eq!(page.total_pages, 2);
    }

    #[test]
    fn huge_page_number_from_json() {
        let pageable: Pageable =
            serde_json::from_str(r#"{"page": 18446744073709551615, "size": 5}"#).unwrap();
        let page = Page::slice(vec![1, 2, 3], &pageable);
        assert!(page.content.is_empty());
        assert!(page.is_last());
    }

    #[test]
    fn zero_size() {
        let page = Page::slice(vec![1, 2, 3], &Pageable::new(0, 0));
        assert!(page.content.is_empty());
        assert_eq!(page.total_pages, 0);
    }

    #[test]
    fn serialized_shape() {
        let page = Page::slice(vec!["a"], &Pageable::default()).map(str::to_uppercase);
        let value = serde_json::to_value(&page).unwrap();
        assert_eq!(value["content"][0], "A");
        assert_eq!(value["totalElements"], 1);
        assert_eq!(value["totalPages"], 1);
    }

    #[test]
    fn pageable_defaults_from_json() {
        let pageable: Pageable = serde_json::from_str(r#"{"page": 3}"#).unwrap();
        assert_eq!(pageable, Pageable::new(3, 20));
        assert_eq!(pageable.offset(), 60);
    }
}
