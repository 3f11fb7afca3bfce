use serde::{Deserialize, Serialize};

/// Envelope wrapping every list response.
///
/// `count` is the total number of objects matching the query, which may exceed
/// `results.len()` when the controller pages. `next` is an opaque cursor that is
/// only present when further pages exist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection<T> {
    pub count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    pub results: Vec<T>,
}

impl<T> Collection<T> {
    /// A single, final page holding every result.
    pub fn complete(results: Vec<T>) -> Self {
        Self { count: results.len() as u64, next: None, results }
    }

    pub fn has_more(&self) -> bool {
        self.next.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.results.iter()
    }

    pub fn into_results(self) -> Vec<T> {
        self.results
    }

    /// Applies `f` to every result, keeping the envelope.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Collection<U> {
        Collection {
            count: self.count,
            next: self.next,
            results: self.results.into_iter().map(f).collect(),
        }
    }
}

impl<T> IntoIterator for Collection<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Collection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete_page_has_no_cursor() {
        let page = Collection::complete(vec![1, 2, 3]);
        assert_eq!(page.count, 3);
        assert!(!page.has_more());
        assert_eq!(page.len(), 3);
    }

    #[test]
    fn map_keeps_envelope() {
        let page = Collection { count: 10, next: Some("page=2".into()), results: vec![1, 2] };
        let mapped = page.map(|n| n * 10);
        assert_eq!(mapped.count, 10);
        assert_eq!(mapped.next.as_deref(), Some("page=2"));
        assert_eq!(mapped.results, vec![10, 20]);
    }
}
