/// How a query is compared against item text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseMatching {
    /// Literal containment (project identifiers)
    Sensitive,
    /// Containment after lower-casing both sides (service names)
    Insensitive,
}

/// Check whether `text` contains `query` as a substring
///
/// An empty query matches everything.
pub fn matches(text: &str, query: &str, case: CaseMatching) -> bool {
    if query.is_empty() {
        return true;
    }

    match case {
        CaseMatching::Sensitive => text.contains(query),
        CaseMatching::Insensitive => text.to_lowercase().contains(&query.to_lowercase()),
    }
}

/// Keep every item whose extracted text contains `query`, preserving input order
///
/// # Examples
///
/// ```
/// use gcp_shortcuts::filters::{CaseMatching, filter_items};
///
/// let names = vec!["Storage", "storage", "STORE", "Pub/Sub"];
/// let hits = filter_items(names, "STO", |n| *n, CaseMatching::Insensitive);
/// assert_eq!(hits, vec!["Storage", "storage", "STORE"]);
/// ```
pub fn filter_items<T, I, F>(items: I, query: &str, extract: F, case: CaseMatching) -> Vec<T>
where
    I: IntoIterator<Item = T>,
    F: Fn(&T) -> &str,
{
    if query.is_empty() {
        return items.into_iter().collect();
    }

    match case {
        CaseMatching::Sensitive => {
            items.into_iter().filter(|item| matches(extract(item), query, case)).collect()
        }
        CaseMatching::Insensitive => {
            // Lower-case the query once instead of per item
            let lower_query = query.to_lowercase();
            items
                .into_iter()
                .filter(|item| extract(item).to_lowercase().contains(&lower_query))
                .collect()
        }
    }
}
