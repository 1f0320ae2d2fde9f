//! Domain-specific assertion macros for quarry harnesses.
//!
//! These wrap `pretty_assertions` and add context-rich failure messages that
//! make it clear *which* query produced the unexpected result set.

/// Assert that a result set holds exactly the given titles, in order.
///
/// ```rust
/// assert_titles!(results, ["My Fruit Post"]);
/// ```
#[macro_export]
macro_rules! assert_titles {
    ($results:expr, [$($title:expr),* $(,)?]) => {{
        let results = &$results;
        let actual: Vec<&str> = results
            .iter()
            .map(|d| d.title.as_deref().unwrap_or("<untitled>"))
            .collect();
        let expected: Vec<&str> = vec![$($title),*];
        pretty_assertions::assert_eq!(actual, expected);
    }};
}

/// Assert that a result set holds exactly the given ids, in order.
#[macro_export]
macro_rules! assert_ids {
    ($results:expr, [$($id:expr),* $(,)?]) => {{
        let results = &$results;
        let actual: Vec<&str> = results.iter().map(|d| d.id.as_str()).collect();
        let expected: Vec<&str> = vec![$($id),*];
        pretty_assertions::assert_eq!(actual, expected);
    }};
}

/// Assert that every entry in a result set satisfies a predicate.
///
/// ```rust
/// assert_results_all!(results, |d: &quarry::Document| d.body.is_some());
/// ```
#[macro_export]
macro_rules! assert_results_all {
    ($results:expr, $pred:expr) => {{
        let results: &[&quarry::Document] = &$results;
        let pred = $pred;
        let failing: Vec<_> = results.iter().filter(|d| !pred(**d)).collect();
        if !failing.is_empty() {
            panic!(
                "assert_results_all! failed: {} of {} documents did not satisfy predicate.\n  first: {:?}",
                failing.len(),
                results.len(),
                failing[0]
            );
        }
    }};
}
