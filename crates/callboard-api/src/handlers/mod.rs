//! HTTP handlers, one module per dashboard page

pub mod billing;
pub mod calls;
pub mod dashboard;
pub mod health;
pub mod messages;
pub mod templates;

use callboard_core::filter::{Facets, ViewFilter};

/// Build a page filter from the raw `q` parameter and facet selectors.
///
/// Absent selectors leave the facet at "all".
pub(crate) fn build_filter<F: Facets + Default>(
    query: Option<&str>,
    selections: &[(&str, Option<&str>)],
) -> ViewFilter<F> {
    let mut filter = ViewFilter::new(query.unwrap_or_default(), F::default());
    for (facet, value) in selections {
        if let Some(value) = value {
            filter.select(facet, value);
        }
    }
    filter
}
