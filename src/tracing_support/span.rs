//! Span constructors shared by controllers.

use tracing::Span;

use crate::types::QueryParams;

/// Span wrapping one list fetch.
pub fn fetch_span(resource: &'static str, query: &QueryParams, generation: u64) -> Span {
    tracing::info_span!(
        "list.fetch",
        resource,
        page = query.page,
        page_size = query.page_size,
        search = query.search().unwrap_or_default(),
        generation,
    )
}

/// Span wrapping one write (`create`, `update`, `delete`, `activate`, `deactivate`).
pub fn write_span(resource: &'static str, operation: &'static str, id: Option<&str>) -> Span {
    tracing::info_span!("list.write", resource, operation, id = id.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spans_construct_without_subscriber() {
        let span = fetch_span("produtos", &QueryParams::new().with_search("filtro"), 3);
        let _entered = span.enter();
        let span = write_span("produtos", "delete", Some("7"));
        let _entered = span.enter();
    }
}
