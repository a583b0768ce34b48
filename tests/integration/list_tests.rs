//! List behaviour through the public client: paging, search, sort, filters.

use std::collections::HashSet;

use shopdesk::resources::CardBrand;
use shopdesk::{ErrorKind, QueryParams, SortDirection};

use crate::common::{client_with, twelve_brands};

#[tokio::test]
async fn test_twelve_records_two_pages() {
    let client = client_with(twelve_brands()).unwrap();
    let list = client.resource::<CardBrand>().list_controller();

    let first = list.load().await.unwrap();
    assert_eq!(first.len(), 10);
    assert_eq!(first.info.total_pages, 2);
    assert!(first.info.has_next_page);
    assert!(!first.info.has_previous_page);

    let second = list.next_page().await.unwrap();
    assert_eq!(second.len(), 2);
    assert!(!second.info.has_next_page);
    assert!(second.info.has_previous_page);

    let state = list.state();
    assert_eq!(state.query.page, 2);
    assert_eq!(state.items().len(), 2);
    assert!(!state.loading);
}

#[tokio::test]
async fn test_search_visa_returns_one() {
    let client = client_with(twelve_brands()).unwrap();
    let list = client.resource::<CardBrand>().list_controller();

    let page = list.set_search_text("visa").await.unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page.items[0].descricao, "Visa");
}

#[tokio::test]
async fn test_inactive_filter_counts_three() {
    let client = client_with(twelve_brands()).unwrap();
    let list = client.resource::<CardBrand>().list_controller();

    let page = list.set_status_filter("Inativo").await.unwrap();
    assert_eq!(page.info.total_items, 3);

    // Legacy spelling and the "all" sentinel.
    let page = list.set_status_filter("INATIVO").await.unwrap();
    assert_eq!(page.info.total_items, 3);
    let page = list.set_status_filter("todos").await.unwrap();
    assert_eq!(page.info.total_items, 12);
}

#[tokio::test]
async fn test_search_round_trip_restores_first_page() {
    let client = client_with(twelve_brands()).unwrap();
    let list = client.resource::<CardBrand>().list_controller();

    let unfiltered = list.load().await.unwrap();
    list.next_page().await.unwrap();
    list.set_search_text("card").await.unwrap();
    let restored = list.set_search_text("").await.unwrap();

    assert_eq!(restored, unfiltered);
    assert_eq!(list.query(), QueryParams::new());
}

#[tokio::test]
async fn test_same_query_twice_is_identical() {
    let client = client_with(twelve_brands()).unwrap();
    let brands = client.resource::<CardBrand>();

    let a = brands.list().search("er").sort("descricao", SortDirection::Desc).await.unwrap();
    let b = brands.list().search("er").sort("descricao", SortDirection::Desc).await.unwrap();
    assert_eq!(a, b);
}

#[tokio::test]
async fn test_pages_cover_the_collection() {
    let client = client_with(twelve_brands()).unwrap();
    let list = client.resource::<CardBrand>().list_controller();

    list.set_page_size(20).await.unwrap();
    let everything = list.set_sort("descricao").await.unwrap();
    assert_eq!(everything.len(), 12);

    let mut seen = Vec::new();
    let mut page = list.set_page_size(10).await.unwrap();
    seen.extend(page.items.iter().map(|b| b.id));
    while page.info.has_next_page {
        page = list.next_page().await.unwrap();
        seen.extend(page.items.iter().map(|b| b.id));
    }

    let expected: Vec<u64> = everything.items.iter().map(|b| b.id).collect();
    assert_eq!(seen, expected);
    assert_eq!(seen.iter().collect::<HashSet<_>>().len(), 12);
}

#[tokio::test]
async fn test_new_column_starts_ascending() {
    let client = client_with(twelve_brands()).unwrap();
    let list = client.resource::<CardBrand>().list_controller();

    list.set_sort("descricao").await.unwrap();
    let desc = list.set_sort("descricao").await.unwrap();
    assert_eq!(list.query().sort_direction, SortDirection::Desc);
    assert_eq!(desc.items[0].descricao, "Visa");

    let by_id = list.set_sort("id").await.unwrap();
    assert_eq!(list.query().sort_direction, SortDirection::Asc);
    assert_eq!(by_id.items[0].id, 1);

    let err = list.set_sort("acoes").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
}

#[tokio::test]
async fn test_page_past_the_end_is_clamped() {
    let client = client_with(twelve_brands()).unwrap();
    let list = client.resource::<CardBrand>().list_controller();

    let page = list.set_page(7).await.unwrap();
    assert_eq!(page.info.current_page, 2);
    assert_eq!(page.len(), 2);
    assert_eq!(list.query().page, 2);

    // The one-off request reports the empty page as is.
    let raw = client.resource::<CardBrand>().list().page(7).await.unwrap();
    assert!(raw.is_empty());
    assert!(!raw.info.has_next_page);
}
