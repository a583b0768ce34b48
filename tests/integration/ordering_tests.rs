//! Last-issued-wins ordering of list fetches.
//!
//! The in-memory transport's latency hook makes page 1 slower than page 2,
//! so the older request always completes last. Time is paused, so the
//! sleeps resolve instantly and deterministically.

use std::time::Duration;

use shopdesk::resources::CardBrand;
use shopdesk::{Error, ErrorKind, QueryParams};

use crate::common::{brand_transport, client_with, twelve_brands};

fn slow_first_page(query: &QueryParams) -> Duration {
    if query.page == 1 {
        Duration::from_millis(200)
    } else {
        Duration::from_millis(50)
    }
}

#[tokio::test(start_paused = true)]
async fn test_superseded_fetch_never_applied() {
    let client = client_with(twelve_brands()).unwrap();
    brand_transport(&client).unwrap().set_latency_fn(slow_first_page);
    let list = client.resource::<CardBrand>().list_controller();

    let mut states = list.subscribe();
    let watcher = tokio::spawn(async move {
        let mut applied_pages = Vec::new();
        while states.changed().await.is_ok() {
            if let Some(page) = states.borrow_and_update().page.as_ref() {
                applied_pages.push(page.info.current_page);
            }
        }
        applied_pages
    });

    let first = tokio::spawn({
        let list = list.clone();
        async move { list.load().await }
    });
    tokio::task::yield_now().await;

    let second = list.set_page(2).await.unwrap();
    assert_eq!(second.info.current_page, 2);

    let err = first.await.unwrap().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Cancelled);
    assert!(err.is_silent());

    let state = list.state();
    assert_eq!(state.page.map(|p| p.info.current_page), Some(2));
    assert_eq!(state.error, None);

    let stats = list.stats().snapshot();
    assert_eq!(stats.applied, 1);
    assert_eq!(stats.superseded, 1);

    drop(list);
    drop(client);
    let applied_pages = watcher.await.unwrap();
    assert!(applied_pages.iter().all(|page| *page == 2));
}

#[tokio::test(start_paused = true)]
async fn test_stale_result_ignored_when_backend_cannot_abort() {
    let client = client_with(twelve_brands()).unwrap();
    let transport = brand_transport(&client).unwrap();
    transport.set_latency_fn(slow_first_page);
    transport.set_honor_cancellation(false);
    let list = client.resource::<CardBrand>().list_controller();

    let first = tokio::spawn({
        let list = list.clone();
        async move { list.load().await }
    });
    tokio::task::yield_now().await;

    list.set_page(2).await.unwrap();

    // Page 1 still completes at the backend, 150ms after page 2 was applied.
    let err = first.await.unwrap().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Cancelled);
    assert_eq!(transport.request_count(), 2);
    assert_eq!(list.state().page.map(|p| p.info.current_page), Some(2));
}

#[tokio::test(start_paused = true)]
async fn test_latest_failure_wins_over_older_success() {
    let client = client_with(twelve_brands()).unwrap();
    let transport = brand_transport(&client).unwrap();
    transport.set_latency_fn(slow_first_page);
    transport.set_honor_cancellation(false);
    let list = client.resource::<CardBrand>().list_controller();

    let first = tokio::spawn({
        let list = list.clone();
        async move { list.load().await }
    });
    tokio::task::yield_now().await;

    transport.set_failure(Error::unavailable("backend restarting"));
    let err = list.set_page(2).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unavailable);

    assert!(first.await.unwrap().is_err());
    let state = list.state();
    assert!(state.page.is_none());
    assert!(!state.loading);
    assert!(state.error.is_some_and(|message| message.contains("backend restarting")));
}

#[tokio::test(start_paused = true)]
async fn test_close_cancels_in_flight_fetch() {
    let client = client_with(twelve_brands()).unwrap();
    brand_transport(&client)
        .unwrap()
        .set_latency(Duration::from_millis(200));
    let list = client.resource::<CardBrand>().list_controller();

    let pending = tokio::spawn({
        let list = list.clone();
        async move { list.load().await }
    });
    tokio::task::yield_now().await;
    list.close();

    let err = pending.await.unwrap().unwrap_err();
    assert!(err.is_silent());
    assert!(list.state().page.is_none());

    let err = list.set_page(2).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Cancelled);
}

#[tokio::test(start_paused = true)]
async fn test_rapid_typing_applies_last_search() {
    let client = client_with(twelve_brands()).unwrap();
    brand_transport(&client)
        .unwrap()
        .set_latency(Duration::from_millis(100));
    let list = client.resource::<CardBrand>().list_controller();

    let mut typing = Vec::new();
    for text in ["c", "ca", "car", "card"] {
        let list = list.clone();
        typing.push(tokio::spawn(async move { list.set_search_text(text).await }));
        tokio::task::yield_now().await;
    }

    let mut results = Vec::new();
    for task in typing {
        results.push(task.await.unwrap());
    }
    let (applied, superseded): (Vec<_>, Vec<_>) = results.into_iter().partition(Result::is_ok);
    assert_eq!(applied.len(), 1);
    assert_eq!(superseded.len(), 3);

    let state = list.state();
    assert_eq!(state.query.search_text, "card");
    assert!(
        state
            .items()
            .iter()
            .all(|brand| brand.descricao.to_lowercase().contains("card"))
    );
}
