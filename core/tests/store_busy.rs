mod common;

use common::{store_with, task, wait_until, Call, ScriptedGateway};
use taskdeck_core::api::{AddResult, BusyOp, MutationResult, RefreshResult};

#[tokio::test]
async fn second_add_is_rejected_while_first_is_in_flight() {
    let gw = ScriptedGateway::new();
    let (store, _) = store_with(&gw);
    gw.hold();

    let first = tokio::spawn({
        let store = store.clone();
        async move { store.add("first").await }
    });
    wait_until(|| {
        let store = store.clone();
        async move { store.is_adding().await }
    })
    .await;

    assert_eq!(store.add("second").await, AddResult::Rejected);

    gw.release(1);
    let first = first.await.expect("join");
    assert!(matches!(first, AddResult::Synced(_)));
    assert!(!store.is_adding().await);

    let titles: Vec<String> = store.tasks().await.into_iter().map(|t| t.title).collect();
    assert_eq!(titles, vec!["first"]);
    assert_eq!(gw.calls(), vec![Call::Create("first".into())]);

    // Once resolved, adds are accepted again.
    gw.release(1);
    assert!(matches!(store.add("second").await, AddResult::Synced(_)));
}

#[tokio::test]
async fn busy_is_tracked_per_task_for_concurrent_mutations() {
    let gw = ScriptedGateway::with_tasks(vec![
        task("1", "Buy milk", false),
        task("2", "Eggs", false),
        task("3", "Bread", false),
    ]);
    let (store, _) = store_with(&gw);
    assert_eq!(store.refresh().await, RefreshResult::Loaded(3));
    gw.hold();

    let toggle = tokio::spawn({
        let store = store.clone();
        async move { store.toggle("1", true).await }
    });
    let delete = tokio::spawn({
        let store = store.clone();
        async move { store.delete("2").await }
    });
    wait_until(|| {
        let store = store.clone();
        async move { store.is_busy("1").await && store.is_busy("2").await }
    })
    .await;

    // Both in-flight tasks are tracked, each with its own operation.
    assert_eq!(store.busy_op("1").await, Some(BusyOp::Toggling));
    assert_eq!(store.busy_op("2").await, Some(BusyOp::Deleting));
    assert_eq!(store.busy_op("3").await, None);
    assert_eq!(store.snapshot().await.busy.len(), 2);

    gw.release(2);
    assert_eq!(toggle.await.expect("join"), MutationResult::Synced);
    assert_eq!(delete.await.expect("join"), MutationResult::Synced);

    assert!(store.snapshot().await.busy.is_empty());
    let tasks = store.tasks().await;
    assert_eq!(tasks.len(), 2);
    assert!(tasks.iter().any(|t| t.id == "1" && t.completed));
    assert!(tasks.iter().all(|t| t.id != "2"));
}

#[tokio::test]
async fn mutation_on_busy_task_is_skipped() {
    let gw = ScriptedGateway::with_tasks(vec![task("1", "Buy milk", false)]);
    let (store, _) = store_with(&gw);
    store.refresh().await;
    gw.hold();

    let toggle = tokio::spawn({
        let store = store.clone();
        async move { store.toggle("1", true).await }
    });
    wait_until(|| {
        let store = store.clone();
        async move { store.is_busy("1").await }
    })
    .await;

    assert_eq!(store.delete("1").await, MutationResult::Skipped);
    assert_eq!(store.toggle("1", false).await, MutationResult::Skipped);

    gw.release(1);
    assert_eq!(toggle.await.expect("join"), MutationResult::Synced);
    assert_eq!(store.tasks().await, vec![task("1", "Buy milk", true)]);
    assert_eq!(
        gw.calls(),
        vec![
            Call::List,
            Call::Update(
                "1".into(),
                taskdeck_core::api::TaskPatch::completed(true)
            )
        ]
    );
}

#[tokio::test]
async fn loading_flag_is_set_while_refresh_is_in_flight() {
    let gw = ScriptedGateway::with_tasks(vec![task("1", "Buy milk", false)]);
    let (store, _) = store_with(&gw);
    gw.hold();

    let refresh = tokio::spawn({
        let store = store.clone();
        async move { store.refresh().await }
    });
    wait_until(|| {
        let store = store.clone();
        async move { store.is_loading().await }
    })
    .await;
    assert!(store.tasks().await.is_empty());

    gw.release(1);
    assert_eq!(refresh.await.expect("join"), RefreshResult::Loaded(1));
    assert!(!store.is_loading().await);
}

#[tokio::test]
async fn add_and_toggle_can_overlap() {
    let gw = ScriptedGateway::with_tasks(vec![task("1", "Buy milk", false)]);
    let (store, _) = store_with(&gw);
    store.refresh().await;
    gw.hold();

    let add = tokio::spawn({
        let store = store.clone();
        async move { store.add("Eggs").await }
    });
    let toggle = tokio::spawn({
        let store = store.clone();
        async move { store.toggle("1", true).await }
    });
    wait_until(|| {
        let store = store.clone();
        async move { store.is_adding().await && store.is_busy("1").await }
    })
    .await;

    gw.release(2);
    assert!(matches!(add.await.expect("join"), AddResult::Synced(_)));
    assert_eq!(toggle.await.expect("join"), MutationResult::Synced);

    let tasks = store.tasks().await;
    assert_eq!(tasks[0].title, "Eggs");
    assert!(tasks[1].completed);
}
