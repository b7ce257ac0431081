use tokio::task::yield_now;

use crate::{Scope, params, scope::spawn};

async fn pinned_worker(id: i64) {
    let _g = Scope::new().set("task.id", id).enter();
    for _ in 0..50 {
        yield_now().await;
        assert_eq!(params().key("task.id").i64_or(-1), id);
    }
}

#[tokio::test(flavor = "current_thread")]
async fn siblings_on_one_thread_never_interleave() {
    let a = spawn(pinned_worker(1));
    let b = spawn(pinned_worker(2));
    let c = spawn(pinned_worker(3));
    a.await.unwrap();
    b.await.unwrap();
    c.await.unwrap();
    assert_eq!(params().key("task.id").get(), None);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn scopes_travel_with_tasks_across_threads() {
    let handles: Vec<_> = (0..8).map(|i| spawn(pinned_worker(i))).collect();
    for joined in futures::future::join_all(handles).await {
        joined.unwrap();
    }
}

#[tokio::test(flavor = "current_thread")]
async fn spawned_task_inherits_a_snapshot() {
    let _g = Scope::new().set("inherit.x", 5).enter();

    let task = spawn(async { params().key("inherit.x").i64_or(0) });

    // Mutating after the branch point is invisible to the task.
    params().key("inherit.x").set(6);
    assert_eq!(task.await.unwrap(), 5);
    assert_eq!(params().key("inherit.x").i64_or(0), 6);
}

#[tokio::test(flavor = "current_thread")]
async fn task_overrides_never_leak_back() {
    let _g = Scope::new().set("leakback.x", 1).enter();

    let task = spawn(async {
        let _inner = Scope::new().set("leakback.x", 2).enter();
        yield_now().await;
        params().key("leakback.x").i64_or(0)
    });

    assert_eq!(task.await.unwrap(), 2);
    assert_eq!(params().key("leakback.x").i64_or(0), 1);
}

#[tokio::test(flavor = "current_thread")]
async fn panicking_task_leaves_spawner_untouched() {
    let _g = Scope::new().set("crash.x", 1).enter();

    let task = spawn(async {
        let _inner = Scope::new().set("crash.x", 2).enter();
        yield_now().await;
        panic!("task failed");
    });

    assert!(task.await.is_err());
    assert_eq!(params().key("crash.x").i64_or(0), 1);
}
