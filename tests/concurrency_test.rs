//! Concurrency tests for Brasa.
//!
//! These tests verify that concurrent reply creation keeps the thread's
//! denormalized reply count in step with the actual reply rows.

use std::sync::Arc;

use brasa::forum::{self, NewReply, NewThread, ReplyRepository, ThreadRepository};
use brasa::Database;
use tokio::sync::Mutex;

/// Setup a shared in-memory test database.
fn setup_test_db() -> Arc<Mutex<Database>> {
    Arc::new(Mutex::new(Database::open_in_memory().unwrap()))
}

/// Test concurrent reply creation in a single thread.
///
/// When multiple replies are appended concurrently, every insert and its
/// count increment are atomic, so the final count equals the row count.
#[tokio::test]
async fn test_concurrent_reply_creation() {
    let db = setup_test_db();

    let thread_id = {
        let guard = db.lock().await;
        forum::create_thread(&guard, &NewThread::new("Test Thread", "Body"))
            .unwrap()
            .id
    };

    const NUM_REPLIES: usize = 10;

    let mut handles = Vec::new();
    for i in 0..NUM_REPLIES {
        let db_clone = Arc::clone(&db);
        let handle = tokio::spawn(async move {
            let mut guard = db_clone.lock().await;
            let new_reply = NewReply::new(format!("Reply content {}", i));
            forum::create_reply(&mut guard, thread_id, &new_reply)
        });
        handles.push(handle);
    }

    let mut success_count = 0;
    for handle in handles {
        if handle.await.unwrap().is_ok() {
            success_count += 1;
        }
    }

    assert_eq!(success_count, NUM_REPLIES, "All replies should be created");

    let guard = db.lock().await;
    let thread = ThreadRepository::new(&guard)
        .get_by_id(thread_id)
        .unwrap()
        .unwrap();
    let rows = ReplyRepository::new(&guard)
        .count_by_thread(thread_id)
        .unwrap();

    assert_eq!(thread.reply_count, NUM_REPLIES as i64);
    assert_eq!(thread.reply_count, rows);
}

/// Test concurrent replies spread across multiple threads.
#[tokio::test]
async fn test_concurrent_replies_across_threads() {
    let db = setup_test_db();

    let thread_ids: Vec<i64> = {
        let guard = db.lock().await;
        (0..3)
            .map(|i| {
                forum::create_thread(
                    &guard,
                    &NewThread::new(format!("Thread {}", i), "Body"),
                )
                .unwrap()
                .id
            })
            .collect()
    };

    const REPLIES_PER_THREAD: usize = 5;

    let mut handles = Vec::new();
    for &thread_id in &thread_ids {
        for i in 0..REPLIES_PER_THREAD {
            let db_clone = Arc::clone(&db);
            let handle = tokio::spawn(async move {
                let mut guard = db_clone.lock().await;
                forum::create_reply(&mut guard, thread_id, &NewReply::new(format!("r{}", i)))
            });
            handles.push(handle);
        }
    }

    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    // Each thread's count only reflects its own replies
    let guard = db.lock().await;
    for thread_id in thread_ids {
        let thread = ThreadRepository::new(&guard)
            .get_by_id(thread_id)
            .unwrap()
            .unwrap();
        assert_eq!(thread.reply_count, REPLIES_PER_THREAD as i64);
    }
}

/// Test that a failed reply create leaves the count untouched.
#[tokio::test]
async fn test_failed_reply_does_not_change_count() {
    let db = setup_test_db();

    let thread_id = {
        let guard = db.lock().await;
        forum::create_thread(&guard, &NewThread::new("Test Thread", "Body"))
            .unwrap()
            .id
    };

    {
        let mut guard = db.lock().await;
        forum::create_reply(&mut guard, thread_id, &NewReply::new("ok")).unwrap();

        // Empty content fails validation before any write
        let result = forum::create_reply(&mut guard, thread_id, &NewReply::new("   "));
        assert!(result.is_err());

        // Missing thread fails after the existence check, inside the transaction
        let result = forum::create_reply(&mut guard, 999, &NewReply::new("orphan"));
        assert!(result.is_err());
    }

    let guard = db.lock().await;
    let thread = ThreadRepository::new(&guard)
        .get_by_id(thread_id)
        .unwrap()
        .unwrap();
    assert_eq!(thread.reply_count, 1);
}
