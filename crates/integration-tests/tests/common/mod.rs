//! Driver contract checks shared by every backend
//!
//! Each check takes a queue-name prefix so runs against a shared Redis
//! server do not collide with each other.

#![allow(dead_code)]

use kvqueue_core::domain::{PeekRange, QueueName};
use kvqueue_core::port::Driver;
use std::time::{Duration, Instant};

pub fn queue(prefix: &str, name: &str) -> QueueName {
    QueueName::new(format!("{prefix}{name}")).unwrap()
}

pub async fn check_count_of_unwritten_queue_is_zero(driver: &dyn Driver, prefix: &str) {
    let q = queue(prefix, "never-written");
    assert_eq!(driver.count_messages(&q).await.unwrap(), 0);
}

pub async fn check_create_is_idempotent(driver: &dyn Driver, prefix: &str) {
    let q = queue(prefix, "send-newsletter");

    for _ in 0..3 {
        driver.create_queue(&q).await.unwrap();
    }

    let queues = driver.list_queues().await.unwrap();
    assert_eq!(queues.iter().filter(|name| **name == q).count(), 1);

    driver.remove_queue(&q).await.unwrap();
}

pub async fn check_peek_does_not_mutate(driver: &dyn Driver, prefix: &str) {
    let q = queue(prefix, "peek");
    driver.push_message(&q, "first").await.unwrap();
    driver.push_message(&q, "second").await.unwrap();

    let peeked = driver.peek_queue(&q, PeekRange::default()).await.unwrap();
    assert_eq!(peeked, vec!["first", "second"]);
    assert_eq!(driver.count_messages(&q).await.unwrap(), 2);

    let popped = driver
        .pop_message(&q, Duration::from_secs(1))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(popped.message, peeked[0]);

    driver.remove_queue(&q).await.unwrap();
}

pub async fn check_peek_window(driver: &dyn Driver, prefix: &str) {
    let q = queue(prefix, "window");
    for i in 0..11 {
        driver.push_message(&q, &format!("message{i}")).await.unwrap();
    }

    // Only index 10 lies in [10, 19]
    let tail = driver
        .peek_queue(&q, PeekRange::new(10, 10).unwrap())
        .await
        .unwrap();
    assert_eq!(tail, vec!["message10"]);

    let head = driver
        .peek_queue(&q, PeekRange::new(0, 2).unwrap())
        .await
        .unwrap();
    assert_eq!(head, vec!["message0", "message1"]);

    let past_end = driver
        .peek_queue(&q, PeekRange::new(50, 5).unwrap())
        .await
        .unwrap();
    assert!(past_end.is_empty());

    driver.remove_queue(&q).await.unwrap();
}

pub async fn check_fifo_order(driver: &dyn Driver, prefix: &str) {
    let q = queue(prefix, "fifo");
    driver.push_message(&q, "a").await.unwrap();
    driver.push_message(&q, "b").await.unwrap();

    let first = driver
        .pop_message(&q, Duration::from_secs(1))
        .await
        .unwrap()
        .unwrap();
    let second = driver
        .pop_message(&q, Duration::from_secs(1))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(first.message, "a");
    assert_eq!(first.queue, q);
    assert_eq!(second.message, "b");
    assert_eq!(second.queue, q);
}

pub async fn check_push_does_not_register(driver: &dyn Driver, prefix: &str) {
    let q = queue(prefix, "unregistered");
    driver.push_message(&q, "m").await.unwrap();

    let queues = driver.list_queues().await.unwrap();
    assert!(!queues.contains(&q));

    driver.remove_queue(&q).await.unwrap();
}

pub async fn check_remove_clears_list_and_registry(driver: &dyn Driver, prefix: &str) {
    let q = queue(prefix, "doomed");
    driver.create_queue(&q).await.unwrap();
    driver.push_message(&q, "m1").await.unwrap();
    driver.push_message(&q, "m2").await.unwrap();

    driver.remove_queue(&q).await.unwrap();

    assert_eq!(driver.count_messages(&q).await.unwrap(), 0);
    assert!(!driver.list_queues().await.unwrap().contains(&q));
}

pub async fn check_empty_registered_queue_still_listed(driver: &dyn Driver, prefix: &str) {
    let q = queue(prefix, "drained");
    driver.create_queue(&q).await.unwrap();
    driver.push_message(&q, "only").await.unwrap();
    driver
        .pop_message(&q, Duration::from_secs(1))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(driver.count_messages(&q).await.unwrap(), 0);
    assert!(driver.list_queues().await.unwrap().contains(&q));

    driver.remove_queue(&q).await.unwrap();
}

pub async fn check_pop_times_out_empty(driver: &dyn Driver, prefix: &str) {
    let q = queue(prefix, "empty");
    let started = Instant::now();

    let popped = driver.pop_message(&q, Duration::from_secs(1)).await.unwrap();
    let elapsed = started.elapsed();

    assert!(popped.is_none());
    assert!(elapsed >= Duration::from_millis(900), "returned too early: {elapsed:?}");
    assert!(elapsed < Duration::from_secs(3), "returned too late: {elapsed:?}");
}
