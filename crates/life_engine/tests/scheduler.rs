use std::time::Duration;

use futures_util::future;
use futures_util::stream::{self, BoxStream, StreamExt};
use life_core::{Effect, EffectQueue, FlattenStrategy};
use life_engine::{Deliveries, EffectScheduler};
use tokio::runtime::Handle;
use tokio::sync::{mpsc, oneshot};
use tokio::time::timeout;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Id {
    Timer,
    Other,
}

const QUIET: Duration = Duration::from_millis(50);

fn scheduler() -> (EffectScheduler<u32, Id>, Deliveries<u32>) {
    engine_logging::initialize_for_tests();
    EffectScheduler::new(Handle::current())
}

/// A body that yields whatever is pushed through the returned sender.
fn pulsed() -> (mpsc::UnboundedSender<u32>, BoxStream<'static, u32>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let body = stream::unfold(rx, |mut rx| async move { rx.recv().await.map(|v| (v, rx)) });
    (tx, body.boxed())
}

async fn next(deliveries: &mut Deliveries<u32>) -> Option<u32> {
    timeout(QUIET, deliveries.recv()).await.ok().flatten()
}

#[tokio::test]
async fn one_shot_effects_deliver_their_input() {
    let (mut scheduler, mut deliveries) = scheduler();
    scheduler.run(Effect::just(1) + Effect::from_future(async { None }));

    assert_eq!(next(&mut deliveries).await, Some(1));
    assert_eq!(next(&mut deliveries).await, None);
}

#[tokio::test]
async fn same_id_does_not_cancel_earlier_task() {
    let (mut scheduler, mut deliveries) = scheduler();
    let (first_tx, first) = pulsed();
    let (second_tx, second) = pulsed();

    scheduler.run(Effect::from_stream(first).with_id(Id::Timer));
    scheduler.run(Effect::from_stream(second).with_id(Id::Timer));
    assert_eq!(scheduler.in_flight(&Id::Timer), 2);

    first_tx.send(1).unwrap();
    assert_eq!(next(&mut deliveries).await, Some(1));
    second_tx.send(2).unwrap();
    assert_eq!(next(&mut deliveries).await, Some(2));

    assert_eq!(scheduler.cancel(&Id::Timer), 2);
    assert_eq!(scheduler.in_flight(&Id::Timer), 0);
    let _ = first_tx.send(3);
    let _ = second_tx.send(4);
    assert_eq!(next(&mut deliveries).await, None);
}

#[tokio::test]
async fn cancel_only_touches_its_own_id() {
    let (mut scheduler, mut deliveries) = scheduler();
    let (timer_tx, timer) = pulsed();
    let (other_tx, other) = pulsed();
    scheduler.run(Effect::from_stream(timer).with_id(Id::Timer));
    scheduler.run(Effect::from_stream(other).with_id(Id::Other));

    scheduler.run(Effect::cancel(Id::Timer));
    let _ = timer_tx.send(1);
    other_tx.send(2).unwrap();

    assert_eq!(next(&mut deliveries).await, Some(2));
    assert_eq!(scheduler.in_flight(&Id::Other), 1);
}

#[tokio::test]
async fn cancellation_wins_over_an_already_queued_input() {
    let (mut scheduler, mut deliveries) = scheduler();
    let (queued_tx, queued_rx) = oneshot::channel();
    // Yields 7, then reports that 7 has been handed to the channel.
    let body = stream::iter([7]).chain(stream::once(async move {
        let _ = queued_tx.send(());
        future::pending::<u32>().await
    }));
    scheduler.run(Effect::from_stream(body).with_id(Id::Timer));

    queued_rx.await.unwrap();
    scheduler.run(Effect::cancel(Id::Timer));

    assert_eq!(deliveries.try_recv(), None);
    assert_eq!(next(&mut deliveries).await, None);
}

#[tokio::test]
async fn cancel_and_restart_in_one_effect_keeps_the_new_task() {
    let (mut scheduler, mut deliveries) = scheduler();
    let (old_tx, old) = pulsed();
    let (new_tx, new) = pulsed();
    scheduler.run(Effect::from_stream(old).with_id(Id::Timer));

    scheduler.run(Effect::cancel(Id::Timer) + Effect::from_stream(new).with_id(Id::Timer));
    assert_eq!(scheduler.in_flight(&Id::Timer), 1);

    let _ = old_tx.send(1);
    new_tx.send(2).unwrap();
    assert_eq!(next(&mut deliveries).await, Some(2));
}

#[tokio::test]
async fn latest_queue_cancels_the_previous_task() {
    let (mut scheduler, mut deliveries) = scheduler();
    let queue = EffectQueue::named("search", FlattenStrategy::Latest);
    let (first_tx, first) = pulsed();
    let (second_tx, second) = pulsed();

    scheduler.run(Effect::from_stream(first).on_queue(queue));
    scheduler.run(Effect::from_stream(second).on_queue(queue));

    let _ = first_tx.send(1);
    second_tx.send(2).unwrap();
    assert_eq!(next(&mut deliveries).await, Some(2));
    assert_eq!(next(&mut deliveries).await, None);
}

#[tokio::test]
async fn concat_queue_runs_tasks_in_issue_order() {
    let (mut scheduler, mut deliveries) = scheduler();
    let queue = EffectQueue::named("files", FlattenStrategy::Concat);
    let (first_tx, first) = pulsed();

    scheduler.run(Effect::from_stream(first).on_queue(queue));
    scheduler.run(Effect::just(2).on_queue(queue));

    // The second task waits for the first to finish.
    assert_eq!(next(&mut deliveries).await, None);
    first_tx.send(1).unwrap();
    assert_eq!(next(&mut deliveries).await, Some(1));
    assert_eq!(next(&mut deliveries).await, None);

    drop(first_tx);
    assert_eq!(next(&mut deliveries).await, Some(2));
}

#[tokio::test]
async fn merge_queue_runs_tasks_independently() {
    let (mut scheduler, mut deliveries) = scheduler();
    let queue = EffectQueue::named("io", FlattenStrategy::Merge);
    let (_blocked_tx, blocked) = pulsed();

    scheduler.run(Effect::from_stream(blocked).on_queue(queue));
    scheduler.run(Effect::just(5).on_queue(queue));
    assert_eq!(next(&mut deliveries).await, Some(5));
}

#[tokio::test]
async fn external_inputs_share_the_delivery_channel() {
    let (scheduler, mut deliveries) = scheduler();
    let sender = scheduler.sender();
    assert!(sender.send(9));
    assert_eq!(next(&mut deliveries).await, Some(9));
}

#[tokio::test]
async fn dropping_the_scheduler_stops_its_tasks() {
    let (mut scheduler, mut deliveries) = scheduler();
    let (tx, body) = pulsed();
    scheduler.run(Effect::from_stream(body));
    drop(scheduler);

    let _ = tx.send(1);
    assert_eq!(next(&mut deliveries).await, None);
}
