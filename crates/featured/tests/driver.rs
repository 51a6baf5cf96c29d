mod common;

use std::time::Duration;

use common::{deliverable, Event, RecordingRenderer};
use storefront_catalog::ImageProxy;
use storefront_core::FeaturedSet;
use storefront_featured::{spawn_carousel, CarouselError, CarouselPhase, CarouselSettings};

const INTERVAL: Duration = Duration::from_secs(5);
const FADE: Duration = Duration::from_millis(400);

fn featured(len: usize) -> FeaturedSet {
    (0..len)
        .map(|i| deliverable(&format!("p{i}")))
        .collect::<Vec<_>>()
        .into()
}

fn proxy() -> ImageProxy {
    ImageProxy::new("https://api.example/api")
}

/// Let spawned timer tasks and the driver loop catch up.
async fn settle() {
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
}

#[tokio::test(start_paused = true)]
async fn rotates_once_through_the_set_then_idles() {
    let renderer = RecordingRenderer::default();
    let handle = spawn_carousel(featured(3), proxy(), CarouselSettings::default(), renderer.clone())
        .unwrap();

    tokio::time::sleep(FADE + Duration::from_millis(1)).await;
    settle().await;
    assert_eq!(renderer.presented(), [0]);

    tokio::time::sleep(INTERVAL * 3).await;
    settle().await;

    let snapshot = handle.snapshot().await.unwrap();
    assert_eq!(snapshot.phase, CarouselPhase::Idle);
    assert_eq!(snapshot.index, 0);
    assert_eq!(snapshot.len, 3);
    assert_eq!(renderer.presented(), [0, 1, 2, 0]);

    tokio::time::sleep(INTERVAL * 4).await;
    settle().await;
    assert_eq!(renderer.presented(), [0, 1, 2, 0]);

    handle.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn restart_does_not_double_tick() {
    let renderer = RecordingRenderer::default();
    let handle = spawn_carousel(featured(5), proxy(), CarouselSettings::default(), renderer.clone())
        .unwrap();

    handle.start().await.unwrap();
    handle.start().await.unwrap();
    settle().await;

    tokio::time::sleep(INTERVAL + FADE).await;
    settle().await;
    assert_eq!(handle.snapshot().await.unwrap().index, 1);

    handle.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn pause_and_manual_navigation() {
    let renderer = RecordingRenderer::default();
    let handle = spawn_carousel(featured(3), proxy(), CarouselSettings::default(), renderer.clone())
        .unwrap();

    assert_eq!(handle.toggle_pause().await.unwrap(), CarouselPhase::Paused);
    handle.prev().await.unwrap();

    tokio::time::sleep(INTERVAL * 3).await;
    settle().await;
    let snapshot = handle.snapshot().await.unwrap();
    assert_eq!(snapshot.phase, CarouselPhase::Paused);
    assert_eq!(snapshot.index, 2);

    assert_eq!(handle.toggle_pause().await.unwrap(), CarouselPhase::Playing);
    tokio::time::sleep(INTERVAL + FADE).await;
    settle().await;

    let snapshot = handle.snapshot().await.unwrap();
    assert_eq!(snapshot.index, 0);
    assert_eq!(snapshot.phase, CarouselPhase::Idle);
    assert!(renderer.events().contains(&Event::Paused(true)));
    assert!(renderer.events().contains(&Event::Paused(false)));

    handle.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn shutdown_stops_rendering() {
    let renderer = RecordingRenderer::default();
    let handle = spawn_carousel(featured(3), proxy(), CarouselSettings::default(), renderer.clone())
        .unwrap();

    let snapshot = handle.shutdown().await.unwrap();
    assert_eq!(snapshot.phase, CarouselPhase::Idle);

    tokio::time::sleep(INTERVAL * 3).await;
    settle().await;
    assert!(renderer.presented().is_empty());
}

#[tokio::test]
async fn empty_set_does_not_spawn() {
    let renderer = RecordingRenderer::default();
    let result = spawn_carousel(
        FeaturedSet::default(),
        proxy(),
        CarouselSettings::default(),
        renderer.clone(),
    );
    assert!(matches!(result, Err(CarouselError::Empty)));
    assert!(renderer.events().is_empty());
}
