//! Player process lifecycle, using `sleep` as a stand-in media player.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::time::Duration;

use picontrol_server::config::PlaybackSection;
use picontrol_server::services::{Player, StopOutcome};

fn sleeper() -> Player {
    Player::new(&PlaybackSection {
        program: "sleep".into(),
        args: vec![],
    })
}

#[tokio::test]
async fn stop_with_nothing_playing_is_harmless() {
    let player = sleeper();
    let outcome = tokio::time::timeout(Duration::from_secs(1), player.stop())
        .await
        .expect("stop blocked")
        .unwrap();
    assert_eq!(outcome, StopOutcome::NothingPlaying);
}

#[tokio::test]
async fn start_then_stop() {
    let player = sleeper();
    player.start("30").await.unwrap();
    assert!(player.is_playing().await);

    assert_eq!(player.stop().await.unwrap(), StopOutcome::Stopped);
    assert!(!player.is_playing().await);
    assert_eq!(player.stop().await.unwrap(), StopOutcome::NothingPlaying);
}

#[tokio::test]
async fn start_replaces_running_player() {
    let player = sleeper();
    player.start("30").await.unwrap();
    player.start("31").await.unwrap();
    assert!(player.is_playing().await);
    assert_eq!(player.stop().await.unwrap(), StopOutcome::Stopped);
}

#[tokio::test]
async fn exited_player_counts_as_nothing_playing() {
    let player = sleeper();
    player.start("0").await.unwrap();
    tokio::time::sleep(Duration::from_millis(300)).await;
    assert_eq!(player.stop().await.unwrap(), StopOutcome::NothingPlaying);
}

#[tokio::test]
async fn option_like_urls_are_rejected() {
    let player = sleeper();
    let err = player.start("--help").await.expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "BAD_REQUEST");
    assert!(!player.is_playing().await);
}
