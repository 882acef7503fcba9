use std::time::Duration;

use garden_defence_core::{ConfigError, GameConfig};
use garden_defence_session::{SessionError, SessionHandle, SessionId, SessionRegistry};
use tokio::time;

fn spawn_default() -> SessionHandle {
    SessionHandle::spawn(GameConfig::default()).expect("valid config")
}

#[tokio::test(start_paused = true)]
async fn passive_income_arrives_on_its_own_timer() {
    let session = spawn_default();
    assert_eq!(session.state().await.expect("state").stock, 50);

    time::sleep(Duration::from_millis(9_500)).await;
    assert_eq!(session.state().await.expect("state").stock, 50);

    time::sleep(Duration::from_secs(1)).await;
    assert_eq!(session.state().await.expect("state").stock, 75);

    time::sleep(Duration::from_secs(10)).await;
    assert_eq!(session.state().await.expect("state").stock, 100);
}

#[tokio::test(start_paused = true)]
async fn combat_timer_drives_auto_spawn() {
    let session = spawn_default();
    let _ = session.state().await.expect("state");

    time::sleep(Duration::from_millis(14_500)).await;
    assert_eq!(session.state().await.expect("state").invaders_alive, 0);

    time::sleep(Duration::from_secs(1)).await;
    assert_eq!(session.state().await.expect("state").invaders_alive, 1);
}

#[tokio::test(start_paused = true)]
async fn reset_restarts_state_and_both_timers() {
    let session = spawn_default();
    assert!(session
        .plant("подсолнух", 0, 0)
        .await
        .expect("plant")
        .success);

    time::sleep(Duration::from_millis(9_500)).await;
    let fresh = session.reset().await.expect("reset");
    assert_eq!(fresh.stock, 50);
    assert!(fresh.plants.is_empty());

    time::sleep(Duration::from_secs(9)).await;
    let state = session.state().await.expect("state");
    assert_eq!(state.stock, 50, "the old income timer must not fire");
    assert_eq!(state.invaders_alive, 0);

    time::sleep(Duration::from_millis(1_500)).await;
    assert_eq!(session.state().await.expect("state").stock, 75);
}

#[tokio::test(start_paused = true)]
async fn player_requests_reach_the_match() {
    let session = spawn_default();

    let rejected = session.plant("горох", 0, 2).await.expect("plant");
    assert!(!rejected.success);
    assert_eq!(session.collect_resources().await.expect("collect"), 25);
    assert_eq!(session.collect_resources().await.expect("collect"), 25);
    assert!(session.plant("горох", 0, 2).await.expect("plant").success);

    let wave = session.start_wave().await.expect("wave");
    assert!(wave.success);

    let state = session.state().await.expect("state");
    assert_eq!(state.stock, 0);
    assert_eq!(state.invaders_alive, 1);
    assert_eq!(state.lawn[0], "🟩🟩🌱🟩🟩");
}

#[tokio::test(start_paused = true)]
async fn shutdown_closes_every_clone() {
    let session = spawn_default();
    let clone = session.clone();

    session.shutdown().await;

    assert_eq!(clone.state().await, Err(SessionError::Closed));
    assert!(clone.is_closed());
}

#[tokio::test]
async fn spawn_rejects_invalid_config() {
    let config = GameConfig {
        tick_interval_ms: 0,
        ..GameConfig::default()
    };
    assert_eq!(
        SessionHandle::spawn(config).err(),
        Some(ConfigError::ZeroInterval {
            field: "tick_interval_ms"
        })
    );
}

#[tokio::test(start_paused = true)]
async fn registry_finds_sessions_by_id() {
    let registry = SessionRegistry::new(GameConfig::default()).expect("valid config");
    let alice = SessionId::from("alice");
    let bob = SessionId::from("bob");

    let _ = registry.new_game(alice.clone()).await.expect("start");
    let _ = registry.new_game(bob.clone()).await.expect("start");
    assert_eq!(registry.len().await, 2);

    let session = registry.get(&alice).await.expect("registered");
    assert!(session.plant("орех", 1, 1).await.expect("plant").success);

    let other = registry.get(&bob).await.expect("registered");
    assert_eq!(other.state().await.expect("state").stock, 50);

    let missing = SessionId::from("carol");
    assert_eq!(
        registry.get(&missing).await.err(),
        Some(SessionError::Unknown(missing.clone()))
    );
}

#[tokio::test(start_paused = true)]
async fn new_game_replaces_and_stops_previous_session() {
    let registry = SessionRegistry::new(GameConfig::default()).expect("valid config");
    let id = SessionId::new("garden");

    let first = registry.new_game(id.clone()).await.expect("start");
    assert!(first.plant("подсолнух", 0, 0).await.expect("plant").success);

    let second = registry.new_game(id.clone()).await.expect("restart");

    assert_eq!(first.state().await, Err(SessionError::Closed));
    assert_eq!(second.state().await.expect("state").stock, 50);
    assert_eq!(registry.len().await, 1);

    assert!(registry.end(&id).await);
    assert!(!registry.end(&id).await);
    assert!(registry.is_empty().await);
    assert_eq!(second.state().await, Err(SessionError::Closed));
}
