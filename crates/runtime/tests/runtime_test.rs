use std::time::Duration;

use park_core::{
    Action, ActionErrorKind, ActionPacket, Banner, BannerIndex, BannerSetStyleAction,
    BannerStyle, Direction, Duplication, GameCommand, GameState, Intent, MessageKey, TileCoords,
};
use park_runtime::{Event, GameStateEvent, Replay, Runtime, RuntimeError, Topic, UiEvent};
use tokio::sync::broadcast;
use tokio::time::timeout;

fn park() -> (GameState, BannerIndex) {
    let mut state = GameState::default();
    let tile = TileCoords::new(12, 7);
    state.add_surface(tile, 2).unwrap();
    let text = state
        .strings
        .allocate("Park exit", Duplication::Permitted)
        .unwrap();
    let index = state
        .place_banner(Banner::new(tile).with_text(text), Direction::SOUTH, 2)
        .unwrap();
    (state, index)
}

fn style(index: BannerIndex, style: BannerStyle) -> Action {
    Action::from(BannerSetStyleAction::new(index, style))
}

async fn next_event(rx: &mut broadcast::Receiver<Event>) -> Event {
    timeout(Duration::from_secs(1), rx.recv())
        .await
        .expect("event should arrive")
        .expect("bus should stay open")
}

#[tokio::test]
async fn test_execute_publishes_state_and_ui_events() {
    let (state, index) = park();
    let runtime = Runtime::builder().initial_state(state).build();
    let handle = runtime.handle();
    let mut game_rx = handle.subscribe(Topic::GameState);
    let mut ui_rx = handle.subscribe(Topic::Ui);

    let action = style(index, BannerStyle::PrimaryColour(20));
    let queried = handle.query(action).await.unwrap();
    let outcome = handle.execute(action).await.unwrap();
    assert_eq!(queried, outcome);
    assert_eq!(outcome.position.x, 12 * 32 + 16);
    assert_eq!(outcome.position.y, 7 * 32 + 16);
    assert_eq!(outcome.position.z, 16);

    match next_event(&mut ui_rx).await {
        Event::Ui(UiEvent::Intent(intent)) => assert_eq!(intent, Intent::update_banner(index)),
        other => panic!("unexpected event {other:?}"),
    }
    assert!(ui_rx.try_recv().is_err());

    match next_event(&mut game_rx).await {
        Event::GameState(GameStateEvent::ActionExecuted {
            sequence,
            action: executed,
            ..
        }) => {
            assert_eq!(sequence, 0);
            assert_eq!(executed, action);
        }
        other => panic!("unexpected event {other:?}"),
    }

    let state = handle.query_state().await.unwrap();
    assert_eq!(state.banners.get(index).unwrap().colour, 20);
    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_rejected_action_leaves_state_and_log_untouched() {
    let (state, index) = park();
    let before = state.clone();
    let runtime = Runtime::builder().initial_state(state).build();
    let handle = runtime.handle();
    let mut game_rx = handle.subscribe(Topic::GameState);
    let mut ui_rx = handle.subscribe(Topic::Ui);

    let err = handle
        .execute(style(index, BannerStyle::TextColour(14)))
        .await
        .unwrap_err();
    match err {
        RuntimeError::Execute(error) => {
            assert_eq!(error.kind(), ActionErrorKind::InvalidParameter);
            assert_eq!(error.message_key(), MessageKey::CantRepaintThis);
        }
        other => panic!("unexpected error {other:?}"),
    }

    let err = handle
        .execute(style(BannerIndex::NULL, BannerStyle::NoEntry(true)))
        .await
        .unwrap_err();
    assert!(
        matches!(err, RuntimeError::Execute(ref e) if e.kind() == ActionErrorKind::InvalidTarget)
    );

    match next_event(&mut game_rx).await {
        Event::GameState(GameStateEvent::ActionFailed { kind, .. }) => {
            assert_eq!(kind, ActionErrorKind::InvalidParameter);
        }
        other => panic!("unexpected event {other:?}"),
    }
    assert!(ui_rx.try_recv().is_err());

    assert_eq!(handle.query_state().await.unwrap(), before);
    assert!(handle.action_log().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_banner_styling_allowed_while_paused() {
    let (state, index) = park();
    let runtime = Runtime::builder().initial_state(state).paused(true).build();
    let handle = runtime.handle();
    let mut game_rx = handle.subscribe(Topic::GameState);

    handle
        .execute(style(index, BannerStyle::NoEntry(true)))
        .await
        .unwrap();
    let state = handle.query_state().await.unwrap();
    assert!(state.banners.get(index).unwrap().has_no_entry());

    handle.set_paused(false).await.unwrap();
    handle.set_paused(false).await.unwrap();

    let mut pause_changes = 0;
    while let Ok(event) = game_rx.try_recv() {
        if let Event::GameState(GameStateEvent::PauseChanged { paused }) = event {
            assert!(!paused);
            pause_changes += 1;
        }
    }
    assert_eq!(pause_changes, 1);
}

#[tokio::test]
async fn test_packets_decode_and_reject() {
    let (state, index) = park();
    let runtime = Runtime::builder().initial_state(state).build();
    let handle = runtime.handle();

    let packet = ActionPacket {
        command: GameCommand::SetBannerStyle.id(),
        body: vec![1, index.0, 3],
    };
    handle.execute_packet(packet).await.unwrap();
    let state = handle.query_state().await.unwrap();
    let banner = state.banners.get(index).unwrap();
    assert_eq!(banner.text_colour, 3);
    assert_eq!(
        park_core::text::leading_colour(&state.strings.format(banner.string_id)),
        Some(3)
    );

    let unknown_kind = ActionPacket {
        command: GameCommand::SetBannerStyle.id(),
        body: vec![9, index.0, 0],
    };
    assert!(matches!(
        handle.execute_packet(unknown_kind).await,
        Err(RuntimeError::Wire(_))
    ));
    assert_eq!(handle.action_log().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_replay_reproduces_state_and_root() {
    let (state, index) = park();
    let actions = [
        style(index, BannerStyle::PrimaryColour(4)),
        style(index, BannerStyle::TextColour(11)),
        style(index, BannerStyle::NoEntry(true)),
        style(index, BannerStyle::PrimaryColour(40)),
        style(index, BannerStyle::NoEntry(false)),
    ];

    let original = Runtime::builder().initial_state(state.clone()).build();
    let handle = original.handle();
    for action in actions {
        let _ = handle.execute(action).await;
    }
    let log = handle.action_log().await.unwrap();
    let final_state = handle.query_state().await.unwrap();
    assert_eq!(log.len(), 4);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.replay");
    Replay::new(state, log.clone()).save(&path).unwrap();

    let replay = Replay::load(&path).unwrap();
    let replayed = Runtime::builder()
        .initial_state(replay.initial_state)
        .build();
    let replay_handle = replayed.handle();
    for packet in replay.packets {
        replay_handle.execute_packet(packet).await.unwrap();
    }

    let replay_log = replay_handle.action_log().await.unwrap();
    assert_eq!(replay_log.root(), log.root());
    assert_eq!(replay_handle.query_state().await.unwrap(), final_state);
}
