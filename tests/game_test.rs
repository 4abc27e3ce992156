//! Turn orchestration, notifications and the stale-signal guard.

use connect_four::{
    Game, GameError, GameEvent, HeuristicPlayer, Player, RandomPlayer, Reporter,
};
use connect_four_rules::{Piece, RulesError, State};
use std::time::Duration;

fn hugh(seed: u64) -> Box<dyn Player> {
    Box::new(HeuristicPlayer::seeded(seed, Duration::ZERO))
}

fn rando(seed: u64) -> Box<dyn Player> {
    Box::new(RandomPlayer::seeded(seed, Duration::ZERO))
}

/// Keeps the reporter of its previous turn and keeps talking into it.
struct Chatty {
    previous: Option<Reporter>,
}

#[async_trait::async_trait]
impl Player for Chatty {
    fn name(&self) -> &str {
        "Chatty"
    }

    fn description(&self) -> &str {
        "Talks into old reporters"
    }

    async fn get_play(&mut self, state: &State, reporter: Reporter) -> Result<usize, GameError> {
        let valid = connect_four::check_playable(state)?;
        if let Some(old) = &self.previous {
            old.thinking(format!("stale from turn {}", old.turn()));
            old.highlight(vec![7]);
        }
        reporter.thinking(format!("fresh on turn {}", reporter.turn()));
        reporter.highlight(vec![valid[0]]);
        self.previous = Some(reporter);
        Ok(valid[0])
    }
}

/// Answers with a full column.
struct Cheater;

#[async_trait::async_trait]
impl Player for Cheater {
    fn name(&self) -> &str {
        "Cheater"
    }

    fn description(&self) -> &str {
        "Ignores the rules"
    }

    async fn get_play(&mut self, _state: &State, _reporter: Reporter) -> Result<usize, GameError> {
        Ok(1)
    }
}

#[tokio::test]
async fn test_run_to_completion() {
    for seed in 0..5 {
        let mut game = Game::new(State::initial(), hugh(seed), rando(seed)).unwrap();
        let mut events = game.observe();
        let last = game.run().await.unwrap();

        assert!(last.gameover());
        assert_eq!(game.state(), &last);
        assert_eq!(game.turn() as usize, last.moves().len());

        let mut received = Vec::new();
        while let Ok(event) = events.try_recv() {
            received.push(event);
        }
        assert!(matches!(
            received.first(),
            Some(GameEvent::TurnStarted { turn: 1, piece: Piece::One, .. })
        ));
        assert_eq!(
            received.last(),
            Some(&GameEvent::GameOver {
                winner: last.winner()
            })
        );
        let moves: Vec<usize> = received
            .iter()
            .filter_map(|event| match event {
                GameEvent::MoveMade { column, .. } => Some(*column),
                _ => None,
            })
            .collect();
        assert_eq!(moves, last.moves());
    }
}

#[tokio::test]
async fn test_cannot_start_finished_game() {
    let err = Game::new(State::parse("1212121").unwrap(), hugh(0), hugh(1)).unwrap_err();
    assert!(matches!(err, GameError::Rules(RulesError::Precondition { .. })));
}

#[tokio::test]
async fn test_play_turn_after_game_over() {
    // Player 1 completes the vertical with column 1.
    let mut game = Game::new(State::parse("121212").unwrap(), hugh(0), hugh(1)).unwrap();
    let after = game.play_turn().await.unwrap();
    assert_eq!(after.winner(), Some(Piece::One));
    assert_eq!(after.moves().last(), Some(&1));

    let err = game.play_turn().await.unwrap_err();
    assert!(matches!(err, GameError::Rules(RulesError::InvalidOperation { .. })));
}

#[tokio::test]
async fn test_current_player_follows_state() {
    let game = Game::new(State::parse("4").unwrap(), hugh(0), rando(1)).unwrap();
    assert_eq!(game.current_piece(), Piece::Two);
    assert_eq!(game.current_player().name(), "Rando");
    assert_eq!(game.player(Piece::One).name(), "Hugh");
}

#[tokio::test]
async fn test_turn_notifications_in_order() {
    let mut game = Game::new(State::initial(), rando(3), rando(4)).unwrap();
    let mut events = game.observe();
    let next = game.play_turn().await.unwrap();

    let mut received = Vec::new();
    while let Ok(event) = events.try_recv() {
        received.push(event);
    }
    let n = received.len();
    assert!(n >= 4);
    assert!(matches!(received[0], GameEvent::TurnStarted { turn: 1, .. }));
    assert!(received[1..n - 2]
        .iter()
        .all(|e| matches!(e, GameEvent::Thinking(_) | GameEvent::Highlight(_))));
    assert_eq!(
        received[n - 2],
        GameEvent::MoveMade {
            piece: Piece::One,
            column: next.moves()[0]
        }
    );
    assert_eq!(received[n - 1], GameEvent::StateChanged(next));

    // Per-turn notes do not outlive the move.
    assert!(game.thoughts().is_empty());
    assert!(game.highlight().is_empty());
}

#[tokio::test]
async fn test_stale_signals_are_dropped() {
    let chatty = || -> Box<dyn Player> { Box::new(Chatty { previous: None }) };
    let mut game = Game::new(State::initial(), chatty(), chatty()).unwrap();
    let mut events = game.observe();

    for _ in 0..4 {
        game.play_turn().await.unwrap();
    }

    let mut thoughts = Vec::new();
    while let Ok(event) = events.try_recv() {
        match event {
            GameEvent::Thinking(text) => thoughts.push(text),
            GameEvent::Highlight(columns) => assert_ne!(columns, vec![7]),
            _ => {}
        }
    }
    assert_eq!(
        thoughts,
        vec![
            "fresh on turn 1",
            "fresh on turn 2",
            "fresh on turn 3",
            "fresh on turn 4"
        ]
    );
}

#[tokio::test]
async fn test_unplayable_answer_is_an_error() {
    let mut game = Game::new(State::parse("111111").unwrap(), Box::new(Cheater), hugh(0)).unwrap();
    let err = game.play_turn().await.unwrap_err();
    assert!(matches!(err, GameError::Rules(RulesError::InvalidOperation { .. })));
    assert_eq!(game.state(), &State::parse("111111").unwrap());
}

#[tokio::test]
async fn test_dropped_observer_does_not_stop_the_game() {
    let mut game = Game::new(State::initial(), hugh(7), hugh(8)).unwrap();
    drop(game.observe());
    assert!(game.run().await.unwrap().gameover());
}
