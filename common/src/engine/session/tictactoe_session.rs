use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::games::SessionRng;
use crate::games::tictactoe::{
    DEFAULT_BOT_NAME, DEFAULT_HUMAN_NAME, InvalidMoveError, PlayOutcome, Player, PlayerSlot,
    Position, TicTacToeGameState, choose_move, winning_cells,
};
use crate::log;
use super::view::{GameView, Highlight};

pub const DEFAULT_THINK_DELAY: Duration = Duration::from_millis(500);
pub const DEFAULT_HIGHLIGHT_DELAY: Duration = Duration::from_millis(350);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BotTimings {
    pub think_delay: Duration,
    pub highlight_delay: Duration,
}

impl Default for BotTimings {
    fn default() -> Self {
        Self {
            think_delay: DEFAULT_THINK_DELAY,
            highlight_delay: DEFAULT_HIGHLIGHT_DELAY,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TicTacToeSessionSettings {
    pub human_name: String,
    pub bot_name: String,
    pub timings: BotTimings,
    pub seed: Option<u64>,
}

impl Default for TicTacToeSessionSettings {
    fn default() -> Self {
        Self {
            human_name: DEFAULT_HUMAN_NAME.to_string(),
            bot_name: DEFAULT_BOT_NAME.to_string(),
            timings: BotTimings::default(),
            seed: None,
        }
    }
}

struct SessionInner {
    game_state: TicTacToeGameState,
    rng: SessionRng,
    pending_bot_turn: Option<JoinHandle<()>>,
    // Bumped on every reset so a bot task that already woke up can tell it is stale.
    generation: u64,
}

pub struct TicTacToeSession<V: GameView> {
    session_id: String,
    seed: u64,
    timings: BotTimings,
    inner: Arc<Mutex<SessionInner>>,
    view: Arc<V>,
}

impl<V: GameView> Clone for TicTacToeSession<V> {
    fn clone(&self) -> Self {
        Self {
            session_id: self.session_id.clone(),
            seed: self.seed,
            timings: self.timings,
            inner: self.inner.clone(),
            view: self.view.clone(),
        }
    }
}

impl<V: GameView> TicTacToeSession<V> {
    pub fn new(session_id: String, settings: TicTacToeSessionSettings, view: Arc<V>) -> Self {
        let rng = SessionRng::from_optional_seed(settings.seed);
        let seed = rng.seed();
        let game_state = TicTacToeGameState::new(settings.human_name, settings.bot_name);

        log!("[session:{}] Created with seed {}", session_id, seed);

        Self {
            session_id,
            seed,
            timings: settings.timings,
            inner: Arc::new(Mutex::new(SessionInner {
                game_state,
                rng,
                pending_bot_turn: None,
                generation: 0,
            })),
            view,
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub async fn start(&self) {
        let inner = self.inner.lock().await;
        self.render_full(&inner.game_state);
    }

    pub async fn play(&self, position: Position) -> Result<(), InvalidMoveError> {
        let mut inner = self.inner.lock().await;

        let outcome = match inner.game_state.play_as(PlayerSlot::Human, position) {
            Ok(outcome) => outcome,
            Err(e) => {
                log!("[session:{}] Rejected move at {}: {}", self.session_id, position, e);
                return Err(e);
            }
        };

        log!("[session:{}] Human marked {} (round {})", self.session_id, position, inner.game_state.round());
        self.present_move(&inner.game_state, position, outcome);

        if matches!(outcome, PlayOutcome::Continue { next: PlayerSlot::Bot }) {
            self.schedule_bot_turn(&mut inner);
        }

        Ok(())
    }

    pub async fn reset_game(&self) {
        let mut inner = self.inner.lock().await;
        self.cancel_bot_turn(&mut inner);
        inner.game_state.reset_game();

        log!("[session:{}] Game reset", self.session_id);

        self.view.clear_highlights(Highlight::BotChoice);
        self.view.clear_highlights(Highlight::WinCombination);
        self.render_full(&inner.game_state);
    }

    pub async fn reset_scores(&self) {
        let mut inner = self.inner.lock().await;
        inner.game_state.reset_scores();
        self.view.display_score(inner.game_state.human(), inner.game_state.bot());
    }

    pub async fn shutdown(&self) {
        let mut inner = self.inner.lock().await;
        self.cancel_bot_turn(&mut inner);
        inner.game_state.stop();
        log!("[session:{}] Shut down", self.session_id);
    }

    pub async fn has_pending_bot_turn(&self) -> bool {
        self.inner.lock().await.pending_bot_turn.is_some()
    }

    pub async fn snapshot(&self) -> TicTacToeGameState {
        self.inner.lock().await.game_state.clone()
    }

    fn schedule_bot_turn(&self, inner: &mut SessionInner) {
        let generation = inner.generation;
        let session = self.clone();
        let handle = tokio::spawn(async move {
            session.run_bot_turn(generation).await;
        });
        inner.pending_bot_turn = Some(handle);
    }

    fn cancel_bot_turn(&self, inner: &mut SessionInner) {
        inner.generation += 1;
        if let Some(handle) = inner.pending_bot_turn.take() {
            handle.abort();
            log!("[session:{}] Cancelled pending bot turn", self.session_id);
        }
    }

    async fn run_bot_turn(&self, generation: u64) {
        tokio::time::sleep(self.timings.think_delay).await;

        let choice = {
            let mut inner = self.inner.lock().await;
            if inner.generation != generation {
                return;
            }

            let empty_positions = inner.game_state.board().empty_positions();
            let Some(choice) = choose_move(&empty_positions, &mut inner.rng) else {
                inner.pending_bot_turn = None;
                return;
            };

            log!("[session:{}] Bot picked {}", self.session_id, choice);
            self.view.highlight_cells(&[choice], Highlight::BotChoice);
            choice
        };

        tokio::time::sleep(self.timings.highlight_delay).await;

        let mut inner = self.inner.lock().await;
        if inner.generation != generation {
            return;
        }
        inner.pending_bot_turn = None;
        self.view.clear_highlights(Highlight::BotChoice);

        match inner.game_state.play_as(PlayerSlot::Bot, choice) {
            Ok(outcome) => {
                log!("[session:{}] Bot marked {} (round {})", self.session_id, choice, inner.game_state.round());
                self.present_move(&inner.game_state, choice, outcome);
            }
            Err(e) => {
                log!("[session:{}] Bot failed to mark {}: {}", self.session_id, choice, e);
            }
        }
    }

    fn present_move(&self, state: &TicTacToeGameState, position: Position, outcome: PlayOutcome) {
        self.view.render_board(state.board());
        self.view.mark_cell_used(position);

        match outcome {
            PlayOutcome::Continue { next } => {
                self.view.show_message(&turn_message(state.player(next)));
            }
            PlayOutcome::Won { slot, combination } => {
                let winner = state.player(slot);
                log!("[session:{}] {} won with {:?}", self.session_id, winner.name(), combination.indices());
                self.view.show_message(&win_message(winner));
                let cells = winning_cells(state.board(), winner.marker());
                self.view.highlight_cells(&cells, Highlight::WinCombination);
                self.view.display_score(state.human(), state.bot());
            }
            PlayOutcome::Draw => {
                log!("[session:{}] Draw", self.session_id);
                self.view.show_message(DRAW_MESSAGE);
            }
        }
    }

    fn render_full(&self, state: &TicTacToeGameState) {
        self.view.render_board(state.board());
        if let Some(active) = state.active_player() {
            self.view.show_message(&turn_message(state.player(active)));
        }
        self.view.display_score(state.human(), state.bot());
    }
}

pub const DRAW_MESSAGE: &str = "It's a draw!";

pub fn turn_message(player: &Player) -> String {
    format!("{}'s turn", player.name())
}

pub fn win_message(player: &Player) -> String {
    format!("{} has won!", player.name())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::{Board, GameStatus, Mark};
    use std::sync::Mutex as StdMutex;

    #[derive(Debug, Clone, PartialEq)]
    enum ViewEvent {
        Board(Board),
        Message(String),
        Score(u32, u32),
        Highlight(Vec<usize>, Highlight),
        ClearHighlight(Highlight),
        Used(usize),
    }

    #[derive(Default)]
    struct RecordingView {
        events: StdMutex<Vec<ViewEvent>>,
    }

    impl RecordingView {
        fn events(&self) -> Vec<ViewEvent> {
            self.events.lock().unwrap().clone()
        }

        fn messages(&self) -> Vec<String> {
            self.events()
                .into_iter()
                .filter_map(|e| match e {
                    ViewEvent::Message(m) => Some(m),
                    _ => None,
                })
                .collect()
        }

        fn push(&self, event: ViewEvent) {
            self.events.lock().unwrap().push(event);
        }
    }

    impl GameView for RecordingView {
        fn render_board(&self, board: &Board) {
            self.push(ViewEvent::Board(board.clone()));
        }

        fn show_message(&self, message: &str) {
            self.push(ViewEvent::Message(message.to_string()));
        }

        fn display_score(&self, human: &Player, bot: &Player) {
            self.push(ViewEvent::Score(human.wins(), bot.wins()));
        }

        fn highlight_cells(&self, positions: &[Position], highlight: Highlight) {
            self.push(ViewEvent::Highlight(positions.iter().map(|p| p.index()).collect(), highlight));
        }

        fn clear_highlights(&self, highlight: Highlight) {
            self.push(ViewEvent::ClearHighlight(highlight));
        }

        fn mark_cell_used(&self, position: Position) {
            self.push(ViewEvent::Used(position.index()));
        }
    }

    fn pos(index: usize) -> Position {
        Position::new(index).unwrap()
    }

    fn create_session(seed: u64) -> (TicTacToeSession<RecordingView>, Arc<RecordingView>) {
        let view = Arc::new(RecordingView::default());
        let settings = TicTacToeSessionSettings {
            seed: Some(seed),
            ..TicTacToeSessionSettings::default()
        };
        let session = TicTacToeSession::new("test".to_string(), settings, view.clone());
        (session, view)
    }

    async fn wait_for_bot() {
        tokio::time::sleep(Duration::from_millis(1000)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_renders_board_message_and_score() {
        let (session, view) = create_session(1);
        session.start().await;

        assert_eq!(
            view.events(),
            vec![
                ViewEvent::Board(Board::new()),
                ViewEvent::Message("Player's turn".to_string()),
                ViewEvent::Score(0, 0),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_bot_answers_after_delays() {
        let (session, view) = create_session(3);
        session.play(pos(4)).await.unwrap();

        assert!(session.has_pending_bot_turn().await);
        assert_eq!(session.snapshot().await.round(), 1);
        assert_eq!(view.messages().last().unwrap(), "Bot's turn");

        wait_for_bot().await;

        let state = session.snapshot().await;
        assert_eq!(state.round(), 2);
        assert_eq!(state.active_player(), Some(PlayerSlot::Human));
        assert_eq!(state.board().get_cell(pos(4)), Mark::X);
        assert_eq!(state.board().filled_count(), 2);
        assert!(!session.has_pending_bot_turn().await);
        assert_eq!(view.messages().last().unwrap(), "Player's turn");
    }

    #[tokio::test(start_paused = true)]
    async fn test_bot_highlights_choice_before_committing() {
        let (session, view) = create_session(5);
        session.play(pos(0)).await.unwrap();

        tokio::time::sleep(Duration::from_millis(600)).await;

        let highlighted = view.events().into_iter().find_map(|e| match e {
            ViewEvent::Highlight(cells, Highlight::BotChoice) => Some(cells),
            _ => None,
        });
        let cells = highlighted.expect("bot choice should be highlighted");
        assert_eq!(cells.len(), 1);
        assert_ne!(cells[0], 0);
        assert_eq!(session.snapshot().await.round(), 1);

        wait_for_bot().await;

        let state = session.snapshot().await;
        assert_eq!(state.board().get_cell(pos(cells[0])), Mark::O);
        assert!(view.events().contains(&ViewEvent::ClearHighlight(Highlight::BotChoice)));
        assert!(view.events().contains(&ViewEvent::Used(cells[0])));
    }

    #[tokio::test(start_paused = true)]
    async fn test_human_move_during_bot_turn_is_rejected() {
        let (session, _view) = create_session(7);
        session.play(pos(0)).await.unwrap();

        let result = session.play(pos(1)).await;

        assert_eq!(result, Err(InvalidMoveError::NotYourTurn(PlayerSlot::Human)));
        assert_eq!(session.snapshot().await.round(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_cancels_pending_bot_turn_before_think_delay() {
        let (session, _view) = create_session(11);
        session.play(pos(0)).await.unwrap();

        session.reset_game().await;
        assert!(!session.has_pending_bot_turn().await);

        wait_for_bot().await;

        let state = session.snapshot().await;
        assert_eq!(state.round(), 0);
        assert_eq!(state.board().filled_count(), 0);
        assert_eq!(state.active_player(), Some(PlayerSlot::Human));
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_cancels_pending_bot_turn_after_highlight() {
        let (session, _view) = create_session(13);
        session.play(pos(8)).await.unwrap();

        tokio::time::sleep(Duration::from_millis(600)).await;
        session.reset_game().await;
        wait_for_bot().await;

        let state = session.snapshot().await;
        assert_eq!(state.round(), 0);
        assert_eq!(state.board().filled_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_full_game_against_bot_ends_and_keeps_round_invariant() {
        let (session, view) = create_session(17);
        session.start().await;

        loop {
            let state = session.snapshot().await;
            assert_eq!(state.board().filled_count(), usize::from(state.round()));
            if state.is_over() {
                break;
            }
            assert_eq!(state.active_player(), Some(PlayerSlot::Human));
            let next = state.board().empty_positions()[0];
            session.play(next).await.unwrap();
            wait_for_bot().await;
        }

        let state = session.snapshot().await;
        let last_message = view.messages().last().unwrap().clone();
        match state.status() {
            GameStatus::Won { slot, combination } => {
                assert_eq!(last_message, win_message(state.player(slot)));
                assert_eq!(state.player(slot).wins(), 1);
                let highlighted = view.events().into_iter().find_map(|e| match e {
                    ViewEvent::Highlight(cells, Highlight::WinCombination) => Some(cells),
                    _ => None,
                });
                let highlighted = highlighted.unwrap();
                assert!(combination.indices().iter().all(|i| highlighted.contains(i)));
            }
            GameStatus::Draw => {
                assert_eq!(last_message, DRAW_MESSAGE);
                assert_eq!(state.round(), 9);
            }
            other => panic!("unexpected status {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_double_line_win_highlights_every_completed_line() {
        let (session, view) = create_session(37);
        let mut state = TicTacToeGameState::default();
        for index in [0, 3, 1, 6, 5, 7, 8, 4] {
            state.play(pos(index)).unwrap();
        }
        let outcome = state.play(pos(2)).unwrap();

        match state.status() {
            GameStatus::Won { slot, combination } => {
                assert_eq!(slot, PlayerSlot::Human);
                assert_eq!(combination.indices(), [0, 1, 2]);
            }
            other => panic!("unexpected status {:?}", other),
        }

        session.present_move(&state, pos(2), outcome);

        assert!(view.events().contains(&ViewEvent::Highlight(
            vec![0, 1, 2, 5, 8],
            Highlight::WinCombination
        )));
    }

    #[tokio::test(start_paused = true)]
    async fn test_same_seed_replays_same_bot_moves() {
        let (first, _) = create_session(23);
        let (second, _) = create_session(23);

        for session in [&first, &second] {
            session.play(pos(4)).await.unwrap();
            wait_for_bot().await;
        }

        assert_eq!(first.snapshot().await.board(), second.snapshot().await.board());
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_stops_game() {
        let (session, _view) = create_session(29);
        session.play(pos(0)).await.unwrap();
        session.shutdown().await;
        wait_for_bot().await;

        let state = session.snapshot().await;
        assert_eq!(state.status(), GameStatus::Idle);
        assert_eq!(state.round(), 1);
        assert_eq!(session.play(pos(1)).await, Err(InvalidMoveError::GameNotInProgress));
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_scores_updates_view() {
        let (session, view) = create_session(31);
        session.reset_scores().await;
        assert_eq!(view.events().last(), Some(&ViewEvent::Score(0, 0)));
    }
}
