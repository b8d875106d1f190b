use super::board::Board;
use super::error::InvalidMoveError;
use super::player::Player;
use super::types::{CELL_COUNT, GameStatus, Mark, PlayOutcome, PlayerSlot, Position};
use super::win_detector::winning_combination_at;

pub const DEFAULT_HUMAN_NAME: &str = "Player";
pub const DEFAULT_BOT_NAME: &str = "Bot";

#[derive(Debug, Clone)]
pub struct TicTacToeGameState {
    board: Board,
    human: Player,
    bot: Player,
    round: u8,
    status: GameStatus,
}

impl Default for TicTacToeGameState {
    fn default() -> Self {
        Self::new(DEFAULT_HUMAN_NAME, DEFAULT_BOT_NAME)
    }
}

impl TicTacToeGameState {
    /// The human always plays X and opens every game.
    pub fn new(human_name: impl Into<String>, bot_name: impl Into<String>) -> Self {
        Self {
            board: Board::new(),
            human: Player::new(human_name, Mark::X),
            bot: Player::new(bot_name, Mark::O),
            round: 0,
            status: GameStatus::AwaitingMove(PlayerSlot::Human),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn round(&self) -> u8 {
        self.round
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_over(&self) -> bool {
        self.status.is_over()
    }

    pub fn player(&self, slot: PlayerSlot) -> &Player {
        match slot {
            PlayerSlot::Human => &self.human,
            PlayerSlot::Bot => &self.bot,
        }
    }

    fn player_mut(&mut self, slot: PlayerSlot) -> &mut Player {
        match slot {
            PlayerSlot::Human => &mut self.human,
            PlayerSlot::Bot => &mut self.bot,
        }
    }

    pub fn human(&self) -> &Player {
        &self.human
    }

    pub fn bot(&self) -> &Player {
        &self.bot
    }

    pub fn active_player(&self) -> Option<PlayerSlot> {
        match self.status {
            GameStatus::AwaitingMove(slot) => Some(slot),
            _ => None,
        }
    }

    pub fn play(&mut self, position: Position) -> Result<PlayOutcome, InvalidMoveError> {
        let slot = self.active_player().ok_or(InvalidMoveError::GameNotInProgress)?;
        self.place_mark(slot, position)
    }

    pub fn play_as(&mut self, slot: PlayerSlot, position: Position) -> Result<PlayOutcome, InvalidMoveError> {
        let active = self.active_player().ok_or(InvalidMoveError::GameNotInProgress)?;
        if active != slot {
            return Err(InvalidMoveError::NotYourTurn(slot));
        }
        self.place_mark(slot, position)
    }

    fn place_mark(&mut self, slot: PlayerSlot, position: Position) -> Result<PlayOutcome, InvalidMoveError> {
        if !self.board.is_empty_at(position) {
            return Err(InvalidMoveError::CellOccupied(position));
        }

        let mark = self.player(slot).marker();
        self.board.set_cell(position, mark);
        self.round += 1;

        if let Some(combination) = winning_combination_at(&self.board, position, mark) {
            let player = self.player_mut(slot);
            player.set_wins(player.wins() + 1);
            self.status = GameStatus::Won { slot, combination };
            return Ok(PlayOutcome::Won { slot, combination });
        }

        if usize::from(self.round) == CELL_COUNT {
            self.status = GameStatus::Draw;
            return Ok(PlayOutcome::Draw);
        }

        let next = PlayerSlot::for_round(self.round);
        self.status = GameStatus::AwaitingMove(next);
        Ok(PlayOutcome::Continue { next })
    }

    /// Starts a new game. Win counts survive.
    pub fn reset_game(&mut self) {
        self.board.reset();
        self.round = 0;
        self.status = GameStatus::AwaitingMove(PlayerSlot::Human);
    }

    pub fn reset_scores(&mut self) {
        self.human.set_wins(0);
        self.bot.set_wins(0);
    }

    pub fn stop(&mut self) {
        self.status = GameStatus::Idle;
    }
}
