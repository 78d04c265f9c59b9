//! Machine module - the game lifecycle state machine
//!
//! The machine consumes discrete events (moves, rotation, drop toggles, clock
//! ticks, piece deliveries) and produces a successor state plus optional
//! side-effect commands. State is threaded through [`Game::handle`] by value;
//! there is no shared mutability and no blocking. Random pieces are acquired
//! asynchronously: the machine emits [`Command::RequestPiece`] and the driver
//! answers later with [`GameEvent::PieceReady`].
//!
//! Lifecycle: `Uninitialized -> Running -> (GameOver | Fault)`. Both end
//! states are absorbing. `Fault` is defensive: it marks a contract violation
//! in the event protocol, not a gameplay condition.

use arrayvec::ArrayVec;

use blockfall_types::{
    Command, GameEvent, PieceKind, NUM_COLS, NUM_ROWS, POINTS_PER_ROW, SPAWN_ANCHOR,
};

use crate::board::{Board, Cell};
use crate::pieces::Piece;

/// Commands emitted alongside a transition. Two at most (the boot draws).
pub type Commands = ArrayVec<Command, 2>;

/// Result of feeding one event through the machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub game: Game,
    pub commands: Commands,
}

impl Step {
    fn stay(game: Game) -> Self {
        Self {
            game,
            commands: Commands::new(),
        }
    }

    fn with(game: Game, command: Command) -> Self {
        let mut commands = Commands::new();
        commands.push(command);
        Self { game, commands }
    }
}

/// The pre-rolled preview slot.
///
/// `Requested` marks the window between promoting the preview piece and the
/// driver delivering its replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextSlot {
    Ready(Piece),
    Requested,
}

/// State carried only while the game is running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    score: u32,
    piece: Piece,
    anchor: Cell,
    next: NextSlot,
    board: Board,
    fast_drop: bool,
}

/// Game lifecycle phases, each carrying only the data meaningful to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Game {
    /// Waiting for the two boot pieces; holds the one that arrived first.
    Uninitialized { first: Option<PieceKind> },
    Running(GameState),
    /// Normal terminal outcome with the final score.
    GameOver { score: u32 },
    /// Defensive terminal state with a diagnostic.
    Fault { message: String },
}

impl Game {
    /// Construct the machine and request its two boot pieces.
    pub fn boot() -> (Self, Commands) {
        let mut commands = Commands::new();
        commands.push(Command::RequestPiece);
        commands.push(Command::RequestPiece);
        (Game::Uninitialized { first: None }, commands)
    }

    /// Process one event to completion.
    pub fn handle(self, event: GameEvent) -> Step {
        match self {
            Game::Uninitialized { first } => handle_uninitialized(first, event),
            Game::Running(state) => state.handle(event),
            // End states absorb everything; a late tick or key is not a fault.
            terminal @ (Game::GameOver { .. } | Game::Fault { .. }) => Step::stay(terminal),
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self, Game::Running(_))
    }

    /// Whether the machine has reached an end state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Game::GameOver { .. } | Game::Fault { .. })
    }

    /// Fast-drop flag; off outside the running phase.
    pub fn fast_drop(&self) -> bool {
        match self {
            Game::Running(state) => state.fast_drop,
            _ => false,
        }
    }

    pub fn state(&self) -> Option<&GameState> {
        match self {
            Game::Running(state) => Some(state),
            _ => None,
        }
    }
}

fn handle_uninitialized(first: Option<PieceKind>, event: GameEvent) -> Step {
    match (first, event) {
        (None, GameEvent::PieceReady(kind)) => Step::stay(Game::Uninitialized { first: Some(kind) }),
        (Some(current), GameEvent::PieceReady(next)) => {
            Step::stay(Game::Running(GameState::fresh(current, next)))
        }
        // Gameplay events before both pieces arrive are ignored, not faulted.
        (first, _) => Step::stay(Game::Uninitialized { first }),
    }
}

impl GameState {
    fn fresh(current: PieceKind, next: PieceKind) -> Self {
        Self {
            score: 0,
            piece: Piece::new(current),
            anchor: SPAWN_ANCHOR,
            next: NextSlot::Ready(Piece::new(next)),
            board: Board::new(),
            fast_drop: false,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn piece(&self) -> Piece {
        self.piece
    }

    pub fn anchor(&self) -> Cell {
        self.anchor
    }

    pub fn next(&self) -> NextSlot {
        self.next
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn fast_drop(&self) -> bool {
        self.fast_drop
    }

    fn handle(mut self, event: GameEvent) -> Step {
        match event {
            GameEvent::MoveLeft => {
                self.try_shift(-1);
                Step::stay(Game::Running(self))
            }
            GameEvent::MoveRight => {
                self.try_shift(1);
                Step::stay(Game::Running(self))
            }
            GameEvent::Rotate => {
                self.rotate_clamped();
                Step::stay(Game::Running(self))
            }
            GameEvent::DropStart => {
                self.fast_drop = true;
                Step::stay(Game::Running(self))
            }
            GameEvent::DropStop => {
                self.fast_drop = false;
                Step::stay(Game::Running(self))
            }
            GameEvent::Tick => self.descend(),
            GameEvent::PieceReady(kind) => self.accept_piece(kind),
        }
    }

    /// Horizontal move: blocked by the side walls and by fixated cells.
    fn try_shift(&mut self, dcol: i8) {
        let target = (self.anchor.0 + dcol, self.anchor.1);
        if target.0 + self.piece.leftmost() < 0 {
            return;
        }
        if target.0 + self.piece.rightmost() >= NUM_COLS as i8 {
            return;
        }
        if hits_fixated(&self.piece, target, &self.board) {
            return;
        }
        self.anchor = target;
    }

    /// Rotate in place, clamping only the right edge.
    ///
    /// If the rotated piece would stick out past the right wall, the anchor
    /// shifts left by exactly the overhang. The left edge cannot overhang
    /// (shapes are column-normalized), and neither the floor nor fixated
    /// cells are checked here - the rule rotates through them.
    fn rotate_clamped(&mut self) {
        let rotated = self.piece.rotated();
        let overhang = self.anchor.0 + rotated.rightmost() - (NUM_COLS as i8 - 1);
        if overhang > 0 {
            self.anchor.0 -= overhang;
        }
        self.piece = rotated;
    }

    /// One gravity step: descend, or fixate and advance on contact.
    fn descend(mut self) -> Step {
        let candidate = (self.anchor.0, self.anchor.1 + 1);
        if !collides(&self.piece, candidate, &self.board) {
            self.anchor = candidate;
            return Step::stay(Game::Running(self));
        }

        // Contact: land on the pre-tick cells, then clear and advance.
        self.board.fixate(absolute_cells(&self.piece, self.anchor));
        let cleared = self.board.clear_complete_rows();
        self.score += POINTS_PER_ROW * cleared;

        let NextSlot::Ready(next) = self.next else {
            return Step::stay(Game::Fault {
                message: "piece landed before the requested replacement arrived".into(),
            });
        };
        self.piece = next;
        self.anchor = SPAWN_ANCHOR;
        self.next = NextSlot::Requested;

        let game = if collides(&self.piece, self.anchor, &self.board) {
            Game::GameOver { score: self.score }
        } else {
            Game::Running(self)
        };
        Step::with(game, Command::RequestPiece)
    }

    fn accept_piece(mut self, kind: PieceKind) -> Step {
        match self.next {
            NextSlot::Requested => {
                self.next = NextSlot::Ready(Piece::new(kind));
                Step::stay(Game::Running(self))
            }
            NextSlot::Ready(_) => Step::stay(Game::Fault {
                message: "piece delivered while the preview slot was already full".into(),
            }),
        }
    }
}

/// Overlap-only check used by horizontal moves.
fn hits_fixated(piece: &Piece, anchor: Cell, board: &Board) -> bool {
    piece
        .cells()
        .iter()
        .any(|&(dcol, drow)| board.contains((anchor.0 + dcol, anchor.1 + drow)))
}

/// Collision predicate: floor contact or overlap with a fixated cell.
///
/// Column bounds are enforced proactively by move and rotate handling and are
/// deliberately not rechecked here.
pub fn collides(piece: &Piece, anchor: Cell, board: &Board) -> bool {
    piece.cells().iter().any(|&(dcol, drow)| {
        let cell = (anchor.0 + dcol, anchor.1 + drow);
        cell.1 >= NUM_ROWS as i8 || board.contains(cell)
    })
}

/// A piece's absolute board cells at an anchor.
pub fn absolute_cells(piece: &Piece, anchor: Cell) -> ArrayVec<Cell, 4> {
    piece
        .cells()
        .iter()
        .map(|&(dcol, drow)| (anchor.0 + dcol, anchor.1 + drow))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running(current: PieceKind, next: PieceKind) -> GameState {
        GameState::fresh(current, next)
    }

    fn apply(state: GameState, event: GameEvent) -> Game {
        state.handle(event).game
    }

    fn expect_running(game: Game) -> GameState {
        match game {
            Game::Running(state) => state,
            other => panic!("expected Running, got {other:?}"),
        }
    }

    fn full_row_except(row: i8, gap_cols: &[i8]) -> Vec<Cell> {
        (0..NUM_COLS as i8)
            .filter(|col| !gap_cols.contains(col))
            .map(|col| (col, row))
            .collect()
    }

    #[test]
    fn boot_requests_two_pieces_and_waits_for_both() {
        let (game, commands) = Game::boot();
        assert_eq!(
            commands.as_slice(),
            [Command::RequestPiece, Command::RequestPiece]
        );
        assert_eq!(game, Game::Uninitialized { first: None });

        let game = game.handle(GameEvent::PieceReady(PieceKind::T)).game;
        assert!(!game.is_running());

        let game = game.handle(GameEvent::PieceReady(PieceKind::O)).game;
        let state = expect_running(game);
        assert_eq!(state.score(), 0);
        assert_eq!(state.anchor(), SPAWN_ANCHOR);
        assert_eq!(state.piece(), Piece::new(PieceKind::T));
        assert_eq!(state.next(), NextSlot::Ready(Piece::new(PieceKind::O)));
        assert!(state.board().is_empty());
        assert!(!state.fast_drop());
    }

    #[test]
    fn gameplay_before_initialization_is_ignored() {
        let (game, _) = Game::boot();
        for event in [
            GameEvent::MoveLeft,
            GameEvent::MoveRight,
            GameEvent::Rotate,
            GameEvent::DropStart,
            GameEvent::Tick,
        ] {
            let step = game.clone().handle(event);
            assert_eq!(step.game, game);
            assert!(step.commands.is_empty());
        }
    }

    #[test]
    fn move_left_stops_at_the_wall() {
        let mut state = running(PieceKind::O, PieceKind::O);
        state = expect_running(apply(state, GameEvent::MoveLeft));
        assert_eq!(state.anchor(), (0, 0));
    }

    #[test]
    fn move_right_stops_at_the_wall() {
        let mut state = running(PieceKind::O, PieceKind::O);
        for _ in 0..NUM_COLS {
            state = expect_running(apply(state, GameEvent::MoveRight));
        }
        // O is two cells wide: anchor can reach column 8 at most.
        assert_eq!(state.anchor(), (8, 0));
    }

    #[test]
    fn move_is_blocked_by_fixated_cells() {
        let mut state = running(PieceKind::O, PieceKind::O);
        state.board.fixate([(2, 0)]);
        let before = state.anchor();
        state = expect_running(apply(state, GameEvent::MoveRight));
        assert_eq!(state.anchor(), before);
    }

    #[test]
    fn blocked_move_is_a_no_op_not_an_error() {
        let state = running(PieceKind::O, PieceKind::O);
        let step = state.clone().handle(GameEvent::MoveLeft);
        assert_eq!(step.game, Game::Running(state));
        assert!(step.commands.is_empty());
    }

    #[test]
    fn rotation_clamps_the_right_edge() {
        // Upright I at the right wall; rotating back to horizontal overhangs
        // by three columns and the anchor is pulled left by exactly that.
        let mut state = running(PieceKind::I, PieceKind::O);
        state = expect_running(apply(state, GameEvent::Rotate));
        for _ in 0..NUM_COLS {
            state = expect_running(apply(state, GameEvent::MoveRight));
        }
        assert_eq!(state.anchor(), (9, 0));

        state = expect_running(apply(state, GameEvent::Rotate));
        assert_eq!(state.anchor(), (6, 0));
        assert_eq!(state.anchor().0 + state.piece().rightmost(), 9);
    }

    // Known gap in the rotation rule: only the right edge is checked, so a
    // rotated piece may overlap fixated cells or the floor.
    #[test]
    fn rotation_does_not_check_fixated_overlap() {
        let mut state = running(PieceKind::I, PieceKind::O);
        state.board.fixate([(0, 1), (0, 2), (0, 3)]);
        state = expect_running(apply(state, GameEvent::Rotate));
        let cells = absolute_cells(&state.piece(), state.anchor());
        assert!(cells.iter().any(|cell| state.board().contains(*cell)));
    }

    #[test]
    fn drop_toggles_only_the_flag() {
        let mut state = running(PieceKind::T, PieceKind::O);
        let anchor = state.anchor();

        state = expect_running(apply(state, GameEvent::DropStart));
        assert!(state.fast_drop());
        assert_eq!(state.anchor(), anchor);

        state = expect_running(apply(state, GameEvent::DropStop));
        assert!(!state.fast_drop());
        assert_eq!(state.anchor(), anchor);
    }

    #[test]
    fn tick_descends_exactly_one_row_or_fixates_never_both() {
        let mut state = running(PieceKind::O, PieceKind::T);
        loop {
            let before = state.clone();
            let step = state.handle(GameEvent::Tick);
            state = expect_running(step.game);

            if step.commands.is_empty() {
                // Pure descent: one row down, board untouched.
                assert_eq!(state.anchor(), (before.anchor().0, before.anchor().1 + 1));
                assert_eq!(state.board(), before.board());
            } else {
                // Fixation: the pre-tick cells landed and a new piece spawned.
                assert_eq!(step.commands.as_slice(), [Command::RequestPiece]);
                assert_eq!(state.anchor(), SPAWN_ANCHOR);
                for cell in absolute_cells(&before.piece(), before.anchor()) {
                    assert!(state.board().contains(cell));
                }
                break;
            }
        }
    }

    #[test]
    fn completing_a_row_scores_one_hundred() {
        // Row 19 is complete except for columns 0 and 1; a landing O fills it
        // together with the same columns of row 18.
        let mut state = running(PieceKind::O, PieceKind::T);
        state.board.fixate(full_row_except(19, &[0, 1]));

        for _ in 0..19 {
            state = expect_running(apply(state, GameEvent::Tick));
        }
        assert_eq!(state.score(), 100);
        // Only the shifted O cells remain; the completed row is gone.
        assert_eq!(state.board().row_count(19), 2);
        assert_eq!(state.board().row_count(18), 0);
    }

    #[test]
    fn simultaneous_rows_scale_the_score() {
        // Rows 18 and 19 both complete under one O piece.
        let mut state = running(PieceKind::O, PieceKind::T);
        state.board.fixate(full_row_except(18, &[0, 1]));
        state.board.fixate(full_row_except(19, &[0, 1]));

        for _ in 0..19 {
            state = expect_running(apply(state, GameEvent::Tick));
        }
        assert_eq!(state.score(), 200);
        assert!(state.board().is_empty());
    }

    #[test]
    fn clear_shifts_the_rows_above() {
        // A stray cell above the completed row follows it down by one.
        let mut state = running(PieceKind::O, PieceKind::T);
        state.board.fixate(full_row_except(19, &[0, 1]));
        state.board.fixate([(5, 10)]);

        for _ in 0..19 {
            state = expect_running(apply(state, GameEvent::Tick));
        }
        assert_eq!(state.score(), 100);
        assert!(state.board().contains((5, 11)));
        assert!(!state.board().contains((5, 10)));
    }

    #[test]
    fn spawn_overlap_ends_the_game_with_the_pre_fixation_score() {
        // The spawn area is walled off; the piece in play is already resting
        // on the stack, so the next tick fixates it and the promoted piece
        // collides immediately.
        let mut state = running(PieceKind::O, PieceKind::T);
        state.board.fixate([(0, 2), (1, 2), (2, 0), (2, 1)]);
        state.score = 300;

        let step = state.handle(GameEvent::Tick);
        assert_eq!(step.game, Game::GameOver { score: 300 });
        // The advance still fired its replacement request.
        assert_eq!(step.commands.as_slice(), [Command::RequestPiece]);
    }

    #[test]
    fn landing_without_a_replacement_piece_is_a_fault() {
        let mut state = running(PieceKind::O, PieceKind::T);
        state.next = NextSlot::Requested;
        state.anchor = (0, 18);

        let step = state.handle(GameEvent::Tick);
        assert!(matches!(step.game, Game::Fault { .. }));
        assert!(step.commands.is_empty());
    }

    #[test]
    fn unsolicited_piece_delivery_is_a_fault() {
        let state = running(PieceKind::O, PieceKind::T);
        let step = state.handle(GameEvent::PieceReady(PieceKind::I));
        assert!(matches!(step.game, Game::Fault { .. }));
    }

    #[test]
    fn requested_piece_delivery_refills_the_preview() {
        let mut state = running(PieceKind::O, PieceKind::T);
        state.next = NextSlot::Requested;
        let state = expect_running(state.handle(GameEvent::PieceReady(PieceKind::Z)).game);
        assert_eq!(state.next(), NextSlot::Ready(Piece::new(PieceKind::Z)));
    }

    #[test]
    fn terminal_states_absorb_every_event() {
        for game in [
            Game::GameOver { score: 500 },
            Game::Fault {
                message: "diagnostic".into(),
            },
        ] {
            for event in [
                GameEvent::Tick,
                GameEvent::MoveLeft,
                GameEvent::PieceReady(PieceKind::I),
            ] {
                let step = game.clone().handle(event);
                assert_eq!(step.game, game);
                assert!(step.commands.is_empty());
            }
        }
    }

    #[test]
    fn score_only_grows_in_hundreds() {
        let mut state = running(PieceKind::O, PieceKind::O);
        let mut last_score = 0;
        for _ in 0..200 {
            let step = state.handle(GameEvent::Tick);
            let landed = !step.commands.is_empty();
            match step.game {
                Game::Running(next) => {
                    assert!(next.score() >= last_score);
                    assert_eq!(next.score() % POINTS_PER_ROW, 0);
                    last_score = next.score();
                    state = next;
                }
                Game::GameOver { score } => {
                    assert_eq!(score % POINTS_PER_ROW, 0);
                    return;
                }
                Game::Fault { message } => panic!("unexpected fault: {message}"),
                Game::Uninitialized { .. } => unreachable!(),
            }
            if landed {
                // Answer the replacement request so the next landing can advance.
                state = expect_running(state.handle(GameEvent::PieceReady(PieceKind::O)).game);
            }
        }
        panic!("stacking O pieces at the origin must top out within 200 ticks");
    }
}
