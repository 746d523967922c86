//! NegaScout (principal variation) search with iterative deepening.
//!
//! One parameterized engine replaces the usual family of near-duplicate
//! search classes: the transposition table and the killer-move ordering are
//! both optional extensions selected through [`SearchOptions`]. All search
//! state lives on the session instance; nothing is process-global.
//!
//! The driver deepens one ply at a time under a wall-clock deadline and
//! only ever commits the best move of a fully completed depth. A depth
//! interrupted by the deadline propagates an abort out of the recursion
//! (`Ok(None)`) and its partial root results are discarded, since moves
//! explored before the interrupt would be systematically favoured.

use std::error::Error;
use std::fmt;
use std::time::Instant;

use log::debug;

use crate::eval::evaluator::Evaluator;
use crate::game_state::amazons_types::{decode_col, decode_row, Color, MAX_MOVES_PER_SIDE};
use crate::game_state::board::{Board, BoardError};
use crate::move_generation::move_generator::{generate_moves, side_has_moves};
use crate::moves::move_codec::Move;
use crate::search::killer_table::KillerTable;
use crate::search::transposition_table::{Bound, TableRecord, TableStats, TranspositionTable};
use crate::search::zobrist::{compute_board_hash, update_hash_by_move};

/// Score window bounds. Kept symmetric so negation cannot overflow.
pub const POS_INFINITY: i32 = i32::MAX - 2;
pub const NEG_INFINITY: i32 = -POS_INFINITY;

/// Hard ceiling on iterative-deepening depth. 92 plies fills every free
/// square on the board, so no game can run longer.
pub const ABSOLUTE_MAX_DEPTH: usize = 92;

pub type SearchEngineResult<T> = Result<T, SearchError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// Board mutation failed mid-search; the position has diverged from
    /// the move being applied or undone.
    Board(BoardError),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchError::Board(e) => write!(f, "board mutation failed during search: {e}"),
        }
    }
}

impl Error for SearchError {}

impl From<BoardError> for SearchError {
    fn from(e: BoardError) -> Self {
        SearchError::Board(e)
    }
}

#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Deepening stops after this depth even with time to spare.
    pub max_depth: u8,
    /// Slot count for the transposition table.
    pub table_entries: usize,
    /// Probe and store the transposition table.
    pub use_table: bool,
    /// Order killer moves right behind the table move.
    pub use_killers: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        SearchOptions {
            max_depth: ABSOLUTE_MAX_DEPTH as u8,
            table_entries: 1 << 20,
            use_table: true,
            use_killers: true,
        }
    }
}

/// Result of one `choose_move` call.
#[derive(Debug, Clone, Copy)]
pub struct SearchOutcome {
    /// Best root move of the deepest fully completed depth, or `None` when
    /// no depth completed with a legal move (immediate terminal position);
    /// the caller resolves end-of-game scoring itself.
    pub best_move: Option<Move>,
    /// Root score associated with `best_move`, from the mover's view.
    pub best_score: i32,
    pub depth_completed: u8,
    pub nodes: u64,
    pub table_stats: TableStats,
}

/// A search session. Owns the transposition table, killer table, and score
/// buffers; may be reused across real plies to carry table entries over.
pub struct NegaScout<E: Evaluator> {
    evaluator: E,
    options: SearchOptions,
    table: TranspositionTable,
    killers: KillerTable,
    /// Zobrist key of the position currently on the board, maintained
    /// incrementally around every make/unmake.
    key: u32,
    deadline: Instant,
    nodes: u64,
    /// Best move found so far at each recursion depth.
    best_moves: [Option<Move>; ABSOLUTE_MAX_DEPTH + 1],
    /// Scores fed back into root move ordering between deepening rounds.
    root_scores: Vec<i32>,
    current_root: usize,
}

impl<E: Evaluator> NegaScout<E> {
    pub fn new(evaluator: E, options: SearchOptions) -> Self {
        let table = TranspositionTable::new(options.table_entries);
        NegaScout {
            evaluator,
            options,
            table,
            killers: KillerTable::new(ABSOLUTE_MAX_DEPTH),
            key: 0,
            deadline: Instant::now(),
            nodes: 0,
            best_moves: [None; ABSOLUTE_MAX_DEPTH + 1],
            root_scores: vec![NEG_INFINITY; MAX_MOVES_PER_SIDE],
            current_root: 0,
        }
    }

    /// Adjust the deepening ceiling for subsequent `choose_move` calls.
    pub fn set_max_depth(&mut self, depth: u8) {
        self.options.max_depth = depth.min(ABSOLUTE_MAX_DEPTH as u8);
    }

    /// Pick a move for `side` on `board`. The board is mutated during the
    /// search but restored before returning on every path.
    pub fn choose_move(
        &mut self,
        board: &mut Board,
        side: Color,
        turn: u32,
        deadline: Instant,
    ) -> SearchEngineResult<SearchOutcome> {
        self.deadline = deadline;
        self.key = compute_board_hash(board);
        self.nodes = 0;
        self.current_root = 0;
        self.best_moves = [None; ABSOLUTE_MAX_DEPTH + 1];
        self.root_scores.fill(NEG_INFINITY);
        self.killers.clear();

        let mut outcome = SearchOutcome {
            best_move: None,
            best_score: NEG_INFINITY,
            depth_completed: 0,
            nodes: 0,
            table_stats: self.table.stats(),
        };

        let max_depth = self.options.max_depth.min(ABSOLUTE_MAX_DEPTH as u8);
        let mut depth = 1u8;
        while depth <= max_depth && Instant::now() < self.deadline {
            match self.search(board, 0, depth, NEG_INFINITY, POS_INFINITY, side, turn)? {
                Some(score) => {
                    let Some(best) = self.best_moves[0] else {
                        // Terminal root: nothing to deepen.
                        break;
                    };
                    outcome.best_move = Some(best);
                    outcome.best_score = score;
                    outcome.depth_completed = depth;
                    debug!(
                        "depth {depth} complete: best {best} score {score} nodes {}",
                        self.nodes
                    );
                }
                // Deadline fired mid-depth; partial root results are
                // biased toward the moves explored first, so drop them.
                None => break,
            }
            depth += 1;
        }

        outcome.nodes = self.nodes;
        outcome.table_stats = self.table.stats();
        debug!(
            "search done: depth {} nodes {} tt collisions {}",
            outcome.depth_completed,
            outcome.nodes,
            self.table.collisions()
        );
        Ok(outcome)
    }

    /// One NegaScout node. `Ok(None)` signals a deadline abort unwinding
    /// out of the recursion; board and key are already restored.
    fn search(
        &mut self,
        board: &mut Board,
        depth: u8,
        max_depth: u8,
        mut alpha: i32,
        mut beta: i32,
        side: Color,
        turn: u32,
    ) -> SearchEngineResult<Option<i32>> {
        self.nodes += 1;
        let alpha_original = alpha;
        let remaining = i32::from(max_depth) - i32::from(depth);

        // Probe the table before anything else; a deep-enough hit tightens
        // the window or answers the node outright. Records carry no board
        // signature, so a hit is sanity-checked against the side to move
        // and the stored move's ray legality before it is trusted.
        let mut table_move: Option<Move> = None;
        if self.options.use_table {
            if let Some(record) = self.table.probe(self.key) {
                let plausible = record.side == side
                    && record
                        .best_move
                        .map_or(true, |mv| self.move_is_plausible(board, mv, side));
                if plausible {
                    if i32::from(record.depth) >= remaining {
                        match record.flag {
                            // The root must fall through to the move loop:
                            // answering from the table would leave no best
                            // move behind for the driver to commit.
                            Bound::Exact if depth > 0 => return Ok(Some(record.score)),
                            Bound::Exact => {}
                            Bound::Lower => alpha = alpha.max(record.score),
                            Bound::Upper => beta = beta.min(record.score),
                        }
                    }
                    table_move = record.best_move;
                }
            }
        }

        // Leaf: depth horizon reached, or the side to move is stuck.
        if depth == max_depth || !side_has_moves(board, side) {
            let value = self.evaluator.evaluate(board, side, turn);
            if depth > 0 && -value > self.root_scores[self.current_root] {
                self.root_scores[self.current_root] = -value;
            }
            return Ok(Some(value));
        }

        let mut score = NEG_INFINITY;
        let mut best_here: Option<Move> = None;
        let mut cutoff = false;

        // Try the stored best move first, before paying for generation.
        // The plausibility screen has validated both legs already; should
        // apply_move still reject the move, the trial is skipped.
        if let Some(mv) = table_move {
            match self.search_child(board, mv, depth, max_depth, -beta, -alpha, side, turn) {
                Ok(Some(value)) => {
                    let current = -value;
                    score = score.max(current);
                    if score > alpha {
                        alpha = score;
                        best_here = Some(mv);
                    }
                    if alpha >= beta {
                        cutoff = true;
                    }
                }
                Ok(None) => return Ok(None),
                Err(SearchError::Board(BoardError::SquareOccupied)) => {
                    table_move = None;
                }
                Err(e) => return Err(e),
            }
        }

        let mut successors = generate_moves(board, side);

        if depth == 0 && max_depth > 1 {
            // Root ordering: revisit last round's strongest moves first.
            successors.sort_by_scores(&mut self.root_scores);
        } else if self.options.use_killers && depth > 0 {
            let mut front = 0;
            for killer in self.killers.moves_at(depth as usize).into_iter().flatten() {
                if killer.colour() == side && successors.promote(killer, front) {
                    front += 1;
                }
            }
        }

        let mut scout = beta;
        while !cutoff && successors.has_next() {
            if Instant::now() >= self.deadline {
                return Ok(None);
            }
            let next = successors.next_index();
            let mv = successors.get(next);
            if table_move == Some(mv) {
                continue;
            }
            if depth == 0 {
                self.current_root = next;
                self.root_scores[next] = alpha;
            }

            let first_child = scout == beta && best_here.is_none();
            let value =
                match self.search_child(board, mv, depth, max_depth, -scout, -alpha, side, turn)? {
                    Some(value) => value,
                    None => return Ok(None),
                };
            let mut current = -value;

            // The null window was too narrow: this child looks better than
            // the running best but the bound is not trustworthy, so
            // re-search it with the full window. Shallow subtrees are
            // cheap enough that the scout result is taken as-is.
            if current > score
                && !first_child
                && current > alpha
                && current < beta
                && remaining > 2
            {
                let value = match self
                    .search_child(board, mv, depth, max_depth, -beta, -alpha, side, turn)?
                {
                    Some(value) => value,
                    None => return Ok(None),
                };
                current = -value;
            }

            score = score.max(current);
            if score > alpha {
                alpha = score;
                best_here = Some(mv);
            }

            if alpha >= beta {
                if self.options.use_killers {
                    self.killers.put(mv, depth as usize);
                }
                cutoff = true;
            } else {
                self.root_scores[self.current_root] = current;
                scout = alpha + 1;
            }
        }

        self.best_moves[depth as usize] = best_here;

        if self.options.use_table {
            let flag = if score <= alpha_original {
                Bound::Upper
            } else if score >= beta {
                Bound::Lower
            } else {
                Bound::Exact
            };
            self.table.store(
                self.key,
                TableRecord {
                    depth: remaining as i8,
                    flag,
                    score,
                    best_move: best_here,
                    side,
                },
            );
        }

        Ok(Some(if cutoff { alpha } else { score }))
    }

    /// Apply one child move with incremental key maintenance, recurse into
    /// the opponent's node, and restore both board and key on every path.
    fn search_child(
        &mut self,
        board: &mut Board,
        mv: Move,
        depth: u8,
        max_depth: u8,
        child_alpha: i32,
        child_beta: i32,
        side: Color,
        turn: u32,
    ) -> SearchEngineResult<Option<i32>> {
        let packed = board.amazon_position(side, mv.amazon_index());
        let (old_row, old_col) = (decode_row(packed), decode_col(packed));

        self.key = update_hash_by_move(self.key, mv, old_row, old_col);
        let child: SearchEngineResult<Option<i32>> = board.with_move(mv, |inner| {
            self.search(
                inner,
                depth + 1,
                max_depth,
                child_alpha,
                child_beta,
                side.opposite(),
                turn + 1,
            )
        });
        // XOR update is involutive; the same delta restores the key.
        self.key = update_hash_by_move(self.key, mv, old_row, old_col);
        child
    }

    /// Legality screen for a move pulled out of the table: right colour,
    /// the amazon's current square reaches the finish along a clear ray,
    /// and the arrow ray from the finish is clear with the origin square
    /// treated as vacated.
    fn move_is_plausible(&self, board: &Board, mv: Move, side: Color) -> bool {
        if mv.colour() != side {
            return false;
        }
        let packed = board.amazon_position(side, mv.amazon_index());
        let (row_s, col_s) = (decode_row(packed), decode_col(packed));
        board.is_valid_move(row_s, col_s, mv.finish_row(), mv.finish_col())
            && arrow_ray_is_clear(board, row_s, col_s, mv)
    }

    #[inline]
    pub fn table_stats(&self) -> TableStats {
        self.table.stats()
    }
}

/// Queen-ray check for the arrow leg of a not-yet-applied move. The square
/// `(row_s, col_s)` counts as empty because the amazon will have left it.
fn arrow_ray_is_clear(board: &Board, row_s: u8, col_s: u8, mv: Move) -> bool {
    let (row_f, col_f) = (mv.finish_row(), mv.finish_col());
    let (arow, acol) = (mv.arrow_row(), mv.arrow_col());
    let dr = i16::from(arow) - i16::from(row_f);
    let dc = i16::from(acol) - i16::from(col_f);
    if dr == 0 && dc == 0 {
        return false;
    }
    if dr != 0 && dc != 0 && dr.abs() != dc.abs() {
        return false;
    }
    let (step_r, step_c) = (dr.signum(), dc.signum());
    let (mut r, mut c) = (i16::from(row_f) + step_r, i16::from(col_f) + step_c);
    loop {
        let vacated = (r, c) == (i16::from(row_s), i16::from(col_s));
        if !vacated && board.is_occupied(r as u8, c as u8) {
            return false;
        }
        if (r, c) == (i16::from(arow), i16::from(acol)) {
            return true;
        }
        r += step_r;
        c += step_c;
    }
}
