use itertools::Itertools;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use super::garbage::assign_holes;
use super::movegen;
use super::prelude::*;
use super::scoring::calculate_score;

/// A full game: board, queue, hold, garbage and scoring state, advanced
/// one command at a time. Every transition is a pure function of the
/// state, the command and the owned RNG, so a seeded game replays
/// bit-for-bit.
#[derive(Clone, Debug)]
pub struct Game {
    pub options: Options,
    pub board: Board,
    pub queue: VecDeque<Piece>,
    pub garbage_queue: VecDeque<GarbageLine>,
    pub held: Option<Piece>,
    pub current: PieceData,
    pub is_immobile: bool,
    pub can_hold: bool,
    pub combo: u32,
    pub b2b: bool,
    pub score: u32,
    pub pieces_placed: u32,
    pub garbage_cleared: u32,
    pub dead: bool,
    rng: StdRng,
}

impl Game {
    /// A fresh game on OS entropy.
    pub fn new(options: Options) -> Result<Game, GameError> {
        Game::with_rng(options, StdRng::from_os_rng())
    }

    /// A fresh game whose bag order and garbage holes replay exactly.
    pub fn with_seed(options: Options, seed: u64) -> Result<Game, GameError> {
        Game::with_rng(options, StdRng::seed_from_u64(seed))
    }

    fn with_rng(options: Options, mut rng: StdRng) -> Result<Game, GameError> {
        options.validate()?;

        let mut queue: VecDeque<Piece> = Game::shuffled_bag(&mut rng).into();
        let first = queue.pop_front().unwrap_or(Piece::I);
        let current = PieceData::spawn(first, options.board_height, options.board_width);

        Ok(Game {
            board: Board::new(options.board_width),
            queue,
            garbage_queue: VecDeque::new(),
            held: None,
            current,
            is_immobile: false,
            can_hold: true,
            combo: 0,
            b2b: false,
            score: 0,
            pieces_placed: 0,
            garbage_cleared: 0,
            dead: false,
            options,
            rng,
        })
    }

    /// Returns this game to the fresh-bag initial state, keeping its
    /// options and its RNG stream.
    pub fn reset(&mut self) {
        self.board = Board::new(self.options.board_width);
        self.queue = Game::shuffled_bag(&mut self.rng).into();
        self.garbage_queue.clear();
        self.held = None;
        self.current = self.next_piece();
        self.is_immobile = false;
        self.can_hold = true;
        self.combo = 0;
        self.b2b = false;
        self.score = 0;
        self.pieces_placed = 0;
        self.garbage_cleared = 0;
        self.dead = false;
    }

    /// Hydrates a game from the wire snapshot. Garbage hole columns are
    /// not public, so they are re-rolled locally through the messiness
    /// chain.
    pub fn from_snapshot(snapshot: &GameSnapshot, options: Options) -> Result<Game, GameError> {
        Game::from_snapshot_with_rng(snapshot, options, StdRng::from_os_rng())
    }

    /// Snapshot hydration with a deterministic RNG, for replay tests.
    pub fn from_snapshot_seeded(
        snapshot: &GameSnapshot,
        options: Options,
        seed: u64,
    ) -> Result<Game, GameError> {
        Game::from_snapshot_with_rng(snapshot, options, StdRng::seed_from_u64(seed))
    }

    fn from_snapshot_with_rng(
        snapshot: &GameSnapshot,
        options: Options,
        mut rng: StdRng,
    ) -> Result<Game, GameError> {
        options.validate()?;

        let delays: Vec<u32> = snapshot.garbage_queued.iter().map(|line| line.delay).collect();
        let garbage_queue =
            assign_holes(&delays, options.garbage_messiness, options.board_width, &mut rng).into();

        let mut game = Game {
            board: Board::from_rows(snapshot.board.clone(), options.board_width),
            queue: snapshot.queue.iter().copied().collect(),
            garbage_queue,
            held: snapshot.held,
            current: snapshot.current,
            is_immobile: false,
            can_hold: snapshot.can_hold,
            combo: snapshot.combo,
            b2b: snapshot.b2b,
            score: snapshot.score,
            pieces_placed: snapshot.pieces_placed,
            garbage_cleared: snapshot.garbage_cleared,
            dead: snapshot.dead,
            options,
            rng,
        };

        if game.queue.len() < QUEUE_VISIBLE {
            let bag = Game::shuffled_bag(&mut game.rng);
            game.queue.extend(bag);
        }

        Ok(game)
    }

    /// The inverse of `from_snapshot`: the wire view of this game, queue
    /// truncated to the visible window.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board: self.board.rows().to_vec(),
            queue: self.queue.iter().take(QUEUE_VISIBLE).copied().collect(),
            garbage_queued: self
                .garbage_queue
                .iter()
                .map(|line| PublicGarbageLine { delay: line.delay })
                .collect(),
            held: self.held,
            current: self.current,
            can_hold: self.can_hold,
            combo: self.combo,
            b2b: self.b2b,
            score: self.score,
            pieces_placed: self.pieces_placed,
            garbage_cleared: self.garbage_cleared,
            dead: self.dead,
        }
    }

    fn shuffled_bag(rng: &mut StdRng) -> [Piece; BAG_SIZE] {
        let mut bag = Piece::all();
        bag.shuffle(rng);
        bag
    }

    /// Dequeues the next piece at its spawn pose, topping the queue back
    /// up to the visible window with a fresh bag when it runs short.
    fn next_piece(&mut self) -> PieceData {
        let piece = loop {
            match self.queue.pop_front() {
                Some(piece) => break piece,
                None => self.queue.extend(Game::shuffled_bag(&mut self.rng)),
            }
        };
        if self.queue.len() < QUEUE_VISIBLE {
            let bag = Game::shuffled_bag(&mut self.rng);
            self.queue.extend(bag);
        }
        PieceData::spawn(piece, self.options.board_height, self.options.board_width)
    }

    /// Applies one command. Blocked translations and rotations, and a hold
    /// while the hold is spent, are silent no-ops; acting on a dead game
    /// is the caller's bug.
    pub fn execute_command(&mut self, command: Command) -> Result<Vec<Event>, GameError> {
        if self.dead {
            return Err(GameError::GameOver);
        }

        let mut events = Vec::new();

        match command {
            Command::MoveLeft => {
                if let Some(piece) = self.board.move_left(&self.current) {
                    self.current = piece;
                }
            }
            Command::MoveRight => {
                if let Some(piece) = self.board.move_right(&self.current) {
                    self.current = piece;
                }
            }
            Command::Drop => {
                if let Some(piece) = self.board.move_drop(&self.current) {
                    self.current = piece;
                }
            }
            Command::SonicLeft => {
                self.current = self.board.sonic_left(&self.current);
            }
            Command::SonicRight => {
                self.current = self.board.sonic_right(&self.current);
            }
            Command::SonicDrop => {
                self.current = self.board.sonic_drop(&self.current);
            }
            Command::RotateCw => {
                if let Some(piece) = self.board.rotate_cw(&self.current) {
                    self.current = piece;
                    self.is_immobile = self.board.immobile(&self.current);
                }
            }
            Command::RotateCcw => {
                if let Some(piece) = self.board.rotate_ccw(&self.current) {
                    self.current = piece;
                    self.is_immobile = self.board.immobile(&self.current);
                }
            }
            Command::Hold => self.hold(&mut events),
            Command::HardDrop => self.hard_drop(&mut events),
        }

        Ok(events)
    }

    /// Runs a command batch with the conventional implicit `hard_drop`
    /// appended; stops at the first hard drop executed, or silently when
    /// the game dies mid-batch.
    pub fn execute_commands(&mut self, commands: &[Command]) -> Result<Vec<Event>, GameError> {
        let mut events = Vec::new();

        for &command in commands.iter().chain(std::iter::once(&Command::HardDrop)) {
            if self.dead {
                break;
            }
            events.extend(self.execute_command(command)?);
            if command == Command::HardDrop {
                break;
            }
        }

        Ok(events)
    }

    fn hold(&mut self, events: &mut Vec<Event>) {
        if !self.can_hold {
            return;
        }

        let new_held = self.current.piece;
        if let Some(held) = self.held {
            // the held piece goes back through the queue, not straight to
            // the spawner
            self.queue.push_front(held);
        }
        self.current = self.next_piece();
        self.held = Some(new_held);
        self.can_hold = false;
        self.is_immobile = self.board.immobile(&self.current);

        if self.board.collides_piece(&self.current) {
            self.dead = true;
            events.push(Event::GameOver);
        }
    }

    fn hard_drop(&mut self, events: &mut Vec<Event>) {
        let initial = self.current;
        let landed = self.board.sonic_drop(&self.current);
        self.current = landed;
        self.lock(initial, landed, events);
    }

    /// The shared tail of `hard_drop` and `dangerously_drop_piece`: place,
    /// clear, score, cancel, tick garbage, emit, respawn.
    fn lock(&mut self, initial: PieceData, landed: PieceData, events: &mut Vec<Event>) {
        self.board.place(&landed);

        let cleared_lines = self.board.clear_full_rows();
        let cleared = cleared_lines.len();
        self.garbage_cleared += cleared_lines
            .iter()
            .filter(|line| line.blocks.iter().flatten().any(Block::is_garbage))
            .count() as u32;

        let pc = self.board.is_perfect_clear();
        let info = ScoreInfo {
            pc,
            lines_cleared: cleared,
            is_immobile: self.is_immobile,
            b2b: self.b2b,
            combo: self.combo,
        };
        let score_data =
            calculate_score(&info, &self.options.attack_table, &self.options.combo_table);

        self.combo = score_data.combo;
        self.b2b = score_data.b2b;
        self.score += score_data.score;
        self.pieces_placed += 1;

        let mut attack = score_data.score;
        let cancelled = (self.garbage_queue.len() as u32).min(attack);
        for _ in 0..cancelled {
            self.garbage_queue.pop_front();
        }
        attack -= cancelled;

        let tanked = if cleared == 0 { self.tick_garbage() } else { vec![] };

        if let Some(name) = score_data.clear_name {
            log::debug!(
                "{} for {} attack ({} cancelled) at piece {}",
                name,
                attack,
                cancelled,
                self.pieces_placed
            );
        }

        events.push(Event::PiecePlaced { initial, r#final: landed });

        if let Some(clear_name) = score_data.clear_name {
            events.push(Event::Clear {
                clear_name,
                all_spin: score_data.all_spin,
                b2b: score_data.b2b,
                combo: score_data.combo,
                pc,
                attack,
                cancelled,
                piece: landed,
                cleared_lines,
            });
        }

        if !tanked.is_empty() {
            events.push(Event::DamageTanked { hole_indices: tanked });
        }

        self.current = self.next_piece();
        self.can_hold = true;
        self.is_immobile = self.board.immobile(&self.current);

        if self.board.collides_piece(&self.current) {
            self.dead = true;
            events.push(Event::GameOver);
        }
    }

    /// One garbage countdown pass: delay-0 lines materialize under the
    /// stack, survivors tick down by one. Returns the materialized hole
    /// columns in dequeue order.
    fn tick_garbage(&mut self) -> Vec<usize> {
        let mut expired = Vec::new();

        for _ in 0..self.garbage_queue.len() {
            let Some(mut line) = self.garbage_queue.pop_front() else {
                break;
            };
            if line.delay == 0 {
                expired.push(line.index);
            } else {
                line.delay -= 1;
                self.garbage_queue.push_back(line);
            }
        }

        self.board.add_garbage(&expired);
        expired
    }

    /// Queues incoming garbage with this game's configured delay.
    pub fn queue_garbage(&mut self, hole_indices: &[usize]) {
        let delay = self.options.garbage_delay;
        self.garbage_queue
            .extend(hole_indices.iter().map(|&index| GarbageLine { delay, index }));
    }

    /// Queues fully specified garbage lines (opponent feed, test harness).
    pub fn queue_garbage_lines(&mut self, lines: impl IntoIterator<Item = GarbageLine>) {
        self.garbage_queue.extend(lines);
    }

    /// Teleports the current piece to a placement the caller has already
    /// proven reachable (typically a key of `generate_moves`) and locks
    /// it. A kind mismatch swaps through hold first; if that cannot
    /// produce the requested kind the call fails without locking.
    pub fn dangerously_drop_piece(&mut self, piece_data: PieceData) -> Result<Vec<Event>, GameError> {
        if self.dead {
            return Err(GameError::GameOver);
        }

        let mut events = Vec::new();

        if self.current.piece != piece_data.piece {
            if !self.can_hold {
                return Err(GameError::HoldRefused);
            }

            let new_held = self.current.piece;
            if let Some(held) = self.held {
                self.queue.push_front(held);
            }
            self.current = self.next_piece();

            if self.current.piece != piece_data.piece {
                return Err(GameError::HoldRefused);
            }

            self.held = Some(new_held);
            self.can_hold = false;
            self.is_immobile = self.board.immobile(&self.current);

            if self.board.collides_piece(&self.current) {
                self.dead = true;
                events.push(Event::GameOver);
                return Ok(events);
            }
        }

        let initial = self.current;
        self.current = piece_data;
        self.lock(initial, piece_data, &mut events);
        Ok(events)
    }

    /// Every reachable resting placement for the current piece, plus the
    /// hold alternative when one is available.
    pub fn generate_moves(
        &self,
        include_hold: bool,
        include_queue: bool,
        algorithm: Algorithm,
    ) -> MoveMap {
        let held = if include_hold { self.held } else { None };
        let first = if include_queue { self.queue.front().copied() } else { None };
        let alternative = held.or(first);

        movegen::generate_moves(
            &self.board,
            self.current.piece,
            alternative,
            self.options.board_height,
            algorithm,
        )
    }

    pub fn board_stats(&self) -> Statistics {
        self.board.statistics()
    }

    /// A plain-text view of the game for logs and the shell: the stack
    /// (with the falling piece overlaid on request) and the headline
    /// counters.
    pub fn render(&self, with_current: bool) -> String {
        use std::fmt::Write;

        let board = if with_current {
            let mut overlay = self.board.clone();
            overlay.place(&self.current);
            overlay
        } else {
            self.board.clone()
        };

        let mut out = String::new();
        let _ = write!(out, "{board}");
        let _ = writeln!(
            out,
            "score {} | combo {} | b2b {} | placed {}",
            self.score, self.combo, self.b2b, self.pieces_placed
        );
        let _ = writeln!(
            out,
            "hold {} | queue {}",
            self.held.map_or("-".into(), |piece| piece.to_string()),
            self.queue.iter().take(QUEUE_VISIBLE).map(Piece::to_string).join("")
        );
        out
    }
}
