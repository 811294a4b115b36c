use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::collections::hash_map::Entry;

use super::prelude::*;

/// Search strategy for enumerating placements. All four visit the same
/// placement set; they differ in the command sequences they record and in
/// per-step cost.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Algorithm {
    #[default]
    Bfs,
    Dfs,
    Dijkstra,
    DijkstraShort,
}

impl std::str::FromStr for Algorithm {
    type Err = Error;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "bfs" => Ok(Algorithm::Bfs),
            "dfs" => Ok(Algorithm::Dfs),
            "dijk" => Ok(Algorithm::Dijkstra),
            "dijk-short" => Ok(Algorithm::DijkstraShort),
            _ => Err(anyhow!("invalid algorithm {s}")),
        }
    }
}

/// Every reachable resting placement, mapped to a shortest command
/// sequence that reaches it from spawn.
pub type MoveMap = HashMap<PieceData, Vec<Command>>;

/// Enumerates all legal final placements of `piece` on `board`, and, when
/// `alternative` names a different kind, of that kind behind a single
/// `hold` prefix. A colliding spawn yields an empty map: the game is lost
/// on the next placement, not an error.
pub fn generate_moves(
    board: &Board,
    piece: Piece,
    alternative: Option<Piece>,
    board_height: usize,
    algorithm: Algorithm,
) -> MoveMap {
    let mut placements = MoveMap::new();

    let spawned = PieceData::spawn(piece, board_height, board.width());
    if board.collides_piece(&spawned) {
        return placements;
    }
    expand(board, spawned, false, algorithm, &mut placements);

    if let Some(alternative) = alternative.filter(|&alternative| alternative != piece) {
        let swapped = PieceData::spawn(alternative, board_height, board.width());
        if !board.collides_piece(&swapped) {
            expand(board, swapped, true, algorithm, &mut placements);
        }
    }

    placements
}

fn expand(board: &Board, spawned: PieceData, held: bool, algorithm: Algorithm, placements: &mut MoveMap) {
    match algorithm {
        Algorithm::Bfs => bfs_expand(board, spawned, held, placements),
        Algorithm::Dfs => {
            let mut visited = HashSet::new();
            let prefix = if held { vec![Command::Hold] } else { vec![] };
            dfs_expand(board, spawned, prefix, placements, &mut visited);
        }
        Algorithm::Dijkstra => dijkstra_expand(board, spawned, held, placements),
        Algorithm::DijkstraShort => dijkstra_short_expand(board, spawned, held, placements),
    }
}

/// First discovery of a placement wins; later discoveries only replace it
/// when strictly shorter.
fn record(placements: &mut MoveMap, piece: PieceData, path: Vec<Command>) {
    match placements.entry(piece) {
        Entry::Occupied(mut entry) => {
            if path.len() < entry.get().len() {
                entry.insert(path);
            }
        }
        Entry::Vacant(entry) => {
            entry.insert(path);
        }
    }
}

fn extended(path: &[Command], next: Command) -> Vec<Command> {
    let mut out = Vec::with_capacity(path.len() + 1);
    out.extend_from_slice(path);
    out.push(next);
    out
}

fn bfs_expand(board: &Board, spawned: PieceData, held: bool, placements: &mut MoveMap) {
    let mut queue: VecDeque<(PieceData, Vec<Command>)> = VecDeque::new();
    let mut visited: HashSet<PieceData> = HashSet::new();
    queue.push_back((spawned, if held { vec![Command::Hold] } else { vec![] }));

    while let Some((piece, path)) = queue.pop_front() {
        if !visited.insert(piece) {
            continue;
        }

        match board.move_drop(&piece) {
            // resting: a placement, and nothing below it left to explore
            None => record(placements, piece, path.clone()),
            Some(next) => queue.push_back((next, extended(&path, Command::Drop))),
        }
        if let Some(next) = board.move_left(&piece) {
            queue.push_back((next, extended(&path, Command::MoveLeft)));
        }
        if let Some(next) = board.move_right(&piece) {
            queue.push_back((next, extended(&path, Command::MoveRight)));
        }
        if let Some(next) = board.rotate_cw(&piece) {
            queue.push_back((next, extended(&path, Command::RotateCw)));
        }
        if let Some(next) = board.rotate_ccw(&piece) {
            queue.push_back((next, extended(&path, Command::RotateCcw)));
        }
    }
}

fn dfs_expand(
    board: &Board,
    piece: PieceData,
    path: Vec<Command>,
    placements: &mut MoveMap,
    visited: &mut HashSet<PieceData>,
) {
    if !visited.insert(piece) {
        return;
    }

    match board.move_drop(&piece) {
        None => record(placements, piece, path.clone()),
        Some(next) => dfs_expand(board, next, extended(&path, Command::Drop), placements, visited),
    }
    if let Some(next) = board.move_left(&piece) {
        dfs_expand(board, next, extended(&path, Command::MoveLeft), placements, visited);
    }
    if let Some(next) = board.move_right(&piece) {
        dfs_expand(board, next, extended(&path, Command::MoveRight), placements, visited);
    }
    if let Some(next) = board.rotate_cw(&piece) {
        dfs_expand(board, next, extended(&path, Command::RotateCw), placements, visited);
    }
    if let Some(next) = board.rotate_ccw(&piece) {
        dfs_expand(board, next, extended(&path, Command::RotateCcw), placements, visited);
    }
}

/// Heap entry ordered by distance, then pose, then path, so ties resolve
/// deterministically.
#[derive(Clone, PartialEq, Eq)]
struct Node {
    distance: u32,
    piece: PieceData,
    path: Vec<Command>,
}

impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Node {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.distance
            .cmp(&other.distance)
            .then_with(|| self.piece.cmp(&other.piece))
            .then_with(|| self.path.cmp(&other.path))
    }
}

struct Frontier {
    heap: BinaryHeap<Reverse<Node>>,
    distance: HashMap<PieceData, u32>,
}

impl Frontier {
    fn seeded(spawned: PieceData, held: bool) -> Frontier {
        let mut frontier = Frontier { heap: BinaryHeap::new(), distance: HashMap::new() };
        frontier.distance.insert(spawned, 0);
        frontier.heap.push(Reverse(Node {
            distance: 0,
            piece: spawned,
            path: if held { vec![Command::Hold] } else { vec![] },
        }));
        frontier
    }

    fn pop(&mut self) -> Option<Node> {
        self.heap.pop().map(|Reverse(node)| node)
    }

    /// Unit-cost edge relaxation.
    fn relax(&mut self, distance: u32, piece: PieceData, path: Vec<Command>) {
        if self.distance.get(&piece).is_none_or(|&known| distance < known) {
            self.distance.insert(piece, distance);
            self.heap.push(Reverse(Node { distance, piece, path }));
        }
    }
}

fn dijkstra_expand(board: &Board, spawned: PieceData, held: bool, placements: &mut MoveMap) {
    let mut frontier = Frontier::seeded(spawned, held);
    let mut visited: HashSet<PieceData> = HashSet::new();

    while let Some(node) = frontier.pop() {
        if !visited.insert(node.piece) {
            continue;
        }
        let next_distance = node.distance + 1;

        match board.move_drop(&node.piece) {
            None => record(placements, node.piece, node.path.clone()),
            Some(next) => frontier.relax(next_distance, next, extended(&node.path, Command::Drop)),
        }
        if let Some(next) = board.move_left(&node.piece) {
            frontier.relax(next_distance, next, extended(&node.path, Command::MoveLeft));
        }
        if let Some(next) = board.move_right(&node.piece) {
            frontier.relax(next_distance, next, extended(&node.path, Command::MoveRight));
        }
        if let Some(next) = board.rotate_cw(&node.piece) {
            frontier.relax(next_distance, next, extended(&node.path, Command::RotateCw));
        }
        if let Some(next) = board.rotate_ccw(&node.piece) {
            frontier.relax(next_distance, next, extended(&node.path, Command::RotateCcw));
        }
    }
}

/// Same graph as `dijkstra_expand` plus unit-cost sonic edges. Every
/// visited node records its sonic-drop landing keyed by the path to the
/// node itself: replay appends an implicit `hard_drop`, which supplies the
/// final descent, so the recorded sequences stay short.
fn dijkstra_short_expand(board: &Board, spawned: PieceData, held: bool, placements: &mut MoveMap) {
    let mut frontier = Frontier::seeded(spawned, held);
    let mut visited: HashSet<PieceData> = HashSet::new();

    while let Some(node) = frontier.pop() {
        if !visited.insert(node.piece) {
            continue;
        }
        record(placements, board.sonic_drop(&node.piece), node.path.clone());

        let next_distance = node.distance + 1;

        if let Some(stepped) = board.move_drop(&node.piece) {
            let slid = board.sonic_drop(&node.piece);
            frontier.relax(next_distance, slid, extended(&node.path, Command::SonicDrop));
            frontier.relax(next_distance, stepped, extended(&node.path, Command::Drop));
        }
        if let Some(stepped) = board.move_left(&node.piece) {
            let slid = board.sonic_left(&node.piece);
            frontier.relax(next_distance, slid, extended(&node.path, Command::SonicLeft));
            frontier.relax(next_distance, stepped, extended(&node.path, Command::MoveLeft));
        }
        if let Some(stepped) = board.move_right(&node.piece) {
            let slid = board.sonic_right(&node.piece);
            frontier.relax(next_distance, slid, extended(&node.path, Command::SonicRight));
            frontier.relax(next_distance, stepped, extended(&node.path, Command::MoveRight));
        }
        if let Some(next) = board.rotate_cw(&node.piece) {
            frontier.relax(next_distance, next, extended(&node.path, Command::RotateCw));
        }
        if let Some(next) = board.rotate_ccw(&node.piece) {
            frontier.relax(next_distance, next, extended(&node.path, Command::RotateCcw));
        }
    }
}
