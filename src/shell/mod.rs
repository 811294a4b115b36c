mod options;

use std::process::exit;

pub use options::ShellOptions;

use crate::prelude::*;

/// Line-oriented driver for the engine: one command per line on stdin,
/// JSON payloads and an `ok`/`err` terminator per command on stdout. This
/// is the surface a bot process talks to over a pipe.
pub struct EngineShell {
    game: Game,
    config: ShellOptions,
}

impl EngineShell {
    /// Builds a shell and its game from the parsed command line.
    pub fn new(config: ShellOptions) -> Result<EngineShell> {
        let game = EngineShell::fresh_game(&config, None)?;
        Ok(EngineShell { game, config })
    }

    fn fresh_game(config: &ShellOptions, seed_override: Option<u64>) -> Result<Game> {
        let options = config.game_options();
        let game = match seed_override.or(config.seed) {
            Some(seed) => Game::with_seed(options, seed)?,
            None => Game::new(options)?,
        };
        Ok(game)
    }

    /// Reads and applies commands until stdin closes.
    pub fn run(&mut self) -> Result<()> {
        loop {
            let mut line = String::new();
            if std::io::stdin().read_line(&mut line)? == 0 {
                return Ok(());
            }

            let args: Vec<&str> = line.split_whitespace().collect();
            let cmd = *args.first().unwrap_or(&"");

            self.apply(cmd, &args[1..]);
        }
    }

    /// Runs a command; recoverable errors are reported inline and never
    /// tear the shell down.
    fn apply(&mut self, cmd: &str, args: &[&str]) {
        let result = match cmd {
            "" => Ok(()),
            "newgame" => self.new_game(args),
            "exec" => self.exec(args),
            "place" => self.place_at(args),
            "moves" => self.moves(args),
            "garbage" => self.garbage(args),
            "queue" => self.queue(args),
            "setboard" => self.set_board(args),
            "state" => self.state(),
            "stats" => self.stats(),
            "render" => self.render(),
            "quit" => exit(0),
            _ => Err(anyhow!("unrecognized command {cmd}")),
        };

        match result {
            Ok(_) => {
                log::debug!("command completed: {cmd} {}", args.join(" "));
                println!("ok");
            }
            Err(err) => {
                log::warn!("encountered recoverable error:\n{err}");
                println!("err {err}");
            }
        }
    }

    /// `newgame [seed]`: replaces the running game.
    fn new_game(&mut self, args: &[&str]) -> Result<()> {
        let seed = match args {
            [] => None,
            [seed, ..] => Some(seed.parse::<u64>().context("seed must be a u64")?),
        };
        self.game = EngineShell::fresh_game(&self.config, seed)?;
        Ok(())
    }

    /// `exec <command>...`: runs a batch (with its implicit hard drop)
    /// and prints the emitted events.
    fn exec(&mut self, args: &[&str]) -> Result<()> {
        let commands = args
            .iter()
            .map(|arg| arg.parse::<Command>())
            .collect::<std::result::Result<Vec<_>, _>>()?;
        let events = self.game.execute_commands(&commands)?;
        println!("{}", serde_json::to_string(&events)?);
        Ok(())
    }

    /// `place <piece> <x> <y> <rotation>`: teleport-locks an analytically
    /// chosen placement, exactly as a search bot would.
    fn place_at(&mut self, args: &[&str]) -> Result<()> {
        let [piece, x, y, rotation] = args else {
            return Err(anyhow!("usage: place <piece> <x> <y> <rotation>"));
        };
        let placement = PieceData {
            piece: piece.parse()?,
            x: x.parse()?,
            y: y.parse()?,
            rotation: rotation.parse::<Rotation>().map(|r| r & 3)?,
        };
        let events = self.game.dangerously_drop_piece(placement)?;
        println!("{}", serde_json::to_string(&events)?);
        Ok(())
    }

    /// `moves [algo]`: every reachable placement with a shortest input
    /// sequence, one JSON object per line in pose order.
    fn moves(&mut self, args: &[&str]) -> Result<()> {
        let algorithm = match args {
            [] => Algorithm::default(),
            [name, ..] => name.parse()?,
        };

        let mut placements: Vec<_> = self
            .game
            .generate_moves(true, true, algorithm)
            .into_iter()
            .collect();
        placements.sort_by_key(|(placement, _)| *placement);

        for (placement, commands) in placements {
            println!(
                "{}",
                serde_json::json!({ "placement": placement, "commands": commands })
            );
        }
        Ok(())
    }

    /// `garbage <hole>...`: queues garbage with the configured delay.
    fn garbage(&mut self, args: &[&str]) -> Result<()> {
        let holes = args
            .iter()
            .map(|arg| {
                let hole = arg.parse::<usize>()?;
                if hole >= self.game.options.board_width {
                    return Err(anyhow!("hole {hole} is outside the board"));
                }
                Ok(hole)
            })
            .collect::<Result<Vec<_>>>()?;
        self.game.queue_garbage(&holes);
        Ok(())
    }

    /// `queue <piece>...`: pushes kinds onto the front of the piece
    /// queue, first argument next to spawn. Scripted-scenario helper.
    fn queue(&mut self, args: &[&str]) -> Result<()> {
        let pieces = args
            .iter()
            .map(|arg| arg.parse::<Piece>())
            .collect::<Result<Vec<_>>>()?;
        for piece in pieces.into_iter().rev() {
            self.game.queue.push_front(piece);
        }
        Ok(())
    }

    /// `setboard <rows>`: replaces the stack with `|`-separated rows in
    /// render order (top-down), e.g. `setboard GGGG.GGGGG`.
    fn set_board(&mut self, args: &[&str]) -> Result<()> {
        let notation = args.join("|");
        self.game.board = parse_board(&notation, self.game.options.board_width)?;
        self.game.is_immobile = self.game.board.immobile(&self.game.current);
        Ok(())
    }

    fn state(&self) -> Result<()> {
        println!("{}", serde_json::to_string(&self.game.snapshot())?);
        Ok(())
    }

    fn stats(&self) -> Result<()> {
        println!("{}", serde_json::to_string(&self.game.board_stats())?);
        Ok(())
    }

    fn render(&self) -> Result<()> {
        print!("{}", self.game.render(true));
        Ok(())
    }
}
