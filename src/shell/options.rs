use clap::Parser;

use crate::tetris::prelude::*;

/// Command-line configuration for the engine shell.
#[derive(Clone, Debug, Parser)]
pub struct ShellOptions {
    #[arg(short, long)]
    pub log_level: Option<String>,

    /// Seed for the bag and garbage RNG; omit for OS entropy.
    #[arg(short, long)]
    pub seed: Option<u64>,

    #[arg(long, default_value_t = 10)]
    pub board_width: usize,

    #[arg(long, default_value_t = 20)]
    pub board_height: usize,

    #[arg(long, default_value_t = 0.05)]
    pub garbage_messiness: f64,

    #[arg(long, default_value_t = 1)]
    pub garbage_delay: u32,
}

impl ShellOptions {
    pub fn game_options(&self) -> Options {
        Options {
            board_width: self.board_width,
            board_height: self.board_height,
            garbage_messiness: self.garbage_messiness,
            garbage_delay: self.garbage_delay,
            ..Options::default()
        }
    }
}
