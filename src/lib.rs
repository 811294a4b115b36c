pub mod shell;
pub mod tetris;

pub mod utils {
    pub mod prelude {
        pub use anyhow::{anyhow, Context, Error};
        pub type Result<T, E = Error> = anyhow::Result<T, E>;

        pub use std::collections::{HashMap, HashSet, VecDeque};
    }
}

pub mod prelude {
    pub use super::shell::*;
    pub use super::tetris::prelude::*;
    pub use super::utils::prelude::*;
}
