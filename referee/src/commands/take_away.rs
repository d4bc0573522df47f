use std::io;

use adversarial_minimax::Successors;
use board_games::TakeAway;
use color_eyre::eyre::Result;

use crate::play::{run_match, MatchOptions, Playable};

#[derive(clap::Args, Debug)]
pub(crate) struct TakeAwayArgs {
    /// Stones on the pile at the start
    #[clap(long, value_parser, default_value_t = 15)]
    stones: u32,

    /// The most stones a single turn may take
    #[clap(long, value_parser, default_value_t = 3)]
    max_take: u32,

    #[clap(flatten)]
    options: MatchOptions,
}

impl TakeAwayArgs {
    pub(crate) fn run(self) -> Result<()> {
        let pile = TakeAway::new(self.stones, self.max_take)?;
        let depth = self.options.depth.unwrap_or(self.stones.max(1) as usize);

        run_match(
            Successors::new(pile),
            &self.options,
            depth,
            io::stdin().lock(),
            io::stdout().lock(),
        )?;

        Ok(())
    }
}

/// Moves index the successor list, which takes one stone first
impl Playable for Successors<TakeAway> {
    fn prompt(&self) -> String {
        let most = self.board().max_take().min(self.board().stones());
        format!("Take how many stones [1-{}]: ", most)
    }

    fn parse_move(&self, input: &str) -> Option<usize> {
        input.parse::<usize>().ok()?.checked_sub(1)
    }

    fn describe_move(&self, game_move: &usize) -> String {
        format!("take {}", game_move + 1)
    }
}
