use std::io;

use board_games::TicTacToe;
use color_eyre::eyre::Result;

use crate::play::{run_match, MatchOptions, Playable};

#[derive(clap::Args, Debug)]
pub(crate) struct TicTacToeArgs {
    #[clap(flatten)]
    options: MatchOptions,
}

impl TicTacToeArgs {
    pub(crate) fn run(self) -> Result<()> {
        let depth = self.options.depth.unwrap_or(9);

        run_match(
            TicTacToe::new(),
            &self.options,
            depth,
            io::stdin().lock(),
            io::stdout().lock(),
        )?;

        Ok(())
    }
}

impl Playable for TicTacToe {
    fn prompt(&self) -> String {
        "Select move [0-8]: ".to_owned()
    }

    fn parse_move(&self, input: &str) -> Option<usize> {
        input.parse().ok()
    }

    fn describe_move(&self, game_move: &usize) -> String {
        game_move.to_string()
    }
}
