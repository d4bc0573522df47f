use std::io;

use board_games::{connect_four::COLUMNS, ConnectFour};
use color_eyre::eyre::Result;

use crate::play::{run_match, MatchOptions, Playable};

#[derive(clap::Args, Debug)]
pub(crate) struct ConnectFourArgs {
    #[clap(flatten)]
    options: MatchOptions,
}

impl ConnectFourArgs {
    pub(crate) fn run(self) -> Result<()> {
        let depth = self.options.depth.unwrap_or(5);

        run_match(
            ConnectFour::new(),
            &self.options,
            depth,
            io::stdin().lock(),
            io::stdout().lock(),
        )?;

        Ok(())
    }
}

impl Playable for ConnectFour {
    fn prompt(&self) -> String {
        format!("Select column [0-{}]: ", COLUMNS - 1)
    }

    fn parse_move(&self, input: &str) -> Option<usize> {
        input.parse().ok()
    }

    fn describe_move(&self, game_move: &usize) -> String {
        format!("column {}", game_move)
    }
}
