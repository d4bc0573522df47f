pub mod connect_four;
pub mod take_away;
pub mod tic_tac_toe;

use connect_four::ConnectFourArgs;
use take_away::TakeAwayArgs;
use tic_tac_toe::TicTacToeArgs;

use clap::Subcommand;
use color_eyre::eyre::Result;

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// 3x3 tic-tac-toe, cells are numbered 0 to 8
    TicTacToe(TicTacToeArgs),
    /// Connect-four on 6 columns and 5 rows, moves are column numbers
    ConnectFour(ConnectFourArgs),
    /// Take 1 to N stones from a pile, taking the last stone wins
    TakeAway(TakeAwayArgs),
}

impl Command {
    pub fn run(self) -> Result<()> {
        match self {
            Command::TicTacToe(t) => t.run()?,
            Command::ConnectFour(c) => c.run()?,
            Command::TakeAway(t) => t.run()?,
        }

        Ok(())
    }
}
