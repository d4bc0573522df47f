use std::{
    fmt::Display,
    io::{BufRead, Write},
};

use adversarial_minimax::{AlphaBeta, CachedEngine, GameBoard, MinimaxError, SearchNode};
use color_eyre::eyre::{bail, eyre, Result};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use tracing::{debug, info};

/// What the referee needs on top of [GameBoard] to run a game in the terminal
pub(crate) trait Playable: GameBoard + PartialEq + Clone + Display {
    /// Shown when asking a person for a move
    fn prompt(&self) -> String;

    /// Read a move typed by a person, `None` if the text is not a move at all
    fn parse_move(&self, input: &str) -> Option<Self::Move>;

    /// How a move from this position is shown to a person
    fn describe_move(&self, game_move: &Self::Move) -> String;
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum EngineKind {
    /// Keep one search tree for the whole game
    Cached,
    /// Search every position from scratch with pruning
    AlphaBeta,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Mode {
    /// A person plays against the engine
    Human,
    /// The engine plays against uniformly random moves
    Random,
    /// The engine plays both sides
    #[value(name = "self")]
    SelfPlay,
}

/// Options shared by every game
#[derive(clap::Args, Debug, Clone)]
pub(crate) struct MatchOptions {
    /// How many plies the engine looks ahead. Each game picks its own default
    #[clap(short, long, value_parser)]
    pub(crate) depth: Option<usize>,

    /// Which engine picks the moves
    #[clap(long, value_enum, default_value_t = EngineKind::Cached)]
    pub(crate) engine: EngineKind,

    /// Who the engine plays against
    #[clap(long, value_enum, default_value_t = Mode::Human)]
    pub(crate) mode: Mode,

    /// Let the engine make the first move
    #[clap(long)]
    pub(crate) engine_first: bool,

    /// Seed for the random player, a fresh one is drawn if not given
    #[clap(long, value_parser)]
    pub(crate) seed: Option<u64>,

    /// Print the engine's search tree before every move
    #[clap(long)]
    pub(crate) show_tree: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Seat {
    Engine,
    Human,
    Random,
}

impl MatchOptions {
    fn seats(&self) -> (Seat, Seat) {
        let opponent = match self.mode {
            Mode::Human => Seat::Human,
            Mode::Random => Seat::Random,
            Mode::SelfPlay => Seat::Engine,
        };

        if self.engine_first {
            (Seat::Engine, opponent)
        } else {
            (opponent, Seat::Engine)
        }
    }
}

/// The engine the referee consults, with the position it is tracking
enum Engine<B: GameBoard> {
    Cached {
        engine: CachedEngine<B>,
        depth: usize,
    },
    AlphaBeta {
        searcher: AlphaBeta,
        board: B,
        depth: usize,
    },
}

impl<B: Playable> Engine<B> {
    fn new(kind: EngineKind, board: B, depth: usize) -> Result<Self, MinimaxError> {
        Ok(match kind {
            EngineKind::Cached => Engine::Cached {
                engine: CachedEngine::new(board, depth)?,
                depth,
            },
            EngineKind::AlphaBeta => Engine::AlphaBeta {
                searcher: AlphaBeta::new(),
                board,
                depth,
            },
        })
    }

    fn board(&self) -> &B {
        match self {
            Engine::Cached { engine, .. } => engine.board(),
            Engine::AlphaBeta { board, .. } => board,
        }
    }

    fn best_move(&mut self) -> Result<B::Move, MinimaxError> {
        match self {
            Engine::Cached { engine, .. } => engine.peek_best_move(),
            Engine::AlphaBeta {
                searcher,
                board,
                depth,
            } => searcher
                .find_best_move(*depth, board)?
                .last_move()
                .ok_or(MinimaxError::MissingLastMove),
        }
    }

    /// Commit a move, keeping the cached horizon at the configured depth
    fn play(&mut self, game_move: B::Move) -> Result<(), MinimaxError> {
        match self {
            Engine::Cached { engine, depth } => {
                engine.do_move(game_move)?;
                engine.update(*depth)
            }
            Engine::AlphaBeta { board, .. } => {
                *board = board.make(&game_move)?;
                Ok(())
            }
        }
    }

    fn text_tree(&self) -> Result<String, MinimaxError> {
        let for_maximizer = self.board().is_maximizing();

        match self {
            Engine::Cached { engine, .. } => Ok(engine.root().to_text_tree(for_maximizer)),
            Engine::AlphaBeta { board, depth, .. } => {
                let mut tree = SearchNode::new(board.clone());
                tree.expand_to(*depth)?;

                Ok(tree.to_text_tree(for_maximizer))
            }
        }
    }
}

/// Play `board` to the end, reading a person's moves from `input` and writing the transcript to
/// `output`. Returns the final position.
pub(crate) fn run_match<B, R, W>(
    board: B,
    options: &MatchOptions,
    depth: usize,
    mut input: R,
    mut output: W,
) -> Result<B>
where
    B: Playable,
    R: BufRead,
    W: Write,
{
    if depth == 0 {
        bail!("the engine needs a depth of at least 1");
    }

    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let (first_seat, second_seat) = options.seats();
    let first_player_is_maximizing = board.is_maximizing();

    info!(?options, depth, "starting match");
    let mut engine = Engine::new(options.engine, board, depth)?;

    while !engine.board().is_terminal() {
        writeln!(output, "{}", engine.board())?;
        if options.show_tree {
            writeln!(output, "{}", engine.text_tree()?)?;
        }

        let seat = if engine.board().is_maximizing() == first_player_is_maximizing {
            first_seat
        } else {
            second_seat
        };

        match seat {
            Seat::Engine => {
                let best_move = engine.best_move()?;
                writeln!(
                    output,
                    "Engine plays {}",
                    engine.board().describe_move(&best_move)
                )?;
                engine.play(best_move)?;
            }
            Seat::Random => {
                let random_move = engine
                    .board()
                    .moves()
                    .choose(&mut rng)
                    .cloned()
                    .ok_or(MinimaxError::NoMovesAvailable)?;
                writeln!(
                    output,
                    "Random plays {}",
                    engine.board().describe_move(&random_move)
                )?;
                engine.play(random_move)?;
            }
            Seat::Human => {
                let best_move = engine.best_move()?;
                writeln!(
                    output,
                    "Best move: {}",
                    engine.board().describe_move(&best_move)
                )?;

                human_turn(&mut engine, &mut input, &mut output)?;
            }
        }
    }

    writeln!(output, "{}", engine.board())?;
    writeln!(output, "Game ended")?;

    Ok(engine.board().clone())
}

/// Prompt until the person enters a move the board accepts
fn human_turn<B, R, W>(engine: &mut Engine<B>, input: &mut R, output: &mut W) -> Result<()>
where
    B: Playable,
    R: BufRead,
    W: Write,
{
    loop {
        write!(output, "{}", engine.board().prompt())?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err(eyre!("input ended before the game did"));
        }

        let Some(game_move) = engine.board().parse_move(line.trim()) else {
            debug!(input = line.trim(), "could not parse move");
            writeln!(output, "[!!] Error, please try again")?;
            continue;
        };

        match engine.play(game_move) {
            Ok(()) => return Ok(()),
            Err(e) if e.is_recoverable() => {
                debug!(error = %e, "rejected move");
                writeln!(output, "[!!] Error, please try again")?;
            }
            Err(e) => return Err(e.into()),
        }
    }
}
