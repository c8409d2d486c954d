use std::{
    fmt,
    io::{self, BufRead, Write},
    process,
};

use clap::{App, Arg, ArgMatches};

use flotilla::{
    board::{Board, CellState},
    coord::{row_letters, Coordinate},
    game::{GameConfig, Match, MatchSetup, Session, ShotOutcome},
    player::{PlacementStrategy, ShotLog, ShotMark},
    ships::Orientation,
};

mod logging;

fn main() -> io::Result<()> {
    logging::init();

    let matches = App::new("Batalla Naval")
        .version("1.0")
        .about("Two players, two fleets, one grid. Command line battleship.")
        .arg(
            Arg::with_name("size")
                .short("s")
                .long("size")
                .value_name("SIZE")
                .help("board side length, 1-26 (default 10)")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("p1")
                .long("p1")
                .value_name("MODE")
                .help("pre-select player 1's placement mode")
                .takes_value(true)
                .possible_values(&["manual", "m", "random", "r"])
                .case_insensitive(true),
        )
        .arg(
            Arg::with_name("p2")
                .long("p2")
                .value_name("MODE")
                .help("pre-select player 2's placement mode")
                .takes_value(true)
                .possible_values(&["manual", "m", "random", "r"])
                .case_insensitive(true),
        )
        .get_matches();

    let config = match build_config(&matches) {
        Ok(config) => config,
        Err(msg) => {
            eprintln!("error: {}", msg);
            process::exit(2);
        }
    };

    let stdin = io::stdin();
    let mut input = InputReader::new(stdin.lock());
    let mut rng = rand::thread_rng();
    let mut session = Session::new(config);

    println!("Welcome to Batalla Naval!");
    loop {
        let (name1, name2) = choose_names(&mut input)?;
        let strat1 = choose_strategy(&matches, "p1", &name1, &mut input)?;
        let strat2 = choose_strategy(&matches, "p2", &name2, &mut input)?;

        let mut setup =
            session.new_match([(name1.as_str(), strat1), (name2.as_str(), strat2)]);
        while let Some(current) = setup.setup_player() {
            match setup.player(current).strategy() {
                PlacementStrategy::Random => {
                    if let Err(err) = setup.place_remaining_random(&mut rng) {
                        eprintln!("error: {}", err);
                        process::exit(1);
                    }
                    println!("\n{}'s fleet deployed at random.", setup.player(current).name());
                }
                PlacementStrategy::Manual => place_fleet(&mut setup, current, &mut input)?,
            }
        }

        let mut game = match setup.start() {
            Ok(game) => game,
            // The setup loop above only exits once both fleets are placed.
            Err(_) => unreachable!(),
        };

        let winner = play(&mut game, &mut input)?;
        let winner_name = game.player(winner).name().to_owned();
        println!(
            "\n{} WINS! Every ship of {}'s fleet is on the bottom.",
            winner_name,
            game.player(1 - winner).name()
        );
        session.record_win(&winner_name);
        show_scoreboard(&session);

        let again = input.read_input_lower("\nPlay again? (Y/n)", |input| match input {
            "" | "y" | "yes" => Some(true),
            "n" | "no" => Some(false),
            _ => {
                println!("Please answer y or n.");
                None
            }
        })?;
        if !again {
            break;
        }
        println!("\nStarting a new game...");
    }

    println!("\nFinal standings:");
    show_scoreboard(&session);
    println!("Thanks for playing!");
    Ok(())
}

/// Assemble the session configuration from the command line.
fn build_config(matches: &ArgMatches) -> Result<GameConfig, String> {
    let size = match matches.value_of("size") {
        None => return Ok(GameConfig::default()),
        Some(raw) => raw
            .parse::<usize>()
            .map_err(|_| format!("invalid board size {:?}", raw))?,
    };
    GameConfig::new(size, Default::default()).map_err(|err| err.to_string())
}

/// Prompt for both player names. Names must be non-empty and distinct so
/// the scoreboard can tell the players apart.
fn choose_names<B: BufRead>(input: &mut InputReader<B>) -> io::Result<(String, String)> {
    let name1 = input.read_input("Enter name for Player 1:", |input| {
        if input.is_empty() {
            println!("Names cannot be empty.");
            None
        } else {
            Some(input.to_owned())
        }
    })?;
    let name2 = input.read_input("Enter name for Player 2:", |input| {
        if input.is_empty() {
            println!("Names cannot be empty.");
            None
        } else if input == name1 {
            println!("Players need different names.");
            None
        } else {
            Some(input.to_owned())
        }
    })?;
    Ok((name1, name2))
}

/// Pick a player's placement strategy from the command line args if given,
/// otherwise by prompting.
fn choose_strategy<B: BufRead>(
    matches: &ArgMatches,
    arg: &str,
    name: &str,
    input: &mut InputReader<B>,
) -> io::Result<PlacementStrategy> {
    if let Some(choice) = matches.value_of(arg) {
        return Ok(match choice.to_ascii_lowercase().as_str() {
            "manual" | "m" => PlacementStrategy::Manual,
            "random" | "r" => PlacementStrategy::Random,
            _ => unreachable!(),
        });
    }
    let prompt = format!("{}: place your fleet manually or at random? (M/R)", name);
    input.read_input_lower(&prompt, |input| match input {
        "m" | "manual" => Some(PlacementStrategy::Manual),
        "r" | "random" | "rand" => Some(PlacementStrategy::Random),
        _ => {
            println!("Enter M or R.");
            None
        }
    })
}

/// Walk one player through placing their roster by hand. Every rejected
/// request is re-solicited; the roster never skips a ship.
fn place_fleet<B: BufRead>(
    setup: &mut MatchSetup,
    player: usize,
    input: &mut InputReader<B>,
) -> io::Result<()> {
    println!(
        "\n{}: place your fleet. Cells are called like D5; orientation is H or V.",
        setup.player(player).name()
    );
    while setup.setup_player() == Some(player) {
        let spec = setup.next_ship().expect("setup player with no next ship").clone();
        println!();
        show_fleet_board(setup.player(player).fleet());
        println!("Placing {} (length {}).", spec.name(), spec.length());

        let orientation =
            input.read_input_lower("Orientation (H/V):", |input| match input {
                "h" | "horizontal" => Some(Orientation::Horizontal),
                "v" | "vertical" => Some(Orientation::Vertical),
                _ => {
                    println!("Choose H or V.");
                    None
                }
            })?;
        let origin = read_target(input, "Origin cell (e.g. D5):")?;

        match setup.place_next(origin, orientation) {
            Ok(_) => println!("{} placed.", spec.name()),
            Err(err) => println!("Invalid placement: {}", err),
        }
    }
    println!("\nAll ships placed for {}!", setup.player(player).name());
    Ok(())
}

/// Run the combat phase to its end, returning the winner's index.
fn play<B: BufRead>(game: &mut Match, input: &mut InputReader<B>) -> io::Result<usize> {
    loop {
        let attacker = game.current();
        let defender = game.opponent();
        println!("\n{}'s turn.", game.player(attacker).name());
        println!("Your fleet:");
        show_fleet_board(game.player(attacker).fleet());
        println!("Your shots:");
        show_shot_board(game.player(attacker).shots());

        loop {
            let target = read_target(input, "Call your shot (e.g. B7):")?;
            match game.fire(target) {
                Ok(ShotOutcome::Miss) => {
                    println!("Splash. Miss.");
                    break;
                }
                Ok(ShotOutcome::Hit(_)) => {
                    println!("HIT!");
                    break;
                }
                Ok(ShotOutcome::Sunk(id)) => {
                    println!(
                        "You sank {}'s {}!",
                        game.player(defender).name(),
                        game.player(defender).fleet().ship(id).name()
                    );
                    break;
                }
                Ok(ShotOutcome::Victory(id)) => {
                    println!(
                        "You sank {}'s {}! That was their last ship.",
                        game.player(defender).name(),
                        game.player(defender).fleet().ship(id).name()
                    );
                    return Ok(attacker);
                }
                // Out of range or already targeted: ask again, the turn is
                // not consumed.
                Err(err) => println!("{}. Try again.", err),
            }
        }
    }
}

/// Read coordinate labels until one parses. Range checking is left to the
/// operation that consumes the cell, which reports it with a better error.
fn read_target<B: BufRead>(
    input: &mut InputReader<B>,
    prompt: &str,
) -> io::Result<Coordinate> {
    input.read_input_lower(prompt, |input| match Coordinate::parse_label(input) {
        Ok(coord) => Some(coord),
        Err(err) => {
            println!("{}.", err);
            None
        }
    })
}

/// Print out a player's own fleet board.
fn show_fleet_board(board: &Board) {
    struct FleetCell(CellState);
    impl fmt::Display for FleetCell {
        fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.pad(match self.0 {
                CellState::Empty => "~",
                CellState::Occupied => "#",
                CellState::Hit => "x",
                CellState::Miss => "o",
            })
        }
    }
    show_board(board.size(), board.rows().map(|row| row.map(FleetCell)));
}

/// Print out a player's shot history against their opponent.
fn show_shot_board(shots: &ShotLog) {
    struct ShotCell(ShotMark);
    impl fmt::Display for ShotCell {
        fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.pad(match self.0 {
                ShotMark::Untried => "~",
                ShotMark::Miss => "o",
                ShotMark::Hit => "x",
                ShotMark::Sunk => "X",
            })
        }
    }
    show_board(shots.size(), shots.rows().map(|row| row.map(ShotCell)));
}

/// Show a board by printing the grid with its call-sign headers. Takes an
/// iterator over rows of displayable cells.
fn show_board(size: usize, rows: impl Iterator<Item = impl Iterator<Item = impl fmt::Display>>) {
    print!("    ");
    for col in 1..=size {
        print!("{:^3}", col);
    }
    println!();
    for (row, cells) in rows.enumerate() {
        print!("{:>3} ", row_letters(row));
        for cell in cells {
            print!("{:^3}", cell);
        }
        println!();
    }
}

/// Print the session scoreboard.
fn show_scoreboard(session: &Session) {
    println!("\nScoreboard:");
    for (name, wins) in session.standings() {
        println!("  {}: {} wins", name, wins);
    }
}

/// Helper to read input from the players.
struct InputReader<B> {
    read: B,
    buf: String,
}

impl<B> InputReader<B> {
    fn new(read: B) -> Self {
        Self {
            read,
            buf: String::new(),
        }
    }
}

impl<B: BufRead> InputReader<B> {
    /// Repeatedly tries to read input until the checker returns `Some`.
    /// Converts to ascii lowercase before running the checker.
    fn read_input_lower<F, T>(&mut self, prompt: &str, mut checker: F) -> io::Result<T>
    where
        F: FnMut(&str) -> Option<T>,
    {
        loop {
            self.read_line(prompt)?;
            self.buf.make_ascii_lowercase();
            if let Some(val) = checker(self.buf.trim()) {
                return Ok(val);
            }
        }
    }

    /// Repeatedly tries to read input until the checker returns `Some`.
    fn read_input<F, T>(&mut self, prompt: &str, mut checker: F) -> io::Result<T>
    where
        F: FnMut(&str) -> Option<T>,
    {
        loop {
            self.read_line(prompt)?;
            if let Some(val) = checker(self.buf.trim()) {
                return Ok(val);
            }
        }
    }

    /// Print the prompt, clear the buffer, and read one line. Exits
    /// cleanly on end of input.
    fn read_line(&mut self, prompt: &str) -> io::Result<()> {
        print!("{} ", prompt);
        io::stdout().flush()?;
        self.buf.clear();
        if self.read.read_line(&mut self.buf)? == 0 {
            println!();
            process::exit(0);
        }
        Ok(())
    }
}
