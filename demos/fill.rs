use clap::Parser;

use crossfill::grid::Grid;
use crossfill::solver::{Assignment, SolveOptions, SolveOutcome, Solver};
use crossfill::words::WordList;

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Built-in layout to fill (0..=2).
    #[arg(value_name = "INT", default_value = "0")]
    layout: usize,

    /// Re-establish arc consistency after every assignment.
    #[clap(long)]
    mac: bool,

    /// Abort after visiting this many search states.
    #[clap(long, value_name = "INT")]
    budget: Option<u64>,
}

fn layout(index: usize) -> Option<(&'static str, Vec<&'static str>)> {
    match index {
        // A plus shape with one crossing.
        0 => Some(("#.#\n...\n#.#", vec!["CAT", "TAP", "DOG", "TIP"])),
        // A full 3x3 square: three across and three down slots, nine crossings.
        1 => Some((
            "...\n...\n...",
            vec!["BIT", "ONE", "ANT", "BOA", "INN", "TET", "CAT", "DOG"],
        )),
        // A ring: the corner cells tie four 4-letter slots together.
        2 => Some((
            "....\n.##.\n.##.\n....",
            vec!["RUST", "ROOT", "TEAM", "TRAM", "GOLD", "IRON", "ECHO"],
        )),
        _ => None,
    }
}

fn render(grid: &Grid, words: &WordList, solution: &Assignment) -> String {
    let mut canvas = vec![vec!['#'; grid.width()]; grid.height()];
    for (slot, word) in solution.iter() {
        for (pos, (row, col)) in slot.cells().enumerate() {
            canvas[row][col] = words.char_at(word, pos);
        }
    }
    let rows: Vec<String> = canvas.into_iter().map(|row| row.into_iter().collect()).collect();
    rows.join("\n")
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    simplelog::TermLogger::init(
        simplelog::LevelFilter::Info,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let time_total = std::time::Instant::now();

    let args = Cli::parse();
    println!("args = {:?}", args);

    let Some((pattern, list)) = layout(args.layout) else {
        color_eyre::eyre::bail!("no built-in layout with index {}", args.layout);
    };

    let grid = Grid::from_pattern(pattern)?;
    println!("grid = {:?}", grid);
    let words = WordList::new(list);
    println!("words = {:?}", words);

    let mut options = SolveOptions::new().with_arc_consistency(args.mac);
    if let Some(budget) = args.budget {
        options = options.with_node_budget(budget);
    }

    let mut solver = Solver::new(&grid, &words);
    println!("search space = {}", solver.search_space());

    match solver.solve_with(&options) {
        SolveOutcome::Solved(solution) => {
            println!("{}", render(&grid, &words, &solution));
            for &slot in grid.slots() {
                if let Some(word) = solution.get(slot) {
                    println!("{} = {}", slot, words.text(word));
                }
            }
        }
        SolveOutcome::NoSolution => println!("no solution"),
        SolveOutcome::Aborted => println!("aborted after {} states", solver.statistics().states),
    }
    println!("stats = {}", solver.statistics());

    let time_total = time_total.elapsed();
    println!("Done in {:.3} s", time_total.as_secs_f64());

    Ok(())
}
