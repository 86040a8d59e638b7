use crossfill::grid::Grid;
use crossfill::solver::Solver;
use crossfill::words::WordList;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    simplelog::TermLogger::init(
        simplelog::LevelFilter::Debug,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let grid = Grid::from_pattern("#.#\n...\n#.#")?;
    println!("grid = {:?}", grid);

    for &slot in grid.slots() {
        println!("slot {} crosses {} others", slot, grid.neighbors(slot).len());
    }

    let words = WordList::new(["CAT", "TAP", "DOG"]);
    println!("words = {:?}", words);

    let mut solver = Solver::new(&grid, &words);
    println!("solver = {:?}", solver);
    println!("search space = {}", solver.search_space());

    match solver.solve() {
        Some(solution) => {
            for &slot in grid.slots() {
                if let Some(word) = solution.get(slot) {
                    println!("{} = {}", slot, words.text(word));
                }
            }
        }
        None => println!("no solution"),
    }
    println!("stats = {}", solver.statistics());

    Ok(())
}
