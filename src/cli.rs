//! Command dispatch. Grounded on `examples/original_source/src/main.c`'s
//! `main()` (lines 2769-2815) for the command table and on its `moves`/
//! `play`/`eval`/`hash`/`scores` handlers for each command's exact output
//! shape; also grounded on `pleco`'s `uci.rs::console_loop` for matching on
//! `args.first()` rather than reaching for an argument-parsing crate. JSON
//! output uses `serde`/`serde_json` instead of the original's hand-built
//! `printf` concatenation, per SPEC_FULL.md §6.

use harrier::board::Position;
use harrier::book::OpeningBook;
use harrier::config::EngineConfig;
use harrier::eval::eval_relative;
use harrier::movegen::legal_moves;
use harrier::perft::{perft_parallel, root_moves};
use harrier::search::{order, play as run_search};
use harrier::tt::TranspositionTable;
use serde::Serialize;
use std::collections::BTreeMap;
use std::time::Instant;

const ENGINE_NAME: &str = "Harrier Chess Engine";
const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Serialize)]
struct PerftDeepReport {
    depth: u32,
    nodes: u64,
    time: f64,
    nps: f64,
}

#[derive(Serialize)]
struct PerftShallowReport {
    nodes: u64,
    moves: Vec<String>,
}

#[derive(Serialize)]
struct PlayReport {
    scores: BTreeMap<String, f64>,
    millis: u64,
    depth: u16,
    time: f64,
    eval: f64,
    #[serde(rename = "move")]
    mv: String,
}

/// Runs the command named by `args` (excluding the program name), returning
/// the process exit code, per spec.md §6's "exit code 0 on success, 1 on
/// misuse or parse error". Leading `--tt-size=N` / `--book=PATH` flags are
/// consumed into an `EngineConfig` before the remaining positionals are
/// matched against the command table.
pub fn run(args: &[String]) -> i32 {
    let (config, args) = EngineConfig::from_args(args);
    match args.first().map(|s| s.as_str()) {
        None | Some("help") | Some("--help") | Some("-h") => {
            help();
            0
        }
        Some("version") | Some("--version") | Some("-v") => {
            version();
            0
        }
        Some("moves") if args.len() == 3 => cmd_moves(&args[1], &args[2]),
        Some("eval") if args.len() == 2 => cmd_eval(&args[1]),
        Some("hash") if args.len() == 2 => cmd_hash(&args[1]),
        Some("scores") if args.len() == 2 => cmd_scores(&args[1]),
        Some("play") if args.len() == 3 || args.len() == 4 => {
            cmd_play(&config, &args[1], &args[2], args.get(3), false)
        }
        Some("fancy") if args.len() == 3 || args.len() == 4 => {
            cmd_play(&config, &args[1], &args[2], args.get(3), true)
        }
        _ => {
            help();
            1
        }
    }
}

fn help() {
    println!("Usage: harrier <command>");
    println!("Commands:");
    println!("  {:<28}Show this help message", "help");
    println!("  {:<28}Show version information", "version");
    println!("  {:<28}Show legal moves for the given position", "moves <FEN> <depth>");
    println!("  {:<28}Get the evaluation of the given position", "eval <FEN>");
    println!("  {:<28}Bot plays a move based on the given position", "play <FEN> <millis> [history]");
    println!("  {:<28}Same as play, with depth-2 delta re-weighting", "fancy <FEN> <millis> [history]");
    println!("  {:<28}Print the position's Zobrist hash", "hash <FEN>");
    println!("  {:<28}Print ordered move-generator scores", "scores <FEN>");
    println!("Flags:");
    println!("  {:<28}Transposition table size in entries", "--tt-size=<N>");
    println!("  {:<28}Opening book path (default book.txt)", "--book=<PATH>");
}

fn version() {
    println!("{} {}", ENGINE_NAME, ENGINE_VERSION);
}

fn parse_position(fen: &str) -> Option<Position> {
    match Position::from_fen(fen) {
        Ok(pos) => Some(pos),
        Err(e) => {
            log::error!("FEN parsing error: {}: {}", e, fen);
            None
        }
    }
}

fn cmd_moves(fen: &str, depth_str: &str) -> i32 {
    let pos = match parse_position(fen) {
        Some(p) => p,
        None => return 1,
    };
    let depth: u32 = match depth_str.parse() {
        Ok(d) => d,
        Err(_) => {
            log::error!("depth '{}' is not a valid integer", depth_str);
            return 1;
        }
    };

    if depth > 1 {
        let start = Instant::now();
        let nodes = perft_parallel(&pos, depth);
        let elapsed = start.elapsed().as_secs_f64();
        let nps = if elapsed > 0.0 {
            nodes as f64 / elapsed
        } else {
            0.0
        };
        let report = PerftDeepReport {
            depth,
            nodes,
            time: elapsed,
            nps,
        };
        println!("{}", serde_json::to_string_pretty(&report).unwrap());
    } else {
        let moves = root_moves(&pos);
        let report = PerftShallowReport {
            nodes: moves.len() as u64,
            moves: moves.iter().map(|m| m.to_uci()).collect(),
        };
        println!("{}", serde_json::to_string_pretty(&report).unwrap());
    }
    0
}

fn cmd_eval(fen: &str) -> i32 {
    let pos = match parse_position(fen) {
        Some(p) => p,
        None => return 1,
    };
    println!("{:.6}", eval_relative(&pos) as f64 / 100.0);
    0
}

fn cmd_hash(fen: &str) -> i32 {
    let pos = match parse_position(fen) {
        Some(p) => p,
        None => return 1,
    };
    println!("{:x}", pos.zhash);
    0
}

fn cmd_scores(fen: &str) -> i32 {
    let pos = match parse_position(fen) {
        Some(p) => p,
        None => return 1,
    };
    let mut moves = Vec::new();
    legal_moves(&pos, &mut moves, false);
    order::score_and_sort(&pos, &mut moves, moves.len());

    let mut printed_ellipsis = false;
    for mv in &moves {
        if mv.score != 0 {
            println!("{:<5} {:>6}", mv.to_uci(), mv.score);
        } else if !printed_ellipsis {
            println!("{:<5} {:>6}", "...", 0);
            printed_ellipsis = true;
        }
    }
    0
}

fn cmd_play(
    config: &EngineConfig,
    fen: &str,
    millis_str: &str,
    history_arg: Option<&String>,
    fancy: bool,
) -> i32 {
    let pos = match parse_position(fen) {
        Some(p) => p,
        None => return 1,
    };
    let millis: u64 = match millis_str.parse() {
        Ok(m) if m >= 1 => m,
        _ => {
            log::error!("millis '{}' is not a positive integer", millis_str);
            return 1;
        }
    };

    let mut history_hashes = Vec::new();
    if let Some(history) = history_arg {
        for prior_fen in history.split(',') {
            let prior_fen = prior_fen.trim();
            if prior_fen.is_empty() {
                continue;
            }
            match Position::from_fen(prior_fen) {
                Ok(p) => history_hashes.push(p.zhash),
                Err(e) => {
                    log::error!("FEN parsing error in history: {}: {}", e, prior_fen);
                    return 1;
                }
            }
        }
    }

    let book = load_book(&config.book_path);
    let tt = TranspositionTable::with_capacity(config.tt_size_entries);
    let start = Instant::now();
    let result = run_search(&pos, millis, &history_hashes, &book, &tt, fancy);
    let elapsed = start.elapsed().as_secs_f64();

    let best_move = match result.best_move {
        Some(mv) => mv,
        None => {
            log::error!("no legal move in position: {}", fen);
            return 1;
        }
    };

    let mut scores = BTreeMap::new();
    let eval_pawns = if result.from_book {
        scores.insert(best_move.to_uci(), 0.0);
        0.0
    } else {
        for rm in &result.scores {
            scores.insert(rm.mv.to_uci(), rm.score as f64 / 100.0);
        }
        let side_relative_best = result.scores.first().map(|rm| rm.score).unwrap_or(0);
        let white_relative = if pos.side_to_move == harrier::core::Player::White {
            side_relative_best
        } else {
            -side_relative_best
        };
        white_relative as f64 / 100.0
    };

    let report = PlayReport {
        scores,
        millis: if result.from_book { 0 } else { millis },
        depth: if result.from_book { 0 } else { result.depth_reached },
        time: if result.from_book { 0.0 } else { elapsed },
        eval: eval_pawns,
        mv: best_move.to_uci(),
    };
    println!("{}", serde_json::to_string_pretty(&report).unwrap());
    0
}

fn load_book(path: &str) -> OpeningBook {
    match std::fs::read_to_string(path) {
        Ok(text) => match OpeningBook::parse(&text) {
            Ok(book) => book,
            Err(e) => {
                log::warn!("opening book parse error, continuing without a book: {}", e);
                OpeningBook::empty()
            }
        },
        Err(_) => OpeningBook::empty(),
    }
}
