//! Perft runner: count legal-move-tree leaves from a position.
//!
//! Usage: perft [depth] [fen]

use std::env;
use std::process;
use std::time::Instant;

use chesscore::game::Position;

fn main() {
    let mut args = env::args().skip(1);
    let depth: usize = args
        .next()
        .map(|s| s.parse().unwrap_or(4))
        .unwrap_or(4);

    let mut position = match args.next() {
        Some(fen) => match Position::from_fen(&fen) {
            Ok(position) => position,
            Err(err) => {
                eprintln!("bad FEN: {err}");
                process::exit(1);
            }
        },
        None => Position::new(),
    };

    for d in 1..=depth {
        let start = Instant::now();
        let nodes = position.perft(d);
        let elapsed = start.elapsed();
        let nps = nodes as f64 / elapsed.as_secs_f64().max(1e-9);
        println!("depth {d}: {nodes} nodes in {elapsed:?} ({nps:.0} nps)");
    }
}
