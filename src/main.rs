use std::io;

use appliances::{run_demo, Args};
use clap::Parser;

fn main() {
    env_logger::init();
    let args = Args::parse();

    let stdout = io::stdout();
    match run_demo(&args, &mut stdout.lock()) {
        Ok(_) => {}
        Err(e) => panic!("{}", e),
    }
}
