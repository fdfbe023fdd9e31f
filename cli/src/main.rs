//! `roast` - turn a commit log into statistics and a roast.
//!
//! ```text
//! git log --pretty=format:"%h %ad %s" --date=short | roast
//! roast history.txt --format advanced --author '^Alice' --json
//! ```

use std::io;

use anyhow::Result;
use clap::Parser;

use roast_cli::{init_tracing, run, Args};

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.log_json, args.log_level());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(&args, io::stdin().lock(), &mut out)
}
