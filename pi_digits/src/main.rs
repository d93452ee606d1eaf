//! pi_digits — compute π to a fixed number of places and print it.

mod cli;
mod progress;

use anyhow::Result;
use clap::Parser;

use cli::PiCli;

fn main() -> Result<()> {
    PiCli::parse().execute()
}
