use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::mem;
use std::ops::ControlFlow;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use pi_spigot::config::DEFAULT_GUARD_DIGITS;
use pi_spigot::{PiDigits, Spigot, SpigotConfig, Word};

use crate::progress::StatusLine;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum WordWidth {
    U32,
    U64,
    U128,
}

#[derive(Debug, Parser)]
#[command(
    name = "pi_digits",
    version,
    about = "Compute decimal places of π with the Rabinowitz–Wagon spigot"
)]
pub struct PiCli {
    /// Decimal places to compute
    #[arg(env = "PI_DIGITS", default_value_t = 1000)]
    pub digits: usize,
    /// Width of the digit-array cells
    #[arg(long, short, value_enum, default_value_t = WordWidth::U64)]
    pub word: WordWidth,
    /// Extra engine calls allowed while the last place waits on a carry
    #[arg(long, short, default_value_t = DEFAULT_GUARD_DIGITS)]
    pub guard: usize,
    /// Write the digits here instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,
    /// Break the places every N characters (0 = one line)
    #[arg(long, default_value_t = 0)]
    pub wrap: usize,
    /// No diagnostics or progress on stderr
    #[arg(long, short)]
    pub quiet: bool,
}

impl PiCli {
    pub fn config(&self) -> SpigotConfig {
        SpigotConfig::new(self.digits).guard_digits(self.guard)
    }

    pub fn execute(self) -> Result<()> {
        let pi = match self.word {
            WordWidth::U32 => self.compute::<u32>()?,
            WordWidth::U64 => self.compute::<u64>()?,
            WordWidth::U128 => self.compute::<u128>()?,
        };

        match &self.output {
            Some(path) => {
                let file = File::create(path)
                    .with_context(|| format!("cannot create {}", path.display()))?;
                let mut w = BufWriter::new(file);
                pi.write_wrapped(&mut w, self.wrap)
                    .and_then(|()| w.flush())
                    .with_context(|| format!("cannot write {}", path.display()))?;
                self.log(format_args!("wrote {} places to {}", pi.fractional_len(), path.display()));
            }
            None => {
                let mut out = io::stdout().lock();
                pi.write_wrapped(&mut out, self.wrap).context("cannot write to stdout")?;
            }
        }
        Ok(())
    }

    fn compute<W: Word>(&self) -> Result<PiDigits> {
        let spigot = Spigot::<W>::from_config(self.config())
            .with_context(|| format!("cannot set up a run of {} places", self.digits))?;

        self.log(format_args!("Preparing to calculate {} digits of pi", self.digits));
        self.log(format_args!(
            "{} cells of {}-bit words, up to {} iterations",
            spigot.array().len(),
            mem::size_of::<W>() * 8,
            spigot.remaining(),
        ));

        let mut status = StatusLine::new(io::stderr(), !self.quiet);
        let pi = spigot.run_with(|p| {
            status.update(&p);
            ControlFlow::Continue(())
        });
        if !pi.is_settled() {
            eprintln!(
                "[pi] warning: places after {} are unconfirmed; raise --guard",
                pi.settled_places()
            );
        }
        Ok(pi)
    }

    fn log(&self, msg: std::fmt::Arguments<'_>) {
        if !self.quiet {
            eprintln!("[pi] {}", msg);
        }
    }
}
