//! Interactive menu for computing π to a chosen number of places.

use pi_spigot::{digit_char, Spigot, SpigotError};
use std::io::{self, Write};

const MAX_PLACES: usize = 100_000;

fn main() {
    println!();
    println!("╔══════════════════════════════════════════════════════╗");
    println!("║          Rabinowitz–Wagon π Spigot Explorer          ║");
    println!("╚══════════════════════════════════════════════════════╝");
    println!();

    loop {
        let choice = read_line("How many decimal places? (default 50, q to quit): ");

        // Empty read means stdin closed
        if choice.is_empty() || choice.trim().eq_ignore_ascii_case("q") {
            println!("\nGoodbye!\n");
            break;
        }

        let n: usize = choice.trim().parse().unwrap_or(50);
        let n = n.min(MAX_PLACES);

        if let Err(e) = show(n) {
            println!("  ⚠  {}\n", e);
        }
    }
}

fn show(n: usize) -> Result<(), SpigotError> {
    let spigot = Spigot::new(n)?;
    let cells = spigot.array().len();
    let pi = spigot.run();

    println!();
    println!("  ┌─ π to {} places ({} cells) ─", n, cells);
    println!("  │");

    // Integer part, point, then places wrapped at 60
    let digits = pi.digits();
    print!("  │    {}.", digit_char(digits[0]));
    for (i, &d) in digits[1..].iter().enumerate() {
        if i > 0 && i % 60 == 0 {
            print!("\n  │      ");
        }
        print!("{}", digit_char(d));
    }
    println!();
    println!("  └─ ({} places emitted)", pi.fractional_len());
    if !pi.is_settled() {
        println!("  ⚠  only the first {} places are confirmed", pi.settled_places());
    }

    if n <= 30 {
        println!();
        println!("  Raw digit vec : {:?}", &digits);
    }
    println!();
    Ok(())
}

fn read_line(prompt: &str) -> String {
    print!("{}", prompt);
    io::stdout().flush().ok();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf
}
