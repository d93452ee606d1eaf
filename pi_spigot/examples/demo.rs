//! Walks through the layers of the spigot, bottom up.

use std::ops::ControlFlow;

use pi_spigot::{
    digit_char, DigitArray, PiStream, PredigitBuffer, Spigot, SpigotConfig,
};

fn show(label: &str, digits: &[u8]) {
    let s: String = digits.iter().map(|&d| digit_char(d)).collect();
    println!("   {:<30} {:?}  ({})", label, digits, s);
}

fn main() {
    println!("\n=== Rabinowitz–Wagon π Spigot Demo ===\n");

    // ── 1. Raw predigits straight from the array ──────────────────────────
    println!("1. Raw predigits (no buffering)");
    let mut array = DigitArray::new(37).unwrap();
    let raw: Vec<u8> = (0..10).map(|_| array.next_predigit()).collect();
    println!("   predigits : {:?}", raw);
    println!("   cells[..8] after 10 calls: {:?}", &array.cells()[..8]);
    println!();

    // ── 2. Predigit buffer resolving a carry ──────────────────────────────
    println!("2. A 10 rolls the held run over");
    let mut buf = PredigitBuffer::new();
    let mut out = Vec::new();
    for p in [2u8, 7, 9, 9, 9, 10, 4] {
        let released = buf.push(p, &mut out);
        println!("   push {:>2} → released {}  held {:?}", p, released, buf.held());
    }
    buf.finish(&mut out);
    show("final:", &out);
    println!();

    // ── 3. A whole run ────────────────────────────────────────────────────
    println!("3. π to 60 places");
    let pi = Spigot::new(60).unwrap().run();
    println!("   {}", pi);
    println!("   ({} guard digits discarded)", pi.discarded());
    println!();

    // ── 4. Progress and early stop ────────────────────────────────────────
    println!("4. Stop once 25 places are out");
    let pi = Spigot::new(500).unwrap().run_with(|p| {
        println!("   +{} → {} / {} ({:.1}%)", p.released, p.emitted, p.requested, p.percent());
        if p.emitted >= 25 { ControlFlow::Break(()) } else { ControlFlow::Continue(()) }
    });
    println!("   {}", pi);
    println!("   (first {} places settled)", pi.settled_places());
    println!();

    // ── 5. The lazy stream, through the Feynman point ─────────────────────
    println!("5. Places 755–770");
    let around: Vec<u8> = PiStream::new(770).unwrap().skip(755).collect();
    show("digits:", &around);
    println!();

    // ── 6. Nines past the last place ──────────────────────────────────────
    println!("6. Settling place 854 (predigits 0, 9, 9, 9, 10)");
    for guard in [2, 16] {
        let cfg = SpigotConfig::new(854).guard_digits(guard);
        let mut s = Spigot::<u64>::from_config(cfg).unwrap();
        while s.step().is_some() {}
        let calls = s.array().calls();
        let pi = s.finish();
        println!(
            "   guard {:>2}: {} calls, ends …{}, settled: {}",
            guard, calls, &pi.as_str()[848..], pi.is_settled()
        );
    }
    println!();

    // ── 7. Narrow words ───────────────────────────────────────────────────
    println!("7. Cell width limits");
    for n in [100, 400, 500] {
        match Spigot::<u16>::from_config(SpigotConfig::new(n)) {
            Ok(s)  => println!("   u16, {:>3} places: ok ({} cells)", n, s.array().len()),
            Err(e) => println!("   u16, {:>3} places: {}", n, e),
        }
    }
}
