//! Spigot output checked against π from Machin's formula,
//! π = 16·atan(1/5) − 4·atan(1/239), in big-integer fixed point.

use num_bigint::BigInt;
use num_traits::{One, Zero};
use pi_spigot::{pi_digits, PiStream, Spigot, SpigotConfig};

/// `atan(1/x) · scale`, truncated term by term.
fn arctan_inv(x: u32, scale: &BigInt) -> BigInt {
    let x2 = BigInt::from(x) * BigInt::from(x);
    let mut power = scale / BigInt::from(x); // scale / x^(2k+1)
    let mut sum = power.clone();
    let mut k: u32 = 1;
    loop {
        power /= &x2;
        if power.is_zero() {
            break;
        }
        let term = &power / BigInt::from(2 * k + 1);
        if k % 2 == 1 { sum -= term; } else { sum += term; }
        k += 1;
    }
    sum
}

/// "3.1415…" to `places` decimal places.
fn machin(places: usize) -> String {
    let guard = 10;
    let mut scale = BigInt::one();
    for _ in 0..places + guard {
        scale *= 10u32;
    }
    let pi = arctan_inv(5, &scale) * 16u32 - arctan_inv(239, &scale) * 4u32;
    let s = pi.to_string();
    format!("{}.{}", &s[..1], &s[1..=places])
}

#[test]
fn oracle_self_check() {
    assert_eq!(machin(20), "3.14159265358979323846");
}

#[test]
fn thousand_places_match_machin() {
    let pi = pi_digits(1000).unwrap();
    assert_eq!(pi.as_str(), machin(1000));
    assert_eq!(pi.fractional_len(), 1000);
}

#[test]
fn every_run_up_to_a_thousand_places() {
    let reference = machin(1000);
    for n in 0..=1000 {
        let pi = Spigot::new(n).unwrap().run();
        assert!(pi.is_settled(), "n = {}", n);
        assert_eq!(pi.as_str(), &reference[..n + 2], "n = {}", n);
    }
}

#[test]
fn place_854_waits_out_its_nines() {
    let reference = machin(860);
    let pi = pi_digits(854).unwrap();
    assert_eq!(pi.as_str(), &reference[..856]);
    assert!(pi.as_str().ends_with("3118817101"));
}

#[test]
fn feynman_point() {
    // six 9s from the 762nd decimal place
    let pi = pi_digits(800).unwrap();
    let frac: String = pi.as_str()[2..].to_string();
    assert_eq!(&frac[761..767], "999999");
    assert_eq!(&frac[767..768], "8");
}

#[test]
fn stream_through_feynman_point() {
    let reference = machin(780);
    let streamed: String = PiStream::new(780)
        .unwrap()
        .map(pi_spigot::digit_char)
        .collect();
    assert_eq!(streamed, reference.replace('.', ""));
}

#[test]
fn thirty_two_bit_cells_agree() {
    let cfg = SpigotConfig::new(600);
    let pi = Spigot::<u32>::from_config(cfg).unwrap().run();
    assert_eq!(pi.as_str(), machin(600));
}
