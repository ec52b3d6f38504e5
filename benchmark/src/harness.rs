use std::{
    hint,
    time::{Duration, Instant},
};
use supset::{scalar, ScanElement, SupersetScanner};

use crate::datafile::ScanInput;

fn time<R>(warmup: Duration, run: impl Fn() -> R) -> (Duration, R) {
    let warmup_start = Instant::now();
    while warmup_start.elapsed() < warmup {
        hint::black_box(run());
    }

    let start = Instant::now();
    let result = hint::black_box(run());
    let elapsed = start.elapsed();

    (elapsed, result)
}

pub fn time_scan<T: ScanElement>(
    warmup: Duration,
    input: &ScanInput<T>,
    scanner: SupersetScanner<T>) -> Result<Duration, String>
{
    let set = hint::black_box(input.set.as_slice());
    let run = || scanner.scan(set, hint::black_box(input.query));

    let (elapsed, result) = time(warmup, run);

    ensure_correct(result, input)?;
    Ok(elapsed)
}

fn ensure_correct<T: ScanElement>(result: T, input: &ScanInput<T>) -> Result<(), String> {
    let expected = scalar::naive_position(&input.set, input.query)
        .map(|i| input.set[i])
        .unwrap_or(T::SENTINEL);

    if result == expected {
        Ok(())
    }
    else {
        Err(format!("incorrect result {:#b}, expected {:#b}", result, expected))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_correct_scan() {
        let input = ScanInput { set: vec![0b01u32, 0b11], query: 0b10 };
        let elapsed = time_scan(Duration::ZERO, &input, SupersetScanner::new());
        assert!(elapsed.is_ok());
    }

    #[test]
    fn rejects_wrong_result() {
        let input = ScanInput { set: vec![0b01u32, 0b11], query: 0b10 };
        assert!(ensure_correct(0b01, &input).is_err());
        assert!(ensure_correct(0b11, &input).is_ok());
    }
}
