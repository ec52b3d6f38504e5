use colored::Colorize;
use rand::{distributions::Standard, prelude::Distribution, seq::SliceRandom, Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::{
    datafile::ScanInput,
    schema::{ScanInfo, PERCENT, PERCENT_F},
    util::Byteable,
};

const MAX_LENGTH_LOG2: u32 = 30;

/// Generates a sequence of `2^length` elements in which every element
/// misses at least one query bit, except a single planted match (if
/// `props.hit`) at relative position `props.position`.
pub fn gen_scan<T>(props: &ScanInfo, seed: u64) -> ScanInput<T>
where
    T: Byteable,
    Standard: Distribution<T>,
{
    let rng = &mut ChaCha8Rng::seed_from_u64(seed);

    let length_log2 = props.length.min(MAX_LENGTH_LOG2);
    if length_log2 < props.length {
        warn_length(props.length);
    }
    let len = 1usize << length_log2;

    let query_bits = props.query_bits.clamp(1, T::BITS);
    if query_bits != props.query_bits {
        warn_query_bits(props.query_bits, query_bits);
    }

    let bits = random_bits::<T>(rng, query_bits as usize);
    let query = bits.iter()
        .fold(T::zero(), |q, &bit| q | (T::one() << bit));

    let mut set: Vec<T> = (0..len)
        .map(|_| {
            let missing = *bits.choose(rng).unwrap_or(&0);
            rng.gen::<T>() & !(T::one() << missing)
        })
        .collect();

    if props.hit {
        let at = match_index(len, props.position);
        set[at] = set[at] | query;
    }

    ScanInput { set, query }
}

/// Index of a match planted at `position` (in PERCENT units) of `len`.
pub fn match_index(len: usize, position: u32) -> usize {
    let position = position.min(PERCENT) as f64 / PERCENT_F;
    (position * (len - 1) as f64) as usize
}

fn random_bits<T: Byteable>(rng: &mut ChaCha8Rng, count: usize) -> Vec<usize> {
    let mut positions: Vec<usize> = (0..T::BITS as usize).collect();
    positions.shuffle(rng);
    positions.truncate(count);
    positions
}

fn warn_length(length_log2: u32) {
    println!("{}", format!(
        "warning: length 2^{} capped at 2^{}",
        length_log2, MAX_LENGTH_LOG2).yellow());
}

fn warn_query_bits(requested: u32, used: u32) {
    println!("{}", format!(
        "warning: {} query bits requested, using {}",
        requested, used).yellow());
}
