#![forbid(unsafe_code)]

use rand::Rng;
use rand::prelude::IndexedRandom;
use rand::prelude::IteratorRandom;
use rustc_hash::FxHashSet;

use crate::ATerm;
use crate::ATermList;
use crate::TermPool;

/// Function names that are used by [random_mixed_term], some of which must be quoted in the text format.
const MIXED_NAMES: [&str; 8] = ["a", "f", "g", "-1", "a b", "\"", "x\\y", "\n"];

/// Create a random term consisting of the given symbol and constants. Performs
/// iterations number of constructions, where every construction may use any of
/// the previously constructed terms as argument, so subterms are often shared.
///
/// # Panics
///
/// When no constants or no symbols are given.
pub fn random_term(
    rng: &mut impl Rng,
    pool: &TermPool,
    symbols: &[(String, usize)],
    constants: &[String],
    iterations: usize,
) -> ATerm {
    assert!(!constants.is_empty(), "We need constants to be able to create a term");
    assert!(!symbols.is_empty(), "We need symbols to be able to create a term");

    let mut subterms: FxHashSet<ATerm> = constants
        .iter()
        .map(|name| pool.create_constant(&pool.create_symbol(name, 0)))
        .collect();

    let mut result = subterms.iter().choose(rng).cloned();
    for _ in 0..iterations {
        let Some((name, arity)) = symbols.choose(rng) else {
            break;
        };

        let arguments: Vec<ATerm> = (0..*arity)
            .filter_map(|_| subterms.iter().choose(rng).cloned())
            .collect();

        let term = pool.create_term(&pool.create_symbol(name, *arity), &arguments);

        // Make this term available as another subterm that can be used.
        subterms.insert(term.clone());
        result = Some(term);
    }

    match result {
        Some(term) => term,
        None => unreachable!("There is at least one constant"),
    }
}

/// Create a random term of at most the given depth that mixes integers, lists
/// and function applications.
pub fn random_mixed_term(rng: &mut impl Rng, pool: &TermPool, depth: usize) -> ATerm {
    let kind = if depth == 0 { rng.random_range(0..2) } else { rng.random_range(0..4) };

    match kind {
        0 => pool.create_int(rng.random_range(-1000..=1000)),
        1 => {
            let name = MIXED_NAMES[rng.random_range(0..MIXED_NAMES.len())];
            pool.create_constant(&pool.create_symbol(name, 0))
        }
        2 => {
            let length = rng.random_range(0..4);
            let elements: Vec<ATerm> = (0..length).map(|_| random_mixed_term(rng, pool, depth - 1)).collect();
            ATermList::from_double_iter(pool, elements.into_iter()).into()
        }
        _ => {
            let name = MIXED_NAMES[rng.random_range(0..MIXED_NAMES.len())];
            let arity = rng.random_range(1..4);
            let arguments: Vec<ATerm> = (0..arity).map(|_| random_mixed_term(rng, pool, depth - 1)).collect();
            pool.create_term(&pool.create_symbol(name, arity), &arguments)
        }
    }
}
