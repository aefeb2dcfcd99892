use std::collections::HashMap;

use termite_aterm::ATerm;
use termite_aterm::ATermData;
use termite_aterm::ATermInt;
use termite_aterm::ATermList;
use termite_aterm::ATermRead;
use termite_aterm::ATermStreamable;
use termite_aterm::ATermWrite;
use termite_aterm::TermPool;
use termite_aterm::TextATermReader;
use termite_aterm::TextATermWriter;
use termite_aterm::random_mixed_term;
use termite_aterm::random_term;
use termite_utilities::random_test;
use termite_utilities::test_logger;
use termite_utilities::test_threads;

#[test]
fn test_long_list_is_dropped_iteratively() {
    test_logger();
    let pool = TermPool::new();

    let mut list = ATermList::<ATermInt>::empty(&pool);
    for value in 0..1_000_000 {
        list = list.cons(ATermInt::new(&pool, value));
    }
    assert_eq!(list.head().value(), 999_999);

    drop(list);
    assert_eq!(pool.len(), 1, "Only the empty list should remain");
}

#[test]
fn test_failed_parse_leaves_no_terms() {
    let pool = TermPool::new();

    assert!(pool.from_string("f(g(a),[1,2],h(").is_err());
    assert!(pool.from_string("[x,y").is_err());
    assert_eq!(pool.len(), 1, "Only the empty list should remain");
    assert_eq!(pool.num_of_symbols(), 0);
}

#[test]
fn test_deferred_garbage_collection() {
    test_logger();
    let pool = TermPool::new();
    pool.automatic_garbage_collection(false);

    let term = pool.from_string("f(g(a),[1,2])").unwrap();
    let size = pool.len();
    drop(term);
    assert_eq!(pool.len(), size, "Unreferenced terms stay until the next collection");

    // An unreferenced term can be revived before it is collected.
    let revived = pool.from_string("g(a)").unwrap();
    assert_eq!(revived.reference_count(), 2, "The handle and the uncollected f(g(a),[1,2])");

    assert_eq!(pool.collect_garbage(), 5);
    assert_eq!(pool.len(), 3, "The empty list, a and g(a) remain");
    assert_eq!(revived.reference_count(), 1);
    assert_eq!(revived.to_string(), "g(a)");

    drop(revived);
    assert_eq!(pool.len(), 3);
    assert_eq!(pool.collect_garbage(), 2);

    pool.automatic_garbage_collection(true);
    assert_eq!(pool.len(), 1);
    assert_eq!(pool.num_of_symbols(), 0);
}

#[test]
fn test_random_terms_are_shared() {
    random_test(20, |rng| {
        let pool = TermPool::new();
        let symbols = vec![("f".to_string(), 2), ("g".to_string(), 1)];
        let constants = vec!["a".to_string(), "b".to_string()];

        let first = random_term(rng, &pool, &symbols, &constants, 20);
        let text = first.to_string();
        let second = pool.from_string(&text).unwrap();

        assert_eq!(first, second);
        assert_eq!(first.index(), second.index());

        drop(first);
        drop(second);
        assert_eq!(pool.len(), 1);
        assert_eq!(pool.num_of_symbols(), 0);
    });
}

#[test]
fn test_reference_counts_of_subterms() {
    let pool = TermPool::new();

    let a = pool.from_string("a").unwrap();
    assert_eq!(a.reference_count(), 1);

    let term = pool.from_string("f(a,a)").unwrap();
    assert_eq!(a.reference_count(), 3, "The handle and both arguments of f(a,a)");

    let arguments: Vec<ATerm> = term.arguments().collect();
    assert_eq!(arguments, [a.clone(), a.clone()]);
    assert_eq!(a.reference_count(), 5);
    drop(arguments);

    drop(term);
    assert_eq!(a.reference_count(), 1);
}

#[test]
fn test_shared_pool_creates_identical_terms() {
    let pool = TermPool::new();

    test_threads(
        4,
        || pool.clone(),
        |pool| {
            for _ in 0..100 {
                let term = pool.from_string("f(g([1,2,3]),h(\"x y\",-4))").unwrap();
                assert_eq!(term.to_string(), "f(g([1,2,3]),h(\"x y\",-4))");
            }
        },
    );

    assert_eq!(pool.len(), 1);
}

#[test]
fn test_terms_are_sent_between_threads() {
    let pool = TermPool::new();
    let term = pool.from_string("f(a,[b])").unwrap();

    let handle = std::thread::spawn(move || {
        let ATermData::Application { symbol, arguments } = term.data() else {
            panic!("Expected a function application");
        };
        (symbol.name().to_string(), arguments.len())
    });

    let (name, arity) = handle.join().unwrap();
    assert_eq!(name, "f");
    assert_eq!(arity, 2);
    assert_eq!(pool.len(), 1);
}

#[test]
fn test_terms_as_map_keys() {
    let pool = TermPool::new();

    let mut occurrences: HashMap<ATerm, usize> = HashMap::new();
    for text in ["a", "f(a)", "a", "[a]", "f(a)", "a"] {
        *occurrences.entry(pool.from_string(text).unwrap()).or_default() += 1;
    }

    assert_eq!(occurrences[&pool.from_string("a").unwrap()], 3);
    assert_eq!(occurrences[&pool.from_string("f(a)").unwrap()], 2);
    assert_eq!(occurrences[&pool.from_string("[a]").unwrap()], 1);
}

#[test]
fn test_streamable_round_trip() {
    let pool = TermPool::new();
    let term = pool.from_string("f(a,[1,2])").unwrap();

    let mut buffer = Vec::new();
    {
        let mut writer = TextATermWriter::new(&mut buffer);
        term.write(&mut writer).unwrap();
        (-12i64).write(&mut writer).unwrap();
        "hello world".to_string().write(&mut writer).unwrap();
        vec![3i64, 4, 5].write(&mut writer).unwrap();
        writer
            .write_aterm_iter(vec![pool.create_int(7), term.clone()].into_iter())
            .unwrap();
        ATermWrite::flush(&mut writer).unwrap();
    }

    let mut reader = TextATermReader::new(buffer.as_slice(), &pool);
    assert_eq!(ATerm::read(&mut reader).unwrap(), term);
    assert_eq!(i64::read(&mut reader).unwrap(), -12);
    assert_eq!(String::read(&mut reader).unwrap(), "hello world");
    assert_eq!(Vec::<i64>::read(&mut reader).unwrap(), vec![3, 4, 5]);

    let sequence: Vec<ATerm> = reader
        .read_aterm_iter()
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(sequence, vec![pool.create_int(7), term]);

    assert!(ATermRead::read_aterm(&mut reader).unwrap().is_none());
}

#[test]
fn test_random_stream_round_trip() {
    random_test(50, |rng| {
        let pool = TermPool::new();
        let terms: Vec<ATerm> = (0..20).map(|_| random_mixed_term(rng, &pool, 4)).collect();

        let mut buffer = Vec::new();
        {
            let mut writer = TextATermWriter::new(&mut buffer);
            terms.write(&mut writer).unwrap();
        }

        let mut reader = TextATermReader::new(buffer.as_slice(), &pool);
        assert_eq!(Vec::<ATerm>::read(&mut reader).unwrap(), terms);
    });
}
