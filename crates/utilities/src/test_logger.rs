use std::thread;

/// Installs the logger for tests. Output is captured by the test harness and
/// only shown for failing tests.
pub fn test_logger() {
    if cfg!(not(feature = "termite_miri")) {
        // Tests run in parallel, so the logger may already be installed.
        let _ = env_logger::builder().is_test(true).try_init();
    }
}

/// Runs `test_function` on `num_threads` scoped threads, each with its own
/// state obtained from `init_function`. A panic in any of the threads is
/// propagated to the caller.
pub fn test_threads<C, F, G>(num_threads: usize, init_function: G, test_function: F)
where
    C: Send,
    F: Fn(&mut C) + Sync,
    G: Fn() -> C,
{
    test_logger();

    thread::scope(|scope| {
        let handles: Vec<_> = (0..num_threads)
            .map(|_| {
                let mut state = init_function();
                let test_function = &test_function;
                scope.spawn(move || test_function(&mut state))
            })
            .collect();

        for handle in handles {
            if let Err(payload) = handle.join() {
                std::panic::resume_unwind(payload);
            }
        }
    });
}
