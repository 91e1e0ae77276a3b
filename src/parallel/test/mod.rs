//! Tests for the dispatcher and its backends.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use super::*;
use crate::error::DispatchError;
use proptest::prelude::*;

fn square_plus(a: u64, b: u64) -> u64 {
    a * a + b
}

fn arguments(n: u64) -> Vec<(u64, u64)> {
    (0..n).map(|i| (i, i % 7)).collect()
}

fn expected(n: u64) -> Vec<u64> {
    arguments(n).into_iter().map(|(a, b)| square_plus(a, b)).collect()
}

fn blocking_backends() -> [Backend; 3] {
    [Backend::Pool, Backend::Jobs, Backend::Distributed]
}

#[test]
fn test_sequential_matches_direct_calls() {
    let out = run_parallel(square_plus, arguments(50), None).unwrap();
    assert_eq!(out.into_results().unwrap(), expected(50));
}

#[test]
fn test_none_config_equals_sequential_config() {
    let a = run_parallel(square_plus, arguments(20), None).unwrap();
    let b = run_parallel(square_plus, arguments(20), Some(&ParallelConfig::sequential())).unwrap();
    assert_eq!(a, b);

    // A backend is ignored unless parallel evaluation is requested
    let c = ParallelConfig {
        backend: Backend::TimeoutPool,
        ..ParallelConfig::default()
    };
    assert_eq!(run_parallel(square_plus, arguments(20), Some(&c)).unwrap(), a);
}

#[test]
fn test_blocking_backends_match_sequential() {
    for backend in blocking_backends() {
        // More tasks than workers
        let config = ParallelConfig::parallel(backend).with_threads(3);
        let out = run_parallel(square_plus, arguments(64), Some(&config)).unwrap();
        assert_eq!(out.into_results().unwrap(), expected(64), "{}", backend);
    }
}

#[test]
fn test_default_thread_count() {
    for backend in blocking_backends() {
        let config = ParallelConfig::parallel(backend);
        let out = run_parallel(square_plus, arguments(10), Some(&config)).unwrap();
        assert_eq!(out.into_results().unwrap(), expected(10), "{}", backend);
    }
}

#[test]
fn test_empty_arguments() {
    for backend in Backend::ALL {
        let config = ParallelConfig::parallel(backend).with_threads(4);
        let out = run_parallel(square_plus, Vec::<(u64, u64)>::new(), Some(&config)).unwrap();
        match backend {
            Backend::TimeoutPool => assert_eq!(out.report(), Some(&DetachedReport::default())),
            _ => assert_eq!(out.into_results().unwrap(), Vec::<u64>::new()),
        }
    }
}

#[test]
fn test_scalar_arguments() {
    let config = ParallelConfig::parallel(Backend::Pool).with_threads(2);
    let out = run_parallel(|x: u32| x + 1, vec![1u32, 2, 3], Some(&config)).unwrap();
    assert_eq!(out.into_results().unwrap(), vec![2, 3, 4]);

    let out = run_parallel(|s: String| s.to_uppercase(), vec!["a".to_string(), "b".to_string()], None).unwrap();
    assert_eq!(out.into_results().unwrap(), vec!["A", "B"]);
}

#[test]
fn test_panicking_task_fails_blocking_backends() {
    let task = |i: usize| -> usize {
        if i == 5 {
            panic!("boom at {}", i);
        }
        i
    };

    let err = run_parallel(task, 0..10usize, None).unwrap_err();
    assert!(matches!(err, DispatchError::TaskFailed { index: 5, .. }), "{}", err);

    for backend in blocking_backends() {
        let config = ParallelConfig::parallel(backend).with_threads(2);
        match run_parallel(task, 0..10usize, Some(&config)) {
            Err(DispatchError::TaskFailed { index, message }) => {
                assert_eq!(index, 5, "{}", backend);
                assert!(message.contains("boom at 5"), "{}: {}", backend, message);
            }
            other => panic!("{}: expected TaskFailed, got {:?}", backend, other),
        }
    }
}

#[test]
fn test_lowest_failing_index_is_reported() {
    let task = |i: usize| -> usize {
        if i % 4 == 3 {
            panic!("bad job {}", i);
        }
        i
    };
    for backend in [Backend::Pool, Backend::Jobs] {
        for threads in [1, 4, 8] {
            let config = ParallelConfig::parallel(backend).with_threads(threads);
            match run_parallel(task, 0..40usize, Some(&config)) {
                Err(DispatchError::TaskFailed { index, .. }) => assert_eq!(index, 3, "{} x{}", backend, threads),
                other => panic!("{}: expected TaskFailed, got {:?}", backend, other),
            }
        }
    }
}

#[test]
fn test_timeout_pool_reports_counts() {
    let task = |i: usize| -> usize {
        if i == 1 {
            panic!("bad input");
        }
        i * 2
    };
    let config = ParallelConfig::parallel(Backend::TimeoutPool).with_threads(2).with_timeout(5.0);
    let out = run_parallel(task, 0..6usize, Some(&config)).unwrap();

    assert!(out.results().is_none());
    assert_eq!(
        out.report(),
        Some(&DetachedReport {
            completed: 5,
            failed: 1,
            timed_out: 0
        })
    );
}

#[test]
fn test_timeout_pool_counts_returned_errors() {
    let task = |i: usize| -> Result<usize, String> {
        if i % 3 == 0 {
            Err(format!("cannot handle {}", i))
        } else {
            Ok(i)
        }
    };
    let config = ParallelConfig::parallel(Backend::TimeoutPool).with_threads(3).with_timeout(5.0);
    let out = run_parallel(task, 0..9usize, Some(&config)).unwrap();
    assert_eq!(
        out.report(),
        Some(&DetachedReport {
            completed: 6,
            failed: 3,
            timed_out: 0
        })
    );

    // Blocking backends hand the errors back untouched
    let out = run_parallel(task, 0..3usize, None).unwrap().into_results().unwrap();
    assert_eq!(out, vec![Err("cannot handle 0".to_string()), Ok(1), Ok(2)]);
}

#[test]
fn test_timeout_pool_abandons_slow_task() {
    let task = |millis: u64| {
        thread::sleep(Duration::from_millis(millis));
        millis
    };
    let config = ParallelConfig::parallel(Backend::TimeoutPool).with_threads(2).with_timeout(0.2);

    let start = Instant::now();
    let out = run_parallel(task, vec![5u64, 3_000, 10], Some(&config)).unwrap();
    let elapsed = start.elapsed();

    let report = out.report().copied().unwrap();
    assert_eq!(report.timed_out, 1);
    assert_eq!(report.completed, 2);
    assert_eq!(report.total(), 3);
    // The slow task is not waited for
    assert!(elapsed < Duration::from_millis(2_500), "{:?}", elapsed);
}

#[test]
fn test_every_task_runs_once() {
    for backend in Backend::ALL {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let task = move |_: usize| {
            counter.fetch_add(1, Ordering::SeqCst);
        };
        let config = ParallelConfig::parallel(backend).with_threads(4);
        run_parallel(task, 0..40usize, Some(&config)).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 40, "{}", backend);
    }
}

#[test]
fn test_executors_directly() {
    let func = Arc::new(|a: i32, b: i32| a - b);
    let tasks = vec![(3, 1), (10, 4)];
    assert_eq!(Sequential.execute(Arc::clone(&func), tasks.clone()).unwrap(), Dispatch::Collected(vec![2, 6]));
    assert_eq!(Pool::new(Some(1)).execute(Arc::clone(&func), tasks.clone()).unwrap(), Dispatch::Collected(vec![2, 6]));
    assert_eq!(Jobs::new(Some(8)).execute(Arc::clone(&func), tasks.clone()).unwrap(), Dispatch::Collected(vec![2, 6]));
    assert_eq!(Distributed::new(None).execute(Arc::clone(&func), tasks).unwrap(), Dispatch::Collected(vec![2, 6]));
    assert_eq!(TimeoutPool::default().timeout(), Duration::from_secs(30));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_parallel_preserves_order(
        values in prop::collection::vec(0u64..1_000, 0..64),
        threads in 1usize..6,
        backend in prop::sample::select(vec![Backend::Pool, Backend::Jobs, Backend::Distributed]),
    ) {
        let config = ParallelConfig::parallel(backend).with_threads(threads);
        let out = run_parallel(|x: u64| x * 3 + 1, values.clone(), Some(&config)).unwrap();
        let want: Vec<u64> = values.iter().map(|x| x * 3 + 1).collect();
        prop_assert_eq!(out.into_results().unwrap(), want);
    }
}
