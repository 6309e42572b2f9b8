use crate::error::CompressibilityError;
use crate::window_pipeline::planner::{plan, plan_with, TrailingWindows, WindowSpec};

//==============================================================================
// Scenarios
//==============================================================================

#[test]
fn test_tiling_reports_window_starts() {
    let spec = WindowSpec::new(100, 100, false).unwrap();
    let plan = plan(1000, &spec).unwrap();

    assert_eq!(plan.len(), 10);
    assert_eq!(plan.timestamps(), (0..10).map(|i| i * 100).collect::<Vec<_>>());
    for window in plan.windows() {
        assert_eq!(window.len(), 100);
        assert_eq!(window.timestamp, window.start);
    }
}

#[test]
fn test_tiling_ignores_step() {
    // Tiling always advances by the window size.
    let spec = WindowSpec::new(100, 7, false).unwrap();
    let plan = plan(1000, &spec).unwrap();

    assert_eq!(plan.len(), 10);
    assert_eq!(plan.get(1).unwrap().start, 100);
}

#[test]
fn test_sliding_reports_window_ends() {
    let spec = WindowSpec::sliding(100, 50).unwrap();
    let plan = plan(1000, &spec).unwrap();

    // Only full windows: the last one is [900, 1000).
    assert_eq!(plan.len(), 19);
    assert_eq!(
        plan.timestamps(),
        (0..19).map(|i| i * 50 + 100).collect::<Vec<_>>()
    );
    let last = plan.windows().last().unwrap();
    assert_eq!((last.start, last.end, last.timestamp), (900, 1000, 1000));
}

#[test]
fn test_truncate_reproduces_one_window_per_step() {
    let spec = WindowSpec::sliding(100, 50).unwrap();
    let plan = plan_with(1000, &spec, TrailingWindows::Truncate).unwrap();

    assert_eq!(plan.len(), 20);
    assert_eq!(
        plan.timestamps(),
        (0..20).map(|i| i * 50 + 100).collect::<Vec<_>>()
    );
    // The final timestamp lies past the data; the window itself is clipped.
    let last = plan.windows().last().unwrap();
    assert_eq!((last.start, last.end, last.timestamp), (950, 1000, 1050));
}

#[test]
fn test_empty_recording_plans_nothing() {
    for spec in [
        WindowSpec::tiling(10).unwrap(),
        WindowSpec::sliding(10, 3).unwrap(),
    ] {
        assert!(plan(0, &spec).unwrap().is_empty());
        assert!(plan_with(0, &spec, TrailingWindows::Truncate)
            .unwrap()
            .is_empty());
    }
}

#[test]
fn test_window_larger_than_recording_plans_nothing() {
    let tiling = WindowSpec::tiling(500).unwrap();
    let sliding = WindowSpec::sliding(500, 100).unwrap();

    assert!(plan(499, &tiling).unwrap().is_empty());
    assert!(plan(499, &sliding).unwrap().is_empty());
}

#[test]
fn test_zero_window_size_or_step_is_rejected() {
    assert!(matches!(
        WindowSpec::new(0, 10, true),
        Err(CompressibilityError::InvalidWindowSpec { window_size: 0, step: 10 })
    ));
    assert!(matches!(
        WindowSpec::sliding(10, 0),
        Err(CompressibilityError::InvalidWindowSpec { window_size: 10, step: 0 })
    ));

    // A hand-built spec is still checked at plan time.
    let spec = WindowSpec {
        window_size: 0,
        step: 0,
        sliding: false,
    };
    assert!(matches!(
        plan(100, &spec),
        Err(CompressibilityError::InvalidWindowSpec { .. })
    ));
}

//==============================================================================
// Properties over a grid of shapes
//==============================================================================

#[test]
fn test_tiling_plan_length_is_floor_division() {
    for total in [0usize, 1, 99, 100, 101, 997, 1000] {
        for size in [1usize, 2, 7, 100, 1000, 2000] {
            let spec = WindowSpec::tiling(size).unwrap();
            assert_eq!(plan(total, &spec).unwrap().len(), total / size);
        }
    }
}

#[test]
fn test_truncated_sliding_plan_length_is_floor_division() {
    for total in [0usize, 1, 99, 100, 101, 997, 1000] {
        for size in [1usize, 7, 100, 2000] {
            for step in [1usize, 3, 50, 100, 1500] {
                let spec = WindowSpec::sliding(size, step).unwrap();
                let plan = plan_with(total, &spec, TrailingWindows::Truncate).unwrap();
                assert_eq!(plan.len(), total / step);
                assert!(plan.windows().iter().all(|w| !w.is_empty()));
            }
        }
    }
}

#[test]
fn test_dropped_sliding_windows_are_always_full() {
    for total in [0usize, 1, 99, 100, 101, 997, 1000] {
        for size in [1usize, 7, 100, 2000] {
            for step in [1usize, 3, 50, 100, 1500] {
                let spec = WindowSpec::sliding(size, step).unwrap();
                let plan = plan(total, &spec).unwrap();

                assert!(plan.len() <= total / step);
                for (i, window) in plan.windows().iter().enumerate() {
                    assert_eq!(window.index, i);
                    assert_eq!(window.len(), size);
                    assert!(window.end <= total);
                    assert_eq!(window.timestamp, i * step + size);
                }
            }
        }
    }
}

#[test]
fn test_timestamps_never_decrease() {
    let spec = WindowSpec::sliding(64, 16).unwrap();
    let plan = plan_with(10_000, &spec, TrailingWindows::Truncate).unwrap();

    assert!(plan
        .windows()
        .windows(2)
        .all(|pair| pair[0].timestamp <= pair[1].timestamp));
}

#[test]
fn test_huge_window_size_does_not_overflow() {
    let spec = WindowSpec::sliding(usize::MAX, 1).unwrap();

    assert!(plan(10, &spec).unwrap().is_empty());

    let truncated = plan_with(10, &spec, TrailingWindows::Truncate).unwrap();
    assert_eq!(truncated.len(), 10);
    for window in truncated.windows() {
        assert!(!window.is_empty());
        assert_eq!(window.end, 10);
        assert_eq!(window.timestamp, usize::MAX);
    }
}
