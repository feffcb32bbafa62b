use super::*;
use crate::helpers::solver::{create_test_solver, create_test_strategy};

#[test]
fn can_keep_pit_stop_count_in_sync_with_flags() {
    let solver = create_test_solver(10);
    let compounds = [vec![TyreCompound::Soft; 5], vec![TyreCompound::Medium; 5]].concat();

    let strategy = create_test_strategy(&solver, compounds, vec![false; 10]);

    assert_eq!(strategy.pit_stop_count, 1);
    assert_eq!(strategy.count_pit_stops(), 1);
    assert!(strategy.pit_stops[5]);
}

#[test]
fn can_detect_feasibility_from_total_time() {
    let solver = create_test_solver(5);
    let mut strategy = solver.random_child();

    assert!(strategy.is_feasible());

    strategy.total_time = Float::INFINITY;
    assert!(!strategy.is_feasible());
}

#[test]
fn can_format_strategy_for_display() {
    let solver = create_test_solver(4);
    let strategy = create_test_strategy(&solver, vec![TyreCompound::Soft; 4], vec![false; 4]);

    let text = strategy.to_string();

    assert_eq!(text.lines().count(), 5);
    assert!(text.starts_with("lap  1 [dry]: soft new (age 0)"));
    assert!(text.contains("pit no"));
    assert!(text.ends_with("pit stops: 0"));
}
