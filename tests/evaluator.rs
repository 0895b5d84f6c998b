//! Properties of the scheduling rules, checked exhaustively over a
//! small term.

use exam_scheduler::*;
use std::collections::HashSet;

fn make_exams() -> Vec<Exam> {
    vec![
        Exam::new("13S112OS", 50, 2, ["SI"]),
        Exam::new("13S112PP", 20, 2, ["SI", "RTI"]),
        Exam::new("13E113P1", 25, 3, ["RTI"]).with_computers(true),
    ]
}

fn make_halls() -> Vec<Hall> {
    vec![
        Hall::new("Aula", 40),
        Hall::new("Lab", 30).with_computers(true),
    ]
}

/// Every way of binding all three exams to a two-day domain.
fn all_bindings(slots: &[ScheduleSlot]) -> Vec<[usize; 3]> {
    let n = slots.len();
    let mut out = Vec::with_capacity(n * n * n);
    for a in 0..n {
        for b in 0..n {
            for c in 0..n {
                out.push([a, b, c]);
            }
        }
    }
    out
}

fn permutations() -> [[usize; 3]; 6] {
    [[0, 1, 2], [0, 2, 1], [1, 0, 2], [1, 2, 0], [2, 0, 1], [2, 1, 0]]
}

fn verify_properties(pairs: &[(&Exam, &ScheduleSlot)]) {
    for &(exam, slot) in pairs.iter() {
        assert!(slot.total_capacity() >= u64::from(exam.expected_enrollment()));
        if exam.requires_computers() {
            assert!(slot.all_halls_have_computers());
        }
    }

    for (i, &(e1, s1)) in pairs.iter().enumerate() {
        for &(e2, s2) in pairs[i + 1..].iter() {
            if s1.start() == s2.start() {
                assert!(s1.halls().is_disjoint(s2.halls()));
            }
            if s1.day() == s2.day() && e1.study_year() == e2.study_year() {
                let d1: HashSet<&str> = e1.departments().collect();
                assert!(e2.departments().all(|d| !d1.contains(d)));
            }
        }
    }
}

#[test]
fn evaluator_order_independent() {
    let config = SchedulerConfig::default();
    let rules = ScheduleRules::from_config(&config);
    let exams = make_exams();
    let slots = slots::generate_slots(&config, 2, &make_halls());

    let mut consistent = 0;
    for binding in all_bindings(&slots) {
        let results: Vec<bool> = permutations()
            .iter()
            .map(|order| {
                let pairs = order.iter().map(|&i| (&exams[i], &slots[binding[i]]));
                rules.check(pairs).is_ok()
            })
            .collect();

        assert!(results.iter().all(|&r| r == results[0]), "{:?}", binding);
        if results[0] {
            consistent += 1;
        }
    }

    assert!(consistent > 0);
}

#[test]
fn evaluator_monotonic_under_restriction() {
    let config = SchedulerConfig::default();
    let rules = ScheduleRules::from_config(&config);
    let exams = make_exams();
    let slots = slots::generate_slots(&config, 2, &make_halls());

    for binding in all_bindings(&slots) {
        let full: Vec<(&Exam, &ScheduleSlot)> =
            (0..3).map(|i| (&exams[i], &slots[binding[i]])).collect();
        if rules.check(full.iter().copied()).is_err() {
            continue;
        }

        verify_properties(&full);
        for mask in 0u8..8 {
            let part = full
                .iter()
                .enumerate()
                .filter(|&(i, _)| mask & (1 << i) != 0)
                .map(|(_, &pair)| pair);
            assert!(rules.check(part).is_ok(), "{:?} / {:#b}", binding, mask);
        }
    }
}

#[test]
fn evaluator_agrees_with_violations() {
    let config = SchedulerConfig::default();
    let rules = ScheduleRules::from_config(&config);
    let exams = make_exams();
    let slots = slots::generate_slots(&config, 1, &make_halls());

    for binding in all_bindings(&slots) {
        let mut assignment = Assignment::new();
        for (i, exam) in exams.iter().enumerate() {
            assignment.insert(exam.clone(), slots[binding[i]].clone());
        }

        let violations = rules.violations(&assignment);
        assert_eq!(violations.is_empty(), rules.is_consistent(&assignment));
    }
}

#[test]
fn evaluator_rejects_foreign_start_time() {
    let rules = ScheduleRules::from_config(&SchedulerConfig::default());
    let odd = SchedulerConfig {
        start_times: vec![chrono::NaiveTime::from_hms_opt(9, 15, 0).unwrap()],
        ..SchedulerConfig::default()
    };
    let slots = slots::generate_slots(&odd, 1, &make_halls());

    let mut assignment = Assignment::new();
    assignment.insert(Exam::new("13S111P1", 5, 1, ["SI"]), slots[0].clone());
    assert!(matches!(
        rules.check(&assignment),
        Err(Violation::StartTime { .. })
    ));
}

#[test]
fn evaluator_double_booking_is_symmetric() {
    let rules = ScheduleRules::from_config(&SchedulerConfig::default());
    let halls = make_halls();
    let slots = slots::generate_slots(&SchedulerConfig::default(), 1, &halls);

    // Slot 2 is {Aula, Lab} at 08:00, slot 0 is {Aula} at 08:00.
    assert_eq!(slots[2].halls().len(), 2);
    assert_eq!(slots[0].start(), slots[2].start());

    let e1 = Exam::new("13S111P1", 5, 1, ["SI"]);
    let e2 = Exam::new("13E112OS", 5, 2, ["RTI"]);
    let forward = [(&e1, &slots[0]), (&e2, &slots[2])];
    let backward = [(&e2, &slots[2]), (&e1, &slots[0])];

    assert!(rules.check(forward.iter().copied()).is_err());
    assert!(rules.check(backward.iter().copied()).is_err());
}
