//! Export a schedule and read the grid back.

use exam_scheduler::input::{load_halls, load_term};
use exam_scheduler::*;
use std::fs;
use std::io::Write;

const TERM: &str = r#"{
    "durationDays": 2,
    "exams": [
        { "subjectId": "13S111P1", "applicantCount": 100, "needsComputers": false, "departments": ["SI", "RTI"] },
        { "subjectId": "13S111M1", "applicantCount": 90, "needsComputers": false, "departments": ["SI", "RTI"] },
        { "subjectId": "13E113PP", "applicantCount": 25, "needsComputers": true, "departments": ["RTI"] },
        { "subjectId": "13S112OS", "applicantCount": 60, "needsComputers": false, "departments": ["SI"] }
    ]
}"#;

const HALLS: &str = r#"[
    { "name": "Aula", "capacity": 80, "hasComputers": false, "proctorCount": 3, "belongsToFaculty": true },
    { "name": "310", "capacity": 40, "hasComputers": false, "proctorCount": 1, "belongsToFaculty": true },
    { "name": "Lab", "capacity": 30, "hasComputers": true, "proctorCount": 1, "belongsToFaculty": false }
]"#;

fn write_temp(dir: &tempfile::TempDir, name: &str, text: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut file = fs::File::create(&path).unwrap();
    file.write_all(text.as_bytes()).unwrap();
    path
}

#[test]
fn roundtrip_grid_file() {
    logging::init_test();
    let dir = tempfile::tempdir().unwrap();
    let config = SchedulerConfig::default();

    let term = load_term(write_temp(&dir, "term.json", TERM), &config).unwrap();
    let halls = load_halls(write_temp(&dir, "halls.json", HALLS)).unwrap();

    let schedule = Scheduler::new(config.clone())
        .solve(&term, &halls)
        .unwrap()
        .schedule()
        .expect("schedule");

    let out = dir.path().join("schedule.csv");
    ScheduleGrid::build(&schedule, &term, &halls, &config)
        .save(&out)
        .unwrap();

    let grid = ScheduleGrid::read_csv(fs::File::open(&out).unwrap()).unwrap();
    assert_eq!(grid.day_count(), 2);
    assert_eq!(grid.halls(), ["Aula", "310", "Lab"]);

    let mut busy = 0;
    for (day_index, day) in term.days(config.term_start).enumerate() {
        assert_eq!(grid.day_label(day_index), Some(format!("Day{}", day_index).as_str()));
        for &time in config.start_times.iter() {
            for hall in halls.iter() {
                let cell = grid.cell(day_index, time, hall.name()).unwrap();
                match schedule.exam_at(day.and_time(time), hall) {
                    Some(exam) => {
                        assert_eq!(cell, exam.subject());
                        busy += 1;
                    }
                    None => assert_eq!(cell, config.idle_marker),
                }
            }
        }
    }

    let expected: usize = schedule.iter().map(|(_, slot)| slot.halls().len()).sum();
    assert_eq!(busy, expected);
}

#[test]
fn roundtrip_custom_markers() {
    let config = SchedulerConfig {
        idle_marker: "-".to_owned(),
        day_label: "Dan".to_owned(),
        ..SchedulerConfig::default()
    };
    let halls = input::parse_halls(HALLS).unwrap();
    let term = Term::new(1, vec![Exam::new("13S112OS", 60, 2, ["SI"])]);

    let schedule = Scheduler::new(config.clone())
        .solve(&term, &halls)
        .unwrap()
        .schedule()
        .expect("schedule");

    let grid = ScheduleGrid::build(&schedule, &term, &halls, &config);
    let text = grid.render().unwrap();
    assert!(text.starts_with("Dan0,Aula,310,Lab\n"));
    assert!(text.contains("08:00,13S112OS,-,-"));

    assert_eq!(ScheduleGrid::read_csv(text.as_bytes()).unwrap(), grid);
}
