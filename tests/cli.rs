//! Runs the `run` binary on files in a temporary directory.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

const HALLS: &str = r#"[
    { "name": "Aula", "capacity": 80, "hasComputers": false, "proctorCount": 3, "belongsToFaculty": true },
    { "name": "Lab", "capacity": 30, "hasComputers": true, "proctorCount": 1, "belongsToFaculty": false }
]"#;

const FEASIBLE: &str = r#"{ "durationDays": 1, "exams": [
    { "subjectId": "13S112OS", "applicantCount": 60, "needsComputers": false, "departments": ["SI"] }
] }"#;

// The only lab seats 30.
const INFEASIBLE: &str = r#"{ "durationDays": 2, "exams": [
    { "subjectId": "13E113PP", "applicantCount": 31, "needsComputers": true, "departments": ["RTI"] }
] }"#;

struct Files {
    dir: tempfile::TempDir,
    term: PathBuf,
    halls: PathBuf,
}

impl Files {
    fn new(term: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let term_path = dir.path().join("term.json");
        let halls_path = dir.path().join("halls.json");
        fs::write(&term_path, term).unwrap();
        fs::write(&halls_path, HALLS).unwrap();

        Files {
            dir,
            term: term_path,
            halls: halls_path,
        }
    }

    fn run(&self, output: Option<&Path>) -> Output {
        let mut command = Command::new(env!("CARGO_BIN_EXE_run"));
        let _ = command.arg(&self.term).arg(&self.halls);
        if let Some(output) = output {
            let _ = command.arg("--output").arg(output);
        }
        command.output().unwrap()
    }

    fn entries(&self) -> usize {
        fs::read_dir(self.dir.path()).unwrap().count()
    }
}

#[test]
fn writes_grid_next_to_term() {
    let files = Files::new(FEASIBLE);
    let output = files.run(None);

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let grid = fs::read_to_string(files.term.with_extension("csv")).unwrap();
    assert!(grid.starts_with("Day0,Aula,Lab\n08:00,13S112OS,X\n"));
}

#[test]
fn no_solution_exits_2_without_output() {
    let files = Files::new(INFEASIBLE);
    let out = files.dir.path().join("schedule.csv");
    let output = files.run(Some(&out));

    assert_eq!(output.status.code(), Some(2));
    assert!(!out.exists());
    assert!(!files.term.with_extension("csv").exists());
    assert_eq!(files.entries(), 2);
}

#[test]
fn bad_input_exits_1_without_output() {
    let files = Files::new(r#"{ "durationDays": 0, "exams": [] }"#);
    let out = files.dir.path().join("schedule.csv");
    let output = files.run(Some(&out));

    assert_eq!(output.status.code(), Some(1));
    assert!(!out.exists());
    assert_eq!(files.entries(), 2);
}
