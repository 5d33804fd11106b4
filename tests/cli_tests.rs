mod common;

use common::{simple_problem, Tables};
use gridfit::api::FitResult;
use gridfit::problem::ProblemSet;
use regex::Regex;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

struct TestContext {
    dir: TempDir,
    problems: PathBuf,
}

impl TestContext {
    fn new(set: &ProblemSet) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let problems = dir.path().join("problems.json");
        serde_json::to_writer(File::create(&problems).unwrap(), set).unwrap();
        Self { dir, problems }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}

fn glyph_set() -> ProblemSet {
    let mut sym = simple_problem("sym_pair", &[7.0, 9.0]);
    let mut t = Tables::new(2);
    t.symmetric(1, 0);
    sym.symmetry = Some(t.symmetry);

    let mut drift = simple_problem("drift", &[10.4]);
    drift.gene = Some(vec![8]);

    ProblemSet {
        strategy: None,
        glyphs: vec![sym, drift],
    }
}

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_gridfit"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute binary")
}

fn arg(p: &Path) -> &str {
    p.to_str().unwrap()
}

#[test]
fn test_balance_writes_json_and_csv() {
    let ctx = TestContext::new(&glyph_set());
    let out_json = ctx.path("out.json");
    let out_csv = ctx.path("out.csv");

    let output = run(&[
        "balance",
        arg(&ctx.problems),
        "-o",
        arg(&out_json),
        "--csv",
        arg(&out_csv),
    ]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(output.status.success(), "stdout: {}\nstderr: {}", stdout, stderr);

    let results: Vec<FitResult> =
        serde_json::from_reader(File::open(&out_json).unwrap()).unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].gene, vec![9, 9]);
    assert_eq!(results[1].gene, vec![10]);

    let csv = std::fs::read_to_string(&out_csv).unwrap();
    assert!(csv.starts_with("glyph,point,row"));
    assert!(csv.contains("drift,0,10"));

    // Summary table row: name, point count, moved count
    let row = Regex::new(r"\|\s*drift\s*\|\s*1\s*\|\s*1\s*\|").unwrap();
    assert!(row.is_match(&stdout), "Summary table missing row:\n{}", stdout);
}

#[test]
fn test_glyph_filter_limits_output() {
    let ctx = TestContext::new(&glyph_set());
    let out_csv = ctx.path("only.csv");
    let output = run(&[
        "balance",
        arg(&ctx.problems),
        "--glyph",
        "SYM",
        "--csv",
        arg(&out_csv),
    ]);
    assert!(output.status.success());

    let csv = std::fs::read_to_string(&out_csv).unwrap();
    assert!(csv.contains("sym_pair,1,9"));
    assert!(!csv.contains("drift"));
}

#[test]
fn test_flag_overrides_budget() {
    let ctx = TestContext::new(&glyph_set());
    let out_json = ctx.path("out.json");
    let output = run(&[
        "balance",
        arg(&ctx.problems),
        "--rebalance-passes",
        "1",
        "-o",
        arg(&out_json),
    ]);
    assert!(output.status.success());

    let results: Vec<FitResult> =
        serde_json::from_reader(File::open(&out_json).unwrap()).unwrap();
    // One sweep only gets the drifting point one row closer
    assert_eq!(results[1].gene, vec![9]);
}

#[test]
fn test_params_file_is_applied() {
    let ctx = TestContext::new(&glyph_set());
    let params = ctx.path("params.json");
    std::fs::write(&params, r#"{ "REBALANCE_PASSES": 1 }"#).unwrap();
    let out_json = ctx.path("out.json");

    let output = run(&[
        "balance",
        arg(&ctx.problems),
        "--params",
        arg(&params),
        "-o",
        arg(&out_json),
    ]);
    assert!(output.status.success());
    let results: Vec<FitResult> =
        serde_json::from_reader(File::open(&out_json).unwrap()).unwrap();
    assert_eq!(results[1].gene, vec![9]);
}

#[test]
fn test_evaluate_prints_breakdown() {
    let ctx = TestContext::new(&glyph_set());
    let output = run(&["evaluate", arg(&ctx.problems)]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());

    assert!(stdout.contains("Fitness"));
    let row = Regex::new(r"\|\s*sym_pair\s*\|").unwrap();
    assert!(row.is_match(&stdout), "{}", stdout);
}

#[test]
fn test_rejected_glyph_fails_the_run() {
    let mut set = glyph_set();
    set.glyphs[1].ppem = 0.0;
    let ctx = TestContext::new(&set);

    let output = run(&["balance", arg(&ctx.problems)]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("drift"), "{}", stderr);
}

#[test]
fn test_missing_input_fails() {
    let output = run(&["balance", "/no/such/problems.json"]);
    assert!(!output.status.success());
}
