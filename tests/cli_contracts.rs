use std::process::Command;
use tempfile::TempDir;

fn run_solreg(args: &[&str]) -> String {
    let output = Command::new(env!("CARGO_BIN_EXE_solreg"))
        .args(args)
        .output()
        .expect("failed to execute solreg");
    assert!(
        output.status.success(),
        "solreg {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn top_level_help_lists_every_command_group() {
    let help = run_solreg(&["--help"]);
    for command in ["init", "project", "report", "map", "import", "version"] {
        assert!(help.contains(command), "--help missing command: {command}");
    }
}

#[test]
fn project_help_lists_add_and_list() {
    let help = run_solreg(&["project", "--help"]);
    for command in ["add", "list"] {
        assert!(
            help.contains(command),
            "project --help missing subcommand: {command}"
        );
    }
}

#[test]
fn add_then_list_round_trip_through_the_binary() {
    let tmp = TempDir::new().expect("tempdir");
    let db = tmp.path().join("registry.db");
    let db = db.to_str().expect("utf8 path");

    run_solreg(&["--db", db, "init"]);
    run_solreg(&[
        "--db",
        db,
        "project",
        "add",
        "--name",
        "Planta Tlaquepaque",
        "--power-kw",
        "120.5",
        "--location",
        "Jalisco",
        "--owner",
        "CFE",
    ]);

    let listed = run_solreg(&["--db", db, "project", "list", "--format", "json"]);
    let parsed: serde_json::Value = serde_json::from_str(&listed).expect("json output");
    assert_eq!(parsed["cmd"], "project.list");
    assert_eq!(parsed["count"], 1);
    assert_eq!(parsed["projects"][0]["name"], "Planta Tlaquepaque");
    assert_eq!(parsed["projects"][0]["location"], "Jalisco");
    assert_eq!(parsed["projects"][0]["id"], 1);
}

#[test]
fn invalid_draft_is_rejected_by_the_cli_before_the_store() {
    let tmp = TempDir::new().expect("tempdir");
    let db = tmp.path().join("registry.db");
    let db = db.to_str().expect("utf8 path");

    run_solreg(&["--db", db, "init"]);
    let output = Command::new(env!("CARGO_BIN_EXE_solreg"))
        .args([
            "--db", db, "project", "add", "--name", "", "--power-kw", "-2", "--location",
            "Jalisco",
        ])
        .output()
        .expect("failed to execute solreg");
    assert!(!output.status.success(), "empty name must be rejected");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("name must not be empty"), "{stderr}");

    let listed = run_solreg(&["--db", db, "project", "list", "--format", "json"]);
    let parsed: serde_json::Value = serde_json::from_str(&listed).expect("json output");
    assert_eq!(parsed["count"], 0, "nothing was persisted");
}

#[test]
fn map_points_json_reports_exclusions() {
    let tmp = TempDir::new().expect("tempdir");
    let db = tmp.path().join("registry.db");
    let db = db.to_str().expect("utf8 path");

    run_solreg(&["--db", db, "init"]);
    for (name, location) in [("plottable", "Jalisco"), ("unmappable", "Atlantis")] {
        run_solreg(&[
            "--db", db, "project", "add", "--name", name, "--power-kw", "10", "--location",
            location,
        ]);
    }

    let out = run_solreg(&["--db", db, "map", "points", "--format", "json"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).expect("json output");
    assert_eq!(parsed["count"], 1);
    assert_eq!(parsed["excluded"], 1);
    assert_eq!(parsed["points"][0]["location"], "Jalisco");
    assert_eq!(parsed["points"][0]["lat"], 20.6597);
    assert_eq!(parsed["points"][0]["lon"], -103.3496);
}

#[test]
fn report_by_location_json_matches_the_aggregation() {
    let tmp = TempDir::new().expect("tempdir");
    let db = tmp.path().join("registry.db");
    let db = db.to_str().expect("utf8 path");

    run_solreg(&["--db", db, "init"]);
    for (power, location) in [("10", "A"), ("5", "A"), ("3", "B")] {
        run_solreg(&[
            "--db", db, "project", "add", "--name", "p", "--power-kw", power, "--location",
            location,
        ]);
    }

    let out = run_solreg(&["--db", db, "report", "by-location", "--format", "json"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).expect("json output");
    assert_eq!(parsed["totals"]["A"], 15.0);
    assert_eq!(parsed["totals"]["B"], 3.0);
}
