use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const COMPLETE: &str = "The simulation finished.\n\
    EXTRACTED DATA:\n\
    Coordinates: 48.8584, 2.2945\n\
    Production: 4847 kWh\n\
    Irradiation: 1367 kWh/m²\n";

const PVGIS_ONLY: &str = "Simulation outputs:\nYearly PV energy production [kWh]: 1696.92\n";

/// Temp dir with a config that disables geocoding and keeps reports inside it.
fn workspace() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let config = serde_json::json!({
        "geocoding": { "enabled": false },
        "costs": { "table_path": dir.path().join("costs.csv") },
        "report": { "output_dir": dir.path().join("reports") },
        "agent": { "delay_secs": 0 }
    });
    fs::write(dir.path().join("config.json"), config.to_string()).unwrap();
    dir
}

fn helio(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("helio").unwrap();
    cmd.arg("--config").arg(dir.join("config.json"));
    cmd
}

#[test]
fn process_complete_transcript_as_json() {
    let dir = workspace();
    let transcript = dir.path().join("paris.txt");
    fs::write(&transcript, COMPLETE).unwrap();

    helio(dir.path())
        .arg("process")
        .arg(&transcript)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"status\": \"completed\""))
        .stdout(predicate::str::contains("\"annual_production_kwh\": 4847.0"))
        .stdout(predicate::str::contains("\"tier\": \"structured\""));
}

#[test]
fn process_partial_transcript_as_text() {
    let dir = workspace();
    let transcript = dir.path().join("pvgis.txt");
    fs::write(&transcript, PVGIS_ONLY).unwrap();

    helio(dir.path())
        .args(["process", "--format", "text"])
        .arg(&transcript)
        .assert()
        .success()
        .stdout(predicate::str::contains("Status: partial"))
        .stdout(predicate::str::contains(
            "Missing fields: latitude, longitude, irradiation",
        ));
}

#[test]
fn process_reads_stdin() {
    let dir = workspace();

    helio(dir.path())
        .args(["process", "-", "--format", "text", "--no-geocode"])
        .write_stdin("The page never loaded.")
        .assert()
        .success()
        .stdout(predicate::str::contains("No data could be extracted"));
}

#[test]
fn process_missing_transcript_fails() {
    let dir = workspace();

    helio(dir.path())
        .args(["process", "/nonexistent/transcript.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read transcript"));
}

#[test]
fn saved_reports_are_listed() {
    let dir = workspace();
    let transcript = dir.path().join("paris.txt");
    fs::write(&transcript, COMPLETE).unwrap();

    helio(dir.path())
        .args(["process", "--save", "--query", "Eiffel Tower, Paris"])
        .arg(&transcript)
        .assert()
        .success();

    let saved: Vec<_> = fs::read_dir(dir.path().join("reports"))
        .unwrap()
        .filter_map(|e| e.ok())
        .collect();
    assert_eq!(saved.len(), 1);

    helio(dir.path())
        .args(["reports", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Eiffel Tower, Paris"));

    helio(dir.path())
        .args(["reports", "show", "--latest"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Status: completed"));
}

#[test]
fn reports_list_empty() {
    let dir = workspace();

    helio(dir.path())
        .args(["reports", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No reports found"));
}

#[test]
fn batch_writes_outputs_and_summary() {
    let dir = workspace();
    let input = dir.path().join("transcripts");
    fs::create_dir_all(&input).unwrap();
    fs::write(input.join("paris.txt"), COMPLETE).unwrap();
    fs::write(input.join("dakar.txt"), PVGIS_ONLY).unwrap();
    let out = dir.path().join("out");

    helio(dir.path())
        .arg("batch")
        .arg(format!("{}/*.txt", input.display()))
        .arg("--output-dir")
        .arg(&out)
        .arg("--summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("Processed 2 transcripts"));

    assert!(out.join("paris.json").exists());
    assert!(out.join("dakar.json").exists());

    let summary = fs::read_to_string(out.join("summary.csv")).unwrap();
    assert_eq!(summary.lines().count(), 3);
    assert!(summary.lines().next().unwrap().starts_with("filename,error,query"));
}

#[test]
fn batch_keeps_going_when_reports_cannot_be_saved() {
    let dir = workspace();
    // A plain file where the report directory should be
    fs::write(dir.path().join("reports"), "").unwrap();
    let input = dir.path().join("transcripts");
    fs::create_dir_all(&input).unwrap();
    fs::write(input.join("paris.txt"), COMPLETE).unwrap();
    fs::write(input.join("dakar.txt"), PVGIS_ONLY).unwrap();
    let out = dir.path().join("out");

    helio(dir.path())
        .args(["batch", "--save"])
        .arg(format!("{}/*.txt", input.display()))
        .arg("--output-dir")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Processed 2 transcripts"))
        .stdout(predicate::str::contains("Reports not saved:"));

    assert!(out.join("paris.json").exists());
    assert!(out.join("dakar.json").exists());
}

#[test]
fn batch_without_matches_fails() {
    let dir = workspace();

    helio(dir.path())
        .arg("batch")
        .arg(format!("{}/*.nothing", dir.path().display()))
        .assert()
        .failure()
        .stderr(predicate::str::contains("No matching files"));
}

#[test]
fn config_get_and_set() {
    let dir = workspace();

    helio(dir.path())
        .args(["config", "set", "report.system_cost_usd", "9000"])
        .assert()
        .success();

    helio(dir.path())
        .args(["config", "get", "report.system_cost_usd"])
        .assert()
        .success()
        .stdout(predicate::str::contains("9000"));

    helio(dir.path())
        .args(["config", "get", "report.nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown configuration key"));
}

#[test]
fn run_without_agent_fails() {
    let dir = workspace();

    helio(dir.path())
        .args(["run", "Dakar, Senegal"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no agent command configured"));
}

#[cfg(unix)]
#[test]
fn run_with_agent_script() {
    let dir = workspace();
    let agent = dir.path().join("agent.sh");
    fs::write(
        &agent,
        "#!/bin/sh\ncat > /dev/null\nprintf 'EXTRACTED DATA:\\nCoordinates: 14.6937, -17.4441\\nProduction: 1696.92 kWh\\nIrradiation: 2101.38 kWh/m2\\n'\n",
    )
    .unwrap();

    helio(dir.path())
        .args(["run", "Dakar, Senegal", "--delay", "0", "--agent"])
        .arg(format!("sh {}", agent.display()))
        .assert()
        .success()
        .stdout(predicate::str::contains("Status: completed"))
        .stdout(predicate::str::contains("Report saved to"));

    assert_eq!(fs::read_dir(dir.path().join("reports")).unwrap().count(), 1);
}

#[cfg(unix)]
#[test]
fn run_reports_every_address_when_saving_fails() {
    let dir = workspace();
    fs::write(dir.path().join("reports"), "").unwrap();
    let agent = dir.path().join("agent.sh");
    fs::write(
        &agent,
        "#!/bin/sh\ncat > /dev/null\nprintf 'EXTRACTED DATA:\\nCoordinates: 14.6937, -17.4441\\nProduction: 1696.92 kWh\\nIrradiation: 2101.38 kWh/m2\\n'\n",
    )
    .unwrap();

    helio(dir.path())
        .args(["run", "Dakar, Senegal", "Thies, Senegal", "--delay", "0", "--agent"])
        .arg(format!("sh {}", agent.display()))
        .assert()
        .failure()
        .stdout(predicate::str::contains("[2/2] Analysing Thies, Senegal"))
        .stdout(predicate::str::contains("Status: completed"))
        .stderr(predicate::str::contains("2 of 2 runs failed"));
}
