// End-to-end pipeline tests: snapshot fixture on disk, binary invocation,
// ranked output on stdout.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn quantiscreen() -> Command {
    Command::cargo_bin("quantiscreen").expect("binary should exist")
}

/// Three-company fixture: a strong large cap, a small-cap value trap, and a
/// mid-cap speculative grower.
fn write_batch(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("batch.json");
    fs::write(
        &path,
        r#"[
            {
                "symbol": "SOLID",
                "name": "Solid Industries",
                "sector": "Industrials",
                "metrics": {
                    "P/E": 12.0,
                    "ROE": 25.0,
                    "D/E": 0.4,
                    "P/B": 2.5,
                    "PEG": 1.0,
                    "Gross Margin": 45.0,
                    "Net Profit Margin": 18.0,
                    "FCF % EV": 6.0,
                    "EBITDA % EV": 9.0,
                    "Market Cap": 50000000000.0,
                    "Total Cash": 5000000000.0,
                    "Total Debt": 1000000000.0,
                    "Current Price": 100.0,
                    "52W High": 110.0,
                    "52W Low": 70.0
                }
            },
            {
                "symbol": "TRAP",
                "name": "Trap Mills",
                "sector": "Materials",
                "metrics": {
                    "P/E": 9.0,
                    "ROE": 2.0,
                    "P/B": 0.9,
                    "Market Cap": 1000000000.0
                }
            },
            {
                "symbol": "HYPE",
                "name": "Hype Labs",
                "sector": "Technology",
                "metrics": {
                    "P/E": 45.0,
                    "PEG": 0.8,
                    "ROE": 12.0,
                    "Market Cap": 5000000000.0
                }
            }
        ]"#,
    )
    .expect("fixture should write");
    path
}

#[test]
fn screen_markdown_ranks_strongest_first() {
    let dir = TempDir::new().expect("temp dir should be created");
    let batch = write_batch(&dir);

    quantiscreen()
        .args(["screen", batch.to_str().expect("path should be utf-8")])
        .assert()
        .success()
        .stdout(predicate::str::contains("#### Ranked Top Stocks"))
        .stdout(predicate::str::contains("| 1 | Solid Industries (SOLID) |"))
        .stdout(predicate::str::contains("Undervalued"))
        .stdout(predicate::str::contains(
            "High P/E stocks needing review: HYPE.",
        ));
}

#[test]
fn screen_json_output_parses_as_result_array() {
    let dir = TempDir::new().expect("temp dir should be created");
    let batch = write_batch(&dir);

    let output = quantiscreen()
        .args([
            "screen",
            batch.to_str().expect("path should be utf-8"),
            "--format",
            "json",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let parsed: serde_json::Value =
        serde_json::from_slice(&output).expect("stdout should be JSON");
    let results = parsed.as_array().expect("top level should be an array");
    assert_eq!(results.len(), 3);
    assert_eq!(results[0]["metrics"]["symbol"], "SOLID");
    assert!(results[0]["final_score"].as_f64().expect("score") > 0.0);
}

#[test]
fn screen_csv_output_has_header_and_rows() {
    let dir = TempDir::new().expect("temp dir should be created");
    let batch = write_batch(&dir);

    quantiscreen()
        .args([
            "screen",
            batch.to_str().expect("path should be utf-8"),
            "--format",
            "csv",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Symbol,Company,Score"))
        .stdout(predicate::str::contains("SOLID"))
        .stdout(predicate::str::contains("50.00B"));
}

#[test]
fn exclude_negative_drops_flagged_stocks() {
    let dir = TempDir::new().expect("temp dir should be created");
    let batch = write_batch(&dir);

    quantiscreen()
        .args([
            "screen",
            batch.to_str().expect("path should be utf-8"),
            "--exclude-negative",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("SOLID"))
        .stdout(predicate::str::contains("TRAP").not())
        .stdout(predicate::str::contains("Hype Labs").not());
}

#[test]
fn top_limit_truncates_the_ranking() {
    let dir = TempDir::new().expect("temp dir should be created");
    let batch = write_batch(&dir);

    quantiscreen()
        .args([
            "screen",
            batch.to_str().expect("path should be utf-8"),
            "--top",
            "1",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("SOLID"))
        .stdout(predicate::str::contains("| 2 |").not());
}

#[test]
fn large_cap_universe_keeps_only_large_caps() {
    let dir = TempDir::new().expect("temp dir should be created");
    let batch = write_batch(&dir);

    quantiscreen()
        .args([
            "screen",
            batch.to_str().expect("path should be utf-8"),
            "--universe",
            "large-cap",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("SOLID"))
        .stdout(predicate::str::contains("TRAP").not());
}

#[test]
fn sector_universe_filters_by_sector_name() {
    let dir = TempDir::new().expect("temp dir should be created");
    let batch = write_batch(&dir);

    quantiscreen()
        .args([
            "screen",
            batch.to_str().expect("path should be utf-8"),
            "--universe",
            "sector",
            "--sector",
            "Technology",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Hype Labs"))
        .stdout(predicate::str::contains("SOLID").not());
}

#[test]
fn no_matches_exits_with_code_one() {
    let dir = TempDir::new().expect("temp dir should be created");
    let batch = write_batch(&dir);

    quantiscreen()
        .args([
            "screen",
            batch.to_str().expect("path should be utf-8"),
            "--search",
            "zzzz",
        ])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no stocks matched"));
}

#[test]
fn custom_config_file_drives_the_screen() {
    let dir = TempDir::new().expect("temp dir should be created");
    let batch = write_batch(&dir);
    let config = dir.path().join("screen.toml");
    fs::write(
        &config,
        r#"
metrics = ["P/E", "ROE"]

[weights]
"P/E" = 0.5
"ROE" = 0.5
"#,
    )
    .expect("config should write");

    quantiscreen()
        .args([
            "screen",
            batch.to_str().expect("path should be utf-8"),
            "--config",
            config.to_str().expect("path should be utf-8"),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("| 1 | Solid Industries (SOLID) |"));
}

#[test]
fn invalid_config_file_fails_with_runtime_code() {
    let dir = TempDir::new().expect("temp dir should be created");
    let batch = write_batch(&dir);
    let config = dir.path().join("screen.toml");
    fs::write(&config, "metrics = [\"Made Up\"]").expect("config should write");

    quantiscreen()
        .args([
            "screen",
            batch.to_str().expect("path should be utf-8"),
            "--config",
            config.to_str().expect("path should be utf-8"),
        ])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("unknown metric"));
}

#[test]
fn score_prints_single_symbol_breakdown() {
    let dir = TempDir::new().expect("temp dir should be created");
    let batch = write_batch(&dir);

    quantiscreen()
        .args([
            "score",
            batch.to_str().expect("path should be utf-8"),
            "solid",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Solid Industries (SOLID)"))
        .stdout(predicate::str::contains("Final score"))
        .stdout(predicate::str::contains("Undervalued"));
}

#[test]
fn score_reports_unknown_symbol() {
    let dir = TempDir::new().expect("temp dir should be created");
    let batch = write_batch(&dir);

    quantiscreen()
        .args([
            "score",
            batch.to_str().expect("path should be utf-8"),
            "GHOST",
        ])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("symbol not found"));
}

#[test]
fn factors_lists_top_entities_per_lens() {
    let dir = TempDir::new().expect("temp dir should be created");
    let batch = write_batch(&dir);

    quantiscreen()
        .args(["factors", batch.to_str().expect("path should be utf-8")])
        .assert()
        .success()
        .stdout(predicate::str::contains("#### Factor Sub-Lists"))
        .stdout(predicate::str::contains("**Value**"))
        .stdout(predicate::str::contains("**Growth**"));
}
