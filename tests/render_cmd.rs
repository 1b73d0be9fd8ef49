use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const CARS: &str = "\
Name,Speed,Power,Comfort
A,8,6,7
B,5,9,4
C,7,7,7
";

fn write_csv(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

fn radar(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("radar").unwrap();
    cmd.env("HOME", home).env_remove("RADAR_CONFIG");
    cmd
}

#[test]
fn render_svg_draws_one_trace_per_entity() {
    let tmp = TempDir::new().unwrap();
    let csv = write_csv(tmp.path(), "cars.csv", CARS);
    let out = tmp.path().join("chart.svg");

    radar(tmp.path())
        .arg("render")
        .arg(&csv)
        .args(["-m", "Speed", "-m", "Power", "-e", "A", "-e", "B", "-o"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 2 series x 2 metrics"));

    let svg = fs::read_to_string(&out).unwrap();
    assert!(svg.starts_with("<svg"));
    assert_eq!(svg.matches(r#"<g class="trace">"#).count(), 2);
    assert!(svg.contains("rgba(31, 119, 180, 0.2)"));
    assert!(svg.contains("rgba(255, 127, 14, 0.2)"));
}

#[test]
fn render_json_reports_axis_and_values() {
    let tmp = TempDir::new().unwrap();
    let csv = write_csv(tmp.path(), "cars.csv", CARS);
    let out = tmp.path().join("chart.json");

    radar(tmp.path())
        .arg("render")
        .arg(&csv)
        .args(["-m", "Speed", "-m", "Power", "-e", "A", "-e", "B", "--axis", "fixed", "-o"])
        .arg(&out)
        .assert()
        .success();

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(json["axis"]["min"], 0.0);
    assert_eq!(json["axis"]["max"], 100.0);
    assert_eq!(json["metrics"], serde_json::json!(["Speed", "Power"]));
    assert_eq!(json["series"][0]["name"], "A");
    assert_eq!(json["series"][0]["points"][0]["value"], 8.0);
    assert_eq!(json["series"][1]["color"], "#ff7f0e");
}

#[test]
fn render_without_metrics_prompts_and_writes_nothing() {
    let tmp = TempDir::new().unwrap();
    let csv = write_csv(tmp.path(), "notes.csv", "Name,Notes\nA,fast\nB,slow\n");
    let out = tmp.path().join("chart.svg");

    radar(tmp.path())
        .arg("render")
        .arg(&csv)
        .arg("-o")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Select at least one metric and one entity"));

    assert!(!out.exists());
}

#[test]
fn render_skips_missing_entity_by_default() {
    let tmp = TempDir::new().unwrap();
    let csv = write_csv(tmp.path(), "cars.csv", CARS);
    let out = tmp.path().join("chart.json");

    radar(tmp.path())
        .arg("render")
        .arg(&csv)
        .args(["-m", "Speed", "-e", "A", "-e", "Zed", "-e", "C", "-o"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Zed"));

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(json["skipped"], serde_json::json!(["Zed"]));
    assert_eq!(json["series"].as_array().unwrap().len(), 2);
    // Skipped entities keep their palette slot
    assert_eq!(json["series"][1]["color"], "#2ca02c");
}

#[test]
fn render_fails_on_missing_entity_when_asked() {
    let tmp = TempDir::new().unwrap();
    let csv = write_csv(tmp.path(), "cars.csv", CARS);
    let out = tmp.path().join("chart.svg");

    radar(tmp.path())
        .arg("render")
        .arg(&csv)
        .args(["-m", "Speed", "-e", "Zed", "--on-missing", "fail", "-o"])
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("no row has Name = \"Zed\""));

    assert!(!out.exists());
}

#[test]
fn render_rejects_text_metric() {
    let tmp = TempDir::new().unwrap();
    let csv = write_csv(tmp.path(), "cars.csv", "Name,Speed,Notes\nA,8,quick\n");

    radar(tmp.path())
        .arg("render")
        .arg(&csv)
        .args(["-m", "Notes", "-e", "A"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not numeric"));
}

#[test]
fn render_reports_unknown_file_type() {
    let tmp = TempDir::new().unwrap();
    let path = write_csv(tmp.path(), "cars.txt", CARS);

    radar(tmp.path())
        .arg("render")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn render_rejects_out_of_range_style() {
    let tmp = TempDir::new().unwrap();
    let csv = write_csv(tmp.path(), "cars.csv", CARS);

    radar(tmp.path())
        .arg("render")
        .arg(&csv)
        .args(["--line-width", "9"])
        .assert()
        .failure();
}

#[test]
fn render_rejects_output_extension_mismatch() {
    let tmp = TempDir::new().unwrap();
    let csv = write_csv(tmp.path(), "cars.csv", CARS);
    let pdf = tmp.path().join("chart.pdf");
    let svg = tmp.path().join("chart.svg");

    radar(tmp.path())
        .arg("render")
        .arg(&csv)
        .arg("-o")
        .arg(&pdf)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported output extension .pdf"));

    radar(tmp.path())
        .arg("render")
        .arg(&csv)
        .args(["--format", "png", "-o"])
        .arg(&svg)
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not match"));

    assert!(!pdf.exists());
    assert!(!svg.exists());
}

#[test]
fn render_accepts_file_after_flags() {
    let tmp = TempDir::new().unwrap();
    let csv = write_csv(tmp.path(), "cars.csv", CARS);
    let out = tmp.path().join("chart.json");

    radar(tmp.path())
        .arg("render")
        .args(["-m", "Speed", "-e", "B", "-o"])
        .arg(&out)
        .arg(&csv)
        .assert()
        .success();

    assert!(out.exists());
}

#[test]
fn render_reads_first_workbook_sheet() {
    let tmp = TempDir::new().unwrap();
    let xlsx = tmp.path().join("players.xlsx");
    let mut workbook = rust_xlsxwriter::Workbook::new();
    let sheet = workbook.add_worksheet();
    for (col, header) in ["Name", "Speed", "Power"].iter().enumerate() {
        sheet.write_string(0, col as u16, *header).unwrap();
    }
    for (row, (name, speed, power)) in [("A", 8.0, 9.0), ("B", 7.0, 8.0)].iter().enumerate() {
        let row = row as u32 + 1;
        sheet.write_string(row, 0, *name).unwrap();
        sheet.write_number(row, 1, *speed).unwrap();
        sheet.write_number(row, 2, *power).unwrap();
    }
    workbook.save(&xlsx).unwrap();
    let out = tmp.path().join("chart.json");

    radar(tmp.path())
        .arg("render")
        .arg(&xlsx)
        .arg("-o")
        .arg(&out)
        .assert()
        .success();

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(json["series"][0]["name"], "A");
    assert_eq!(json["series"][0]["color"], "#1f77b4");
    assert_eq!(json["series"][0]["points"][1]["value"], 9.0);
    assert_eq!(json["series"][1]["color"], "#ff7f0e");
    assert_eq!(json["series"][1]["points"][0]["value"], 7.0);
    let axis_max = json["axis"]["max"].as_f64().unwrap();
    assert!((axis_max - 9.9).abs() < 1e-9);
}

#[test]
fn render_defaults_to_export_dir() {
    let tmp = TempDir::new().unwrap();
    let csv = write_csv(tmp.path(), "cars.csv", CARS);

    radar(tmp.path())
        .arg("render")
        .arg(&csv)
        .assert()
        .success();

    let exports: Vec<_> = fs::read_dir(tmp.path().join(".radar-compare").join("exports"))
        .unwrap()
        .collect();
    assert_eq!(exports.len(), 1);
}
