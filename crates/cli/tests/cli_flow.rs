use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

#[allow(deprecated)]
fn romaneio(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("romaneio").expect("binary");
    cmd.current_dir(dir)
        .env_remove("ROMANEIO_STORE")
        .env("RUST_LOG", "warn")
        .arg("--store")
        .arg(dir.join("romaneio.json"));
    cmd
}

fn add(dir: &Path, rank: &str, re: &str, name: &str, gender: &str) {
    romaneio(dir)
        .args(["add", "--rank", rank, "--re", re, "--name", name, "--gender", gender])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("Militar cadastrado: RE {re}")));
}

fn sizing(dir: &Path, re: &str, pants: &str) {
    romaneio(dir)
        .args([
            "sizing", re, "--shirt", "40", "--pants", pants, "--tshirt", "M", "--jacket", "42",
            "--boots", "40", "--beret", "57", "--insignia", "Padrão", "--belt", "Único",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Romaneio salvo"));
}

#[test]
fn add_list_and_reject_duplicates() {
    let temp = tempdir().unwrap();
    let dir = temp.path();

    romaneio(dir)
        .arg("list")
        .assert()
        .success()
        .stdout("Nenhum militar cadastrado ainda.\n");

    add(dir, "sd", "000001", "silva", "masculino");
    add(dir, "cb", "000002", "souza", "feminino");
    add(dir, "sgt", "000003", "lima", "m");

    // Empty query shows the two highest service numbers.
    romaneio(dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("RE: 000002").and(predicate::str::contains("RE: 000003")))
        .stdout(predicate::str::contains("RE: 000001").not());

    romaneio(dir)
        .args(["list", "SILVA"])
        .assert()
        .success()
        .stdout("SD SILVA (RE: 000001) | OPM: COPOM SP | Sexo: Masculino\n");

    romaneio(dir)
        .args(["add", "--rank", "sd", "--re", "000001", "--name", "outro"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "O RE 000001 já está cadastrado para SD SILVA",
        ));

    romaneio(dir)
        .args(["add", "--rank", "sd", "--re", "12345", "--name", "curto"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("exatamente 6 números"));

    let stored: Value =
        serde_json::from_str(&fs::read_to_string(dir.join("romaneio.json")).unwrap()).unwrap();
    assert_eq!(stored["militares"].as_object().unwrap().len(), 3);
}

#[test]
fn five_person_report_and_documents() {
    let temp = tempdir().unwrap();
    let dir = temp.path();

    for (re, gender, pants) in [
        ("000001", "masculino", "40"),
        ("000002", "masculino", "40"),
        ("000003", "masculino", "40"),
        ("000004", "feminino", "40"),
        ("000005", "masculino", "42"),
    ] {
        add(dir, "sd", re, &format!("militar{re}"), gender);
        sizing(dir, re, pants);
    }

    let output = romaneio(dir)
        .args(["report", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let report: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["total"], 5);
    assert_eq!(report["sections"][1]["title"], "Calça Operacional");
    assert_eq!(report["sections"][1]["lines"][0]["label"], "Tamanho 40");
    assert_eq!(report["sections"][1]["lines"][0]["value"], "4 (M: 3, F: 1)");
    assert_eq!(report["sections"][1]["lines"][1]["value"], "1 (M: 1, F: 0)");

    romaneio(dir)
        .args(["report", "--detailed"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Total de militares: 5"))
        .stdout(predicate::str::contains("1. SD MILITAR000001 - RE: 000001"));

    romaneio(dir)
        .args(["pdf", "normal"])
        .assert()
        .success()
        .stdout(predicate::str::contains("relatorio-romaneio-normal.pdf"));
    let bytes = fs::read(dir.join("relatorio-romaneio-normal.pdf")).unwrap();
    assert!(bytes.starts_with(b"%PDF"));

    let out = dir.join("detalhado.pdf");
    romaneio(dir)
        .args(["pdf", "detailed", "--out"])
        .arg(&out)
        .assert()
        .success();
    assert!(fs::read(&out).unwrap().starts_with(b"%PDF"));
}

#[test]
fn reports_without_sizing_print_the_empty_message() {
    let temp = tempdir().unwrap();
    let dir = temp.path();
    add(dir, "sd", "000001", "silva", "masculino");

    romaneio(dir)
        .arg("report")
        .assert()
        .success()
        .stdout("Nenhum romaneio cadastrado ainda.\n");

    romaneio(dir)
        .args(["pdf", "normal"])
        .assert()
        .success()
        .stdout("Nenhum romaneio cadastrado ainda.\n");
    assert!(!dir.join("relatorio-romaneio-normal.pdf").exists());
}

#[test]
fn edit_and_delete() {
    let temp = tempdir().unwrap();
    let dir = temp.path();
    add(dir, "sd", "000001", "silva", "masculino");
    add(dir, "sd", "000002", "souza", "masculino");

    romaneio(dir)
        .args(["edit", "000001", "--new-re", "000002"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("já está cadastrado"));

    romaneio(dir)
        .args(["edit", "000001", "--rank", "cb", "--unit", "1 bpm"])
        .assert()
        .success();
    romaneio(dir)
        .args(["list", "000001"])
        .assert()
        .success()
        .stdout("CB SILVA (RE: 000001) | OPM: 1 BPM | Sexo: Masculino\n");

    romaneio(dir)
        .args(["edit", "000001", "--no-gender"])
        .assert()
        .success();
    romaneio(dir)
        .args(["list", "000001"])
        .assert()
        .success()
        .stdout("CB SILVA (RE: 000001) | OPM: 1 BPM | Sexo: N/A\n");

    romaneio(dir)
        .args(["edit", "000001", "--gender", "f", "--no-gender"])
        .assert()
        .failure();

    romaneio(dir)
        .args(["delete", "000001", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("RE 000001"));
    romaneio(dir)
        .args(["list", "000001"])
        .assert()
        .success()
        .stdout("Nenhum resultado encontrado.\n");

    romaneio(dir)
        .args(["delete", "999999", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Nenhum militar com RE 999999"));
}

#[test]
fn sizes_lists_the_catalog() {
    let temp = tempdir().unwrap();
    romaneio(temp.path())
        .args(["sizes", "boots"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Coturno: 33, 34"))
        .stdout(predicate::str::contains("48"));
}

#[test]
fn invalid_layout_is_rejected() {
    let temp = tempdir().unwrap();
    let dir = temp.path();
    add(dir, "sd", "000001", "silva", "masculino");
    sizing(dir, "000001", "40");
    let layout = dir.join("layout.json");
    fs::write(&layout, r#"{"break_threshold": 10}"#).unwrap();

    romaneio(dir)
        .args(["pdf", "detailed", "--layout"])
        .arg(&layout)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid page layout"));
}
