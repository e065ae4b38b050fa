//! Integration tests for the `contrex` binary.
//!
//! Fixtures are built in-process with lopdf so the tests carry no binary
//! files and never depend on an installed OCR engine.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn cmd() -> Command {
    Command::cargo_bin("contrex").unwrap()
}

/// Build a single-page PDF with one text line per entry.
fn pdf_with_lines(lines: &[&str]) -> Vec<u8> {
    use lopdf::content::{Content, Operation};
    use lopdf::{Object, Stream, dictionary};

    let mut doc = lopdf::Document::with_version("1.5");

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });

    let mut operations = vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec!["F1".into(), 12.into()]),
        Operation::new("Td", vec![50.into(), 750.into()]),
    ];
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            operations.push(Operation::new("Td", vec![0.into(), (-20).into()]));
        }
        operations.push(Operation::new(
            "Tj",
            vec![Object::string_literal(*line)],
        ));
    }
    operations.push(Operation::new("ET", vec![]));

    let content = Content { operations };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Contents" => Object::Reference(content_id),
    });
    let pages_id = doc.add_object(dictionary! {
        "Type" => "Pages",
        "Kids" => vec![Object::Reference(page_id)],
        "Count" => 1,
        "Resources" => dictionary! {
            "Font" => dictionary! { "F1" => Object::Reference(font_id) },
        },
        "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
    });
    if let Ok(dict) = doc.get_object_mut(page_id).and_then(|o| o.as_dict_mut()) {
        dict.set("Parent", Object::Reference(pages_id));
    }
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}

/// A contract-shaped fixture with an embedded text layer long enough for
/// direct acceptance. ASCII only, so assertions do not depend on how the
/// text layer encodes accents.
fn contract_fixture() -> Vec<u8> {
    pdf_with_lines(&[
        "TERMO DE CONTRATO",
        "NUMERO DO CONTRATO: 015/2024",
        "CONTRATANTE: COMPANHIA DE DESENVOLVIMENTO DE MARICA - CODEMAR",
        "CONTRATADO: DESTAQ COMERCIO E SERVICOS LTDA - CNPJ 12.345.678/0001-95",
        "OBJETO: Prestacao de servicos de manutencao predial e conservacao",
        "VALOR TOTAL R$ 150.000,00",
        "DATA DO INICIO: 01/02/2024",
        "DATA DE TERMINO: 31/12/2024",
    ])
}

#[test]
fn test_no_arguments_reports_json_error() {
    cmd()
        .assert()
        .failure()
        .stdout(predicate::str::contains("\"error\""));
}

#[test]
fn test_missing_file_reports_json_error() {
    cmd()
        .arg("/nonexistent/contrato.pdf")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Arquivo não encontrado"));
}

#[test]
fn test_unreadable_pdf_emits_degraded_record() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("corrupt.pdf");
    fs::write(&path, b"not a pdf").unwrap();

    let output = cmd().arg(&path).assert().success().get_output().clone();
    let record: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();

    assert_eq!(record["metodo"], "FALHA_OCR");
    assert_eq!(record["observacoes"], "PDF escaneado - requer revisão manual");
    assert!(record["valor"].is_null());
}

#[test]
fn test_extracts_fields_from_text_layer() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("contrato.pdf");
    fs::write(&path, contract_fixture()).unwrap();

    let output = cmd().arg(&path).assert().success().get_output().clone();
    let record: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();

    assert_eq!(record["metodo"], "PDF_DIRETO");
    assert!(record["numero_contrato"].as_str().unwrap().starts_with("015/2024"));
    assert!(record["contratante"].as_str().unwrap().contains("CODEMAR"));
    assert!(record["contratado"].as_str().unwrap().contains("DESTAQ"));
    assert_eq!(record["cnpj_contratado"], "12.345.678/0001-95");
    assert_eq!(record["valor"], 150000.0);
    assert_eq!(record["data_inicio"], "2024-02-01");
    assert_eq!(record["data_fim"], "2024-12-31");
    assert_eq!(record["status"], "vigente");
    assert!(record["observacoes"].is_null());
    assert!(record["texto_extraido"].as_str().unwrap().contains("TERMO DE CONTRATO"));
}

#[test]
fn test_same_input_gives_identical_output() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("contrato.pdf");
    fs::write(&path, contract_fixture()).unwrap();

    let first = cmd().arg(&path).assert().success().get_output().stdout.clone();
    let second = cmd().arg(&path).assert().success().get_output().stdout.clone();
    assert_eq!(first, second);
}

#[test]
fn test_output_flag_writes_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("contrato.pdf");
    let output = dir.path().join("record.json");
    fs::write(&input, contract_fixture()).unwrap();

    cmd()
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let record: serde_json::Value =
        serde_json::from_slice(&fs::read(&output).unwrap()).unwrap();
    assert_eq!(record["metodo"], "PDF_DIRETO");
}
