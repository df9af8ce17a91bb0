use std::fs;
use std::process::Command;

use sintegra_cli::batch::{build_batch, parse_batch};
use sintegra_cli::layout::layout_rows;
use sintegra_model::{FieldSchema, FormatDirective, RecordSchema};
use sintegra_standards::SchemaRegistry;
use tempfile::tempdir;

const BATCH: &str = r#"[
  {
    "register": "74",
    "fields": {
      "DATA_INVENTARIO": "20201231",
      "CODIGO_PRODUTO": "000016",
      "QUANTIDADE": "0000000009",
      "VL_PRODUTO": "0000000000006",
      "CODIGO_POSSE": "2",
      "UF": "SC"
    }
  },
  {
    "register": "74",
    "fields": {
      "data_inventario": "20201231",
      "codigo_produto": "ab-77",
      "quantidade": 12,
      "vl_produto": 4590,
      "codigo_posse": "1",
      "cnpj_possuidor": "12345678000195",
      "ie_possuidor": "ISENTO",
      "uf": "SP"
    }
  }
]"#;

fn sintegra() -> Command {
    Command::new(env!("CARGO_BIN_EXE_sintegra"))
}

#[test]
fn batch_lines_snapshot() {
    let registry = SchemaRegistry::builtin().unwrap();
    let entries = parse_batch(BATCH).unwrap();
    let report = build_batch(&registry, &entries);
    assert!(!report.has_failures(), "{:?}", report.failures);
    insta::assert_snapshot!(report.lines(), @r"
    7420201231000016        00000000090000000000006253100000000000000              SC
    7420201231AB-77         00000000120000000004590153112345678000195ISENTO        SP
    ");
}

#[test]
fn layout_rows_snapshot() {
    let schema = RecordSchema::new(
        "88",
        vec![
            FieldSchema::string("UF", 2)
                .required()
                .with_format(FormatDirective::Empty)
                .with_info("Unidade da federacao"),
            FieldSchema::numeric("VALOR", 13).with_format("11v2".parse().unwrap()),
        ],
    );
    insta::assert_json_snapshot!(layout_rows(&schema), @r#"
    [
      {
        "position": 1,
        "field": "UF",
        "type": "string",
        "format": "empty",
        "required": true,
        "width": 2,
        "start": 3,
        "end": 4,
        "info": "Unidade da federacao"
      },
      {
        "position": 2,
        "field": "VALOR",
        "type": "numeric",
        "format": "11v2",
        "required": false,
        "width": 13,
        "start": 5,
        "end": 17,
        "info": null
      }
    ]
    "#);
}

#[test]
fn build_command_writes_crlf_file() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("inventario.json");
    let output = dir.path().join("out.txt");
    fs::write(&input, BATCH).unwrap();

    let status = sintegra()
        .arg("build")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .status()
        .unwrap();
    assert!(status.success());

    let contents = fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = contents.split_terminator("\r\n").collect();
    assert_eq!(lines.len(), 2);
    assert!(lines.iter().all(|line| line.len() == 81));
}

#[test]
fn build_command_defaults_output_next_to_input() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("inventario.json");
    fs::write(&input, BATCH).unwrap();

    let status = sintegra()
        .args(["build", "--line-ending", "lf"])
        .arg(&input)
        .status()
        .unwrap();
    assert!(status.success());

    let contents = fs::read_to_string(dir.path().join("inventario.txt")).unwrap();
    assert!(!contents.contains('\r'));
    assert_eq!(contents.lines().count(), 2);
}

#[test]
fn failing_record_blocks_output_and_sets_exit_code() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("lote.json");
    let output = dir.path().join("lote.txt");
    fs::write(
        &input,
        r#"[{"register": "74", "fields": {"UF": "SC"}}, {"register": "99", "fields": {}}]"#,
    )
    .unwrap();

    let result = sintegra()
        .arg("build")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .output()
        .unwrap();
    assert_eq!(result.status.code(), Some(1));
    assert!(!output.exists());
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("DATA_INVENTARIO is required"));
}

#[test]
fn catalog_dir_adds_record_types() {
    let dir = tempdir().unwrap();
    let catalogs = dir.path().join("catalogs");
    fs::create_dir(&catalogs).unwrap();
    fs::write(
        catalogs.join("90.toml"),
        r#"
code = "90"
description = "Totalizacao do arquivo"

[[fields]]
name = "TOTAL"
type = "numeric"
required = true
format = "totalNumber"
width = 8
"#,
    )
    .unwrap();
    let input = dir.path().join("totais.json");
    let output = dir.path().join("totais.txt");
    fs::write(&input, r#"[{"register": "90", "fields": {"TOTAL": 3}}]"#).unwrap();

    let status = sintegra()
        .arg("build")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .arg("--catalog-dir")
        .arg(&catalogs)
        .status()
        .unwrap();
    assert!(status.success());
    assert_eq!(fs::read_to_string(&output).unwrap(), "9000000003\r\n");
}

#[test]
fn layout_command_lists_builtin_types() {
    let result = sintegra().args(["layout", "--color", "never"]).output().unwrap();
    assert!(result.status.success());
    let stdout = String::from_utf8_lossy(&result.stdout);
    for code in ["70", "74", "75"] {
        assert!(stdout.contains(code), "missing {code}");
    }
}

#[test]
fn layout_command_rejects_unknown_type() {
    let result = sintegra().args(["layout", "42"]).output().unwrap();
    assert_eq!(result.status.code(), Some(1));
}
