use std::fs;

use sintegra_model::RawInput;
use sintegra_record::{LineEnding, RecordEngine, WriterOptions, write_records};
use sintegra_standards::SchemaRegistry;
use tempfile::tempdir;

#[test]
fn writes_flat_file_with_crlf_lines() {
    let registry = SchemaRegistry::builtin().unwrap();
    let engine = RecordEngine::new(registry.require("74").unwrap().clone()).unwrap();
    let records: Vec<_> = ["000016", "000017"]
        .into_iter()
        .map(|codigo| {
            let input = RawInput::new()
                .with("DATA_INVENTARIO", "20201231")
                .with("CODIGO_PRODUTO", codigo)
                .with("QUANTIDADE", 1)
                .with("VL_PRODUTO", 150)
                .with("CODIGO_POSSE", "1")
                .with("UF", "SC");
            engine.build(&input).unwrap()
        })
        .collect();

    let dir = tempdir().unwrap();
    let path = dir.path().join("sintegra.txt");
    let written = write_records(&path, &records, WriterOptions::default()).unwrap();
    assert_eq!(written, 2);

    let contents = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = contents.split_terminator("\r\n").collect();
    assert_eq!(lines.len(), 2);
    assert!(lines.iter().all(|line| line.len() == 81));
    assert!(lines[1].starts_with("7420201231000017"));
}

#[test]
fn line_feed_files_have_no_carriage_returns() {
    let registry = SchemaRegistry::builtin().unwrap();
    let engine = RecordEngine::new(registry.require("74").unwrap().clone()).unwrap();
    let record = engine
        .build(
            &RawInput::new()
                .with("DATA_INVENTARIO", "20210101")
                .with("CODIGO_PRODUTO", "A1")
                .with("QUANTIDADE", 3)
                .with("VL_PRODUTO", 300)
                .with("CODIGO_POSSE", "3")
                .with("UF", "SP"),
        )
        .unwrap();

    let dir = tempdir().unwrap();
    let path = dir.path().join("sintegra.txt");
    let options = WriterOptions {
        line_ending: LineEnding::Lf,
    };
    write_records(&path, [&record], options).unwrap();
    let contents = fs::read_to_string(&path).unwrap();
    assert_eq!(contents, format!("{record}\n"));
}
