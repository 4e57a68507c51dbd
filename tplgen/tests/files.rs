use arch::reader::Template;
use std::fs;
use tplgen::builder::Generator;
use tplgen::config::{Config, OnUnknown};
use tplgen::error::Error;
use tplgen::source::RowSource;

const ROWS: &str = r#"
rows:
  - { mnemonic: "NOP", code: 0 }
  - { mnemonic: "LD a,N", code: 62 }
  - { mnemonic: "LD a,i", code: 87, prefix: 237 }
  - { mnemonic: "JP (hl)", code: 233 }
"#;

#[test]
fn build_and_read_back() {
    let dir = tempfile::tempdir().unwrap();
    let rows = dir.path().join("z80.yaml");
    let output = dir.path().join("z80.tpl");
    fs::write(&rows, ROWS).unwrap();

    let source = RowSource::load(&rows).unwrap();
    let report = Generator::new(&Config::default())
        .build_file(&source, &output)
        .unwrap();
    assert_eq!(report.instructions, 3);
    assert!(!dir.path().join("z80.tpl.tmp").exists());

    let template = Template::load(&output).unwrap();
    assert_eq!(template.header.count, 3);
    assert_eq!(template.lookup_line("LD a,i").unwrap().opcode, 87);
    assert_eq!(template.lookup_line("JP (hl)").unwrap().opcode, 233);
}

#[test]
fn failed_build_keeps_previous_output() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("z80.tpl");
    fs::write(&output, b"previous").unwrap();

    let source = RowSource::from_yaml("rows:\n  - { mnemonic: \"LD q,N\", code: 1 }\n").unwrap();
    let err = Generator::new(&Config::default())
        .build_file(&source, &output)
        .unwrap_err();
    assert!(matches!(err, Error::UnknownOperand(_)));
    assert_eq!(fs::read(&output).unwrap(), b"previous");
    assert!(!dir.path().join("z80.tpl.tmp").exists());
}

#[test]
fn config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tplgen.yaml");
    fs::write(
        &path,
        "on-unknown: record-and-continue\ndrop-first-prefix: true\nsort-combos: true\n",
    )
    .unwrap();

    let config = Config::load(&path).unwrap();
    assert_eq!(config.on_unknown, OnUnknown::RecordAndContinue);
    assert!(config.drop_first_prefix);
    assert!(config.sort_combos);
    assert!(!config.fold_case);
}

#[test]
fn missing_files() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.yaml");
    assert!(matches!(RowSource::load(&missing), Err(Error::FileOpen(..))));
    assert!(matches!(Config::load(&missing), Err(Error::FileOpen(..))));
    assert!(Template::load(dir.path().join("missing.tpl")).is_err());
}

#[test]
fn malformed_rows() {
    assert!(matches!(
        RowSource::from_yaml("rows:\n  - { code: 1 }\n"),
        Err(Error::Yaml(..))
    ));
    assert!(matches!(
        RowSource::from_yaml("rows: []\nextra: 1\n"),
        Err(Error::Yaml(..))
    ));
}
