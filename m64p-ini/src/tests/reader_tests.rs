use super::*;

const SCENARIO: &str = "\
[34AB1DEA3111A233A8B5C5679DE22E83]
GoodName=Super Plumber 64 (Europe) (En,Fr,De)
CRC=3B941695 F90A5EEB
Status=1
Players=4
";

const FULL_ENTRY: &str = "\
; Mupen64Plus Rom Catalog
;
[34AB1DEA3111A233A8B5C5679DE22E83]
GoodName=Super Plumber 64 (Europe) (En,Fr,De)
CRC=3B941695 F90A5EEB
Status=1
Rumble=Yes
CountPerOp=1
Players=4
Mempak=Yes
RefMD5=9D58996A8AA91263B5CD45C385F45FE4
SaveType=Controller Pack
Transferpak=Yes
DisableExtraMem=1
Biopak=Yes
SiDmaDuration=100
Cheat0=D109A814 0320,8109A814 0000,D109A816 F809,8109A816 0000

[9D58996A8AA91263B5CD45C385F45FE4]
GoodName=Super Plumber 64 (USA)
CRC=635A2BFF 8B022326
Status=4
";

fn read(text: &str) -> Catalog {
    read_catalog(text.as_bytes()).unwrap()
}

#[test]
fn test_single_entry() {
    let catalog = read(SCENARIO);
    assert_eq!(catalog.entries.len(), 1);

    let entry = &catalog.entries[0];
    assert_eq!(entry.md5.as_str(), "34AB1DEA3111A233A8B5C5679DE22E83");
    assert_eq!(entry.good_name, "Super Plumber 64 (Europe) (En,Fr,De)");
    assert_eq!(entry.crc, "3B941695 F90A5EEB");
    assert_eq!(entry.status, Some(1));
    assert_eq!(entry.players, Some(4));
    assert_eq!(entry.rumble, None);
    assert_eq!(entry.count_per_op, None);
    assert_eq!(entry.mempak, None);
    assert_eq!(entry.ref_md5, None);
    assert_eq!(entry.save_type, None);
    assert_eq!(entry.transferpak, None);
    assert_eq!(entry.disable_extra_mem, None);
    assert_eq!(entry.biopak, None);
    assert_eq!(entry.si_dma_duration, None);
    assert_eq!(entry.cheat0, None);
    assert!(catalog.diagnostics.is_empty());
}

#[test]
fn test_every_field() {
    let catalog = read(FULL_ENTRY);
    assert_eq!(catalog.entries.len(), 2);

    let entry = &catalog.entries[0];
    assert_eq!(entry.save_type.as_deref(), Some("Controller Pack"));
    assert_eq!(entry.status, Some(1));
    assert_eq!(entry.rumble.as_deref(), Some("Yes"));
    assert_eq!(entry.players, Some(4));
    assert_eq!(entry.count_per_op, Some(1));
    assert_eq!(entry.mempak.as_deref(), Some("Yes"));
    assert_eq!(
        entry.ref_md5.as_deref(),
        Some("9D58996A8AA91263B5CD45C385F45FE4")
    );
    assert_eq!(entry.transferpak.as_deref(), Some("Yes"));
    assert_eq!(entry.disable_extra_mem, Some(1));
    assert_eq!(entry.biopak.as_deref(), Some("Yes"));
    assert_eq!(entry.si_dma_duration, Some(100));
    assert_eq!(
        entry.cheat0.as_deref(),
        Some("D109A814 0320,8109A814 0000,D109A816 F809,8109A816 0000")
    );

    let second = &catalog.entries[1];
    assert_eq!(second.good_name, "Super Plumber 64 (USA)");
    assert_eq!(second.status, Some(4));
    assert_eq!(second.players, None);
}

#[test]
fn test_entries_yielded_in_file_order() {
    let names: Vec<_> = CatalogReader::new(FULL_ENTRY.as_bytes())
        .map(|e| e.unwrap().md5.to_string())
        .collect();
    assert_eq!(
        names,
        vec![
            "34AB1DEA3111A233A8B5C5679DE22E83",
            "9D58996A8AA91263B5CD45C385F45FE4"
        ]
    );
}

#[test]
fn test_entry_emitted_when_next_header_seen() {
    // The first entry is available before the second section is read.
    let mut reader = CatalogReader::new(FULL_ENTRY.as_bytes());
    let first = reader.next().unwrap().unwrap();
    assert_eq!(first.si_dma_duration, Some(100));
    let second = reader.next().unwrap().unwrap();
    assert_eq!(second.crc, "635A2BFF 8B022326");
    assert!(reader.next().is_none());
    assert!(reader.next().is_none());
}

#[test]
fn test_empty_input() {
    assert!(read("").entries.is_empty());
    assert!(read("; only a comment\n\n").entries.is_empty());
}

#[test]
fn test_header_without_fields() {
    let catalog = read("[34AB1DEA3111A233A8B5C5679DE22E83]\n");
    assert_eq!(catalog.entries.len(), 1);
    assert_eq!(catalog.entries[0].good_name, "");
}

#[test]
fn test_crlf_line_endings() {
    let catalog = read(&SCENARIO.replace('\n', "\r\n"));
    assert_eq!(catalog.entries[0].crc, "3B941695 F90A5EEB");
    assert_eq!(catalog.entries[0].players, Some(4));
}

#[test]
fn test_value_may_contain_equals() {
    let catalog = read("[34AB1DEA3111A233A8B5C5679DE22E83]\nGoodName=A=B (USA)\n");
    assert_eq!(catalog.entries[0].good_name, "A=B (USA)");
}

#[test]
fn test_unknown_key_is_reported_and_dropped() {
    let catalog = read(
        "[34AB1DEA3111A233A8B5C5679DE22E83]\nGoodName=X\nCheat1=0000\nPlayers=2\n",
    );
    assert_eq!(catalog.entries[0].players, Some(2));
    assert_eq!(
        catalog.diagnostics,
        vec![Diagnostic {
            line: 3,
            kind: DiagnosticKind::UnknownKey {
                key: "Cheat1".to_string(),
                value: "0000".to_string(),
            },
        }]
    );
}

#[test]
fn test_unparsable_lines_are_reported() {
    let catalog = read(
        "[34AB1DEA3111A233A8B5C5679DE22E83]\nnot a pair\nRumble=\n[lowercase]\nCRC=1 2\n",
    );
    assert_eq!(catalog.entries.len(), 1);
    assert_eq!(catalog.entries[0].crc, "1 2");
    assert_eq!(catalog.entries[0].rumble, None);

    let lines: Vec<_> = catalog.diagnostics.iter().map(|d| d.line).collect();
    assert_eq!(lines, vec![2, 3, 4]);
    assert!(
        catalog
            .diagnostics
            .iter()
            .all(|d| matches!(d.kind, DiagnosticKind::UnparsableLine(_)))
    );
}

#[test]
fn test_lowercase_section_is_not_a_header() {
    let err = read_catalog(
        "[34ab1dea3111a233a8b5c5679de22e83]\nGoodName=X\n".as_bytes(),
    )
    .unwrap_err();
    assert!(matches!(err, IniError::Protocol { line: 2, .. }));
}

#[test]
fn test_key_value_before_section_is_protocol_error() {
    let err = read_catalog("GoodName=Orphan\n".as_bytes()).unwrap_err();
    assert!(matches!(err, IniError::Protocol { line: 1, .. }));

    // Unknown keys are no exception.
    let err = read_catalog("Whatever=1\n".as_bytes()).unwrap_err();
    assert!(matches!(err, IniError::Protocol { .. }));
}

#[test]
fn test_duplicate_section_fails_after_first_entry() {
    let text = "\
[34AB1DEA3111A233A8B5C5679DE22E83]
GoodName=First
[34AB1DEA3111A233A8B5C5679DE22E83]
GoodName=Second
";
    let mut reader = CatalogReader::new(text.as_bytes());
    assert_eq!(reader.next().unwrap().unwrap().good_name, "First");
    match reader.next() {
        Some(Err(IniError::DuplicateKey(md5))) => {
            assert_eq!(md5, "34AB1DEA3111A233A8B5C5679DE22E83")
        }
        other => panic!("unexpected result: {other:?}"),
    }
    assert!(reader.next().is_none());

    assert!(matches!(
        read_catalog(text.as_bytes()),
        Err(IniError::DuplicateKey(_))
    ));
}

#[test]
fn test_invalid_number_aborts() {
    let text = "\
[34AB1DEA3111A233A8B5C5679DE22E83]
GoodName=First
Status=good
[9D58996A8AA91263B5CD45C385F45FE4]
GoodName=Never
";
    let mut reader = CatalogReader::new(text.as_bytes());
    match reader.next() {
        Some(Err(IniError::InvalidField { line, key, value })) => {
            assert_eq!(line, 3);
            assert_eq!(key, "Status");
            assert_eq!(value, "good");
        }
        other => panic!("unexpected result: {other:?}"),
    }
    assert!(reader.next().is_none());
}

#[test]
fn test_diagnostics_kept_after_error() {
    let text = "[34AB1DEA3111A233A8B5C5679DE22E83]\nFoo=1\nPlayers=x\n";
    let mut reader = CatalogReader::new(text.as_bytes());
    assert!(reader.next().unwrap().is_err());
    assert_eq!(reader.diagnostics().len(), 1);
}

#[test]
fn test_diagnostic_display() {
    let d = Diagnostic {
        line: 7,
        kind: DiagnosticKind::UnknownKey {
            key: "Cheat1".into(),
            value: "0".into(),
        },
    };
    assert_eq!(d.to_string(), "line 7: unknown key/value 'Cheat1'/0");
}

#[test]
fn test_negative_numbers_accepted() {
    let text = "[34AB1DEA3111A233A8B5C5679DE22E83]\nGoodName=X\nStatus=-1\nCountPerOp=-2\n";
    let catalog = read_catalog(text.as_bytes()).unwrap();
    assert_eq!(catalog.entries.len(), 1);
    assert_eq!(catalog.entries[0].status, Some(-1));
    assert_eq!(catalog.entries[0].count_per_op, Some(-2));
    assert_eq!(
        catalog.entries[0].written_value(Field::Status),
        Some("-1".to_string())
    );
}
