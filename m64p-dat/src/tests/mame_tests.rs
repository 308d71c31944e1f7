use super::*;

const SAMPLE_SOFTLIST: &str = r#"<?xml version="1.0"?>
<!DOCTYPE softwarelist SYSTEM "softwarelist.dtd">
<softwarelist name="n64" description="Nintendo 64 cartridges">
    <software name="spl64" cloneof="spl64u">
        <description>Super Plumber 64 (Europe) (En,Fr,De)</description>
        <year>1997</year>
        <publisher>Plumber Co.</publisher>
        <info name="serial" value="NOS-NGEP-AOS, NOS-NGEP-EOR"/>
        <info name="release" value="19980807"/>
        <info name="alt_title" value="Tototakiki"/>
        <info name="developer" value="Plumber EAD"/>
        <sharedfeat name="compatibility" value="PAL"/>
        <part name="cart" interface="n64_cart">
            <dataarea name="rom" size="12582912">
                <rom name="nos-ngep-0.o1" size="12582911" crc="7425be2d" sha1="63627dba22ae2b357c0e370e68dc5af56eeb0a24" offset="000000"/>
            </dataarea>
        </part>
    </software>
    <software name="spl64u">
        <description>Super Plumber 64 (USA)</description>
        <year>1996</year>
        <publisher>Plumber Co.</publisher>
        <part name="cart" interface="n64_cart">
            <dataarea name="rom" size="8388608">
                <rom name="nus-nsme-0.u2" size="8388608" crc="9bef1128" sha1="6b6fc5c9c1c6b0ff7bd4c8a8bbf0ed0db0d4ac1d" offset="000000"/>
            </dataarea>
        </part>
    </software>
</softwarelist>"#;

fn software_with_rom(attrs: &str, rom: &str) -> String {
    format!(
        r#"<softwarelist><software {attrs}><part name="cart"><dataarea name="rom">{rom}</dataarea></part></software></softwarelist>"#
    )
}

#[test]
fn test_parse_sample_softlist() {
    let games = parse_software_list(SAMPLE_SOFTLIST.as_bytes()).unwrap();
    assert_eq!(games.len(), 2);

    let game = &games[0];
    assert_eq!(game.name, "spl64");
    assert_eq!(game.clone_of.as_deref(), Some("spl64u"));
    assert_eq!(game.description, "Super Plumber 64 (Europe) (En,Fr,De)");
    assert_eq!(game.year, "1997");
    assert_eq!(game.publisher, "Plumber Co.");
    assert_eq!(
        game.serial,
        Some(vec!["NOS-NGEP-AOS".to_string(), "NOS-NGEP-EOR".to_string()])
    );
    assert_eq!(game.release.as_deref(), Some("19980807"));
    assert_eq!(game.alt_title.as_deref(), Some("Tototakiki"));

    assert_eq!(game.rom.name, "nos-ngep-0.o1");
    assert_eq!(game.rom.size, 12582911);
    assert_eq!(game.rom.crc.as_deref(), Some("7425be2d"));
    assert_eq!(
        game.rom.sha1.as_deref(),
        Some("63627dba22ae2b357c0e370e68dc5af56eeb0a24")
    );
}

#[test]
fn test_optional_fields_absent() {
    let games = parse_software_list(SAMPLE_SOFTLIST.as_bytes()).unwrap();
    let game = &games[1];
    assert_eq!(game.name, "spl64u");
    assert_eq!(game.clone_of, None);
    assert_eq!(game.serial, None);
    assert_eq!(game.release, None);
    assert_eq!(game.alt_title, None);
}

#[test]
fn test_fields_from_attributes() {
    let xml = software_with_rom(
        r#"name="attrgame" description="Attribute Game" year="1999" publisher="Attr Soft""#,
        r#"<rom name="a.bin" size="1024" crc="deadbeef" sha1="00"/>"#,
    );
    let games = parse_software_list(xml.as_bytes()).unwrap();
    assert_eq!(games[0].description, "Attribute Game");
    assert_eq!(games[0].year, "1999");
    assert_eq!(games[0].publisher, "Attr Soft");
}

#[test]
fn test_attribute_wins_over_child_element() {
    let xml = r#"<softwarelist>
        <software name="both" description="From Attribute" year="2000" publisher="P">
            <description>From Child</description>
            <part><dataarea><rom name="r" size="1"/></dataarea></part>
        </software>
    </softwarelist>"#;
    let games = parse_software_list(xml.as_bytes()).unwrap();
    assert_eq!(games[0].description, "From Attribute");
}

#[test]
fn test_repeated_serial_info_keeps_last() {
    let xml = r#"<softwarelist>
        <software name="twice" description="Twice" year="1998" publisher="P">
            <info name="serial" value="NOS-NGEP-AOS, NOS-NGEP-EOR"/>
            <info name="serial" value="NOS-NGEP-AOS, NOS-NGEP-EOR"/>
            <part><dataarea><rom name="r" size="1"/></dataarea></part>
        </software>
    </softwarelist>"#;
    let games = parse_software_list(xml.as_bytes()).unwrap();
    assert_eq!(
        games[0].serial,
        Some(vec!["NOS-NGEP-AOS".to_string(), "NOS-NGEP-EOR".to_string()])
    );
}

#[test]
fn test_single_serial() {
    let xml = software_with_rom(
        r#"name="one" description="One" year="1998" publisher="P""#,
        r#"<rom name="r" size="1"/>"#,
    )
    .replace(
        "<part",
        r#"<info name="serial" value="NUS-NSME-USA"/><part"#,
    );
    let games = parse_software_list(xml.as_bytes()).unwrap();
    assert_eq!(games[0].serial, Some(vec!["NUS-NSME-USA".to_string()]));
}

#[test]
fn test_escaped_text() {
    let xml = software_with_rom(
        r#"name="amp" description="Mario &amp; Luigi" year="1998" publisher="P""#,
        r#"<rom name="r" size="1"/>"#,
    );
    let games = parse_software_list(xml.as_bytes()).unwrap();
    assert_eq!(games[0].description, "Mario & Luigi");
}

#[test]
fn test_missing_rom_is_malformed_record() {
    let xml = r#"<softwarelist>
        <software name="norom" description="No Rom" year="1998" publisher="P">
            <part name="cart"><dataarea name="rom"/></part>
        </software>
    </softwarelist>"#;
    let err = parse_software_list(xml.as_bytes()).unwrap_err();
    match err {
        DatError::MalformedRecord { record, .. } => assert_eq!(record, "norom"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_missing_name_is_malformed_record() {
    let xml = software_with_rom(
        r#"description="Nameless" year="1998" publisher="P""#,
        r#"<rom name="r" size="1"/>"#,
    );
    let err = parse_software_list(xml.as_bytes()).unwrap_err();
    assert!(matches!(err, DatError::MalformedRecord { .. }));
}

#[test]
fn test_missing_year_is_malformed_record() {
    let xml = software_with_rom(
        r#"name="noyear" description="No Year" publisher="P""#,
        r#"<rom name="r" size="1"/>"#,
    );
    let err = parse_software_list(xml.as_bytes()).unwrap_err();
    assert!(matches!(err, DatError::MalformedRecord { ref reason, .. } if reason.contains("year")));
}

#[test]
fn test_non_numeric_size_is_invalid_field() {
    let xml = software_with_rom(
        r#"name="badsize" description="Bad" year="1998" publisher="P""#,
        r#"<rom name="r" size="12M"/>"#,
    );
    let err = parse_software_list(xml.as_bytes()).unwrap_err();
    match err {
        DatError::InvalidField { record, value, .. } => {
            assert_eq!(record, "badsize");
            assert_eq!(value, "12M");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_entries_before_error_are_yielded() {
    let xml = r#"<softwarelist>
        <software name="good" description="Good" year="1998" publisher="P">
            <part><dataarea><rom name="r" size="1"/></dataarea></part>
        </software>
        <software name="bad" description="Bad" year="1998" publisher="P"/>
        <software name="never" description="Never" year="1998" publisher="P">
            <part><dataarea><rom name="r" size="1"/></dataarea></part>
        </software>
    </softwarelist>"#;
    let mut reader = SoftwareListReader::new(xml.as_bytes());
    assert_eq!(reader.next().unwrap().unwrap().name, "good");
    assert!(reader.next().unwrap().is_err());
    assert!(reader.next().is_none());
}

#[test]
fn test_unparsable_xml_is_malformed_document() {
    let xml = r#"<softwarelist><software name="x"></softwre></softwarelist>"#;
    let err = parse_software_list(xml.as_bytes()).unwrap_err();
    assert!(matches!(err, DatError::MalformedDocument(_)));
}

#[test]
fn test_empty_input_is_malformed_document() {
    let err = parse_software_list("".as_bytes()).unwrap_err();
    assert!(matches!(err, DatError::MalformedDocument(_)));
}

#[test]
fn test_empty_list() {
    let games = parse_software_list(r#"<softwarelist name="n64"/>"#.as_bytes()).unwrap();
    assert!(games.is_empty());
}

#[test]
fn test_nested_software_elements_ignored() {
    // Only direct children of the root are entries.
    let xml = r#"<softwarelist>
        <notes><software name="nested"/></notes>
    </softwarelist>"#;
    let games = parse_software_list(xml.as_bytes()).unwrap();
    assert!(games.is_empty());
}

#[test]
fn test_info_without_value_is_ignored() {
    let xml = r#"<softwarelist>
        <software name="novalue" description="No Value" year="1998" publisher="P">
            <info name="serial"/>
            <info value="orphan"/>
            <info name="release" value="19980807"/>
            <part><dataarea><rom name="r" size="1"/></dataarea></part>
        </software>
    </softwarelist>"#;
    let games = parse_software_list(xml.as_bytes()).unwrap();
    assert_eq!(games[0].serial, None);
    assert_eq!(games[0].release.as_deref(), Some("19980807"));
}
