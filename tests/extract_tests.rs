//! End-to-end extraction tests: XML text in, record or error out.

#![cfg(feature = "xml")]

use cte_extract::core::*;
use cte_extract::cte::{self, RootShape, resolve_root};
use cte_extract::xml;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const PROCESSED: &str = include_str!("fixtures/cte_proc.xml");

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// The fixture without its `cteProc` envelope (bare `<CTe>` element).
fn plain() -> String {
    let start = PROCESSED.find("<CTe ").unwrap();
    let end = PROCESSED.find("</CTe>").unwrap() + "</CTe>".len();
    PROCESSED[start..end].to_string()
}

/// Minimal CT-e with `body` placed inside `infCte` after the `ide` block.
fn minimal(ide: &str, body: &str) -> String {
    format!(
        r#"<CTe><infCte Id="CTe35240312345678000190570010000001231000001234" versao="4.00">
            <ide>{ide}</ide>{body}</infCte></CTe>"#
    )
}

fn with_quantities(entries: &[(&str, &str)]) -> String {
    let inf_q: String = entries
        .iter()
        .map(|(unit, qty)| {
            format!("<infQ><cUnid>{unit}</cUnid><tpMed>PESO</tpMed><qCarga>{qty}</qCarga></infQ>")
        })
        .collect();
    minimal(
        "<nCT>1</nCT>",
        &format!(
            "<vPrest><vTPrest>1.00</vTPrest></vPrest>\
             <infCTeNorm><infCarga><vCarga>10.00</vCarga>{inf_q}</infCarga></infCTeNorm>"
        ),
    )
}

// ---------------------------------------------------------------------------
// Full document
// ---------------------------------------------------------------------------

#[test]
fn processed_document_identification() {
    let record = cte::from_xml(PROCESSED).unwrap();
    assert_eq!(record.access_key, "35240312345678000190570010000001231000001234");
    assert_eq!(record.version, "4.00");
    assert_eq!(record.number, "123");
    assert_eq!(record.series, "1");
    assert_eq!(record.model, "57");
    assert_eq!(record.issue_date, "2024-03-10");
    assert_eq!(
        record.issue_date_parsed(),
        chrono::NaiveDate::from_ymd_opt(2024, 3, 10)
    );
    assert_eq!(record.cfop, "6353");
    assert!(record.cfop_description.starts_with("PRESTACAO DE SERVICO"));
    assert_eq!(record.modal, "Rodoviário");
    assert_eq!(record.environment, "Produção");
    assert_eq!(record.origin, "CAMPINAS/SP");
    assert_eq!(record.destination, "CURITIBA/PR");
    assert_eq!(record.taker, "Remetente");
}

#[test]
fn processed_document_parties() {
    let record = cte::from_xml(PROCESSED).unwrap();

    assert_eq!(record.issuer.tax_id, "12345678000190");
    assert_eq!(record.issuer.name, "TRANSPORTES MODELO LTDA");
    assert_eq!(record.issuer.trade_name, "MODELO LOG");
    assert_eq!(record.issuer.state_registration, "244123456119");
    assert_eq!(
        record.issuer.address,
        "RODOVIA ANHANGUERA, KM 98, DISTRITO INDUSTRIAL, CAMPINAS, SP"
    );
    assert_eq!(record.issuer.phone, "1932221100");

    assert_eq!(record.sender.address, "Rua A, 10, São Paulo, SP");
    assert_eq!(record.sender.postal_code, "01001000");
    assert_eq!(record.sender.phone, "1133334444");

    assert_eq!(record.recipient.tax_id, "12345678909");
    assert_eq!(record.recipient.name, "JOSE & FILHOS COMERCIO");
    assert_eq!(record.recipient.state_registration, "");

    assert_eq!(record.expeditor.state_registration, "ISENTO");
    assert_eq!(record.receiver, Party::default());
}

#[test]
fn processed_document_cargo_transport_values() {
    let record = cte::from_xml(PROCESSED).unwrap();

    assert_eq!(record.cargo.product, "SOJA EM GRAOS");
    assert_eq!(record.cargo.other_characteristics, "GRANEL");
    assert_eq!(record.cargo.value, dec!(125000.00));
    assert_eq!(record.cargo.quantities.len(), 3);
    // 32 t is followed by 31 850 kg; the later mass entry is kept.
    assert_eq!(record.cargo.weight_kg, dec!(31850));

    assert_eq!(record.transport.rntrc, "12345678");
    assert_eq!(record.transport.vehicle_plate, "ABC1D23");
    assert_eq!(record.transport.driver_name, "JOAO DA SILVA");
    assert_eq!(record.transport.driver_tax_id, "11122233344");

    assert_eq!(record.values.total, dec!(3500.00));
    assert_eq!(record.values.received, dec!(3450.00));
    let names: Vec<_> = record.values.components.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["FRETE PESO", "PEDAGIO", "GRIS"]);
    assert_eq!(record.values.icms.cst, "00");
    assert_eq!(record.values.icms.rate, dec!(12));
    assert_eq!(record.values.icms.amount, dec!(420));

    assert_eq!(
        record.invoice_keys,
        vec![
            "35240398765432000110550010000456781000456789".to_string(),
            "35240398765432000110550010000456791000456790".to_string(),
        ]
    );
}

#[test]
fn extraction_is_deterministic() {
    let tree = xml::parse(PROCESSED).unwrap();
    let first = cte::extract(&tree).unwrap();
    for _ in 0..5 {
        assert_eq!(cte::extract(&tree).unwrap(), first);
    }
    let a = serde_json::to_string(&first).unwrap();
    let b = serde_json::to_string(&cte::from_xml(PROCESSED).unwrap()).unwrap();
    assert_eq!(a, b);

    let broken = minimal("<nCT>1</nCT>", "");
    let e1 = cte::from_xml(&broken).unwrap_err().to_string();
    let e2 = cte::from_xml(&broken).unwrap_err().to_string();
    assert_eq!(e1, e2);
}

// ---------------------------------------------------------------------------
// Root fallback
// ---------------------------------------------------------------------------

#[test]
fn plain_document_matches_processed() {
    let processed = cte::from_xml(PROCESSED).unwrap();
    let bare = cte::from_xml(&plain()).unwrap();
    assert_eq!(bare, processed);

    let (shape, _) = resolve_root(&xml::parse(&plain()).unwrap()).unwrap();
    assert_eq!(shape, RootShape::Plain);
    let (shape, _) = resolve_root(&xml::parse(PROCESSED).unwrap()).unwrap();
    assert_eq!(shape, RootShape::Processed);
}

#[test]
fn unknown_envelope_falls_back_to_first_element() {
    let wrapped = format!("<retDistDFe>{}</retDistDFe>", plain());
    let record = cte::from_xml(&wrapped).unwrap();
    assert_eq!(record.number, "123");
    let (shape, _) = resolve_root(&xml::parse(&wrapped).unwrap()).unwrap();
    assert_eq!(shape, RootShape::Enveloped("retDistDFe".into()));
}

#[test]
fn other_document_type_has_no_root() {
    let nfe = r#"<nfeProc><NFe><infNFe Id="NFe1"><ide><nNF>1</nNF></ide></infNFe></NFe></nfeProc>"#;
    assert_eq!(cte::from_xml(nfe).unwrap_err(), CteError::RootNotFound);
}

// ---------------------------------------------------------------------------
// Weight
// ---------------------------------------------------------------------------

#[test]
fn weight_last_mass_entry_wins() {
    let record = cte::from_xml(&with_quantities(&[("02", "2"), ("01", "500")])).unwrap();
    assert_eq!(record.cargo.weight_kg, dec!(500));
}

#[test]
fn weight_unit_conversion() {
    let tons = cte::from_xml(&with_quantities(&[("02", "1.5")])).unwrap();
    let kilos = cte::from_xml(&with_quantities(&[("01", "1500")])).unwrap();
    assert_eq!(tons.cargo.weight_kg, dec!(1500));
    assert_eq!(kilos.cargo.weight_kg, dec!(1500));
}

#[test]
fn weight_ignores_non_mass_units() {
    let record =
        cte::from_xml(&with_quantities(&[("00", "30"), ("03", "12"), ("04", "1000")])).unwrap();
    assert_eq!(record.cargo.weight_kg, Decimal::ZERO);
    assert_eq!(record.cargo.quantities.len(), 3);
}

#[test]
fn weight_skips_ton_amount_too_large_to_convert() {
    let huge = Decimal::MAX.to_string();
    let record = cte::from_xml(&with_quantities(&[("01", "750"), ("02", &huge)])).unwrap();
    assert_eq!(record.cargo.weight_kg, dec!(750));
    assert_eq!(record.cargo.quantities[1].amount, Decimal::MAX);

    let only_huge = cte::from_xml(&with_quantities(&[("02", &huge)])).unwrap();
    assert_eq!(only_huge.cargo.weight_kg, Decimal::ZERO);
}

// ---------------------------------------------------------------------------
// Field-level defaults
// ---------------------------------------------------------------------------

#[test]
fn unparseable_date_passes_through() {
    let xml = minimal(
        "<nCT>1</nCT><dhEmi>not-a-date</dhEmi>",
        "<vPrest><vTPrest>1</vTPrest></vPrest>",
    );
    let record = cte::from_xml(&xml).unwrap();
    assert_eq!(record.issue_date, "not-a-date");
    assert_eq!(record.issue_date_parsed(), None);
}

#[test]
fn issuer_without_registration_still_extracts() {
    let xml = minimal(
        "<nCT>9</nCT>",
        "<emit><CNPJ>12345678000190</CNPJ><xNome>TRANSP</xNome>\
         <enderEmit><xMun>CAMPINAS</xMun><UF>SP</UF></enderEmit></emit>\
         <vPrest><vTPrest>10.00</vTPrest></vPrest>",
    );
    let record = cte::from_xml(&xml).unwrap();
    assert_eq!(record.issuer.state_registration, "");
    assert_eq!(record.issuer.address, "CAMPINAS, SP");
    assert_eq!(record.number, "9");
}

#[test]
fn absent_optional_sections_take_defaults() {
    let xml = minimal("<nCT>1</nCT>", "<vPrest/>");
    // `<vPrest/>` is an empty element, which counts as missing.
    assert_eq!(cte::from_xml(&xml).unwrap_err(), CteError::MissingValues);

    let xml = minimal("<nCT>1</nCT>", "<vPrest><Comp><xNome>X</xNome></Comp></vPrest>");
    let record = cte::from_xml(&xml).unwrap();
    assert_eq!(record.values.total, Decimal::ZERO);
    assert_eq!(record.values.received, Decimal::ZERO);
    assert_eq!(record.values.components[0].value, Decimal::ZERO);
    assert_eq!(record.cargo, Cargo::default());
    assert_eq!(record.transport, Transport::default());
    assert!(record.invoice_keys.is_empty());
    assert_eq!(record.modal, "");
    assert_eq!(record.taker, "");
}

#[test]
fn single_vehicle_and_driver() {
    let xml = minimal(
        "<nCT>1</nCT>",
        "<vPrest><vTPrest>1</vTPrest></vPrest><infCTeNorm><infModal><rodo>\
         <veic><placa>QWE4R56</placa></veic><moto><xNome>ANA</xNome><CPF>1</CPF></moto>\
         </rodo></infModal></infCTeNorm>",
    );
    let record = cte::from_xml(&xml).unwrap();
    assert_eq!(record.transport.vehicle_plate, "QWE4R56");
    assert_eq!(record.transport.driver_name, "ANA");
}

#[test]
fn unknown_modal_code_passes_through() {
    let xml = minimal("<nCT>1</nCT><modal>09</modal>", "<vPrest><vTPrest>1</vTPrest></vPrest>");
    assert_eq!(cte::from_xml(&xml).unwrap().modal, "09");
}

#[test]
fn access_key_without_id_attribute() {
    let xml = "<CTe><infCte><ide><nCT>5</nCT></ide><vPrest><vTPrest>1</vTPrest></vPrest></infCte></CTe>";
    let record = cte::from_xml(xml).unwrap();
    assert_eq!(record.access_key, "");
    assert_eq!(record.number, "5");
}

// ---------------------------------------------------------------------------
// Structural errors
// ---------------------------------------------------------------------------

#[test]
fn missing_value_block_is_an_error() {
    let err = cte::from_xml(&minimal("<nCT>1</nCT>", "")).unwrap_err();
    assert_eq!(err, CteError::MissingValues);
    assert!(err.is_structural());
    insta::assert_snapshot!(err.to_string(), @"bloco de valores da prestação (vPrest) ausente no CT-e");
}

#[test]
fn missing_identification_is_an_error() {
    let xml = "<CTe><infCte Id=\"CTe1\"><vPrest><vTPrest>1</vTPrest></vPrest></infCte></CTe>";
    let err = cte::from_xml(xml).unwrap_err();
    assert_eq!(err, CteError::MissingIdentification);
    insta::assert_snapshot!(err.to_string(), @"bloco de identificação (ide) ausente no CT-e");
}

#[test]
fn malformed_document_is_an_error() {
    let truncated = &PROCESSED[..PROCESSED.len() / 2];
    assert!(matches!(cte::from_xml(truncated), Err(CteError::Malformed(_))));
    assert!(matches!(cte::from_xml(""), Err(CteError::Malformed(_))));
    assert!(matches!(cte::from_xml("<CTe><infCte></CTe>"), Err(CteError::Malformed(_))));
}

#[test]
fn record_serializes_decimals_as_strings() {
    let record = cte::from_xml(PROCESSED).unwrap();
    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(json["values"]["total"], "3500.00");
    assert_eq!(json["cargo"]["weight_kg"], "31850.0000");
    let back: CteRecord = serde_json::from_value(json).unwrap();
    assert_eq!(back, record);
}
