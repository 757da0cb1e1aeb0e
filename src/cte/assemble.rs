use tracing::{debug, trace};

use super::party::{PartyRole, extract_party};
use super::root::resolve_root;
use super::sections::{
    Identification, extract_cargo, extract_identification, extract_invoice_keys,
    extract_transport, extract_values,
};
use crate::core::codes::{environment_label, modal_label, taker_label};
use crate::core::normalize::{access_key, date_only, place, weight_kg};
use crate::core::{
    Cargo, CteError, CteRecord, Node, Party, Transport, Values, lookup, text_of,
};

/// Extract the flat record from a parsed CT-e tree.
///
/// Fails only when the business root, the `ide` block or the `vPrest` block
/// is missing; every other absent field takes its default.
pub fn extract(tree: &Node) -> Result<CteRecord, CteError> {
    let sections = extract_sections(tree)?;
    let record = normalize(sections);
    debug!(
        access_key = %record.access_key,
        number = %record.number,
        "extracted CT-e"
    );
    Ok(record)
}

/// [`extract`] for callers whose reader may not have produced a tree.
pub fn extract_optional(tree: Option<&Node>) -> Result<CteRecord, CteError> {
    match tree {
        Some(tree) => extract(tree),
        None => Err(CteError::Malformed("documento vazio".into())),
    }
}

/// Raw output of the section extractors, before normalization.
struct Sections {
    id_attr: String,
    version: String,
    identification: Identification,
    issuer: Party,
    sender: Party,
    recipient: Party,
    expeditor: Party,
    receiver: Party,
    cargo: Cargo,
    transport: Transport,
    values: Values,
    invoice_keys: Vec<String>,
}

fn extract_sections(tree: &Node) -> Result<Sections, CteError> {
    let (_, inf_cte) = resolve_root(tree)?;

    let ide = required(inf_cte, "ide").ok_or(CteError::MissingIdentification)?;
    let v_prest = required(inf_cte, "vPrest").ok_or(CteError::MissingValues)?;
    trace!("required CT-e blocks present");

    let norm = inf_cte.get("infCTeNorm");

    Ok(Sections {
        id_attr: text_of(inf_cte.attr("Id")),
        version: text_of(inf_cte.attr("versao")),
        identification: extract_identification(ide),
        issuer: extract_party(inf_cte, PartyRole::Issuer),
        sender: extract_party(inf_cte, PartyRole::Sender),
        recipient: extract_party(inf_cte, PartyRole::Recipient),
        expeditor: extract_party(inf_cte, PartyRole::Expeditor),
        receiver: extract_party(inf_cte, PartyRole::Receiver),
        cargo: extract_cargo(lookup(norm, &["infCarga"])),
        transport: extract_transport(lookup(norm, &["infModal", "rodo"])),
        values: extract_values(v_prest, inf_cte.get("imp")),
        invoice_keys: extract_invoice_keys(lookup(norm, &["infDoc"])),
    })
}

/// A required block must be an element; an empty `<ide/>` counts as missing.
fn required<'a>(inf_cte: &'a Node, key: &str) -> Option<&'a Node> {
    inf_cte.get(key).filter(|n| n.as_map().is_some())
}

fn normalize(s: Sections) -> CteRecord {
    let id = s.identification;
    let mut cargo = s.cargo;
    cargo.weight_kg = weight_kg(&cargo.quantities);

    CteRecord {
        access_key: access_key(&s.id_attr),
        version: s.version,
        number: id.number,
        series: id.series,
        model: id.model,
        issue_date: date_only(&id.issued_at),
        cfop: id.cfop,
        cfop_description: id.nature,
        modal: modal_label(&id.modal_code),
        environment: environment_label(&id.environment_code),
        origin: place(&id.origin_municipality, &id.origin_state),
        destination: place(&id.destination_municipality, &id.destination_state),
        taker: taker_label(&id.taker_code),
        issuer: s.issuer,
        sender: s.sender,
        recipient: s.recipient,
        expeditor: s.expeditor,
        receiver: s.receiver,
        cargo,
        transport: s.transport,
        values: s.values,
        invoice_keys: s.invoice_keys,
    }
}
