//! One extractor per business section of `infCte`.
//!
//! Extractors read raw text through the tree accessors and never fail;
//! conversion of codes, dates and units happens in the normalize stage.

use tracing::trace;

use crate::core::normalize::decimal_or_zero;
use crate::core::{
    Cargo, Icms, Node, Quantity, Transport, ValueComponent, Values, as_sequence, lookup, text_of,
};

/// Raw fields of the `ide` block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identification {
    pub number: String,
    pub series: String,
    pub model: String,
    /// `dhEmi` (layout 3.00+) or `dEmi` (older layouts), as written.
    pub issued_at: String,
    pub cfop: String,
    pub nature: String,
    pub modal_code: String,
    pub environment_code: String,
    pub origin_municipality: String,
    pub origin_state: String,
    pub destination_municipality: String,
    pub destination_state: String,
    pub taker_code: String,
}

pub fn extract_identification(ide: &Node) -> Identification {
    let issued_at = match ide.text_at(&["dhEmi"]) {
        dh if !dh.is_empty() => dh,
        _ => ide.text_at(&["dEmi"]),
    };

    let taker_code = ["toma3", "toma03", "toma4"]
        .into_iter()
        .map(|group| ide.text_at(&[group, "toma"]))
        .find(|code| !code.is_empty())
        .unwrap_or_default();

    Identification {
        number: ide.text_at(&["nCT"]),
        series: ide.text_at(&["serie"]),
        model: ide.text_at(&["mod"]),
        issued_at,
        cfop: ide.text_at(&["CFOP"]),
        nature: ide.text_at(&["natOp"]),
        modal_code: ide.text_at(&["modal"]),
        environment_code: ide.text_at(&["tpAmb"]),
        origin_municipality: ide.text_at(&["xMunIni"]),
        origin_state: ide.text_at(&["UFIni"]),
        destination_municipality: ide.text_at(&["xMunFim"]),
        destination_state: ide.text_at(&["UFFim"]),
        taker_code,
    }
}

/// `infCTeNorm/infCarga`. Weight is left at zero; it is resolved from
/// [`Cargo::quantities`] during normalization.
pub fn extract_cargo(inf_carga: Option<&Node>) -> Cargo {
    let quantities = as_sequence(lookup(inf_carga, &["infQ"]))
        .into_iter()
        .map(|q| Quantity {
            unit_code: q.text_at(&["cUnid"]),
            measure: q.text_at(&["tpMed"]),
            amount: decimal_or_zero(&q.text_at(&["qCarga"])),
        })
        .collect::<Vec<_>>();
    trace!(entries = quantities.len(), "read cargo quantities");

    Cargo {
        weight_kg: Default::default(),
        product: text_of(lookup(inf_carga, &["proPred"])),
        other_characteristics: text_of(lookup(inf_carga, &["xOutCat"])),
        value: decimal_or_zero(&text_of(lookup(inf_carga, &["vCarga"]))),
        quantities,
    }
}

/// `infModal/rodo`. Only the first vehicle and the first driver are read.
pub fn extract_transport(rodo: Option<&Node>) -> Transport {
    let vehicles = as_sequence(lookup(rodo, &["veic"]));
    let drivers = as_sequence(lookup(rodo, &["moto"]));
    let first_vehicle = vehicles.first().copied();
    let first_driver = drivers.first().copied();

    Transport {
        rntrc: text_of(lookup(rodo, &["RNTRC"])),
        vehicle_plate: text_of(lookup(first_vehicle, &["placa"])),
        driver_name: text_of(lookup(first_driver, &["xNome"])),
        driver_tax_id: text_of(lookup(first_driver, &["CPF"])),
    }
}

/// `infDoc/infNFe/chave`, in document order, skipping entries without a key.
pub fn extract_invoice_keys(inf_doc: Option<&Node>) -> Vec<String> {
    as_sequence(lookup(inf_doc, &["infNFe"]))
        .into_iter()
        .map(|nfe| nfe.text_at(&["chave"]))
        .filter(|key| !key.is_empty())
        .collect()
}

/// `vPrest` and, when present, `imp/ICMS`.
pub fn extract_values(v_prest: &Node, imp: Option<&Node>) -> Values {
    let components = as_sequence(v_prest.get("Comp"))
        .into_iter()
        .map(|comp| ValueComponent {
            name: comp.text_at(&["xNome"]),
            value: decimal_or_zero(&comp.text_at(&["vComp"])),
        })
        .collect();

    Values {
        total: decimal_or_zero(&v_prest.text_at(&["vTPrest"])),
        received: decimal_or_zero(&v_prest.text_at(&["vRec"])),
        components,
        icms: extract_icms(lookup(imp, &["ICMS"])),
    }
}

/// The ICMS block holds exactly one `ICMSxx` group whose name depends on
/// the tax situation; take the first child that is an element.
fn extract_icms(icms: Option<&Node>) -> Icms {
    let group = icms
        .and_then(Node::as_map)
        .and_then(|m| m.iter().find(|(_, v)| v.as_map().is_some()).map(|(_, v)| v));

    Icms {
        cst: text_of(lookup(group, &["CST"])),
        base: decimal_or_zero(&text_of(lookup(group, &["vBC"]))),
        rate: decimal_or_zero(&text_of(lookup(group, &["pICMS"]))),
        amount: decimal_or_zero(&text_of(lookup(group, &["vICMS"]))),
    }
}
