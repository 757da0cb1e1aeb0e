use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Flat record extracted from one CT-e, ready for database insertion.
///
/// Every string field defaults to `""`, every amount to zero and every list
/// to empty when the document does not carry it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CteRecord {
    /// 44-digit access key (`infCte@Id` without the `CTe` prefix).
    pub access_key: String,
    /// Layout version (`infCte@versao`).
    pub version: String,
    /// `nCT`: document number.
    pub number: String,
    /// `serie`: series.
    pub series: String,
    /// `mod`: fiscal document model (57 for CT-e).
    pub model: String,
    /// `dhEmi` truncated to `YYYY-MM-DD`, or the raw value if it is not a date.
    pub issue_date: String,
    /// `CFOP`: fiscal operation code.
    pub cfop: String,
    /// `natOp`: description of the operation.
    pub cfop_description: String,
    /// Transport modal label (e.g. "Rodoviário").
    pub modal: String,
    /// Environment label (`tpAmb`).
    pub environment: String,
    /// "municipality/region" where the service starts.
    pub origin: String,
    /// "municipality/region" where the service ends.
    pub destination: String,
    /// Role of the party that pays for the service (`toma3`/`toma4`).
    pub taker: String,
    /// `emit`: issuing carrier.
    pub issuer: Party,
    /// `rem`: sender.
    pub sender: Party,
    /// `dest`: recipient.
    pub recipient: Party,
    /// `exped`: expeditor.
    pub expeditor: Party,
    /// `receb`: receiver.
    pub receiver: Party,
    /// `infCarga`.
    pub cargo: Cargo,
    /// `infModal`.
    pub transport: Transport,
    /// `vPrest` and `imp`.
    pub values: Values,
    /// Access keys of the NF-e invoices carried (`infDoc/infNFe/chave`).
    pub invoice_keys: Vec<String>,
}

impl CteRecord {
    /// Issue date as a calendar date, if the normalized string is one.
    pub fn issue_date_parsed(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.issue_date, "%Y-%m-%d").ok()
    }
}

/// Issuer, sender, recipient, expeditor or receiver.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    /// CNPJ, or CPF when the party is a natural person.
    pub tax_id: String,
    /// `xNome`.
    pub name: String,
    /// `xFant`.
    pub trade_name: String,
    /// `IE`: state registration.
    pub state_registration: String,
    /// Street, number, neighborhood, municipality and state joined by ", ".
    pub address: String,
    /// `CEP`.
    pub postal_code: String,
    /// `cMun`: IBGE municipality code.
    pub municipality_code: String,
    /// `fone`.
    pub phone: String,
}

/// `infCarga`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cargo {
    /// Declared weight in kilograms.
    pub weight_kg: Decimal,
    /// `proPred`: predominant product.
    pub product: String,
    /// `xOutCat`: other cargo characteristics.
    pub other_characteristics: String,
    /// `vCarga`: declared cargo value.
    pub value: Decimal,
    /// Every `infQ` entry, in document order.
    pub quantities: Vec<Quantity>,
}

/// One `infQ` entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    /// `cUnid`.
    pub unit_code: String,
    /// `tpMed`: measure type (e.g. "PESO BRUTO").
    pub measure: String,
    /// `qCarga`.
    pub amount: Decimal,
}

/// Vehicle and driver (first entry of each).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transport {
    /// `RNTRC`: carrier registration with ANTT.
    pub rntrc: String,
    pub vehicle_plate: String,
    pub driver_name: String,
    pub driver_tax_id: String,
}

/// `vPrest` plus the ICMS summary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Values {
    /// `vTPrest`: total service value.
    pub total: Decimal,
    /// `vRec`: amount received.
    pub received: Decimal,
    /// `Comp`: value breakdown.
    pub components: Vec<ValueComponent>,
    pub icms: Icms,
}

/// One `Comp` entry of `vPrest`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueComponent {
    pub name: String,
    pub value: Decimal,
}

/// ICMS as declared under `imp/ICMS`, whatever the `ICMSxx` group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Icms {
    /// `CST`: tax situation code.
    pub cst: String,
    /// `vBC`.
    pub base: Decimal,
    /// `pICMS`.
    pub rate: Decimal,
    /// `vICMS`.
    pub amount: Decimal,
}
