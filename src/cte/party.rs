use crate::core::normalize::join_non_empty;
use crate::core::{Node, Party, lookup, text_of};

/// Role of a party in the document, with the element names it uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartyRole {
    Issuer,
    Sender,
    Recipient,
    Expeditor,
    Receiver,
}

impl PartyRole {
    /// Child of `infCte` holding the party.
    pub fn element(&self) -> &'static str {
        match self {
            Self::Issuer => "emit",
            Self::Sender => "rem",
            Self::Recipient => "dest",
            Self::Expeditor => "exped",
            Self::Receiver => "receb",
        }
    }

    /// Address child of the party element.
    pub fn address_element(&self) -> &'static str {
        match self {
            Self::Issuer => "enderEmit",
            Self::Sender => "enderReme",
            Self::Recipient => "enderDest",
            Self::Expeditor => "enderExped",
            Self::Receiver => "enderReceb",
        }
    }
}

/// Read the party playing `role` from `infCte`. A missing party yields
/// [`Party::default`].
pub fn extract_party(inf_cte: &Node, role: PartyRole) -> Party {
    party_from(inf_cte.get(role.element()), role.address_element())
}

/// Read a party element whose address lives under `address_key`.
pub fn party_from(node: Option<&Node>, address_key: &str) -> Party {
    let field = |key: &str| text_of(lookup(node, &[key]));
    let address = lookup(node, &[address_key]);
    let addr = |key: &str| text_of(lookup(address, &[key]));

    let tax_id = match field("CNPJ") {
        cnpj if !cnpj.is_empty() => cnpj,
        _ => field("CPF"),
    };

    // The issuer keeps its phone inside the address, the other roles beside it.
    let phone = match field("fone") {
        fone if !fone.is_empty() => fone,
        _ => addr("fone"),
    };

    let street = addr("xLgr");
    let number = addr("nro");
    let district = addr("xBairro");
    let municipality = addr("xMun");
    let state = addr("UF");

    Party {
        tax_id,
        name: field("xNome"),
        trade_name: field("xFant"),
        state_registration: field("IE"),
        address: join_non_empty([
            street.as_str(),
            number.as_str(),
            district.as_str(),
            municipality.as_str(),
            state.as_str(),
        ]),
        postal_code: addr("CEP"),
        municipality_code: addr("cMun"),
        phone,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: Vec<(&str, Node)>) -> Node {
        Node::Map(entries.into_iter().map(|(k, v)| (k.to_string(), v)).collect())
    }

    fn t(s: &str) -> Node {
        Node::text(s)
    }

    #[test]
    fn composes_address_without_empty_parts() {
        let rem = map(vec![
            ("CNPJ", t("12345678000190")),
            ("IE", t("111222333444")),
            ("xNome", t("Remetente Ltda")),
            ("fone", t("1133334444")),
            (
                "enderReme",
                map(vec![
                    ("xLgr", t("Rua A")),
                    ("nro", t("10")),
                    ("xBairro", t("")),
                    ("cMun", t("3550308")),
                    ("xMun", t("São Paulo")),
                    ("CEP", t("01001000")),
                    ("UF", t("SP")),
                ]),
            ),
        ]);
        let inf_cte = map(vec![("rem", rem)]);
        let party = extract_party(&inf_cte, PartyRole::Sender);
        assert_eq!(party.address, "Rua A, 10, São Paulo, SP");
        assert_eq!(party.tax_id, "12345678000190");
        assert_eq!(party.state_registration, "111222333444");
        assert_eq!(party.postal_code, "01001000");
        assert_eq!(party.municipality_code, "3550308");
        assert_eq!(party.phone, "1133334444");
    }

    #[test]
    fn falls_back_to_cpf() {
        let dest = map(vec![("CPF", t("12345678909")), ("xNome", t("Fulano"))]);
        let party = party_from(Some(&dest), "enderDest");
        assert_eq!(party.tax_id, "12345678909");
        assert_eq!(party.name, "Fulano");
        assert_eq!(party.address, "");
        assert_eq!(party.state_registration, "");
    }

    #[test]
    fn issuer_phone_inside_address() {
        let emit = map(vec![
            ("CNPJ", t("98765432000110")),
            ("enderEmit", map(vec![("fone", t("1940041234")), ("UF", t("SP"))])),
        ]);
        let party = party_from(Some(&emit), PartyRole::Issuer.address_element());
        assert_eq!(party.phone, "1940041234");
        assert_eq!(party.address, "SP");
    }

    #[test]
    fn missing_party_is_default() {
        let inf_cte = map(vec![]);
        assert_eq!(extract_party(&inf_cte, PartyRole::Receiver), Party::default());
    }
}
