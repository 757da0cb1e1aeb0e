use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::core::{ATTR_PREFIX, CteError, Node, NodeMap, ParseOptions, TEXT_KEY};

/// Parse `xml` into a [`Node`] tree with default options.
pub fn parse(xml: &str) -> Result<Node, CteError> {
    parse_with(xml, &ParseOptions::default())
}

/// Parse `xml` into a [`Node`] tree.
///
/// The result is a map holding the document element. Elements are keyed by
/// local name (namespace prefixes dropped); namespace declarations are not
/// kept as attributes.
pub fn parse_with(xml: &str, options: &ParseOptions) -> Result<Node, CteError> {
    let xml = xml.strip_prefix('\u{feff}').unwrap_or(xml);
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    // Bottom frame is the document itself.
    let mut stack: Vec<Frame> = vec![Frame::default()];

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                if stack.len() > options.max_depth {
                    return Err(CteError::Malformed(format!(
                        "aninhamento de elementos excede {} níveis",
                        options.max_depth
                    )));
                }
                stack.push(Frame::open(e)?);
            }
            Ok(Event::Empty(ref e)) => {
                if stack.len() > options.max_depth {
                    return Err(CteError::Malformed(format!(
                        "aninhamento de elementos excede {} níveis",
                        options.max_depth
                    )));
                }
                let frame = Frame::open(e)?;
                attach(&mut stack, frame)?;
            }
            Ok(Event::Text(ref e)) => {
                let text = e
                    .unescape()
                    .map_err(|e| CteError::Malformed(format!("texto inválido: {e}")))?;
                push_text(&mut stack, &text);
            }
            Ok(Event::CData(ref e)) => {
                let text = std::str::from_utf8(e)
                    .map_err(|e| CteError::Malformed(format!("CDATA inválido: {e}")))?;
                push_text(&mut stack, text.trim());
            }
            Ok(Event::End(_)) => {
                if stack.len() < 2 {
                    return Err(CteError::Malformed("tag de fechamento inesperada".into()));
                }
                if let Some(frame) = stack.pop() {
                    attach(&mut stack, frame)?;
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(CteError::Malformed(format!(
                    "erro na posição {}: {e}",
                    reader.error_position()
                )));
            }
            _ => {}
        }
    }

    if stack.len() > 1 {
        let open = stack.last().map(|f| f.name.as_str()).unwrap_or_default();
        return Err(CteError::Malformed(format!(
            "documento incompleto: elemento <{open}> não foi fechado"
        )));
    }

    match stack.pop() {
        Some(document) if !document.children.is_empty() => Ok(Node::Map(document.children)),
        _ => Err(CteError::Malformed("documento vazio".into())),
    }
}

#[derive(Default)]
struct Frame {
    name: String,
    children: NodeMap,
    text: String,
}

impl Frame {
    fn open(e: &BytesStart<'_>) -> Result<Self, CteError> {
        let name = utf8(e.local_name().as_ref())?.to_string();
        let mut children = NodeMap::new();
        for attr in e.attributes() {
            let attr = attr.map_err(|e| CteError::Malformed(format!("atributo inválido: {e}")))?;
            let key = utf8(attr.key.as_ref())?;
            if key == "xmlns" || key.starts_with("xmlns:") {
                continue;
            }
            let local_name = attr.key.local_name();
            let local = utf8(local_name.as_ref())?;
            let value = attr
                .unescape_value()
                .map_err(|e| CteError::Malformed(format!("atributo inválido: {e}")))?;
            children.insert(format!("{ATTR_PREFIX}{local}"), Node::text(value));
        }
        Ok(Self {
            name,
            children,
            text: String::new(),
        })
    }

    fn into_node(self) -> Node {
        if self.children.is_empty() {
            return Node::Text(self.text);
        }
        let mut children = self.children;
        if !self.text.is_empty() {
            children.insert(TEXT_KEY, Node::Text(self.text));
        }
        Node::Map(children)
    }
}

fn attach(stack: &mut [Frame], frame: Frame) -> Result<(), CteError> {
    let parent = stack
        .last_mut()
        .ok_or_else(|| CteError::Malformed("tag de fechamento inesperada".into()))?;
    let name = frame.name.clone();
    parent.children.push_repeated(name, frame.into_node());
    Ok(())
}

fn push_text(stack: &mut [Frame], text: &str) {
    // Text outside the document element carries no data.
    if stack.len() < 2 || text.is_empty() {
        return;
    }
    if let Some(frame) = stack.last_mut() {
        frame.text.push_str(text);
    }
}

fn utf8(bytes: &[u8]) -> Result<&str, CteError> {
    std::str::from_utf8(bytes).map_err(|e| CteError::Malformed(format!("UTF-8 inválido: {e}")))
}
