use crate::instance::Instance;
use crate::proxy::ViewProxy;
use crate::xml::children_named;
use crate::{Error, ParseOptions, Result};

/// Every instance of one XML text. A trace (an `<alloy>` root holding several `<instance>`
/// elements) keeps its time steps in document order.
#[derive(Debug, Clone)]
pub struct Document {
    instances: Vec<Instance>,
}

impl Document {
    pub fn instances(&self) -> &[Instance] {
        &self.instances
    }

    pub fn instance(&self, index: usize) -> Option<&Instance> {
        self.instances.get(index)
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn into_instances(self) -> Vec<Instance> {
        self.instances
    }
}

/// Parses an `<alloy>` document (or a bare `<instance>`).
///
/// The document is rejected as a whole on the first error.
pub fn parse_document(text: &str, options: ParseOptions) -> Result<Document> {
    let xml = roxmltree::Document::parse(text)?;
    let root = xml.root_element();

    let instances = match root.tag_name().name() {
        "instance" => vec![Instance::from_element(root, options, None)?],
        "alloy" => {
            let instances = children_named(root, "instance")
                .map(|el| Instance::from_element(el, options, None))
                .collect::<Result<Vec<_>>>()?;
            if instances.is_empty() {
                return Err(Error::InvalidDocument {
                    message: "<alloy> contains no <instance>".to_string(),
                });
            }
            instances
        }
        other => {
            return Err(Error::InvalidDocument {
                message: format!("unexpected root element <{other}>"),
            });
        }
    };

    tracing::debug!(instances = instances.len(), "parsed instance document");
    Ok(Document { instances })
}

/// Parses a document and binds the instance at `index` through `proxy`.
///
/// Nothing is bound unless the whole document parses.
pub fn parse_document_with_proxy(
    text: &str,
    options: ParseOptions,
    index: usize,
    proxy: &mut dyn ViewProxy,
) -> Result<Document> {
    let document = parse_document(text, options)?;
    let instance = document.instance(index).ok_or_else(|| Error::InvalidDocument {
        message: format!(
            "instance index {index} out of range (document has {})",
            document.len()
        ),
    })?;
    instance.bind(proxy);
    Ok(document)
}
