use crate::ParseOptions;
use crate::atom::Atom;
use crate::builder::{SignatureMap, bitwidth, signatures_from_xml};
use crate::field::{Field, Skolem};
use crate::proxy::{ViewProxy, var_name};
use crate::signature::{Signature, UNIV};
use crate::xml::{attr, children_named};
use crate::{Error, Result};
use indexmap::IndexMap;
use roxmltree::Node;
use rustc_hash::FxHashSet;
use std::rc::Rc;

/// One solution produced by the model finder (an `<instance>` element).
#[derive(Debug, Clone)]
pub struct Instance {
    bitwidth: i64,
    maxseq: Option<i64>,
    command: Option<String>,
    filename: Option<String>,
    signatures: SignatureMap,
    roots: Vec<Rc<Signature>>,
    fields: IndexMap<String, Rc<Field>>,
    skolems: IndexMap<String, Rc<Skolem>>,
}

impl Instance {
    /// Builds a complete instance. When `proxy` is given, it receives every object once the
    /// whole instance has been built successfully.
    pub fn from_element(
        element: Node<'_, '_>,
        options: ParseOptions,
        proxy: Option<&mut dyn ViewProxy>,
    ) -> Result<Self> {
        if element.tag_name().name() != "instance" {
            return Err(Error::InvalidDocument {
                message: format!("expected <instance>, found <{}>", element.tag_name().name()),
            });
        }

        let signatures = signatures_from_xml(element)?;

        let fields = children_named(element, "field")
            .map(|el| {
                let field = Field::from_element(el, &signatures, options)?;
                Ok((field.doc_id().to_string(), Rc::new(field)))
            })
            .collect::<Result<IndexMap<_, _>>>()?;

        let skolems = children_named(element, "skolem")
            .map(|el| {
                let skolem = Skolem::from_element(el, &signatures, options)?;
                Ok((skolem.doc_id().to_string(), Rc::new(skolem)))
            })
            .collect::<Result<IndexMap<_, _>>>()?;

        let maxseq = attr(element, "maxseq").and_then(|raw| raw.trim().parse::<i64>().ok());

        let instance = Self {
            bitwidth: bitwidth(element)?,
            maxseq,
            command: attr(element, "command").map(str::to_string),
            filename: attr(element, "filename").map(str::to_string),
            roots: forest_roots(&signatures),
            signatures,
            fields,
            skolems,
        };

        tracing::debug!(
            signatures = instance.signatures.len(),
            fields = instance.fields.len(),
            skolems = instance.skolems.len(),
            "parsed instance"
        );

        if let Some(proxy) = proxy {
            instance.bind(proxy);
        }
        Ok(instance)
    }

    /// Hands every signature, atom, field and skolem to `proxy` under its script name.
    pub fn bind(&self, proxy: &mut dyn ViewProxy) {
        for sig in self.distinct_signatures() {
            proxy.bind_signature(&var_name(sig.id()), sig);
            for atom in sig.own_atoms() {
                proxy.bind_atom(&var_name(atom.id()), atom);
            }
        }
        for field in self.fields.values() {
            proxy.bind_field(&var_name(field.id()), field);
        }
        for skolem in self.skolems.values() {
            proxy.bind_skolem(&var_name(skolem.id()), skolem);
        }
    }

    pub fn bitwidth(&self) -> i64 {
        self.bitwidth
    }

    pub fn maxseq(&self) -> Option<i64> {
        self.maxseq
    }

    pub fn command(&self) -> Option<&str> {
        self.command.as_deref()
    }

    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    /// The document `ID` to signature map produced by the builder.
    pub fn signature_map(&self) -> &SignatureMap {
        &self.signatures
    }

    pub fn signature_by_id(&self, doc_id: &str) -> Option<&Rc<Signature>> {
        self.signatures.get(doc_id)
    }

    /// Looks a signature up by label (`this/Node`, `Int`, ...).
    pub fn signature(&self, label: &str) -> Option<&Rc<Signature>> {
        self.signatures.values().find(|sig| sig.id() == label)
    }

    /// Every signature once, in document order (`Int` and `seq/Int` share one entry).
    pub fn signatures(&self) -> Vec<&Rc<Signature>> {
        self.distinct_signatures().collect()
    }

    fn distinct_signatures(&self) -> impl Iterator<Item = &Rc<Signature>> {
        let mut seen: FxHashSet<*const Signature> = FxHashSet::default();
        self.signatures
            .values()
            .filter(move |sig| seen.insert(Rc::as_ptr(sig)))
    }

    /// Signatures that are nobody's subsignature, in document order.
    pub fn roots(&self) -> &[Rc<Signature>] {
        &self.roots
    }

    pub fn univ(&self) -> Option<&Rc<Signature>> {
        self.signature(UNIV)
    }

    pub fn atom(&self, id: &str) -> Option<&Atom> {
        self.roots.iter().find_map(|sig| sig.atom(id))
    }

    /// Every atom reachable from the forest roots, without repeats.
    pub fn atoms(&self) -> Vec<&Atom> {
        let mut seen: FxHashSet<&str> = FxHashSet::default();
        self.roots
            .iter()
            .flat_map(|sig| sig.atoms(true))
            .filter(|atom| seen.insert(atom.id()))
            .collect()
    }

    pub fn field(&self, label: &str) -> Option<&Rc<Field>> {
        self.fields.values().find(|field| field.id() == label)
    }

    pub fn fields(&self) -> impl Iterator<Item = &Rc<Field>> {
        self.fields.values()
    }

    pub fn skolem(&self, label: &str) -> Option<&Rc<Skolem>> {
        self.skolems.values().find(|skolem| skolem.id() == label)
    }

    pub fn skolems(&self) -> impl Iterator<Item = &Rc<Skolem>> {
        self.skolems.values()
    }
}

fn forest_roots(signatures: &SignatureMap) -> Vec<Rc<Signature>> {
    let children: FxHashSet<*const Signature> = signatures
        .values()
        .flat_map(|sig| sig.sub_signatures(false))
        .map(|sig| Rc::as_ptr(&sig))
        .collect();
    let mut seen: FxHashSet<*const Signature> = FxHashSet::default();
    signatures
        .values()
        .filter(|sig| !children.contains(&Rc::as_ptr(sig)) && seen.insert(Rc::as_ptr(sig)))
        .cloned()
        .collect()
}
