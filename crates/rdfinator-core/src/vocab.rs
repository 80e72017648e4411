//! Vocabulary namespaces and the terms the projector emits.

use crate::graph::Term;

pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
pub const RDFS: &str = "http://www.w3.org/2000/01/rdf-schema#";
pub const OWL: &str = "http://www.w3.org/2002/07/owl#";
pub const XSD: &str = "http://www.w3.org/2001/XMLSchema#";
pub const FOAF: &str = "http://xmlns.com/foaf/0.1/";
pub const DC: &str = "http://purl.org/dc/elements/1.1/";
pub const ORG: &str = "http://www.w3.org/ns/org#";
pub const PROV: &str = "http://www.w3.org/ns/prov#";
pub const LOCN: &str = "http://www.w3.org/ns/locn#";

/// Prefix bindings for the standard vocabularies, in output order.
pub const STANDARD_PREFIXES: [(&str, &str); 9] = [
    ("rdf", RDF),
    ("rdfs", RDFS),
    ("owl", OWL),
    ("xsd", XSD),
    ("foaf", FOAF),
    ("dc", DC),
    ("org", ORG),
    ("prov", PROV),
    ("locn", LOCN),
];

/// An IRI prefix that mints terms by appending a local name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    prefix: String,
    iri: String,
}

impl Namespace {
    pub fn new(prefix: impl Into<String>, iri: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            iri: iri.into(),
        }
    }

    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    #[must_use]
    pub fn iri(&self) -> &str {
        &self.iri
    }

    #[must_use]
    pub fn term(&self, local: &str) -> Term {
        Term::iri(format!("{}{local}", self.iri))
    }
}

fn term(namespace: &str, local: &str) -> Term {
    Term::iri(format!("{namespace}{local}"))
}

pub mod rdf {
    use super::{term, Term, RDF};

    #[must_use]
    pub fn type_() -> Term {
        term(RDF, "type")
    }
}

pub mod rdfs {
    use super::{term, Term, RDFS};

    #[must_use]
    pub fn label() -> Term {
        term(RDFS, "label")
    }
}

pub mod owl {
    use super::{term, Term, OWL};

    #[must_use]
    pub fn same_as() -> Term {
        term(OWL, "sameAs")
    }
}

pub mod xsd {
    use super::XSD;

    #[must_use]
    pub fn datatype(local: &str) -> String {
        format!("{XSD}{local}")
    }
}

pub mod foaf {
    use super::{term, Term, FOAF};

    #[must_use]
    pub fn person() -> Term {
        term(FOAF, "Person")
    }

    #[must_use]
    pub fn name() -> Term {
        term(FOAF, "name")
    }

    #[must_use]
    pub fn family_name() -> Term {
        term(FOAF, "familyName")
    }

    #[must_use]
    pub fn given_name() -> Term {
        term(FOAF, "givenName")
    }
}

pub mod dc {
    use super::{term, Term, DC};

    #[must_use]
    pub fn description() -> Term {
        term(DC, "description")
    }

    #[must_use]
    pub fn subject() -> Term {
        term(DC, "subject")
    }
}

pub mod org {
    use super::{term, Term, ORG};

    #[must_use]
    pub fn organization() -> Term {
        term(ORG, "Organization")
    }

    #[must_use]
    pub fn change_event() -> Term {
        term(ORG, "ChangeEvent")
    }

    #[must_use]
    pub fn site() -> Term {
        term(ORG, "Site")
    }

    #[must_use]
    pub fn site_address() -> Term {
        term(ORG, "siteAddress")
    }

    #[must_use]
    pub fn has_primary_site() -> Term {
        term(ORG, "hasPrimarySite")
    }

    #[must_use]
    pub fn resulting_organization() -> Term {
        term(ORG, "resultingOrganization")
    }

    #[must_use]
    pub fn resulted_from() -> Term {
        term(ORG, "resultedFrom")
    }

    #[must_use]
    pub fn original_organization() -> Term {
        term(ORG, "originalOrganization")
    }

    #[must_use]
    pub fn changed_by() -> Term {
        term(ORG, "changedBy")
    }

    #[must_use]
    pub fn unit_of() -> Term {
        term(ORG, "unitOf")
    }

    #[must_use]
    pub fn has_unit() -> Term {
        term(ORG, "hasUnit")
    }

    #[must_use]
    pub fn linked_to() -> Term {
        term(ORG, "linkedTo")
    }

    #[must_use]
    pub fn has_member() -> Term {
        term(ORG, "hasMember")
    }
}

pub mod prov {
    use super::{term, Term, PROV};

    #[must_use]
    pub fn ended_at_time() -> Term {
        term(PROV, "endedAtTime")
    }

    #[must_use]
    pub fn generated_at_time() -> Term {
        term(PROV, "generatedAtTime")
    }

    #[must_use]
    pub fn invalidated_at_time() -> Term {
        term(PROV, "invalidatedAtTime")
    }
}

pub mod locn {
    use super::{term, Term, LOCN};

    #[must_use]
    pub fn address() -> Term {
        term(LOCN, "Address")
    }

    #[must_use]
    pub fn full_address() -> Term {
        term(LOCN, "fullAddress")
    }
}
