use std::collections::HashSet;
use std::fmt::Write;

use chrono::NaiveDate;

use crate::vocab::{self, Namespace};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Term {
    Iri(String),
    Blank(String),
    Literal { value: String, datatype: String },
}

impl Term {
    /// IRI term. Characters an IRI reference may not contain, such as spaces
    /// and angle brackets, are percent-encoded.
    pub fn iri(iri: impl Into<String>) -> Self {
        Self::Iri(encode_iri(iri.into()))
    }

    /// `xsd:string` literal.
    pub fn string(value: impl Into<String>) -> Self {
        Self::Literal {
            value: value.into(),
            datatype: vocab::xsd::datatype("string"),
        }
    }

    /// Date literal typed by precision: `xsd:date` for `YYYY-MM-DD`,
    /// `xsd:gYearMonth` for `YYYY-MM`, `xsd:gYear` for `YYYY`. Anything
    /// else stays an `xsd:string`.
    #[must_use]
    pub fn date(value: &str) -> Self {
        let value = value.trim();
        let datatype = if value.len() == 10 && NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok() {
            "date"
        } else if NaiveDate::parse_from_str(&format!("{value}-01"), "%Y-%m-%d").is_ok()
            && value.len() == 7
        {
            "gYearMonth"
        } else if value.len() == 4 && value.bytes().all(|b| b.is_ascii_digit()) {
            "gYear"
        } else {
            "string"
        };

        Self::Literal {
            value: value.to_string(),
            datatype: vocab::xsd::datatype(datatype),
        }
    }

    #[must_use]
    pub fn as_iri(&self) -> Option<&str> {
        match self {
            Self::Iri(iri) => Some(iri),
            _ => None,
        }
    }

    /// Last path segment of an IRI: the part after the final `/` (or `#`).
    #[must_use]
    pub fn local_name(&self) -> Option<&str> {
        self.as_iri()
            .map(|iri| iri.rsplit(['/', '#']).next().unwrap_or(iri))
    }
}

fn is_forbidden_in_iri(c: char) -> bool {
    c <= ' ' || c == '\u{7f}' || matches!(c, '<' | '>' | '"' | '{' | '}' | '|' | '^' | '`' | '\\')
}

fn encode_iri(iri: String) -> String {
    if !iri.chars().any(is_forbidden_in_iri) {
        return iri;
    }
    let mut encoded = String::with_capacity(iri.len() + 8);
    for c in iri.chars() {
        if is_forbidden_in_iri(c) {
            let _ = write!(encoded, "%{:02X}", u32::from(c));
        } else {
            encoded.push(c);
        }
    }
    encoded
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Triple {
    pub subject: Term,
    pub predicate: Term,
    pub object: Term,
}

/// Append-only triple set with prefix bindings.
///
/// Insertion order is kept for readable output; re-adding an existing triple
/// is a no-op.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    prefixes: Vec<(String, String)>,
    triples: Vec<Triple>,
    seen: HashSet<Triple>,
    next_blank: usize,
}

impl Graph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Graph with the standard vocabulary prefixes and `local` bound.
    #[must_use]
    pub fn with_prefixes(local: &Namespace) -> Self {
        let mut graph = Self::new();
        for (prefix, iri) in vocab::STANDARD_PREFIXES {
            graph.bind(prefix, iri);
        }
        graph.bind(local.prefix(), local.iri());
        graph
    }

    /// Bind `prefix` to `iri`, replacing any earlier binding of the prefix.
    pub fn bind(&mut self, prefix: &str, iri: &str) {
        if let Some(existing) = self.prefixes.iter_mut().find(|(p, _)| p == prefix) {
            existing.1 = iri.to_string();
        } else {
            self.prefixes.push((prefix.to_string(), iri.to_string()));
        }
    }

    #[must_use]
    pub fn prefixes(&self) -> &[(String, String)] {
        &self.prefixes
    }

    /// Returns `true` when the triple was not already present.
    pub fn add(&mut self, subject: Term, predicate: Term, object: Term) -> bool {
        let triple = Triple {
            subject,
            predicate,
            object,
        };
        if self.seen.contains(&triple) {
            return false;
        }
        self.seen.insert(triple.clone());
        self.triples.push(triple);
        true
    }

    pub fn new_blank_node(&mut self) -> Term {
        let label = format!("b{}", self.next_blank);
        self.next_blank += 1;
        Term::Blank(label)
    }

    #[must_use]
    pub fn contains(&self, subject: &Term, predicate: &Term, object: &Term) -> bool {
        self.triples
            .iter()
            .any(|t| &t.subject == subject && &t.predicate == predicate && &t.object == object)
    }

    /// Triples matching the given pattern; `None` matches anything.
    pub fn matching(
        &self,
        subject: Option<&Term>,
        predicate: Option<&Term>,
        object: Option<&Term>,
    ) -> impl Iterator<Item = &Triple> {
        let (subject, predicate, object) = (subject.cloned(), predicate.cloned(), object.cloned());
        self.triples.iter().filter(move |t| {
            subject.as_ref().map_or(true, |s| &t.subject == s)
                && predicate.as_ref().map_or(true, |p| &t.predicate == p)
                && object.as_ref().map_or(true, |o| &t.object == o)
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.triples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }
}
