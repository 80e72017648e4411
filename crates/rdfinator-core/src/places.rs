use std::collections::HashSet;

use crate::graph::{Graph, Term};
use crate::vocab::{locn, org, rdf, Namespace};

/// Run-scoped place cache: each slug is described in the graph once.
#[derive(Debug, Default)]
pub struct PlaceRegistry {
    seen: HashSet<String>,
}

impl PlaceRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Term for the place `slug`, emitting its site and address triples the
    /// first time the slug is seen. Later calls keep the first address.
    pub fn resolve_place(
        &mut self,
        graph: &mut Graph,
        local: &Namespace,
        slug: &str,
        address: &str,
    ) -> Term {
        let place = local.term(slug);
        if !self.seen.insert(slug.to_string()) {
            return place;
        }

        tracing::debug!("New place {slug}: {address}");
        let site_address = graph.new_blank_node();
        graph.add(place.clone(), rdf::type_(), org::site());
        graph.add(place.clone(), org::site_address(), site_address.clone());
        graph.add(site_address.clone(), locn::full_address(), Term::string(address));
        graph.add(site_address, rdf::type_(), locn::address());

        place
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
