//! Entity projection: one EAC-CPF entity description into graph triples.

use crate::graph::{Graph, Term};
use crate::places::PlaceRegistry;
use crate::record::{EntityDescription, EntityKind, UNTYPED_PART};
use crate::relations::{group_by_type, project_relations, specialize_associative, Lifecycle};
use crate::vocab::{dc, foaf, org, owl, prov, rdf, rdfs, Namespace};

/// Suffix of an organization's creation event identifier.
pub const CREATION_SUFFIX: &str = "-i";
/// Suffix of an organization's termination event identifier.
pub const TERMINATION_SUFFIX: &str = "-x";

const FAMILY_NAME_PART: &str = "familyname";
const GIVEN_NAME_PART: &str = "givenname";

/// Conversion context: the graph under construction plus the run-scoped
/// place cache. Not shared across threads.
#[derive(Debug)]
pub struct Projector {
    local: Namespace,
    graph: Graph,
    places: PlaceRegistry,
}

impl Projector {
    #[must_use]
    pub fn new(local: Namespace) -> Self {
        Self {
            graph: Graph::with_prefixes(&local),
            places: PlaceRegistry::new(),
            local,
        }
    }

    #[must_use]
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    #[must_use]
    pub fn places(&self) -> &PlaceRegistry {
        &self.places
    }

    #[must_use]
    pub fn namespace(&self) -> &Namespace {
        &self.local
    }

    #[must_use]
    pub fn into_graph(self) -> Graph {
        self.graph
    }

    /// Creation and termination event terms for an organization.
    #[must_use]
    pub fn lifecycle(&self, id: &str) -> Lifecycle {
        Lifecycle {
            creation: self.local.term(&format!("{id}{CREATION_SUFFIX}")),
            termination: self.local.term(&format!("{id}{TERMINATION_SUFFIX}")),
        }
    }

    /// Project one entity. Takes ownership because associative relations are
    /// specialized in place before grouping.
    pub fn project(&mut self, mut entity: EntityDescription) {
        let subject = self.local.term(entity.id.as_str());
        tracing::debug!("Projecting {} {}", entity.kind, entity.id);

        self.graph.add(
            subject.clone(),
            owl::same_as(),
            Term::iri(entity.source_uri.as_str()),
        );

        match entity.kind {
            EntityKind::Person => self.project_person(&entity, &subject),
            EntityKind::CorporateBody => self.project_corporate_body(&mut entity, &subject),
            EntityKind::Other(ref kind) => {
                tracing::debug!("No projection for {kind} entity {}", entity.id);
            }
        }
    }

    /// Persons are terminal nodes: their relations are not projected.
    fn project_person(&mut self, entity: &EntityDescription, subject: &Term) {
        self.graph.add(subject.clone(), rdf::type_(), foaf::person());

        if let Some(family) = entity.name_part(FAMILY_NAME_PART) {
            self.graph
                .add(subject.clone(), foaf::family_name(), Term::string(family));
        }
        if let Some(given) = entity.name_part(GIVEN_NAME_PART) {
            self.graph
                .add(subject.clone(), foaf::given_name(), Term::string(given));
        }
    }

    fn project_corporate_body(&mut self, entity: &mut EntityDescription, subject: &Term) {
        self.graph
            .add(subject.clone(), rdf::type_(), org::organization());

        let name = entity.name_part(UNTYPED_PART);
        if let Some(name) = name {
            self.graph.add(subject.clone(), foaf::name(), Term::string(name));
        }
        if let Some(biography) = &entity.biography {
            self.graph
                .add(subject.clone(), dc::description(), Term::string(biography.as_str()));
        }
        for term in &entity.subjects {
            self.graph
                .add(subject.clone(), dc::subject(), Term::string(term.as_str()));
        }
        if let Some(place) = &entity.place {
            let site = self
                .places
                .resolve_place(&mut self.graph, &self.local, &place.slug, &place.address);
            self.graph.add(subject.clone(), org::has_primary_site(), site);
        }

        let label = name.unwrap_or(entity.id.as_str()).to_string();
        let lifecycle = self.lifecycle(entity.id.as_str());
        self.project_lifecycle(entity, subject, &lifecycle, &label);

        specialize_associative(&mut entity.relations);
        let groups = group_by_type(&entity.relations, &self.local);
        project_relations(&mut self.graph, &self.local, &groups, subject, &lifecycle);
    }

    fn project_lifecycle(
        &mut self,
        entity: &EntityDescription,
        subject: &Term,
        lifecycle: &Lifecycle,
        label: &str,
    ) {
        let Lifecycle {
            creation,
            termination,
        } = lifecycle;

        self.graph.add(creation.clone(), rdf::type_(), org::change_event());
        self.graph
            .add(creation.clone(), org::resulting_organization(), subject.clone());
        self.graph.add(
            creation.clone(),
            rdfs::label(),
            Term::string(format!("{label} - initiated")),
        );
        self.graph
            .add(subject.clone(), org::resulted_from(), creation.clone());

        self.graph
            .add(termination.clone(), rdf::type_(), org::change_event());
        self.graph
            .add(termination.clone(), org::original_organization(), subject.clone());
        self.graph.add(
            termination.clone(),
            rdfs::label(),
            Term::string(format!("{label} - terminated")),
        );
        self.graph
            .add(subject.clone(), org::changed_by(), termination.clone());

        let Some(dates) = &entity.dates else {
            return;
        };
        if let Some(from) = &dates.from {
            self.graph
                .add(creation.clone(), prov::ended_at_time(), Term::date(from));
            self.graph
                .add(subject.clone(), prov::generated_at_time(), Term::date(from));
        }
        if let Some(to) = &dates.to {
            self.graph
                .add(termination.clone(), prov::ended_at_time(), Term::date(to));
            self.graph
                .add(subject.clone(), prov::invalidated_at_time(), Term::date(to));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::parse_record;
    use crate::vocab::{locn, ORG, PROV};

    fn projector() -> Projector {
        Projector::new(Namespace::new("csiro", "http://aays.csiro.au/data/csiro/"))
    }

    fn organization(id: &str, name: &str, extra_description: &str, relations: &str) -> String {
        format!(
            r#"<eac-cpf xmlns:xlink="http://www.w3.org/1999/xlink"><cpfDescription>
              <identity>
                <entityId>http://www.eoas.info/biogs/{id}b.htm</entityId>
                <entityType>corporateBody</entityType>
                <nameEntry><part>{name}</part></nameEntry>
              </identity>
              <description>{extra_description}</description>
              <relations>{relations}</relations>
            </cpfDescription></eac-cpf>"#
        )
    }

    fn relation(kind: &str, target_kind: &str, id: &str) -> String {
        format!(
            r#"<cpfRelation cpfRelationType="{kind}" xlink:href="http://www.eoas.info/biogs/{id}b.htm"><relationEntry localType="{target_kind}">x</relationEntry></cpfRelation>"#
        )
    }

    fn project_all(projector: &mut Projector, xml: &str) {
        for entity in parse_record(xml).unwrap() {
            projector.project(entity);
        }
    }

    fn predicates_in(graph: &Graph, namespace: &str) -> usize {
        graph
            .iter()
            .filter(|t| t.predicate.as_iri().is_some_and(|p| p.starts_with(namespace)))
            .count()
    }

    #[test]
    fn test_minimal_organization_end_to_end() {
        let mut projector = projector();
        let xml = organization(
            "A000196",
            "Test Org",
            "",
            &relation("hierarchical-child", "Corporate Body", "A000197"),
        );
        project_all(&mut projector, &xml);

        let local = projector.namespace().clone();
        let graph = projector.graph();
        let org_term = local.term("A000196");
        let creation = local.term("A000196-i");
        let termination = local.term("A000196-x");

        assert!(graph.contains(&org_term, &rdf::type_(), &org::organization()));
        assert!(graph.contains(&org_term, &foaf::name(), &Term::string("Test Org")));
        assert!(graph.contains(&creation, &rdf::type_(), &org::change_event()));
        assert!(graph.contains(&termination, &rdf::type_(), &org::change_event()));
        assert!(graph.contains(
            &creation,
            &rdfs::label(),
            &Term::string("Test Org - initiated")
        ));
        assert!(graph.contains(
            &termination,
            &rdfs::label(),
            &Term::string("Test Org - terminated")
        ));
        assert!(graph.contains(&org_term, &org::has_unit(), &local.term("A000197")));

        assert_eq!(predicates_in(graph, PROV), 0);
        assert!(graph.matching(None, Some(&org::has_primary_site()), None).next().is_none());
        assert!(graph.matching(None, Some(&locn::full_address()), None).next().is_none());
        for predicate in [
            org::unit_of(),
            org::linked_to(),
            org::has_member(),
            org::site_address(),
        ] {
            assert!(graph.matching(None, Some(&predicate), None).next().is_none());
        }
        // sameAs to the source page only, no identity relation.
        let same_as: Vec<_> = graph.matching(None, Some(&owl::same_as()), None).collect();
        assert_eq!(same_as.len(), 1);
        assert_eq!(
            same_as[0].object,
            Term::iri("http://www.eoas.info/biogs/A000196b")
        );
        // Only the event links besides hasUnit live in the ORG namespace.
        assert_eq!(predicates_in(graph, ORG), 5);
    }

    #[test]
    fn test_lifecycle_events_without_dates() {
        let mut projector = projector();
        project_all(&mut projector, &organization("A000001", "One", "", ""));

        let events: Vec<_> = projector
            .graph()
            .matching(None, Some(&rdf::type_()), Some(&org::change_event()))
            .map(|t| t.subject.local_name().unwrap().to_string())
            .collect();
        assert_eq!(events, vec!["A000001-i", "A000001-x"]);
    }

    #[test]
    fn test_date_range_timestamps() {
        let mut projector = projector();
        let dates = r#"<existDates><dateRange><fromDate standardDate="1926-06-01"/><toDate standardDate="1949"/></dateRange></existDates>"#;
        project_all(&mut projector, &organization("A000001", "CSIR", dates, ""));

        let local = projector.namespace().clone();
        let graph = projector.graph();
        let subject = local.term("A000001");

        assert!(graph.contains(
            &local.term("A000001-i"),
            &prov::ended_at_time(),
            &Term::date("1926-06-01")
        ));
        assert!(graph.contains(&subject, &prov::generated_at_time(), &Term::date("1926-06-01")));
        assert!(graph.contains(
            &local.term("A000001-x"),
            &prov::ended_at_time(),
            &Term::date("1949")
        ));
        assert!(graph.contains(&subject, &prov::invalidated_at_time(), &Term::date("1949")));
    }

    #[test]
    fn test_shared_place_emitted_once() {
        let mut projector = projector();
        let place = |label: &str| {
            format!(
                "<places><place><placeRole>Start Place</placeRole><placeEntry>{label}</placeEntry></place></places>"
            )
        };
        project_all(
            &mut projector,
            &organization("A000001", "One", &place("Springvale, Victoria"), ""),
        );
        project_all(
            &mut projector,
            &organization("A000002", "Two", &place("Springvale, VIC"), ""),
        );

        let local = projector.namespace().clone();
        let graph = projector.graph();
        let site = local.term("Springvale");

        assert_eq!(projector.places().len(), 1);
        assert_eq!(graph.matching(Some(&site), Some(&rdf::type_()), None).count(), 1);
        assert_eq!(graph.matching(None, Some(&locn::full_address()), None).count(), 1);
        assert!(graph.contains(&local.term("A000001"), &org::has_primary_site(), &site));
        assert!(graph.contains(&local.term("A000002"), &org::has_primary_site(), &site));
    }

    #[test]
    fn test_temporal_relations() {
        let mut projector = projector();
        let relations = format!(
            "{}{}",
            relation("temporal-earlier", "Corporate Body", "A000100"),
            relation("temporal-later", "Corporate Body", "A000300")
        );
        project_all(&mut projector, &organization("A000200", "Middle", "", &relations));

        let local = projector.namespace().clone();
        let graph = projector.graph();
        let subject = local.term("A000200");
        let successor = local.term("A000200-A000300");

        assert!(graph.contains(
            &local.term("A000200-i"),
            &org::original_organization(),
            &local.term("A000100")
        ));
        assert!(graph.contains(&subject, &org::changed_by(), &successor));
        assert!(graph.contains(
            &successor,
            &org::resulting_organization(),
            &local.term("A000300")
        ));
    }

    #[test]
    fn test_associative_person_becomes_member() {
        let mut projector = projector();
        let relations = format!(
            "{}{}",
            relation("associative", "Person", "P000001"),
            relation("associative", "Corporate Body", "A000002")
        );
        project_all(&mut projector, &organization("A000001", "Org", "", &relations));

        let local = projector.namespace().clone();
        let graph = projector.graph();
        let subject = local.term("A000001");

        assert!(graph.contains(
            &subject,
            &org::has_member(),
            &Term::iri("http://www.eoas.info/biogs/P000001b")
        ));
        assert!(graph.contains(&subject, &org::linked_to(), &local.term("A000002")));
    }

    #[test]
    fn test_person_relations_not_projected() {
        let mut projector = projector();
        let xml = format!(
            r#"<eac-cpf xmlns:xlink="http://www.w3.org/1999/xlink"><cpfDescription>
              <identity>
                <entityId>http://www.eoas.info/biogs/P000001b.htm</entityId>
                <entityType>person</entityType>
                <nameEntry><part localType="familyname">Smith</part><part localType="givenname">Ada</part></nameEntry>
              </identity>
              <relations>{}</relations>
            </cpfDescription></eac-cpf>"#,
            relation("hierarchical-child", "Corporate Body", "A000197")
        );
        project_all(&mut projector, &xml);

        let local = projector.namespace().clone();
        let graph = projector.graph();
        let subject = local.term("P000001");

        assert!(graph.contains(&subject, &rdf::type_(), &foaf::person()));
        assert!(graph.contains(&subject, &foaf::family_name(), &Term::string("Smith")));
        assert!(graph.contains(&subject, &foaf::given_name(), &Term::string("Ada")));
        assert!(graph.matching(None, Some(&org::has_unit()), None).next().is_none());
        assert!(graph.matching(None, Some(&org::changed_by()), None).next().is_none());
    }

    #[test]
    fn test_unnamed_organization_labels_fall_back_to_id() {
        let mut projector = projector();
        let xml = r#"<eac-cpf><cpfDescription><identity>
            <entityId>A000009</entityId><entityType>corporateBody</entityType>
          </identity></cpfDescription></eac-cpf>"#;
        project_all(&mut projector, xml);

        let local = projector.namespace().clone();
        let graph = projector.graph();
        assert!(graph.matching(None, Some(&foaf::name()), None).next().is_none());
        assert!(graph.contains(
            &local.term("A000009-i"),
            &rdfs::label(),
            &Term::string("A000009 - initiated")
        ));
    }

    #[test]
    fn test_other_entity_kind_only_same_as() {
        let mut projector = projector();
        let xml = r#"<eac-cpf><cpfDescription><identity>
            <entityId>http://www.eoas.info/biogs/F000001b.htm</entityId><entityType>family</entityType>
          </identity></cpfDescription></eac-cpf>"#;
        project_all(&mut projector, xml);

        assert_eq!(projector.graph().len(), 1);
    }
}
