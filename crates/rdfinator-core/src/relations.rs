use serde::{Deserialize, Serialize};

use crate::graph::{Graph, Term};
use crate::identifier::{CORPORATE_BODY, PERSON};
use crate::record::RelationDeclaration;
use crate::vocab::{org, owl, rdf, Namespace};

/// `cpfRelationType` values, plus the two associative subtypes derived from
/// the target's declared kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RelationType {
    HierarchicalParent,
    HierarchicalChild,
    TemporalEarlier,
    TemporalLater,
    Identity,
    Associative,
    AssociativeCorporate,
    AssociativePerson,
    Unrecognized(String),
}

impl RelationType {
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "hierarchical-parent" => Self::HierarchicalParent,
            "hierarchical-child" => Self::HierarchicalChild,
            "temporal-earlier" => Self::TemporalEarlier,
            "temporal-later" => Self::TemporalLater,
            "identity" => Self::Identity,
            "associative" => Self::Associative,
            "associative-corporate" => Self::AssociativeCorporate,
            "associative-person" => Self::AssociativePerson,
            other => Self::Unrecognized(other.to_string()),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::HierarchicalParent => "hierarchical-parent",
            Self::HierarchicalChild => "hierarchical-child",
            Self::TemporalEarlier => "temporal-earlier",
            Self::TemporalLater => "temporal-later",
            Self::Identity => "identity",
            Self::Associative => "associative",
            Self::AssociativeCorporate => "associative-corporate",
            Self::AssociativePerson => "associative-person",
            Self::Unrecognized(raw) => raw,
        }
    }
}

impl std::fmt::Display for RelationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rewrite plain `associative` declarations by the target's declared kind.
///
/// Already-specialized declarations are left alone, so a second pass changes
/// nothing. Must run before [`group_by_type`].
pub fn specialize_associative(declarations: &mut [RelationDeclaration]) {
    for declaration in declarations
        .iter_mut()
        .filter(|d| d.relation_type == RelationType::Associative)
    {
        match declaration.target_kind.as_deref() {
            Some(CORPORATE_BODY) => declaration.relation_type = RelationType::AssociativeCorporate,
            Some(PERSON) => declaration.relation_type = RelationType::AssociativePerson,
            _ => {}
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationGroup {
    pub relation_type: RelationType,
    pub targets: Vec<Term>,
}

/// Resolve each declaration's target and group by relation type.
///
/// Groups appear in order of first declaration; targets keep declaration
/// order. Corporate targets with a record identifier become local terms,
/// everything else an external reference.
#[must_use]
pub fn group_by_type(declarations: &[RelationDeclaration], local: &Namespace) -> Vec<RelationGroup> {
    let mut groups: Vec<RelationGroup> = Vec::new();

    for declaration in declarations {
        let target = if let Some(id) = &declaration.local_target {
            local.term(id.as_str())
        } else if let Some(reference) = declaration.external_reference() {
            Term::iri(reference)
        } else {
            tracing::warn!(
                "Skipping {} relation without a target",
                declaration.relation_type
            );
            continue;
        };

        match groups
            .iter_mut()
            .find(|g| g.relation_type == declaration.relation_type)
        {
            Some(group) => group.targets.push(target),
            None => groups.push(RelationGroup {
                relation_type: declaration.relation_type.clone(),
                targets: vec![target],
            }),
        }
    }

    groups
}

/// The synthetic change events bracketing an organization's existence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lifecycle {
    pub creation: Term,
    pub termination: Term,
}

/// Emit the triples for each grouped relation. Unrecognized and
/// unspecialized associative relations produce nothing.
pub fn project_relations(
    graph: &mut Graph,
    local: &Namespace,
    groups: &[RelationGroup],
    subject: &Term,
    lifecycle: &Lifecycle,
) {
    for group in groups {
        for target in &group.targets {
            project_relation(graph, local, &group.relation_type, subject, target, lifecycle);
        }
    }
}

fn project_relation(
    graph: &mut Graph,
    local: &Namespace,
    relation_type: &RelationType,
    subject: &Term,
    target: &Term,
    lifecycle: &Lifecycle,
) {
    match relation_type {
        RelationType::HierarchicalParent => {
            graph.add(subject.clone(), org::unit_of(), target.clone());
        }
        RelationType::HierarchicalChild => {
            graph.add(subject.clone(), org::has_unit(), target.clone());
        }
        RelationType::TemporalEarlier => {
            graph.add(
                lifecycle.creation.clone(),
                org::original_organization(),
                target.clone(),
            );
        }
        RelationType::AssociativeCorporate => {
            graph.add(subject.clone(), org::linked_to(), target.clone());
        }
        RelationType::AssociativePerson => {
            graph.add(subject.clone(), org::has_member(), target.clone());
        }
        RelationType::Identity => {
            graph.add(subject.clone(), owl::same_as(), target.clone());
        }
        RelationType::TemporalLater => {
            let successor = successor_event(local, subject, target);
            graph.add(successor.clone(), rdf::type_(), org::change_event());
            graph.add(successor.clone(), org::original_organization(), subject.clone());
            graph.add(successor.clone(), org::resulting_organization(), target.clone());
            graph.add(subject.clone(), org::changed_by(), successor);
        }
        RelationType::Associative | RelationType::Unrecognized(_) => {
            tracing::debug!("No mapping for {relation_type} relation to {target:?}");
        }
    }
}

/// `{subject-local-id}-{target-local-id}` in the local namespace.
#[must_use]
pub fn successor_event(local: &Namespace, subject: &Term, target: &Term) -> Term {
    let from = subject.local_name().unwrap_or_default();
    let to = target.local_name().unwrap_or_default();
    local.term(&format!("{from}-{to}"))
}
