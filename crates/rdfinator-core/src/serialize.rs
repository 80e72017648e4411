use std::collections::HashMap;
use std::str::FromStr;

use oxrdf::{BlankNode, Literal, NamedNode, Subject};
use oxttl::{NTriplesSerializer, TurtleSerializer};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::graph::{Graph, Term, Triple};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GraphFormat {
    #[default]
    Turtle,
    #[serde(rename = "ntriples")]
    NTriples,
}

impl GraphFormat {
    #[must_use]
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Turtle => "ttl",
            Self::NTriples => "nt",
        }
    }
}

impl FromStr for GraphFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "turtle" | "ttl" => Ok(Self::Turtle),
            "ntriples" | "n-triples" | "nt" => Ok(Self::NTriples),
            other => Err(format!("unknown graph format: {other}")),
        }
    }
}

pub fn serialize(graph: &Graph, format: GraphFormat) -> Result<String> {
    match format {
        GraphFormat::Turtle => to_turtle(graph),
        GraphFormat::NTriples => to_ntriples(graph),
    }
}

/// Turtle using the graph's prefix bindings, statements grouped by subject in
/// order of first appearance.
pub fn to_turtle(graph: &Graph) -> Result<String> {
    let mut serializer = TurtleSerializer::new();
    for (prefix, iri) in graph.prefixes() {
        serializer = serializer
            .with_prefix(prefix.as_str(), iri.as_str())
            .map_err(|source| Error::InvalidIri {
                iri: iri.clone(),
                source,
            })?;
    }

    let mut writer = serializer.for_writer(Vec::new());
    for triple in grouped_by_subject(graph) {
        writer.serialize_triple(&to_oxrdf(triple)?)?;
    }
    Ok(String::from_utf8_lossy(&writer.finish()?).into_owned())
}

pub fn to_ntriples(graph: &Graph) -> Result<String> {
    let mut writer = NTriplesSerializer::new().for_writer(Vec::new());
    for triple in graph.iter() {
        writer.serialize_triple(&to_oxrdf(triple)?)?;
    }
    Ok(String::from_utf8_lossy(&writer.finish()).into_owned())
}

fn grouped_by_subject(graph: &Graph) -> Vec<&Triple> {
    let mut blocks: Vec<Vec<&Triple>> = Vec::new();
    let mut index: HashMap<&Term, usize> = HashMap::new();
    for triple in graph.iter() {
        let slot = *index.entry(&triple.subject).or_insert_with(|| {
            blocks.push(Vec::new());
            blocks.len() - 1
        });
        blocks[slot].push(triple);
    }
    blocks.into_iter().flatten().collect()
}

fn named_node(iri: &str) -> Result<NamedNode> {
    NamedNode::new(iri).map_err(|source| Error::InvalidIri {
        iri: iri.to_string(),
        source,
    })
}

fn misplaced(position: &'static str, term: &Term) -> Error {
    Error::MisplacedTerm {
        position,
        term: format!("{term:?}"),
    }
}

fn to_oxrdf(triple: &Triple) -> Result<oxrdf::Triple> {
    let subject: Subject = match &triple.subject {
        Term::Iri(iri) => named_node(iri)?.into(),
        Term::Blank(label) => BlankNode::new_unchecked(label.as_str()).into(),
        literal @ Term::Literal { .. } => return Err(misplaced("subject", literal)),
    };
    let predicate = match &triple.predicate {
        Term::Iri(iri) => named_node(iri)?,
        other => return Err(misplaced("predicate", other)),
    };
    let object: oxrdf::Term = match &triple.object {
        Term::Iri(iri) => named_node(iri)?.into(),
        Term::Blank(label) => BlankNode::new_unchecked(label.as_str()).into(),
        Term::Literal { value, datatype } => {
            Literal::new_typed_literal(value.as_str(), named_node(datatype)?).into()
        }
    };
    Ok(oxrdf::Triple::new(subject, predicate, object))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::Converter;
    use crate::vocab::{foaf, org, rdf, Namespace, RDF};
    use oxttl::{NTriplesParser, TurtleParser};
    use pretty_assertions::assert_eq;

    fn csiro() -> Namespace {
        Namespace::new("csiro", "http://aays.csiro.au/data/csiro/")
    }

    fn sample() -> Graph {
        let local = csiro();
        let mut graph = Graph::new();
        graph.bind("rdf", RDF);
        graph.bind("org", crate::vocab::ORG);
        graph.bind("foaf", crate::vocab::FOAF);
        graph.bind("xsd", crate::vocab::XSD);
        graph.bind(local.prefix(), local.iri());

        let subject = local.term("A000196");
        graph.add(subject.clone(), rdf::type_(), org::organization());
        graph.add(
            Term::iri("http://www.eoas.info/biogs/A000197b"),
            rdf::type_(),
            org::organization(),
        );
        graph.add(subject.clone(), foaf::name(), Term::string("Say \"hi\"\n"));
        graph.add(
            subject,
            org::has_unit(),
            Term::iri("http://www.eoas.info/biogs/A000197b"),
        );
        graph
    }

    fn parse_turtle(text: &str) -> Vec<oxrdf::Triple> {
        TurtleParser::new()
            .for_reader(text.as_bytes())
            .collect::<std::result::Result<_, _>>()
            .unwrap()
    }

    fn parse_ntriples(text: &str) -> Vec<oxrdf::Triple> {
        NTriplesParser::new()
            .for_reader(text.as_bytes())
            .collect::<std::result::Result<_, _>>()
            .unwrap()
    }

    #[test]
    fn test_turtle_output() {
        let turtle = to_turtle(&sample()).unwrap();

        assert!(turtle.contains("csiro: <http://aays.csiro.au/data/csiro/>"));
        assert!(turtle.contains("csiro:A000196 a org:Organization"));
        assert!(turtle.contains("org:hasUnit <http://www.eoas.info/biogs/A000197b>"));

        let parsed = parse_turtle(&turtle);
        assert_eq!(parsed.len(), 4);
        assert!(parsed.iter().any(|t| matches!(
            &t.object,
            oxrdf::Term::Literal(literal) if literal.value() == "Say \"hi\"\n"
        )));
    }

    #[test]
    fn test_turtle_groups_statements_by_subject() {
        let turtle = to_turtle(&sample()).unwrap();
        let first = turtle.find("csiro:A000196").unwrap();
        let unit = turtle.find("org:hasUnit").unwrap();
        let other = turtle.find("<http://www.eoas.info/biogs/A000197b> a").unwrap();
        assert!(first < unit && unit < other);
    }

    #[test]
    fn test_ntriples_output() {
        let output = to_ntriples(&sample()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(
            lines[0],
            "<http://aays.csiro.au/data/csiro/A000196> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://www.w3.org/ns/org#Organization> ."
        );
        assert_eq!(parse_ntriples(&output).len(), 4);
    }

    #[test]
    fn test_unusual_href_characters_stay_parseable() {
        let mut converter = Converter::new(csiro());
        converter
            .add_document(
                r#"<eac-cpf xmlns:xlink="http://www.w3.org/1999/xlink"><cpfDescription>
                  <identity><entityId>http://www.eoas.info/biogs/A000196b.htm</entityId><entityType>corporateBody</entityType></identity>
                  <relations>
                    <cpfRelation cpfRelationType="associative" xlink:href="http://www.example.org/Jane Doe&gt;x.htm">
                      <relationEntry localType="Person">Jane Doe</relationEntry>
                    </cpfRelation>
                  </relations>
                </cpfDescription></eac-cpf>"#,
            )
            .unwrap();
        let (graph, _) = converter.finish();

        let turtle = to_turtle(&graph).unwrap();
        let ntriples = to_ntriples(&graph).unwrap();
        let member = "<http://www.example.org/Jane%20Doe%3Ex>";
        assert!(turtle.contains(member));
        assert!(ntriples.contains(&format!("<http://www.w3.org/ns/org#hasMember> {member} .")));
        assert_eq!(parse_turtle(&turtle).len(), graph.len());
        assert_eq!(parse_ntriples(&ntriples).len(), graph.len());
    }

    #[test]
    fn test_relative_iri_is_rejected() {
        let mut graph = Graph::new();
        graph.add(Term::iri("A000196"), rdf::type_(), org::organization());
        assert!(matches!(to_ntriples(&graph), Err(Error::InvalidIri { ref iri, .. }) if iri == "A000196"));
    }

    #[test]
    fn test_literal_subject_is_rejected() {
        let mut graph = Graph::new();
        graph.add(Term::string("x"), rdf::type_(), org::organization());
        assert!(matches!(
            to_turtle(&graph),
            Err(Error::MisplacedTerm { position: "subject", .. })
        ));
    }

    #[test]
    fn test_blank_nodes() {
        let mut graph = Graph::new();
        let blank = graph.new_blank_node();
        graph.add(Term::iri("http://example.org/p"), Term::iri("http://example.org/q"), blank);
        assert_eq!(
            to_ntriples(&graph).unwrap(),
            "<http://example.org/p> <http://example.org/q> _:b0 .\n"
        );
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("turtle".parse::<GraphFormat>(), Ok(GraphFormat::Turtle));
        assert_eq!("NT".parse::<GraphFormat>(), Ok(GraphFormat::NTriples));
        assert!("rdfxml".parse::<GraphFormat>().is_err());
    }
}
