use std::collections::HashSet;

use cypher_studio::query_compiler::AliasTable;
use cypher_studio::{compile_query, QueryBuilderState, QueryNode, QueryRelationship};

fn crowd(size: usize, alias: &str) -> Vec<QueryNode> {
    (0..size)
        .map(|i| QueryNode::new(format!("node-{}", i), Some("Person"), alias))
        .collect()
}

#[test]
fn test_every_bound_alias_is_unique() {
    let nodes = crowd(26, "a");
    let rels: Vec<QueryRelationship> = nodes
        .windows(2)
        .enumerate()
        .map(|(i, pair)| QueryRelationship::new(format!("rel-{}", i), &pair[0].id, &pair[1].id, None))
        .collect();
    let active: Vec<(usize, &QueryRelationship)> = rels.iter().enumerate().collect();

    let table = AliasTable::resolve(&nodes, &active, 26);

    let mut seen = HashSet::new();
    for node in &nodes {
        let alias = table.node_alias(&node.id).unwrap();
        assert!(seen.insert(alias.to_string()), "duplicate alias {}", alias);
    }
    for rel in &rels {
        let alias = table.relationship_alias(&rel.id).unwrap();
        assert!(seen.insert(alias.to_string()), "duplicate alias {}", alias);
    }
    assert_eq!(seen.len(), 26 + 25);
    assert!(seen.contains("z"));
}

#[test]
fn test_relationship_endpoints_win_over_earlier_nodes() {
    // "lonely" comes first in node order but is bound after the endpoints
    let nodes = vec![
        QueryNode::new("lonely", Some("Tag"), "a"),
        QueryNode::new("x", Some("Person"), "a"),
        QueryNode::new("y", Some("Person"), "b"),
    ];
    let rel = QueryRelationship::new("k", "x", "y", Some("KNOWS"));

    let table = AliasTable::resolve(&nodes, &[(0, &rel)], 26);

    assert_eq!(table.node_alias("x"), Some("a"));
    assert_eq!(table.node_alias("y"), Some("b"));
    assert_eq!(table.node_alias("lonely"), Some("c"));
}

fn pair_with_alias(alias: &str) -> QueryBuilderState {
    QueryBuilderState {
        nodes: vec![
            QueryNode::new("x", Some("Person"), "p"),
            QueryNode::new("y", Some("Person"), "q"),
        ],
        relationships: vec![QueryRelationship::new("k", "x", "y", Some("KNOWS")).with_alias(alias)],
        ..Default::default()
    }
}

#[test]
fn test_user_relationship_alias_is_honoured() {
    let state = pair_with_alias("knows");

    assert_eq!(
        compile_query(&state),
        "MATCH (p:Person)-[knows:KNOWS]->(q:Person) RETURN p, q"
    );
}

#[test]
fn test_relationship_alias_colliding_with_node_falls_back_to_rn() {
    let state = pair_with_alias("p");

    assert_eq!(
        compile_query(&state),
        "MATCH (p:Person)-[r1:KNOWS]->(q:Person) RETURN p, q"
    );
}
