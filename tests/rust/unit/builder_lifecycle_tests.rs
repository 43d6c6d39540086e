use cypher_studio::{
    compile_query, IdSequence, LimitMode, MatchType, QueryBuilderState, QueryCompiler,
};

/// Person -[WORKS_AT]-> Company -[LOCATED_IN]-> City, built through the editing API
fn company_graph(ids: &mut IdSequence) -> (QueryBuilderState, Vec<String>) {
    let mut state = QueryBuilderState::default();
    let person = state.add_node(ids, Some("Person"), "p");
    let company = state.add_node(ids, Some("Company"), "c");
    let city = state.add_node(ids, Some("City"), "t");
    state
        .add_relationship(ids, &person, &company, Some("WORKS_AT"))
        .unwrap();
    state
        .add_relationship(ids, &company, &city, Some("LOCATED_IN"))
        .unwrap();
    (state, vec![person, company, city])
}

#[test]
fn test_ids_are_unique_across_kinds() {
    let mut ids = IdSequence::new();
    let (mut state, nodes) = company_graph(&mut ids);
    let cond = state.add_property_condition(&mut ids, &nodes[0], "age", ">", "30");

    assert_eq!(nodes, vec!["node-1", "node-2", "node-3"]);
    assert_eq!(state.relationships[0].id, "rel-4");
    assert_eq!(state.relationships[1].id, "rel-5");
    assert_eq!(cond, "cond-6");
    assert_eq!(ids.issued(), 6);
}

#[test]
fn test_independent_sequences_do_not_share_numbering() {
    let mut first = IdSequence::new();
    let mut second = IdSequence::new();

    assert_eq!(first.next_node_id(), "node-1");
    assert_eq!(second.next_node_id(), "node-1");
    assert_eq!(IdSequence::starting_after(41).next_condition_id(), "cond-42");
}

#[test]
fn test_editing_session_recompiles_consistently() {
    let mut ids = IdSequence::new();
    let (mut state, nodes) = company_graph(&mut ids);

    assert_eq!(
        compile_query(&state),
        "MATCH (p:Person)-[r1:WORKS_AT]->(c:Company), (t:City) \
         WITH p, r1, c, t \
         OPTIONAL MATCH (c)-[r2:LOCATED_IN]->(t) \
         RETURN p, c, t"
    );

    let located_in = state.relationships[1].id.clone();
    assert!(state.set_match_type(&located_in, Some(MatchType::Match)));
    assert_eq!(
        compile_query(&state),
        "MATCH (p:Person)-[r1:WORKS_AT]->(c:Company) \
         MATCH (c)-[r2:LOCATED_IN]->(t:City) \
         RETURN p, c, t"
    );

    assert!(state.set_relationship_enabled(&located_in, false));
    assert_eq!(
        compile_query(&state),
        "MATCH (p:Person)-[r1:WORKS_AT]->(c:Company), (t:City) RETURN p, c"
    );

    assert!(state.remove_node(&nodes[1]));
    assert!(state.relationships.is_empty());
    assert_eq!(compile_query(&state), "MATCH (p:Person), (t:City) RETURN n");
}

#[test]
fn test_reordering_keeps_positional_return_fields_on_their_node() {
    let mut ids = IdSequence::new();
    let (mut state, _) = company_graph(&mut ids);
    state.return_fields = vec!["2".to_string()];

    assert!(state.move_node(2, 0));

    assert_eq!(state.return_fields, vec!["0"]);
    assert!(compile_query(&state).ends_with("RETURN t"));
}

#[test]
fn test_compiler_is_shareable_across_threads() {
    let mut ids = IdSequence::new();
    let (mut state, _) = company_graph(&mut ids);
    state.limit = "5".to_string();
    state.limit_mode = LimitMode::Nodes;
    let compiler = QueryCompiler::default();
    let expected = compiler.compile(&state);

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| compiler.compile(&state)))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

/// Without relationships the query is a single `MATCH` of standalone nodes
#[test]
fn test_states_without_relationships_never_expand() {
    let mut ids = IdSequence::new();
    let mut state = QueryBuilderState::default();
    state.add_node(&mut ids, Some("Person"), "p");
    state.add_node(&mut ids, None, "x");
    state.limit = "3".to_string();

    for mode in [LimitMode::Rows, LimitMode::Nodes] {
        state.limit_mode = mode;
        let query = compile_query(&state);
        assert_eq!(query, "MATCH (p:Person), (x) RETURN n LIMIT 3");
        assert!(!query.contains("WITH"));
        assert!(!query.contains("OPTIONAL"));
    }
}
