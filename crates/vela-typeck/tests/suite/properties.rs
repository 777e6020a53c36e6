use pretty_assertions::assert_eq;

use vela_core::Name;
use vela_types::{ExistentialType, Param, ProtocolDef, Type, TypeStore};

use vela_typeck::{AccessDecision, Binding, ConstraintGraph};

use super::fixtures::{decide, method, protocol_def, strukt_def, world};

#[test]
fn members_without_self_or_assoc_are_accepted_unchanged() {
    let mut store = TypeStore::new();
    let bool_ty = store.add_nominal(strukt_def("Bool", 0));
    let boolean = Type::nominal(bool_ty, vec![]);

    let printer = store.add_protocol(ProtocolDef {
        members: vec![method(
            "echo",
            vec![Param::new(boolean.clone())],
            boolean.clone(),
        )],
        ..protocol_def("Printer")
    });

    let existential = ExistentialType::new([printer], None);
    let accepted = match decide(&store, &existential, "echo") {
        AccessDecision::Accepted(accepted) => accepted,
        AccessDecision::Rejected(rejected) => panic!("expected acceptance, got {rejected:?}"),
    };
    assert_eq!(
        accepted.signature,
        Type::function(vec![Param::new(boolean.clone())], boolean)
    );
}

#[test]
fn checks_are_idempotent() {
    let w = world();
    let p5b = ExistentialType::new([w.p5b], None);

    assert_eq!(
        decide(&w.store, &p5b, "takesB"),
        decide(&w.store, &p5b, "takesB")
    );

    let p1 = ExistentialType::new([w.p1], None);
    assert_eq!(
        decide(&w.store, &p1, "returnAssoc"),
        decide(&w.store, &p1, "returnAssoc")
    );
}

#[test]
fn where_chains_resolve_across_multiple_hops() {
    let mut store = TypeStore::new();
    let bool_ty = store.add_nominal(strukt_def("Bool", 0));

    let base = store.intern_protocol("Base");
    store.define_protocol(
        base,
        ProtocolDef {
            assoc_types: vec![vela_types::AssocTypeDef::new("A")],
            members: vec![method(
                "usesA",
                vec![Param::new(Type::assoc(base, "A"))],
                Type::unit(),
            )],
            ..protocol_def("Base")
        },
    );
    let mid = store.add_protocol(ProtocolDef {
        inherits: vec![base],
        ..protocol_def("Mid")
    });
    let top = store.add_protocol(ProtocolDef {
        inherits: vec![mid],
        where_clauses: vec![vela_types::WhereClause {
            name: "A".into(),
            ty: Type::nominal(bool_ty, vec![]),
        }],
        ..protocol_def("Top")
    });

    let existential = ExistentialType::new([top], None);
    let AccessDecision::Accepted(accepted) = decide(&store, &existential, "usesA") else {
        panic!("expected acceptance");
    };
    assert_eq!(
        accepted.signature,
        Type::function(
            vec![Param::new(Type::nominal(bool_ty, vec![]))],
            Type::unit(),
        )
    );
}

#[test]
fn graphs_report_unbound_and_fixed_identities() {
    let w = world();

    let p1 = ExistentialType::new([w.p1], None);
    let graph = ConstraintGraph::build(&w.store, &p1).unwrap();
    assert_eq!(graph.binding(&Name::from("Q")), Some(&Binding::Unbound));

    let p5b = ExistentialType::new([w.p5b], None);
    let graph = ConstraintGraph::build(&w.store, &p5b).unwrap();
    assert_eq!(
        graph.binding(&Name::from("A")),
        Some(&Binding::Fixed(Type::nominal(w.bool_ty, vec![])))
    );
    assert_eq!(graph.class_bound(), Some(w.class));
}

#[test]
fn decisions_round_trip_through_serde() {
    let w = world();

    let p1 = ExistentialType::new([w.p1], None);
    for member in ["returnSelf", "returnAssoc"] {
        let decision = decide(&w.store, &p1, member);
        let json = serde_json::to_string(&decision).unwrap();
        let back: AccessDecision = serde_json::from_str(&json).unwrap();
        assert_eq!(back, decision);
    }
}
