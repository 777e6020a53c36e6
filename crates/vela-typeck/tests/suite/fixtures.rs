//! Shared declaration fixtures for the existential access suite.
//!
//! The corpus covers plain `Self`/associated-type members, properties and
//! subscripts, nested closures, `inout`, inheritance with `where` chains,
//! class bounds, and protocol compositions.

use vela_core::{NominalId, ProtocolId};
use vela_types::{
    format_type, AssocTypeDef, Conformance, ExistentialType, MemberDef, MemberKind, NominalDef,
    NominalKind, Param, ProtocolDef, Type, TypeEnv, TypeStore, WhereClause,
};

use vela_typeck::{check_access, lookup_member, AccessDecision, RejectedAccess};

pub struct World {
    pub store: TypeStore,
    pub bool_ty: NominalId,
    pub class: NominalId,
    pub class7: NominalId,
    pub p1: ProtocolId,
    pub p2: ProtocolId,
    pub p3: ProtocolId,
    pub p4: ProtocolId,
    pub p5a: ProtocolId,
    pub p5b: ProtocolId,
    pub p6a: ProtocolId,
    pub p6b: ProtocolId,
    pub p7a: ProtocolId,
    pub p7b: ProtocolId,
    pub p8a: ProtocolId,
    pub p8b: ProtocolId,
    pub p9a: ProtocolId,
    pub p9b: ProtocolId,
}

pub fn method(name: &str, params: Vec<Param>, result: Type) -> MemberDef {
    MemberDef {
        name: name.into(),
        kind: MemberKind::Method { params, result },
    }
}

pub fn getter(name: &str, ty: Type) -> MemberDef {
    MemberDef {
        name: name.into(),
        kind: MemberKind::Property {
            ty,
            settable: false,
        },
    }
}

pub fn subscript_getter(params: Vec<Param>, result: Type) -> MemberDef {
    MemberDef {
        name: "subscript".into(),
        kind: MemberKind::Subscript {
            params,
            result,
            settable: false,
        },
    }
}

pub fn strukt_def(name: &str, type_params: usize) -> NominalDef {
    NominalDef {
        name: name.into(),
        kind: NominalKind::Struct,
        type_params,
        superclass: None,
        conformances: Vec::new(),
    }
}

pub fn protocol_def(name: &str) -> ProtocolDef {
    ProtocolDef {
        name: name.into(),
        assoc_types: Vec::new(),
        members: Vec::new(),
        inherits: Vec::new(),
        superclass: None,
        where_clauses: Vec::new(),
    }
}

/// Run the access check for `member`, resolving it through the existential.
pub fn decide(env: &dyn TypeEnv, existential: &ExistentialType, member: &str) -> AccessDecision {
    let (protocol, def) = lookup_member(env, existential, member).expect("member should resolve");
    check_access(env, existential, protocol, def).expect("existential should be well-formed")
}

pub fn accepted_signature(
    env: &dyn TypeEnv,
    existential: &ExistentialType,
    member: &str,
) -> String {
    match decide(env, existential, member) {
        AccessDecision::Accepted(accepted) => format_type(env, &accepted.signature),
        AccessDecision::Rejected(rejected) => {
            panic!("expected '{member}' to be usable, got {rejected:?}")
        }
    }
}

pub fn rejection(
    env: &dyn TypeEnv,
    existential: &ExistentialType,
    member: &str,
) -> RejectedAccess {
    match decide(env, existential, member) {
        AccessDecision::Rejected(rejected) => rejected,
        AccessDecision::Accepted(accepted) => {
            panic!("expected '{member}' to be rejected, got {accepted:?}")
        }
    }
}

pub fn world() -> World {
    let mut store = TypeStore::new();

    let bool_ty = store.add_nominal(strukt_def("Bool", 0));
    let never = store.add_nominal(NominalDef {
        name: "Never".into(),
        kind: NominalKind::Enum,
        type_params: 0,
        superclass: None,
        conformances: Vec::new(),
    });
    let strukt = store.add_nominal(strukt_def("Struct", 1));
    let class = store.add_nominal(NominalDef {
        name: "Class".into(),
        kind: NominalKind::Class,
        type_params: 0,
        superclass: None,
        conformances: Vec::new(),
    });

    let boolean = Type::nominal(bool_ty, vec![]);

    let p1 = store.intern_protocol("P1");
    store.define_protocol(
        p1,
        ProtocolDef {
            assoc_types: vec![AssocTypeDef::new("Q")],
            members: vec![
                method("returnSelf", vec![], Type::SelfRef),
                method("returnAssoc", vec![], Type::assoc(p1, "Q")),
            ],
            ..protocol_def("P1")
        },
    );

    let p2 = store.intern_protocol("P2");
    store.define_protocol(
        p2,
        ProtocolDef {
            assoc_types: vec![AssocTypeDef::new("Q")],
            members: vec![
                method("takesSelf", vec![Param::new(Type::SelfRef)], Type::unit()),
                method(
                    "takesAssoc",
                    vec![Param::new(Type::assoc(p2, "Q"))],
                    Type::unit(),
                ),
                method(
                    "takesNestedSelf",
                    vec![Param::new(Type::function(
                        vec![Param::new(Type::SelfRef)],
                        Type::unit(),
                    ))],
                    Type::unit(),
                ),
                method(
                    "takesNestedAssoc",
                    vec![Param::new(Type::function(
                        vec![Param::new(Type::assoc(p2, "Q"))],
                        Type::unit(),
                    ))],
                    Type::unit(),
                ),
            ],
            ..protocol_def("P2")
        },
    );

    let p3 = store.intern_protocol("P3");
    store.define_protocol(
        p3,
        ProtocolDef {
            assoc_types: vec![AssocTypeDef::new("Q")],
            members: vec![
                getter("assocProp", Type::assoc(p3, "Q")),
                subscript_getter(
                    vec![Param::new(Type::assoc(p3, "Q"))],
                    Type::assoc(p3, "Q"),
                ),
                getter("selfProp", Type::SelfRef),
            ],
            ..protocol_def("P3")
        },
    );

    let p4 = store.add_protocol(ProtocolDef {
        members: vec![
            method(
                "foo",
                vec![Param::new(Type::function(vec![], Type::SelfRef))],
                Type::unit(),
            ),
            method(
                "bar",
                vec![Param::new(Type::function(
                    vec![Param::inout(Type::SelfRef)],
                    Type::unit(),
                ))],
                Type::unit(),
            ),
        ],
        ..protocol_def("P4")
    });

    let p5a = store.intern_protocol("P5a");
    store.define_protocol(
        p5a,
        ProtocolDef {
            assoc_types: vec![
                AssocTypeDef::new("A"),
                AssocTypeDef::new("B"),
                AssocTypeDef::new("C"),
            ],
            members: vec![
                getter("propA", Type::assoc(p5a, "A")),
                getter(
                    "propB",
                    Type::nominal(strukt, vec![Type::assoc(p5a, "B")]),
                ),
                method(
                    "takesA1",
                    vec![Param::new(Type::assoc(p5a, "A"))],
                    Type::unit(),
                ),
                method(
                    "takesB",
                    vec![Param::new(Type::assoc(p5a, "B"))],
                    Type::unit(),
                ),
                method(
                    "takesSelf",
                    vec![
                        Param::new(Type::assoc(p5a, "A")),
                        Param::new(Type::SelfRef),
                    ],
                    Type::unit(),
                ),
                method("returnsC", vec![], Type::assoc(p5a, "C")),
            ],
            where_clauses: vec![WhereClause {
                name: "B".into(),
                ty: Type::nominal(strukt, vec![Type::assoc(p5a, "A")]),
            }],
            ..protocol_def("P5a")
        },
    );

    let p5b = store.add_protocol(ProtocolDef {
        members: vec![method(
            "takesA2",
            vec![Param::new(Type::assoc(p5a, "A"))],
            Type::unit(),
        )],
        inherits: vec![p5a],
        superclass: Some(class),
        where_clauses: vec![
            WhereClause {
                name: "A".into(),
                ty: boolean.clone(),
            },
            WhereClause {
                name: "C".into(),
                ty: Type::SelfRef,
            },
        ],
        ..protocol_def("P5b")
    });

    let p6a = store.add_protocol(ProtocolDef {
        assoc_types: vec![AssocTypeDef::new("A")],
        where_clauses: vec![WhereClause {
            name: "A".into(),
            ty: boolean.clone(),
        }],
        ..protocol_def("P6a")
    });

    let p6b = store.intern_protocol("P6b");
    store.define_protocol(
        p6b,
        ProtocolDef {
            assoc_types: vec![AssocTypeDef::new("A")],
            members: vec![method(
                "takesA",
                vec![Param::new(Type::assoc(p6b, "A"))],
                Type::SelfRef,
            )],
            ..protocol_def("P6b")
        },
    );

    let p7a = store.add_protocol(ProtocolDef {
        assoc_types: vec![AssocTypeDef::new("A")],
        ..protocol_def("P7a")
    });
    let class7 = store.add_nominal(NominalDef {
        name: "Class7".into(),
        kind: NominalKind::Class,
        type_params: 0,
        superclass: None,
        conformances: vec![Conformance {
            protocol: p7a,
            assoc_bindings: vec![("A".into(), boolean.clone())],
        }],
    });
    let p7b = store.add_protocol(ProtocolDef {
        assoc_types: vec![AssocTypeDef::new("B")],
        members: vec![method(
            "takesA",
            vec![Param::new(Type::assoc(p7a, "A"))],
            Type::unit(),
        )],
        inherits: vec![p7a],
        ..protocol_def("P7b")
    });

    let p8a = store.intern_protocol("P8a");
    store.define_protocol(
        p8a,
        ProtocolDef {
            assoc_types: vec![AssocTypeDef::new("A")],
            members: vec![method(
                "takesA",
                vec![Param::new(Type::assoc(p8a, "A"))],
                Type::unit(),
            )],
            where_clauses: vec![WhereClause {
                name: "A".into(),
                ty: boolean.clone(),
            }],
            ..protocol_def("P8a")
        },
    );
    let p8b = store.add_protocol(ProtocolDef {
        assoc_types: vec![AssocTypeDef::new("A")],
        where_clauses: vec![WhereClause {
            name: "A".into(),
            ty: Type::nominal(never, vec![]),
        }],
        ..protocol_def("P8b")
    });

    let sequence = store.add_protocol(protocol_def("Sequence"));
    let p9a = store.intern_protocol("P9a");
    store.define_protocol(
        p9a,
        ProtocolDef {
            assoc_types: vec![AssocTypeDef {
                name: "A".into(),
                bounds: vec![sequence],
            }],
            members: vec![method(
                "takesA",
                vec![Param::new(Type::assoc(p9a, "A"))],
                Type::unit(),
            )],
            ..protocol_def("P9a")
        },
    );
    let p9b = store.add_protocol(ProtocolDef {
        assoc_types: vec![AssocTypeDef::new("A")],
        where_clauses: vec![WhereClause {
            name: "A".into(),
            ty: boolean,
        }],
        ..protocol_def("P9b")
    });

    World {
        store,
        bool_ty,
        class,
        class7,
        p1,
        p2,
        p3,
        p4,
        p5a,
        p5b,
        p6a,
        p6b,
        p7a,
        p7b,
        p8a,
        p8b,
        p9a,
        p9b,
    }
}
