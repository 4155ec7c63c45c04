use ontology_builder::{
    ontology::{InstanceInit, OntologyBuilder, PropertyValue, RangeEntry, SessionStack, Statement},
    tests_cfg::fixtures,
    Error,
};
use oxrdf::{
    vocab::{rdf, rdfs, xsd},
    NamedNode, Triple,
};
use rstest::rstest;

#[test]
fn literal_round_trip() {
    let mut sessions = SessionStack::new();
    let namespace = fixtures::organization_namespace(&mut sessions);

    let mut acme = namespace
        .instantiate("Corporation", &mut sessions, InstanceInit::new())
        .expect("corporation");
    acme.assign("label", "Acme Inc.").expect("label");
    acme.assign("comment", "Makes everything.").expect("comment");

    assert_eq!(acme.label("en").expect("english label"), "Acme Inc.");
    assert_eq!(acme.comment("en").expect("english comment"), "Makes everything.");
    assert!(acme.property("label").expect("label").texts("foo").is_empty());
    assert!(matches!(
        acme.label("foo"),
        Err(Error::NoLabelForLanguage { language }) if language == "foo"
    ));
}

#[test]
fn range_admits_instances_of_sub_classes() {
    let mut triples = fixtures::organization_triples();
    let local = |name: &str| NamedNode::new_unchecked(format!("{}{name}", fixtures::BASE_URI));
    triples.push(Triple::new(local("Employee"), rdfs::SUB_CLASS_OF, local("Person")));

    let mut sessions = SessionStack::new();
    let namespace = OntologyBuilder::new(triples.iter().filter_map(Statement::from_triple))
        .build(&mut sessions)
        .expect("extended schema");

    let jane = namespace
        .instantiate("Employee", &mut sessions, InstanceInit::new())
        .expect("employee");
    let usa = namespace
        .instantiate("Country", &mut sessions, InstanceInit::new())
        .expect("country");
    let mut acme = namespace
        .instantiate(
            "Corporation",
            &mut sessions,
            InstanceInit::new().with("hasEmployee", &jane),
        )
        .expect("corporation");

    let err = acme
        .assign("hasEmployee", &usa)
        .expect_err("country is not a person");
    assert!(matches!(err, Error::InvalidPropertyAssignment { .. }));

    acme.assign("hasExecutive", &jane)
        .expect("executive range inherited from hasEmployee");

    let employees = acme.property("hasEmployee").expect("has employee");
    assert_eq!(
        employees.values(),
        &[PropertyValue::Instance(jane.reference())]
    );
    assert!(acme.property("hasExecutive").expect("has executive").contains(&jane.reference()));
}

#[test]
fn unknown_initial_property_is_rejected_and_not_recorded() {
    let mut sessions = SessionStack::new();
    let namespace = fixtures::organization_namespace(&mut sessions);

    let ((), scoped) = sessions.scoped(|sessions| {
        let err = namespace
            .instantiate(
                "Person",
                sessions,
                InstanceInit::new().with("naics", "325110"),
            )
            .expect_err("person has no naics");
        assert!(matches!(
            err,
            Error::UnknownProperty { type_name, property }
                if type_name == "Person" && property == "naics"
        ));
    });

    assert!(scoped.instances().is_empty());
}

#[test]
fn unknown_type_is_reported() {
    let mut sessions = SessionStack::new();
    let namespace = fixtures::organization_namespace(&mut sessions);

    let err = namespace
        .instantiate("Spaceship", &mut sessions, InstanceInit::new())
        .expect_err("no such type");
    assert_eq!(err.to_string(), "unknown type `Spaceship`");
}

#[rstest]
#[case::declared_xsd_datatype(xsd::DATE.into_owned(), "1999-04-01")]
#[case::local_datatype(
    NamedNode::new_unchecked(format!("{}NaicsCode", fixtures::BASE_URI)),
    "325110"
)]
fn datatype_ranges_accept_literals(#[case] datatype: NamedNode, #[case] value: &str) {
    let local = |name: &str| NamedNode::new_unchecked(format!("{}{name}", fixtures::BASE_URI));
    let triples = vec![
        Triple::new(local("Organization"), rdf::TYPE, rdfs::CLASS.into_owned()),
        Triple::new(datatype.clone(), rdf::TYPE, rdfs::DATATYPE.into_owned()),
        Triple::new(local("code"), rdf::TYPE, rdf::PROPERTY.into_owned()),
        Triple::new(local("code"), rdfs::DOMAIN, local("Organization")),
        Triple::new(local("code"), rdfs::RANGE, datatype),
    ];

    let mut sessions = SessionStack::new();
    let namespace = OntologyBuilder::from_triples(&triples)
        .build(&mut sessions)
        .expect("schema with datatype range");
    assert_eq!(
        namespace.type_named("code").expect("code").range(),
        vec![RangeEntry::Literal]
    );

    let acme = namespace
        .instantiate(
            "Organization",
            &mut sessions,
            InstanceInit::new().with("code", value),
        )
        .expect("literal in datatype range");
    assert_eq!(acme.property("code").expect("code").texts("en"), vec![value]);
}
