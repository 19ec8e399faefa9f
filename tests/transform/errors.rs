//! Fatal errors and warnings

use schemagen_foundation::{ErrorKind, LinkingObjectsArgument};
use schemagen_transform::{TransformConfig, transform};

fn model(body: &str) -> String {
    format!("import Realm from \"realm\";\nclass Person extends Realm.Object {{\n  {body}\n}}\n")
}

fn error_kind(body: &str) -> ErrorKind {
    transform(&model(body), &TransformConfig::default())
        .unwrap_err()
        .kind
}

#[test]
fn optional_linking_objects() {
    for body in [
        r#"friends?: Realm.LinkingObjects<Person, "friends">;"#,
        r#"friends!: Realm.LinkingObjects<Person, "friends"> | undefined;"#,
        r#"friends!: undefined | Realm.LinkingObjects<Person, "friends">;"#,
    ] {
        let kind = error_kind(body);
        assert!(
            matches!(kind, ErrorKind::LinkingObjectsOptional { ref class, ref property } if class == "Person" && property == "friends"),
            "{body}: {kind:?}"
        );
        assert!(kind.to_string().contains("cannot be optional"));
    }
}

#[test]
fn linking_objects_arity() {
    let kind = error_kind("friends!: Realm.LinkingObjects<Person>;");
    assert!(matches!(kind, ErrorKind::LinkingObjectsArity { found: 1, .. }));
    let message = kind.to_string();
    assert!(message.contains("Person.friends"));
    assert!(message.contains("Correct syntax is"));

    let kind = error_kind(r#"friends!: Realm.LinkingObjects<Person, "a", "b">;"#);
    assert!(matches!(kind, ErrorKind::LinkingObjectsArity { found: 3, .. }));

    let kind = error_kind("friends!: Realm.LinkingObjects;");
    assert!(matches!(kind, ErrorKind::LinkingObjectsArity { found: 0, .. }));
}

#[test]
fn linking_objects_argument_types() {
    let kind = error_kind(r#"friends!: Realm.LinkingObjects<"Person", "friends">;"#);
    assert!(matches!(
        kind,
        ErrorKind::LinkingObjectsArgumentType {
            argument: LinkingObjectsArgument::ObjectType,
            ..
        }
    ));

    let kind = error_kind("friends!: Realm.LinkingObjects<Person, friends>;");
    assert!(matches!(
        kind,
        ErrorKind::LinkingObjectsArgumentType {
            argument: LinkingObjectsArgument::PropertyName,
            ..
        }
    ));
}

#[test]
fn duplicate_schema_static() {
    let err = transform(
        &model("static schema = { name: \"Person\", properties: {} };"),
        &TransformConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::DuplicateSchemaStatic { ref class } if class == "Person"));
    let context = err.context.unwrap();
    assert_eq!((context.line, context.column), (Some(3), Some(3)));
}

#[test]
fn errors_are_positioned_at_the_type() {
    let err = transform(
        &model(r#"friends?: Realm.LinkingObjects<Person, "friends">;"#),
        &TransformConfig::default(),
    )
    .unwrap_err();
    assert_eq!(err.context.and_then(|c| c.line), Some(3));
}

#[test]
fn unresolved_types_warn_and_repeat() {
    let source = model("tags!: any;\n  name!: string;");
    let config = TransformConfig::default();
    let first = transform(&source, &config).unwrap();
    let second = transform(&source, &config).unwrap();

    assert_eq!(first.warnings, second.warnings);
    assert_eq!(first.warnings.len(), 1);
    let warning = &first.warnings[0];
    assert_eq!(warning.class, "Person");
    assert_eq!(warning.property, "tags");
    assert_eq!(warning.to_string(), "3:3: Unable to determine type of 'tags' property");

    let schema = &first.schemas[0];
    assert!(!schema.properties.contains("tags"));
    assert!(schema.properties.contains("name"));
}

#[test]
fn one_bad_class_fails_the_file() {
    let source = r#"import Realm from "realm";
class Good extends Realm.Object { name!: string; }
class Bad extends Realm.Object { owners?: Realm.LinkingObjects<Good, "x">; }
"#;
    assert!(transform(source, &TransformConfig::default()).is_err());
}
