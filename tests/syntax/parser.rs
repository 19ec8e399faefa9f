//! Integration tests for the parser
//!
//! Parses complete model files the way the transform sees them.

use schemagen_foundation::{ErrorKind, Literal};
use schemagen_syntax::{
    ClassMember, Expr, ImportSpecifier, Item, MethodKind, PropertyDecl, TypeExpr, TypeKeyword,
    parse_module,
};

const MODELS: &str = r#"import Realm, { BSON, Types } from "realm";
import { Helper } from "./helper";

/** A person. */
export class Person extends Realm.Object<Person> {
  _id = new BSON.ObjectId();
  @index name!: string;
  age?: number = 42;
  dogs!: Types.List<Dog>;

  static primaryKey = "_id";

  get label(): string {
    return `${this.name} (${this.age})`;
  }
}

const registry = new Map<string, unknown>();

export class Dog extends Realm.Object {
  owners!: Realm.LinkingObjects<Person, "dogs">;
  @mapTo("dog_name") name = "Rex";
}
"#;

fn property<'a>(members: &'a [ClassMember], name: &str) -> &'a PropertyDecl {
    members
        .iter()
        .find_map(|member| match member {
            ClassMember::Property(prop) if prop.name() == Some(name) => Some(prop),
            _ => None,
        })
        .unwrap_or_else(|| panic!("no property {name}"))
}

#[test]
fn items_in_source_order() {
    let module = parse_module(MODELS).unwrap();
    let shapes: Vec<&str> = module
        .items
        .iter()
        .map(|item| match item {
            Item::Import(_) => "import",
            Item::Class(_) => "class",
            Item::Other { .. } => "other",
        })
        .collect();
    assert_eq!(shapes, ["import", "import", "class", "other", "class"]);
}

#[test]
fn imports_record_bindings() {
    let module = parse_module(MODELS).unwrap();
    let realm = module.imports().next().unwrap();
    assert_eq!(realm.source, "realm");
    let locals: Vec<_> = realm.specifiers.iter().map(|s| s.local().name.as_str()).collect();
    assert_eq!(locals, ["Realm", "BSON", "Types"]);
    assert!(matches!(realm.specifiers[0], ImportSpecifier::Default { .. }));
}

#[test]
fn class_members() {
    let module = parse_module(MODELS).unwrap();
    let person = module.classes().next().unwrap();
    assert_eq!(person.name(), "Person");
    assert_eq!(person.properties().count(), 5);

    let id = property(&person.members, "_id");
    assert!(matches!(id.initializer, Some(Expr::New { .. })));
    assert!(id.type_annotation.is_none());

    let name = property(&person.members, "name");
    assert_eq!(name.decorators[0].name(), Some("index"));
    assert!(matches!(
        name.type_annotation,
        Some(TypeExpr::Keyword(TypeKeyword::String, _))
    ));

    let age = property(&person.members, "age");
    assert!(age.optional);
    assert!(matches!(
        age.initializer.as_ref().and_then(Expr::as_literal),
        Some(Literal::Number { value, .. }) if (*value - 42.0).abs() < f64::EPSILON
    ));

    assert!(property(&person.members, "primaryKey").is_static);
    assert!(person.members.iter().any(|m| matches!(
        m,
        ClassMember::Method(method) if method.kind == MethodKind::Getter
    )));
}

#[test]
fn spans_cover_source_text() {
    let module = parse_module(MODELS).unwrap();
    let dog = module.classes().nth(1).unwrap();
    let name = property(&dog.members, "name");
    assert_eq!(name.span.text(MODELS), "@mapTo(\"dog_name\") name = \"Rex\";");
    assert_eq!(name.eq_span.unwrap().text(MODELS), "=");
    assert!(dog.body.text(MODELS).starts_with('{'));
    assert!(dog.body.text(MODELS).ends_with('}'));
}

#[test]
fn parse_errors_carry_position() {
    let err = parse_module("import Realm from 'realm';\nclass A extends Realm.Object {\n  a: ;\n}")
        .unwrap_err();
    let ErrorKind::ParseError { line, .. } = err.kind else {
        panic!("expected parse error, got {:?}", err.kind);
    };
    assert_eq!(line, 3);
}
