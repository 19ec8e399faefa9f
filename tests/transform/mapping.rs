//! Type mapping through the full pass

use schemagen_foundation::{ObjectSchema, PropertyType, SchemaProperty};
use schemagen_transform::{TransformConfig, transform};

fn schema(source: &str) -> ObjectSchema {
    let output = transform(source, &TransformConfig::default()).unwrap();
    assert_eq!(output.schemas.len(), 1, "expected one model in {source}");
    output.schemas.into_iter().next().unwrap()
}

/// The schema entry for `decl` declared in a model with the given imports.
fn property_with(imports: &str, base: &str, decl: &str) -> Option<SchemaProperty> {
    let source = format!("{imports}\nclass Model extends {base} {{\n  {decl}\n}}\n");
    let schema = schema(&source);
    schema.properties.iter().next().map(|(_, p)| p.clone())
}

fn property(decl: &str) -> Option<SchemaProperty> {
    property_with(
        r#"import Realm, { BSON, Types } from "realm";"#,
        "Realm.Object",
        decl,
    )
}

fn kind(decl: &str) -> Option<PropertyType> {
    property(decl).map(|p| p.kind())
}

// =============================================================================
// Keywords and aliases
// =============================================================================

#[test]
fn primitive_keywords() {
    assert_eq!(kind("a!: boolean;"), Some(PropertyType::Bool));
    assert_eq!(kind("a!: string;"), Some(PropertyType::String));
    assert_eq!(kind("a!: number;"), Some(PropertyType::Double));
}

#[test]
fn every_scalar_alias() {
    for (alias, expected) in [
        ("Bool", PropertyType::Bool),
        ("String", PropertyType::String),
        ("Int", PropertyType::Int),
        ("Float", PropertyType::Float),
        ("Double", PropertyType::Double),
        ("Decimal128", PropertyType::Decimal128),
        ("ObjectId", PropertyType::ObjectId),
        ("UUID", PropertyType::Uuid),
        ("Date", PropertyType::Date),
        ("Data", PropertyType::Data),
        ("Mixed", PropertyType::Mixed),
    ] {
        assert_eq!(kind(&format!("a!: Types.{alias};")), Some(expected), "{alias}");
    }
}

#[test]
fn alias_spellings_agree() {
    let spellings = [
        (r#"import { Object, Types } from "realm";"#, "Object", "Types.Int"),
        (r#"import Realm from "realm";"#, "Realm.Object", "Realm.Types.Int"),
        (r#"import * as R from "realm";"#, "R.Object", "R.Types.Int"),
        (r#"import { Object, Types as T } from "realm";"#, "Object", "T.Int"),
        (r#"import { Object, Int } from "realm";"#, "Object", "Int"),
    ];
    let expected = property("a!: Types.Int;").unwrap();
    assert_eq!(expected.kind(), PropertyType::Int);
    for (imports, base, ty) in spellings {
        let actual = property_with(imports, base, &format!("a!: {ty};"));
        assert_eq!(actual.as_ref(), Some(&expected), "{imports} {ty}");
    }
}

#[test]
fn scalar_aliases_need_the_types_namespace() {
    let source = "import Realm from 'realm';\nclass P extends Realm.Object {\n  x!: Realm.Int;\n  y!: Realm.Mixed;\n  z!: Realm.List<string>;\n}\n";
    let output = transform(source, &TransformConfig::default()).unwrap();
    let schema = &output.schemas[0];
    let names: Vec<_> = schema.properties.names().collect();
    assert_eq!(names, ["y", "z"]);
    assert_eq!(output.warnings.len(), 1);
    assert_eq!(output.warnings[0].property, "x");

    assert_eq!(kind("a!: Realm.String;"), None);
    assert_eq!(kind("a = new Realm.ObjectId();"), None);
    assert_eq!(kind("a!: Realm.Types.String;"), Some(PropertyType::String));
}

#[test]
fn bson_namespace_for_bson_classes() {
    assert_eq!(kind("a!: BSON.ObjectId;"), Some(PropertyType::ObjectId));
    assert_eq!(kind("a!: BSON.Decimal128;"), Some(PropertyType::Decimal128));
    assert_eq!(kind("a!: Realm.BSON.UUID;"), Some(PropertyType::Uuid));
}

#[test]
fn aliases_from_other_modules_are_links() {
    let p = property_with(
        "import { Object } from \"realm\";\nimport { Types } from \"./types\";",
        "Object",
        "a!: Types.Int;",
    );
    assert_eq!(p, None);

    let p = property_with(
        "import { Object } from \"realm\";\nimport { Int } from \"./types\";",
        "Object",
        "a!: Int;",
    )
    .unwrap();
    assert_eq!(p.kind(), PropertyType::Link);
    assert_eq!(p.descriptor.object_type(), Some("Int"));
}

#[test]
fn global_date_and_array_buffer() {
    assert_eq!(kind("a!: Date;"), Some(PropertyType::Date));
    assert_eq!(kind("a!: ArrayBuffer;"), Some(PropertyType::Data));
}

// =============================================================================
// Optionality
// =============================================================================

#[test]
fn optionality_commutes() {
    let marker = property("a?: Types.Int;").unwrap();
    let trailing = property("a!: Types.Int | undefined;").unwrap();
    let leading = property("a!: undefined | Types.Int;").unwrap();
    assert!(marker.is_optional());
    assert_eq!(marker, trailing);
    assert_eq!(trailing, leading);

    let required = property("a!: Types.Int;").unwrap();
    assert!(!required.is_optional());
    assert_eq!(required.kind(), marker.kind());
}

#[test]
fn other_unions_are_unresolved() {
    assert_eq!(kind("a!: string | number;"), None);
    assert_eq!(kind("a!: string | null;"), None);
    assert_eq!(kind("a!: string | undefined | null;"), None);
}

// =============================================================================
// Links and collections
// =============================================================================

#[test]
fn same_file_references_are_links() {
    let p = property("owner?: Person;").unwrap();
    assert_eq!(p.kind(), PropertyType::Link);
    assert_eq!(p.descriptor.object_type(), Some("Person"));
    assert!(p.is_optional());
}

#[test]
fn collections_flatten_their_element() {
    for (ty, expected, element) in [
        ("Types.List<Dog>", PropertyType::List, "Dog"),
        ("Realm.List<string>", PropertyType::List, "string"),
        ("Types.Set<Types.Int>", PropertyType::Set, "int"),
        ("Types.Dictionary<Types.Mixed>", PropertyType::Dictionary, "mixed"),
    ] {
        let p = property(&format!("a!: {ty};")).unwrap();
        assert_eq!(p.kind(), expected, "{ty}");
        assert_eq!(p.descriptor.object_type(), Some(element), "{ty}");
        assert!(!p.is_optional());
    }
}

#[test]
fn collection_element_optionality_propagates() {
    let p = property("a!: Types.List<string | undefined>;").unwrap();
    assert_eq!(p.kind(), PropertyType::List);
    assert!(p.is_optional());
}

#[test]
fn nested_collections_are_unresolved() {
    assert_eq!(kind("a!: Types.List<Types.List<string>>;"), None);
    assert_eq!(kind("a!: Types.List<string, number>;"), None);
    assert_eq!(kind("a!: Types.List;"), None);
}

#[test]
fn linking_objects() {
    let p = property(r#"friends!: Realm.LinkingObjects<Person, "friends">;"#).unwrap();
    assert_eq!(p.kind(), PropertyType::LinkingObjects);
    assert_eq!(p.descriptor.object_type(), Some("Person"));
    assert_eq!(p.descriptor.property(), Some("friends"));
    assert!(!p.is_optional());
}

// =============================================================================
// Inference from initializers
// =============================================================================

#[test]
fn inferred_kinds() {
    assert_eq!(kind("a = true;"), Some(PropertyType::Bool));
    assert_eq!(kind("a = 'x';"), Some(PropertyType::String));
    assert_eq!(kind("a = -1.5;"), Some(PropertyType::Double));
    assert_eq!(kind("a = new BSON.ObjectId();"), Some(PropertyType::ObjectId));
    assert_eq!(kind("a = new Realm.BSON.UUID();"), Some(PropertyType::Uuid));
    assert_eq!(kind("a = new BSON.Decimal128('1.5');"), Some(PropertyType::Decimal128));
    assert_eq!(kind("a = new Date();"), Some(PropertyType::Date));
    assert_eq!(kind("a = new ArrayBuffer(8);"), Some(PropertyType::Data));
}

#[test]
fn uninferable_initializers() {
    assert_eq!(kind("a = null;"), None);
    assert_eq!(kind("a = [];"), None);
    assert_eq!(kind("a = compute();"), None);
    assert_eq!(kind("a = new Date(2020, 1);"), None);
    assert_eq!(kind("a = new Person();"), None);
}
