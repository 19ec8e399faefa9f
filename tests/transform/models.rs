//! Schema assembly and source rewriting

use schemagen_foundation::{DefaultValue, Literal, PropertyType};
use schemagen_transform::{TransformConfig, transform, transform_source};

const PERSON: &str = r#"import Realm, { BSON, Types } from "realm";

export class Person extends Realm.Object<Person> {
  _id = new BSON.ObjectId();
  @index name!: string;
  @mapTo("years") age?: number = 42;
  dogs!: Types.List<Dog>;
  nicknames!: string[];

  static primaryKey = "_id";
}
"#;

const PERSON_RENDERED: &str = r#"import Realm, { BSON, Types } from "realm";

export class Person extends Realm.Object<Person> {
  _id;
  name!: string;
  age?: number = 42;
  dogs!: Types.List<Dog>;
  nicknames!: string[];

  static primaryKey = "_id";
  static schema = {
    name: "Person",
    properties: {
      _id: { type: "objectId", default: () => new BSON.ObjectId() },
      name: { type: "string", indexed: true },
      age: { type: "double", optional: true, default: 42, mapTo: "years" },
      dogs: { type: "list", objectType: "Dog" },
    },
    primaryKey: "_id",
  };
}
"#;

#[test]
fn person_end_to_end() {
    let rendered = transform_source(PERSON, &TransformConfig::default()).unwrap();
    assert_eq!(rendered, PERSON_RENDERED);
}

#[test]
fn person_schema_values() {
    let output = transform(PERSON, &TransformConfig::default()).unwrap();
    let schema = &output.schemas[0];
    assert_eq!(schema.name, "Person");
    assert_eq!(schema.primary_key.as_deref(), Some("_id"));
    assert_eq!(
        schema.properties.names().collect::<Vec<_>>(),
        ["_id", "name", "age", "dogs"]
    );

    let id = schema.properties.get("_id").unwrap();
    assert!(matches!(&id.default, Some(DefaultValue::Producer { source }) if source == "new BSON.ObjectId()"));

    let age = schema.properties.get("age").unwrap();
    assert_eq!(age.map_to.as_deref(), Some("years"));
    assert!(matches!(
        &age.default,
        Some(DefaultValue::Literal(Literal::Number { raw, .. })) if raw == "42"
    ));

    assert_eq!(output.warnings.len(), 1);
    assert_eq!(output.warnings[0].property, "nicknames");
    assert_eq!(output.warnings[0].line, 8);
}

#[test]
fn required_string_has_no_extras() {
    let source = "import Realm from 'realm';\nclass A extends Realm.Object {\n  name!: string;\n}\n";
    let output = transform(source, &TransformConfig::default()).unwrap();
    let name = output.schemas[0].properties.get("name").unwrap();
    assert_eq!(name.kind(), PropertyType::String);
    assert!(!name.is_optional());
    assert!(name.default.is_none());
    assert!(output.apply(source).unwrap().contains("      name: { type: \"string\" },\n"));
}

#[test]
fn statics_fill_the_envelope() {
    let source = r#"import Realm from "realm";
class Reading extends Realm.Object {
  value!: Realm.Types.Double;
  static name = "SensorReading";
  static embedded = true;
  static asymmetric = false;
  static version = 3;
}
"#;
    let output = transform(source, &TransformConfig::default()).unwrap();
    let schema = &output.schemas[0];
    assert_eq!(schema.name, "SensorReading");
    assert_eq!(schema.embedded, Some(true));
    assert_eq!(schema.asymmetric, Some(false));
    let rendered = output.apply(source).unwrap();
    assert!(rendered.contains("    name: \"SensorReading\",\n"));
    assert!(rendered.contains("    embedded: true,\n    asymmetric: false,\n"));
    assert!(rendered.contains("  static version = 3;\n"));
}

#[test]
fn literal_defaults_stay_in_place() {
    let source = "import Realm from 'realm';\nclass A extends Realm.Object {\n  flag = false;\n  label = \"x\";\n  note = `plain`;\n}\n";
    let rendered = transform_source(source, &TransformConfig::default()).unwrap();
    assert!(rendered.contains("  flag = false;\n  label = \"x\";\n"));
    assert!(rendered.contains("flag: { type: \"bool\", default: false }"));
    assert!(rendered.contains("label: { type: \"string\", default: \"x\" }"));
}

#[test]
fn compact_output() {
    let source = "import Realm from 'realm';\nclass A extends Realm.Object {\n  n!: Realm.Types.Int;\n}\n";
    let config = TransformConfig::default().with_multi_line(false);
    let rendered = transform_source(source, &config).unwrap();
    assert_eq!(
        rendered,
        "import Realm from 'realm';\nclass A extends Realm.Object {\n  n!: Realm.Types.Int;\n  static schema = { name: \"A\", properties: { n: { type: \"int\" } } };\n}\n"
    );
}

#[test]
fn configured_module_and_base_class() {
    let source = "import { Model } from '@acme/store';\nclass A extends Model {\n  n!: string;\n}\n";
    let default = transform(source, &TransformConfig::default()).unwrap();
    assert!(default.is_unchanged());

    let config = TransformConfig::default()
        .with_module("@acme/store")
        .with_base_class("Model");
    let output = transform(source, &config).unwrap();
    assert_eq!(output.schemas[0].name, "A");
}

#[test]
fn non_models_are_untouched() {
    let source = r#"import Realm from "realm";
import { Object } from "./local";

class Local extends Object { a = new Date(); }
class Indirect extends Person { b!: string; }
class Plain { static schema = {}; }
const schema = { name: "x" };
"#;
    let output = transform(source, &TransformConfig::default()).unwrap();
    assert!(output.is_unchanged());
    assert_eq!(output.apply(source).unwrap(), source);
}

#[test]
fn unimported_base_does_not_qualify() {
    let source = "class A extends Realm.Object {\n  n!: string;\n}\n";
    assert!(transform(source, &TransformConfig::default()).unwrap().is_unchanged());
}

#[test]
fn linking_objects_round_trip_through_rendering() {
    let source = r#"import Realm from "realm";
export class Dog extends Realm.Object {
  owners!: Realm.LinkingObjects<Person, "dogs">;
}
"#;
    let rendered = transform_source(source, &TransformConfig::default()).unwrap();
    assert!(rendered.contains(
        r#"owners: { type: "linkingObjects", objectType: "Person", property: "dogs" },"#
    ));
}

#[test]
fn models_declared_in_functions_and_namespaces() {
    let source = r#"import Realm from "realm";

function makeModels() {
  class Inner extends Realm.Object {
    a!: string;
  }
  return Inner;
}

namespace Models {
  export class Dog extends Realm.Object {
    name!: string;
  }
}
"#;
    let expected = r#"import Realm from "realm";

function makeModels() {
  class Inner extends Realm.Object {
    a!: string;
    static schema = {
      name: "Inner",
      properties: {
        a: { type: "string" },
      },
    };
  }
  return Inner;
}

namespace Models {
  export class Dog extends Realm.Object {
    name!: string;
    static schema = {
      name: "Dog",
      properties: {
        name: { type: "string" },
      },
    };
  }
}
"#;
    let output = transform(source, &TransformConfig::default()).unwrap();
    let names: Vec<_> = output.schemas.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["Inner", "Dog"]);
    assert!(output.warnings.is_empty());
    assert_eq!(output.apply(source).unwrap(), expected);
}

#[test]
fn models_declared_inside_methods() {
    let source = r#"import Realm from "realm";
class Registry {
  register() {
    class Tag extends Realm.Object {
      label!: string;
    }
    return Tag;
  }
}
"#;
    let output = transform(source, &TransformConfig::default()).unwrap();
    assert_eq!(output.schemas.len(), 1);
    assert_eq!(output.schemas[0].name, "Tag");
    let rendered = output.apply(source).unwrap();
    assert!(rendered.contains("      label!: string;\n      static schema = {\n        name: \"Tag\","));
}
