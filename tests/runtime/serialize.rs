//! Integration tests for schema serialization

use schemagen_runtime::{Format, Session, save_to_file, to_json};
use serde_json::{Value, json};

const MODELS: &str = r#"import Realm, { BSON, Types } from "realm";
class Task extends Realm.Object {
  _id = new BSON.ObjectId();
  @index title!: string;
  done = false;
  priority: Types.Int = 3;
  tags!: Types.Set<string>;
  static primaryKey = "_id";
}
"#;

fn task_json() -> Value {
    let output = Session::default().process_source("task.ts", MODELS).unwrap();
    serde_json::from_str(&to_json(&output.schemas).unwrap()).unwrap()
}

#[test]
fn extracted_schema_as_json() {
    assert_eq!(
        task_json(),
        json!([{
            "name": "Task",
            "properties": {
                "_id": { "type": "objectId", "default": { "source": "new BSON.ObjectId()" } },
                "title": { "type": "string", "indexed": true },
                "done": { "type": "bool", "default": false },
                "priority": { "type": "int", "default": 3 },
                "tags": { "type": "set", "objectType": "string" }
            },
            "primaryKey": "_id"
        }])
    );
}

#[test]
fn msgpack_matches_json() {
    let output = Session::default().process_source("task.ts", MODELS).unwrap();
    let bytes = Format::MessagePack.encode(&output.schemas).unwrap();
    let decoded: Value = rmp_serde::from_slice(&bytes).unwrap();
    assert_eq!(decoded, task_json());
}

#[test]
fn json_written_to_file() {
    let output = Session::default().process_source("task.ts", MODELS).unwrap();
    let path = std::env::temp_dir().join(format!("schemagen-task-{}.json", std::process::id()));
    save_to_file(&Format::Json.encode(&output.schemas).unwrap(), &path).unwrap();
    let written = std::fs::read_to_string(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert!(written.ends_with("]\n"));
    let value: Value = serde_json::from_str(&written).unwrap();
    assert_eq!(value, task_json());
}
