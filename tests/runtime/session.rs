//! Integration tests for the session driver

use std::fs;
use std::path::PathBuf;

use schemagen_foundation::ErrorKind;
use schemagen_runtime::Session;
use schemagen_transform::TransformConfig;

const DOG: &str = r#"import Realm from "realm";
export class Dog extends Realm.Object {
  name!: string;
  owners!: Realm.LinkingObjects<Person, "dogs">;
}
"#;

const PERSON: &str = r#"import Realm from "realm";
export class Person extends Realm.Object {
  name!: string;
  dogs!: Realm.List<Dog>;
  extra!: unknown;
}
"#;

const BROKEN: &str = r#"import Realm from "realm";
export class Broken extends Realm.Object {
  owners?: Realm.LinkingObjects<Person, "dogs">;
}
"#;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("schemagen-{name}-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn processes_a_directory_of_files() {
    let dir = scratch_dir("session");
    let files = [("dog.ts", DOG), ("person.ts", PERSON), ("broken.ts", BROKEN)];
    for (name, contents) in files {
        fs::write(dir.join(name), contents).unwrap();
    }

    let mut session = Session::new(TransformConfig::default());
    let mut names = Vec::new();
    let mut failed = Vec::new();
    for (name, _) in files {
        match session.process_file(&dir.join(name)) {
            Ok(output) => names.extend(output.schemas.into_iter().map(|s| s.name)),
            Err(err) => failed.push((name, err)),
        }
    }
    fs::remove_dir_all(&dir).unwrap();

    assert_eq!(names, ["Dog", "Person"]);
    assert_eq!(failed.len(), 1);
    let (name, err) = &failed[0];
    assert_eq!(*name, "broken.ts");
    assert!(matches!(err.kind, ErrorKind::LinkingObjectsOptional { .. }));
    let context = err.context.as_ref().unwrap();
    assert!(context.source.as_deref().unwrap().ends_with("broken.ts"));
    assert_eq!(context.line, Some(3));

    let stats = session.stats();
    assert_eq!(stats.files, 3);
    assert_eq!(stats.transformed, 2);
    assert_eq!(stats.schemas, 2);
    assert_eq!(stats.warnings, 1);
    assert_eq!(stats.failures, 1);
}

#[test]
fn second_pass_rejects_generated_schema() {
    let mut session = Session::default();
    let output = session.process_source("dog.ts", DOG).unwrap();
    assert!(output.rendered.contains("static schema = {"));

    let err = session.process_source("dog.ts", &output.rendered).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::DuplicateSchemaStatic { .. }));
}

#[test]
fn unchanged_files_render_verbatim() {
    let source = "export const answer = 42;\n";
    let output = Session::default().process_source("plain.ts", source).unwrap();
    assert!(output.is_unchanged());
    assert_eq!(output.rendered, source);
}
