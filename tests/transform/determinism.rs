//! Property tests: the pass is a pure function of its input

use proptest::prelude::*;
use schemagen_transform::{TransformConfig, transform, transform_source};

fn declaration() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("name!: string;".to_string()),
        Just("age?: number = 42;".to_string()),
        Just("count: Types.Int = 0;".to_string()),
        Just("_id = new BSON.ObjectId();".to_string()),
        Just("created = new Date();".to_string()),
        Just("@index title!: string;".to_string()),
        Just("@mapTo(\"col\") value?: Types.Double;".to_string()),
        Just("tags!: Types.Set<string>;".to_string()),
        Just("items!: Types.List<Item | undefined>;".to_string()),
        Just("owner?: Person;".to_string()),
        Just("owners!: Realm.LinkingObjects<Person, \"items\">;".to_string()),
        Just("blob!: any;".to_string()),
        Just("static primaryKey = \"_id\";".to_string()),
        Just("static embedded = true;".to_string()),
        Just("get label() { return this.name; }".to_string()),
    ]
}

fn model_file() -> impl Strategy<Value = String> {
    (
        "[A-Z][a-z]{0,8}",
        prop::collection::vec(declaration(), 0..10),
        prop::bool::ANY,
    )
        .prop_map(|(name, members, exported)| {
            let export = if exported { "export " } else { "" };
            let body: String = members.iter().map(|m| format!("  {m}\n")).collect();
            format!(
                "import Realm, {{ BSON, Types }} from \"realm\";\n\n{export}class {name} extends Realm.Object {{\n{body}}}\n"
            )
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn repeated_runs_are_byte_identical(source in model_file()) {
        let config = TransformConfig::default();
        let first = transform_source(&source, &config).unwrap();
        let second = transform_source(&source, &config).unwrap();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.matches("static schema = {").count(), 1);
    }

    #[test]
    fn warnings_are_stable(source in model_file()) {
        let config = TransformConfig::default();
        let first = transform(&source, &config).unwrap();
        let second = transform(&source, &config).unwrap();
        prop_assert_eq!(first.warnings, second.warnings);
        prop_assert_eq!(first.schemas, second.schemas);
    }

    #[test]
    fn files_without_models_round_trip(body in "[a-z ;=0-9]{0,40}") {
        let source = format!("const x = 1;\nclass Plain {{ }}\n// {body}\n");
        let output = transform(&source, &TransformConfig::default()).unwrap();
        prop_assert!(output.is_unchanged());
        prop_assert_eq!(output.apply(&source).unwrap(), source);
    }
}
