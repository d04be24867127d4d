//! End-to-end extraction over snapshot fixtures.

use std::collections::HashMap;
use std::path::Path;

use compdoc::{ExtractOptions, Extractor, FixtureProgram};

fn load(name: &str) -> FixtureProgram {
    let path = format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name);
    FixtureProgram::from_path(Path::new(&path)).unwrap()
}

fn extract(program: &FixtureProgram, enum_literals: bool) -> Vec<compdoc::EntityDoc> {
    let opts = ExtractOptions {
        extract_literal_values_from_enum: enum_literals,
        name_resolver: None,
    };
    Extractor::with_options(program, opts)
        .with_working_dir("/home/dev/app")
        .extract(&program.module_names())
}

#[test]
fn button_snapshot_extracts_props() {
    let program = load("button.json");
    let docs = extract(&program, false);

    assert_eq!(docs.len(), 1);
    let button = &docs[0];
    // displayName assignment wins over the export's own name.
    assert_eq!(button.display_name, "FancyButton");
    assert_eq!(button.description, "A clickable button.\n@since 1.2");
    assert_eq!(button.props.len(), 3);

    let label = &button.props["label"];
    assert!(label.required);
    assert_eq!(label.ty.name, "string");
    assert_eq!(label.description, "Text shown inside the button.");
    let parent = label.parent.as_ref().unwrap();
    assert_eq!(parent.name, "ButtonProps");
    assert_eq!(parent.file_name, "app/src/Button.tsx");

    let on_click = &button.props["onClick"];
    assert!(!on_click.required);
    assert_eq!(on_click.default_value.as_ref().unwrap().value, "undefined");
    assert!(on_click.parent.is_none());
}

#[test]
fn button_snapshot_enum_literals() {
    let program = load("button.json");

    let docs = extract(&program, true);
    let variant = &docs[0].props["variant"].ty;
    assert_eq!(variant.name, "enum");
    assert_eq!(variant.raw.as_deref(), Some("\"primary\" | \"ghost\""));
    assert_eq!(variant.value.as_ref().unwrap().len(), 2);
    assert_eq!(variant.value.as_ref().unwrap()[0].value, "\"primary\"");

    // Off by default.
    let docs = extract(&program, false);
    assert_eq!(docs[0].props["variant"].ty.name, "\"primary\" | \"ghost\"");
}

#[test]
fn widget_snapshot_admission_and_methods() {
    let program = load("widget.json");
    let docs = extract(&program, false);

    let names: Vec<&str> = docs.iter().map(|d| d.display_name.as_str()).collect();
    // Class displayName member, a plain documented export, and the default
    // export named after its directory. The undocumented export is dropped.
    assert_eq!(names, ["Widget", "useWidget", "widget"]);

    let widget = &docs[0];
    assert!(widget.props.is_empty());

    let methods: Vec<&str> = widget.methods.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(methods, ["measure", "focus"]);

    let measure = &widget.methods[0];
    assert_eq!(measure.modifiers, ["static"]);
    assert!(measure.returns.is_none());
    assert_eq!(measure.description, "Measure the widget.");

    let focus = &widget.methods[1];
    assert!(focus.modifiers.is_empty());
    let returns = focus.returns.as_ref().unwrap();
    assert_eq!(returns.description.as_deref(), Some("nothing useful"));
    assert_eq!(returns.ty, "void");
    assert_eq!(focus.docblock, "Focus the widget.\n@public\n@returns nothing useful");
}

#[test]
fn dedup_snapshot_keeps_last_button() {
    let program = load("dedup.json");
    let docs = extract(&program, false);

    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].display_name, "Button");
    assert_eq!(docs[0].description, "Current button.");
}

#[test]
fn repeated_runs_are_byte_identical() {
    let program = load("button.json");

    let first = serde_json::to_string_pretty(&extract(&program, true)).unwrap();
    let second = serde_json::to_string_pretty(&extract(&program, true)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn required_implies_no_code_default() {
    let program = load("button.json");

    // Hand the property extractor a code-supplied default for `label`.
    let ex = Extractor::new(&program).with_working_dir("/home/dev/app");
    let members = vec![
        ("label".to_string(), compdoc::SymbolId(1)),
        ("onClick".to_string(), compdoc::SymbolId(2)),
    ];
    let mut defaults = HashMap::new();
    defaults.insert("label".to_string(), "\"Save\"".to_string());

    let props = ex.props_info(&members, &defaults);
    let label = &props["label"];
    assert!(!label.required);
    assert_eq!(label.default_value.as_ref().unwrap().value, "\"Save\"");

    for prop in props.values() {
        if prop.required {
            assert!(defaults.get(&prop.name).is_none());
        }
    }
}

#[test]
fn modules_processed_in_given_order() {
    let program = load("button.json");
    let ex = Extractor::new(&program).with_working_dir("/home/dev/app");

    // Unknown modules are skipped without disturbing the rest.
    let docs = ex.extract(&["src/Missing.tsx", "src/Button.tsx"]);
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].display_name, "FancyButton");
}
