use serde_json::json;
use valchemy_core::{integer, object, string, Catalog};
use valchemy_json::validate_json;

fn main() {
    let schema = object()
        .props([
            ("name", string().length(1, 64).unwrap()),
            ("age", integer().nat().unwrap().optional()),
        ])
        .unwrap();

    let document = json!({ "name": "", "age": -3 });

    let validation = validate_json(&schema, &document);
    if validation.ok() {
        println!("document accepted");
    } else {
        for message in validation.messages(&Catalog::new()) {
            println!("{message}");
        }
    }
}
