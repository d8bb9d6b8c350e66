use valchemy_core::{array_of, integer, object, string, Catalog, Value};

fn main() {
    let schema = object()
        .props([
            ("host", string().length(1, 255).unwrap()),
            ("port", integer().between(1, 65535).unwrap()),
            ("tags", array_of(string().slug().unwrap()).optional()),
        ])
        .unwrap();

    let config = Value::object([
        ("host", Value::from("example.com")),
        ("port", Value::from(99999)),
        ("tags", Value::from(vec!["ok", "Not A Slug"])),
    ]);

    let validation = schema.validate_at(&config, "config");
    for message in validation.messages(&Catalog::new()) {
        println!("{message}");
    }
}
