//! Example compiling JSON Schema files and printing the generated structs.
//!
//! Run with: `cargo run --example compile -- schemas/*.json`
//!
//! Without arguments a small built-in pair of documents is compiled.

use anyhow::Context;
use std::path::Path;
use structgen::prelude::*;

const ORDER_SCHEMA: &str = r##"{
    "$id": "orders",
    "title": "Order",
    "type": "object",
    "required": ["id", "customer"],
    "properties": {
        "id": { "type": "string" },
        "customer": { "$ref": "customers#/definitions/customer" },
        "lines": { "type": "array", "items": { "$ref": "#/definitions/line" } },
        "metadata": { "type": "object", "additionalProperties": { "type": "string" } }
    },
    "definitions": {
        "line": {
            "type": "object",
            "properties": {
                "sku": { "type": "string" },
                "quantity": { "type": "integer" },
                "price": { "type": "number" }
            }
        }
    }
}"##;

const CUSTOMER_SCHEMA: &str = r##"{
    "$id": "customers",
    "type": "array",
    "items": { "$ref": "#/definitions/customer" },
    "definitions": {
        "customer": {
            "title": "Customer",
            "type": "object",
            "properties": {
                "name": { "type": "string" },
                "referrer": { "$ref": "#/definitions/customer" }
            }
        }
    }
}"##;

fn main() -> anyhow::Result<()> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let paths: Vec<String> = std::env::args().skip(1).collect();
    let documents = if paths.is_empty() {
        vec![
            parse_document("orders", ORDER_SCHEMA)?,
            parse_document("customers", CUSTOMER_SCHEMA)?,
        ]
    } else {
        paths
            .iter()
            .map(|path| {
                parse_document_file(Path::new(path))
                    .with_context(|| format!("failed to load schema {path}"))
            })
            .collect::<anyhow::Result<Vec<_>>>()?
    };

    let structs = Compiler::new()
        .collision_policy(CollisionPolicy::Disambiguate)
        .compile(&documents)
        .context("compilation failed")?;

    for definition in structs.values() {
        println!("// {} ({})", definition.name, definition.origin);
        println!("type {} struct {{", definition.name);
        for field in definition.fields.values() {
            let tag = if field.required || field.json_name == "-" {
                field.json_name.clone()
            } else {
                format!("{},omitempty", field.json_name)
            };
            println!("    {} {} `json:\"{}\"`", field.name, field.ty, tag);
        }
        println!("}}\n");
    }

    println!("{} struct(s) generated", structs.len());
    Ok(())
}
