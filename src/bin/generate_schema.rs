//! Generate JSON Schema for tweak catalog declarations
//!
//! This binary generates a JSON Schema from the CatalogDecl struct using
//! schemars, for validating catalog files in editors.
//!
//! Usage:
//!   cargo run --features dev-bins --bin generate_schema > tweaks-schema.json

use schemars::schema_for;
use tweaks::view::tweaks::CatalogDecl;

fn main() -> Result<(), serde_json::Error> {
    let schema = schema_for!(CatalogDecl);
    let output = serde_json::to_string_pretty(&schema)?;
    println!("{}", output);
    Ok(())
}
