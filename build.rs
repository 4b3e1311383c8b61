use std::{env, fs, path::PathBuf};

/// `[package]` fields exported as constants, with their fallbacks.
const EXPORTED: &[(&str, &str, &str)] = &[
    ("PKG_NAME", "name", "wellness-tracker"),
    ("PKG_VERSION", "version", "0.0.0"),
    ("PKG_DESCRIPTION", "description", ""),
];

fn main() {
    let manifest =
        PathBuf::from(env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR not set"))
            .join("Cargo.toml");
    println!("cargo:rerun-if-changed={}", manifest.display());

    let text = fs::read_to_string(&manifest)
        .unwrap_or_else(|e| panic!("Failed to read {}: {e}", manifest.display()));
    let manifest: toml::Table =
        toml::from_str(&text).unwrap_or_else(|e| panic!("Failed to parse Cargo.toml: {e}"));
    let package = manifest
        .get("package")
        .and_then(toml::Value::as_table)
        .expect("Cargo.toml missing [package]");

    let rendered: String = EXPORTED
        .iter()
        .map(|(constant, field, fallback)| {
            let value = package
                .get(*field)
                .and_then(toml::Value::as_str)
                .unwrap_or(fallback);
            format!("pub const {constant}: &str = {value:?};\n")
        })
        .collect();

    let out = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR not set")).join("pkg_info.rs");
    fs::write(&out, rendered).expect("Failed to write pkg_info.rs");
}
