//! Build script that uses abi-codegen to generate Rust encoders
//! from the JSON interfaces in `abi/`.

use std::env;
use std::fs;
use std::path::Path;

use abi_codegen::targets::rust::{RustCodegenOptions, generate_many, generate_object_with_options};
use abi_schema::Interface;

fn load(path: &str) -> Interface {
    println!("cargo::rerun-if-changed={path}");
    let json = fs::read_to_string(path).unwrap();
    Interface::from_json(&json).unwrap()
}

fn main() {
    println!("cargo::rerun-if-changed=build.rs");

    let out_dir = env::var("OUT_DIR").unwrap();
    let out_dir = Path::new(&out_dir);

    // One free function per method of an interface without overloads.
    let token = load("abi/Token.abi.json");
    let code = generate_many(&token, abi_codegen::DEFAULT_PREFIX);
    fs::write(out_dir.join("token.rs"), code).unwrap();

    // With overloads the last definition of a name wins, both as free
    // functions and as an object.
    let overloaded = load("abi/Overloaded.abi.json");
    let code = generate_many(&overloaded, abi_codegen::DEFAULT_PREFIX);
    fs::write(out_dir.join("overloaded_fns.rs"), code).unwrap();
    let code = generate_object_with_options(&overloaded, &RustCodegenOptions::default());
    fs::write(out_dir.join("overloaded.rs"), code).unwrap();
}
