//! Build script - wires up the ESP-IDF build environment when the
//! embedded feature is enabled. Host (test) builds need nothing.

fn main() {
    if std::env::var_os("CARGO_FEATURE_EMBEDDED").is_some() {
        embuild::espidf::sysenv::output();
    }
    println!("cargo:rerun-if-changed=build.rs");
}
