fn main() {
    // The freestanding binary provides its own entry point
    if std::env::var_os("CARGO_FEATURE_BIN").is_some() {
        println!("cargo:rustc-link-arg-bin=bbb-led-blink-nolibc=-nostartfiles");
    }
    println!("cargo:rerun-if-changed=build.rs");
}
