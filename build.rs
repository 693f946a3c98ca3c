use std::env;
use std::fs::File;
use std::path::Path;

fn main() {
    println!("cargo:rerun-if-changed=memory-app.x");

    // Host builds (unit tests, docs) link like any other Rust program
    if env::var("CARGO_CFG_TARGET_OS").as_deref() != Ok("none") {
        return;
    }

    // Create an empty memory.x file to satisfy the include in the main linker script
    let out_dir = env::var("OUT_DIR").unwrap();
    let dest_path = Path::new(&out_dir).join("memory.x");
    File::create(&dest_path).unwrap();

    // Add the output directory to the linker search path so `link.x` can find the empty `memory.x`
    println!("cargo:rustc-link-search={}", out_dir);

    // The real memory layout lives next to the manifest
    println!(
        "cargo:rustc-link-search={}",
        env::var("CARGO_MANIFEST_DIR").unwrap()
    );

    // Set linker flags for all binaries
    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bin=servoctl-rs=-Tmemory-app.x");

    // Main linker script, uses the memory layout from above
    println!("cargo:rustc-link-arg-bins=-Tlink.x");

    // defmt is always linked into the firmware image
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
}
