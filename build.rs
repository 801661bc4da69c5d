//! Build script for bitdog-matrix.

use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rustc-check-cfg=cfg(rust_analyzer)");

    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR is set by cargo"));
    let target = env::var("TARGET").expect("TARGET is set by cargo");

    // The BitDogLab carries a Pico W (RP2040): copy memory-pico1w.x to OUT_DIR as memory.x.
    // Host builds (tests, PNG previews) need no linker script.
    if target.starts_with("thumbv6m") {
        let memory_x =
            fs::read_to_string("memory-pico1w.x").expect("Failed to read memory-pico1w.x");
        let dest = out_dir.join("memory.x");
        fs::write(&dest, memory_x).expect("Failed to write memory.x");
        println!("cargo:rustc-link-search={}", out_dir.display());
        println!("cargo:rerun-if-changed=memory-pico1w.x");
    }
    println!("cargo:rerun-if-changed=build.rs");
}
