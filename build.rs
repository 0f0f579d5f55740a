//! Build script for detecting the X11 input stack and providing installation guidance.
//!
//! The pointer sink speaks the X11 protocol directly, but driving the real
//! cursor needs an X server with the XTest extension. Missing development
//! packages usually mean neither is installed, so they are reported here.

use std::env;
use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=PKG_CONFIG_PATH");

    if check_pkg_config() {
        // Only check on Linux
        if env::var("TARGET").unwrap_or_default().contains("linux") {
            check_library("x11", "libx11-dev");
            check_library("xtst", "libxtst-dev");
        }
    }

    println!(
        "cargo:rustc-env=BUILD_TARGET={}",
        env::var("TARGET").unwrap_or_default()
    );
}

fn check_library(name: &str, ubuntu_package: &str) {
    let output = Command::new("pkg-config").args(["--modversion", name]).output();

    match output {
        Ok(output) if output.status.success() => {
            let version = String::from_utf8_lossy(&output.stdout);
            println!("cargo:warning=Found {} version: {}", name, version.trim());
        }
        _ => {
            println!("cargo:warning={name} not found. Pointer control needs an X11 session with XTest; use --dry-run otherwise.");
            println!("cargo:warning=On Ubuntu: sudo apt-get install {ubuntu_package}");
        }
    }
}

fn check_pkg_config() -> bool {
    let output = Command::new("pkg-config").arg("--version").output();

    match output {
        Ok(output) if output.status.success() => true,
        _ => {
            println!("cargo:warning=pkg-config not found, skipping X11 library checks.");
            println!("cargo:warning=On Ubuntu: sudo apt-get install pkg-config");
            println!("cargo:warning=On macOS: brew install pkg-config");
            false
        }
    }
}
