use std::fs;
use std::path::Path;
use std::process::Command;

fn main() {
    // Build number is stamped by the release job; local builds report 0
    let build_number = fs::read_to_string(Path::new("BUILD_NUMBER"))
        .ok()
        .and_then(|s| s.trim().parse::<u64>().ok())
        .unwrap_or(0);

    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "debug".to_string());
    let target = std::env::var("TARGET").unwrap_or_else(|_| "unknown".to_string());

    let git_hash = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string());

    println!("cargo:rustc-env=PARCHACHA_VERSION={}", env!("CARGO_PKG_VERSION"));
    println!("cargo:rustc-env=PARCHACHA_BUILD={}", build_number);
    println!(
        "cargo:rustc-env=PARCHACHA_PROFILE={}",
        if profile == "release" { "release" } else { "development" }
    );
    println!("cargo:rustc-env=PARCHACHA_TARGET={}", target);
    println!("cargo:rustc-env=PARCHACHA_GIT_HASH={}", git_hash);

    println!("cargo:rerun-if-changed=BUILD_NUMBER");
    println!("cargo:rerun-if-env-changed=PROFILE");
}
