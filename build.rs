//! Build-time hints for locating FFmpeg.
//!
//! Linking is handled by `ffmpeg-next`. On Windows, where FFmpeg usually
//! comes from vcpkg, this only warns when the install cannot be found.

use std::{env, path::PathBuf};

const DEFAULT_VCPKG_TRIPLET: &str = "x64-windows";

fn main() {
    for variable in ["FFMPEG_DIR", "VCPKG_ROOT", "VCPKGRS_DYNAMIC", "VCPKGRS_TRIPLET"] {
        println!("cargo:rerun-if-env-changed={variable}");
    }

    if env::var("CARGO_CFG_TARGET_OS").as_deref() != Ok("windows")
        || env::var_os("FFMPEG_DIR").is_some()
    {
        return;
    }

    let Some(vcpkg_root) = env::var_os("VCPKG_ROOT") else {
        println!(
            "cargo:warning=frame-export needs FFmpeg. Set FFMPEG_DIR, or install FFmpeg with vcpkg and set VCPKG_ROOT."
        );
        return;
    };

    let triplet =
        env::var("VCPKGRS_TRIPLET").unwrap_or_else(|_| DEFAULT_VCPKG_TRIPLET.to_string());
    let install_dir = PathBuf::from(vcpkg_root).join("installed").join(&triplet);

    if !install_dir.exists() {
        println!(
            "cargo:warning=No vcpkg FFmpeg found for triplet {triplet} under {}.",
            install_dir.display(),
        );
        return;
    }

    println!(
        "cargo:warning=Using vcpkg FFmpeg at {0}. Set FFMPEG_DIR={0} to skip this lookup.",
        install_dir.display(),
    );
    if env::var_os("VCPKGRS_DYNAMIC").is_none() {
        println!("cargo:warning=Set VCPKGRS_DYNAMIC=1 if that FFmpeg build is dynamic.");
    }
}
