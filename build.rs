use std::{env, path::PathBuf};

fn warn(message: &str) {
    println!("cargo:warning={message}");
}

fn main() {
    for variable in ["FFMPEG_DIR", "VCPKG_ROOT", "VCPKGRS_DYNAMIC", "VCPKGRS_TRIPLET"] {
        println!("cargo:rerun-if-env-changed={variable}");
    }

    // ffmpeg-sys-next finds FFmpeg through pkg-config elsewhere; only Windows
    // needs a hint.
    if env::var("CARGO_CFG_TARGET_OS").unwrap_or_default() != "windows"
        || env::var_os("FFMPEG_DIR").is_some()
    {
        return;
    }

    let Ok(vcpkg_root) = env::var("VCPKG_ROOT") else {
        warn("FFMPEG_DIR is not set. Install FFmpeg with vcpkg and set VCPKG_ROOT and FFMPEG_DIR.");
        return;
    };

    let triplet = env::var("VCPKGRS_TRIPLET").unwrap_or_else(|_| "x64-windows".to_string());
    let ffmpeg_dir = PathBuf::from(vcpkg_root).join("installed").join(triplet);

    if !ffmpeg_dir.exists() {
        warn(&format!(
            "VCPKG_ROOT is set but no FFmpeg install was found at {}.",
            ffmpeg_dir.display()
        ));
        return;
    }

    warn(&format!(
        "Found vcpkg FFmpeg at {0}. Set FFMPEG_DIR={0} to skip this lookup.",
        ffmpeg_dir.display()
    ));
    if env::var_os("VCPKGRS_DYNAMIC").is_none() {
        warn("Set VCPKGRS_DYNAMIC=1 when linking against a dynamic vcpkg FFmpeg build.");
    }
}
