use std::env;

fn main() {
    println!("cargo:rerun-if-env-changed=AXIDEV_IO_LIB_DIR");
    println!("cargo:rerun-if-env-changed=AXIDEV_IO_STATIC");

    // Nothing to link unless the real library is requested
    if env::var_os("CARGO_FEATURE_NATIVE").is_none() {
        return;
    }

    if let Some(dir) = env::var_os("AXIDEV_IO_LIB_DIR") {
        println!("cargo:rustc-link-search=native={}", dir.to_string_lossy());
    }

    let link_static = env::var("AXIDEV_IO_STATIC").is_ok_and(|v| v == "1" || v == "true");
    if !link_static {
        println!("cargo:rustc-link-lib=dylib=axidev_io");
        return;
    }

    println!("cargo:rustc-link-lib=static=axidev_io");

    // The static archive is C++ and pulls in the platform input stacks
    let target_os = env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();
    match target_os.as_str() {
        "linux" => {
            for lib in ["stdc++", "input", "udev", "xkbcommon", "pthread"] {
                println!("cargo:rustc-link-lib=dylib={lib}");
            }
        }
        "macos" => {
            println!("cargo:rustc-link-lib=dylib=c++");
            for framework in ["ApplicationServices", "Carbon", "Foundation", "CoreGraphics"] {
                println!("cargo:rustc-link-lib=framework={framework}");
            }
        }
        "windows" => {
            for lib in ["user32", "kernel32"] {
                println!("cargo:rustc-link-lib=dylib={lib}");
            }
        }
        other => {
            println!("cargo:warning=axidev-io has no static link recipe for target_os={other}");
        }
    }
}
