//! Host platform identifiers in the naming used by published archives
//! (`linux`/`darwin`/`windows`, `amd64`/`arm64`/`386`).

/// Map a Rust `target_os` name to the archive naming.
pub fn os_name(rust_os: &str) -> &str {
    match rust_os {
        "macos" => "darwin",
        other => other,
    }
}

/// Map a Rust `target_arch` name to the archive naming.
pub fn arch_name(rust_arch: &str) -> &str {
    match rust_arch {
        "x86_64" => "amd64",
        "x86" => "386",
        "aarch64" => "arm64",
        "powerpc64" => "ppc64",
        "loongarch64" => "loong64",
        other => other,
    }
}

/// OS identifier of the running host.
pub fn host_os() -> &'static str {
    os_name(std::env::consts::OS)
}

/// Architecture identifier of the running host.
pub fn host_arch() -> &'static str {
    arch_name(std::env::consts::ARCH)
}
