//! Version information

/// `day1 <version>` plus the host os/arch
pub fn version_string() -> String {
    format!(
        "day1 {}\n  os/arch: {}/{}",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS,
        std::env::consts::ARCH
    )
}

pub fn run() {
    println!("{}", version_string());
}
