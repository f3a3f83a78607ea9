// Build script for rythmctl - embeds version at compile time

fn main() {
    // Release pipelines may stamp their own version
    let version =
        std::env::var("RYTHM_VERSION").unwrap_or_else(|_| env!("CARGO_PKG_VERSION").to_string());

    println!("cargo:rustc-env=RYTHM_VERSION={}", version);
    println!("cargo:rerun-if-changed=Cargo.toml");
    println!("cargo:rerun-if-env-changed=RYTHM_VERSION");
}
