use std::env;
use std::fs;
use std::path::Path;

fn main() {
    println!("cargo:rerun-if-changed=config.toml");

    // OUT_DIR is target/<profile>/build/<pkg>/out, the binary sits three levels up
    let out_dir = env::var("OUT_DIR").unwrap();
    let dest_dir = Path::new(&out_dir)
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .parent()
        .unwrap();

    // Copy config.toml next to the executable
    fs::copy("config.toml", dest_dir.join("config.toml")).unwrap();
}
