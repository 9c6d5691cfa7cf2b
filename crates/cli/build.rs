use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let mut cmd = clap::Command::new("postcraft")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Postcraft Contributors")
        .about("Turn a saved document page into a decorated social post")
        .arg(clap::arg!([INPUT] "HTML snapshot of the page, or '-' for stdin").default_value("-"))
        .arg(
            clap::arg!(-o --output <FILE> "Output file (default: stdout)")
                .value_name("FILE")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(
            clap::arg!(-f --format <FORMAT> "Output format (post, text, json)")
                .value_name("FORMAT")
                .default_value("post")
                .value_parser(["post", "text", "json"]),
        )
        .arg(
            clap::arg!(-c --config <FILE> "Configuration file")
                .value_name("FILE")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(clap::arg!(--seed <NUM> "Seed for decoration choices, for reproducible output"))
        .arg(clap::arg!(--"min-element-length" <NUM> "Minimum text length for a selector match to be accepted"))
        .arg(clap::arg!(--"min-length" <NUM> "Minimum extracted text length worth converting"))
        .arg(clap::arg!(--"source-url" <URL> "URL the snapshot was taken from").value_name("URL"))
        .arg(clap::arg!(-v --verbose "Enable debug logging"));

    clap_complete::generate_to(clap_complete::shells::Bash, &mut cmd, "postcraft", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Zsh, &mut cmd, "postcraft", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Fish, &mut cmd, "postcraft", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::PowerShell, &mut cmd, "postcraft", &completions_dir).unwrap();

    println!(
        "cargo:warning=Shell completions generated in: {}",
        completions_dir.display()
    );
}
