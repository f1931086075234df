//! Controlling the rendered layout with WriteOptions.
//!
//! Run with: cargo run --example custom_options

use std::error::Error;
use toml_tree::{parse, to_string, to_string_with_options, WriteOptions};

fn main() -> Result<(), Box<dyn Error>> {
    let mut doc = parse(
        "name = \"demo\"\nports = [8001, 8002]\n\
         [servers.alpha]\nip = \"10.0.0.1\"\n\
         [servers.alpha.limits]\nmax = 10\n\
         [[jobs]]\nid = 1\n[[jobs]]\nid = 2",
    )?;

    // Default layout: flush left, blank line before each header
    println!("Default:\n{}", to_string(&doc)?);

    // Nested bodies indented two spaces per level
    println!("Pretty:\n{}", to_string_with_options(&doc, WriteOptions::pretty())?);

    // Compact arrays, no spacing between sections
    let compact = WriteOptions::new()
        .with_spaced_arrays(false)
        .with_section_spacing(false);
    println!("Compact:\n{}", to_string_with_options(&doc, compact)?);

    // Edit in place, then write to stdout
    doc.replace_string("servers.alpha.ip", "10.0.0.42")?;
    println!("Edited:");
    doc.write_to(std::io::stdout())?;

    Ok(())
}
