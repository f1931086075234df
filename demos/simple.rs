//! Parsing a document and reading values by dotted path.
//!
//! Run with: cargo run --example simple

use std::error::Error;
use toml_tree::parse;

const DOCUMENT: &str = r#"
# This is a TOML document.
title = "TOML Example"

[owner]
name = "Tom Preston-Werner"
dob = 1979-05-27T07:32:00-08:00

[database]
server = "192.168.1.1"
ports = [ 8001, 8001, 8002 ]
connection_max = 5000
enabled = true

[servers.alpha]
ip = "10.0.0.1"

[clients]
hosts = [
  "alpha",
  "omega"
]
"#;

fn main() -> Result<(), Box<dyn Error>> {
    let doc = parse(DOCUMENT)?;

    println!("title:     {:?}", doc.get_string("title")?);
    println!("owner:     {:?}", doc.get_string("owner.name")?);
    println!("born:      {:?}", doc.get_datetime("owner.dob")?);
    println!("ports:     {:?}", doc.get_list_of::<i64>("database.ports")?);
    println!("max conns: {:?}", doc.get_integer("database.connection_max")?);
    println!("enabled:   {:?}", doc.get_boolean("database.enabled")?);
    println!("alpha ip:  {:?}", doc.get_string("servers.alpha.ip")?);
    println!("hosts:     {:?}", doc.get_list_of::<String>("clients.hosts")?);

    // Missing keys are None, wrong kinds are errors
    println!("missing:   {:?}", doc.get_string("database.user")?);
    if let Err(e) = doc.get_string("database.enabled") {
        println!("mismatch:  {}", e);
    }

    // Sections are plain table views
    let database = doc.get_section("database")?.ok_or("no database section")?;
    println!("\nserver via section: {:?}", database.get_string("server")?);

    // Every value can be read back as text
    println!("ports as text: {:?}", doc.get_as_string("database.ports"));

    // Parse errors carry the offending line
    let bad = "a = 1\nb = [1, \"two\"]";
    if let Err(e) = parse(bad) {
        println!("\nerror on line {:?}: {}", e.line(), e);
    }

    Ok(())
}
