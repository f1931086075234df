//! Loading a config struct through serde.
//!
//! Run with: cargo run --example typed_config

use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::error::Error;
use toml_tree::from_str;

#[derive(Debug, Deserialize)]
struct Config {
    title: String,
    owner: Owner,
    database: Database,
    servers: BTreeMap<String, Server>,
    #[serde(default)]
    products: Vec<Product>,
}

#[derive(Debug, Deserialize)]
struct Owner {
    name: String,
    dob: DateTime<FixedOffset>,
}

#[derive(Debug, Deserialize)]
struct Database {
    server: String,
    ports: Vec<u16>,
    connection_max: u32,
    enabled: bool,
}

#[derive(Debug, Deserialize)]
struct Server {
    ip: String,
    dc: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Product {
    name: Option<String>,
    sku: Option<u64>,
}

const CONFIG: &str = r#"
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
dc = "eqdc10"

[servers.beta]
ip = "10.0.0.2"

[[products]]
name = "Hammer"
sku = 738594937

[[products]]
name = "Nail"
"#;

fn main() -> Result<(), Box<dyn Error>> {
    let config: Config = from_str(CONFIG)?;

    println!("{}", config.title);
    println!("owner {} born {}", config.owner.name, config.owner.dob.to_rfc2822());
    println!(
        "database {} on {:?} (max {}, enabled {})",
        config.database.server,
        config.database.ports,
        config.database.connection_max,
        config.database.enabled
    );
    for (name, server) in &config.servers {
        println!("server {}: {} in {:?}", name, server.ip, server.dc);
    }
    for product in &config.products {
        println!("product {:?} sku {:?}", product.name, product.sku);
    }

    Ok(())
}
