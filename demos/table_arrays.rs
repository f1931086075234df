//! Repeated `[[section]]` headers and nested table arrays.
//!
//! Run with: cargo run --example table_arrays

use std::error::Error;
use toml_tree::{parse, to_string, Map};

const CATALOG: &str = r#"
[[products]]
name = "Hammer"
sku = 738594937

[[products]]

[[products]]
name = "Nail"
sku = 284758393
color = "gray"

[[fruit]]
name = "apple"

  [[fruit.variety]]
  name = "red delicious"

  [[fruit.variety]]
  name = "granny smith"

[[fruit]]
name = "banana"

  [[fruit.variety]]
  name = "plantain"
"#;

fn main() -> Result<(), Box<dyn Error>> {
    let doc = parse(CATALOG)?;

    // Each entry detached as a map of values
    let products: Vec<Map> = doc.get_list_of("products")?.unwrap_or_default();
    println!("{} products", products.len());
    for (i, product) in products.iter().enumerate() {
        let name = product.get("name").and_then(|v| v.as_str()).unwrap_or("<unnamed>");
        println!("  #{}: {} ({} keys)", i + 1, name, product.len());
    }

    // Or borrowed as section views
    for fruit in doc.get_sections("fruit")?.unwrap_or_default() {
        let varieties = fruit.get_sections("variety")?.unwrap_or_default();
        let names: Vec<&str> = varieties
            .iter()
            .filter_map(|v| v.get_string("name").ok().flatten())
            .collect();
        println!("{:?}: {:?}", fruit.get_string("name")?, names);
    }

    println!("\nRendered:\n{}", to_string(&doc)?);
    Ok(())
}
