use chrono::{FixedOffset, TimeZone, Utc};
use std::io::Cursor;
use toml_tree::{
    parse, parse_reader, to_string, Document, Error, Kind, Map, Node, Table, Value,
};

const EXAMPLE: &str = r#"
# This is a TOML document.

title = "TOML Example"

[owner]
name = "Tom Preston-Werner"
organization = "GitHub"
bio = "GitHub Cofounder & CEO\nLikes tater tots and beer."
dob = 1979-05-27T07:32:00Z # First class dates? Why not?

[database]
server = "192.168.1.1"
ports = [ 8001, 8001, 8002 ]
connection_max = 5000
enabled = true

[servers]

  # You can indent as you please. Tabs or spaces.
  [servers.alpha]
  ip = "10.0.0.1"
  dc = "eqdc10"

  [servers.beta]
  ip = "10.0.0.2"
  dc = "eqdc10"

[clients]
data = [ ["gamma", "delta"], [1, 2] ] # just an update to make sure parsers support it

# Line breaks are OK when inside arrays
hosts = [
  "alpha",
  "omega"
]
"#;

#[test]
fn test_get_string() {
    let doc = parse("mystring = \"This is a string\"").unwrap();
    assert_eq!(
        doc.get_string("mystring").unwrap(),
        Some("This is a string")
    );
}

#[test]
fn test_get_string_missing_key() {
    let doc = parse("mystring = \"This is a string\"").unwrap();
    assert_eq!(doc.get_string("someotherkey").unwrap(), None);
}

#[test]
fn test_get_string_with_key_group() {
    let doc = parse("[my.key.group]\nmystring = \"This is a string\"").unwrap();
    assert_eq!(
        doc.get_string("my.key.group.mystring").unwrap(),
        Some("This is a string")
    );
    assert_eq!(doc.get_string("my.key.group.missing").unwrap(), None);
    assert_eq!(doc.get_string("some.other.key").unwrap(), None);
}

#[test]
fn test_get_integer() {
    let doc = parse("[key.group]\nanumber = 333").unwrap();
    assert_eq!(doc.get_integer("key.group.anumber").unwrap(), Some(333));
    assert_eq!(doc.get_integer("a.missing.key").unwrap(), None);
}

#[test]
fn test_get_float() {
    let doc = parse("floatvalue = 372.9821").unwrap();
    let value = doc.get_float("floatvalue").unwrap().unwrap();
    assert!((value - 372.9821).abs() < 0.00001);
    assert_eq!(doc.get_float("missingfloatvalue").unwrap(), None);
}

#[test]
fn test_get_boolean() {
    let doc = parse("mybool = false").unwrap();
    assert_eq!(doc.get_boolean("mybool").unwrap(), Some(false));
    assert_eq!(doc.get_boolean("notmybool").unwrap(), None);
}

#[test]
fn test_get_datetime_utc() {
    let doc = parse("dob =  1979-05-27T07:32:12Z").unwrap();
    let dob = doc.get_datetime("dob").unwrap().unwrap();
    let expected = Utc.with_ymd_and_hms(1979, 5, 27, 7, 32, 12).unwrap();
    assert_eq!(dob, expected);
    assert_eq!(dob.offset().local_minus_utc(), 0);
    assert_eq!(
        doc.get_timestamp("dob").unwrap().unwrap().as_str(),
        "1979-05-27T07:32:12Z"
    );
    assert_eq!(doc.get_datetime("amissingdatetime").unwrap(), None);
}

#[test]
fn test_get_datetime_with_offset() {
    let doc = parse("dob=1979-05-27T07:32:00-08:00").unwrap();
    let dob = doc.get_datetime("dob").unwrap().unwrap();
    let offset = FixedOffset::west_opt(8 * 3600).unwrap();
    assert_eq!(*dob.offset(), offset);
    assert_eq!(
        dob,
        offset.with_ymd_and_hms(1979, 5, 27, 7, 32, 0).unwrap()
    );
}

#[test]
fn test_get_list_of_simple_array() {
    let doc = parse("array = [1, 2, 3]").unwrap();
    assert_eq!(
        doc.get_list_of::<i64>("array").unwrap(),
        Some(vec![1, 2, 3])
    );
    assert_eq!(doc.get_list_of::<i64>("missingarray").unwrap(), None);
}

#[test]
fn test_get_list_of_list() {
    let doc = parse(r#"superarray = [[1, 2, 3], ["one", "two", "three"]]"#).unwrap();
    let superarray: Vec<Vec<Value>> = doc.get_list_of("superarray").unwrap().unwrap();
    assert_eq!(superarray.len(), 2);

    let ints: Vec<i64> = superarray[0]
        .iter()
        .cloned()
        .map(i64::try_from)
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(ints, vec![1, 2, 3]);

    let strings: Vec<String> = superarray[1]
        .iter()
        .cloned()
        .map(String::try_from)
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(strings, vec!["one", "two", "three"]);
}

#[test]
fn test_get_list_of_tables() {
    let doc = parse(
        "[[products]]\n\
         name = \"Hammer\"\n\
         sku = 738594937\n\
         \n\
         [[products]]\n\
         \n\
         [[products]]\n\
         name = \"Nail\"\n\
         sku = 284758393\n\
         color = \"gray\"",
    )
    .unwrap();

    let products: Vec<Map> = doc.get_list_of("products").unwrap().unwrap();
    assert_eq!(products.len(), 3);

    assert_eq!(products[0].get("name"), Some(&Value::from("Hammer")));
    assert_eq!(products[0].get("sku"), Some(&Value::from(738594937)));

    assert_eq!(products[1].get("name"), None);
    assert_eq!(products[1].get("sku"), None);

    assert_eq!(products[2].get("name"), Some(&Value::from("Nail")));
    assert_eq!(products[2].get("sku"), Some(&Value::from(284758393)));
    assert_eq!(products[2].get("color"), Some(&Value::from("gray")));

    let sections = doc.get_sections("products").unwrap().unwrap();
    assert_eq!(sections[2].get_string("color").unwrap(), Some("gray"));
    assert!(sections[1].is_empty());
}

#[test]
fn test_full_example_document() {
    let doc = parse(EXAMPLE).unwrap();

    assert_eq!(doc.get_string("title").unwrap(), Some("TOML Example"));
    assert_eq!(
        doc.get_string("owner.bio").unwrap(),
        Some("GitHub Cofounder & CEO\nLikes tater tots and beer.")
    );
    assert_eq!(
        doc.get_list_of::<i64>("database.ports").unwrap(),
        Some(vec![8001, 8001, 8002])
    );
    assert_eq!(doc.get_integer("database.connection_max").unwrap(), Some(5000));
    assert_eq!(doc.get_string("servers.beta.ip").unwrap(), Some("10.0.0.2"));
    assert_eq!(
        doc.get_list_of::<String>("clients.hosts").unwrap(),
        Some(vec!["alpha".to_string(), "omega".to_string()])
    );

    let data = doc.get_list("clients.data").unwrap().unwrap();
    assert_eq!(data[0].kind(), Kind::Array);
    assert_eq!(data[1].as_array().unwrap()[1], Value::Integer(2));
}

#[test]
fn test_key_group_view() {
    let doc = parse(EXAMPLE).unwrap();
    let servers = doc.get_section("servers").unwrap().unwrap();
    let alpha = servers.get_section("alpha").unwrap().unwrap();
    assert_eq!(alpha.get_string("dc").unwrap(), Some("eqdc10"));

    let err = doc.get_section("title").unwrap_err();
    assert!(matches!(
        err,
        Error::TypeMismatch {
            expected: Kind::Table,
            found: Kind::String,
            ..
        }
    ));
}

#[test]
fn test_get_as_string() {
    let doc = parse(EXAMPLE).unwrap();
    assert_eq!(doc.get_as_string("title").as_deref(), Some("TOML Example"));
    assert_eq!(
        doc.get_as_string("database.ports").as_deref(),
        Some("[8001, 8001, 8002]")
    );
    assert_eq!(
        doc.get_as_string("owner.dob").as_deref(),
        Some("1979-05-27T07:32:00Z")
    );
    assert_eq!(doc.get_as_string("database.enabled").as_deref(), Some("true"));
}

#[test]
fn test_replace_string_then_render() {
    let mut doc = parse(EXAMPLE).unwrap();
    doc.replace_string("servers.alpha.ip", "10.0.0.9").unwrap();

    let rendered = to_string(&doc).unwrap();
    let again = parse(&rendered).unwrap();
    assert_eq!(again.get_string("servers.alpha.ip").unwrap(), Some("10.0.0.9"));
    assert_eq!(again, doc);
}

#[test]
fn test_parse_reader_matches_parse() {
    let from_stream = parse_reader(Cursor::new(EXAMPLE.as_bytes())).unwrap();
    let from_text = parse(EXAMPLE).unwrap();
    assert_eq!(from_stream, from_text);
}

#[test]
fn test_document_from_existing_tree() {
    let mut group = Table::new();
    group.insert("enabled", Node::boolean(true)).unwrap();
    let mut root = Table::new();
    root.insert("feature", Node::Table(group)).unwrap();

    let doc = Document::from(root);
    assert_eq!(doc.get_boolean("feature.enabled").unwrap(), Some(true));
    assert_eq!(doc.to_string(), "[feature]\nenabled = true\n");
}

#[test]
fn test_crlf_lines() {
    let doc = parse("a = 1\r\n[t]\r\nb = \"x\"\r\n").unwrap();
    assert_eq!(doc.get_string("t.b").unwrap(), Some("x"));
}

#[test]
fn test_serialize_to_json() {
    let doc = parse(EXAMPLE).unwrap();
    let json = serde_json::to_value(&*doc).unwrap();
    assert_eq!(json["database"]["ports"][2], 8002);
    assert_eq!(json["owner"]["dob"], "1979-05-27T07:32:00Z");
    assert_eq!(json["clients"]["data"][0][1], "delta");
}
