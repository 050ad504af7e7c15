//! Writing a record and a list as SURF.
//!
//! Run with: cargo run --example simple

use std::error::Error;
use surf_writer::{surf_record, to_string, to_string_pretty, to_value};

struct User {
    id: u32,
    name: String,
    email: Option<String>,
}

surf_record!(User { id, name, email });

fn main() -> Result<(), Box<dyn Error>> {
    let users = vec![
        User {
            id: 42,
            name: "Alice Johnson".to_string(),
            email: Some("alice@example.com".to_string()),
        },
        User {
            id: 43,
            name: "Bob Smith".to_string(),
            email: None,
        },
    ];

    println!("Formatted SURF:\n{}", to_string_pretty(&users)?);
    println!("Compact SURF:\n{}\n", to_string(&users)?);

    // Bob has no email, so his object has no email property at all
    let document = to_value(&users)?.ok_or("no document")?;
    if let Some(list) = document.as_list() {
        for user in list.iter().filter_map(|u| u.as_object()) {
            let names: Vec<_> = user.property_names().collect();
            println!("{} properties: {:?}", user.type_name(), names);
        }
    }

    Ok(())
}
