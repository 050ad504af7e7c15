//! Nested records, collections, shared values and absent properties.
//!
//! Run with: cargo run --example records

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, BTreeSet};
use std::error::Error;
use std::io;
use std::rc::Rc;
use surf_writer::{surf_record, EmailAddress, SurfWriter, TelephoneNumber, MEDIA_TYPE};
use uuid::Uuid;

struct Address {
    street: String,
    city: String,
    postal_code: Option<String>,
}

surf_record!(Address {
    street,
    city,
    postal_code
});

struct Customer {
    id: Uuid,
    name: String,
    email: EmailAddress,
    phone: Option<TelephoneNumber>,
    address: Rc<Address>,
}

surf_record!(Customer {
    id,
    name,
    email,
    phone,
    address
});

struct Invoice {
    number: u64,
    issued: NaiveDate,
    customer: Customer,
    shipping: Rc<Address>,
    lines: Vec<InvoiceLine>,
    labels: BTreeSet<&'static str>,
    totals: BTreeMap<&'static str, Decimal>,
}

surf_record!(Invoice {
    number,
    issued,
    customer,
    shipping,
    lines,
    labels,
    totals,
});

struct InvoiceLine {
    description: String,
    quantity: u32,
    unit_price: Decimal,
}

surf_record!(InvoiceLine as "Line" {
    description,
    quantity,
    unit_price as "unitPrice",
});

fn main() -> Result<(), Box<dyn Error>> {
    let home = Rc::new(Address {
        street: "Rua das Flores 12".to_string(),
        city: "Recife".to_string(),
        postal_code: None,
    });

    let invoice = Invoice {
        number: 17,
        issued: NaiveDate::from_ymd_opt(2024, 5, 2).ok_or("invalid date")?,
        customer: Customer {
            id: Uuid::from_u128(0x6f1e_2c4a_9b7d_4e21_8c3f_5a0b_1d2e_3f40),
            name: "Jane Doe".to_string(),
            email: "jane@example.com".parse()?,
            phone: Some("+55 81 5555-0100".parse()?),
            address: Rc::clone(&home),
        },
        // the same address is written out in full wherever it appears
        shipping: home,
        lines: vec![
            InvoiceLine {
                description: "Widget".to_string(),
                quantity: 3,
                unit_price: Decimal::new(999, 2),
            },
            InvoiceLine {
                description: "Gadget".to_string(),
                quantity: 1,
                unit_price: Decimal::new(2450, 2),
            },
        ],
        labels: ["paid", "priority"].into_iter().collect(),
        totals: [("net", Decimal::new(5447, 2)), ("tax", Decimal::new(545, 2))]
            .into_iter()
            .collect(),
    };

    println!("Content-Type: {}\n", MEDIA_TYPE);
    SurfWriter::new().write_to(&invoice, io::stdout().lock())?;

    Ok(())
}
