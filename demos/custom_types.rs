//! Teaching the transformer about application types.
//!
//! A type registered with the classifier is written as a native value instead
//! of being broken down into an object. A hand-written `Reflect` impl can
//! compute properties or refuse to be read.
//!
//! Run with: cargo run --example custom_types

use std::any::Any;
use std::error::Error;
use std::net::IpAddr;
use std::sync::Arc;
use surf_writer::{
    surf_record, Classifier, PropertyVisitor, Reflect, Result as SurfResult, SurfValue, SurfWriter,
    TransformOptions, Transformer,
};

/// Money stored as cents, written as a SURF decimal.
#[derive(Clone, Copy)]
struct Cents(i64);

impl Reflect for Cents {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

struct Host {
    address: IpAddr,
    port: u16,
}

impl Reflect for Host {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn introspect(&self, visitor: &mut dyn PropertyVisitor) -> SurfResult<()> {
        visitor.visit_property("address", &self.address.to_string())?;
        visitor.visit_property("port", &self.port)?;
        visitor.visit_property("secure", &(self.port == 443))
    }
}

struct Service {
    name: String,
    host: Host,
    monthly_cost: Cents,
}

surf_record!(Service {
    name,
    host,
    monthly_cost
});

fn main() -> std::result::Result<(), Box<dyn Error>> {
    let classifier = Classifier::new().with::<Cents>(|cents| {
        SurfValue::Decimal(rust_decimal::Decimal::new(cents.0, 2))
    });
    let transformer = Transformer::with_classifier(Arc::new(classifier))
        .with_options(TransformOptions::new().with_max_depth(16));
    let writer = SurfWriter::new().with_transformer(transformer);

    let service = Service {
        name: "billing".to_string(),
        host: Host {
            address: "10.0.0.7".parse()?,
            port: 443,
        },
        monthly_cost: Cents(129_900),
    };

    match writer.render(&service)? {
        Some(surf) => print!("{}", surf),
        None => println!("(nothing to write)"),
    }

    Ok(())
}
