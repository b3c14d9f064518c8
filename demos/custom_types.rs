// SPDX-License-Identifier: MIT OR Apache-2.0

//! Custom types example for the convertex crate.
//!
//! This example demonstrates:
//! - Describing enums and value types so strategies can convert them
//! - Type converters, operators and constructors
//! - Registering a custom strategy and reordering the chain
//! - Binary round trips through the bincode codec
//!
//! To run this example:
//! ```bash
//! cargo run --example custom_types
//! ```

use convertex::adapters::{ConvertibleStrategy, EnumStrategy};
use convertex::domain::BoxError;
use convertex::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Priority {
    Unset = 0,
    Low = 1,
    High = 5,
}

impl EnumType for Priority {
    fn members() -> Vec<(&'static str, Self)> {
        vec![
            ("Unset", Priority::Unset),
            ("Low", Priority::Low),
            ("High", Priority::High),
        ]
    }

    fn underlying(&self) -> i64 {
        *self as i64
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct Celsius(f64);

impl fmt::Display for Celsius {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°C", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct Ticket {
    id: u32,
    title: String,
}

#[derive(Clone, Debug, PartialEq)]
struct Hostname(String);

/// Parses `"host:port"` strings.
#[derive(Clone, Debug, PartialEq)]
struct Endpoint {
    host: String,
    port: u16,
}

struct EndpointConverter;

impl TypeConverter for EndpointConverter {
    fn can_convert_from(&self, source: &TypeKey) -> bool {
        *source == TypeKey::of::<String>()
    }

    fn convert_from(&self, value: &Value) -> std::result::Result<Value, BoxError> {
        let text = value.downcast_ref::<String>().ok_or("expected a string")?;
        let (host, port) = text
            .rsplit_once(':')
            .ok_or_else(|| format!("'{}' has no port", text))?;
        Ok(Value::new(Endpoint {
            host: host.to_string(),
            port: port.parse()?,
        }))
    }
}

/// Converts any `Ticket` to its title, ahead of every built-in strategy.
struct TicketTitle;

impl ConversionStrategy for TicketTitle {
    fn name(&self) -> &str {
        "ticket-title"
    }

    fn try_convert(
        &self,
        request: &ConversionRequest,
        _ctx: &ConversionContext<'_>,
    ) -> Result<ConversionOutcome> {
        if request.target_type() != TypeKey::of::<String>() {
            return Ok(ConversionOutcome::Decline);
        }
        Ok(request
            .value()
            .downcast_ref::<Ticket>()
            .map(|ticket| Value::from(ticket.title.clone()))
            .into())
    }
}

fn ticket_descriptor() -> TypeDescriptor {
    TypeDescriptor::builder::<Ticket>()
        .with_codec(BincodeCodec::<Ticket>::new())
        .build()
}

fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt::init();

    println!("=== convertex: Custom Types ===\n");

    let converter = Converter::builder()
        .with_type(TypeDescriptor::for_enum::<Priority>())
        .with_type(
            TypeDescriptor::builder::<Celsius>()
                .value_type()
                .with_display()
                .with_implicit_from(|c: &f64| Celsius(*c))
                .with_explicit_to(|c: &Celsius| c.0)
                .build(),
        )
        .with_type(
            TypeDescriptor::builder::<Hostname>()
                .with_constructor(|s: &String| Hostname(s.to_lowercase()))
                .build(),
        )
        .with_type(
            TypeDescriptor::builder::<Endpoint>()
                .with_converter(EndpointConverter)
                .build(),
        )
        .with_type(ticket_descriptor())
        .build()?;

    // Example 1: Enums by name and by number
    println!("--- Example 1: Enums ---");
    let high: Priority = converter.to("high")?;
    println!("✓ \"high\" as Priority: {:?}", high);
    let low: Priority = converter.to(1)?;
    println!("✓ 1 as Priority: {:?}", low);
    let name: String = converter.to(Value::new(Priority::High))?;
    println!("✓ Priority::High as String: {}", name);
    println!(
        "✓ try_to::<Priority>(3): {:?}",
        converter.try_to::<Priority>(3)?
    );
    println!(
        "✓ is_empty(Priority::Unset): {}",
        converter.is_empty(&Value::new(Priority::Unset))
    );

    // Example 2: Operators
    println!("\n--- Example 2: Operators ---");
    let warm: Celsius = converter.to(21.5f64)?;
    println!("✓ 21.5 as Celsius: {}", warm);
    let raw: f64 = converter.to(Value::new(warm))?;
    println!("✓ back to f64: {}", raw);
    println!(
        "✓ is_empty(Celsius(0.0)): {}",
        converter.is_empty(&Value::new(Celsius::default()))
    );

    // Example 3: Constructors and type converters
    println!("\n--- Example 3: Constructors and Converters ---");
    let host: Hostname = converter.to("Example.ORG")?;
    println!("✓ \"Example.ORG\" as Hostname: {}", host.0);
    let endpoint: Endpoint = converter.to("db.local:5432")?;
    println!(
        "✓ \"db.local:5432\" as Endpoint: host={} port={}",
        endpoint.host, endpoint.port
    );
    match converter.to::<Endpoint>("db.local:http") {
        Ok(endpoint) => println!("✓ {:?}", endpoint),
        Err(e) => println!("✗ {}", e),
    }

    // Example 4: Binary round trip
    println!("\n--- Example 4: Binary Round Trip ---");
    let ticket = Ticket {
        id: 7,
        title: "Fix the build".to_string(),
    };
    let bytes: Vec<u8> = converter.to(Value::new(ticket.clone()))?;
    println!("✓ Ticket encoded to {} bytes", bytes.len());
    let decoded: Ticket = converter.to(bytes)?;
    println!("✓ decoded: {:?}", decoded);

    // Example 5: Custom strategies
    println!("\n--- Example 5: Custom Strategies ---");
    match converter.to::<String>(Value::new(ticket.clone())) {
        Ok(text) => println!("✓ Ticket as String: {}", text),
        Err(e) => println!("✗ {}", e),
    }
    converter.register_strategy(Arc::new(TicketTitle), Position::Front)?;
    let title: String = converter.to(Value::new(ticket))?;
    println!("✓ with ticket-title registered: {}", title);

    // Example 6: Ordering decides the result
    println!("\n--- Example 6: Strategy Order ---");
    println!("  before: {}", converter.to::<String>(Value::new(Priority::Low))?);
    converter.unregister_strategy(ConvertibleStrategy::NAME);
    converter.register_strategy(
        Arc::new(ConvertibleStrategy),
        Position::before(EnumStrategy::NAME),
    )?;
    println!("  after:  {}", converter.to::<String>(Value::new(Priority::Low))?);
    println!("  chain:  {}", converter.strategies().names().join(", "));

    println!("\n=== Example Complete ===");

    Ok(())
}
