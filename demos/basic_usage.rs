// SPDX-License-Identifier: MIT OR Apache-2.0

//! Basic usage example for the convertex crate.
//!
//! This example demonstrates:
//! - Converting between primitives, strings, dates and byte arrays
//! - Must-succeed (`to`) versus try (`try_to`) conversions
//! - Null handling and nullable targets
//! - Semantic emptiness and canonical empty values
//!
//! To run this example:
//! ```bash
//! RUST_LOG=debug cargo run --example basic_usage
//! ```

use chrono::NaiveDate;
use convertex::convert_ex;
use convertex::prelude::*;

fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt::init();

    println!("=== convertex: Basic Usage ===\n");

    let converter = Converter::new();

    // Example 1: Numbers and text
    println!("--- Example 1: Numbers and Text ---");
    let port: u16 = converter.to("8080")?;
    println!("✓ \"8080\" as u16: {}", port);
    let amount: Decimal = converter.to("19.99")?;
    println!("✓ \"19.99\" as Decimal: {}", amount);
    let rounded: i32 = converter.to(2.5f64)?;
    println!("✓ 2.5 as i32 (banker's rounding): {}", rounded);
    let text: String = converter.to(42)?;
    println!("✓ 42 as String: {}", text);

    // Example 2: Lenient booleans
    println!("\n--- Example 2: Booleans ---");
    for input in ["true", " Yes ", "OK", "1", "no", "maybe"] {
        let flag: bool = converter.to(input)?;
        println!("  {:>8?} -> {}", input, flag);
    }

    // Example 3: Try conversions return None instead of failing
    println!("\n--- Example 3: Try Conversions ---");
    match converter.try_to::<u8>(300)? {
        Some(value) => println!("✓ 300 as u8: {}", value),
        None => println!("✗ 300 does not fit in a u8"),
    }
    match converter.to::<i32>("abc") {
        Ok(value) => println!("✓ \"abc\" as i32: {}", value),
        Err(e) => println!("✗ {}", e),
    }

    // Example 4: Dates
    println!("\n--- Example 4: Dates ---");
    let date: NaiveDate = converter.to("2024-03-01")?;
    println!("✓ \"2024-03-01\" as NaiveDate: {}", date);
    let text: String = converter.to(date)?;
    println!("✓ back to String: {}", text);

    // Example 5: Byte arrays
    println!("\n--- Example 5: Byte Arrays ---");
    let bytes: Vec<u8> = converter.to("héllo")?;
    println!("✓ \"héllo\" as UTF-8 bytes: {:?}", bytes);
    let text: String = converter.to(bytes)?;
    println!("✓ decoded again: {}", text);

    // Example 6: Null handling
    println!("\n--- Example 6: Null Handling ---");
    let zero: i32 = converter.to(Value::null())?;
    println!("✓ null as i32: {}", zero);
    let missing: Option<String> = converter.to_nullable(Value::null())?;
    println!("✓ null as Option<String>: {:?}", missing);
    let some: Option<i64> = converter.to_nullable(Some(7i32))?;
    println!("✓ Some(7) as Option<i64>: {:?}", some);
    println!("✓ try_to::<i32>(null): {:?}", converter.try_to::<i32>(Value::null())?);

    // Example 7: Emptiness
    println!("\n--- Example 7: Emptiness ---");
    let samples = [
        ("0", Value::from(0)),
        ("123", Value::from(123)),
        ("i32::MAX", Value::from(i32::MAX)),
        ("0i64", Value::from(0i64)),
        ("\"\"", Value::from("")),
        ("\" \"", Value::from(" ")),
        ("null", Value::null()),
    ];
    for (label, value) in &samples {
        println!("  is_empty({}) = {}", label, converter.is_empty(value));
    }
    println!(
        "  default empty NaiveDate: {:?}",
        converter.default_empty_value::<NaiveDate>()
    );

    // Example 8: The process-wide converter
    println!("\n--- Example 8: Free Functions ---");
    let value: f64 = convert_ex::to("3.25")?;
    println!("✓ convert_ex::to::<f64>(\"3.25\"): {}", value);
    println!(
        "✓ strategies: {}",
        convert_ex::converter().strategies().names().join(", ")
    );

    println!("\n=== Example Complete ===");

    Ok(())
}
