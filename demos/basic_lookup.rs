//! Basic callsign lookup example
//!
//! Usage:
//! ```
//! QRZ_USERNAME=your_username QRZ_PASSWORD=your_password cargo run --example basic_lookup AA7BQ
//! ```

use std::env;

use qrz_lookup::SessionClient;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let username = env::var("QRZ_USERNAME")
        .map_err(|_| "QRZ_USERNAME environment variable not set")?;
    let password = env::var("QRZ_PASSWORD")
        .map_err(|_| "QRZ_PASSWORD environment variable not set")?;
    let callsign = env::args().nth(1).unwrap_or_else(|| "AA7BQ".to_string());

    let mut client = SessionClient::new()?;
    client.set_credentials(username, password);
    client.set_agent(concat!("basic-lookup/", env!("CARGO_PKG_VERSION")));

    if client.lookup(&callsign) {
        println!("Record for {}:", callsign);
        for (name, value) in client.record().iter() {
            println!("  {}: {}", name, value);
        }
        if !client.message().is_empty() {
            println!("\nQRZ message: {}", client.message());
        }
    } else {
        eprintln!("Lookup failed: {}", client.error());
    }

    Ok(())
}
