//! Lookup using a QRZ credentials file
//!
//! The file holds a `<QRZLookup>` block with `<User>`, `<Pass>`, and an
//! optional `<SessKey>`; any surrounding lines are ignored. A cached session
//! key is reused directly and refreshed automatically if the service rejects
//! it.
//!
//! Usage:
//! ```
//! cargo run --example credentials_file ~/.qrz-credentials AA7BQ
//! ```

use std::env;

use qrz_lookup::SessionClient;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = env::args().skip(1);
    let path = args.next().ok_or("usage: credentials_file <file> [callsign]")?;
    let callsign = args.next().unwrap_or_else(|| "AA7BQ".to_string());

    let mut client = SessionClient::new()?;
    if !client.load_credentials(&path) {
        return Err(format!("failed to load {}: {}", path, client.error()).into());
    }

    if client.session().is_active() {
        println!("Reusing cached session key");
    }

    if client.lookup(&callsign) {
        match client.field("call") {
            Some(call) => println!("Found: {}", call),
            None => println!("Lookup succeeded but record has no call field"),
        }
        for (name, value) in client.record().iter() {
            println!("  {}: {}", name, value);
        }
    } else {
        eprintln!("Lookup failed: {}", client.error());
    }

    Ok(())
}
