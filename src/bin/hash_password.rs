//! Print an argon2 hash suitable for the `users.password` column.
//!
//! Usage: `hash_password <plaintext>`

use cutiscura::auth::password::hash_password;

fn main() -> anyhow::Result<()> {
    let plain = std::env::args()
        .nth(1)
        .ok_or_else(|| anyhow::anyhow!("usage: hash_password <plaintext>"))?;
    println!("{}", hash_password(&plain)?);
    Ok(())
}
