use anyhow::Result;
use varcalc::prelude::*;

fn main() -> Result<()> {
    let store = SessionStore::new();
    let inputs = [
        ("alice", "rate = 1.5; hours = 8"),
        ("bob", "rate = 2"),
        ("alice", "rate * hours"),
        ("bob", "rate * hours"),
    ];
    for (session, input) in inputs {
        println!("{:>5}> {}", session, input);
        match store.evaluate(Some(session), input) {
            Ok(value) => println!("{}", value),
            Err(e) => println!("error: {}", e),
        }
    }
    println!("alice: {:?}", store.snapshot(Some("alice"))?);
    Ok(())
}
