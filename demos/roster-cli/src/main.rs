//! Terminal roster — a stand-in for the view layer.
//!
//! Restores (or completes) a session, prints the user directory, and
//! re-prints it whenever the live presence set changes. Endpoints come
//! from `ROLLCALL_*` environment variables; see `rollcall::Config`.

use rollcall::prelude::*;

#[tokio::main]
async fn main() -> Result<(), RollcallError> {
    tracing_subscriber::fmt::init();

    let mut client = RollcallClient::new(Config::from_env(), MemoryStore::new());

    // A MemoryStore never has a persisted record on a fresh run, so
    // this normally goes through the profile fetch.
    if client.startup().is_none() {
        match client.complete_sign_in().await {
            Ok(identity) => {
                println!("Welcome, {}!", identity.display_name);
            }
            Err(error) => {
                eprintln!("sign-in failed: {error}");
                eprintln!("start a provider session in your browser first:");
                if let Some(url) = client.sign_in_url(Provider::Google) {
                    eprintln!("  Google: {url}");
                }
                if let Some(url) = client.sign_in_url(Provider::Github) {
                    eprintln!("  GitHub: {url}");
                }
                return Ok(());
            }
        }
    }

    let roster = client.directory().fetch().await;
    let presence = client.open_presence()?;
    let mut online = presence.presence();

    render(&roster, &online.borrow().clone());

    loop {
        tokio::select! {
            changed = online.changed() => {
                if changed.is_err() {
                    break;
                }
                let set = online.borrow_and_update().clone();
                render(&roster, &set);
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    presence.shutdown().await?;
    Ok(())
}

fn render(roster: &[DirectoryEntry], online: &PresenceSet) {
    println!("— roster ({} users) —", roster.len());
    for entry in roster {
        // Live presence wins; the static hint fills in for seed people.
        let is_online = online.contains(&entry.id) || entry.online_hint;
        let mark = if is_online { "●" } else { "○" };
        println!("{mark} {:<24} [{}]", entry.name, entry.provider);
    }
}
