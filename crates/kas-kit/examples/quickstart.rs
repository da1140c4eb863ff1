//! Quickstart - Essential KAS operations
//!
//! Covers: accounts, KIP-17 minting, token history, callbacks, raw invocation
//!
//! Run: cargo run --example quickstart
//!
//! Set environment variables first:
//!   KAS_CHAIN_ID=1001
//!   KAS_ACCESS_KEY_ID=...
//!   KAS_SECRET_ACCESS_KEY=...

use kas_kit::*;
use serde_json::json;

// ============================================================================
// 1. Wallet accounts
// ============================================================================

async fn wallet_example(kas: &Kas) -> Result<(), Error> {
    println!("=== Wallet Example ===\n");

    let wallet = kas.wallet()?;

    let count = wallet.account_count()?.await?;
    println!("This key manages {} accounts", count.count);

    let account = wallet.create_account()?.await?;
    println!("Created {}", account.address);

    Ok(())
}

// ============================================================================
// 2. KIP-17 tokens
// ============================================================================

async fn kip17_example(kas: &Kas, owner: &str) -> Result<(), Error> {
    println!("\n=== KIP-17 Example ===\n");

    let kip17 = kas.kip17()?;

    // Token ids accept integers, decimal strings or hex strings
    let tx = kip17
        .mint("quickstart-nft", owner, "42", "https://example.com/42.json")?
        .await?;
    println!("Mint submitted: {}", tx.transaction_hash);

    // Walk the contract's tokens a page at a time
    let mut options = QueryOptions::builder().size(10).build()?;
    loop {
        let page = kip17.token_list("quickstart-nft", options)?.await?;
        for token in &page.items {
            println!("  {} owned by {}", token.token_id, token.owner);
        }
        let Some(cursor) = page.next_cursor() else {
            break;
        };
        options = QueryOptions::builder().size(10).cursor(cursor).build()?;
    }

    Ok(())
}

// ============================================================================
// 3. Token history with a callback
// ============================================================================

async fn history_example(kas: &Kas) -> Result<(), Error> {
    println!("\n=== Token History Example ===\n");

    let options = QueryOptions::builder()
        .kind([TransferKind::Ft, TransferKind::Nft])
        .size(5)
        .build()?;

    // The callback fires before the future resolves
    let page = kas
        .token_history()?
        .transfer_history(["1"], options)?
        .callback(|err, data, _raw| match err {
            Some(err) => println!("callback saw an error: {err}"),
            None => println!("callback saw {} bytes", data.map_or(0, |d| d.to_string().len())),
        })
        .await?;
    println!("{} transfers on this page", page.items.len());

    Ok(())
}

// ============================================================================
// 4. Raw invocation by endpoint name
// ============================================================================

async fn raw_example(kas: &Kas) -> Result<(), Error> {
    println!("\n=== Raw Invocation Example ===\n");

    let response = kas
        .invoke_named("kip7.contract_list", args![json!({ "size": 3 })])?
        .await?;
    println!("{response:#}");

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let kas = Kas::from_env()?;

    let owner = std::env::var("KAS_OWNER_ADDRESS")
        .unwrap_or_else(|_| "0x60498fEFBF1705A3Db8d7Bb5c80D5238956343e5".to_string());

    wallet_example(&kas).await?;
    kip17_example(&kas, &owner).await?;
    history_example(&kas).await?;
    raw_example(&kas).await?;

    Ok(())
}
