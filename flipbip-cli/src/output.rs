use flipbip_core::{CoinTable, DerivedKeySet};
use serde_json::json;

pub fn print_keys(keys: &DerivedKeySet, as_json: bool) -> anyhow::Result<()> {
    if as_json {
        let addresses: Vec<_> = keys
            .addresses
            .iter()
            .enumerate()
            .map(|(i, address)| json!({ "path": keys.address_path(i), "address": address }))
            .collect();
        let value = json!({
            "coin": keys.coin,
            "path": keys.path,
            "mnemonic": keys.mnemonic,
            "xprv_root": keys.xprv_root,
            "xprv_account": keys.xprv_account,
            "xpub_account": keys.xpub_account,
            "xprv_chain": keys.xprv_chain,
            "xpub_chain": keys.xpub_chain,
            "addresses": addresses,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("Coin:          {}", keys.coin);
    if let Some(mnemonic) = &keys.mnemonic {
        println!("Mnemonic:      {mnemonic}");
    }
    println!("Root xprv:     {}", keys.xprv_root);
    println!("Account xprv:  {}", keys.xprv_account);
    println!("Account xpub:  {}", keys.xpub_account);
    println!("Chain xprv:    {}", keys.xprv_chain);
    println!("Chain xpub:    {}", keys.xpub_chain);
    println!();
    for (i, address) in keys.addresses.iter().enumerate() {
        println!("{:<20} {address}", keys.address_path(i));
    }
    Ok(())
}

pub fn print_addresses(coin: &str, start: u32, addresses: &[String], as_json: bool) {
    if as_json {
        let list: Vec<_> = addresses
            .iter()
            .zip(start..)
            .map(|(address, index)| json!({ "index": index, "address": address }))
            .collect();
        println!("{}", json!({ "coin": coin, "addresses": list }));
        return;
    }
    for (address, index) in addresses.iter().zip(start..) {
        println!("{index:>4}  {address}");
    }
}

pub fn print_validation(valid: bool, reason: Option<&str>, as_json: bool) {
    if as_json {
        println!("{}", json!({ "valid": valid, "reason": reason }));
    } else if valid {
        println!("Mnemonic is valid");
    } else {
        println!("Mnemonic is NOT valid: {}", reason.unwrap_or("unknown reason"));
    }
}

pub fn print_coins(table: &CoinTable, as_json: bool) -> anyhow::Result<()> {
    if as_json {
        let coins: Vec<_> = table.iter().collect();
        println!("{}", serde_json::to_string_pretty(&coins)?);
        return Ok(());
    }
    for coin in table.iter() {
        println!("{:<6} {:<12} m/44'/{}'", coin.ticker, coin.name, coin.bip44_coin_index);
    }
    Ok(())
}
