use std::io::BufRead;
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context};
use clap::{Args, Subcommand};
use flipbip_core::{
    DerivedKeySet, KeystoreFile, MemoryStore, MnemonicStrength, WalletConfig, WalletSession,
    MAX_ADDRESS_COUNT,
};
use flipbip_hd_key::{derive_addresses, parse_extended_key, EXTERNAL_CHAIN};
use rand::rngs::OsRng;
use tracing::debug;
use zeroize::Zeroizing;

use crate::output;

/// Resolved global options
pub struct Settings {
    config: WalletConfig,
    keystore_path: PathBuf,
    password: Option<Zeroizing<String>>,
    json: bool,
}

impl Settings {
    pub fn load(
        config_path: Option<PathBuf>,
        keystore: Option<PathBuf>,
        password: Option<String>,
        json: bool,
    ) -> anyhow::Result<Self> {
        let config = match &config_path {
            Some(path) => WalletConfig::load(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => WalletConfig::default(),
        };
        let keystore_path = keystore.unwrap_or_else(|| config.keystore.path.clone());
        debug!(keystore = %keystore_path.display(), "settings loaded");
        Ok(Self {
            config,
            keystore_path,
            password: password.map(Zeroizing::new),
            json,
        })
    }

    fn keystore(&self) -> anyhow::Result<KeystoreFile> {
        let password = self
            .password
            .as_ref()
            .ok_or_else(|| anyhow!("a keystore password is required (--password or FLIPBIP_PASSWORD)"))?;
        Ok(KeystoreFile::new(&self.keystore_path, password.as_str())
            .with_iterations(self.config.keystore.iterations))
    }

    fn session_config(&self, args: &DeriveArgs) -> anyhow::Result<WalletConfig> {
        let mut config = self.config.clone();
        if args.show_mnemonic {
            config.display_mnemonic = true;
        }
        if let Some(count) = args.count {
            config.address_count = count;
        }
        if let Some(account) = args.account {
            config.account = account;
        }
        config.validate()?;
        Ok(config)
    }
}

#[derive(Args)]
pub struct DeriveArgs {
    /// Coin ticker
    #[arg(long, default_value = "BTC")]
    coin: String,

    /// BIP-39 passphrase
    #[arg(long, default_value = "")]
    passphrase: String,

    /// BIP-44 account index
    #[arg(long)]
    account: Option<u32>,

    /// Number of addresses to show
    #[arg(long)]
    count: Option<u32>,

    /// Include the mnemonic in the output
    #[arg(long)]
    show_mnemonic: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create a new wallet and store its mnemonic
    Generate {
        /// Entropy bits: 128, 192 or 256
        #[arg(long)]
        strength: Option<u32>,

        /// Print the keys without touching the keystore
        #[arg(long)]
        dry_run: bool,

        #[command(flatten)]
        derive: DeriveArgs,
    },

    /// Store an existing mnemonic (read from stdin when not given)
    Import {
        #[arg(long)]
        phrase: Option<String>,

        #[command(flatten)]
        derive: DeriveArgs,
    },

    /// Show keys and addresses of the stored mnemonic
    View {
        #[command(flatten)]
        derive: DeriveArgs,
    },

    /// Check a mnemonic without storing it (read from stdin when not given)
    Validate { phrase: Option<String> },

    /// Addresses from an account or chain xpub, no private key needed
    Watch {
        xpub: String,

        #[arg(long, default_value = "BTC")]
        coin: String,

        /// First address index
        #[arg(long, default_value_t = 0)]
        start: u32,

        #[arg(long)]
        count: Option<u32>,
    },

    /// List the known coins
    Coins,
}

impl Command {
    pub fn run(self, settings: &Settings) -> anyhow::Result<()> {
        match self {
            Command::Generate {
                strength,
                dry_run,
                derive,
            } => {
                let config = settings.session_config(&derive)?;
                let strength = match strength {
                    Some(bits) => MnemonicStrength::try_from(bits)?,
                    None => config.strength,
                };
                let keys = if dry_run {
                    let mut session = WalletSession::new(MemoryStore::new(), config)?;
                    session.generate(&mut OsRng, strength, &derive.passphrase, &derive.coin)
                } else {
                    let mut session = WalletSession::new(settings.keystore()?, config)?;
                    session.generate(&mut OsRng, strength, &derive.passphrase, &derive.coin)
                };
                report(keys, settings)
            }
            Command::Import { phrase, derive } => {
                let phrase = phrase_or_stdin(phrase)?;
                let config = settings.session_config(&derive)?;
                let mut session = WalletSession::new(settings.keystore()?, config)?;
                report(
                    session.import(&phrase, &derive.passphrase, &derive.coin),
                    settings,
                )
            }
            Command::View { derive } => {
                let config = settings.session_config(&derive)?;
                let mut session = WalletSession::new(settings.keystore()?, config)?;
                report(session.view(&derive.passphrase, &derive.coin), settings)
            }
            Command::Validate { phrase } => {
                let phrase = phrase_or_stdin(phrase)?;
                match flipbip_mnemonics::check(&phrase) {
                    Ok(()) => {
                        output::print_validation(true, None, settings.json);
                        Ok(())
                    }
                    Err(e) => {
                        output::print_validation(false, Some(&e.to_string()), settings.json);
                        Err(anyhow!(e.status_message()))
                    }
                }
            }
            Command::Watch {
                xpub,
                coin,
                start,
                count,
            } => {
                let table = settings.config.coin_table()?;
                let coin = table.get(&coin)?;
                let count = count.unwrap_or(settings.config.address_count);
                if !(1..=MAX_ADDRESS_COUNT).contains(&count) {
                    bail!("count must be within 1..={MAX_ADDRESS_COUNT}");
                }
                let node = parse_extended_key(&xpub, coin.xprv_version, coin.xpub_version)?;
                let chain = match node.depth() {
                    3 => node.derive_normal(EXTERNAL_CHAIN)?,
                    4 => node,
                    depth => bail!("expected an account (depth 3) or chain (depth 4) key, got depth {depth}"),
                };
                let end = start
                    .checked_add(count)
                    .ok_or_else(|| anyhow!("address range overflows"))?;
                let addresses =
                    derive_addresses(&chain, coin, start..end, settings.config.eth_format())?;
                output::print_addresses(coin.ticker(), start, &addresses, settings.json);
                Ok(())
            }
            Command::Coins => {
                let table = settings.config.coin_table()?;
                output::print_coins(&table, settings.json)?;
                Ok(())
            }
        }
    }
}

fn report(keys: flipbip_core::Result<DerivedKeySet>, settings: &Settings) -> anyhow::Result<()> {
    match keys {
        Ok(keys) => output::print_keys(&keys, settings.json),
        Err(e) => Err(anyhow!("{}: {e}", e.status_message())),
    }
}

fn phrase_or_stdin(phrase: Option<String>) -> anyhow::Result<Zeroizing<String>> {
    if let Some(phrase) = phrase {
        return Ok(Zeroizing::new(phrase));
    }
    let mut line = Zeroizing::new(String::new());
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read mnemonic from stdin")?;
    Ok(line)
}
