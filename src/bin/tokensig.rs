use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use tracing::level_filters::LevelFilter;
use tracing::{error, info};

use tokensig::{
    api::{DigestMechanism, KeySelector, Pin, SelectionPolicy, SignatureMechanism, SlotSelector},
    prompt::prompt_pin,
    RunConfig, RunEvent,
};

#[derive(Parser, Debug)]
#[command(name = "tokensig")]
#[command(about = "Digest, sign and verify with a PKCS#11 token", version)]
pub struct Cli {
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Path to the PKCS#11 driver (.so/.dll/.dylib)
    #[arg(long, env = "TOKENSIG_MODULE")]
    pub module: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in, digest a message, find the key pair, sign and verify
    Run(RunArgs),

    /// List slots that hold a token
    Slots,
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Slot ID to open. Uses the first slot with a token if not provided
    #[arg(long, env = "TOKENSIG_SLOT")]
    slot: Option<u64>,

    /// User PIN. Prompted for if not provided
    #[arg(long, env = "TOKENSIG_PIN", hide_env_values = true)]
    pin: Option<String>,

    /// Only use keys with this CKA_LABEL
    #[arg(long, env = "TOKENSIG_KEY_LABEL")]
    key_label: Option<String>,

    /// Only use keys with this CKA_ID (hex)
    #[arg(long, env = "TOKENSIG_KEY_ID")]
    key_id: Option<String>,

    /// Take the first key the token returns instead of requiring exactly one
    #[arg(long)]
    first_match: bool,

    /// Message hashed on the token
    #[arg(long, default_value = "Hello World.")]
    digest_message: String,

    /// Message signed and verified on the token
    #[arg(long, default_value = "Hello World. again")]
    sign_message: String,

    /// Digest mechanism
    #[arg(long, default_value = "sha256")]
    digest: DigestArg,

    /// Signature mechanism (RSA PKCS#1 v1.5 with the given hash)
    #[arg(long, default_value = "sha256-rsa-pkcs")]
    mechanism: MechanismArg,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DigestArg {
    Sha256,
    Sha384,
    Sha512,
}

impl From<DigestArg> for DigestMechanism {
    fn from(arg: DigestArg) -> Self {
        match arg {
            DigestArg::Sha256 => DigestMechanism::Sha256,
            DigestArg::Sha384 => DigestMechanism::Sha384,
            DigestArg::Sha512 => DigestMechanism::Sha512,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum MechanismArg {
    Sha256RsaPkcs,
    Sha384RsaPkcs,
    Sha512RsaPkcs,
}

impl From<MechanismArg> for SignatureMechanism {
    fn from(arg: MechanismArg) -> Self {
        match arg {
            MechanismArg::Sha256RsaPkcs => SignatureMechanism::Sha256RsaPkcs,
            MechanismArg::Sha384RsaPkcs => SignatureMechanism::Sha384RsaPkcs,
            MechanismArg::Sha512RsaPkcs => SignatureMechanism::Sha512RsaPkcs,
        }
    }
}

fn build_config(module: PathBuf, args: RunArgs) -> anyhow::Result<RunConfig> {
    let slot = SlotSelector::from_id(args.slot);

    let pin = match args.pin {
        Some(pin) => Pin::from_str(&pin).map_err(|e| anyhow::anyhow!("Invalid PIN: {}", e))?,
        None => prompt_pin(&slot.to_string())?,
    };

    let key_selector = KeySelector::from_hex_id(args.key_label, args.key_id.as_deref())
        .context("invalid key selector")?;

    let mut config = RunConfig::new(module, slot, pin);
    config.key_selector = key_selector;
    config.selection_policy = if args.first_match {
        SelectionPolicy::FirstMatch
    } else {
        SelectionPolicy::ExactlyOne
    };
    config.digest_message = args.digest_message.into_bytes();
    config.sign_message = args.sign_message.into_bytes();
    config.digest_mechanism = args.digest.into();
    config.signature_mechanism = args.mechanism.into();
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // fatal errors are reported even when quieted
    let max_level = cli.verbosity.tracing_level_filter().max(LevelFilter::ERROR);
    tracing_subscriber::fmt()
        .with_max_level(max_level)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Run(args) => {
            let config = build_config(cli.module, args)?;

            let result = tokensig::run(&config, |event| match event {
                RunEvent::Digest { mechanism, digest } => {
                    println!("{} Digest: {}", mechanism.name(), hex::encode(digest));
                }
                RunEvent::Signature(signature) => {
                    println!("Signature: {}", hex::encode(signature));
                }
                RunEvent::Verified => {
                    info!("Verify OK");
                    println!("Verify OK");
                }
            });

            if let Err(e) = result {
                error!("{}", e);
                std::process::exit(1);
            }
        }

        Commands::Slots => match tokensig::list_slots(&cli.module) {
            Ok(slots) => {
                for slot in slots {
                    println!(
                        "{}\t{}\t{}\t{}\t{}",
                        slot.id, slot.label, slot.manufacturer, slot.model, slot.serial_number
                    );
                }
            }
            Err(e) => {
                error!("{}", e);
                std::process::exit(1);
            }
        },
    }

    Ok(())
}
