//! aerowire CLI
//!
//! Offline inspection tool: prints key digests, request bytes as hex, and
//! decodes response messages captured from the wire.

use clap::{Args as ClapArgs, Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use aerowire::protocol::{parse_message, Key, Request, RequestBuilder};
use aerowire::{Config, Digest, Result, Value, WireError};

/// aerowire CLI
#[derive(Parser, Debug)]
#[command(name = "aerowire-cli")]
#[command(about = "Encode requests and decode responses for the record wire protocol")]
#[command(version)]
struct Args {
    /// Transaction TTL written into requests (milliseconds)
    #[arg(long, default_value = "1000")]
    transaction_ttl: u32,

    /// Record TTL written into write requests (seconds)
    #[arg(long, default_value = "0")]
    record_ttl: u32,

    #[command(subcommand)]
    command: Commands,
}

/// Record address shared by the request subcommands
#[derive(ClapArgs, Debug)]
struct KeyArgs {
    /// Namespace
    namespace: String,

    /// User key
    key: String,

    /// Set name
    #[arg(short, long)]
    set: Option<String>,

    /// Treat the key as a 64-bit integer
    #[arg(long)]
    int_key: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the digest of a key
    Digest {
        /// User key
        key: String,

        /// Set name
        #[arg(short, long)]
        set: Option<String>,

        /// Treat the key as a 64-bit integer
        #[arg(long)]
        int_key: bool,
    },

    /// Encode a write request
    Put {
        #[command(flatten)]
        key: KeyArgs,

        /// Bins as name=value (integers and decimals are typed, the rest are strings)
        #[arg(required = true)]
        bins: Vec<String>,
    },

    /// Encode a read-all request
    Get {
        #[command(flatten)]
        key: KeyArgs,
    },

    /// Encode a read request for selected bins
    Select {
        #[command(flatten)]
        key: KeyArgs,

        /// Bin names to read
        #[arg(required = true)]
        bins: Vec<String>,
    },

    /// Encode a delete request
    Delete {
        #[command(flatten)]
        key: KeyArgs,
    },

    /// Decode a full response message given as hex
    Decode {
        /// Hex-encoded frame header + payload
        hex: String,
    },
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,aerowire=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    tracing::debug!("aerowire-cli v{}", aerowire::VERSION);

    if let Err(e) = run(args) {
        tracing::error!("{}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let config = Config::builder()
        .transaction_ttl_ms(args.transaction_ttl)
        .record_ttl(args.record_ttl)
        .try_build()?;
    let builder = RequestBuilder::new(config);

    match args.command {
        Commands::Digest { key, set, int_key } => {
            let digest = Digest::compute(&user_key(&key, int_key)?, set.as_deref())?;
            println!("{}", digest);
        }
        Commands::Put { key, bins } => {
            let pairs = bins
                .iter()
                .map(|bin| parse_bin(bin))
                .collect::<Result<Vec<_>>>()?;
            print_request(&builder.write(&record_key(&key)?, pairs)?)?;
        }
        Commands::Get { key } => print_request(&builder.read_all(&record_key(&key)?)?)?,
        Commands::Select { key, bins } => {
            print_request(&builder.read_selected(&record_key(&key)?, bins)?)?
        }
        Commands::Delete { key } => print_request(&builder.delete(&record_key(&key)?)?)?,
        Commands::Decode { hex } => {
            let bytes = hex::decode(hex.trim())
                .map_err(|e| WireError::Format(format!("Invalid hex input: {}", e)))?;
            let response = parse_message(&bytes)?;

            println!("status:     {}", response.result_code);
            println!("generation: {}", response.generation);
            println!("record ttl: {}", response.record_ttl);
            match response.bins() {
                None => println!("bins:       (none)"),
                Some(bins) => {
                    for (name, value) in bins {
                        println!("  {} = {}", name, value);
                    }
                }
            }
        }
    }
    Ok(())
}

fn user_key(raw: &str, int_key: bool) -> Result<Value> {
    if int_key {
        return raw
            .parse::<i64>()
            .map(Value::Integer)
            .map_err(|e| WireError::Format(format!("Invalid integer key '{}': {}", raw, e)));
    }
    Ok(Value::from(raw))
}

fn record_key(args: &KeyArgs) -> Result<Key> {
    Key::new(
        args.namespace.as_str(),
        args.set.as_deref(),
        user_key(&args.key, args.int_key)?,
    )
}

fn parse_bin(raw: &str) -> Result<(String, Value)> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| WireError::Format(format!("Bin '{}' is not name=value", raw)))?;

    let value = match (value.parse::<i64>(), value.parse::<f64>()) {
        (Ok(i), _) => Value::Integer(i),
        (_, Ok(d)) if value.contains('.') => Value::Double(d),
        _ => Value::from(value),
    };
    Ok((name.to_string(), value))
}

fn print_request(request: &Request) -> Result<()> {
    let bytes = request.pack()?;
    tracing::info!(
        "{} fields, {} bins, {} bytes",
        request.base.field_count,
        request.base.bin_count,
        bytes.len()
    );
    println!("{}", hex::encode(bytes));
    Ok(())
}
