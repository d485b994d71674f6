use std::process::exit;

use anyhow::anyhow;
use clap::Parser;
use itertools::Itertools;
use log::{info, LevelFilter};

use bridge_common::method_key::MethodKey;
use native_bridge::bridge::Bridge;
use native_bridge::options::{BridgeOptions, LoadMode};
use native_bridge::registry::{BridgeFn, BridgeMethod, check_slot_accounting};
use native_bridge::traps::{trap_class, trap_deprecated, trap_function, trap_protected, trap_undocumented};

#[derive(Parser)]
#[clap(about = "inspects the native method bridge registry")]
pub struct OptsOuter {
    #[clap(long, help = "load only the synthetic probe signatures")]
    test_only: bool,
    #[clap(long, short, help = "log at debug level unless RUST_LOG says otherwise")]
    verbose: bool,
    #[clap(long, help = "trace every invocation")]
    trace: bool,
    #[clap(subcommand)]
    command: OptsInner,
}

#[derive(Parser)]
pub enum OptsInner {
    #[clap(about = "bind the registry and check slot accounting")]
    Check {},
    #[clap(about = "list registered keys")]
    List {
        #[clap(long)]
        prefix: Option<String>,
    },
    #[clap(about = "show one registry entry")]
    Lookup {
        key: String
    },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { LevelFilter::Debug } else { LevelFilter::Warn };
    env_logger::Builder::new()
        .filter_level(default_level)
        .parse_default_env()
        .init();
}

fn trap_name(method: &BridgeMethod) -> Option<&'static str> {
    [
        (trap_class as BridgeFn, "class not supported"),
        (trap_function, "function not supported"),
        (trap_deprecated, "deprecated"),
        (trap_undocumented, "undocumented"),
        (trap_protected, "protected"),
    ].into_iter().find(|(trap, _)| method.same_function(*trap)).map(|(_, name)| name)
}

fn describe(key: &str, method: &BridgeMethod) -> String {
    let mut flags = vec![format!("slots={}", method.param_slots)];
    if method.needs_context {
        flags.push("context".to_string());
    }
    if method.thread_safe {
        flags.push("thread-safe".to_string());
    }
    if let Some(trap) = trap_name(method) {
        flags.push(format!("trap: {}", trap));
    }
    format!("{} [{}]", key, flags.iter().join(", "))
}

fn main() -> anyhow::Result<()> {
    let opts: OptsOuter = OptsOuter::parse();
    init_logging(opts.verbose);
    let load_mode = if opts.test_only { LoadMode::TestOnly } else { LoadMode::Full };
    let options = BridgeOptions::new(load_mode, opts.trace, true);
    let bridge = Bridge::install_global(options)?;
    match opts.command {
        OptsInner::Check { .. } => {
            let mismatches = check_slot_accounting(bridge.signatures());
            for mismatch in mismatches.iter() {
                match mismatch.expected {
                    Some(expected) => println!("{}: registered {} slots, descriptor needs {}", mismatch.key, mismatch.registered, expected),
                    None => println!("{}: registered {} slots, descriptor does not parse", mismatch.key, mismatch.registered),
                }
            }
            let area = bridge.method_area();
            println!("{} methods bound across {} classes", area.len(), area.class_count());
            if !mismatches.is_empty() {
                eprintln!("{} slot accounting mismatch(es)", mismatches.len());
                exit(1);
            }
        }
        OptsInner::List { prefix } => {
            let keys = bridge.signatures().keys_sorted();
            let listed = keys.into_iter()
                .filter(|key| prefix.as_ref().map(|prefix| key.starts_with(prefix.as_str())).unwrap_or(true))
                .collect_vec();
            for key in listed.iter() {
                println!("{}", key);
            }
            info!("listed {} key(s)", listed.len());
        }
        OptsInner::Lookup { key } => {
            let method = bridge.signatures().lookup(key.as_str()).ok_or_else(|| anyhow!("no bridge method for {}", key))?;
            println!("{}", describe(key.as_str(), method));
            let parsed = MethodKey::parse(key.as_str())?;
            println!("class {} method {} descriptor {}", parsed.class_name, parsed.method_name, parsed.descriptor.jvm_representation());
        }
    }
    Ok(())
}
