use std::path::PathBuf;
use std::sync::Once;

use anyhow::Context;
use clap::{Parser, Subcommand};
use hyperscope_core::{Scope, loader, params, scope};


static TRACE_INIT: Once = Once::new();

fn maybe_init_tracing() {
    let raw = match std::env::var("HYSCOPE_TRACE") {
        Ok(value) => value,
        Err(_) => return,
    };
    if raw.is_empty() || raw == "0" {
        return;
    }

    TRACE_INIT.call_once(|| {
        use tracing_subscriber::EnvFilter;
        use tracing_subscriber::fmt;

        let filter_expr = std::env::var("RUST_LOG").ok();

        let builder = fmt().with_writer(std::io::stderr);
        let builder = match filter_expr.and_then(|expr| EnvFilter::try_new(expr).ok()) {
            Some(filter) => builder.with_env_filter(filter),
            None => builder.with_env_filter("hyperscope_core=debug,hyperscope_cli=info"),
        };
        let _ = builder.try_init();
    });
}

#[derive(Debug, Parser)]
#[command(
    name = "hyscope",
    author,
    version,
    about = "Inspect and resolve scoped parameters",
    long_about = None
)]
struct CliArgs {
    /// Override a parameter for this invocation, `KEY=VALUE`. Repeatable.
    #[arg(short = 'D', long = "define", value_name = "KEY=VALUE", global = true)]
    defines: Vec<String>,

    /// Load parameters from a JSON/YAML/TOML file before applying defines.
    /// Repeatable; later files override earlier ones.
    #[arg(short = 'c', long = "config", value_name = "FILE", global = true)]
    configs: Vec<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Resolve one parameter and print its value.
    Get {
        /// Dotted parameter key, e.g. `model.encoder.lr`
        key: String,

        /// Value to print when the key is absent (exits with an error otherwise)
        #[arg(long, value_name = "VALUE")]
        default: Option<String>,
    },
    /// List every key visible in the assembled scope, one per line.
    Keys,
    /// Print the assembled scope as a JSON object of flattened keys.
    Dump,
}

fn main() -> anyhow::Result<()> {
    maybe_init_tracing();

    let CliArgs {
        defines,
        configs,
        command,
    } = CliArgs::parse();

    let mut scope = Scope::new();
    for path in &configs {
        let doc = loader::load_path(path)
            .with_context(|| format!("loading config {}", path.display()))?;
        scope = scope.update(doc);
    }
    for expr in &defines {
        if !expr.contains('=') {
            anyhow::bail!("invalid define `{expr}`, expected KEY=VALUE");
        }
        scope = scope.define(expr);
    }
    let _guard = scope.enter();

    match command {
        Commands::Get { key, default } => run_get(&key, default.as_deref()),
        Commands::Keys => {
            for key in scope::keys() {
                println!("{key}");
            }
            Ok(())
        }
        Commands::Dump => run_dump(),
    }
}

fn run_get(key: &str, default: Option<&str>) -> anyhow::Result<()> {
    let value = match default {
        // A textual default coerces the stored value toward text as well,
        // which is what a shell consumer wants.
        Some(fallback) => params().key(key).get_or(fallback),
        None => params().key(key).require()?,
    };
    println!("{value}");
    Ok(())
}

fn run_dump() -> anyhow::Result<()> {
    // Export the frame verbatim; a resolving read would consume suggesters,
    // which serialize as null instead.
    let store = scope::export();
    let mut doc = serde_json::Map::new();
    for key in store.keys() {
        if let Some(value) = store.get(&key) {
            doc.insert(key, serde_json::to_value(value)?);
        }
    }
    println!("{}", serde_json::to_string_pretty(&serde_json::Value::Object(doc))?);
    Ok(())
}
