//! CLI entry point for `gmcli` account administration.

use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{CommandFactory, Parser, Subcommand};

use gmcli::{AccountStore, EmailAccount, StoreConfig};

#[derive(Parser)]
#[command(name = "gmcli", version, about = "Manage gmcli accounts and credentials")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Store directory (defaults to ~/.gmcli)
    #[arg(long, global = true, env = gmcli::config::DIR_ENV, value_name = "PATH")]
    dir: Option<PathBuf>,

    /// Verbose logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage configured accounts
    #[command(subcommand)]
    Accounts(AccountsCmd),
    /// Manage OAuth client credentials
    #[command(subcommand)]
    Credentials(CredentialsCmd),
    /// Manage the default account
    #[command(subcommand)]
    Default(DefaultCmd),
    /// Show which account would be used
    Resolve {
        /// Explicit account; falls back to the default
        email: Option<String>,
    },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
    /// Generate a man page
    Manpage,
}

#[derive(Subcommand)]
enum AccountsCmd {
    /// List accounts
    List {
        #[arg(long)]
        json: bool,
    },
    /// Print one account as JSON
    Show { email: String },
    /// Add or replace an account from a JSON object ("-" reads stdin)
    Import { file: PathBuf },
    /// Remove an account
    Remove { email: String },
}

#[derive(Subcommand)]
enum CredentialsCmd {
    /// Store the OAuth client id and secret
    Set {
        client_id: String,
        client_secret: String,
    },
    /// Show the stored client credentials
    Show {
        /// Print the secret instead of masking it
        #[arg(long)]
        reveal: bool,
    },
}

#[derive(Subcommand)]
enum DefaultCmd {
    /// Print the default account
    Show,
    /// Set the default account
    Set { email: String },
    /// Remove the default account
    Clear,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    setup_logging(log_level);

    match cli.command {
        Commands::Completions { shell } => return cmd_completions(shell),
        Commands::Manpage => return cmd_manpage(),
        _ => {}
    }

    let config = match cli.dir {
        Some(dir) => StoreConfig::new(dir),
        None => StoreConfig::discover()?,
    };
    let mut store = AccountStore::open(config)?;

    match cli.command {
        Commands::Accounts(cmd) => cmd_accounts(&mut store, cmd),
        Commands::Credentials(cmd) => cmd_credentials(&store, cmd),
        Commands::Default(cmd) => cmd_default(&store, cmd),
        Commands::Resolve { email } => cmd_resolve(&store, email.as_deref()),
        Commands::Completions { .. } | Commands::Manpage => Ok(()),
    }
}

/// Set up tracing with stderr output and optional file logging.
fn setup_logging(level: &str) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    let log_dir = gmcli::config::cache_dir();
    if std::fs::create_dir_all(&log_dir).is_ok() {
        let file_appender = tracing_appender::rolling::never(&log_dir, "gmcli.log");
        let file_layer = tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(file_appender);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .with(file_layer)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .init();
    }
}

fn cmd_completions(shell: clap_complete::Shell) -> anyhow::Result<()> {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "gmcli", &mut std::io::stdout());
    Ok(())
}

fn cmd_manpage() -> anyhow::Result<()> {
    let cmd = Cli::command();
    let man = clap_mangen::Man::new(cmd);
    let mut buf = Vec::new();
    man.render(&mut buf)?;
    std::io::Write::write_all(&mut std::io::stdout(), &buf)?;
    Ok(())
}

fn cmd_accounts(store: &mut AccountStore, cmd: AccountsCmd) -> anyhow::Result<()> {
    match cmd {
        AccountsCmd::List { json } => {
            let accounts = store.get_all_accounts();
            if json {
                println!("{}", serde_json::to_string_pretty(&accounts)?);
                return Ok(());
            }
            if accounts.is_empty() {
                println!("  No accounts configured.");
                return Ok(());
            }
            let default = store.get_default_email();
            for account in &accounts {
                let marker = if default.as_deref() == Some(account.email.as_str()) {
                    "*"
                } else {
                    " "
                };
                println!("  {marker} {}", account.email);
            }
        }
        AccountsCmd::Show { email } => {
            let Some(account) = store.get_account(&email) else {
                anyhow::bail!("Unknown account: {email}");
            };
            println!("{}", serde_json::to_string_pretty(account)?);
        }
        AccountsCmd::Import { file } => {
            let account = read_account(&file)?;
            let existed = store.has_account(&account.email);
            let email = account.email.clone();
            store.add_account(account)?;
            let verb = if existed { "Updated" } else { "Added" };
            println!("  {verb} {email}");
        }
        AccountsCmd::Remove { email } => {
            if store.delete_account(&email)? {
                println!("  Removed {email}");
            } else {
                println!("  No account named {email}");
            }
        }
    }
    Ok(())
}

/// Parse a single account from a file, or stdin when `file` is `-`.
fn read_account(file: &Path) -> anyhow::Result<EmailAccount> {
    let contents = if file.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(file)
            .map_err(|e| anyhow::anyhow!("Cannot read {}: {e}", file.display()))?
    };
    let account = serde_json::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Not a valid account object: {e}"))?;
    Ok(account)
}

fn cmd_credentials(store: &AccountStore, cmd: CredentialsCmd) -> anyhow::Result<()> {
    match cmd {
        CredentialsCmd::Set {
            client_id,
            client_secret,
        } => {
            store.set_credentials(&client_id, &client_secret)?;
            println!("  Saved client credentials");
        }
        CredentialsCmd::Show { reveal } => {
            let Some(creds) = store.get_credentials() else {
                anyhow::bail!("No client credentials configured");
            };
            let secret = if reveal {
                creds.client_secret
            } else {
                mask(&creds.client_secret)
            };
            println!("  {:<15} {}", "Client ID", creds.client_id);
            println!("  {:<15} {}", "Client secret", secret);
        }
    }
    Ok(())
}

/// Keep the last four characters of a secret.
fn mask(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    let keep = chars.len().min(4).min(chars.len() / 2);
    let tail: String = chars[chars.len() - keep..].iter().collect();
    format!("{}{tail}", "*".repeat(chars.len() - keep))
}

fn cmd_default(store: &AccountStore, cmd: DefaultCmd) -> anyhow::Result<()> {
    match cmd {
        DefaultCmd::Show => match store.get_default_email() {
            Some(email) => {
                println!("{email}");
                if !store.has_account(&email) {
                    tracing::warn!(email = %email, "Default account is not configured");
                }
            }
            None => anyhow::bail!("No default account set"),
        },
        DefaultCmd::Set { email } => {
            store.set_default_email(&email)?;
            println!("  Default account set to {email}");
        }
        DefaultCmd::Clear => {
            store.clear_default_email()?;
            println!("  Default account cleared");
        }
    }
    Ok(())
}

/// Pick the account for a command: the explicit one, else the default.
///
/// The default pointer is not kept in sync with the account list, so it is
/// checked here before use.
fn resolve_account<'a>(
    store: &'a AccountStore,
    explicit: Option<&str>,
) -> anyhow::Result<&'a EmailAccount> {
    let email = match explicit {
        Some(email) => email.to_string(),
        None => store
            .get_default_email()
            .ok_or_else(|| anyhow::anyhow!("No account given and no default account set"))?,
    };
    store
        .get_account(&email)
        .ok_or_else(|| anyhow::anyhow!("Unknown account: {email}"))
}

fn cmd_resolve(store: &AccountStore, explicit: Option<&str>) -> anyhow::Result<()> {
    let account = resolve_account(store, explicit)?;
    println!("{}", account.email);
    Ok(())
}
