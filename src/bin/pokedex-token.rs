use clap::Parser;
use pokedex_api::auth::JwtAuthenticator;
use pokedex_api::config;
use uuid::Uuid;

/// Mint a bearer token for local testing, signed with the configured JWT_SECRET
#[derive(Parser)]
#[command(name = "pokedex-token")]
#[command(version)]
struct Args {
    /// User id to embed; a fresh one is generated when omitted
    #[arg(long)]
    user: Option<Uuid>,

    /// Override token lifetime in hours
    #[arg(long)]
    hours: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    pokedex_api::server::init_tracing();

    let args = Args::parse();
    let security = &config::config().security;
    let expiry = args.hours.unwrap_or(security.jwt_expiry_hours);

    let user = args.user.unwrap_or_else(Uuid::new_v4);
    let token = JwtAuthenticator::new(security.jwt_secret.clone(), expiry).issue(user)?;

    eprintln!("user: {}", user);
    println!("{}", token);
    Ok(())
}
