use clap::{Parser, Subcommand};
use std::sync::Arc;
use trustboard::{
    config::ServerConfig,
    db,
    models::{account::RegisterRequest, user::Claim, ClaimStatus},
    repositories::{SqliteUserRepository, UserRepository},
    services::{AccountService, ClaimService, InfluencerService},
};

#[derive(Parser)]
#[command(name = "trustboard-cli")]
#[command(about = "CLI tool for managing trustboard influencers", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Influencer management commands
    Influencer {
        #[command(subcommand)]
        command: InfluencerCommands,
    },
    /// Claim commands
    Claim {
        #[command(subcommand)]
        command: ClaimCommands,
    },
}

#[derive(Subcommand)]
enum InfluencerCommands {
    /// Register a new influencer
    Create {
        #[arg(short, long)]
        username: String,

        #[arg(short, long)]
        email: String,

        /// Password (will prompt if not provided)
        #[arg(short, long)]
        password: Option<String>,

        #[arg(short, long)]
        category: String,

        #[arg(long, default_value_t = 0)]
        trust_score: i64,

        #[arg(long, default_value_t = 0)]
        followers: i64,
    },

    /// List all influencers
    List,

    /// Show one influencer with its claims
    Show { id: String },

    /// Delete an influencer and all of its claims
    Delete { id: String },
}

#[derive(Subcommand)]
enum ClaimCommands {
    /// Attach a claim to an influencer
    Add {
        /// Influencer id
        id: String,

        #[arg(short, long)]
        text: String,

        /// Verified, Questionable or Debunked
        #[arg(short, long)]
        status: ClaimStatus,

        #[arg(short, long, value_parser = clap::value_parser!(u8).range(0..=100))]
        confidence: u8,

        #[arg(long, default_value = "Manual review")]
        source: String,
    },

    /// Run the simulated verifier on a claim text
    Verify { text: String },
}

fn get_password(prompt: &str) -> Result<String, Box<dyn std::error::Error>> {
    use std::io::{self, Write};
    print!("{}: ", prompt);
    io::stdout().flush()?;

    Ok(rpassword::read_password()?)
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("❌ {}", message);
    std::process::exit(1);
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let cli = Cli::parse();

    let config = ServerConfig::from_env()?;
    let pool = db::open(&config.database_url).await?;

    // Initialize services
    let user_repository: Arc<dyn UserRepository> =
        Arc::new(SqliteUserRepository::new(pool.clone()));
    let account_service = AccountService::new(user_repository.clone());
    let influencer_service = InfluencerService::new(user_repository);

    match cli.command {
        Commands::Influencer { command } => match command {
            InfluencerCommands::Create {
                username,
                email,
                password,
                category,
                trust_score,
                followers,
            } => {
                let password = match password {
                    Some(pw) => pw,
                    None => {
                        let password = get_password("Password")?;
                        if password != get_password("Confirm password")? {
                            fail("Passwords do not match");
                        }
                        password
                    }
                };

                let request = RegisterRequest {
                    username: Some(username),
                    email: Some(email),
                    password: Some(password),
                    category: Some(category),
                    trust_score: Some(trust_score),
                    followers: Some(followers),
                    profile_picture: None,
                };

                match account_service.register(request).await {
                    Ok(id) => {
                        println!("✅ Influencer created successfully!");
                        println!("  ID: {}", id);
                    }
                    Err(err) => fail(format!("Failed to create influencer: {}", err)),
                }
            }

            InfluencerCommands::List => match influencer_service.list_influencers().await {
                Ok(influencers) => {
                    if influencers.is_empty() {
                        println!("No influencers found.");
                    } else {
                        println!(
                            "{:<38} {:<20} {:<15} {:>6} {:>10} {:>7}",
                            "ID", "Username", "Category", "Trust", "Followers", "Claims"
                        );
                        println!("{}", "-".repeat(101));
                        for influencer in influencers {
                            println!(
                                "{:<38} {:<20} {:<15} {:>6} {:>10} {:>7}",
                                influencer.id,
                                influencer.username,
                                influencer.category,
                                influencer.trust_score,
                                influencer.followers,
                                influencer.claims.len()
                            );
                        }
                    }
                }
                Err(err) => fail(format!("Failed to list influencers: {}", err)),
            },

            InfluencerCommands::Show { id } => match influencer_service.get_influencer(&id).await
            {
                Ok(influencer) => println!("{}", serde_json::to_string_pretty(&influencer)?),
                Err(err) => fail(err),
            },

            InfluencerCommands::Delete { id } => {
                match influencer_service.delete_influencer(&id).await {
                    Ok(()) => println!("✅ Influencer '{}' deleted successfully!", id),
                    Err(err) => fail(format!("Failed to delete influencer: {}", err)),
                }
            }
        },

        Commands::Claim { command } => match command {
            ClaimCommands::Add {
                id,
                text,
                status,
                confidence,
                source,
            } => {
                let claim = Claim {
                    claim_text: text,
                    status,
                    confidence,
                    source,
                };
                match influencer_service.add_claim(&id, claim).await {
                    Ok(()) => println!("✅ Claim attached to '{}'", id),
                    Err(err) => fail(format!("Failed to attach claim: {}", err)),
                }
            }

            ClaimCommands::Verify { text } => {
                let result = ClaimService::new().verify(&text);
                println!("{}", serde_json::to_string_pretty(&result)?);
            }
        },
    }

    pool.close().await;
    Ok(())
}
