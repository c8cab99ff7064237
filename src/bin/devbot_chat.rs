//! devbot-chat - interactive chat client for a running devbot server.

use std::io::Write;

use clap::Parser;
use devbot::chat_client::{parse_command, BackendClient, ClientCommand, DEFAULT_BACKEND_URL};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "devbot-chat", about = "Chat with a devbot server")]
struct Args {
    /// Base URL of the devbot server
    #[arg(long, env = "BACKEND_URL", default_value = DEFAULT_BACKEND_URL)]
    backend_url: String,
}

struct Prompter {
    lines: Lines<BufReader<Stdin>>,
}

impl Prompter {
    /// Print `label` and read one line; `None` on end of input.
    async fn ask(&mut self, label: &str) -> anyhow::Result<Option<String>> {
        print!("{}", label);
        std::io::stdout().flush()?;
        Ok(self.lines.next_line().await?)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let client = BackendClient::new(reqwest::Client::new(), args.backend_url.clone());
    let mut prompter = Prompter {
        lines: BufReader::new(tokio::io::stdin()).lines(),
    };

    tracing::debug!(backend = %args.backend_url, "Starting chat session");
    println!("Welcome to the GitHub Coding Chatbot!");

    while let Some(line) = prompter.ask("You: ").await? {
        let reply = match parse_command(&line) {
            ClientCommand::Exit => break,
            ClientCommand::Empty => continue,
            ClientCommand::AnalyzeCode(code) => client.analyze_code(&code).await,
            ClientCommand::CreateRepo(name) => {
                let description = prompter
                    .ask("Enter repository description: ")
                    .await?
                    .unwrap_or_default();
                client.create_repo(&name, description.trim()).await
            }
            ClientCommand::CreateIssue => {
                let repo = prompter.ask("Enter repository (e.g., username/repo): ").await?;
                let title = prompter.ask("Enter issue title: ").await?;
                let body = prompter.ask("Enter issue description: ").await?;
                match (repo, title, body) {
                    (Some(repo), Some(title), Some(body)) => {
                        client.create_issue(repo.trim(), title.trim(), body.trim()).await
                    }
                    _ => break,
                }
            }
            ClientCommand::Chat(message) => client.chat(&message).await,
        };

        match reply {
            Ok(text) => println!("Bot: {}", text),
            Err(e) => println!("Bot: {}", e),
        }
    }

    Ok(())
}
