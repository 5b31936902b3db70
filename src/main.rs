use anyhow::Context;
use clap::{Parser, Subcommand};
use dotenv::dotenv;

use backlot_rs::adk::session::Session;
use backlot_rs::backlot::agents::{self, pitch};
use backlot_rs::backlot::{config, server};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run one of the declared agents with a single input
    Run {
        /// Agent name (see the `agents` command)
        #[arg(short, long)]
        agent: String,

        /// The message to send
        #[arg(short, long)]
        input: String,
    },
    /// Develop a movie pitch for a historical-figure prompt
    Pitch {
        /// Who or what the movie should be about
        #[arg(short, long)]
        prompt: String,
    },
    /// List the declared agents
    Agents,
    /// Serve the agents over HTTP
    Serve {
        #[arg(short, long, default_value_t = 8080)]
        port: u16,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init();

    let args = Args::parse();

    match args.command {
        Commands::Run { agent, input } => {
            let model = config::model_from_env().context("building model")?;
            let agent = agents::find(&model, &agent)
                .with_context(|| format!("unknown agent '{}'; try the `agents` command", agent))?;

            let session = Session::new(input);
            let response = agent.run(&session).await?;
            println!("{}", response);
        }
        Commands::Pitch { prompt } => {
            let model = config::model_from_env().context("building model")?;
            let outcome = pitch::run_pitch(model, &prompt).await?;
            println!("{}", outcome.response);
        }
        Commands::Agents => {
            let model = config::model_from_env().context("building model")?;
            for agent in agents::catalog(&model) {
                println!("{:<22} {}", agent.name(), agent.description());
            }
        }
        Commands::Serve { port } => {
            server::serve(port).await?;
        }
    }

    Ok(())
}
