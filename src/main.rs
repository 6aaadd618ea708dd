use anyhow::Context;
use clap::{Parser, Subcommand};
use droplet_instances::{droplet_instances, Config, Instances, NodeName};
use log::info;

#[derive(Parser)]
#[command(name = "droplet-instances", about = "Resolve droplet metadata for cluster nodes")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the node name for a hostname
    NodeName { hostname: String },
    #[command(flatten)]
    Api(ApiCommand),
}

/// Commands that query the DigitalOcean API or the droplet metadata service.
#[derive(Subcommand)]
enum ApiCommand {
    /// Print node addresses, of this droplet unless a provider id is given
    Addresses {
        #[arg(long)]
        provider_id: Option<String>,
    },
    /// Print the provider id of a node
    InstanceId { name: String },
    /// Print the size slug of a node, looked up by name or provider id
    InstanceType {
        #[arg(long, conflicts_with = "provider_id", required_unless_present = "provider_id")]
        name: Option<String>,
        #[arg(long)]
        provider_id: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        // node names are the hostname as given and need no API access
        Command::NodeName { hostname } => println!("{}", NodeName::from(hostname.as_str())),
        Command::Api(command) => run(command).await?,
    }

    Ok(())
}

async fn run(command: ApiCommand) -> anyhow::Result<()> {
    let config = Config::from_env()?;
    info!("using DO API at {}", config.api_url);

    let instances = droplet_instances(&config);

    match command {
        ApiCommand::Addresses { provider_id } => {
            let addresses = match provider_id {
                Some(id) => instances.node_addresses_by_provider_id(&id).await,
                None => instances.node_addresses(&NodeName::from("")).await,
            }
            .context("failed to resolve node addresses")?;
            println!("{}", serde_json::to_string_pretty(&addresses)?);
        }
        ApiCommand::InstanceId { name } => {
            let id = instances
                .instance_id(&NodeName(name))
                .await
                .context("failed to resolve instance id")?;
            println!("{}", id);
        }
        ApiCommand::InstanceType { name, provider_id } => {
            let size = match (name, provider_id) {
                (Some(name), _) => instances.instance_type(&NodeName(name)).await,
                (None, Some(id)) => instances.instance_type_by_provider_id(&id).await,
                (None, None) => anyhow::bail!("either --name or --provider-id is required"),
            }
            .context("failed to resolve instance type")?;
            println!("{}", size);
        }
    }

    Ok(())
}
