use anyhow::Context;
use clap::{Parser, Subcommand};
use mes_global_search::{
    api::handlers::{FilterParams, GroupedSearchRequest, SearchRequest},
    client::{RetryPolicy, SearchClient},
    config::Config,
    grouping::{merge_results, GroupingEngine, GroupingStrategy},
};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "mes-search-cli")]
#[command(about = "MES global search CLI", long_about = None, version)]
struct Cli {
    /// Server base URL; defaults to the configured client endpoint
    #[arg(short, long, env = "MES_SEARCH_ENDPOINT")]
    endpoint: Option<String>,

    /// Override the configured retry count
    #[arg(long)]
    retries: Option<u32>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search; several queries are merged and deduplicated
    Search {
        #[arg(value_name = "QUERY", required = true)]
        queries: Vec<String>,

        /// Restrict to types (page, order, product, user, setting)
        #[arg(short, long, value_delimiter = ',')]
        types: Vec<String>,

        #[arg(short, long)]
        limit: Option<usize>,

        /// Include label suggestions
        #[arg(short, long)]
        suggestions: bool,

        /// Group the merged results locally with this strategy
        #[arg(short, long, value_name = "STRATEGY")]
        group_by: Option<String>,
    },

    /// Suggest type labels for a partial query
    Suggest {
        #[arg(value_name = "QUERY")]
        query: String,
    },

    /// Grouped search on the server
    Group {
        #[arg(value_name = "QUERY")]
        query: String,

        #[arg(short, long, default_value = "intelligent")]
        strategy: String,

        #[arg(long)]
        max_groups: Option<usize>,

        #[arg(long)]
        max_results_per_group: Option<usize>,

        /// Filter as KIND=VALUE (type, category, keyword); repeatable
        #[arg(short, long = "filter", value_name = "KIND=VALUE", value_parser = parse_filter)]
        filters: Vec<FilterParams>,
    },

    /// Check server health
    Health,
}

fn parse_filter(raw: &str) -> Result<FilterParams, String> {
    let (kind, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KIND=VALUE, got '{}'", raw))?;
    Ok(FilterParams {
        kind: kind.trim().to_string(),
        value: value.trim().to_string(),
        label: None,
        enabled: true,
    })
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = Config::load().context("Failed to load configuration")?;
    let mut client_config = config.client.clone();
    if let Some(endpoint) = cli.endpoint {
        client_config.endpoint = endpoint;
    }

    let mut client = SearchClient::from_config(&client_config)?;
    if let Some(retries) = cli.retries {
        let policy = RetryPolicy {
            max_retries: retries,
            ..*client.retry_policy()
        };
        client = client.with_retry_policy(policy);
    }

    match cli.command {
        Commands::Search {
            queries,
            types,
            limit,
            suggestions,
            group_by,
        } => {
            let mut responses = Vec::with_capacity(queries.len());
            for query in queries {
                let request = SearchRequest {
                    query,
                    types: types.clone(),
                    limit,
                    include_suggestions: suggestions,
                };
                responses.push(client.search(&request).await?);
            }

            match group_by {
                Some(strategy) => {
                    let items = merge_results(responses.iter().map(|r| r.flatten()));
                    let engine = GroupingEngine::new(config.grouping.clone());
                    let grouped =
                        engine.group_by_strategy(items, &GroupingStrategy::from_name(&strategy));
                    print_json(&grouped)?;
                }
                None if responses.len() == 1 => print_json(&responses[0])?,
                None => {
                    let items = merge_results(responses.iter().map(|r| r.flatten()));
                    print_json(&items)?;
                }
            }
        }

        Commands::Suggest { query } => {
            let suggestions = client.suggestions(&query).await?;
            for suggestion in suggestions {
                println!("{}", suggestion);
            }
        }

        Commands::Group {
            query,
            strategy,
            max_groups,
            max_results_per_group,
            filters,
        } => {
            let mut request = GroupedSearchRequest::new(SearchRequest::new(query));
            request.strategy = Some(strategy);
            request.max_groups = max_groups;
            request.max_results_per_group = max_results_per_group;
            request.filters = filters;

            let data = client.grouped(&request).await?;
            print_json(&data)?;
        }

        Commands::Health => {
            let body = client.health().await?;
            print_json(&body)?;
        }
    }

    Ok(())
}
