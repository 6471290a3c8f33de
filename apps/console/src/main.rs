use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    load_settings, HttpProductApi, HttpRepositoryApi, PageSize, ProductForm, RepositorySearch,
    RunRejected,
};
use shared::domain::ProductType;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use url::Url;

mod render;

#[derive(Parser, Debug)]
struct Args {
    /// Overrides the store API base url from settings.
    #[arg(long)]
    api_url: Option<Url>,
    /// Overrides the repository search base url from settings.
    #[arg(long)]
    search_url: Option<Url>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Submit the create-product form.
    CreateProduct {
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        size: String,
        #[arg(long = "type", default_value_t = ProductType::Electronic)]
        product_type: ProductType,
    },
    /// Search repositories and print one page of results.
    Search {
        #[arg(long, default_value = "")]
        filter: String,
        #[arg(long, default_value_t = 30)]
        per_page: usize,
        #[arg(long, default_value_t = 0)]
        page: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();
    let args = Args::parse();

    let mut settings = load_settings().context("failed to load client settings")?;
    if let Some(url) = args.api_url {
        settings.api_url = url;
    }
    if let Some(url) = args.search_url {
        settings.search_api_url = url;
    }
    debug!(
        api_url = %settings.api_url,
        search_api_url = %settings.search_api_url,
        "client settings resolved"
    );

    match args.command {
        Command::CreateProduct {
            name,
            size,
            product_type,
        } => {
            let api = HttpProductApi::new(&settings.api_url)?;
            let mut form = ProductForm::new(api, &settings.status_codes);
            form.set_name(name);
            form.set_size(size);
            form.set_type(product_type);

            match form.submit().await {
                Ok(_) | Err(RunRejected::Invalid(_)) => {}
                Err(err @ RunRejected::Busy) => return Err(err.into()),
            }
            print!("{}", render::render_form(&form.view()));
        }
        Command::Search {
            filter,
            per_page,
            page,
        } => {
            let page_size = PageSize::try_from(per_page)?;
            let api = HttpRepositoryApi::new(&settings.search_api_url)?;
            let mut search = RepositorySearch::new(api, &settings.status_codes);
            search.set_filter(filter);

            search.search().await?;
            search.set_page_size(page_size);
            search.set_page_index(page);
            print!("{}", render::render_search(&search.view(), &search.state()));
        }
    }

    Ok(())
}
