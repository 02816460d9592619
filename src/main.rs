//! Buywizard CLI - buylist optimizer for Cardmarket
//!
//! Reads a card list (or a Cardmarket wantslist), builds the card × seller
//! price matrix and reports the cheapest offer per card plus the cost of
//! buying every card from its cheapest seller.

use buywizard::{
    extract_price_matrix, extract_price_matrix_for_products, load_cardlist,
    resolve_wantslist_products, Batching, CardmarketClient, Config, PriceMatrix, Result,
};
use clap::Parser;
use std::path::PathBuf;

/// Buylist optimizer for Cardmarket
#[derive(Parser, Debug)]
#[command(name = "buywizard")]
#[command(version, about, long_about = None)]
struct Args {
    /// File with the list of desired cards (.md or plain text)
    #[arg(
        short,
        long,
        conflicts_with = "wantslist",
        required_unless_present = "wantslist"
    )]
    input: Option<PathBuf>,

    /// Optimize a Cardmarket wantslist instead (index into your wantslists)
    #[arg(long)]
    wantslist: Option<usize>,

    /// Location of the configuration file
    #[arg(long, default_value = "config.json")]
    config: String,
}

fn main() {
    let args = Args::parse();

    // Config failures are fatal before logging is even up
    let config = match Config::load(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.log_level.as_str()),
    )
    .init();

    let client = CardmarketClient::new(config.app_token.clone());

    let matrix = match build_matrix(&args, &config, &client) {
        Ok(matrix) => matrix,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    if matrix.is_empty() {
        log::error!("No cards with valid offers remain, nothing to optimize");
        std::process::exit(1);
    }

    report(&matrix);
}

fn build_matrix(args: &Args, config: &Config, client: &CardmarketClient) -> Result<PriceMatrix> {
    if let Some(path) = &args.input {
        let cards = load_cardlist(path)?;
        log::info!("Loaded list of {} cards", cards.len());
        return extract_price_matrix(client, &cards, &config.search_filters);
    }

    // Wantslist mode: greet, pick the list, expand it to products
    let index = args.wantslist.unwrap_or(0);

    let account = client.get_account()?;
    println!(
        "Logged in as: {} {} ({})",
        account.name.first_name, account.name.last_name, account.username
    );

    let wantslists = client.get_wantslists()?;
    let wantslist = wantslists.get(index).ok_or_else(|| {
        buywizard::BuywizardError::Config(format!(
            "wantslist index {} out of range ({} wantslists)",
            index,
            wantslists.len()
        ))
    })?;
    log::info!(
        "Optimizing wantslist '{}' ({} items)",
        wantslist.name,
        wantslist.item_count
    );

    let products = resolve_wantslist_products(client, wantslist.id_wantslist)?;
    extract_price_matrix_for_products(client, &products, &config.search_filters)
}

/// Print the cheapest offer per card and the naive one-seller-per-card batch
fn report(matrix: &PriceMatrix) {
    println!(
        "\nOffers from {} sellers for {} cards:",
        matrix.num_sellers(),
        matrix.num_cards()
    );
    for (card, name) in matrix.cards().iter().enumerate() {
        println!("  {:<40} {:>8.2}", name, matrix.row_min(card));
    }

    let batch = Batching::cheapest(matrix);
    match batch.cost_breakdown() {
        Ok((items, shipping)) => {
            println!("\nBuying every card from its cheapest seller:");
            println!("  {} distinct sellers", batch.batch_counts().len());
            println!(
                "  items {:.2} + shipping {:.2} = {:.2}",
                items,
                shipping,
                items + shipping
            );
        }
        Err(e) => log::warn!("Could not price the cheapest-seller batch: {}", e),
    }
}
