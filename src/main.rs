//! Inventory Scope CLI
//!
//! ```text
//! ┌──────────┐    ┌─────────────┐    ┌───────────┐    ┌──────────┐
//! │ profile  │───▶│ acquisition │───▶│ retrieval │───▶│   view   │
//! │reference │    │ (4 stages)  │    │ (priced)  │    │  + cart  │
//! └──────────┘    └─────────────┘    └───────────┘    └──────────┘
//! ```

use std::sync::Arc;

use anyhow::{Context, bail};
use clap::Parser;
use rust_decimal::Decimal;

use inventory_scope::acquisition::{AcquisitionCoordinator, StepStatus};
use inventory_scope::cart::{SelectionSet, ToggleOutcome};
use inventory_scope::config::AppConfig;
use inventory_scope::core_types::{GameId, UserContext};
use inventory_scope::games::game_label;
use inventory_scope::logging::init_logging;
use inventory_scope::retrieval::{EnrichOptions, InventoryFeed};
use inventory_scope::session::SessionIdentity;
use inventory_scope::upstream::{HttpInventoryService, InventoryService};
use inventory_scope::view::{InventoryView, PRICE_UNKNOWN_HINT, ViewFilters};

#[derive(Parser)]
#[command(name = "inventory_scope")]
#[command(about = "Load and value a Steam inventory", long_about = None)]
struct Cli {
    /// Config environment (config/{env}.yaml)
    #[arg(short, long, default_value = "dev")]
    env: String,

    /// Profile link, vanity name or SteamID64; omit to use the default account
    #[arg(short, long)]
    profile: Option<String>,

    /// Game app id
    #[arg(short, long)]
    game: Option<GameId>,

    /// Source filter: all or a source name
    #[arg(long, default_value = "all")]
    source: String,

    /// Tradability filter: all, trade or notrade
    #[arg(long, default_value = "trade")]
    tradability: String,

    /// Category filter: all, marketrable or nonmarketrable
    #[arg(long, default_value = "marketrable")]
    category: String,

    /// Sort: price-asc, price-desc, quantity-asc, quantity-desc, name-asc, name-desc
    #[arg(long, default_value = "price-desc")]
    sort: String,

    /// Item id to toggle in the cart; repeatable
    #[arg(long = "select")]
    select: Vec<String>,

    /// Print the view as JSON
    #[arg(long)]
    json: bool,

    #[arg(long, default_value_t = 1)]
    user_id: u64,
}

fn money(value: Decimal, symbol: &str) -> String {
    format!("{:.2} {}", value, symbol)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(&cli.env)
        .with_context(|| format!("loading config for env '{}'", cli.env))?;
    let _guard = init_logging(&config.logging);

    let game = cli.game.unwrap_or(config.default_game);
    let service: Arc<dyn InventoryService> = Arc::new(HttpInventoryService::new(&config.upstream)?);
    let session = Arc::new(SessionIdentity::new());

    if let Some(profile) = &cli.profile {
        let coordinator =
            AcquisitionCoordinator::new(service.clone(), session.clone(), config.timings.clone());
        let user = UserContext::new(cli.user_id, "cli");

        let ready = coordinator.run(Some(&user), profile, game).await;

        for step in coordinator.steps().iter() {
            let mark = match step.status {
                StepStatus::Success => "ok",
                StepStatus::Error => "!!",
                StepStatus::Loading => "..",
                StepStatus::Pending => "--",
            };
            match &step.error_message {
                Some(err) => println!("[{}] {}: {}", mark, step.message, err),
                None => println!("[{}] {}", mark, step.message),
            }
        }
        if !ready {
            bail!("inventory acquisition failed");
        }
    }

    let feed = InventoryFeed::new(
        service,
        EnrichOptions::new(&config.currency.code, &config.upstream.image_base_url),
    );
    let Some(handle) = feed.refresh(&session, config.default_account().as_ref(), game) else {
        bail!("no profile given and no default_account_id configured");
    };
    handle.wait().await;

    let state = feed.state();
    if let Some(placeholder) = InventoryView::placeholder(&state) {
        if let Some(err) = &state.error {
            eprintln!("{}", err.user_message());
        }
        println!("{}", placeholder);
        return Ok(());
    }

    let filters = ViewFilters::from_selectors(&cli.source, &cli.tradability, &cli.category, &cli.sort);
    let mut view = InventoryView::build(&state.items, &filters);

    let mut cart = SelectionSet::new();
    for id in &cli.select {
        if cart.toggle(id, &view) == ToggleOutcome::Missed {
            eprintln!("not displayed: {}", id);
        }
    }
    view.mark_selected(&cart);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    let symbol = &config.currency.symbol;
    println!("{} ({})", game_label(game), game);
    for item in view.items() {
        let price = if item.has_known_price() {
            money(item.market_price, symbol)
        } else {
            PRICE_UNKNOWN_HINT.to_string()
        };
        let flag = if item.in_cart { "*" } else { " " };
        println!("{} {:>4} x {:<60} {}", flag, item.effective_quantity(), item.name, price);
    }
    println!(
        "items: {}  value: {}",
        view.total_items(),
        money(view.total_value(), symbol)
    );

    if !cart.is_empty() {
        println!(
            "cart: {} selected, {}",
            cart.len(),
            money(cart.total_value(), symbol)
        );
    }

    Ok(())
}
