//! `stellar-burgers`: the Stellar Burgers client on the command line
//!
//! Every subcommand dispatches actions into the same store and reducers the
//! library exposes, waits for them to settle, and prints the resulting state.
//! Tokens persist in a JSON file between runs (`BURGER_TOKEN_FILE`).

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use std::sync::Arc;
use std::time::Duration;
use stellar_burgers::config::DEFAULT_LOG_FILTER;
use stellar_burgers::slices::{FeedOrders, UserAction};
use stellar_burgers::{checkout, AppConfig, AppEnvironment, AppStore, RootAction, RootReducer, RootState};
use stellar_burgers_api::{ApiClient, BurgerApi, FileTokenStore, Order, RegisterData};
use stellar_burgers_core::environment::UuidGenerator;
use stellar_burgers_core::Thunk;
use stellar_burgers_runtime::Store;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// How long a command waits for its request to settle
const SETTLE_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Parser)]
#[command(name = "stellar-burgers", about = "Stellar Burgers client", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the ingredient catalog by category
    Ingredients,
    /// Show the public order feed
    Feed,
    /// Show one order by its display number
    Order {
        /// Display number, e.g. 76798
        number: u64,
    },
    /// Sign in and store the token pair
    Login {
        /// Account email
        email: String,
        /// Account password
        password: String,
    },
    /// Create an account and store the token pair
    Register {
        /// Account email
        email: String,
        /// Display name
        name: String,
        /// Account password
        password: String,
    },
    /// Show the signed-in profile
    Profile,
    /// Show the signed-in user's order history
    History,
    /// Build a burger from catalog ids and place the order
    Checkout {
        /// Catalog ids; exactly one bun is expected, the rest are fillings
        #[arg(required = true)]
        ingredients: Vec<String>,
    },
    /// Sign out and forget the stored tokens
    Logout,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::from_env()?;

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_new(&config.log_filter)
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let tokens = Arc::new(
        FileTokenStore::open(&config.token_file)
            .with_context(|| format!("opening {}", config.token_file.display()))?,
    );
    let api = ApiClient::new(&config.api, tokens.clone())?;
    let env = AppEnvironment::new(api, tokens, Arc::new(UuidGenerator));
    let store = Store::new(RootState::default(), RootReducer::new(), env);

    let outcome = run(&store, cli.command).await;
    store.shutdown(Duration::from_secs(5)).await?;
    outcome
}

async fn run<A>(store: &AppStore<A>, command: Command) -> anyhow::Result<()>
where
    A: BurgerApi + Clone + 'static,
{
    match command {
        Command::Ingredients => {
            settle(store, RootAction::fetch_ingredients()).await?;
            let state = store.state(|s| s.ingredients.clone()).await;
            for (title, items) in [
                ("Buns", state.buns().collect::<Vec<_>>()),
                ("Sauces", state.sauces().collect()),
                ("Mains", state.mains().collect()),
            ] {
                println!("{title}:");
                for ingredient in items {
                    println!("  {}  {:>5}  {}", ingredient.id, ingredient.price, ingredient.name);
                }
            }
        },
        Command::Feed => {
            settle(store, RootAction::get_feed()).await?;
            let feed = store.state(|s| s.feed.clone()).await;
            print_orders(&feed.orders);
            println!("Completed all time: {}", feed.total);
            println!("Completed today: {}", feed.total_today);
        },
        Command::Order { number } => {
            settle(store, RootAction::get_order(number)).await?;
            match store.state(|s| s.order.current_order().cloned()).await {
                Some(order) => print_order(&order),
                None => bail!("order {number} not found"),
            }
        },
        Command::Login { email, password } => {
            settle(store, RootAction::login(email, password)).await?;
            print_profile(store).await;
        },
        Command::Register {
            email,
            name,
            password,
        } => {
            let register = RootAction::User(UserAction::Register(Thunk::Run(RegisterData {
                email,
                name,
                password,
            })));
            settle(store, register).await?;
            print_profile(store).await;
        },
        Command::Profile => {
            settle(store, RootAction::get_user()).await?;
            print_profile(store).await;
        },
        Command::History => {
            settle(store, RootAction::get_orders()).await?;
            let orders = store.state(|s| s.feed.orders.clone()).await;
            print_orders(&orders);
        },
        Command::Checkout { ingredients } => {
            settle(store, RootAction::fetch_ingredients()).await?;
            for id in ingredients {
                let Some(ingredient) = store.state(|s| s.ingredients.by_id(&id).cloned()).await
                else {
                    bail!("unknown ingredient {id}");
                };
                store.send(RootAction::place(ingredient)).await?;
            }
            let price = store.state(|s| s.constructor.total_price()).await;
            let order = checkout(store, SETTLE_TIMEOUT).await?;
            println!("Order #{} accepted: {} ({price})", order.number, order.name);
        },
        Command::Logout => {
            settle(store, RootAction::logout()).await?;
            println!("Signed out");
        },
    }
    Ok(())
}

/// Dispatch `action`, wait for it to settle and surface the slice's error
///
/// The settled action has already been reduced, so the owning slice's
/// `error` field tells whether it was rejected.
async fn settle<A>(store: &AppStore<A>, action: RootAction) -> anyhow::Result<()>
where
    A: BurgerApi + Clone + 'static,
{
    let settled = store
        .send_and_wait_for(action.clone(), |a| action.is_settled_by(a), SETTLE_TIMEOUT)
        .await?;

    let error = store
        .state(|s| match settled {
            RootAction::User(_) => s.user.error.clone(),
            RootAction::Feed(_) => s.feed.error.clone(),
            RootAction::Order(_) => s.order.error.clone(),
            RootAction::Ingredients(_) => s.ingredients.error.clone(),
            RootAction::Constructor(_) => None,
        })
        .await;

    match error {
        Some(message) => bail!(message),
        None => Ok(()),
    }
}

async fn print_profile<A>(store: &AppStore<A>)
where
    A: BurgerApi + Clone + 'static,
{
    if let Some(user) = store.state(|s| s.user.user().cloned()).await {
        println!("{} <{}>", user.name, user.email);
    }
}

fn print_orders(orders: &FeedOrders) {
    for order in orders.as_slice() {
        print_order(order);
    }
}

fn print_order(order: &Order) {
    println!(
        "#{:<6} {:<8} {}  {}",
        order.number,
        format!("{:?}", order.status).to_lowercase(),
        order.created_at.format("%Y-%m-%d %H:%M"),
        order.name
    );
}
