use cartly_app::{
    context::AppContext,
    domain::carts::{CartsService, models::CartId},
};
use clap::{Args, Subcommand};

use super::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct CartCommand {
    #[command(subcommand)]
    command: CartSubcommand,
}

#[derive(Debug, Subcommand)]
enum CartSubcommand {
    /// Create an empty cart and print its ID
    Create(CreateCartArgs),

    /// Print a cart's items and price quote
    Show(ShowCartArgs),
}

#[derive(Debug, Args)]
pub(crate) struct CreateCartArgs {
    #[command(flatten)]
    database: DatabaseArgs,
}

#[derive(Debug, Args)]
pub(crate) struct ShowCartArgs {
    /// Cart ID
    #[arg(long)]
    id: i64,

    #[command(flatten)]
    database: DatabaseArgs,
}

pub(crate) async fn run(command: CartCommand) -> Result<(), String> {
    match command.command {
        CartSubcommand::Create(args) => create(args).await,
        CartSubcommand::Show(args) => show(args).await,
    }
}

async fn create(args: CreateCartArgs) -> Result<(), String> {
    let context = AppContext::from_pool(args.database.connect().await?);

    let cart = context
        .carts
        .create_cart()
        .await
        .map_err(|error| format!("failed to create cart: {error}"))?;

    println!("cart_id: {}", cart.id);

    Ok(())
}

async fn show(args: ShowCartArgs) -> Result<(), String> {
    let context = AppContext::from_pool(args.database.connect().await?);
    let cart_id = CartId::from_i64(args.id);

    let cart = context
        .carts
        .get_cart(cart_id)
        .await
        .map_err(|error| format!("failed to load cart {cart_id}: {error}"))?;

    let price = context
        .carts
        .get_price(cart_id)
        .await
        .map_err(|error| format!("failed to price cart {cart_id}: {error}"))?;

    println!("cart_id: {}", cart.id);

    for item in &cart.items {
        println!("item {}: {} @ {}", item.id, item.product, item.price);
    }

    println!("total_price: {}", price.total_price);
    println!("discount_percent: {}", price.discount_percent);
    println!("final_price: {}", price.final_price);

    Ok(())
}
