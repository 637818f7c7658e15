//! Command line definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use storefront_core::{ItemId, UserId};

#[derive(Parser, Debug)]
#[command(name = "storefront")]
#[command(author, version, about = "Storefront cart and order backend", long_about = None)]
pub struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Register and look up users
    #[command(subcommand)]
    User(UserCommand),

    /// Browse the catalog
    #[command(subcommand)]
    Item(ItemCommand),

    /// Change a user's cart
    #[command(subcommand)]
    Cart(CartCommand),

    /// Submit carts and read order history
    #[command(subcommand)]
    Order(OrderCommand),

    /// Report database health, schema version and row counts
    Status,

    /// Populate an empty catalog with demo items
    Seed {
        /// Generated items to add after the two demo widgets
        #[arg(long, default_value_t = 0)]
        count: usize,
    },
}

#[derive(Subcommand, Debug)]
pub enum UserCommand {
    /// Register a user with an empty cart
    Create {
        #[arg(long)]
        username: String,

        #[arg(long)]
        password: String,

        #[arg(long)]
        confirm_password: String,
    },

    /// Show a user and their cart
    Show {
        username: String,
    },

    /// Show a user by numeric id
    Get {
        id: UserId,
    },
}

#[derive(Subcommand, Debug)]
pub enum ItemCommand {
    /// List every catalog item
    List,

    /// Show one item
    Show {
        id: ItemId,
    },

    /// Find items by exact name
    Search {
        name: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum CartCommand {
    /// Add units of an item
    Add(CartLine),

    /// Remove units of an item
    Remove(CartLine),

    /// Show the current cart
    Show {
        user: String,
    },
}

#[derive(clap::Args, Debug)]
pub struct CartLine {
    /// Username owning the cart
    #[arg(long)]
    pub user: String,

    /// Catalog item id
    #[arg(long)]
    pub item: ItemId,

    #[arg(long, short, default_value_t = 1, allow_negative_numbers = true)]
    pub quantity: i64,
}

#[derive(Subcommand, Debug)]
pub enum OrderCommand {
    /// Turn the user's cart into an order
    Submit {
        user: String,
    },

    /// List the user's orders, oldest first
    History {
        user: String,
    },
}
