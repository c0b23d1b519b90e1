mod app_system;
mod catalog;
mod clients;
mod domain;
mod error;
mod messages;
mod remote;
mod render;
mod search;
mod store;

#[cfg(test)]
mod mock_remote;

use std::io::Write as _;

use tokio::io::{self, AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::info;

use crate::app_system::{setup_tracing, AppConfig, CatalogSystem};
use crate::clients::CatalogClient;
use crate::domain::ProductForm;
use crate::error::CatalogError;

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    info!("Starting grocery catalog client");

    let config = AppConfig::from_env().map_err(|e| e.to_string())?;
    let system = CatalogSystem::new(&config).map_err(|e| e.to_string())?;

    // Load the catalog up front; a failed fetch leaves an empty, still
    // usable session - refresh retries it.
    match system.catalog_client.refresh().await {
        Ok(count) => notify_ok(&format!("loaded {count} products")),
        Err(e) => notify_failure(&e),
    }
    show_view(&system.catalog_client).await;

    run_session(&system.catalog_client).await?;

    system.shutdown().await?;
    info!("Session ended");
    Ok(())
}

/// One user command per line; every action round-trips through the
/// catalog service before the next prompt, so operations never overlap.
async fn run_session(client: &CatalogClient) -> Result<(), String> {
    let mut lines = BufReader::new(io::stdin()).lines();

    print_help();
    loop {
        prompt("> ");
        let Some(line) = lines.next_line().await.map_err(|e| e.to_string())? else {
            break;
        };
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let command = match parse_command(trimmed) {
            Ok(command) => command,
            Err(message) => {
                println!("warn: {message}");
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Help => print_help(),
            Command::List => show_view(client).await,
            Command::Refresh => match client.refresh().await {
                Ok(count) => {
                    notify_ok(&format!("reloaded {count} products"));
                    show_view(client).await;
                }
                Err(e) => notify_failure(&e),
            },
            Command::Search(query) => run_search(client, query).await,
            Command::Add => run_add(client, &mut lines).await?,
            Command::Buy { id, amount } => run_buy(client, id, amount).await,
            Command::Delete { id } => run_delete(client, id, &mut lines).await?,
        }
    }

    Ok(())
}

async fn run_search(client: &CatalogClient, query: String) {
    let cleared = query.trim().is_empty();
    match client.set_query(query).await {
        Ok(matches) => {
            if cleared {
                notify_ok("search cleared");
            } else {
                notify_ok(&format!("{matches} match(es)"));
            }
            show_view(client).await;
        }
        Err(e) => notify_failure(&e),
    }
}

async fn run_add(
    client: &CatalogClient,
    lines: &mut Lines<BufReader<Stdin>>,
) -> Result<(), String> {
    let Some(name) = prompt_line(lines, "name: ").await? else {
        return Ok(());
    };
    let Some(description) = prompt_line(lines, "description: ").await? else {
        return Ok(());
    };
    let Some(price) = prompt_line(lines, "price: ").await? else {
        return Ok(());
    };
    let Some(qty) = prompt_line(lines, "qty: ").await? else {
        return Ok(());
    };

    let form = ProductForm {
        name,
        description,
        price,
        qty,
    };

    match client.add_product(form.clone()).await {
        Ok(product) => {
            notify_ok(&format!("added {} ({})", product.name, product.id));
            show_view(client).await;
        }
        Err(e) => {
            notify_failure(&e);
            // Nothing committed; echo the form so the input is not lost.
            println!(
                "form kept: name={:?} description={:?} price={:?} qty={:?}",
                form.name, form.description, form.price, form.qty
            );
        }
    }

    Ok(())
}

async fn run_buy(client: &CatalogClient, id: String, amount: u32) {
    match client.buy_product(id, amount).await {
        Ok(product) => {
            notify_ok(&format!(
                "bought {amount} x {}, {} left",
                product.name, product.qty
            ));
            show_view(client).await;
        }
        Err(e) => notify_failure(&e),
    }
}

async fn run_delete(
    client: &CatalogClient,
    id: String,
    lines: &mut Lines<BufReader<Stdin>>,
) -> Result<(), String> {
    let Some(answer) = prompt_line(lines, &format!("delete {id}? [y/N] ")).await? else {
        return Ok(());
    };
    if !matches!(answer.trim().to_lowercase().as_str(), "y" | "yes") {
        println!("cancelled");
        return Ok(());
    }

    match client.delete_product(id).await {
        Ok(()) => {
            notify_ok("deleted");
            show_view(client).await;
        }
        Err(e) => notify_failure(&e),
    }

    Ok(())
}

async fn show_view(client: &CatalogClient) {
    match client.view().await {
        Ok(markup) => print!("{markup}"),
        Err(e) => notify_failure(&e),
    }
}

#[derive(Debug, PartialEq)]
enum Command {
    Help,
    List,
    Refresh,
    Add,
    Search(String),
    Buy { id: String, amount: u32 },
    Delete { id: String },
    Quit,
}

fn parse_command(line: &str) -> Result<Command, String> {
    let mut parts = line.split_whitespace();
    let verb = parts.next().unwrap_or_default();

    match verb {
        "help" | "?" => Ok(Command::Help),
        "list" => Ok(Command::List),
        "refresh" => Ok(Command::Refresh),
        "add" => Ok(Command::Add),
        "search" => {
            // Keep the raw remainder: queries are substring matches.
            let query = line[verb.len()..].trim().to_string();
            Ok(Command::Search(query))
        }
        "buy" => {
            let id = parts
                .next()
                .ok_or("usage: buy <id> [1|2|3]")?
                .to_string();
            let amount: u32 = parts
                .next()
                .unwrap_or("1")
                .parse()
                .map_err(|_| "usage: buy <id> [1|2|3]".to_string())?;
            if !(1..=3).contains(&amount) {
                return Err("buy amount must be 1, 2 or 3".to_string());
            }
            Ok(Command::Buy { id, amount })
        }
        "delete" => {
            let id = parts.next().ok_or("usage: delete <id>")?.to_string();
            Ok(Command::Delete { id })
        }
        "quit" | "exit" => Ok(Command::Quit),
        other => Err(format!("Unknown command: {other} (try 'help')")),
    }
}

async fn prompt_line(
    lines: &mut Lines<BufReader<Stdin>>,
    label: &str,
) -> Result<Option<String>, String> {
    prompt(label);
    lines.next_line().await.map_err(|e| e.to_string())
}

fn prompt(label: &str) {
    print!("{label}");
    let _ = std::io::stdout().flush();
}

fn print_help() {
    println!("commands:");
    println!("  list                show the current view");
    println!("  search <text>       filter by name or description (live)");
    println!("  search              clear the filter");
    println!("  add                 add a product (prompts for fields)");
    println!("  buy <id> [1|2|3]    buy from a product's stock");
    println!("  delete <id>         delete a product (asks first)");
    println!("  refresh             re-fetch the catalog from the server");
    println!("  quit                leave");
}

fn notify_ok(message: &str) {
    println!("ok: {message}");
}

fn notify_failure(error: &CatalogError) {
    if error.is_user_error() {
        println!("warn: {error}");
    } else {
        println!("error: {error}");
    }
}
