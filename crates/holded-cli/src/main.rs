//! `holded` - command line client for the Holded API.
//!
//! Success output is pretty JSON on stdout (exit 0). Failures are printed
//! as a JSON error envelope on stderr (exit 1). Destructive actions print
//! a preview and exit 2 unless `--confirm` is passed.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod helpers;

use std::str::FromStr;

use clap::{Args, Parser, Subcommand};
use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;

use helpers::{
    binary_payload, parse_date_arg, parse_json_object, print_json, require_confirm,
};
use holded_contacts::ContactsClient;
use holded_core::resource::ListParams;
use holded_core::{GatewayConfig, Result, Transport};
use holded_invoicing::duplicate::apply_approval_gate;
use holded_invoicing::{DocType, DocumentsClient, DuplicateOptions};
use holded_stock::{ProductsClient, WarehousesClient};

#[derive(Parser)]
#[command(name = "holded", version, about = "Command line client for the Holded API")]
struct Cli {
    /// Credential profile; reads HOLDED_API_KEY_<PROFILE> instead of
    /// HOLDED_API_KEY
    #[arg(long, global = true)]
    profile: Option<String>,

    /// Override the API base URL
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Contacts and contact groups
    Contacts {
        #[command(subcommand)]
        action: ContactsAction,
    },
    /// Invoicing documents of a given type (invoice, estimate, ...)
    Documents {
        /// Document type
        doc_type: String,
        #[command(subcommand)]
        action: DocumentsAction,
    },
    /// Products in the catalog
    Products {
        #[command(subcommand)]
        action: ProductsAction,
    },
    /// Warehouses
    Warehouses {
        #[command(subcommand)]
        action: WarehousesAction,
    },
}

#[derive(Args)]
struct PageArgs {
    /// Page number (1-based)
    #[arg(long)]
    page: Option<u32>,

    /// Page size
    #[arg(long)]
    limit: Option<u32>,
}

impl PageArgs {
    fn to_params(&self) -> ListParams {
        let mut params = ListParams::new();
        if let Some(page) = self.page {
            params = params.with_page(page);
        }
        if let Some(limit) = self.limit {
            params = params.with_limit(limit);
        }
        params
    }
}

#[derive(Subcommand)]
enum ContactsAction {
    /// List contacts
    List(PageArgs),
    /// Fetch a contact
    Get { id: String },
    /// Create a contact
    Create {
        /// Contact fields as a JSON object
        #[arg(long)]
        json: String,
    },
    /// Update a contact
    Update {
        id: String,
        /// Fields to change as a JSON object
        #[arg(long)]
        json: String,
    },
    /// Delete a contact
    Delete {
        id: String,
        /// Execute instead of previewing
        #[arg(long)]
        confirm: bool,
    },
    /// List the files attached to a contact
    Attachments { id: String },
    /// Contact groups
    Groups {
        #[command(subcommand)]
        action: GroupsAction,
    },
}

#[derive(Subcommand)]
enum GroupsAction {
    /// List contact groups
    List(PageArgs),
    /// Fetch a group
    Get { id: String },
    /// Create a group
    Create {
        /// Group fields as a JSON object
        #[arg(long)]
        json: String,
    },
    /// Update a group
    Update {
        id: String,
        /// Fields to change as a JSON object
        #[arg(long)]
        json: String,
    },
    /// Delete a group
    Delete {
        id: String,
        /// Execute instead of previewing
        #[arg(long)]
        confirm: bool,
    },
}

#[derive(Subcommand)]
enum DocumentsAction {
    /// List documents
    List(PageArgs),
    /// Fetch a document
    Get { id: String },
    /// Create a document
    Create {
        /// Document fields as a JSON object (write shape)
        #[arg(long)]
        json: String,
        /// Approve the document immediately (irreversible; needs --confirm)
        #[arg(long)]
        approve: bool,
        /// Execute the irreversible approval
        #[arg(long)]
        confirm: bool,
    },
    /// Duplicate a document to a new date
    Duplicate {
        id: String,
        /// New date as YYYY-MM-DD (UTC) or Unix seconds; defaults to today
        #[arg(long)]
        date: Option<String>,
        /// Extra fields merged into the new document
        #[arg(long)]
        json: Option<String>,
        /// Approve the duplicate immediately (irreversible; needs --confirm)
        #[arg(long)]
        approve: bool,
        /// Execute the irreversible approval
        #[arg(long)]
        confirm: bool,
    },
    /// Update a document
    Update {
        id: String,
        /// Fields to change as a JSON object
        #[arg(long)]
        json: String,
    },
    /// Delete a document
    Delete {
        id: String,
        /// Execute instead of previewing
        #[arg(long)]
        confirm: bool,
    },
    /// Download the rendered PDF (base64 inside a JSON wrapper)
    Pdf { id: String },
    /// Send a document by email
    Send {
        id: String,
        /// Optional send options as a JSON object
        #[arg(long)]
        json: Option<String>,
        /// Execute instead of previewing
        #[arg(long)]
        confirm: bool,
    },
    /// Register a payment against a document
    Pay {
        id: String,
        /// Payment fields as a JSON object
        #[arg(long)]
        json: String,
        /// Execute instead of previewing
        #[arg(long)]
        confirm: bool,
    },
}

#[derive(Subcommand)]
enum ProductsAction {
    /// List products
    List(PageArgs),
    /// Fetch a product
    Get { id: String },
    /// Create a product
    Create {
        /// Product fields as a JSON object
        #[arg(long)]
        json: String,
    },
    /// Update a product
    Update {
        id: String,
        /// Fields to change as a JSON object
        #[arg(long)]
        json: String,
    },
    /// Delete a product
    Delete {
        id: String,
        /// Execute instead of previewing
        #[arg(long)]
        confirm: bool,
    },
    /// Download the main product image (base64 inside a JSON wrapper)
    Image { id: String },
    /// List the secondary images of a product
    Images { id: String },
    /// Adjust stock levels
    Stock {
        id: String,
        /// Stock adjustment as a JSON object
        #[arg(long)]
        json: String,
    },
}

#[derive(Subcommand)]
enum WarehousesAction {
    /// List warehouses
    List(PageArgs),
    /// Fetch a warehouse
    Get { id: String },
    /// Create a warehouse
    Create {
        /// Warehouse fields as a JSON object
        #[arg(long)]
        json: String,
    },
    /// Update a warehouse
    Update {
        id: String,
        /// Fields to change as a JSON object
        #[arg(long)]
        json: String,
    },
    /// Delete a warehouse
    Delete {
        id: String,
        /// Execute instead of previewing
        #[arg(long)]
        confirm: bool,
    },
    /// List the stock held in a warehouse
    Stock { id: String },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(cli).await {
        match serde_json::to_string_pretty(&err.to_envelope()) {
            Ok(envelope) => eprintln!("{envelope}"),
            Err(_) => eprintln!("{err}"),
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = GatewayConfig::from_env(cli.profile.as_deref())?;
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
        config.parse_base_url()?;
    }
    let transport = Transport::new(&config)?;

    match cli.command {
        Command::Contacts { action } => run_contacts(transport, action).await,
        Command::Documents { doc_type, action } => {
            let doc_type = DocType::from_str(&doc_type)?;
            run_documents(transport, doc_type, action).await
        }
        Command::Products { action } => run_products(transport, action).await,
        Command::Warehouses { action } => run_warehouses(transport, action).await,
    }
}

async fn run_contacts(transport: Transport, action: ContactsAction) -> Result<()> {
    let client = ContactsClient::new(transport);
    match action {
        ContactsAction::List(page) => print_json(&client.list(&page.to_params()).await?),
        ContactsAction::Get { id } => print_json(&client.get(&id).await?),
        ContactsAction::Create { json } => {
            let body = Value::Object(parse_json_object(&json)?);
            print_json(&client.create(&body).await?);
        }
        ContactsAction::Update { id, json } => {
            let body = Value::Object(parse_json_object(&json)?);
            print_json(&client.update(&id, &body).await?);
        }
        ContactsAction::Delete { id, confirm } => {
            require_confirm(confirm, "contacts delete", json!({ "id": id }));
            print_json(&client.delete(&id).await?);
        }
        ContactsAction::Attachments { id } => {
            print_json(&client.list_attachments(&id).await?);
        }
        ContactsAction::Groups { action } => run_groups(&client, action).await?,
    }
    Ok(())
}

async fn run_groups(client: &ContactsClient, action: GroupsAction) -> Result<()> {
    let groups = client.groups();
    match action {
        GroupsAction::List(page) => print_json(&groups.list(&page.to_params()).await?),
        GroupsAction::Get { id } => print_json(&groups.get(&id).await?),
        GroupsAction::Create { json } => {
            let body = Value::Object(parse_json_object(&json)?);
            print_json(&groups.create(&body).await?);
        }
        GroupsAction::Update { id, json } => {
            let body = Value::Object(parse_json_object(&json)?);
            print_json(&groups.update(&id, &body).await?);
        }
        GroupsAction::Delete { id, confirm } => {
            require_confirm(confirm, "contacts groups delete", json!({ "id": id }));
            print_json(&groups.delete(&id).await?);
        }
    }
    Ok(())
}

async fn run_documents(
    transport: Transport,
    doc_type: DocType,
    action: DocumentsAction,
) -> Result<()> {
    let client = DocumentsClient::new(transport);
    match action {
        DocumentsAction::List(page) => {
            print_json(&client.list(doc_type, &page.to_params()).await?);
        }
        DocumentsAction::Get { id } => print_json(&client.get(doc_type, &id).await?),
        DocumentsAction::Create {
            json,
            approve,
            confirm,
        } => {
            let mut body = parse_json_object(&json)?;
            if approve {
                require_confirm(
                    confirm,
                    "documents create --approve",
                    json!({ "docType": doc_type.as_str() }),
                );
            }
            if let Some(warning) = apply_approval_gate(&mut body, approve, confirm) {
                eprintln!("{warning}");
            }
            print_json(&client.create(doc_type, &Value::Object(body)).await?);
        }
        DocumentsAction::Duplicate {
            id,
            date,
            json,
            approve,
            confirm,
        } => {
            let mut options = DuplicateOptions::new();
            if let Some(date) = date {
                options = options.with_date(parse_date_arg(&date)?);
            }
            if let Some(json) = json {
                options = options.with_overrides(parse_json_object(&json)?);
            }
            if approve {
                require_confirm(
                    confirm,
                    "documents duplicate --approve",
                    json!({ "docType": doc_type.as_str(), "id": id }),
                );
            }
            options = options.approve(approve && confirm);
            print_json(&client.duplicate(doc_type, &id, options).await?);
        }
        DocumentsAction::Update { id, json } => {
            let body = Value::Object(parse_json_object(&json)?);
            print_json(&client.update(doc_type, &id, &body).await?);
        }
        DocumentsAction::Delete { id, confirm } => {
            require_confirm(
                confirm,
                "documents delete",
                json!({ "docType": doc_type.as_str(), "id": id }),
            );
            print_json(&client.delete(doc_type, &id).await?);
        }
        DocumentsAction::Pdf { id } => {
            let bytes = client.pdf(doc_type, &id).await?;
            print_json(&binary_payload(&bytes));
        }
        DocumentsAction::Send { id, json, confirm } => {
            let body = match json {
                Some(json) => Some(Value::Object(parse_json_object(&json)?)),
                None => None,
            };
            require_confirm(
                confirm,
                "documents send",
                json!({ "docType": doc_type.as_str(), "id": id, "body": body }),
            );
            print_json(&client.send(doc_type, &id, body.as_ref()).await?);
        }
        DocumentsAction::Pay { id, json, confirm } => {
            let body = Value::Object(parse_json_object(&json)?);
            require_confirm(
                confirm,
                "documents pay",
                json!({ "docType": doc_type.as_str(), "id": id, "body": body }),
            );
            print_json(&client.pay(doc_type, &id, &body).await?);
        }
    }
    Ok(())
}

async fn run_products(transport: Transport, action: ProductsAction) -> Result<()> {
    let client = ProductsClient::new(transport);
    match action {
        ProductsAction::List(page) => print_json(&client.list(&page.to_params()).await?),
        ProductsAction::Get { id } => print_json(&client.get(&id).await?),
        ProductsAction::Create { json } => {
            let body = Value::Object(parse_json_object(&json)?);
            print_json(&client.create(&body).await?);
        }
        ProductsAction::Update { id, json } => {
            let body = Value::Object(parse_json_object(&json)?);
            print_json(&client.update(&id, &body).await?);
        }
        ProductsAction::Delete { id, confirm } => {
            require_confirm(confirm, "products delete", json!({ "id": id }));
            print_json(&client.delete(&id).await?);
        }
        ProductsAction::Image { id } => {
            let bytes = client.image(&id).await?;
            print_json(&binary_payload(&bytes));
        }
        ProductsAction::Images { id } => print_json(&client.list_images(&id).await?),
        ProductsAction::Stock { id, json } => {
            let body = Value::Object(parse_json_object(&json)?);
            print_json(&client.update_stock(&id, &body).await?);
        }
    }
    Ok(())
}

async fn run_warehouses(transport: Transport, action: WarehousesAction) -> Result<()> {
    let client = WarehousesClient::new(transport);
    match action {
        WarehousesAction::List(page) => print_json(&client.list(&page.to_params()).await?),
        WarehousesAction::Get { id } => print_json(&client.get(&id).await?),
        WarehousesAction::Create { json } => {
            let body = Value::Object(parse_json_object(&json)?);
            print_json(&client.create(&body).await?);
        }
        WarehousesAction::Update { id, json } => {
            let body = Value::Object(parse_json_object(&json)?);
            print_json(&client.update(&id, &body).await?);
        }
        WarehousesAction::Delete { id, confirm } => {
            require_confirm(confirm, "warehouses delete", json!({ "id": id }));
            print_json(&client.delete(&id).await?);
        }
        WarehousesAction::Stock { id } => print_json(&client.list_stock(&id).await?),
    }
    Ok(())
}
