//! Admin console command handlers.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use clap::Subcommand;
use galleria_backend::{AdminConsole, DeleteOutcome, ImageFile, ProductDraft, ProductPatch};
use galleria_core::{AppConfig, ProductId, ProductStatus};

/// Sub-commands available under `admin`.
#[derive(Debug, Subcommand)]
pub enum AdminCommands {
    /// List every product, including inactive and sold-out rows
    List,
    /// Create a product
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        price: String,
        #[arg(long, default_value = "")]
        code: String,
        #[arg(long, default_value = "")]
        sku: String,
        #[arg(long, default_value = "Earrings")]
        category: String,
        #[arg(long, default_value = "active")]
        status: ProductStatus,
        #[arg(long)]
        sold_out: bool,
        /// Image URL to attach (repeatable)
        #[arg(long = "image")]
        images: Vec<String>,
        /// Local image file to upload and attach (repeatable)
        #[arg(long = "upload")]
        uploads: Vec<PathBuf>,
    },
    /// Change fields of an existing product
    Update {
        #[arg(long)]
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        price: Option<String>,
        #[arg(long)]
        code: Option<String>,
        #[arg(long)]
        sku: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        status: Option<ProductStatus>,
        #[arg(long)]
        sold_out: Option<bool>,
        /// Replace the gallery with these URLs (repeatable)
        #[arg(long = "image")]
        images: Vec<String>,
    },
    /// Delete a product
    Delete {
        #[arg(long)]
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Upload image files and print their public URLs
    Upload {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

/// Dispatch an admin command.
///
/// # Errors
///
/// Returns an error if the backend is not configured, input is invalid, or
/// the backend rejects the request.
pub(crate) async fn run_admin(config: &AppConfig, command: AdminCommands) -> anyhow::Result<()> {
    let console = AdminConsole::from_config(config)?;

    match command {
        AdminCommands::List => run_admin_list(&console).await?,
        AdminCommands::Create {
            name,
            price,
            code,
            sku,
            category,
            status,
            sold_out,
            images,
            uploads,
        } => {
            let mut draft = ProductDraft {
                name,
                price,
                code,
                sku,
                category,
                status,
                sold_out,
                ..ProductDraft::default()
            };
            for url in &images {
                draft.images.add_url(url);
            }
            let files = read_image_files(&uploads).await?;
            let name = draft.name.trim().to_string();
            console.create_with_uploads(&mut draft, files).await?;
            println!("Created product {name}.");
        }
        AdminCommands::Update {
            id,
            name,
            price,
            code,
            sku,
            category,
            status,
            sold_out,
            images,
        } => {
            let mut patch = ProductPatch {
                name,
                code,
                sku,
                category,
                status,
                sold_out,
                ..ProductPatch::default()
            };
            if let Some(price) = price {
                patch = patch.with_price_text(&price)?;
            }
            if !images.is_empty() {
                patch = patch.with_images(images);
            }
            console.update(&ProductId::new(id.clone()), &patch).await?;
            println!("Updated product {id}.");
        }
        AdminCommands::Delete { id, yes } => {
            let mut confirm = |prompt: &str| yes || prompt_yes_no(prompt);
            match console.delete(&ProductId::new(id.clone()), &mut confirm).await? {
                DeleteOutcome::Deleted => println!("Deleted product {id}."),
                DeleteOutcome::Cancelled => println!("Delete cancelled."),
            }
        }
        AdminCommands::Upload { files } => {
            for file in read_image_files(&files).await? {
                println!("{}", console.upload_image(file).await?);
            }
        }
    }

    Ok(())
}

async fn run_admin_list(console: &AdminConsole) -> anyhow::Result<()> {
    let products = console.list_products().await?;
    if products.is_empty() {
        println!("No products yet.");
        return Ok(());
    }

    println!("{:<8}{:<30}{:<10}DETAILS", "ID", "NAME", "STATUS");
    for product in &products {
        println!(
            "{:<8}{:<30}{:<10}{}",
            product.id.as_str(),
            product.name,
            product.status(),
            product.admin_meta()
        );
    }
    Ok(())
}

async fn read_image_files(paths: &[PathBuf]) -> anyhow::Result<Vec<ImageFile>> {
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.display()))?;
        files.push(ImageFile {
            name: file_name(path),
            bytes,
        });
    }
    Ok(files)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Ask on stdin; anything other than `y`/`yes` declines.
fn prompt_yes_no(prompt: &str) -> bool {
    print!("{prompt} [y/N] ");
    if std::io::stdout().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    if std::io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
