use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use site_core::{
    features::{ModalState, SubmissionOutcome},
    Document, HttpContactTransport, MemoryThemeStore, SiteConfig, SiteController,
};
use tracing::info;

/// Fills the landing page's contact form and submits it to a running server.
#[derive(Parser, Debug)]
struct Args {
    #[arg(long, default_value = "http://127.0.0.1:3000")]
    server_url: String,
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    business: Option<String>,
    #[arg(long)]
    message: String,
    /// TOML file overriding the controller's timing and threshold defaults.
    #[arg(long)]
    site_config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let args = Args::parse();

    let config = match &args.site_config {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read site config '{}'", path.display()))?;
            SiteConfig::from_toml_str(&raw)
                .with_context(|| format!("invalid site config '{}'", path.display()))?
        }
        None => SiteConfig::default(),
    };

    let transport = HttpContactTransport::new(&args.server_url)?;
    info!(endpoint = %transport.endpoint(), "submitting contact form");

    let mut site = SiteController::new(Document::landing_page(), MemoryThemeStore::new(), config);
    site.init();
    fill_form(site.document_mut(), &args)?;

    match site.submit(&transport).await {
        Some(SubmissionOutcome::Succeeded) => {
            let modal_open = site
                .modal()
                .is_some_and(|modal| modal.state() == ModalState::Open);
            println!("Message sent (confirmation shown: {modal_open}).");
        }
        Some(SubmissionOutcome::Rejected(reason)) => {
            println!("Submission failed: {reason}");
        }
        None => {
            let errors = site
                .contact()
                .map(|form| form.error_messages(site.document()))
                .unwrap_or_default();
            println!("The form was not sent:");
            for error in errors {
                println!("  - {error}");
            }
        }
    }

    Ok(())
}

fn fill_form(doc: &mut Document, args: &Args) -> Result<()> {
    let form = doc
        .element_by_id("contact-form")
        .context("page has no contact form")?;
    let fields = [
        ("name", args.name.as_str()),
        ("email", args.email.as_str()),
        ("business", args.business.as_deref().unwrap_or_default()),
        ("message", args.message.as_str()),
    ];
    for (name, value) in fields {
        let field = doc
            .named_within(form, name)
            .with_context(|| format!("contact form has no '{name}' field"))?;
        doc.set_value(field, value);
    }
    Ok(())
}
