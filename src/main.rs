use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use docuflow::projections::{audit, reports, search as search_view};
use docuflow::{
    config, create_document_span, generate_correlation_id, init_config, init_telemetry,
    shutdown_telemetry, Area, DeliveryState, DocumentState, DocumentStore, FileRef, SearchFilter,
    StageArea, UserDirectory, UserRef,
};

#[derive(Parser)]
#[command(name = "docuflow")]
#[command(about = "Purchase-order document tracking workflow")]
#[command(long_about = "Docuflow tracks purchase-order documents through the \
                        Sales -> Purchasing -> Billing -> Operations workflow, with \
                        per-area attachments and an append-only audit trail. The store \
                        is an in-memory prototype, so every invocation runs against \
                        freshly seeded demo data.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Walk one document through the whole workflow, printing each step
    Demo,
    /// Show the seeded documents with lifecycle and delivery status
    Status,
    /// Print the summary report as JSON, optionally scoped to one creator
    Report {
        #[arg(long, help = "Only count documents registered by this user id")]
        created_by: Option<u64>,
    },
    /// Print the flattened audit trail, newest first
    Audit {
        #[arg(long, help = "Only show entries recorded by this area")]
        area: Option<Area>,
    },
    /// Search the seeded documents by term and optional state
    Search {
        /// Term matched against order codes and file names
        term: String,
        #[arg(long, help = "Filter by lifecycle state, e.g. pending-billing")]
        state: Option<DocumentState>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = config()?;
    init_telemetry(&config.observability)?;
    init_config()?;

    let cli = Cli::parse();
    let latency = config.store.latency();

    let store = DocumentStore::new(latency);
    let directory = UserDirectory::seeded(latency).await;
    seed_documents(&store).await;

    match cli.command {
        Commands::Demo => demo_command(&store).await?,
        Commands::Status => status_command(&store).await,
        Commands::Report { created_by } => report_command(&store, created_by).await?,
        Commands::Audit { area } => audit_command(&store, area).await,
        Commands::Search { term, state } => search_command(&store, &directory, term, state).await?,
    }

    shutdown_telemetry();
    Ok(())
}

// Acting users matching the seeded directory.
fn sales_supervisor() -> UserRef {
    UserRef::new(5, Area::Sales)
}
fn sales_assistant() -> UserRef {
    UserRef::new(3, Area::Sales)
}
fn purchasing_user() -> UserRef {
    UserRef::new(2, Area::Purchasing)
}
fn billing_user() -> UserRef {
    UserRef::new(4, Area::Billing)
}
fn operations_user() -> UserRef {
    UserRef::new(6, Area::Operations)
}

/// Seed a small spread of documents in different workflow stages.
async fn seed_documents(store: &DocumentStore) {
    let correlation_id = generate_correlation_id();
    let span = create_document_span("seed", None, None, Some(&correlation_id));
    let _guard = span.enter();

    store
        .create("OC-1001", FileRef::new("po-1001.pdf"), &sales_supervisor())
        .await;
    store
        .attach(
            "OC-1001",
            StageArea::Purchasing,
            FileRef::new("quote-1001.pdf"),
            &purchasing_user(),
            false,
        )
        .await;
    store
        .attach(
            "OC-1001",
            StageArea::Billing,
            FileRef::new("invoice-1001.pdf"),
            &billing_user(),
            false,
        )
        .await;
    store
        .attach(
            "OC-1001",
            StageArea::Operations,
            FileRef::new("dispatch-1001.pdf"),
            &operations_user(),
            false,
        )
        .await;
    store
        .set_delivery_state("OC-1001", DeliveryState::InTransit, &operations_user())
        .await;

    store
        .create("OC-1002", FileRef::new("po-1002.pdf"), &sales_assistant())
        .await;
    store
        .attach(
            "OC-1002",
            StageArea::Purchasing,
            FileRef::new("quote-1002.pdf"),
            &purchasing_user(),
            false,
        )
        .await;

    store
        .create("OC-1003", FileRef::new("po-1003.pdf"), &sales_assistant())
        .await;
}

async fn demo_command(store: &DocumentStore) -> Result<()> {
    let oc = "OC-2000";
    println!("Registering {oc} (Sales)...");
    let doc = store
        .create(oc, FileRef::new("po-2000.pdf"), &sales_supervisor())
        .await;
    println!("  state: {}, history: {}", doc.state, doc.history.len());

    for (area, file, acting) in [
        (StageArea::Purchasing, "quote-2000.pdf", purchasing_user()),
        (StageArea::Billing, "invoice-2000.pdf", billing_user()),
        (StageArea::Operations, "dispatch-2000.pdf", operations_user()),
    ] {
        println!("Attaching {file} ({area})...");
        let doc = store
            .attach(oc, area, FileRef::new(file), &acting, false)
            .await
            .context("demo document disappeared")?;
        println!("  state: {}, history: {}", doc.state, doc.history.len());
    }

    println!("Attaching a new version to purchasing...");
    let doc = store
        .attach(
            oc,
            StageArea::Purchasing,
            FileRef::new("quote-2000-v2.pdf"),
            &purchasing_user(),
            true,
        )
        .await
        .context("demo document disappeared")?;
    println!(
        "  state unchanged: {}, purchasing bucket: {} files",
        doc.state,
        doc.attachments.bucket(StageArea::Purchasing).len()
    );

    println!("Marking delivered...");
    let doc = store
        .set_delivery_state(oc, DeliveryState::Delivered, &operations_user())
        .await
        .context("demo document disappeared")?;
    println!(
        "  delivery: {}, history: {}",
        doc.delivery_state.map(|s| s.to_string()).unwrap_or_default(),
        doc.history.len()
    );

    Ok(())
}

async fn status_command(store: &DocumentStore) {
    let documents = store.list().await;
    println!(
        "{:<10} {:<22} {:<12} {:>8}",
        "OC", "STATE", "DELIVERY", "HISTORY"
    );
    for doc in documents {
        println!(
            "{:<10} {:<22} {:<12} {:>8}",
            doc.oc,
            doc.state.to_string(),
            doc.delivery_state
                .map(|s| s.to_string())
                .unwrap_or_else(|| "-".to_string()),
            doc.history.len()
        );
    }
}

async fn report_command(store: &DocumentStore, created_by: Option<u64>) -> Result<()> {
    let documents = store.list().await;
    let report = reports::summary_report(&documents, created_by);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

async fn audit_command(store: &DocumentStore, area: Option<Area>) {
    let documents = store.list().await;
    let mut records = audit::audit_trail(&documents);
    if let Some(area) = area {
        records = audit::for_area(&records, area);
    }
    for record in records {
        println!(
            "{}  {:<10} {:<12} {:<28} {}",
            record.entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
            record.oc,
            record.entry.area.to_string(),
            record.entry.action.to_string(),
            record.entry.file_name
        );
    }
}

async fn search_command(
    store: &DocumentStore,
    directory: &UserDirectory,
    term: String,
    state: Option<DocumentState>,
) -> Result<()> {
    let documents = store.list().await;
    // Search as the sales supervisor, who sees the full set.
    let user = directory
        .list_users()
        .await
        .into_iter()
        .find(|u| u.id == sales_supervisor().id)
        .context("seeded directory is missing the sales supervisor")?;

    let filter = SearchFilter {
        term: Some(term),
        state,
        ..Default::default()
    };
    let matches: Vec<_> = search_view::search(&documents, &user, &filter);
    println!("{}", serde_json::to_string_pretty(&matches)?);
    Ok(())
}
