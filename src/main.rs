//! `devlink` command-line client.
//!
//! Manages a DevLink bookmark collection from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Log in (prompts for anything not given)
//! devlink login --email ada@example.com
//!
//! # Browse your collection
//! devlink list --search react --page 2
//! devlink list --category Tutorial --tags rust,async
//!
//! # Browse what others shared
//! devlink public
//!
//! # Manage resources
//! devlink add --title "Axum" --url https://github.com/tokio-rs/axum --tags rust,web
//! devlink edit 7 --public true
//! devlink delete 7
//! ```
//!
//! # Environment Variables
//!
//! See [`devlink_client::config`]. A `.env` file in the working directory is
//! loaded first.

use devlink_client::application::services::{
    AuthService, DashboardService, ResourceScope, ResourceStore,
};
use devlink_client::config::{self, Config};
use devlink_client::domain::Outcome;
use devlink_client::domain::entities::{
    Category, Credentials, Registration, Resource, ResourceFilters, ResourceId, ResourceInput,
};
use devlink_client::domain::repositories::{ResourceRepository, SessionRepository};
use devlink_client::infrastructure::http::{ApiClient, SessionExpiryInterceptor};
use devlink_client::infrastructure::session::FileSessionStore;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input, Password, Select};
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line client for the DevLink bookmarking API.
#[derive(Parser)]
#[command(name = "devlink")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and store the session
    Login {
        #[arg(short, long)]
        email: Option<String>,
    },

    /// Create an account
    Register {
        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        email: Option<String>,
    },

    /// Forget the stored session
    Logout,

    /// Show the logged-in user
    Whoami {
        /// Ask the API instead of reading the cached profile
        #[arg(long)]
        refresh: bool,
    },

    /// List your resources
    List(ListArgs),

    /// Browse public resources
    Public(ListArgs),

    /// Show one resource
    Show { id: u64 },

    /// Save a new resource
    Add(ResourceArgs),

    /// Edit a resource; only the given fields change
    Edit {
        id: u64,

        #[command(flatten)]
        fields: ResourceArgs,
    },

    /// Delete a resource
    Delete {
        id: u64,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Record a visit and print the URL
    Visit {
        id: u64,

        /// Print this URL instead of looking the resource up
        #[arg(long)]
        url: Option<String>,
    },

    /// Collection overview
    Dashboard,
}

#[derive(Args)]
struct ListArgs {
    /// Full-text search term
    #[arg(short, long)]
    search: Option<String>,

    #[arg(short, long)]
    category: Option<String>,

    /// Comma-separated tags
    #[arg(short, long)]
    tags: Option<String>,

    /// Only public resources
    #[arg(long, conflicts_with = "private")]
    public: bool,

    /// Only private resources
    #[arg(long)]
    private: bool,

    #[arg(short, long, default_value_t = 1)]
    page: u32,
}

impl ListArgs {
    fn filters(&self) -> ResourceFilters {
        ResourceFilters {
            search: self.search.clone().unwrap_or_default(),
            category: self.category.clone().unwrap_or_default(),
            tags: self.tags.clone().unwrap_or_default(),
            is_public: match (self.public, self.private) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            },
        }
    }
}

#[derive(Args)]
struct ResourceArgs {
    #[arg(long)]
    title: Option<String>,

    #[arg(long)]
    url: Option<String>,

    #[arg(short, long)]
    description: Option<String>,

    #[arg(short, long)]
    category: Option<String>,

    /// Comma-separated tags
    #[arg(short, long)]
    tags: Option<String>,

    /// Share with other users (true/false)
    #[arg(long)]
    public: Option<bool>,
}

impl ResourceArgs {
    fn apply(self, input: &mut ResourceInput) {
        if let Some(title) = self.title {
            input.title = title;
        }
        if let Some(url) = self.url {
            input.url = url;
        }
        if let Some(description) = self.description {
            input.description = description;
        }
        if let Some(category) = self.category {
            input.category = category;
        }
        if let Some(tags) = self.tags {
            input.tags = tags;
        }
        if let Some(public) = self.public {
            input.is_public = public;
        }
    }
}

/// Wired-up services shared by the command handlers.
struct App {
    config: Config,
    client: Arc<ApiClient>,
    session: Arc<dyn SessionRepository>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env().context("Invalid configuration")?;
    init_tracing(&config)?;
    config.print_summary();

    let session: Arc<dyn SessionRepository> =
        Arc::new(FileSessionStore::new(config.session_file.clone()));

    let client = ApiClient::builder(&config)
        .session(session.clone())
        .interceptor(SessionExpiryInterceptor::new(
            session.clone(),
            on_session_expired,
        ))
        .build()
        .context("Failed to build API client")?;

    let app = App {
        config,
        client: Arc::new(client),
        session,
    };

    match cli.command {
        Commands::Login { email } => login(&app, email).await?,
        Commands::Register { name, email } => register(&app, name, email).await?,
        Commands::Logout => logout(&app).await?,
        Commands::Whoami { refresh } => whoami(&app, refresh).await?,
        Commands::List(args) => list(&app, ResourceScope::Owned, args).await?,
        Commands::Public(args) => list(&app, ResourceScope::Public, args).await?,
        Commands::Show { id } => show(&app, ResourceId(id)).await?,
        Commands::Add(fields) => add(&app, fields).await?,
        Commands::Edit { id, fields } => edit(&app, ResourceId(id), fields).await?,
        Commands::Delete { id, yes } => delete(&app, ResourceId(id), yes).await?,
        Commands::Visit { id, url } => visit(&app, ResourceId(id), url).await?,
        Commands::Dashboard => dashboard(&app).await?,
    }

    Ok(())
}

/// Logs go to stderr so command output stays pipeable.
fn init_tracing(config: &Config) -> Result<()> {
    let env_filter = EnvFilter::try_new(&config.log_level)
        .with_context(|| format!("Invalid RUST_LOG filter '{}'", config.log_level))?;

    let registry = tracing_subscriber::registry().with(env_filter);

    if config.log_format == "json" {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()?;
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .try_init()?;
    }

    Ok(())
}

fn on_session_expired() {
    eprintln!(
        "{} {}",
        "Session expired, run".yellow(),
        "devlink login".bright_cyan().bold()
    );
}

fn auth_service(app: &App) -> AuthService<ApiClient> {
    AuthService::new(app.client.clone(), app.session.clone())
}

async fn login(app: &App, email: Option<String>) -> Result<()> {
    println!("{}", "🔑 Log in to DevLink".bright_blue().bold());
    println!();

    let email = match email {
        Some(e) => e,
        None => Input::new().with_prompt("Email").interact_text()?,
    };
    let password = Password::new().with_prompt("Password").interact()?;

    let session = auth_service(app)
        .login(&Credentials { email, password })
        .await
        .map_err(|e| anyhow::anyhow!(e.display_message("Login failed")))?;

    println!();
    println!(
        "{} {}",
        "✅ Logged in as".green().bold(),
        session.user.name.cyan()
    );

    Ok(())
}

async fn register(app: &App, name: Option<String>, email: Option<String>) -> Result<()> {
    println!("{}", "📝 Create a DevLink account".bright_blue().bold());
    println!();

    let name = match name {
        Some(n) => n,
        None => Input::new().with_prompt("Name").interact_text()?,
    };
    let email = match email {
        Some(e) => e,
        None => Input::new().with_prompt("Email").interact_text()?,
    };
    let password = Password::new()
        .with_prompt("Password")
        .with_confirmation("Confirm password", "Passwords do not match")
        .interact()?;

    let session = auth_service(app)
        .register(&Registration {
            name,
            email,
            password,
        })
        .await
        .map_err(|e| anyhow::anyhow!(e.display_message("Registration failed")))?;

    println!();
    println!(
        "{} {}",
        "✅ Welcome,".green().bold(),
        session.user.name.cyan()
    );

    Ok(())
}

async fn logout(app: &App) -> Result<()> {
    auth_service(app)
        .logout()
        .await
        .context("Failed to clear session")?;

    println!("{}", "👋 Logged out".green());
    Ok(())
}

async fn whoami(app: &App, refresh: bool) -> Result<()> {
    let auth = auth_service(app);

    let user = if refresh {
        match auth.profile().await {
            Ok(user) => Some(user),
            Err(e) if e.is_unauthorized() => None,
            Err(e) => anyhow::bail!(e.display_message("Failed to load profile")),
        }
    } else {
        auth.current_user().await.context("Failed to read session")?
    };

    match user {
        Some(user) => {
            println!("  Name:  {}", user.name.cyan());
            println!("  Email: {}", user.email.bright_white());
            println!("  ID:    {}", user.id.to_string().bright_black());
        }
        None => {
            println!("{}", "  Not logged in".yellow());
            println!("  Log in with: {}", "devlink login".bright_cyan());
        }
    }

    Ok(())
}

async fn list(app: &App, scope: ResourceScope, args: ListArgs) -> Result<()> {
    let store = ResourceStore::with_scope(app.client.clone(), scope, app.config.page_limit);

    let filters = args.filters();
    let heading = match scope {
        ResourceScope::Owned => "📚 Your resources",
        ResourceScope::Public => "🌍 Public resources",
    };

    store.fetch(Some(filters.clone()), Some(args.page)).await;

    let state = store.state();
    if let Some(error) = state.error {
        anyhow::bail!(error);
    }

    println!("{}", heading.bright_blue().bold());
    println!();

    if state.resources.is_empty() {
        println!("{}", "  No resources found".yellow());
        if filters.is_active() {
            println!("  Try a broader search");
        }
        return Ok(());
    }

    print_table(&state.resources);

    let p = state.pagination;
    println!();
    println!(
        "  Page {} of {}  ({} total)",
        p.page.to_string().bright_white().bold(),
        p.pages.max(1).to_string().bright_white(),
        p.total.to_string().bright_white()
    );
    if p.has_next() {
        println!(
            "  Next page: {}",
            format!("--page {}", p.page + 1).bright_cyan()
        );
    }

    Ok(())
}

fn print_table(resources: &[Resource]) {
    println!(
        "  {:<5} {:<36} {:<16} {:>6}  {}",
        "ID".bright_white().bold(),
        "Title".bright_white().bold(),
        "Category".bright_white().bold(),
        "Clicks".bright_white().bold(),
        "Visibility".bright_white().bold()
    );
    println!("  {}", "─".repeat(78).bright_black());

    for r in resources {
        let visibility = if r.is_public {
            "public".green()
        } else {
            "private".bright_black()
        };

        println!(
            "  {:<5} {:<36} {:<16} {:>6}  {}",
            r.id.to_string().bright_black(),
            truncate(&r.title, 36).cyan(),
            truncate(r.category_label(), 16),
            r.click_count,
            visibility
        );
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let cut: String = text.chars().take(width.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}

async fn show(app: &App, id: ResourceId) -> Result<()> {
    let resource = app
        .client
        .get(id)
        .await
        .map_err(|e| anyhow::anyhow!(e.display_message("Resource not found")))?;

    print_resource(&resource);
    Ok(())
}

fn print_resource(r: &Resource) {
    println!("{}", r.title.bright_white().bold());
    println!("  {}", r.url.bright_cyan().underline());
    if !r.description.is_empty() {
        println!();
        println!("  {}", r.description);
    }
    println!();
    println!("  ID:         {}", r.id.to_string().bright_black());
    println!("  Category:   {}", r.category_label());
    let tags = r.tag_list();
    if !tags.is_empty() {
        println!(
            "  Tags:       {}",
            tags.iter()
                .map(|t| format!("#{t}"))
                .collect::<Vec<_>>()
                .join(" ")
                .magenta()
        );
    }
    println!(
        "  Visibility: {}",
        if r.is_public { "public".green() } else { "private".bright_black() }
    );
    println!("  Clicks:     {}", r.click_count.to_string().bright_green());
    println!(
        "  Saved:      {}",
        r.created_at.format("%Y-%m-%d %H:%M").to_string().bright_black()
    );
}

async fn add(app: &App, fields: ResourceArgs) -> Result<()> {
    println!("{}", "➕ Save a resource".bright_blue().bold());
    println!();

    let mut input = ResourceInput::default();
    let prompt_category = fields.category.is_none();
    fields.apply(&mut input);

    if input.title.is_empty() {
        input.title = Input::new().with_prompt("Title").interact_text()?;
    }
    if input.url.is_empty() {
        input.url = Input::new().with_prompt("URL").interact_text()?;
    }
    if prompt_category {
        input.category = pick_category()?;
    }

    let store = ResourceStore::with_scope(
        app.client.clone(),
        ResourceScope::Owned,
        app.config.page_limit,
    );

    let created = store
        .create(input)
        .await
        .into_result()
        .map_err(anyhow::Error::msg)?;

    println!();
    println!("{}", "✅ Resource saved!".green().bold());
    println!();
    print_resource(&created);
    Ok(())
}

/// Category picker; the first entry leaves the resource uncategorized.
fn pick_category() -> Result<String> {
    let mut items = vec!["(none)"];
    items.extend(Category::ALL.iter().map(|c| c.as_str()));

    let selection = Select::new()
        .with_prompt("Category")
        .items(&items)
        .default(0)
        .interact()?;

    Ok(match selection {
        0 => String::new(),
        i => items[i].to_string(),
    })
}

async fn edit(app: &App, id: ResourceId, fields: ResourceArgs) -> Result<()> {
    let existing = app
        .client
        .get(id)
        .await
        .map_err(|e| anyhow::anyhow!(e.display_message("Resource not found")))?;

    let mut input = ResourceInput::from(&existing);
    fields.apply(&mut input);

    if input == ResourceInput::from(&existing) {
        println!("{}", "⚠️  Nothing to change".yellow());
        return Ok(());
    }

    let store = ResourceStore::with_scope(
        app.client.clone(),
        ResourceScope::Owned,
        app.config.page_limit,
    );

    let updated = store
        .update(id, input)
        .await
        .into_result()
        .map_err(anyhow::Error::msg)?;

    println!("{}", "✅ Resource updated!".green().bold());
    println!();
    print_resource(&updated);
    Ok(())
}

async fn delete(app: &App, id: ResourceId, skip_confirm: bool) -> Result<()> {
    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete resource {id}?"))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let store = ResourceStore::with_scope(
        app.client.clone(),
        ResourceScope::Owned,
        app.config.page_limit,
    );

    store
        .delete(id)
        .await
        .into_result()
        .map_err(anyhow::Error::msg)?;

    println!("{}", "✅ Resource deleted".green().bold());
    Ok(())
}

/// The click endpoint is open to anonymous users, so the visit is recorded
/// before the URL is resolved. Only the owner may read a resource by id;
/// anyone else falls back to the public listing.
async fn visit(app: &App, id: ResourceId, url: Option<String>) -> Result<()> {
    let public = ResourceStore::public(app.client.clone(), app.config.page_limit);

    if let Outcome::Failure(message) = public.record_visit(id).await {
        eprintln!("{} {}", "⚠️ ".yellow(), message.yellow());
    }

    if let Some(url) = url {
        println!("{url}");
        return Ok(());
    }

    let logged_in = app
        .session
        .token()
        .await
        .context("Failed to read session")?
        .is_some();

    let owned = if logged_in {
        app.client.get(id).await.ok()
    } else {
        None
    };

    let resource = match owned {
        Some(resource) => resource,
        None => public
            .locate(id)
            .await
            .ok_or_else(|| anyhow::anyhow!("Resource not found"))?,
    };

    println!("{}", resource.url);
    Ok(())
}

async fn dashboard(app: &App) -> Result<()> {
    let summary = DashboardService::new(app.client.clone())
        .summary()
        .await
        .map_err(|e| anyhow::anyhow!(e.display_message("Failed to load dashboard")))?;

    println!("{}", "📊 Dashboard".bright_blue().bold());
    println!();
    println!(
        "  Resources:     {}",
        summary.total_resources.to_string().bright_green().bold()
    );
    println!(
        "  Public:        {}",
        summary.public_resources.to_string().bright_green().bold()
    );
    println!(
        "  Clicks:        {}",
        summary.total_clicks.to_string().bright_green().bold()
    );
    println!();

    if summary.recent.is_empty() {
        println!("{}", "  Nothing saved yet".yellow());
        println!("  Save one with: {}", "devlink add".bright_cyan());
    } else {
        println!("{}", "Recent".bright_white().bold());
        print_table(&summary.recent);
    }
    println!();

    Ok(())
}
