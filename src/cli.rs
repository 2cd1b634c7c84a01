use colored::Colorize;
use envbind::{BindOptions, Binder, EnvRecord, FromEnv, OptionalPolicy, ProcessEnv, Record, docs};

#[derive(Debug, Default, EnvRecord)]
pub struct DatabaseConfig {
    #[field(env = "ENVBIND_TEST_DB_URL", doc = "Database connection string")]
    pub url: String,

    #[field(env = "ENVBIND_TEST_DB_POOL", doc = "Connection pool size")]
    pub pool: Option<u32>,
}

#[derive(Debug, Default, EnvRecord)]
pub struct WorkingConfig {
    #[field(env = "ENVBIND_TEST_HOST", doc = "Server host", required)]
    pub host: String,

    #[field(env = "ENVBIND_TEST_PORT", doc = "Server port")]
    pub port: u16,

    #[field(env = "ENVBIND_TEST_DEBUG", doc = "Enable debug mode")]
    pub debug: bool,

    #[field(env = "ENVBIND_TEST_ORIGINS", doc = "Allowed origins, ':' separated")]
    pub origins: Vec<String>,

    #[field(nested)]
    pub database: DatabaseConfig,
}

#[derive(Debug, Default, EnvRecord)]
pub struct ErrorConfig {
    #[field(env = "ENVBIND_TEST_MISSING", doc = "Never set", required)]
    pub missing: String,
}

fn main() {
    dotenvy::from_filename("./test.env").ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    match std::env::args().nth(1) {
        Some(arg) => match arg.as_str() {
            "default" => load_config(),
            "error" => load_config_error(),
            "error_result" => load_config_error_result(),
            "docs" => generate_docs(),
            "metadata" => show_metadata(),
            _ => println!(
                "unknown arg: {}. Available: default, error, error_result, docs, metadata",
                arg
            ),
        },
        None => {
            println!("Usage: envbind-cli [command]");
            println!("Commands:");
            println!("  default      - Load config from the environment");
            println!("  error        - Load config with a missing required variable (panics)");
            println!("  error_result - Load config with a missing required variable");
            println!("  docs         - Generate CONFIG.md documentation");
            println!("  metadata     - Show configuration metadata");
        }
    };
}

fn load_config() {
    let mut config = WorkingConfig::default();
    let binder = Binder::new(ProcessEnv).with_options(BindOptions {
        optional_policy: OptionalPolicy::Allocate,
    });

    match binder.bind(&mut config) {
        Ok(()) => {
            println!("Config loaded successfully!");
            println!("  host: {}", config.host);
            println!("  port: {}", config.port);
            println!("  debug: {}", config.debug);
            println!("  origins: {:?}", config.origins);
            println!("  database.url: {}", config.database.url);
            println!("  database.pool: {:?}", config.database.pool);
        }
        Err(e) => eprintln!("{} {}", "Error:".red().bold(), e),
    }
}

fn load_config_error() {
    let _config = ErrorConfig::load();
    println!("you should not see this");
}

fn load_config_error_result() {
    match ErrorConfig::from_env() {
        Ok(config) => println!("Config loaded successfully: {:?}", config),
        Err(e) => {
            eprintln!("Failed to load config:");
            eprintln!("\t- {}", e);
        }
    }
    println!("all done");
}

fn generate_docs() {
    println!("Generating documentation for WorkingConfig...");
    match docs::write_docs(WorkingConfig::describe(), "CONFIG.md") {
        Ok(_) => println!("✓ Documentation written to CONFIG.md"),
        Err(e) => eprintln!("✗ Failed to write documentation: {}", e),
    }
}

fn show_metadata() {
    let shape = WorkingConfig::describe();
    println!("{} metadata:", shape.name);
    for field in &shape.fields {
        println!("  {}:", field.name);
        println!("    type: {}", field.kind);
        if let Some(env) = field.env {
            println!("    env: {}", env);
        }
        println!("    required: {}", field.required.unwrap_or("false"));
        if let Some(doc) = field.doc {
            println!("    description: {}", doc);
        }
    }
}
