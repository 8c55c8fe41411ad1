//! apiforge CLI entrypoint
//! Parses command-line arguments and drives the extraction, prompt and
//! generation pipeline from the core library.

// Internal imports (std, crate)
use std::path::{Path, PathBuf};

// External imports (alphabetized)
use anyhow::{anyhow, Context};
use apiforge_core::{
    extract, generator_from_config, AppState, Config, CredentialStore, DataField, ErrorKind, Event,
    GenerationInvoker, Notice, ParamEdit, ParsedData, PromptComposer, ProviderKind,
    TargetLanguage, Workbench,
};
use chrono::{Local, NaiveDate};
use clap::{Parser, ValueEnum};
use tokio::fs;
use tokio::io::AsyncReadExt;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "apiforge")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file (default: <config dir>/apiforge/config.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Extract endpoint metadata from a JSON export
    Extract {
        /// Endpoint export file, or `-` for stdin
        input: String,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
    /// Print the code-generation prompt for an endpoint
    Prompt {
        #[command(flatten)]
        compose: ComposeArgs,
    },
    /// Generate client code for an endpoint
    Generate {
        #[command(flatten)]
        compose: ComposeArgs,
        /// Generation provider
        #[arg(long, value_enum)]
        provider: Option<ProviderKind>,
        /// Model name passed to the provider
        #[arg(long)]
        model: Option<String>,
        /// Write the generated code here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Manage the stored API key
    Key {
        #[command(subcommand)]
        action: KeyAction,
    },
}

#[derive(clap::Subcommand, Debug)]
enum KeyAction {
    /// Store an API key; prompts when no value is given
    Set { value: Option<String> },
    /// Remove the stored API key
    Clear,
    /// Report whether an API key is stored
    Status,
}

#[derive(clap::Args, Debug)]
struct ComposeArgs {
    /// Endpoint export file, or `-` for stdin
    input: String,
    /// Target language (swift, typescript, custom)
    #[arg(long)]
    target: Option<TargetLanguage>,
    /// Custom rule template file
    #[arg(long)]
    template: Option<PathBuf>,
    /// Date stamped into the prompt (YYYY-MM-DD, default: today)
    #[arg(long)]
    date: Option<NaiveDate>,
    /// Replace a top-level field, e.g. --set url=/api/v2/users
    #[arg(long = "set", value_name = "FIELD=VALUE")]
    set: Vec<String>,
    /// Edit a request parameter, e.g. --set-param p1.description="User id"
    #[arg(long = "set-param", value_name = "ID.FIELD=VALUE")]
    set_param: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Yaml,
}

/// Edits requested on the command line, already validated
#[derive(Debug, PartialEq)]
struct Edits {
    fields: Vec<(DataField, String)>,
    params: Vec<(String, ParamEdit)>,
}

impl Edits {
    fn from_args(args: &ComposeArgs) -> anyhow::Result<Self> {
        let fields = args
            .set
            .iter()
            .map(String::as_str)
            .map(parse_field_edit)
            .collect::<anyhow::Result<_>>()?;
        let params = args
            .set_param
            .iter()
            .map(String::as_str)
            .map(parse_param_edit)
            .collect::<anyhow::Result<_>>()?;
        Ok(Self { fields, params })
    }

    fn events(&self) -> impl Iterator<Item = Event> + '_ {
        let fields = self
            .fields
            .iter()
            .map(|(field, value)| Event::DataEdited(*field, value.clone()));
        let params = self
            .params
            .iter()
            .map(|(param_id, edit)| Event::RequestParamEdited {
                param_id: param_id.clone(),
                edit: edit.clone(),
            });
        fields.chain(params)
    }

    fn apply(&self, data: ParsedData) -> ParsedData {
        let data = self
            .fields
            .iter()
            .fold(data, |d, (field, value)| d.with_field(*field, value.as_str()));
        self.params
            .iter()
            .fold(data, |d, (id, edit)| d.with_request_param(id, edit))
    }
}

/// Parse `field=value`
fn parse_field_edit(arg: &str) -> anyhow::Result<(DataField, String)> {
    let (field, value) = arg
        .split_once('=')
        .ok_or_else(|| anyhow!("Invalid --set '{arg}': expected FIELD=VALUE"))?;
    let field = field.parse::<DataField>().map_err(user_error)?;
    Ok((field, value.to_string()))
}

/// Parse `param_id.field=value`; the id may itself contain dots
fn parse_param_edit(arg: &str) -> anyhow::Result<(String, ParamEdit)> {
    let (target, value) = arg
        .split_once('=')
        .ok_or_else(|| anyhow!("Invalid --set-param '{arg}': expected ID.FIELD=VALUE"))?;
    let (param_id, field) = target
        .rsplit_once('.')
        .filter(|(id, _)| !id.is_empty())
        .ok_or_else(|| anyhow!("Invalid --set-param '{arg}': expected ID.FIELD=VALUE"))?;
    let edit = ParamEdit::parse(field, value).map_err(user_error)?;
    Ok((param_id.to_string(), edit))
}

/// Message shown to the user for a failure of the given kind
fn describe(notice: &Notice) -> String {
    match notice.kind {
        ErrorKind::EmptyInput => "Input is empty. Provide the endpoint's JSON export.".to_string(),
        ErrorKind::Parse => format!("Input is not valid JSON ({}).", notice.message),
        ErrorKind::MissingCredential => {
            "No API key stored. Run `apiforge key set` first.".to_string()
        }
        ErrorKind::Auth => {
            "The API key was rejected and has been erased. Run `apiforge key set` with a valid key."
                .to_string()
        }
        ErrorKind::Generation => format!("Generation failed: {}. Try again.", notice.message),
        ErrorKind::Validation | ErrorKind::Internal => notice.message.clone(),
    }
}

fn user_error(err: apiforge_core::Error) -> anyhow::Error {
    anyhow!(describe(&Notice::from(&err)))
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let path = match path {
        Some(path) => Some(path.to_path_buf()),
        None => Config::default_path().filter(|p| p.exists()),
    };
    let config = match path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            Config::from_file(&path)
                .await
                .with_context(|| format!("Failed to load config {}", path.display()))?
        }
        None => Config::default(),
    };
    Ok(config)
}

/// Apply the target and template flags on top of the loaded config
fn apply_compose_overrides(config: &mut Config, args: &ComposeArgs) {
    if let Some(template) = &args.template {
        config.target = TargetLanguage::Custom;
        config.template_path = Some(template.display().to_string());
    } else if let Some(target) = args.target {
        config.target = target;
    }
}

async fn read_input(input: &str) -> anyhow::Result<String> {
    if input == "-" {
        let mut text = String::new();
        tokio::io::stdin()
            .read_to_string(&mut text)
            .await
            .context("Failed to read endpoint export from stdin")?;
        Ok(text)
    } else {
        fs::read_to_string(input)
            .await
            .with_context(|| format!("Failed to read endpoint export {input}"))
    }
}

async fn write_output(path: &Path, code: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await.with_context(|| {
                format!("Failed to create output directory {}", parent.display())
            })?;
        }
    }
    fs::write(path, code)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))
}

fn check_notice(state: &AppState) -> anyhow::Result<()> {
    match &state.notice {
        Some(notice) => Err(anyhow!(describe(notice))),
        None => Ok(()),
    }
}

async fn run_extract(input: &str, format: OutputFormat) -> anyhow::Result<()> {
    let data = extract(&read_input(input).await?).map_err(user_error)?;
    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(&data)?,
        OutputFormat::Yaml => serde_yaml::to_string(&data)?,
    };
    println!("{rendered}");
    Ok(())
}

async fn run_prompt(mut config: Config, args: &ComposeArgs) -> anyhow::Result<()> {
    let edits = Edits::from_args(args)?;
    apply_compose_overrides(&mut config, args);
    config.validate().map_err(user_error)?;

    let composer = PromptComposer::from_config(&config)
        .await
        .map_err(user_error)?;
    let data = edits.apply(extract(&read_input(&args.input).await?).map_err(user_error)?);
    let date = args.date.unwrap_or_else(|| Local::now().date_naive());
    let prompt = composer.compose(&data, date).map_err(user_error)?;
    println!("{prompt}");
    Ok(())
}

async fn run_generate(
    mut config: Config,
    args: &ComposeArgs,
    provider: Option<ProviderKind>,
    model: Option<String>,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let edits = Edits::from_args(args)?;
    apply_compose_overrides(&mut config, args);
    if let Some(provider) = provider {
        config.provider = provider;
    }
    if model.is_some() {
        config.model = model;
    }
    config.validate().map_err(user_error)?;

    let composer = PromptComposer::from_config(&config)
        .await
        .map_err(user_error)?;
    let generator = generator_from_config(&config).map_err(user_error)?;
    let credentials = CredentialStore::open(config.credential_path())
        .await
        .map_err(user_error)?;
    let mut bench = Workbench::new(GenerationInvoker::new(composer, generator), credentials);

    bench.dispatch(Event::InputChanged(read_input(&args.input).await?));
    check_notice(bench.dispatch(Event::ParseRequested))?;
    for event in edits.events() {
        bench.dispatch(event);
    }

    let date = args.date.unwrap_or_else(|| Local::now().date_naive());
    eprintln!("Generating {} code with {}...", config.target, config.provider);
    let state = bench.generate(date).await;
    check_notice(state)?;
    let code = state
        .output
        .as_deref()
        .ok_or_else(|| anyhow!("Generation produced no output"))?;

    match output {
        Some(path) => {
            write_output(path, code).await?;
            eprintln!("Wrote {}", path.display());
        }
        None => println!("{code}"),
    }
    Ok(())
}

async fn run_key(config: &Config, action: &KeyAction) -> anyhow::Result<()> {
    let mut store = CredentialStore::open(config.credential_path())
        .await
        .map_err(user_error)?;
    match action {
        KeyAction::Set { value } => {
            let value = match value {
                Some(value) => value.clone(),
                None => dialoguer::Password::new()
                    .with_prompt("API key")
                    .interact()
                    .context("Failed to read API key")?,
            };
            store.set(&value).await.map_err(user_error)?;
            println!("API key stored in {}", store.path().display());
        }
        KeyAction::Clear => {
            store.clear().await.map_err(user_error)?;
            println!("API key removed");
        }
        KeyAction::Status => {
            if store.is_present() {
                println!("API key: stored ({})", store.path().display());
            } else {
                println!("API key: not set");
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(cli.config.as_deref()).await?;
    match &cli.command {
        Commands::Extract { input, format } => run_extract(input, *format).await,
        Commands::Prompt { compose } => run_prompt(config, compose).await,
        Commands::Generate {
            compose,
            provider,
            model,
            output,
        } => {
            run_generate(
                config,
                compose,
                *provider,
                model.clone(),
                output.as_deref(),
            )
            .await
        }
        Commands::Key { action } => run_key(&config, action).await,
    }
}
