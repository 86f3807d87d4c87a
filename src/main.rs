use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, error, info};
use std::path::PathBuf;

use maqala::{
  format, ArticleBackend, GenerationRequest, GenerationResult,
  GeneratorConfig, LengthTier, TargetLanguage,
};

/// Generate an SEO article (keywords, body, title) with an LLM
#[derive(Parser, Debug)]
#[command(name = "maqala", version, about)]
struct Args
{   /// Article topic
    #[arg(short, long)]
    topic: String

  , /// Language code: ar, en or fr
    #[arg(short, long, default_value = "ar")]
    language: String

  , /// Arabic dialect: standard, dz, eg, tn, ma, jo, sa
    #[arg(short, long)]
    dialect: Option<String>

  , /// Article length: short, medium or long
    #[arg(long, default_value = "medium")]
    length: String

  , /// Keywords to weave in (skips the suggested ones)
    #[arg(short, long)]
    keywords: Option<String>

  , /// Output format: text, html or json
    #[arg(short, long, default_value = "text")]
    format: String

  , /// Write the output here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>

  , /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>

  , /// API key (overrides ANTHROPIC_API_KEY)
    #[arg(long)]
    api_key: Option<String>

  , /// Model identifier
    #[arg(long)]
    model: Option<String>

  , /// API base URL
    #[arg(long)]
    api_base: Option<String>

  , /// Enable debug logging
    #[arg(short, long)]
    verbose: bool
}

impl Args
{   fn load_config(&self) -> Result<GeneratorConfig>
    {   let mut config = match &self.config
        {   Some(path) => GeneratorConfig::from_file(path)?
          , None => GeneratorConfig::default()
        }.apply_env();

        if let Some(key) = &self.api_key
        {   config.provider.api_key = Some(key.clone());
        }
        if let Some(model) = &self.model
        {   config.provider.model = model.clone();
        }
        if let Some(base) = &self.api_base
        {   config.provider.api_base = base.clone();
        }
        Ok(config)
    }

    fn build_request(&self) -> Result<GenerationRequest>
    {   let language = TargetLanguage::from_codes(
          &self.language,
          self.dialect.as_deref()
        )?;
        let length: LengthTier = self.length.parse()?;
        let mut request = GenerationRequest::new(self.topic.clone(), language)
          .with_length(length);
        if let Some(keywords) = &self.keywords
        {   request = request.with_keywords(keywords.clone());
        }
        Ok(request)
    }
}

fn render(
  kind: &str
, result: &GenerationResult
, request: &GenerationRequest
) -> Result<String>
{   match kind
    {   "text" => Ok(format!(
          "{}\n\n{}\n",
          result.title,
          format::to_plain_text(result)
        ))
      , "html" => Ok(format::to_standalone_html(result, request))
      , "json" => serde_json::to_string_pretty(result)
          .context("Failed to serialize result")
      , other => anyhow::bail!("Unknown output format: {}", other)
    }
}

#[tokio::main]
async fn main() -> Result<()>
{   let args = Args::parse();

    let level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(
      env_logger::Env::default().default_filter_or(level)
    ).init();

    let request = args.build_request()?;
    if request.validate().is_err()
    {   eprintln!("{}", request.language.empty_topic_notice());
        std::process::exit(2);
    }
    // Reject a bad --format before spending any tokens
    if !matches!(args.format.as_str(), "text" | "html" | "json")
    {   anyhow::bail!("Unknown output format: {}", args.format);
    }

    let language_name = match request.language
    {   TargetLanguage::Arabic(dialect) => format!(
          "{} ({})",
          request.language.display_name(),
          dialect.display_name()
        )
      , other => other.display_name().to_string()
    };
    info!(
      "Generating a {:?} article in {} (~{} words)",
      request.length,
      language_name,
      request.length.nominal_words()
    );

    let config = args.load_config()?;
    debug!("Using model {} at {}", config.provider.model, config.provider.api_base);
    let backend = ArticleBackend::new(config)?;

    let language = request.language;
    let mut reply_rx = backend.generate(request.clone()).await?;

    let reply = tokio::select!
    {   reply = reply_rx.recv() => reply
      , _ = tokio::signal::ctrl_c() => {
          info!("Interrupted, cancelling generation");
          let _ = backend.cancel().await;
          reply_rx.recv().await
        }
    };

    let result = match reply
    {   Some(Ok(result)) => result
      , Some(Err(e)) => {
          error!("Generation failed ({:?}): {}", e.kind(), e);
          eprintln!("{}", language.failure_notice());
          let _ = backend.shutdown().await;
          std::process::exit(1);
        }
      , None => {
          let _ = backend.shutdown().await;
          anyhow::bail!("Backend stopped before replying");
        }
    };
    backend.shutdown().await?;

    let rendered = render(&args.format, &result, &request)?;
    match &args.output
    {   Some(path) => {
          std::fs::write(path, rendered)
            .with_context(|| format!("Failed to write {}", path.display()))?;
          info!("Wrote {}", path.display());
        }
      , None => print!("{}", rendered)
    }
    Ok(())
}
