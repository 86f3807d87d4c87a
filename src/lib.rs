pub mod error;
pub mod config;
pub mod providers;
pub mod request;
pub mod prompt;
pub mod pipeline;
pub mod format;
pub mod client;
use serde::{Deserialize, Serialize};

pub use client::ArticleBackend;
pub use config::GeneratorConfig;
pub use error::{Error, ErrorKind};
pub use pipeline::{ContentPipeline, PipelineState};

/*

maqala: one user action, three dependent LLM calls.

  topic ──► keywords ──► article ──► title ──► GenerationResult
              (1)          (2)        (3)

src/
├── lib.rs          # Request/result types and backend channel API
├── error.rs        # Error enum and coarse kinds
├── config.rs       # Provider endpoint, stage budgets, length tiers
├── request.rs      # Completion request/response + service trait
├── providers/      # Concrete completion services
│   └── anthropic.rs
├── prompt.rs       # Prompt templates per language and dialect
├── pipeline.rs     # Three-stage state machine
├── format.rs       # Plain-text and standalone HTML export
├── client.rs       # Actor backend owning in-flight runs
└── main.rs         # CLI front end

*/

/// MAQALA BACKEND INTERFACE:

// ===== Generate =====

pub type GenerateReply = Result<GenerationResult, crate::error::Error>;
pub type GenerateReplySender
  = tokio::sync::mpsc::UnboundedSender<GenerateReply>;

pub struct GenerateArgs
{   pub request: GenerationRequest
  , pub reply: GenerateReplySender
}

// ===== Cancel =====

/// `Ok(true)` when an in-flight run was signalled
pub type CancelReply = Result<bool, crate::error::Error>;
pub type CancelReplySender
  = tokio::sync::mpsc::UnboundedSender<CancelReply>;

pub struct CancelArgs
{   pub reply: CancelReplySender
}

// ===== KillProcess =====

pub type KillProcessReply = Result<(), crate::error::Error>;
pub type KillProcessReplySender
  = tokio::sync::mpsc::UnboundedSender<KillProcessReply>;

pub struct KillProcessArgs
{   pub reply: KillProcessReplySender
}

// ===== ArticleHand (sender side) =====

pub struct ArticleHand
{   pub generate_tx
      : tokio::sync::mpsc::UnboundedSender<GenerateArgs>
  , pub cancel_tx
      : tokio::sync::mpsc::UnboundedSender<CancelArgs>
  , pub kill_process_tx
      : tokio::sync::mpsc::UnboundedSender<KillProcessArgs>
}

// ===== ArticleFoot (receiver side) =====

pub struct ArticleFoot
{   pub generate_rx
      : tokio::sync::mpsc::UnboundedReceiver<GenerateArgs>
  , pub cancel_rx
      : tokio::sync::mpsc::UnboundedReceiver<CancelArgs>
  , pub kill_process_rx
      : tokio::sync::mpsc::UnboundedReceiver<KillProcessArgs>
}

/// MAQALA STRUCTURES:

/// Regional variety used when writing Arabic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dialect
{   /// Modern Standard Arabic (فصحى)
    #[default]
    Standard
  , /// Algerian (dz)
    Algerian
  , /// Egyptian (eg)
    Egyptian
  , /// Tunisian (tn)
    Tunisian
  , /// Moroccan (ma)
    Moroccan
  , /// Jordanian (jo)
    Jordanian
  , /// Saudi (sa)
    Saudi
}

impl Dialect
{   pub const ALL: [Dialect; 7] =
    [   Dialect::Standard
      , Dialect::Algerian
      , Dialect::Egyptian
      , Dialect::Tunisian
      , Dialect::Moroccan
      , Dialect::Jordanian
      , Dialect::Saudi
    ];

    pub fn code(&self) -> &'static str
    {   match self
        {   Dialect::Standard => "standard"
          , Dialect::Algerian => "dz"
          , Dialect::Egyptian => "eg"
          , Dialect::Tunisian => "tn"
          , Dialect::Moroccan => "ma"
          , Dialect::Jordanian => "jo"
          , Dialect::Saudi => "sa"
        }
    }

    /// Name of the dialect, in Arabic
    pub fn display_name(&self) -> &'static str
    {   match self
        {   Dialect::Standard => "فصحى"
          , Dialect::Algerian => "جزائرية"
          , Dialect::Egyptian => "مصرية"
          , Dialect::Tunisian => "تونسية"
          , Dialect::Moroccan => "مغربية"
          , Dialect::Jordanian => "أردنية"
          , Dialect::Saudi => "سعودية"
        }
    }
}

impl std::str::FromStr for Dialect
{   type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err>
    {   let code = s.trim().to_lowercase();
        Dialect::ALL
          .iter()
          .copied()
          .find(|d| d.code() == code)
          .ok_or_else(|| {
            crate::error::Error::Validation(
              format!("Unknown dialect: {}", s)
            )
          })
    }
}

/// Language the article is written in. The dialect only exists
/// for Arabic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetLanguage
{   Arabic(Dialect)
  , English
  , French
}

impl Default for TargetLanguage
{   fn default() -> Self
    {   TargetLanguage::Arabic(Dialect::Standard)
    }
}

impl TargetLanguage
{   /// Build from a language code and an optional dialect code.
    /// The dialect is ignored for languages other than Arabic.
    pub fn from_codes(
      language: &str
    , dialect: Option<&str>
    ) -> Result<Self, crate::error::Error>
    {   match language.trim().to_lowercase().as_str()
        {   "ar" | "arabic" => {
              let dialect = match dialect
              {   Some(code) => code.parse::<Dialect>()?
                , None => Dialect::Standard
              };
              Ok(TargetLanguage::Arabic(dialect))
            }
          , "en" | "english" => Ok(TargetLanguage::English)
          , "fr" | "french" | "français" => Ok(TargetLanguage::French)
          , other => Err(crate::error::Error::Validation(
              format!("Unknown language: {}", other)
            ))
        }
    }

    pub fn code(&self) -> &'static str
    {   match self
        {   TargetLanguage::Arabic(_) => "ar"
          , TargetLanguage::English => "en"
          , TargetLanguage::French => "fr"
        }
    }

    pub fn display_name(&self) -> &'static str
    {   match self
        {   TargetLanguage::Arabic(_) => "العربية"
          , TargetLanguage::English => "English"
          , TargetLanguage::French => "Français"
        }
    }

    pub fn is_right_to_left(&self) -> bool
    {   matches!(self, TargetLanguage::Arabic(_))
    }

    /// Message shown when the topic is left empty
    pub fn empty_topic_notice(&self) -> &'static str
    {   match self
        {   TargetLanguage::Arabic(_) => "الرجاء إدخال موضوع المقالة"
          , TargetLanguage::English => "Please enter a topic"
          , TargetLanguage::French => "Veuillez entrer un sujet"
        }
    }

    /// Single notice shown for any failed run
    pub fn failure_notice(&self) -> &'static str
    {   match self
        {   TargetLanguage::Arabic(_) => "حدث خطأ في توليد المقالة"
          , TargetLanguage::English => "Error generating article"
          , TargetLanguage::French => "Erreur lors de la génération"
        }
    }
}

/// Desired article length. The token budget for each tier lives in
/// [`config::LengthBudgets`].
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize
)]
#[serde(rename_all = "lowercase")]
pub enum LengthTier
{   Short
  , #[default]
    Medium
  , Long
}

impl LengthTier
{   /// Approximate word count advertised for the tier
    pub fn nominal_words(&self) -> usize
    {   match self
        {   LengthTier::Short => 2000
          , LengthTier::Medium => 3000
          , LengthTier::Long => 5000
        }
    }
}

impl std::str::FromStr for LengthTier
{   type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err>
    {   match s.trim().to_lowercase().as_str()
        {   "short" => Ok(LengthTier::Short)
          , "medium" => Ok(LengthTier::Medium)
          , "long" => Ok(LengthTier::Long)
          , _ => Err(crate::error::Error::Validation(
              format!("Unknown length tier: {}", s)
            ))
        }
    }
}

/// One user submission. Consumed once by the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest
{   pub topic: String
  , pub language: TargetLanguage
  , pub length: LengthTier
  , /// Keywords typed by the user; these win over suggested ones
    pub user_keywords: Option<String>
}

impl GenerationRequest
{   pub fn new(
      topic: impl Into<String>
    , language: TargetLanguage
    ) -> Self
    {   GenerationRequest
        {   topic: topic.into()
          , language
          , length: LengthTier::default()
          , user_keywords: None
        }
    }

    pub fn with_length(mut self, length: LengthTier) -> Self
    {   self.length = length;
        self
    }

    pub fn with_keywords(mut self, keywords: impl Into<String>) -> Self
    {   self.user_keywords = Some(keywords.into());
        self
    }

    /// Keyword list to use: the user's if non-blank, else the
    /// suggested list if non-blank, else none.
    pub fn effective_keywords<'a>(
      &'a self
    , suggested: Option<&'a str>
    ) -> Option<&'a str>
    {   self.user_keywords
          .as_deref()
          .map(str::trim)
          .filter(|k| !k.is_empty())
          .or_else(|| {
            suggested.map(str::trim).filter(|k| !k.is_empty())
          })
    }

    pub fn validate(&self) -> Result<(), crate::error::Error>
    {   if self.topic.trim().is_empty()
        {   return Err(crate::error::Error::Validation(
              self.language.empty_topic_notice().to_string()
            ));
        }
        Ok(())
    }
}

/// Output of a fully successful run. Never built partially.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult
{   pub suggested_keywords: String
  , pub article_body: String
  , pub title: String
}
