//! Prompt templates for the three pipeline stages.
//!
//! Everything here is a pure function of its arguments. The article
//! template is chosen by [`TargetLanguage`]; Arabic additionally picks
//! an opening instruction by [`Dialect`], which for every regional
//! dialect carries a handful of vernacular words to steer the model.

use crate::{Dialect, GenerationRequest, TargetLanguage};

/// Fixed wording of one language's article prompt
struct ArticleTemplate
{   intro: &'static str
  , requirements_heading: &'static str
  , requirements: [&'static str; 5]
  , keywords_clause: &'static str
  , closing_requirement: &'static str
  , qualities_heading: &'static str
  , qualities: [&'static str; 4]
}

const ARABIC: ArticleTemplate = ArticleTemplate
{   intro: "اكتب مقالة حصرية وطبيعية جداً عن: "
  , requirements_heading: "المتطلبات:"
  , requirements:
    [   "اكتب بأسلوب إنساني طبيعي تماماً كأنك كاتب محترف"
      , "استخدم تنوع في طول الجمل وبنية الفقرات"
      , "أضف لمسات شخصية وأمثلة واقعية"
      , "تجنب التكرار والأنماط الآلية"
      , "قسم المحتوى إلى فقرات منطقية مع عناوين فرعية"
    ]
  , keywords_clause: "دمج الكلمات المفتاحية بشكل طبيعي: "
  , closing_requirement: "اجعل الأسلوب جذاباً وممتعاً للقراءة"
  , qualities_heading: "المقالة يجب أن تكون:"
  , qualities:
    [   "أصلية 100% بدون نسخ"
      , "طبيعية لا تبدو مولدة آلياً"
      , "غنية بالمعلومات والتفاصيل"
      , "منسقة بشكل احترافي"
    ]
};

const ENGLISH: ArticleTemplate = ArticleTemplate
{   intro: "Write an exclusive, natural, and highly human-like article about: "
  , requirements_heading: "Requirements:"
  , requirements:
    [   "Write in a very natural, human style as if you're a professional writer"
      , "Use varied sentence lengths and paragraph structures"
      , "Add personal touches and real-world examples"
      , "Avoid repetition and mechanical patterns"
      , "Divide content into logical paragraphs with subheadings"
    ]
  , keywords_clause: "Naturally incorporate these keywords: "
  , closing_requirement: "Make the style engaging and enjoyable to read"
  , qualities_heading: "The article must be:"
  , qualities:
    [   "100% original without copying"
      , "Natural and not appearing AI-generated"
      , "Rich in information and details"
      , "Professionally formatted"
    ]
};

const FRENCH: ArticleTemplate = ArticleTemplate
{   intro: "Rédigez un article exclusif, naturel et très humain sur: "
  , requirements_heading: "Exigences:"
  , requirements:
    [   "Écrivez dans un style très naturel et humain comme un écrivain professionnel"
      , "Utilisez des longueurs de phrases variées et des structures de paragraphes diverses"
      , "Ajoutez des touches personnelles et des exemples concrets"
      , "Évitez la répétition et les patterns mécaniques"
      , "Divisez le contenu en paragraphes logiques avec des sous-titres"
    ]
  , keywords_clause: "Incorporez naturellement ces mots-clés: "
  , closing_requirement: "Rendez le style engageant et agréable à lire"
  , qualities_heading: "L'article doit être:"
  , qualities:
    [   "100% original sans copie"
      , "Naturel et ne semblant pas généré par IA"
      , "Riche en informations et détails"
      , "Formaté professionnellement"
    ]
};

fn article_template(language: TargetLanguage) -> &'static ArticleTemplate
{   match language
    {   TargetLanguage::Arabic(_) => &ARABIC
      , TargetLanguage::English => &ENGLISH
      , TargetLanguage::French => &FRENCH
    }
}

/// Vernacular words embedded in the prompt for a dialect.
/// Empty for standard Arabic.
pub fn dialect_markers(dialect: Dialect) -> &'static [&'static str]
{   match dialect
    {   Dialect::Standard => &[]
      , Dialect::Algerian => &["راني", "نروح", "بصح", "برك", "كاين"]
      , Dialect::Egyptian => &["عايز", "بتاع", "علشان", "خالص", "ده"]
      , Dialect::Tunisian => &["باهي", "برشا", "توة", "ياسر", "مالا"]
      , Dialect::Moroccan => &["بغيت", "غادي", "بزاف", "واخا", "فين"]
      , Dialect::Jordanian => &["بدي", "هسا", "كتير", "مشان", "يعني"]
      , Dialect::Saudi => &["ودي", "مرة", "وايد", "لين", "زين"]
    }
}

fn dialect_adjective(dialect: Dialect) -> Option<&'static str>
{   match dialect
    {   Dialect::Standard => None
      , Dialect::Algerian => Some("الجزائرية")
      , Dialect::Egyptian => Some("المصرية")
      , Dialect::Tunisian => Some("التونسية")
      , Dialect::Moroccan => Some("المغربية")
      , Dialect::Jordanian => Some("الأردنية")
      , Dialect::Saudi => Some("السعودية")
    }
}

/// Opening sentence of an Arabic article prompt
pub fn dialect_instruction(dialect: Dialect) -> String
{   match dialect_adjective(dialect)
    {   None => "اكتب بالعربية الفصحى".to_string()
      , Some(adjective) => format!(
          "اكتب باللهجة {} العامية بطريقة طبيعية (استخدم كلمات مثل: {})",
          adjective,
          dialect_markers(dialect).join("، ")
        )
    }
}

/// Prompt for the article stage.
///
/// `suggested_keywords` is only used when the request carries no
/// keywords of its own. With no keywords at all the keyword line is
/// left out.
pub fn article_prompt(
  request: &GenerationRequest
, suggested_keywords: Option<&str>
) -> String
{   let template = article_template(request.language);
    let mut lines: Vec<String> = Vec::with_capacity(16);

    let opening = match request.language
    {   TargetLanguage::Arabic(dialect) => format!(
          "{}. {}{}",
          dialect_instruction(dialect),
          template.intro,
          request.topic
        )
      , _ => format!("{}{}", template.intro, request.topic)
    };
    lines.push(opening);
    lines.push(String::new());

    lines.push(template.requirements_heading.to_string());
    for requirement in template.requirements
    {   lines.push(format!("- {}", requirement));
    }
    if let Some(keywords) = request.effective_keywords(suggested_keywords)
    {   lines.push(format!("- {}{}", template.keywords_clause, keywords));
    }
    lines.push(format!("- {}", template.closing_requirement));
    lines.push(String::new());

    lines.push(template.qualities_heading.to_string());
    for (i, quality) in template.qualities.iter().enumerate()
    {   lines.push(format!("{}. {}", i + 1, quality));
    }

    lines.join("\n")
}

/// Prompt for the keyword stage
pub fn keywords_prompt(topic: &str, language: TargetLanguage) -> String
{   match language
    {   TargetLanguage::Arabic(_) => format!(
          "بناءً على موضوع: \"{}\"، اقترح 8-12 كلمة مفتاحية مهمة ومرتبطة بالموضوع لتحسين محركات البحث (SEO). أعطني الكلمات مفصولة بفواصل فقط، بدون أي شرح أو ترقيم.",
          topic
        )
      , TargetLanguage::French => format!(
          "Basé sur le sujet: \"{}\", suggérez 8-12 mots-clés importants et pertinents pour le SEO. Donnez-moi uniquement les mots-clés séparés par des virgules, sans explication.",
          topic
        )
      , TargetLanguage::English => format!(
          "Based on the topic: \"{}\", suggest 8-12 important and relevant keywords for SEO. Give me only the keywords separated by commas, without any explanation.",
          topic
        )
    }
}

/// Prompt for the title stage. The caller decides how much of the
/// article to pass in.
pub fn title_prompt(article_excerpt: &str, language: TargetLanguage) -> String
{   let ask = match language
    {   TargetLanguage::Arabic(_) => {
          "بناءً على المقالة التالية، اقترح عنواناً جذاباً ومختصراً (5-10 كلمات فقط). أعطني العنوان فقط بدون أي شرح أو علامات:"
        }
      , TargetLanguage::French => {
          "Basé sur l'article suivant, suggérez un titre accrocheur et concis (5-10 mots seulement). Donnez-moi uniquement le titre sans explication:"
        }
      , TargetLanguage::English => {
          "Based on the following article, suggest a catchy and concise title (5-10 words only). Give me only the title without any explanation:"
        }
    };
    format!("{}\n\n{}", ask, article_excerpt)
}

/// First `max_chars` characters of `text`, cut on a char boundary
pub fn leading_chars(text: &str, max_chars: usize) -> &str
{   match text.char_indices().nth(max_chars)
    {   Some((idx, _)) => &text[..idx]
      , None => text
    }
}
