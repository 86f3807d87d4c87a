//! Plain-text and standalone HTML export of a generated article

use crate::prompt::leading_chars;
use crate::{GenerationRequest, GenerationResult};

const MAX_HEADING_LEVEL: usize = 6;
const DESCRIPTION_CHARS: usize = 160;

/// One blank-line separated chunk of the article body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block
{   Heading
    {   level: usize
      , text: String
    }
  , Paragraph(String)
}

impl Block
{   /// A chunk is a heading only when its first character is '#';
    /// leading line breaks left over from a run of blank lines do not
    /// count, but indentation does.
    fn parse(chunk: &str) -> Block
    {   let chunk = chunk.trim_start_matches('\n').trim_end();
        let hashes = chunk.chars().take_while(|c| *c == '#').count();
        if hashes == 0
        {   return Block::Paragraph(chunk.trim_start().to_string());
        }
        // '#' is one byte, so the char count is also the byte offset
        Block::Heading
        {   level: hashes.min(MAX_HEADING_LEVEL)
          , text: chunk[hashes..].trim_start().to_string()
        }
    }
}

/// Split an article body on blank lines, dropping empty chunks
pub fn split_blocks(body: &str) -> Vec<Block>
{   body.replace("\r\n", "\n")
      .split("\n\n")
      .filter(|chunk| !chunk.trim().is_empty())
      .map(Block::parse)
      .collect()
}

pub fn escape_html(text: &str) -> String
{   text.replace('&', "&amp;")
      .replace('<', "&lt;")
      .replace('>', "&gt;")
      .replace('"', "&quot;")
      .replace('\'', "&#39;")
}

/// Payload for the plain-text copy action
pub fn to_plain_text(result: &GenerationResult) -> String
{   result.article_body.clone()
}

/// Self-contained HTML page for the article.
///
/// All article-derived text is escaped before it is placed in the
/// document, attributes included.
pub fn to_standalone_html(
  result: &GenerationResult
, request: &GenerationRequest
) -> String
{   let title = escape_html(&result.title);
    let description = escape_html(
      leading_chars(&result.article_body, DESCRIPTION_CHARS)
    );
    let keywords_meta = request
      .effective_keywords(Some(&result.suggested_keywords))
      .map(|k| {
        format!(
          "    <meta name=\"keywords\" content=\"{}\">\n",
          escape_html(k)
        )
      })
      .unwrap_or_default();
    let direction = if request.language.is_right_to_left()
    {   "\n            direction: rtl;\n            text-align: right;"
    } else
    {   ""
    };

    let mut html = format!(
r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <meta name="description" content="{description}">
{keywords_meta}    <style>
        body {{
            font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
            line-height: 1.8;
            max-width: 800px;
            margin: 0 auto;
            padding: 20px;
            color: #333;{direction}
        }}
        h1 {{
            color: #2c3e50;
            font-size: 2.5em;
            margin-bottom: 20px;
        }}
        h2 {{
            color: #34495e;
            font-size: 1.8em;
            margin-top: 30px;
            margin-bottom: 15px;
        }}
        p {{
            margin-bottom: 15px;
            text-align: justify;
        }}
    </style>
</head>
<body>
    <article>
        <h1>{title}</h1>
"#,
      lang = request.language.code(),
      title = title,
      description = description,
      keywords_meta = keywords_meta,
      direction = direction,
    );

    for block in split_blocks(&result.article_body)
    {   match block
        {   Block::Heading { level, text } => {
              html.push_str(&format!(
                "        <h{level}>{}</h{level}>\n",
                escape_html(&text),
                level = level
              ));
            }
          , Block::Paragraph(text) => {
              html.push_str(&format!(
                "        <p>{}</p>\n",
                escape_html(&text)
              ));
            }
        }
    }

    html.push_str("    </article>\n</body>\n</html>\n");
    html
}
