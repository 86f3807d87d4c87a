use maqala::format::{split_blocks, to_plain_text, to_standalone_html, Block};
use maqala::{Dialect, GenerationRequest, GenerationResult, TargetLanguage};

fn result(body: &str) -> GenerationResult
{   GenerationResult
    {   suggested_keywords: "solar, wind".to_string()
      , article_body: body.to_string()
      , title: "Clean Power".to_string()
    }
}

#[test]
fn test_heading_then_paragraph()
{   let request = GenerationRequest::new("energy", TargetLanguage::English);
    let html = to_standalone_html(&result("# Intro\n\nHello world."), &request);

    let heading = html.find("<h1>Intro</h1>").expect("heading rendered");
    let paragraph = html.find("<p>Hello world.</p>").expect("paragraph rendered");
    assert!(heading < paragraph);
}

#[test]
fn test_heading_level_matches_hash_run()
{   let blocks = split_blocks("## Two\n\n### Three\n\n######### Nine");
    assert_eq!(blocks, vec![
      Block::Heading { level: 2, text: "Two".to_string() }
    , Block::Heading { level: 3, text: "Three".to_string() }
    , Block::Heading { level: 6, text: "Nine".to_string() }
    ]);

    let request = GenerationRequest::new("x", TargetLanguage::French);
    let html = to_standalone_html(&result("######### Nine"), &request);
    assert!(html.contains("<h6>Nine</h6>"));
    assert!(!html.contains("<h9>"));
}

#[test]
fn test_blank_chunks_are_dropped()
{   let blocks = split_blocks("\n\nfirst\n\n   \n\nsecond line one\nline two\n\n");
    assert_eq!(blocks, vec![
      Block::Paragraph("first".to_string())
    , Block::Paragraph("second line one\nline two".to_string())
    ]);
}

#[test]
fn test_only_unindented_hash_starts_a_heading()
{   let blocks = split_blocks("Intro\n\n  # indented\n\n\n# Real");
    assert_eq!(blocks, vec![
      Block::Paragraph("Intro".to_string())
    , Block::Paragraph("# indented".to_string())
    , Block::Heading { level: 1, text: "Real".to_string() }
    ]);

    let request = GenerationRequest::new("x", TargetLanguage::English);
    let html = to_standalone_html(&result("  # indented"), &request);
    assert!(html.contains("<p># indented</p>"));
    assert!(!html.contains("<h1>indented</h1>"));
}

#[test]
fn test_plain_text_is_article_body()
{   let body = "# Intro\n\nHello <world>.";
    assert_eq!(to_plain_text(&result(body)), body);
}

#[test]
fn test_arabic_document_is_right_to_left()
{   let request = GenerationRequest::new(
      "طاقة",
      TargetLanguage::Arabic(Dialect::Tunisian)
    );
    let html = to_standalone_html(&result("نص"), &request);
    assert!(html.contains("<html lang=\"ar\">"));
    assert!(html.contains("direction: rtl;"));
    assert!(html.contains("text-align: right;"));
}

#[test]
fn test_latin_documents_are_left_to_right()
{   for language in [TargetLanguage::English, TargetLanguage::French]
    {   let request = GenerationRequest::new("x", language);
        let html = to_standalone_html(&result("text"), &request);
        assert!(html.contains(&format!("<html lang=\"{}\">", language.code())));
        assert!(!html.contains("direction: rtl"));
    }
}

#[test]
fn test_meta_description_truncated_and_escaped()
{   let body = format!("He said \"hi\" {}", "a".repeat(300));
    let request = GenerationRequest::new("x", TargetLanguage::English);
    let html = to_standalone_html(&result(&body), &request);

    let expected = format!("He said &quot;hi&quot; {}", "a".repeat(160 - 13));
    assert!(html.contains(&format!(
      "<meta name=\"description\" content=\"{}\">",
      expected
    )));
}

#[test]
fn test_meta_keywords_prefer_user_keywords()
{   let request = GenerationRequest::new("x", TargetLanguage::English)
      .with_keywords("tidal, geothermal");
    let html = to_standalone_html(&result("text"), &request);
    assert!(html.contains("<meta name=\"keywords\" content=\"tidal, geothermal\">"));
    assert!(!html.contains("solar, wind"));
}

#[test]
fn test_meta_keywords_omitted_when_none()
{   let mut generated = result("text");
    generated.suggested_keywords = String::new();
    let request = GenerationRequest::new("x", TargetLanguage::English);
    let html = to_standalone_html(&generated, &request);
    assert!(!html.contains("name=\"keywords\""));
}

#[test]
fn test_markup_in_article_is_escaped()
{   let mut generated = result("<script>alert(1)</script>\n\n# A & B");
    generated.title = "Tom's <b>".to_string();
    let request = GenerationRequest::new("x", TargetLanguage::English);
    let html = to_standalone_html(&generated, &request);

    assert!(!html.contains("<script>"));
    assert!(html.contains("<p>&lt;script&gt;alert(1)&lt;/script&gt;</p>"));
    assert!(html.contains("<h1>A &amp; B</h1>"));
    assert!(html.contains("<title>Tom&#39;s &lt;b&gt;</title>"));
}

#[test]
fn test_document_shape()
{   let request = GenerationRequest::new("x", TargetLanguage::English);
    let html = to_standalone_html(&result("text"), &request);
    assert!(html.starts_with("<!DOCTYPE html>\n<html lang=\"en\">"));
    assert!(html.contains("<meta charset=\"UTF-8\">"));
    assert!(html.contains("<article>\n        <h1>Clean Power</h1>\n"));
    assert!(html.trim_end().ends_with("</html>"));
}
