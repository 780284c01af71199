use chrono::{DateTime, NaiveDate, Utc};

use crate::content::block::{join_spans, Block};
use crate::content::Post;
use crate::error::FormatError;

pub const EXCERPT_MAX_CHARS: usize = 120;
pub const WORDS_PER_MINUTE: usize = 200;
pub const UNTITLED: &str = "Untitled Blog";
pub const UNCATEGORIZED: &str = "Uncategorized";
pub const UNKNOWN_DATE: &str = "Unknown Date";
pub const EXCERPT_FALLBACK: &str = "Read more about this topic...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateStyle {
    /// Mar 15, 2024
    Short,
    /// March 15, 2024
    Long,
}

/// Cuts `text` to [`EXCERPT_MAX_CHARS`] characters, adding "..." only when
/// something was cut.
pub fn truncate(text: &str) -> String {
    match text.char_indices().nth(EXCERPT_MAX_CHARS) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

fn first_text(body: Option<&[Block]>) -> Option<String> {
    body?.iter().find_map(|block| match block {
        Block::Text(text_block) => Some(join_spans(&text_block.spans)),
        _ => None,
    })
}

pub fn excerpt(post: &Post) -> String {
    if let Some(excerpt) = post.excerpt.as_deref().filter(|e| !e.is_empty()) {
        return truncate(excerpt);
    }

    match first_text(post.body.as_deref()) {
        Some(text) => truncate(&text),
        None => EXCERPT_FALLBACK.to_string(),
    }
}

pub fn word_count(body: &[Block]) -> usize {
    body.iter()
        .map(|block| match block {
            Block::Text(text_block) => text_block.spans.iter()
                .map(|span| span.text().split_whitespace().count())
                .sum(),
            _ => 0,
        })
        .sum()
}

pub fn minutes_for(words: usize) -> u32 {
    words.div_ceil(WORDS_PER_MINUTE).max(1) as u32
}

pub fn reading_time(body: Option<&[Block]>) -> u32 {
    minutes_for(body.map(word_count).unwrap_or(0))
}

pub fn category(post: &Post) -> &str {
    post.category.as_deref()
        .filter(|category| !category.trim().is_empty())
        .unwrap_or(UNCATEGORIZED)
}

pub fn parse_timestamp(timestamp: Option<&str>) -> Result<NaiveDate, FormatError> {
    let timestamp = timestamp.map(str::trim).filter(|ts| !ts.is_empty())
        .ok_or(FormatError::MissingDate)?;

    if let Ok(date_time) = DateTime::parse_from_rfc3339(timestamp) {
        return Ok(date_time.with_timezone(&Utc).date_naive());
    }

    NaiveDate::parse_from_str(timestamp, "%Y-%m-%d")
        .map_err(|_| FormatError::InvalidDate(timestamp.to_string()))
}

pub fn format_date(timestamp: Option<&str>, style: DateStyle) -> String {
    let pattern = match style {
        DateStyle::Short => "%b %-d, %Y",
        DateStyle::Long => "%B %-d, %Y",
    };

    match parse_timestamp(timestamp) {
        Ok(date) => date.format(pattern).to_string(),
        Err(_) => UNKNOWN_DATE.to_string(),
    }
}

impl Post {
    pub fn title(&self) -> &str {
        self.title.as_deref()
            .filter(|title| !title.trim().is_empty())
            .unwrap_or(UNTITLED)
    }

    /// Slug when present, otherwise the document id.
    pub fn route_key(&self) -> &str {
        self.slug.as_ref()
            .and_then(|slug| slug.current.as_deref())
            .filter(|slug| !slug.is_empty())
            .unwrap_or(self.id.0.as_str())
    }

    pub fn excerpt(&self) -> String {
        excerpt(self)
    }

    pub fn reading_time(&self) -> u32 {
        reading_time(self.body.as_deref())
    }

    pub fn category(&self) -> &str {
        category(self)
    }

    pub fn date(&self, style: DateStyle) -> String {
        format_date(self.published_at.as_deref(), style)
    }

    pub fn published_on(&self) -> Option<NaiveDate> {
        parse_timestamp(self.published_at.as_deref()).ok()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::content::Slug;
    use crate::test_data::POSTS_JSON;

    use super::*;

    fn text_block(text: &str) -> Block {
        Block::from_value(json!({"_type": "block", "children": [{"_type": "span", "text": text}]}))
    }

    #[test]
    fn test_excerpt_from_field() {
        let mut post = Post::new("p1");
        post.excerpt = Some("Short and sweet".to_string());
        assert_eq!(excerpt(&post), "Short and sweet");

        post.excerpt = Some("a".repeat(120));
        assert_eq!(excerpt(&post), "a".repeat(120));

        post.excerpt = Some("b".repeat(121));
        assert_eq!(excerpt(&post), format!("{}...", "b".repeat(120)));
    }

    #[test]
    fn test_excerpt_from_body() {
        let mut post = Post::new("p1");
        post.body = Some(vec![
            Block::from_value(json!({"_type": "image", "asset": {"url": "a.png"}})),
            Block::from_value(json!({"_type": "block", "children": [{"text": "Hello"}, {"text": "world"}]})),
            text_block("Not this one"),
        ]);
        assert_eq!(excerpt(&post), "Hello world");

        post.body = Some(vec![text_block(&"word ".repeat(40))]);
        let derived = excerpt(&post);
        assert!(derived.ends_with("..."));
        assert_eq!(derived.chars().count(), 123);
    }

    #[test]
    fn test_excerpt_fallback() {
        let mut post = Post::new("p1");
        assert_eq!(excerpt(&post), EXCERPT_FALLBACK);

        post.body = Some(vec![Block::from_value(json!({"_type": "image", "asset": {"url": "a.png"}}))]);
        assert_eq!(excerpt(&post), EXCERPT_FALLBACK);

        post.body = Some(vec![Block::from_value(json!({"_type": "block"}))]);
        assert_eq!(excerpt(&post), EXCERPT_FALLBACK);
    }

    #[test]
    fn test_excerpt_multibyte() {
        let mut post = Post::new("p1");
        post.excerpt = Some("é".repeat(130));
        let derived = excerpt(&post);
        assert_eq!(derived, format!("{}...", "é".repeat(120)));
    }

    #[test]
    fn test_excerpt_length_bound() {
        let posts: Vec<Post> = serde_json::from_str(POSTS_JSON).unwrap();
        for post in posts.iter() {
            assert!(excerpt(post).chars().count() <= 123);
        }
        assert_eq!(posts[0].excerpt(), "Why Rust");
        assert!(posts[1].excerpt().ends_with("..."));
        assert_eq!(posts[2].excerpt(), EXCERPT_FALLBACK);
    }

    #[test]
    fn test_reading_time() {
        assert_eq!(reading_time(None), 1);
        assert_eq!(reading_time(Some(Vec::new().as_slice())), 1);

        let body = vec![text_block(&"word ".repeat(200))];
        assert_eq!(reading_time(Some(body.as_slice())), 1);

        let body = vec![text_block(&"word ".repeat(201))];
        assert_eq!(reading_time(Some(body.as_slice())), 2);

        let body = vec![
            text_block("  spaced   out\twords \n here  "),
            Block::from_value(json!({"_type": "list", "children": [{"children": [{"text": "not counted"}]}]})),
            Block::from_value(json!({"_type": "block", "children": [{"_type": "span"}]})),
            Block::from_value(json!({"_type": "block", "children": 7})),
        ];
        assert_eq!(word_count(&body), 4);
    }

    #[test]
    fn test_minutes_for() {
        for words in [0, 1, 199, 200, 201, 399, 400, 401, 10_000] {
            let expected = std::cmp::max(1, (words as f64 / 200.0).ceil() as u32);
            assert_eq!(minutes_for(words), expected);
        }
    }

    #[test]
    fn test_category() {
        let mut post = Post::new("p1");
        assert_eq!(category(&post), "Uncategorized");
        post.category = Some("".to_string());
        assert_eq!(category(&post), "Uncategorized");
        post.category = Some("Web Development".to_string());
        assert_eq!(category(&post), "Web Development");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(None, DateStyle::Short), "Unknown Date");
        assert_eq!(format_date(Some("not-a-date"), DateStyle::Short), "Unknown Date");
        assert_eq!(format_date(Some(""), DateStyle::Long), "Unknown Date");

        let short = format_date(Some("2024-03-15T00:00:00Z"), DateStyle::Short);
        assert_eq!(short, "Mar 15, 2024");
        assert!(short.contains("Mar") && short.contains("15") && short.contains("2024"));

        assert_eq!(format_date(Some("2024-03-05T10:00:00.000Z"), DateStyle::Long), "March 5, 2024");
        assert_eq!(format_date(Some("2023-11-02"), DateStyle::Short), "Nov 2, 2023");
    }

    #[test]
    fn test_parse_timestamp() {
        assert_eq!(parse_timestamp(None), Err(FormatError::MissingDate));
        assert_eq!(parse_timestamp(Some("yesterday")), Err(FormatError::InvalidDate("yesterday".to_string())));
        assert_eq!(parse_timestamp(Some("2024-03-15T23:30:00-05:00")),
                   Ok(NaiveDate::from_ymd_opt(2024, 3, 16).unwrap()));
    }

    #[test]
    fn test_title_and_route_key() {
        let mut post = Post::new("abc123");
        assert_eq!(post.title(), "Untitled Blog");
        assert_eq!(post.route_key(), "abc123");

        post.title = Some("Hello".to_string());
        post.slug = Some(Slug { current: Some("hello".to_string()) });
        assert_eq!(post.title(), "Hello");
        assert_eq!(post.route_key(), "hello");

        post.slug = Some(Slug { current: None });
        assert_eq!(post.route_key(), "abc123");
    }
}
