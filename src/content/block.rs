use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// One entry of a post body, as stored in the content store.
///
/// Known kinds are parsed into their typed form. Anything else, including a
/// known kind whose fields don't have the expected shape, becomes
/// `Unsupported` so a new block type added in the editor never breaks a page.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Text(TextBlock),
    List(ListBlock),
    Image(ImageBlock),
    Unsupported { kind: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextStyle {
    Normal,
    Heading1,
    Heading2,
    Heading3,
    Blockquote,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    pub style: TextStyle,
    pub spans: Vec<Span>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Span {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Ordered,
    Unordered,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListBlock {
    pub kind: ListKind,
    pub items: Vec<Vec<Span>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageBlock {
    pub url: String,
    pub alt: Option<String>,
    pub caption: Option<String>,
}

#[derive(Deserialize)]
struct RawTextBlock {
    #[serde(default)]
    style: Option<String>,
    children: Vec<Span>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawListBlock {
    #[serde(default)]
    list_item: Option<String>,
    children: Vec<RawListItem>,
}

#[derive(Deserialize)]
struct RawListItem {
    #[serde(default)]
    children: Vec<Span>,
}

#[derive(Deserialize)]
struct RawImageBlock {
    asset: RawAsset,
    #[serde(default)]
    alt: Option<String>,
    #[serde(default)]
    caption: Option<String>,
}

#[derive(Deserialize)]
struct RawAsset {
    url: String,
}

impl Span {
    pub fn new(text: &str) -> Self {
        Span { text: Some(text.to_string()) }
    }

    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or_default()
    }
}

impl TextStyle {
    fn from_name(name: Option<&str>) -> Self {
        match name {
            Some("h1") => TextStyle::Heading1,
            Some("h2") => TextStyle::Heading2,
            Some("h3") => TextStyle::Heading3,
            Some("blockquote") => TextStyle::Blockquote,
            _ => TextStyle::Normal,
        }
    }
}

impl Block {
    pub fn from_value(value: Value) -> Block {
        let kind = value
            .get("_type")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        let parsed = match kind.as_str() {
            "block" => serde_json::from_value::<RawTextBlock>(value)
                .ok()
                .map(|raw| Block::Text(TextBlock {
                    style: TextStyle::from_name(raw.style.as_deref()),
                    spans: raw.children,
                })),
            "list" => serde_json::from_value::<RawListBlock>(value)
                .ok()
                .map(|raw| Block::List(ListBlock {
                    kind: match raw.list_item.as_deref() {
                        Some("number") => ListKind::Ordered,
                        _ => ListKind::Unordered,
                    },
                    items: raw.children.into_iter().map(|item| item.children).collect(),
                })),
            "image" => serde_json::from_value::<RawImageBlock>(value)
                .ok()
                .map(|raw| Block::Image(ImageBlock {
                    url: raw.asset.url,
                    alt: raw.alt,
                    caption: raw.caption,
                })),
            _ => None,
        };

        parsed.unwrap_or(Block::Unsupported { kind })
    }
}

impl<'de> Deserialize<'de> for Block {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Block::from_value(value))
    }
}

/// Joins the text of every span with a single space.
pub fn join_spans(spans: &[Span]) -> String {
    spans.iter().map(Span::text).collect::<Vec<_>>().join(" ")
}

/// Body fields that are not an array are treated as absent.
pub(crate) fn lenient_body<'de, D>(deserializer: D) -> Result<Option<Vec<Block>>, D::Error>
    where
        D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let body = match value {
        Some(Value::Array(entries)) => Some(entries.into_iter().map(Block::from_value).collect()),
        _ => None,
    };
    Ok(body)
}
