use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

use crate::content::block::{lenient_body, Block};

pub mod block;
pub mod render;
pub mod summary;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct PostId(pub String);

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Slug {
    #[serde(default)]
    pub current: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ImageRef {
    #[serde(default)]
    pub asset: Option<Asset>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Asset {
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Author {
    #[serde(default)]
    pub name: Option<String>,
}

/// A blog post as returned by the post queries.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: PostId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub slug: Option<Slug>,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default, deserialize_with = "lenient_body")]
    pub body: Option<Vec<Block>>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub main_image: Option<ImageRef>,
    #[serde(default)]
    pub author: Option<Author>,
}

/// A portfolio project. Flat fields, no rich text.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub main_image: Option<ImageRef>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tech: Vec<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub live_url: Option<String>,
    #[serde(default)]
    pub repo_url: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl ImageRef {
    pub fn url(&self) -> Option<&str> {
        self.asset.as_ref()
            .and_then(|asset| asset.url.as_deref())
            .filter(|url| !url.is_empty())
    }
}

impl Post {
    pub fn new(id: &str) -> Self {
        Post {
            id: PostId(id.to_string()),
            title: None,
            slug: None,
            published_at: None,
            excerpt: None,
            body: None,
            category: None,
            main_image: None,
            author: None,
        }
    }

    pub fn image_url(&self) -> Option<&str> {
        self.main_image.as_ref().and_then(ImageRef::url)
    }

    pub fn author_name(&self) -> Option<&str> {
        self.author.as_ref()
            .and_then(|author| author.name.as_deref())
            .filter(|name| !name.is_empty())
    }
}

impl Project {
    pub fn image_url(&self) -> Option<&str> {
        self.main_image.as_ref().and_then(ImageRef::url)
    }

    pub fn title(&self) -> &str {
        self.title.as_deref().filter(|t| !t.is_empty()).unwrap_or("Project")
    }

    pub fn published_on(&self) -> Option<NaiveDate> {
        summary::parse_timestamp(self.published_at.as_deref()).ok()
    }
}
