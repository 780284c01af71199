use std::io;

use ramhorns::Template;

use crate::content::render::{render, RenderNode};
use crate::content::summary::DateStyle;
use crate::content::Post;
use crate::theme::Theme;
use crate::view::{compile, theme_options, ViewTheme};

pub const NO_CONTENT: &str = "No content available for this article.";

#[derive(ramhorns::Content)]
struct ViewText {
    text: String,
}

#[derive(ramhorns::Content)]
struct ViewHeading {
    level: u8,
    text: String,
}

#[derive(ramhorns::Content)]
struct ViewParagraph {
    text: String,
    lead: bool,
}

#[derive(ramhorns::Content)]
struct ViewList {
    ordered: bool,
    items: Vec<ViewText>,
}

#[derive(ramhorns::Content)]
struct ViewImage {
    url: String,
    alt: String,
    caption: Option<String>,
}

/// One body node. Exactly one of the sections is set, so templates can
/// switch on the node kind.
#[derive(ramhorns::Content, Default)]
struct ViewNode {
    heading: Option<ViewHeading>,
    blockquote: Option<ViewText>,
    paragraph: Option<ViewParagraph>,
    list: Option<ViewList>,
    image: Option<ViewImage>,
}

impl From<RenderNode> for ViewNode {
    fn from(node: RenderNode) -> Self {
        match node {
            RenderNode::Heading { level, text } => ViewNode {
                heading: Some(ViewHeading { level, text }),
                ..Default::default()
            },
            RenderNode::Blockquote { text } => ViewNode {
                blockquote: Some(ViewText { text }),
                ..Default::default()
            },
            RenderNode::Paragraph { text, lead } => ViewNode {
                paragraph: Some(ViewParagraph { text, lead }),
                ..Default::default()
            },
            RenderNode::List { ordered, items } => ViewNode {
                list: Some(ViewList {
                    ordered,
                    items: items.into_iter().map(|text| ViewText { text }).collect(),
                }),
                ..Default::default()
            },
            RenderNode::Image { url, alt, caption } => ViewNode {
                image: Some(ViewImage { url, alt, caption }),
                ..Default::default()
            },
        }
    }
}

#[derive(ramhorns::Content)]
struct ViewItem<'a> {
    theme: &'static str,
    themes: Vec<ViewTheme>,
    id: &'a str,
    post_title: &'a str,
    category: &'a str,
    date: String,
    reading_time: u32,
    author: Option<&'a str>,
    image_url: Option<&'a str>,
    excerpt: Option<&'a str>,
    has_content: bool,
    nodes: Vec<ViewNode>,
    no_content: &'static str,
}

pub struct PostRenderer<'a> {
    pub template: Template<'a>,
}

impl PostRenderer<'_> {
    pub fn new(view_tpl_src: &str) -> io::Result<PostRenderer> {
        Ok(PostRenderer {
            template: compile(view_tpl_src, "post view")?,
        })
    }

    pub fn render(&self, post: &Post, theme: Theme) -> String {
        let nodes = render(post.body.as_deref());

        self.template.render(&ViewItem {
            theme: theme.as_str(),
            themes: theme_options(theme),
            id: post.id.0.as_str(),
            post_title: post.title(),
            category: post.category(),
            date: post.date(DateStyle::Long),
            reading_time: post.reading_time(),
            author: post.author_name(),
            image_url: post.image_url(),
            // the full excerpt, not the card preview
            excerpt: post.excerpt.as_deref().filter(|e| !e.is_empty()),
            has_content: nodes.is_some(),
            nodes: nodes.unwrap_or_default().into_iter().map(ViewNode::from).collect(),
            no_content: NO_CONTENT,
        })
    }
}
