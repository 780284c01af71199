use std::io;

use ramhorns::Template;

use crate::error::NotFoundError;
use crate::theme::Theme;
use crate::view::{compile, theme_options, ViewTheme};

pub const NOT_FOUND_TITLE: &str = "Article Not Found";

#[derive(ramhorns::Content)]
struct NotFoundPage {
    theme: &'static str,
    themes: Vec<ViewTheme>,
    title: &'static str,
    message: String,
    requested: Option<String>,
    back_link: &'static str,
}

pub struct NotFoundRenderer<'a> {
    pub template: Template<'a>,
}

impl NotFoundRenderer<'_> {
    pub fn new(tpl_src: &str) -> io::Result<NotFoundRenderer> {
        Ok(NotFoundRenderer {
            template: compile(tpl_src, "not found")?,
        })
    }

    /// `requested` is the id from the route, shown to help track broken links.
    pub fn render(&self, error: &NotFoundError, requested: &str, theme: Theme) -> String {
        self.template.render(&NotFoundPage {
            theme: theme.as_str(),
            themes: theme_options(theme),
            title: NOT_FOUND_TITLE,
            message: error.to_string(),
            requested: Some(requested.trim()).filter(|id| !id.is_empty()).map(str::to_string),
            back_link: "/blog",
        })
    }
}
