use std::io;

use ramhorns::Template;

use crate::contact::ContactStatus;
use crate::content::{Post, Project};
use crate::theme::Theme;
use crate::view::{compile, theme_options, PostCard, ProjectCard, ViewTheme};

#[derive(ramhorns::Content)]
struct ViewContactStatus {
    success: bool,
    title: &'static str,
    message: String,
}

#[derive(ramhorns::Content)]
struct IndexPage {
    theme: &'static str,
    themes: Vec<ViewTheme>,
    post_list: Vec<PostCard>,
    has_posts: bool,
    project_list: Vec<ProjectCard>,
    has_projects: bool,
    contact_status: Option<ViewContactStatus>,
    year: i32,
}

/// What the home page shows: the newest few posts and projects.
pub struct Featured<'a> {
    pub posts: &'a [Post],
    pub projects: &'a [Project],
    pub post_count: usize,
    pub project_count: usize,
}

pub struct IndexRenderer<'a> {
    pub template: Template<'a>,
}

impl IndexRenderer<'_> {
    pub fn new(tpl_src: &str) -> io::Result<IndexRenderer> {
        Ok(IndexRenderer {
            template: compile(tpl_src, "index")?,
        })
    }

    pub fn render(&self, featured: &Featured, contact: Option<&ContactStatus>, theme: Theme, year: i32) -> String {
        let post_list: Vec<PostCard> = featured.posts.iter()
            .take(featured.post_count)
            .map(PostCard::from)
            .collect();
        let project_list: Vec<ProjectCard> = featured.projects.iter()
            .take(featured.project_count)
            .map(ProjectCard::from)
            .collect();

        self.template.render(&IndexPage {
            theme: theme.as_str(),
            themes: theme_options(theme),
            has_posts: !post_list.is_empty(),
            post_list,
            has_projects: !project_list.is_empty(),
            project_list,
            contact_status: contact.map(|status| ViewContactStatus {
                success: status.is_success(),
                title: status.title(),
                message: status.message(),
            }),
            year,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::error::ContactError;
    use crate::test_data::{POSTS_JSON, PROJECTS_JSON};

    use super::*;

    const TEMPLATE: &str = "{{#themes}}{{#active}}[{{label}}]{{/active}}{{/themes}}\
{{#post_list}}<{{title}}>{{/post_list}}|{{#project_list}}<{{title}}>{{/project_list}}|\
{{#contact_status}}{{#success}}ok{{/success}}{{^success}}err{{/success}}: {{message}}{{/contact_status}}|{{year}}";

    #[test]
    fn render_index() {
        let posts: Vec<Post> = serde_json::from_str(POSTS_JSON).unwrap();
        let projects: Vec<Project> = serde_json::from_str(PROJECTS_JSON).unwrap();
        let renderer = IndexRenderer::new(TEMPLATE).unwrap();
        let featured = Featured { posts: &posts, projects: &projects, post_count: 2, project_count: 3 };

        let res = renderer.render(&featured, None, Theme::Green, 2026);
        assert_eq!(res, "[Green]<Rust on the web><Designing calm interfaces>|<Shop><Trail App><Studio Site>||2026");
    }

    #[test]
    fn render_contact_status() {
        let renderer = IndexRenderer::new(TEMPLATE).unwrap();
        let featured = Featured { posts: &[], projects: &[], post_count: 4, project_count: 3 };

        let status = ContactStatus::Failed(ContactError::InvalidEmail);
        let res = renderer.render(&featured, Some(&status), Theme::Light, 2026);
        assert_eq!(res, "[Light]||err: Please enter a valid email address.|2026");
    }
}
