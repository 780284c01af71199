use std::io;
use std::io::ErrorKind;

use ramhorns::Template;

use crate::content::summary::{DateStyle, EXCERPT_MAX_CHARS};
use crate::content::{Post, Project};
use crate::listing::ListPage;
use crate::theme::Theme;

pub mod index_renderer;
pub mod list_renderer;
pub mod notfound_renderer;
pub mod post_renderer;
pub mod project_renderer;

pub(crate) fn compile<'a>(src: &'a str, name: &str) -> io::Result<Template<'a>> {
    Template::new(src).map_err(|e| {
        io::Error::new(ErrorKind::InvalidInput, format!("Error parsing {} template: {}", name, e))
    })
}

#[derive(ramhorns::Content)]
pub struct ViewTheme {
    name: &'static str,
    label: &'static str,
    active: bool,
    /// Target of the single-click toggle.
    next: bool,
}

pub fn theme_options(current: Theme) -> Vec<ViewTheme> {
    Theme::ALL.iter()
        .map(|theme| ViewTheme {
            name: theme.as_str(),
            label: theme.label(),
            active: *theme == current,
            next: *theme == current.next(),
        })
        .collect()
}

#[derive(ramhorns::Content)]
pub struct ViewTag {
    tag: String,
}

#[derive(ramhorns::Content)]
pub struct PostCard {
    link: String,
    title: String,
    excerpt: String,
    category: String,
    date: String,
    reading_time: u32,
    image_url: Option<String>,
}

impl From<&Post> for PostCard {
    fn from(post: &Post) -> Self {
        PostCard {
            link: format!("/blog/{}", post.route_key()),
            title: post.title().to_string(),
            excerpt: post.excerpt(),
            category: post.category().to_string(),
            date: post.date(DateStyle::Short),
            reading_time: post.reading_time(),
            image_url: post.image_url().map(str::to_string),
        }
    }
}

#[derive(ramhorns::Content)]
pub struct ProjectCard {
    title: String,
    summary: Option<String>,
    category: Option<String>,
    image_url: Option<String>,
    tech: Vec<ViewTag>,
    live_url: Option<String>,
    repo_url: Option<String>,
}

/// Project summaries on cards are always cut short and end in "...".
pub fn project_summary(summary: Option<&str>) -> Option<String> {
    let summary = summary.filter(|s| !s.trim().is_empty())?;
    let short: String = summary.chars().take(EXCERPT_MAX_CHARS).collect();
    Some(format!("{}...", short))
}

fn non_empty(value: Option<&String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty()).cloned()
}

impl From<&Project> for ProjectCard {
    fn from(project: &Project) -> Self {
        ProjectCard {
            title: project.title().to_string(),
            summary: project_summary(project.summary.as_deref()),
            category: non_empty(project.category.as_ref()),
            image_url: project.image_url().map(str::to_string),
            tech: project.tech.iter().map(|t| ViewTag { tag: t.clone() }).collect(),
            live_url: non_empty(project.live_url.as_ref()),
            repo_url: non_empty(project.repo_url.as_ref()),
        }
    }
}

#[derive(ramhorns::Content)]
pub struct ViewPageNumber {
    number: u32,
    current: bool,
    link: String,
}

/// Pagination controls. `show` is false when everything fits on one page.
#[derive(ramhorns::Content)]
pub struct ViewPagination {
    show: bool,
    showing: usize,
    total: usize,
    current_page: u32,
    page_count: u32,
    has_prev: bool,
    has_next: bool,
    prev_link: String,
    next_link: String,
    pages: Vec<ViewPageNumber>,
}

impl ViewPagination {
    pub fn new<T, F>(page: &ListPage<T>, link: F) -> Self
        where
            F: Fn(u32) -> String,
    {
        let pages = (1..=page.page_count)
            .map(|number| ViewPageNumber {
                number,
                current: number == page.current_page,
                link: link(number),
            })
            .collect();

        ViewPagination {
            show: page.needs_pagination(),
            showing: page.items.len(),
            total: page.total,
            current_page: page.current_page,
            page_count: page.page_count,
            has_prev: page.has_prev(),
            has_next: page.has_next(),
            prev_link: link(page.current_page.saturating_sub(1).max(1)),
            next_link: link((page.current_page + 1).min(page.page_count.max(1))),
            pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::listing::{select_page, ListState};
    use crate::test_data::{POSTS_JSON, PROJECTS_JSON};

    use super::*;

    #[test]
    fn test_post_card() {
        let posts: Vec<Post> = serde_json::from_str(POSTS_JSON).unwrap();
        let card = PostCard::from(&posts[0]);
        assert_eq!(card.link, "/blog/rust-on-the-web");
        assert_eq!(card.date, "Mar 15, 2024");
        assert_eq!(card.reading_time, 1);

        let card = PostCard::from(&posts[2]);
        assert_eq!(card.link, "/blog/post-draft");
        assert_eq!(card.title, "Untitled Blog");
        assert_eq!(card.category, "Uncategorized");
        assert_eq!(card.date, "Unknown Date");
        assert_eq!(card.image_url, None);
    }

    #[test]
    fn test_project_summary() {
        assert_eq!(project_summary(None), None);
        assert_eq!(project_summary(Some("")), None);
        assert_eq!(project_summary(Some("A small shop")), Some("A small shop...".to_string()));

        let long = "x".repeat(150);
        assert_eq!(project_summary(Some(&long)), Some(format!("{}...", "x".repeat(120))));

        let dotted = format!("{}...", "y".repeat(117));
        assert_eq!(project_summary(Some(&dotted)), Some(format!("{}...", dotted)));
    }

    #[test]
    fn test_project_card() {
        let projects: Vec<Project> = serde_json::from_str(PROJECTS_JSON).unwrap();
        let card = ProjectCard::from(&projects[0]);
        assert_eq!(card.tech.len(), 2);
        assert_eq!(card.live_url.as_deref(), Some("https://shop.example.com"));

        let card = ProjectCard::from(&projects[3]);
        assert_eq!(card.title, "Project");
        assert_eq!(card.category, None);
        assert!(card.tech.is_empty());
    }

    #[test]
    fn test_pagination() {
        let items: Vec<Post> = (0..10).map(|i| Post::new(&format!("p{}", i))).collect();
        let mut state = ListState::new(4);
        let page = select_page(&items, &mut state, 2);
        let view = ViewPagination::new(&page, |n| format!("/blog?page={}", n));

        assert!(view.show);
        assert_eq!(view.showing, 4);
        assert_eq!(view.total, 10);
        assert_eq!(view.page_count, 3);
        assert_eq!(view.prev_link, "/blog?page=1");
        assert_eq!(view.next_link, "/blog?page=3");
        assert!(view.pages[1].current);
        assert!(!view.pages[0].current);

        let few = &items[..3];
        let mut state = ListState::new(4);
        let page = select_page(few, &mut state, 1);
        let view = ViewPagination::new(&page, |n| format!("/blog?page={}", n));
        assert!(!view.show);
        assert!(!view.has_prev && !view.has_next);
    }

    #[test]
    fn test_theme_options() {
        let options = theme_options(Theme::Green);
        let active: Vec<&str> = options.iter().filter(|o| o.active).map(|o| o.name).collect();
        assert_eq!(active, ["green"]);
        assert_eq!(options.len(), 3);

        let next: Vec<&str> = options.iter().filter(|o| o.next).map(|o| o.name).collect();
        assert_eq!(next, ["light"]);
        let next: Vec<&str> = theme_options(Theme::Light).iter().filter(|o| o.next).map(|o| o.name).collect();
        assert_eq!(next, ["dark"]);
    }
}
