use std::io;

use ramhorns::Template;

use crate::content::Project;
use crate::listing::{CategoryFilter, ListPage};
use crate::theme::Theme;
use crate::view::{compile, theme_options, ProjectCard, ViewPagination, ViewTheme};

#[derive(ramhorns::Content)]
struct ViewCategory {
    name: String,
    label: String,
    link: String,
    active: bool,
}

#[derive(ramhorns::Content)]
struct ProjectListPage {
    theme: &'static str,
    themes: Vec<ViewTheme>,
    categories: Vec<ViewCategory>,
    project_list: Vec<ProjectCard>,
    has_projects: bool,
    pagination: ViewPagination,
}

pub struct ProjectRenderer<'a> {
    pub template: Template<'a>,
}

/// "web Development" -> "Web Development"
fn capitalize(category: &str) -> String {
    let mut chars = category.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn page_link(filter: &CategoryFilter, page: u32) -> String {
    let mut params = vec![];
    if let CategoryFilter::Only(category) = filter {
        params.push(("category", category.clone()));
    }
    params.push(("page", page.to_string()));

    match serde_urlencoded::to_string(&params) {
        Ok(query) => format!("/projects?{}", query),
        Err(_) => "/projects".to_string(),
    }
}

impl ProjectRenderer<'_> {
    pub fn new(tpl_src: &str) -> io::Result<ProjectRenderer> {
        Ok(ProjectRenderer {
            template: compile(tpl_src, "project list")?,
        })
    }

    pub fn render(&self, page: &ListPage<Project>, options: &[String], filter: &CategoryFilter, theme: Theme) -> String {
        let categories = options.iter()
            .map(|option| {
                let option_filter = CategoryFilter::from_param(Some(option.as_str()));
                ViewCategory {
                    name: option.clone(),
                    label: capitalize(option),
                    link: page_link(&option_filter, 1),
                    active: option_filter == *filter,
                }
            })
            .collect();

        let project_list: Vec<ProjectCard> = page.items.iter().map(|project| ProjectCard::from(*project)).collect();

        self.template.render(&ProjectListPage {
            theme: theme.as_str(),
            themes: theme_options(theme),
            categories,
            has_projects: !project_list.is_empty(),
            project_list,
            pagination: ViewPagination::new(page, |n| page_link(filter, n)),
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::listing::{category_options, select_page, ListState};
    use crate::test_data::PROJECTS_JSON;

    use super::*;

    const TEMPLATE: &str = "{{#categories}}[{{label}}{{#active}}*{{/active}}]({{link}}){{/categories}}|\
{{#project_list}}<{{title}}:{{#tech}}#{{tag}}{{/tech}}{{#live_url}} live{{/live_url}}{{#repo_url}} code{{/repo_url}}>{{/project_list}}\
{{^has_projects}}No projects found{{/has_projects}}";

    #[test]
    fn test_page_link() {
        assert_eq!(page_link(&CategoryFilter::All, 2), "/projects?page=2");
        assert_eq!(page_link(&CategoryFilter::Only("UI/UX".to_string()), 1), "/projects?category=UI%2FUX&page=1");
        assert_eq!(page_link(&CategoryFilter::Only("Web Development".to_string()), 3),
                   "/projects?category=Web+Development&page=3");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("all"), "All");
        assert_eq!(capitalize("ébène"), "Ébène");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn render_projects() {
        let projects: Vec<Project> = serde_json::from_str(PROJECTS_JSON).unwrap();
        let options = category_options(&projects);
        let renderer = ProjectRenderer::new(TEMPLATE).unwrap();

        let mut state = ListState::new(6);
        state.set_filter(CategoryFilter::Only("Web Development".to_string()));
        let page = select_page(&projects, &mut state, 1);

        let res = renderer.render(&page, &options, state.filter(), Theme::Light);
        assert_eq!(res, "[All](/projects?page=1)\
[Web Development*](/projects?category=Web+Development&amp;page=1)\
[Mobile Development](/projects?category=Mobile+Development&amp;page=1)|\
<Shop:#Rust#ntex live code><Studio Site:#HTML#CSS>");
    }

    #[test]
    fn render_no_match() {
        let projects: Vec<Project> = serde_json::from_str(PROJECTS_JSON).unwrap();
        let renderer = ProjectRenderer::new(TEMPLATE).unwrap();
        let mut state = ListState::new(6);
        state.set_filter(CategoryFilter::Only("Games".to_string()));
        let page = select_page(&projects, &mut state, 1);

        let res = renderer.render(&page, &[], state.filter(), Theme::Light);
        assert_eq!(res, "|No projects found");
    }
}
