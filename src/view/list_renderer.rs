use std::io;

use ramhorns::Template;

use crate::content::Post;
use crate::listing::ListPage;
use crate::theme::Theme;
use crate::view::{compile, theme_options, PostCard, ViewPagination, ViewTheme};

#[derive(ramhorns::Content)]
struct BlogListPage {
    theme: &'static str,
    themes: Vec<ViewTheme>,
    post_list: Vec<PostCard>,
    has_posts: bool,
    pagination: ViewPagination,
}

pub struct ListRenderer<'a> {
    pub template: Template<'a>,
}

pub fn page_link(page: u32) -> String {
    format!("/blog?page={}", page)
}

impl ListRenderer<'_> {
    pub fn new(list_tpl_src: &str) -> io::Result<ListRenderer> {
        Ok(ListRenderer {
            template: compile(list_tpl_src, "blog list")?,
        })
    }

    pub fn render(&self, page: &ListPage<Post>, theme: Theme) -> String {
        let post_list: Vec<PostCard> = page.items.iter().map(|post| PostCard::from(*post)).collect();

        self.template.render(&BlogListPage {
            theme: theme.as_str(),
            themes: theme_options(theme),
            has_posts: !post_list.is_empty(),
            post_list,
            pagination: ViewPagination::new(page, page_link),
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::listing::{select_page, ListState};
    use crate::test_data::POSTS_JSON;

    use super::*;

    const TEMPLATE: &str = "[{{theme}}]{{#post_list}}<{{title}}|{{link}}|{{category}}|{{date}}|{{reading_time}} min read|\
{{#image_url}}img{{/image_url}}{{^image_url}}No Image{{/image_url}}>{{/post_list}}{{^has_posts}}No articles found{{/has_posts}}\
{{#pagination}}{{#show}}Showing {{showing}} of {{total}} articles. Page {{current_page}} of {{page_count}}{{/show}}{{/pagination}}";

    #[test]
    fn render_list() {
        let posts: Vec<Post> = serde_json::from_str(POSTS_JSON).unwrap();
        let renderer = ListRenderer::new(TEMPLATE).unwrap();
        let mut state = ListState::new(2);
        let page = select_page(&posts, &mut state, 2);

        let res = renderer.render(&page, Theme::Dark);
        assert_eq!(res, "[dark]<Untitled Blog|/blog/post-draft|Uncategorized|Unknown Date|1 min read|No Image>\
Showing 1 of 3 articles. Page 2 of 2");
    }

    #[test]
    fn render_empty_list() {
        let posts: Vec<Post> = vec![];
        let renderer = ListRenderer::new(TEMPLATE).unwrap();
        let mut state = ListState::new(4);
        let page = select_page(&posts, &mut state, 1);

        let res = renderer.render(&page, Theme::Light);
        assert_eq!(res, "[light]No articles found");
    }
}
