use std::fmt::Write;
use std::path::PathBuf;

use folio::config::read_config;
use folio::content::summary::DateStyle;
use folio::content::Post;
use folio::store::{load_posts, SanityClient};

use crate::PostsArgs;

fn render_line(post: &Post, with_excerpt: bool) -> String {
    let mut buf = String::new();

    let _ = write!(&mut buf, "{:<14} {:<20} {:>3} min  {}  /blog/{}",
                   post.date(DateStyle::Short),
                   post.category(),
                   post.reading_time(),
                   post.title(),
                   post.route_key());
    if with_excerpt {
        let _ = write!(&mut buf, "\n    {}", post.excerpt());
    }
    buf
}

pub async fn posts_cmd(args: PostsArgs) {
    let config = match read_config(&PathBuf::from(&args.config_path)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return;
        }
    };

    let store = match SanityClient::new(&config.sanity) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Error creating content store client: {}", e);
            return;
        }
    };

    let posts = load_posts(&store).await;
    if posts.is_empty() {
        println!("No posts found in dataset {}", config.sanity.dataset);
        return;
    }

    for post in posts.iter() {
        println!("{}", render_line(post, args.excerpt));
    }
    println!("{} posts", posts.len());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_line() {
        let mut post = Post::new("abc");
        post.title = Some("Hello".to_string());
        post.published_at = Some("2024-03-15".to_string());
        post.excerpt = Some("Short intro".to_string());

        let line = render_line(&post, false);
        assert_eq!(line, "Mar 15, 2024   Uncategorized          1 min  Hello  /blog/abc");

        let line = render_line(&post, true);
        assert!(line.ends_with("\n    Short intro"));
    }
}
