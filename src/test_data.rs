#[cfg(test)]
pub const POSTS_JSON: &str = r##"[
  {
    "_id": "post-rust-web",
    "title": "Rust on the web",
    "slug": {"_type": "slug", "current": "rust-on-the-web"},
    "publishedAt": "2024-03-15T09:30:00Z",
    "excerpt": null,
    "category": "Web Development",
    "mainImage": {"asset": {"url": "https://cdn.sanity.io/images/p/d/rust.png", "metadata": {"dimensions": {"width": 1200, "height": 630}}}},
    "author": {"name": "Brian"},
    "body": [
      {"_type": "block", "_key": "a1", "style": "h1", "children": [{"_type": "span", "text": "Why Rust"}]},
      {"_type": "block", "_key": "a2", "style": "normal", "children": [
        {"_type": "span", "text": "Rust gives you"},
        {"_type": "span", "text": "speed and safety."}
      ]},
      {"_type": "list", "_key": "a3", "listItem": "number", "children": [
        {"children": [{"_type": "span", "text": "Fast"}]},
        {"children": [{"_type": "span", "text": "Safe"}]}
      ]},
      {"_type": "image", "_key": "a4", "asset": {"url": "https://cdn.sanity.io/images/p/d/ferris.png"}, "alt": "Ferris"},
      {"_type": "codeSnippet", "_key": "a5", "code": "fn main() {}"},
      {"_type": "block", "_key": "a6", "style": "blockquote", "children": [{"_type": "span", "text": "Fearless concurrency"}]}
    ]
  },
  {
    "_id": "post-design",
    "title": "Designing calm interfaces",
    "slug": null,
    "publishedAt": "2023-11-02",
    "excerpt": "Calm interfaces respect attention: they surface what matters, hide what does not, and never make the reader hunt for the next step in a flow.",
    "category": "UI/UX",
    "mainImage": null,
    "body": []
  },
  {
    "_id": "post-draft",
    "publishedAt": "not-a-date"
  }
]"##;

#[cfg(test)]
pub const PROJECTS_JSON: &str = r##"[
  {
    "_id": "proj-shop",
    "title": "Shop",
    "summary": "An online shop with server-rendered pages.",
    "mainImage": {"asset": {"url": "https://cdn.sanity.io/images/p/d/shop.png"}},
    "tech": ["Rust", "ntex"],
    "category": "Web Development",
    "liveUrl": "https://shop.example.com",
    "repoUrl": "https://github.com/example/shop",
    "publishedAt": "2024-05-01T00:00:00Z"
  },
  {
    "_id": "proj-app",
    "title": "Trail App",
    "summary": "Offline maps for hikers.",
    "tech": null,
    "category": "Mobile Development",
    "liveUrl": null,
    "repoUrl": "https://github.com/example/trail",
    "publishedAt": "2024-02-01T00:00:00Z"
  },
  {
    "_id": "proj-site",
    "title": "Studio Site",
    "summary": "Marketing site for a design studio.",
    "tech": ["HTML", "CSS"],
    "category": "Web Development",
    "publishedAt": "2023-08-10T00:00:00Z"
  },
  {
    "_id": "proj-bare",
    "tech": null
  }
]"##;
