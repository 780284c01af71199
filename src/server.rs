use std::io::ErrorKind;
use std::sync::Arc;
use std::{fs, io};

use chrono::{Datelike, Utc};
use ntex::util::Bytes;
use ntex::web;
use ntex::web::HttpRequest;
use ntex_files::NamedFile;
use spdlog::{info, warn};

use crate::config::Config;
use crate::contact::{submit, ContactForm, ContactStatus, EmailJsClient, Mailer};
use crate::listing::{category_options, select_page, ListState};
use crate::query_string::QueryString;
use crate::store::{find_post, load_posts, load_projects, ContentStore, SanityClient};
use crate::theme::Theme;
use crate::view::index_renderer::{Featured, IndexRenderer};
use crate::view::list_renderer::ListRenderer;
use crate::view::notfound_renderer::NotFoundRenderer;
use crate::view::post_renderer::PostRenderer;
use crate::view::project_renderer::ProjectRenderer;

/// Shared by every worker. Nothing in here changes after startup.
pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn ContentStore>,
    pub mailer: Arc<dyn Mailer>,
}

pub enum PostPage {
    Found(String),
    NotFound(String),
}

fn read_template(config: &Config, name: &str) -> io::Result<String> {
    let template_path = config.paths.template_dir.join(name);
    fs::read_to_string(&template_path).map_err(|e| {
        io::Error::new(e.kind(), format!("Error reading template {}: {}", template_path.display(), e))
    })
}

fn get_theme(req: &HttpRequest) -> Theme {
    let header = req.headers().get("cookie").and_then(|value| value.to_str().ok());
    Theme::from_cookie_header(header)
}

fn get_query(req: &HttpRequest) -> QueryString {
    QueryString::from(req.uri().query().unwrap_or(""))
}

/// Where to send the visitor after switching theme. Only paths on this site.
fn back_target(referer: Option<&str>) -> String {
    let path = referer.map(|referer| match referer.split_once("://") {
        Some((_, rest)) => rest.find('/').map(|idx| &rest[idx..]).unwrap_or("/"),
        None => referer,
    });

    match path {
        Some(path) if path.starts_with('/') && !path.starts_with("//") => path.to_string(),
        _ => "/".to_string(),
    }
}

pub async fn render_index(state: &AppState, contact: Option<&ContactStatus>, theme: Theme) -> io::Result<String> {
    let posts = load_posts(state.store.as_ref()).await;
    let projects = load_projects(state.store.as_ref()).await;

    let template_src = read_template(&state.config, "index.tpl")?;
    let renderer = IndexRenderer::new(&template_src)?;
    let featured = Featured {
        posts: &posts,
        projects: &projects,
        post_count: state.config.defaults.home_post_count,
        project_count: state.config.defaults.home_project_count,
    };
    Ok(renderer.render(&featured, contact, theme, Utc::now().year()))
}

pub async fn render_blog_list(state: &AppState, qs: &QueryString, theme: Theme) -> io::Result<String> {
    let posts = load_posts(state.store.as_ref()).await;
    let mut list_state = ListState::new(state.config.defaults.post_page_size);
    let page = select_page(&posts, &mut list_state, qs.get_page());

    let template_src = read_template(&state.config, "bloglist.tpl")?;
    let renderer = ListRenderer::new(&template_src)?;
    Ok(renderer.render(&page, theme))
}

pub async fn render_projects(state: &AppState, qs: &QueryString, theme: Theme) -> io::Result<String> {
    let projects = load_projects(state.store.as_ref()).await;
    let options = category_options(&projects);
    let mut list_state = ListState::new(state.config.defaults.project_page_size);
    list_state.set_filter(qs.get_category());
    let page = select_page(&projects, &mut list_state, qs.get_page());

    let template_src = read_template(&state.config, "projects.tpl")?;
    let renderer = ProjectRenderer::new(&template_src)?;
    Ok(renderer.render(&page, &options, list_state.filter(), theme))
}

pub async fn render_post(state: &AppState, id: &str, theme: Theme) -> io::Result<PostPage> {
    match find_post(state.store.as_ref(), id).await {
        Ok(post) => {
            let template_src = read_template(&state.config, "post.tpl")?;
            let renderer = PostRenderer::new(&template_src)?;
            Ok(PostPage::Found(renderer.render(&post, theme)))
        }
        Err(e) => {
            info!("Blog post {} not shown: {}", id, e);
            let template_src = read_template(&state.config, "notfound.tpl")?;
            let renderer = NotFoundRenderer::new(&template_src)?;
            Ok(PostPage::NotFound(renderer.render(&e, id, theme)))
        }
    }
}

fn html_response(rendered: io::Result<String>, what: &str) -> web::HttpResponse {
    match rendered {
        Ok(body) => web::HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(e) => {
            warn!("Error rendering {}: {}", what, e);
            web::HttpResponse::InternalServerError()
                .body(format!("Error rendering {}: {}", what, e))
        }
    }
}

// Begin: Redirect region --------
#[web::get("/blog/{id}/")]
async fn post_with_slash(path: web::types::Path<String>) -> web::HttpResponse {
    web::HttpResponse::PermanentRedirect()
        .header("Location", format!("/blog/{}", path.into_inner()))
        .content_type("text/html; charset=utf-8")
        .finish()
}

#[web::get("/theme/{name}")]
async fn select_theme(req: HttpRequest, path: web::types::Path<String>) -> web::HttpResponse {
    let theme = Theme::from_cookie(Some(path.as_str()));
    let referer = req.headers().get("referer").and_then(|value| value.to_str().ok());

    web::HttpResponse::SeeOther()
        .header("Set-Cookie", theme.to_cookie())
        .header("Location", back_target(referer))
        .finish()
}
// End: Redirect region --------

#[web::get("/")]
async fn index(req: HttpRequest, state: web::types::State<Arc<AppState>>) -> web::HttpResponse {
    html_response(render_index(&state, None, get_theme(&req)).await, "home page")
}

#[web::get("/blog")]
async fn blog_list(req: HttpRequest, state: web::types::State<Arc<AppState>>) -> web::HttpResponse {
    let qs = get_query(&req);
    html_response(render_blog_list(&state, &qs, get_theme(&req)).await, "blog list")
}

#[web::get("/projects")]
async fn project_list(req: HttpRequest, state: web::types::State<Arc<AppState>>) -> web::HttpResponse {
    let qs = get_query(&req);
    html_response(render_projects(&state, &qs, get_theme(&req)).await, "project list")
}

#[web::get("/blog/{id}")]
async fn blog_post(req: HttpRequest, path: web::types::Path<String>, state: web::types::State<Arc<AppState>>) -> web::HttpResponse {
    let id = path.into_inner();

    match render_post(&state, &id, get_theme(&req)).await {
        Ok(PostPage::Found(body)) => web::HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Ok(PostPage::NotFound(body)) => web::HttpResponse::NotFound()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(e) => html_response(Err(e), "blog post"),
    }
}

#[web::post("/contact")]
async fn contact_submit(req: HttpRequest, body: Bytes, state: web::types::State<Arc<AppState>>) -> web::HttpResponse {
    let form = ContactForm::from_body(&body);
    let status = submit(&form, state.config.email.as_ref(), state.mailer.as_ref()).await;
    html_response(render_index(&state, Some(&status), get_theme(&req)).await, "home page")
}

#[web::get("/public/{file_name}")]
async fn public_files(path: web::types::Path<String>, state: web::types::State<Arc<AppState>>) -> Result<NamedFile, web::Error> {
    if path.contains("../") {
        return Err(web::error::ErrorUnauthorized("Access forbidden").into());
    }

    let file_path = state.config.paths.public_dir.join(path.into_inner());

    Ok(NamedFile::open(file_path)?)
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(index)
        .service(blog_list)
        .service(blog_post)
        .service(post_with_slash)
        .service(project_list)
        .service(contact_submit)
        .service(select_theme)
        .service(public_files);
}

pub async fn server_run(config: Config) -> io::Result<()> {
    let store = SanityClient::new(&config.sanity)
        .map_err(|e| io::Error::new(ErrorKind::Other, format!("Error creating content store client: {}", e)))?;
    let mailer = EmailJsClient::new(config.sanity.timeout_secs)
        .map_err(|e| io::Error::new(ErrorKind::Other, format!("Error creating email client: {}", e)))?;

    if !config.email.as_ref().is_some_and(|email| email.is_complete()) {
        warn!("Email settings are incomplete, the contact form will not deliver messages");
    }
    info!("Reading content from project {} dataset {}", config.sanity.project_id, config.sanity.dataset);

    let bind_addr = config.server.address.clone();
    let bind_port = config.server.port;
    let app_state = Arc::new(AppState {
        config,
        store: Arc::new(store),
        mailer: Arc::new(mailer),
    });

    web::HttpServer::new(move || {
        web::App::new()
            .state(app_state.clone())
            .configure(configure)
    })
        .bind((bind_addr, bind_port))?
        .run()
        .await
}
