use clap::Parser;

use crate::bootstrap::bootstrap_cmd;
use crate::posts::posts_cmd;

mod bootstrap;
mod decompress;
mod posts;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
enum Args {
    /// Bootstrap a new site directory with templates, assets and a sample configuration
    Bootstrap(BootstrapArgs),
    /// Print the posts of the content store the way the blog list sees them
    Posts(PostsArgs),
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct BootstrapArgs {
    /// Directory where the new site will be generated
    #[arg(short, long)]
    out_dir: String,
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct PostsArgs {
    /// Config path
    #[arg(short, long)]
    config_path: String,

    /// Also print the derived excerpt of each post
    #[arg(short, long, default_value_t = false)]
    excerpt: bool,
}

#[ntex::main]
async fn main() {
    let args = Args::parse();

    match args {
        Args::Bootstrap(args) => bootstrap_cmd(args),
        Args::Posts(args) => posts_cmd(args).await,
    };
}
