use crate::content::block::{join_spans, Block, ListKind, TextStyle};

pub const DEFAULT_IMAGE_ALT: &str = "Blog content image";

#[derive(Debug, Clone, PartialEq)]
pub enum RenderNode {
    Heading { level: u8, text: String },
    Blockquote { text: String },
    Paragraph { text: String, lead: bool },
    List { ordered: bool, items: Vec<String> },
    Image { url: String, alt: String, caption: Option<String> },
}

/// Turns a post body into render nodes.
///
/// Returns `None` when there is no body to show, so callers can tell an
/// empty article apart from one that is still loading. Unsupported blocks
/// produce no node.
pub fn render(body: Option<&[Block]>) -> Option<Vec<RenderNode>> {
    let body = body.filter(|blocks| !blocks.is_empty())?;

    let nodes = body.iter()
        .enumerate()
        .filter_map(|(index, block)| render_block(index, block))
        .collect();
    Some(nodes)
}

fn render_block(index: usize, block: &Block) -> Option<RenderNode> {
    let node = match block {
        Block::Text(text_block) => {
            let text = join_spans(&text_block.spans);
            match text_block.style {
                TextStyle::Heading1 => RenderNode::Heading { level: 1, text },
                TextStyle::Heading2 => RenderNode::Heading { level: 2, text },
                TextStyle::Heading3 => RenderNode::Heading { level: 3, text },
                TextStyle::Blockquote => RenderNode::Blockquote { text },
                TextStyle::Normal => RenderNode::Paragraph { text, lead: index == 0 },
            }
        }
        Block::List(list) => RenderNode::List {
            ordered: list.kind == ListKind::Ordered,
            items: list.items.iter().map(|spans| join_spans(spans)).collect(),
        },
        Block::Image(image) => RenderNode::Image {
            url: image.url.clone(),
            alt: image.alt.clone()
                .filter(|alt| !alt.is_empty())
                .unwrap_or_else(|| DEFAULT_IMAGE_ALT.to_string()),
            caption: image.caption.clone().filter(|caption| !caption.is_empty()),
        },
        Block::Unsupported { .. } => return None,
    };
    Some(node)
}
