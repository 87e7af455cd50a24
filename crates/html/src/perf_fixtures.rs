pub const BLOCK_TEMPLATE: &str =
    "<section class=box><p>hello <b>world</b> &amp; more</p><img src=x><!-- c --></section>\n";

pub fn make_blocks(blocks: usize) -> String {
    BLOCK_TEMPLATE.repeat(blocks)
}

/// `blocks` copies of the template wrapped in a full document with a head.
pub fn make_document(blocks: usize) -> String {
    let mut html = String::with_capacity(BLOCK_TEMPLATE.len() * blocks + 96);
    html.push_str("<!DOCTYPE html><html><head><title>bench</title></head><body>\n");
    html.push_str(&make_blocks(blocks));
    html.push_str("</body></html>\n");
    html
}

/// Raw text body full of near-miss close tags.
pub fn make_rawtext_adversarial(bytes: usize) -> String {
    let mut body = String::with_capacity(bytes + 32);
    body.push_str("<script>");
    while body.len() < bytes {
        body.push_str("</scri<pt");
    }
    body.push_str("</script>");
    body
}
