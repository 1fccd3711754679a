pub const POST_TEMPLATE: &str = concat!(
    r#"<article data-scope="post"><h2 data-prop="title">Title</h2>"#,
    r#"<p class=meta>by <span data-prop="author">someone</span></p>"#,
    r#"<div data-prop="body"><p>Body text</p></div></article>"#,
);

pub fn make_posts(posts: usize) -> String {
    let mut html = String::with_capacity(POST_TEMPLATE.len() * posts + 64);
    html.push_str("<html><head><title>Posts</title></head><body data-container=\"main\">");
    for _ in 0..posts {
        html.push_str(POST_TEMPLATE);
    }
    html.push_str("</body></html>");
    html
}
