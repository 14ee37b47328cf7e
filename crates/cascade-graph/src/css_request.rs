use std::sync::LazyLock;

use regex::Regex;

static CSS_LANGS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\.(css|less|sass|scss|styl|stylus|pcss|postcss|sss)(?:$|\?)")
        .expect("CSS language pattern is valid")
});

/// Whether a module id refers to a stylesheet, including preprocessor
/// languages and style sub-requests such as `Page.astro?astro&type=style&lang.css`.
pub fn is_css_request(id: &str) -> bool {
    CSS_LANGS_RE.is_match(id)
}
