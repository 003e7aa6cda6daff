/// Convert an identifier to PascalCase.
///
/// Any character that is not alphanumeric separates words, so `blog_post`,
/// `blog-post` and `blog post` all become `BlogPost`. The rest of each word
/// keeps its case (`blogPost` → `BlogPost`).
pub fn to_pascal_case(s: &str) -> String {
    s.split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(upper_first)
        .collect()
}

pub fn upper_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

pub fn lower_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
    }
}
