//! Dot-delimited logger names.

/// Candidate prefix chain for a logger name, most specific first.
///
/// `"a.b.c"` yields `["a.b.c", "a.b", "a"]`. A name without a dot is its own
/// only candidate. Each step cuts at the last `.`, so empty segments survive
/// the same way a split-and-join would keep them (`"a..b"` yields
/// `["a..b", "a.", "a"]`).
#[must_use]
pub fn candidates(name: &str) -> Vec<&str> {
    let mut chain = vec![name];
    let mut current = name;
    while let Some(idx) = current.rfind('.') {
        current = &current[..idx];
        chain.push(current);
    }
    chain
}

/// Convert a Rust module path (`a::b::c`) into a logger name (`a.b.c`).
#[must_use]
pub fn from_module_path(path: &str) -> String {
    path.replace("::", ".")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn five_segment_chain() {
        assert_eq!(
            candidates("lorem.ipsum.dolor.sit.amet"),
            vec![
                "lorem.ipsum.dolor.sit.amet",
                "lorem.ipsum.dolor.sit",
                "lorem.ipsum.dolor",
                "lorem.ipsum",
                "lorem",
            ]
        );
    }

    #[test]
    fn single_segment_is_its_own_candidate() {
        assert_eq!(candidates("solo"), vec!["solo"]);
    }

    #[test]
    fn empty_segments_are_kept() {
        assert_eq!(candidates("a..b"), vec!["a..b", "a.", "a"]);
        assert_eq!(candidates("a."), vec!["a.", "a"]);
        assert_eq!(candidates(".a"), vec![".a", ""]);
    }

    #[test]
    fn empty_name() {
        assert_eq!(candidates(""), vec![""]);
    }

    #[test]
    fn module_path_conversion() {
        assert_eq!(from_module_path("app::net::http"), "app.net.http");
        assert_eq!(from_module_path("app"), "app");
    }
}
