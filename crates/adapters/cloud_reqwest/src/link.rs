//! `Link` header parsing (RFC 8288), reduced to what pagination needs.

/// Extract the target of the `rel="next"` link from a `Link` header value.
///
/// Link targets are delimited by `<...>`, so commas inside a URL (such as
/// `_include=id,name`) do not split entries.
#[must_use]
pub fn parse_next_link(header: &str) -> Option<String> {
    let mut rest = header;
    while let Some(start) = rest.find('<') {
        let after = &rest[start + 1..];
        let end = after.find('>')?;
        let target = after[..end].trim();
        let tail = &after[end + 1..];
        let params = tail.find('<').map_or(tail, |next| &tail[..next]);
        if params.split(';').any(is_rel_next) {
            return Some(target.to_string());
        }
        rest = &tail[params.len()..];
    }
    None
}

fn is_rel_next(param: &str) -> bool {
    let Some((key, value)) = param.split_once('=') else {
        return false;
    };
    key.trim().eq_ignore_ascii_case("rel")
        && value
            .trim()
            .trim_end_matches(',')
            .trim_matches('"')
            .split_whitespace()
            .any(|rel| rel.eq_ignore_ascii_case("next"))
}
