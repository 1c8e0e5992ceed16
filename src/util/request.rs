//! Method and path helpers.

/// Methods accepted by [`is_valid_http_method`].
pub const STANDARD_METHODS: [&str; 7] = ["GET", "POST", "PUT", "DELETE", "PATCH", "HEAD", "OPTIONS"];

/// Case-insensitive membership in [`STANDARD_METHODS`].
pub fn is_valid_http_method(method: &str) -> bool {
    STANDARD_METHODS
        .iter()
        .any(|m| m.eq_ignore_ascii_case(method))
}

/// Collapse repeated `/`, drop one trailing `/`, and map empty to `/`.
pub fn sanitize_path(path: &str) -> String {
    let mut collapsed = String::with_capacity(path.len());
    let mut previous_slash = false;
    for c in path.chars() {
        if c == '/' {
            if !previous_slash {
                collapsed.push(c);
            }
            previous_slash = true;
        } else {
            collapsed.push(c);
            previous_slash = false;
        }
    }

    if collapsed.ends_with('/') {
        collapsed.pop();
    }
    if collapsed.is_empty() {
        collapsed.push('/');
    }
    collapsed
}
