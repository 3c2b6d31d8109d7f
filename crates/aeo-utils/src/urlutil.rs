/// A minimal "registrable domain" extraction: last two labels of the host,
/// except for a short list of common two-part public suffixes (`co.uk`,
/// `com.au`, ...). Good enough for same-site URL discovery without vendoring
/// a full public-suffix list.
const TWO_LABEL_SUFFIXES: &[&str] = &["co.uk", "com.au", "co.jp", "co.nz", "com.br", "co.in"];

pub fn registrable_domain(host: &str) -> String {
    let host = host.trim_end_matches('.').to_lowercase();
    let labels: Vec<&str> = host.split('.').collect();
    if labels.len() <= 2 {
        return host;
    }

    let last_two = labels[labels.len() - 2..].join(".");
    if TWO_LABEL_SUFFIXES.contains(&last_two.as_str()) && labels.len() >= 3 {
        return labels[labels.len() - 3..].join(".");
    }
    last_two
}

pub fn is_same_registrable_domain(host_a: &str, host_b: &str) -> bool {
    registrable_domain(host_a) == registrable_domain(host_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_www_and_subdomains_down_to_registrable_domain() {
        assert_eq!(registrable_domain("www.example.com"), "example.com");
        assert_eq!(registrable_domain("blog.example.com"), "example.com");
        assert_eq!(registrable_domain("example.com"), "example.com");
    }

    #[test]
    fn handles_two_label_public_suffixes() {
        assert_eq!(registrable_domain("www.example.co.uk"), "example.co.uk");
    }

    #[test]
    fn same_registrable_domain_ignores_subdomain() {
        assert!(is_same_registrable_domain("blog.example.com", "shop.example.com"));
        assert!(!is_same_registrable_domain("example.com", "example.org"));
    }
}
