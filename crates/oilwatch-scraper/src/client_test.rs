use super::*;

#[test]
fn extract_domain_strips_scheme_and_path() {
    assert_eq!(
        extract_domain("https://www.allstatefuel.com/pricing"),
        "www.allstatefuel.com"
    );
    assert_eq!(extract_domain("http://www.danbelloil.com/"), "www.danbelloil.com");
}

#[test]
fn extract_domain_falls_back_to_input() {
    assert_eq!(extract_domain("not a url"), "not a url");
}

#[test]
fn browser_profile_headers_cover_navigation_fields() {
    let headers = browser_profile_headers();
    assert!(headers.contains_key(reqwest::header::ACCEPT));
    assert!(headers.contains_key(reqwest::header::ACCEPT_LANGUAGE));
    assert!(headers.contains_key(reqwest::header::REFERER));
    assert!(headers.contains_key(reqwest::header::UPGRADE_INSECURE_REQUESTS));
}

#[test]
fn client_builds_with_defaults() {
    let client = PageClient::new(5, "oilwatch-test/0.1", 0, 0);
    assert!(client.is_ok());
}
